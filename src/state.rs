use std::path::{Path, PathBuf};

use crate::data::cuts::load_tree_file;
use crate::scene::CutScene;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// What is drawn: projected series and cut lines.
    pub scene: CutScene,

    /// Per-series visibility, parallel to `scene.series`.
    pub series_visible: Vec<bool>,

    /// Whether the cut lines are drawn.
    pub show_cuts: bool,

    /// Tree file the current cuts came from.
    pub tree_path: Option<PathBuf>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(scene: CutScene, tree_path: Option<PathBuf>) -> Self {
        Self {
            series_visible: vec![true; scene.series.len()],
            show_cuts: true,
            scene,
            tree_path,
            status_message: None,
        }
    }

    /// Re-extract the cuts from another tree file, keeping the old ones on failure.
    pub fn reload_cuts(&mut self, path: &Path) {
        match load_tree_file(path) {
            Ok(cuts) => {
                self.scene.set_cuts(&cuts);
                self.tree_path = Some(path.to_path_buf());
                self.show_cuts = true;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load tree file: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Number of cut lines per axis, `None` without a tree file.
    pub fn cut_counts(&self) -> Option<(usize, usize)> {
        self.scene
            .cuts
            .as_ref()
            .map(|c| (c.vertical.len(), c.horizontal.len()))
    }
}
