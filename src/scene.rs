use eframe::egui::Color32;
use thiserror::Error;

use crate::color::{PointStyle, color_code, with_alpha};
use crate::data::classes::{all_points, split_by_class};
use crate::data::cuts::CutSet;
use crate::data::model::ResultsTable;

const TIMESLIDE_STYLE: &str = "xk";
const INJECTION_STYLE: &str = "+r";
const ZERO_LAG_STYLE: &str = ".g";
const CUT_ALPHA: f32 = 0.2;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Invalid dimensions given to plot-cuts option")]
    InvalidDimensions,
    #[error("invalid point style '{0}'")]
    Style(&'static str),
    #[error(transparent)]
    Data(#[from] anyhow::Error),
}

// ---------------------------------------------------------------------------
// Axis scaling
// ---------------------------------------------------------------------------

/// How an axis maps data values onto plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    /// Plotted as `log10(v)`; non-positive values have no position.
    Log,
}

impl AxisScale {
    pub fn from_log_flag(log: bool) -> Self {
        if log { AxisScale::Log } else { AxisScale::Linear }
    }

    /// Data value → plot coordinate, `None` when the value cannot be shown.
    pub fn project(self, v: f64) -> Option<f64> {
        match self {
            AxisScale::Linear => v.is_finite().then_some(v),
            AxisScale::Log => (v > 0.0 && v.is_finite()).then(|| v.log10()),
        }
    }

    /// Plot coordinate → data value, for tick and hover labels.
    pub fn unproject(self, coord: f64) -> f64 {
        match self {
            AxisScale::Linear => coord,
            AxisScale::Log => 10f64.powf(coord),
        }
    }

    pub fn is_log(self) -> bool {
        self == AxisScale::Log
    }
}

// ---------------------------------------------------------------------------
// Scene contents
// ---------------------------------------------------------------------------

/// One scatter series, already projected to plot coordinates.
#[derive(Debug, Clone)]
pub struct Series {
    pub name: &'static str,
    pub style: PointStyle,
    pub points: Vec<[f64; 2]>,
    /// Rows that could not be placed on a log axis.
    pub dropped: usize,
}

/// Cut boundaries, already projected to plot coordinates.
#[derive(Debug, Clone)]
pub struct CutLines {
    /// Vertical lines: cuts on the x dimension.
    pub vertical: Vec<f64>,
    /// Horizontal lines: cuts on the y dimension.
    pub horizontal: Vec<f64>,
    pub color: Color32,
}

/// Everything the viewer draws, independent of rendering.
#[derive(Debug, Clone)]
pub struct CutScene {
    pub x_name: String,
    pub y_name: String,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
    pub series: Vec<Series>,
    pub cuts: Option<CutLines>,
}

/// Inputs for [`CutScene::build`].
pub struct SceneInputs<'a> {
    pub results: &'a ResultsTable,
    pub zero_lag: Option<&'a ResultsTable>,
    pub cuts: Option<&'a CutSet>,
    pub x_name: &'a str,
    pub y_name: &'a str,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
}

impl CutScene {
    pub fn build(inputs: SceneInputs<'_>) -> Result<Self, SceneError> {
        let (Some(&x), Some(&y)) = (
            inputs.results.index.get(inputs.x_name),
            inputs.results.index.get(inputs.y_name),
        ) else {
            return Err(SceneError::InvalidDimensions);
        };

        let split = split_by_class(inputs.results, x, y)?;
        let mut scene = CutScene {
            x_name: inputs.x_name.to_string(),
            y_name: inputs.y_name.to_string(),
            x_scale: inputs.x_scale,
            y_scale: inputs.y_scale,
            series: Vec::new(),
            cuts: None,
        };

        scene.push_series("Timeslides", TIMESLIDE_STYLE, &split.timeslides)?;
        scene.push_series("Injections", INJECTION_STYLE, &split.injections)?;

        if let Some(zero) = inputs.zero_lag {
            let (Some(&zx), Some(&zy)) =
                (zero.index.get(inputs.x_name), zero.index.get(inputs.y_name))
            else {
                return Err(SceneError::InvalidDimensions);
            };
            scene.push_series("Zero lag", ZERO_LAG_STYLE, &all_points(zero, zx, zy))?;
        }

        if let Some(cuts) = inputs.cuts {
            scene.set_cuts(cuts);
        }

        Ok(scene)
    }

    /// Replace the cut lines with those of another forest.
    pub fn set_cuts(&mut self, cuts: &CutSet) {
        let project = |scale: AxisScale, values: Vec<f64>| -> Vec<f64> {
            values.into_iter().filter_map(|v| scale.project(v)).collect()
        };
        self.cuts = Some(CutLines {
            vertical: project(self.x_scale, cuts.cuts_on(&self.x_name)),
            horizontal: project(self.y_scale, cuts.cuts_on(&self.y_name)),
            color: color_code('b').map_or(Color32::BLUE, |c| with_alpha(c, CUT_ALPHA)),
        });
    }

    pub fn title(&self) -> String {
        match self.cuts {
            Some(_) => format!(
                "Decision tree cuts on \"{}\" and \"{}\" dimensions",
                self.x_name, self.y_name
            ),
            None => format!(
                "Triggers in the \"{}\" and \"{}\" dimensions",
                self.x_name, self.y_name
            ),
        }
    }

    fn push_series(
        &mut self,
        name: &'static str,
        fmt: &'static str,
        raw: &[[f64; 2]],
    ) -> Result<(), SceneError> {
        let style = PointStyle::parse(fmt).ok_or(SceneError::Style(fmt))?;
        let points: Vec<[f64; 2]> = raw
            .iter()
            .filter_map(|&[x, y]| Some([self.x_scale.project(x)?, self.y_scale.project(y)?]))
            .collect();
        let dropped = raw.len() - points.len();
        if dropped > 0 {
            log::warn!("{name}: {dropped} points have no position on a log axis and are hidden");
        }
        self.series.push(Series {
            name,
            style,
            points,
            dropped,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::cuts::Cut;

    fn results() -> ResultsTable {
        ResultsTable::from_rows(
            vec!["index".into(), "class".into(), "snr".into(), "chisq".into()],
            vec![
                vec![0.0, 0.0, 10.0, 100.0],
                vec![1.0, 1.0, 1000.0, 10.0],
                vec![2.0, 0.0, 0.0, 1.0],
            ],
        )
        .unwrap()
    }

    fn forest() -> CutSet {
        CutSet {
            cuts: vec![
                Cut { dim: 0, value: 100.0 },
                Cut { dim: 1, value: 10.0 },
                Cut { dim: 0, value: -5.0 },
            ],
            dimensions: BTreeMap::from([("snr".to_string(), 0), ("chisq".to_string(), 1)]),
        }
    }

    fn inputs<'a>(
        results: &'a ResultsTable,
        cuts: Option<&'a CutSet>,
        scale: AxisScale,
    ) -> SceneInputs<'a> {
        SceneInputs {
            results,
            zero_lag: None,
            cuts,
            x_name: "snr",
            y_name: "chisq",
            x_scale: scale,
            y_scale: scale,
        }
    }

    #[test]
    fn unknown_dimension_is_rejected() {
        let table = results();
        let mut bad = inputs(&table, None, AxisScale::Linear);
        bad.y_name = "effective_distance";
        let err = CutScene::build(bad).unwrap_err();
        assert_eq!(err.to_string(), "Invalid dimensions given to plot-cuts option");
    }

    #[test]
    fn linear_scene_keeps_all_points_and_cuts() {
        let table = results();
        let set = forest();
        let scene = CutScene::build(inputs(&table, Some(&set), AxisScale::Linear)).unwrap();

        assert_eq!(scene.series.len(), 2);
        assert_eq!(scene.series[0].name, "Timeslides");
        assert_eq!(scene.series[0].points, vec![[10.0, 100.0], [0.0, 1.0]]);
        assert_eq!(scene.series[1].points, vec![[1000.0, 10.0]]);

        let cuts = scene.cuts.as_ref().unwrap();
        assert_eq!(cuts.vertical, vec![100.0, -5.0]);
        assert_eq!(cuts.horizontal, vec![10.0]);
        assert_eq!(cuts.color.a(), 51);
    }

    #[test]
    fn log_scene_drops_non_positive_values() {
        let table = results();
        let set = forest();
        let scene = CutScene::build(inputs(&table, Some(&set), AxisScale::Log)).unwrap();

        let timeslides = &scene.series[0];
        assert_eq!(timeslides.points, vec![[1.0, 2.0]]);
        assert_eq!(timeslides.dropped, 1);
        assert_eq!(scene.series[1].points, vec![[3.0, 1.0]]);

        let cuts = scene.cuts.as_ref().unwrap();
        assert_eq!(cuts.vertical, vec![2.0]);
        assert_eq!(cuts.horizontal, vec![1.0]);
    }

    #[test]
    fn title_depends_on_tree_file() {
        let table = results();
        let set = forest();
        let without = CutScene::build(inputs(&table, None, AxisScale::Linear)).unwrap();
        assert_eq!(without.title(), "Triggers in the \"snr\" and \"chisq\" dimensions");

        let with = CutScene::build(inputs(&table, Some(&set), AxisScale::Linear)).unwrap();
        assert_eq!(with.title(), "Decision tree cuts on \"snr\" and \"chisq\" dimensions");
    }

    #[test]
    fn zero_lag_table_adds_third_series() {
        let table = results();
        let zero = ResultsTable::from_rows(
            vec!["snr".into(), "class".into(), "chisq".into()],
            vec![vec![4.0, 0.0, 5.0], vec![6.0, 1.0, 7.0]],
        )
        .unwrap();
        let mut with_zero = inputs(&table, None, AxisScale::Linear);
        with_zero.zero_lag = Some(&zero);

        let scene = CutScene::build(with_zero).unwrap();
        assert_eq!(scene.series.len(), 3);
        assert_eq!(scene.series[2].name, "Zero lag");
        assert_eq!(scene.series[2].points, vec![[4.0, 5.0], [6.0, 7.0]]);
    }

    #[test]
    fn log_axis_round_trips_through_unproject() {
        let coord = AxisScale::Log.project(250.0).unwrap();
        assert!((AxisScale::Log.unproject(coord) - 250.0).abs() < 1e-9);
        assert_eq!(AxisScale::Log.project(0.0), None);
        assert_eq!(AxisScale::Linear.project(-3.0), Some(-3.0));
    }
}
