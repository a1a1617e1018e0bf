use eframe::egui::Color32;
use egui_plot::MarkerShape;
use palette::Srgb;

// ---------------------------------------------------------------------------
// matplotlib-style colour codes → Color32
// ---------------------------------------------------------------------------

/// Resolve a single-letter colour code (`b g r c m y k w`).
pub fn color_code(code: char) -> Option<Color32> {
    let name = match code {
        'b' => "blue",
        'g' => "green",
        'r' => "red",
        'c' => "cyan",
        'm' => "magenta",
        'y' => "yellow",
        'k' => "black",
        'w' => "white",
        _ => return None,
    };
    palette::named::from_str(name).map(to_color32)
}

/// Same colour with its alpha scaled to `alpha` in `0.0..=1.0`.
pub fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), a)
}

fn to_color32(rgb: Srgb<u8>) -> Color32 {
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Format strings: marker + colour, e.g. "xk", "+r", ".g"
// ---------------------------------------------------------------------------

/// Marker and colour parsed from a format string such as `"+r"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    pub marker: MarkerShape,
    pub color: Color32,
}

impl PointStyle {
    /// Parse a marker character followed by a colour code.
    pub fn parse(fmt: &str) -> Option<Self> {
        let mut chars = fmt.chars();
        let marker = match chars.next()? {
            'x' => MarkerShape::Cross,
            '+' => MarkerShape::Plus,
            '.' | 'o' => MarkerShape::Circle,
            's' => MarkerShape::Square,
            'D' | 'd' => MarkerShape::Diamond,
            '^' => MarkerShape::Up,
            'v' => MarkerShape::Down,
            '*' => MarkerShape::Asterisk,
            _ => return None,
        };
        let color = color_code(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(PointStyle { marker, color })
    }
}
