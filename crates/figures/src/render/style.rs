//! Colours, stroke patterns and figure-wide appearance.

use std::fmt;

use thiserror::Error;

/// Named palette shared by every diagram kind, as `(name, #rrggbb)`.
pub const PALETTE: [(&str, &str); 8] = [
    ("blue", "#82DCF2"),
    ("red", "#EF665F"),
    ("green", "#8FE384"),
    ("yellow", "#FFC753"),
    ("orange", "#FF8A56"),
    ("pink", "#F688C9"),
    ("purple", "#B57EDC"),
    ("grey", "#4C5B64"),
];

/// Axis and number-line colour.
pub const AXIS_COLOR: &str = "#435159";
/// Backdrop behind labels when the figure is not on white.
pub const DARK_BACKGROUND: &str = "#0E1117";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown colour '{0}': expected a palette name or #rrggbb")]
pub struct UnknownColor(pub String);

/// A resolved `#rrggbb` colour. Deserializes from a palette name or a hex literal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Resolve a palette name (case-insensitive; `gray` accepted) or `#rrggbb`.
    pub fn parse(text: &str) -> Result<Color, UnknownColor> {
        let t = text.trim();
        if let Some(hex) = t.strip_prefix('#') {
            if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Ok(Color(format!("#{}", hex.to_ascii_uppercase())));
            }
            return Err(UnknownColor(text.to_string()));
        }
        let name = t.to_ascii_lowercase();
        let name = if name == "gray" { "grey" } else { name.as_str() };
        PALETTE
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, hex)| Color((*hex).to_string()))
            .ok_or_else(|| UnknownColor(text.to_string()))
    }

    /// Palette entry by name; falls back to grey for names not in the palette.
    pub fn named(name: &str) -> Color {
        Color::parse(name).unwrap_or_else(|_| Color::grey())
    }

    pub fn grey() -> Color {
        Color("#4C5B64".to_string())
    }

    pub fn white() -> Color {
        Color("#FFFFFF".to_string())
    }

    pub fn axis() -> Color {
        Color(AXIS_COLOR.to_string())
    }

    pub fn hex(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::grey()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = UnknownColor;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.0
    }
}

/// Stroke pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// Dash and gap lengths in multiples of the stroke width; `None` when solid.
    pub fn dash_pattern(self) -> Option<[f64; 2]> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some([3.7, 1.6]),
            LineStyle::Dotted => Some([1.0, 1.65]),
        }
    }
}

/// Outline of a drawn item. `width` is in points.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    #[serde(default)]
    pub style: LineStyle,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            style: LineStyle::Solid,
        }
    }

    pub fn styled(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }
}

/// Area fill with opacity in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Fill {
    pub color: Color,
    pub opacity: f64,
}

impl Fill {
    pub fn new(color: Color, opacity: f64) -> Self {
        Self {
            color,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    pub fn solid(color: Color) -> Self {
        Self::new(color, 1.0)
    }
}

/// Figure-wide size and weight settings.
///
/// `width`/`height` are inches, `line_weight` points and `label_size` the
/// font size of labels in points.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub width: f64,
    pub height: f64,
    pub white_background: bool,
    pub line_weight: f64,
    pub label_size: f64,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 8.0,
            white_background: true,
            line_weight: 3.0,
            label_size: 20.0,
        }
    }
}

impl Appearance {
    /// Box colour drawn behind labels: white on a white figure, the dark
    /// backdrop otherwise.
    pub fn label_background(&self) -> Color {
        if self.white_background {
            Color::white()
        } else {
            Color(DARK_BACKGROUND.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_names_and_hex_literals_resolve() {
        assert_eq!(Color::parse("blue").unwrap().hex(), "#82DCF2");
        assert_eq!(Color::parse("Gray").unwrap(), Color::grey());
        assert_eq!(Color::parse("#a1b2c3").unwrap().hex(), "#A1B2C3");
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("teal").is_err());
        assert_eq!(Color::named("teal"), Color::grey());
    }

    #[test]
    fn colour_serde_goes_through_parse() {
        let c: Color = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(c.hex(), "#EF665F");
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#EF665F\"");
        assert!(serde_json::from_str::<Color>("\"mauve\"").is_err());
    }

    #[test]
    fn appearance_defaults() {
        let a: Appearance = serde_json::from_str("{\"label_size\": 14}").unwrap();
        assert_eq!(a.label_size, 14.0);
        assert_eq!(a.width, 8.0);
        assert!(a.white_background);
        assert_eq!(a.line_weight, 3.0);
        assert_eq!(a.label_background(), Color::white());
        let dark = Appearance {
            white_background: false,
            ..a
        };
        assert_eq!(dark.label_background().hex(), DARK_BACKGROUND);
    }

    #[test]
    fn dash_patterns() {
        assert!(LineStyle::Solid.dash_pattern().is_none());
        assert_eq!(LineStyle::Dashed.dash_pattern(), Some([3.7, 1.6]));
        assert!(Fill::new(Color::grey(), 1.7).opacity <= 1.0);
    }
}
