//! WhatsApp chat widget for third-party websites.
//!
//! The generator turns a [`WidgetConfig`] into a self-installing `<script>`
//! block. Site owners paste it just before `</body>`; the script injects a
//! floating launcher button and a panel whose call-to-action opens a
//! `wa.me` deep link.
//!
//! ```text
//! WidgetConfig ──► generate() ──► "<script>(function () { ... })();</script>"
//!                     │
//!                     └── fewer than 10 phone digits ──► PLACEHOLDER_SNIPPET
//! ```
//!
//! Generation never fails. An unusable phone number produces the
//! [`PLACEHOLDER_SNIPPET`] comment, which callers detect with
//! [`is_placeholder_snippet`] to disable copying.

mod escape;
mod snippet;

use serde::{Deserialize, Serialize};

pub use escape::{css_color, css_pixels, js_string, url_component};
pub use snippet::{
    PLACEHOLDER_SNIPPET, ROOT_ID, deep_link, generate, is_placeholder_snippet, normalize_phone,
};

/// Minimum number of digits a phone number needs to be dialable.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Brand color used when none is configured or the configured one is unusable.
pub const DEFAULT_BRAND_COLOR: &str = "#25D366";

/// Which bottom corner of the page the widget sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
}

impl Position {
    /// The CSS property used for horizontal placement.
    pub fn side(self) -> &'static str {
        match self {
            Position::BottomRight => "right",
            Position::BottomLeft => "left",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::BottomRight => write!(f, "bottom-right"),
            Position::BottomLeft => write!(f, "bottom-left"),
        }
    }
}

impl std::str::FromStr for Position {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bottom-right" => Ok(Position::BottomRight),
            "bottom-left" => Ok(Position::BottomLeft),
            _ => anyhow::bail!(
                "Invalid widget position '{}'. Valid values: bottom-right, bottom-left",
                s
            ),
        }
    }
}

/// Everything the widget settings screen collects.
///
/// Pixel values are kept as strings because they come straight from text
/// inputs; [`css_pixels`] turns them into safe CSS numbers at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Raw phone number as typed, e.g. `+1 (555) 123-4567`
    pub phone_number: String,
    pub brand_name: String,
    pub brand_subtitle: String,
    /// Avatar shown in the panel header; omitted when empty
    pub brand_image_url: String,
    /// Greeting shown in the panel and prefilled in the WhatsApp chat
    pub welcome_message: String,
    /// Label of the button that opens WhatsApp
    pub cta_text: String,
    pub brand_color: String,
    pub position: Position,
    pub margin_bottom: String,
    pub margin_left: String,
    pub margin_right: String,
    pub border_radius: String,
    pub open_by_default: bool,
    pub open_on_mobile: bool,
    /// Reopen policy label, passed through to the page untouched
    pub reopen_after: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            phone_number: String::new(),
            brand_name: "StitchByte".to_string(),
            brand_subtitle: "Typically replies within minutes".to_string(),
            brand_image_url: String::new(),
            welcome_message: "Hi there! 👋\nHow can we help you today?".to_string(),
            cta_text: "Start Chat".to_string(),
            brand_color: DEFAULT_BRAND_COLOR.to_string(),
            position: Position::default(),
            margin_bottom: "20".to_string(),
            margin_left: "20".to_string(),
            margin_right: "20".to_string(),
            border_radius: "16".to_string(),
            open_by_default: false,
            open_on_mobile: false,
            reopen_after: "24 hours".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Horizontal margin for the configured side.
    pub fn side_margin(&self) -> &str {
        match self.position {
            Position::BottomRight => &self.margin_right,
            Position::BottomLeft => &self.margin_left,
        }
    }

    /// Check the settings and describe anything that will render differently
    /// from what was typed.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let digits = normalize_phone(&self.phone_number).len();
        if digits < MIN_PHONE_DIGITS {
            warnings.push(format!(
                "phone_number has {} digit(s); at least {} are needed to generate the widget",
                digits, MIN_PHONE_DIGITS
            ));
        }

        if css_color(&self.brand_color) != self.brand_color.trim() {
            warnings.push(format!(
                "brand_color '{}' is not a usable CSS color; {} will be used",
                self.brand_color, DEFAULT_BRAND_COLOR
            ));
        }

        for (field, value) in [
            ("margin_bottom", &self.margin_bottom),
            ("margin_left", &self.margin_left),
            ("margin_right", &self.margin_right),
            ("border_radius", &self.border_radius),
        ] {
            if !escape::is_pixel_value(value) {
                warnings.push(format!(
                    "{} '{}' is not a pixel value; 0 will be used",
                    field, value
                ));
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_from_str() {
        assert_eq!(
            "bottom-left".parse::<Position>().unwrap(),
            Position::BottomLeft
        );
        assert_eq!(
            "BOTTOM-RIGHT".parse::<Position>().unwrap(),
            Position::BottomRight
        );
        assert!("top-left".parse::<Position>().is_err());
        assert!("right".parse::<Position>().is_err());
        assert!("left".parse::<Position>().is_err());
    }

    #[test]
    fn test_position_display_matches_serde() {
        let json = serde_json::to_string(&Position::BottomLeft).unwrap();
        assert_eq!(json, format!("\"{}\"", Position::BottomLeft));
    }

    #[test]
    fn test_side_margin_follows_position() {
        let mut config = WidgetConfig {
            margin_left: "8".to_string(),
            margin_right: "30".to_string(),
            ..WidgetConfig::default()
        };
        assert_eq!(config.side_margin(), "30");
        config.position = Position::BottomLeft;
        assert_eq!(config.side_margin(), "8");
    }

    #[test]
    fn test_default_config_warns_only_about_phone() {
        let warnings = WidgetConfig::default().warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("phone_number"));
    }

    #[test]
    fn test_warnings_for_bad_color_and_margin() {
        let config = WidgetConfig {
            phone_number: "15551234567".to_string(),
            brand_color: "red; } body { display: none".to_string(),
            margin_bottom: "lots".to_string(),
            ..WidgetConfig::default()
        };
        let warnings = config.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.contains("brand_color")));
        assert!(warnings.iter().any(|w| w.contains("margin_bottom")));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: WidgetConfig = toml::from_str(
            r#"
phone_number = "15551234567"
position = "bottom-left"
"#,
        )
        .unwrap();
        assert_eq!(config.position, Position::BottomLeft);
        assert_eq!(config.cta_text, "Start Chat");
        assert_eq!(config.brand_color, DEFAULT_BRAND_COLOR);
    }
}
