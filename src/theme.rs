//! Theme configuration for invitation cards.
//!
//! A [`ThemeSettings`] value captures the colors, fonts, and decoration
//! flags an event applies to every guest's card. It is derived from the
//! event record on every render request; nothing here is cached, so a
//! theme edit is visible on the next card.
//!
//! The struct round-trips through JSON (camelCase) so the external data
//! layer can persist and transport themes:
//!
//! ```
//! use karibu_renderer::ThemeSettings;
//!
//! let theme = ThemeSettings::default();
//! let json = theme.to_json().unwrap();
//! let restored = ThemeSettings::from_json(&json).unwrap();
//! assert_eq!(theme, restored);
//! ```

use serde::{Deserialize, Serialize};

/// Overall template family chosen for the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateChoice {
    #[default]
    Modern,
    Classic,
    Floral,
    Minimal,
    Custom,
}

/// Border treatment drawn around the card edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    /// Plain single-line rectangle.
    Simple,
    /// Rounded outline with a thinner secondary inset.
    #[default]
    Rounded,
    /// Small circular motifs tiled along all four edges.
    Floral,
    /// Alternating filled triangles along the top and bottom edges.
    Geometric,
}

/// Theme colors as `#RRGGBB` hex strings, exactly as the event record
/// stores them. Parsing happens at draw time via
/// [`hex_to_rgb`](crate::color::hex_to_rgb), which falls back rather than
/// failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "#7C3AED".into(),
            secondary: "#F0E6FF".into(),
            accent: "#852D63".into(),
            background: "#FDF4FF".into(),
        }
    }
}

/// Logical font family names for the three text roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeFonts {
    pub title: String,
    pub name: String,
    pub body: String,
}

impl Default for ThemeFonts {
    fn default() -> Self {
        Self {
            title: "Marckscript-Regular".into(),
            name: "DancingScript-Bold".into(),
            body: "PlayfairDisplay-Regular".into(),
        }
    }
}

/// Decoration toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decorations {
    #[serde(default = "default_true")]
    pub show_border: bool,

    #[serde(default)]
    pub border_style: BorderStyle,

    /// Blend the background toward the secondary color, top to bottom.
    #[serde(default = "default_true")]
    pub gradient_background: bool,

    /// Concentric circles behind the QR code.
    #[serde(default = "default_true")]
    pub show_qr_background: bool,

    /// Random corner motifs.
    #[serde(default = "default_true")]
    pub show_decorations: bool,
}

impl Default for Decorations {
    fn default() -> Self {
        Self {
            show_border: true,
            border_style: BorderStyle::default(),
            gradient_background: true,
            show_qr_background: true,
            show_decorations: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// The full visual theme an event applies to its cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    #[serde(default)]
    pub template: TemplateChoice,

    #[serde(default)]
    pub colors: ThemeColors,

    #[serde(default)]
    pub fonts: ThemeFonts,

    #[serde(default)]
    pub decorations: Decorations,
}

impl ThemeSettings {
    /// Serializes the theme to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a theme from a JSON string. Missing fields take their
    /// defaults, so partial documents from older records still load.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_brand_theme() {
        let theme = ThemeSettings::default();
        assert_eq!(theme.colors.primary, "#7C3AED");
        assert_eq!(theme.colors.background, "#FDF4FF");
        assert_eq!(theme.fonts.title, "Marckscript-Regular");
        assert_eq!(theme.decorations.border_style, BorderStyle::Rounded);
        assert!(theme.decorations.show_border);
        assert!(theme.decorations.gradient_background);
    }

    #[test]
    fn json_round_trip_preserves_every_field() {
        let mut theme = ThemeSettings::default();
        theme.template = TemplateChoice::Floral;
        theme.colors.accent = "#112233".into();
        theme.fonts.body = "Cardo-Regular".into();
        theme.decorations.show_border = false;
        theme.decorations.border_style = BorderStyle::Geometric;
        theme.decorations.show_decorations = false;

        let json = theme.to_json().unwrap();
        let restored = ThemeSettings::from_json(&json).unwrap();
        assert_eq!(theme, restored);
    }

    #[test]
    fn json_uses_camel_case_and_kebab_enums() {
        let json = ThemeSettings::default().to_json().unwrap();
        assert!(json.contains("\"showBorder\""));
        assert!(json.contains("\"borderStyle\""));
        assert!(json.contains("\"rounded\""));
        assert!(json.contains("\"gradientBackground\""));
    }

    #[test]
    fn partial_document_takes_defaults() {
        let theme = ThemeSettings::from_json("{}").unwrap();
        assert_eq!(theme, ThemeSettings::default());

        let theme =
            ThemeSettings::from_json(r#"{"decorations": {"showBorder": false}}"#).unwrap();
        assert!(!theme.decorations.show_border);
        assert!(theme.decorations.show_qr_background);
    }
}
