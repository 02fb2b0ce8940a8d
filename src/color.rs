use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::config::{ConfigError, ThemeConfig};
use crate::data::aggregate::RankedBar;

// ---------------------------------------------------------------------------
// Two-tone chart theme
// ---------------------------------------------------------------------------

/// Fixed chart colours: one emphasis colour, one muted colour, plus the plot
/// background and the title / axis text colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub emphasis: Color32,
    pub muted: Color32,
    pub background: Color32,
    pub text: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            emphasis: Color32::from_rgb(0xa6, 0x19, 0x29),
            muted: Color32::from_rgb(0xf4, 0xc6, 0xcc),
            background: Color32::from_rgb(0xd6, 0xb8, 0xbc),
            text: Color32::from_rgb(0x40, 0x01, 0x0d),
        }
    }
}

impl Theme {
    /// Build the theme from `#rrggbb` strings.
    pub fn from_config(config: &ThemeConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            emphasis: parse_hex(&config.emphasis)?,
            muted: parse_hex(&config.muted)?,
            background: parse_hex(&config.background)?,
            text: parse_hex(&config.text)?,
        })
    }

    /// Fill for one ranked bar: emphasis on the leader, muted elsewhere.
    pub fn bar_fill(&self, bar: &RankedBar) -> Color32 {
        if bar.highlighted {
            self.emphasis
        } else {
            self.muted
        }
    }

    /// Bar outline, a darker shade of the fill.
    pub fn bar_outline(&self, bar: &RankedBar) -> Color32 {
        darken(self.bar_fill(bar), 0.15)
    }
}

/// Parse `#rrggbb` (or `rrggbb`, or the short `#rgb`) into a [`Color32`].
pub fn parse_hex(hex: &str) -> Result<Color32, ConfigError> {
    let rgb: Srgb<u8> = hex
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidColor(hex.to_string()))?;
    Ok(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

/// Lower the HSL lightness of `color` by `amount` (0.0..=1.0).
pub fn darken(color: Color32, amount: f32) -> Color32 {
    let rgb = Srgb::new(
        color.r() as f32 / 255.0,
        color.g() as f32 / 255.0,
        color.b() as f32 / 255.0,
    );
    let mut hsl: Hsl = rgb.into_color();
    hsl.lightness = (hsl.lightness - amount).clamp(0.0, 1.0);
    let out: Srgb = hsl.into_color();
    Color32::from_rgb(
        (out.red * 255.0).round() as u8,
        (out.green * 255.0).round() as u8,
        (out.blue * 255.0).round() as u8,
    )
}
