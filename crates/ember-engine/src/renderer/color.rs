//! Theme colors and curated burst palettes.
//!
//! A palette is chosen once per burst so every fragment of that burst
//! shares a cohesive look; per-particle random colors read as noise.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex form, e.g. `#ffd700`.
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
pub const GOLD: Color = Color::rgb(0xff, 0xd7, 0x00);
pub const CREAM: Color = Color::rgb(0xff, 0xf1, 0xc1);
pub const SCARLET: Color = Color::rgb(0xff, 0x2d, 0x2d);
pub const EMBER: Color = Color::rgb(0xff, 0x48, 0x00);
pub const AMBER: Color = Color::rgb(0xff, 0x8c, 0x00);

/// Burst palettes, red/gold dominant with white accents.
pub const BURST_PALETTES: [[Color; 3]; 4] = [
    [SCARLET, GOLD, WHITE],
    [EMBER, GOLD, CREAM],
    [SCARLET, AMBER, GOLD],
    [GOLD, WHITE, AMBER],
];

/// Rocket head colors.
pub const ROCKET_COLORS: [Color; 3] = [WHITE, CREAM, GOLD];

/// Rocket exhaust spark colors.
pub const SPARK_COLORS: [Color; 3] = [GOLD, CREAM, WHITE];

/// Finger-trail colors, weighted toward white so the trail stays subtle.
pub const TRAIL_COLORS: [(Color, u32); 4] = [
    (WHITE, 55),
    (CREAM, 22),
    (GOLD, 18),
    (SCARLET, 5),
];

/// Shockwave ring color.
pub const RING_COLOR: Color = CREAM;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_css_formats_hex() {
        assert_eq!(GOLD.to_css(), "#ffd700");
        assert_eq!(BLACK.to_css(), "#000000");
        assert_eq!(Color::rgb(1, 2, 3).to_css(), "#010203");
    }

    #[test]
    fn palettes_are_three_wide() {
        for palette in &BURST_PALETTES {
            assert_eq!(palette.len(), 3);
        }
    }
}
