// Static trend palette - default color assignment
use crate::domain::chart::Color;
use crate::domain::trend::TrendType;

use crate::application::palette::TrendPalette;

/// Fixed color per trend classification.
///
/// The colors can be overridden from hex strings, the same representation
/// chart colors use in configuration files.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticTrendPalette {
    ascending: Color,
    descending: Color,
    flat: Color,
}

impl StaticTrendPalette {
    pub fn new(ascending: Color, descending: Color, flat: Color) -> Self {
        Self {
            ascending,
            descending,
            flat,
        }
    }

    pub fn from_hex(ascending: &str, descending: &str, flat: &str) -> Option<Self> {
        Some(Self::new(
            Color::from_hex(ascending)?,
            Color::from_hex(descending)?,
            Color::from_hex(flat)?,
        ))
    }
}

impl Default for StaticTrendPalette {
    fn default() -> Self {
        Self {
            ascending: Color(0xFF2E7D32),
            descending: Color(0xFFC62828),
            flat: Color(0xFF546E7A),
        }
    }
}

impl TrendPalette for StaticTrendPalette {
    fn color_for(&self, trend_type: TrendType) -> Color {
        match trend_type {
            TrendType::Ascending => self.ascending,
            TrendType::Descending => self.descending,
            TrendType::Flat => self.flat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_are_deterministic_per_trend() {
        let palette = StaticTrendPalette::default();
        assert_eq!(
            palette.color_for(TrendType::Ascending),
            palette.color_for(TrendType::Ascending)
        );
        assert_ne!(
            palette.color_for(TrendType::Ascending),
            palette.color_for(TrendType::Descending)
        );
    }

    #[test]
    fn test_from_hex() {
        let palette = StaticTrendPalette::from_hex("#2E7D32", "#C62828", "#546E7A").unwrap();
        assert_eq!(palette, StaticTrendPalette::default());
        assert!(StaticTrendPalette::from_hex("bad", "#C62828", "#546E7A").is_none());
    }
}
