// Palette collaborator trait
use crate::domain::chart::Color;
use crate::domain::trend::TrendType;

/// Color-assignment collaborator.
///
/// Colors are assigned per trend classification, not per record, so styling
/// stays stable across re-renders of an unchanged segmentation.
pub trait TrendPalette: Send + Sync {
    fn color_for(&self, trend_type: TrendType) -> Color;
}
