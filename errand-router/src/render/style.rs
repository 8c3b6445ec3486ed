//! Per-leg polyline styling.

use serde::Serialize;

use crate::domain::TravelMode;

/// Colours cycled through by leg index so adjacent legs are distinguishable.
const PALETTE: [&str; 6] = [
    "#1e88e5", "#e53935", "#43a047", "#fb8c00", "#8e24aa", "#00897b",
];

/// How a leg's polyline is drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolylineStyle {
    pub color: &'static str,
    pub weight: u8,
    pub opacity: f32,
}

impl PolylineStyle {
    /// Style for leg `index`; transit legs are drawn heavier.
    pub fn for_leg(index: usize, mode: TravelMode) -> Self {
        let weight = match mode {
            TravelMode::Walk => 4,
            TravelMode::Transit => 6,
        };
        Self {
            color: PALETTE[index % PALETTE.len()],
            weight,
            opacity: 0.8,
        }
    }
}
