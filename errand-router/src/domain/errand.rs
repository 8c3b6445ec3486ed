//! Errands and tolerance matching of stops back to them.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A user-selected errand tied to a real-world place.
///
/// Stops that did not come from an errand selection (transfer points,
/// plain waypoints) have no descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrandDescriptor {
    pub coordinate: Coordinate,
    pub place_name: String,
    pub errand_name: String,
}

impl ErrandDescriptor {
    /// Create a descriptor.
    pub fn new(
        coordinate: Coordinate,
        place_name: impl Into<String>,
        errand_name: impl Into<String>,
    ) -> Self {
        Self {
            coordinate,
            place_name: place_name.into(),
            errand_name: errand_name.into(),
        }
    }

    /// Display label, e.g. `"Boots: pick up prescription"`.
    pub fn label(&self) -> String {
        format!("{}: {}", self.place_name, self.errand_name)
    }
}

/// Find the known errand located at `point`.
///
/// Scans `known` in order and returns the first descriptor whose coordinate
/// is within tolerance on both axes. If two errands sit within tolerance of
/// each other the earlier one wins. `None` means the caller should fall back
/// to a generic label.
pub fn describe<'a>(
    point: &Coordinate,
    known: &'a [ErrandDescriptor],
) -> Option<&'a ErrandDescriptor> {
    known.iter().find(|errand| errand.coordinate.approx_eq(point))
}
