//! Itinerary labels for display.

use serde::{Deserialize, Serialize};

/// Label shown for the origin and the destination.
///
/// Routes start and end wherever the user currently is.
pub const CURRENT_LOCATION: &str = "Current Location";

/// Human-readable itinerary, published once per session before any leg is
/// requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    pub origin: String,
    /// One label per intermediate stop, in visiting order.
    pub errands: Vec<String>,
    pub destination: String,
}

impl Itinerary {
    /// Itinerary from the current location, through `errands`, and back.
    pub fn round_trip(errands: Vec<String>) -> Self {
        Self {
            origin: CURRENT_LOCATION.to_string(),
            errands,
            destination: CURRENT_LOCATION.to_string(),
        }
    }
}

/// Letter for the `n`th unlabelled point, counting from zero.
///
/// Runs `A`..`Z` and then continues spreadsheet-style (`AA`, `AB`, ...).
///
/// ```
/// use errand_router::planner::point_letter;
///
/// assert_eq!(point_letter(0), "A");
/// assert_eq!(point_letter(25), "Z");
/// assert_eq!(point_letter(26), "AA");
/// ```
pub fn point_letter(n: usize) -> String {
    let mut n = n + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}
