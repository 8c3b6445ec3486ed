//! Stops in an optimizer route response.

use serde::{Deserialize, Deserializer, Serialize};

use super::{Coordinate, TravelMode};

/// One stop of a route response, in visiting order.
///
/// `transit` describes the leg *arriving* at this stop. It is meaningless on
/// the origin, which has no incoming leg.
///
/// On the wire this is a flat `{lat, lng, transit}` record. The optimizer has
/// emitted `transit` both as a bool and as a travel-mode string, so both are
/// accepted:
///
/// ```
/// use errand_router::domain::RouteStop;
///
/// let a: RouteStop = serde_json::from_str(r#"{"lat":1,"lng":2,"transit":true}"#).unwrap();
/// let b: RouteStop = serde_json::from_str(r#"{"lat":1,"lng":2,"transit":"transit"}"#).unwrap();
/// let c: RouteStop = serde_json::from_str(r#"{"lat":1,"lng":2}"#).unwrap();
/// assert!(a.transit && b.transit && !c.transit);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(default, deserialize_with = "deserialize_transit")]
    pub transit: bool,
}

impl RouteStop {
    /// Create a stop.
    pub const fn new(coordinate: Coordinate, transit: bool) -> Self {
        Self {
            coordinate,
            transit,
        }
    }

    /// Travel mode of the leg that ends at this stop.
    pub fn arrival_mode(&self) -> TravelMode {
        if self.transit {
            TravelMode::Transit
        } else {
            TravelMode::Walk
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TransitFlag {
    Bool(bool),
    Mode(String),
}

fn deserialize_transit<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag: Option<TransitFlag> = Option::deserialize(deserializer)?;
    Ok(match flag {
        Some(TransitFlag::Bool(b)) => b,
        Some(TransitFlag::Mode(mode)) => mode.eq_ignore_ascii_case("transit"),
        None => false,
    })
}
