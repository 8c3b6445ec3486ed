//! Route planning: stops to legs and labels.

use tracing::debug;

use crate::domain::{Coordinate, ErrandDescriptor, Leg, PlanError, RouteStop, describe};

use super::itinerary::{Itinerary, point_letter};

/// Everything derived from one route response.
///
/// # Invariants
///
/// - `locations.len() >= 2`
/// - `legs.len() == locations.len() - 1`
/// - `legs[i].destination == legs[i + 1].origin`
/// - `labels.len() == locations.len() - 2`
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    /// Stop coordinates in visiting order.
    pub locations: Vec<Coordinate>,
    /// Leg `i` connects `locations[i]` to `locations[i + 1]`.
    pub legs: Vec<Leg>,
    /// One label per intermediate stop (stops `1..=N-2`).
    pub labels: Vec<String>,
}

impl RoutePlan {
    /// Itinerary to publish for this plan.
    pub fn itinerary(&self) -> Itinerary {
        Itinerary::round_trip(self.labels.clone())
    }

    /// Index of the final leg.
    pub fn last_leg(&self) -> usize {
        self.legs.len() - 1
    }
}

/// Plan legs and labels for an ordered route response.
///
/// Each leg's mode comes from the *destination* stop's transit flag; the
/// origin's flag is ignored. Intermediate stops that match a known errand are
/// labelled `"<place>: <errand>"`, all others `"Walk to point <Letter>"` with
/// letters starting at `A` for the first intermediate stop.
///
/// # Errors
///
/// Returns [`PlanError::InsufficientStops`] for fewer than 2 stops.
///
/// # Examples
///
/// ```
/// use errand_router::domain::{Coordinate, RouteStop, TravelMode};
/// use errand_router::planner::plan_route;
///
/// let stops = [
///     RouteStop::new(Coordinate::new(0.0, 0.0), false),
///     RouteStop::new(Coordinate::new(1.0, 1.0), true),
///     RouteStop::new(Coordinate::new(0.0, 0.0), false),
/// ];
/// let plan = plan_route(&stops, &[]).unwrap();
///
/// assert_eq!(plan.legs.len(), 2);
/// assert_eq!(plan.legs[0].mode, TravelMode::Transit);
/// assert_eq!(plan.labels, vec!["Walk to point A"]);
/// ```
pub fn plan_route(
    stops: &[RouteStop],
    known_errands: &[ErrandDescriptor],
) -> Result<RoutePlan, PlanError> {
    if stops.len() < 2 {
        return Err(PlanError::InsufficientStops { found: stops.len() });
    }

    let locations: Vec<Coordinate> = stops.iter().map(|s| s.coordinate).collect();

    let legs = stops
        .windows(2)
        .map(|pair| Leg::new(pair[0].coordinate, pair[1].coordinate, pair[1].arrival_mode()))
        .collect();

    let intermediates = &locations[1..locations.len() - 1];
    let labels = intermediates
        .iter()
        .enumerate()
        .map(|(n, point)| match describe(point, known_errands) {
            Some(errand) => errand.label(),
            None => {
                debug!(stop = n + 1, %point, "no errand at stop");
                format!("Walk to point {}", point_letter(n))
            }
        })
        .collect();

    Ok(RoutePlan {
        locations,
        legs,
        labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TravelMode;

    fn stop(lat: f64, lng: f64, transit: bool) -> RouteStop {
        RouteStop::new(Coordinate::new(lat, lng), transit)
    }

    #[test]
    fn rejects_fewer_than_two_stops() {
        assert_eq!(
            plan_route(&[], &[]),
            Err(PlanError::InsufficientStops { found: 0 })
        );
        assert_eq!(
            plan_route(&[stop(0.0, 0.0, false)], &[]),
            Err(PlanError::InsufficientStops { found: 1 })
        );
    }

    #[test]
    fn two_stops_make_one_leg_and_no_labels() {
        let plan = plan_route(&[stop(0.0, 0.0, false), stop(1.0, 1.0, false)], &[]).unwrap();
        assert_eq!(plan.legs.len(), 1);
        assert!(plan.labels.is_empty());
        assert_eq!(plan.last_leg(), 0);
    }

    #[test]
    fn four_stop_round_trip() {
        let stops = [
            stop(0.0, 0.0, false),
            stop(1.0, 1.0, false),
            stop(2.0, 2.0, true),
            stop(0.0, 0.0, false),
        ];

        let plan = plan_route(&stops, &[]).unwrap();

        assert_eq!(plan.legs.len(), 3);
        assert_eq!(plan.legs[0].mode, TravelMode::Walk);
        assert_eq!(plan.legs[1].mode, TravelMode::Transit);
        assert_eq!(plan.legs[1].destination, Coordinate::new(2.0, 2.0));
        assert_eq!(plan.legs[2].mode, TravelMode::Walk);
        assert_eq!(plan.labels.len(), 2);
        assert_eq!(plan.locations.len(), 4);
    }

    #[test]
    fn origin_transit_flag_is_ignored() {
        let plan = plan_route(&[stop(0.0, 0.0, true), stop(1.0, 1.0, false)], &[]).unwrap();
        assert_eq!(plan.legs[0].mode, TravelMode::Walk);
    }

    #[test]
    fn unmatched_stops_get_sequential_letters() {
        let stops = [
            stop(0.0, 0.0, false),
            stop(1.0, 1.0, false),
            stop(2.0, 2.0, false),
            stop(3.0, 3.0, false),
            stop(0.0, 0.0, false),
        ];

        let plan = plan_route(&stops, &[]).unwrap();
        assert_eq!(
            plan.labels,
            vec!["Walk to point A", "Walk to point B", "Walk to point C"]
        );
    }

    #[test]
    fn matched_stops_use_errand_label() {
        let known = vec![ErrandDescriptor::new(
            Coordinate::new(2.0, 2.0),
            "Library",
            "return books",
        )];
        let stops = [
            stop(0.0, 0.0, false),
            stop(1.0, 1.0, false),
            stop(2.000001, 1.999999, false),
            stop(0.0, 0.0, false),
        ];

        let plan = plan_route(&stops, &known).unwrap();
        assert_eq!(plan.labels, vec!["Walk to point A", "Library: return books"]);
    }

    #[test]
    fn letters_count_position_not_unmatched_stops() {
        // A matched stop still consumes its letter position.
        let known = vec![ErrandDescriptor::new(Coordinate::new(1.0, 1.0), "Bank", "deposit")];
        let stops = [
            stop(0.0, 0.0, false),
            stop(1.0, 1.0, false),
            stop(2.0, 2.0, false),
            stop(0.0, 0.0, false),
        ];

        let plan = plan_route(&stops, &known).unwrap();
        assert_eq!(plan.labels, vec!["Bank: deposit", "Walk to point B"]);
    }

    #[test]
    fn origin_and_destination_are_never_labelled() {
        let known = vec![ErrandDescriptor::new(Coordinate::new(0.0, 0.0), "Home", "rest")];
        let stops = [stop(0.0, 0.0, false), stop(1.0, 1.0, false), stop(0.0, 0.0, false)];

        let plan = plan_route(&stops, &known).unwrap();
        assert_eq!(plan.labels, vec!["Walk to point A"]);

        let itinerary = plan.itinerary();
        assert_eq!(itinerary.origin, "Current Location");
        assert_eq!(itinerary.destination, "Current Location");
    }
}
