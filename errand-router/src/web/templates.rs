//! Askama templates for the web frontend.

use askama::Template;

use crate::planner::CURRENT_LOCATION;
use crate::render::{MapSnapshot, RenderedLegView};
use crate::sequencer::SequencerState;
use crate::session::SessionStatus;

/// Itinerary page: the current route and the progress of its legs.
#[derive(Template)]
#[template(path = "itinerary.html")]
pub struct ItineraryTemplate {
    pub origin: String,
    pub errands: Vec<String>,
    pub destination: String,
    pub has_route: bool,
    pub progress: String,
    pub legs: Vec<LegRowView>,
}

impl ItineraryTemplate {
    /// Build the page from the map contents and session status.
    pub fn new(map: &MapSnapshot, status: Option<&SessionStatus>) -> Self {
        let (origin, errands, destination) = match &map.itinerary {
            Some(it) => (it.origin.clone(), it.errands.clone(), it.destination.clone()),
            None => (CURRENT_LOCATION.to_string(), Vec::new(), CURRENT_LOCATION.to_string()),
        };

        let progress = match status {
            Some(s) => describe_progress(&s.state, s.rendered, s.leg_count),
            None => "No route".to_string(),
        };

        Self {
            origin,
            errands,
            destination,
            has_route: status.is_some(),
            progress,
            legs: map.legs.iter().map(LegRowView::from_leg).collect(),
        }
    }
}

/// One row of the leg table.
#[derive(Debug, Clone)]
pub struct LegRowView {
    /// 1-based leg number
    pub number: usize,
    pub mode: String,
    pub distance: String,
    pub duration: String,
    pub color: String,
    /// First step's instruction, empty if the provider gave none
    pub instruction: String,
}

impl LegRowView {
    pub fn from_leg(leg: &RenderedLegView) -> Self {
        Self {
            number: leg.index + 1,
            mode: leg.mode.to_string(),
            distance: format_distance(leg.distance_meters),
            duration: leg.duration_text(),
            color: leg.style.color.to_string(),
            instruction: leg.instructions.first().cloned().unwrap_or_default(),
        }
    }
}

/// Human-readable progress line for a session.
pub fn describe_progress(state: &SequencerState, rendered: usize, leg_count: usize) -> String {
    match state {
        SequencerState::Idle => "Starting".to_string(),
        SequencerState::Running { leg } => {
            format!("Fetching leg {} of {leg_count}", leg + 1)
        }
        SequencerState::RetryWait { leg, retry } => {
            format!("Rate limited on leg {}, retry {retry} pending", leg + 1)
        }
        SequencerState::Complete => format!("Complete: {rendered} legs"),
        SequencerState::Failed { leg, reason } => {
            format!("Stopped at leg {}: {reason}", leg + 1)
        }
    }
}

fn format_distance(meters: u64) -> String {
    if meters >= 1000 {
        format!("{:.1} km", meters as f64 / 1000.0)
    } else {
        format!("{meters} m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_text() {
        assert_eq!(
            describe_progress(&SequencerState::Running { leg: 0 }, 0, 3),
            "Fetching leg 1 of 3"
        );
        assert_eq!(
            describe_progress(&SequencerState::RetryWait { leg: 2, retry: 4 }, 2, 5),
            "Rate limited on leg 3, retry 4 pending"
        );
        assert_eq!(describe_progress(&SequencerState::Complete, 3, 3), "Complete: 3 legs");
        assert_eq!(
            describe_progress(
                &SequencerState::Failed {
                    leg: 1,
                    reason: "ZERO_RESULTS".into()
                },
                1,
                3
            ),
            "Stopped at leg 2: ZERO_RESULTS"
        );
    }

    #[test]
    fn distance_text() {
        assert_eq!(format_distance(850), "850 m");
        assert_eq!(format_distance(1260), "1.3 km");
    }

    #[test]
    fn empty_page_renders() {
        let page = ItineraryTemplate::new(&MapSnapshot::default(), None);

        assert!(!page.has_route);
        assert_eq!(page.origin, CURRENT_LOCATION);

        let html = page.render().unwrap();
        assert!(html.contains("No route"));
    }

    #[test]
    fn provider_instructions_render_as_text() {
        use crate::directions::DirectionsResponse;
        use crate::domain::{Coordinate, Leg, TravelMode};
        use crate::render::{MapView, PolylineStyle, RenderSurface};

        let body = r#"{
            "status": "OK",
            "routes": [{
                "overview_polyline": {"points": "_p~iF~ps|U"},
                "legs": [{
                    "distance": {"value": 700, "text": "0.7 km"},
                    "duration": {"value": 500, "text": "8 mins"},
                    "steps": [{
                        "html_instructions": "Head <b>north</b>",
                        "distance": {"value": 700, "text": "0.7 km"},
                        "duration": {"value": 500, "text": "8 mins"},
                        "travel_mode": "WALKING"
                    }]
                }]
            }]
        }"#;
        let response: DirectionsResponse = serde_json::from_str(body).unwrap();
        let directions = response.into_directions().unwrap();
        let leg = Leg::new(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0), TravelMode::Walk);

        let mut view = MapView::new();
        view.render(0, &leg, &directions, &PolylineStyle::for_leg(0, leg.mode));

        let page = ItineraryTemplate::new(&view.snapshot(), None);
        assert_eq!(page.legs[0].instruction, "Head north");
    }
}
