//! Controller scenarios: full sessions against scripted providers.

use std::time::Duration;

use super::*;
use crate::config::SequencerConfig;
use crate::directions::{
    DirectionsFailure, DirectionsOutcome, ScriptedDirections, StraightLineDirections,
};
use crate::domain::{Coordinate, ErrandDescriptor, Leg, PlanError, RouteStop, TravelMode};
use crate::errands::ErrandRegistry;
use crate::render::MapView;
use crate::sequencer::{SequenceOutcome, SequencerState};

type Controller = RouteController<ScriptedDirections, MapView>;

fn controller(provider: ScriptedDirections) -> Controller {
    controller_with_errands(provider, ErrandRegistry::empty())
}

fn controller_with_errands(provider: ScriptedDirections, errands: ErrandRegistry) -> Controller {
    RouteController::new(provider, MapView::new(), errands, SequencerConfig::default())
}

fn stop(lat: f64, lng: f64, transit: bool) -> RouteStop {
    RouteStop::new(Coordinate::new(lat, lng), transit)
}

/// `[{0,0,false}, {1,1,false}, {2,2,true}, {0,0,false}]`
fn four_stop_route() -> Vec<RouteStop> {
    vec![
        stop(0.0, 0.0, false),
        stop(1.0, 1.0, false),
        stop(2.0, 2.0, true),
        stop(0.0, 0.0, false),
    ]
}

fn route_of(n: usize, offset: f64) -> Vec<RouteStop> {
    (0..n)
        .map(|i| stop(offset + i as f64 * 0.01, offset, false))
        .collect()
}

fn success() -> DirectionsOutcome {
    let leg = Leg::new(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0), TravelMode::Walk);
    DirectionsOutcome::Success(StraightLineDirections.directions_for(&leg))
}

async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

async fn wait_for_state(controller: &Controller, want: &SequencerState) {
    for _ in 0..50 {
        if controller.status().is_some_and(|s| &s.state == want) {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("never reached {want:?}, status {:?}", controller.status());
}

#[tokio::test]
async fn four_stop_route_end_to_end() {
    let controller = controller(ScriptedDirections::new());

    let token = controller.compute_route(four_stop_route()).await.unwrap();
    let outcome = controller.join().await;

    assert_eq!(outcome, Some(SequenceOutcome::Complete { legs: 3 }));

    let status = controller.status().unwrap();
    assert_eq!(status.session, token);
    assert_eq!(status.state, SequencerState::Complete);
    assert_eq!(status.current_leg_index, 3);
    assert_eq!(status.rendered, 3);
    assert!(status.complete);

    let snapshot = controller.with_surface(MapView::snapshot);
    let modes: Vec<TravelMode> = snapshot.legs.iter().map(|l| l.mode).collect();
    assert_eq!(modes, vec![TravelMode::Walk, TravelMode::Transit, TravelMode::Walk]);
    assert_eq!(snapshot.legs[1].destination, Coordinate::new(2.0, 2.0));

    let itinerary = snapshot.itinerary.unwrap();
    assert_eq!(itinerary.errands, vec!["Walk to point A", "Walk to point B"]);
    assert_eq!(itinerary.origin, "Current Location");

    // One marker per leg origin, numbered by leg
    let marker_indices: Vec<usize> = snapshot.markers.iter().map(|m| m.index).collect();
    assert_eq!(marker_indices, vec![0, 1, 2]);
    assert_eq!(snapshot.markers[2].at, Coordinate::new(2.0, 2.0));

    assert_eq!(controller.provider().call_count(), 3);
}

#[tokio::test]
async fn errand_labels_come_from_registry() {
    let errands = ErrandRegistry::new(vec![ErrandDescriptor::new(
        Coordinate::new(2.000004, 1.999996),
        "Pharmacy",
        "collect prescription",
    )]);
    let controller = controller_with_errands(ScriptedDirections::new(), errands);

    controller.compute_route(four_stop_route()).await.unwrap();
    controller.join().await;

    let itinerary = controller.with_surface(MapView::snapshot).itinerary.unwrap();
    assert_eq!(
        itinerary.errands,
        vec!["Walk to point A", "Pharmacy: collect prescription"]
    );
}

#[tokio::test]
async fn insufficient_stops_fail_fast() {
    let controller = controller(ScriptedDirections::new());

    let err = controller
        .compute_route(vec![stop(0.0, 0.0, false)])
        .await
        .unwrap_err();

    assert_eq!(err, PlanError::InsufficientStops { found: 1 });
    assert!(controller.status().is_none());
    assert_eq!(controller.provider().call_count(), 0);
    assert!(controller.with_surface(MapView::snapshot).itinerary.is_none());
}

#[tokio::test]
async fn plan_error_leaves_previous_session_alone() {
    let controller = controller(ScriptedDirections::new());

    let token = controller.compute_route(four_stop_route()).await.unwrap();
    controller.join().await;

    assert!(controller.compute_route(Vec::new()).await.is_err());

    let status = controller.status().unwrap();
    assert_eq!(status.session, token);
    assert_eq!(status.rendered, 3);
}

#[tokio::test(start_paused = true)]
async fn new_session_during_retry_wait_silences_old_one() {
    let provider =
        ScriptedDirections::with_outcomes([success(), success(), DirectionsOutcome::RateLimited]);
    let controller = controller(provider);

    // Five legs; the third is rate limited
    let first = controller.compute_route(route_of(6, 10.0)).await.unwrap();
    wait_for_state(&controller, &SequencerState::RetryWait { leg: 2, retry: 1 }).await;
    assert_eq!(controller.with_surface(MapView::leg_count), 2);
    assert_eq!(controller.provider().call_count(), 3);

    let second_route = route_of(2, 50.0);
    let second = controller.compute_route(second_route.clone()).await.unwrap();
    assert!(second > first);
    assert_eq!(controller.join().await, Some(SequenceOutcome::Complete { legs: 1 }));

    // Let the old session's retry deadline pass
    tokio::time::advance(Duration::from_secs(3)).await;
    settle().await;

    let snapshot = controller.with_surface(MapView::snapshot);
    assert_eq!(snapshot.legs.len(), 1);
    assert_eq!(snapshot.legs[0].origin, second_route[0].coordinate);
    assert_eq!(snapshot.markers.len(), 1);

    // Three requests from the first session, one from the second
    assert_eq!(controller.provider().call_count(), 4);
    assert_eq!(controller.status().unwrap().session, second);
}

#[tokio::test]
async fn provider_failure_surfaces_in_status() {
    let provider = ScriptedDirections::new();
    provider.push(success());
    provider.push(DirectionsOutcome::Failure(DirectionsFailure {
        status: "NOT_FOUND".into(),
        message: "geocode failed".into(),
    }));
    let controller = controller(provider);

    controller.compute_route(four_stop_route()).await.unwrap();
    let outcome = controller.join().await.unwrap();

    assert!(matches!(outcome, SequenceOutcome::Failed { leg: 1, .. }));
    let status = controller.status().unwrap();
    assert_eq!(
        status.state,
        SequencerState::Failed {
            leg: 1,
            reason: "NOT_FOUND: geocode failed".into()
        }
    );
    assert_eq!(status.rendered, 1);
    assert!(!status.complete);
    assert_eq!(controller.provider().call_count(), 2);
}

#[tokio::test]
async fn clear_is_idempotent() {
    let controller = controller(ScriptedDirections::new());
    controller.compute_route(four_stop_route()).await.unwrap();
    controller.join().await;
    assert_eq!(controller.with_surface(MapView::leg_count), 3);

    controller.clear();
    assert_eq!(controller.with_surface(MapView::leg_count), 0);
    assert_eq!(controller.status().unwrap().rendered, 0);
    assert!(controller.with_surface(MapView::snapshot).markers.is_empty());

    controller.clear();
    assert_eq!(controller.with_surface(MapView::leg_count), 0);
}

#[tokio::test]
async fn recomputing_does_not_accumulate_legs() {
    let controller = controller(ScriptedDirections::new());

    controller.compute_route(four_stop_route()).await.unwrap();
    controller.join().await;
    controller.compute_route(route_of(3, 5.0)).await.unwrap();
    controller.join().await;

    let snapshot = controller.with_surface(MapView::snapshot);
    assert_eq!(snapshot.legs.len(), 2);
    assert_eq!(snapshot.markers.len(), 2);
    assert_eq!(snapshot.itinerary.unwrap().errands, vec!["Walk to point A"]);
}

#[tokio::test]
async fn cancel_removes_session_and_drawing() {
    let controller = controller(ScriptedDirections::new());
    controller.compute_route(four_stop_route()).await.unwrap();
    controller.join().await;

    controller.cancel();

    assert!(controller.status().is_none());
    let snapshot = controller.with_surface(MapView::snapshot);
    assert!(snapshot.legs.is_empty());
    assert!(snapshot.markers.is_empty());
    assert!(snapshot.itinerary.is_none());

    // Cancelling again is harmless
    controller.cancel();
    assert!(controller.join().await.is_none());
}
