//! Per-invocation session state.

use std::fmt;

use serde::Serialize;

use crate::domain::RouteStop;
use crate::render::RenderSurface;
use crate::sequencer::SequencerState;

/// Identity of one route computation.
///
/// Tokens increase monotonically; a callback holding an older token than the
/// active session's belongs to a superseded session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SessionToken(pub(crate) u64);

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// State of one route computation.
///
/// # Invariants
///
/// - `stops.len() >= 2`
/// - `current_leg_index <= stops.len() - 1`, and equals the number of legs
///   rendered so far
/// - the session is complete when `current_leg_index == stops.len() - 1`
#[derive(Debug)]
pub struct RouteSession<H> {
    token: SessionToken,
    stops: Vec<RouteStop>,
    current_leg_index: usize,
    rendered: Vec<H>,
    state: SequencerState,
}

impl<H> RouteSession<H> {
    /// Create an idle session for `stops`.
    pub fn new(token: SessionToken, stops: Vec<RouteStop>) -> Self {
        Self {
            token,
            stops,
            current_leg_index: 0,
            rendered: Vec::new(),
            state: SequencerState::Idle,
        }
    }

    pub fn token(&self) -> SessionToken {
        self.token
    }

    pub fn stops(&self) -> &[RouteStop] {
        &self.stops
    }

    /// Number of legs in the route.
    pub fn leg_count(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    /// Index of the next leg to render.
    pub fn current_leg_index(&self) -> usize {
        self.current_leg_index
    }

    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    /// Number of rendered-leg handles held.
    pub fn rendered_count(&self) -> usize {
        self.rendered.len()
    }

    pub fn is_complete(&self) -> bool {
        self.current_leg_index == self.leg_count()
    }

    pub(crate) fn set_state(&mut self, state: SequencerState) {
        self.state = state;
    }

    /// Record the handle of the next leg in sequence.
    pub(crate) fn record_leg(&mut self, handle: H) {
        debug_assert!(self.current_leg_index < self.leg_count());
        self.rendered.push(handle);
        self.current_leg_index = (self.current_leg_index + 1).min(self.leg_count());
    }

    /// Remove every leg this session rendered, and the markers with them.
    ///
    /// Idempotent: a session with nothing rendered is left untouched.
    pub fn clear<S>(&mut self, surface: &mut S)
    where
        S: RenderSurface<Handle = H>,
    {
        if self.rendered.is_empty() {
            return;
        }
        for handle in self.rendered.drain(..) {
            surface.unrender(handle);
        }
        surface.clear_markers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directions::Directions;
    use crate::domain::{Coordinate, Leg};
    use crate::render::PolylineStyle;

    /// Surface that counts calls and hands out numbered handles.
    #[derive(Default)]
    struct CountingSurface {
        next: u32,
        live: Vec<u32>,
        unrendered: usize,
        marker_clears: usize,
    }

    impl RenderSurface for CountingSurface {
        type Handle = u32;

        fn render(&mut self, _: usize, _: &Leg, _: &Directions, _: &PolylineStyle) -> u32 {
            self.next += 1;
            self.live.push(self.next);
            self.next
        }

        fn unrender(&mut self, handle: u32) {
            self.live.retain(|h| *h != handle);
            self.unrendered += 1;
        }

        fn place_marker(&mut self, _: Coordinate, _: usize) {}

        fn clear_markers(&mut self) {
            self.marker_clears += 1;
        }
    }

    fn stops(n: usize) -> Vec<RouteStop> {
        (0..n)
            .map(|i| RouteStop::new(Coordinate::new(i as f64, 0.0), false))
            .collect()
    }

    fn draw(surface: &mut CountingSurface) -> u32 {
        let leg = Leg::new(
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 1.0),
            crate::domain::TravelMode::Walk,
        );
        let directions = crate::directions::StraightLineDirections.directions_for(&leg);
        surface.render(0, &leg, &directions, &PolylineStyle::for_leg(0, leg.mode))
    }

    #[test]
    fn new_session_is_idle() {
        let session: RouteSession<u32> = RouteSession::new(SessionToken(1), stops(4));
        assert_eq!(session.state(), &SequencerState::Idle);
        assert_eq!(session.current_leg_index(), 0);
        assert_eq!(session.leg_count(), 3);
        assert!(!session.is_complete());
    }

    #[test]
    fn complete_after_all_legs() {
        let mut surface = CountingSurface::default();
        let mut session = RouteSession::new(SessionToken(1), stops(3));

        session.record_leg(draw(&mut surface));
        assert_eq!(session.current_leg_index(), 1);
        assert!(!session.is_complete());

        session.record_leg(draw(&mut surface));
        assert_eq!(session.current_leg_index(), 2);
        assert!(session.is_complete());
    }

    #[test]
    fn clear_removes_all_handles_once() {
        let mut surface = CountingSurface::default();
        let mut session = RouteSession::new(SessionToken(1), stops(4));
        for _ in 0..3 {
            session.record_leg(draw(&mut surface));
        }
        assert_eq!(session.rendered_count(), 3);

        session.clear(&mut surface);
        assert_eq!(surface.unrendered, 3);
        assert!(surface.live.is_empty());
        assert_eq!(session.rendered_count(), 0);
        assert_eq!(surface.marker_clears, 1);

        // Second clear is a no-op
        session.clear(&mut surface);
        assert_eq!(surface.unrendered, 3);
        assert_eq!(surface.marker_clears, 1);
    }

    #[test]
    fn token_display_and_order() {
        assert_eq!(SessionToken(7).to_string(), "#7");
        assert!(SessionToken(2) > SessionToken(1));
    }
}
