//! The display state shared between the controller and sequencer tasks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::directions::Directions;
use crate::domain::Leg;
use crate::render::{PolylineStyle, RenderSurface};
use crate::sequencer::{LegSink, SequencerState};

use super::route_session::{RouteSession, SessionToken};

/// The rendering surface together with the session allowed to draw on it.
pub(crate) struct Display<S: RenderSurface> {
    pub(crate) surface: S,
    pub(crate) session: Option<RouteSession<S::Handle>>,
    last_token: u64,
}

impl<S: RenderSurface> Display<S> {
    pub(crate) fn new(surface: S) -> Self {
        Self {
            surface,
            session: None,
            last_token: 0,
        }
    }

    /// Allocate the next session token.
    pub(crate) fn next_token(&mut self) -> SessionToken {
        self.last_token += 1;
        SessionToken(self.last_token)
    }

    /// The session holding `token`, if it is still the active one.
    fn active_mut(&mut self, token: SessionToken) -> Option<&mut RouteSession<S::Handle>> {
        self.session.as_mut().filter(|s| s.token() == token)
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// [`LegSink`] bound to one session token.
pub(crate) struct SessionSink<S: RenderSurface> {
    token: SessionToken,
    display: Arc<Mutex<Display<S>>>,
}

impl<S: RenderSurface> SessionSink<S> {
    pub(crate) fn new(token: SessionToken, display: Arc<Mutex<Display<S>>>) -> Self {
        Self { token, display }
    }
}

impl<S: RenderSurface> LegSink for SessionSink<S> {
    fn is_current(&self) -> bool {
        lock(&self.display).active_mut(self.token).is_some()
    }

    fn enter(&self, state: SequencerState) -> bool {
        let mut display = lock(&self.display);
        match display.active_mut(self.token) {
            Some(session) => {
                session.set_state(state);
                true
            }
            None => false,
        }
    }

    fn complete_leg(&self, index: usize, leg: &Leg, directions: &Directions) -> bool {
        let mut guard = lock(&self.display);
        let display = &mut *guard;

        let Some(session) = display
            .session
            .as_mut()
            .filter(|s| s.token() == self.token)
        else {
            return false;
        };

        let style = PolylineStyle::for_leg(index, leg.mode);
        let handle = display.surface.render(index, leg, directions, &style);
        display.surface.place_marker(leg.origin, index);
        session.record_leg(handle);
        true
    }
}
