//! Route controller: starts, supersedes and clears sessions.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::SequencerConfig;
use crate::directions::DirectionsProvider;
use crate::domain::{PlanError, RouteStop};
use crate::errands::ErrandRegistry;
use crate::planner::plan_route;
use crate::render::{ItineraryDisplay, RenderSurface};
use crate::sequencer::{RouteSequencer, SequenceOutcome, SequencerState};

use super::route_session::{RouteSession, SessionToken};
use super::sink::{Display, SessionSink, lock};

/// Progress of the active session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub session: SessionToken,
    #[serde(flatten)]
    pub state: SequencerState,
    pub current_leg_index: usize,
    pub leg_count: usize,
    pub rendered: usize,
    pub complete: bool,
}

impl SessionStatus {
    fn of<H>(session: &RouteSession<H>) -> Self {
        Self {
            session: session.token(),
            state: session.state().clone(),
            current_leg_index: session.current_leg_index(),
            leg_count: session.leg_count(),
            rendered: session.rendered_count(),
            complete: session.is_complete(),
        }
    }
}

/// Owns the display and the single active route session.
pub struct RouteController<P, S: RenderSurface> {
    provider: Arc<P>,
    errands: ErrandRegistry,
    display: Arc<Mutex<Display<S>>>,
    config: SequencerConfig,
    task: Mutex<Option<JoinHandle<SequenceOutcome>>>,
}

impl<P, S> RouteController<P, S>
where
    P: DirectionsProvider + 'static,
    S: RenderSurface + ItineraryDisplay,
{
    /// Create a controller drawing on `surface`.
    pub fn new(provider: P, surface: S, errands: ErrandRegistry, config: SequencerConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            errands,
            display: Arc::new(Mutex::new(Display::new(surface))),
            config,
            task: Mutex::new(None),
        }
    }

    /// The errand registry stops are matched against.
    pub fn errands(&self) -> &ErrandRegistry {
        &self.errands
    }

    /// The directions provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Start a new session for an optimizer route response.
    ///
    /// Plans legs and labels, clears the previous session's legs, publishes
    /// the itinerary, and spawns the sequencer. Returns as soon as the task
    /// is spawned. The previous session is superseded: its task is aborted
    /// and any response it still receives is discarded.
    ///
    /// # Errors
    ///
    /// [`PlanError::InsufficientStops`] for fewer than 2 stops. Nothing is
    /// requested and the previous session keeps running.
    pub async fn compute_route(&self, stops: Vec<RouteStop>) -> Result<SessionToken, PlanError> {
        let known = self.errands.list_known_errands().await;
        let plan = plan_route(&stops, &known)?;

        // Hold the task slot across install and spawn so concurrent calls
        // cannot leave an older session's task in the slot.
        let mut task = lock(&self.task);

        let token = {
            let mut guard = lock(&self.display);
            let display = &mut *guard;
            let token = display.next_token();

            if let Some(mut previous) = display.session.take() {
                debug!(previous = %previous.token(), %token, "superseding session");
                previous.clear(&mut display.surface);
            }
            display.surface.publish_itinerary(&plan.itinerary());
            display.session = Some(RouteSession::new(token, stops));
            token
        };

        info!(session = %token, legs = plan.legs.len(), "starting route session");

        let provider = Arc::clone(&self.provider);
        let sink = SessionSink::new(token, Arc::clone(&self.display));
        let policy = self.config.retry;
        let legs = plan.legs;

        let handle = tokio::spawn(async move {
            let outcome = RouteSequencer::new(&*provider, &sink, policy)
                .run(&legs)
                .await;
            match &outcome {
                SequenceOutcome::Complete { .. } | SequenceOutcome::Superseded { .. } => {}
                SequenceOutcome::Failed { leg, failure } => {
                    warn!(session = %token, leg, %failure, "route stopped at failed leg");
                }
                SequenceOutcome::RetriesExhausted { leg, retries } => {
                    warn!(session = %token, leg, retries, "route stopped, still rate limited");
                }
            }
            outcome
        });

        if let Some(previous) = task.replace(handle) {
            previous.abort();
        }

        Ok(token)
    }

    /// Remove the active session's rendered legs and markers.
    ///
    /// Idempotent. The session itself stays active, so a still-running
    /// sequencer keeps drawing subsequent legs.
    pub fn clear(&self) {
        let mut guard = lock(&self.display);
        let display = &mut *guard;
        if let Some(session) = display.session.as_mut() {
            session.clear(&mut display.surface);
        }
    }

    /// Stop the active session and remove everything it drew.
    pub fn cancel(&self) {
        let mut task = lock(&self.task);
        if let Some(handle) = task.take() {
            handle.abort();
        }

        let mut guard = lock(&self.display);
        let display = &mut *guard;
        if let Some(mut session) = display.session.take() {
            info!(session = %session.token(), "route cancelled");
            session.clear(&mut display.surface);
        }
        display.surface.clear_itinerary();
    }

    /// Progress of the active session, if any.
    pub fn status(&self) -> Option<SessionStatus> {
        lock(&self.display).session.as_ref().map(SessionStatus::of)
    }

    /// Read the display surface.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&lock(&self.display).surface)
    }

    /// Wait for the active session's sequencer to finish.
    ///
    /// Returns `None` if there is no running session or it was aborted.
    /// After this returns, a later `compute_route` can no longer abort the
    /// awaited task, but that task has already finished.
    pub async fn join(&self) -> Option<SequenceOutcome> {
        let handle = lock(&self.task).take()?;
        handle.await.ok()
    }
}
