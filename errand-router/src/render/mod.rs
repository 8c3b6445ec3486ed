//! Rendering collaborators.
//!
//! The orchestrator draws through two narrow traits and never cares how the
//! drawing happens: [`RenderSurface`] for leg polylines and markers, and
//! [`ItineraryDisplay`] for the labelled itinerary. [`MapView`] is the
//! in-memory implementation the web layer serves to the browser.

mod map_view;
mod style;

pub use map_view::{MapSnapshot, MapView, Marker, RenderedLegId, RenderedLegView};
pub use style::PolylineStyle;

use crate::directions::Directions;
use crate::domain::{Coordinate, Leg};
use crate::planner::Itinerary;

/// Surface that completed legs are drawn on.
pub trait RenderSurface: Send + 'static {
    /// Opaque handle to a drawn leg, kept only so it can be removed later.
    type Handle: Send + 'static;

    /// Draw leg `index` and return its handle.
    fn render(
        &mut self,
        index: usize,
        leg: &Leg,
        directions: &Directions,
        style: &PolylineStyle,
    ) -> Self::Handle;

    /// Remove a previously drawn leg.
    fn unrender(&mut self, handle: Self::Handle);

    /// Place a numbered marker.
    fn place_marker(&mut self, at: Coordinate, index: usize);

    /// Remove every marker.
    fn clear_markers(&mut self);
}

/// Display for the labelled itinerary.
pub trait ItineraryDisplay: Send + 'static {
    /// Show the itinerary, replacing whatever was shown before.
    fn publish_itinerary(&mut self, itinerary: &Itinerary);

    /// Stop showing any itinerary.
    fn clear_itinerary(&mut self);
}
