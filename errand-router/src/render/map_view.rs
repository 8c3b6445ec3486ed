//! In-memory map surface.
//!
//! Keeps what would be on screen (drawn legs, markers, the itinerary) as
//! plain data so the web layer can serve it as JSON or HTML.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::directions::{Directions, decode_polyline};
use crate::domain::{Coordinate, Leg, TravelMode};
use crate::planner::Itinerary;

use super::style::PolylineStyle;
use super::{ItineraryDisplay, RenderSurface};

/// Handle to a leg drawn on a [`MapView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RenderedLegId(u64);

/// A drawn leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedLegView {
    pub id: RenderedLegId,
    pub index: usize,
    pub mode: TravelMode,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub polyline: String,
    /// Decoded polyline; empty if the provider's polyline was malformed.
    pub path: Vec<Coordinate>,
    pub distance_meters: u64,
    pub duration_secs: i64,
    pub instructions: Vec<String>,
    pub style: PolylineStyle,
}

impl RenderedLegView {
    /// Duration formatted for display, e.g. `"1 h 5 min"` or `"12 min"`.
    pub fn duration_text(&self) -> String {
        let mins = (self.duration_secs + 59) / 60;
        if mins >= 60 {
            format!("{} h {} min", mins / 60, mins % 60)
        } else {
            format!("{mins} min")
        }
    }
}

/// A numbered marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub at: Coordinate,
    pub index: usize,
}

/// Everything currently shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapSnapshot {
    pub itinerary: Option<Itinerary>,
    /// Drawn legs ordered by leg index.
    pub legs: Vec<RenderedLegView>,
    pub markers: Vec<Marker>,
}

/// In-memory [`RenderSurface`] and [`ItineraryDisplay`].
#[derive(Debug, Default)]
pub struct MapView {
    next_id: u64,
    legs: BTreeMap<RenderedLegId, RenderedLegView>,
    markers: Vec<Marker>,
    itinerary: Option<Itinerary>,
}

impl MapView {
    /// Create an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of drawn legs.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Copy out the current contents.
    pub fn snapshot(&self) -> MapSnapshot {
        let mut legs: Vec<RenderedLegView> = self.legs.values().cloned().collect();
        legs.sort_by_key(|l| l.index);
        MapSnapshot {
            itinerary: self.itinerary.clone(),
            legs,
            markers: self.markers.clone(),
        }
    }
}

impl RenderSurface for MapView {
    type Handle = RenderedLegId;

    fn render(
        &mut self,
        index: usize,
        leg: &Leg,
        directions: &Directions,
        style: &PolylineStyle,
    ) -> RenderedLegId {
        let id = RenderedLegId(self.next_id);
        self.next_id += 1;

        let view = RenderedLegView {
            id,
            index,
            mode: leg.mode,
            origin: leg.origin,
            destination: leg.destination,
            polyline: directions.polyline.clone(),
            path: decode_polyline(&directions.polyline).unwrap_or_default(),
            distance_meters: directions.distance_meters,
            duration_secs: directions.duration.num_seconds(),
            instructions: directions.steps.iter().map(|s| s.instruction.clone()).collect(),
            style: style.clone(),
        };
        self.legs.insert(id, view);
        id
    }

    fn unrender(&mut self, handle: RenderedLegId) {
        self.legs.remove(&handle);
    }

    fn place_marker(&mut self, at: Coordinate, index: usize) {
        self.markers.push(Marker { at, index });
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
    }
}

impl ItineraryDisplay for MapView {
    fn publish_itinerary(&mut self, itinerary: &Itinerary) {
        self.itinerary = Some(itinerary.clone());
    }

    fn clear_itinerary(&mut self) {
        self.itinerary = None;
    }
}
