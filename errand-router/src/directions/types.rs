//! Directions API wire types.
//!
//! Only the fields the router uses are modelled; everything else in the
//! provider's response is ignored.

use chrono::Duration;
use serde::Deserialize;

use super::error::DirectionsError;
use super::provider::{Directions, Step};

/// Top-level directions response.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub routes: Vec<RouteDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteDto {
    pub overview_polyline: PolylineDto,
    #[serde(default)]
    pub legs: Vec<LegDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolylineDto {
    pub points: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegDto {
    pub distance: ValueDto,
    pub duration: ValueDto,
    #[serde(default)]
    pub steps: Vec<StepDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StepDto {
    #[serde(default)]
    pub html_instructions: String,
    pub distance: ValueDto,
    pub duration: ValueDto,
    pub travel_mode: String,
}

/// A `{value, text}` pair; `value` is metres or seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueDto {
    pub value: u64,
    #[serde(default)]
    pub text: String,
}

impl DirectionsResponse {
    /// Interpret the provider status and convert the first route.
    pub fn into_directions(self) -> Result<Directions, DirectionsError> {
        match self.status.as_str() {
            "OK" => {}
            "OVER_QUERY_LIMIT" => return Err(DirectionsError::RateLimited),
            "REQUEST_DENIED" => return Err(DirectionsError::Unauthorized),
            "ZERO_RESULTS" | "NOT_FOUND" => return Err(DirectionsError::NoRoute),
            _ => {
                return Err(DirectionsError::Status {
                    status: self.status,
                    message: self.error_message,
                });
            }
        }

        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or(DirectionsError::NoRoute)?;

        // Single-leg requests carry no waypoints, so there is one leg; sum
        // anyway in case the provider splits it.
        let distance_meters = route.legs.iter().map(|l| l.distance.value).sum();
        let duration_secs: u64 = route.legs.iter().map(|l| l.duration.value).sum();

        let steps = route
            .legs
            .into_iter()
            .flat_map(|l| l.steps)
            .map(|s| Step {
                instruction: plain_instruction(&s.html_instructions),
                distance_meters: s.distance.value,
                duration: Duration::seconds(s.duration.value as i64),
                travel_mode: s.travel_mode,
            })
            .collect();

        Ok(Directions {
            polyline: route.overview_polyline.points,
            distance_meters,
            duration: Duration::seconds(duration_secs as i64),
            steps,
        })
    }
}

/// Reduce a provider `html_instructions` string to plain text.
///
/// Inline tags are dropped, `<div>` blocks become a space, and the handful
/// of entities the provider emits are decoded.
fn plain_instruction(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            rest = &rest[open..];
            break;
        };
        let tag = &rest[open + 1..open + close];
        if tag.trim_start_matches('/').starts_with("div") {
            text.push(' ');
        }
        rest = &rest[open + close + 1..];
    }
    text.push_str(rest);

    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
