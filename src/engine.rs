//! Opportunity matching
//!
//! Filters a forecast down to the observations worth a record attempt on one
//! segment and orders them for reporting. Pure computation: no I/O and no
//! configuration other than the [`ScoringParams`] passed in.

use chrono::{DateTime, FixedOffset, NaiveDate};
use log::trace;

use crate::config::ScoringParams;
use crate::scoring::{overall_favorability, speed_norm, wind_alignment_score};
use crate::types::{score_percent, Observation, Opportunity};

/// Whether `at` falls in `[sunrise, sunset)` by local time of day.
///
/// Dates are ignored, so the sun times must belong to the same calendar date
/// as `at`.
pub fn is_daylight(
    at: &DateTime<FixedOffset>,
    sunrise: &DateTime<FixedOffset>,
    sunset: &DateTime<FixedOffset>,
) -> bool {
    let t = at.time();
    sunrise.time() <= t && t < sunset.time()
}

/// Score a single observation against a segment bearing.
///
/// Returns `None` when the observation is rejected by any filter.
pub fn score_observation(
    segment_bearing: f64,
    observation: &Observation,
    params: &ScoringParams,
) -> Option<f64> {
    if !is_daylight(
        &observation.timestamp,
        &observation.sunrise,
        &observation.sunset,
    ) {
        trace!("{}: outside daylight", observation.timestamp);
        return None;
    }

    if observation.wind_speed < params.min_wind_speed {
        trace!(
            "{}: {:.1} mph below minimum",
            observation.timestamp,
            observation.wind_speed
        );
        return None;
    }

    let alignment = wind_alignment_score(
        segment_bearing,
        observation.wind_bearing,
        params.direction_tolerance,
    );
    if alignment == 0.0 {
        trace!("{}: outside direction tolerance", observation.timestamp);
        return None;
    }

    let score = overall_favorability(
        alignment,
        speed_norm(observation.wind_speed, params.top_wind_speed),
        params.weights,
    );
    if score_percent(score) < params.quality_percentage {
        trace!("{}: {:.3} below quality threshold", observation.timestamp, score);
        return None;
    }

    Some(score)
}

/// Find every qualifying observation for a segment.
///
/// The result is grouped by local calendar date in ascending order; within a
/// date, opportunities are sorted by score descending with ties kept in
/// forecast order.
pub fn find_favorable_conditions(
    segment_bearing: f64,
    observations: &[Observation],
    params: &ScoringParams,
) -> Vec<Opportunity> {
    let mut opportunities: Vec<Opportunity> = observations
        .iter()
        .filter_map(|observation| {
            score_observation(segment_bearing, observation, params).map(|score| Opportunity {
                score,
                observation: observation.clone(),
            })
        })
        .collect();

    // Stable: equal (date, score) keys stay in encounter order
    opportunities.sort_by(|a, b| {
        a.observation
            .date()
            .cmp(&b.observation.date())
            .then_with(|| b.score.total_cmp(&a.score))
    });

    opportunities
}

/// Opportunities sharing one calendar date
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup<'a> {
    pub date: NaiveDate,
    pub opportunities: &'a [Opportunity],
}

/// Split an ordered opportunity list into its maximal same-date runs
pub fn group_by_date(opportunities: &[Opportunity]) -> Vec<DayGroup<'_>> {
    opportunities
        .chunk_by(|a, b| a.observation.date() == b.observation.date())
        .map(|run| DayGroup {
            date: run[0].observation.date(),
            opportunities: run,
        })
        .collect()
}
