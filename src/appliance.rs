// Voltsim - Synthetic household energy telemetry
// Copyright (c) 2026 Voltra Engineering
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Stateful per-appliance power models.
//!
//! An [`ApplianceModel`] maps an evaluation time to an instantaneous
//! power draw in watts, dispatching on the profile's behavior mode. State
//! is created lazily on the first evaluation and mutated only in cyclic
//! and probabilistic modes.

use std::f64::consts::TAU;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::profile::{ApplianceMode, ApplianceProfile};

/// Compressor duty cycle period for always-on appliances, in seconds.
const DUTY_CYCLE_PERIOD_S: f64 = 1800.0;
/// Running portion of the duty cycle, in seconds.
const DUTY_CYCLE_ON_S: f64 = 600.0;
/// Fraction of base power drawn while an always-on appliance idles.
const IDLE_POWER_FRACTION: f64 = 0.1;
/// Chance per evaluation that an idle cyclic appliance starts a cycle.
const CYCLE_START_PROBABILITY: f64 = 0.001;
/// Flat standby draw of a cyclic appliance between cycles, in watts.
const CYCLIC_STANDBY_W: f64 = 5.0;
/// Scale applied to `usage_probability` per evaluation.
const USAGE_PROBABILITY_SCALE: f64 = 0.01;
/// Bounds of the on-duration threshold for probabilistic appliances, in seconds.
const MIN_ON_DURATION_S: f64 = 300.0;
const MAX_ON_DURATION_S: f64 = 1800.0;
/// Upper bound of the parasitic standby draw, in watts.
const STANDBY_MAX_W: f64 = 5.0;

/// Mutable per-appliance state.
///
/// Owned exclusively by its [`ApplianceModel`]; lives for the process
/// lifetime once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplianceState {
    /// Whether the appliance is currently on.
    pub is_on: bool,
    /// Start of the active cycle, if one is running.
    pub cycle_start: Option<DateTime<Utc>>,
    /// Time of the last on/off toggle.
    pub last_toggle: DateTime<Utc>,
}

impl ApplianceState {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            is_on: false,
            cycle_start: None,
            last_toggle: now,
        }
    }
}

/// One appliance instance: a static profile plus its mutable state.
#[derive(Debug, Clone)]
pub struct ApplianceModel {
    profile: ApplianceProfile,
    state: Option<ApplianceState>,
}

impl ApplianceModel {
    /// Create a model with no state yet; state appears on first evaluation.
    pub fn new(profile: ApplianceProfile) -> Self {
        Self {
            profile,
            state: None,
        }
    }

    /// The static profile.
    pub fn profile(&self) -> &ApplianceProfile {
        &self.profile
    }

    /// Current state, if the model has been evaluated at least once.
    pub fn state(&self) -> Option<&ApplianceState> {
        self.state.as_ref()
    }

    /// Instantaneous power draw in watts at `now`.
    ///
    /// `sim_start` anchors the duty cycle of always-on appliances. The
    /// order of random draws within one evaluation is fixed (toggle check
    /// before power draw) so that seeded runs are reproducible.
    pub fn evaluate(
        &mut self,
        now: DateTime<Utc>,
        sim_start: DateTime<Utc>,
        rng: &mut (impl Rng + ?Sized),
    ) -> f64 {
        let base = self.profile.base_power_w;
        let variation = self.profile.variation_w;
        let state = self.state.get_or_insert_with(|| ApplianceState::new(now));

        match self.profile.mode {
            ApplianceMode::AlwaysOn => {
                let cycle_time = seconds_between(sim_start, now).rem_euclid(DUTY_CYCLE_PERIOD_S);
                if cycle_time < DUTY_CYCLE_ON_S {
                    (base + rng.gen_range(-variation..=variation)).max(0.0)
                } else {
                    base * IDLE_POWER_FRACTION
                }
            }
            ApplianceMode::Cyclic { cycle_duration_s } => {
                if let Some(cycle_start) = state.cycle_start {
                    let in_cycle = seconds_between(cycle_start, now);
                    if in_cycle < cycle_duration_s {
                        let progress = in_cycle / cycle_duration_s;
                        let multiplier = 0.5 + 0.5 * (progress * TAU).sin();
                        // Noise floor may dip below zero here; left unclamped.
                        return base * multiplier + rng.gen_range(-variation..=variation);
                    }
                    state.cycle_start = None;
                }
                if rng.gen::<f64>() < CYCLE_START_PROBABILITY {
                    state.cycle_start = Some(now);
                    base
                } else {
                    CYCLIC_STANDBY_W
                }
            }
            ApplianceMode::Probabilistic { usage_probability } => {
                if !state.is_on {
                    if rng.gen::<f64>() < usage_probability * USAGE_PROBABILITY_SCALE {
                        state.is_on = true;
                        state.last_toggle = now;
                    }
                } else {
                    let threshold_s = rng.gen_range(MIN_ON_DURATION_S..=MAX_ON_DURATION_S);
                    if seconds_between(state.last_toggle, now) > threshold_s {
                        state.is_on = false;
                        state.last_toggle = now;
                    }
                }

                if state.is_on {
                    (base + rng.gen_range(-variation..=variation)).max(0.0)
                } else {
                    rng.gen_range(0.0..=STANDBY_MAX_W)
                }
            }
        }
    }
}

/// Elapsed seconds from `earlier` to `later`.
fn seconds_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_milliseconds() as f64 / 1000.0
}
