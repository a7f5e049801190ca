// Voltsim - Synthetic household energy telemetry
// Copyright (c) 2026 Voltra Engineering
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Appliance profile definitions.
//!
//! A profile describes one appliance kind: its nominal power draw, the
//! uniform variation around it, and the behavior mode shaping the draw
//! over time. Profiles are static; all mutable state lives in
//! [`crate::appliance::ApplianceState`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Profile validation errors.
///
/// Malformed profiles are a configuration-time contract violation and are
/// rejected when the generator is constructed, never during evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// Base power is negative or not finite.
    #[error("Invalid base power for '{name}': {value}")]
    InvalidBasePower { name: String, value: f64 },

    /// Variation is negative or not finite.
    #[error("Invalid variation for '{name}': {value}")]
    InvalidVariation { name: String, value: f64 },

    /// Cycle duration is non-positive or not finite.
    #[error("Invalid cycle duration for '{name}': {value}")]
    InvalidCycleDuration { name: String, value: f64 },

    /// Usage probability is outside [0, 1].
    #[error("Usage probability out of range for '{name}': {value}")]
    InvalidUsageProbability { name: String, value: f64 },

    /// Appliance name is empty.
    #[error("Empty appliance name")]
    EmptyName,
}

/// Behavior mode of an appliance.
///
/// Exactly one mode applies to each profile; the variants make the three
/// behaviors exhaustively enumerable instead of a set of optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ApplianceMode {
    /// Fixed duty cycle keyed to elapsed time since simulator start
    /// (compressor behavior): 10 minutes running, 20 minutes standby,
    /// repeating every 30 minutes.
    AlwaysOn,

    /// Half-sine power envelope over a fixed program length (washing
    /// machine behavior). A cycle starts at random and runs to completion.
    Cyclic {
        /// Program length in seconds.
        cycle_duration_s: f64,
    },

    /// Random on/off toggling (TV, lights, microwave). The chance to
    /// switch on is `usage_probability * 0.01` per evaluation, so the
    /// effective toggle rate depends on the generator's tick interval.
    Probabilistic {
        /// Relative likelihood of use, in [0, 1].
        usage_probability: f64,
    },
}

/// Static description of one appliance kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplianceProfile {
    /// Appliance name, used as the breakdown key in telemetry records.
    pub name: String,

    /// Nominal power draw in watts.
    pub base_power_w: f64,

    /// Uniform variation bound around the nominal draw, in watts.
    pub variation_w: f64,

    /// Behavior mode.
    #[serde(flatten)]
    pub mode: ApplianceMode,
}

impl ApplianceProfile {
    /// Create a new profile.
    pub fn new(name: &str, base_power_w: f64, variation_w: f64, mode: ApplianceMode) -> Self {
        Self {
            name: name.to_string(),
            base_power_w,
            variation_w,
            mode,
        }
    }

    /// Create an always-on profile (duty-cycled compressor).
    pub fn always_on(name: &str, base_power_w: f64, variation_w: f64) -> Self {
        Self::new(name, base_power_w, variation_w, ApplianceMode::AlwaysOn)
    }

    /// Create a cyclic profile with the given program length.
    pub fn cyclic(name: &str, base_power_w: f64, variation_w: f64, cycle_duration_s: f64) -> Self {
        Self::new(
            name,
            base_power_w,
            variation_w,
            ApplianceMode::Cyclic { cycle_duration_s },
        )
    }

    /// Create a probabilistic on/off profile.
    pub fn probabilistic(
        name: &str,
        base_power_w: f64,
        variation_w: f64,
        usage_probability: f64,
    ) -> Self {
        Self::new(
            name,
            base_power_w,
            variation_w,
            ApplianceMode::Probabilistic { usage_probability },
        )
    }

    /// Validate numeric bounds. Called once per profile at generator
    /// construction.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if !self.base_power_w.is_finite() || self.base_power_w < 0.0 {
            return Err(ProfileError::InvalidBasePower {
                name: self.name.clone(),
                value: self.base_power_w,
            });
        }
        if !self.variation_w.is_finite() || self.variation_w < 0.0 {
            return Err(ProfileError::InvalidVariation {
                name: self.name.clone(),
                value: self.variation_w,
            });
        }
        match self.mode {
            ApplianceMode::AlwaysOn => {}
            ApplianceMode::Cyclic { cycle_duration_s } => {
                if !cycle_duration_s.is_finite() || cycle_duration_s <= 0.0 {
                    return Err(ProfileError::InvalidCycleDuration {
                        name: self.name.clone(),
                        value: cycle_duration_s,
                    });
                }
            }
            ApplianceMode::Probabilistic { usage_probability } => {
                if !usage_probability.is_finite() || !(0.0..=1.0).contains(&usage_probability) {
                    return Err(ProfileError::InvalidUsageProbability {
                        name: self.name.clone(),
                        value: usage_probability,
                    });
                }
            }
        }
        Ok(())
    }
}
