// Voltsim - Synthetic household energy telemetry
// Copyright (c) 2026 Voltra Engineering
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! The telemetry record emitted once per tick.
//!
//! The serialized record is the entire contract with the sink; field
//! precisions are fixed per field (voltage 2, current 3, power 2, energy
//! 6, power factor 3, frequency 2, breakdown entries 2 decimals).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default device identifier reported by the simulator.
pub const DEVICE_ID: &str = "ESP32_SIM_001";

/// One telemetry reading.
///
/// Created fresh each tick, handed to the sink, then discarded; the
/// generator keeps no record history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Wall-clock time of the reading (RFC 3339).
    pub timestamp: DateTime<Utc>,
    /// Line voltage in volts.
    pub voltage: f64,
    /// Line current in amperes.
    pub current: f64,
    /// Total active power in watts.
    pub power: f64,
    /// Energy delivered during this tick in kWh (not a running total).
    pub energy_kwh: f64,
    /// Power factor.
    pub power_factor: f64,
    /// Grid frequency in hertz.
    pub frequency: f64,
    /// Per-appliance power contributions in watts.
    pub appliance_breakdown: BTreeMap<String, f64>,
    /// Device identifier.
    pub device_id: String,
}

/// Round to a fixed number of decimal places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
