// Voltsim - Synthetic household energy telemetry
// Copyright (c) 2026 Voltra Engineering
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! # Voltsim
//!
//! Synthetic household electrical-load telemetry for testing energy
//! monitoring pipelines, standing in for a physical ESP32 sensor device.
//!
//! Each configured appliance is simulated by a small stateful power model
//! (compressor duty cycles, half-sine wash cycles, random on/off
//! toggling). A [`TelemetryGenerator`] aggregates the per-appliance draws
//! into one [`TelemetryRecord`] per tick, deriving voltage, current,
//! power factor, frequency, and per-tick energy.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::Utc;
//! use voltsim::{default_household, GeneratorConfig, TelemetryGenerator};
//!
//! let config = GeneratorConfig::new()
//!     .with_interval_seconds(30.0)
//!     .with_seed(42);
//!
//! let mut generator =
//!     TelemetryGenerator::new(config, default_household(), Utc::now()).unwrap();
//!
//! let record = generator.generate(Utc::now());
//! assert!(record.power > 0.0);
//! assert_eq!(record.appliance_breakdown.len(), 6);
//! ```
//!
//! ## Modules
//!
//! - [`profile`]: Appliance profiles and behavior modes
//! - [`appliance`]: Stateful per-appliance power models
//! - [`generator`]: Per-tick aggregation into telemetry records
//! - [`telemetry`]: The record type handed to the sink
//! - [`household`]: Built-in household appliance set
//!
//! ## Determinism
//!
//! All random draws go through the generator's own seedable RNG. With a
//! fixed seed and fixed evaluation times, two generators produce
//! byte-identical serialized records.

pub mod appliance;
pub mod generator;
pub mod household;
pub mod profile;
pub mod telemetry;

// Re-exports for convenient access
pub use appliance::{ApplianceModel, ApplianceState};
pub use generator::{GeneratorConfig, TelemetryGenerator};
pub use household::default_household;
pub use profile::{ApplianceMode, ApplianceProfile, ProfileError};
pub use telemetry::{TelemetryRecord, DEVICE_ID};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
