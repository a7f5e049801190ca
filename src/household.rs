// Voltsim - Synthetic household energy telemetry
// Copyright (c) 2026 Voltra Engineering
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Built-in household appliance set.

use crate::profile::ApplianceProfile;

/// Default appliance profiles for a small household.
///
/// Used by the publisher when no configuration file supplies its own
/// table. Power figures are typical nameplate values.
pub fn default_household() -> Vec<ApplianceProfile> {
    vec![
        ApplianceProfile::always_on("refrigerator", 150.0, 50.0),
        ApplianceProfile::cyclic("washing_machine", 500.0, 200.0, 3600.0),
        ApplianceProfile::probabilistic("microwave", 1200.0, 100.0, 0.1),
        ApplianceProfile::probabilistic("tv", 200.0, 50.0, 0.3),
        ApplianceProfile::probabilistic("lights", 100.0, 30.0, 0.4),
        ApplianceProfile::probabilistic("air_conditioner", 2000.0, 500.0, 0.2),
    ]
}
