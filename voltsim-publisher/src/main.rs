// Voltsim - Synthetic household energy telemetry
// Copyright (c) 2026 Voltra Engineering
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! # Voltsim Publisher
//!
//! Drives the voltsim generator at a fixed interval and publishes each
//! telemetry record to a Realtime Database instance.
//!
//! ## Usage
//!
//! ```bash
//! # Run with the built-in household profiles
//! voltsim-publisher
//!
//! # Run against a specific database with a custom profile table
//! voltsim-publisher --config voltsim.json
//!
//! # Reproducible bounded run
//! voltsim-publisher --seed 42 --ticks 100 --interval-secs 1
//! ```

mod config;
mod sink;

use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use tokio::time::Duration;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;
use voltsim::{GeneratorConfig, TelemetryGenerator};

use config::PublisherConfig;
use sink::{RtdbSink, TelemetrySink};

/// Voltsim telemetry publisher
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tick period in seconds (overrides the config file)
    #[arg(short, long)]
    interval_secs: Option<f64>,

    /// Random seed for reproducible runs (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of ticks to run before exiting (0 = until interrupted)
    #[arg(short, long, default_value = "0")]
    ticks: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Voltsim Publisher v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match args.config {
        Some(ref path) => match PublisherConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            info!("No config file specified, using built-in household profiles");
            PublisherConfig::default()
        }
    };

    if let Some(secs) = args.interval_secs {
        config.interval_seconds = secs;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let mut generator_config = GeneratorConfig::new()
        .with_interval_seconds(config.interval_seconds)
        .with_device_id(&config.device_id);
    if let Some(seed) = config.seed {
        generator_config = generator_config.with_seed(seed);
    }

    let mut generator =
        match TelemetryGenerator::new(generator_config, config.appliances.clone(), Utc::now()) {
            Ok(generator) => generator,
            Err(e) => {
                error!("Invalid appliance profile: {}", e);
                std::process::exit(1);
            }
        };

    let sink = RtdbSink::new(&config.database_url, config.auth_token.clone());

    let appliance_names: Vec<&str> = config.appliances.iter().map(|p| p.name.as_str()).collect();
    info!(
        "Publishing every {}s to {}",
        config.interval_seconds, config.database_url
    );
    info!("Simulating appliances: {:?}", appliance_names);

    let published = run_loop(&mut generator, &sink, config.interval_seconds, args.ticks).await;
    info!("Simulation stopped after {} ticks", published);
}

/// Drive the generator until interrupted or `max_ticks` records are out.
///
/// A failed publish is logged and the loop moves on to the next tick;
/// generator state is unaffected by sink failures.
async fn run_loop(
    generator: &mut TelemetryGenerator,
    sink: &dyn TelemetrySink,
    interval_seconds: f64,
    max_ticks: u64,
) -> u64 {
    let mut ticker = tokio::time::interval(Duration::from_secs_f64(interval_seconds));
    let mut published = 0u64;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let record = generator.generate(Utc::now());
                match sink.publish(&record).await {
                    Ok(()) => info!(
                        "Sent {:.1}W, {:.1}V, {:.2}A",
                        record.power, record.voltage, record.current
                    ),
                    Err(e) => warn!("Failed to send record: {}", e),
                }

                published += 1;
                if max_ticks > 0 && published >= max_ticks {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received, stopping simulation");
                break;
            }
        }
    }

    published
}
