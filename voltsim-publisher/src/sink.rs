// Voltsim - Synthetic household energy telemetry
// Copyright (c) 2026 Voltra Engineering
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Telemetry sinks.
//!
//! A sink accepts one record per tick and reports success or failure.
//! The driver never retries; whatever retry policy exists belongs to the
//! sink implementation.

use async_trait::async_trait;
use thiserror::Error;
use voltsim::TelemetryRecord;

/// Sink errors.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Transport-level failure (connect, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The datastore answered with a non-success status.
    #[error("Datastore rejected write to '{path}': HTTP {status}")]
    Rejected { path: String, status: u16 },
}

/// A destination for telemetry records.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Publish one record.
    async fn publish(&self, record: &TelemetryRecord) -> Result<(), SinkError>;
}

/// Realtime Database REST sink.
///
/// Appends each record to the rolling `telemetry` feed and overwrites
/// the `latest` snapshot, which is what the monitoring dashboard reads.
pub struct RtdbSink {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RtdbSink {
    /// Create a sink for the given database instance.
    pub fn new(base_url: &str, auth_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        }
    }

    /// REST endpoint for a database path.
    fn endpoint(&self, path: &str) -> String {
        match &self.auth_token {
            Some(token) => format!("{}/{}.json?auth={}", self.base_url, path, token),
            None => format!("{}/{}.json", self.base_url, path),
        }
    }

    async fn write(
        &self,
        method: reqwest::Method,
        path: &str,
        record: &TelemetryRecord,
    ) -> Result<(), SinkError> {
        let response = self
            .client
            .request(method, self.endpoint(path))
            .json(record)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SinkError::Rejected {
                path: path.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TelemetrySink for RtdbSink {
    async fn publish(&self, record: &TelemetryRecord) -> Result<(), SinkError> {
        // Append to the feed first, then refresh the latest snapshot.
        self.write(reqwest::Method::POST, "telemetry", record).await?;
        self.write(reqwest::Method::PUT, "latest", record).await
    }
}
