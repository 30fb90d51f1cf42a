//! InfluxDB v2 HTTP sink
//!
//! Speaks the v2 write API: a `GET /ready` readiness probe and buffered
//! line-protocol writes POSTed to `/api/v2/write`. The dispatcher owns the
//! write/flush cadence; this sink only buffers between flushes.

use super::line_protocol::encode_point;
use crate::core::config::HookConfig;
use crate::core::error::{HookError, Result};
use crate::core::point::Point;
use crate::core::sink::Sink;
use reqwest::blocking::Client;

pub struct InfluxSink {
    client: Client,
    base_url: String,
    org: String,
    bucket: String,
    precision: String,
    token: Option<String>,
    buffer: Vec<String>,
}

impl InfluxSink {
    /// Build a sink from a resolved config. Fails only on client
    /// construction; reachability is checked separately via [`Sink::ready`].
    pub fn new(config: &HookConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        // v1-style configs name a database instead of a bucket.
        let bucket = if config.bucket.is_empty() {
            config.database.clone()
        } else {
            config.bucket.clone()
        };

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            org: config.org.clone(),
            bucket,
            precision: config.precision.clone(),
            token: config.token.clone(),
            buffer: Vec::new(),
        })
    }

    /// Number of lines buffered since the last flush.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}

impl Sink for InfluxSink {
    fn ready(&mut self) -> Result<bool> {
        let response = self.client.get(format!("{}/ready", self.base_url)).send()?;
        Ok(response.status().is_success())
    }

    fn write(&mut self, point: &Point) -> Result<()> {
        let Some(line) = encode_point(point, &self.precision) else {
            return Err(HookError::sink("point has no encodable fields"));
        };
        self.buffer.push(line);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        // No retries: a rejected batch is dropped either way.
        let body = std::mem::take(&mut self.buffer).join("\n");

        let mut request = self
            .client
            .post(format!("{}/api/v2/write", self.base_url))
            .query(&[
                ("org", self.org.as_str()),
                ("bucket", self.bucket.as_str()),
                ("precision", self.precision.as_str()),
            ])
            .body(body);
        if let Some(ref token) = self.token {
            request = request.header("Authorization", format!("Token {}", token));
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(HookError::rejected(self.name(), status.as_u16(), body));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "influxdb"
    }
}
