//! Simulated sensor device.
//!
//! Posts a heart-rate/SpO2 pair every tick and a weight every
//! `--weight-every` ticks, the way a bedside device would.

use anyhow::{bail, Result};
use clap::Args;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Args)]
pub struct SimulateArgs {
    /// Base URL of a running Vitalink server
    #[arg(long, env = "VITALINK_URL", default_value = "http://127.0.0.1:3000")]
    pub url: String,

    /// Shared secret sent as a bearer token
    #[arg(long, env = "VITALINK_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Milliseconds between readings
    #[arg(long, default_value = "1000")]
    pub interval_ms: u64,

    /// Stop after this many readings (runs until Ctrl+C when omitted)
    #[arg(long)]
    pub count: Option<u64>,

    /// Send a weight reading every N ticks (0 disables weight)
    #[arg(long, default_value = "10")]
    pub weight_every: u64,
}

/// Random-walk vitals kept inside plausible resting ranges.
pub struct SimulatedDevice {
    heart_rate: f64,
    spo2: f64,
    weight: f64,
    weight_every: u64,
    tick: u64,
}

impl SimulatedDevice {
    pub fn new(weight_every: u64) -> Self {
        Self {
            heart_rate: 72.0,
            spo2: 98.0,
            weight: 70.0,
            weight_every,
            tick: 0,
        }
    }

    /// Produce the next request body.
    pub fn next_reading(&mut self, rng: &mut impl Rng) -> Value {
        self.tick += 1;

        if self.weight_every > 0 && self.tick % self.weight_every == 0 {
            self.weight = (self.weight + rng.gen_range(-0.2..=0.2)).clamp(40.0, 150.0);
            return json!({ "weight": round1(self.weight) });
        }

        self.heart_rate = (self.heart_rate + rng.gen_range(-3.0..=3.0)).clamp(50.0, 110.0);
        self.spo2 = (self.spo2 + rng.gen_range(-0.5..=0.5)).clamp(92.0, 100.0);
        json!({
            "heartRate": self.heart_rate.round(),
            "SpO2": round1(self.spo2),
        })
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub async fn execute(args: SimulateArgs) -> Result<()> {
    if args.interval_ms == 0 {
        bail!("--interval-ms must be greater than zero");
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;
    let endpoint = format!("{}/readings", args.url.trim_end_matches('/'));
    let mut device = SimulatedDevice::new(args.weight_every);
    let mut rng = StdRng::from_entropy();
    let mut ticker = tokio::time::interval(Duration::from_millis(args.interval_ms));

    info!(endpoint = %endpoint, interval_ms = args.interval_ms, "Simulated device started");

    let mut sent = 0u64;
    while args.count.map_or(true, |limit| sent < limit) {
        ticker.tick().await;
        let body = device.next_reading(&mut rng);
        sent += 1;

        // Failed posts are not retried; the next tick carries fresh data.
        match client
            .post(&endpoint)
            .bearer_auth(&args.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                debug!(reading = %body, "Reading delivered");
            }
            Ok(response) => {
                warn!(status_code = %response.status(), reading = %body, "Server rejected reading");
            }
            Err(e) => {
                warn!(error = %e, url = %endpoint, "Failed to post reading (is vitalink serve running?)");
            }
        }
    }

    info!(sent, "Simulated device finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_every_nth_tick() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut device = SimulatedDevice::new(3);

        let readings: Vec<Value> = (0..6).map(|_| device.next_reading(&mut rng)).collect();
        for (i, reading) in readings.iter().enumerate() {
            if (i + 1) % 3 == 0 {
                assert!(reading.get("weight").is_some());
                assert!(reading.get("heartRate").is_none());
            } else {
                assert!(reading.get("heartRate").is_some());
                assert!(reading.get("SpO2").is_some());
                assert!(reading.get("weight").is_none());
            }
        }
    }

    #[test]
    fn test_weight_disabled() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut device = SimulatedDevice::new(0);
        for _ in 0..20 {
            assert!(device.next_reading(&mut rng).get("weight").is_none());
        }
    }

    #[test]
    fn test_vitals_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut device = SimulatedDevice::new(5);
        for _ in 0..1000 {
            let reading = device.next_reading(&mut rng);
            if let Some(hr) = reading["heartRate"].as_f64() {
                assert!((50.0..=110.0).contains(&hr));
                let spo2 = reading["SpO2"].as_f64().unwrap();
                assert!((92.0..=100.0).contains(&spo2));
            } else {
                let weight = reading["weight"].as_f64().unwrap();
                assert!((40.0..=150.0).contains(&weight));
            }
        }
    }
}
