//! Fan-out of accepted readings to connected viewers.
//!
//! Uses a tokio broadcast channel. Each viewer connection subscribes once and
//! leaves by dropping its receiver. Nothing is buffered for viewers that join
//! later; a reading published with nobody subscribed is dropped.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::reading::model::SensorReading;

/// Per-viewer queue depth. A viewer further behind than this skips ahead.
pub const DEFAULT_CAPACITY: usize = 100;

/// Messages pushed to viewers.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum ViewerEvent {
    /// A freshly accepted sensor reading.
    #[serde(rename = "healthData")]
    HealthData(SensorReading),
}

/// Receiving half held by one viewer connection.
pub type ViewerReceiver = broadcast::Receiver<ViewerEvent>;

/// Registry of connected viewers. Cheap to clone; clones share the set.
#[derive(Clone)]
pub struct Broadcaster {
    tx: broadcast::Sender<ViewerEvent>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Join as a viewer. Only readings published after this call are seen.
    pub fn subscribe(&self) -> ViewerReceiver {
        self.tx.subscribe()
    }

    /// Send a reading to every current viewer and return how many were reached.
    pub fn publish(&self, reading: SensorReading) -> usize {
        // send() errs only when nobody is subscribed.
        let reached = self.tx.send(ViewerEvent::HealthData(reading)).unwrap_or(0);
        debug!(reached, "Published reading to viewers");
        reached
    }

    pub fn viewer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::{RecvError, TryRecvError};

    fn reading(hr: f64) -> SensorReading {
        SensorReading {
            heart_rate: Some(hr),
            spo2: Some(98.0),
            weight: None,
            timestamp: "2026-03-01T08:30:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_publish_without_viewers_is_dropped() {
        let broadcaster = Broadcaster::new();
        assert_eq!(broadcaster.publish(reading(70.0)), 0);

        let mut late = broadcaster.subscribe();
        assert!(matches!(late.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_every_viewer_receives_in_call_order() {
        let broadcaster = Broadcaster::new();
        let mut a = broadcaster.subscribe();
        let mut b = broadcaster.subscribe();

        assert_eq!(broadcaster.publish(reading(70.0)), 2);
        assert_eq!(broadcaster.publish(reading(71.0)), 2);

        for rx in [&mut a, &mut b] {
            assert_eq!(rx.recv().await.unwrap(), ViewerEvent::HealthData(reading(70.0)));
            assert_eq!(rx.recv().await.unwrap(), ViewerEvent::HealthData(reading(71.0)));
        }
    }

    #[test]
    fn test_late_viewer_misses_earlier_readings() {
        let broadcaster = Broadcaster::new();
        let _early = broadcaster.subscribe();
        broadcaster.publish(reading(70.0));

        let mut late = broadcaster.subscribe();
        broadcaster.publish(reading(90.0));

        assert_eq!(late.try_recv().unwrap(), ViewerEvent::HealthData(reading(90.0)));
        assert!(matches!(late.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_dropping_receiver_leaves() {
        let broadcaster = Broadcaster::new();
        let rx = broadcaster.subscribe();
        let clone = broadcaster.clone();
        assert_eq!(clone.viewer_count(), 1);

        drop(rx);
        assert_eq!(broadcaster.viewer_count(), 0);
    }

    #[tokio::test]
    async fn test_slow_viewer_skips_ahead() {
        let broadcaster = Broadcaster::with_capacity(2);
        let mut slow = broadcaster.subscribe();
        for hr in [60.0, 61.0, 62.0, 63.0] {
            broadcaster.publish(reading(hr));
        }

        assert!(matches!(slow.recv().await, Err(RecvError::Lagged(2))));
        assert_eq!(slow.recv().await.unwrap(), ViewerEvent::HealthData(reading(62.0)));
    }

    #[test]
    fn test_event_envelope() {
        let json = serde_json::to_value(ViewerEvent::HealthData(reading(72.0))).unwrap();
        assert_eq!(json["event"], "healthData");
        assert_eq!(json["data"]["heartRate"], 72.0);
        assert_eq!(json["data"]["SpO2"], 98.0);
        assert!(json["data"]["weight"].is_null());
    }
}
