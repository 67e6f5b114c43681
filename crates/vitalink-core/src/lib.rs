//! Vitalink Core Library
//!
//! Domain models and business logic for the health-monitoring portal:
//! sensor reading acceptance, the viewer broadcaster, and the user registry.

pub mod broadcast;
pub mod error;
pub mod reading;
pub mod user;

pub use broadcast::{Broadcaster, ViewerEvent, ViewerReceiver};
pub use error::{VitalError, VitalResult};
