//! Port traits - the hexagonal boundary between decision logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SecurityService (domain)
//! ```
//!
//! Driven adapters (status store, image classifier, observers) implement
//! these traits.  The [`SecurityService`](super::service::SecurityService)
//! consumes the store and classifier via generics and holds observers as
//! trait objects, so the domain core never touches storage, cameras or
//! displays directly.
//!
//! All port calls are synchronous from the core's point of view.  A store
//! write must be visible to the next read.

use core::fmt;

use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::{Sensor, SensorId};

// ───────────────────────────────────────────────────────────────
// Store port (driven adapter: domain ↔ persisted panel state)
// ───────────────────────────────────────────────────────────────

/// Durable home of the arming status, alarm status and known sensors.
pub trait SecurityStore {
    /// Register a sensor.  Re-adding a known sensor replaces its flag.
    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StoreError>;

    /// Forget a sensor.  Returns `Ok(())` even if it was unknown.
    fn remove_sensor(&mut self, id: &SensorId) -> Result<(), StoreError>;

    /// Persist a mutated activation flag for a known sensor.
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError>;

    /// Every known sensor.
    fn sensors(&self) -> Result<Vec<Sensor>, StoreError>;

    /// Look up one sensor by identity.
    fn sensor(&self, id: &SensorId) -> Result<Option<Sensor>, StoreError> {
        Ok(self.sensors()?.into_iter().find(|s| s.id() == id))
    }

    fn alarm_status(&self) -> Result<AlarmStatus, StoreError>;

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StoreError>;

    fn arming_status(&self) -> Result<ArmingStatus, StoreError>;

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StoreError>;
}

// ───────────────────────────────────────────────────────────────
// Classifier port (driven adapter: camera frame → verdict)
// ───────────────────────────────────────────────────────────────

/// Opaque camera frame.  The core never looks inside; it only hands the
/// frame to the [`ImageClassifier`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl CameraImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// External oracle answering "is there a cat in this frame".
pub trait ImageClassifier {
    /// `confidence_threshold` is a percentage (0–100); the classifier
    /// answers `true` only when its confidence reaches it.
    fn image_contains_cat(
        &mut self,
        image: &CameraImage,
        confidence_threshold: f32,
    ) -> Result<bool, ClassifierError>;
}

// ───────────────────────────────────────────────────────────────
// Observer port (driven adapter: domain → displays / logs)
// ───────────────────────────────────────────────────────────────

/// Listener for panel notifications.
///
/// Notification is best-effort broadcast: observers get no way to push
/// back into the service, and a panicking observer is isolated from the
/// others.
pub trait StatusObserver: Send + Sync {
    /// The alarm status was written.
    fn alarm_status_changed(&self, status: AlarmStatus);

    /// Sensor flags or the arming mode changed; re-read them.
    fn sensor_state_refreshed(&self);

    /// A camera frame was classified.
    fn cat_detected(&self, is_cat: bool);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`SecurityStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The sensor being updated is not known to the store.
    UnknownSensor(SensorId),
    /// The backing medium is unavailable.
    Unavailable,
    /// Generic I/O error from the storage backend.
    IoError(String),
}

/// Errors from [`ImageClassifier`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// The frame could not be decoded or is empty.
    InvalidImage,
    /// The classifier had no verdict to give.
    NoVerdict,
    /// The classifier backend failed.
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSensor(id) => write!(f, "unknown sensor {id}"),
            Self::Unavailable => write!(f, "store unavailable"),
            Self::IoError(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidImage => write!(f, "invalid image"),
            Self::NoVerdict => write!(f, "no verdict available"),
            Self::Backend(msg) => write!(f, "classifier backend: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl std::error::Error for ClassifierError {}
