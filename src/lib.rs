//! AlarmPanel library.
//!
//! The decision core of a home security panel: it turns sensor trips,
//! arming requests and camera verdicts into one authoritative alarm
//! status and broadcasts every change to registered observers.  Storage,
//! image classification and presentation stay behind the port traits in
//! [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod fsm;
pub mod sensors;

mod error;

pub use app::commands::PanelCommand;
pub use app::ports::{CameraImage, ImageClassifier, SecurityStore, StatusObserver};
pub use app::service::SecurityService;
pub use app::shared::SharedSecurityService;
pub use config::PanelConfig;
pub use error::{Error, Result};
pub use fsm::{AlarmStatus, ArmingStatus};
pub use sensors::{Sensor, SensorId, SensorType};
