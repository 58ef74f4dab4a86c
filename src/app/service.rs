//! Security service - the hexagonal core.
//!
//! [`SecurityService`] owns the status store, the image classifier, the
//! observer set and the transient cat-presence flag.  Every public
//! operation runs to completion (snapshot → decide → mutate → persist →
//! notify) before it returns.  Mutating operations take `&mut self`, so a
//! single owner can never interleave two of them; see
//! [`SharedSecurityService`](super::shared::SharedSecurityService) for
//! multi-threaded use.
//!
//! ```text
//!  ImageClassifier ──▶ ┌────────────────────────┐ ──▶ StatusObserver(s)
//!                      │     SecurityService    │
//!  SecurityStore  ◀──▶ │  arming · alarm rules  │
//!                      └────────────────────────┘
//! ```

use std::sync::Arc;

use log::{debug, info, warn};

use crate::config::{PanelConfig, UnknownSensorPolicy};
use crate::error::{Error, Result};
use crate::fsm::context::PanelSnapshot;
use crate::fsm::{self, AlarmStatus, ArmingStatus};
use crate::sensors::{Sensor, SensorId};

use super::commands::PanelCommand;
use super::events::PanelEvent;
use super::observers::{ObserverId, ObserverSet};
use super::ports::{CameraImage, ImageClassifier, SecurityStore, StatusObserver};

// ───────────────────────────────────────────────────────────────
// SecurityService
// ───────────────────────────────────────────────────────────────

/// The security service orchestrates all arming and alarm decisions.
pub struct SecurityService<S, C> {
    store: S,
    classifier: C,
    observers: ObserverSet,
    config: PanelConfig,
    /// Verdict of the last processed frame.  Never persisted.
    cat_present: bool,
}

impl<S: SecurityStore, C: ImageClassifier> SecurityService<S, C> {
    /// Construct the service around its collaborators.
    ///
    /// Fails if `config` does not validate.
    pub fn new(store: S, classifier: C, config: PanelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            classifier,
            observers: ObserverSet::new(),
            config,
            cat_present: false,
        })
    }

    // ── Arming ────────────────────────────────────────────────

    /// Apply an arming request.
    ///
    /// Exactly one of three things happens first: a visible cat while
    /// arming for home raises the alarm, disarming clears it, or any other
    /// arming request deactivates every sensor.  The new mode is then
    /// persisted and observers are told to refresh.
    pub fn set_arming_status(&mut self, requested: ArmingStatus) -> Result<()> {
        let snap = self.snapshot()?;
        let outcome = fsm::on_arming_request(&snap, requested);
        info!(
            "Arming request: {} -> {} ({:?})",
            snap.arming, requested, outcome
        );

        match outcome.alarm() {
            Some(alarm) => self.set_alarm_status(alarm)?,
            None => self.deactivate_all_sensors()?,
        }

        self.store.set_arming_status(requested)?;
        self.observers.broadcast(PanelEvent::SensorStateRefresh);
        Ok(())
    }

    pub fn arming_status(&self) -> Result<ArmingStatus> {
        Ok(self.store.arming_status()?)
    }

    // ── Alarm ─────────────────────────────────────────────────

    /// Persist `status` and notify every observer.
    ///
    /// This is the only path through which the alarm status changes.
    pub fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<()> {
        self.store.set_alarm_status(status)?;
        info!("Alarm status -> {}", status);
        self.observers.broadcast(PanelEvent::AlarmStatusChanged(status));
        Ok(())
    }

    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        Ok(self.store.alarm_status()?)
    }

    // ── Camera ────────────────────────────────────────────────

    /// Classify `image` and apply the cat-detection rule.
    ///
    /// A classifier failure propagates and leaves every status untouched.
    pub fn process_image(&mut self, image: &CameraImage) -> Result<()> {
        let threshold = self.config.cat_confidence_threshold;
        let is_cat = self.classifier.image_contains_cat(image, threshold)?;
        debug!(
            "Classifier verdict: cat={} ({}x{}, threshold {:.0}%)",
            is_cat, image.width, image.height, threshold
        );
        self.cat_detected(is_cat)
    }

    /// Whether the last processed frame showed a cat.
    pub fn cat_present(&self) -> bool {
        self.cat_present
    }

    fn cat_detected(&mut self, is_cat: bool) -> Result<()> {
        self.cat_present = is_cat;
        let snap = self.snapshot()?;
        if let Some(alarm) = fsm::on_cat_verdict(&snap, is_cat) {
            self.set_alarm_status(alarm)?;
        }
        self.observers.broadcast(PanelEvent::CatDetected(is_cat));
        Ok(())
    }

    // ── Sensors ───────────────────────────────────────────────

    /// Write a sensor's activation flag and update the alarm status.
    ///
    /// The escalation rule is judged against the flag the sensor held
    /// before the write.  Afterwards, a pending alarm clears itself if no
    /// sensor is left active, whichever branch fired.
    pub fn change_sensor_activation_status(&mut self, id: &SensorId, active: bool) -> Result<()> {
        let mut sensor = self.known_sensor(id)?;
        let was_active = sensor.is_active();

        let snap = self.snapshot()?;
        if let Some(alarm) = fsm::on_sensor_change(&snap, was_active, active) {
            self.set_alarm_status(alarm)?;
        }

        sensor.set_active(active);
        self.store.update_sensor(&sensor)?;
        debug!("Sensor {}: active {} -> {}", id, was_active, active);

        let snap = self.snapshot()?;
        if let Some(alarm) = fsm::settle_pending(&snap) {
            self.set_alarm_status(alarm)?;
        }
        Ok(())
    }

    pub fn sensors(&self) -> Result<Vec<Sensor>> {
        Ok(self.store.sensors()?)
    }

    pub fn add_sensor(&mut self, sensor: Sensor) -> Result<()> {
        debug!("Adding sensor {}", sensor.id());
        Ok(self.store.add_sensor(sensor)?)
    }

    pub fn remove_sensor(&mut self, id: &SensorId) -> Result<()> {
        debug!("Removing sensor {}", id);
        Ok(self.store.remove_sensor(id)?)
    }

    // ── Observers ─────────────────────────────────────────────

    pub fn add_observer(&mut self, observer: Arc<dyn StatusObserver>) -> ObserverId {
        self.observers.add(observer)
    }

    /// Returns `false` if `id` was not registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (panel button, sensor bus, camera, script).
    pub fn handle_command(&mut self, cmd: PanelCommand) -> Result<()> {
        match cmd {
            PanelCommand::Arm(status) => self.set_arming_status(status),
            PanelCommand::SetAlarm(status) => self.set_alarm_status(status),
            PanelCommand::AddSensor(sensor) => self.add_sensor(sensor),
            PanelCommand::RemoveSensor(id) => self.remove_sensor(&id),
            PanelCommand::SetSensor { id, active } => {
                self.change_sensor_activation_status(&id, active)
            }
            PanelCommand::ProcessImage(image) => self.process_image(&image),
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn classifier_mut(&mut self) -> &mut C {
        &mut self.classifier
    }

    // ── Internal ──────────────────────────────────────────────

    fn snapshot(&self) -> Result<PanelSnapshot> {
        Ok(PanelSnapshot {
            arming: self.store.arming_status()?,
            alarm: self.store.alarm_status()?,
            cat_present: self.cat_present,
            any_sensor_active: self.store.sensors()?.iter().any(Sensor::is_active),
        })
    }

    /// Resolve `id` against the store, applying the unknown-sensor policy.
    fn known_sensor(&mut self, id: &SensorId) -> Result<Sensor> {
        if let Some(sensor) = self.store.sensor(id)? {
            return Ok(sensor);
        }
        match self.config.unknown_sensor_policy {
            UnknownSensorPolicy::Reject => {
                warn!("Rejecting change for unknown sensor {}", id);
                Err(Error::InvalidSensor(id.clone()))
            }
            UnknownSensorPolicy::Register => {
                info!("Registering unknown sensor {}", id);
                let sensor = Sensor::new(id.name.clone(), id.kind);
                self.store.add_sensor(sensor.clone())?;
                Ok(sensor)
            }
        }
    }

    /// Bulk reset for a fresh arming cycle.  Runs no sensor rules.
    fn deactivate_all_sensors(&mut self) -> Result<()> {
        let mut reset = 0usize;
        for mut sensor in self.store.sensors()? {
            if sensor.is_active() {
                sensor.set_active(false);
                self.store.update_sensor(&sensor)?;
                reset += 1;
            }
        }
        if reset > 0 {
            info!("Deactivated {} sensor(s) for new arming cycle", reset);
        }
        Ok(())
    }
}

impl<S, C> core::fmt::Debug for SecurityService<S, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecurityService")
            .field("observers", &self.observers)
            .field("config", &self.config)
            .field("cat_present", &self.cat_present)
            .finish_non_exhaustive()
    }
}
