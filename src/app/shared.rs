//! Thread-safe handle around a [`SecurityService`].
//!
//! Every operation runs under one `std::sync::Mutex` from start to finish,
//! so a "deactivate all sensors, then persist arming" sequence is never
//! interleaved with another caller.  Observers run inside the lock and
//! must not call back into the same handle.
//!
//! A poisoned lock is recovered: each operation persists through the store
//! before notifying, and observer panics are caught per observer, so the
//! store is consistent at every point a panic can escape.

use std::sync::{Arc, Mutex, MutexGuard};

use super::ports::{ImageClassifier, SecurityStore};
use super::service::SecurityService;

pub struct SharedSecurityService<S, C> {
    inner: Arc<Mutex<SecurityService<S, C>>>,
}

impl<S, C> Clone for SharedSecurityService<S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SecurityStore, C: ImageClassifier> SharedSecurityService<S, C> {
    pub fn new(service: SecurityService<S, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    /// Run `f` with exclusive access to the service.
    pub fn with<R>(&self, f: impl FnOnce(&mut SecurityService<S, C>) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, SecurityService<S, C>> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            log::warn!("SecurityService lock poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::classifier::ScriptedClassifier;
    use crate::adapters::memory_store::InMemoryStore;
    use crate::config::PanelConfig;
    use crate::fsm::{AlarmStatus, ArmingStatus};
    use crate::sensors::{Sensor, SensorId, SensorType};
    use std::thread;

    #[test]
    fn concurrent_sensor_trips_are_serialised() {
        let sensors = (0..8).map(|i| Sensor::new(format!("s{i}"), SensorType::Motion));
        let svc = SecurityService::new(
            InMemoryStore::with_sensors(sensors),
            ScriptedClassifier::new(),
            PanelConfig::default(),
        )
        .unwrap();
        let shared = SharedSecurityService::new(svc);
        shared
            .with(|s| s.set_arming_status(ArmingStatus::ArmedAway))
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let id = SensorId::new(format!("s{i}"), SensorType::Motion);
                    shared
                        .with(|s| s.change_sensor_activation_status(&id, true))
                        .unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        shared.with(|s| {
            assert_eq!(s.alarm_status().unwrap(), AlarmStatus::Alarm);
            assert!(s.sensors().unwrap().iter().all(Sensor::is_active));
        });
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let svc = SecurityService::new(
            InMemoryStore::new(),
            ScriptedClassifier::new(),
            PanelConfig::default(),
        )
        .unwrap();
        let shared = SharedSecurityService::new(svc);

        let clone = shared.clone();
        let result = thread::spawn(move || {
            let _: () = clone.with(|_| panic!("caller bug"));
        })
        .join();
        assert!(result.is_err());

        shared
            .with(|s| s.set_arming_status(ArmingStatus::ArmedHome))
            .unwrap();
        assert_eq!(
            shared.with(|s| s.arming_status()).unwrap(),
            ArmingStatus::ArmedHome
        );
    }
}
