//! In-memory status store adapter.
//!
//! Implements [`SecurityStore`] on plain collections.  It is the reference
//! backend for the simulator and the tests; a durable backend implements
//! the same trait.
//!
//! Sensors are kept in a `BTreeMap` keyed by [`SensorId`], so listing is
//! deterministic (ordered by name, then type).  The store can be switched
//! offline to exercise failure paths: while offline every call returns
//! [`StoreError::Unavailable`].

use std::collections::BTreeMap;

use log::info;

use crate::app::ports::{SecurityStore, StoreError};
use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::{Sensor, SensorId};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    sensors: BTreeMap<SensorId, Sensor>,
    alarm: AlarmStatus,
    arming: ArmingStatus,
    offline: bool,
}

impl InMemoryStore {
    /// Empty store: disarmed, no alarm, no sensors.
    pub fn new() -> Self {
        info!("InMemoryStore: simulation backend");
        Self::default()
    }

    /// Store pre-populated with `sensors`.
    pub fn with_sensors(sensors: impl IntoIterator<Item = Sensor>) -> Self {
        let mut store = Self::new();
        for sensor in sensors {
            store.sensors.insert(sensor.id().clone(), sensor);
        }
        store
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    fn online(&self) -> Result<(), StoreError> {
        if self.offline {
            Err(StoreError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl SecurityStore for InMemoryStore {
    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StoreError> {
        self.online()?;
        self.sensors.insert(sensor.id().clone(), sensor);
        Ok(())
    }

    fn remove_sensor(&mut self, id: &SensorId) -> Result<(), StoreError> {
        self.online()?;
        self.sensors.remove(id);
        Ok(())
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        self.online()?;
        match self.sensors.get_mut(sensor.id()) {
            Some(slot) => {
                slot.set_active(sensor.is_active());
                Ok(())
            }
            None => Err(StoreError::UnknownSensor(sensor.id().clone())),
        }
    }

    fn sensors(&self) -> Result<Vec<Sensor>, StoreError> {
        self.online()?;
        Ok(self.sensors.values().cloned().collect())
    }

    fn sensor(&self, id: &SensorId) -> Result<Option<Sensor>, StoreError> {
        self.online()?;
        Ok(self.sensors.get(id).cloned())
    }

    fn alarm_status(&self) -> Result<AlarmStatus, StoreError> {
        self.online()?;
        Ok(self.alarm)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StoreError> {
        self.online()?;
        self.alarm = status;
        Ok(())
    }

    fn arming_status(&self) -> Result<ArmingStatus, StoreError> {
        self.online()?;
        Ok(self.arming)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StoreError> {
        self.online()?;
        self.arming = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::SensorType;

    #[test]
    fn starts_disarmed_and_quiet() {
        let store = InMemoryStore::new();
        assert_eq!(store.arming_status().unwrap(), ArmingStatus::Disarmed);
        assert_eq!(store.alarm_status().unwrap(), AlarmStatus::NoAlarm);
        assert!(store.sensors().unwrap().is_empty());
    }

    #[test]
    fn writes_are_visible_to_next_read() {
        let mut store = InMemoryStore::new();
        store.set_arming_status(ArmingStatus::ArmedAway).unwrap();
        store.set_alarm_status(AlarmStatus::PendingAlarm).unwrap();
        assert_eq!(store.arming_status().unwrap(), ArmingStatus::ArmedAway);
        assert_eq!(store.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
    }

    #[test]
    fn sensors_are_keyed_by_identity() {
        let mut store = InMemoryStore::new();
        store.add_sensor(Sensor::new("hall", SensorType::Motion)).unwrap();
        store
            .add_sensor(Sensor::new("hall", SensorType::Motion).with_active(true))
            .unwrap();
        store.add_sensor(Sensor::new("attic", SensorType::Window)).unwrap();

        let names: Vec<String> = store
            .sensors()
            .unwrap()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, vec!["attic", "hall"]);

        let hall = SensorId::new("hall", SensorType::Motion);
        assert!(store.sensor(&hall).unwrap().unwrap().is_active());
    }

    #[test]
    fn update_of_unknown_sensor_fails() {
        let mut store = InMemoryStore::new();
        let ghost = Sensor::new("ghost", SensorType::Door);
        assert_eq!(
            store.update_sensor(&ghost),
            Err(StoreError::UnknownSensor(ghost.id().clone()))
        );
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = InMemoryStore::with_sensors([Sensor::new("porch", SensorType::Door)]);
        let id = SensorId::new("porch", SensorType::Door);
        store.remove_sensor(&id).unwrap();
        store.remove_sensor(&id).unwrap();
        assert!(store.sensors().unwrap().is_empty());
    }

    #[test]
    fn offline_store_refuses_everything() {
        let mut store = InMemoryStore::new();
        store.set_offline(true);
        assert_eq!(store.alarm_status(), Err(StoreError::Unavailable));
        assert_eq!(
            store.set_arming_status(ArmingStatus::ArmedHome),
            Err(StoreError::Unavailable)
        );
        store.set_offline(false);
        assert!(store.sensors().is_ok());
    }
}
