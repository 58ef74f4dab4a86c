//! Sensor model.
//!
//! A sensor is a named boolean input (door contact, window contact,
//! motion detector).  The store owns the set of known sensors; the
//! service only flips their activation flag.  Identity is the
//! [`SensorId`] (name + type): two sensors with the same name and type are
//! the same sensor whatever their flag says.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

impl SensorType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Door => "door",
            Self::Window => "window",
            Self::Motion => "motion",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SensorType {
    type Err = UnknownSensorType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "door" => Ok(Self::Door),
            "window" => Ok(Self::Window),
            "motion" => Ok(Self::Motion),
            _ => Err(UnknownSensorType),
        }
    }
}

/// Returned when a sensor type name is not one of door / window / motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownSensorType;

impl fmt::Display for UnknownSensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sensor type (expected door, window or motion)")
    }
}

impl std::error::Error for UnknownSensorType {}

/// Identity of a sensor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SensorId {
    pub name: String,
    pub kind: SensorType,
}

impl SensorId {
    pub fn new(name: impl Into<String>, kind: SensorType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// A known sensor with its current activation flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    id: SensorId,
    active: bool,
}

impl Sensor {
    /// A new sensor always starts inactive.
    pub fn new(name: impl Into<String>, kind: SensorType) -> Self {
        Self {
            id: SensorId::new(name, kind),
            active: false,
        }
    }

    pub fn id(&self) -> &SensorId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.id.name
    }

    pub fn kind(&self) -> SensorType {
        self.id.kind
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Builder-style variant of [`set_active`](Self::set_active).
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

// Equality, ordering and hashing follow the identity only.

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Sensor {}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Sensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sensor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
