//! Inbound commands to the security service.
//!
//! These represent actions requested by the outside world (panel buttons,
//! sensor bus, camera pipeline, simulator script) that the
//! [`SecurityService`](super::service::SecurityService) interprets and acts
//! upon.  The text form parsed by [`FromStr`] is what the simulator reads,
//! one command per line:
//!
//! ```text
//! arm home | arm away | disarm
//! alarm none | alarm pending | alarm alarm
//! sensor add <name> <door|window|motion>
//! sensor remove <name> <type>
//! sensor set <name> <type> <on|off>
//! image
//! ```

use core::fmt;
use core::str::FromStr;

use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::{Sensor, SensorId, SensorType};

use super::ports::CameraImage;

/// Commands that external adapters can send into the security core.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelCommand {
    /// Change the arming mode.
    Arm(ArmingStatus),

    /// Write the alarm status directly (operator override).
    SetAlarm(AlarmStatus),

    /// Register a new sensor.
    AddSensor(Sensor),

    /// Forget a sensor.
    RemoveSensor(SensorId),

    /// A sensor reported a new activation flag.
    SetSensor { id: SensorId, active: bool },

    /// Classify a camera frame.
    ProcessImage(CameraImage),
}

/// Why a command line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    Empty,
    UnknownVerb(String),
    MissingArgument(&'static str),
    InvalidArgument { what: &'static str, got: String },
    TrailingInput(String),
}

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::UnknownVerb(v) => write!(f, "unknown command '{v}'"),
            Self::MissingArgument(what) => write!(f, "missing {what}"),
            Self::InvalidArgument { what, got } => write!(f, "invalid {what} '{got}'"),
            Self::TrailingInput(rest) => write!(f, "unexpected trailing input '{rest}'"),
        }
    }
}

impl std::error::Error for ParseCommandError {}

impl FromStr for PanelCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(ParseCommandError::Empty)?;

        let cmd = match verb.to_ascii_lowercase().as_str() {
            "arm" => match next(&mut words, "arming mode")?.to_ascii_lowercase().as_str() {
                "home" => Self::Arm(ArmingStatus::ArmedHome),
                "away" => Self::Arm(ArmingStatus::ArmedAway),
                other => return Err(invalid("arming mode", other)),
            },
            "disarm" => Self::Arm(ArmingStatus::Disarmed),
            "alarm" => Self::SetAlarm(parse_alarm(next(&mut words, "alarm status")?)?),
            "sensor" => match next(&mut words, "sensor action")?.to_ascii_lowercase().as_str() {
                "add" => {
                    let id = parse_sensor_id(&mut words)?;
                    Self::AddSensor(Sensor::new(id.name, id.kind))
                }
                "remove" => Self::RemoveSensor(parse_sensor_id(&mut words)?),
                "set" => {
                    let id = parse_sensor_id(&mut words)?;
                    let active = parse_flag(next(&mut words, "sensor state")?)?;
                    Self::SetSensor { id, active }
                }
                other => return Err(invalid("sensor action", other)),
            },
            "image" => Self::ProcessImage(CameraImage::default()),
            other => return Err(ParseCommandError::UnknownVerb(other.to_string())),
        };

        let rest: Vec<&str> = words.collect();
        if rest.is_empty() {
            Ok(cmd)
        } else {
            Err(ParseCommandError::TrailingInput(rest.join(" ")))
        }
    }
}

fn next<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    what: &'static str,
) -> Result<&'a str, ParseCommandError> {
    words.next().ok_or(ParseCommandError::MissingArgument(what))
}

fn invalid(what: &'static str, got: &str) -> ParseCommandError {
    ParseCommandError::InvalidArgument {
        what,
        got: got.to_string(),
    }
}

fn parse_alarm(word: &str) -> Result<AlarmStatus, ParseCommandError> {
    match word.to_ascii_lowercase().as_str() {
        "none" | "no_alarm" => Ok(AlarmStatus::NoAlarm),
        "pending" | "pending_alarm" => Ok(AlarmStatus::PendingAlarm),
        "alarm" => Ok(AlarmStatus::Alarm),
        other => Err(invalid("alarm status", other)),
    }
}

fn parse_sensor_id<'a>(
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<SensorId, ParseCommandError> {
    let name = next(words, "sensor name")?;
    let kind_word = next(words, "sensor type")?;
    let kind: SensorType = kind_word
        .parse()
        .map_err(|_| invalid("sensor type", kind_word))?;
    Ok(SensorId::new(name, kind))
}

fn parse_flag(word: &str) -> Result<bool, ParseCommandError> {
    match word.to_ascii_lowercase().as_str() {
        "on" | "active" | "true" => Ok(true),
        "off" | "inactive" | "false" => Ok(false),
        other => Err(invalid("sensor state", other)),
    }
}
