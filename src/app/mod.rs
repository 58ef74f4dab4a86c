//! Application core - pure decision logic, zero I/O.
//!
//! This module contains the business rules for the security panel:
//! arming, alarm escalation and observer fan-out.  All interaction with
//! storage, cameras and displays happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real
//! collaborators.

pub mod commands;
pub mod events;
pub mod observers;
pub mod ports;
pub mod service;
pub mod shared;
