//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the trigger conditioner:
//! per-channel edge detection, state machine orchestration, and the polling
//! loop. All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! GPIO or real time.

pub mod events;
pub mod ports;
pub mod service;
