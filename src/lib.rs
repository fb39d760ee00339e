//! Trigguard library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All Raspberry-Pi-specific code is guarded by the `hardware`
//! feature within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod edge;
pub mod error;
pub mod fsm;
pub mod pins;
