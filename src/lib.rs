//! Nest box light-barrier controller library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection.  The PiFace transport is only compiled with the `piface`
//! feature; everything else builds and tests on any host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod detector;
pub mod error;
pub mod health;
pub mod inputs;
pub mod photo;
pub mod pins;
pub mod timing;
