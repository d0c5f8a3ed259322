//! Application core: the control loop and its port boundary.
//!
//! This module contains the orchestration of the nest box: edge handling,
//! health supervision and photo scheduling, driven once per tick.  All
//! interaction with the board, the database, the front end and the camera
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
