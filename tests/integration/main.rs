//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the control loop against
//! mock adapters.  All tests run on the host with no PiFace attached.

mod control_loop_tests;
mod mock_hw;
