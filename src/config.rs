//! System configuration parameters
//!
//! Every tunable of the nest box controller lives here as a fixed default.
//! Nothing is loaded at runtime; the binary only logs the effective values.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestboxConfig {
    // --- Timing ---
    /// Poll interval while the light barrier is clear (milliseconds)
    pub normal_interval_ms: u32,
    /// Poll interval while the light barrier is blocked (milliseconds)
    pub fast_interval_ms: u32,

    // --- Health ---
    /// Continuous blocked time after which the sensor is reported as faulty
    pub sensor_fault_after_ms: u32,

    // --- Photos ---
    /// Number of photos taken after the bird has fully passed
    pub photos_after_event: u8,
    /// Accumulated loop time between two photos (milliseconds)
    pub photo_interval_ms: u32,
    /// Take an extra photo the moment the barrier is blocked
    pub capture_on_block: bool,

    // --- Collaborators ---
    /// SQLite database holding the sensor and log tables
    pub database_path: String,
    /// Named pipe used to notify the front end
    pub pipe_path: String,
    /// Script invoked as `<photo_command> <tag>`
    pub photo_command: String,
}

impl Default for NestboxConfig {
    fn default() -> Self {
        Self {
            // Timing
            normal_interval_ms: 200,
            fast_interval_ms: 100,

            // Health
            sensor_fault_after_ms: 60_000,

            // Photos
            photos_after_event: 1,
            photo_interval_ms: 10_000,
            capture_on_block: false,

            // Collaborators
            database_path: "/var/lib/nestbox/nestbox.sqlite3".into(),
            pipe_path: "/tmp/birdbox.1".into(),
            photo_command: "/usr/local/lib/nestbox/photo_p.sh".into(),
        }
    }
}
