//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements    | Connects to                         |
//! |--------------|---------------|-------------------------------------|
//! | `piface`     | GpioPort      | PiFace Digital (MCP23S17 over SPI)  |
//! | `sqlite_log` | EventLogPort  | SQLite database of the web front end|
//! | `fifo`       | NotifierPort  | Named pipe read by the front end    |
//! | `camera`     | CameraPort    | Photo shell script                  |

pub mod camera;
pub mod fifo;
#[cfg(feature = "piface")]
pub mod piface;
pub mod sqlite_log;
