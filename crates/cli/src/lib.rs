//! Library side of the `pacer` command line tool
//!
//! Exposes settings handling and schedule replay so they can be tested
//! without going through the binary.

pub mod schedule;
pub mod settings;
pub mod util;

pub use schedule::{replay_debounce, replay_throttle, Firing, Report, Schedule};
pub use settings::Settings;
