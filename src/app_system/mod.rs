//! System wiring, configuration, startup and shutdown.

pub mod config;
pub mod site_system;
pub mod tracing;

pub use config::*;
pub use site_system::*;
pub use self::tracing::*;
