pub mod config;
pub mod error;
pub mod roi;
pub mod types;

pub use config::AppConfig;
pub use error::{TrackerError, TrackerResult};
