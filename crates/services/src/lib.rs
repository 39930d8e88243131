#![forbid(unsafe_code)]

pub mod api;
pub mod error;
pub mod learning;

pub use api::{ApiConfig, BackendPort, Call, HttpBackend, InMemoryBackend};
pub use error::{ApiError, ConfigError, FlowError};
pub use learning::LearningLoopService;
