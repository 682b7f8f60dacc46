pub mod bank;
pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod question;
pub mod router;
pub mod state;
pub mod tracing;
pub mod v1;

pub use bank::QuestionBank;
pub use config::ApiConfig;
pub use state::ApiState;
