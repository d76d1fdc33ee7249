mod app;
mod config;
mod setup;
mod transport;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use setup::SetupError;
pub use transport::TransportError;
pub use validation::ValidationError;
