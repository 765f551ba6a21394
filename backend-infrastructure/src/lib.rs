pub mod config;
pub mod providers;
pub mod repositories;
pub mod services;

pub use config::*;
pub use providers::*;
pub use repositories::*;
pub use services::*;
