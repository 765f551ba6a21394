// Provider, Repository and Sink Port Traits (Interfaces)
// Define what the domain needs from the outside world

pub mod providers;
pub mod repositories;
pub mod services;

pub use providers::*;
pub use repositories::*;
pub use services::*;
