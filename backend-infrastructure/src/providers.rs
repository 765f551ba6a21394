pub mod codec;
pub mod events_http;
pub mod orders_http;

pub use events_http::*;
pub use orders_http::*;
