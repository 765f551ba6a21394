pub mod memory_cache;
pub mod preference_files;

pub use memory_cache::*;
pub use preference_files::*;
