pub mod cache_commands;
pub mod preference_commands;
