pub mod preference_queries;
pub mod report_queries;
