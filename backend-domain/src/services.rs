// Domain services

pub mod aggregator;

pub use aggregator::*;
