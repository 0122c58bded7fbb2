pub mod config;
pub mod dashboard;
pub mod serve;
pub mod simulate;
pub mod stats;
