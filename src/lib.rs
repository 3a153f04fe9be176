pub mod config;
pub mod feed;
pub mod pipeline;
pub mod rotator;
pub mod tracing;
