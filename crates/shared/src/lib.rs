pub mod config;
pub mod floor_plan;
pub mod gesture;
pub mod markers;
pub mod models;
pub mod viewport;
