pub mod config;
pub mod confetti;
pub mod focus;
pub mod task;
