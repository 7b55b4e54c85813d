// Library exports for the race-plan CLI
// This allows testing of internal modules

pub mod commands;
pub mod config;
pub mod export;
pub mod storage;
