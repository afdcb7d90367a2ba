//! Application service layer - use cases, config, caches

pub mod app;
pub mod cache;
pub mod config;
pub mod repository;
