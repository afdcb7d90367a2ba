//! Infrastructure layer - loaders and file-backed repositories

pub mod catalog_loader;
pub mod load_ticket_file;
pub mod one_call;
pub mod persistence;
pub mod weather_csv;
