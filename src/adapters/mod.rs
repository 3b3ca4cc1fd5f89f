//! Infrastructure adapters implementing the port traits.

pub mod csv_data;
pub mod ini_config;
