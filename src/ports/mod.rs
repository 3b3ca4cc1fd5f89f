//! Port traits that decouple the domain from infrastructure.

pub mod data_port;
