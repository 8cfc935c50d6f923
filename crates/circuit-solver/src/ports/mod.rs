//! Hexagonal architecture ports

pub mod inbound;

pub use inbound::*;
