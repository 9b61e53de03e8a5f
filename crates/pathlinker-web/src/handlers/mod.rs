//! HTTP handlers for all web routes.

pub mod network;
pub mod system;
