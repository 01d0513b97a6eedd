//! Inbound adapters (driving side).
//!
//! Adapters translate external requests into calls on the domain ports.

pub mod http;
