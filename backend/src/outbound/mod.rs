//! Outbound adapters implementing domain ports.
//!
//! - **memory**: the process-local issue store.
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic.

pub mod memory;
