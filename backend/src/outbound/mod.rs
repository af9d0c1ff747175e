//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local fleet store backing both repository ports
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic.

pub mod memory;
