//! Contains traits and implementations for objects that store the domain
//! [models](crate::models).
//!
//! Persistence itself is the collaborator's responsibility; these traits are
//! the narrow seam any backend must satisfy. [memory::MemoryStore] is the
//! in-process reference implementation used by tests.

mod recurring;
mod transaction;

pub mod memory;

pub use recurring::{AdvanceResult, RecurringStore};
pub use transaction::TransactionStore;
