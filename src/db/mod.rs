//! Storage layer for the ChatEch server
//!
//! Users and their chat histories live behind the [`Store`] trait so the
//! services never depend on a concrete backend. [`MemoryStore`] is the only
//! implementation; its contents last as long as the process.

pub mod memory;
pub mod models;
pub mod store;

pub use memory::MemoryStore;
pub use models::{ChatEntry, PublicUser, User};
pub use store::Store;
