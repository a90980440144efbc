// model = "claude-opus-4-5"
// created = "2026-01-30"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! A convergent JSON document built from a causal operation log.
//!
//! Leaf first:
//!
//! - `primitives`: operation identities and the high-water clock
//! - `op`: the four operation kinds and their payloads
//! - `list`: tombstone-aware indexing over list slots
//! - `store`: the arena of map and list containers
//! - `apply`: the operation interpreter
//! - `state`: the replay engine that owns the log
//! - `view`: path resolution and materialization
//! - `author`: building new operations for a site

pub mod apply;
pub mod author;
pub mod error;
pub mod list;
pub mod op;
pub mod primitives;
pub mod state;
pub mod store;
pub mod view;

pub use error::Error;

/// A CRDT is a data type with a merge operator that is commutative,
/// associative, and idempotent.
pub trait Crdt {
    /// Merge another instance into this one.
    fn merge(&mut self, other: &Self) -> Result<(), Error>;
}
