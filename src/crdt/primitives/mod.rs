// model = "claude-opus-4-5"
// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Shared primitives for the document engine.
//!
//! ## IDs
//! - `Id`: operation identifier (clock, site), totally ordered
//!
//! ## Clocks
//! - `LamportClock`: high-water mark of the operation log

pub mod clock;
pub mod id;

// Re-exports for convenience
pub use clock::LamportClock;
pub use id::Id;
