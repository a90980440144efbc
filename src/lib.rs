// model = "claude-opus-4-5"
// created = "2026-01-30"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Replica - a convergent replicated document engine.
//!
//! Sites edit a shared JSON-like document by producing small operations.
//! Each replica keeps every operation it has accepted in one sorted log and
//! rebuilds the same document from it, whatever order the operations
//! arrived in.
//!
//! # Quick Start
//!
//! ```
//! use replica::crdt::author::Author;
//! use replica::crdt::op::Payload;
//! use replica::crdt::state::State;
//! use replica::key::KeyPub;
//! use serde_json::json;
//!
//! // Create a site identity
//! let author = Author::new(KeyPub::generate());
//!
//! // Create a new document
//! let mut doc = State::new();
//!
//! // Edit the document
//! let op = author.set_root(&doc, Payload::List);
//! doc.submit(vec![op]).unwrap();
//! let op = author.push(&doc, &[], json!("hello").into()).unwrap();
//! doc.submit(vec![op]).unwrap();
//! assert_eq!(doc.render(), json!(["hello"]));
//! ```

pub mod crdt;
pub mod key;
