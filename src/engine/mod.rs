//! Registry engine - tickets, ordering, lookup and events.
//!
//! The engine manages the core data structures:
//! - Registry: ID map in iteration order, value catalog, lazy reindex, batching
//! - Events: opt-in listener bus keyed by event name
//!
//! # Architecture
//!
//! Tickets are records addressed three ways:
//!
//! ```text
//! id    → ticket        (map)
//! index → id            (map position, the directory)
//! value → [id, id, ...] (catalog, duplicates allowed)
//! ```
//!
//! Selection layers sit on top and observe the registry through internal
//! change hooks, never by reaching into its storage.

mod events;
mod registry;

pub use events::*;
pub use registry::*;

pub(crate) use registry::{Change, Observer};
