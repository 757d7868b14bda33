//! # spark-headless
//!
//! Headless selection and navigation primitives for Rust UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! Everything is layered on one ordered, indexed collection: the [`Registry`].
//! Each layer holds the layer below and re-exposes its API plus its own
//! additions:
//!
//! ```text
//! Registry → Selection → Single / Group
//!                        Single → Step → Pagination
//! ```
//!
//! Registries are cheap `Rc` handles. Sharing one between consumers means
//! cloning the handle, usually through a [`ContextKey`].
//!
//! A registry created with `reactive: true` owns a generation signal that is
//! bumped once per committed mutation, so effects that read
//! [`Registry::generation`] re-run when the collection or a selection on it
//! changes. Nothing else in the core depends on the reactive runtime.
//!
//! ## Modules
//!
//! - [`types`] - Tickets, ids, values, patches, policies
//! - [`engine`] - Registry and its event bus
//! - [`state`] - Selection, Single, Group, Step
//! - [`pagination`] - Registry-backed pages and the bounded page counter
//! - [`context`] - Namespaced provide/inject
//! - [`error`] - Context errors and usage warnings

pub mod context;
pub mod engine;
pub mod error;
pub mod pagination;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{ContextError, UsageWarning};

pub use engine::{
    EventKind, Listener, ListenerId, Registry, RegistryEvent, RegistryOptions,
};

pub use state::{
    // Selection
    Selection, SelectionOptions,
    // Single
    Single,
    // Group
    Group, TriState,
    // Step
    Step, StepOptions,
};

pub use pagination::{
    page_id, PageCounter, PageCounterOptions, PageItem, Pagination, PaginationOptions,
};

pub use context::{reset_context, ContextKey};
