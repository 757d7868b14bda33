//! State Module - Selection layers over a registry
//!
//! Each layer wraps the one below it and re-exposes its API:
//!
//! - **Selection** - Selected id set, single/multiple, mandatory policy, cascade cleanup
//! - **Single** - At most one selection, index/value/item views
//! - **Group** - Always-multiple, select-all helpers, tri-state
//! - **Step** - First/last/next/prev navigation over a Single

mod group;
mod selection;
mod single;
mod step;

pub use group::*;
pub use selection::*;
pub use single::*;
pub use step::*;
