//! Pagination Module - Page navigation
//!
//! Two independent designs:
//!
//! - **Pagination** - Pages as registry tickets, navigated by a Step
//! - **PageCounter** - Bounded integer cursor with an ellipsis-truncated page window

mod counter;
mod pages;

pub use counter::*;
pub use pages::*;
