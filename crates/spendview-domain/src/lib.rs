//! spendview-domain
//!
//! Pure domain models (expense records, categories, filter selections, derived views).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod expense;
pub mod filter;
pub mod view;

pub use category::*;
pub use common::*;
pub use expense::*;
pub use filter::*;
pub use view::*;
