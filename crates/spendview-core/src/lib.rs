//! spendview-core
//!
//! Derivation pipeline and services for spendview.
//! Depends on spendview-domain. No CLI, no terminal I/O, no file access.

pub mod controller;
pub mod day_range;
pub mod error;
pub mod expense_service;
pub mod filters;
pub mod pipeline;
pub mod sort;
pub mod store;
pub mod summary_service;
pub mod time;
pub mod time_window;

pub use controller::*;
pub use day_range::*;
pub use error::{CoreError, CoreResult};
pub use expense_service::*;
pub use filters::*;
pub use pipeline::*;
pub use sort::*;
pub use store::*;
pub use summary_service::*;
pub use time::*;
pub use time_window::*;
