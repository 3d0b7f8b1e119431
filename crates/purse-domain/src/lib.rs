//! purse-domain
//!
//! Pure domain models (Transaction, Budget, Category, periods).
//! No I/O, no storage, no logging. Only data types and core enums.

pub mod budget;
pub mod category;
pub mod common;
pub mod transaction;

pub use budget::*;
pub use category::*;
pub use common::*;
pub use transaction::*;
