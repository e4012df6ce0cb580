//! Core product and invoice types.
//!
//! Products carry a fixed tax/excise policy per category; an invoice
//! aggregates them by value and computes exact decimal totals.

mod arithmetic;
mod error;
mod invoice;
mod numbering;
mod product;

pub use error::*;
pub use invoice::*;
pub use numbering::*;
pub use product::*;
