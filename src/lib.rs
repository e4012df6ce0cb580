//! # rachunek
//!
//! Retail invoicing: products with category-specific tax and excise,
//! aggregated by quantity into sequentially numbered invoices.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use rachunek::core::*;
//! use rust_decimal_macros::dec;
//!
//! let mut invoice = Invoice::new();
//! invoice.add_product_quantity(Product::tax_free("Kubek", dec!(5)).unwrap(), 2).unwrap();
//! invoice.add_product_quantity(Product::dairy("Kozi Serek", dec!(10)).unwrap(), 3).unwrap();
//! invoice.add_product_quantity(Product::other("Pinezka", dec!(0.01)).unwrap(), 1000).unwrap();
//!
//! assert_eq!(invoice.net_total(), dec!(50));
//! assert_eq!(invoice.gross_total(), dec!(54.70));
//! assert_eq!(invoice.gross_total(), invoice.net_total() + invoice.tax_total());
//! ```
//!
//! ## Product categories
//!
//! | Category | Tax | Excise |
//! |----------|-----|--------|
//! | `Other` | 23% | 0 |
//! | `Dairy` | 8% | 0 |
//! | `TaxFree` | 0% | 0 |
//! | `Alcohol` | 23% | 5.56 |
//! | `LiquidFuel` | 0% | 5.56 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Product, invoice and numbering types |
//!
//! The library emits `tracing` events at `debug` level and never installs a
//! subscriber itself.

#[cfg(feature = "core")]
pub mod core;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
