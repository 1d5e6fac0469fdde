//! Product data and the processing done on it.
//!
//! ## Submodules
//!
//! - [`product`]: Core models ([`Product`], [`Price`], [`Expiration`]) and the
//!   fixed [`ProductCatalog`]
//! - [`filter`]: The search filter producing a [`FilteredView`]
//! - [`alerts`]: Stock alerts shown in the notification dropdown
//!
//! ## Data Flow
//!
//! ```text
//! ProductCatalog (seed data or JSON file, fixed at load)
//!        │
//!        ├──▶ filter_catalog(term) ──▶ FilteredView (indices, catalog order)
//!        │
//!        └──▶ stock_alerts(today) ──▶ Vec<StockAlert>
//! ```

pub mod alerts;
pub mod filter;
pub mod product;

pub use alerts::{stock_alerts, AlertThresholds, StockAlert};
pub use filter::{filter_catalog, FilteredView};
pub use product::{CatalogError, Expiration, Price, Product, ProductCatalog};
