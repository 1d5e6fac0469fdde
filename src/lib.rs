//! # instock
//!
//! A terminal front end for the InStock inventory page.
//!
//! The page is one scrollable document with three sections (hero slideshow,
//! product inventory, about) under a fixed navigation bar, plus a sidebar,
//! a notification dropdown and a "new product" modal.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  events ──▶ app ──▶ page controllers ──▶ ui ──▶ Terminal     │
//! │              │            │                                   │
//! │              │            └──▶ data (catalog, filter, alerts) │
//! │              ▼                                                │
//! │           export ──▶ TableSerializer ──▶ FileDownloader       │
//! │           (tokio blocking pool)                               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`data`]**: products, the catalog, the search filter and stock alerts
//! - **[`page`]**: the element registry and one controller per page feature;
//!   a feature whose elements are missing is disabled without affecting the
//!   others
//! - **[`export`]**: the spreadsheet description of the current view and the
//!   xlsx/download seams behind it
//! - **[`app`]** / **[`events`]**: application state and input dispatch
//! - **[`ui`]**: ratatui rendering and themes
//! - **[`settings`]**: TOML + environment configuration
//!
//! ## Usage
//!
//! ```bash
//! # Interactive page
//! instock --config instock.toml
//!
//! # Export the products matching "alimentos" and exit
//! instock --search alimentos --export --download-dir ./reports
//! ```
//!
//! ### As a library
//!
//! ```
//! use instock::{filter_catalog, ProductCatalog};
//!
//! let catalog = ProductCatalog::sample();
//! let view = filter_catalog(&catalog, "CAFÉ");
//! let codes: Vec<&str> = view.products(&catalog).map(|p| p.code.as_str()).collect();
//! assert_eq!(codes, ["PROD001"]);
//! ```
//!
//! ```no_run
//! use std::sync::Arc;
//! use instock::export::{Exporter, DirectoryDownloader, XlsxSerializer};
//!
//! # tokio_test::block_on(async {
//! let mut exporter = Exporter::new(
//!     Arc::new(XlsxSerializer),
//!     Arc::new(DirectoryDownloader::new("reports")),
//!     tokio::runtime::Handle::current(),
//! );
//! exporter.start(instock::ProductCatalog::sample().products().to_vec());
//! let saved = exporter.finish().await;
//! # });
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod export;
pub mod page;
pub mod settings;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{
    filter_catalog, stock_alerts, AlertThresholds, CatalogError, Expiration, FilteredView, Price,
    Product, ProductCatalog, StockAlert,
};
pub use export::{ExportError, ExportStart, Exporter, ProductSheet, EXPORT_FILENAME};
pub use page::{ElementId, Feature, FeatureStatus, InitReport, Page};
pub use settings::Settings;
