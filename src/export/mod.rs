//! Spreadsheet export of the current product view.
//!
//! Exporting is split at two narrow seams so the table logic can be tested
//! without writing real workbooks:
//!
//! ```text
//! current view ──▶ ProductSheet ──▶ TableSerializer ──▶ bytes ──▶ FileDownloader ──▶ path
//!                  (this module)    (XlsxSerializer)             (DirectoryDownloader)
//! ```
//!
//! [`Exporter`] runs the serialize/save step on the tokio blocking pool and
//! hands the outcome back to the UI loop through a oneshot channel.

mod download;
mod xlsx;

pub use download::DirectoryDownloader;
pub use xlsx::XlsxSerializer;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::oneshot;

use crate::data::Product;

/// Name of the downloaded workbook. Does not depend on filters or time.
pub const EXPORT_FILENAME: &str = "Relatorio_Produtos_InStock.xlsx";

/// Errors produced while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// There were no rows to export.
    #[error("There is no data to export!")]
    NothingToExport,

    /// The spreadsheet library failed to build the workbook.
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The workbook could not be written to disk.
    #[error("Save failed: {0}")]
    Io(#[from] std::io::Error),

    /// The background task ended without reporting back.
    #[error("Export task aborted")]
    Aborted,
}

/// Builds workbook bytes from a sheet description.
pub trait TableSerializer: Send + Sync {
    fn serialize(&self, sheet: &ProductSheet) -> Result<Vec<u8>, ExportError>;
}

/// Delivers a finished file to the user.
pub trait FileDownloader: Send + Sync {
    /// Store `bytes` under `filename` and return where they ended up.
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError>;
}

/// Built-in table styles the sheet may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableTheme {
    /// Blue/grey banded style, Excel's `TableStyleMedium2`.
    Medium2,
}

/// How the cells of a column are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    /// Numbers, centered horizontally.
    Centered,
    /// Numbers shown with the currency format.
    Currency,
}

/// Number format applied to currency columns.
pub const CURRENCY_FORMAT: &str = "\"R$\" #,##0.00";

#[derive(Debug, Clone, PartialEq)]
pub struct SheetColumn {
    pub header: &'static str,
    pub width: f64,
    pub kind: ColumnKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

/// Everything a serializer needs to produce the products workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSheet {
    pub worksheet: &'static str,
    pub table_name: &'static str,
    pub theme: TableTheme,
    pub banded_rows: bool,
    pub header_row: bool,
    pub totals_row: bool,
    pub columns: Vec<SheetColumn>,
    pub rows: Vec<Vec<CellValue>>,
}

impl ProductSheet {
    /// Describe the workbook for `products`, keeping their order.
    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let column = |header, width, kind| SheetColumn {
            header,
            width,
            kind,
        };
        let rows = products
            .into_iter()
            .map(|p| {
                vec![
                    CellValue::Text(p.code.clone()),
                    CellValue::Text(p.description.clone()),
                    CellValue::Text(p.category.clone()),
                    CellValue::Text(p.expiration.to_string()),
                    CellValue::Number(f64::from(p.quantity)),
                    CellValue::Number(p.unit_price.as_f64()),
                ]
            })
            .collect();

        Self {
            worksheet: "Products",
            table_name: "ProductsTable",
            theme: TableTheme::Medium2,
            banded_rows: true,
            header_row: true,
            totals_row: false,
            columns: vec![
                column("Code", 15.0, ColumnKind::Text),
                column("Description", 35.0, ColumnKind::Text),
                column("Category", 20.0, ColumnKind::Text),
                column("Expiration", 15.0, ColumnKind::Text),
                column("Quantity", 12.0, ColumnKind::Centered),
                column("Price", 15.0, ColumnKind::Currency),
            ],
            rows,
        }
    }
}

/// Serialize and save a set of rows synchronously.
pub fn export_products(
    products: &[Product],
    serializer: &dyn TableSerializer,
    downloader: &dyn FileDownloader,
) -> Result<PathBuf, ExportError> {
    if products.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    let sheet = ProductSheet::from_products(products);
    let bytes = serializer.serialize(&sheet)?;
    downloader.save(EXPORT_FILENAME, &bytes)
}

/// Result of pressing the export button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStart {
    /// The export is running in the background.
    Started,
    /// The view was empty; nothing was started.
    NothingToExport,
    /// An earlier export is still running; the button is disabled.
    Busy,
}

type Outcome = Result<PathBuf, ExportError>;

/// Runs exports in the background, one at a time.
pub struct Exporter {
    serializer: Arc<dyn TableSerializer>,
    downloader: Arc<dyn FileDownloader>,
    runtime: Handle,
    in_flight: Option<oneshot::Receiver<Outcome>>,
}

impl std::fmt::Debug for Exporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exporter").field("busy", &self.is_busy()).finish()
    }
}

impl Exporter {
    pub fn new(
        serializer: Arc<dyn TableSerializer>,
        downloader: Arc<dyn FileDownloader>,
        runtime: Handle,
    ) -> Self {
        Self {
            serializer,
            downloader,
            runtime,
            in_flight: None,
        }
    }

    /// Whether an export is still running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start exporting `products` unless the list is empty or an export is
    /// already running.
    pub fn start(&mut self, products: Vec<Product>) -> ExportStart {
        if self.is_busy() {
            return ExportStart::Busy;
        }
        if products.is_empty() {
            return ExportStart::NothingToExport;
        }

        let (tx, rx) = oneshot::channel();
        let serializer = self.serializer.clone();
        let downloader = self.downloader.clone();
        tracing::info!(rows = products.len(), "export started");
        self.runtime.spawn_blocking(move || {
            let outcome = export_products(&products, serializer.as_ref(), downloader.as_ref());
            // The UI may have quit in the meantime.
            let _ = tx.send(outcome);
        });
        self.in_flight = Some(rx);
        ExportStart::Started
    }

    /// Collect the outcome of a finished export without blocking.
    pub fn poll(&mut self) -> Option<Outcome> {
        let rx = self.in_flight.as_mut()?;
        match rx.try_recv() {
            Ok(outcome) => {
                self.in_flight = None;
                Some(outcome)
            }
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.in_flight = None;
                Some(Err(ExportError::Aborted))
            }
        }
    }

    /// Wait for the running export, if any.
    pub async fn finish(&mut self) -> Option<Outcome> {
        let rx = self.in_flight.take()?;
        Some(rx.await.unwrap_or(Err(ExportError::Aborted)))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory stand-ins for the export seams.

    use std::path::PathBuf;
    use std::sync::{Arc, Barrier, Mutex};

    use super::*;

    /// Records every sheet it is asked to serialize.
    #[derive(Default)]
    pub struct RecordingSerializer {
        pub sheets: Mutex<Vec<ProductSheet>>,
        pub gate: Option<Arc<Barrier>>,
        pub fail: bool,
    }

    impl TableSerializer for RecordingSerializer {
        fn serialize(&self, sheet: &ProductSheet) -> Result<Vec<u8>, ExportError> {
            if let Some(gate) = &self.gate {
                gate.wait();
            }
            if self.fail {
                return Err(ExportError::Io(std::io::Error::other("disk full")));
            }
            self.sheets.lock().unwrap().push(sheet.clone());
            Ok(format!("{} rows", sheet.rows.len()).into_bytes())
        }
    }

    /// Keeps saved files in memory.
    #[derive(Default)]
    pub struct MemoryDownloader {
        pub saved: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl FileDownloader for MemoryDownloader {
        fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
            self.saved.lock().unwrap().push((filename.to_string(), bytes.to_vec()));
            Ok(PathBuf::from("/downloads").join(filename))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};

    use super::testing::{MemoryDownloader, RecordingSerializer};
    use super::*;
    use crate::data::{filter_catalog, ProductCatalog};

    #[test]
    fn test_sheet_columns_and_rows() {
        let catalog = ProductCatalog::sample();
        let sheet = ProductSheet::from_products(catalog.iter());

        let headers: Vec<&str> = sheet.columns.iter().map(|c| c.header).collect();
        assert_eq!(
            headers,
            ["Code", "Description", "Category", "Expiration", "Quantity", "Price"]
        );
        let widths: Vec<f64> = sheet.columns.iter().map(|c| c.width).collect();
        assert_eq!(widths, [15.0, 35.0, 20.0, 15.0, 12.0, 15.0]);
        assert_eq!(sheet.columns[4].kind, ColumnKind::Centered);
        assert_eq!(sheet.columns[5].kind, ColumnKind::Currency);
        assert!(sheet.header_row && sheet.banded_rows && !sheet.totals_row);

        assert_eq!(sheet.rows.len(), 4);
        assert_eq!(
            sheet.rows[2],
            vec![
                CellValue::Text("ELE005".into()),
                CellValue::Text("Mouse Gamer RGB".into()),
                CellValue::Text("Eletrônicos".into()),
                CellValue::Text("Indeterminado".into()),
                CellValue::Number(12.0),
                CellValue::Number(125.0),
            ]
        );
    }

    #[test]
    fn test_sheet_follows_filtered_order() {
        let catalog = ProductCatalog::sample();
        let view = filter_catalog(&catalog, "alimentos");
        let sheet = ProductSheet::from_products(view.products(&catalog));
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0][0], CellValue::Text("PROD001".into()));
        assert_eq!(sheet.rows[1][0], CellValue::Text("PROD002".into()));
    }

    #[test]
    fn test_export_products_empty_never_saves() {
        let serializer = RecordingSerializer::default();
        let downloader = MemoryDownloader::default();
        let result = export_products(&[], &serializer, &downloader);
        assert!(matches!(result, Err(ExportError::NothingToExport)));
        assert!(serializer.sheets.lock().unwrap().is_empty());
        assert!(downloader.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_exporter_saves_with_fixed_name() {
        let serializer = Arc::new(RecordingSerializer::default());
        let downloader = Arc::new(MemoryDownloader::default());
        let mut exporter =
            Exporter::new(serializer.clone(), downloader.clone(), Handle::current());

        let products = ProductCatalog::sample().products().to_vec();
        assert_eq!(exporter.start(products), ExportStart::Started);
        assert!(exporter.is_busy());

        let path = exporter.finish().await.unwrap().unwrap();
        assert_eq!(path, PathBuf::from("/downloads").join(EXPORT_FILENAME));
        assert!(!exporter.is_busy());

        let saved = downloader.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, EXPORT_FILENAME);
        assert_eq!(serializer.sheets.lock().unwrap()[0].rows.len(), 4);
    }

    #[tokio::test]
    async fn test_exporter_rejects_empty_view() {
        let downloader = Arc::new(MemoryDownloader::default());
        let mut exporter = Exporter::new(
            Arc::new(RecordingSerializer::default()),
            downloader.clone(),
            Handle::current(),
        );
        assert_eq!(exporter.start(Vec::new()), ExportStart::NothingToExport);
        assert!(!exporter.is_busy());
        assert!(exporter.poll().is_none());
        assert!(downloader.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_export_rejected_while_running() {
        let gate = Arc::new(Barrier::new(2));
        let serializer = Arc::new(RecordingSerializer {
            gate: Some(gate.clone()),
            ..Default::default()
        });
        let downloader = Arc::new(MemoryDownloader::default());
        let mut exporter = Exporter::new(serializer, downloader.clone(), Handle::current());

        let products = ProductCatalog::sample().products().to_vec();
        assert_eq!(exporter.start(products.clone()), ExportStart::Started);
        assert_eq!(exporter.start(products), ExportStart::Busy);
        assert!(exporter.poll().is_none());

        // Release the blocked serializer from another blocking thread.
        let release = tokio::task::spawn_blocking(move || {
            gate.wait();
        });
        assert!(exporter.finish().await.unwrap().is_ok());
        release.await.unwrap();

        assert_eq!(downloader.saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_serializer_failure_is_reported() {
        let serializer = Arc::new(RecordingSerializer {
            fail: true,
            ..Default::default()
        });
        let downloader = Arc::new(MemoryDownloader::default());
        let mut exporter = Exporter::new(serializer, downloader.clone(), Handle::current());

        exporter.start(ProductCatalog::sample().products().to_vec());
        let outcome = exporter.finish().await.unwrap();
        assert!(matches!(outcome, Err(ExportError::Io(_))));
        assert!(downloader.saved.lock().unwrap().is_empty());
    }
}
