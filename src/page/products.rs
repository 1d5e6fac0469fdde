//! Product table: search, rendering, export, plus the creation modal and
//! the notification dropdown that live next to it.

use std::path::PathBuf;

use super::{CreateProductModal, ElementId, Feature, InitReport, NotificationDropdown, Page};
use crate::data::{filter_catalog, FilteredView, Product, ProductCatalog, StockAlert};
use crate::export::{ExportError, ExportStart, Exporter};

/// Text of the placeholder row shown when nothing matches.
pub const NO_ITEMS_MESSAGE: &str = "No items found.";

/// Column headers of the rendered table.
pub const COLUMN_HEADERS: [&str; 7] =
    ["Code", "Description", "Category", "Expiration", "Qty", "Price", "Actions"];

/// Per-row controls. They are drawn and clickable but do nothing yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    View,
    Edit,
    Delete,
}

impl RowAction {
    pub const ALL: [RowAction; 3] = [RowAction::View, RowAction::Edit, RowAction::Delete];

    pub fn symbol(&self) -> &'static str {
        match self {
            RowAction::View => "◉",
            RowAction::Edit => "✎",
            RowAction::Delete => "✖",
        }
    }
}

/// One rendered product row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub code: String,
    pub description: String,
    pub category: String,
    pub expiration: String,
    pub quantity: String,
    pub price: String,
    pub actions: [RowAction; 3],
}

impl TableRow {
    pub fn from_product(product: &Product) -> Self {
        Self {
            code: product.code.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            expiration: product.expiration.to_string(),
            quantity: product.quantity.to_string(),
            price: product.unit_price.to_string(),
            actions: RowAction::ALL,
        }
    }

    /// The six text cells, in column order.
    pub fn text_cells(&self) -> [&str; 6] {
        [
            &self.code,
            &self.description,
            &self.category,
            &self.expiration,
            &self.quantity,
            &self.price,
        ]
    }
}

/// Contents of the table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// A single full-width row explaining that nothing matched.
    Placeholder {
        message: &'static str,
        colspan: usize,
    },
    Rows(Vec<TableRow>),
}

impl TableBody {
    /// Rows the body occupies on screen.
    pub fn row_count(&self) -> usize {
        match self {
            TableBody::Placeholder { .. } => 1,
            TableBody::Rows(rows) => rows.len(),
        }
    }
}

/// Build the table body for `rows`, keeping their order.
pub fn render_rows<'a>(rows: impl IntoIterator<Item = &'a Product>) -> TableBody {
    let rows: Vec<TableRow> = rows.into_iter().map(TableRow::from_product).collect();
    if rows.is_empty() {
        TableBody::Placeholder {
            message: NO_ITEMS_MESSAGE,
            colspan: COLUMN_HEADERS.len(),
        }
    } else {
        TableBody::Rows(rows)
    }
}

/// Owns the catalog and the view currently rendered from it.
#[derive(Debug)]
pub struct ProductTableController {
    catalog: ProductCatalog,
    view: FilteredView,
    search_term: String,
    body: Option<TableBody>,
    renders: usize,
    search_wired: bool,
    exporter: Option<Exporter>,
    pub modal: Option<CreateProductModal>,
    pub notifications: Option<NotificationDropdown>,
}

impl ProductTableController {
    /// Attach every product-area feature, recording each result, and render
    /// the full catalog once.
    pub fn attach(
        page: &Page,
        catalog: ProductCatalog,
        exporter: Exporter,
        alerts: Vec<StockAlert>,
        report: &mut InitReport,
    ) -> Self {
        let table = page.require(&[ElementId::ProductsTableBody]);
        let search = page.require(&[ElementId::SearchInput]);
        let export = page.require(&[ElementId::ExportButton]);
        let (modal, modal_status) = CreateProductModal::attach(page);
        let (notifications, notifications_status) = NotificationDropdown::attach(page, alerts);

        let mut controller = Self {
            view: FilteredView::all(&catalog),
            catalog,
            search_term: String::new(),
            body: None,
            renders: 0,
            search_wired: search.is_wired(),
            exporter: export.is_wired().then_some(exporter),
            modal,
            notifications,
        };
        if table.is_wired() {
            controller.render_table();
        }

        report.record(Feature::ProductTable, table);
        report.record(Feature::Search, search);
        report.record(Feature::Export, export);
        report.record(Feature::CreateModal, modal_status);
        report.record(Feature::Notifications, notifications_status);
        controller
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    /// Products currently shown, in catalog order.
    pub fn current_view(&self) -> impl Iterator<Item = &Product> + '_ {
        self.view.products(&self.catalog)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// The rendered body, or `None` when the page has no table body.
    pub fn body(&self) -> Option<&TableBody> {
        self.body.as_ref()
    }

    /// How many times the body has been rebuilt.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn has_search(&self) -> bool {
        self.search_wired
    }

    pub fn has_export(&self) -> bool {
        self.exporter.is_some()
    }

    pub fn export_busy(&self) -> bool {
        self.exporter.as_ref().is_some_and(Exporter::is_busy)
    }

    fn render_table(&mut self) {
        self.body = Some(render_rows(self.view.products(&self.catalog)));
        self.renders += 1;
    }

    /// React to the search input changing to `term`.
    pub fn set_search(&mut self, term: &str) {
        if !self.search_wired {
            return;
        }
        self.search_term = term.to_string();
        self.view = filter_catalog(&self.catalog, term);
        if self.body.is_some() {
            self.render_table();
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut term = self.search_term.clone();
        term.push(c);
        self.set_search(&term);
    }

    pub fn pop_search_char(&mut self) {
        let mut term = self.search_term.clone();
        if term.pop().is_some() {
            self.set_search(&term);
        }
    }

    pub fn clear_search(&mut self) {
        if !self.search_term.is_empty() {
            self.set_search("");
        }
    }

    /// Export button. `None` when the page has no export button.
    pub fn export(&mut self) -> Option<ExportStart> {
        let rows: Vec<Product> = self.view.products(&self.catalog).cloned().collect();
        let exporter = self.exporter.as_mut()?;
        Some(exporter.start(rows))
    }

    /// Outcome of a finished background export.
    pub fn poll_export(&mut self) -> Option<Result<PathBuf, ExportError>> {
        self.exporter.as_mut()?.poll()
    }

    /// Wait for the running export, if any.
    pub async fn finish_export(&mut self) -> Option<Result<PathBuf, ExportError>> {
        self.exporter.as_mut()?.finish().await
    }

    /// Submit the creation form. The catalog is left untouched.
    pub fn submit_create(&mut self) -> Option<&'static str> {
        self.modal.as_mut()?.submit()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::runtime::Handle;

    use super::*;
    use crate::export::testing::{MemoryDownloader, RecordingSerializer};
    use crate::export::EXPORT_FILENAME;
    use crate::page::FormField;

    fn exporter(downloader: Arc<MemoryDownloader>) -> Exporter {
        Exporter::new(Arc::new(RecordingSerializer::default()), downloader, Handle::current())
    }

    fn controller_on(page: &Page) -> (ProductTableController, Arc<MemoryDownloader>, InitReport) {
        let downloader = Arc::new(MemoryDownloader::default());
        let mut report = InitReport::default();
        let controller = ProductTableController::attach(
            page,
            ProductCatalog::sample(),
            exporter(downloader.clone()),
            Vec::new(),
            &mut report,
        );
        (controller, downloader, report)
    }

    fn codes(controller: &ProductTableController) -> Vec<String> {
        controller.current_view().map(|p| p.code.clone()).collect()
    }

    #[tokio::test]
    async fn test_initial_render_is_full_catalog_once() {
        let (controller, _, report) = controller_on(&Page::full());
        assert_eq!(controller.render_count(), 1);
        let Some(TableBody::Rows(rows)) = controller.body() else {
            panic!("expected rows");
        };
        let rendered: Vec<&str> = rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(rendered, ["PROD001", "PROD002", "ELE005", "MOV003"]);
        assert_eq!(report.degraded().count(), 0);
    }

    #[test]
    fn test_render_rows_cells_match_products() {
        let catalog = ProductCatalog::sample();
        let TableBody::Rows(rows) = render_rows(catalog.iter()) else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0].text_cells(),
            ["PROD001", "Café Premium 500g", "Alimentos", "30/12/2025", "50", "R$ 25.90"]
        );
        assert_eq!(rows[3].price, "R$ 450.00");
        assert_eq!(rows[2].expiration, "Indeterminado");
        assert_eq!(rows[1].actions, RowAction::ALL);
    }

    #[test]
    fn test_render_rows_empty_is_placeholder() {
        let body = render_rows(std::iter::empty());
        assert_eq!(
            body,
            TableBody::Placeholder {
                message: NO_ITEMS_MESSAGE,
                colspan: 7
            }
        );
        assert_eq!(body.row_count(), 1);
    }

    #[tokio::test]
    async fn test_search_rerenders_each_keystroke() {
        let (mut controller, _, _) = controller_on(&Page::full());
        for c in "café".chars() {
            controller.push_search_char(c);
        }
        assert_eq!(controller.render_count(), 5);
        assert_eq!(codes(&controller), ["PROD001"]);

        controller.set_search("ALIMENTOS");
        assert_eq!(codes(&controller), ["PROD001", "PROD002"]);

        controller.set_search("zz");
        assert!(matches!(controller.body(), Some(TableBody::Placeholder { .. })));

        controller.clear_search();
        assert_eq!(codes(&controller).len(), 4);
        assert_eq!(controller.search_term(), "");
    }

    #[tokio::test]
    async fn test_pop_search_char_widens_view() {
        let (mut controller, _, _) = controller_on(&Page::full());
        controller.set_search("ele0");
        assert_eq!(codes(&controller), ["ELE005"]);
        controller.pop_search_char();
        controller.pop_search_char();
        assert_eq!(controller.search_term(), "el");
        assert_eq!(codes(&controller), ["ELE005"]);
        controller.pop_search_char();
        assert_eq!(codes(&controller).len(), 4);
    }

    #[tokio::test]
    async fn test_export_empty_view_never_saves() {
        let (mut controller, downloader, _) = controller_on(&Page::full());
        controller.set_search("zz");
        assert_eq!(controller.export(), Some(ExportStart::NothingToExport));
        assert!(controller.finish_export().await.is_none());
        assert!(downloader.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_uses_current_view() {
        let (mut controller, downloader, _) = controller_on(&Page::full());
        controller.set_search("alimentos");
        assert_eq!(controller.export(), Some(ExportStart::Started));
        assert!(controller.export_busy());

        let path = controller.finish_export().await.unwrap().unwrap();
        assert!(path.ends_with(EXPORT_FILENAME));
        let saved = downloader.saved.lock().unwrap();
        assert_eq!(saved[0].1, b"2 rows");
    }

    #[tokio::test]
    async fn test_create_modal_never_touches_catalog() {
        let (mut controller, _, _) = controller_on(&Page::full());
        controller.set_search("café");
        let catalog_before = controller.catalog().clone();
        let view_before = controller.view().clone();

        let modal = controller.modal.as_mut().unwrap();
        modal.open();
        modal.form_mut().focus(FormField::Code);
        modal.form_mut().input('X');
        assert_eq!(controller.submit_create(), Some(crate::page::modal::CREATED_MESSAGE));

        let modal = controller.modal.as_mut().unwrap();
        modal.open();
        modal.form_mut().input('Y');
        modal.cancel();
        assert!(modal.form().is_empty());

        assert_eq!(controller.catalog(), &catalog_before);
        assert_eq!(controller.view(), &view_before);
    }

    #[tokio::test]
    async fn test_degraded_page() {
        let page = Page::without(&[
            ElementId::ProductsTableBody,
            ElementId::SearchInput,
            ElementId::ExportButton,
        ]);
        let (mut controller, _, report) = controller_on(&page);
        assert!(controller.body().is_none());
        assert_eq!(controller.render_count(), 0);

        controller.set_search("café");
        assert_eq!(codes(&controller).len(), 4);
        assert_eq!(controller.export(), None);

        let degraded: Vec<Feature> = report.degraded().collect();
        assert_eq!(degraded, [Feature::ProductTable, Feature::Search, Feature::Export]);
    }
}
