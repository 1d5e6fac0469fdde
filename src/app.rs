//! Application state and page-level actions.

use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::data::{stock_alerts, ProductCatalog};
use crate::events::HitMap;
use crate::export::{ExportError, ExportStart, Exporter};
use crate::page::navigation::NAV_LINKS;
use crate::page::{
    Feature, HeroSlider, InitReport, NavigationController, PageLayout, ProductTableController,
    SidebarController, SlideShow, TableBody,
};
use crate::settings::Settings;
use crate::ui::Theme;

/// Rows of the hero section.
pub const HERO_HEIGHT: u16 = 9;
/// Rows of the search/export toolbar above the table.
pub const TOOLBAR_HEIGHT: u16 = 3;
/// Rows of the about section.
pub const ABOUT_HEIGHT: u16 = 8;

/// How long status messages stay in the status bar.
const STATUS_TTL: Duration = Duration::from_secs(3);

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    /// Blocking message; input is swallowed until it is dismissed.
    pub alert: Option<String>,
    /// Keystrokes go to the search box.
    pub search_active: bool,

    pub navigation: NavigationController,
    pub slideshow: SlideShow,
    pub sidebar: SidebarController,
    pub products: ProductTableController,
    pub report: InitReport,

    // UI
    pub theme: Theme,
    pub hit_map: HitMap,
    /// Rows of page visible below the navbar, as of the last draw.
    pub viewport_height: u16,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Build the page and attach every feature to it.
    pub fn new(
        settings: &Settings,
        catalog: ProductCatalog,
        exporter: Exporter,
        today: NaiveDate,
    ) -> Self {
        let page = settings.page.page();
        let mut report = InitReport::default();

        let (navigation, status) = NavigationController::attach(
            &page,
            settings.navigation.scroll_margin,
            settings.navigation.scroll_duration,
        );
        report.record(Feature::Navigation, status);

        let mut slideshow = SlideShow::new();
        let status = HeroSlider::attach(&page, &mut slideshow, settings.slider.transition);
        report.record(Feature::HeroSlider, status);

        let (sidebar, status) = SidebarController::attach(&page);
        report.record(Feature::Sidebar, status);

        let alerts = stock_alerts(&catalog, today, &settings.alerts);
        let products = ProductTableController::attach(&page, catalog, exporter, alerts, &mut report);

        report.log();

        Self {
            running: true,
            show_help: false,
            alert: None,
            search_active: false,
            navigation,
            slideshow,
            sidebar,
            products,
            report,
            theme: Theme::from_choice(settings.theme),
            hit_map: HitMap::default(),
            viewport_height: 0,
            status_message: None,
        }
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_TTL => Some(msg),
            _ => None,
        }
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Current arrangement of the page sections.
    ///
    /// The inventory section grows with the number of rendered rows.
    pub fn page_layout(&self) -> PageLayout {
        let body_rows = self.products.body().map_or(1, TableBody::row_count);
        // Borders plus header row.
        let table_height = u16::try_from(body_rows).unwrap_or(u16::MAX).saturating_add(3);
        PageLayout::stack(&[
            ("#hero", HERO_HEIGHT),
            ("#inventory", TOOLBAR_HEIGHT.saturating_add(table_height)),
            ("#about", ABOUT_HEIGHT),
        ])
    }

    /// Largest scroll offset that still fills the viewport.
    pub fn max_scroll(&self) -> u16 {
        self.page_layout().height().saturating_sub(self.viewport_height)
    }

    /// Advance animations and collect background results.
    pub fn tick(&mut self, now: Instant) {
        self.navigation.tick(now);
        self.navigation.clamp(self.max_scroll());
        self.slideshow.tick(now);

        match self.products.poll_export() {
            Some(Ok(path)) => {
                tracing::info!(path = %path.display(), "export finished");
                self.set_status_message(format!("Saved {}", path.display()));
            }
            Some(Err(e)) => {
                tracing::error!(error = %e, "export failed");
                self.show_alert(format!("Export failed: {}", e));
            }
            None => {}
        }
    }

    // Navigation

    pub fn scroll_by(&mut self, delta: i32) {
        let max = self.max_scroll();
        self.navigation.scroll_by(delta, max);
    }

    pub fn scroll_page(&mut self, down: bool) {
        let rows = i32::from(self.viewport_height.max(2) - 1);
        self.scroll_by(if down { rows } else { -rows });
    }

    pub fn scroll_home(&mut self) {
        let max = self.max_scroll();
        self.navigation.scroll_to(0, max);
    }

    pub fn scroll_end(&mut self) {
        let max = self.max_scroll();
        self.navigation.scroll_to(max, max);
    }

    /// Follow the `index`-th menu link.
    pub fn follow_link(&mut self, index: usize, now: Instant) {
        let Some(link) = NAV_LINKS.get(index) else {
            return;
        };
        let layout = self.page_layout();
        self.navigation.follow_link(&layout, link.anchor, now);
    }

    // Hero

    pub fn next_slide(&mut self, now: Instant) {
        self.slideshow.next(now);
    }

    pub fn prev_slide(&mut self, now: Instant) {
        self.slideshow.prev(now);
    }

    // Search

    /// Focus the search box, bringing the product section into view.
    pub fn start_search(&mut self, now: Instant) {
        if !self.products.has_search() {
            self.set_status_message("Search is not available");
            return;
        }
        self.search_active = true;
        let layout = self.page_layout();
        self.navigation.smooth_scroll_to(&layout, "#inventory", now);
    }

    pub fn stop_search(&mut self) {
        self.search_active = false;
    }

    pub fn search_push(&mut self, c: char) {
        self.products.push_search_char(c);
    }

    pub fn search_pop(&mut self) {
        self.products.pop_search_char();
    }

    pub fn clear_search(&mut self) {
        self.products.clear_search();
        self.search_active = false;
    }

    // Export

    /// Export button.
    pub fn export(&mut self) {
        match self.products.export() {
            Some(ExportStart::Started) => self.set_status_message("Exporting..."),
            Some(ExportStart::NothingToExport) => {
                tracing::warn!("export requested with no rows");
                self.show_alert(ExportError::NothingToExport.to_string());
            }
            Some(ExportStart::Busy) => self.set_status_message("An export is already running"),
            None => self.set_status_message("Export is not available"),
        }
    }

    // Creation modal

    pub fn modal_visible(&self) -> bool {
        self.products.modal.as_ref().is_some_and(|m| m.is_visible())
    }

    /// New-item button.
    pub fn open_modal(&mut self) {
        let opened = self.products.modal.as_mut().is_some_and(|m| m.open());
        if !opened {
            self.set_status_message("New item is not available");
        }
    }

    pub fn submit_modal(&mut self) {
        if let Some(message) = self.products.submit_create() {
            self.show_alert(message);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use tokio::runtime::Handle;

    use super::*;
    use crate::export::testing::{MemoryDownloader, RecordingSerializer};

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 15).unwrap()
    }

    /// App over the sample catalog with in-memory export seams.
    ///
    /// Must run inside a tokio runtime.
    pub fn app_with(settings: Settings) -> (App, Arc<MemoryDownloader>) {
        app_over(settings, ProductCatalog::sample())
    }

    pub fn app_over(settings: Settings, catalog: ProductCatalog) -> (App, Arc<MemoryDownloader>) {
        let downloader = Arc::new(MemoryDownloader::default());
        let exporter = Exporter::new(
            Arc::new(RecordingSerializer::default()),
            downloader.clone(),
            Handle::current(),
        );
        let settings = Settings {
            theme: crate::settings::ThemeChoice::Dark,
            ..settings
        };
        let app = App::new(&settings, catalog, exporter, today());
        (app, downloader)
    }

    pub fn app() -> App {
        app_with(Settings::default()).0
    }
}
