//! Page features and the element registry they attach to.
//!
//! Each feature looks up the elements it needs once, when the page loads,
//! and records whether it could wire itself up. A missing element only
//! disables the feature that needs it; the rest of the page keeps working.

pub mod modal;
pub mod navigation;
pub mod notifications;
pub mod products;
pub mod sidebar;
pub mod slider;

pub use modal::{CreateProductModal, FormField, ProductForm};
pub use navigation::{NavigationController, PageLayout, ScrollAnimation, Section};
pub use notifications::{ClickOutcome, NotificationDropdown};
pub use products::{ProductTableController, RowAction, TableBody, TableRow};
pub use sidebar::SidebarController;
pub use slider::{HeroSlider, Slide, SlideShow, SlideShowConfig, SlideShowConfigurer, Transition};

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

/// Named elements features bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementId {
    NavMenu,
    HeroSlides,
    SidebarToggle,
    Sidebar,
    SearchInput,
    ExportButton,
    ProductsTableBody,
    Modal,
    NewItemButton,
    ModalCloseButton,
    ModalCancelButton,
    CreateForm,
    NotificationButton,
    NotificationDropdown,
}

impl ElementId {
    pub const ALL: [ElementId; 14] = [
        ElementId::NavMenu,
        ElementId::HeroSlides,
        ElementId::SidebarToggle,
        ElementId::Sidebar,
        ElementId::SearchInput,
        ElementId::ExportButton,
        ElementId::ProductsTableBody,
        ElementId::Modal,
        ElementId::NewItemButton,
        ElementId::ModalCloseButton,
        ElementId::ModalCancelButton,
        ElementId::CreateForm,
        ElementId::NotificationButton,
        ElementId::NotificationDropdown,
    ];

    /// The kebab-case name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            ElementId::NavMenu => "nav-menu",
            ElementId::HeroSlides => "hero-slides",
            ElementId::SidebarToggle => "sidebar-toggle",
            ElementId::Sidebar => "sidebar",
            ElementId::SearchInput => "search-input",
            ElementId::ExportButton => "export-button",
            ElementId::ProductsTableBody => "products-table-body",
            ElementId::Modal => "modal",
            ElementId::NewItemButton => "new-item-button",
            ElementId::ModalCloseButton => "modal-close-button",
            ElementId::ModalCancelButton => "modal-cancel-button",
            ElementId::CreateForm => "create-form",
            ElementId::NotificationButton => "notification-button",
            ElementId::NotificationDropdown => "notification-dropdown",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of elements present on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    present: HashSet<ElementId>,
}

impl Page {
    /// A page with every element present.
    pub fn full() -> Self {
        Self {
            present: ElementId::ALL.into_iter().collect(),
        }
    }

    /// A full page minus the given elements.
    pub fn without(absent: &[ElementId]) -> Self {
        let mut page = Self::full();
        for id in absent {
            page.present.remove(id);
        }
        page
    }

    pub fn has(&self, id: ElementId) -> bool {
        self.present.contains(&id)
    }

    /// Check that every element in `ids` exists.
    pub fn require(&self, ids: &[ElementId]) -> FeatureStatus {
        let missing: Vec<ElementId> = ids.iter().copied().filter(|id| !self.has(*id)).collect();
        if missing.is_empty() {
            FeatureStatus::Wired
        } else {
            FeatureStatus::Absent(missing)
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::full()
    }
}

/// Outcome of attaching a feature to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureStatus {
    /// All required elements were found and listeners attached.
    Wired,
    /// The feature is disabled; these elements were missing.
    Absent(Vec<ElementId>),
}

impl FeatureStatus {
    pub fn is_wired(&self) -> bool {
        matches!(self, FeatureStatus::Wired)
    }
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureStatus::Wired => f.write_str("wired"),
            FeatureStatus::Absent(missing) => {
                let names: Vec<&str> = missing.iter().map(|id| id.name()).collect();
                write!(f, "absent (missing {})", names.join(", "))
            }
        }
    }
}

/// Page features, in attach order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Navigation,
    HeroSlider,
    Sidebar,
    ProductTable,
    Search,
    Export,
    CreateModal,
    Notifications,
}

impl Feature {
    pub fn label(&self) -> &'static str {
        match self {
            Feature::Navigation => "navigation",
            Feature::HeroSlider => "hero slider",
            Feature::Sidebar => "sidebar",
            Feature::ProductTable => "product table",
            Feature::Search => "search",
            Feature::Export => "export",
            Feature::CreateModal => "create modal",
            Feature::Notifications => "notifications",
        }
    }
}

/// Per-feature attach results collected at start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    entries: Vec<(Feature, FeatureStatus)>,
}

impl InitReport {
    pub fn record(&mut self, feature: Feature, status: FeatureStatus) {
        self.entries.push((feature, status));
    }

    pub fn status(&self, feature: Feature) -> Option<&FeatureStatus> {
        self.entries.iter().find(|(f, _)| *f == feature).map(|(_, s)| s)
    }

    pub fn entries(&self) -> &[(Feature, FeatureStatus)] {
        &self.entries
    }

    /// Features running without some of their elements.
    pub fn degraded(&self) -> impl Iterator<Item = Feature> + '_ {
        self.entries.iter().filter(|(_, s)| !s.is_wired()).map(|(f, _)| *f)
    }

    /// Log every entry once.
    pub fn log(&self) {
        for (feature, status) in &self.entries {
            match status {
                FeatureStatus::Wired => tracing::info!(feature = feature.label(), "feature wired"),
                FeatureStatus::Absent(_) => {
                    tracing::warn!(feature = feature.label(), %status, "feature disabled")
                }
            }
        }
    }
}
