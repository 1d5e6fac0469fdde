//! Sidebar open/close toggle.

use super::{ElementId, FeatureStatus, Page};

/// Sections listed in the sidebar, as (icon, label).
pub const SIDEBAR_ITEMS: [(&str, &str); 6] = [
    ("⌂", "Dashboard"),
    ("▦", "Products"),
    ("⛟", "Suppliers"),
    ("$", "Sales"),
    ("≡", "Reports"),
    ("☺", "Users"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarController {
    wired: bool,
    open: bool,
}

impl SidebarController {
    /// Attach to the toggle button and the sidebar panel.
    ///
    /// Logs an error when either is missing; the toggle then does nothing.
    pub fn attach(page: &Page) -> (Self, FeatureStatus) {
        let status = page.require(&[ElementId::SidebarToggle, ElementId::Sidebar]);
        if !status.is_wired() {
            tracing::error!(%status, "sidebar elements not found, toggle disabled");
        }
        let controller = Self {
            wired: status.is_wired(),
            open: false,
        };
        (controller, status)
    }

    pub fn is_wired(&self) -> bool {
        self.wired
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        if self.wired {
            self.open = !self.open;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_state() {
        let (mut sidebar, status) = SidebarController::attach(&Page::full());
        assert!(status.is_wired());
        assert!(!sidebar.is_open());
        sidebar.toggle();
        assert!(sidebar.is_open());
        sidebar.toggle();
        assert!(!sidebar.is_open());
    }

    #[test]
    fn test_missing_toggle_button_degrades() {
        let (mut sidebar, status) =
            SidebarController::attach(&Page::without(&[ElementId::SidebarToggle]));
        assert_eq!(status, FeatureStatus::Absent(vec![ElementId::SidebarToggle]));
        sidebar.toggle();
        assert!(!sidebar.is_open());
        assert!(!sidebar.is_wired());
    }
}
