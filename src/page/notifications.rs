//! Notification bell and its dropdown.

use super::{ElementId, FeatureStatus, Page};
use crate::data::StockAlert;

/// What an element handler lets happen after it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Let document-level listeners see the click too.
    Propagate,
    /// The click ends at this element.
    StopPropagation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDropdown {
    open: bool,
    alerts: Vec<StockAlert>,
}

impl NotificationDropdown {
    /// Attach to the bell button and the dropdown panel; both are needed.
    pub fn attach(page: &Page, alerts: Vec<StockAlert>) -> (Option<Self>, FeatureStatus) {
        let status = page.require(&[ElementId::NotificationButton, ElementId::NotificationDropdown]);
        let dropdown = status.is_wired().then(|| Self {
            open: false,
            alerts,
        });
        (dropdown, status)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn alerts(&self) -> &[StockAlert] {
        &self.alerts
    }

    /// Number shown on the bell.
    pub fn badge(&self) -> usize {
        self.alerts.len()
    }

    /// Click on the bell: toggle, and keep the click from reaching the
    /// document listener, which would close the dropdown straight away.
    pub fn button_click(&mut self) -> ClickOutcome {
        self.open = !self.open;
        ClickOutcome::StopPropagation
    }

    /// Document-level click listener.
    pub fn document_click(&mut self, on_button: bool, on_panel: bool) {
        if !on_button && !on_panel {
            self.open = false;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}
