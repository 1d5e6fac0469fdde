//! Input dispatch.
//!
//! Mouse clicks go through two phases, the way a browser delivers them: the
//! handler of the clicked element runs first and may stop propagation;
//! otherwise the document-level listeners see the click too.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::app::App;
use crate::page::{ClickOutcome, FormField, RowAction};

/// Rows scrolled per wheel notch.
const WHEEL_ROWS: i32 = 3;

/// Something on screen that reacts to clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    MenuToggle,
    NavLink(usize),
    SidebarToggle,
    NotificationButton,
    NotificationPanel,
    SlidePrev,
    SlideNext,
    SearchBox,
    ExportButton,
    NewItemButton,
    RowAction { row: usize, action: RowAction },
    ModalBackdrop,
    ModalContent,
    ModalField(FormField),
    ModalClose,
    ModalCancel,
    ModalSubmit,
}

/// Clickable regions of the last drawn frame, bottom to top.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: Vec<(Rect, ClickTarget)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Register `target` over `area`. Later regions cover earlier ones.
    pub fn push(&mut self, area: Rect, target: ClickTarget) {
        if !area.is_empty() {
            self.regions.push((area, target));
        }
    }

    /// The topmost target under the given cell.
    pub fn target_at(&self, column: u16, row: u16) -> Option<ClickTarget> {
        let position = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(position))
            .map(|(_, target)| *target)
    }

    /// Area registered for `target`, if it is on screen.
    pub fn area_of(&self, target: ClickTarget) -> Option<Rect> {
        self.regions.iter().rev().find(|(_, t)| *t == target).map(|(area, _)| *area)
    }
}

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent, now: Instant) {
    // A blocking alert swallows the key that dismisses it
    if app.alert.is_some() {
        app.dismiss_alert();
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.modal_visible() {
        handle_modal_input(app, key);
        return;
    }

    if app.search_active {
        handle_search_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.toggle_help(),

        // Navigation menu
        KeyCode::Char('m') => dispatch_click(app, Some(ClickTarget::MenuToggle), now),
        KeyCode::Char(c @ '1'..='3') => {
            let index = c as usize - '1' as usize;
            dispatch_click(app, Some(ClickTarget::NavLink(index)), now);
        }

        // Page scrolling
        KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1),
        KeyCode::PageUp => app.scroll_page(false),
        KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_page(true),
        KeyCode::Home | KeyCode::Char('g') => app.scroll_home(),
        KeyCode::End | KeyCode::Char('G') => app.scroll_end(),

        // Hero slides
        KeyCode::Char('[') => dispatch_click(app, Some(ClickTarget::SlidePrev), now),
        KeyCode::Char(']') => dispatch_click(app, Some(ClickTarget::SlideNext), now),

        // Page widgets
        KeyCode::Char('b') => dispatch_click(app, Some(ClickTarget::SidebarToggle), now),
        KeyCode::Char('n') => dispatch_click(app, Some(ClickTarget::NotificationButton), now),
        KeyCode::Char('/') => dispatch_click(app, Some(ClickTarget::SearchBox), now),
        KeyCode::Char('c') => app.clear_search(),
        KeyCode::Char('e') => dispatch_click(app, Some(ClickTarget::ExportButton), now),
        KeyCode::Char('a') => dispatch_click(app, Some(ClickTarget::NewItemButton), now),

        // Close whatever is open, like a click on empty page space
        KeyCode::Esc => dispatch_click(app, None, now),

        _ => {}
    }
}

/// Handle key input while the search box has focus
fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Leave the box, keeping the term
        KeyCode::Enter | KeyCode::Esc => app.stop_search(),

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_search();
        }

        KeyCode::Backspace => app.search_pop(),
        KeyCode::Char(c) => app.search_push(c),

        _ => {}
    }
}

/// Handle key input while the creation modal is open
fn handle_modal_input(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        app.submit_modal();
        return;
    }
    let Some(modal) = app.products.modal.as_mut() else {
        return;
    };
    match key.code {
        // Esc acts as the X button
        KeyCode::Esc => {
            if !modal.close() {
                modal.click_outside();
            }
        }
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            modal.cancel();
        }
        KeyCode::Tab | KeyCode::Down => modal.form_mut().focus_next(),
        KeyCode::BackTab | KeyCode::Up => modal.form_mut().focus_prev(),
        KeyCode::Backspace => modal.form_mut().backspace(),
        KeyCode::Char(c) => {
            modal.form_mut().input(c);
        }
        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, now: Instant) {
    match mouse.kind {
        MouseEventKind::ScrollUp if !app.modal_visible() => app.scroll_by(-WHEEL_ROWS),
        MouseEventKind::ScrollDown if !app.modal_visible() => app.scroll_by(WHEEL_ROWS),

        MouseEventKind::Down(MouseButton::Left) => {
            if app.alert.is_some() {
                app.dismiss_alert();
                return;
            }
            if app.show_help {
                app.show_help = false;
                return;
            }
            let target = app.hit_map.target_at(mouse.column, mouse.row);
            dispatch_click(app, target, now);
        }

        _ => {}
    }
}

/// Deliver a click to `target` (`None` for empty page space), then to the
/// document listeners unless the element stopped propagation.
pub fn dispatch_click(app: &mut App, target: Option<ClickTarget>, now: Instant) {
    let outcome = match target {
        Some(target) => element_click(app, target, now),
        None => ClickOutcome::Propagate,
    };
    if outcome == ClickOutcome::Propagate {
        document_click(app, target);
    }
}

fn element_click(app: &mut App, target: ClickTarget, now: Instant) -> ClickOutcome {
    match target {
        ClickTarget::MenuToggle => app.navigation.toggle_menu(),
        ClickTarget::NavLink(index) => app.follow_link(index, now),
        ClickTarget::SidebarToggle => app.sidebar.toggle(),
        ClickTarget::NotificationButton => {
            if let Some(dropdown) = app.products.notifications.as_mut() {
                return dropdown.button_click();
            }
        }
        ClickTarget::NotificationPanel => {}
        ClickTarget::SlidePrev => app.prev_slide(now),
        ClickTarget::SlideNext => app.next_slide(now),
        ClickTarget::SearchBox => app.start_search(now),
        ClickTarget::ExportButton => app.export(),
        ClickTarget::NewItemButton => app.open_modal(),
        ClickTarget::RowAction { row, action } => {
            tracing::debug!(row, ?action, "row action clicked");
        }
        ClickTarget::ModalBackdrop | ClickTarget::ModalContent => {}
        ClickTarget::ModalField(field) => {
            if let Some(modal) = app.products.modal.as_mut() {
                modal.form_mut().focus(field);
            }
        }
        ClickTarget::ModalClose => {
            if let Some(modal) = app.products.modal.as_mut() {
                modal.close();
            }
        }
        ClickTarget::ModalCancel => {
            if let Some(modal) = app.products.modal.as_mut() {
                modal.cancel();
            }
        }
        ClickTarget::ModalSubmit => app.submit_modal(),
    }
    ClickOutcome::Propagate
}

/// Document-level listeners.
fn document_click(app: &mut App, target: Option<ClickTarget>) {
    if let Some(dropdown) = app.products.notifications.as_mut() {
        dropdown.document_click(
            target == Some(ClickTarget::NotificationButton),
            target == Some(ClickTarget::NotificationPanel),
        );
    }

    if target == Some(ClickTarget::ModalBackdrop) {
        if let Some(modal) = app.products.modal.as_mut() {
            modal.click_outside();
        }
    }

    // Clicking off the search box takes focus away from it
    if target != Some(ClickTarget::SearchBox) {
        app.search_active = false;
    }
}
