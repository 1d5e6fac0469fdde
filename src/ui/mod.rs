//! Terminal rendering.
//!
//! ```text
//! ┌ navbar ───────────────────────────────────┐  common::render_navbar
//! │ sidebar │ page viewport (scrolls)          │  overlays / page
//! │         │   #hero  #inventory  #about      │
//! └ status bar ───────────────────────────────┘  common::render_status_bar
//! ```
//!
//! Menus, the notification panel, the modal, alerts and help are drawn on
//! top, in that order. Every draw rebuilds the click hit map.

pub mod common;
pub mod overlays;
pub mod page;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

use crate::app::App;
use crate::page::navigation::NAV_BAR_HEIGHT;

/// Draw one frame.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.hit_map.clear();

    let [navbar, body, status] = Layout::vertical([
        Constraint::Length(NAV_BAR_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let (sidebar, viewport) = if app.sidebar.is_wired() {
        let width = if app.sidebar.is_open() {
            overlays::SIDEBAR_WIDTH
        } else {
            overlays::SIDEBAR_RAIL_WIDTH
        };
        let [sidebar, viewport] =
            Layout::horizontal([Constraint::Length(width), Constraint::Min(1)]).areas(body);
        (Some(sidebar), viewport)
    } else {
        (None, body)
    };

    app.viewport_height = viewport.height;
    app.navigation.clamp(app.max_scroll());

    page::render(frame, app, viewport);
    if let Some(sidebar) = sidebar {
        overlays::render_sidebar(frame, app, sidebar);
    }
    common::render_navbar(frame, app, navbar);
    common::render_status_bar(frame, app, status);

    if app.navigation.menu_expanded() {
        overlays::render_menu(frame, app, body);
    }
    if app.products.notifications.as_ref().is_some_and(|d| d.is_open()) {
        overlays::render_notifications(frame, app, body);
    }
    if app.modal_visible() {
        overlays::render_modal(frame, app, area);
    }
    if let Some(message) = app.alert.clone() {
        common::render_alert(frame, app, &message, area);
    }
    if app.show_help {
        common::render_help(frame, app, area);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::app::testing::app;
    use crate::events::{dispatch_click, ClickTarget};
    use crate::page::RowAction;

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buf = terminal.backend().buffer();
        let mut screen = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                screen.push_str(buf[(x, y)].symbol());
            }
            screen.push('\n');
        }
        screen
    }

    #[tokio::test]
    async fn test_full_page_renders() {
        let mut app = app();
        let screen = render(&mut app);
        assert!(screen.contains("InStock"));
        assert!(screen.contains("PROD001"));
        assert!(screen.contains("R$ 450.00"));
        assert!(screen.contains("Indeterminado"));
        assert!(screen.contains("About InStock"));
        assert!(screen.contains("4/4 products"));
        assert_eq!(app.viewport_height, 38);
    }

    #[tokio::test]
    async fn test_placeholder_row_renders() {
        let mut app = app();
        app.products.set_search("zz");
        let screen = render(&mut app);
        assert!(screen.contains("No items found."));
        assert!(!screen.contains("PROD001"));
        assert!(app.hit_map.area_of(ClickTarget::RowAction { row: 0, action: RowAction::View }).is_none());
    }

    #[tokio::test]
    async fn test_hit_map_drives_clicks() {
        let mut app = app();
        render(&mut app);

        for target in [
            ClickTarget::SidebarToggle,
            ClickTarget::NotificationButton,
            ClickTarget::MenuToggle,
            ClickTarget::SearchBox,
            ClickTarget::ExportButton,
            ClickTarget::NewItemButton,
            ClickTarget::SlideNext,
            ClickTarget::RowAction { row: 3, action: RowAction::Delete },
        ] {
            assert!(app.hit_map.area_of(target).is_some(), "{:?} not on screen", target);
        }

        let bell = app.hit_map.area_of(ClickTarget::NotificationButton).unwrap();
        let target = app.hit_map.target_at(bell.x, bell.y);
        dispatch_click(&mut app, target, Instant::now());
        let screen = render(&mut app);
        assert!(screen.contains("Notifications (2)"));
        assert!(screen.contains("Low stock: Cadeira"));
        assert!(app.hit_map.area_of(ClickTarget::NotificationPanel).is_some());
    }

    #[tokio::test]
    async fn test_modal_covers_page() {
        let mut app = app();
        app.open_modal();
        let screen = render(&mut app);
        assert!(screen.contains("New product"));
        assert!(screen.contains("Price (R$)"));

        // Anything outside the modal content is backdrop
        assert_eq!(app.hit_map.target_at(0, 0), Some(ClickTarget::ModalBackdrop));
        let save = app.hit_map.area_of(ClickTarget::ModalSubmit).unwrap();
        assert_eq!(app.hit_map.target_at(save.x, save.y), Some(ClickTarget::ModalSubmit));
    }

    #[tokio::test]
    async fn test_sidebar_and_alert_render() {
        let mut app = app();
        app.sidebar.toggle();
        app.show_alert("There is no data to export!");
        let screen = render(&mut app);
        assert!(screen.contains("Suppliers"));
        assert!(screen.contains("There is no data to export!"));
    }

    #[tokio::test]
    async fn test_closed_sidebar_shows_icons_only() {
        let mut app = app();
        let screen = render(&mut app);
        assert!(!screen.contains("Suppliers"));
        let page_left = app.hit_map.area_of(ClickTarget::SearchBox).unwrap().x;
        assert_eq!(page_left, overlays::SIDEBAR_RAIL_WIDTH);
    }
}
