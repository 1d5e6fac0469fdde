//! Common UI components: navbar, status bar, help and alert overlays.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::events::ClickTarget;

/// Center a `width` x `height` box in `area`, shrinking it to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Render the navigation bar.
///
/// Left: sidebar toggle and brand. Right: notification bell and menu toggle.
pub fn render_navbar(frame: &mut Frame, app: &mut App, area: Rect) {
    frame.render_widget(Block::default().style(app.theme.navbar), area);

    let [sidebar_toggle, brand, _, bell, menu_toggle] = Layout::horizontal([
        Constraint::Length(3),
        Constraint::Length(9),
        Constraint::Fill(1),
        Constraint::Length(7),
        Constraint::Length(3),
    ])
    .areas(area);

    if app.sidebar.is_wired() {
        let symbol = if app.sidebar.is_open() { " ◀ " } else { " ≡ " };
        frame.render_widget(Paragraph::new(symbol).style(app.theme.navbar), sidebar_toggle);
        app.hit_map.push(sidebar_toggle, ClickTarget::SidebarToggle);
    }

    let brand_style = app.theme.navbar.fg(app.theme.highlight).add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(" InStock ").style(brand_style), brand);

    if let Some(dropdown) = &app.products.notifications {
        let label = format!(" 🔔 {} ", dropdown.badge());
        let style = if dropdown.badge() > 0 {
            app.theme.navbar.fg(app.theme.critical).add_modifier(Modifier::BOLD)
        } else {
            app.theme.navbar
        };
        frame.render_widget(Paragraph::new(label).style(style), bell);
        app.hit_map.push(bell, ClickTarget::NotificationButton);
    }

    if app.navigation.has_menu() {
        let symbol = if app.navigation.menu_expanded() { " ✕ " } else { " ☰ " };
        frame.render_widget(Paragraph::new(symbol).style(app.theme.navbar), menu_toggle);
        app.hit_map.push(menu_toggle, ClickTarget::MenuToggle);
    }
}

/// Render the status bar at the bottom.
///
/// Shows temporary status messages, otherwise the row count and the
/// controls for the current input mode.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = if app.modal_visible() {
        "Tab:next field Enter:save Esc:close Ctrl+X:cancel"
    } else if app.search_active {
        "Type to search | Enter/Esc:done Ctrl+C:clear"
    } else {
        "/:search e:export a:new n:alerts b:sidebar m:menu ?:help q:quit"
    };

    let filter_info = if app.products.search_term().is_empty() {
        String::new()
    } else {
        format!(" /{}/", app.products.search_term())
    };

    let status = format!(
        " {}/{} products{} | {}",
        app.products.view().len(),
        app.products.catalog().len(),
        filter_info,
        controls,
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the page.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().add_modifier(Modifier::BOLD))])
    };
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Page"),
        Line::from("  ↑/↓ j/k     Scroll"),
        Line::from("  PgUp/PgDn   Scroll a screen"),
        Line::from("  Home/End    Top/bottom of page"),
        Line::from("  1 2 3       Home, Products, About"),
        Line::from("  m           Toggle menu"),
        Line::from("  [ ]         Previous/next slide"),
        Line::from("  b           Toggle sidebar"),
        Line::from("  n           Notifications"),
        Line::from(""),
        section(" Products"),
        Line::from("  /           Search"),
        Line::from("  c           Clear search"),
        Line::from("  e           Export to spreadsheet"),
        Line::from("  a           New item"),
        Line::from(""),
        section(" General"),
        Line::from("  Esc         Close menus"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let help_area = centered_rect(42, help_text.len() as u16 + 2, area);
    frame.render_widget(Clear, help_area);
    frame.render_widget(Paragraph::new(help_text).block(block), help_area);
}

/// Render a blocking alert box.
pub fn render_alert(frame: &mut Frame, app: &App, message: &str, area: Rect) {
    let width = message.chars().count().saturating_add(6).clamp(32, 60) as u16;
    let lines = vec![
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("Press any key", Style::default().add_modifier(Modifier::DIM))),
    ];
    let block = Block::default()
        .title(" InStock ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.warning));

    let alert_area = centered_rect(width, 6, area);
    frame.render_widget(Clear, alert_area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        alert_area,
    );
}
