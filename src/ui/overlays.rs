//! Panels drawn over the page: sidebar, menu, notifications and the
//! creation modal.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::common::centered_rect;
use crate::app::App;
use crate::events::ClickTarget;
use crate::page::navigation::NAV_LINKS;
use crate::page::sidebar::SIDEBAR_ITEMS;
use crate::page::FormField;

/// Columns taken by the open sidebar.
pub const SIDEBAR_WIDTH: u16 = 20;
/// Columns taken by the closed, icons-only sidebar.
pub const SIDEBAR_RAIL_WIDTH: u16 = 4;

const MENU_WIDTH: u16 = 16;
const NOTIFICATIONS_WIDTH: u16 = 56;
const MODAL_WIDTH: u16 = 56;
const LABEL_WIDTH: usize = 12;

pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let open = app.sidebar.is_open();
    let lines: Vec<Line> = SIDEBAR_ITEMS
        .iter()
        .map(|(icon, label)| {
            if open {
                Line::from(format!(" {}  {}", icon, label))
            } else {
                Line::from(format!(" {}", icon))
            }
        })
        .collect();
    let mut block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(app.theme.border));
    if open {
        block = block.title(" Menu ");
    }
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Expanded navigation menu, hanging from the right end of the navbar.
pub fn render_menu(frame: &mut Frame, app: &mut App, area: Rect) {
    let height = NAV_LINKS.len() as u16 + 2;
    let x = area.right().saturating_sub(MENU_WIDTH);
    let menu = Rect::new(x, area.y, MENU_WIDTH.min(area.width), height.min(area.height));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));
    let inner = block.inner(menu);
    frame.render_widget(Clear, menu);
    frame.render_widget(block, menu);

    for (i, link) in NAV_LINKS.iter().enumerate() {
        let row = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
        if row.bottom() > inner.bottom() {
            break;
        }
        let text = format!("{} {}", i + 1, link.label);
        frame.render_widget(Paragraph::new(text), row);
        app.hit_map.push(row, ClickTarget::NavLink(i));
    }
}

/// Notification dropdown, hanging under the bell.
pub fn render_notifications(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(dropdown) = &app.products.notifications else {
        return;
    };

    let lines: Vec<Line> = if dropdown.alerts().is_empty() {
        vec![Line::from(Span::styled(
            "No notifications",
            Style::default().add_modifier(Modifier::DIM),
        ))]
    } else {
        dropdown
            .alerts()
            .iter()
            .map(|alert| Line::from(Span::styled(alert.message(), app.theme.alert_style(alert))))
            .collect()
    };

    let width = NOTIFICATIONS_WIDTH.min(area.width);
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2).min(area.height);
    let panel = Rect::new(area.right().saturating_sub(width + 3), area.y, width, height);

    let block = Block::default()
        .title(format!(" Notifications ({}) ", dropdown.badge()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Clear, panel);
    frame.render_widget(Paragraph::new(lines).block(block), panel);
    app.hit_map.push(panel, ClickTarget::NotificationPanel);
}

/// Creation modal over a dimmed backdrop.
pub fn render_modal(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(modal) = &app.products.modal else {
        return;
    };

    frame.buffer_mut().set_style(area, Style::default().add_modifier(Modifier::DIM));
    app.hit_map.push(area, ClickTarget::ModalBackdrop);

    let height = FormField::ALL.len() as u16 + 4;
    let rect = centered_rect(MODAL_WIDTH, height, area);
    let block = Block::default()
        .title(" New product ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));
    let inner = block.inner(rect);
    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);

    let mut regions = vec![(rect, ClickTarget::ModalContent)];

    let controls = modal.controls();
    if controls.close {
        let close = Rect::new(rect.right().saturating_sub(5), rect.y, 3, 1);
        frame.render_widget(Paragraph::new("[x]"), close);
        regions.push((close, ClickTarget::ModalClose));
    }

    let form = modal.form();
    for (i, field) in FormField::ALL.into_iter().enumerate() {
        let row = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
        if row.bottom() > inner.bottom() {
            break;
        }
        let focused = form.focused() == field;
        let value = if focused {
            format!("{}_", form.value(field))
        } else {
            form.value(field).to_string()
        };
        let value_style = if focused { app.theme.focused } else { Style::default() };
        let line = Line::from(vec![
            Span::styled(
                format!("{:<width$}", field.label(), width = LABEL_WIDTH),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(value, value_style),
        ]);
        frame.render_widget(Paragraph::new(line), row);
        regions.push((row, ClickTarget::ModalField(field)));
    }

    let buttons_row = Rect::new(inner.x, inner.bottom().saturating_sub(1), inner.width, 1);
    let [_, cancel, _, save] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Length(1),
        Constraint::Length(8),
    ])
    .areas(buttons_row);
    if controls.cancel {
        frame.render_widget(Paragraph::new(" Cancel ").style(app.theme.button_disabled), cancel);
        regions.push((cancel, ClickTarget::ModalCancel));
    }
    frame.render_widget(Paragraph::new("  Save  ").style(app.theme.button), save);
    regions.push((save, ClickTarget::ModalSubmit));

    for (area, target) in regions {
        app.hit_map.push(area, target);
    }
}
