//! The scrollable page: hero, inventory and about sections.
//!
//! The whole page is drawn into an offscreen buffer as tall as the page
//! layout, then the rows under the scroll position are copied into the
//! viewport. Click regions are collected in page coordinates and moved to
//! screen coordinates the same way.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
    Frame,
};

use crate::app::{App, TOOLBAR_HEIGHT};
use crate::events::ClickTarget;
use crate::page::products::COLUMN_HEADERS;
use crate::page::slider::KenBurnsFrame;
use crate::page::{RowAction, TableBody, TableRow};

/// Width of the row actions column.
const ACTIONS_WIDTH: u16 = 7;

type Regions = Vec<(Rect, ClickTarget)>;

/// Render the visible part of the page into `viewport`.
pub fn render(frame: &mut Frame, app: &mut App, viewport: Rect) {
    let layout = app.page_layout();
    let scroll_top = app.navigation.scroll_top();
    let mut page = Buffer::empty(Rect::new(0, 0, viewport.width, layout.height()));
    let mut regions = Regions::new();
    let now = Instant::now();

    for section in layout.sections() {
        let area = Rect::new(0, section.top, viewport.width, section.height);
        match section.anchor {
            "#hero" => render_hero(app, area, &mut page, &mut regions, now),
            "#inventory" => render_inventory(app, area, &mut page, &mut regions),
            "#about" => render_about(app, area, &mut page),
            _ => {}
        }
    }

    blit(&page, frame.buffer_mut(), viewport, scroll_top);
    for (area, target) in regions {
        if let Some(visible) = to_screen(area, scroll_top, viewport) {
            app.hit_map.push(visible, target);
        }
    }
}

/// Copy page rows starting at `scroll_top` into `viewport`.
fn blit(page: &Buffer, screen: &mut Buffer, viewport: Rect, scroll_top: u16) {
    for row in 0..viewport.height {
        let src_y = scroll_top.saturating_add(row);
        if src_y >= page.area.height {
            break;
        }
        for col in 0..viewport.width.min(page.area.width) {
            if let (Some(src), Some(dst)) = (
                page.cell((col, src_y)),
                screen.cell_mut((viewport.x + col, viewport.y + row)),
            ) {
                *dst = src.clone();
            }
        }
    }
}

/// Map a page rectangle to the part of it visible on screen.
fn to_screen(area: Rect, scroll_top: u16, viewport: Rect) -> Option<Rect> {
    let top = area.y.max(scroll_top);
    let bottom = area.bottom().min(scroll_top.saturating_add(viewport.height));
    if top >= bottom || area.x >= viewport.width {
        return None;
    }
    let width = area.width.min(viewport.width - area.x);
    Some(Rect::new(viewport.x + area.x, viewport.y + (top - scroll_top), width, bottom - top))
}

/// Shrink and shift `area` for a Ken Burns frame.
fn ken_burns_area(area: Rect, frame: Option<KenBurnsFrame>) -> Rect {
    let Some(frame) = frame else {
        return area;
    };
    let inset_x = (frame.inset * 2).min(area.width / 4);
    let inset_y = frame.inset.min(area.height.saturating_sub(1) / 2);
    let width = area.width - inset_x * 2;
    let height = area.height - inset_y * 2;
    let x = (area.x + inset_x + frame.pan).min(area.right() - width);
    Rect::new(x, area.y + inset_y, width, height)
}

fn render_hero(app: &App, area: Rect, buf: &mut Buffer, regions: &mut Regions, now: Instant) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    block.render(area, buf);

    let Some(slide) = app.slideshow.current() else {
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("InStock", app.theme.header)),
            Line::from("Inventory control made simple"),
        ])
        .alignment(Alignment::Center)
        .render(inner, buf);
        return;
    };

    let [image, indicator] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    let file = slide.src.rsplit('/').next().unwrap_or(slide.src);
    let picture = ken_burns_area(image, app.slideshow.ken_burns(now));
    Paragraph::new(vec![
        Line::from(Span::styled(
            format!("▣ {}", file),
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(""),
        Line::from(Span::styled(
            slide.caption,
            Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(picture, buf);

    let dots: Vec<Span> = (0..app.slideshow.len())
        .map(|i| if i == app.slideshow.index() { "●" } else { "○" })
        .enumerate()
        .flat_map(|(i, dot)| {
            let sep = if i == 0 { "" } else { " " };
            [Span::raw(sep), Span::styled(dot, Style::default().fg(app.theme.highlight))]
        })
        .collect();
    let dots_width = (app.slideshow.len() * 2).saturating_sub(1) as u16;
    let [prev, dots_area, next] = Layout::horizontal([
        Constraint::Length(2),
        Constraint::Length(dots_width),
        Constraint::Length(2),
    ])
    .flex(Flex::Center)
    .areas(indicator);

    Paragraph::new("‹ ").render(prev, buf);
    Paragraph::new(Line::from(dots)).render(dots_area, buf);
    Paragraph::new(" ›").alignment(Alignment::Right).render(next, buf);
    regions.push((prev, ClickTarget::SlidePrev));
    regions.push((next, ClickTarget::SlideNext));
}

/// A bordered one-line button.
fn button(label: &str, style: Style, border: Style) -> Paragraph<'_> {
    Paragraph::new(label)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border))
}

fn render_inventory(app: &App, area: Rect, buf: &mut Buffer, regions: &mut Regions) {
    let [toolbar, table_area] =
        Layout::vertical([Constraint::Length(TOOLBAR_HEIGHT), Constraint::Min(1)]).areas(area);
    let [search, export, new_item] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(16),
        Constraint::Length(14),
    ])
    .areas(toolbar);

    let products = &app.products;
    let border = Style::default().fg(app.theme.border);

    // Search box
    let (title, text) = if !products.has_search() {
        (" Search (unavailable) ", String::new())
    } else if app.search_active {
        (" Search ", format!("{}_", products.search_term()))
    } else if products.search_term().is_empty() {
        (" Search ", "Search products...".to_string())
    } else {
        (" Search ", products.search_term().to_string())
    };
    let search_border = if app.search_active {
        Style::default().fg(app.theme.highlight)
    } else {
        border
    };
    let text_style = if products.search_term().is_empty() && !app.search_active {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };
    Paragraph::new(text)
        .style(text_style)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(search_border),
        )
        .render(search, buf);
    if products.has_search() {
        regions.push((search, ClickTarget::SearchBox));
    }

    // Export button, disabled while an export runs
    if products.has_export() {
        if products.export_busy() {
            button("Exporting...", app.theme.button_disabled, border).render(export, buf);
        } else {
            button("⇩ Export", app.theme.button, border).render(export, buf);
            regions.push((export, ClickTarget::ExportButton));
        }
    }

    if products.modal.as_ref().is_some_and(|m| m.controls().open) {
        button("+ New item", app.theme.button, border).render(new_item, buf);
        regions.push((new_item, ClickTarget::NewItemButton));
    }

    render_table(app, table_area, buf, regions);
}

fn table_row(row: &TableRow) -> Row<'_> {
    let actions: Vec<Span> = row
        .actions
        .iter()
        .enumerate()
        .flat_map(|(i, action)| {
            let sep = if i == 0 { "" } else { " " };
            [Span::raw(sep), Span::raw(action.symbol())]
        })
        .collect();
    Row::new(vec![
        Cell::from(row.code.as_str()),
        Cell::from(row.description.as_str()),
        Cell::from(row.category.as_str()),
        Cell::from(row.expiration.as_str()),
        Cell::from(Line::from(row.quantity.as_str()).alignment(Alignment::Center)),
        Cell::from(Line::from(row.price.as_str()).alignment(Alignment::Right)),
        Cell::from(Line::from(actions)),
    ])
}

fn render_table(app: &App, area: Rect, buf: &mut Buffer, regions: &mut Regions) {
    let products = &app.products;
    let title = format!(" Products ({}/{}) ", products.view().len(), products.catalog().len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(body) = products.body() else {
        Paragraph::new("Product table unavailable")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block)
            .render(area, buf);
        return;
    };

    let inner = block.inner(area);
    let header = Row::new(COLUMN_HEADERS.iter().map(|h| Cell::from(*h)))
        .height(1)
        .style(app.theme.header);
    let widths = [
        Constraint::Length(9),
        Constraint::Fill(1),
        Constraint::Length(13),
        Constraint::Length(13),
        Constraint::Length(5),
        Constraint::Length(11),
        Constraint::Length(ACTIONS_WIDTH),
    ];

    match body {
        TableBody::Rows(rows) => {
            Widget::render(
                Table::new(rows.iter().map(table_row), widths).header(header).block(block),
                area,
                buf,
            );
            // Actions are the last column, flush with the right border.
            let actions_x = inner.right().saturating_sub(ACTIONS_WIDTH);
            for (i, _) in rows.iter().enumerate() {
                let y = inner.y + 1 + i as u16;
                if y >= inner.bottom() {
                    break;
                }
                for (n, action) in RowAction::ALL.into_iter().enumerate() {
                    let x = actions_x + 2 * n as u16;
                    regions.push((Rect::new(x, y, 1, 1), ClickTarget::RowAction { row: i, action }));
                }
            }
        }
        TableBody::Placeholder { message, .. } => {
            Widget::render(
                Table::new(Vec::<Row>::new(), widths).header(header).block(block),
                area,
                buf,
            );
            let line = Rect::new(inner.x, inner.y + 1, inner.width, 1);
            if line.bottom() <= inner.bottom() {
                Paragraph::new(*message)
                    .style(Style::default().add_modifier(Modifier::DIM))
                    .alignment(Alignment::Center)
                    .render(line, buf);
            }
        }
    }
}

fn render_about(app: &App, area: Rect, buf: &mut Buffer) {
    let text = vec![
        Line::from(Span::styled("About InStock", app.theme.header)),
        Line::from(""),
        Line::from(
            "InStock keeps track of your products, their stock levels and expiration dates. \
             Search the table, export what you see to a spreadsheet, or register new items.",
        ),
    ];
    Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .render(area, buf);
}
