//! Navigation bar: the collapsible menu and smooth scrolling to sections.

use std::f64::consts::PI;
use std::time::{Duration, Instant};

use super::{ElementId, FeatureStatus, Page};

/// Rows taken by the fixed navigation bar on top of the page.
pub const NAV_BAR_HEIGHT: u16 = 1;

/// A link in the navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub anchor: &'static str,
}

/// Menu links, in display order.
pub const NAV_LINKS: [NavLink; 3] = [
    NavLink {
        label: "Home",
        anchor: "#hero",
    },
    NavLink {
        label: "Products",
        anchor: "#inventory",
    },
    NavLink {
        label: "About",
        anchor: "#about",
    },
];

/// A named block of the page, in page rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub anchor: &'static str,
    pub top: u16,
    pub height: u16,
}

/// Vertical arrangement of the page sections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageLayout {
    sections: Vec<Section>,
}

impl PageLayout {
    /// Stack sections top to bottom from `(anchor, height)` pairs.
    pub fn stack(blocks: &[(&'static str, u16)]) -> Self {
        let mut top = 0u16;
        let sections = blocks
            .iter()
            .map(|&(anchor, height)| {
                let section = Section {
                    anchor,
                    top,
                    height,
                };
                top = top.saturating_add(height);
                section
            })
            .collect();
        Self { sections }
    }

    pub fn find(&self, anchor: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.anchor == anchor)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Total page height in rows.
    pub fn height(&self) -> u16 {
        self.sections.last().map(|s| s.top.saturating_add(s.height)).unwrap_or(0)
    }
}

/// jQuery's default "swing" easing.
fn swing(progress: f64) -> f64 {
    0.5 - (progress * PI).cos() / 2.0
}

/// An in-progress scroll from one offset to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollAnimation {
    from: u16,
    to: u16,
    started: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    pub fn new(from: u16, to: u16, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    pub fn target(&self) -> u16 {
        self.to
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    /// Scroll offset at `now`.
    pub fn position_at(&self, now: Instant) -> u16 {
        if self.is_finished(now) {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let distance = f64::from(self.to) - f64::from(self.from);
        (f64::from(self.from) + distance * swing(progress)).round() as u16
    }
}

/// Owns the navigation menu state and the page scroll position.
#[derive(Debug, Clone)]
pub struct NavigationController {
    has_menu: bool,
    menu_expanded: bool,
    scroll_top: u16,
    animation: Option<ScrollAnimation>,
    scroll_margin: u16,
    scroll_duration: Duration,
}

impl NavigationController {
    /// Attach to the page. Smooth scrolling works without the menu element.
    pub fn attach(page: &Page, scroll_margin: u16, scroll_duration: Duration) -> (Self, FeatureStatus) {
        let status = page.require(&[ElementId::NavMenu]);
        let controller = Self {
            has_menu: status.is_wired(),
            menu_expanded: false,
            scroll_top: 0,
            animation: None,
            scroll_margin,
            scroll_duration,
        };
        (controller, status)
    }

    pub fn has_menu(&self) -> bool {
        self.has_menu
    }

    pub fn menu_expanded(&self) -> bool {
        self.menu_expanded
    }

    pub fn toggle_menu(&mut self) {
        if self.has_menu {
            self.menu_expanded = !self.menu_expanded;
        }
    }

    /// Collapse the menu. Collapsing a collapsed menu does nothing.
    pub fn collapse_menu(&mut self) {
        self.menu_expanded = false;
    }

    pub fn scroll_top(&self) -> u16 {
        self.scroll_top
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Where the page must scroll so `section` sits below the nav bar.
    pub fn target_offset(&self, section: &Section) -> u16 {
        section.top.saturating_sub(NAV_BAR_HEIGHT + self.scroll_margin)
    }

    /// Start animating towards `anchor`.
    ///
    /// Returns `false`, leaving the scroll position alone, if the page has no
    /// such section.
    pub fn smooth_scroll_to(&mut self, layout: &PageLayout, anchor: &str, now: Instant) -> bool {
        let Some(section) = layout.find(anchor) else {
            tracing::warn!(anchor, "smooth scroll target not found");
            return false;
        };
        let to = self.target_offset(section);
        self.animation = Some(ScrollAnimation::new(self.scroll_top, to, now, self.scroll_duration));
        true
    }

    /// Handle a click on a menu link: collapse the menu, then scroll.
    pub fn follow_link(&mut self, layout: &PageLayout, anchor: &str, now: Instant) -> bool {
        self.collapse_menu();
        self.smooth_scroll_to(layout, anchor, now)
    }

    /// Advance the running animation.
    pub fn tick(&mut self, now: Instant) {
        if let Some(animation) = self.animation {
            self.scroll_top = animation.position_at(now);
            if animation.is_finished(now) {
                self.animation = None;
            }
        }
    }

    /// Scroll by `delta` rows immediately, stopping any animation.
    pub fn scroll_by(&mut self, delta: i32, max: u16) {
        let next = (i32::from(self.scroll_top) + delta).clamp(0, i32::from(max));
        self.scroll_to(next as u16, max);
    }

    /// Jump to `offset` immediately, stopping any animation.
    pub fn scroll_to(&mut self, offset: u16, max: u16) {
        self.animation = None;
        self.scroll_top = offset.min(max);
    }

    /// Keep the scroll position inside the page.
    pub fn clamp(&mut self, max: u16) {
        self.scroll_top = self.scroll_top.min(max);
    }
}
