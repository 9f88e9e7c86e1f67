//! Scroll-position driven presentation: navbar chrome, section highlight,
//! hero parallax and in-page anchor navigation.

pub mod anchor;
pub mod navbar;
pub mod parallax;
pub mod sections;

pub use anchor::{AnchorNavigator, SkipLink};
pub use navbar::NavbarChromeController;
pub use parallax::HeroParallax;
pub use sections::SectionHighlighter;

use site_ux_protocol::HostCommand;

use crate::debounce::Debouncer;
use crate::metrics::PageMetrics;

/// Samples the scroll offset and feeds its consumers.
///
/// Navbar chrome and parallax react on every notification. The section
/// highlight is coalesced: scroll and resize each have their own debouncer,
/// and whichever fires re-measures the page before highlighting.
#[derive(Debug, Clone)]
pub struct ScrollPositionTracker {
    navbar: NavbarChromeController,
    parallax: HeroParallax,
    highlighter: SectionHighlighter,
    on_scroll: Debouncer<()>,
    on_resize: Debouncer<()>,
    last_offset: Option<f64>,
}

impl ScrollPositionTracker {
    pub fn new(
        navbar: NavbarChromeController,
        parallax: HeroParallax,
        highlighter: SectionHighlighter,
        scroll_debounce_ms: f64,
        resize_debounce_ms: f64,
    ) -> Self {
        Self {
            navbar,
            parallax,
            highlighter,
            on_scroll: Debouncer::new(scroll_debounce_ms),
            on_resize: Debouncer::new(resize_debounce_ms),
            last_offset: None,
        }
    }

    pub fn navbar(&self) -> &NavbarChromeController {
        &self.navbar
    }

    pub fn highlighter(&self) -> &SectionHighlighter {
        &self.highlighter
    }

    pub fn last_offset(&self) -> Option<f64> {
        self.last_offset
    }

    /// Bring every consumer in line with the current offset immediately,
    /// without debouncing. Used once at start-up.
    pub fn sync(&mut self, metrics: &dyn PageMetrics) -> Vec<HostCommand> {
        let offset = metrics.scroll_y();
        self.last_offset = Some(offset);
        let mut commands = self.navbar.update(offset);
        commands.extend(self.highlighter.highlight(metrics));
        commands
    }

    pub fn on_scroll(&mut self, now_ms: f64, metrics: &dyn PageMetrics) -> Vec<HostCommand> {
        let offset = metrics.scroll_y();
        self.last_offset = Some(offset);
        self.on_scroll.call(now_ms, ());
        let mut commands = self.navbar.update(offset);
        commands.extend(self.parallax.update(offset));
        commands
    }

    pub fn on_resize(&mut self, now_ms: f64) {
        self.on_resize.call(now_ms, ());
    }

    /// Fire any debounced highlight whose quiet period has passed. Scroll
    /// and resize firing together still highlight only once.
    pub fn advance(&mut self, now_ms: f64, metrics: &dyn PageMetrics) -> Vec<HostCommand> {
        let scrolled = self.on_scroll.take_due(now_ms).is_some();
        let resized = self.on_resize.take_due(now_ms).is_some();
        if scrolled || resized {
            self.highlighter.highlight(metrics)
        } else {
            Vec::new()
        }
    }

    pub fn next_deadline(&self) -> Option<f64> {
        match (self.on_scroll.deadline(), self.on_resize.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use site_ux_protocol::{ElementId, LinkEntry, Presentation};

    use super::*;
    use crate::metrics::MetricsSnapshot;

    fn tracker() -> ScrollPositionTracker {
        ScrollPositionTracker::new(
            NavbarChromeController::new(Some("navbar".into()), 20.0),
            HeroParallax::new(None, 0.5),
            SectionHighlighter::new(
                vec!["a".into(), "b".into()],
                vec![
                    LinkEntry {
                        element: "nav-a".into(),
                        href: "#a".into(),
                    },
                    LinkEntry {
                        element: "nav-b".into(),
                        href: "#b".into(),
                    },
                ],
                100.0,
            ),
            100.0,
            250.0,
        )
    }

    fn page(scroll_y: f64) -> MetricsSnapshot {
        MetricsSnapshot::at(scroll_y)
            .with_element("a", 0.0, 500.0)
            .with_element("b", 500.0, 500.0)
    }

    #[test]
    fn navbar_is_immediate_highlight_is_debounced() {
        let mut t = tracker();
        let cmds = t.on_scroll(0.0, &page(650.0));
        assert_eq!(
            cmds,
            vec![HostCommand::add(&"navbar".into(), Presentation::Scrolled)]
        );
        assert!(t.highlighter().active_link().is_none());
        assert_eq!(t.next_deadline(), Some(100.0));

        assert!(t.advance(99.0, &page(650.0)).is_empty());
        let cmds = t.advance(100.0, &page(650.0));
        assert_eq!(cmds.len(), 2);
        assert_eq!(
            t.highlighter().active_link().map(ElementId::as_str),
            Some("nav-b")
        );
        assert_eq!(t.next_deadline(), None);
    }

    #[test]
    fn highlight_uses_offset_at_fire_time() {
        let mut t = tracker();
        t.on_scroll(0.0, &page(50.0));
        t.on_scroll(40.0, &page(300.0));
        t.advance(140.0, &page(650.0));
        assert_eq!(
            t.highlighter().active_link().map(ElementId::as_str),
            Some("nav-b")
        );
    }

    #[test]
    fn resize_rehighlights_after_its_own_quiet_period() {
        let mut t = tracker();
        t.on_resize(0.0);
        assert_eq!(t.next_deadline(), Some(250.0));
        assert!(t.advance(200.0, &page(350.0)).is_empty());
        assert_eq!(t.advance(250.0, &page(350.0)).len(), 2);
    }

    #[test]
    fn simultaneous_scroll_and_resize_highlight_once() {
        let mut t = tracker();
        t.on_resize(0.0);
        t.on_scroll(150.0, &page(350.0));
        assert_eq!(t.next_deadline(), Some(250.0));
        assert_eq!(t.advance(300.0, &page(350.0)).len(), 2);
        assert_eq!(t.next_deadline(), None);
    }

    #[test]
    fn sync_applies_everything_at_once() {
        let mut t = tracker();
        let cmds = t.sync(&page(350.0));
        assert_eq!(cmds.len(), 3);
        assert_eq!(t.last_offset(), Some(350.0));
        assert!(t.navbar().is_scrolled());
    }
}
