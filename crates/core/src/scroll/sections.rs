use site_ux_protocol::{Bounds, ElementId, HostCommand, LinkEntry, Presentation};
use tracing::trace;

use crate::metrics::PageMetrics;

/// Half-open span `[top - offset, top - offset + height)` in which a section
/// counts as current.
pub fn highlight_span(bounds: Bounds, offset: f64) -> (f64, f64) {
    let start = bounds.top - offset;
    (start, start + bounds.height)
}

/// First section (in the given order) whose span contains `scroll_y`.
pub fn current_section<'a, I>(sections: I, scroll_y: f64, offset: f64) -> Option<&'a ElementId>
where
    I: IntoIterator<Item = (&'a ElementId, Bounds)>,
{
    sections.into_iter().find_map(|(id, bounds)| {
        let (start, end) = highlight_span(bounds, offset);
        (start <= scroll_y && scroll_y < end).then_some(id)
    })
}

/// Keeps exactly one (or no) in-page navigation link marked active,
/// matching the section under the scroll position.
///
/// Sections are held in document order; when spans overlap the earliest
/// registered section wins. Geometry is measured on every call.
#[derive(Debug, Clone)]
pub struct SectionHighlighter {
    sections: Vec<ElementId>,
    links: Vec<LinkEntry>,
    offset: f64,
    active_link: Option<ElementId>,
}

impl SectionHighlighter {
    pub fn new(sections: Vec<ElementId>, links: Vec<LinkEntry>, offset: f64) -> Self {
        Self {
            sections,
            links,
            offset,
            active_link: None,
        }
    }

    pub fn sections(&self) -> &[ElementId] {
        &self.sections
    }

    pub fn active_link(&self) -> Option<&ElementId> {
        self.active_link.as_ref()
    }

    /// Recompute the highlight from scratch. Every link gets an explicit
    /// add or remove, so no stale "active" can survive.
    pub fn highlight(&mut self, metrics: &dyn PageMetrics) -> Vec<HostCommand> {
        if self.links.is_empty() {
            return Vec::new();
        }
        let scroll_y = metrics.scroll_y();
        let measured: Vec<(&ElementId, Bounds)> = self
            .sections
            .iter()
            .filter_map(|id| metrics.element_bounds(id).map(|b| (id, b)))
            .collect();

        let section = current_section(measured, scroll_y, self.offset);
        let active = section.and_then(|section| {
            self.links
                .iter()
                .find(|link| section.is_target_of(&link.href))
                .map(|link| link.element.clone())
        });
        trace!(scroll_y, ?section, ?active, "section highlight");

        let commands = self
            .links
            .iter()
            .map(|link| {
                let on = active.as_ref() == Some(&link.element);
                HostCommand::toggle(&link.element, Presentation::Active, on)
            })
            .collect();
        self.active_link = active;
        commands
    }
}
