use std::collections::HashMap;

use site_ux_protocol::{ElementId, HostCommand, LinkEntry};
use tracing::debug;

use crate::metrics::PageMetrics;

/// Smooth scrolling for in-page links, leaving room for the fixed navbar.
#[derive(Debug, Clone)]
pub struct AnchorNavigator {
    anchors: HashMap<ElementId, String>,
    offset: f64,
}

impl AnchorNavigator {
    pub fn new(anchors: Vec<LinkEntry>, offset: f64) -> Self {
        Self {
            anchors: anchors
                .into_iter()
                .filter(|a| a.href.starts_with('#'))
                .map(|a| (a.element, a.href))
                .collect(),
            offset,
        }
    }

    /// Handle a click on `element`. Returns `None` if it is not an in-page
    /// anchor, so other handlers can claim it.
    pub fn on_click(
        &self,
        element: &ElementId,
        metrics: &dyn PageMetrics,
    ) -> Option<Vec<HostCommand>> {
        let href = self.anchors.get(element)?;
        let fragment = &href[1..];
        if fragment.is_empty() {
            return Some(vec![HostCommand::PreventDefault]);
        }

        let target = ElementId::from(fragment);
        let Some(bounds) = metrics.element_bounds(&target) else {
            debug!(%href, "anchor target not on page, keeping default navigation");
            return Some(Vec::new());
        };
        Some(vec![
            HostCommand::PreventDefault,
            HostCommand::ScrollTo {
                top: bounds.top - self.offset,
                smooth: true,
            },
            HostCommand::Focus {
                element: target,
                prevent_scroll: true,
            },
        ])
    }
}

/// "Skip to main content" link: moves keyboard focus to the main region.
#[derive(Debug, Clone)]
pub struct SkipLink {
    link: ElementId,
    main: Option<ElementId>,
}

impl SkipLink {
    pub fn new(link: ElementId, main: Option<ElementId>) -> Self {
        Self { link, main }
    }

    pub fn on_click(&self, element: &ElementId) -> Option<Vec<HostCommand>> {
        if *element != self.link {
            return None;
        }
        let mut commands = vec![HostCommand::PreventDefault];
        if let Some(main) = &self.main {
            commands.push(HostCommand::set_attribute(main, "tabindex", "-1"));
            commands.push(HostCommand::Focus {
                element: main.clone(),
                prevent_scroll: false,
            });
        }
        Some(commands)
    }
}
