use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use site_ux_protocol::{Bounds, ElementId};

/// Live page geometry, measured on demand.
///
/// Components never cache what this returns: section offsets are read again
/// every time a highlight is computed, so reflows between reads show up
/// immediately.
pub trait PageMetrics {
    /// Current vertical scroll offset of the page (px).
    fn scroll_y(&self) -> f64;

    /// Vertical geometry of an element, or `None` if it is not in the page.
    fn element_bounds(&self, element: &ElementId) -> Option<Bounds>;
}

/// A fixed geometry table. Used by the replay tool and in tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub scroll_y: f64,
    pub elements: BTreeMap<ElementId, Bounds>,
}

impl MetricsSnapshot {
    pub fn at(scroll_y: f64) -> Self {
        Self {
            scroll_y,
            elements: BTreeMap::new(),
        }
    }

    pub fn with_element(mut self, element: impl Into<ElementId>, top: f64, height: f64) -> Self {
        self.elements.insert(element.into(), Bounds::new(top, height));
        self
    }
}

impl PageMetrics for MetricsSnapshot {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn element_bounds(&self, element: &ElementId) -> Option<Bounds> {
        self.elements.get(element).copied()
    }
}
