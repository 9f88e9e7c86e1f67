use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::types::ObserverKind;

/// One element's change as reported by a visibility observer batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntersectionEntry {
    pub element: ElementId,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn entering(element: impl Into<ElementId>) -> Self {
        Self {
            element: element.into(),
            is_intersecting: true,
        }
    }

    pub fn leaving(element: impl Into<ElementId>) -> Self {
        Self {
            element: element.into(),
            is_intersecting: false,
        }
    }
}

/// An input notification from the host page.
///
/// Scroll and resize carry no payload: the core samples offsets and
/// geometry live through its metrics interface when it needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum HostEvent {
    Scroll,
    Resize,
    Intersections {
        observer: ObserverKind,
        entries: Vec<IntersectionEntry>,
    },
    Click {
        element: ElementId,
    },
    KeyDown {
        key: String,
        /// Element that had focus when the key was pressed, if the host
        /// tracks one.
        #[serde(default)]
        target: Option<ElementId>,
    },
    FocusIn {
        element: ElementId,
    },
    FocusOut {
        element: ElementId,
    },
    Input {
        element: ElementId,
        has_value: bool,
    },
    PointerEnter {
        element: ElementId,
    },
    PointerLeave {
        element: ElementId,
    },
}
