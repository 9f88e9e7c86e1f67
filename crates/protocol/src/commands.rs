use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::presentation::Presentation;
use crate::types::{ObserverKind, ObserverOptions};

/// A single, stateless instruction for the host page.
///
/// The core answers every event with a `Vec<HostCommand>`. Hosts apply the
/// list in order; each command carries everything it needs. Commands that
/// address an element no longer in the page must be ignored by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum HostCommand {
    AddPresentation {
        element: ElementId,
        flag: Presentation,
    },

    RemovePresentation {
        element: ElementId,
        flag: Presentation,
    },

    SetAttribute {
        element: ElementId,
        name: String,
        value: String,
    },

    RemoveAttribute {
        element: ElementId,
        name: String,
    },

    /// Replace the element's text content.
    SetText { element: ElementId, text: String },

    /// Set an inline style property. An empty value clears it.
    SetStyle {
        element: ElementId,
        property: String,
        value: String,
    },

    /// Page-wide scroll lock (body overflow). Only the mobile menu issues it.
    SetScrollLock { locked: bool },

    /// Create the host's observer of this kind. Issued once, before any
    /// `Observe` for the same kind.
    CreateObserver {
        observer: ObserverKind,
        options: ObserverOptions,
    },

    Observe {
        observer: ObserverKind,
        element: ElementId,
    },

    Unobserve {
        observer: ObserverKind,
        element: ElementId,
    },

    ScrollTo { top: f64, smooth: bool },

    Focus {
        element: ElementId,
        prevent_scroll: bool,
    },

    /// Synthesize a click on the element (keyboard activation).
    Click { element: ElementId },

    /// Suppress the default action of the event currently being handled.
    PreventDefault,
}

impl HostCommand {
    pub fn add(element: &ElementId, flag: Presentation) -> Self {
        Self::AddPresentation {
            element: element.clone(),
            flag,
        }
    }

    pub fn remove(element: &ElementId, flag: Presentation) -> Self {
        Self::RemovePresentation {
            element: element.clone(),
            flag,
        }
    }

    /// Add or remove `flag` depending on `on`.
    pub fn toggle(element: &ElementId, flag: Presentation, on: bool) -> Self {
        if on {
            Self::add(element, flag)
        } else {
            Self::remove(element, flag)
        }
    }

    pub fn set_attribute(element: &ElementId, name: &str, value: impl Into<String>) -> Self {
        Self::SetAttribute {
            element: element.clone(),
            name: name.to_string(),
            value: value.into(),
        }
    }

    pub fn set_style(element: &ElementId, property: &str, value: impl Into<String>) -> Self {
        Self::SetStyle {
            element: element.clone(),
            property: property.to_string(),
            value: value.into(),
        }
    }

    /// The element this command writes to, if any.
    pub fn element(&self) -> Option<&ElementId> {
        match self {
            Self::AddPresentation { element, .. }
            | Self::RemovePresentation { element, .. }
            | Self::SetAttribute { element, .. }
            | Self::RemoveAttribute { element, .. }
            | Self::SetText { element, .. }
            | Self::SetStyle { element, .. }
            | Self::Observe { element, .. }
            | Self::Unobserve { element, .. }
            | Self::Focus { element, .. }
            | Self::Click { element } => Some(element),
            Self::SetScrollLock { .. }
            | Self::CreateObserver { .. }
            | Self::ScrollTo { .. }
            | Self::PreventDefault => None,
        }
    }
}
