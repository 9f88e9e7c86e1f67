use serde::{Deserialize, Serialize};

use crate::element::ElementId;

/// Description of the page the core coordinates, built once by the host.
///
/// Every role is optional or may be empty: a page that lacks an element
/// simply does not get the behaviour tied to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageManifest {
    pub body: Option<ElementId>,
    /// Root element receiving custom properties (reduced motion).
    pub root: Option<ElementId>,
    pub navbar: Option<ElementId>,
    pub menu: MenuElements,
    /// Sections in document order. Order decides highlight tie-breaks.
    pub sections: Vec<ElementId>,
    pub nav_links: Vec<LinkEntry>,
    /// All in-page anchors (`href` starting with `#`).
    pub anchors: Vec<LinkEntry>,
    pub reveal: Vec<RevealEntry>,
    pub lazy_images: Vec<LazyImageEntry>,
    pub hero_content: Option<ElementId>,
    pub form_fields: Vec<FormFieldEntry>,
    pub service_cards: Vec<ServiceCardEntry>,
    /// Star elements, grouped per testimonial.
    pub testimonial_stars: Vec<Vec<ElementId>>,
    pub skip_link: Option<ElementId>,
    pub main_content: Option<ElementId>,
    pub capabilities: HostCapabilities,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MenuElements {
    pub toggle: Option<ElementId>,
    pub close: Option<ElementId>,
    pub panel: Option<ElementId>,
    pub overlay: Option<ElementId>,
    /// Menu links and call-to-action buttons; any of them closes the menu.
    pub links: Vec<ElementId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub element: ElementId,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealEntry {
    pub element: ElementId,
    #[serde(default)]
    pub counter: Option<CounterBinding>,
}

/// A numeric display inside a revealed element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterBinding {
    pub element: ElementId,
    /// Raw `data-target` attribute, parsed when the element is revealed.
    #[serde(default)]
    pub target: Option<String>,
    /// The element already carries the animated marker.
    #[serde(default)]
    pub animated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LazyImageEntry {
    pub element: ElementId,
    /// Staged source (`data-src`), if any.
    #[serde(default)]
    pub staged_src: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormFieldEntry {
    pub element: ElementId,
    /// Wrapper that receives the `focused`/`filled` presentation.
    pub container: ElementId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCardEntry {
    pub element: ElementId,
    #[serde(default)]
    pub link: Option<ElementId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostCapabilities {
    pub visibility_observer: bool,
    pub prefers_reduced_motion: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self {
            visibility_observer: true,
            prefers_reduced_motion: false,
        }
    }
}
