pub mod commands;
pub mod element;
pub mod events;
pub mod manifest;
pub mod presentation;
pub mod types;

pub use commands::HostCommand;
pub use element::ElementId;
pub use events::{HostEvent, IntersectionEntry};
pub use manifest::{
    CounterBinding, FormFieldEntry, HostCapabilities, LazyImageEntry, LinkEntry, MenuElements,
    PageManifest, RevealEntry, ServiceCardEntry,
};
pub use presentation::Presentation;
pub use types::{
    Bounds, ObserverKind, ObserverOptions, RootMargin, RootMarginError, UnknownObserverKind,
};
