use site_ux_protocol::{
    ElementId, HostCommand, IntersectionEntry, LazyImageEntry, ObserverKind, ObserverOptions,
};
use tracing::debug;

use super::oneshot::OneShotSet;

pub const STAGED_SOURCE_ATTRIBUTE: &str = "data-src";
pub const SOURCE_ATTRIBUTE: &str = "src";

/// Swaps staged image sources into place the first time each image becomes
/// visible. A no-op when the host has no visibility observer; the browser's
/// native lazy loading is left to do its job.
#[derive(Debug, Clone)]
pub struct LazyRevealImageLoader {
    available: bool,
    watches: OneShotSet<Option<String>>,
}

impl LazyRevealImageLoader {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            watches: OneShotSet::new(),
        }
    }

    pub fn register(&mut self, image: LazyImageEntry) {
        if self.available {
            self.watches.watch(image.element, image.staged_src);
        }
    }

    pub fn observe_all(&self) -> Vec<HostCommand> {
        if !self.available || self.watches.is_empty() {
            return Vec::new();
        }
        let mut commands = vec![HostCommand::CreateObserver {
            observer: ObserverKind::LazyImage,
            options: ObserverOptions::default(),
        }];
        commands.extend(self.watches.pending().map(|element| HostCommand::Observe {
            observer: ObserverKind::LazyImage,
            element: element.clone(),
        }));
        commands
    }

    pub fn on_entries(&mut self, entries: &[IntersectionEntry]) -> Vec<HostCommand> {
        let mut commands = Vec::new();
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some(staged) = self.watches.fire(&entry.element) else {
                continue;
            };
            match staged {
                Some(src) => {
                    commands.push(HostCommand::set_attribute(
                        &entry.element,
                        SOURCE_ATTRIBUTE,
                        src,
                    ));
                    commands.push(HostCommand::RemoveAttribute {
                        element: entry.element.clone(),
                        name: STAGED_SOURCE_ATTRIBUTE.to_string(),
                    });
                }
                None => debug!(element = %entry.element, "lazy image has no staged source"),
            }
            commands.push(HostCommand::Unobserve {
                observer: ObserverKind::LazyImage,
                element: entry.element.clone(),
            });
        }
        commands
    }

    pub fn is_loaded(&self, image: &ElementId) -> bool {
        self.watches.has_fired(image)
    }
}
