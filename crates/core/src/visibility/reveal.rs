use site_ux_protocol::{
    CounterBinding, ElementId, HostCommand, IntersectionEntry, ObserverKind, ObserverOptions,
    Presentation,
};
use tracing::debug;

use super::counter::{CounterAnimator, parse_counter_target};
use super::oneshot::OneShotSet;

/// Reveals elements the first time they scroll into view and kicks off the
/// counter of stat cards.
///
/// Every registered element goes `Pending -> Fired` once. After firing it is
/// unobserved, so later visibility reports for it are ignored.
#[derive(Debug, Clone)]
pub struct VisibilityRevealEngine {
    options: ObserverOptions,
    available: bool,
    watches: OneShotSet<Option<CounterBinding>>,
}

impl VisibilityRevealEngine {
    /// `available` is whether the host has a visibility observer at all.
    /// Without one the engine stays inert.
    pub fn new(options: ObserverOptions, available: bool) -> Self {
        Self {
            options,
            available,
            watches: OneShotSet::new(),
        }
    }

    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    pub fn register(&mut self, element: ElementId, counter: Option<CounterBinding>) {
        if !self.available {
            return;
        }
        if !self.watches.watch(element.clone(), counter) {
            debug!(%element, "reveal element registered twice");
        }
    }

    /// Commands that create the host observer and subscribe every pending
    /// element. Empty when the host has no observer.
    pub fn observe_all(&self) -> Vec<HostCommand> {
        if !self.available || self.watches.is_empty() {
            return Vec::new();
        }
        let mut commands = vec![HostCommand::CreateObserver {
            observer: ObserverKind::Reveal,
            options: self.options,
        }];
        commands.extend(self.watches.pending().map(|element| HostCommand::Observe {
            observer: ObserverKind::Reveal,
            element: element.clone(),
        }));
        commands
    }

    /// Handle one observer batch.
    pub fn on_entries(
        &mut self,
        entries: &[IntersectionEntry],
        counters: &mut CounterAnimator,
        now_ms: f64,
    ) -> Vec<HostCommand> {
        let mut commands = Vec::new();
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some(counter) = self.watches.fire(&entry.element) else {
                continue;
            };
            commands.push(HostCommand::add(&entry.element, Presentation::Visible));
            if let Some(binding) = counter {
                commands.extend(start_counter(binding, counters, now_ms));
            }
            commands.push(HostCommand::Unobserve {
                observer: ObserverKind::Reveal,
                element: entry.element.clone(),
            });
        }
        commands
    }

    pub fn is_revealed(&self, element: &ElementId) -> bool {
        self.watches.has_fired(element)
    }
}

fn start_counter(
    binding: CounterBinding,
    counters: &mut CounterAnimator,
    now_ms: f64,
) -> Vec<HostCommand> {
    if binding.animated || counters.has_animated(&binding.element) {
        return Vec::new();
    }
    match parse_counter_target(binding.target.as_deref()) {
        Ok(target) => counters.start(binding.element, target, now_ms),
        Err(err) => {
            debug!(element = %binding.element, %err, "counter disabled");
            Vec::new()
        }
    }
}
