use site_ux_protocol::{
    ElementId, HostCommand, HostEvent, IntersectionEntry, ObserverKind, PageManifest,
    Presentation,
};
use tracing::debug;

use crate::config::SiteConfig;
use crate::interaction::{
    FormFieldAffordances, MenuState, MobileMenuController, ServiceCardSelector, decor,
};
use crate::metrics::PageMetrics;
use crate::scroll::{
    AnchorNavigator, HeroParallax, NavbarChromeController, ScrollPositionTracker,
    SectionHighlighter, SkipLink,
};
use crate::visibility::{CounterAnimator, LazyRevealImageLoader, VisibilityRevealEngine};

/// Fans host events out to the components and collects their commands.
///
/// Each component owns its own slice of state and none of them looks at
/// another's. The coordinator never polls: it reacts to [`handle`] and to
/// [`advance`], which the host calls at [`next_deadline`].
///
/// [`handle`]: Self::handle
/// [`advance`]: Self::advance
/// [`next_deadline`]: Self::next_deadline
#[derive(Debug, Clone)]
pub struct SiteCoordinator {
    config: SiteConfig,
    body: Option<ElementId>,
    root: Option<ElementId>,
    reduced_motion: bool,
    testimonial_stars: Vec<Vec<ElementId>>,
    reveal: VisibilityRevealEngine,
    counters: CounterAnimator,
    images: LazyRevealImageLoader,
    scroll: ScrollPositionTracker,
    anchors: AnchorNavigator,
    skip_link: Option<SkipLink>,
    menu: MobileMenuController,
    cards: ServiceCardSelector,
    forms: FormFieldAffordances,
}

impl SiteCoordinator {
    pub fn new(manifest: PageManifest, config: SiteConfig) -> Self {
        let observer = manifest.capabilities.visibility_observer;

        let mut counters = CounterAnimator::new(config.counter_duration_ms, config.counter_tick_ms);
        let mut reveal = VisibilityRevealEngine::new(config.reveal_options(), observer);
        for entry in manifest.reveal {
            if let Some(counter) = entry.counter.as_ref().filter(|c| c.animated) {
                counters.mark_animated(counter.element.clone());
            }
            reveal.register(entry.element, entry.counter);
        }

        let mut images = LazyRevealImageLoader::new(observer);
        for image in manifest.lazy_images {
            images.register(image);
        }

        let scroll = ScrollPositionTracker::new(
            NavbarChromeController::new(manifest.navbar, config.navbar_threshold_px),
            HeroParallax::new(manifest.hero_content, config.parallax_factor),
            SectionHighlighter::new(
                manifest.sections,
                manifest.nav_links,
                config.highlight_offset_px,
            ),
            config.highlight_debounce_ms,
            config.resize_debounce_ms,
        );

        Self {
            body: manifest.body,
            root: manifest.root,
            reduced_motion: manifest.capabilities.prefers_reduced_motion,
            testimonial_stars: manifest.testimonial_stars,
            reveal,
            counters,
            images,
            scroll,
            anchors: AnchorNavigator::new(manifest.anchors, config.anchor_offset_px),
            skip_link: manifest
                .skip_link
                .map(|link| SkipLink::new(link, manifest.main_content)),
            menu: MobileMenuController::new(manifest.menu),
            cards: ServiceCardSelector::new(manifest.service_cards),
            forms: FormFieldAffordances::new(manifest.form_fields),
            config,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Start-up commands: observers, static decorations, an immediate
    /// navbar/highlight sync, and the body's `loaded` flag.
    pub fn init(&mut self, metrics: &dyn PageMetrics) -> Vec<HostCommand> {
        let mut commands = self.reveal.observe_all();
        commands.extend(self.images.observe_all());
        commands.extend(decor::star_stagger(
            &self.testimonial_stars,
            self.config.star_stagger_ms,
        ));
        commands.extend(decor::reduced_motion(self.root.as_ref(), self.reduced_motion));
        commands.extend(self.scroll.sync(metrics));
        if let Some(body) = &self.body {
            commands.push(HostCommand::add(body, Presentation::Loaded));
        }
        commands
    }

    /// React to one host event. Due timers are flushed first so the event
    /// observes every state change scheduled before it.
    pub fn handle(
        &mut self,
        event: &HostEvent,
        now_ms: f64,
        metrics: &dyn PageMetrics,
    ) -> Vec<HostCommand> {
        let mut commands = self.advance(now_ms, metrics);
        match event {
            HostEvent::Scroll => commands.extend(self.scroll.on_scroll(now_ms, metrics)),
            HostEvent::Resize => self.scroll.on_resize(now_ms),
            HostEvent::Intersections { observer, entries } => {
                commands.extend(self.on_intersections(*observer, entries, now_ms));
            }
            HostEvent::Click { element } => commands.extend(self.on_click(element, metrics)),
            HostEvent::KeyDown { key, target } => {
                commands.extend(self.menu.on_key(key));
                if let Some(target) = target {
                    commands.extend(self.cards.on_key(key, target));
                }
            }
            HostEvent::FocusIn { element } => commands.extend(self.forms.on_focus(element)),
            HostEvent::FocusOut { element } => commands.extend(self.forms.on_blur(element)),
            HostEvent::Input { element, has_value } => {
                commands.extend(self.forms.on_input(element, *has_value));
            }
            HostEvent::PointerEnter { element } => {
                commands.extend(self.cards.on_pointer_enter(element));
            }
            HostEvent::PointerLeave { element } => {
                commands.extend(self.cards.on_pointer_leave(element));
            }
        }
        commands
    }

    fn on_intersections(
        &mut self,
        observer: ObserverKind,
        entries: &[IntersectionEntry],
        now_ms: f64,
    ) -> Vec<HostCommand> {
        match observer {
            ObserverKind::Reveal => self.reveal.on_entries(entries, &mut self.counters, now_ms),
            ObserverKind::LazyImage => self.images.on_entries(entries),
        }
    }

    /// A click can hit several roles at once (a mobile menu link is also an
    /// in-page anchor), so every handler sees it.
    fn on_click(&mut self, element: &ElementId, metrics: &dyn PageMetrics) -> Vec<HostCommand> {
        let mut commands = self.menu.on_click(element);
        if let Some(skip) = self.skip_link.as_ref().and_then(|s| s.on_click(element)) {
            commands.extend(skip);
        } else if let Some(anchor) = self.anchors.on_click(element, metrics) {
            commands.extend(anchor);
        }
        commands.extend(self.cards.on_click(element));
        if commands.is_empty() {
            debug!(%element, "click not claimed by any component");
        }
        commands
    }

    /// Run every timer due at or before `now_ms`: counter ticks and
    /// debounced highlights.
    pub fn advance(&mut self, now_ms: f64, metrics: &dyn PageMetrics) -> Vec<HostCommand> {
        let mut commands = self.counters.advance(now_ms);
        commands.extend(self.scroll.advance(now_ms, metrics));
        commands
    }

    /// When the host should next call [`advance`](Self::advance).
    pub fn next_deadline(&self) -> Option<f64> {
        match (self.counters.next_deadline(), self.scroll.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn menu_state(&self) -> MenuState {
        self.menu.state()
    }

    /// Close the mobile menu from outside the event flow.
    pub fn close_menu(&mut self) -> Vec<HostCommand> {
        self.menu.close()
    }

    /// The host removed `element` from the page; stop animating it.
    pub fn detach(&mut self, element: &ElementId) -> bool {
        self.counters.cancel(element)
    }

    pub fn is_revealed(&self, element: &ElementId) -> bool {
        self.reveal.is_revealed(element)
    }

    pub fn is_image_loaded(&self, element: &ElementId) -> bool {
        self.images.is_loaded(element)
    }

    pub fn active_nav_link(&self) -> Option<&ElementId> {
        self.scroll.highlighter().active_link()
    }

    pub fn is_navbar_scrolled(&self) -> bool {
        self.scroll.navbar().is_scrolled()
    }

    pub fn is_counter_running(&self, element: &ElementId) -> bool {
        self.counters.is_running(element)
    }
}

#[cfg(test)]
mod tests {
    use site_ux_protocol::{
        CounterBinding, LinkEntry, MenuElements, RevealEntry, ServiceCardEntry,
    };

    use super::*;
    use crate::metrics::MetricsSnapshot;

    fn manifest() -> PageManifest {
        PageManifest {
            body: Some("body".into()),
            navbar: Some("navbar".into()),
            menu: MenuElements {
                toggle: Some("menu-btn".into()),
                close: Some("menu-close".into()),
                panel: Some("menu".into()),
                overlay: Some("overlay".into()),
                links: vec!["m-about".into()],
            },
            sections: vec!["home".into(), "about".into()],
            nav_links: vec![
                LinkEntry {
                    element: "nav-home".into(),
                    href: "#home".into(),
                },
                LinkEntry {
                    element: "nav-about".into(),
                    href: "#about".into(),
                },
            ],
            anchors: vec![LinkEntry {
                element: "m-about".into(),
                href: "#about".into(),
            }],
            reveal: vec![RevealEntry {
                element: "stat".into(),
                counter: Some(CounterBinding {
                    element: "stat-n".into(),
                    target: Some("40".into()),
                    animated: false,
                }),
            }],
            service_cards: vec![ServiceCardEntry {
                element: "card".into(),
                link: None,
            }],
            ..PageManifest::default()
        }
    }

    fn page(scroll_y: f64) -> MetricsSnapshot {
        MetricsSnapshot::at(scroll_y)
            .with_element("home", 0.0, 800.0)
            .with_element("about", 800.0, 800.0)
    }

    #[test]
    fn init_syncs_state_and_marks_loaded() {
        let mut site = SiteCoordinator::new(manifest(), SiteConfig::default());
        let cmds = site.init(&page(900.0));
        assert!(site.is_navbar_scrolled());
        assert_eq!(site.active_nav_link().map(ElementId::as_str), Some("nav-about"));
        assert_eq!(
            cmds.last(),
            Some(&HostCommand::add(&"body".into(), Presentation::Loaded))
        );
        assert!(cmds.iter().any(|c| matches!(
            c,
            HostCommand::Observe {
                observer: ObserverKind::Reveal,
                ..
            }
        )));
    }

    #[test]
    fn mobile_link_closes_menu_and_scrolls() {
        let mut site = SiteCoordinator::new(manifest(), SiteConfig::default());
        let metrics = page(0.0);
        site.handle(
            &HostEvent::Click {
                element: "menu-btn".into(),
            },
            0.0,
            &metrics,
        );
        assert_eq!(site.menu_state(), MenuState::Open);

        let cmds = site.handle(
            &HostEvent::Click {
                element: "m-about".into(),
            },
            10.0,
            &metrics,
        );
        assert_eq!(site.menu_state(), MenuState::Closed);
        assert!(cmds.contains(&HostCommand::SetScrollLock { locked: false }));
        assert!(cmds.contains(&HostCommand::ScrollTo {
            top: 720.0,
            smooth: true
        }));
    }

    #[test]
    fn counter_ticks_through_advance() {
        let mut site = SiteCoordinator::new(manifest(), SiteConfig::default());
        let metrics = page(0.0);
        site.handle(
            &HostEvent::Intersections {
                observer: ObserverKind::Reveal,
                entries: vec![IntersectionEntry::entering("stat")],
            },
            0.0,
            &metrics,
        );
        assert!(site.is_revealed(&"stat".into()));
        assert_eq!(site.next_deadline(), Some(16.0));

        let mut last = None;
        while let Some(deadline) = site.next_deadline() {
            for cmd in site.advance(deadline, &metrics) {
                if let HostCommand::SetText { text, .. } = cmd {
                    last = Some(text);
                }
            }
        }
        assert_eq!(last.as_deref(), Some("40"));
    }

    #[test]
    fn detached_counter_stops_cleanly() {
        let mut site = SiteCoordinator::new(manifest(), SiteConfig::default());
        let metrics = page(0.0);
        site.handle(
            &HostEvent::Intersections {
                observer: ObserverKind::Reveal,
                entries: vec![IntersectionEntry::entering("stat")],
            },
            0.0,
            &metrics,
        );
        assert!(site.detach(&"stat-n".into()));
        assert!(!site.is_counter_running(&"stat-n".into()));
        assert_eq!(site.next_deadline(), None);
    }

    #[test]
    fn events_flush_due_timers_first() {
        let mut site = SiteCoordinator::new(manifest(), SiteConfig::default());
        site.handle(&HostEvent::Scroll, 0.0, &page(900.0));
        assert!(site.active_nav_link().is_none());
        // A later, unrelated event lands after the debounce window.
        let cmds = site.handle(
            &HostEvent::PointerEnter {
                element: "card".into(),
            },
            150.0,
            &page(900.0),
        );
        assert_eq!(site.active_nav_link().map(ElementId::as_str), Some("nav-about"));
        assert!(cmds.contains(&HostCommand::set_style(&"card".into(), "z-index", "10")));
    }

    #[test]
    fn external_close_is_idempotent() {
        let mut site = SiteCoordinator::new(manifest(), SiteConfig::default());
        assert!(site.close_menu().is_empty());
    }
}
