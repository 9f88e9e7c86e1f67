use site_ux_core::interaction::MenuState;
use site_ux_core::{PageMetrics, SiteConfig, SiteCoordinator, parse_manifest};
use site_ux_protocol::{Bounds, ElementId, HostCommand, HostEvent, IntersectionEntry, ObserverKind};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Live page geometry read straight from the DOM on every query.
struct DomMetrics {
    window: Option<web_sys::Window>,
}

impl DomMetrics {
    fn current() -> Self {
        Self {
            window: web_sys::window(),
        }
    }
}

impl PageMetrics for DomMetrics {
    fn scroll_y(&self) -> f64 {
        self.window
            .as_ref()
            .and_then(|w| w.scroll_y().ok())
            .unwrap_or(0.0)
    }

    fn element_bounds(&self, element: &ElementId) -> Option<Bounds> {
        let node = self
            .window
            .as_ref()?
            .document()?
            .get_element_by_id(element.as_str())?
            .dyn_into::<web_sys::HtmlElement>()
            .ok()?;
        Some(Bounds::new(
            f64::from(node.offset_top()),
            f64::from(node.offset_height()),
        ))
    }
}

fn to_json(commands: &[HostCommand]) -> Result<String, JsError> {
    serde_json::to_string(commands).map_err(|e| JsError::new(&e.to_string()))
}

/// One page's interactivity state. Every method returns the commands the
/// page should apply, as a JSON array.
#[wasm_bindgen]
pub struct SiteRuntime {
    coordinator: SiteCoordinator,
}

#[wasm_bindgen]
impl SiteRuntime {
    /// Build from the page manifest JSON and an optional config JSON.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(manifest_json: &str, config_json: Option<String>) -> Result<SiteRuntime, JsError> {
        let manifest = parse_manifest(manifest_json).map_err(|e| JsError::new(&e.to_string()))?;
        let config = match config_json.as_deref() {
            Some(json) => SiteConfig::from_json(json).map_err(|e| JsError::new(&e.to_string()))?,
            None => SiteConfig::default(),
        };
        Ok(Self {
            coordinator: SiteCoordinator::new(manifest, config),
        })
    }

    pub fn init(&mut self) -> Result<String, JsError> {
        let commands = self.coordinator.init(&DomMetrics::current());
        to_json(&commands)
    }

    /// Feed any [`HostEvent`] serialized as JSON.
    pub fn handle_event(&mut self, event_json: &str, now_ms: f64) -> Result<String, JsError> {
        let event: HostEvent =
            serde_json::from_str(event_json).map_err(|e| JsError::new(&e.to_string()))?;
        self.dispatch(&event, now_ms)
    }

    pub fn on_scroll(&mut self, now_ms: f64) -> Result<String, JsError> {
        self.dispatch(&HostEvent::Scroll, now_ms)
    }

    pub fn on_resize(&mut self, now_ms: f64) -> Result<String, JsError> {
        self.dispatch(&HostEvent::Resize, now_ms)
    }

    /// `entries_json` is an array of `{ "element": id, "isIntersecting": bool }`.
    pub fn on_intersections(
        &mut self,
        observer: &str,
        entries_json: &str,
        now_ms: f64,
    ) -> Result<String, JsError> {
        let observer: ObserverKind = observer.parse::<ObserverKind>().map_err(|e| JsError::new(&e.to_string()))?;
        let entries: Vec<IntersectionEntry> =
            serde_json::from_str(entries_json).map_err(|e| JsError::new(&e.to_string()))?;
        self.dispatch(&HostEvent::Intersections { observer, entries }, now_ms)
    }

    pub fn on_click(&mut self, element: &str, now_ms: f64) -> Result<String, JsError> {
        self.dispatch(
            &HostEvent::Click {
                element: element.into(),
            },
            now_ms,
        )
    }

    pub fn on_key_down(
        &mut self,
        key: &str,
        target: Option<String>,
        now_ms: f64,
    ) -> Result<String, JsError> {
        let event = HostEvent::KeyDown {
            key: key.to_string(),
            target: target.map(ElementId::from),
        };
        self.dispatch(&event, now_ms)
    }

    pub fn on_focus_in(&mut self, element: &str, now_ms: f64) -> Result<String, JsError> {
        self.dispatch(
            &HostEvent::FocusIn {
                element: element.into(),
            },
            now_ms,
        )
    }

    pub fn on_focus_out(&mut self, element: &str, now_ms: f64) -> Result<String, JsError> {
        self.dispatch(
            &HostEvent::FocusOut {
                element: element.into(),
            },
            now_ms,
        )
    }

    pub fn on_input(
        &mut self,
        element: &str,
        has_value: bool,
        now_ms: f64,
    ) -> Result<String, JsError> {
        self.dispatch(
            &HostEvent::Input {
                element: element.into(),
                has_value,
            },
            now_ms,
        )
    }

    pub fn on_pointer_enter(&mut self, element: &str, now_ms: f64) -> Result<String, JsError> {
        self.dispatch(
            &HostEvent::PointerEnter {
                element: element.into(),
            },
            now_ms,
        )
    }

    pub fn on_pointer_leave(&mut self, element: &str, now_ms: f64) -> Result<String, JsError> {
        self.dispatch(
            &HostEvent::PointerLeave {
                element: element.into(),
            },
            now_ms,
        )
    }

    /// Run due timers. Call at [`next_deadline`](Self::next_deadline).
    pub fn advance(&mut self, now_ms: f64) -> Result<String, JsError> {
        let commands = self.coordinator.advance(now_ms, &DomMetrics::current());
        to_json(&commands)
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.coordinator.next_deadline()
    }

    pub fn close_mobile_menu(&mut self) -> Result<String, JsError> {
        to_json(&self.coordinator.close_menu())
    }

    pub fn is_menu_open(&self) -> bool {
        self.coordinator.menu_state() == MenuState::Open
    }

    /// Stop animating an element the page removed. Returns whether a counter
    /// was running on it.
    pub fn detach(&mut self, element: &str) -> bool {
        self.coordinator.detach(&element.into())
    }
}

impl SiteRuntime {
    fn dispatch(&mut self, event: &HostEvent, now_ms: f64) -> Result<String, JsError> {
        let commands = self
            .coordinator
            .handle(event, now_ms, &DomMetrics::current());
        tracing::trace!(count = commands.len(), "event handled");
        to_json(&commands)
    }
}
