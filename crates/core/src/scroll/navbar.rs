use site_ux_protocol::{ElementId, HostCommand, Presentation};

/// Whether the navbar counts as scrolled at `offset`. The boundary itself is
/// not scrolled.
pub fn is_scrolled(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

/// Toggles the navbar's "scrolled" chrome on every scroll notification.
#[derive(Debug, Clone)]
pub struct NavbarChromeController {
    navbar: Option<ElementId>,
    threshold: f64,
    scrolled: bool,
}

impl NavbarChromeController {
    pub fn new(navbar: Option<ElementId>, threshold: f64) -> Self {
        Self {
            navbar,
            threshold,
            scrolled: false,
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Re-apply the chrome state for `offset`. Always emits the full state,
    /// so repeating a call is harmless.
    pub fn update(&mut self, offset: f64) -> Vec<HostCommand> {
        self.scrolled = is_scrolled(offset, self.threshold);
        match &self.navbar {
            Some(navbar) => vec![HostCommand::toggle(
                navbar,
                Presentation::Scrolled,
                self.scrolled,
            )],
            None => Vec::new(),
        }
    }
}
