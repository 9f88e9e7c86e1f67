use serde::{Deserialize, Serialize};
use site_ux_protocol::{ElementId, HostCommand, MenuElements, Presentation};
use tracing::info;

pub const ESCAPE_KEY: &str = "Escape";
pub const EXPANDED_ATTRIBUTE: &str = "aria-expanded";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// What caused a menu transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTrigger {
    ToggleButton,
    CloseButton,
    Overlay,
    Escape,
    Link,
}

/// Owner of the mobile navigation overlay's open/closed state.
///
/// Nothing else reads or writes [`MenuState`]; every path into `Closed`
/// goes through [`close`](Self::close), so the scroll lock is always
/// released no matter which element triggered it.
#[derive(Debug, Clone)]
pub struct MobileMenuController {
    state: MenuState,
    elements: MenuElements,
}

impl MobileMenuController {
    pub fn new(elements: MenuElements) -> Self {
        Self {
            state: MenuState::Closed,
            elements,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    /// Open the menu. No-op when already open.
    pub fn open(&mut self) -> Vec<HostCommand> {
        if self.is_open() {
            return Vec::new();
        }
        self.state = MenuState::Open;
        info!("mobile menu opened");
        self.presentation(true)
    }

    /// Close the menu. No-op when already closed.
    pub fn close(&mut self) -> Vec<HostCommand> {
        if !self.is_open() {
            return Vec::new();
        }
        self.state = MenuState::Closed;
        info!("mobile menu closed");
        self.presentation(false)
    }

    pub fn toggle(&mut self) -> Vec<HostCommand> {
        match self.state {
            MenuState::Closed => self.open(),
            MenuState::Open => self.close(),
        }
    }

    pub fn trigger(&mut self, trigger: MenuTrigger) -> Vec<HostCommand> {
        match trigger {
            MenuTrigger::ToggleButton => self.toggle(),
            MenuTrigger::CloseButton
            | MenuTrigger::Overlay
            | MenuTrigger::Escape
            | MenuTrigger::Link => self.close(),
        }
    }

    /// Which trigger a click on `element` represents, if any.
    pub fn trigger_for_click(&self, element: &ElementId) -> Option<MenuTrigger> {
        let is = |slot: &Option<ElementId>| slot.as_ref() == Some(element);
        if is(&self.elements.toggle) {
            // Without a panel there is nothing to open.
            self.elements.panel.as_ref().map(|_| MenuTrigger::ToggleButton)
        } else if is(&self.elements.close) {
            Some(MenuTrigger::CloseButton)
        } else if is(&self.elements.overlay) {
            Some(MenuTrigger::Overlay)
        } else if self.elements.links.contains(element) {
            Some(MenuTrigger::Link)
        } else {
            None
        }
    }

    pub fn on_click(&mut self, element: &ElementId) -> Vec<HostCommand> {
        match self.trigger_for_click(element) {
            Some(trigger) => self.trigger(trigger),
            None => Vec::new(),
        }
    }

    /// Escape closes an open menu; other keys are ignored.
    pub fn on_key(&mut self, key: &str) -> Vec<HostCommand> {
        if key == ESCAPE_KEY && self.is_open() {
            self.trigger(MenuTrigger::Escape)
        } else {
            Vec::new()
        }
    }

    fn presentation(&self, open: bool) -> Vec<HostCommand> {
        let mut commands = Vec::with_capacity(4);
        for surface in [&self.elements.panel, &self.elements.overlay]
            .into_iter()
            .flatten()
        {
            commands.push(HostCommand::toggle(surface, Presentation::Active, open));
        }
        if let Some(toggle) = &self.elements.toggle {
            commands.push(HostCommand::set_attribute(
                toggle,
                EXPANDED_ATTRIBUTE,
                open.to_string(),
            ));
        }
        commands.push(HostCommand::SetScrollLock { locked: open });
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> MobileMenuController {
        MobileMenuController::new(MenuElements {
            toggle: Some("menu-btn".into()),
            close: Some("menu-close".into()),
            panel: Some("menu".into()),
            overlay: Some("overlay".into()),
            links: vec!["m-link-1".into(), "m-cta".into()],
        })
    }

    fn lock_state(commands: &[HostCommand]) -> Option<bool> {
        commands.iter().rev().find_map(|c| match c {
            HostCommand::SetScrollLock { locked } => Some(*locked),
            _ => None,
        })
    }

    #[test]
    fn open_applies_every_side_effect() {
        let mut m = menu();
        assert_eq!(
            m.on_click(&"menu-btn".into()),
            vec![
                HostCommand::add(&"menu".into(), Presentation::Active),
                HostCommand::add(&"overlay".into(), Presentation::Active),
                HostCommand::set_attribute(&"menu-btn".into(), "aria-expanded", "true"),
                HostCommand::SetScrollLock { locked: true },
            ]
        );
        assert_eq!(m.state(), MenuState::Open);
    }

    #[test]
    fn every_exit_path_unlocks_scroll() {
        let mut m = menu();

        m.on_click(&"menu-btn".into());
        assert_eq!(lock_state(&m.on_key("Escape")), Some(false));
        assert_eq!(m.state(), MenuState::Closed);

        m.on_click(&"menu-btn".into());
        assert_eq!(lock_state(&m.on_click(&"overlay".into())), Some(false));
        assert_eq!(m.state(), MenuState::Closed);

        m.on_click(&"menu-btn".into());
        assert_eq!(lock_state(&m.on_click(&"m-cta".into())), Some(false));
        assert_eq!(m.state(), MenuState::Closed);

        m.on_click(&"menu-btn".into());
        assert_eq!(lock_state(&m.on_click(&"menu-close".into())), Some(false));

        m.on_click(&"menu-btn".into());
        assert_eq!(lock_state(&m.on_click(&"menu-btn".into())), Some(false));
        assert_eq!(m.state(), MenuState::Closed);
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let mut m = menu();
        assert!(!m.open().is_empty());
        assert!(m.open().is_empty());
        assert_eq!(m.state(), MenuState::Open);

        assert!(!m.close().is_empty());
        assert!(m.close().is_empty());
        assert!(m.on_click(&"overlay".into()).is_empty());
        assert_eq!(m.state(), MenuState::Closed);
    }

    #[test]
    fn escape_only_acts_when_open() {
        let mut m = menu();
        assert!(m.on_key("Escape").is_empty());
        m.open();
        assert!(m.on_key("Enter").is_empty());
        assert!(m.is_open());
    }

    #[test]
    fn missing_elements_still_toggle_scroll_lock() {
        let mut m = MobileMenuController::new(MenuElements {
            toggle: Some("btn".into()),
            panel: Some("menu".into()),
            ..MenuElements::default()
        });
        let opened = m.on_click(&"btn".into());
        assert_eq!(lock_state(&opened), Some(true));
        assert_eq!(lock_state(&m.on_key("Escape")), Some(false));
    }

    #[test]
    fn toggle_without_panel_is_inert() {
        let mut m = MobileMenuController::new(MenuElements {
            toggle: Some("btn".into()),
            ..MenuElements::default()
        });
        assert!(m.on_click(&"btn".into()).is_empty());
        assert_eq!(m.state(), MenuState::Closed);
    }

    #[test]
    fn unrelated_clicks_are_ignored() {
        let mut m = menu();
        m.open();
        assert!(m.on_click(&"hero-cta".into()).is_empty());
        assert!(m.is_open());
    }
}
