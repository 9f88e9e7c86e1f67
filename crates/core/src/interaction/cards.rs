use site_ux_protocol::{ElementId, HostCommand, Presentation, ServiceCardEntry};

pub const ENTER_KEY: &str = "Enter";
const RAISED_Z_INDEX: &str = "10";

/// Service cards: at most one is selected at a time, hovering raises a card
/// above its neighbours, and Enter follows the card's link.
#[derive(Debug, Clone, Default)]
pub struct ServiceCardSelector {
    cards: Vec<ServiceCardEntry>,
    active: Option<ElementId>,
}

impl ServiceCardSelector {
    pub fn new(cards: Vec<ServiceCardEntry>) -> Self {
        Self {
            cards,
            active: None,
        }
    }

    pub fn active(&self) -> Option<&ElementId> {
        self.active.as_ref()
    }

    fn card(&self, element: &ElementId) -> Option<&ServiceCardEntry> {
        self.cards.iter().find(|c| c.element == *element)
    }

    /// Clicking the selected card deselects it; clicking another card moves
    /// the selection.
    pub fn on_click(&mut self, element: &ElementId) -> Vec<HostCommand> {
        if self.card(element).is_none() {
            return Vec::new();
        }
        let mut commands = Vec::new();
        match self.active.take() {
            Some(previous) if previous == *element => {
                commands.push(HostCommand::remove(element, Presentation::Active));
            }
            previous => {
                if let Some(previous) = previous {
                    commands.push(HostCommand::remove(&previous, Presentation::Active));
                }
                commands.push(HostCommand::add(element, Presentation::Active));
                self.active = Some(element.clone());
            }
        }
        commands
    }

    pub fn on_key(&self, key: &str, target: &ElementId) -> Vec<HostCommand> {
        if key != ENTER_KEY {
            return Vec::new();
        }
        self.card(target)
            .and_then(|card| card.link.clone())
            .map(|link| vec![HostCommand::Click { element: link }])
            .unwrap_or_default()
    }

    pub fn on_pointer_enter(&self, element: &ElementId) -> Vec<HostCommand> {
        self.z_index(element, RAISED_Z_INDEX)
    }

    pub fn on_pointer_leave(&self, element: &ElementId) -> Vec<HostCommand> {
        self.z_index(element, "")
    }

    fn z_index(&self, element: &ElementId, value: &str) -> Vec<HostCommand> {
        match self.card(element) {
            Some(card) => vec![HostCommand::set_style(&card.element, "z-index", value)],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> ServiceCardSelector {
        ServiceCardSelector::new(vec![
            ServiceCardEntry {
                element: "card-a".into(),
                link: Some("card-a-link".into()),
            },
            ServiceCardEntry {
                element: "card-b".into(),
                link: None,
            },
        ])
    }

    #[test]
    fn selection_is_exclusive() {
        let mut c = cards();
        assert_eq!(
            c.on_click(&"card-a".into()),
            vec![HostCommand::add(&"card-a".into(), Presentation::Active)]
        );
        assert_eq!(
            c.on_click(&"card-b".into()),
            vec![
                HostCommand::remove(&"card-a".into(), Presentation::Active),
                HostCommand::add(&"card-b".into(), Presentation::Active),
            ]
        );
        assert_eq!(c.active().map(ElementId::as_str), Some("card-b"));
    }

    #[test]
    fn clicking_active_card_deselects() {
        let mut c = cards();
        c.on_click(&"card-a".into());
        assert_eq!(
            c.on_click(&"card-a".into()),
            vec![HostCommand::remove(&"card-a".into(), Presentation::Active)]
        );
        assert_eq!(c.active(), None);
    }

    #[test]
    fn non_card_click_keeps_selection() {
        let mut c = cards();
        c.on_click(&"card-a".into());
        assert!(c.on_click(&"footer".into()).is_empty());
        assert_eq!(c.active().map(ElementId::as_str), Some("card-a"));
    }

    #[test]
    fn enter_follows_link_when_present() {
        let c = cards();
        assert_eq!(
            c.on_key("Enter", &"card-a".into()),
            vec![HostCommand::Click {
                element: "card-a-link".into()
            }]
        );
        assert!(c.on_key("Enter", &"card-b".into()).is_empty());
        assert!(c.on_key(" ", &"card-a".into()).is_empty());
    }

    #[test]
    fn hover_raises_and_restores() {
        let c = cards();
        assert_eq!(
            c.on_pointer_enter(&"card-b".into()),
            vec![HostCommand::set_style(&"card-b".into(), "z-index", "10")]
        );
        assert_eq!(
            c.on_pointer_leave(&"card-b".into()),
            vec![HostCommand::set_style(&"card-b".into(), "z-index", "")]
        );
    }
}
