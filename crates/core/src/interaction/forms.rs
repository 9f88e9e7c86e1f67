use std::collections::HashMap;

use site_ux_protocol::{ElementId, FormFieldEntry, HostCommand, Presentation};

/// Focus and fill affordances on form field containers.
#[derive(Debug, Clone, Default)]
pub struct FormFieldAffordances {
    containers: HashMap<ElementId, ElementId>,
}

impl FormFieldAffordances {
    pub fn new(fields: Vec<FormFieldEntry>) -> Self {
        Self {
            containers: fields
                .into_iter()
                .map(|f| (f.element, f.container))
                .collect(),
        }
    }

    fn flag(&self, field: &ElementId, flag: Presentation, on: bool) -> Vec<HostCommand> {
        self.containers
            .get(field)
            .map(|container| vec![HostCommand::toggle(container, flag, on)])
            .unwrap_or_default()
    }

    pub fn on_focus(&self, field: &ElementId) -> Vec<HostCommand> {
        self.flag(field, Presentation::Focused, true)
    }

    pub fn on_blur(&self, field: &ElementId) -> Vec<HostCommand> {
        self.flag(field, Presentation::Focused, false)
    }

    pub fn on_input(&self, field: &ElementId, has_value: bool) -> Vec<HostCommand> {
        self.flag(field, Presentation::Filled, has_value)
    }
}
