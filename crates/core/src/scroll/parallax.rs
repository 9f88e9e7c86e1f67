use site_ux_protocol::{ElementId, HostCommand};

/// Moves the hero content down at a fraction of the scroll speed.
#[derive(Debug, Clone)]
pub struct HeroParallax {
    content: Option<ElementId>,
    factor: f64,
}

impl HeroParallax {
    pub fn new(content: Option<ElementId>, factor: f64) -> Self {
        Self { content, factor }
    }

    pub fn update(&self, offset: f64) -> Vec<HostCommand> {
        let Some(content) = &self.content else {
            return Vec::new();
        };
        let shift = offset * self.factor;
        vec![HostCommand::set_style(
            content,
            "transform",
            format!("translateY({shift}px)"),
        )]
    }
}
