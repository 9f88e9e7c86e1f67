use site_ux_protocol::{ElementId, HostCommand};

/// Transition custom properties zeroed for reduced-motion users.
pub const TRANSITION_PROPERTIES: [&str; 3] =
    ["--transition-fast", "--transition-normal", "--transition-slow"];

/// Stagger each testimonial's stars so they animate in one after another.
pub fn star_stagger(testimonials: &[Vec<ElementId>], step_ms: f64) -> Vec<HostCommand> {
    testimonials
        .iter()
        .flat_map(|stars| {
            stars.iter().enumerate().map(move |(index, star)| {
                let delay = index as f64 * step_ms;
                HostCommand::set_style(star, "animation-delay", format!("{delay}ms"))
            })
        })
        .collect()
}

pub fn reduced_motion(root: Option<&ElementId>, prefers_reduced_motion: bool) -> Vec<HostCommand> {
    match root {
        Some(root) if prefers_reduced_motion => TRANSITION_PROPERTIES
            .iter()
            .map(|property| HostCommand::set_style(root, property, "0s"))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stagger_restarts_per_testimonial() {
        let cmds = star_stagger(
            &[
                vec!["t1-s1".into(), "t1-s2".into(), "t1-s3".into()],
                vec!["t2-s1".into()],
            ],
            100.0,
        );
        let delays: Vec<&str> = cmds
            .iter()
            .filter_map(|c| match c {
                HostCommand::SetStyle { value, .. } => Some(value.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(delays, vec!["0ms", "100ms", "200ms", "0ms"]);
    }

    #[test]
    fn reduced_motion_zeroes_transitions() {
        let root = ElementId::from("html");
        assert_eq!(reduced_motion(Some(&root), true).len(), 3);
        assert!(reduced_motion(Some(&root), false).is_empty());
        assert!(reduced_motion(None, true).is_empty());
    }
}
