use std::io::{self, Write};

use site_ux_protocol::{HostCommand, HostEvent};

use crate::scenario::{Cause, Frame};

/// One line per command, in the order the host would apply them.
pub fn describe(command: &HostCommand) -> String {
    match command {
        HostCommand::AddPresentation { element, flag } => format!("{element} +.{flag}"),
        HostCommand::RemovePresentation { element, flag } => format!("{element} -.{flag}"),
        HostCommand::SetAttribute {
            element,
            name,
            value,
        } => format!("{element} [{name}={value:?}]"),
        HostCommand::RemoveAttribute { element, name } => format!("{element} [-{name}]"),
        HostCommand::SetText { element, text } => format!("{element} text {text:?}"),
        HostCommand::SetStyle {
            element,
            property,
            value,
        } => format!("{element} style {property}: {value:?}"),
        HostCommand::SetScrollLock { locked } => {
            format!("page scroll {}", if *locked { "locked" } else { "unlocked" })
        }
        HostCommand::CreateObserver { observer, options } => format!(
            "observer {observer} threshold={} margin={:?}",
            options.threshold,
            options.root_margin.to_string()
        ),
        HostCommand::Observe { observer, element } => format!("{observer} observe {element}"),
        HostCommand::Unobserve { observer, element } => format!("{observer} unobserve {element}"),
        HostCommand::ScrollTo { top, smooth } => {
            format!("scroll to {top}{}", if *smooth { " (smooth)" } else { "" })
        }
        HostCommand::Focus {
            element,
            prevent_scroll,
        } => format!(
            "{element} focus{}",
            if *prevent_scroll { " (no scroll)" } else { "" }
        ),
        HostCommand::Click { element } => format!("{element} click"),
        HostCommand::PreventDefault => "prevent default".to_string(),
    }
}

fn describe_cause(cause: &Cause) -> String {
    match cause {
        Cause::Init => "init".to_string(),
        Cause::Timer => "timer".to_string(),
        Cause::Event(event) => match event {
            HostEvent::Scroll => "scroll".to_string(),
            HostEvent::Resize => "resize".to_string(),
            HostEvent::Intersections { observer, entries } => {
                format!("{observer} intersections ({})", entries.len())
            }
            HostEvent::Click { element } => format!("click {element}"),
            HostEvent::KeyDown { key, target } => match target {
                Some(target) => format!("key {key:?} on {target}"),
                None => format!("key {key:?}"),
            },
            HostEvent::FocusIn { element } => format!("focus in {element}"),
            HostEvent::FocusOut { element } => format!("focus out {element}"),
            HostEvent::Input { element, has_value } => {
                format!("input {element} ({})", if *has_value { "filled" } else { "empty" })
            }
            HostEvent::PointerEnter { element } => format!("pointer enter {element}"),
            HostEvent::PointerLeave { element } => format!("pointer leave {element}"),
        },
    }
}

pub fn write_text(out: &mut impl Write, frames: &[Frame]) -> io::Result<()> {
    for frame in frames {
        writeln!(out, "[{:>9.1}ms] {}", frame.at_ms, describe_cause(&frame.cause))?;
        for command in &frame.commands {
            writeln!(out, "    {}", describe(command))?;
        }
    }
    Ok(())
}

pub fn write_json(out: &mut impl Write, frames: &[Frame]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, frames)?;
    writeln!(out)
}
