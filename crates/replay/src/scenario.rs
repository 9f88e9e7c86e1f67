use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};
use site_ux_core::{MetricsSnapshot, SiteConfig, SiteCoordinator};
use site_ux_protocol::{HostCommand, HostEvent, PageManifest};
use tracing::{debug, warn};

/// Upper bound on timer wake-ups drained between two steps.
const MAX_TIMER_ROUNDS: usize = 100_000;

/// A scripted page session: the page, its geometry and a timed list of
/// steps.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub manifest: PageManifest,
    #[serde(default)]
    pub config: Option<SiteConfig>,
    #[serde(default)]
    pub metrics: MetricsSnapshot,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// At `at_ms`, optionally move the page, then optionally deliver an event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub at_ms: f64,
    #[serde(default)]
    pub scroll_y: Option<f64>,
    #[serde(default)]
    pub event: Option<HostEvent>,
}

/// What caused a batch of commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Cause {
    Init,
    Timer,
    Event(HostEvent),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub at_ms: f64,
    pub cause: Cause,
    pub commands: Vec<HostCommand>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid scenario")
    }

    /// Replay every step on a virtual clock. Timers that fall between steps
    /// fire at their own deadline; once the script ends the remaining timers
    /// are drained. Batches with no commands are dropped.
    pub fn run(self, config_override: Option<SiteConfig>) -> Result<Vec<Frame>> {
        let config = config_override.or(self.config).unwrap_or_default();
        config.validate()?;

        let mut metrics = self.metrics;
        let mut site = SiteCoordinator::new(self.manifest, config);
        let mut frames = Vec::new();
        push(&mut frames, 0.0, Cause::Init, site.init(&metrics));

        let mut clock = 0.0;
        for (index, step) in self.steps.into_iter().enumerate() {
            ensure!(
                step.at_ms.is_finite() && step.at_ms >= clock,
                "step {index} at {}ms goes back in time (clock is at {clock}ms)",
                step.at_ms
            );
            drain(&mut site, &metrics, &mut frames, Some(step.at_ms))?;
            clock = step.at_ms;

            if let Some(scroll_y) = step.scroll_y {
                metrics.scroll_y = scroll_y;
            }
            match step.event {
                Some(event) => {
                    let commands = site.handle(&event, clock, &metrics);
                    push(&mut frames, clock, Cause::Event(event), commands);
                }
                None => debug!(index, "step without event"),
            }
        }
        drain(&mut site, &metrics, &mut frames, None)?;
        Ok(frames)
    }
}

fn push(frames: &mut Vec<Frame>, at_ms: f64, cause: Cause, commands: Vec<HostCommand>) {
    if !commands.is_empty() {
        frames.push(Frame {
            at_ms,
            cause,
            commands,
        });
    }
}

/// Fire timers due strictly before `until` (all of them when `None`).
fn drain(
    site: &mut SiteCoordinator,
    metrics: &MetricsSnapshot,
    frames: &mut Vec<Frame>,
    until: Option<f64>,
) -> Result<()> {
    for _ in 0..MAX_TIMER_ROUNDS {
        let Some(deadline) = site.next_deadline() else {
            return Ok(());
        };
        if until.is_some_and(|until| deadline >= until) {
            return Ok(());
        }
        push(frames, deadline, Cause::Timer, site.advance(deadline, metrics));
    }
    warn!(rounds = MAX_TIMER_ROUNDS, "timers did not settle");
    bail!("timers still pending after {MAX_TIMER_ROUNDS} wake-ups")
}
