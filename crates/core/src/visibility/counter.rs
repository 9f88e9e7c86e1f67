use std::collections::{BTreeMap, BTreeSet};
use std::num::IntErrorKind;

use site_ux_protocol::{ElementId, HostCommand};
use thiserror::Error;
use tracing::{debug, trace};

/// Attribute marking a counter that has already been started.
pub const ANIMATED_ATTRIBUTE: &str = "data-animated";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CounterTargetError {
    #[error("counter target is missing")]
    Missing,
    #[error("counter target is negative: {0:?}")]
    Negative(String),
    #[error("counter target is too large: {0:?}")]
    Overflow(String),
    #[error("counter target is not an integer: {0:?}")]
    NotANumber(String),
}

/// Parse a counter's target attribute. Only plain non-negative integers are
/// accepted; surrounding whitespace is ignored.
pub fn parse_counter_target(raw: Option<&str>) -> Result<u64, CounterTargetError> {
    let text = raw.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(CounterTargetError::Missing);
    }
    text.parse::<u64>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow => CounterTargetError::Overflow(text.to_string()),
        _ if text.len() > 1
            && text.starts_with('-')
            && text[1..].bytes().all(|b| b.is_ascii_digit()) =>
        {
            CounterTargetError::Negative(text.to_string())
        }
        _ => CounterTargetError::NotANumber(text.to_string()),
    })
}

/// One element's in-flight animation.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterRun {
    pub current: f64,
    pub increment_per_tick: f64,
    pub target: u64,
    next_tick_ms: f64,
}

impl CounterRun {
    /// Advance one tick. Returns the value to display and whether the run
    /// reached its terminal state.
    fn tick(&mut self) -> (u64, bool) {
        self.current += self.increment_per_tick;
        let target = self.target as f64;
        if self.current >= target {
            (self.target, true)
        } else {
            (self.current.floor() as u64, false)
        }
    }
}

/// Drives displayed integers from 0 to their target over a fixed duration
/// in fixed-rate ticks.
///
/// Runs live in an explicit map keyed by element: inserted on
/// [`start`](Self::start), removed on the tick that reaches the target or
/// on [`cancel`](Self::cancel).
#[derive(Debug, Clone)]
pub struct CounterAnimator {
    duration_ms: f64,
    tick_ms: f64,
    runs: BTreeMap<ElementId, CounterRun>,
    animated: BTreeSet<ElementId>,
}

impl CounterAnimator {
    pub fn new(duration_ms: f64, tick_ms: f64) -> Self {
        Self {
            duration_ms,
            tick_ms,
            runs: BTreeMap::new(),
            animated: BTreeSet::new(),
        }
    }

    /// Record that `element` was animated before this animator existed.
    pub fn mark_animated(&mut self, element: ElementId) {
        self.animated.insert(element);
    }

    pub fn has_animated(&self, element: &ElementId) -> bool {
        self.animated.contains(element)
    }

    pub fn is_running(&self, element: &ElementId) -> bool {
        self.runs.contains_key(element)
    }

    pub fn run(&self, element: &ElementId) -> Option<&CounterRun> {
        self.runs.get(element)
    }

    /// Start a run. The first tick lands one tick interval after `now_ms`.
    /// Elements that already ran are left alone.
    pub fn start(&mut self, element: ElementId, target: u64, now_ms: f64) -> Vec<HostCommand> {
        if !self.animated.insert(element.clone()) {
            debug!(%element, "counter already animated, not restarting");
            return Vec::new();
        }
        let ticks = self.duration_ms / self.tick_ms;
        let run = CounterRun {
            current: 0.0,
            increment_per_tick: target as f64 / ticks,
            target,
            next_tick_ms: now_ms + self.tick_ms,
        };
        trace!(%element, target, increment = run.increment_per_tick, "counter started");
        let marker = HostCommand::set_attribute(&element, ANIMATED_ATTRIBUTE, "true");
        self.runs.insert(element, run);
        vec![marker]
    }

    /// Stop a run early (element left the page). The element stays marked
    /// as animated.
    pub fn cancel(&mut self, element: &ElementId) -> bool {
        self.runs.remove(element).is_some()
    }

    /// Process every tick due at or before `now_ms`. Each run that ticked
    /// emits one text update carrying its latest value.
    pub fn advance(&mut self, now_ms: f64) -> Vec<HostCommand> {
        let mut commands = Vec::new();
        let mut finished = Vec::new();

        for (element, run) in &mut self.runs {
            let mut shown = None;
            while run.next_tick_ms <= now_ms {
                let (value, done) = run.tick();
                shown = Some(value);
                if done {
                    finished.push(element.clone());
                    break;
                }
                run.next_tick_ms += self.tick_ms;
            }
            if let Some(value) = shown {
                commands.push(HostCommand::SetText {
                    element: element.clone(),
                    text: value.to_string(),
                });
            }
        }

        for element in finished {
            trace!(%element, "counter finished");
            self.runs.remove(&element);
        }
        commands
    }

    /// Earliest pending tick across all runs.
    pub fn next_deadline(&self) -> Option<f64> {
        self.runs
            .values()
            .map(|run| run.next_tick_ms)
            .min_by(f64::total_cmp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(commands: &[HostCommand]) -> Vec<String> {
        commands
            .iter()
            .filter_map(|c| match c {
                HostCommand::SetText { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Tick one interval at a time until the run ends, collecting every
    /// displayed value.
    fn run_to_completion(animator: &mut CounterAnimator, element: &ElementId) -> Vec<u64> {
        let mut shown = Vec::new();
        let mut guard = 0;
        while let Some(deadline) = animator.next_deadline() {
            for text in texts(&animator.advance(deadline)) {
                shown.push(text.parse().unwrap_or(u64::MAX));
            }
            guard += 1;
            assert!(guard < 10_000, "counter never finished");
        }
        assert!(!animator.is_running(element));
        shown
    }

    #[test]
    fn lands_exactly_on_target() {
        let mut animator = CounterAnimator::new(2000.0, 16.0);
        let id = ElementId::from("years");
        let cmds = animator.start(id.clone(), 2025, 0.0);
        assert_eq!(
            cmds,
            vec![HostCommand::set_attribute(&id, ANIMATED_ATTRIBUTE, "true")]
        );

        let shown = run_to_completion(&mut animator, &id);
        assert_eq!(shown.last(), Some(&2025));
        assert!(shown.iter().all(|&v| v <= 2025));
        assert!(shown.windows(2).all(|w| w[0] <= w[1]));
        // 2000ms / 16ms = 125 ticks, plus at most one for float drift.
        assert!((125..=126).contains(&shown.len()));
    }

    #[test]
    fn awkward_targets_still_land_exactly() {
        for target in [1, 3, 7, 99, 1001, 123_457] {
            let mut animator = CounterAnimator::new(2000.0, 16.0);
            let id = ElementId::from("n");
            animator.start(id.clone(), target, 0.0);
            let shown = run_to_completion(&mut animator, &id);
            assert_eq!(shown.last(), Some(&target), "target {target}");
        }
    }

    #[test]
    fn zero_target_finishes_on_first_tick() {
        let mut animator = CounterAnimator::new(2000.0, 16.0);
        let id = ElementId::from("zero");
        animator.start(id.clone(), 0, 0.0);
        assert!(animator.advance(15.0).is_empty());
        assert_eq!(texts(&animator.advance(16.0)), vec!["0"]);
        assert_eq!(animator.next_deadline(), None);
    }

    #[test]
    fn late_advance_catches_up_in_one_update() {
        let mut animator = CounterAnimator::new(2000.0, 16.0);
        let id = ElementId::from("late");
        animator.start(id.clone(), 1000, 0.0);
        // 10 ticks due: 10 * 8.0 = 80.
        assert_eq!(texts(&animator.advance(160.0)), vec!["80"]);
        assert_eq!(texts(&animator.advance(10_000.0)), vec!["1000"]);
        assert!(!animator.is_running(&id));
    }

    #[test]
    fn never_restarts_an_animated_element() {
        let mut animator = CounterAnimator::new(2000.0, 16.0);
        let id = ElementId::from("once");
        animator.start(id.clone(), 10, 0.0);
        animator.advance(5000.0);
        assert!(animator.start(id.clone(), 10, 6000.0).is_empty());
        assert!(!animator.is_running(&id));

        let preset = ElementId::from("preset");
        animator.mark_animated(preset.clone());
        assert!(animator.start(preset, 10, 0.0).is_empty());
    }

    #[test]
    fn cancel_stops_ticking() {
        let mut animator = CounterAnimator::new(2000.0, 16.0);
        let id = ElementId::from("detached");
        animator.start(id.clone(), 500, 0.0);
        assert!(animator.cancel(&id));
        assert!(animator.advance(5000.0).is_empty());
        assert!(animator.has_animated(&id));
    }

    #[test]
    fn parses_targets_strictly() {
        assert_eq!(parse_counter_target(Some("2025")), Ok(2025));
        assert_eq!(parse_counter_target(Some(" 98 ")), Ok(98));
        assert_eq!(parse_counter_target(Some("0")), Ok(0));
        assert_eq!(parse_counter_target(None), Err(CounterTargetError::Missing));
        assert_eq!(parse_counter_target(Some("  ")), Err(CounterTargetError::Missing));
        assert_eq!(
            parse_counter_target(Some("-5")),
            Err(CounterTargetError::Negative("-5".into()))
        );
        assert_eq!(
            parse_counter_target(Some("12abc")),
            Err(CounterTargetError::NotANumber("12abc".into()))
        );
        assert_eq!(
            parse_counter_target(Some("3.5")),
            Err(CounterTargetError::NotANumber("3.5".into()))
        );
        assert!(matches!(
            parse_counter_target(Some("99999999999999999999999")),
            Err(CounterTargetError::Overflow(_))
        ));
    }
}
