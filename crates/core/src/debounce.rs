//! Time-coalescing of rapid repeated calls.
//!
//! Time is supplied by the caller in milliseconds (the host's monotonic
//! clock), so the same code runs against `performance.now()` in the page and
//! against a virtual clock in tests and replays.

/// Holds at most one pending invocation. Each [`call`](Self::call) replaces
/// the pending arguments and pushes the deadline back to `now + wait`.
#[derive(Debug, Clone)]
pub struct Debouncer<A> {
    wait_ms: f64,
    pending: Option<Pending<A>>,
}

#[derive(Debug, Clone)]
struct Pending<A> {
    args: A,
    due_ms: f64,
}

impl<A> Debouncer<A> {
    pub fn new(wait_ms: f64) -> Self {
        Self {
            wait_ms,
            pending: None,
        }
    }

    pub fn wait_ms(&self) -> f64 {
        self.wait_ms
    }

    /// Record a call. Any pending invocation is cancelled and rescheduled
    /// with these arguments.
    pub fn call(&mut self, now_ms: f64, args: A) {
        self.pending = Some(Pending {
            args,
            due_ms: now_ms + self.wait_ms,
        });
    }

    /// Take the pending arguments if their quiet period has elapsed.
    pub fn take_due(&mut self, now_ms: f64) -> Option<A> {
        if self.pending.as_ref().is_some_and(|p| p.due_ms <= now_ms) {
            self.pending.take().map(|p| p.args)
        } else {
            None
        }
    }

    /// When the pending invocation will fire, if there is one.
    pub fn deadline(&self) -> Option<f64> {
        self.pending.as_ref().map(|p| p.due_ms)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending invocation. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

/// A [`Debouncer`] bundled with the callback it guards.
///
/// The callback's return value is discarded. It runs from
/// [`poll`](Self::poll), never from [`call`](Self::call).
pub struct Debounced<A, F> {
    debouncer: Debouncer<A>,
    callback: F,
}

impl<A, F: FnMut(A)> Debounced<A, F> {
    pub fn call(&mut self, now_ms: f64, args: A) {
        self.debouncer.call(now_ms, args);
    }

    /// Run the callback if the quiet period has elapsed. Returns whether it
    /// ran.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.debouncer.take_due(now_ms) {
            Some(args) => {
                (self.callback)(args);
                true
            }
            None => false,
        }
    }

    pub fn deadline(&self) -> Option<f64> {
        self.debouncer.deadline()
    }

    pub fn cancel(&mut self) -> bool {
        self.debouncer.cancel()
    }
}

/// Wrap `callback` so that bursts of calls collapse into one invocation
/// `wait_ms` after the last call, with the last call's arguments.
pub fn debounce<A, F: FnMut(A)>(callback: F, wait_ms: f64) -> Debounced<A, F> {
    Debounced {
        debouncer: Debouncer::new(wait_ms),
        callback,
    }
}
