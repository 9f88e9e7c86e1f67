//! Viewport-visibility driven one-shot transitions.

pub mod counter;
pub mod lazy_image;
pub mod oneshot;
pub mod reveal;

pub use counter::{CounterAnimator, CounterRun, CounterTargetError, parse_counter_target};
pub use lazy_image::LazyRevealImageLoader;
pub use oneshot::{OneShotSet, Watch};
pub use reveal::VisibilityRevealEngine;
