//! Client-side interactivity for the marketing site, as a set of
//! event-driven state machines.
//!
//! The host page feeds [`HostEvent`](site_ux_protocol::HostEvent)s and timer
//! wake-ups into a [`SiteCoordinator`]; every call answers with a list of
//! [`HostCommand`](site_ux_protocol::HostCommand)s for the host to apply.
//! Nothing here touches the page directly.

pub mod config;
pub mod coordinator;
pub mod debounce;
pub mod interaction;
pub mod metrics;
pub mod scroll;
pub mod visibility;

pub use config::{ConfigError, ManifestError, SiteConfig, parse_manifest};
pub use coordinator::SiteCoordinator;
pub use debounce::{Debounced, Debouncer, debounce};
pub use metrics::{MetricsSnapshot, PageMetrics};
