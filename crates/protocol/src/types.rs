use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Vertical geometry of an element, in document pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// Which visibility observer an entry or command refers to.
///
/// The host owns one observer per kind; the core only asks it to watch or
/// stop watching elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObserverKind {
    Reveal,
    LazyImage,
}

impl ObserverKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reveal => "reveal",
            Self::LazyImage => "lazy-image",
        }
    }
}

impl std::fmt::Display for ObserverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown observer kind: {0}")]
pub struct UnknownObserverKind(pub String);

impl FromStr for ObserverKind {
    type Err = UnknownObserverKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reveal" => Ok(Self::Reveal),
            "lazy-image" => Ok(Self::LazyImage),
            other => Err(UnknownObserverKind(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RootMarginError {
    #[error("root margin must have 1 to 4 components, got {0}")]
    Arity(usize),
    #[error("invalid root margin component {0:?} (expected pixels like \"-50px\")")]
    Component(String),
}

/// Inset applied to the viewport before computing intersection, using the
/// CSS margin shorthand in pixels. Negative values shrink the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };
}

fn parse_px(component: &str) -> Result<f64, RootMarginError> {
    let number = component
        .strip_suffix("px")
        .or_else(|| (component == "0").then_some(component))
        .ok_or_else(|| RootMarginError::Component(component.to_string()))?;
    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RootMarginError::Component(component.to_string()))
}

impl FromStr for RootMargin {
    type Err = RootMarginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(parse_px)
            .collect::<Result<Vec<_>, _>>()?;
        let (top, right, bottom, left) = match values.as_slice() {
            [all] => (*all, *all, *all, *all),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            other => return Err(RootMarginError::Arity(other.len())),
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl TryFrom<String> for RootMargin {
    type Error = RootMarginError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RootMargin> for String {
    fn from(value: RootMargin) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for RootMargin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// Configuration handed to the host when it creates a visibility observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObserverOptions {
    /// Fraction of the element's area that must be visible.
    pub threshold: f64,
    pub root_margin: RootMargin,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: RootMargin::ZERO,
        }
    }
}
