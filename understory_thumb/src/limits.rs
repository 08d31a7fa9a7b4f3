// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis constraints and min/max limits.
//!
//! Clamping applies the upper bound first and the lower bound second:
//! `max(min, min(max, value))`. When a caller configures `min > max` on an
//! axis, the lower bound wins. A missing bound leaves that side open.

use crate::coords::{Axis, PartialPoint};

/// Which axis changes a position store accepts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Only `x` changes are accepted.
    #[default]
    Horizontal,
    /// Only `y` changes are accepted.
    Vertical,
    /// Both axes are accepted.
    Omnidirectional,
}

impl Direction {
    /// Returns `true` if changes along `axis` are accepted.
    #[must_use]
    pub const fn accepts(self, axis: Axis) -> bool {
        match (self, axis) {
            (Self::Omnidirectional, _)
            | (Self::Horizontal, Axis::X)
            | (Self::Vertical, Axis::Y) => true,
            _ => false,
        }
    }
}

/// A single bound, either shared by both axes or given per axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Limit {
    /// The same value on both axes.
    Uniform(f64),
    /// Separate values per axis; a `None` axis is unbounded.
    PerAxis(PartialPoint),
}

impl Limit {
    /// Expands this bound into per-axis form.
    #[must_use]
    pub const fn per_axis(self) -> PartialPoint {
        match self {
            Self::Uniform(v) => PartialPoint::new(v, v),
            Self::PerAxis(p) => p,
        }
    }
}

impl From<f64> for Limit {
    fn from(v: f64) -> Self {
        Self::Uniform(v)
    }
}

impl From<PartialPoint> for Limit {
    fn from(p: PartialPoint) -> Self {
        Self::PerAxis(p)
    }
}

impl From<kurbo::Point> for Limit {
    fn from(p: kurbo::Point) -> Self {
        Self::PerAxis(p.into())
    }
}

/// Resolved per-axis bounds.
///
/// This is the cached form [`PositionStore`](crate::PositionStore) keeps after
/// each option change, and the value the [`limit`](crate::middleware::limit)
/// stage clamps against.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Limits {
    /// Lower bounds.
    pub min: PartialPoint,
    /// Upper bounds.
    pub max: PartialPoint,
}

impl Limits {
    /// No bounds on either axis.
    pub const UNBOUNDED: Self = Self {
        min: PartialPoint::EMPTY,
        max: PartialPoint::EMPTY,
    };

    /// Resolves optional `min` and `max` bounds.
    #[must_use]
    pub fn new(min: Option<Limit>, max: Option<Limit>) -> Self {
        Self {
            min: min.map(Limit::per_axis).unwrap_or_default(),
            max: max.map(Limit::per_axis).unwrap_or_default(),
        }
    }

    /// Returns `true` if no axis has any bound.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_empty() && self.max.is_empty()
    }

    /// Clamps a single value on `axis`.
    #[must_use]
    pub fn clamp_axis(&self, axis: Axis, value: f64) -> f64 {
        clamp_value(value, self.min.get(axis), self.max.get(axis))
    }

    /// Clamps whichever components of `p` are present.
    #[must_use]
    pub fn clamp(&self, p: PartialPoint) -> PartialPoint {
        if self.is_unbounded() {
            return p;
        }
        PartialPoint {
            x: p.x.map(|x| self.clamp_axis(Axis::X, x)),
            y: p.y.map(|y| self.clamp_axis(Axis::Y, y)),
        }
    }
}

/// Clamps `value` to the optional bounds, upper bound first.
#[must_use]
pub fn clamp_value(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let capped = match max {
        Some(max) => value.min(max),
        None => value,
    };
    match min {
        Some(min) => capped.max(min),
        None => capped,
    }
}
