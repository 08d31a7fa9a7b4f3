// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partial coordinates: points where either axis may be left out.
//!
//! Update operations accept a [`PartialPoint`]. An axis set to `None` means
//! "leave this axis unchanged", while `Some(0.0)` is a real value at the origin.
//! Nothing in this crate treats a zero component as absent.

use kurbo::{Point, Vec2};

/// One axis of the 2-D coordinate space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The horizontal axis.
    X,
    /// The vertical axis.
    Y,
}

impl Axis {
    /// Returns the other axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

/// A coordinate whose components are individually optional.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PartialPoint {
    /// Proposed horizontal component, if any.
    pub x: Option<f64>,
    /// Proposed vertical component, if any.
    pub y: Option<f64>,
}

impl PartialPoint {
    /// A partial point with neither axis present.
    pub const EMPTY: Self = Self { x: None, y: None };

    /// Creates a partial point with both axes present.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Creates a partial point that only carries an `x` component.
    #[must_use]
    pub const fn from_x(x: f64) -> Self {
        Self {
            x: Some(x),
            y: None,
        }
    }

    /// Creates a partial point that only carries a `y` component.
    #[must_use]
    pub const fn from_y(y: f64) -> Self {
        Self {
            x: None,
            y: Some(y),
        }
    }

    /// Returns `true` if neither axis is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }

    /// Returns the component for `axis`.
    #[must_use]
    pub const fn get(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Sets the component for `axis`.
    pub fn set(&mut self, axis: Axis, value: Option<f64>) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }

    /// Fills absent axes from `fallback`.
    #[must_use]
    pub fn unwrap_or(self, fallback: Point) -> Point {
        Point::new(self.x.unwrap_or(fallback.x), self.y.unwrap_or(fallback.y))
    }

    /// Subtracts `offset` on every axis where both values are present.
    #[must_use]
    pub fn offset_by(self, offset: Self) -> Self {
        Self {
            x: match (self.x, offset.x) {
                (Some(x), Some(dx)) => Some(x - dx),
                (x, _) => x,
            },
            y: match (self.y, offset.y) {
                (Some(y), Some(dy)) => Some(y - dy),
                (y, _) => y,
            },
        }
    }

    /// Returns `true` if every present component is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.x.is_none_or(|x| x == 0.0) && self.y.is_none_or(|y| y == 0.0)
    }
}

impl From<Point> for PartialPoint {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Vec2> for PartialPoint {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<(f64, f64)> for PartialPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Compares two optional coordinates.
///
/// Two `None`s are equal. Otherwise both axes must match exactly; there is no
/// epsilon tolerance.
#[must_use]
pub fn coords_eq(a: Option<PartialPoint>, b: Option<PartialPoint>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.x == b.x && a.y == b.y,
        _ => false,
    }
}
