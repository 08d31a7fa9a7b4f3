// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position store: the committed thumb coordinate and its move lifecycle.
//!
//! ## Usage
//!
//! 1) Create a [`PositionStore`] with an initial coordinate and [`PositionOptions`].
//! 2) Call [`PositionStore::move_to`] for every coordinate of a move sequence.
//!    The first call records the departure point.
//! 3) Query [`PositionStore::move_distance`] while the move is in progress.
//! 4) End the sequence with [`PositionStore::terminate_move`].
//!
//! Programmatic updates outside a move use [`PositionStore::set_position`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_thumb::{Direction, Limit, PositionOptions, PositionStore};
//!
//! let options = PositionOptions::default()
//!     .with_direction(Direction::Omnidirectional)
//!     .with_max(Limit::Uniform(50.0));
//! let mut store = PositionStore::with_options(Point::ZERO, options);
//!
//! // Clamped to the upper bound.
//! assert_eq!(store.move_to(Point::new(30.0, 60.0)), Some(Point::new(30.0, 50.0)));
//! assert_eq!(store.move_distance(), Some(Vec2::new(30.0, 50.0)));
//!
//! store.terminate_move();
//! assert_eq!(store.move_distance(), None);
//! ```

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Vec2};

use crate::coords::{Axis, PartialPoint};
use crate::limits::{Direction, Limit, Limits};

/// Callback invoked with the new coordinate after each committed change.
pub type ChangeCallback = Box<dyn FnMut(Point)>;

/// Configuration for a [`PositionStore`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PositionOptions {
    /// Which axis changes are accepted.
    pub direction: Direction,
    /// Lower bound.
    pub min: Option<Limit>,
    /// Upper bound.
    pub max: Option<Limit>,
}

impl PositionOptions {
    /// Returns these options with `direction` replaced.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Returns these options with the lower bound replaced.
    #[must_use]
    pub fn with_min(mut self, min: impl Into<Limit>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Returns these options with the upper bound replaced.
    #[must_use]
    pub fn with_max(mut self, max: impl Into<Limit>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Resolves the configured bounds.
    #[must_use]
    pub fn limits(&self) -> Limits {
        Limits::new(self.min, self.max)
    }
}

/// Holds the committed coordinate of a thumb.
///
/// The departure coordinate is present only while a move is in progress, that
/// is between the first [`move_to`](Self::move_to) and
/// [`terminate_move`](Self::terminate_move).
pub struct PositionStore {
    position: Point,
    departure: Option<Point>,
    options: PositionOptions,
    limits: Limits,
    on_change: Option<ChangeCallback>,
}

impl fmt::Debug for PositionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionStore")
            .field("position", &self.position)
            .field("departure", &self.departure)
            .field("options", &self.options)
            .field("limits", &self.limits)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl Default for PositionStore {
    fn default() -> Self {
        Self::new(Point::ZERO)
    }
}

impl PositionStore {
    /// Creates a store at `initial` with default options.
    #[must_use]
    pub fn new(initial: Point) -> Self {
        Self::with_options(initial, PositionOptions::default())
    }

    /// Creates a store at `initial` with the given options.
    ///
    /// The initial coordinate is stored as given, even if it lies outside the
    /// limits; call [`refresh_position`](Self::refresh_position) to clamp it.
    #[must_use]
    pub fn with_options(initial: Point, options: PositionOptions) -> Self {
        Self {
            position: initial,
            departure: None,
            limits: options.limits(),
            options,
            on_change: None,
        }
    }

    /// Returns the committed coordinate.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the departure coordinate of the move in progress.
    #[must_use]
    pub fn departure(&self) -> Option<Point> {
        self.departure
    }

    /// Returns `true` while a move is in progress.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.departure.is_some()
    }

    /// Returns the current options.
    #[must_use]
    pub fn options(&self) -> PositionOptions {
        self.options
    }

    /// Returns the resolved limits the next update will clamp against.
    #[must_use]
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Replaces the options.
    ///
    /// The stored coordinate is not clamped until the next update.
    pub fn set_options(&mut self, options: PositionOptions) {
        self.options = options;
        self.limits = options.limits();
    }

    /// Updates the options in place.
    pub fn update_options(&mut self, f: impl FnOnce(&mut PositionOptions)) {
        let mut options = self.options;
        f(&mut options);
        self.set_options(options);
    }

    /// Sets the change callback, replacing any previous one.
    pub fn set_on_change(&mut self, f: impl FnMut(Point) + 'static) {
        self.on_change = Some(Box::new(f));
    }

    /// Removes the change callback.
    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    /// Computes the delta an update to `candidate` would apply.
    ///
    /// Returns `None` when the delta is zero on both axes.
    #[must_use]
    pub fn distance(&self, candidate: impl Into<PartialPoint>) -> Option<Vec2> {
        let target = self.target(candidate.into());
        let delta = target - self.position;
        (delta != Vec2::ZERO).then_some(delta)
    }

    /// The committed coordinate an update to `candidate` would produce.
    fn target(&self, candidate: PartialPoint) -> Point {
        let clamped = self.limits.clamp(candidate);
        let direction = self.options.direction;
        let pick = |axis: Axis, current: f64| match clamped.get(axis) {
            Some(v) if direction.accepts(axis) => v,
            _ => current,
        };
        Point::new(pick(Axis::X, self.position.x), pick(Axis::Y, self.position.y))
    }

    /// Commits `candidate` after applying limits and the axis constraint.
    ///
    /// Returns the new coordinate if it changed. A zero delta is a no-op: no
    /// state change and no notification. Unless `quiet`, the change callback
    /// receives the new coordinate.
    pub fn set_position(
        &mut self,
        candidate: impl Into<PartialPoint>,
        quiet: bool,
    ) -> Option<Point> {
        let target = self.target(candidate.into());
        if target == self.position {
            return None;
        }
        self.position = target;
        if !quiet
            && let Some(on_change) = self.on_change.as_mut()
        {
            on_change(self.position);
        }
        Some(self.position)
    }

    /// Re-applies the current limits to the committed coordinate.
    pub fn refresh_position(&mut self, quiet: bool) -> Option<Point> {
        self.set_position(self.position, quiet)
    }

    /// Moves toward `candidate` as part of a move sequence.
    ///
    /// The first call of a sequence records the departure point. The move is
    /// in progress afterwards whether or not this call changed the position.
    pub fn move_to(&mut self, candidate: impl Into<PartialPoint>) -> Option<Point> {
        if self.departure.is_none() {
            self.departure = Some(self.position);
        }
        self.set_position(candidate, false)
    }

    /// Ends the move in progress. Does nothing if there is none.
    pub fn terminate_move(&mut self) {
        self.departure = None;
    }

    /// Returns the offset from the departure point while a move is in progress.
    #[must_use]
    pub fn move_distance(&self) -> Option<Vec2> {
        self.departure.map(|departure| self.position - departure)
    }
}
