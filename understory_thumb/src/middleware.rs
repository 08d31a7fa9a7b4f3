// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Middleware: composable coordinate transformation stages.
//!
//! A stage receives a payload carrying the proposed [`PartialPoint`] plus
//! context, and returns a possibly modified payload. Stages compose strictly
//! left to right: `compose([m1, m2, m3])` behaves like `m3(m2(m1(payload)))`.
//!
//! Any `FnMut(P) -> P` is a stage. The built-in stages work on every payload
//! implementing [`CoordsPayload`]:
//!
//! - [`axis_lock`]: vetoes movement on the cross axis.
//! - [`limit`]: clamps against min/max bounds.
//! - [`offset`]: subtracts a fixed or computed offset.
//! - [`offset_by_reference`]: offset captured at drag start from a reference box.
//!
//! Each built-in takes a fixed value, or a closure evaluated per invocation via
//! its `from_source` constructor.
//!
//! ```
//! use kurbo::Point;
//! use understory_thumb::middleware::{Middleware, Payload, axis_lock, chain, limit};
//! use understory_thumb::{Axis, Limit, PartialPoint};
//!
//! let mut stage = chain(
//!     limit(Some(Limit::Uniform(0.0)), Some(Limit::Uniform(100.0))),
//!     axis_lock(Axis::X),
//! );
//!
//! let out = stage.apply(Payload::new(PartialPoint::new(150.0, 20.0), Point::ZERO));
//! assert_eq!(out.coords, PartialPoint::new(100.0, 0.0));
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

use crate::coords::PartialPoint;

mod axis;
mod limit;
mod offset;
mod reference;

pub use axis::{AxisLock, axis_lock};
pub use limit::{Clamp, limit};
pub use offset::{Offset, offset};
pub use reference::{OffsetByReference, Reference, offset_by_reference};

pub(crate) use offset::apply_offset;

/// A coordinate transformation stage.
pub trait Middleware<P> {
    /// Transforms `payload`.
    fn apply(&mut self, payload: P) -> P;
}

impl<P, F> Middleware<P> for F
where
    F: FnMut(P) -> P,
{
    fn apply(&mut self, payload: P) -> P {
        self(payload)
    }
}

/// Chains two stages: `first` runs, then `second` on its output.
///
/// This is the static counterpart of [`compose`]; no boxing is involved.
pub fn chain<A, B>(first: A, second: B) -> Then<A, B> {
    Then { first, second }
}

/// Two stages applied in sequence. See [`chain`].
#[derive(Clone, Debug)]
pub struct Then<A, B> {
    first: A,
    second: B,
}

impl<P, A, B> Middleware<P> for Then<A, B>
where
    A: Middleware<P>,
    B: Middleware<P>,
{
    fn apply(&mut self, payload: P) -> P {
        self.second.apply(self.first.apply(payload))
    }
}

/// The identity stage: returns the payload unchanged.
#[derive(Copy, Clone, Debug, Default)]
pub struct Identity;

impl<P> Middleware<P> for Identity {
    fn apply(&mut self, payload: P) -> P {
        payload
    }
}

/// A boxed stage, as accepted by [`compose`].
pub type BoxedMiddleware<'a, P> = Box<dyn Middleware<P> + 'a>;

/// The result of [`compose`].
pub enum Composed<'a, P> {
    /// No stages.
    Identity,
    /// Exactly one stage, applied directly.
    Single(BoxedMiddleware<'a, P>),
    /// Two or more stages, applied in order.
    Chain(Vec<BoxedMiddleware<'a, P>>),
}

impl<P> fmt::Debug for Composed<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Composed::Identity"),
            Self::Single(_) => f.write_str("Composed::Single"),
            Self::Chain(stages) => write!(f, "Composed::Chain({} stages)", stages.len()),
        }
    }
}

impl<P> Middleware<P> for Composed<'_, P> {
    fn apply(&mut self, payload: P) -> P {
        match self {
            Self::Identity => payload,
            Self::Single(stage) => stage.apply(payload),
            Self::Chain(stages) => stages
                .iter_mut()
                .fold(payload, |payload, stage| stage.apply(payload)),
        }
    }
}

/// Composes stages left to right.
///
/// Zero stages yield the identity; a single stage is applied as is.
pub fn compose<'a, P>(stages: impl IntoIterator<Item = BoxedMiddleware<'a, P>>) -> Composed<'a, P> {
    let mut stages: Vec<_> = stages.into_iter().collect();
    match stages.len() {
        0 => Composed::Identity,
        1 => Composed::Single(stages.remove(0)),
        _ => Composed::Chain(stages),
    }
}

/// A value a stage reads on every invocation.
///
/// Implemented by [`Fixed`] for constant values and by closures
/// `FnMut(&P) -> T` for values computed from the payload.
pub trait Source<P, T> {
    /// Produces the value for this invocation.
    fn get(&mut self, payload: &P) -> T;
}

impl<P, T, F> Source<P, T> for F
where
    F: FnMut(&P) -> T,
{
    fn get(&mut self, payload: &P) -> T {
        self(payload)
    }
}

/// A constant [`Source`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Fixed<T>(pub T);

impl<P, T: Clone> Source<P, T> for Fixed<T> {
    fn get(&mut self, _payload: &P) -> T {
        self.0.clone()
    }
}

/// Access to the coordinates a stage transforms.
pub trait CoordsPayload {
    /// The proposed coordinate.
    fn coords(&self) -> PartialPoint;

    /// Mutable access to the proposed coordinate.
    fn coords_mut(&mut self) -> &mut PartialPoint;

    /// The last committed coordinate.
    fn last_coords(&self) -> Point;
}

/// The minimal payload: proposed coordinate plus the last committed one.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Payload {
    /// Proposed coordinate.
    pub coords: PartialPoint,
    /// Last committed coordinate.
    pub last: Point,
}

impl Payload {
    /// Creates a payload.
    #[must_use]
    pub fn new(coords: impl Into<PartialPoint>, last: Point) -> Self {
        Self {
            coords: coords.into(),
            last,
        }
    }
}

impl CoordsPayload for Payload {
    fn coords(&self) -> PartialPoint {
        self.coords
    }

    fn coords_mut(&mut self) -> &mut PartialPoint {
        &mut self.coords
    }

    fn last_coords(&self) -> Point {
        self.last
    }
}
