// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::coords::{Axis, PartialPoint};
use crate::middleware::{CoordsPayload, Fixed, Middleware, Source};

/// Locks movement to one axis.
///
/// For [`Axis::X`] the proposed `y` is forced back to the last committed `y`,
/// and vice versa. A source yielding `None` lets the payload through.
#[derive(Clone, Debug)]
pub struct AxisLock<S> {
    axis: S,
}

impl<S> AxisLock<S> {
    /// Creates a lock whose axis is read from `source` on every invocation.
    pub const fn from_source(source: S) -> Self {
        Self { axis: source }
    }
}

/// Creates a stage that only lets `axis` move.
#[must_use]
pub const fn axis_lock(axis: Axis) -> AxisLock<Fixed<Option<Axis>>> {
    AxisLock::from_source(Fixed(Some(axis)))
}

impl<P, S> Middleware<P> for AxisLock<S>
where
    P: CoordsPayload,
    S: Source<P, Option<Axis>>,
{
    fn apply(&mut self, mut payload: P) -> P {
        if let Some(axis) = self.axis.get(&payload) {
            let cross = axis.cross();
            let held = PartialPoint::from(payload.last_coords()).get(cross);
            payload.coords_mut().set(cross, held);
        }
        payload
    }
}
