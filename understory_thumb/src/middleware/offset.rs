// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::coords::PartialPoint;
use crate::middleware::{CoordsPayload, Fixed, Middleware, Source};

/// Subtracts an offset from the proposed coordinate.
///
/// Each axis is shifted only when both the coordinate and the offset carry a
/// value on it. An absent offset, or one that is zero on both axes, leaves the
/// payload untouched.
#[derive(Clone, Debug)]
pub struct Offset<S> {
    offset: S,
}

impl<S> Offset<S> {
    /// Creates a stage whose offset is read from `source` on every invocation.
    pub const fn from_source(source: S) -> Self {
        Self { offset: source }
    }
}

/// Creates a stage subtracting a fixed `offset`.
#[must_use]
pub fn offset(offset: impl Into<PartialPoint>) -> Offset<Fixed<Option<PartialPoint>>> {
    Offset::from_source(Fixed(Some(offset.into())))
}

pub(crate) fn apply_offset(coords: PartialPoint, offset: Option<PartialPoint>) -> PartialPoint {
    match offset {
        Some(offset) if !offset.is_zero() => coords.offset_by(offset),
        _ => coords,
    }
}

impl<P, S> Middleware<P> for Offset<S>
where
    P: CoordsPayload,
    S: Source<P, Option<PartialPoint>>,
{
    fn apply(&mut self, mut payload: P) -> P {
        let offset = self.offset.get(&payload);
        let shifted = apply_offset(payload.coords(), offset);
        *payload.coords_mut() = shifted;
        payload
    }
}
