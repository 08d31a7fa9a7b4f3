// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::limits::{Limit, Limits};
use crate::middleware::{CoordsPayload, Fixed, Middleware, Source};

/// Clamps the proposed coordinate against min/max bounds.
///
/// Only axes present in the payload are touched. See [`Limits`] for the
/// clamp order.
#[derive(Clone, Debug)]
pub struct Clamp<S> {
    limits: S,
}

impl<S> Clamp<S> {
    /// Creates a stage whose bounds are read from `source` on every invocation.
    pub const fn from_source(source: S) -> Self {
        Self { limits: source }
    }
}

/// Creates a stage clamping to `min` and `max`.
#[must_use]
pub fn limit(min: Option<Limit>, max: Option<Limit>) -> Clamp<Fixed<Limits>> {
    Clamp::from_source(Fixed(Limits::new(min, max)))
}

impl<P, S> Middleware<P> for Clamp<S>
where
    P: CoordsPayload,
    S: Source<P, Limits>,
{
    fn apply(&mut self, mut payload: P) -> P {
        let limits = self.limits.get(&payload);
        let clamped = limits.clamp(payload.coords());
        *payload.coords_mut() = clamped;
        payload
    }
}
