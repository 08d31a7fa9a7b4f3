// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

use crate::coords::PartialPoint;
use crate::middleware::{Fixed, Middleware, Source, apply_offset};
use crate::tracker::{BoundingBox, DragPayload, DragPhase};

/// What [`OffsetByReference`] measures the grab offset against.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Reference {
    /// The dragged element's bounding box.
    #[default]
    Dragged,
    /// An explicit box in client coordinates.
    Rect(Rect),
    /// No offset for this drag.
    Disabled,
}

/// Keeps the grab point under the pointer.
///
/// At [`DragPhase::Start`] the offset is captured as the initial finger
/// coordinate minus the top-left corner of the reference box, and it is then
/// held fixed for the whole drag. A [`DragPhase::Manual`] update outside a
/// session discards it; one made during a drag passes through untouched and
/// the offset stays for the next move. [`DragPhase::End`] discards it after
/// its own tick.
#[derive(Clone, Debug)]
pub struct OffsetByReference<S> {
    reference: S,
    offset: Option<PartialPoint>,
}

impl<S> OffsetByReference<S> {
    /// Creates a stage whose reference is read from `source` at each drag start.
    pub const fn from_source(source: S) -> Self {
        Self {
            reference: source,
            offset: None,
        }
    }

    /// Returns the offset held for the current drag.
    pub fn current_offset(&self) -> Option<PartialPoint> {
        self.offset
    }
}

/// Creates a stage measuring the grab offset against the dragged element.
#[must_use]
pub const fn offset_by_reference() -> OffsetByReference<Fixed<Reference>> {
    OffsetByReference::from_source(Fixed(Reference::Dragged))
}

impl<E, S> Middleware<DragPayload<E>> for OffsetByReference<S>
where
    E: BoundingBox,
    S: Source<DragPayload<E>, Reference>,
{
    fn apply(&mut self, mut payload: DragPayload<E>) -> DragPayload<E> {
        match payload.phase {
            DragPhase::Start => {
                let rect = match self.reference.get(&payload) {
                    Reference::Dragged => payload.element.as_ref().map(BoundingBox::bounding_box),
                    Reference::Rect(rect) => Some(rect),
                    Reference::Disabled => None,
                };
                self.offset = rect.map(|rect| PartialPoint {
                    x: payload.coords.x.map(|x| x - rect.x0),
                    y: payload.coords.y.map(|y| y - rect.y0),
                });
            }
            // Manual candidates are thumb positions, not finger coordinates.
            DragPhase::Manual => {
                if !payload.in_session {
                    self.offset = None;
                }
                return payload;
            }
            DragPhase::Move | DragPhase::End => {}
        }

        payload.coords = apply_offset(payload.coords, self.offset);

        if payload.phase == DragPhase::End {
            self.offset = None;
        }
        payload
    }
}
