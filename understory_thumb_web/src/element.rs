// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element handle and native event conversion.

use kurbo::{Point, Rect};
use smallvec::SmallVec;
use understory_thumb::{BoundingBox, MouseInput, PointerInput, TouchInput, TouchPoint};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, MouseEvent, TouchEvent};

/// The registered thumb element, as seen by middleware.
///
/// Its bounding box is the element's `getBoundingClientRect()`.
#[derive(Clone, Debug, PartialEq)]
pub struct ThumbElement(pub HtmlElement);

impl ThumbElement {
    /// Returns the wrapped element.
    #[must_use]
    pub fn html(&self) -> &HtmlElement {
        &self.0
    }
}

impl BoundingBox for ThumbElement {
    fn bounding_box(&self) -> Rect {
        let r = self.0.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }
}

/// Owned pointer data read out of a DOM event.
#[derive(Clone, Debug)]
pub(crate) enum NativeInput {
    Mouse(MouseInput),
    Touch {
        changed: SmallVec<[TouchPoint; 4]>,
        default_prevented: bool,
    },
}

impl NativeInput {
    /// Reads a `MouseEvent` or `TouchEvent`; anything else yields `None`.
    pub(crate) fn from_event(event: &Event) -> Option<Self> {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            return Some(Self::Mouse(MouseInput {
                button: mouse.button(),
                client: Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y())),
                default_prevented: mouse.default_prevented(),
            }));
        }
        let touch = event.dyn_ref::<TouchEvent>()?;
        let list = touch.changed_touches();
        let changed = (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|t| TouchPoint {
                identifier: t.identifier(),
                client: Point::new(f64::from(t.client_x()), f64::from(t.client_y())),
            })
            .collect();
        Some(Self::Touch {
            changed,
            default_prevented: touch.default_prevented(),
        })
    }

    pub(crate) fn is_mouse(&self) -> bool {
        matches!(self, Self::Mouse(_))
    }

    pub(crate) fn as_input(&self) -> PointerInput<'_> {
        match self {
            Self::Mouse(mouse) => PointerInput::Mouse(*mouse),
            Self::Touch {
                changed,
                default_prevented,
            } => PointerInput::Touch(TouchInput {
                changed,
                default_prevented: *default_prevented,
            }),
        }
    }
}
