// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform-neutral pointer input.
//!
//! Adapters convert native mouse and touch events into [`PointerInput`]
//! before handing them to a [`PointerTracker`](crate::PointerTracker).

use kurbo::Point;

/// Mouse button codes, as reported by DOM `MouseEvent.button`.
pub mod buttons {
    /// The primary button, usually the left one.
    pub const PRIMARY: i16 = 0;
    /// The auxiliary button, usually the wheel or middle button.
    pub const AUXILIARY: i16 = 1;
    /// The secondary button, usually the right one.
    pub const SECONDARY: i16 = 2;
}

/// One touch contact from a touch event's changed-touches list.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchPoint {
    /// Identifier stable for the lifetime of the contact.
    pub identifier: i32,
    /// Position in client coordinates.
    pub client: Point,
}

/// A mouse press, move or release.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MouseInput {
    /// Button that changed state; only consulted on press.
    pub button: i16,
    /// Position in client coordinates.
    pub client: Point,
    /// Whether another handler already called `preventDefault`.
    pub default_prevented: bool,
}

/// A touch start, move or end.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchInput<'a> {
    /// The contacts that changed in this event.
    pub changed: &'a [TouchPoint],
    /// Whether another handler already called `preventDefault`.
    pub default_prevented: bool,
}

/// A pointer event from either input family.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerInput<'a> {
    /// Mouse input.
    Mouse(MouseInput),
    /// Touch input.
    Touch(TouchInput<'a>),
}

/// The contact a session follows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Contact {
    /// The mouse.
    Mouse,
    /// The touch with this identifier.
    Touch(i32),
}

impl PointerInput<'_> {
    /// Returns whether the event's default action was already prevented.
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        match self {
            Self::Mouse(m) => m.default_prevented,
            Self::Touch(t) => t.default_prevented,
        }
    }

    /// Returns the contact a press with this input would start tracking.
    ///
    /// For touch input this is the first changed touch; a touch event with
    /// no changed touches yields `None`.
    #[must_use]
    pub fn primary_contact(&self) -> Option<Contact> {
        match self {
            Self::Mouse(_) => Some(Contact::Mouse),
            Self::Touch(t) => t.changed.first().map(|touch| Contact::Touch(touch.identifier)),
        }
    }

    /// Extracts the finger coordinate for `contact`.
    ///
    /// Touch input is scanned for the tracked identifier. Input from the other
    /// family than `contact` yields `None`.
    #[must_use]
    pub fn finger(&self, contact: Contact) -> Option<Point> {
        match (self, contact) {
            (Self::Mouse(m), Contact::Mouse) => Some(m.client),
            (Self::Touch(t), Contact::Touch(id)) => t
                .changed
                .iter()
                .find(|touch| touch.identifier == id)
                .map(|touch| touch.client),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOUCHES: [TouchPoint; 2] = [
        TouchPoint {
            identifier: 7,
            client: Point::new(1.0, 2.0),
        },
        TouchPoint {
            identifier: 9,
            client: Point::new(3.0, 4.0),
        },
    ];

    fn touch(changed: &[TouchPoint]) -> PointerInput<'_> {
        PointerInput::Touch(TouchInput {
            changed,
            default_prevented: false,
        })
    }

    #[test]
    fn mouse_finger_reads_client_position() {
        let input = PointerInput::Mouse(MouseInput {
            button: buttons::PRIMARY,
            client: Point::new(5.0, 6.0),
            default_prevented: false,
        });
        assert_eq!(input.primary_contact(), Some(Contact::Mouse));
        assert_eq!(input.finger(Contact::Mouse), Some(Point::new(5.0, 6.0)));
        assert_eq!(input.finger(Contact::Touch(0)), None);
    }

    #[test]
    fn touch_finger_matches_identifier() {
        let input = touch(&TOUCHES);
        assert_eq!(input.primary_contact(), Some(Contact::Touch(7)));
        assert_eq!(input.finger(Contact::Touch(9)), Some(Point::new(3.0, 4.0)));
        assert_eq!(input.finger(Contact::Touch(1)), None);
        assert_eq!(input.finger(Contact::Mouse), None);
    }

    #[test]
    fn empty_touch_list_has_no_contact() {
        assert_eq!(touch(&[]).primary_contact(), None);
    }
}
