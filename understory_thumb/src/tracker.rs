// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer tracker: follows one contact from press to release.
//!
//! [`PointerTracker`] is the platform-neutral half of a draggable thumb. An
//! adapter owns the native listeners and forwards events as
//! [`PointerInput`]; the tracker decides whether a session starts, pushes
//! finger coordinates through the middleware into its [`PositionStore`], and
//! tells the adapter when move/release listeners are no longer needed.
//!
//! ## Session lifecycle
//!
//! 1) [`press`](PointerTracker::press): ignored while disabled, when the event
//!    was already default-prevented, while a session is active, or for a mouse
//!    button outside the allow-list. The before-start hook may veto.
//! 2) [`track`](PointerTracker::track): feeds the tracked contact's
//!    coordinate through the pipeline. Touches with other identifiers are
//!    ignored.
//! 3) [`release`](PointerTracker::release): commits the final coordinate and
//!    ends the session.
//!
//! [`set_disabled`](PointerTracker::set_disabled) and
//! [`set_element`](PointerTracker::set_element) abandon a running session at
//! its last committed coordinate.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_thumb::{
//!     BoundingBox, MouseInput, PointerInput, PointerTracker, PressOutcome, ReleaseOutcome,
//!     TrackerOptions, buttons,
//! };
//!
//! #[derive(Clone)]
//! struct Handle;
//!
//! impl BoundingBox for Handle {
//!     fn bounding_box(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 10.0, 10.0)
//!     }
//! }
//!
//! fn mouse(x: f64) -> PointerInput<'static> {
//!     PointerInput::Mouse(MouseInput {
//!         button: buttons::PRIMARY,
//!         client: Point::new(x, 0.0),
//!         default_prevented: false,
//!     })
//! }
//!
//! let mut tracker = PointerTracker::<Handle, ()>::new(Point::ZERO, TrackerOptions::default());
//! tracker.set_element(Some(Handle));
//!
//! assert_eq!(tracker.press(&(), mouse(5.0)), PressOutcome::Started);
//! assert_eq!(tracker.track(&(), mouse(25.0)), Some(Point::new(25.0, 0.0)));
//! assert_eq!(tracker.release(&(), mouse(30.0)), ReleaseOutcome::Ended);
//! assert_eq!(tracker.position(), Point::new(30.0, 0.0));
//! ```

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Rect, Vec2};
use smallvec::{SmallVec, smallvec};

use crate::coords::PartialPoint;
use crate::input::{Contact, PointerInput, buttons};
use crate::limits::{Direction, Limit};
use crate::middleware::{CoordsPayload, Middleware, apply_offset};
use crate::position::{PositionOptions, PositionStore};

/// Elements that can report their bounding box in client coordinates.
pub trait BoundingBox {
    /// Returns the element's border box in client coordinates.
    fn bounding_box(&self) -> Rect;
}

/// Where in a session a pipeline invocation happens.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// The press that starts a session.
    Start,
    /// A move of the tracked contact.
    Move,
    /// The release that ends a session.
    End,
    /// A programmatic update outside the pointer flow.
    Manual,
}

/// The payload a [`PointerTracker`] feeds through its middleware.
#[derive(Clone, Debug, PartialEq)]
pub struct DragPayload<E> {
    /// Proposed coordinate.
    pub coords: PartialPoint,
    /// Last committed coordinate.
    pub last: Point,
    /// Phase of this invocation.
    pub phase: DragPhase,
    /// Whether a pointer session is active. Only `Manual` updates can see
    /// `false`.
    pub in_session: bool,
    /// The registered element, if any.
    pub element: Option<E>,
}

impl<E> CoordsPayload for DragPayload<E> {
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

/// Options for a [`PointerTracker`].
#[derive(Clone, Debug, PartialEq)]
pub struct TrackerOptions {
    /// Whether presses are ignored.
    pub disabled: bool,
    /// Direction and limits forwarded to the [`PositionStore`].
    pub position: PositionOptions,
    /// Mouse buttons allowed to start a session.
    pub buttons: SmallVec<[i16; 3]>,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            disabled: false,
            position: PositionOptions::default(),
            buttons: smallvec![buttons::PRIMARY],
        }
    }
}

impl TrackerOptions {
    /// Returns these options with `disabled` replaced.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Returns these options with the direction replaced.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.position.direction = direction;
        self
    }

    /// Returns these options with the lower bound replaced.
    #[must_use]
    pub fn with_min(mut self, min: impl Into<Limit>) -> Self {
        self.position.min = Some(min.into());
        self
    }

    /// Returns these options with the upper bound replaced.
    #[must_use]
    pub fn with_max(mut self, max: impl Into<Limit>) -> Self {
        self.position.max = Some(max.into());
        self
    }

    /// Returns these options with the button allow-list replaced.
    #[must_use]
    pub fn with_buttons(mut self, buttons: impl IntoIterator<Item = i16>) -> Self {
        self.buttons = buttons.into_iter().collect();
        self
    }
}

/// Result of [`PointerTracker::press`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    /// The press did not pass the filters; nothing happened.
    Ignored,
    /// The before-start hook rejected the session.
    Vetoed,
    /// A session started; the adapter should listen for move and release.
    Started,
}

impl PressOutcome {
    /// Returns `true` if the press passed the filters, even if it was vetoed.
    ///
    /// Adapters suppress the default action (text selection) of accepted
    /// mouse presses.
    #[must_use]
    pub fn is_accepted(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Result of [`PointerTracker::release`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// No session, or the event did not carry the tracked contact.
    Ignored,
    /// The session ended; the adapter should stop listening.
    Ended,
}

/// A copy of a [`PointerTracker`]'s observable state.
///
/// Adapters that share a tracker behind a `RefCell` publish this after every
/// call so their getters never have to borrow the tracker.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragStatus {
    /// The committed coordinate.
    pub position: Point,
    /// Offset from where the current move started.
    pub drag_distance: Option<Vec2>,
    /// Whether a session is active.
    pub active: bool,
    /// Whether the active session has processed a move.
    pub dragging: bool,
    /// Whether presses are ignored.
    pub disabled: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Session {
    contact: Contact,
    dragging: bool,
}

/// Hook run on press; returning `false` vetoes the session.
pub type DragStartHook<Ev> = Box<dyn FnMut(&Ev, Point) -> bool>;

/// Hook run on move or release with the raw event and finger coordinate.
pub type DragHook<Ev> = Box<dyn FnMut(&Ev, Point)>;

/// Tracks one pointer contact and drives a [`PositionStore`].
///
/// `E` is the element handle passed to middleware, `Ev` the raw event type
/// handed to the drag hooks.
pub struct PointerTracker<E, Ev> {
    store: PositionStore,
    disabled: bool,
    buttons: SmallVec<[i16; 3]>,
    offset: Option<PartialPoint>,
    middleware: Option<Box<dyn Middleware<DragPayload<E>>>>,
    on_drag_start: Option<DragStartHook<Ev>>,
    on_dragging: Option<DragHook<Ev>>,
    on_drag_end: Option<DragHook<Ev>>,
    element: Option<E>,
    session: Option<Session>,
}

impl<E: fmt::Debug, Ev> fmt::Debug for PointerTracker<E, Ev> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerTracker")
            .field("store", &self.store)
            .field("disabled", &self.disabled)
            .field("buttons", &self.buttons)
            .field("offset", &self.offset)
            .field("element", &self.element)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<E: Clone, Ev> PointerTracker<E, Ev> {
    /// Creates a tracker at `initial` with no element.
    #[must_use]
    pub fn new(initial: Point, options: TrackerOptions) -> Self {
        Self {
            store: PositionStore::with_options(initial, options.position),
            disabled: options.disabled,
            buttons: options.buttons,
            offset: None,
            middleware: None,
            on_drag_start: None,
            on_dragging: None,
            on_drag_end: None,
            element: None,
            session: None,
        }
    }

    /// Returns the current options.
    #[must_use]
    pub fn options(&self) -> TrackerOptions {
        TrackerOptions {
            disabled: self.disabled,
            position: self.store.options(),
            buttons: self.buttons.clone(),
        }
    }

    /// Replaces the options.
    ///
    /// Returns `true` if disabling abandoned a running session.
    pub fn set_options(&mut self, options: TrackerOptions) -> bool {
        self.store.set_options(options.position);
        self.buttons = options.buttons;
        self.set_disabled(options.disabled)
    }

    /// Updates the options in place.
    ///
    /// Returns `true` if disabling abandoned a running session.
    pub fn update_options(&mut self, f: impl FnOnce(&mut TrackerOptions)) -> bool {
        let mut options = self.options();
        f(&mut options);
        self.set_options(options)
    }

    /// Replaces the mouse buttons allowed to start a session.
    pub fn set_buttons(&mut self, buttons: impl IntoIterator<Item = i16>) {
        self.buttons = buttons.into_iter().collect();
    }

    /// Sets the middleware every coordinate passes through.
    pub fn set_middleware(&mut self, middleware: impl Middleware<DragPayload<E>> + 'static) {
        self.middleware = Some(Box::new(middleware));
    }

    /// Removes the middleware.
    pub fn clear_middleware(&mut self) {
        self.middleware = None;
    }

    /// Sets the callback invoked after each committed position change.
    pub fn set_on_change(&mut self, f: impl FnMut(Point) + 'static) {
        self.store.set_on_change(f);
    }

    /// Removes the change callback.
    pub fn clear_on_change(&mut self) {
        self.store.clear_on_change();
    }

    /// Sets the hook run on press. Returning `false` vetoes the session.
    pub fn set_on_drag_start(&mut self, f: impl FnMut(&Ev, Point) -> bool + 'static) {
        self.on_drag_start = Some(Box::new(f));
    }

    /// Sets the hook run for every tracked move.
    pub fn set_on_dragging(&mut self, f: impl FnMut(&Ev, Point) + 'static) {
        self.on_dragging = Some(Box::new(f));
    }

    /// Sets the hook run on release.
    pub fn set_on_drag_end(&mut self, f: impl FnMut(&Ev, Point) + 'static) {
        self.on_drag_end = Some(Box::new(f));
    }

    /// Sets a fixed offset subtracted from every finger coordinate before the
    /// middleware runs.
    pub fn set_offset(&mut self, offset: Option<PartialPoint>) {
        self.offset = offset;
    }

    /// Returns the registered element.
    #[must_use]
    pub fn element(&self) -> Option<&E> {
        self.element.as_ref()
    }

    /// Replaces the registered element.
    ///
    /// Any running session is abandoned and the move on the store is
    /// terminated. Returns `true` if a session was abandoned.
    pub fn set_element(&mut self, element: Option<E>) -> bool {
        let abandoned = self.abandon();
        self.element = element;
        abandoned
    }

    /// Returns whether presses are ignored.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enables or disables the tracker.
    ///
    /// Disabling abandons a running session at its last committed coordinate
    /// without emitting a final position. Returns `true` if a session was
    /// abandoned.
    pub fn set_disabled(&mut self, disabled: bool) -> bool {
        if self.disabled == disabled {
            return false;
        }
        self.disabled = disabled;
        disabled && self.abandon()
    }

    /// Returns `true` while a session is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Returns `true` once the active session has processed a move.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some_and(|s| s.dragging)
    }

    /// Returns the contact of the active session.
    #[must_use]
    pub fn contact(&self) -> Option<Contact> {
        self.session.map(|s| s.contact)
    }

    /// Returns the committed coordinate.
    #[must_use]
    pub fn position(&self) -> Point {
        self.store.position()
    }

    /// Returns the offset from where the current move started.
    #[must_use]
    pub fn drag_distance(&self) -> Option<Vec2> {
        self.store.move_distance()
    }

    /// Returns a copy of the observable state.
    #[must_use]
    pub fn status(&self) -> DragStatus {
        DragStatus {
            position: self.store.position(),
            drag_distance: self.store.move_distance(),
            active: self.session.is_some(),
            dragging: self.is_dragging(),
            disabled: self.disabled,
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &PositionStore {
        &self.store
    }

    /// Updates the position programmatically.
    ///
    /// The candidate passes through the middleware with [`DragPhase::Manual`].
    /// During a session the payload has `in_session` set, so stages holding
    /// per-drag state keep it for the following moves.
    pub fn set_position(
        &mut self,
        candidate: impl Into<PartialPoint>,
        quiet: bool,
    ) -> Option<Point> {
        let coords = self.run_middleware(candidate.into(), DragPhase::Manual);
        self.store.set_position(coords, quiet)
    }

    /// Re-applies the current limits to the committed coordinate.
    pub fn refresh_position(&mut self, quiet: bool) -> Option<Point> {
        self.store.refresh_position(quiet)
    }

    /// Handles a mouse-down or touch-start.
    pub fn press(&mut self, event: &Ev, input: PointerInput<'_>) -> PressOutcome {
        if self.disabled {
            log::trace!("press ignored: disabled");
            return PressOutcome::Ignored;
        }
        if self.session.is_some() {
            log::trace!("press ignored: session already active");
            return PressOutcome::Ignored;
        }
        if input.default_prevented() {
            log::trace!("press ignored: default prevented");
            return PressOutcome::Ignored;
        }
        if let PointerInput::Mouse(mouse) = input
            && !self.buttons.contains(&mouse.button)
        {
            log::trace!("press ignored: button {} not allowed", mouse.button);
            return PressOutcome::Ignored;
        }
        let Some(contact) = input.primary_contact() else {
            return PressOutcome::Ignored;
        };
        let Some(finger) = input.finger(contact) else {
            return PressOutcome::Ignored;
        };

        if let Some(hook) = self.on_drag_start.as_mut()
            && !hook(event, finger)
        {
            log::debug!("drag start vetoed at {finger:?}");
            return PressOutcome::Vetoed;
        }

        self.session = Some(Session {
            contact,
            dragging: false,
        });
        log::debug!("drag session started with {contact:?} at {finger:?}");

        let coords = self.finger_coords(finger, DragPhase::Start);
        self.store.move_to(coords);
        PressOutcome::Started
    }

    /// Handles a mouse-move or touch-move.
    ///
    /// Returns the new coordinate if the move changed it.
    pub fn track(&mut self, event: &Ev, input: PointerInput<'_>) -> Option<Point> {
        let Some(session) = self.session else {
            log::trace!("move ignored: no session");
            return None;
        };
        let Some(finger) = input.finger(session.contact) else {
            log::trace!("move ignored: tracked contact not in event");
            return None;
        };

        if let Some(hook) = self.on_dragging.as_mut() {
            hook(event, finger);
        }

        let coords = self.finger_coords(finger, DragPhase::Move);
        let committed = self.store.move_to(coords);
        if let Some(session) = self.session.as_mut() {
            session.dragging = true;
        }
        committed
    }

    /// Handles a mouse-up or touch-end.
    ///
    /// A touch end that does not carry the tracked contact is ignored and the
    /// session continues.
    pub fn release(&mut self, event: &Ev, input: PointerInput<'_>) -> ReleaseOutcome {
        let Some(session) = self.session else {
            return ReleaseOutcome::Ignored;
        };
        let Some(finger) = input.finger(session.contact) else {
            log::trace!("release ignored: tracked contact not in event");
            return ReleaseOutcome::Ignored;
        };

        if let Some(hook) = self.on_drag_end.as_mut() {
            hook(event, finger);
        }

        let coords = self.finger_coords(finger, DragPhase::End);
        self.store.move_to(coords);
        self.session = None;
        self.store.terminate_move();
        log::debug!("drag session ended at {:?}", self.store.position());
        ReleaseOutcome::Ended
    }

    fn abandon(&mut self) -> bool {
        self.store.terminate_move();
        let abandoned = self.session.take().is_some();
        if abandoned {
            log::debug!("drag session abandoned at {:?}", self.store.position());
        }
        abandoned
    }

    fn finger_coords(&mut self, finger: Point, phase: DragPhase) -> PartialPoint {
        let coords = apply_offset(finger.into(), self.offset);
        self.run_middleware(coords, phase)
    }

    fn run_middleware(&mut self, coords: PartialPoint, phase: DragPhase) -> PartialPoint {
        let Some(middleware) = self.middleware.as_mut() else {
            return coords;
        };
        let payload = DragPayload {
            coords,
            last: self.store.position(),
            phase,
            in_session: self.session.is_some(),
            element: self.element.clone(),
        };
        middleware.apply(payload).coords
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Axis;
    use crate::input::{MouseInput, TouchInput, TouchPoint};
    use crate::middleware::{axis_lock, chain, limit, offset_by_reference};
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};

    #[derive(Clone, Debug, PartialEq)]
    struct Knob;

    impl BoundingBox for Knob {
        fn bounding_box(&self) -> Rect {
            Rect::new(10.0, 10.0, 20.0, 20.0)
        }
    }

    type Tracker = PointerTracker<Knob, ()>;

    fn mouse_button(button: i16, x: f64, y: f64) -> PointerInput<'static> {
        PointerInput::Mouse(MouseInput {
            button,
            client: Point::new(x, y),
            default_prevented: false,
        })
    }

    fn mouse(x: f64, y: f64) -> PointerInput<'static> {
        mouse_button(buttons::PRIMARY, x, y)
    }

    fn touches(changed: &[TouchPoint]) -> PointerInput<'_> {
        PointerInput::Touch(TouchInput {
            changed,
            default_prevented: false,
        })
    }

    fn tp(identifier: i32, x: f64, y: f64) -> TouchPoint {
        TouchPoint {
            identifier,
            client: Point::new(x, y),
        }
    }

    fn omni() -> TrackerOptions {
        TrackerOptions::default().with_direction(Direction::Omnidirectional)
    }

    fn recording(tracker: &mut Tracker) -> Rc<RefCell<Vec<Point>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        tracker.set_on_change(move |p| sink.borrow_mut().push(p));
        log
    }

    #[test]
    fn mouse_session_commits_and_ends() {
        let mut tracker = Tracker::new(Point::ZERO, omni());
        let log = recording(&mut tracker);

        assert_eq!(tracker.press(&(), mouse(5.0, 5.0)), PressOutcome::Started);
        assert!(tracker.is_active());
        assert!(!tracker.is_dragging());

        assert_eq!(tracker.track(&(), mouse(8.0, 9.0)), Some(Point::new(8.0, 9.0)));
        assert!(tracker.is_dragging());
        assert_eq!(tracker.drag_distance(), Some(Vec2::new(8.0, 9.0)));

        assert_eq!(tracker.release(&(), mouse(10.0, 10.0)), ReleaseOutcome::Ended);
        assert!(!tracker.is_active());
        assert_eq!(tracker.drag_distance(), None);
        assert_eq!(
            log.borrow().as_slice(),
            &[Point::new(5.0, 5.0), Point::new(8.0, 9.0), Point::new(10.0, 10.0)]
        );
    }

    #[test]
    fn disallowed_button_never_starts() {
        let mut tracker = Tracker::new(Point::ZERO, omni());
        assert_eq!(
            tracker.press(&(), mouse_button(buttons::SECONDARY, 5.0, 5.0)),
            PressOutcome::Ignored
        );
        assert!(!tracker.is_active());
        assert_eq!(tracker.track(&(), mouse(9.0, 9.0)), None);
        assert_eq!(tracker.position(), Point::ZERO);
    }

    #[test]
    fn custom_button_list() {
        let options = omni().with_buttons([buttons::PRIMARY, buttons::SECONDARY]);
        let mut tracker = Tracker::new(Point::ZERO, options);
        assert_eq!(
            tracker.press(&(), mouse_button(buttons::SECONDARY, 5.0, 5.0)),
            PressOutcome::Started
        );

        let mut tracker = Tracker::new(Point::ZERO, omni());
        tracker.set_buttons([buttons::AUXILIARY]);
        assert_eq!(tracker.press(&(), mouse(5.0, 5.0)), PressOutcome::Ignored);
        assert_eq!(
            tracker.press(&(), mouse_button(buttons::AUXILIARY, 5.0, 5.0)),
            PressOutcome::Started
        );
    }

    #[test]
    fn default_prevented_press_is_ignored() {
        let mut tracker = Tracker::new(Point::ZERO, omni());
        let input = PointerInput::Mouse(MouseInput {
            button: buttons::PRIMARY,
            client: Point::new(1.0, 1.0),
            default_prevented: true,
        });
        assert_eq!(tracker.press(&(), input), PressOutcome::Ignored);
        assert!(!PressOutcome::Ignored.is_accepted());
    }

    #[test]
    fn disabled_tracker_ignores_presses() {
        let mut tracker = Tracker::new(Point::ZERO, omni().with_disabled(true));
        assert_eq!(tracker.press(&(), mouse(1.0, 1.0)), PressOutcome::Ignored);
    }

    #[test]
    fn veto_prevents_session_and_move() {
        let mut tracker = Tracker::new(Point::ZERO, omni());
        let log = recording(&mut tracker);
        tracker.set_on_drag_start(|_, finger| finger.x > 50.0);

        let outcome = tracker.press(&(), mouse(5.0, 5.0));
        assert_eq!(outcome, PressOutcome::Vetoed);
        assert!(outcome.is_accepted());
        assert!(!tracker.is_active());
        assert!(!tracker.store().is_moving());
        assert!(log.borrow().is_empty());

        assert_eq!(tracker.press(&(), mouse(60.0, 5.0)), PressOutcome::Started);
    }

    #[test]
    fn hooks_receive_finger_coordinates() {
        let mut tracker = Tracker::new(Point::ZERO, omni());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (Rc::clone(&seen), Rc::clone(&seen));
        tracker.set_on_dragging(move |_, p| a.borrow_mut().push(("move", p)));
        tracker.set_on_drag_end(move |_, p| b.borrow_mut().push(("end", p)));

        tracker.press(&(), mouse(1.0, 1.0));
        tracker.track(&(), mouse(2.0, 2.0));
        tracker.release(&(), mouse(3.0, 3.0));

        assert_eq!(
            seen.borrow().as_slice(),
            &[("move", Point::new(2.0, 2.0)), ("end", Point::new(3.0, 3.0))]
        );
    }

    #[test]
    fn touch_session_follows_one_identifier() {
        let mut tracker = Tracker::new(Point::ZERO, omni());

        assert_eq!(
            tracker.press(&(), touches(&[tp(4, 1.0, 1.0), tp(5, 50.0, 50.0)])),
            PressOutcome::Started
        );
        assert_eq!(tracker.contact(), Some(Contact::Touch(4)));
        assert_eq!(tracker.position(), Point::new(1.0, 1.0));

        // Another finger moving: ignored.
        assert_eq!(tracker.track(&(), touches(&[tp(5, 60.0, 60.0)])), None);
        assert_eq!(tracker.position(), Point::new(1.0, 1.0));

        // Tracked finger among others.
        assert_eq!(
            tracker.track(&(), touches(&[tp(5, 70.0, 70.0), tp(4, 3.0, 4.0)])),
            Some(Point::new(3.0, 4.0))
        );

        // Another finger lifting does not end the session.
        assert_eq!(
            tracker.release(&(), touches(&[tp(5, 70.0, 70.0)])),
            ReleaseOutcome::Ignored
        );
        assert!(tracker.is_active());

        assert_eq!(
            tracker.release(&(), touches(&[tp(4, 6.0, 6.0)])),
            ReleaseOutcome::Ended
        );
        assert_eq!(tracker.position(), Point::new(6.0, 6.0));
        assert_eq!(tracker.contact(), None);
    }

    #[test]
    fn second_press_during_session_is_ignored() {
        let mut tracker = Tracker::new(Point::ZERO, omni());
        tracker.press(&(), touches(&[tp(1, 1.0, 1.0)]));
        assert_eq!(
            tracker.press(&(), touches(&[tp(2, 9.0, 9.0)])),
            PressOutcome::Ignored
        );
        assert_eq!(tracker.contact(), Some(Contact::Touch(1)));
    }

    #[test]
    fn disabling_mid_drag_abandons_without_final_emit() {
        let mut tracker = Tracker::new(Point::ZERO, omni());
        let log = recording(&mut tracker);

        tracker.press(&(), mouse(1.0, 1.0));
        tracker.track(&(), mouse(4.0, 4.0));
        assert!(tracker.set_disabled(true));

        assert!(!tracker.is_active());
        assert_eq!(tracker.drag_distance(), None);
        assert_eq!(tracker.position(), Point::new(4.0, 4.0));

        // Late events from the abandoned session do nothing.
        assert_eq!(tracker.track(&(), mouse(9.0, 9.0)), None);
        assert_eq!(tracker.release(&(), mouse(9.0, 9.0)), ReleaseOutcome::Ignored);
        assert_eq!(log.borrow().len(), 2);

        // Re-disabling reports nothing new.
        assert!(!tracker.set_disabled(true));
        assert!(!tracker.set_disabled(false));
    }

    #[test]
    fn replacing_element_abandons_session() {
        let mut tracker = Tracker::new(Point::ZERO, omni());
        tracker.set_element(Some(Knob));
        tracker.press(&(), mouse(1.0, 1.0));
        assert!(tracker.set_element(None));
        assert!(tracker.element().is_none());
        assert!(!tracker.store().is_moving());
        // Idempotent.
        assert!(!tracker.set_element(None));
    }

    #[test]
    fn middleware_sees_phases_and_element() {
        let mut tracker = Tracker::new(Point::ZERO, omni());
        tracker.set_element(Some(Knob));
        let phases = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&phases);
        tracker.set_middleware(move |p: DragPayload<Knob>| {
            assert_eq!(p.element, Some(Knob));
            sink.borrow_mut().push(p.phase);
            p
        });

        tracker.press(&(), mouse(1.0, 1.0));
        tracker.track(&(), mouse(2.0, 1.0));
        tracker.release(&(), mouse(3.0, 1.0));
        tracker.set_position(PartialPoint::from_x(0.0), false);

        assert_eq!(
            phases.borrow().as_slice(),
            &[
                DragPhase::Start,
                DragPhase::Move,
                DragPhase::End,
                DragPhase::Manual
            ]
        );
        assert_eq!(tracker.position(), Point::new(0.0, 1.0));
    }

    #[test]
    fn pipeline_locks_and_clamps() {
        let mut tracker = Tracker::new(Point::ZERO, omni());
        tracker.set_middleware(chain(
            axis_lock(Axis::X),
            limit(Some(Limit::Uniform(0.0)), Some(Limit::Uniform(100.0))),
        ));

        tracker.press(&(), mouse(10.0, 40.0));
        assert_eq!(tracker.position(), Point::new(10.0, 0.0));
        tracker.track(&(), mouse(150.0, 40.0));
        assert_eq!(tracker.position(), Point::new(100.0, 0.0));
    }

    #[test]
    fn manual_update_mid_drag_keeps_grab_offset() {
        let mut tracker = Tracker::new(Point::new(10.0, 10.0), omni());
        tracker.set_element(Some(Knob));
        tracker.set_middleware(offset_by_reference());

        // Grabbed 5px into the knob.
        tracker.press(&(), mouse(15.0, 15.0));
        assert_eq!(tracker.track(&(), mouse(40.0, 40.0)), Some(Point::new(35.0, 35.0)));

        // A controlled owner pushes the value back mid-drag.
        assert_eq!(tracker.set_position(Point::new(35.0, 35.0), true), None);
        assert_eq!(tracker.track(&(), mouse(45.0, 45.0)), Some(Point::new(40.0, 40.0)));

        tracker.release(&(), mouse(45.0, 45.0));
        assert_eq!(tracker.set_position(Point::new(0.0, 0.0), true), Some(Point::ZERO));
    }

    #[test]
    fn cleared_middleware_no_longer_runs() {
        let mut tracker = Tracker::new(Point::ZERO, omni());
        tracker.set_middleware(limit(None, Some(Limit::Uniform(10.0))));
        tracker.set_position(Point::new(50.0, 50.0), true);
        assert_eq!(tracker.position(), Point::new(10.0, 10.0));

        tracker.clear_middleware();
        tracker.set_position(Point::new(50.0, 50.0), true);
        assert_eq!(tracker.position(), Point::new(50.0, 50.0));
    }

    #[test]
    fn status_tracks_session() {
        let mut tracker = Tracker::new(Point::ZERO, omni());
        let idle = tracker.status();
        assert_eq!(
            idle,
            DragStatus {
                position: Point::ZERO,
                drag_distance: None,
                active: false,
                dragging: false,
                disabled: false,
            }
        );

        tracker.press(&(), mouse(2.0, 0.0));
        tracker.track(&(), mouse(6.0, 0.0));
        let status = tracker.status();
        assert!(status.active && status.dragging);
        assert_eq!(status.position, Point::new(6.0, 0.0));
        assert_eq!(status.drag_distance, Some(Vec2::new(6.0, 0.0)));

        tracker.set_disabled(true);
        let status = tracker.status();
        assert!(!status.active && status.disabled);
        assert_eq!(status.drag_distance, None);
    }

    #[test]
    fn fixed_offset_applies_before_middleware() {
        let mut tracker = Tracker::new(Point::ZERO, omni());
        tracker.set_offset(Some(PartialPoint::new(5.0, 5.0)));
        let seen = Rc::new(Cell::new(PartialPoint::EMPTY));
        let sink = Rc::clone(&seen);
        tracker.set_middleware(move |p: DragPayload<Knob>| {
            sink.set(p.coords);
            p
        });

        tracker.press(&(), mouse(20.0, 20.0));
        assert_eq!(seen.get(), PartialPoint::new(15.0, 15.0));
        assert_eq!(tracker.position(), Point::new(15.0, 15.0));

        // Manual updates are not finger coordinates.
        tracker.set_position(PartialPoint::new(40.0, 40.0), true);
        assert_eq!(tracker.position(), Point::new(40.0, 40.0));
    }

    #[test]
    fn options_round_trip_through_update() {
        let mut tracker = Tracker::new(Point::ZERO, TrackerOptions::default());
        tracker.press(&(), mouse(1.0, 0.0));
        let abandoned = tracker.update_options(|o| {
            o.disabled = true;
            o.position.max = Some(Limit::Uniform(10.0));
        });
        assert!(abandoned);

        let options = tracker.options();
        assert!(options.disabled);
        assert_eq!(options.position.max, Some(Limit::Uniform(10.0)));
        assert_eq!(options.buttons.as_slice(), &[buttons::PRIMARY]);
    }
}
