// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;
use core::mem;

use kurbo::{Point, Vec2};
use understory_thumb::middleware::Middleware;
use understory_thumb::{
    DragPayload, DragStatus, PartialPoint, PointerTracker, PressOutcome, ReleaseOutcome,
    TrackerOptions,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, EventTarget, HtmlElement};

use crate::element::{NativeInput, ThumbElement};

type Handler = Closure<dyn FnMut(Event)>;

/// Listener callbacks, created once per thumb and reused for every
/// registration so the same function objects can be removed again.
struct Handlers {
    mouse_down: Handler,
    touch_start: Handler,
    mouse_move: Handler,
    mouse_up: Handler,
    touch_move: Handler,
    touch_end: Handler,
}

impl Handlers {
    fn new(weak: &Weak<Shared>) -> Self {
        Self {
            mouse_down: handler(weak, Shared::on_press),
            touch_start: handler(weak, Shared::on_press),
            mouse_move: handler(weak, Shared::on_move),
            mouse_up: handler(weak, Shared::on_release),
            touch_move: handler(weak, Shared::on_move),
            touch_end: handler(weak, Shared::on_release),
        }
    }
}

fn handler(weak: &Weak<Shared>, f: fn(&Shared, &Event)) -> Handler {
    let weak = weak.clone();
    Closure::wrap(Box::new(move |event: Event| {
        if let Some(shared) = weak.upgrade() {
            f(&shared, &event);
        }
    }) as Box<dyn FnMut(Event)>)
}

fn listen(target: &EventTarget, kind: &str, handler: &Handler) -> Result<(), JsValue> {
    target.add_event_listener_with_callback(kind, handler.as_ref().unchecked_ref())
}

fn unlisten(target: &EventTarget, kind: &str, handler: &Handler) -> Result<(), JsValue> {
    target.remove_event_listener_with_callback(kind, handler.as_ref().unchecked_ref())
}

struct Shared {
    tracker: RefCell<PointerTracker<ThumbElement, Event>>,
    // Copies of the tracker's state for the getters, refreshed after each
    // tracker call. Hooks run while `tracker` is mutably borrowed.
    status: Cell<DragStatus>,
    options: RefCell<TrackerOptions>,
    element: RefCell<Option<HtmlElement>>,
    pending: Rc<RefCell<Vec<Point>>>,
    on_change: RefCell<Option<Box<dyn FnMut(Point)>>>,
    notifying: Cell<bool>,
    document: RefCell<Option<Document>>,
    handlers: Handlers,
}

impl Shared {
    fn publish(&self) {
        let tracker = self.tracker.borrow();
        self.status.set(tracker.status());
        *self.options.borrow_mut() = tracker.options();
        *self.element.borrow_mut() = tracker.element().map(|e| e.html().clone());
    }

    fn on_press(&self, event: &Event) {
        let Some(native) = NativeInput::from_event(event) else {
            return;
        };
        let outcome = self.tracker.borrow_mut().press(event, native.as_input());
        if outcome.is_accepted() && native.is_mouse() {
            event.prevent_default();
        }
        if outcome == PressOutcome::Started
            && let Err(err) = self.listen_document(native.is_mouse())
        {
            log::warn!("failed to install drag listeners: {err:?}");
        }
        self.publish();
        self.flush();
    }

    fn on_move(&self, event: &Event) {
        let Some(native) = NativeInput::from_event(event) else {
            return;
        };
        self.tracker.borrow_mut().track(event, native.as_input());
        self.publish();
        self.flush();
    }

    fn on_release(&self, event: &Event) {
        let Some(native) = NativeInput::from_event(event) else {
            return;
        };
        let outcome = self.tracker.borrow_mut().release(event, native.as_input());
        if outcome == ReleaseOutcome::Ended
            && let Err(err) = self.unlisten_document()
        {
            log::warn!("failed to remove drag listeners: {err:?}");
        }
        self.publish();
        self.flush();
    }

    fn owner_document(&self) -> Option<Document> {
        let tracker = self.tracker.borrow();
        tracker
            .element()
            .and_then(|element| element.html().owner_document())
            .or_else(|| web_sys::window().and_then(|window| window.document()))
    }

    fn listen_document(&self, mouse: bool) -> Result<(), JsValue> {
        let document = self
            .owner_document()
            .ok_or_else(|| JsValue::from_str("thumb element has no document"))?;
        let h = &self.handlers;
        *self.document.borrow_mut() = Some(document.clone());
        if mouse {
            listen(&document, "mousemove", &h.mouse_move)?;
            listen(&document, "mouseup", &h.mouse_up)
        } else {
            listen(&document, "touchmove", &h.touch_move)?;
            listen(&document, "touchend", &h.touch_end)
        }
    }

    /// Removes every document listener; returns the first error.
    fn unlisten_document(&self) -> Result<(), JsValue> {
        let Some(document) = self.document.borrow_mut().take() else {
            return Ok(());
        };
        let h = &self.handlers;
        unlisten(&document, "mousemove", &h.mouse_move)
            .and(unlisten(&document, "mouseup", &h.mouse_up))
            .and(unlisten(&document, "touchmove", &h.touch_move))
            .and(unlisten(&document, "touchend", &h.touch_end))
    }

    fn unregister_element(&self) -> Result<(), JsValue> {
        let previous = {
            let mut tracker = self.tracker.borrow_mut();
            let previous = tracker.element().cloned();
            tracker.set_element(None);
            previous
        };
        self.publish();
        let mut result = self.unlisten_document();
        if let Some(element) = previous {
            let h = &self.handlers;
            result = result
                .and(unlisten(element.html(), "mousedown", &h.mouse_down))
                .and(unlisten(element.html(), "touchstart", &h.touch_start));
        }
        result
    }

    fn register_element(&self, element: HtmlElement) -> Result<(), JsValue> {
        self.unregister_element()?;
        let h = &self.handlers;
        self.tracker
            .borrow_mut()
            .set_element(Some(ThumbElement(element.clone())));
        self.publish();
        let added = listen(&element, "mousedown", &h.mouse_down)
            .and_then(|()| listen(&element, "touchstart", &h.touch_start));
        if added.is_err() {
            // Best effort; the add error is the one worth reporting.
            let _ = self.unregister_element();
        }
        added
    }

    /// Delivers queued position changes to the user callback.
    ///
    /// Changes raised while the callback runs are delivered by the outer
    /// call before it returns.
    fn flush(&self) {
        if self.notifying.get() {
            return;
        }
        let callback = self.on_change.borrow_mut().take();
        let Some(mut callback) = callback else {
            self.pending.borrow_mut().clear();
            return;
        };
        self.notifying.set(true);
        loop {
            let batch = mem::take(&mut *self.pending.borrow_mut());
            if batch.is_empty() {
                break;
            }
            for position in batch {
                callback(position);
            }
        }
        self.notifying.set(false);
        let mut slot = self.on_change.borrow_mut();
        if slot.is_none() {
            *slot = Some(callback);
        }
    }
}

/// A draggable thumb bound to a DOM element.
///
/// Press listeners (`mousedown`, `touchstart`) live on the registered element.
/// While a drag is running, move and release listeners live on the element's
/// owning document so the drag continues outside the element.
///
/// Hooks and middleware may call the getters of the same `WebThumb`; they see
/// the state from before the event. Setters must not be called from hooks or
/// middleware. The change callback runs after every internal borrow is
/// released and may call anything.
///
/// Dropping the thumb removes every listener it installed.
pub struct WebThumb {
    shared: Rc<Shared>,
}

impl fmt::Debug for WebThumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebThumb")
            .field("status", &self.shared.status.get())
            .field("element", &*self.shared.element.borrow())
            .finish_non_exhaustive()
    }
}

impl WebThumb {
    /// Creates a thumb at `initial` with no element registered.
    #[must_use]
    pub fn new(initial: Point, options: TrackerOptions) -> Self {
        let pending = Rc::new(RefCell::new(Vec::new()));
        let mut tracker = PointerTracker::new(initial, options);
        let sink = Rc::clone(&pending);
        tracker.set_on_change(move |p| sink.borrow_mut().push(p));

        let status = tracker.status();
        let current = tracker.options();
        let shared = Rc::new_cyclic(|weak| Shared {
            tracker: RefCell::new(tracker),
            status: Cell::new(status),
            options: RefCell::new(current),
            element: RefCell::new(None),
            pending,
            on_change: RefCell::new(None),
            notifying: Cell::new(false),
            document: RefCell::new(None),
            handlers: Handlers::new(weak),
        });
        Self { shared }
    }

    /// Creates a thumb and registers `element`.
    pub fn with_element(
        initial: Point,
        options: TrackerOptions,
        element: HtmlElement,
    ) -> Result<Self, JsValue> {
        let thumb = Self::new(initial, options);
        thumb.register_element(element)?;
        Ok(thumb)
    }

    /// Registers `element` as the drag handle, replacing any previous one.
    ///
    /// A running drag on the previous element is abandoned.
    pub fn register_element(&self, element: HtmlElement) -> Result<(), JsValue> {
        self.shared.register_element(element)
    }

    /// Removes the element and every listener the thumb installed.
    ///
    /// All removals are attempted even if one fails; the first error is
    /// returned.
    pub fn unregister_element(&self) -> Result<(), JsValue> {
        self.shared.unregister_element()
    }

    /// Returns the registered element.
    #[must_use]
    pub fn element(&self) -> Option<HtmlElement> {
        self.shared.element.borrow().clone()
    }

    /// Returns the current options.
    #[must_use]
    pub fn options(&self) -> TrackerOptions {
        self.shared.options.borrow().clone()
    }

    /// Replaces the options; disabling ends a running drag.
    pub fn set_options(&self, options: TrackerOptions) -> Result<(), JsValue> {
        let abandoned = self.shared.tracker.borrow_mut().set_options(options);
        self.shared.publish();
        if abandoned {
            self.shared.unlisten_document()?;
        }
        Ok(())
    }

    /// Enables or disables the thumb; disabling ends a running drag.
    pub fn set_disabled(&self, disabled: bool) -> Result<(), JsValue> {
        let abandoned = self.shared.tracker.borrow_mut().set_disabled(disabled);
        self.shared.publish();
        if abandoned {
            self.shared.unlisten_document()?;
        }
        Ok(())
    }

    /// Returns whether presses are ignored.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.shared.status.get().disabled
    }

    /// Sets the middleware every coordinate passes through.
    pub fn set_middleware(&self, middleware: impl Middleware<DragPayload<ThumbElement>> + 'static) {
        self.shared.tracker.borrow_mut().set_middleware(middleware);
    }

    /// Sets the callback invoked after each committed position change.
    pub fn set_on_change(&self, f: impl FnMut(Point) + 'static) {
        *self.shared.on_change.borrow_mut() = Some(Box::new(f));
    }

    /// Sets the hook run on press. Returning `false` vetoes the drag.
    pub fn set_on_drag_start(&self, f: impl FnMut(&Event, Point) -> bool + 'static) {
        self.shared.tracker.borrow_mut().set_on_drag_start(f);
    }

    /// Sets the hook run for every tracked move.
    pub fn set_on_dragging(&self, f: impl FnMut(&Event, Point) + 'static) {
        self.shared.tracker.borrow_mut().set_on_dragging(f);
    }

    /// Sets the hook run on release.
    pub fn set_on_drag_end(&self, f: impl FnMut(&Event, Point) + 'static) {
        self.shared.tracker.borrow_mut().set_on_drag_end(f);
    }

    /// Sets a fixed offset subtracted from every finger coordinate.
    pub fn set_offset(&self, offset: Option<PartialPoint>) {
        self.shared.tracker.borrow_mut().set_offset(offset);
    }

    /// Returns the committed coordinate.
    #[must_use]
    pub fn position(&self) -> Point {
        self.shared.status.get().position
    }

    /// Updates the position programmatically.
    pub fn set_position(&self, candidate: impl Into<PartialPoint>, quiet: bool) -> Option<Point> {
        let committed = self
            .shared
            .tracker
            .borrow_mut()
            .set_position(candidate, quiet);
        self.shared.publish();
        self.shared.flush();
        committed
    }

    /// Returns the offset from where the current drag started.
    #[must_use]
    pub fn drag_distance(&self) -> Option<Vec2> {
        self.shared.status.get().drag_distance
    }

    /// Returns `true` once the running drag has processed a move.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.shared.status.get().dragging
    }
}

impl Drop for WebThumb {
    fn drop(&mut self) {
        if let Err(err) = self.shared.unregister_element() {
            log::warn!("failed to remove thumb listeners: {err:?}");
        }
    }
}
