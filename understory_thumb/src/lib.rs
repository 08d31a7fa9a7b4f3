// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_thumb --heading-base-level=0

//! Understory Thumb: a headless draggable thumb.
//!
//! This crate turns raw pointer coordinates into a constrained, application
//! meaningful 2-D position (the "thumb position") and reports every change
//! through a plain callback. It is split into three layers:
//!
//! - [`PositionStore`]: the committed coordinate, direction and min/max
//!   limits, and the move lifecycle used to compute drag distance.
//! - [`middleware`]: composable coordinate transformation stages such as
//!   axis locking, clamping, and offset correction.
//! - [`PointerTracker`]: follows exactly one mouse or touch contact from press
//!   to release and feeds it through the middleware into the store.
//!
//! The crate does not listen to any native events itself. A platform adapter
//! (for example `understory_thumb_web` for the DOM) converts events into
//! [`PointerInput`] and installs or removes move/release listeners according
//! to the [`PressOutcome`] and [`ReleaseOutcome`] it gets back.
//!
//! ## Coordinate pipeline
//!
//! ```text
//! native event -> PointerInput -> finger -> middleware -> PositionStore -> on_change
//! ```
//!
//! The store computes the delta between the (clamped, axis-filtered)
//! candidate and its committed position. A zero delta is a no-op and emits
//! nothing; otherwise the new position is stored and the change callback fires
//! exactly once.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::Point;
//! use understory_thumb::{Direction, Limit, PartialPoint, PositionOptions, PositionStore};
//!
//! let options = PositionOptions::default()
//!     .with_direction(Direction::Omnidirectional)
//!     .with_min(Limit::Uniform(0.0))
//!     .with_max(Limit::Uniform(50.0));
//! let mut store = PositionStore::with_options(Point::ZERO, options);
//!
//! let changes = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&changes);
//! store.set_on_change(move |p| sink.borrow_mut().push(p));
//!
//! store.move_to(Point::new(30.0, 60.0));
//! store.move_to(Point::new(30.0, 50.0));
//! assert_eq!(changes.borrow().as_slice(), &[Point::new(30.0, 50.0)]);
//!
//! // `None` leaves an axis alone; zero is a real value.
//! store.set_position(PartialPoint::from_x(0.0), false);
//! assert_eq!(store.position(), Point::new(0.0, 50.0));
//! ```
//!
//! ## Configuration
//!
//! Plain data settings (`disabled`, direction, limits, the button allow-list)
//! live in [`TrackerOptions`] and [`PositionOptions`], which are `Clone` and
//! comparable. Behavior is installed separately through setters:
//! [`PointerTracker::set_middleware`], [`PointerTracker::set_on_change`] and
//! the drag hooks. Replacing options never drops installed behavior.
//!
//! ## Features
//!
//! - `std` (default): build Kurbo with the standard library.
//! - `libm`: build Kurbo with `libm` for `no_std` targets.
//!
//! This crate is `no_std` compatible (with `alloc`). Diagnostics go through the
//! [`log`] facade; no logger is installed here.

#![no_std]

extern crate alloc;

mod coords;
mod input;
mod limits;
pub mod middleware;
mod position;
mod tracker;

pub use coords::{Axis, PartialPoint, coords_eq};
pub use input::{Contact, MouseInput, PointerInput, TouchInput, TouchPoint, buttons};
pub use limits::{Direction, Limit, Limits, clamp_value};
pub use position::{ChangeCallback, PositionOptions, PositionStore};
pub use tracker::{
    BoundingBox, DragHook, DragPayload, DragPhase, DragStartHook, DragStatus, PointerTracker,
    PressOutcome, ReleaseOutcome, TrackerOptions,
};
