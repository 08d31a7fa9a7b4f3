// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_thumb_web --heading-base-level=0

//! DOM adapter for [`understory_thumb`].
//!
//! This crate binds a [`PointerTracker`](understory_thumb::PointerTracker) to
//! an `HtmlElement` when targeting `wasm32`. It installs `mousedown` and
//! `touchstart` on the element, and for the length of a drag `mousemove` /
//! `mouseup` or `touchmove` / `touchend` on the element's owning document.
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn make_slider(
//!     handle: web_sys::HtmlElement,
//! ) -> Result<understory_thumb_web::WebThumb, wasm_bindgen::JsValue> {
//!     use kurbo::Point;
//!     use understory_thumb::{Limit, TrackerOptions};
//!
//!     let options = TrackerOptions::default()
//!         .with_min(Limit::Uniform(0.0))
//!         .with_max(Limit::Uniform(200.0));
//!     let thumb = understory_thumb_web::WebThumb::with_element(Point::ZERO, options, handle)?;
//!     thumb.set_middleware(understory_thumb::middleware::offset_by_reference());
//!     thumb.set_on_change(|p| log::info!("thumb at {p:?}"));
//!     Ok(thumb)
//! }
//! ```
//!
//! Notes:
//! - Accepted mouse presses call `preventDefault` to suppress text selection.
//! - Listener failures inside event handlers are reported with `log::warn!`.
//! - On other targets this crate is empty.

#![no_std]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

#[cfg(target_arch = "wasm32")]
mod element;
#[cfg(target_arch = "wasm32")]
mod thumb;

#[cfg(target_arch = "wasm32")]
pub use element::ThumbElement;
#[cfg(target_arch = "wasm32")]
pub use thumb::WebThumb;
