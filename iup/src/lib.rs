// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Safe bindings to [IUP](https://www.tecgraf.puc-rio.br/iup/), the portable
//! user interface toolkit.
//!
//! The API mirrors the C API function for function. Elements are [`Handle`]s,
//! properties are string attributes set through [`AttrValue`], and events are
//! named callbacks bound to Rust closures with [`Handle::set_callback`].
//!
//! ```no_run
//! use iup::{Callback, CallbackReturn};
//!
//! fn main() -> iup::Result<()> {
//!     iup::open()?;
//!
//!     let button = iup::button("Quit")?;
//!     button.set_callback("ACTION", Callback::plain(|_| CallbackReturn::Close))?;
//!
//!     let dialog = iup::dialog(Some(&iup::vbox(&[&button])?))?;
//!     dialog.set_attribute("TITLE", "Hello")?.set_attribute("MARGIN", "10x10")?;
//!     dialog.show_xy(iup::Position::Center, iup::Position::Center)?;
//!
//!     iup::main_loop();
//!     iup::close();
//!     Ok(())
//! }
//! ```
//!
//! # Backends
//!
//! With the `native` feature the crate calls the C library linked by
//! `iup-sys`. Without it, calls go to [`headless`], an in-process
//! implementation of the same C functions that keeps IUP's object model
//! (attributes, callbacks, hierarchy, timers, posted messages, config) but
//! draws nothing.
//!
//! # Threads
//!
//! IUP is single threaded. [`Handle`] is neither `Send` nor `Sync`; the only
//! way to reach the interface thread from a worker is [`PostTarget`].

mod attr;
mod callback;
mod config;
mod containers;
mod controls;
mod dialogs;
mod error;
mod handle;
mod resources;
mod system;

#[cfg(feature = "ctl")]
mod ctl;
#[cfg(feature = "gl")]
mod gl;
#[cfg(feature = "web")]
mod web;

#[cfg(not(feature = "native"))]
pub mod headless;

#[cfg(feature = "native")]
use iup_sys as sys;
#[cfg(not(feature = "native"))]
use headless as sys;

pub use attr::{get_global, set_global, AttrValue, Rgb};
pub use callback::{Callback, CallbackReturn, KeyStatus, Modifier, MouseButton, Signature};
pub use config::Config;
pub use containers::*;
pub use controls::*;
pub use dialogs::*;
pub use error::{Error, Result};
pub use handle::{Handle, Position};
pub use resources::*;
pub use system::*;

#[cfg(feature = "ctl")]
pub use ctl::*;
#[cfg(feature = "gl")]
pub use gl::*;
#[cfg(feature = "web")]
pub use web::*;

pub use iup_sys as ffi;

use std::{borrow::Cow, ffi::CStr, os::raw::c_char};

/// Reads a C string owned by IUP. Invalid UTF-8 is replaced.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string.
pub(crate) unsafe fn lossy<'a>(ptr: *const c_char) -> Option<Cow<'a, str>> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy())
    }
}
