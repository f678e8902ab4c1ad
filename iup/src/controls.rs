// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Constructors of the standard controls.
//!
//! The C constructors also take the name of a global action; bind callbacks
//! with [`Handle::set_callback`] instead.

use crate::{sys, Handle, Result};
use std::{ffi::CString, ptr};

/// Creates an element of any registered class by name (`IupCreate`).
pub fn create(class: &str) -> Result<Handle> {
    let c_class = CString::new(class)?;
    let ih = unsafe { sys::IupCreate(c_class.as_ptr()) };

    Handle::from_new(class, ih)
}

pub fn button(title: &str) -> Result<Handle> {
    let title = CString::new(title)?;
    Handle::from_new("button", unsafe { sys::IupButton(title.as_ptr(), ptr::null()) })
}

pub fn label(title: &str) -> Result<Handle> {
    let title = CString::new(title)?;
    Handle::from_new("label", unsafe { sys::IupLabel(title.as_ptr()) })
}

/// A single line text field.
pub fn text() -> Result<Handle> {
    Handle::from_new("text", unsafe { sys::IupText(ptr::null()) })
}

pub fn multi_line() -> Result<Handle> {
    Handle::from_new("multiline", unsafe { sys::IupMultiLine(ptr::null()) })
}

pub fn toggle(title: &str) -> Result<Handle> {
    let title = CString::new(title)?;
    Handle::from_new("toggle", unsafe { sys::IupToggle(title.as_ptr(), ptr::null()) })
}

/// Items are the attributes `"1"`, `"2"`, ...; see [`Handle::set_attribute_id`].
pub fn list() -> Result<Handle> {
    Handle::from_new("list", unsafe { sys::IupList(ptr::null()) })
}

/// A drawing surface. Its `ACTION` receives the scroll position.
pub fn canvas() -> Result<Handle> {
    Handle::from_new("canvas", unsafe { sys::IupCanvas(ptr::null()) })
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    fn as_cstr(self) -> &'static std::ffi::CStr {
        match self {
            Self::Horizontal => c"HORIZONTAL",
            Self::Vertical => c"VERTICAL",
        }
    }
}

/// A slider.
pub fn val(orientation: Orientation) -> Result<Handle> {
    Handle::from_new("val", unsafe { sys::IupVal(orientation.as_cstr().as_ptr()) })
}

pub fn progress_bar() -> Result<Handle> {
    Handle::from_new("progressbar", unsafe { sys::IupProgressBar() })
}

/// A label that opens `url` when clicked, unless its `ACTION` returns
/// something other than [`CallbackReturn::Default`](crate::CallbackReturn).
pub fn link(url: &str, title: &str) -> Result<Handle> {
    let url = CString::new(url)?;
    let title = CString::new(title)?;
    Handle::from_new("link", unsafe { sys::IupLink(url.as_ptr(), title.as_ptr()) })
}

pub fn spin() -> Result<Handle> {
    Handle::from_new("spin", unsafe { sys::IupSpin() })
}

/// Adds spin buttons next to `child`.
pub fn spinbox(child: &Handle) -> Result<Handle> {
    let child = child.raw()?;
    Handle::from_new("spinbox", unsafe { sys::IupSpinbox(child) })
}

pub fn date_pick() -> Result<Handle> {
    Handle::from_new("datepick", unsafe { sys::IupDatePick() })
}

pub fn calendar() -> Result<Handle> {
    Handle::from_new("calendar", unsafe { sys::IupCalendar() })
}

pub fn tree() -> Result<Handle> {
    Handle::from_new("tree", unsafe { sys::IupTree() })
}
