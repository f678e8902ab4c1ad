// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Elements that are not controls: images, menus, timers and the clipboard.

use crate::{sys, Error, Handle, Result};
use iup_sys::Ihandle;
use std::{ffi::CString, os::raw::c_int, ptr};

/// Checks that `pixels` holds exactly `width * height * channels` bytes.
fn image_dims(width: u32, height: u32, channels: usize, pixels: &[u8]) -> Result<(c_int, c_int)> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels));
    let dims = (c_int::try_from(width), c_int::try_from(height));

    match (expected, dims) {
        (Some(expected), (Ok(w), Ok(h))) if expected == pixels.len() && expected > 0 => Ok((w, h)),
        (expected, _) => Err(Error::ImageSize {
            width,
            height,
            expected: expected.unwrap_or(usize::MAX),
            actual: pixels.len(),
        }),
    }
}

/// An image of palette indices, one byte per pixel. Colors are the
/// attributes `"0"` to `"255"`.
pub fn image(width: u32, height: u32, pixels: &[u8]) -> Result<Handle> {
    let (w, h) = image_dims(width, height, 1, pixels)?;
    Handle::from_new("image", unsafe { sys::IupImage(w, h, pixels.as_ptr()) })
}

pub fn image_rgb(width: u32, height: u32, pixels: &[u8]) -> Result<Handle> {
    let (w, h) = image_dims(width, height, 3, pixels)?;
    Handle::from_new("imagergb", unsafe { sys::IupImageRGB(w, h, pixels.as_ptr()) })
}

pub fn image_rgba(width: u32, height: u32, pixels: &[u8]) -> Result<Handle> {
    let (w, h) = image_dims(width, height, 4, pixels)?;
    Handle::from_new("imagergba", unsafe { sys::IupImageRGBA(w, h, pixels.as_ptr()) })
}

pub fn item(title: &str) -> Result<Handle> {
    let title = CString::new(title)?;
    Handle::from_new("item", unsafe { sys::IupItem(title.as_ptr(), ptr::null()) })
}

pub fn submenu(title: &str, menu: Option<&Handle>) -> Result<Handle> {
    let title = CString::new(title)?;
    let menu = menu.map_or(Ok(ptr::null_mut()), Handle::raw)?;
    Handle::from_new("submenu", unsafe { sys::IupSubmenu(title.as_ptr(), menu) })
}

pub fn separator() -> Result<Handle> {
    Handle::from_new("separator", unsafe { sys::IupSeparator() })
}

/// A menu of items, submenus and separators. Attach it to a dialog with
/// `set_attribute("MENU", &menu)`, or show it with [`Handle::popup`].
pub fn menu(children: &[&Handle]) -> Result<Handle> {
    let mut array = children
        .iter()
        .map(|child| child.raw())
        .collect::<Result<Vec<*mut Ihandle>>>()?;
    array.push(ptr::null_mut());

    Handle::from_new("menu", unsafe { sys::IupMenuv(array.as_mut_ptr()) })
}

/// Calls its `ACTION_CB` every `TIME` milliseconds while `RUN` is `YES`.
pub fn timer() -> Result<Handle> {
    Handle::from_new("timer", unsafe { sys::IupTimer() })
}

/// An element with no behavior, useful as an attribute holder.
pub fn user() -> Result<Handle> {
    Handle::from_new("user", unsafe { sys::IupUser() })
}

pub fn clipboard() -> Result<Handle> {
    Handle::from_new("clipboard", unsafe { sys::IupClipboard() })
}
