// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fires the native callbacks of an element as user input would.
//!
//! Each function looks up the C function pointer stored for the callback
//! and calls it with the C signature of that callback. It returns `None`
//! when no callback is set, and [`Error::SignatureMismatch`] when the bound
//! closure takes other arguments. A [`CallbackReturn::Close`] ends the
//! running main loop, if any.

use super::{api, event_loop, Func};
use crate::{
    callback::{
        ButtonFn, DropFilesFn, FloatFloatFn, IntFn, IntIntFn, ListActionFn, MotionFn, StrFn,
        TextActionFn, WheelFn,
    },
    CallbackReturn, Error, Handle, KeyStatus, MouseButton, Result, Signature,
};
use iup_sys::Ihandle;
use std::{
    ffi::CString,
    mem,
    os::raw::{c_char, c_int},
    ptr,
};

fn fire(
    handle: &Handle,
    name: &str,
    signature: Signature,
    call: impl FnOnce(*mut Ihandle, Func) -> c_int,
) -> Result<Option<CallbackReturn>> {
    let ih = handle.raw()?;
    let c_name = CString::new(name)?;
    let Some(func) = (unsafe { api::IupGetCallback(ih, c_name.as_ptr()) }) else {
        return Ok(None);
    };

    // Only a closure bound through this crate tells what the pointer takes.
    match handle.callback_signature(name) {
        Some(registered) if registered == signature => {}
        Some(registered) => {
            return Err(Error::SignatureMismatch { name: name.to_owned(), registered })
        }
        None => return Err(Error::CallbackNotRegistered { name: name.to_owned() }),
    }

    let code = call(ih, func);
    event_loop::note_return(code);

    Ok(Some(CallbackReturn::from_raw(code).unwrap_or_default()))
}

/// Fires an `int(Ihandle*)` callback.
pub fn call(handle: &Handle, name: &str) -> Result<Option<CallbackReturn>> {
    fire(handle, name, Signature::Plain, |ih, f| unsafe { f(ih) })
}

pub fn call_int(handle: &Handle, name: &str, i: i32) -> Result<Option<CallbackReturn>> {
    fire(handle, name, Signature::Int, |ih, f| unsafe {
        mem::transmute::<Func, IntFn>(f)(ih, i)
    })
}

pub fn call_int_int(handle: &Handle, name: &str, a: i32, b: i32) -> Result<Option<CallbackReturn>> {
    fire(handle, name, Signature::IntInt, |ih, f| unsafe {
        mem::transmute::<Func, IntIntFn>(f)(ih, a, b)
    })
}

pub fn call_float_float(
    handle: &Handle,
    name: &str,
    a: f32,
    b: f32,
) -> Result<Option<CallbackReturn>> {
    fire(handle, name, Signature::FloatFloat, |ih, f| unsafe {
        mem::transmute::<Func, FloatFloatFn>(f)(ih, a, b)
    })
}

pub fn call_str(handle: &Handle, name: &str, s: &str) -> Result<Option<CallbackReturn>> {
    let s = CString::new(s)?;
    fire(handle, name, Signature::Str, |ih, f| unsafe {
        mem::transmute::<Func, StrFn>(f)(ih, s.as_ptr() as *mut c_char)
    })
}

/// Fires `BUTTON_CB`.
pub fn button(
    handle: &Handle,
    button: MouseButton,
    pressed: bool,
    x: i32,
    y: i32,
    status: KeyStatus,
) -> Result<Option<CallbackReturn>> {
    fire(handle, "BUTTON_CB", Signature::Button, |ih, f| unsafe {
        let f = mem::transmute::<Func, ButtonFn>(f);
        f(ih, button.to_raw(), c_int::from(pressed), x, y, status.as_ptr() as *mut c_char)
    })
}

/// Fires `MOTION_CB`.
pub fn motion(handle: &Handle, x: i32, y: i32, status: KeyStatus) -> Result<Option<CallbackReturn>> {
    fire(handle, "MOTION_CB", Signature::Motion, |ih, f| unsafe {
        mem::transmute::<Func, MotionFn>(f)(ih, x, y, status.as_ptr() as *mut c_char)
    })
}

/// Fires `WHEEL_CB`.
pub fn wheel(
    handle: &Handle,
    delta: f32,
    x: i32,
    y: i32,
    status: KeyStatus,
) -> Result<Option<CallbackReturn>> {
    fire(handle, "WHEEL_CB", Signature::Wheel, |ih, f| unsafe {
        mem::transmute::<Func, WheelFn>(f)(ih, delta, x, y, status.as_ptr() as *mut c_char)
    })
}

/// Fires the `ACTION` of a text with the typed character and the value the
/// text would have afterwards.
pub fn text_action(handle: &Handle, c: i32, new_value: Option<&str>) -> Result<Option<CallbackReturn>> {
    let new_value = new_value.map(CString::new).transpose()?;
    let new_value = new_value.as_ref().map_or(ptr::null_mut(), |s| s.as_ptr() as *mut c_char);
    fire(handle, "ACTION", Signature::TextAction, |ih, f| unsafe {
        mem::transmute::<Func, TextActionFn>(f)(ih, c, new_value)
    })
}

/// Fires the `ACTION` of a list for item `item` (1-based).
pub fn list_action(handle: &Handle, text: &str, item: i32, state: i32) -> Result<Option<CallbackReturn>> {
    let text = CString::new(text)?;
    fire(handle, "ACTION", Signature::ListAction, |ih, f| unsafe {
        mem::transmute::<Func, ListActionFn>(f)(ih, text.as_ptr() as *mut c_char, item, state)
    })
}

/// Fires `DROPFILES_CB` once for a dropped file; `num` counts the files
/// still to come.
pub fn drop_files(
    handle: &Handle,
    filename: &str,
    num: i32,
    x: i32,
    y: i32,
) -> Result<Option<CallbackReturn>> {
    let filename = CString::new(filename)?;
    fire(handle, "DROPFILES_CB", Signature::DropFiles, |ih, f| unsafe {
        mem::transmute::<Func, DropFilesFn>(f)(ih, filename.as_ptr() as *mut c_char, num, x, y)
    })
}

/// Clicks a button or menu item.
pub fn click(handle: &Handle) -> Result<Option<CallbackReturn>> {
    call(handle, "ACTION")
}

/// Switches a toggle and fires its `ACTION` with the new state.
pub fn toggle(handle: &Handle, on: bool) -> Result<Option<CallbackReturn>> {
    handle.set_attribute("VALUE", if on { "ON" } else { "OFF" })?;
    call_int(handle, "ACTION", i32::from(on))
}

/// Presses a key while `handle` has the focus. See `iup_sys::K_*`.
pub fn key(handle: &Handle, code: i32) -> Result<Option<CallbackReturn>> {
    call_int(handle, "K_ANY", code)
}

/// Clicks the close box of a dialog. It is hidden unless `CLOSE_CB`
/// returns [`CallbackReturn::Ignore`].
pub fn close(dialog: &Handle) -> Result<Option<CallbackReturn>> {
    let ret = call(dialog, "CLOSE_CB")?;
    if ret != Some(CallbackReturn::Ignore) && dialog.is_alive() {
        dialog.hide()?;
    }

    Ok(ret)
}

/// Messages posted to elements of this thread and not yet delivered.
pub fn pending_messages() -> usize {
    event_loop::pending_messages()
}
