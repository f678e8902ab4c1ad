// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{callback, lossy, sys, CallbackReturn, Error, Handle, Result};
use iup_sys::{Ihandle, IUP_CLOSE, IUP_NOERROR, IUP_OPENED};
use std::{ffi::CString, ptr};

/// Outcome of a successful [`open`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenStatus {
    Opened,
    AlreadyOpen,
}

/// Initializes IUP. Must be called before any element is created.
pub fn open() -> Result<OpenStatus> {
    match unsafe { sys::IupOpen(ptr::null_mut(), ptr::null_mut()) } {
        IUP_NOERROR => {
            log::debug!("IUP {} opened", version());
            Ok(OpenStatus::Opened)
        }
        IUP_OPENED => Ok(OpenStatus::AlreadyOpen),
        code => Err(Error::Status { op: "IupOpen", code }),
    }
}

/// Destroys every remaining element and shuts IUP down.
pub fn close() {
    callback::clear_idle();
    unsafe { sys::IupClose() };
}

pub fn version() -> String {
    unsafe { lossy(sys::IupVersion()) }
        .map(|s| s.into_owned())
        .unwrap_or_default()
}

/// The version as `major * 100000 + minor * 100 + micro`.
pub fn version_number() -> i32 {
    unsafe { sys::IupVersionNumber() }
}

/// Runs the event loop until a callback returns [`CallbackReturn::Close`],
/// [`exit_loop`] is called or the last visible dialog is hidden.
pub fn main_loop() {
    unsafe { sys::IupMainLoop() };
}

/// Whether the loop should keep going after a [`loop_step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Close,
}

impl Step {
    fn from_raw(code: i32) -> Self {
        if code == IUP_CLOSE {
            Self::Close
        } else {
            Self::Continue
        }
    }
}

/// Processes pending events without waiting for new ones.
pub fn loop_step() -> Step {
    Step::from_raw(unsafe { sys::IupLoopStep() })
}

/// Processes pending events, waiting for one if there is none.
pub fn loop_step_wait() -> Step {
    Step::from_raw(unsafe { sys::IupLoopStepWait() })
}

/// Depth of nested main loops, counting popups.
pub fn main_loop_level() -> i32 {
    unsafe { sys::IupMainLoopLevel() }
}

pub fn exit_loop() {
    unsafe { sys::IupExitLoop() };
}

/// Processes every pending event and returns.
pub fn flush() {
    unsafe { sys::IupFlush() };
}

/// Calls `f` whenever the main loop has nothing else to do.
///
/// Returning [`CallbackReturn::Ignore`] unbinds it; [`CallbackReturn::Close`]
/// leaves the loop.
pub fn set_idle(f: impl FnMut() -> CallbackReturn + 'static) {
    callback::set_idle(Box::new(f));
}

pub fn clear_idle() {
    callback::clear_idle();
}

pub fn get_focus() -> Option<Handle> {
    unsafe { Handle::from_raw(sys::IupGetFocus()) }
}

/// Finds an element by the global name given with [`Handle::set_name`].
pub fn get_handle(name: &str) -> Result<Option<Handle>> {
    let name = CString::new(name)?;
    Ok(unsafe { Handle::from_raw(sys::IupGetHandle(name.as_ptr())) })
}

/// Names an element for [`PostTarget::post`] from any thread.
///
/// Holds only the address of the element. Posting after the element was
/// destroyed is undefined in native IUP, while the headless backend drops
/// such messages; keep the element alive until the worker is done.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PostTarget {
    addr: usize,
}

impl PostTarget {
    pub(crate) fn new(ih: *mut Ihandle) -> Self {
        Self { addr: ih as usize }
    }

    /// Queues a call to the element's `POSTMESSAGE_CB` on the thread running
    /// the main loop. The string is copied.
    pub fn post(&self, s: Option<&str>, i: i32, d: f64) -> Result<()> {
        let s = s.map(CString::new).transpose()?;
        let s = s.as_ref().map_or(ptr::null(), |s| s.as_ptr());
        unsafe { sys::IupPostMessage(self.addr as *mut Ihandle, s, i, d, ptr::null_mut()) };

        Ok(())
    }
}
