// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dialogs, including the predefined modal ones.

use crate::{lossy, sys, Handle, Result, Rgb};
use std::{
    ffi::CString,
    os::raw::{c_char, c_int},
    ptr,
};

/// Size IUP expects for the in/out buffer of [`get_file`].
const PATH_BUFFER_LEN: usize = 4096;

pub fn dialog(child: Option<&Handle>) -> Result<Handle> {
    let child = child.map_or(Ok(ptr::null_mut()), Handle::raw)?;
    Handle::from_new("dialog", unsafe { sys::IupDialog(child) })
}

/// File open/save dialog. Show it with [`Handle::popup`], then read
/// `STATUS` and `VALUE`.
pub fn file_dlg() -> Result<Handle> {
    Handle::from_new("filedlg", unsafe { sys::IupFileDlg() })
}

pub fn message_dlg() -> Result<Handle> {
    Handle::from_new("messagedlg", unsafe { sys::IupMessageDlg() })
}

pub fn color_dlg() -> Result<Handle> {
    Handle::from_new("colordlg", unsafe { sys::IupColorDlg() })
}

pub fn font_dlg() -> Result<Handle> {
    Handle::from_new("fontdlg", unsafe { sys::IupFontDlg() })
}

pub fn progress_dlg() -> Result<Handle> {
    Handle::from_new("progressdlg", unsafe { sys::IupProgressDlg() })
}

/// Shows a modal message box.
pub fn message(title: &str, msg: &str) -> Result<()> {
    let title = CString::new(title)?;
    let msg = CString::new(msg)?;
    unsafe { sys::IupMessage(title.as_ptr(), msg.as_ptr()) };

    Ok(())
}

pub fn message_error(parent: Option<&Handle>, msg: &str) -> Result<()> {
    let parent = parent.map_or(Ok(ptr::null_mut()), Handle::raw)?;
    let msg = CString::new(msg)?;
    unsafe { sys::IupMessageError(parent, msg.as_ptr()) };

    Ok(())
}

/// Asks a question; `buttons` is one of `"OK"`, `"OKCANCEL"`, `"YESNO"`,
/// `"YESNOCANCEL"`, ... Returns the number of the pressed button.
pub fn message_alarm(parent: Option<&Handle>, title: &str, msg: &str, buttons: &str) -> Result<i32> {
    let parent = parent.map_or(Ok(ptr::null_mut()), Handle::raw)?;
    let title = CString::new(title)?;
    let msg = CString::new(msg)?;
    let buttons = CString::new(buttons)?;

    Ok(unsafe { sys::IupMessageAlarm(parent, title.as_ptr(), msg.as_ptr(), buttons.as_ptr()) })
}

/// Shows up to three buttons and returns the number (1 to 3) of the one
/// pressed.
pub fn alarm(title: &str, msg: &str, b1: &str, b2: Option<&str>, b3: Option<&str>) -> Result<i32> {
    let title = CString::new(title)?;
    let msg = CString::new(msg)?;
    let b1 = CString::new(b1)?;
    let b2 = b2.map(CString::new).transpose()?;
    let b3 = b3.map(CString::new).transpose()?;
    let ptr_of = |s: &Option<CString>| s.as_ref().map_or(ptr::null(), |s| s.as_ptr());

    Ok(unsafe { sys::IupAlarm(title.as_ptr(), msg.as_ptr(), b1.as_ptr(), ptr_of(&b2), ptr_of(&b3)) })
}

/// Whether [`get_file`] picked an existing file or a new name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileChoice {
    Existing,
    New,
}

/// Asks for a file name. `filter` is an initial path or a pattern such as
/// `"*.txt"`. Returns `None` when the dialog is cancelled.
pub fn get_file(filter: &str) -> Result<Option<(String, FileChoice)>> {
    let filter = CString::new(filter)?;
    let mut buffer = vec![0 as c_char; PATH_BUFFER_LEN];
    let bytes = filter.as_bytes_with_nul();
    let len = bytes.len().min(PATH_BUFFER_LEN - 1);
    for (dst, src) in buffer.iter_mut().zip(&bytes[..len]) {
        *dst = *src as c_char;
    }

    let choice = match unsafe { sys::IupGetFile(buffer.as_mut_ptr()) } {
        1 => FileChoice::Existing,
        0 => FileChoice::New,
        _ => return Ok(None),
    };

    Ok(unsafe { lossy(buffer.as_ptr()) }.map(|path| (path.into_owned(), choice)))
}

/// Asks for a line of text of at most `max_len` bytes, starting from
/// `initial`. Returns `None` when cancelled.
pub fn get_text(title: &str, initial: &str, max_len: usize) -> Result<Option<String>> {
    let title = CString::new(title)?;
    let initial = CString::new(initial)?;
    let mut buffer = vec![0 as c_char; max_len.max(initial.as_bytes().len()) + 1];
    for (dst, src) in buffer.iter_mut().zip(initial.as_bytes()) {
        *dst = *src as c_char;
    }

    let max_size = c_int::try_from(buffer.len()).unwrap_or(c_int::MAX);
    if unsafe { sys::IupGetText(title.as_ptr(), buffer.as_mut_ptr(), max_size) } != 1 {
        return Ok(None);
    }

    Ok(unsafe { lossy(buffer.as_ptr()) }.map(|s| s.into_owned()))
}

/// Asks for a color, starting from `initial`. Returns `None` when cancelled.
pub fn get_color(x: i32, y: i32, initial: Rgb) -> Option<Rgb> {
    let Rgb { mut r, mut g, mut b } = initial;
    match unsafe { sys::IupGetColor(x, y, &mut r, &mut g, &mut b) } {
        1 => Some(Rgb::new(r, g, b)),
        _ => None,
    }
}
