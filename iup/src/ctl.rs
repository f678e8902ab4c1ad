// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Additional controls of the `iupcontrols` module.

use crate::{handle::check, sys, Handle, Result};
use iup_sys::IUP_OPENED;
use std::ptr;

pub fn controls_open() -> Result<()> {
    match unsafe { sys::IupControlsOpen() } {
        IUP_OPENED => Ok(()),
        code => check("IupControlsOpen", code),
    }
}

/// A spreadsheet-like grid. Cells are the id2 attributes `"lin:col"`; see
/// [`Handle::set_attribute_id2`].
pub fn matrix() -> Result<Handle> {
    Handle::from_new("matrix", unsafe { sys::IupMatrix(ptr::null()) })
}
