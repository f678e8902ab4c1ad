// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{handle::check, sys, Handle, Result};
use iup_sys::IUP_OPENED;

/// Registers the `webbrowser` class of the `iupweb` module.
pub fn web_browser_open() -> Result<()> {
    match unsafe { sys::IupWebBrowserOpen() } {
        IUP_OPENED => Ok(()),
        code => check("IupWebBrowserOpen", code),
    }
}

/// An embedded browser. Navigate with the `VALUE` attribute; follow loads
/// with `NAVIGATE_CB`, `COMPLETED_CB` and `ERROR_CB`.
pub fn web_browser() -> Result<Handle> {
    Handle::from_new("webbrowser", unsafe { sys::IupWebBrowser() })
}
