// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The OpenGL canvas of the `iupgl` module.

use crate::{sys, Handle, Result};
use std::ptr;

/// Registers the `glcanvas` class. Call once after [`open`](crate::open).
pub fn gl_canvas_open() {
    unsafe { sys::IupGLCanvasOpen() };
}

pub fn gl_canvas() -> Result<Handle> {
    Handle::from_new("glcanvas", unsafe { sys::IupGLCanvas(ptr::null()) })
}

impl Handle {
    /// Makes the canvas' context current for the following GL calls.
    pub fn gl_make_current(&self) -> Result<()> {
        let ih = self.raw()?;
        unsafe { sys::IupGLMakeCurrent(ih) };

        Ok(())
    }

    pub fn gl_is_current(&self) -> Result<bool> {
        let ih = self.raw()?;
        Ok(unsafe { sys::IupGLIsCurrent(ih) } != 0)
    }

    pub fn gl_swap_buffers(&self) -> Result<()> {
        let ih = self.raw()?;
        unsafe { sys::IupGLSwapBuffers(ih) };

        Ok(())
    }
}
