// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::callback::Signature;
use std::ffi::NulError;

/// Errors raised at the boundary between Rust and IUP.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The element behind a [`Handle`](crate::Handle) was destroyed.
    #[error("element was already destroyed")]
    Destroyed,

    #[error("string contains an interior NUL byte")]
    Nul(#[from] NulError),

    /// A constructor returned a null element. Usually IUP is not open, or the
    /// module providing the class was not opened.
    #[error("IUP could not create a `{class}` element")]
    Create { class: String },

    /// An IUP function reported failure through its status return.
    #[error("{op} failed with status {code}")]
    Status { op: &'static str, code: i32 },

    #[error("callback {name} does not accept the {signature} signature")]
    UnsupportedCallback { name: String, signature: Signature },

    #[error("no closure is registered for callback {name}")]
    CallbackNotRegistered { name: String },

    #[error("callback {name} was registered with the {registered} signature")]
    SignatureMismatch { name: String, registered: Signature },

    #[error("closure for callback {name} panicked")]
    CallbackPanicked { name: String },

    /// A callback fired on an element that never went through this crate.
    #[error("{name} fired on an element unknown to this crate")]
    Untracked { name: String },

    /// Attributes starting with `_IUPRS_` hold this crate's own state.
    #[error("attribute {name} is reserved")]
    Reserved { name: String },

    #[error("image of {width}x{height} needs {expected} bytes of pixels, got {actual}")]
    ImageSize { width: u32, height: u32, expected: usize, actual: usize },

    #[error("attribute {name} holds {value:?}, which is not a valid value")]
    InvalidValue { name: String, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
