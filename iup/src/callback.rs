// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binding native callbacks to Rust closures.
//!
//! IUP stores one C function pointer per callback name and element. For every
//! supported name and signature there is a monomorphized `extern "C"`
//! trampoline; it finds the closure in the element's own state, converts the
//! arguments and calls it. Nothing that goes wrong in a closure unwinds into
//! C: failures are logged and answered with `IUP_DEFAULT`.

use crate::{handle::Handle, lossy, sys, Error, Result};
use iup_sys::{Ihandle, IUP_CLOSE, IUP_CONTINUE, IUP_DEFAULT, IUP_IGNORE};
use std::{
    ffi::CString,
    fmt, mem,
    os::raw::{c_char, c_double, c_float, c_int, c_void},
    panic::{self, AssertUnwindSafe},
};

/// What a closure tells IUP after handling an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CallbackReturn {
    /// Proceed normally.
    #[default]
    Default,
    /// Suppress the default handling of the event.
    Ignore,
    /// Leave the main loop.
    Close,
    /// Let the parent handle the event too.
    Continue,
}

impl From<CallbackReturn> for c_int {
    fn from(ret: CallbackReturn) -> c_int {
        match ret {
            CallbackReturn::Default => IUP_DEFAULT,
            CallbackReturn::Ignore => IUP_IGNORE,
            CallbackReturn::Close => IUP_CLOSE,
            CallbackReturn::Continue => IUP_CONTINUE,
        }
    }
}

impl CallbackReturn {
    pub fn from_raw(code: c_int) -> Option<Self> {
        match code {
            IUP_DEFAULT => Some(Self::Default),
            IUP_IGNORE => Some(Self::Ignore),
            IUP_CLOSE => Some(Self::Close),
            IUP_CONTINUE => Some(Self::Continue),
            _ => None,
        }
    }
}

/// Mouse button reported by `BUTTON_CB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Button4,
    Button5,
    Other(i32),
}

impl MouseButton {
    pub fn from_raw(button: c_int) -> Self {
        match button {
            iup_sys::IUP_BUTTON1 => Self::Left,
            iup_sys::IUP_BUTTON2 => Self::Middle,
            iup_sys::IUP_BUTTON3 => Self::Right,
            iup_sys::IUP_BUTTON4 => Self::Button4,
            iup_sys::IUP_BUTTON5 => Self::Button5,
            other => Self::Other(other),
        }
    }

    pub fn to_raw(self) -> c_int {
        match self {
            Self::Left => iup_sys::IUP_BUTTON1,
            Self::Middle => iup_sys::IUP_BUTTON2,
            Self::Right => iup_sys::IUP_BUTTON3,
            Self::Button4 => iup_sys::IUP_BUTTON4,
            Self::Button5 => iup_sys::IUP_BUTTON5,
            Self::Other(other) => other,
        }
    }
}

/// One flag of a [`KeyStatus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modifier {
    Shift,
    Control,
    Button1,
    Button2,
    Button3,
    Double,
    Alt,
    Sys,
    Button4,
    Button5,
}

impl Modifier {
    fn slot(self) -> (usize, u8) {
        use iup_sys::*;

        match self {
            Self::Shift => (IUP_STATUS_SHIFT, b'S'),
            Self::Control => (IUP_STATUS_CONTROL, b'C'),
            Self::Button1 => (IUP_STATUS_BUTTON1, b'1'),
            Self::Button2 => (IUP_STATUS_BUTTON2, b'2'),
            Self::Button3 => (IUP_STATUS_BUTTON3, b'3'),
            Self::Double => (IUP_STATUS_DOUBLE, b'D'),
            Self::Alt => (IUP_STATUS_ALT, b'A'),
            Self::Sys => (IUP_STATUS_SYS, b'Y'),
            Self::Button4 => (IUP_STATUS_BUTTON4, b'4'),
            Self::Button5 => (IUP_STATUS_BUTTON5, b'5'),
        }
    }
}

/// Keyboard and mouse state passed to mouse callbacks, one character per flag.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KeyStatus([u8; iup_sys::IUP_STATUS_LEN + 1]);

impl Default for KeyStatus {
    fn default() -> Self {
        let mut raw = [b' '; iup_sys::IUP_STATUS_LEN + 1];
        raw[iup_sys::IUP_STATUS_LEN] = 0;
        Self(raw)
    }
}

impl KeyStatus {
    /// Copies a status string. Short or null strings leave flags cleared.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to a NUL-terminated string.
    pub(crate) unsafe fn from_ptr(ptr: *const c_char) -> Self {
        let mut status = Self::default();
        if ptr.is_null() {
            return status;
        }

        for i in 0..iup_sys::IUP_STATUS_LEN {
            let c = *ptr.add(i) as u8;
            if c == 0 {
                break;
            }
            status.0[i] = c;
        }

        status
    }

    pub fn with(mut self, modifier: Modifier) -> Self {
        let (index, c) = modifier.slot();
        self.0[index] = c;
        self
    }

    pub fn has(&self, modifier: Modifier) -> bool {
        let (index, c) = modifier.slot();
        self.0[index] == c
    }

    pub fn is_shift(&self) -> bool {
        self.has(Modifier::Shift)
    }

    pub fn is_control(&self) -> bool {
        self.has(Modifier::Control)
    }

    pub fn is_alt(&self) -> bool {
        self.has(Modifier::Alt)
    }

    pub fn is_double(&self) -> bool {
        self.has(Modifier::Double)
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0[..iup_sys::IUP_STATUS_LEN]).unwrap_or("")
    }

    pub(crate) fn as_ptr(&self) -> *const c_char {
        self.0.as_ptr().cast()
    }
}

impl fmt::Debug for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeyStatus").field(&self.as_str()).finish()
    }
}

/// The native signature of a callback, minus the leading `Ihandle*`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signature {
    Plain,
    Int,
    IntInt,
    FloatFloat,
    Str,
    Button,
    Motion,
    Wheel,
    TextAction,
    ListAction,
    DropFiles,
    PostMessage,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plain => "int(Ihandle*)",
            Self::Int => "int(Ihandle*, int)",
            Self::IntInt => "int(Ihandle*, int, int)",
            Self::FloatFloat => "int(Ihandle*, float, float)",
            Self::Str => "int(Ihandle*, char*)",
            Self::Button => "int(Ihandle*, int, int, int, int, char*)",
            Self::Motion => "int(Ihandle*, int, int, char*)",
            Self::Wheel => "int(Ihandle*, float, int, int, char*)",
            Self::TextAction => "int(Ihandle*, int, char*)",
            Self::ListAction => "int(Ihandle*, char*, int, int)",
            Self::DropFiles => "int(Ihandle*, char*, int, int, int)",
            Self::PostMessage => "int(Ihandle*, char*, int, double, void*)",
        })
    }
}

/// A closure for one native callback signature.
pub enum Callback {
    /// `ACTION` of buttons and items, `MAP_CB`, `CLOSE_CB`, timer `ACTION_CB`, ...
    Plain(Box<dyn FnMut(&Handle) -> CallbackReturn>),
    /// `ACTION` of toggles (state), `SHOW_CB`, `K_ANY`, `FOCUS_CB`, `SPIN_CB`.
    Int(Box<dyn FnMut(&Handle, i32) -> CallbackReturn>),
    /// `RESIZE_CB` (width, height), `TABCHANGEPOS_CB` (new, old).
    IntInt(Box<dyn FnMut(&Handle, i32, i32) -> CallbackReturn>),
    /// `ACTION` of canvases (scroll position x, y).
    FloatFloat(Box<dyn FnMut(&Handle, f32, f32) -> CallbackReturn>),
    /// `ACTION` of links, `NAVIGATE_CB` and friends of web browsers.
    Str(Box<dyn FnMut(&Handle, &str) -> CallbackReturn>),
    /// `BUTTON_CB`: button, pressed, x, y, status.
    Button(Box<dyn FnMut(&Handle, MouseButton, bool, i32, i32, KeyStatus) -> CallbackReturn>),
    /// `MOTION_CB`: x, y, status.
    Motion(Box<dyn FnMut(&Handle, i32, i32, KeyStatus) -> CallbackReturn>),
    /// `WHEEL_CB`: delta, x, y, status.
    Wheel(Box<dyn FnMut(&Handle, f32, i32, i32, KeyStatus) -> CallbackReturn>),
    /// `ACTION` of texts: typed character and the value after the edit.
    TextAction(Box<dyn FnMut(&Handle, i32, Option<&str>) -> CallbackReturn>),
    /// `ACTION` of lists: item text, item number (1-based), state.
    ListAction(Box<dyn FnMut(&Handle, &str, i32, i32) -> CallbackReturn>),
    /// `DROPFILES_CB`: file name, remaining count, x, y.
    DropFiles(Box<dyn FnMut(&Handle, &str, i32, i32, i32) -> CallbackReturn>),
    /// `POSTMESSAGE_CB`: string, integer and double from [`PostTarget::post`](crate::PostTarget::post).
    PostMessage(Box<dyn FnMut(&Handle, Option<&str>, i32, f64) -> CallbackReturn>),
}

impl Callback {
    pub fn plain(f: impl FnMut(&Handle) -> CallbackReturn + 'static) -> Self {
        Self::Plain(Box::new(f))
    }

    pub fn int(f: impl FnMut(&Handle, i32) -> CallbackReturn + 'static) -> Self {
        Self::Int(Box::new(f))
    }

    pub fn int_int(f: impl FnMut(&Handle, i32, i32) -> CallbackReturn + 'static) -> Self {
        Self::IntInt(Box::new(f))
    }

    pub fn float_float(f: impl FnMut(&Handle, f32, f32) -> CallbackReturn + 'static) -> Self {
        Self::FloatFloat(Box::new(f))
    }

    pub fn str(f: impl FnMut(&Handle, &str) -> CallbackReturn + 'static) -> Self {
        Self::Str(Box::new(f))
    }

    pub fn button(
        f: impl FnMut(&Handle, MouseButton, bool, i32, i32, KeyStatus) -> CallbackReturn + 'static,
    ) -> Self {
        Self::Button(Box::new(f))
    }

    pub fn motion(f: impl FnMut(&Handle, i32, i32, KeyStatus) -> CallbackReturn + 'static) -> Self {
        Self::Motion(Box::new(f))
    }

    pub fn wheel(
        f: impl FnMut(&Handle, f32, i32, i32, KeyStatus) -> CallbackReturn + 'static,
    ) -> Self {
        Self::Wheel(Box::new(f))
    }

    pub fn text_action(
        f: impl FnMut(&Handle, i32, Option<&str>) -> CallbackReturn + 'static,
    ) -> Self {
        Self::TextAction(Box::new(f))
    }

    pub fn list_action(
        f: impl FnMut(&Handle, &str, i32, i32) -> CallbackReturn + 'static,
    ) -> Self {
        Self::ListAction(Box::new(f))
    }

    pub fn drop_files(
        f: impl FnMut(&Handle, &str, i32, i32, i32) -> CallbackReturn + 'static,
    ) -> Self {
        Self::DropFiles(Box::new(f))
    }

    pub fn post_message(
        f: impl FnMut(&Handle, Option<&str>, i32, f64) -> CallbackReturn + 'static,
    ) -> Self {
        Self::PostMessage(Box::new(f))
    }

    pub fn signature(&self) -> Signature {
        match self {
            Self::Plain(_) => Signature::Plain,
            Self::Int(_) => Signature::Int,
            Self::IntInt(_) => Signature::IntInt,
            Self::FloatFloat(_) => Signature::FloatFloat,
            Self::Str(_) => Signature::Str,
            Self::Button(_) => Signature::Button,
            Self::Motion(_) => Signature::Motion,
            Self::Wheel(_) => Signature::Wheel,
            Self::TextAction(_) => Signature::TextAction,
            Self::ListAction(_) => Signature::ListAction,
            Self::DropFiles(_) => Signature::DropFiles,
            Self::PostMessage(_) => Signature::PostMessage,
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback").field(&self.signature()).finish()
    }
}

pub(crate) type PlainFn = unsafe extern "C" fn(*mut Ihandle) -> c_int;
pub(crate) type IntFn = unsafe extern "C" fn(*mut Ihandle, c_int) -> c_int;
pub(crate) type IntIntFn = unsafe extern "C" fn(*mut Ihandle, c_int, c_int) -> c_int;
pub(crate) type FloatFloatFn = unsafe extern "C" fn(*mut Ihandle, c_float, c_float) -> c_int;
pub(crate) type StrFn = unsafe extern "C" fn(*mut Ihandle, *mut c_char) -> c_int;
pub(crate) type ButtonFn =
    unsafe extern "C" fn(*mut Ihandle, c_int, c_int, c_int, c_int, *mut c_char) -> c_int;
pub(crate) type MotionFn = unsafe extern "C" fn(*mut Ihandle, c_int, c_int, *mut c_char) -> c_int;
pub(crate) type WheelFn =
    unsafe extern "C" fn(*mut Ihandle, c_float, c_int, c_int, *mut c_char) -> c_int;
pub(crate) type TextActionFn = unsafe extern "C" fn(*mut Ihandle, c_int, *mut c_char) -> c_int;
pub(crate) type ListActionFn =
    unsafe extern "C" fn(*mut Ihandle, *mut c_char, c_int, c_int) -> c_int;
pub(crate) type DropFilesFn =
    unsafe extern "C" fn(*mut Ihandle, *mut c_char, c_int, c_int, c_int) -> c_int;
pub(crate) type PostMessageFn =
    unsafe extern "C" fn(*mut Ihandle, *mut c_char, c_int, c_double, *mut c_void) -> c_int;
pub(crate) type IdleFn = unsafe extern "C" fn() -> c_int;

trait Named {
    const NAME: &'static str;
}

macro_rules! callback_table {
    ($($marker:ident = $name:literal => [$($sig:ident),+ $(,)?];)+) => {
        $(
            struct $marker;

            impl Named for $marker {
                const NAME: &'static str = $name;
            }
        )+

        /// The trampoline for a supported (name, signature) pair.
        fn resolve(name: &str, signature: Signature) -> Option<(&'static str, PlainFn)> {
            match (name, signature) {
                $($(
                    ($name, Signature::$sig) => {
                        Some(($name, trampoline::<$marker>(signature)))
                    }
                )+)+
                _ => None,
            }
        }

        /// Whether `name` is a callback closures can be bound to.
        fn is_bindable(name: &str) -> bool {
            matches!(name, $($name)|+)
        }
    };
}

callback_table! {
    Action = "ACTION" => [Plain, Int, FloatFloat, Str, TextAction, ListAction];
    ActionCb = "ACTION_CB" => [Plain];
    MapCb = "MAP_CB" => [Plain];
    UnmapCb = "UNMAP_CB" => [Plain];
    DestroyCb = "DESTROY_CB" => [Plain];
    GetFocusCb = "GETFOCUS_CB" => [Plain];
    KillFocusCb = "KILLFOCUS_CB" => [Plain];
    EnterWindowCb = "ENTERWINDOW_CB" => [Plain];
    LeaveWindowCb = "LEAVEWINDOW_CB" => [Plain];
    HelpCb = "HELP_CB" => [Plain];
    CloseCb = "CLOSE_CB" => [Plain];
    ValueChangedCb = "VALUECHANGED_CB" => [Plain];
    HighlightCb = "HIGHLIGHT_CB" => [Plain];
    OpenCb = "OPEN_CB" => [Plain];
    MenuCloseCb = "MENUCLOSE_CB" => [Plain];
    CancelCb = "CANCEL_CB" => [Plain];
    ShowCb = "SHOW_CB" => [Int];
    KAny = "K_ANY" => [Int];
    FocusCb = "FOCUS_CB" => [Int];
    SpinCb = "SPIN_CB" => [Int];
    ResizeCb = "RESIZE_CB" => [IntInt];
    TabChangePosCb = "TABCHANGEPOS_CB" => [IntInt];
    ButtonCb = "BUTTON_CB" => [Button];
    MotionCb = "MOTION_CB" => [Motion];
    WheelCb = "WHEEL_CB" => [Wheel];
    DropFilesCb = "DROPFILES_CB" => [DropFiles];
    PostMessageCb = "POSTMESSAGE_CB" => [PostMessage];
    NavigateCb = "NAVIGATE_CB" => [Str];
    CompletedCb = "COMPLETED_CB" => [Str];
    ErrorCb = "ERROR_CB" => [Str];
}

fn trampoline<N: Named>(signature: Signature) -> PlainFn {
    unsafe {
        match signature {
            Signature::Plain => plain::<N> as PlainFn,
            Signature::Int => mem::transmute::<IntFn, PlainFn>(int::<N>),
            Signature::IntInt => mem::transmute::<IntIntFn, PlainFn>(int_int::<N>),
            Signature::FloatFloat => mem::transmute::<FloatFloatFn, PlainFn>(float_float::<N>),
            Signature::Str => mem::transmute::<StrFn, PlainFn>(string::<N>),
            Signature::Button => mem::transmute::<ButtonFn, PlainFn>(button::<N>),
            Signature::Motion => mem::transmute::<MotionFn, PlainFn>(motion::<N>),
            Signature::Wheel => mem::transmute::<WheelFn, PlainFn>(wheel::<N>),
            Signature::TextAction => mem::transmute::<TextActionFn, PlainFn>(text_action::<N>),
            Signature::ListAction => mem::transmute::<ListActionFn, PlainFn>(list_action::<N>),
            Signature::DropFiles => mem::transmute::<DropFilesFn, PlainFn>(drop_files::<N>),
            Signature::PostMessage => {
                mem::transmute::<PostMessageFn, PlainFn>(post_message::<N>)
            }
        }
    }
}

/// Runs the closure registered under `name` on the element `ih`.
pub(crate) fn dispatch(
    ih: *mut Ihandle,
    name: &'static str,
    call: impl FnOnce(&Handle, &mut Callback) -> Option<CallbackReturn>,
) -> Result<CallbackReturn> {
    let handle = unsafe { Handle::from_callback(ih) }
        .ok_or_else(|| Error::Untracked { name: name.to_owned() })?;
    let mut callback = handle
        .state()
        .take_callback(name)
        .ok_or_else(|| Error::CallbackNotRegistered { name: name.to_owned() })?;
    let registered = callback.signature();

    log::trace!("dispatching {} on {}", name, handle.uuid());
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| call(&handle, &mut callback)));
    handle.state().restore_callback(name, callback);

    match outcome {
        Ok(Some(ret)) => Ok(ret),
        Ok(None) => Err(Error::SignatureMismatch { name: name.to_owned(), registered }),
        Err(_) => Err(Error::CallbackPanicked { name: name.to_owned() }),
    }
}

fn forward<N: Named>(
    ih: *mut Ihandle,
    call: impl FnOnce(&Handle, &mut Callback) -> Option<CallbackReturn>,
) -> c_int {
    match dispatch(ih, N::NAME, call) {
        Ok(ret) => ret.into(),
        Err(e) => {
            log::error!("{}", e);
            IUP_DEFAULT
        }
    }
}

unsafe extern "C" fn plain<N: Named>(ih: *mut Ihandle) -> c_int {
    forward::<N>(ih, |h, cb| match cb {
        Callback::Plain(f) => Some(f(h)),
        _ => None,
    })
}

unsafe extern "C" fn int<N: Named>(ih: *mut Ihandle, a: c_int) -> c_int {
    forward::<N>(ih, |h, cb| match cb {
        Callback::Int(f) => Some(f(h, a)),
        _ => None,
    })
}

unsafe extern "C" fn int_int<N: Named>(ih: *mut Ihandle, a: c_int, b: c_int) -> c_int {
    forward::<N>(ih, |h, cb| match cb {
        Callback::IntInt(f) => Some(f(h, a, b)),
        _ => None,
    })
}

unsafe extern "C" fn float_float<N: Named>(ih: *mut Ihandle, a: c_float, b: c_float) -> c_int {
    forward::<N>(ih, |h, cb| match cb {
        Callback::FloatFloat(f) => Some(f(h, a, b)),
        _ => None,
    })
}

unsafe extern "C" fn string<N: Named>(ih: *mut Ihandle, s: *mut c_char) -> c_int {
    let s = lossy(s).unwrap_or_default();
    forward::<N>(ih, |h, cb| match cb {
        Callback::Str(f) => Some(f(h, &s)),
        _ => None,
    })
}

unsafe extern "C" fn button<N: Named>(
    ih: *mut Ihandle,
    button: c_int,
    pressed: c_int,
    x: c_int,
    y: c_int,
    status: *mut c_char,
) -> c_int {
    let status = KeyStatus::from_ptr(status);
    forward::<N>(ih, |h, cb| match cb {
        Callback::Button(f) => Some(f(h, MouseButton::from_raw(button), pressed != 0, x, y, status)),
        _ => None,
    })
}

unsafe extern "C" fn motion<N: Named>(
    ih: *mut Ihandle,
    x: c_int,
    y: c_int,
    status: *mut c_char,
) -> c_int {
    let status = KeyStatus::from_ptr(status);
    forward::<N>(ih, |h, cb| match cb {
        Callback::Motion(f) => Some(f(h, x, y, status)),
        _ => None,
    })
}

unsafe extern "C" fn wheel<N: Named>(
    ih: *mut Ihandle,
    delta: c_float,
    x: c_int,
    y: c_int,
    status: *mut c_char,
) -> c_int {
    let status = KeyStatus::from_ptr(status);
    forward::<N>(ih, |h, cb| match cb {
        Callback::Wheel(f) => Some(f(h, delta, x, y, status)),
        _ => None,
    })
}

unsafe extern "C" fn text_action<N: Named>(
    ih: *mut Ihandle,
    c: c_int,
    new_value: *mut c_char,
) -> c_int {
    let new_value = lossy(new_value);
    forward::<N>(ih, |h, cb| match cb {
        Callback::TextAction(f) => Some(f(h, c, new_value.as_deref())),
        _ => None,
    })
}

unsafe extern "C" fn list_action<N: Named>(
    ih: *mut Ihandle,
    text: *mut c_char,
    item: c_int,
    state: c_int,
) -> c_int {
    let text = lossy(text).unwrap_or_default();
    forward::<N>(ih, |h, cb| match cb {
        Callback::ListAction(f) => Some(f(h, &text, item, state)),
        _ => None,
    })
}

unsafe extern "C" fn drop_files<N: Named>(
    ih: *mut Ihandle,
    filename: *mut c_char,
    num: c_int,
    x: c_int,
    y: c_int,
) -> c_int {
    let filename = lossy(filename).unwrap_or_default();
    forward::<N>(ih, |h, cb| match cb {
        Callback::DropFiles(f) => Some(f(h, &filename, num, x, y)),
        _ => None,
    })
}

unsafe extern "C" fn post_message<N: Named>(
    ih: *mut Ihandle,
    s: *mut c_char,
    i: c_int,
    d: c_double,
    _p: *mut c_void,
) -> c_int {
    let s = lossy(s);
    forward::<N>(ih, |h, cb| match cb {
        Callback::PostMessage(f) => Some(f(h, s.as_deref(), i, d)),
        _ => None,
    })
}

impl Handle {
    /// Binds `callback` to the native callback `name`, replacing (and
    /// dropping) any closure bound before.
    ///
    /// The closure lives as long as the element: it is dropped when the
    /// element is destroyed.
    pub fn set_callback(&self, name: &str, callback: Callback) -> Result<&Self> {
        let ih = self.raw()?;
        let signature = callback.signature();
        let (name, trampoline) = resolve(name, signature).ok_or_else(|| {
            Error::UnsupportedCallback { name: name.to_owned(), signature }
        })?;
        let c_name = CString::new(name)?;

        let previous = self.state().insert_callback(name, callback);
        unsafe { sys::IupSetCallback(ih, c_name.as_ptr(), Some(trampoline)) };
        drop(previous);

        log::trace!("bound {} on {}", name, self.uuid());
        Ok(self)
    }

    /// Unbinds the closure of the native callback `name`, if any.
    pub fn remove_callback(&self, name: &str) -> Result<&Self> {
        let ih = self.raw()?;
        if !is_bindable(name) {
            return Ok(self);
        }
        let c_name = CString::new(name)?;

        let previous = self.state().remove_callback(name);
        if previous.is_none() {
            // Either unbound already or taken out for a running dispatch.
            self.state().unbind_running(name);
        }
        unsafe { sys::IupSetCallback(ih, c_name.as_ptr(), None) };
        drop(previous);

        Ok(self)
    }

    pub fn has_callback(&self, name: &str) -> bool {
        self.state().signature_of(name).is_some()
    }

    /// The signature of the closure bound to `name`.
    pub fn callback_signature(&self, name: &str) -> Option<Signature> {
        self.state().signature_of(name)
    }
}

thread_local! {
    static IDLE: std::cell::RefCell<Option<Box<dyn FnMut() -> CallbackReturn>>> =
        std::cell::RefCell::new(None);
    /// Set when the idle function is cleared from inside itself.
    static IDLE_CLEARED: std::cell::Cell<bool> = const { std::cell::Cell::new(false) };
}

unsafe extern "C" fn idle_action() -> c_int {
    let Some(mut f) = IDLE.with(|idle| idle.borrow_mut().take()) else {
        log::error!("{}", Error::CallbackNotRegistered { name: "IDLE_ACTION".into() });
        return IUP_DEFAULT;
    };

    IDLE_CLEARED.set(false);
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| f()));
    // IUP drops an idle function that answered IGNORE.
    let unbound = matches!(outcome, Ok(CallbackReturn::Ignore));
    if !IDLE_CLEARED.replace(false) && !unbound {
        IDLE.with(|idle| {
            let mut idle = idle.borrow_mut();
            if idle.is_none() {
                *idle = Some(f);
            }
        });
    }

    match outcome {
        Ok(ret) => ret.into(),
        Err(_) => {
            log::error!("{}", Error::CallbackPanicked { name: "IDLE_ACTION".into() });
            IUP_DEFAULT
        }
    }
}

/// Binds the global idle function of the current thread's main loop.
///
/// Returning [`CallbackReturn::Ignore`] stops the idle calls, as in C;
/// [`CallbackReturn::Close`] leaves the main loop.
pub(crate) fn set_idle(f: Box<dyn FnMut() -> CallbackReturn>) {
    IDLE_CLEARED.set(false);
    let previous = IDLE.with(|idle| idle.borrow_mut().replace(f));
    let func = unsafe { mem::transmute::<IdleFn, PlainFn>(idle_action) };
    unsafe { sys::IupSetFunction(c"IDLE_ACTION".as_ptr(), Some(func)) };
    drop(previous);
}

pub(crate) fn clear_idle() {
    unsafe { sys::IupSetFunction(c"IDLE_ACTION".as_ptr(), None) };
    IDLE_CLEARED.set(true);
    let previous = IDLE.with(|idle| idle.borrow_mut().take());
    drop(previous);
}
