// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An in-process stand-in for the IUP C library.
//!
//! Used when the `native` feature is off. The functions keep the names and
//! signatures of the C API and implement IUP's object model: elements with a
//! class, string and pointer attributes, callbacks stored as C function
//! pointers, the child tree, global names, focus, timers, posted messages
//! and config files. Nothing is drawn.
//!
//! Elements live in thread-local tables, so every thread behaves like a
//! separate process that must call [`IupOpen`] itself. Posted messages go
//! through a process-wide queue and are delivered by the thread owning the
//! target element.
//!
//! Modal predefined dialogs answer immediately: [`IupAlarm`] and
//! [`IupMessageAlarm`] pick the first button, the input dialogs are
//! cancelled. Use [`simulate`] to fire callbacks the way user input would.

#![allow(non_snake_case)]

mod api;
mod config;
mod event_loop;
pub mod simulate;

pub use api::*;
pub use config::*;
pub use event_loop::*;

use iup_sys::Ihandle;
use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap, HashSet},
    ffi::{CStr, CString},
    os::raw::{c_char, c_int},
    time::{Duration, Instant},
};

/// A callback as IUP stores it, before casting to its real signature.
pub(crate) type Func = unsafe extern "C" fn(*mut Ihandle) -> c_int;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Children {
    None,
    One,
    Two,
    Many,
}

pub(crate) struct Class {
    pub(crate) name: &'static CStr,
    pub(crate) children: Children,
    /// Top level element that can be shown and popped up.
    pub(crate) dialog: bool,
}

const fn class(name: &'static CStr, children: Children, dialog: bool) -> Class {
    Class { name, children, dialog }
}

static CLASSES: &[Class] = &[
    class(c"backgroundbox", Children::One, false),
    class(c"button", Children::None, false),
    class(c"calendar", Children::None, false),
    class(c"canvas", Children::None, false),
    class(c"cbox", Children::Many, false),
    class(c"clipboard", Children::None, false),
    class(c"colordlg", Children::None, true),
    class(c"config", Children::None, false),
    class(c"datepick", Children::None, false),
    class(c"detachbox", Children::One, false),
    class(c"dialog", Children::One, true),
    class(c"expander", Children::One, false),
    class(c"filedlg", Children::None, true),
    class(c"fill", Children::None, false),
    class(c"fontdlg", Children::None, true),
    class(c"frame", Children::One, false),
    class(c"glcanvas", Children::None, false),
    class(c"gridbox", Children::Many, false),
    class(c"hbox", Children::Many, false),
    class(c"image", Children::None, false),
    class(c"imagergb", Children::None, false),
    class(c"imagergba", Children::None, false),
    class(c"item", Children::None, false),
    class(c"label", Children::None, false),
    class(c"link", Children::None, false),
    class(c"list", Children::None, false),
    class(c"matrix", Children::None, false),
    class(c"menu", Children::Many, false),
    class(c"messagedlg", Children::None, true),
    class(c"multiline", Children::None, false),
    class(c"normalizer", Children::None, false),
    class(c"progressbar", Children::None, false),
    class(c"progressdlg", Children::None, true),
    class(c"radio", Children::One, false),
    class(c"sbox", Children::One, false),
    class(c"scrollbox", Children::One, false),
    class(c"separator", Children::None, false),
    class(c"space", Children::None, false),
    class(c"spin", Children::None, false),
    class(c"spinbox", Children::One, false),
    class(c"split", Children::Two, false),
    class(c"submenu", Children::One, false),
    class(c"tabs", Children::Many, false),
    class(c"text", Children::None, false),
    class(c"timer", Children::None, false),
    class(c"toggle", Children::None, false),
    class(c"tree", Children::None, false),
    class(c"user", Children::Many, false),
    class(c"val", Children::None, false),
    class(c"vbox", Children::Many, false),
    class(c"webbrowser", Children::None, false),
    class(c"zbox", Children::Many, false),
];

pub(crate) fn find_class(name: &CStr) -> Option<&'static Class> {
    CLASSES.iter().find(|class| class.name == name)
}

pub(crate) enum Attr {
    Str(CString),
    /// Stored by [`IupSetAttribute`] without copying.
    Ptr(*const c_char),
}

pub(crate) struct Node {
    pub(crate) class: &'static Class,
    pub(crate) attrs: BTreeMap<CString, Attr>,
    pub(crate) callbacks: HashMap<CString, Func>,
    pub(crate) parent: Option<*mut Ihandle>,
    pub(crate) children: Vec<*mut Ihandle>,
    pub(crate) name: Option<CString>,
    pub(crate) mapped: bool,
    pub(crate) timer_due: Option<Instant>,
    /// Variables of a `config` element, by group and key.
    pub(crate) vars: BTreeMap<String, BTreeMap<String, CString>>,
}

impl Node {
    fn new(class: &'static Class) -> Self {
        Self {
            class,
            attrs: BTreeMap::new(),
            callbacks: HashMap::new(),
            parent: None,
            children: Vec::new(),
            name: None,
            mapped: false,
            timer_due: None,
            vars: BTreeMap::new(),
        }
    }

    pub(crate) fn is(&self, class: &CStr) -> bool {
        self.class.name == class
    }

    pub(crate) fn set(&mut self, name: CString, value: Option<Attr>) {
        let timing = self.is(c"timer") && matches!(name.to_bytes(), b"RUN" | b"TIME");
        match value {
            Some(value) => self.attrs.insert(name, value),
            None => self.attrs.remove(&name),
        };

        if timing {
            self.restart_timer();
        }
    }

    pub(crate) fn set_str(&mut self, name: &CStr, value: &str) {
        if let Ok(value) = CString::new(value) {
            self.set(name.to_owned(), Some(Attr::Str(value)));
        }
    }

    /// The value of a string attribute. Pointer attributes read as unset.
    pub(crate) fn get_str(&self, name: &CStr) -> Option<&CStr> {
        match self.attrs.get(name)? {
            Attr::Str(value) => Some(value),
            Attr::Ptr(_) => None,
        }
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.get_str(c"VISIBLE").is_some_and(|v| is_yes(&v.to_string_lossy()))
    }

    pub(crate) fn accepts_child(&self) -> bool {
        match self.class.children {
            Children::None => false,
            Children::One => self.children.is_empty(),
            Children::Two => self.children.len() < 2,
            Children::Many => true,
        }
    }

    fn restart_timer(&mut self) {
        let running = self.get_str(c"RUN").is_some_and(|v| is_yes(&v.to_string_lossy()));
        let time = self
            .get_str(c"TIME")
            .and_then(|v| parse_int(&v.to_string_lossy()))
            .unwrap_or(0);

        self.timer_due = match u64::try_from(time) {
            Ok(ms) if running && ms > 0 => Some(Instant::now() + Duration::from_millis(ms)),
            _ => None,
        };
    }

    pub(crate) fn timer_interval(&self) -> Duration {
        let time = self
            .get_str(c"TIME")
            .and_then(|v| parse_int(&v.to_string_lossy()))
            .unwrap_or(0);

        Duration::from_millis(u64::try_from(time).unwrap_or(0))
    }
}

#[derive(Default)]
pub(crate) struct Registry {
    pub(crate) opened: bool,
    pub(crate) live: HashSet<usize>,
    pub(crate) names: HashMap<CString, usize>,
    pub(crate) globals: HashMap<CString, CString>,
    pub(crate) functions: HashMap<CString, Func>,
    pub(crate) focus: Option<usize>,
    pub(crate) auto_names: u32,
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
}

/// Runs `f` on this thread's tables. `f` must not call back into IUP.
pub(crate) fn registry<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    REGISTRY.with(|registry| f(&mut registry.borrow_mut()))
}

pub(crate) fn is_live(ih: *mut Ihandle) -> bool {
    !ih.is_null() && registry(|r| r.live.contains(&(ih as usize)))
}

/// Runs `f` on the element `ih`, or returns `None` if `ih` is not a live
/// element of this thread. `f` must not call back into IUP.
pub(crate) fn with_node<R>(ih: *mut Ihandle, f: impl FnOnce(&mut Node) -> R) -> Option<R> {
    if !is_live(ih) {
        if !ih.is_null() {
            log::warn!("ignoring call on unknown element {:p}", ih);
        }
        return None;
    }

    let cell = unsafe { &*(ih as *const RefCell<Node>) };
    let mut node = cell.borrow_mut();
    Some(f(&mut node))
}

/// Allocates an element of a known class. Null if IUP is not open.
pub(crate) fn alloc(class: &'static Class) -> *mut Ihandle {
    if !registry(|r| r.opened) {
        log::warn!("creating a {:?} before IupOpen", class.name);
        return std::ptr::null_mut();
    }

    let ih = Box::into_raw(Box::new(RefCell::new(Node::new(class)))) as *mut Ihandle;
    registry(|r| r.live.insert(ih as usize));
    event_loop::register_target(ih);

    ih
}

/// Frees an element that is out of the tree and has run its destroy hooks.
pub(crate) unsafe fn free(ih: *mut Ihandle) {
    let known = registry(|r| {
        r.names.retain(|_, addr| *addr != ih as usize);
        if r.focus == Some(ih as usize) {
            r.focus = None;
        }
        r.live.remove(&(ih as usize))
    });

    if known {
        event_loop::forget_target(ih);
        drop(Box::from_raw(ih as *mut RefCell<Node>));
    }
}

pub(crate) fn live_elements() -> Vec<*mut Ihandle> {
    registry(|r| r.live.iter().map(|addr| *addr as *mut Ihandle).collect())
}

/// The callback `name` of `ih`, if any.
pub(crate) fn callback(ih: *mut Ihandle, name: &CStr) -> Option<Func> {
    with_node(ih, |node| node.callbacks.get(name).copied()).flatten()
}

/// Calls the `int(Ihandle*)` callback `name` of `ih`.
pub(crate) fn call_plain(ih: *mut Ihandle, name: &CStr) -> Option<c_int> {
    callback(ih, name).map(|f| unsafe { f(ih) })
}

pub(crate) fn is_yes(value: &str) -> bool {
    value.eq_ignore_ascii_case("YES") || value.eq_ignore_ascii_case("ON")
}

pub(crate) fn is_no(value: &str) -> bool {
    value.eq_ignore_ascii_case("NO") || value.eq_ignore_ascii_case("OFF")
}

/// Parses the integer at the start of `value`, like `sscanf("%d")`.
pub(crate) fn parse_int(value: &str) -> Option<i32> {
    let value = value.trim_start();
    let sign = usize::from(value.starts_with(['-', '+']));
    let digits = value[sign..].bytes().take_while(u8::is_ascii_digit).count();
    value[..sign + digits].parse().ok()
}

/// Parses the number at the start of `value`, like `sscanf("%g")`.
pub(crate) fn parse_float(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let end = value
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')))
        .map_or(value.len(), |(i, _)| i);

    (1..=end).rev().find_map(|len| value[..len].parse().ok())
}

/// Splits `"WxH"`, `"a:b"` or `"a,b"` and parses both halves. Returns how
/// many were numbers, as `IupGetIntInt` does.
pub(crate) fn parse_pair(value: &str) -> (c_int, i32, i32) {
    let (first, second) = match value.find(['x', 'X', ':', ',']) {
        Some(i) => (&value[..i], Some(&value[i + 1..])),
        None => (value, None),
    };

    match (parse_int(first), second.and_then(parse_int)) {
        (Some(a), Some(b)) => (2, a, b),
        (Some(a), None) => (1, a, 0),
        (None, Some(b)) => (1, 0, b),
        (None, None) => (0, 0, 0),
    }
}
