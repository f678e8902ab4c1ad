// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Elements, attributes, hierarchy and callbacks.

use super::{
    alloc, call_plain, callback, event_loop, find_class, free, is_live, is_no, is_yes,
    live_elements, parse_float, parse_int, parse_pair, registry, with_node,
    Attr, Func, Registry,
};
use crate::{attr::parse_attribute_list, callback::IntFn};
use iup_sys::{
    Icallback, Ihandle, IUP_CURRENT, IUP_ERROR, IUP_HIDE, IUP_INVALID, IUP_NOERROR, IUP_OPENED,
    IUP_SHOW,
};
use std::{
    borrow::Cow,
    ffi::{CStr, CString},
    mem,
    os::raw::{c_char, c_double, c_float, c_int, c_uchar},
    ptr,
};

static VERSION: &CStr = c"3.31";
const VERSION_NUMBER: c_int = 331000;

unsafe fn text<'a>(ptr: *const c_char) -> Option<&'a CStr> {
    (!ptr.is_null()).then(|| CStr::from_ptr(ptr))
}

unsafe fn show<'a>(ptr: *const c_char) -> Cow<'a, str> {
    text(ptr).map_or(Cow::Borrowed(""), CStr::to_string_lossy)
}

unsafe fn plain_name(name: *const c_char) -> Option<CString> {
    text(name).map(CStr::to_owned)
}

unsafe fn id_name(name: *const c_char, id: c_int) -> Option<CString> {
    CString::new(format!("{}{}", show(name), id)).ok()
}

unsafe fn id2_name(name: *const c_char, lin: c_int, col: c_int) -> Option<CString> {
    CString::new(format!("{}{}:{}", show(name), lin, col)).ok()
}

fn owned(value: String) -> Option<Attr> {
    CString::new(value).ok().map(Attr::Str)
}

/* system */

pub unsafe fn IupOpen(_argc: *mut c_int, _argv: *mut *mut *mut c_char) -> c_int {
    if registry(|r| mem::replace(&mut r.opened, true)) {
        return IUP_OPENED;
    }

    registry(|r| {
        r.globals.insert(c"DRIVER".into(), c"Headless".into());
        r.globals.insert(c"SYSTEM".into(), c"Headless".into());
        r.globals.insert(c"VERSION".into(), VERSION.into());
    });
    log::debug!("headless IUP opened");

    IUP_NOERROR
}

pub unsafe fn IupClose() {
    if !registry(|r| r.opened) {
        return;
    }

    let roots: Vec<_> = live_elements()
        .into_iter()
        .filter(|ih| with_node(*ih, |node| node.parent.is_none()).unwrap_or(false))
        .collect();
    for ih in roots {
        IupDestroy(ih);
    }

    registry(|r| *r = Registry::default());
    event_loop::reset();
}

pub unsafe fn IupVersion() -> *mut c_char {
    VERSION.as_ptr() as *mut c_char
}

pub unsafe fn IupVersionNumber() -> c_int {
    VERSION_NUMBER
}

/* layout and drawing, nothing to do without a screen */

pub unsafe fn IupUpdate(ih: *mut Ihandle) {
    with_node(ih, |_| ());
}

pub unsafe fn IupRedraw(ih: *mut Ihandle, _children: c_int) {
    with_node(ih, |_| ());
}

pub unsafe fn IupRefresh(ih: *mut Ihandle) {
    with_node(ih, |_| ());
}

/* lifecycle */

pub unsafe fn IupMap(ih: *mut Ihandle) -> c_int {
    let Some((was_mapped, children)) =
        with_node(ih, |node| (mem::replace(&mut node.mapped, true), node.children.clone()))
    else {
        return IUP_ERROR;
    };

    if !was_mapped {
        call_plain(ih, c"MAP_CB");
    }
    for child in children {
        IupMap(child);
    }

    IUP_NOERROR
}

pub unsafe fn IupUnmap(ih: *mut Ihandle) {
    let Some(children) = with_node(ih, |node| node.children.clone()) else {
        return;
    };

    for child in children {
        IupUnmap(child);
    }
    if with_node(ih, |node| node.mapped).unwrap_or(false) {
        call_plain(ih, c"UNMAP_CB");
        with_node(ih, |node| node.mapped = false);
    }
}

/// Runs `DESTROY_CB` and `LDESTROY_CB`, destroys the children, detaches
/// and frees the element.
pub unsafe fn IupDestroy(ih: *mut Ihandle) {
    if !is_live(ih) {
        return;
    }

    if with_node(ih, |node| node.class.dialog && node.is_visible()).unwrap_or(false) {
        hide(ih, false);
    }

    call_plain(ih, c"DESTROY_CB");
    call_plain(ih, c"LDESTROY_CB");

    let children = with_node(ih, |node| mem::take(&mut node.children)).unwrap_or_default();
    for child in children {
        with_node(child, |node| node.parent = None);
        IupDestroy(child);
    }

    IupDetach(ih);
    free(ih);
}

/* hierarchy */

fn parent_of(ih: *mut Ihandle) -> Option<*mut Ihandle> {
    with_node(ih, |node| node.parent).flatten()
}

fn is_ancestor(ancestor: *mut Ihandle, ih: *mut Ihandle) -> bool {
    let mut current = parent_of(ih);
    while let Some(parent) = current {
        if parent == ancestor {
            return true;
        }
        current = parent_of(parent);
    }

    false
}

/// Adds `child` to `ih`: at the end for `None`, first for `Some(null)`,
/// before `Some(sibling)` otherwise.
unsafe fn attach(ih: *mut Ihandle, child: *mut Ihandle, before: Option<*mut Ihandle>) -> *mut Ihandle {
    if ih == child || is_ancestor(child, ih) {
        return ptr::null_mut();
    }
    if with_node(child, |node| node.parent.is_none()) != Some(true) {
        return ptr::null_mut();
    }

    let attached = with_node(ih, |node| {
        if !node.accepts_child() {
            return false;
        }

        let index = match before {
            None => node.children.len(),
            Some(sibling) if sibling.is_null() => 0,
            Some(sibling) => match node.children.iter().position(|c| *c == sibling) {
                Some(index) => index,
                None => return false,
            },
        };
        node.children.insert(index, child);
        true
    });

    if attached != Some(true) {
        return ptr::null_mut();
    }
    with_node(child, |node| node.parent = Some(ih));

    ih
}

pub unsafe fn IupAppend(ih: *mut Ihandle, child: *mut Ihandle) -> *mut Ihandle {
    attach(ih, child, None)
}

pub unsafe fn IupInsert(
    ih: *mut Ihandle,
    ref_child: *mut Ihandle,
    child: *mut Ihandle,
) -> *mut Ihandle {
    attach(ih, child, Some(ref_child))
}

pub unsafe fn IupDetach(child: *mut Ihandle) {
    let Some(Some(parent)) = with_node(child, |node| node.parent.take()) else {
        return;
    };

    with_node(parent, |node| node.children.retain(|c| *c != child));
}

pub unsafe fn IupReparent(
    ih: *mut Ihandle,
    new_parent: *mut Ihandle,
    ref_child: *mut Ihandle,
) -> c_int {
    if !is_live(ih) || !is_live(new_parent) {
        return IUP_ERROR;
    }

    let old_parent = parent_of(ih);
    let next = IupGetBrother(ih);
    IupDetach(ih);

    let before = (!ref_child.is_null()).then_some(ref_child);
    if !attach(new_parent, ih, before).is_null() {
        return IUP_NOERROR;
    }

    if let Some(parent) = old_parent {
        attach(parent, ih, (!next.is_null()).then_some(next));
    }
    IUP_ERROR
}

pub unsafe fn IupGetChild(ih: *mut Ihandle, pos: c_int) -> *mut Ihandle {
    let Ok(pos) = usize::try_from(pos) else {
        return ptr::null_mut();
    };

    with_node(ih, |node| node.children.get(pos).copied())
        .flatten()
        .unwrap_or(ptr::null_mut())
}

pub unsafe fn IupGetChildPos(ih: *mut Ihandle, child: *mut Ihandle) -> c_int {
    with_node(ih, |node| node.children.iter().position(|c| *c == child))
        .flatten()
        .and_then(|pos| c_int::try_from(pos).ok())
        .unwrap_or(-1)
}

pub unsafe fn IupGetChildCount(ih: *mut Ihandle) -> c_int {
    with_node(ih, |node| c_int::try_from(node.children.len()).unwrap_or(c_int::MAX)).unwrap_or(-1)
}

pub unsafe fn IupGetNextChild(ih: *mut Ihandle, child: *mut Ihandle) -> *mut Ihandle {
    if child.is_null() {
        IupGetChild(ih, 0)
    } else {
        IupGetBrother(child)
    }
}

pub unsafe fn IupGetBrother(ih: *mut Ihandle) -> *mut Ihandle {
    let Some(parent) = parent_of(ih) else {
        return ptr::null_mut();
    };

    with_node(parent, |node| {
        let pos = node.children.iter().position(|c| *c == ih)?;
        node.children.get(pos + 1).copied()
    })
    .flatten()
    .unwrap_or(ptr::null_mut())
}

pub unsafe fn IupGetParent(ih: *mut Ihandle) -> *mut Ihandle {
    parent_of(ih).unwrap_or(ptr::null_mut())
}

fn root_of(ih: *mut Ihandle) -> *mut Ihandle {
    let mut root = ih;
    while let Some(parent) = parent_of(root) {
        root = parent;
    }

    root
}

pub unsafe fn IupGetDialog(ih: *mut Ihandle) -> *mut Ihandle {
    if !is_live(ih) {
        return ptr::null_mut();
    }

    let root = root_of(ih);
    match with_node(root, |node| node.is(c"dialog")) {
        Some(true) => root,
        _ => ptr::null_mut(),
    }
}

pub unsafe fn IupGetDialogChild(ih: *mut Ihandle, name: *const c_char) -> *mut Ihandle {
    let Some(name) = text(name) else {
        return ptr::null_mut();
    };
    if !is_live(ih) {
        return ptr::null_mut();
    }

    let mut pending = with_node(root_of(ih), |node| node.children.clone()).unwrap_or_default();
    while let Some(candidate) = pending.pop() {
        let found = with_node(candidate, |node| {
            pending.extend(node.children.iter().rev());
            node.get_str(c"NAME") == Some(name)
        });
        if found == Some(true) {
            return candidate;
        }
    }

    ptr::null_mut()
}

/* visibility */

unsafe fn call_show(ih: *mut Ihandle, state: c_int) {
    if let Some(f) = callback(ih, c"SHOW_CB") {
        mem::transmute::<Func, IntFn>(f)(ih, state);
    }
}

fn any_visible_dialog() -> bool {
    live_elements()
        .into_iter()
        .any(|ih| with_node(ih, |node| node.class.dialog && node.is_visible()).unwrap_or(false))
}

/// Hides `ih`. Hiding the last visible dialog ends the main loop when
/// `end_loop` is set.
unsafe fn hide(ih: *mut Ihandle, end_loop: bool) -> c_int {
    let Some((dialog, was_visible)) = with_node(ih, |node| {
        let state = (node.class.dialog, node.is_visible());
        node.set_str(c"VISIBLE", "NO");
        state
    }) else {
        return IUP_ERROR;
    };

    if dialog && was_visible {
        call_show(ih, IUP_HIDE);
        if end_loop && !any_visible_dialog() {
            event_loop::request_exit();
        }
    }

    IUP_NOERROR
}

pub unsafe fn IupShow(ih: *mut Ihandle) -> c_int {
    IupShowXY(ih, IUP_CURRENT, IUP_CURRENT)
}

pub unsafe fn IupShowXY(ih: *mut Ihandle, _x: c_int, _y: c_int) -> c_int {
    let Some((dialog, was_visible, mapped)) =
        with_node(ih, |node| (node.class.dialog, node.is_visible(), node.mapped))
    else {
        return IUP_ERROR;
    };

    if !mapped {
        IupMap(ih);
    }
    with_node(ih, |node| node.set_str(c"VISIBLE", "YES"));
    if dialog && !was_visible {
        call_show(ih, IUP_SHOW);
    }

    IUP_NOERROR
}

pub unsafe fn IupHide(ih: *mut Ihandle) -> c_int {
    hide(ih, true)
}

/// Runs a nested loop until the dialog is hidden. Predefined dialogs answer
/// at once as if cancelled.
pub unsafe fn IupPopup(ih: *mut Ihandle, x: c_int, y: c_int) -> c_int {
    let Some(class) = with_node(ih, |node| node.class) else {
        return IUP_ERROR;
    };

    match class.name.to_bytes() {
        b"filedlg" | b"colordlg" | b"fontdlg" => {
            with_node(ih, |node| node.set_str(c"STATUS", "-1"));
            IUP_NOERROR
        }
        b"messagedlg" => {
            with_node(ih, |node| node.set_str(c"BUTTONRESPONSE", "1"));
            IUP_NOERROR
        }
        b"menu" => IUP_NOERROR,
        _ if class.dialog => {
            let code = IupShowXY(ih, x, y);
            if code != IUP_NOERROR {
                return code;
            }

            event_loop::run_until(|| !with_node(ih, |node| node.is_visible()).unwrap_or(false));
            if with_node(ih, |node| node.is_visible()).unwrap_or(false) {
                hide(ih, false);
            }
            IUP_NOERROR
        }
        _ => IUP_INVALID,
    }
}

pub unsafe fn IupGetClassName(ih: *mut Ihandle) -> *mut c_char {
    with_node(ih, |node| node.class.name.as_ptr() as *mut c_char).unwrap_or(ptr::null_mut())
}

/* focus and names */

pub unsafe fn IupSetFocus(ih: *mut Ihandle) -> *mut Ihandle {
    if !is_live(ih) {
        return ptr::null_mut();
    }

    let previous = registry(|r| r.focus.replace(ih as usize))
        .map_or(ptr::null_mut(), |addr| addr as *mut Ihandle);
    if previous != ih {
        if is_live(previous) {
            call_plain(previous, c"KILLFOCUS_CB");
        }
        call_plain(ih, c"GETFOCUS_CB");
    }

    previous
}

pub unsafe fn IupGetFocus() -> *mut Ihandle {
    registry(|r| r.focus).map_or(ptr::null_mut(), |addr| addr as *mut Ihandle)
}

pub unsafe fn IupSetHandle(name: *const c_char, ih: *mut Ihandle) -> *mut Ihandle {
    let Some(name) = plain_name(name) else {
        return ptr::null_mut();
    };
    if !ih.is_null() && !is_live(ih) {
        return ptr::null_mut();
    }

    let previous = registry(|r| {
        if ih.is_null() {
            r.names.remove(&name)
        } else {
            r.names.insert(name.clone(), ih as usize)
        }
    })
    .map_or(ptr::null_mut(), |addr| addr as *mut Ihandle);

    if !previous.is_null() && previous != ih {
        with_node(previous, |node| {
            if node.name.as_ref() == Some(&name) {
                node.name = None;
            }
        });
    }
    if !ih.is_null() {
        with_node(ih, |node| node.name = Some(name));
    }

    previous
}

pub unsafe fn IupGetHandle(name: *const c_char) -> *mut Ihandle {
    let Some(name) = text(name) else {
        return ptr::null_mut();
    };

    registry(|r| r.names.get(name).copied()).map_or(ptr::null_mut(), |addr| addr as *mut Ihandle)
}

pub unsafe fn IupGetName(ih: *mut Ihandle) -> *mut c_char {
    with_node(ih, |node| node.name.as_ref().map(|name| name.as_ptr() as *mut c_char))
        .flatten()
        .unwrap_or(ptr::null_mut())
}

/* attributes */

fn store(ih: *mut Ihandle, name: Option<CString>, value: Option<Attr>) {
    if let Some(name) = name {
        with_node(ih, |node| node.set(name, value));
    }
}

fn load(ih: *mut Ihandle, name: Option<CString>) -> *mut c_char {
    let Some(name) = name else {
        return ptr::null_mut();
    };

    with_node(ih, |node| match node.attrs.get(name.as_c_str()) {
        Some(Attr::Str(value)) => value.as_ptr() as *mut c_char,
        Some(Attr::Ptr(value)) => *value as *mut c_char,
        None => ptr::null_mut(),
    })
    .unwrap_or(ptr::null_mut())
}

fn load_string(ih: *mut Ihandle, name: Option<CString>) -> Option<String> {
    let name = name?;
    with_node(ih, |node| node.get_str(&name).map(|v| v.to_string_lossy().into_owned())).flatten()
}

fn load_int(ih: *mut Ihandle, name: Option<CString>) -> c_int {
    match load_string(ih, name) {
        Some(v) if is_yes(&v) => 1,
        Some(v) if is_no(&v) => 0,
        Some(v) => parse_int(&v).unwrap_or(0),
        None => 0,
    }
}

fn load_double(ih: *mut Ihandle, name: Option<CString>) -> c_double {
    load_string(ih, name).and_then(|v| parse_float(&v)).unwrap_or(0.0)
}

fn rgb(r: c_uchar, g: c_uchar, b: c_uchar) -> Option<Attr> {
    owned(format!("{} {} {}", r, g, b))
}

pub unsafe fn IupSetAttributes(ih: *mut Ihandle, list: *const c_char) -> *mut Ihandle {
    for (name, value) in parse_attribute_list(&show(list)) {
        store(ih, CString::new(name).ok(), owned(value));
    }

    ih
}

pub unsafe fn IupResetAttribute(ih: *mut Ihandle, name: *const c_char) {
    store(ih, plain_name(name), None);
}

/// Lists the string attributes of the element. With null `names`, returns
/// how many there are.
pub unsafe fn IupGetAllAttributes(ih: *mut Ihandle, names: *mut *mut c_char, n: c_int) -> c_int {
    with_node(ih, |node| {
        let keys: Vec<_> = node
            .attrs
            .iter()
            .filter(|(_, value)| matches!(value, Attr::Str(_)))
            .map(|(key, _)| key.as_ptr() as *mut c_char)
            .collect();
        if names.is_null() {
            return c_int::try_from(keys.len()).unwrap_or(c_int::MAX);
        }

        let count = keys.len().min(usize::try_from(n).unwrap_or(0));
        for (i, key) in keys.into_iter().take(count).enumerate() {
            *names.add(i) = key;
        }
        c_int::try_from(count).unwrap_or(c_int::MAX)
    })
    .unwrap_or(-1)
}

/// Stores `value` as a pointer, without copying it.
pub unsafe fn IupSetAttribute(ih: *mut Ihandle, name: *const c_char, value: *const c_char) {
    store(ih, plain_name(name), (!value.is_null()).then_some(Attr::Ptr(value)));
}

pub unsafe fn IupSetStrAttribute(ih: *mut Ihandle, name: *const c_char, value: *const c_char) {
    store(ih, plain_name(name), text(value).map(|v| Attr::Str(v.to_owned())));
}

pub unsafe fn IupSetInt(ih: *mut Ihandle, name: *const c_char, value: c_int) {
    store(ih, plain_name(name), owned(value.to_string()));
}

pub unsafe fn IupSetFloat(ih: *mut Ihandle, name: *const c_char, value: c_float) {
    store(ih, plain_name(name), owned(value.to_string()));
}

pub unsafe fn IupSetDouble(ih: *mut Ihandle, name: *const c_char, value: c_double) {
    store(ih, plain_name(name), owned(value.to_string()));
}

pub unsafe fn IupSetRGB(ih: *mut Ihandle, name: *const c_char, r: c_uchar, g: c_uchar, b: c_uchar) {
    store(ih, plain_name(name), rgb(r, g, b));
}

pub unsafe fn IupGetAttribute(ih: *mut Ihandle, name: *const c_char) -> *mut c_char {
    load(ih, plain_name(name))
}

pub unsafe fn IupGetInt(ih: *mut Ihandle, name: *const c_char) -> c_int {
    load_int(ih, plain_name(name))
}

pub unsafe fn IupGetIntInt(
    ih: *mut Ihandle,
    name: *const c_char,
    i1: *mut c_int,
    i2: *mut c_int,
) -> c_int {
    let Some(value) = load_string(ih, plain_name(name)) else {
        return 0;
    };

    let (count, a, b) = parse_pair(&value);
    if !i1.is_null() {
        *i1 = a;
    }
    if !i2.is_null() {
        *i2 = b;
    }

    count
}

pub unsafe fn IupGetFloat(ih: *mut Ihandle, name: *const c_char) -> c_float {
    load_double(ih, plain_name(name)) as c_float
}

pub unsafe fn IupGetDouble(ih: *mut Ihandle, name: *const c_char) -> c_double {
    load_double(ih, plain_name(name))
}

pub unsafe fn IupSetAttributeId(ih: *mut Ihandle, name: *const c_char, id: c_int, value: *const c_char) {
    store(ih, id_name(name, id), (!value.is_null()).then_some(Attr::Ptr(value)));
}

pub unsafe fn IupSetStrAttributeId(
    ih: *mut Ihandle,
    name: *const c_char,
    id: c_int,
    value: *const c_char,
) {
    store(ih, id_name(name, id), text(value).map(|v| Attr::Str(v.to_owned())));
}

pub unsafe fn IupSetIntId(ih: *mut Ihandle, name: *const c_char, id: c_int, value: c_int) {
    store(ih, id_name(name, id), owned(value.to_string()));
}

pub unsafe fn IupSetFloatId(ih: *mut Ihandle, name: *const c_char, id: c_int, value: c_float) {
    store(ih, id_name(name, id), owned(value.to_string()));
}

pub unsafe fn IupSetDoubleId(ih: *mut Ihandle, name: *const c_char, id: c_int, value: c_double) {
    store(ih, id_name(name, id), owned(value.to_string()));
}

pub unsafe fn IupSetRGBId(
    ih: *mut Ihandle,
    name: *const c_char,
    id: c_int,
    r: c_uchar,
    g: c_uchar,
    b: c_uchar,
) {
    store(ih, id_name(name, id), rgb(r, g, b));
}

pub unsafe fn IupGetAttributeId(ih: *mut Ihandle, name: *const c_char, id: c_int) -> *mut c_char {
    load(ih, id_name(name, id))
}

pub unsafe fn IupGetIntId(ih: *mut Ihandle, name: *const c_char, id: c_int) -> c_int {
    load_int(ih, id_name(name, id))
}

pub unsafe fn IupGetFloatId(ih: *mut Ihandle, name: *const c_char, id: c_int) -> c_float {
    load_double(ih, id_name(name, id)) as c_float
}

pub unsafe fn IupGetDoubleId(ih: *mut Ihandle, name: *const c_char, id: c_int) -> c_double {
    load_double(ih, id_name(name, id))
}

pub unsafe fn IupSetAttributeId2(
    ih: *mut Ihandle,
    name: *const c_char,
    lin: c_int,
    col: c_int,
    value: *const c_char,
) {
    store(ih, id2_name(name, lin, col), (!value.is_null()).then_some(Attr::Ptr(value)));
}

pub unsafe fn IupSetStrAttributeId2(
    ih: *mut Ihandle,
    name: *const c_char,
    lin: c_int,
    col: c_int,
    value: *const c_char,
) {
    store(ih, id2_name(name, lin, col), text(value).map(|v| Attr::Str(v.to_owned())));
}

pub unsafe fn IupSetIntId2(ih: *mut Ihandle, name: *const c_char, lin: c_int, col: c_int, value: c_int) {
    store(ih, id2_name(name, lin, col), owned(value.to_string()));
}

pub unsafe fn IupSetFloatId2(
    ih: *mut Ihandle,
    name: *const c_char,
    lin: c_int,
    col: c_int,
    value: c_float,
) {
    store(ih, id2_name(name, lin, col), owned(value.to_string()));
}

pub unsafe fn IupSetDoubleId2(
    ih: *mut Ihandle,
    name: *const c_char,
    lin: c_int,
    col: c_int,
    value: c_double,
) {
    store(ih, id2_name(name, lin, col), owned(value.to_string()));
}

pub unsafe fn IupSetRGBId2(
    ih: *mut Ihandle,
    name: *const c_char,
    lin: c_int,
    col: c_int,
    r: c_uchar,
    g: c_uchar,
    b: c_uchar,
) {
    store(ih, id2_name(name, lin, col), rgb(r, g, b));
}

pub unsafe fn IupGetAttributeId2(
    ih: *mut Ihandle,
    name: *const c_char,
    lin: c_int,
    col: c_int,
) -> *mut c_char {
    load(ih, id2_name(name, lin, col))
}

pub unsafe fn IupGetIntId2(ih: *mut Ihandle, name: *const c_char, lin: c_int, col: c_int) -> c_int {
    load_int(ih, id2_name(name, lin, col))
}

pub unsafe fn IupGetFloatId2(
    ih: *mut Ihandle,
    name: *const c_char,
    lin: c_int,
    col: c_int,
) -> c_float {
    load_double(ih, id2_name(name, lin, col)) as c_float
}

pub unsafe fn IupGetDoubleId2(
    ih: *mut Ihandle,
    name: *const c_char,
    lin: c_int,
    col: c_int,
) -> c_double {
    load_double(ih, id2_name(name, lin, col))
}

pub unsafe fn IupSetGlobal(name: *const c_char, value: *const c_char) {
    IupSetStrGlobal(name, value);
}

pub unsafe fn IupSetStrGlobal(name: *const c_char, value: *const c_char) {
    let Some(name) = plain_name(name) else {
        return;
    };

    registry(|r| match text(value) {
        Some(value) => r.globals.insert(name, value.to_owned()),
        None => r.globals.remove(&name),
    });
}

pub unsafe fn IupGetGlobal(name: *const c_char) -> *mut c_char {
    let Some(name) = text(name) else {
        return ptr::null_mut();
    };

    registry(|r| r.globals.get(name).map(|value| value.as_ptr() as *mut c_char))
        .unwrap_or(ptr::null_mut())
}

/// Stores the name of `ih_named`, giving it one if it has none.
pub unsafe fn IupSetAttributeHandle(ih: *mut Ihandle, name: *const c_char, ih_named: *mut Ihandle) {
    if !is_live(ih_named) {
        store(ih, plain_name(name), None);
        return;
    }

    let existing = with_node(ih_named, |node| node.name.clone()).flatten();
    let handle_name = match existing {
        Some(handle_name) => handle_name,
        None => {
            let serial = registry(|r| {
                r.auto_names += 1;
                r.auto_names
            });
            let Ok(handle_name) = CString::new(format!("_IUP_NAME{}", serial)) else {
                return;
            };
            IupSetHandle(handle_name.as_ptr(), ih_named);
            handle_name
        }
    };

    store(ih, plain_name(name), Some(Attr::Str(handle_name)));
}

pub unsafe fn IupGetAttributeHandle(ih: *mut Ihandle, name: *const c_char) -> *mut Ihandle {
    match load_string(ih, plain_name(name)).and_then(|v| CString::new(v).ok()) {
        Some(handle_name) => IupGetHandle(handle_name.as_ptr()),
        None => ptr::null_mut(),
    }
}

/* callbacks */

pub unsafe fn IupGetCallback(ih: *mut Ihandle, name: *const c_char) -> Icallback {
    let name = text(name)?;
    callback(ih, name)
}

pub unsafe fn IupSetCallback(ih: *mut Ihandle, name: *const c_char, func: Icallback) -> Icallback {
    let name = plain_name(name)?;

    with_node(ih, |node| match func {
        Some(func) => node.callbacks.insert(name, func),
        None => node.callbacks.remove(&name),
    })
    .flatten()
}

/* constructors */

fn create(class: &CStr) -> *mut Ihandle {
    match find_class(class) {
        Some(class) => alloc(class),
        None => {
            log::warn!("unknown class {:?}", class);
            ptr::null_mut()
        }
    }
}

/// Creates an element and sets `name` to `value` unless it is null.
unsafe fn create_with(class: &CStr, attrs: &[(&CStr, *const c_char)]) -> *mut Ihandle {
    let ih = create(class);
    for (name, value) in attrs {
        if let Some(value) = text(*value) {
            store(ih, Some((*name).to_owned()), Some(Attr::Str(value.to_owned())));
        }
    }

    ih
}

unsafe fn append_or_warn(ih: *mut Ihandle, child: *mut Ihandle) {
    if !child.is_null() && IupAppend(ih, child).is_null() {
        log::warn!("could not append {:p} to {:p}", child, ih);
    }
}

unsafe fn create_with_child(class: &CStr, child: *mut Ihandle) -> *mut Ihandle {
    let ih = create(class);
    if !ih.is_null() {
        append_or_warn(ih, child);
    }

    ih
}

unsafe fn create_with_children(class: &CStr, children: *mut *mut Ihandle) -> *mut Ihandle {
    let ih = create(class);
    if ih.is_null() || children.is_null() {
        return ih;
    }

    let mut i = 0;
    while !(*children.add(i)).is_null() {
        append_or_warn(ih, *children.add(i));
        i += 1;
    }

    ih
}

pub unsafe fn IupCreate(classname: *const c_char) -> *mut Ihandle {
    text(classname).map_or(ptr::null_mut(), create)
}

pub unsafe fn IupFill() -> *mut Ihandle {
    create(c"fill")
}

pub unsafe fn IupSpace() -> *mut Ihandle {
    create(c"space")
}

pub unsafe fn IupRadio(child: *mut Ihandle) -> *mut Ihandle {
    create_with_child(c"radio", child)
}

pub unsafe fn IupVboxv(children: *mut *mut Ihandle) -> *mut Ihandle {
    create_with_children(c"vbox", children)
}

pub unsafe fn IupZboxv(children: *mut *mut Ihandle) -> *mut Ihandle {
    create_with_children(c"zbox", children)
}

pub unsafe fn IupHboxv(children: *mut *mut Ihandle) -> *mut Ihandle {
    create_with_children(c"hbox", children)
}

/// The elements are not children of a normalizer and are not recorded.
pub unsafe fn IupNormalizerv(_ih_list: *mut *mut Ihandle) -> *mut Ihandle {
    create(c"normalizer")
}

pub unsafe fn IupCboxv(children: *mut *mut Ihandle) -> *mut Ihandle {
    create_with_children(c"cbox", children)
}

pub unsafe fn IupSbox(child: *mut Ihandle) -> *mut Ihandle {
    create_with_child(c"sbox", child)
}

pub unsafe fn IupSplit(child1: *mut Ihandle, child2: *mut Ihandle) -> *mut Ihandle {
    let ih = create_with_child(c"split", child1);
    if !ih.is_null() {
        append_or_warn(ih, child2);
    }

    ih
}

pub unsafe fn IupScrollBox(child: *mut Ihandle) -> *mut Ihandle {
    create_with_child(c"scrollbox", child)
}

pub unsafe fn IupGridBoxv(children: *mut *mut Ihandle) -> *mut Ihandle {
    create_with_children(c"gridbox", children)
}

pub unsafe fn IupExpander(child: *mut Ihandle) -> *mut Ihandle {
    create_with_child(c"expander", child)
}

pub unsafe fn IupDetachBox(child: *mut Ihandle) -> *mut Ihandle {
    create_with_child(c"detachbox", child)
}

pub unsafe fn IupBackgroundBox(child: *mut Ihandle) -> *mut Ihandle {
    create_with_child(c"backgroundbox", child)
}

pub unsafe fn IupFrame(child: *mut Ihandle) -> *mut Ihandle {
    create_with_child(c"frame", child)
}

unsafe fn image(class: &CStr, width: c_int, height: c_int, bpp: c_int) -> *mut Ihandle {
    let ih = create(class);
    store(ih, Some(c"WIDTH".into()), owned(width.to_string()));
    store(ih, Some(c"HEIGHT".into()), owned(height.to_string()));
    store(ih, Some(c"BPP".into()), owned(bpp.to_string()));

    ih
}

pub unsafe fn IupImage(width: c_int, height: c_int, _pixels: *const c_uchar) -> *mut Ihandle {
    image(c"image", width, height, 8)
}

pub unsafe fn IupImageRGB(width: c_int, height: c_int, _pixels: *const c_uchar) -> *mut Ihandle {
    image(c"imagergb", width, height, 24)
}

pub unsafe fn IupImageRGBA(width: c_int, height: c_int, _pixels: *const c_uchar) -> *mut Ihandle {
    image(c"imagergba", width, height, 32)
}

pub unsafe fn IupItem(title: *const c_char, action: *const c_char) -> *mut Ihandle {
    create_with(c"item", &[(c"TITLE", title), (c"ACTION", action)])
}

pub unsafe fn IupSubmenu(title: *const c_char, child: *mut Ihandle) -> *mut Ihandle {
    let ih = create_with_child(c"submenu", child);
    if let Some(title) = text(title) {
        store(ih, Some(c"TITLE".into()), Some(Attr::Str(title.to_owned())));
    }

    ih
}

pub unsafe fn IupSeparator() -> *mut Ihandle {
    create(c"separator")
}

pub unsafe fn IupMenuv(children: *mut *mut Ihandle) -> *mut Ihandle {
    create_with_children(c"menu", children)
}

pub unsafe fn IupButton(title: *const c_char, action: *const c_char) -> *mut Ihandle {
    create_with(c"button", &[(c"TITLE", title), (c"ACTION", action)])
}

pub unsafe fn IupCanvas(action: *const c_char) -> *mut Ihandle {
    create_with(c"canvas", &[(c"ACTION", action)])
}

pub unsafe fn IupDialog(child: *mut Ihandle) -> *mut Ihandle {
    create_with_child(c"dialog", child)
}

pub unsafe fn IupUser() -> *mut Ihandle {
    create(c"user")
}

pub unsafe fn IupLabel(title: *const c_char) -> *mut Ihandle {
    create_with(c"label", &[(c"TITLE", title)])
}

pub unsafe fn IupList(action: *const c_char) -> *mut Ihandle {
    create_with(c"list", &[(c"ACTION", action)])
}

pub unsafe fn IupText(action: *const c_char) -> *mut Ihandle {
    create_with(c"text", &[(c"ACTION", action)])
}

pub unsafe fn IupMultiLine(action: *const c_char) -> *mut Ihandle {
    create_with(c"multiline", &[(c"ACTION", action), (c"MULTILINE", c"YES".as_ptr())])
}

pub unsafe fn IupToggle(title: *const c_char, action: *const c_char) -> *mut Ihandle {
    create_with(c"toggle", &[(c"TITLE", title), (c"ACTION", action)])
}

pub unsafe fn IupTimer() -> *mut Ihandle {
    create(c"timer")
}

pub unsafe fn IupClipboard() -> *mut Ihandle {
    create(c"clipboard")
}

pub unsafe fn IupProgressBar() -> *mut Ihandle {
    create(c"progressbar")
}

pub unsafe fn IupVal(r#type: *const c_char) -> *mut Ihandle {
    create_with(c"val", &[(c"ORIENTATION", r#type)])
}

pub unsafe fn IupTabsv(children: *mut *mut Ihandle) -> *mut Ihandle {
    create_with_children(c"tabs", children)
}

pub unsafe fn IupTree() -> *mut Ihandle {
    create(c"tree")
}

pub unsafe fn IupLink(url: *const c_char, title: *const c_char) -> *mut Ihandle {
    create_with(c"link", &[(c"URL", url), (c"TITLE", title)])
}

pub unsafe fn IupSpin() -> *mut Ihandle {
    create(c"spin")
}

pub unsafe fn IupSpinbox(child: *mut Ihandle) -> *mut Ihandle {
    create_with_child(c"spinbox", child)
}

pub unsafe fn IupDatePick() -> *mut Ihandle {
    create(c"datepick")
}

pub unsafe fn IupCalendar() -> *mut Ihandle {
    create(c"calendar")
}

/* predefined dialogs */

pub unsafe fn IupFileDlg() -> *mut Ihandle {
    create(c"filedlg")
}

pub unsafe fn IupMessageDlg() -> *mut Ihandle {
    create(c"messagedlg")
}

pub unsafe fn IupColorDlg() -> *mut Ihandle {
    create(c"colordlg")
}

pub unsafe fn IupFontDlg() -> *mut Ihandle {
    create(c"fontdlg")
}

pub unsafe fn IupProgressDlg() -> *mut Ihandle {
    create(c"progressdlg")
}

pub unsafe fn IupGetFile(_arq: *mut c_char) -> c_int {
    log::info!("file selection cancelled");
    -1
}

pub unsafe fn IupMessage(title: *const c_char, msg: *const c_char) {
    log::info!("{}: {}", show(title), show(msg));
}

pub unsafe fn IupMessageError(_parent: *mut Ihandle, message: *const c_char) {
    log::info!("error: {}", show(message));
}

pub unsafe fn IupMessageAlarm(
    _parent: *mut Ihandle,
    title: *const c_char,
    message: *const c_char,
    buttons: *const c_char,
) -> c_int {
    log::info!("{}: {} [{}]", show(title), show(message), show(buttons));
    1
}

pub unsafe fn IupAlarm(
    title: *const c_char,
    msg: *const c_char,
    b1: *const c_char,
    _b2: *const c_char,
    _b3: *const c_char,
) -> c_int {
    log::info!("{}: {} [{}]", show(title), show(msg), show(b1));
    1
}

pub unsafe fn IupGetText(title: *const c_char, _text: *mut c_char, _maxsize: c_int) -> c_int {
    log::info!("text input {:?} cancelled", show(title));
    0
}

pub unsafe fn IupGetColor(
    _x: c_int,
    _y: c_int,
    _r: *mut c_uchar,
    _g: *mut c_uchar,
    _b: *mut c_uchar,
) -> c_int {
    log::info!("color selection cancelled");
    0
}

/* optional modules */

#[cfg(feature = "gl")]
thread_local! {
    static GL_CURRENT: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

#[cfg(feature = "gl")]
pub unsafe fn IupGLCanvasOpen() {}

#[cfg(feature = "gl")]
pub unsafe fn IupGLCanvas(action: *const c_char) -> *mut Ihandle {
    create_with(c"glcanvas", &[(c"ACTION", action)])
}

#[cfg(feature = "gl")]
pub unsafe fn IupGLMakeCurrent(ih: *mut Ihandle) {
    if is_live(ih) {
        GL_CURRENT.set(ih as usize);
    }
}

#[cfg(feature = "gl")]
pub unsafe fn IupGLIsCurrent(ih: *mut Ihandle) -> c_int {
    c_int::from(is_live(ih) && GL_CURRENT.get() == ih as usize)
}

#[cfg(feature = "gl")]
pub unsafe fn IupGLSwapBuffers(ih: *mut Ihandle) {
    with_node(ih, |_| ());
}

#[cfg(feature = "web")]
pub unsafe fn IupWebBrowserOpen() -> c_int {
    IUP_NOERROR
}

#[cfg(feature = "web")]
pub unsafe fn IupWebBrowser() -> *mut Ihandle {
    create(c"webbrowser")
}

#[cfg(feature = "ctl")]
pub unsafe fn IupControlsOpen() -> c_int {
    IUP_NOERROR
}

#[cfg(feature = "ctl")]
pub unsafe fn IupMatrix(action: *const c_char) -> *mut Ihandle {
    create_with(c"matrix", &[(c"ACTION", action)])
}
