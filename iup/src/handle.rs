// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{
    callback::{Callback, Signature},
    lossy, sys, Error, PostTarget, Result,
};
use iup_sys::{Ihandle, IUP_DEFAULT, IUP_NOERROR};
use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
    ffi::{CStr, CString},
    fmt,
    hash::{Hash, Hasher},
    mem,
    os::raw::c_int,
    panic::{self, AssertUnwindSafe},
    ptr::{self, NonNull},
    rc::Rc,
};
use uuid::Uuid;

/// Pointer attribute holding the element's [`ElementState`].
pub(crate) const STATE_ATTR: &CStr = c"_IUPRS_STATE";

/// Prefix of every attribute this crate stores for itself.
pub(crate) const PRIVATE_PREFIX: &str = "_IUPRS_";

/// Rust-side state owned by a native element.
///
/// The element keeps one strong reference in [`STATE_ATTR`] and gives it up
/// from `LDESTROY_CB`, which IUP calls for every element it destroys.
pub(crate) struct ElementState {
    uuid: Uuid,
    alive: Cell<bool>,
    callbacks: RefCell<HashMap<&'static str, Callback>>,
    /// Callbacks removed while their closure was running.
    unbound: RefCell<HashSet<String>>,
}

impl ElementState {
    fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            alive: Cell::new(true),
            callbacks: RefCell::new(HashMap::new()),
            unbound: RefCell::new(HashSet::new()),
        }
    }

    pub(crate) fn insert_callback(&self, name: &'static str, callback: Callback) -> Option<Callback> {
        self.callbacks.borrow_mut().insert(name, callback)
    }

    pub(crate) fn remove_callback(&self, name: &str) -> Option<Callback> {
        self.callbacks.borrow_mut().remove(name)
    }

    pub(crate) fn take_callback(&self, name: &str) -> Option<Callback> {
        self.unbound.borrow_mut().remove(name);
        self.remove_callback(name)
    }

    pub(crate) fn unbind_running(&self, name: &str) {
        self.unbound.borrow_mut().insert(name.to_owned());
    }

    /// Puts a closure back after dispatch, unless it was replaced or removed
    /// while running or the element died.
    pub(crate) fn restore_callback(&self, name: &'static str, callback: Callback) {
        let unbound = self.unbound.borrow_mut().remove(name);
        if unbound || !self.alive.get() {
            return;
        }

        let replaced = {
            let mut callbacks = self.callbacks.borrow_mut();
            if callbacks.contains_key(name) {
                Some(callback)
            } else {
                callbacks.insert(name, callback);
                None
            }
        };
        drop(replaced);
    }

    pub(crate) fn signature_of(&self, name: &str) -> Option<Signature> {
        self.callbacks.borrow().get(name).map(Callback::signature)
    }

    fn callback_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.callbacks.borrow().keys().copied().collect();
        names.sort_unstable();
        names
    }

    fn release(&self) {
        self.alive.set(false);
        let callbacks = mem::take(&mut *self.callbacks.borrow_mut());
        drop(callbacks);
    }
}

/// A reference to an IUP interface element.
///
/// Cloning a `Handle` does not clone the element. IUP owns the element: it
/// lives until [`Handle::destroy`] is called on it or one of its ancestors,
/// or until [`close`](crate::close). Afterwards every operation on any clone
/// returns [`Error::Destroyed`].
#[derive(Clone)]
pub struct Handle {
    ptr: NonNull<Ihandle>,
    state: Rc<ElementState>,
}

/// Reads the state pointer of `ih` and takes a new strong reference to it.
unsafe fn state_of(ih: *mut Ihandle) -> Option<Rc<ElementState>> {
    let raw = sys::IupGetAttribute(ih, STATE_ATTR.as_ptr()) as *const ElementState;
    if raw.is_null() {
        return None;
    }

    Rc::increment_strong_count(raw);
    Some(Rc::from_raw(raw))
}

unsafe extern "C" fn release_state(ih: *mut Ihandle) -> c_int {
    let raw = sys::IupGetAttribute(ih, STATE_ATTR.as_ptr()) as *const ElementState;
    if raw.is_null() {
        return IUP_DEFAULT;
    }

    sys::IupSetAttribute(ih, STATE_ATTR.as_ptr(), ptr::null());
    let state = Rc::from_raw(raw);
    log::debug!("element {} destroyed", state.uuid);

    // Dropping user closures runs user code; keep it out of the C stack.
    if panic::catch_unwind(AssertUnwindSafe(|| state.release())).is_err() {
        log::error!("dropping the closures of {} panicked", state.uuid);
    }

    IUP_DEFAULT
}

impl Handle {
    /// Wraps the result of a constructor.
    pub(crate) fn from_new(class: &str, ih: *mut Ihandle) -> Result<Self> {
        let ptr = NonNull::new(ih).ok_or_else(|| Error::Create { class: class.to_owned() })?;
        let handle = unsafe { Self::adopt(ptr) };
        log::debug!("created {} {}", class, handle.state.uuid);

        Ok(handle)
    }

    /// Wraps an element returned by IUP.
    ///
    /// # Safety
    ///
    /// `ih` must be null or a live element.
    pub unsafe fn from_raw(ih: *mut Ihandle) -> Option<Self> {
        NonNull::new(ih).map(|ptr| Self::adopt(ptr))
    }

    /// Handle for the element a callback fired on. Never adopts.
    pub(crate) unsafe fn from_callback(ih: *mut Ihandle) -> Option<Self> {
        let ptr = NonNull::new(ih)?;
        state_of(ih).map(|state| Self { ptr, state })
    }

    unsafe fn adopt(ptr: NonNull<Ihandle>) -> Self {
        let ih = ptr.as_ptr();
        if let Some(state) = state_of(ih) {
            return Self { ptr, state };
        }

        let state = Rc::new(ElementState::new());
        let owned = Rc::into_raw(Rc::clone(&state));
        sys::IupSetAttribute(ih, STATE_ATTR.as_ptr(), owned.cast());

        let uuid = CString::new(state.uuid.to_string()).unwrap_or_default();
        sys::IupSetStrAttribute(ih, c"UUID".as_ptr(), uuid.as_ptr());
        sys::IupSetCallback(ih, c"LDESTROY_CB".as_ptr(), Some(release_state));

        Self { ptr, state }
    }

    /// The element pointer, checked against destruction.
    pub(crate) fn raw(&self) -> Result<*mut Ihandle> {
        if self.state.alive.get() {
            Ok(self.ptr.as_ptr())
        } else {
            Err(Error::Destroyed)
        }
    }

    pub(crate) fn state(&self) -> &ElementState {
        &self.state
    }

    /// The raw element pointer, for calling into [`iup_sys`] directly.
    pub fn as_ptr(&self) -> *mut Ihandle {
        self.ptr.as_ptr()
    }

    /// Identifier generated when the element was first seen by this crate.
    /// Also readable as the `UUID` attribute.
    pub fn uuid(&self) -> Uuid {
        self.state.uuid
    }

    pub fn is_alive(&self) -> bool {
        self.state.alive.get()
    }

    pub fn class_name(&self) -> Result<String> {
        let ih = self.raw()?;
        let name = unsafe { lossy(sys::IupGetClassName(ih)) };

        Ok(name.map(|s| s.into_owned()).unwrap_or_default())
    }

    /// Destroys the element and all of its children, dropping their closures.
    pub fn destroy(&self) -> Result<()> {
        let ih = self.raw()?;
        unsafe { sys::IupDestroy(ih) };

        Ok(())
    }

    /// Creates the native peers of the element and its children.
    pub fn map(&self) -> Result<()> {
        let ih = self.raw()?;
        check("IupMap", unsafe { sys::IupMap(ih) })
    }

    pub fn unmap(&self) -> Result<()> {
        let ih = self.raw()?;
        unsafe { sys::IupUnmap(ih) };

        Ok(())
    }

    pub fn show(&self) -> Result<()> {
        let ih = self.raw()?;
        check("IupShow", unsafe { sys::IupShow(ih) })
    }

    pub fn show_xy(&self, x: Position, y: Position) -> Result<()> {
        let ih = self.raw()?;
        check("IupShowXY", unsafe { sys::IupShowXY(ih, x.into(), y.into()) })
    }

    pub fn hide(&self) -> Result<()> {
        let ih = self.raw()?;
        check("IupHide", unsafe { sys::IupHide(ih) })
    }

    /// Shows a dialog in modal mode, returning once it is closed.
    pub fn popup(&self, x: Position, y: Position) -> Result<()> {
        let ih = self.raw()?;
        check("IupPopup", unsafe { sys::IupPopup(ih, x.into(), y.into()) })
    }

    /// Recomputes the layout of the dialog containing the element.
    pub fn refresh(&self) -> Result<()> {
        let ih = self.raw()?;
        unsafe { sys::IupRefresh(ih) };

        Ok(())
    }

    pub fn update(&self) -> Result<()> {
        let ih = self.raw()?;
        unsafe { sys::IupUpdate(ih) };

        Ok(())
    }

    pub fn redraw(&self, children: bool) -> Result<()> {
        let ih = self.raw()?;
        unsafe { sys::IupRedraw(ih, children.into()) };

        Ok(())
    }

    pub fn append(&self, child: &Handle) -> Result<&Self> {
        let ih = self.raw()?;
        let child = child.raw()?;
        if unsafe { sys::IupAppend(ih, child) }.is_null() {
            return Err(Error::Status { op: "IupAppend", code: iup_sys::IUP_ERROR });
        }

        Ok(self)
    }

    /// Inserts `child` before `ref_child`, or first if `ref_child` is `None`.
    pub fn insert(&self, ref_child: Option<&Handle>, child: &Handle) -> Result<&Self> {
        let ih = self.raw()?;
        let ref_child = optional(ref_child)?;
        let child = child.raw()?;
        if unsafe { sys::IupInsert(ih, ref_child, child) }.is_null() {
            return Err(Error::Status { op: "IupInsert", code: iup_sys::IUP_ERROR });
        }

        Ok(self)
    }

    /// Removes the element from its parent without destroying it.
    pub fn detach(&self) -> Result<()> {
        let ih = self.raw()?;
        unsafe { sys::IupDetach(ih) };

        Ok(())
    }

    pub fn reparent(&self, new_parent: &Handle, ref_child: Option<&Handle>) -> Result<()> {
        let ih = self.raw()?;
        let new_parent = new_parent.raw()?;
        let ref_child = optional(ref_child)?;

        check("IupReparent", unsafe { sys::IupReparent(ih, new_parent, ref_child) })
    }

    pub fn parent(&self) -> Result<Option<Handle>> {
        let ih = self.raw()?;
        Ok(unsafe { Self::from_raw(sys::IupGetParent(ih)) })
    }

    pub fn child(&self, pos: usize) -> Result<Option<Handle>> {
        let ih = self.raw()?;
        let Ok(pos) = c_int::try_from(pos) else {
            return Ok(None);
        };

        Ok(unsafe { Self::from_raw(sys::IupGetChild(ih, pos)) })
    }

    pub fn child_pos(&self, child: &Handle) -> Result<Option<usize>> {
        let ih = self.raw()?;
        let child = child.raw()?;
        let pos = unsafe { sys::IupGetChildPos(ih, child) };

        Ok(usize::try_from(pos).ok())
    }

    pub fn child_count(&self) -> Result<usize> {
        let ih = self.raw()?;
        let count = unsafe { sys::IupGetChildCount(ih) };

        Ok(usize::try_from(count).unwrap_or(0))
    }

    pub fn children(&self) -> Result<Vec<Handle>> {
        let ih = self.raw()?;
        let mut children = Vec::new();
        let mut child = unsafe { sys::IupGetNextChild(ih, ptr::null_mut()) };
        while let Some(handle) = unsafe { Self::from_raw(child) } {
            children.push(handle);
            child = unsafe { sys::IupGetNextChild(ih, child) };
        }

        Ok(children)
    }

    /// The next element under the same parent.
    pub fn brother(&self) -> Result<Option<Handle>> {
        let ih = self.raw()?;
        Ok(unsafe { Self::from_raw(sys::IupGetBrother(ih)) })
    }

    /// The dialog containing the element.
    pub fn dialog(&self) -> Result<Option<Handle>> {
        let ih = self.raw()?;
        Ok(unsafe { Self::from_raw(sys::IupGetDialog(ih)) })
    }

    /// Finds an element of the same dialog by its `NAME` attribute.
    pub fn dialog_child(&self, name: &str) -> Result<Option<Handle>> {
        let ih = self.raw()?;
        let name = CString::new(name)?;

        Ok(unsafe { Self::from_raw(sys::IupGetDialogChild(ih, name.as_ptr())) })
    }

    /// Moves keyboard focus to the element, returning the previous owner.
    pub fn set_focus(&self) -> Result<Option<Handle>> {
        let ih = self.raw()?;
        Ok(unsafe { Self::from_raw(sys::IupSetFocus(ih)) })
    }

    /// Associates a global name with the element (`IupSetHandle`).
    pub fn set_name(&self, name: &str) -> Result<&Self> {
        let ih = self.raw()?;
        let name = CString::new(name)?;
        unsafe { sys::IupSetHandle(name.as_ptr(), ih) };

        Ok(self)
    }

    pub fn name(&self) -> Result<Option<String>> {
        let ih = self.raw()?;
        Ok(unsafe { lossy(sys::IupGetName(ih)) }.map(|s| s.into_owned()))
    }

    /// The global name of the element, assigning one if it has none.
    pub(crate) fn ensure_name(&self) -> Result<CString> {
        if let Some(name) = self.name()? {
            return Ok(CString::new(name)?);
        }

        let name = format!("{}{}", PRIVATE_PREFIX, self.state.uuid.simple());
        self.set_name(&name)?;

        Ok(CString::new(name)?)
    }

    /// A token through which worker threads can post messages to the element.
    pub fn post_target(&self) -> Result<PostTarget> {
        let ih = self.raw()?;
        Ok(PostTarget::new(ih))
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl Eq for Handle {}

impl Hash for Handle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ptr.hash(state);
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Handle");
        s.field("ptr", &self.ptr).field("uuid", &self.state.uuid);
        match self.class_name() {
            Ok(class) => s.field("class", &class),
            Err(_) => s.field("alive", &false),
        };
        s.finish()
    }
}

impl fmt::Debug for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementState")
            .field("uuid", &self.uuid)
            .field("alive", &self.alive.get())
            .field("callbacks", &self.callback_names())
            .finish()
    }
}

impl Handle {
    /// Names of the callbacks bound to closures on this element.
    pub fn callback_names(&self) -> Vec<&'static str> {
        self.state.callback_names()
    }
}

fn optional(handle: Option<&Handle>) -> Result<*mut Ihandle> {
    handle.map_or(Ok(ptr::null_mut()), Handle::raw)
}

pub(crate) fn check(op: &'static str, code: c_int) -> Result<()> {
    if code == IUP_NOERROR {
        Ok(())
    } else {
        Err(Error::Status { op, code })
    }
}

/// Screen position for [`Handle::show_xy`] and [`Handle::popup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    At(i32),
    Center,
    Left,
    Right,
    Top,
    Bottom,
    MousePos,
    Current,
    CenterParent,
    LeftParent,
    RightParent,
}

impl From<Position> for c_int {
    fn from(pos: Position) -> c_int {
        use iup_sys::*;

        match pos {
            Position::At(n) => n,
            Position::Center => IUP_CENTER,
            Position::Left => IUP_LEFT,
            Position::Right => IUP_RIGHT,
            Position::Top => IUP_TOP,
            Position::Bottom => IUP_BOTTOM,
            Position::MousePos => IUP_MOUSEPOS,
            Position::Current => IUP_CURRENT,
            Position::CenterParent => IUP_CENTERPARENT,
            Position::LeftParent => IUP_LEFTPARENT,
            Position::RightParent => IUP_RIGHTPARENT,
        }
    }
}
