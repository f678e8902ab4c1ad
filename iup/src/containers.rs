// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout containers.

use crate::{sys, Handle, Result};
use iup_sys::Ihandle;
use std::ptr;

/// A null-terminated array of children, as the `...v` constructors take.
fn child_array(children: &[&Handle]) -> Result<Vec<*mut Ihandle>> {
    let mut array = children
        .iter()
        .map(|child| child.raw())
        .collect::<Result<Vec<_>>>()?;
    array.push(ptr::null_mut());

    Ok(array)
}

fn optional(child: Option<&Handle>) -> Result<*mut Ihandle> {
    child.map_or(Ok(ptr::null_mut()), Handle::raw)
}

/// Takes up the free space of its parent box.
pub fn fill() -> Result<Handle> {
    Handle::from_new("fill", unsafe { sys::IupFill() })
}

pub fn space() -> Result<Handle> {
    Handle::from_new("space", unsafe { sys::IupSpace() })
}

pub fn vbox(children: &[&Handle]) -> Result<Handle> {
    let mut children = child_array(children)?;
    Handle::from_new("vbox", unsafe { sys::IupVboxv(children.as_mut_ptr()) })
}

pub fn hbox(children: &[&Handle]) -> Result<Handle> {
    let mut children = child_array(children)?;
    Handle::from_new("hbox", unsafe { sys::IupHboxv(children.as_mut_ptr()) })
}

/// Stacks its children; only the one named by `VALUE` is visible.
pub fn zbox(children: &[&Handle]) -> Result<Handle> {
    let mut children = child_array(children)?;
    Handle::from_new("zbox", unsafe { sys::IupZboxv(children.as_mut_ptr()) })
}

/// Places children at absolute positions (`CX`, `CY`).
pub fn cbox(children: &[&Handle]) -> Result<Handle> {
    let mut children = child_array(children)?;
    Handle::from_new("cbox", unsafe { sys::IupCboxv(children.as_mut_ptr()) })
}

pub fn grid_box(children: &[&Handle]) -> Result<Handle> {
    let mut children = child_array(children)?;
    Handle::from_new("gridbox", unsafe { sys::IupGridBoxv(children.as_mut_ptr()) })
}

pub fn tabs(children: &[&Handle]) -> Result<Handle> {
    let mut children = child_array(children)?;
    Handle::from_new("tabs", unsafe { sys::IupTabsv(children.as_mut_ptr()) })
}

/// Makes the elements share a size. The normalizer is not a container:
/// it holds the elements through its `ADDCONTROL_HANDLE` attribute.
pub fn normalizer(elements: &[&Handle]) -> Result<Handle> {
    let mut elements = child_array(elements)?;
    Handle::from_new("normalizer", unsafe { sys::IupNormalizerv(elements.as_mut_ptr()) })
}

/// Groups toggles so that only one is on at a time.
pub fn radio(child: Option<&Handle>) -> Result<Handle> {
    let child = optional(child)?;
    Handle::from_new("radio", unsafe { sys::IupRadio(child) })
}

pub fn frame(child: Option<&Handle>) -> Result<Handle> {
    let child = optional(child)?;
    Handle::from_new("frame", unsafe { sys::IupFrame(child) })
}

/// Lets the user resize `child` with a handle on one side.
pub fn sbox(child: Option<&Handle>) -> Result<Handle> {
    let child = optional(child)?;
    Handle::from_new("sbox", unsafe { sys::IupSbox(child) })
}

pub fn split(first: Option<&Handle>, second: Option<&Handle>) -> Result<Handle> {
    let first = optional(first)?;
    let second = optional(second)?;
    Handle::from_new("split", unsafe { sys::IupSplit(first, second) })
}

pub fn scroll_box(child: Option<&Handle>) -> Result<Handle> {
    let child = optional(child)?;
    Handle::from_new("scrollbox", unsafe { sys::IupScrollBox(child) })
}

pub fn expander(child: Option<&Handle>) -> Result<Handle> {
    let child = optional(child)?;
    Handle::from_new("expander", unsafe { sys::IupExpander(child) })
}

pub fn detach_box(child: Option<&Handle>) -> Result<Handle> {
    let child = optional(child)?;
    Handle::from_new("detachbox", unsafe { sys::IupDetachBox(child) })
}

pub fn background_box(child: Option<&Handle>) -> Result<Handle> {
    let child = optional(child)?;
    Handle::from_new("backgroundbox", unsafe { sys::IupBackgroundBox(child) })
}
