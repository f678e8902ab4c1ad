// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The element tree, names, focus and visibility.

#![cfg(not(feature = "native"))]

use iup::{Callback, CallbackReturn, Error, Position};
use std::{cell::RefCell, rc::Rc};

struct Session;

impl Session {
    fn open() -> Self {
        iup::open().unwrap();
        Session
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        iup::close();
    }
}

fn titles(parent: &iup::Handle) -> Vec<String> {
    parent
        .children()
        .unwrap()
        .iter()
        .map(|child| child.get_attribute("TITLE").unwrap().unwrap_or_default())
        .collect()
}

// ── building ──────────────────────────────────────────────────────────────────

#[test]
fn boxes_keep_child_order() {
    let _iup = Session::open();
    let a = iup::button("a").unwrap();
    let b = iup::button("b").unwrap();
    let vbox = iup::vbox(&[&a, &b]).unwrap();

    assert_eq!(titles(&vbox), ["a", "b"]);
    assert_eq!(vbox.child_count().unwrap(), 2);
    assert_eq!(vbox.child(1).unwrap(), Some(b.clone()));
    assert_eq!(vbox.child(2).unwrap(), None);
    assert_eq!(vbox.child_pos(&b).unwrap(), Some(1));
    assert_eq!(a.parent().unwrap(), Some(vbox.clone()));
    assert_eq!(a.brother().unwrap(), Some(b.clone()));
    assert_eq!(b.brother().unwrap(), None);
}

#[test]
fn append_and_insert() {
    let _iup = Session::open();
    let hbox = iup::hbox(&[]).unwrap();
    let b = iup::button("b").unwrap();
    let a = iup::button("a").unwrap();
    let c = iup::button("c").unwrap();

    hbox.append(&b).unwrap();
    hbox.insert(None, &a).unwrap();
    hbox.append(&c).unwrap();
    assert_eq!(titles(&hbox), ["a", "b", "c"]);

    let ab = iup::button("ab").unwrap();
    hbox.insert(Some(&b), &ab).unwrap();
    assert_eq!(titles(&hbox), ["a", "ab", "b", "c"]);
}

#[test]
fn single_child_containers_refuse_a_second() {
    let _iup = Session::open();
    let frame = iup::frame(Some(&iup::label("inside").unwrap())).unwrap();
    let extra = iup::label("extra").unwrap();

    assert!(matches!(frame.append(&extra), Err(Error::Status { op: "IupAppend", .. })));
    assert_eq!(extra.parent().unwrap(), None);

    let button = iup::button("leaf").unwrap();
    assert!(button.append(&extra).is_err());
}

#[test]
fn split_holds_two() {
    let _iup = Session::open();
    let split = iup::split(Some(&iup::canvas().unwrap()), Some(&iup::canvas().unwrap())).unwrap();

    assert_eq!(split.child_count().unwrap(), 2);
    assert!(split.append(&iup::canvas().unwrap()).is_err());
}

#[test]
fn element_cannot_have_two_parents() {
    let _iup = Session::open();
    let a = iup::button("a").unwrap();
    let first = iup::vbox(&[&a]).unwrap();
    let second = iup::vbox(&[]).unwrap();

    assert!(second.append(&a).is_err());
    assert_eq!(a.parent().unwrap(), Some(first));
}

#[test]
fn detach_keeps_element_alive() {
    let _iup = Session::open();
    let a = iup::button("a").unwrap();
    let b = iup::button("b").unwrap();
    let vbox = iup::vbox(&[&a, &b]).unwrap();

    a.detach().unwrap();

    assert!(a.is_alive());
    assert_eq!(a.parent().unwrap(), None);
    assert_eq!(titles(&vbox), ["b"]);

    vbox.destroy().unwrap();
    assert!(a.is_alive());
    assert!(!b.is_alive());
}

#[test]
fn reparent_moves_between_boxes() {
    let _iup = Session::open();
    let a = iup::button("a").unwrap();
    let b = iup::button("b").unwrap();
    let left = iup::vbox(&[&a]).unwrap();
    let right = iup::vbox(&[&b]).unwrap();

    a.reparent(&right, Some(&b)).unwrap();

    assert_eq!(left.child_count().unwrap(), 0);
    assert_eq!(titles(&right), ["a", "b"]);
    assert_eq!(a.parent().unwrap(), Some(right));
}

#[test]
fn reparent_into_own_child_fails_in_place() {
    let _iup = Session::open();
    let inner = iup::vbox(&[]).unwrap();
    let first = iup::label("first").unwrap();
    let outer = iup::vbox(&[&first, &inner]).unwrap();

    assert!(matches!(
        outer.reparent(&inner, None),
        Err(Error::Status { op: "IupReparent", .. })
    ));

    let b = iup::button("b").unwrap();
    let c = iup::button("c").unwrap();
    let source = iup::vbox(&[&b, &c]).unwrap();
    let full = iup::frame(Some(&iup::label("x").unwrap())).unwrap();
    assert!(b.reparent(&full, None).is_err());
    assert_eq!(titles(&source), ["b", "c"]);
    assert_eq!(inner.parent().unwrap(), Some(outer));
}

// ── dialogs and names ─────────────────────────────────────────────────────────

#[test]
fn elements_find_their_dialog() {
    let _iup = Session::open();
    let ok = iup::button("OK").unwrap();
    ok.set_attribute("NAME", "ok_button").unwrap();
    let dialog = iup::dialog(Some(&iup::vbox(&[&iup::hbox(&[&ok]).unwrap()]).unwrap())).unwrap();

    assert_eq!(ok.dialog().unwrap(), Some(dialog.clone()));
    assert_eq!(dialog.dialog_child("ok_button").unwrap(), Some(ok.clone()));
    assert_eq!(ok.dialog_child("ok_button").unwrap(), Some(ok));
    assert_eq!(dialog.dialog_child("missing").unwrap(), None);

    let loose = iup::label("loose").unwrap();
    assert_eq!(loose.dialog().unwrap(), None);
}

#[test]
fn global_names() {
    let _iup = Session::open();
    let text = iup::text().unwrap();

    text.set_name("entry").unwrap();

    assert_eq!(text.name().unwrap().as_deref(), Some("entry"));
    assert_eq!(iup::get_handle("entry").unwrap(), Some(text.clone()));
    assert_eq!(iup::get_handle("other").unwrap(), None);

    text.destroy().unwrap();
    assert_eq!(iup::get_handle("entry").unwrap(), None);
}

#[test]
fn focus_moves_between_elements() {
    let _iup = Session::open();
    let events = Rc::new(RefCell::new(Vec::new()));
    let first = iup::text().unwrap();
    let second = iup::text().unwrap();

    for (element, label) in [(&first, "first"), (&second, "second")] {
        let log = Rc::clone(&events);
        element
            .set_callback("GETFOCUS_CB", Callback::plain(move |_| {
                log.borrow_mut().push(format!("{} got focus", label));
                CallbackReturn::Default
            }))
            .unwrap();
        let log = Rc::clone(&events);
        element
            .set_callback("KILLFOCUS_CB", Callback::plain(move |_| {
                log.borrow_mut().push(format!("{} lost focus", label));
                CallbackReturn::Default
            }))
            .unwrap();
    }

    assert_eq!(first.set_focus().unwrap(), None);
    assert_eq!(second.set_focus().unwrap(), Some(first.clone()));
    assert_eq!(iup::get_focus(), Some(second));
    assert_eq!(
        *events.borrow(),
        ["first got focus", "first lost focus", "second got focus"],
    );
}

// ── visibility ────────────────────────────────────────────────────────────────

#[test]
fn show_maps_and_reports_state() {
    let _iup = Session::open();
    let events = Rc::new(RefCell::new(Vec::new()));
    let button = iup::button("OK").unwrap();
    let dialog = iup::dialog(Some(&button)).unwrap();

    let log = Rc::clone(&events);
    button
        .set_callback("MAP_CB", Callback::plain(move |_| {
            log.borrow_mut().push("map".to_owned());
            CallbackReturn::Default
        }))
        .unwrap();
    let log = Rc::clone(&events);
    dialog
        .set_callback("SHOW_CB", Callback::int(move |_, state| {
            log.borrow_mut().push(format!("show {}", state));
            CallbackReturn::Default
        }))
        .unwrap();

    dialog.show_xy(Position::Center, Position::Center).unwrap();
    dialog.show().unwrap();
    assert!(dialog.get_bool("VISIBLE").unwrap());
    dialog.hide().unwrap();
    assert!(!dialog.get_bool("VISIBLE").unwrap());

    assert_eq!(
        *events.borrow(),
        ["map".to_owned(), format!("show {}", iup::ffi::IUP_SHOW), format!("show {}", iup::ffi::IUP_HIDE)],
    );
}

#[test]
fn operations_before_open_fail() {
    assert!(matches!(iup::button("early"), Err(Error::Create { ref class }) if class == "button"));
    assert_eq!(iup::open().unwrap(), iup::OpenStatus::Opened);
    assert_eq!(iup::open().unwrap(), iup::OpenStatus::AlreadyOpen);
    iup::close();
}

#[test]
fn create_by_class_name() {
    let _iup = Session::open();

    assert_eq!(iup::create("button").unwrap().class_name().unwrap(), "button");
    assert!(matches!(
        iup::create("no_such_class"),
        Err(Error::Create { ref class }) if class == "no_such_class"
    ));
}
