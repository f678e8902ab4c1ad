// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binding closures to callbacks and firing them through the headless backend.

#![cfg(not(feature = "native"))]

use iup::{
    headless::simulate, Callback, CallbackReturn, Error, KeyStatus, Modifier, MouseButton,
    Signature,
};
use std::{cell::Cell, cell::RefCell, rc::Rc};

/// Opens IUP for the current test thread and closes it on drop.
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

fn counter() -> (Rc<Cell<i32>>, Rc<Cell<i32>>) {
    let count = Rc::new(Cell::new(0));
    (Rc::clone(&count), count)
}

// ── binding ───────────────────────────────────────────────────────────────────

#[test]
fn button_action_runs_closure() {
    let _iup = Session::open();
    let (count, seen) = counter();

    let button = iup::button("OK").unwrap();
    button
        .set_callback("ACTION", Callback::plain(move |_| {
            count.set(count.get() + 1);
            CallbackReturn::Default
        }))
        .unwrap();

    assert_eq!(simulate::click(&button).unwrap(), Some(CallbackReturn::Default));
    assert_eq!(seen.get(), 1);
    assert_eq!(button.callback_names(), ["ACTION"]);
    assert_eq!(button.callback_signature("ACTION"), Some(Signature::Plain));
}

#[test]
fn closure_receives_its_element() {
    let _iup = Session::open();
    let button = iup::button("OK").unwrap();
    let expected = button.clone();
    let matched = Rc::new(Cell::new(false));
    let flag = Rc::clone(&matched);

    button
        .set_callback("ACTION", Callback::plain(move |h| {
            flag.set(*h == expected && h.uuid() == expected.uuid());
            CallbackReturn::Default
        }))
        .unwrap();
    simulate::click(&button).unwrap();

    assert!(matched.get());
}

#[test]
fn unbound_callback_is_not_fired() {
    let _iup = Session::open();
    let button = iup::button("OK").unwrap();

    assert_eq!(simulate::click(&button).unwrap(), None);
    assert!(button.callback_names().is_empty());
}

#[test]
fn unsupported_signature_is_rejected() {
    let _iup = Session::open();
    let button = iup::button("OK").unwrap();

    let result = button.set_callback(
        "ACTION",
        Callback::button(|_, _, _, _, _, _| CallbackReturn::Default),
    );
    assert!(matches!(
        result,
        Err(Error::UnsupportedCallback { ref name, signature: Signature::Button }) if name == "ACTION"
    ));
    assert!(!button.has_callback("ACTION"));

    let result = button.set_callback("NO_SUCH_CB", Callback::plain(|_| CallbackReturn::Default));
    assert!(matches!(result, Err(Error::UnsupportedCallback { .. })));
}

#[test]
fn rebinding_drops_previous_closure() {
    let _iup = Session::open();
    let token = Rc::new(());
    let button = iup::button("OK").unwrap();

    let held = Rc::clone(&token);
    button
        .set_callback("ACTION", Callback::plain(move |_| {
            let _ = &held;
            CallbackReturn::Default
        }))
        .unwrap();
    assert_eq!(Rc::strong_count(&token), 2);

    button.set_callback("ACTION", Callback::plain(|_| CallbackReturn::Close)).unwrap();
    assert_eq!(Rc::strong_count(&token), 1);
    assert_eq!(simulate::click(&button).unwrap(), Some(CallbackReturn::Close));
}

#[test]
fn removed_callback_stops_firing() {
    let _iup = Session::open();
    let (count, seen) = counter();
    let button = iup::button("OK").unwrap();

    button
        .set_callback("ACTION", Callback::plain(move |_| {
            count.set(count.get() + 1);
            CallbackReturn::Default
        }))
        .unwrap();
    button.remove_callback("ACTION").unwrap();

    assert_eq!(simulate::click(&button).unwrap(), None);
    assert_eq!(seen.get(), 0);
    assert!(!button.has_callback("ACTION"));
}

// ── signatures ────────────────────────────────────────────────────────────────

#[test]
fn canvas_button_motion_and_wheel() {
    let _iup = Session::open();
    let canvas = iup::canvas().unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));

    let events = Rc::clone(&log);
    canvas
        .set_callback("BUTTON_CB", Callback::button(move |_, button, pressed, x, y, status| {
            events.borrow_mut().push(format!(
                "button {:?} {} {} {} shift={}",
                button, pressed, x, y, status.is_shift(),
            ));
            CallbackReturn::Default
        }))
        .unwrap();
    let events = Rc::clone(&log);
    canvas
        .set_callback("MOTION_CB", Callback::motion(move |_, x, y, status| {
            events.borrow_mut().push(format!("motion {} {} b1={}", x, y, status.has(Modifier::Button1)));
            CallbackReturn::Default
        }))
        .unwrap();
    let events = Rc::clone(&log);
    canvas
        .set_callback("WHEEL_CB", Callback::wheel(move |_, delta, x, y, _| {
            events.borrow_mut().push(format!("wheel {} {} {}", delta, x, y));
            CallbackReturn::Default
        }))
        .unwrap();

    let shift = KeyStatus::default().with(Modifier::Shift);
    simulate::button(&canvas, MouseButton::Left, true, 10, 20, shift).unwrap();
    let drag = KeyStatus::default().with(Modifier::Button1);
    simulate::motion(&canvas, 11, 21, drag).unwrap();
    simulate::wheel(&canvas, -1.0, 5, 6, KeyStatus::default()).unwrap();

    assert_eq!(
        *log.borrow(),
        ["button Left true 10 20 shift=true", "motion 11 21 b1=true", "wheel -1 5 6"],
    );
}

#[test]
fn canvas_scroll_action_takes_floats() {
    let _iup = Session::open();
    let canvas = iup::canvas().unwrap();
    let seen = Rc::new(Cell::new((0.0, 0.0)));
    let pos = Rc::clone(&seen);

    canvas
        .set_callback("ACTION", Callback::float_float(move |_, x, y| {
            pos.set((x, y));
            CallbackReturn::Default
        }))
        .unwrap();
    simulate::call_float_float(&canvas, "ACTION", 1.0, 2.5).unwrap();

    assert_eq!(seen.get(), (1.0, 2.5));
}

#[test]
fn dialog_resize_takes_two_ints() {
    let _iup = Session::open();
    let dialog = iup::dialog(None).unwrap();
    let seen = Rc::new(Cell::new((0, 0)));
    let size = Rc::clone(&seen);

    dialog
        .set_callback("RESIZE_CB", Callback::int_int(move |_, w, h| {
            size.set((w, h));
            CallbackReturn::Default
        }))
        .unwrap();
    simulate::call_int_int(&dialog, "RESIZE_CB", 640, 480).unwrap();

    assert_eq!(seen.get(), (640, 480));
}

#[test]
fn text_action_sees_new_value() {
    let _iup = Session::open();
    let text = iup::text().unwrap();
    let seen = Rc::new(RefCell::new(None));
    let value = Rc::clone(&seen);

    text.set_callback("ACTION", Callback::text_action(move |_, c, new_value| {
        *value.borrow_mut() = Some((c, new_value.map(str::to_owned)));
        if c == i32::from(b'x') {
            CallbackReturn::Ignore
        } else {
            CallbackReturn::Default
        }
    }))
    .unwrap();

    let ret = simulate::text_action(&text, i32::from(b'a'), Some("a")).unwrap();
    assert_eq!(ret, Some(CallbackReturn::Default));
    assert_eq!(*seen.borrow(), Some((i32::from(b'a'), Some("a".to_owned()))));

    let ret = simulate::text_action(&text, i32::from(b'x'), None).unwrap();
    assert_eq!(ret, Some(CallbackReturn::Ignore));
    assert_eq!(*seen.borrow(), Some((i32::from(b'x'), None)));
}

#[test]
fn list_action_reports_item() {
    let _iup = Session::open();
    let list = iup::list().unwrap();
    list.set_attribute("1", "one").unwrap().set_attribute("2", "two").unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let items = Rc::clone(&seen);

    list.set_callback("ACTION", Callback::list_action(move |_, text, item, state| {
        items.borrow_mut().push((text.to_owned(), item, state));
        CallbackReturn::Default
    }))
    .unwrap();
    simulate::list_action(&list, "two", 2, 1).unwrap();

    assert_eq!(*seen.borrow(), [("two".to_owned(), 2, 1)]);
}

#[test]
fn toggle_switches_value() {
    let _iup = Session::open();
    let toggle = iup::toggle("Bold").unwrap();
    let (state, seen) = counter();

    toggle
        .set_callback("ACTION", Callback::int(move |_, on| {
            state.set(on);
            CallbackReturn::Default
        }))
        .unwrap();

    simulate::toggle(&toggle, true).unwrap();
    assert_eq!(seen.get(), 1);
    assert_eq!(toggle.get_attribute("VALUE").unwrap().as_deref(), Some("ON"));
    assert!(toggle.get_bool("VALUE").unwrap());

    simulate::toggle(&toggle, false).unwrap();
    assert_eq!(seen.get(), 0);
    assert!(!toggle.get_bool("VALUE").unwrap());
}

#[test]
fn key_press_reaches_k_any() {
    let _iup = Session::open();
    let dialog = iup::dialog(None).unwrap();
    let (key, seen) = counter();

    dialog
        .set_callback("K_ANY", Callback::int(move |_, c| {
            key.set(c);
            if c == iup::ffi::K_ESC {
                CallbackReturn::Close
            } else {
                CallbackReturn::Default
            }
        }))
        .unwrap();

    assert_eq!(simulate::key(&dialog, iup::ffi::K_ESC).unwrap(), Some(CallbackReturn::Close));
    assert_eq!(seen.get(), iup::ffi::K_ESC);
}

#[test]
fn dropped_files_arrive_one_by_one() {
    let _iup = Session::open();
    let canvas = iup::canvas().unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let files = Rc::clone(&seen);

    canvas
        .set_callback("DROPFILES_CB", Callback::drop_files(move |_, name, num, _, _| {
            files.borrow_mut().push((name.to_owned(), num));
            CallbackReturn::Default
        }))
        .unwrap();
    simulate::drop_files(&canvas, "/tmp/a.txt", 1, 0, 0).unwrap();
    simulate::drop_files(&canvas, "/tmp/b.txt", 0, 0, 0).unwrap();

    assert_eq!(*seen.borrow(), [("/tmp/a.txt".to_owned(), 1), ("/tmp/b.txt".to_owned(), 0)]);
}

#[test]
fn link_action_receives_the_url() {
    let _iup = Session::open();
    let link = iup::link("https://example.org", "site").unwrap();
    let opened = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&opened);

    link
        .set_callback("ACTION", Callback::str(move |_, url| {
            log.borrow_mut().push(url.to_owned());
            CallbackReturn::Ignore
        }))
        .unwrap();

    assert_eq!(
        simulate::call_str(&link, "ACTION", "https://example.org/docs").unwrap(),
        Some(CallbackReturn::Ignore),
    );
    assert_eq!(*opened.borrow(), ["https://example.org/docs"]);
    assert_eq!(link.callback_signature("ACTION"), Some(Signature::Str));
}

#[test]
fn firing_with_other_arguments_is_refused() {
    let _iup = Session::open();
    let canvas = iup::canvas().unwrap();
    let (count, seen) = counter();

    canvas
        .set_callback("BUTTON_CB", Callback::button(move |_, _, _, _, _, _| {
            count.set(count.get() + 1);
            CallbackReturn::Default
        }))
        .unwrap();

    assert!(matches!(
        simulate::call_int(&canvas, "BUTTON_CB", 7),
        Err(Error::SignatureMismatch { ref name, registered: Signature::Button })
            if name == "BUTTON_CB"
    ));
    assert_eq!(seen.get(), 0);

    let list = iup::list().unwrap();
    list.set_callback("ACTION", Callback::list_action(|_, _, _, _| CallbackReturn::Default))
        .unwrap();
    assert!(matches!(
        simulate::click(&list),
        Err(Error::SignatureMismatch { registered: Signature::ListAction, .. })
    ));

    simulate::button(&canvas, MouseButton::Left, true, 0, 0, KeyStatus::default()).unwrap();
    assert_eq!(seen.get(), 1);
}

// ── lifetime ──────────────────────────────────────────────────────────────────

#[test]
fn elements_get_distinct_uuids() {
    let _iup = Session::open();
    let a = iup::button("a").unwrap();
    let b = iup::button("b").unwrap();

    assert_ne!(a.uuid(), b.uuid());
    assert_eq!(a.get_attribute("UUID").unwrap(), Some(a.uuid().to_string()));
    assert_eq!(a.clone().uuid(), a.uuid());
}

#[test]
fn closures_stay_with_their_element() {
    let _iup = Session::open();
    let (a_count, a_seen) = counter();
    let (b_count, b_seen) = counter();
    let a = iup::button("a").unwrap();
    let b = iup::button("b").unwrap();

    a.set_callback("ACTION", Callback::plain(move |_| {
        a_count.set(a_count.get() + 1);
        CallbackReturn::Default
    }))
    .unwrap();
    b.set_callback("ACTION", Callback::plain(move |_| {
        b_count.set(b_count.get() + 1);
        CallbackReturn::Default
    }))
    .unwrap();

    simulate::click(&a).unwrap();
    simulate::click(&a).unwrap();
    assert_eq!((a_seen.get(), b_seen.get()), (2, 0));

    b.remove_callback("ACTION").unwrap();
    simulate::click(&a).unwrap();
    assert_eq!(simulate::click(&b).unwrap(), None);
    assert_eq!((a_seen.get(), b_seen.get()), (3, 0));
}

#[test]
fn destroy_drops_closures_and_invalidates_handles() {
    let _iup = Session::open();
    let token = Rc::new(());
    let button = iup::button("OK").unwrap();
    let copy = button.clone();

    let held = Rc::clone(&token);
    button
        .set_callback("ACTION", Callback::plain(move |_| {
            let _ = &held;
            CallbackReturn::Default
        }))
        .unwrap();
    assert_eq!(Rc::strong_count(&token), 2);

    button.destroy().unwrap();

    assert_eq!(Rc::strong_count(&token), 1);
    assert!(!copy.is_alive());
    assert!(matches!(copy.set_attribute("TITLE", "gone"), Err(Error::Destroyed)));
    assert!(matches!(simulate::click(&copy), Err(Error::Destroyed)));
    assert!(matches!(copy.destroy(), Err(Error::Destroyed)));
}

#[test]
fn destroying_a_dialog_releases_its_children() {
    let _iup = Session::open();
    let token = Rc::new(());
    let button = iup::button("OK").unwrap();
    let dialog = iup::dialog(Some(&iup::vbox(&[&button]).unwrap())).unwrap();

    let held = Rc::clone(&token);
    button
        .set_callback("ACTION", Callback::plain(move |_| {
            let _ = &held;
            CallbackReturn::Default
        }))
        .unwrap();
    let (destroyed, seen) = counter();
    button
        .set_callback("DESTROY_CB", Callback::plain(move |_| {
            destroyed.set(destroyed.get() + 1);
            CallbackReturn::Default
        }))
        .unwrap();

    dialog.destroy().unwrap();

    assert_eq!(seen.get(), 1);
    assert_eq!(Rc::strong_count(&token), 1);
    assert!(!button.is_alive());
}

#[test]
fn close_releases_everything() {
    let token = Rc::new(());
    let button = {
        let _iup = Session::open();
        let button = iup::button("OK").unwrap();
        let held = Rc::clone(&token);
        button
            .set_callback("ACTION", Callback::plain(move |_| {
                let _ = &held;
                CallbackReturn::Default
            }))
            .unwrap();
        button
    };

    assert!(!button.is_alive());
    assert_eq!(Rc::strong_count(&token), 1);
}

// ── dispatch ──────────────────────────────────────────────────────────────────

#[test]
fn panicking_closure_answers_default() {
    let _iup = Session::open();
    let button = iup::button("OK").unwrap();

    button.set_callback("ACTION", Callback::plain(|_| panic!("boom"))).unwrap();

    assert_eq!(simulate::click(&button).unwrap(), Some(CallbackReturn::Default));
    assert!(button.has_callback("ACTION"));
    assert_eq!(simulate::click(&button).unwrap(), Some(CallbackReturn::Default));
}

#[test]
fn closure_can_replace_itself() {
    let _iup = Session::open();
    let button = iup::button("OK").unwrap();

    button
        .set_callback("ACTION", Callback::plain(|h| {
            match h.set_callback("ACTION", Callback::plain(|_| CallbackReturn::Close)) {
                Ok(_) => CallbackReturn::Default,
                Err(_) => CallbackReturn::Ignore,
            }
        }))
        .unwrap();

    assert_eq!(simulate::click(&button).unwrap(), Some(CallbackReturn::Default));
    assert_eq!(simulate::click(&button).unwrap(), Some(CallbackReturn::Close));
}

#[test]
fn closure_can_remove_itself() {
    let _iup = Session::open();
    let (count, seen) = counter();
    let button = iup::button("OK").unwrap();

    button
        .set_callback("ACTION", Callback::plain(move |h| {
            count.set(count.get() + 1);
            let _ = h.remove_callback("ACTION");
            CallbackReturn::Default
        }))
        .unwrap();

    simulate::click(&button).unwrap();
    assert_eq!(simulate::click(&button).unwrap(), None);
    assert_eq!(seen.get(), 1);
    assert!(!button.has_callback("ACTION"));
}

#[test]
fn closure_can_destroy_its_element() {
    let _iup = Session::open();
    let token = Rc::new(());
    let button = iup::button("OK").unwrap();

    let held = Rc::clone(&token);
    button
        .set_callback("ACTION", Callback::plain(move |h| {
            let _ = &held;
            let _ = h.destroy();
            CallbackReturn::Default
        }))
        .unwrap();

    assert_eq!(simulate::click(&button).unwrap(), Some(CallbackReturn::Default));
    assert!(!button.is_alive());
    assert_eq!(Rc::strong_count(&token), 1);
}
