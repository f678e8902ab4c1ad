// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Timers, idle functions, posted messages and leaving the main loop.

#![cfg(not(feature = "native"))]

use iup::{headless::simulate, Callback, CallbackReturn, Position, Step};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    thread,
    time::{Duration, Instant},
};

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

fn timer(ms: i32) -> iup::Handle {
    let timer = iup::timer().unwrap();
    timer.set_attribute("TIME", ms).unwrap();
    timer
}

// ── timers ────────────────────────────────────────────────────────────────────

#[test]
fn timer_closes_the_loop() {
    let _iup = Session::open();
    let ticks = Rc::new(Cell::new(0));
    let count = Rc::clone(&ticks);
    let timer = timer(5);

    timer
        .set_callback("ACTION_CB", Callback::plain(move |_| {
            count.set(count.get() + 1);
            if count.get() == 3 {
                CallbackReturn::Close
            } else {
                CallbackReturn::Default
            }
        }))
        .unwrap();
    timer.set_attribute("RUN", true).unwrap();

    let start = Instant::now();
    iup::main_loop();

    assert_eq!(ticks.get(), 3);
    assert!(start.elapsed() >= Duration::from_millis(15));
    assert_eq!(iup::main_loop_level(), 0);
}

#[test]
fn stopped_timer_lets_the_loop_end() {
    let _iup = Session::open();
    let ticks = Rc::new(Cell::new(0));
    let count = Rc::clone(&ticks);
    let timer = timer(1);

    timer
        .set_callback("ACTION_CB", Callback::plain(move |h| {
            count.set(count.get() + 1);
            let _ = h.set_attribute("RUN", false);
            CallbackReturn::Default
        }))
        .unwrap();
    timer.set_attribute("RUN", true).unwrap();

    iup::main_loop();

    assert_eq!(ticks.get(), 1);
    assert!(!timer.get_bool("RUN").unwrap());
}

#[test]
fn loop_without_work_returns_at_once() {
    let _iup = Session::open();
    let _idle_timer = timer(10);

    iup::main_loop();
    assert_eq!(iup::loop_step(), Step::Continue);
}

// ── leaving the loop ──────────────────────────────────────────────────────────

#[test]
fn exit_loop_from_a_callback() {
    let _iup = Session::open();
    let timer = timer(1);

    timer
        .set_callback("ACTION_CB", Callback::plain(|_| {
            assert_eq!(iup::main_loop_level(), 1);
            iup::exit_loop();
            CallbackReturn::Default
        }))
        .unwrap();
    timer.set_attribute("RUN", true).unwrap();

    iup::main_loop();
    assert!(timer.get_bool("RUN").unwrap());
}

#[test]
fn hiding_the_last_dialog_ends_the_loop() {
    let _iup = Session::open();
    let dialog = iup::dialog(None).unwrap();
    dialog.show_xy(Position::Center, Position::Center).unwrap();
    let timer = timer(1);

    let target = dialog.clone();
    timer
        .set_callback("ACTION_CB", Callback::plain(move |_| {
            let _ = target.hide();
            CallbackReturn::Default
        }))
        .unwrap();
    timer.set_attribute("RUN", true).unwrap();

    iup::main_loop();

    assert!(!dialog.get_bool("VISIBLE").unwrap());
}

#[test]
fn close_box_hides_unless_ignored() {
    let _iup = Session::open();
    let dialog = iup::dialog(None).unwrap();
    let allow = Rc::new(Cell::new(false));
    let gate = Rc::clone(&allow);

    dialog
        .set_callback("CLOSE_CB", Callback::plain(move |_| {
            if gate.get() {
                CallbackReturn::Default
            } else {
                CallbackReturn::Ignore
            }
        }))
        .unwrap();
    dialog.show().unwrap();

    assert_eq!(simulate::close(&dialog).unwrap(), Some(CallbackReturn::Ignore));
    assert!(dialog.get_bool("VISIBLE").unwrap());

    allow.set(true);
    assert_eq!(simulate::close(&dialog).unwrap(), Some(CallbackReturn::Default));
    assert!(!dialog.get_bool("VISIBLE").unwrap());
}

#[test]
fn popup_runs_a_nested_loop() {
    let _iup = Session::open();
    let levels = Rc::new(RefCell::new(Vec::new()));
    let dialog = iup::dialog(None).unwrap();
    let timer = timer(1);

    let seen = Rc::clone(&levels);
    let target = dialog.clone();
    timer
        .set_callback("ACTION_CB", Callback::plain(move |_| {
            seen.borrow_mut().push(iup::main_loop_level());
            let _ = target.hide();
            CallbackReturn::Default
        }))
        .unwrap();
    timer.set_attribute("RUN", true).unwrap();

    dialog.popup(Position::Center, Position::Center).unwrap();

    assert_eq!(*levels.borrow(), [1]);
    assert!(!dialog.get_bool("VISIBLE").unwrap());
    assert_eq!(iup::main_loop_level(), 0);
}

#[test]
fn predefined_dialogs_answer_at_once() {
    let _iup = Session::open();

    let file = iup::file_dlg().unwrap();
    file.popup(Position::Center, Position::Center).unwrap();
    assert_eq!(file.get_int("STATUS").unwrap(), -1);

    assert_eq!(iup::alarm("Quit", "Really?", "Yes", Some("No"), None).unwrap(), 1);
    assert_eq!(iup::get_text("Name", "", 64).unwrap(), None);
    assert_eq!(iup::get_file("*.txt").unwrap(), None);
}

// ── idle ──────────────────────────────────────────────────────────────────────

#[test]
fn idle_runs_until_close() {
    let _iup = Session::open();
    let calls = Rc::new(Cell::new(0));
    let count = Rc::clone(&calls);

    iup::set_idle(move || {
        count.set(count.get() + 1);
        if count.get() == 5 {
            CallbackReturn::Close
        } else {
            CallbackReturn::Default
        }
    });
    iup::main_loop();

    assert_eq!(calls.get(), 5);
    iup::clear_idle();
}

#[test]
fn idle_ignore_unbinds_it() {
    let _iup = Session::open();
    let token = Rc::new(());
    let held = Rc::clone(&token);
    let calls = Rc::new(Cell::new(0));
    let count = Rc::clone(&calls);

    iup::set_idle(move || {
        let _ = &held;
        count.set(count.get() + 1);
        CallbackReturn::Ignore
    });
    iup::main_loop();

    assert_eq!(calls.get(), 1);
    assert_eq!(Rc::strong_count(&token), 1);
}

#[test]
fn loop_step_runs_idle_once() {
    let _iup = Session::open();
    let calls = Rc::new(Cell::new(0));
    let count = Rc::clone(&calls);

    iup::set_idle(move || {
        count.set(count.get() + 1);
        CallbackReturn::Default
    });

    assert_eq!(iup::loop_step(), Step::Continue);
    assert_eq!(iup::loop_step(), Step::Continue);
    assert_eq!(calls.get(), 2);

    iup::clear_idle();
    assert_eq!(iup::loop_step(), Step::Continue);
    assert_eq!(calls.get(), 2);
}

// ── posted messages ───────────────────────────────────────────────────────────

#[test]
fn worker_posts_to_the_interface_thread() {
    let _iup = Session::open();
    let label = iup::label("").unwrap();
    let received = Rc::new(RefCell::new(Vec::new()));
    let inbox = Rc::clone(&received);

    label
        .set_callback("POSTMESSAGE_CB", Callback::post_message(move |h, s, i, d| {
            inbox.borrow_mut().push((s.map(str::to_owned), i, d));
            let _ = h.set_attribute("TITLE", s.unwrap_or(""));
            CallbackReturn::Default
        }))
        .unwrap();

    let target = label.post_target().unwrap();
    let worker = thread::spawn(move || {
        for i in 0..3 {
            target.post(Some(&format!("step {}", i)), i, f64::from(i) / 2.0).unwrap();
        }
        target.post(None, -1, 0.0).unwrap();
    });
    worker.join().unwrap();

    assert_eq!(simulate::pending_messages(), 4);
    iup::main_loop();
    assert_eq!(simulate::pending_messages(), 0);

    assert_eq!(
        *received.borrow(),
        [
            (Some("step 0".to_owned()), 0, 0.0),
            (Some("step 1".to_owned()), 1, 0.5),
            (Some("step 2".to_owned()), 2, 1.0),
            (None, -1, 0.0),
        ],
    );
    assert_eq!(label.get_attribute("TITLE").unwrap().as_deref(), Some(""));
}

#[test]
fn posted_close_ends_the_loop() {
    let _iup = Session::open();
    let label = iup::label("").unwrap();
    let keepalive = timer(1000);
    keepalive.set_attribute("RUN", true).unwrap();

    label
        .set_callback("POSTMESSAGE_CB", Callback::post_message(|_, _, i, _| {
            if i == 42 {
                CallbackReturn::Close
            } else {
                CallbackReturn::Default
            }
        }))
        .unwrap();

    let target = label.post_target().unwrap();
    let worker = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        target.post(None, 42, 0.0).unwrap();
    });

    let start = Instant::now();
    iup::main_loop();
    worker.join().unwrap();

    assert!(start.elapsed() < Duration::from_millis(1000));
}

#[test]
fn flush_delivers_without_a_loop() {
    let _iup = Session::open();
    let label = iup::label("").unwrap();
    let (count, seen) = {
        let count = Rc::new(Cell::new(0));
        (Rc::clone(&count), count)
    };

    label
        .set_callback("POSTMESSAGE_CB", Callback::post_message(move |_, _, _, _| {
            count.set(count.get() + 1);
            CallbackReturn::Default
        }))
        .unwrap();
    let target = label.post_target().unwrap();
    target.post(Some("a"), 0, 0.0).unwrap();
    target.post(Some("b"), 0, 0.0).unwrap();

    iup::flush();
    assert_eq!(seen.get(), 2);
}

#[test]
fn messages_for_a_destroyed_element_are_dropped() {
    let _iup = Session::open();
    let old = iup::user().unwrap();
    let stale = old.post_target().unwrap();
    stale.post(Some("queued before destroy"), 1, 0.0).unwrap();
    assert_eq!(simulate::pending_messages(), 1);

    old.destroy().unwrap();
    assert_eq!(simulate::pending_messages(), 0);
    stale.post(Some("posted after destroy"), 2, 0.0).unwrap();

    let received = Rc::new(RefCell::new(Vec::new()));
    let inbox = Rc::clone(&received);
    let new = iup::user().unwrap();
    new.set_callback("POSTMESSAGE_CB", Callback::post_message(move |_, s, i, _| {
        inbox.borrow_mut().push((s.map(str::to_owned), i));
        CallbackReturn::Default
    }))
    .unwrap();
    new.post_target().unwrap().post(Some("for new"), 3, 0.0).unwrap();

    iup::flush();
    assert_eq!(*received.borrow(), [(Some("for new".to_owned()), 3)]);
}
