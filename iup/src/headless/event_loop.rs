// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The main loop: posted messages, timers and the idle function.

use super::{callback, is_live, live_elements, registry, with_node, Func};
use crate::callback::{IdleFn, PostMessageFn};
use iup_sys::{Icallback, Ihandle, IUP_CLOSE, IUP_DEFAULT, IUP_IGNORE, IUP_NOERROR};
use once_cell::sync::Lazy;
use parking_lot::{Condvar, Mutex};
use std::{
    cell::Cell,
    collections::{HashSet, VecDeque},
    ffi::{CStr, CString},
    mem,
    os::raw::{c_char, c_double, c_int, c_void},
    ptr,
    time::Instant,
};

/// Upper bound on the work [`IupFlush`] does, in case handlers keep
/// producing more.
const FLUSH_LIMIT: usize = 1024;

struct Posted {
    target: usize,
    s: Option<CString>,
    i: c_int,
    d: c_double,
}

/// Messages in flight and the elements, of any thread, that may receive them.
#[derive(Default)]
struct Mailbox {
    queue: VecDeque<Posted>,
    targets: HashSet<usize>,
}

static MAILBOX: Lazy<Mutex<Mailbox>> = Lazy::new(|| Mutex::new(Mailbox::default()));
static ARRIVED: Condvar = Condvar::new();

thread_local! {
    static LEVEL: Cell<c_int> = const { Cell::new(0) };
    static EXIT: Cell<bool> = const { Cell::new(false) };
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Progress {
    Nothing,
    Worked,
    Close,
}

/// Asks the innermost running loop to return.
pub(crate) fn request_exit() {
    if LEVEL.get() > 0 {
        EXIT.set(true);
    }
}

/// Handles a callback result the way the loop would.
pub(crate) fn note_return(code: c_int) {
    if code == IUP_CLOSE {
        request_exit();
    }
}

pub(crate) fn reset() {
    EXIT.set(false);
}

pub(crate) fn register_target(ih: *mut Ihandle) {
    MAILBOX.lock().targets.insert(ih as usize);
}

/// Drops the messages still queued for `ih`. Later posts to it are discarded.
pub(crate) fn forget_target(ih: *mut Ihandle) {
    let mut mailbox = MAILBOX.lock();
    mailbox.targets.remove(&(ih as usize));
    mailbox.queue.retain(|m| m.target != ih as usize);
}

/// Messages queued for elements of this thread.
pub(crate) fn pending_messages() -> usize {
    MAILBOX.lock().queue.iter().filter(|m| is_live(m.target as *mut Ihandle)).count()
}

fn take_messages() -> Vec<Posted> {
    let mut mailbox = MAILBOX.lock();
    let (mine, others): (Vec<_>, Vec<_>) = mem::take(&mut mailbox.queue)
        .into_iter()
        .partition(|m| is_live(m.target as *mut Ihandle));
    mailbox.queue = others.into();

    mine
}

fn deliver_messages() -> Progress {
    let mut messages = take_messages().into_iter();
    let mut progress = Progress::Nothing;

    while let Some(message) = messages.next() {
        let ih = message.target as *mut Ihandle;
        let Some(f) = callback(ih, c"POSTMESSAGE_CB") else {
            log::warn!("message posted to {:p}, which has no POSTMESSAGE_CB", ih);
            continue;
        };

        let s = message.s.as_ref().map_or(ptr::null_mut(), |s| s.as_ptr() as *mut c_char);
        let f = unsafe { mem::transmute::<Func, PostMessageFn>(f) };
        if unsafe { f(ih, s, message.i, message.d, ptr::null_mut()) } == IUP_CLOSE {
            let mut mailbox = MAILBOX.lock();
            for rest in messages.rev() {
                if mailbox.targets.contains(&rest.target) {
                    mailbox.queue.push_front(rest);
                }
            }
            return Progress::Close;
        }
        progress = Progress::Worked;
    }

    progress
}

fn running_timers() -> Vec<(*mut Ihandle, Instant)> {
    live_elements()
        .into_iter()
        .filter_map(|ih| with_node(ih, |node| node.timer_due.map(|due| (ih, due))).flatten())
        .collect()
}

fn next_timer() -> Option<Instant> {
    running_timers().into_iter().map(|(_, due)| due).min()
}

fn fire_timers() -> Progress {
    let now = Instant::now();
    let mut due: Vec<_> = running_timers().into_iter().filter(|(_, at)| *at <= now).collect();
    due.sort_by_key(|(_, at)| *at);

    let mut progress = Progress::Nothing;
    for (ih, _) in due {
        // An earlier handler may have stopped or destroyed this one.
        let rearmed = with_node(ih, |node| match node.timer_due {
            Some(_) => {
                node.timer_due = Some(now + node.timer_interval());
                true
            }
            None => false,
        });
        if rearmed != Some(true) {
            continue;
        }

        if let Some(f) = callback(ih, c"ACTION_CB") {
            if unsafe { f(ih) } == IUP_CLOSE {
                return Progress::Close;
            }
        }
        progress = Progress::Worked;
    }

    progress
}

fn idle_function() -> Option<Func> {
    registry(|r| r.functions.get(c"IDLE_ACTION").copied())
}

fn run_idle() -> Progress {
    let Some(f) = idle_function() else {
        return Progress::Nothing;
    };

    let f = unsafe { mem::transmute::<Func, IdleFn>(f) };
    match unsafe { f() } {
        IUP_CLOSE => Progress::Close,
        IUP_IGNORE => {
            registry(|r| r.functions.remove(c"IDLE_ACTION"));
            Progress::Worked
        }
        _ => Progress::Worked,
    }
}

fn run_pending() -> Progress {
    match deliver_messages() {
        Progress::Close => Progress::Close,
        delivered => match fire_timers() {
            Progress::Nothing => delivered,
            fired => fired,
        },
    }
}

/// Sleeps until the next timer is due or a message arrives. Returns at once
/// when no timer runs, since nothing else could wake the thread.
fn wait_for_work() {
    let Some(due) = next_timer() else {
        return;
    };

    let mut mailbox = MAILBOX.lock();
    if !mailbox.queue.iter().any(|m| is_live(m.target as *mut Ihandle)) {
        ARRIVED.wait_until(&mut mailbox, due);
    }
}

fn step(wait: bool) -> c_int {
    let mut progress = run_pending();
    if progress == Progress::Nothing {
        progress = run_idle();
    }
    if progress == Progress::Nothing && wait {
        wait_for_work();
        progress = run_pending();
    }

    match progress {
        Progress::Close => IUP_CLOSE,
        _ => IUP_DEFAULT,
    }
}

/// Whether anything could still happen on this thread.
fn has_work() -> bool {
    pending_messages() > 0 || idle_function().is_some() || next_timer().is_some()
}

/// Runs a loop level until `done`, an exit request, a `Close` from a
/// handler, or until there is nothing left to wait for.
pub(crate) fn run_until(done: impl Fn() -> bool) {
    LEVEL.set(LEVEL.get() + 1);

    loop {
        if EXIT.replace(false) || done() {
            break;
        }
        if step(true) == IUP_CLOSE || !has_work() {
            break;
        }
    }

    EXIT.set(false);
    LEVEL.set(LEVEL.get() - 1);
}

pub unsafe fn IupMainLoop() -> c_int {
    run_until(|| false);
    IUP_NOERROR
}

pub unsafe fn IupLoopStep() -> c_int {
    step(false)
}

pub unsafe fn IupLoopStepWait() -> c_int {
    step(true)
}

pub unsafe fn IupMainLoopLevel() -> c_int {
    LEVEL.get()
}

pub unsafe fn IupFlush() {
    for _ in 0..FLUSH_LIMIT {
        match run_pending() {
            Progress::Nothing => break,
            Progress::Close => request_exit(),
            Progress::Worked => {}
        }
    }
}

pub unsafe fn IupExitLoop() {
    request_exit();
}

/// Queues a message for the thread that owns `ih`. Callable from any thread.
pub unsafe fn IupPostMessage(
    ih: *mut Ihandle,
    s: *const c_char,
    i: c_int,
    d: c_double,
    _p: *mut c_void,
) {
    let s = (!s.is_null()).then(|| CStr::from_ptr(s).to_owned());
    let mut mailbox = MAILBOX.lock();
    if !mailbox.targets.contains(&(ih as usize)) {
        log::warn!("message posted to {:p}, which was destroyed", ih);
        return;
    }
    mailbox.queue.push_back(Posted { target: ih as usize, s, i, d });
    ARRIVED.notify_all();
}

pub unsafe fn IupGetFunction(name: *const c_char) -> Icallback {
    if name.is_null() {
        return None;
    }

    let name = CStr::from_ptr(name);
    registry(|r| r.functions.get(name).copied())
}

pub unsafe fn IupSetFunction(name: *const c_char, func: Icallback) -> Icallback {
    if name.is_null() {
        return None;
    }

    let name = CStr::from_ptr(name).to_owned();
    registry(|r| match func {
        Some(func) => r.functions.insert(name, func),
        None => r.functions.remove(&name),
    })
}
