// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A worker thread reporting progress to the interface thread.

#![windows_subsystem = "windows"]

use iup::{Callback, CallbackReturn, Position};
use std::{thread, time::Duration};

const STEPS: i32 = 20;

fn main() -> iup::Result<()> {
    env_logger::init();
    iup::open()?;

    let progress = iup::progress_bar()?;
    progress.set_attribute("MAX", STEPS)?;
    let status = iup::label("Working...")?;
    status.set_attribute("EXPAND", "HORIZONTAL")?;
    let dialog = iup::dialog(Some(&iup::vbox(&[&progress, &status])?))?;
    dialog.set_attributes("TITLE=Worker, MARGIN=10x10, GAP=5")?;

    let target = status.clone();
    progress.set_callback("POSTMESSAGE_CB", Callback::post_message(move |h, text, step, _| {
        if let Err(e) = h.set_attribute("VALUE", step) {
            log::error!("could not update progress: {}", e);
        }
        if let Some(text) = text {
            let _ = target.set_attribute("TITLE", text);
        }

        if step == STEPS {
            CallbackReturn::Close
        } else {
            CallbackReturn::Default
        }
    }))?;

    // Keeps the loop waiting between messages.
    let heartbeat = iup::timer()?;
    heartbeat.set_attribute("TIME", 1000)?;
    heartbeat.set_attribute("RUN", true)?;

    let post = progress.post_target()?;
    let worker = thread::spawn(move || -> iup::Result<()> {
        for step in 1..=STEPS {
            thread::sleep(Duration::from_millis(50));
            post.post(Some(&format!("step {} of {}", step, STEPS)), step, 0.0)?;
        }
        Ok(())
    });

    dialog.show_xy(Position::Center, Position::Center)?;
    iup::main_loop();

    match worker.join() {
        Ok(result) => result?,
        Err(_) => log::error!("worker panicked"),
    }
    println!("{}", status.get_attribute("TITLE")?.unwrap_or_default());

    iup::close();
    Ok(())
}
