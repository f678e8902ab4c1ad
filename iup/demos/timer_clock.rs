// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A label counting seconds, driven by a timer. Stops after ten ticks.

#![windows_subsystem = "windows"]

use iup::{Callback, CallbackReturn, Position};
use std::time::Instant;

const TICKS: u32 = 10;

fn main() -> iup::Result<()> {
    env_logger::init();
    iup::open()?;

    let label = iup::label("0.0 s")?;
    label.set_attributes("EXPAND=HORIZONTAL, ALIGNMENT=ACENTER")?;
    let dialog = iup::dialog(Some(&label))?;
    dialog.set_attributes("TITLE=Clock, RASTERSIZE=200x80")?;

    let timer = iup::timer()?;
    timer.set_attribute("TIME", 100)?;

    let start = Instant::now();
    let mut ticks = 0;
    let target = label.clone();
    timer.set_callback("ACTION_CB", Callback::plain(move |_| {
        ticks += 1;
        let elapsed = start.elapsed().as_secs_f64();
        if let Err(e) = target.set_attribute("TITLE", format!("{:.1} s", elapsed)) {
            log::error!("could not update clock: {}", e);
        }

        if ticks == TICKS {
            CallbackReturn::Close
        } else {
            CallbackReturn::Default
        }
    }))?;

    dialog.show_xy(Position::Center, Position::Center)?;
    timer.set_attribute("RUN", true)?;
    iup::main_loop();

    println!("stopped at {}", label.get_attribute("TITLE")?.unwrap_or_default());
    iup::close();
    Ok(())
}
