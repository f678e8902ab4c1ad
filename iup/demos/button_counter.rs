// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A button that counts its clicks into a label.

#![windows_subsystem = "windows"]

use iup::{Callback, CallbackReturn, Position};
use std::{cell::Cell, rc::Rc};

fn main() -> iup::Result<()> {
    env_logger::init();
    iup::open()?;

    let label = iup::label("Clicked 0 times")?;
    label.set_attribute("EXPAND", "HORIZONTAL")?;
    let button = iup::button("Click me")?;
    let quit = iup::button("Quit")?;

    let clicks = Rc::new(Cell::new(0));
    let target = label.clone();
    button.set_callback("ACTION", Callback::plain(move |_| {
        clicks.set(clicks.get() + 1);
        if let Err(e) = target.set_attribute("TITLE", format!("Clicked {} times", clicks.get())) {
            log::error!("could not update label: {}", e);
        }
        CallbackReturn::Default
    }))?;
    quit.set_callback("ACTION", Callback::plain(|_| CallbackReturn::Close))?;

    let buttons = iup::hbox(&[&button, &quit])?;
    buttons.set_attribute("GAP", 5)?;
    let vbox = iup::vbox(&[&label, &buttons])?;
    vbox.set_attributes("MARGIN=10x10, GAP=10")?;

    let dialog = iup::dialog(Some(&vbox))?;
    dialog.set_attribute("TITLE", "Counter")?;
    dialog.show_xy(Position::Center, Position::Center)?;

    #[cfg(not(feature = "native"))]
    {
        use iup::headless::simulate;

        for _ in 0..3 {
            simulate::click(&button)?;
        }
        println!("{}", label.get_attribute("TITLE")?.unwrap_or_default());
        simulate::click(&quit)?;
    }

    iup::main_loop();
    iup::close();
    Ok(())
}
