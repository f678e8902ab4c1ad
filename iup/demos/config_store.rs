// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Remembers how often it was started and the last text typed.

#![windows_subsystem = "windows"]

use iup::{Callback, CallbackReturn, Config, Position};
use std::{env, rc::Rc};

fn main() -> iup::Result<()> {
    env_logger::init();
    iup::open()?;

    let config = Rc::new(Config::new("iup_config_store")?);
    config.set_filename(env::temp_dir().join("iup_config_store.cfg"))?;
    if let Err(e) = config.load() {
        log::info!("starting without saved settings: {}", e);
    }

    let runs = config.get_int_or("Session", "runs", 0)? + 1;
    config.set_int("Session", "runs", runs)?;
    let last = config.get_str_or("Session", "text", "")?;

    let text = iup::text()?;
    text.set_attributes("EXPAND=HORIZONTAL, VISIBLECOLUMNS=20")?;
    text.set_attribute("VALUE", last.as_str())?;
    let label = iup::label(&format!("Run number {}", runs))?;
    let save = iup::button("Save and quit")?;

    let entry = text.clone();
    let store = Rc::clone(&config);
    save.set_callback("ACTION", Callback::plain(move |_| {
        let value = entry.get_attribute("VALUE").ok().flatten().unwrap_or_default();
        if let Err(e) = store.set_str("Session", "text", &value) {
            log::error!("could not store text: {}", e);
        }
        CallbackReturn::Close
    }))?;

    let dialog = iup::dialog(Some(&iup::vbox(&[&label, &text, &save])?))?;
    dialog.set_attributes("TITLE=Settings, MARGIN=10x10, GAP=5")?;
    dialog.show_xy(Position::Center, Position::Center)?;

    #[cfg(not(feature = "native"))]
    {
        text.set_attribute("VALUE", format!("typed on run {}", runs))?;
        iup::headless::simulate::click(&save)?;
    }

    iup::main_loop();

    config.save()?;
    println!("saved to {}", config.handle().get_attribute("FILENAME")?.unwrap_or_default());
    iup::close();
    Ok(())
}
