// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Logs mouse and keyboard input received by a canvas.

#![windows_subsystem = "windows"]

use iup::{Callback, CallbackReturn, Position};

fn main() -> iup::Result<()> {
    env_logger::init();
    iup::open()?;

    let status = iup::label("")?;
    status.set_attribute("EXPAND", "HORIZONTAL")?;
    let canvas = iup::canvas()?;
    canvas.set_attributes("RASTERSIZE=320x200, BORDER=NO")?;
    canvas.set_attribute("BGCOLOR", iup::Rgb::new(255, 255, 255))?;

    let target = status.clone();
    canvas.set_callback("BUTTON_CB", Callback::button(move |_, button, pressed, x, y, keys| {
        let action = if pressed { "pressed" } else { "released" };
        let double = if keys.is_double() { " (double)" } else { "" };
        let _ = target.set_attribute("TITLE", format!("{:?} {} at {},{}{}", button, action, x, y, double));
        CallbackReturn::Default
    }))?;

    let target = status.clone();
    canvas.set_callback("MOTION_CB", Callback::motion(move |_, x, y, keys| {
        if keys.has(iup::Modifier::Button1) {
            let _ = target.set_attribute("TITLE", format!("dragging at {},{}", x, y));
        }
        CallbackReturn::Default
    }))?;

    canvas.set_callback("WHEEL_CB", Callback::wheel(|_, delta, x, y, keys| {
        log::info!("wheel {} at {},{} [{}]", delta, x, y, keys.as_str());
        CallbackReturn::Default
    }))?;

    canvas.set_callback("K_ANY", Callback::int(|_, key| {
        if key == iup::ffi::K_ESC {
            return CallbackReturn::Close;
        }
        log::info!("key {:#x}", key);
        CallbackReturn::Default
    }))?;

    let dialog = iup::dialog(Some(&iup::vbox(&[&canvas, &status])?))?;
    dialog.set_attribute("TITLE", "Canvas events")?;
    dialog.show_xy(Position::Center, Position::Center)?;

    #[cfg(not(feature = "native"))]
    {
        use iup::{headless::simulate, KeyStatus, Modifier, MouseButton};

        simulate::button(&canvas, MouseButton::Left, true, 40, 30, KeyStatus::default())?;
        simulate::motion(&canvas, 60, 45, KeyStatus::default().with(Modifier::Button1))?;
        println!("{}", status.get_attribute("TITLE")?.unwrap_or_default());
        simulate::wheel(&canvas, 1.0, 60, 45, KeyStatus::default().with(Modifier::Control))?;
        simulate::key(&canvas, iup::ffi::K_ESC)?;
    }

    iup::main_loop();
    iup::close();
    Ok(())
}
