// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed attribute setters and getters.

#![cfg(not(feature = "native"))]

use iup::{AttrValue, Error, Rgb};

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

// ── plain attributes ──────────────────────────────────────────────────────────

#[test]
fn int_reads_back_as_string() {
    let _iup = Session::open();
    let label = iup::label("Count").unwrap();

    label.set_attribute("COUNT", 42).unwrap();

    assert_eq!(label.get_attribute("COUNT").unwrap().as_deref(), Some("42"));
    assert_eq!(label.get_int("COUNT").unwrap(), 42);
}

#[test]
fn strings_are_copied() {
    let _iup = Session::open();
    let label = iup::label("").unwrap();

    let title = String::from("Hello");
    label.set_attribute("TITLE", &title).unwrap();
    drop(title);

    assert_eq!(label.get_attribute("TITLE").unwrap().as_deref(), Some("Hello"));
}

#[test]
fn constructor_arguments_become_attributes() {
    let _iup = Session::open();
    let button = iup::button("Press").unwrap();
    let link = iup::link("https://example.org", "site").unwrap();

    assert_eq!(button.get_attribute("TITLE").unwrap().as_deref(), Some("Press"));
    assert_eq!(link.get_attribute("URL").unwrap().as_deref(), Some("https://example.org"));
    assert_eq!(button.class_name().unwrap(), "button");
}

#[test]
fn floats_and_doubles() {
    let _iup = Session::open();
    let val = iup::val(iup::Orientation::Vertical).unwrap();

    val.set_attribute("VALUE", 1.5f32).unwrap();
    assert_eq!(val.get_float("VALUE").unwrap(), 1.5);

    val.set_attribute("MAX", 0.25f64).unwrap();
    assert_eq!(val.get_double("MAX").unwrap(), 0.25);
    assert_eq!(val.get_attribute("MAX").unwrap().as_deref(), Some("0.25"));
}

#[test]
fn bools_are_yes_and_no() {
    let _iup = Session::open();
    let button = iup::button("OK").unwrap();

    button.set_attribute("ACTIVE", false).unwrap();
    assert_eq!(button.get_attribute("ACTIVE").unwrap().as_deref(), Some("NO"));
    assert_eq!(button.get_int("ACTIVE").unwrap(), 0);

    button.set_attribute("ACTIVE", true).unwrap();
    assert_eq!(button.get_attribute("ACTIVE").unwrap().as_deref(), Some("YES"));
    assert_eq!(button.get_int("ACTIVE").unwrap(), 1);
    assert!(button.get_bool("ACTIVE").unwrap());
}

#[test]
fn colors_round_trip() {
    let _iup = Session::open();
    let label = iup::label("").unwrap();

    label.set_attribute("FGCOLOR", Rgb::new(255, 128, 0)).unwrap();
    assert_eq!(label.get_attribute("FGCOLOR").unwrap().as_deref(), Some("255 128 0"));
    assert_eq!(label.get_rgb("FGCOLOR").unwrap(), Some(Rgb::new(255, 128, 0)));

    label.set_attribute("BGCOLOR", "#0000FF").unwrap();
    assert_eq!(label.get_rgb("BGCOLOR").unwrap(), Some(Rgb::new(0, 0, 255)));
}

#[test]
fn malformed_color_is_an_error() {
    let _iup = Session::open();
    let label = iup::label("").unwrap();

    label.set_attribute("FGCOLOR", "blue-ish").unwrap();

    assert!(matches!(
        label.get_rgb("FGCOLOR"),
        Err(Error::InvalidValue { ref name, ref value }) if name == "FGCOLOR" && value == "blue-ish"
    ));
}

#[test]
fn pairs_parse_both_halves() {
    let _iup = Session::open();
    let dialog = iup::dialog(None).unwrap();

    dialog.set_attribute("RASTERSIZE", "640x480").unwrap();
    assert_eq!(dialog.get_int_int("RASTERSIZE").unwrap(), Some((640, 480)));

    dialog.set_attribute("SIZE", "200").unwrap();
    assert_eq!(dialog.get_int_int("SIZE").unwrap(), None);
}

#[test]
fn missing_attributes_read_as_defaults() {
    let _iup = Session::open();
    let label = iup::label("").unwrap();

    assert_eq!(label.get_attribute("NOPE").unwrap(), None);
    assert_eq!(label.get_int("NOPE").unwrap(), 0);
    assert_eq!(label.get_double("NOPE").unwrap(), 0.0);
    assert!(!label.get_bool("NOPE").unwrap());
    assert_eq!(label.get_rgb("NOPE").unwrap(), None);
}

#[test]
fn reset_removes_value() {
    let _iup = Session::open();
    let label = iup::label("x").unwrap();

    label.set_attribute("TIP", "hint").unwrap();
    label.reset_attribute("TIP").unwrap();
    assert_eq!(label.get_attribute("TIP").unwrap(), None);

    label.set_attribute("TIP", "hint").unwrap();
    label.set_attribute("TIP", None::<&str>).unwrap();
    assert_eq!(label.get_attribute("TIP").unwrap(), None);
}

#[test]
fn setters_chain() {
    let _iup = Session::open();
    let dialog = iup::dialog(None).unwrap();

    dialog
        .set_attribute("TITLE", "Main")
        .unwrap()
        .set_attribute("MARGIN", "10x10")
        .unwrap()
        .set_attribute("GAP", 4)
        .unwrap();

    assert_eq!(dialog.get_attribute("TITLE").unwrap().as_deref(), Some("Main"));
    assert_eq!(dialog.get_int("GAP").unwrap(), 4);
}

#[test]
fn attribute_list_sets_many() {
    let _iup = Session::open();
    let dialog = iup::dialog(None).unwrap();

    dialog.set_attributes(r#"TITLE="Two words", SIZE=200x100, RESIZE=NO"#).unwrap();

    assert_eq!(dialog.get_attribute("TITLE").unwrap().as_deref(), Some("Two words"));
    assert_eq!(dialog.get_attribute("SIZE").unwrap().as_deref(), Some("200x100"));
    assert!(!dialog.get_bool("RESIZE").unwrap());
}

// ── ids ───────────────────────────────────────────────────────────────────────

#[test]
fn id_attributes_address_items() {
    let _iup = Session::open();
    let list = iup::list().unwrap();

    list.set_attribute_id("", 1, "first").unwrap();
    list.set_attribute_id("", 2, "second").unwrap();
    list.set_attribute_id("ITEMDATA", 2, 7).unwrap();

    assert_eq!(list.get_attribute("1").unwrap().as_deref(), Some("first"));
    assert_eq!(list.get_attribute_id("", 2).unwrap().as_deref(), Some("second"));
    assert_eq!(list.get_int_id("ITEMDATA", 2).unwrap(), 7);
}

#[test]
fn id2_attributes_address_cells() {
    let _iup = Session::open();
    let grid = iup::grid_box(&[]).unwrap();

    grid.set_attribute_id2("", 1, 2, "cell").unwrap();
    grid.set_attribute_id2("BGCOLOR", 3, 4, Rgb::new(1, 2, 3)).unwrap();
    grid.set_attribute_id2("WIDTH", 0, 1, 2.5f64).unwrap();

    assert_eq!(grid.get_attribute_id2("", 1, 2).unwrap().as_deref(), Some("cell"));
    assert_eq!(grid.get_attribute("1:2").unwrap().as_deref(), Some("cell"));
    assert_eq!(grid.get_rgb_id2("BGCOLOR", 3, 4).unwrap(), Some(Rgb::new(1, 2, 3)));
    assert_eq!(grid.get_double_id2("WIDTH", 0, 1).unwrap(), 2.5);
}

// ── handles and names ─────────────────────────────────────────────────────────

#[test]
fn handle_attribute_names_the_element() {
    let _iup = Session::open();
    let button = iup::button("OK").unwrap();
    let dialog = iup::dialog(Some(&iup::vbox(&[&button]).unwrap())).unwrap();

    dialog.set_attribute("DEFAULTENTER", &button).unwrap();

    assert_eq!(dialog.get_attribute_handle("DEFAULTENTER").unwrap(), Some(button.clone()));
    let name = dialog.get_attribute("DEFAULTENTER").unwrap().unwrap();
    assert_eq!(button.name().unwrap(), Some(name));
}

#[test]
fn named_element_keeps_its_name() {
    let _iup = Session::open();
    let image = iup::image(2, 2, &[0, 1, 1, 0]).unwrap();
    image.set_name("cross").unwrap();
    let button = iup::button("").unwrap();

    button.set_attribute("IMAGE", &image).unwrap();

    assert_eq!(button.get_attribute("IMAGE").unwrap().as_deref(), Some("cross"));
    assert_eq!(iup::get_handle("cross").unwrap(), Some(image));
}

#[test]
fn private_attributes_are_hidden_and_reserved() {
    let _iup = Session::open();
    let label = iup::label("x").unwrap();
    label.set_attribute("TIP", "hint").unwrap();

    let names = label.attribute_names().unwrap();
    assert!(names.iter().any(|n| n == "TIP"));
    assert!(names.iter().any(|n| n == "TITLE"));
    assert!(names.iter().all(|n| !n.starts_with("_IUPRS_")));

    assert!(matches!(label.get_attribute("_IUPRS_STATE"), Err(Error::Reserved { .. })));
    assert!(matches!(label.set_attribute("_IUPRS_STATE", 0), Err(Error::Reserved { .. })));
}

#[test]
fn attribute_list_cannot_reach_private_attributes() {
    let _iup = Session::open();
    let button = iup::button("OK").unwrap();
    let uuid = button.uuid();

    assert!(matches!(
        button.set_attributes("TIP=hint, _IUPRS_STATE=boom"),
        Err(Error::Reserved { ref name }) if name == "_IUPRS_STATE"
    ));
    assert_eq!(button.get_attribute("TIP").unwrap(), None);

    button.set_name("guarded").unwrap();
    let found = iup::get_handle("guarded").unwrap().unwrap();
    assert_eq!(found.uuid(), uuid);
}

#[test]
fn interior_nul_is_an_error() {
    let _iup = Session::open();
    let label = iup::label("x").unwrap();

    assert!(matches!(label.set_attribute("TITLE", "a\0b"), Err(Error::Nul(_))));
}

// ── globals ───────────────────────────────────────────────────────────────────

#[test]
fn globals_round_trip() {
    let _iup = Session::open();

    iup::set_global("UTF8MODE", true).unwrap();
    assert_eq!(iup::get_global("UTF8MODE").unwrap().as_deref(), Some("YES"));

    iup::set_global("UTF8MODE", AttrValue::Reset).unwrap();
    assert_eq!(iup::get_global("UTF8MODE").unwrap(), None);

    assert!(iup::get_global("VERSION").unwrap().is_some());
}

#[test]
fn image_needs_enough_pixels() {
    let _iup = Session::open();

    assert!(matches!(
        iup::image_rgb(2, 2, &[0; 11]),
        Err(Error::ImageSize { width: 2, height: 2, expected: 12, actual: 11 })
    ));
    let image = iup::image_rgba(1, 1, &[1, 2, 3, 4]).unwrap();
    assert_eq!(image.get_int("BPP").unwrap(), 32);
}
