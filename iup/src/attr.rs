// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed access to IUP's string attributes.

use crate::{
    handle::{Handle, PRIVATE_PREFIX},
    lossy, sys, Error, Result,
};
use iup_sys::Ihandle;
use std::{
    borrow::Cow,
    ffi::{CStr, CString},
    fmt,
    os::raw::{c_char, c_int},
    ptr,
    str::FromStr,
};

/// An RGB color, written to IUP as `"r g b"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}

/// Accepts `"r g b"` (any of space, `;`, `:` or `,` between components)
/// and `"#rrggbb"`, like IUP does.
impl FromStr for Rgb {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ());

            return Ok(Self::new(channel(0)?, channel(2)?, channel(4)?));
        }

        let mut parts = s
            .split(|c: char| c.is_whitespace() || matches!(c, ';' | ':' | ','))
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<u8>().map_err(|_| ()));
        let rgb = Self::new(
            parts.next().ok_or(())??,
            parts.next().ok_or(())??,
            parts.next().ok_or(())??,
        );

        match parts.next() {
            None => Ok(rgb),
            Some(_) => Err(()),
        }
    }
}

/// A value IUP can store in an attribute.
///
/// Every kind maps to one of IUP's typed setters; there is no fallback.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue<'a> {
    Str(Cow<'a, str>),
    Int(i32),
    Float(f32),
    Double(f64),
    /// Written as `"YES"` or `"NO"`.
    Bool(bool),
    Rgb(Rgb),
    /// Written as the element's global name, assigning one if needed.
    Handle(&'a Handle),
    /// Removes the attribute so that the default or inherited value applies.
    Reset,
}

impl<'a> From<&'a str> for AttrValue<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(Cow::Borrowed(s))
    }
}

impl From<String> for AttrValue<'_> {
    fn from(s: String) -> Self {
        Self::Str(Cow::Owned(s))
    }
}

impl<'a> From<&'a String> for AttrValue<'a> {
    fn from(s: &'a String) -> Self {
        Self::Str(Cow::Borrowed(s))
    }
}

impl From<i32> for AttrValue<'_> {
    fn from(i: i32) -> Self {
        Self::Int(i)
    }
}

impl From<f32> for AttrValue<'_> {
    fn from(f: f32) -> Self {
        Self::Float(f)
    }
}

impl From<f64> for AttrValue<'_> {
    fn from(d: f64) -> Self {
        Self::Double(d)
    }
}

impl From<bool> for AttrValue<'_> {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Rgb> for AttrValue<'_> {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl From<[u8; 3]> for AttrValue<'_> {
    fn from(rgb: [u8; 3]) -> Self {
        Self::Rgb(rgb.into())
    }
}

impl<'a> From<&'a Handle> for AttrValue<'a> {
    fn from(handle: &'a Handle) -> Self {
        Self::Handle(handle)
    }
}

impl<'a, T: Into<AttrValue<'a>>> From<Option<T>> for AttrValue<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Reset, Into::into)
    }
}

impl AttrValue<'_> {
    /// The string IUP ends up storing, `None` for [`AttrValue::Reset`].
    pub fn to_attr_string(&self) -> Result<Option<String>> {
        Ok(match self {
            Self::Str(s) => Some(s.clone().into_owned()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Double(d) => Some(d.to_string()),
            Self::Bool(b) => Some(if *b { "YES" } else { "NO" }.to_owned()),
            Self::Rgb(rgb) => Some(rgb.to_string()),
            Self::Handle(h) => Some(h.ensure_name()?.into_string().unwrap_or_default()),
            Self::Reset => None,
        })
    }
}

fn yes_no(b: bool) -> &'static CStr {
    if b {
        c"YES"
    } else {
        c"NO"
    }
}

/// Which attribute slot a value goes to: `NAME`, `NAMEid` or `NAMElin:col`.
#[derive(Clone, Copy)]
enum Slot {
    Plain,
    Id(c_int),
    Id2(c_int, c_int),
}

unsafe fn store(ih: *mut Ihandle, name: &CStr, slot: Slot, value: AttrValue<'_>) -> Result<()> {
    let name = name.as_ptr();

    match value {
        AttrValue::Str(s) => {
            let s = CString::new(s.as_ref())?;
            store_str(ih, name, slot, s.as_ptr());
        }
        AttrValue::Bool(b) => store_str(ih, name, slot, yes_no(b).as_ptr()),
        AttrValue::Handle(h) => {
            let named = h.raw()?;
            match slot {
                Slot::Plain => sys::IupSetAttributeHandle(ih, name, named),
                _ => store_str(ih, name, slot, h.ensure_name()?.as_ptr()),
            }
        }
        AttrValue::Int(i) => match slot {
            Slot::Plain => sys::IupSetInt(ih, name, i),
            Slot::Id(id) => sys::IupSetIntId(ih, name, id, i),
            Slot::Id2(lin, col) => sys::IupSetIntId2(ih, name, lin, col, i),
        },
        AttrValue::Float(f) => match slot {
            Slot::Plain => sys::IupSetFloat(ih, name, f),
            Slot::Id(id) => sys::IupSetFloatId(ih, name, id, f),
            Slot::Id2(lin, col) => sys::IupSetFloatId2(ih, name, lin, col, f),
        },
        AttrValue::Double(d) => match slot {
            Slot::Plain => sys::IupSetDouble(ih, name, d),
            Slot::Id(id) => sys::IupSetDoubleId(ih, name, id, d),
            Slot::Id2(lin, col) => sys::IupSetDoubleId2(ih, name, lin, col, d),
        },
        AttrValue::Rgb(Rgb { r, g, b }) => match slot {
            Slot::Plain => sys::IupSetRGB(ih, name, r, g, b),
            Slot::Id(id) => sys::IupSetRGBId(ih, name, id, r, g, b),
            Slot::Id2(lin, col) => sys::IupSetRGBId2(ih, name, lin, col, r, g, b),
        },
        AttrValue::Reset => match slot {
            Slot::Plain => sys::IupSetAttribute(ih, name, ptr::null()),
            Slot::Id(id) => sys::IupSetAttributeId(ih, name, id, ptr::null()),
            Slot::Id2(lin, col) => sys::IupSetAttributeId2(ih, name, lin, col, ptr::null()),
        },
    }

    Ok(())
}

unsafe fn store_str(ih: *mut Ihandle, name: *const c_char, slot: Slot, value: *const c_char) {
    match slot {
        Slot::Plain => sys::IupSetStrAttribute(ih, name, value),
        Slot::Id(id) => sys::IupSetStrAttributeId(ih, name, id, value),
        Slot::Id2(lin, col) => sys::IupSetStrAttributeId2(ih, name, lin, col, value),
    }
}

unsafe fn load(ih: *mut Ihandle, name: &CStr, slot: Slot) -> Option<String> {
    let name = name.as_ptr();
    let value = match slot {
        Slot::Plain => sys::IupGetAttribute(ih, name),
        Slot::Id(id) => sys::IupGetAttributeId(ih, name, id),
        Slot::Id2(lin, col) => sys::IupGetAttributeId2(ih, name, lin, col),
    };

    lossy(value).map(Cow::into_owned)
}

fn parse_rgb(name: &CStr, value: Option<String>) -> Result<Option<Rgb>> {
    match value {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|()| Error::InvalidValue {
            name: name.to_string_lossy().into_owned(),
            value,
        }),
    }
}

/// Splits an attribute list such as `EXPAND=YES, TITLE="A, b"`.
pub(crate) fn parse_attribute_list(list: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut chars = list.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace() || *c == ',').is_some() {}
        let key: String = chars.by_ref().take_while(|c| *c != '=').collect();
        let key = key.trim().to_owned();
        if key.is_empty() {
            break;
        }

        while chars.next_if(|c| *c == ' ').is_some() {}
        let value = if chars.next_if_eq(&'"').is_some() {
            let value: String = chars.by_ref().take_while(|c| *c != '"').collect();
            while chars.next_if(|c| *c != ',').is_some() {}
            value
        } else {
            let value: String = chars.by_ref().take_while(|c| *c != ',').collect();
            value.trim().to_owned()
        };

        pairs.push((key, value));
    }

    pairs
}

/// Converts an attribute name, refusing the ones this crate keeps private.
fn attr_name(name: &str) -> Result<CString> {
    if name.starts_with(PRIVATE_PREFIX) {
        return Err(Error::Reserved { name: name.to_owned() });
    }

    Ok(CString::new(name)?)
}

impl Handle {
    /// Sets an attribute, choosing the IUP setter by the kind of `value`.
    pub fn set_attribute<'a>(&self, name: &str, value: impl Into<AttrValue<'a>>) -> Result<&Self> {
        let ih = self.raw()?;
        let name = attr_name(name)?;
        unsafe { store(ih, &name, Slot::Plain, value.into())? };

        Ok(self)
    }

    /// Sets an attribute with an id, such as the items of a list (`"1"`,
    /// `"2"`, ...) or `"IDVALUE"` of a tree.
    pub fn set_attribute_id<'a>(
        &self,
        name: &str,
        id: i32,
        value: impl Into<AttrValue<'a>>,
    ) -> Result<&Self> {
        let ih = self.raw()?;
        let name = attr_name(name)?;
        unsafe { store(ih, &name, Slot::Id(id), value.into())? };

        Ok(self)
    }

    /// Sets an attribute with a line and a column, as used by matrices.
    pub fn set_attribute_id2<'a>(
        &self,
        name: &str,
        lin: i32,
        col: i32,
        value: impl Into<AttrValue<'a>>,
    ) -> Result<&Self> {
        let ih = self.raw()?;
        let name = attr_name(name)?;
        unsafe { store(ih, &name, Slot::Id2(lin, col), value.into())? };

        Ok(self)
    }

    /// Sets several attributes from a list like `"EXPAND=YES, TITLE=\"A b\""`.
    pub fn set_attributes(&self, list: &str) -> Result<&Self> {
        let ih = self.raw()?;
        let mut names = parse_attribute_list(list).into_iter().map(|(name, _)| name);
        if let Some(name) = names.find(|name| name.starts_with(PRIVATE_PREFIX)) {
            return Err(Error::Reserved { name });
        }
        let list = CString::new(list)?;
        unsafe { sys::IupSetAttributes(ih, list.as_ptr()) };

        Ok(self)
    }

    pub fn reset_attribute(&self, name: &str) -> Result<&Self> {
        let ih = self.raw()?;
        let name = attr_name(name)?;
        unsafe { sys::IupResetAttribute(ih, name.as_ptr()) };

        Ok(self)
    }

    pub fn get_attribute(&self, name: &str) -> Result<Option<String>> {
        let ih = self.raw()?;
        let name = attr_name(name)?;

        Ok(unsafe { load(ih, &name, Slot::Plain) })
    }

    pub fn get_attribute_id(&self, name: &str, id: i32) -> Result<Option<String>> {
        let ih = self.raw()?;
        let name = attr_name(name)?;

        Ok(unsafe { load(ih, &name, Slot::Id(id)) })
    }

    pub fn get_attribute_id2(&self, name: &str, lin: i32, col: i32) -> Result<Option<String>> {
        let ih = self.raw()?;
        let name = attr_name(name)?;

        Ok(unsafe { load(ih, &name, Slot::Id2(lin, col)) })
    }

    /// Reads an attribute as an integer. Boolean strings read as 1 or 0;
    /// missing or unparsable values read as 0.
    pub fn get_int(&self, name: &str) -> Result<i32> {
        let ih = self.raw()?;
        let name = attr_name(name)?;

        Ok(unsafe { sys::IupGetInt(ih, name.as_ptr()) })
    }

    pub fn get_int_id(&self, name: &str, id: i32) -> Result<i32> {
        let ih = self.raw()?;
        let name = attr_name(name)?;

        Ok(unsafe { sys::IupGetIntId(ih, name.as_ptr(), id) })
    }

    pub fn get_int_id2(&self, name: &str, lin: i32, col: i32) -> Result<i32> {
        let ih = self.raw()?;
        let name = attr_name(name)?;

        Ok(unsafe { sys::IupGetIntId2(ih, name.as_ptr(), lin, col) })
    }

    /// Reads a pair such as `"RASTERSIZE"` (`"200x100"`) or `"CARET"` (`"1:5"`).
    pub fn get_int_int(&self, name: &str) -> Result<Option<(i32, i32)>> {
        let ih = self.raw()?;
        let name = attr_name(name)?;
        let (mut a, mut b) = (0, 0);
        let count = unsafe { sys::IupGetIntInt(ih, name.as_ptr(), &mut a, &mut b) };

        Ok((count == 2).then_some((a, b)))
    }

    pub fn get_float(&self, name: &str) -> Result<f32> {
        let ih = self.raw()?;
        let name = attr_name(name)?;

        Ok(unsafe { sys::IupGetFloat(ih, name.as_ptr()) })
    }

    pub fn get_float_id(&self, name: &str, id: i32) -> Result<f32> {
        let ih = self.raw()?;
        let name = attr_name(name)?;

        Ok(unsafe { sys::IupGetFloatId(ih, name.as_ptr(), id) })
    }

    pub fn get_float_id2(&self, name: &str, lin: i32, col: i32) -> Result<f32> {
        let ih = self.raw()?;
        let name = attr_name(name)?;

        Ok(unsafe { sys::IupGetFloatId2(ih, name.as_ptr(), lin, col) })
    }

    pub fn get_double(&self, name: &str) -> Result<f64> {
        let ih = self.raw()?;
        let name = attr_name(name)?;

        Ok(unsafe { sys::IupGetDouble(ih, name.as_ptr()) })
    }

    pub fn get_double_id(&self, name: &str, id: i32) -> Result<f64> {
        let ih = self.raw()?;
        let name = attr_name(name)?;

        Ok(unsafe { sys::IupGetDoubleId(ih, name.as_ptr(), id) })
    }

    pub fn get_double_id2(&self, name: &str, lin: i32, col: i32) -> Result<f64> {
        let ih = self.raw()?;
        let name = attr_name(name)?;

        Ok(unsafe { sys::IupGetDoubleId2(ih, name.as_ptr(), lin, col) })
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        self.get_int(name).map(|i| i != 0)
    }

    pub fn get_rgb(&self, name: &str) -> Result<Option<Rgb>> {
        let ih = self.raw()?;
        let name = attr_name(name)?;

        parse_rgb(&name, unsafe { load(ih, &name, Slot::Plain) })
    }

    pub fn get_rgb_id(&self, name: &str, id: i32) -> Result<Option<Rgb>> {
        let ih = self.raw()?;
        let name = attr_name(name)?;

        parse_rgb(&name, unsafe { load(ih, &name, Slot::Id(id)) })
    }

    pub fn get_rgb_id2(&self, name: &str, lin: i32, col: i32) -> Result<Option<Rgb>> {
        let ih = self.raw()?;
        let name = attr_name(name)?;

        parse_rgb(&name, unsafe { load(ih, &name, Slot::Id2(lin, col)) })
    }

    /// Reads an attribute holding the name of another element.
    pub fn get_attribute_handle(&self, name: &str) -> Result<Option<Handle>> {
        let ih = self.raw()?;
        let name = attr_name(name)?;

        Ok(unsafe { Handle::from_raw(sys::IupGetAttributeHandle(ih, name.as_ptr())) })
    }

    /// Names of the attributes stored on the element itself, without the
    /// ones this crate keeps for its own use.
    pub fn attribute_names(&self) -> Result<Vec<String>> {
        let ih = self.raw()?;
        let count = unsafe { sys::IupGetAllAttributes(ih, ptr::null_mut(), 0) };
        let Ok(len) = usize::try_from(count) else {
            return Ok(Vec::new());
        };

        let mut names = vec![ptr::null_mut::<c_char>(); len];
        let filled = unsafe { sys::IupGetAllAttributes(ih, names.as_mut_ptr(), count) };
        names.truncate(usize::try_from(filled).unwrap_or(0));

        Ok(names
            .into_iter()
            .filter_map(|name| unsafe { lossy(name) })
            .filter(|name| !name.starts_with(PRIVATE_PREFIX))
            .map(Cow::into_owned)
            .collect())
    }
}

/// Sets a global attribute such as `"UTF8MODE"` or `"DEFAULTFONT"`.
pub fn set_global<'a>(name: &str, value: impl Into<AttrValue<'a>>) -> Result<()> {
    let name = CString::new(name)?;
    match value.into().to_attr_string()? {
        Some(value) => {
            let value = CString::new(value)?;
            unsafe { sys::IupSetStrGlobal(name.as_ptr(), value.as_ptr()) };
        }
        None => unsafe { sys::IupSetGlobal(name.as_ptr(), ptr::null()) },
    }

    Ok(())
}

pub fn get_global(name: &str) -> Result<Option<String>> {
    let name = CString::new(name)?;
    Ok(unsafe { lossy(sys::IupGetGlobal(name.as_ptr())) }.map(Cow::into_owned))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_lists() {
        let pairs = parse_attribute_list(r#"EXPAND=YES, TITLE="A, b",SIZE = 50x10"#);
        assert_eq!(
            pairs,
            [
                ("EXPAND".to_owned(), "YES".to_owned()),
                ("TITLE".to_owned(), "A, b".to_owned()),
                ("SIZE".to_owned(), "50x10".to_owned()),
            ]
        );
        assert!(parse_attribute_list("  ").is_empty());
    }

    #[test]
    fn rgb_parses_separators_and_hex() {
        assert_eq!("255 0 0".parse(), Ok(Rgb::new(255, 0, 0)));
        assert_eq!("10;20;30".parse(), Ok(Rgb::new(10, 20, 30)));
        assert_eq!(" 1:2:3 ".parse(), Ok(Rgb::new(1, 2, 3)));
        assert_eq!("#FF8000".parse(), Ok(Rgb::new(255, 128, 0)));
    }

    #[test]
    fn rgb_rejects_garbage() {
        assert_eq!("255 0".parse::<Rgb>(), Err(()));
        assert_eq!("1 2 3 4".parse::<Rgb>(), Err(()));
        assert_eq!("256 0 0".parse::<Rgb>(), Err(()));
        assert_eq!("#12345".parse::<Rgb>(), Err(()));
        assert_eq!("red".parse::<Rgb>(), Err(()));
    }

    #[test]
    fn values_render_like_iup() {
        assert_eq!(AttrValue::from(42).to_attr_string().unwrap().as_deref(), Some("42"));
        assert_eq!(AttrValue::from(1.5f32).to_attr_string().unwrap().as_deref(), Some("1.5"));
        assert_eq!(AttrValue::from(true).to_attr_string().unwrap().as_deref(), Some("YES"));
        assert_eq!(
            AttrValue::from([255u8, 0, 0]).to_attr_string().unwrap().as_deref(),
            Some("255 0 0"),
        );
        assert_eq!(AttrValue::from(None::<&str>).to_attr_string().unwrap(), None);
    }
}
