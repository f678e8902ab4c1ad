// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{lossy, sys, Error, Handle, Result};
use iup_sys::IUP_CONFIG_OK;
use std::{ffi::CString, os::raw::c_char, path::Path, str::FromStr};

/// Persistent application settings, organized as `[group]` and `key=value`
/// lines.
///
/// The file is `APP_FILENAME` if set, otherwise derived from `APP_NAME`:
/// `$HOME/.<name>` on Unix, `<name>.cfg` elsewhere. The underlying element
/// is destroyed on drop.
#[derive(Debug)]
pub struct Config {
    handle: Handle,
}

impl Config {
    pub fn new(app_name: &str) -> Result<Self> {
        let handle = Handle::from_new("config", unsafe { sys::IupConfig() })?;
        handle.set_attribute("APP_NAME", app_name)?;

        Ok(Self { handle })
    }

    /// Uses `path` instead of the name derived from `APP_NAME`.
    pub fn set_filename(&self, path: impl AsRef<Path>) -> Result<&Self> {
        let path = path.as_ref().to_string_lossy();
        self.handle.set_attribute("APP_FILENAME", path.as_ref())?;

        Ok(self)
    }

    /// The element, for reading `FILENAME` or other config attributes.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn load(&self) -> Result<()> {
        let ih = self.handle.raw()?;
        check("IupConfigLoad", unsafe { sys::IupConfigLoad(ih) })
    }

    pub fn save(&self) -> Result<()> {
        let ih = self.handle.raw()?;
        check("IupConfigSave", unsafe { sys::IupConfigSave(ih) })
    }

    pub fn set_str(&self, group: &str, key: &str, value: &str) -> Result<()> {
        let ih = self.handle.raw()?;
        let (group, key) = (CString::new(group)?, CString::new(key)?);
        let value = CString::new(value)?;
        unsafe { sys::IupConfigSetVariableStr(ih, group.as_ptr(), key.as_ptr(), value.as_ptr()) };

        Ok(())
    }

    /// Stores `value` under the key `<key><id>`, for numbered lists.
    pub fn set_str_id(&self, group: &str, key: &str, id: i32, value: &str) -> Result<()> {
        let ih = self.handle.raw()?;
        let (group, key) = (CString::new(group)?, CString::new(key)?);
        let value = CString::new(value)?;
        unsafe {
            sys::IupConfigSetVariableStrId(ih, group.as_ptr(), key.as_ptr(), id, value.as_ptr())
        };

        Ok(())
    }

    pub fn set_int(&self, group: &str, key: &str, value: i32) -> Result<()> {
        let ih = self.handle.raw()?;
        let (group, key) = (CString::new(group)?, CString::new(key)?);
        unsafe { sys::IupConfigSetVariableInt(ih, group.as_ptr(), key.as_ptr(), value) };

        Ok(())
    }

    pub fn set_double(&self, group: &str, key: &str, value: f64) -> Result<()> {
        let ih = self.handle.raw()?;
        let (group, key) = (CString::new(group)?, CString::new(key)?);
        unsafe { sys::IupConfigSetVariableDouble(ih, group.as_ptr(), key.as_ptr(), value) };

        Ok(())
    }

    pub fn get_str(&self, group: &str, key: &str) -> Result<Option<String>> {
        let ih = self.handle.raw()?;
        let (group, key) = (CString::new(group)?, CString::new(key)?);
        let value = unsafe { sys::IupConfigGetVariableStr(ih, group.as_ptr(), key.as_ptr()) };

        Ok(owned(value))
    }

    pub fn get_str_id(&self, group: &str, key: &str, id: i32) -> Result<Option<String>> {
        let ih = self.handle.raw()?;
        let (group, key) = (CString::new(group)?, CString::new(key)?);
        let value = unsafe { sys::IupConfigGetVariableStrId(ih, group.as_ptr(), key.as_ptr(), id) };

        Ok(owned(value))
    }

    pub fn get_int(&self, group: &str, key: &str) -> Result<Option<i32>> {
        self.get_parsed(group, key)
    }

    pub fn get_double(&self, group: &str, key: &str) -> Result<Option<f64>> {
        self.get_parsed(group, key)
    }

    pub fn get_str_or(&self, group: &str, key: &str, default: &str) -> Result<String> {
        Ok(self.get_str(group, key)?.unwrap_or_else(|| default.to_owned()))
    }

    pub fn get_int_or(&self, group: &str, key: &str, default: i32) -> Result<i32> {
        Ok(self.get_int(group, key)?.unwrap_or(default))
    }

    pub fn get_double_or(&self, group: &str, key: &str, default: f64) -> Result<f64> {
        Ok(self.get_double(group, key)?.unwrap_or(default))
    }

    fn get_parsed<T: FromStr>(&self, group: &str, key: &str) -> Result<Option<T>> {
        let Some(value) = self.get_str(group, key)? else {
            return Ok(None);
        };

        match value.trim().parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(Error::InvalidValue { name: format!("{}.{}", group, key), value }),
        }
    }
}

impl Drop for Config {
    fn drop(&mut self) {
        if self.handle.is_alive() {
            if let Err(e) = self.handle.destroy() {
                log::warn!("could not destroy config: {}", e);
            }
        }
    }
}

fn owned(value: *const c_char) -> Option<String> {
    unsafe { lossy(value) }.map(|s| s.into_owned())
}

fn check(op: &'static str, code: i32) -> Result<()> {
    if code == IUP_CONFIG_OK {
        Ok(())
    } else {
        Err(Error::Status { op, code })
    }
}
