// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `IupConfig` variables and their `.ini` style file.

use super::{api::IupCreate, with_node, Node};
use iup_sys::{
    Ihandle, IUP_CONFIG_ACCESS_ERROR, IUP_CONFIG_FILENAME_ERROR, IUP_CONFIG_OK,
    IUP_CONFIG_OPEN_ERROR,
};
use std::{
    collections::BTreeMap,
    ffi::{CStr, CString},
    fmt::Write as _,
    fs,
    os::raw::{c_char, c_double, c_int},
    path::PathBuf,
    ptr,
};

pub(crate) type Vars = BTreeMap<String, BTreeMap<String, CString>>;

/// `APP_FILENAME`, or a name derived from `APP_NAME`.
fn file_path(node: &Node) -> Option<PathBuf> {
    if let Some(path) = node.get_str(c"APP_FILENAME") {
        return Some(PathBuf::from(path.to_string_lossy().into_owned()));
    }

    let app = node.get_str(c"APP_NAME")?.to_string_lossy().into_owned();
    if app.is_empty() {
        return None;
    }

    #[cfg(unix)]
    if let Some(home) = std::env::var_os("HOME") {
        return Some(PathBuf::from(home).join(format!(".{}", app)));
    }

    Some(PathBuf::from(format!("{}.cfg", app)))
}

pub(crate) fn parse(contents: &str) -> Vars {
    let mut vars = Vars::new();
    let mut group = String::new();

    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            group = name.trim().to_owned();
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            log::warn!("ignoring config line {:?}", line);
            continue;
        };
        if let Ok(value) = CString::new(value.trim()) {
            vars.entry(group.clone()).or_default().insert(key.trim().to_owned(), value);
        }
    }

    vars
}

/// Variables without a group come first, then one section per group.
pub(crate) fn render(vars: &Vars) -> String {
    let mut out = String::new();

    for (group, keys) in vars {
        if keys.is_empty() {
            continue;
        }
        if !group.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            let _ = writeln!(out, "[{}]", group);
        }
        for (key, value) in keys {
            let _ = writeln!(out, "{}={}", key, value.to_string_lossy());
        }
    }

    out
}

unsafe fn string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        String::new()
    } else {
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

unsafe fn set_var(ih: *mut Ihandle, group: *const c_char, key: String, value: Option<CString>) {
    let group = string(group);
    with_node(ih, |node| match value {
        Some(value) => {
            node.vars.entry(group).or_default().insert(key, value);
        }
        None => {
            if let Some(keys) = node.vars.get_mut(&group) {
                keys.remove(&key);
            }
        }
    });
}

unsafe fn get_var(ih: *mut Ihandle, group: *const c_char, key: String) -> *const c_char {
    let group = string(group);
    with_node(ih, |node| {
        node.vars
            .get(&group)
            .and_then(|keys| keys.get(&key))
            .map(|value| value.as_ptr())
    })
    .flatten()
    .unwrap_or(ptr::null())
}

unsafe fn copy(value: *const c_char) -> Option<CString> {
    (!value.is_null()).then(|| CStr::from_ptr(value).to_owned())
}

pub unsafe fn IupConfig() -> *mut Ihandle {
    IupCreate(c"config".as_ptr())
}

/// Merges the variables of the file into the element.
pub unsafe fn IupConfigLoad(ih: *mut Ihandle) -> c_int {
    let Some(path) = with_node(ih, |node| file_path(node)).flatten() else {
        return IUP_CONFIG_FILENAME_ERROR;
    };

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) => {
            log::debug!("could not read {}: {}", path.display(), e);
            return IUP_CONFIG_OPEN_ERROR;
        }
    };

    let loaded = parse(&contents);
    with_node(ih, |node| {
        for (group, keys) in loaded {
            node.vars.entry(group).or_default().extend(keys);
        }
        node.set_str(c"FILENAME", &path.to_string_lossy());
    });

    IUP_CONFIG_OK
}

pub unsafe fn IupConfigSave(ih: *mut Ihandle) -> c_int {
    let Some((path, contents)) =
        with_node(ih, |node| file_path(node).map(|path| (path, render(&node.vars)))).flatten()
    else {
        return IUP_CONFIG_FILENAME_ERROR;
    };

    if let Err(e) = fs::write(&path, contents) {
        log::debug!("could not write {}: {}", path.display(), e);
        return match e.kind() {
            std::io::ErrorKind::PermissionDenied => IUP_CONFIG_ACCESS_ERROR,
            _ => IUP_CONFIG_OPEN_ERROR,
        };
    }

    with_node(ih, |node| node.set_str(c"FILENAME", &path.to_string_lossy()));
    IUP_CONFIG_OK
}

pub unsafe fn IupConfigSetVariableStr(
    ih: *mut Ihandle,
    group: *const c_char,
    key: *const c_char,
    value: *const c_char,
) {
    set_var(ih, group, string(key), copy(value));
}

pub unsafe fn IupConfigSetVariableStrId(
    ih: *mut Ihandle,
    group: *const c_char,
    key: *const c_char,
    id: c_int,
    value: *const c_char,
) {
    set_var(ih, group, format!("{}{}", string(key), id), copy(value));
}

pub unsafe fn IupConfigSetVariableInt(
    ih: *mut Ihandle,
    group: *const c_char,
    key: *const c_char,
    value: c_int,
) {
    set_var(ih, group, string(key), CString::new(value.to_string()).ok());
}

pub unsafe fn IupConfigSetVariableDouble(
    ih: *mut Ihandle,
    group: *const c_char,
    key: *const c_char,
    value: c_double,
) {
    set_var(ih, group, string(key), CString::new(value.to_string()).ok());
}

pub unsafe fn IupConfigGetVariableStr(
    ih: *mut Ihandle,
    group: *const c_char,
    key: *const c_char,
) -> *const c_char {
    get_var(ih, group, string(key))
}

pub unsafe fn IupConfigGetVariableStrId(
    ih: *mut Ihandle,
    group: *const c_char,
    key: *const c_char,
    id: c_int,
) -> *const c_char {
    get_var(ih, group, format!("{}{}", string(key), id))
}
