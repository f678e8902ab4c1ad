// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw declarations of the IUP C API.
//!
//! Linking is configured by `build.rs`. Nothing here is safe to call before
//! [`IupOpen`].

#![allow(
    non_camel_case_types,
    non_snake_case,
    non_upper_case_globals,
)]

use std::os::raw::{c_char, c_double, c_float, c_int, c_uchar, c_void};

/// An interface element.
#[repr(C)]
pub struct Ihandle {
    _unused: [u8; 0],
}

/// The generic callback type. IUP casts it to the real signature of each
/// callback before calling it.
pub type Icallback = Option<unsafe extern "C" fn(ih: *mut Ihandle) -> c_int>;

pub const IUP_NAME: &str = "IUP - Portable User Interface";

/* function return values */
pub const IUP_ERROR: c_int = 1;
pub const IUP_NOERROR: c_int = 0;
pub const IUP_OPENED: c_int = -1;
pub const IUP_INVALID: c_int = -1;
pub const IUP_INVALID_ID: c_int = -10;

/* callback return values */
pub const IUP_IGNORE: c_int = -1;
pub const IUP_DEFAULT: c_int = -2;
pub const IUP_CLOSE: c_int = -3;
pub const IUP_CONTINUE: c_int = -4;

/* IupPopup and IupShowXY parameter values */
pub const IUP_CENTER: c_int = 0xFFFF;
pub const IUP_LEFT: c_int = 0xFFFE;
pub const IUP_RIGHT: c_int = 0xFFFD;
pub const IUP_MOUSEPOS: c_int = 0xFFFC;
pub const IUP_CURRENT: c_int = 0xFFFB;
pub const IUP_CENTERPARENT: c_int = 0xFFFA;
pub const IUP_LEFTPARENT: c_int = 0xFFF9;
pub const IUP_RIGHTPARENT: c_int = 0xFFF8;
pub const IUP_TOP: c_int = IUP_LEFT;
pub const IUP_BOTTOM: c_int = IUP_RIGHT;

/* SHOW_CB values */
pub const IUP_SHOW: c_int = 0;
pub const IUP_RESTORE: c_int = 1;
pub const IUP_MINIMIZE: c_int = 2;
pub const IUP_MAXIMIZE: c_int = 3;
pub const IUP_HIDE: c_int = 4;

/* BUTTON_CB button values */
pub const IUP_BUTTON1: c_int = b'1' as c_int;
pub const IUP_BUTTON2: c_int = b'2' as c_int;
pub const IUP_BUTTON3: c_int = b'3' as c_int;
pub const IUP_BUTTON4: c_int = b'4' as c_int;
pub const IUP_BUTTON5: c_int = b'5' as c_int;

/* key status string: "S C 1 2 3 D A Y 4 5", one character per flag */
pub const IUP_STATUS_LEN: usize = 10;
pub const IUP_STATUS_SHIFT: usize = 0;
pub const IUP_STATUS_CONTROL: usize = 1;
pub const IUP_STATUS_BUTTON1: usize = 2;
pub const IUP_STATUS_BUTTON2: usize = 3;
pub const IUP_STATUS_BUTTON3: usize = 4;
pub const IUP_STATUS_DOUBLE: usize = 5;
pub const IUP_STATUS_ALT: usize = 6;
pub const IUP_STATUS_SYS: usize = 7;
pub const IUP_STATUS_BUTTON4: usize = 8;
pub const IUP_STATUS_BUTTON5: usize = 9;

/* IupConfigLoad and IupConfigSave return values */
pub const IUP_CONFIG_OK: c_int = 0;
pub const IUP_CONFIG_OPEN_ERROR: c_int = -1;
pub const IUP_CONFIG_ACCESS_ERROR: c_int = -2;
pub const IUP_CONFIG_FILENAME_ERROR: c_int = -3;

/* key codes */
pub const K_BS: c_int = 0x08;
pub const K_TAB: c_int = 0x09;
pub const K_LF: c_int = 0x0A;
pub const K_CR: c_int = 0x0D;
pub const K_SP: c_int = 0x20;
pub const K_ESC: c_int = 0xFF1B;

pub const fn iup_isShiftXkey(c: c_int) -> bool {
    c & 0x1000_0000 != 0
}
pub const fn iup_isCtrlXkey(c: c_int) -> bool {
    c & 0x2000_0000 != 0
}
pub const fn iup_isAltXkey(c: c_int) -> bool {
    c & 0x4000_0000 != 0
}
pub const fn iup_isSysXkey(c: c_int) -> bool {
    (c as u32) & 0x8000_0000 != 0
}
pub const fn iup_XkeyBase(c: c_int) -> c_int {
    c & 0x0FFF_FFFF
}
pub const fn iup_XkeyShift(c: c_int) -> c_int {
    c | 0x1000_0000
}
pub const fn iup_XkeyCtrl(c: c_int) -> c_int {
    c | 0x2000_0000
}
pub const fn iup_XkeyAlt(c: c_int) -> c_int {
    c | 0x4000_0000
}

extern "C" {
    /* main API */
    pub fn IupOpen(argc: *mut c_int, argv: *mut *mut *mut c_char) -> c_int;
    pub fn IupClose();
    pub fn IupVersion() -> *mut c_char;
    pub fn IupVersionNumber() -> c_int;

    pub fn IupMainLoop() -> c_int;
    pub fn IupLoopStep() -> c_int;
    pub fn IupLoopStepWait() -> c_int;
    pub fn IupMainLoopLevel() -> c_int;
    pub fn IupFlush();
    pub fn IupExitLoop();
    pub fn IupPostMessage(
        ih: *mut Ihandle,
        s: *const c_char,
        i: c_int,
        d: c_double,
        p: *mut c_void,
    );

    pub fn IupUpdate(ih: *mut Ihandle);
    pub fn IupRedraw(ih: *mut Ihandle, children: c_int);
    pub fn IupRefresh(ih: *mut Ihandle);

    pub fn IupMap(ih: *mut Ihandle) -> c_int;
    pub fn IupUnmap(ih: *mut Ihandle);
    pub fn IupDestroy(ih: *mut Ihandle);
    pub fn IupDetach(child: *mut Ihandle);
    pub fn IupAppend(ih: *mut Ihandle, child: *mut Ihandle) -> *mut Ihandle;
    pub fn IupInsert(
        ih: *mut Ihandle,
        ref_child: *mut Ihandle,
        child: *mut Ihandle,
    ) -> *mut Ihandle;
    pub fn IupGetChild(ih: *mut Ihandle, pos: c_int) -> *mut Ihandle;
    pub fn IupGetChildPos(ih: *mut Ihandle, child: *mut Ihandle) -> c_int;
    pub fn IupGetChildCount(ih: *mut Ihandle) -> c_int;
    pub fn IupGetNextChild(ih: *mut Ihandle, child: *mut Ihandle) -> *mut Ihandle;
    pub fn IupGetBrother(ih: *mut Ihandle) -> *mut Ihandle;
    pub fn IupGetParent(ih: *mut Ihandle) -> *mut Ihandle;
    pub fn IupGetDialog(ih: *mut Ihandle) -> *mut Ihandle;
    pub fn IupGetDialogChild(ih: *mut Ihandle, name: *const c_char) -> *mut Ihandle;
    pub fn IupReparent(
        ih: *mut Ihandle,
        new_parent: *mut Ihandle,
        ref_child: *mut Ihandle,
    ) -> c_int;

    pub fn IupPopup(ih: *mut Ihandle, x: c_int, y: c_int) -> c_int;
    pub fn IupShow(ih: *mut Ihandle) -> c_int;
    pub fn IupShowXY(ih: *mut Ihandle, x: c_int, y: c_int) -> c_int;
    pub fn IupHide(ih: *mut Ihandle) -> c_int;

    pub fn IupGetClassName(ih: *mut Ihandle) -> *mut c_char;

    pub fn IupSetFocus(ih: *mut Ihandle) -> *mut Ihandle;
    pub fn IupGetFocus() -> *mut Ihandle;

    pub fn IupSetHandle(name: *const c_char, ih: *mut Ihandle) -> *mut Ihandle;
    pub fn IupGetHandle(name: *const c_char) -> *mut Ihandle;
    pub fn IupGetName(ih: *mut Ihandle) -> *mut c_char;

    /* attributes */
    pub fn IupSetAttributes(ih: *mut Ihandle, str: *const c_char) -> *mut Ihandle;
    pub fn IupResetAttribute(ih: *mut Ihandle, name: *const c_char);
    pub fn IupGetAllAttributes(
        ih: *mut Ihandle,
        names: *mut *mut c_char,
        n: c_int,
    ) -> c_int;

    pub fn IupSetAttribute(ih: *mut Ihandle, name: *const c_char, value: *const c_char);
    pub fn IupSetStrAttribute(ih: *mut Ihandle, name: *const c_char, value: *const c_char);
    pub fn IupSetInt(ih: *mut Ihandle, name: *const c_char, value: c_int);
    pub fn IupSetFloat(ih: *mut Ihandle, name: *const c_char, value: c_float);
    pub fn IupSetDouble(ih: *mut Ihandle, name: *const c_char, value: c_double);
    pub fn IupSetRGB(
        ih: *mut Ihandle,
        name: *const c_char,
        r: c_uchar,
        g: c_uchar,
        b: c_uchar,
    );

    pub fn IupGetAttribute(ih: *mut Ihandle, name: *const c_char) -> *mut c_char;
    pub fn IupGetInt(ih: *mut Ihandle, name: *const c_char) -> c_int;
    pub fn IupGetIntInt(
        ih: *mut Ihandle,
        name: *const c_char,
        i1: *mut c_int,
        i2: *mut c_int,
    ) -> c_int;
    pub fn IupGetFloat(ih: *mut Ihandle, name: *const c_char) -> c_float;
    pub fn IupGetDouble(ih: *mut Ihandle, name: *const c_char) -> c_double;
    pub fn IupGetRGB(
        ih: *mut Ihandle,
        name: *const c_char,
        r: *mut c_uchar,
        g: *mut c_uchar,
        b: *mut c_uchar,
    );

    pub fn IupSetAttributeId(
        ih: *mut Ihandle,
        name: *const c_char,
        id: c_int,
        value: *const c_char,
    );
    pub fn IupSetStrAttributeId(
        ih: *mut Ihandle,
        name: *const c_char,
        id: c_int,
        value: *const c_char,
    );
    pub fn IupSetIntId(ih: *mut Ihandle, name: *const c_char, id: c_int, value: c_int);
    pub fn IupSetFloatId(ih: *mut Ihandle, name: *const c_char, id: c_int, value: c_float);
    pub fn IupSetDoubleId(ih: *mut Ihandle, name: *const c_char, id: c_int, value: c_double);
    pub fn IupSetRGBId(
        ih: *mut Ihandle,
        name: *const c_char,
        id: c_int,
        r: c_uchar,
        g: c_uchar,
        b: c_uchar,
    );

    pub fn IupGetAttributeId(ih: *mut Ihandle, name: *const c_char, id: c_int) -> *mut c_char;
    pub fn IupGetIntId(ih: *mut Ihandle, name: *const c_char, id: c_int) -> c_int;
    pub fn IupGetFloatId(ih: *mut Ihandle, name: *const c_char, id: c_int) -> c_float;
    pub fn IupGetDoubleId(ih: *mut Ihandle, name: *const c_char, id: c_int) -> c_double;
    pub fn IupGetRGBId(
        ih: *mut Ihandle,
        name: *const c_char,
        id: c_int,
        r: *mut c_uchar,
        g: *mut c_uchar,
        b: *mut c_uchar,
    );

    pub fn IupSetAttributeId2(
        ih: *mut Ihandle,
        name: *const c_char,
        lin: c_int,
        col: c_int,
        value: *const c_char,
    );
    pub fn IupSetStrAttributeId2(
        ih: *mut Ihandle,
        name: *const c_char,
        lin: c_int,
        col: c_int,
        value: *const c_char,
    );
    pub fn IupSetIntId2(
        ih: *mut Ihandle,
        name: *const c_char,
        lin: c_int,
        col: c_int,
        value: c_int,
    );
    pub fn IupSetFloatId2(
        ih: *mut Ihandle,
        name: *const c_char,
        lin: c_int,
        col: c_int,
        value: c_float,
    );
    pub fn IupSetDoubleId2(
        ih: *mut Ihandle,
        name: *const c_char,
        lin: c_int,
        col: c_int,
        value: c_double,
    );
    pub fn IupSetRGBId2(
        ih: *mut Ihandle,
        name: *const c_char,
        lin: c_int,
        col: c_int,
        r: c_uchar,
        g: c_uchar,
        b: c_uchar,
    );

    pub fn IupGetAttributeId2(
        ih: *mut Ihandle,
        name: *const c_char,
        lin: c_int,
        col: c_int,
    ) -> *mut c_char;
    pub fn IupGetIntId2(ih: *mut Ihandle, name: *const c_char, lin: c_int, col: c_int) -> c_int;
    pub fn IupGetFloatId2(
        ih: *mut Ihandle,
        name: *const c_char,
        lin: c_int,
        col: c_int,
    ) -> c_float;
    pub fn IupGetDoubleId2(
        ih: *mut Ihandle,
        name: *const c_char,
        lin: c_int,
        col: c_int,
    ) -> c_double;
    pub fn IupGetRGBId2(
        ih: *mut Ihandle,
        name: *const c_char,
        lin: c_int,
        col: c_int,
        r: *mut c_uchar,
        g: *mut c_uchar,
        b: *mut c_uchar,
    );

    pub fn IupSetGlobal(name: *const c_char, value: *const c_char);
    pub fn IupSetStrGlobal(name: *const c_char, value: *const c_char);
    pub fn IupGetGlobal(name: *const c_char) -> *mut c_char;

    pub fn IupSetAttributeHandle(ih: *mut Ihandle, name: *const c_char, ih_named: *mut Ihandle);
    pub fn IupGetAttributeHandle(ih: *mut Ihandle, name: *const c_char) -> *mut Ihandle;

    /* callbacks */
    pub fn IupGetCallback(ih: *mut Ihandle, name: *const c_char) -> Icallback;
    pub fn IupSetCallback(ih: *mut Ihandle, name: *const c_char, func: Icallback) -> Icallback;
    pub fn IupGetFunction(name: *const c_char) -> Icallback;
    pub fn IupSetFunction(name: *const c_char, func: Icallback) -> Icallback;

    /* elements */
    pub fn IupCreate(classname: *const c_char) -> *mut Ihandle;

    pub fn IupFill() -> *mut Ihandle;
    pub fn IupSpace() -> *mut Ihandle;
    pub fn IupRadio(child: *mut Ihandle) -> *mut Ihandle;
    pub fn IupVboxv(children: *mut *mut Ihandle) -> *mut Ihandle;
    pub fn IupZboxv(children: *mut *mut Ihandle) -> *mut Ihandle;
    pub fn IupHboxv(children: *mut *mut Ihandle) -> *mut Ihandle;
    pub fn IupNormalizerv(ih_list: *mut *mut Ihandle) -> *mut Ihandle;
    pub fn IupCboxv(children: *mut *mut Ihandle) -> *mut Ihandle;
    pub fn IupSbox(child: *mut Ihandle) -> *mut Ihandle;
    pub fn IupSplit(child1: *mut Ihandle, child2: *mut Ihandle) -> *mut Ihandle;
    pub fn IupScrollBox(child: *mut Ihandle) -> *mut Ihandle;
    pub fn IupGridBoxv(children: *mut *mut Ihandle) -> *mut Ihandle;
    pub fn IupExpander(child: *mut Ihandle) -> *mut Ihandle;
    pub fn IupDetachBox(child: *mut Ihandle) -> *mut Ihandle;
    pub fn IupBackgroundBox(child: *mut Ihandle) -> *mut Ihandle;
    pub fn IupFrame(child: *mut Ihandle) -> *mut Ihandle;

    pub fn IupImage(width: c_int, height: c_int, pixels: *const c_uchar) -> *mut Ihandle;
    pub fn IupImageRGB(width: c_int, height: c_int, pixels: *const c_uchar) -> *mut Ihandle;
    pub fn IupImageRGBA(width: c_int, height: c_int, pixels: *const c_uchar) -> *mut Ihandle;

    pub fn IupItem(title: *const c_char, action: *const c_char) -> *mut Ihandle;
    pub fn IupSubmenu(title: *const c_char, child: *mut Ihandle) -> *mut Ihandle;
    pub fn IupSeparator() -> *mut Ihandle;
    pub fn IupMenuv(children: *mut *mut Ihandle) -> *mut Ihandle;

    pub fn IupButton(title: *const c_char, action: *const c_char) -> *mut Ihandle;
    pub fn IupCanvas(action: *const c_char) -> *mut Ihandle;
    pub fn IupDialog(child: *mut Ihandle) -> *mut Ihandle;
    pub fn IupUser() -> *mut Ihandle;
    pub fn IupLabel(title: *const c_char) -> *mut Ihandle;
    pub fn IupList(action: *const c_char) -> *mut Ihandle;
    pub fn IupText(action: *const c_char) -> *mut Ihandle;
    pub fn IupMultiLine(action: *const c_char) -> *mut Ihandle;
    pub fn IupToggle(title: *const c_char, action: *const c_char) -> *mut Ihandle;
    pub fn IupTimer() -> *mut Ihandle;
    pub fn IupClipboard() -> *mut Ihandle;
    pub fn IupProgressBar() -> *mut Ihandle;
    pub fn IupVal(r#type: *const c_char) -> *mut Ihandle;
    pub fn IupTabsv(children: *mut *mut Ihandle) -> *mut Ihandle;
    pub fn IupTree() -> *mut Ihandle;
    pub fn IupLink(url: *const c_char, title: *const c_char) -> *mut Ihandle;
    pub fn IupSpin() -> *mut Ihandle;
    pub fn IupSpinbox(child: *mut Ihandle) -> *mut Ihandle;
    pub fn IupDatePick() -> *mut Ihandle;
    pub fn IupCalendar() -> *mut Ihandle;

    /* predefined dialogs */
    pub fn IupFileDlg() -> *mut Ihandle;
    pub fn IupMessageDlg() -> *mut Ihandle;
    pub fn IupColorDlg() -> *mut Ihandle;
    pub fn IupFontDlg() -> *mut Ihandle;
    pub fn IupProgressDlg() -> *mut Ihandle;

    pub fn IupGetFile(arq: *mut c_char) -> c_int;
    pub fn IupMessage(title: *const c_char, msg: *const c_char);
    pub fn IupMessageError(parent: *mut Ihandle, message: *const c_char);
    pub fn IupMessageAlarm(
        parent: *mut Ihandle,
        title: *const c_char,
        message: *const c_char,
        buttons: *const c_char,
    ) -> c_int;
    pub fn IupAlarm(
        title: *const c_char,
        msg: *const c_char,
        b1: *const c_char,
        b2: *const c_char,
        b3: *const c_char,
    ) -> c_int;
    pub fn IupGetText(title: *const c_char, text: *mut c_char, maxsize: c_int) -> c_int;
    pub fn IupGetColor(x: c_int, y: c_int, r: *mut c_uchar, g: *mut c_uchar, b: *mut c_uchar)
        -> c_int;

    /* config */
    pub fn IupConfig() -> *mut Ihandle;
    pub fn IupConfigLoad(ih: *mut Ihandle) -> c_int;
    pub fn IupConfigSave(ih: *mut Ihandle) -> c_int;
    pub fn IupConfigSetVariableStr(
        ih: *mut Ihandle,
        group: *const c_char,
        key: *const c_char,
        value: *const c_char,
    );
    pub fn IupConfigSetVariableStrId(
        ih: *mut Ihandle,
        group: *const c_char,
        key: *const c_char,
        id: c_int,
        value: *const c_char,
    );
    pub fn IupConfigSetVariableInt(
        ih: *mut Ihandle,
        group: *const c_char,
        key: *const c_char,
        value: c_int,
    );
    pub fn IupConfigSetVariableDouble(
        ih: *mut Ihandle,
        group: *const c_char,
        key: *const c_char,
        value: c_double,
    );
    pub fn IupConfigGetVariableStr(
        ih: *mut Ihandle,
        group: *const c_char,
        key: *const c_char,
    ) -> *const c_char;
    pub fn IupConfigGetVariableStrId(
        ih: *mut Ihandle,
        group: *const c_char,
        key: *const c_char,
        id: c_int,
    ) -> *const c_char;
}

#[cfg(feature = "gl")]
extern "C" {
    pub fn IupGLCanvasOpen();
    pub fn IupGLCanvas(action: *const c_char) -> *mut Ihandle;
    pub fn IupGLMakeCurrent(ih: *mut Ihandle);
    pub fn IupGLIsCurrent(ih: *mut Ihandle) -> c_int;
    pub fn IupGLSwapBuffers(ih: *mut Ihandle);
}

#[cfg(feature = "web")]
extern "C" {
    pub fn IupWebBrowserOpen() -> c_int;
    pub fn IupWebBrowser() -> *mut Ihandle;
}

#[cfg(feature = "ctl")]
extern "C" {
    pub fn IupControlsOpen() -> c_int;
    pub fn IupMatrix(action: *const c_char) -> *mut Ihandle;
}
