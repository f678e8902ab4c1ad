// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use anyhow::{bail, Context};
use std::{env, path::PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Backend {
    Cocoa,
    Gtk,
    Motif,
    Qt,
    Win32,
}

enum Location {
    Dir(PathBuf),
    PkgConfig,
}

fn main() -> anyhow::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=IUP_LIB_DIR");
    println!("cargo:rerun-if-env-changed=IUP_STATIC");

    if env::var_os("DOCS_RS").is_some() {
        return Ok(());
    }

    let target_os = env::var("CARGO_CFG_TARGET_OS")
        .context("CARGO_CFG_TARGET_OS is not set")?;
    let backend = select_backend(&target_os)?;

    let Some(location) = find_iup()? else {
        println!(
            "cargo:warning=IUP was not found (set IUP_LIB_DIR or install \
             iup.pc); only the headless backend of the `iup` crate will link",
        );
        return Ok(());
    };

    link_iup(&location);
    link_modules(backend, &target_os);
    link_backend(backend);

    #[cfg(feature = "include-win-manifest")]
    if target_os == "windows" {
        embed_win_manifest()?;
    }

    Ok(())
}

fn select_backend(target_os: &str) -> anyhow::Result<Backend> {
    let requested: Vec<Backend> = [
        (cfg!(feature = "gtk"), Backend::Gtk),
        (cfg!(feature = "motif"), Backend::Motif),
        (cfg!(feature = "qt"), Backend::Qt),
    ]
    .into_iter()
    .filter_map(|(enabled, backend)| enabled.then_some(backend))
    .collect();

    match requested.as_slice() {
        [] => Ok(match target_os {
            "windows" => Backend::Win32,
            "macos" => Backend::Cocoa,
            _ => Backend::Gtk,
        }),
        [backend] => Ok(*backend),
        many => bail!("only one IUP backend may be enabled, got {:?}", many),
    }
}

fn is_static() -> bool {
    env::var_os("IUP_STATIC").map_or(false, |v| v != "0")
}

fn find_iup() -> anyhow::Result<Option<Location>> {
    if let Some(dir) = env::var_os("IUP_LIB_DIR") {
        let dir = PathBuf::from(dir);
        if !dir.is_dir() {
            bail!("IUP_LIB_DIR={} is not a directory", dir.display());
        }

        return Ok(Some(Location::Dir(dir)));
    }

    match pkg_config::Config::new().statik(is_static()).probe("iup") {
        Ok(_) => Ok(Some(Location::PkgConfig)),
        Err(e) => {
            println!("cargo:warning=pkg-config could not find iup: {}", e);
            Ok(None)
        }
    }
}

fn link_kind() -> &'static str {
    if is_static() {
        "static"
    } else {
        "dylib"
    }
}

fn link_iup(location: &Location) {
    if let Location::Dir(dir) = location {
        println!("cargo:rustc-link-search=native={}", dir.display());
        println!("cargo:rustc-link-lib={}=iup", link_kind());
    }
}

/// Links a system library found by pkg-config. A missing one only matters
/// when the native backend is used, and then shows up as a link error.
fn probe_or_warn(lib: &str, needed_by: &str) {
    if let Err(e) = pkg_config::probe_library(lib) {
        println!(
            "cargo:warning={} needs {}, which pkg-config could not find: {}",
            needed_by, lib, e,
        );
    }
}

fn link_modules(backend: Backend, target_os: &str) {
    let kind = link_kind();

    if cfg!(feature = "gl") {
        println!("cargo:rustc-link-lib={}=iupgl", kind);
        match target_os {
            "windows" => println!("cargo:rustc-link-lib=opengl32"),
            "macos" => println!("cargo:rustc-link-lib=framework=OpenGL"),
            _ => println!("cargo:rustc-link-lib=GL"),
        }
    }

    if cfg!(feature = "web") {
        println!("cargo:rustc-link-lib={}=iupweb", kind);
        if backend == Backend::Gtk && target_os != "windows" {
            probe_or_warn("webkit2gtk-4.0", "the `web` feature");
        }
    }

    if cfg!(feature = "ctl") {
        for lib in ["iupcontrols", "iupcd", "cd"] {
            println!("cargo:rustc-link-lib={}={}", kind, lib);
        }
    }
}

fn link_backend(backend: Backend) {
    match backend {
        Backend::Gtk => {
            probe_or_warn("gtk+-3.0", "the GTK backend");
        }
        Backend::Qt => {
            probe_or_warn("Qt5Widgets", "the Qt backend");
        }
        Backend::Motif => {
            for lib in ["Xm", "Xmu", "Xt", "X11"] {
                println!("cargo:rustc-link-lib={}", lib);
            }
        }
        Backend::Win32 => {
            for lib in [
                "gdi32", "user32", "comdlg32", "comctl32", "ole32", "oleaut32",
                "uuid",
            ] {
                println!("cargo:rustc-link-lib={}", lib);
            }
        }
        Backend::Cocoa => {
            println!("cargo:rustc-link-lib=framework=Cocoa");
            println!("cargo:rustc-link-lib=framework=QuartzCore");
        }
    }
}

#[cfg(feature = "include-win-manifest")]
fn embed_win_manifest() -> anyhow::Result<()> {
    static MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<assembly xmlns="urn:schemas-microsoft-com:asm.v1" manifestVersion="1.0">
  <dependency>
    <dependentAssembly>
      <assemblyIdentity type="win32" name="Microsoft.Windows.Common-Controls"
        version="6.0.0.0" processorArchitecture="*"
        publicKeyToken="6595b64144ccf1df" language="*"/>
    </dependentAssembly>
  </dependency>
</assembly>
"#;

    let mut res = winres::WindowsResource::new();
    res.set_manifest(MANIFEST);
    res.compile().context("failed to compile the Windows manifest")
}
