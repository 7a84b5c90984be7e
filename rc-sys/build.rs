use std::path::{Path, PathBuf};

use anyhow::{bail, Context};

fn main() -> anyhow::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=LIBRAW_DIR");

    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").context("OUT_DIR is not set")?);

    let includes = match libraw_dir() {
        Some(libraw_dir) => {
            build(&out_dir, &libraw_dir)?;
            vec![libraw_dir]
        }
        None => probe()?,
    };

    println!(
        "cargo:include={}",
        std::env::join_paths(&includes)?.to_string_lossy()
    );

    bindings(&out_dir, &includes)
}

/// A LibRaw source tree given through `LIBRAW_DIR`
fn libraw_dir() -> Option<PathBuf> {
    let dir = std::env::var("LIBRAW_DIR").ok()?;
    let dir = shellexpand::full(&dir).ok()?;
    dunce::canonicalize(&*dir).ok()
}

/// Locate an installed LibRaw, preferring the thread-safe build
fn probe() -> anyhow::Result<Vec<PathBuf>> {
    let library = pkg_config::Config::new()
        .atleast_version("0.20")
        .probe("libraw_r")
        .or_else(|_| {
            pkg_config::Config::new()
                .atleast_version("0.20")
                .probe("libraw")
        })
        .context("LibRaw not found, install it or point LIBRAW_DIR at its sources")?;
    Ok(library.include_paths)
}

fn build(out_dir: impl AsRef<Path>, libraw_dir: impl AsRef<Path>) -> anyhow::Result<()> {
    let libraw_dir = libraw_dir.as_ref();
    let mut sources = Vec::new();
    collect_sources(&libraw_dir.join("src"), &mut sources)?;
    if sources.is_empty() {
        bail!(
            "No LibRaw sources found under {}",
            libraw_dir.join("src").display()
        );
    }
    sources
        .iter()
        .for_each(|s| println!("cargo:rerun-if-changed={}", s.display()));

    let mut libraw = cc::Build::new();
    libraw.cpp(true).include(libraw_dir).files(sources);

    #[cfg(windows)]
    libraw
        .define("HAVE_BOOLEAN", None)
        .define("LIBRAW_WIN32_DLLDEFS", None)
        .define("LIBRAW_BUILDLIB", None)
        .static_crt(true);

    libraw.warnings(false);
    libraw.extra_warnings(false);
    libraw.flag_if_supported("-Wno-format-truncation");
    libraw.flag_if_supported("-Wno-unused-result");
    libraw.flag_if_supported("-Wno-format-overflow");
    libraw.flag_if_supported("-pthread");

    #[cfg(target_os = "linux")]
    libraw.cpp_link_stdlib("stdc++");

    #[cfg(target_os = "macos")]
    libraw.cpp_link_stdlib("c++");

    #[cfg(unix)]
    libraw.static_flag(true);

    libraw.compile("raw_r");

    println!(
        "cargo:rustc-link-search=native={}",
        out_dir.as_ref().join("lib").display()
    );
    println!("cargo:rustc-link-lib=static=raw_r");
    Ok(())
}

/// Every translation unit of the library; placeholder units and the C++-only
/// entry point are left out since the C API covers them
fn collect_sources(dir: &Path, sources: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_sources(&path, sources)?;
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.ends_with(".cpp") && !name.ends_with("_ph.cpp") && name != "libraw_cxx.cpp" {
            sources.push(dunce::canonicalize(&path)?);
        }
    }
    sources.sort();
    Ok(())
}

fn header(includes: &[PathBuf]) -> Option<PathBuf> {
    includes
        .iter()
        .map(PathBuf::as_path)
        .chain([Path::new("/usr/include"), Path::new("/usr/local/include")])
        .flat_map(|dir| [dir.join("libraw").join("libraw.h"), dir.join("libraw.h")])
        .find(|header| header.exists())
}

fn bindings(out_dir: impl AsRef<Path>, includes: &[PathBuf]) -> anyhow::Result<()> {
    let header = header(includes).context("Unable to find libraw.h")?;
    println!("cargo:rerun-if-changed={}", header.display());

    let bindings = bindgen::Builder::default()
        .header(header.to_string_lossy())
        .clang_args(includes.iter().map(|i| format!("-I{}", i.display())))
        .use_core()
        .ctypes_prefix("libc")
        .generate_comments(true)
        .parse_callbacks(Box::new(bindgen::CargoCallbacks::new()))
        .derive_eq(true)
        .size_t_is_usize(true)
        // only LibRaw's own surface, the system headers it pulls in stay out
        .allowlist_function("libraw_.*")
        .allowlist_type("libraw_.*")
        .allowlist_type("LibRaw_.*")
        .allowlist_var("LIBRAW_.*")
        .generate()
        .context("Unable to generate bindings")?;

    bindings
        .write_to_file(out_dir.as_ref().join("bindings.rs"))
        .context("Couldn't write bindings")?;
    Ok(())
}
