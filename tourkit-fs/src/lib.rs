//! Capability-based file access for instance text.
//!
//! Paths are UTF-8 ([`camino`]) and every operation resolves its parent
//! directory through `cap-std` before touching the file itself.
#![forbid(unsafe_code)]

use std::io::{self, Read as _, Write as _};
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Read the whole of `path` as UTF-8 text.
///
/// # Errors
///
/// Returns the underlying I/O error when the parent directory cannot be
/// opened, the file is missing, or its contents are not valid UTF-8.
pub fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let (dir, name) = open_parent(path)?;
    let mut file = dir.open(&name)?;
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    Ok(text)
}

/// Write `contents` to `path`, creating missing parent directories.
///
/// # Errors
///
/// Returns the underlying I/O error when a directory cannot be created or
/// the file cannot be written.
pub fn write_string(path: &Utf8Path, contents: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent(path)?;
    let mut file = dir.create(&name)?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}

/// Whether `path` names an existing regular file.
///
/// # Errors
///
/// Returns an error when the parent directory cannot be opened.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent(path)?;
    match dir.metadata(&name) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Open the directory holding `path` and return it with the file name.
fn open_parent(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (base, relative) = split_base(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

/// Split `parent` into an ambient root (`/`, a drive prefix, or `.`) and the
/// path below it.
fn split_base(parent: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();
    let root = match std_parent.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix_text = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("path prefix is not UTF-8"))?;
            Utf8PathBuf::from(prefix_text).join(std::path::MAIN_SEPARATOR_STR)
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR),
        _ => Utf8PathBuf::from("."),
    };
    let relative = parent
        .strip_prefix(&root)
        .map_or_else(|_| parent.to_path_buf(), Utf8Path::to_path_buf);
    let dir = fs_utf8::Dir::open_ambient_dir(&root, ambient_authority())?;
    Ok((dir, relative))
}
