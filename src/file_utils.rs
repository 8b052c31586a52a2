use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Clean a folder name for use as an album title.
///
/// Drops everything that is not a letter, digit, underscore or whitespace,
/// then collapses whitespace runs to a single space and trims the ends.
pub fn sanitize_album_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || is_space(*c))
        .collect();

    kept.split(is_space)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unicode whitespace plus the ASCII file/group/record/unit separators,
/// which many regex engines also count as `\s`
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Album title for the files directly inside `dir`
pub fn album_name_for(dir: &Path) -> String {
    dir.file_name()
        .map(|name| sanitize_album_name(&name.to_string_lossy()))
        .unwrap_or_default()
}

pub fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

/// Resolve a CLI argument to an absolute directory path
pub fn resolve_target(arg: &Path) -> Result<PathBuf, Error> {
    let path = fs::canonicalize(arg).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => Error::NotFound(arg.to_path_buf()),
        _ => Error::Resolve {
            path: arg.to_path_buf(),
            source,
        },
    })?;

    if !path.is_dir() {
        return Err(Error::NotADirectory(arg.to_path_buf()));
    }

    Ok(path)
}

/// One directory level: the MP3 files and the subdirectories directly inside
/// `dir`, each sorted by path. Symlinks are followed; entries that vanish or
/// cannot be stat'ed while listing are left out.
pub fn read_level(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>), Error> {
    let entries = fs::read_dir(dir).map_err(|source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    let mut dirs = Vec::new();

    for path in entries.filter_map(|entry| Some(entry.ok()?.path())) {
        let Ok(metadata) = fs::metadata(&path) else {
            continue;
        };

        if metadata.is_dir() {
            dirs.push(path);
        } else if metadata.is_file() && is_mp3(&path) {
            files.push(path);
        }
    }

    files.sort();
    dirs.sort();
    Ok((files, dirs))
}
