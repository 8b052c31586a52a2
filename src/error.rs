use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Directory '{}' not found.", .0.display())]
    NotFound(PathBuf),

    #[error("'{}' is not a directory.", .0.display())]
    NotADirectory(PathBuf),

    #[error("Cannot resolve '{}': {source}", path.display())]
    Resolve {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Error::NotFound(path) | Error::NotADirectory(path) => path,
            Error::Resolve { path, .. } | Error::ReadDir { path, .. } => path,
        }
    }
}
