use std::fs;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use id3::Version;

use crate::{file_utils, logger::Logger, metadata};

/// Counters for one pass over a directory tree
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub directories: usize,
    pub tagged: usize,
    pub failed: usize,
    pub unreadable: usize,
    pub revisited: usize,
}

impl AddAssign for Summary {
    fn add_assign(&mut self, other: Self) {
        self.directories += other.directories;
        self.tagged += other.tagged;
        self.failed += other.failed;
        self.unreadable += other.unreadable;
        self.revisited += other.revisited;
    }
}

enum Step {
    Enter {
        dir: PathBuf,
        ancestors: Rc<Vec<PathBuf>>,
    },
    Leave {
        parent: PathBuf,
        dir: PathBuf,
    },
}

/// Tag every MP3 under `root` with the sanitized name of the directory that
/// directly contains it.
///
/// Directories are handled depth first from an explicit stack. Each pending
/// directory carries the canonical paths of the directories above it, and a
/// directory that resolves to one of its own ancestors is skipped, which
/// breaks symlink cycles. Failures are logged and never stop the pass.
pub fn tag_tree(root: &Path, version: Version, logger: &Logger) -> Summary {
    let mut summary = Summary::default();
    let mut stack = vec![Step::Enter {
        dir: root.to_path_buf(),
        ancestors: Rc::new(Vec::new()),
    }];

    while let Some(step) = stack.pop() {
        let (dir, ancestors) = match step {
            Step::Enter { dir, ancestors } => (dir, ancestors),
            Step::Leave { parent, dir } => {
                logger.subdirectory_complete(&parent, &dir);
                continue;
            }
        };

        let key = fs::canonicalize(&dir).unwrap_or_else(|_| dir.clone());
        if ancestors.contains(&key) {
            logger.directory_revisited(&dir);
            summary.revisited += 1;
            continue;
        }

        let (files, subdirs) = match file_utils::read_level(&dir) {
            Ok(level) => level,
            Err(err) => {
                logger.error(&err.to_string(), err.path());
                summary.unreadable += 1;
                continue;
            }
        };
        summary.directories += 1;

        let album = file_utils::album_name_for(&dir);
        for file in &files {
            match metadata::set_album(file, &album, version) {
                Ok(()) => {
                    logger.file_tagged(file, &album);
                    summary.tagged += 1;
                }
                Err(err) => {
                    logger.file_failed(file, &err);
                    summary.failed += 1;
                }
            }
        }

        let mut chain = Vec::clone(&ancestors);
        chain.push(key);
        let chain = Rc::new(chain);

        // reversed so the first subdirectory is popped first
        for sub in subdirs.into_iter().rev() {
            stack.push(Step::Leave {
                parent: dir.clone(),
                dir: sub.clone(),
            });
            stack.push(Step::Enter {
                dir: sub,
                ancestors: Rc::clone(&chain),
            });
        }
    }

    summary
}
