//! Filesystem fixtures shared by the unit tests.

use id3::{Tag, TagLike};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One MPEG-1 Layer III frame header (128 kbit/s, 44.1 kHz) followed by silence
fn mpeg_frame() -> Vec<u8> {
    let mut frame = vec![0xFF, 0xFB, 0x90, 0x64];
    frame.resize(417, 0);
    frame
}

/// A scratch directory under the system temp dir, removed on drop
pub struct Scratch {
    root: PathBuf,
}

impl Scratch {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("foldertag-{}", Uuid::new_v4()));
        fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root.join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    pub fn file_with(&self, rel: &str, data: &[u8]) -> PathBuf {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, data).unwrap();
        path
    }

    pub fn file(&self, rel: &str) -> PathBuf {
        self.file_with(rel, b"fLaC not really audio")
    }

    /// A tagless MP3 made of a few frames
    pub fn mp3(&self, rel: &str) -> PathBuf {
        self.file_with(rel, &mpeg_frame().repeat(4))
    }

    /// An MP3 whose ID3 header claims a version that does not exist
    pub fn corrupt_mp3(&self, rel: &str) -> PathBuf {
        let mut data = b"ID3\x07\x00\x00\x00\x00\x00\x20".to_vec();
        data.resize(data.len() + 32, 0xAA);
        data.extend(mpeg_frame());
        self.file_with(rel, &data)
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

pub fn read_album(path: &Path) -> Option<String> {
    Tag::read_from_path(path)
        .ok()
        .and_then(|tag| tag.album().map(str::to_owned))
}
