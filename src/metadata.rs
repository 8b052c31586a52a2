use anyhow::Context;
use id3::{ErrorKind, Tag, TagLike, Version};
use std::path::Path;

/// Set the album (TALB) of an MP3, creating an ID3 tag if the file has none.
/// Every other frame of an existing tag is kept as is.
pub fn set_album(file_path: &Path, album: &str, version: Version) -> anyhow::Result<()> {
    let mut tag = match Tag::read_from_path(file_path) {
        Ok(tag) => tag,
        Err(err) if matches!(err.kind, ErrorKind::NoTag) => Tag::new(),
        Err(err) => return Err(err).context("reading ID3 tag"),
    };

    tag.set_album(album);
    tag.write_to_path(file_path, version)
        .context("writing ID3 tag")?;

    Ok(())
}
