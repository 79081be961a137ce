use crate::error::InjectError;
use crate::image::{sectors_for, DiskImage};
use cadence_fs::{encode_name, MAX_NAME_LEN};
use log::{info, warn};
use std::fmt;
use std::fs;
use std::io::{Read, Seek, Write};
use std::path::Path;

/// Outcome of a successful injection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injected {
    /// Name as stored in the table, after truncation.
    pub name: String,
    pub slot: usize,
    pub start_sector: u32,
    pub len: usize,
    pub truncated: bool,
}

impl Injected {
    /// Sectors touched by the content write.
    pub fn sectors(&self) -> u32 {
        sectors_for(self.len)
    }
}

impl fmt::Display for Injected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully linked {} to sector {} ({} bytes, {} sectors, slot {})",
            self.name,
            self.start_sector,
            self.len,
            self.sectors(),
            self.slot
        )
    }
}

/// Writes `content` at `start_sector` and links it in the file table as
/// `filename`.
///
/// The content goes to disk before the table is consulted. If the table
/// has neither a free slot nor an entry for `filename` the call fails with
/// [`InjectError::DirectoryFull`] and the table is left as it was, but the
/// content write is not undone. The table itself is stored back in a
/// single write.
pub fn inject<T: Read + Write + Seek>(
    image: &mut DiskImage<T>,
    filename: &str,
    content: &[u8],
    start_sector: u32,
) -> Result<Injected, InjectError> {
    encode_name(filename).map_err(|e| InjectError::from_directory(filename, e))?;
    let truncated = filename.len() > MAX_NAME_LEN;
    if truncated {
        warn!(
            "{:?} is longer than {} characters and will be truncated",
            filename, MAX_NAME_LEN
        );
    }

    image.write_at(start_sector, content)?;

    let mut directory = image.read_directory()?;
    let slot = match directory.upsert(filename, start_sector) {
        Ok(slot) => slot,
        Err(e) => {
            warn!(
                "file table update for {:?} rejected, {} bytes at sector {} left unlinked",
                filename,
                content.len(),
                start_sector
            );
            return Err(InjectError::from_directory(filename, e));
        }
    };
    image.write_directory(&directory)?;
    image.flush()?;

    let name = directory
        .entry(slot)
        .map(|e| e.name_as_str().to_owned())
        .unwrap_or_default();
    info!("linked {} to sector {} (slot {})", name, start_sector, slot);

    Ok(Injected {
        name,
        slot,
        start_sector,
        len: content.len(),
        truncated,
    })
}

/// Reads `source` and injects it into the image at `image_path`.
///
/// The source is read before the image is opened, so a missing source or a
/// missing image leaves the image untouched.
pub fn inject_file(
    image_path: &Path,
    filename: &str,
    source: &Path,
    start_sector: u32,
) -> Result<Injected, InjectError> {
    let content = fs::read(source).map_err(|e| InjectError::SourceUnavailable {
        path: source.to_path_buf(),
        source: e,
    })?;
    let mut image = DiskImage::open(image_path)?;
    inject(&mut image, filename, &content, start_sector)
}
