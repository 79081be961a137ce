use crate::error::InjectError;
use cadence_fs::{sector_offset, Directory, DIRECTORY_SECTOR, SECTOR_SIZE};
use log::debug;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use zerocopy::{AsBytes, FromZeroes};

/// A disk image addressed in 512-byte sectors.
///
/// Any seekable read/write store works; on the host it is normally a
/// [`File`], in tests an in-memory cursor.
pub struct DiskImage<T> {
    store: T,
}

impl DiskImage<File> {
    /// Opens an existing image for reading and writing. The image is never
    /// created here: it must already carry a directory region.
    pub fn open(path: &Path) -> Result<Self, InjectError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| InjectError::ImageUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(file))
    }

    /// Creates a zero-filled image of `sectors` sectors, which leaves every
    /// directory slot free. An existing file is only replaced with `force`.
    pub fn create(path: &Path, sectors: u32, force: bool) -> Result<Self, InjectError> {
        let min = DIRECTORY_SECTOR + 1;
        if sectors < min {
            return Err(InjectError::ImageTooSmall { sectors, min });
        }

        let mut options = OpenOptions::new();
        options.read(true).write(true);
        if force {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let unavailable = |source| InjectError::ImageUnavailable {
            path: path.to_path_buf(),
            source,
        };
        let file = options.open(path).map_err(unavailable)?;
        file.set_len(sector_offset(sectors)).map_err(unavailable)?;

        debug!("created {} ({} sectors)", path.display(), sectors);
        Ok(Self::new(file))
    }
}

impl<T: Read + Write + Seek> DiskImage<T> {
    pub fn new(store: T) -> Self {
        Self { store }
    }

    pub fn get_ref(&self) -> &T {
        &self.store
    }

    pub fn into_inner(self) -> T {
        self.store
    }

    /// Writes `bytes` starting at the first byte of `sector`. Anything
    /// already stored there is overwritten.
    pub fn write_at(&mut self, sector: u32, bytes: &[u8]) -> Result<(), InjectError> {
        debug!("write {} bytes at sector {}", bytes.len(), sector);
        self.store.seek(SeekFrom::Start(sector_offset(sector)))?;
        self.store.write_all(bytes)?;
        Ok(())
    }

    pub fn read_at(&mut self, sector: u32, buf: &mut [u8]) -> Result<(), InjectError> {
        self.store.seek(SeekFrom::Start(sector_offset(sector)))?;
        self.store.read_exact(buf)?;
        Ok(())
    }

    pub fn read_directory(&mut self) -> Result<Directory, InjectError> {
        let mut directory = Directory::new_zeroed();
        self.read_at(DIRECTORY_SECTOR, directory.as_bytes_mut())?;
        Ok(directory)
    }

    /// Stores the whole directory region in a single write.
    pub fn write_directory(&mut self, directory: &Directory) -> Result<(), InjectError> {
        self.write_at(DIRECTORY_SECTOR, directory.as_bytes())
    }

    pub fn read_content(&mut self, start_sector: u32, len: usize) -> Result<Vec<u8>, InjectError> {
        let mut content = vec![0u8; len];
        self.read_at(start_sector, &mut content)?;
        Ok(content)
    }

    /// Reads `len` bytes of the file linked as `name`. The table records no
    /// length, so the caller decides how much to read.
    pub fn read_file(&mut self, name: &str, len: usize) -> Result<Vec<u8>, InjectError> {
        let directory = self.read_directory()?;
        let (_, entry) = directory
            .find(name)
            .ok_or_else(|| InjectError::NotFound(name.to_owned()))?;
        self.read_content(entry.start_sector(), len)
    }

    pub fn flush(&mut self) -> Result<(), InjectError> {
        self.store.flush()?;
        Ok(())
    }
}

/// Whole sectors needed to hold `len` bytes.
pub fn sectors_for(len: usize) -> u32 {
    len.div_ceil(SECTOR_SIZE) as u32
}
