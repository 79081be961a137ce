#![cfg_attr(not(test), no_std)]

//! Layout of the Cadence flat file table.
//!
//! A Cadence disk image is addressed in 512-byte sectors. Sector
//! [`DIRECTORY_SECTOR`] holds a [`Directory`] of exactly [`MAX_ENTRIES`]
//! fixed-width [`Entry`] records; every other sector is either reserved
//! (boot code, kernel) or holds raw file content located by an entry's
//! starting sector. Nothing here performs I/O, so the same types serve the
//! host-side injector and a loader walking the table.

mod directory;
mod entry;

pub use directory::Directory;
pub use entry::{encode_name, Entry};

pub const SECTOR_SIZE: usize = 512;
pub const DIRECTORY_SECTOR: u32 = 2;
pub const MAX_ENTRIES: usize = 25;
pub const ENTRY_SIZE: usize = 20;
pub const NAME_LEN: usize = 12;
/// The last name byte is always a terminating null.
pub const MAX_NAME_LEN: usize = NAME_LEN - 1;
pub const DIRECTORY_BYTES: usize = MAX_ENTRIES * ENTRY_SIZE;

const _: () = assert!(core::mem::size_of::<Entry>() == ENTRY_SIZE);
const _: () = assert!(core::mem::size_of::<Directory>() == DIRECTORY_BYTES);
const _: () = assert!(DIRECTORY_BYTES <= SECTOR_SIZE);

/// Byte offset of the first byte of `sector` within the image.
pub const fn sector_offset(sector: u32) -> u64 {
    sector as u64 * SECTOR_SIZE as u64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("all {} directory slots are occupied", MAX_ENTRIES)]
    Full,

    #[error("file name is empty")]
    EmptyName,

    #[error("file name contains {0:?}, only non-null ASCII is allowed")]
    InvalidChar(char),
}
