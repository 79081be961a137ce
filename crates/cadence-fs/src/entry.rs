use crate::{DirectoryError, MAX_NAME_LEN, NAME_LEN};
use zerocopy::byteorder::{LittleEndian, U32};
use zerocopy::{AsBytes, FromBytes, FromZeroes, Unaligned};

/// One 20-byte directory record.
///
/// Bytes `[0, 12)` hold the null-padded name, `[12, 16)` the starting
/// sector and `[16, 20)` the active flag, both little-endian. An entry whose
/// flag is zero is free no matter what the other fields contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromZeroes, FromBytes, AsBytes, Unaligned)]
#[repr(C)]
pub struct Entry {
    pub name: [u8; NAME_LEN],
    pub start_sector: U32<LittleEndian>,
    pub active: U32<LittleEndian>,
}

impl Entry {
    /// Builds an occupied entry from an already encoded name.
    pub fn new(name: [u8; NAME_LEN], start_sector: u32) -> Self {
        Self {
            name,
            start_sector: U32::new(start_sector),
            active: U32::new(1),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get() != 0
    }

    pub fn start_sector(&self) -> u32 {
        self.start_sector.get()
    }

    /// Name bytes up to the first null.
    pub fn name_bytes(&self) -> &[u8] {
        trim_nul(&self.name)
    }

    pub fn name_as_str(&self) -> &str {
        core::str::from_utf8(self.name_bytes()).unwrap_or("<invalid>")
    }
}

/// Encodes `name` into the fixed 12-byte name field.
///
/// Names longer than [`MAX_NAME_LEN`] are truncated, shorter ones are null
/// padded. Only non-null ASCII is accepted so that the stored bytes decode
/// back to a prefix of `name`.
pub fn encode_name(name: &str) -> Result<[u8; NAME_LEN], DirectoryError> {
    if name.is_empty() {
        return Err(DirectoryError::EmptyName);
    }
    if let Some(c) = name.chars().find(|&c| !c.is_ascii() || c == '\0') {
        return Err(DirectoryError::InvalidChar(c));
    }

    let bytes = name.as_bytes();
    let len = bytes.len().min(MAX_NAME_LEN);
    let mut encoded = [0u8; NAME_LEN];
    encoded[..len].copy_from_slice(&bytes[..len]);
    Ok(encoded)
}

pub(crate) fn trim_nul(name: &[u8]) -> &[u8] {
    let end = name.iter().position(|&c| c == 0).unwrap_or(name.len());
    &name[..end]
}
