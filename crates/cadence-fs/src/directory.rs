use crate::entry::{encode_name, trim_nul, Entry};
use crate::{DirectoryError, MAX_ENTRIES, NAME_LEN};
use zerocopy::{AsBytes, FromBytes, FromZeroes, Unaligned};

/// The directory region: exactly [`MAX_ENTRIES`] entries packed back to
/// back, entry `i` at byte offset `i * ENTRY_SIZE`.
#[derive(Debug, Clone, PartialEq, Eq, FromZeroes, FromBytes, AsBytes, Unaligned)]
#[repr(C)]
pub struct Directory {
    entries: [Entry; MAX_ENTRIES],
}

impl Directory {
    pub fn empty() -> Self {
        Self::new_zeroed()
    }

    pub fn entries(&self) -> &[Entry; MAX_ENTRIES] {
        &self.entries
    }

    pub fn entry(&self, slot: usize) -> Option<&Entry> {
        self.entries.get(slot)
    }

    /// Occupied slots in index order.
    pub fn active(&self) -> impl Iterator<Item = (usize, &Entry)> {
        self.entries.iter().enumerate().filter(|(_, e)| e.is_active())
    }

    /// Looks up the first occupied entry carrying `name`, compared on its
    /// encoded (possibly truncated) form.
    pub fn find(&self, name: &str) -> Option<(usize, &Entry)> {
        let encoded = encode_name(name).ok()?;
        let wanted = trim_nul(&encoded);
        self.active().find(|(_, e)| e.name_bytes() == wanted)
    }

    /// First slot, scanning from index 0, that is either free or already
    /// holds `name`. A free slot ahead of a same-named one wins.
    pub fn select_slot(&self, name: &[u8; NAME_LEN]) -> Option<usize> {
        let wanted = trim_nul(name);
        self.entries
            .iter()
            .position(|e| !e.is_active() || e.name_bytes() == wanted)
    }

    /// Records `name` at `start_sector` in the slot chosen by
    /// [`select_slot`](Self::select_slot) and returns that slot.
    ///
    /// On error the directory is left untouched.
    pub fn upsert(&mut self, name: &str, start_sector: u32) -> Result<usize, DirectoryError> {
        let encoded = encode_name(name)?;
        let slot = self.select_slot(&encoded).ok_or(DirectoryError::Full)?;
        self.entries[slot] = Entry::new(encoded, start_sector);
        Ok(slot)
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DIRECTORY_BYTES, ENTRY_SIZE};

    fn name(i: usize) -> String {
        format!("file{i}")
    }

    fn full_directory() -> Directory {
        let mut dir = Directory::empty();
        for i in 0..MAX_ENTRIES {
            dir.upsert(&name(i), 100 + i as u32).unwrap();
        }
        dir
    }

    #[test]
    fn upsert_overwrites_existing_name_in_place() {
        let mut dir = Directory::empty();
        assert_eq!(dir.upsert("X", 50), Ok(0));
        assert_eq!(dir.upsert("Y", 60), Ok(1));
        assert_eq!(dir.upsert("X", 80), Ok(0));

        let xs: Vec<_> = dir.active().filter(|(_, e)| e.name_bytes() == b"X").collect();
        assert_eq!(xs.len(), 1);
        assert_eq!(xs[0].1.start_sector(), 80);
        assert_eq!(dir.active().count(), 2);
    }

    #[test]
    fn first_fit_prefers_lowest_free_slot() {
        let mut dir = full_directory();
        let mut raw = dir.as_bytes().to_vec();
        for slot in [0usize, 3] {
            raw[slot * ENTRY_SIZE + 16] = 0;
        }
        dir = Directory::read_from(&raw[..]).unwrap();

        assert_eq!(dir.upsert("fresh", 7), Ok(0));
        assert_eq!(dir.upsert("fresher", 8), Ok(3));
    }

    #[test]
    fn free_slot_before_same_name_wins() {
        let mut dir = Directory::empty();
        dir.upsert("a", 10).unwrap();
        dir.upsert("b", 11).unwrap();
        dir.upsert("c", 12).unwrap();
        let mut raw = dir.as_bytes().to_vec();
        raw[16] = 0;
        let mut dir = Directory::read_from(&raw[..]).unwrap();

        assert_eq!(dir.upsert("c", 99), Ok(0));
        assert_eq!(dir.entry(2).unwrap().start_sector(), 12);
    }

    #[test]
    fn full_directory_rejects_new_name_without_mutation() {
        let mut dir = full_directory();
        let before = dir.clone();

        assert_eq!(dir.upsert("newcomer", 5), Err(DirectoryError::Full));
        assert_eq!(dir, before);
    }

    #[test]
    fn full_directory_still_accepts_known_name() {
        let mut dir = full_directory();
        assert_eq!(dir.upsert(&name(24), 5), Ok(24));
        assert_eq!(dir.entry(24).unwrap().start_sector(), 5);
    }

    #[test]
    fn inactive_garbage_is_ignored() {
        let mut raw = [0xAAu8; DIRECTORY_BYTES];
        for slot in 0..MAX_ENTRIES {
            raw[slot * ENTRY_SIZE + 16..slot * ENTRY_SIZE + 20].fill(0);
        }
        raw[..4].copy_from_slice(b"ghst");
        raw[4] = 0;
        let mut dir = Directory::read_from(&raw[..]).unwrap();

        assert!(dir.find("ghst").is_none());
        assert_eq!(dir.active().count(), 0);
        assert_eq!(dir.upsert("real", 40), Ok(0));
        assert_eq!(&dir.as_bytes()[..12], b"real\0\0\0\0\0\0\0\0");
    }

    #[test]
    fn truncated_names_match_their_stored_form() {
        let mut dir = Directory::empty();
        assert_eq!(dir.upsert("abcdefghijklmnop", 20), Ok(0));
        assert_eq!(dir.upsert("abcdefghijklmnop", 21), Ok(0));
        assert_eq!(dir.find("abcdefghijkXYZ").map(|(slot, _)| slot), Some(0));
        assert_eq!(dir.active().count(), 1);
    }

    #[test]
    fn invalid_name_leaves_directory_alone() {
        let mut dir = Directory::empty();
        assert_eq!(dir.upsert("", 3), Err(DirectoryError::EmptyName));
        assert_eq!(dir, Directory::empty());
    }
}
