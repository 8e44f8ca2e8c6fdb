//! Memory-Mapped Config Slot
//!
//! Record di-serialize langsung ke region mmap, dan di-decode langsung dari
//! page cache tanpa copy ke buffer perantara.

use memmap2::{MmapMut, MmapOptions};
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::debug;

use crate::config::Fill;
use crate::error::StoreError;
use crate::field::{read_prefix, Field};
use crate::record::{FieldList, Record};

/// Konfigurasi slot
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path ke file slot
    pub path: PathBuf,
    /// Ukuran slot dalam bytes
    pub capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("upconf_slot.bin"),
            capacity: 4096,
        }
    }
}

/// Mmap-backed slot untuk satu record
pub struct ConfigStore {
    mmap: MmapMut,
    capacity: usize,
}

impl ConfigStore {
    /// Membuat atau membuka slot.
    ///
    /// File yang sudah lebih besar dari `capacity` tidak dipotong (bisa jadi
    /// ditulis firmware dengan slot lebih besar), tapi hanya `capacity` byte
    /// pertama yang di-map.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let capacity = config.capacity;
        if capacity == 0 {
            return Err(StoreError::InvalidCapacity(capacity));
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&config.path)?;

        if file.metadata()?.len() < capacity as u64 {
            file.set_len(capacity as u64)?;
        }

        // SAFETY: File dibuka read/write dan ukurannya >= capacity
        let mmap = unsafe { MmapOptions::new().len(capacity).map_mut(&file)? };

        debug!(path = %config.path.display(), capacity, "config slot mapped");

        Ok(Self { mmap, capacity })
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Ukuran record yang tersimpan menurut prefix-nya.
    ///
    /// Slot kosong (nol semua) → `Some(0)`.
    #[inline(always)]
    pub fn stored_size(&self) -> Option<usize> {
        read_prefix(&self.mmap)
    }

    /// Tulis record ke slot, nol-kan sisa slot, lalu flush ke disk.
    ///
    /// Returns jumlah byte record.
    pub fn store<L: FieldList>(&mut self, record: &Record<L>) -> Result<usize, StoreError> {
        let needed = Record::<L>::ENCODED_SIZE;
        if needed > self.capacity {
            return Err(StoreError::RecordTooLarge {
                needed,
                capacity: self.capacity,
            });
        }

        let written = record.serialize(&mut self.mmap[..])?;
        self.mmap[written..].fill(0);
        self.mmap.flush()?;

        debug!(bytes = written, fields = L::LEN, "record stored");
        Ok(written)
    }

    /// Decode record dari slot dengan default fill.
    #[inline(always)]
    pub fn load<L: FieldList>(&self, record: &mut Record<L>) -> usize {
        self.load_with(record, Fill::default())
    }

    /// Decode record dari slot.
    ///
    /// Returns panjang record di disk. Hasil decode dibaca lewat
    /// `has_value` record dan field-nya.
    pub fn load_with<L: FieldList>(&self, record: &mut Record<L>, fill: Fill) -> usize {
        let stored = self.stored_size().unwrap_or(0);
        let end = stored.min(self.capacity);
        debug!(stored, fields = L::LEN, "loading record from slot");
        record.deserialize_with(&self.mmap[..end], fill)
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("capacity", &self.capacity)
            .field("stored_size", &self.stored_size())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{BoolField, TextField, UintField};

    type V1 = Record<(TextField<8>, BoolField)>;
    type V2 = Record<(TextField<12>, BoolField, UintField)>;

    fn slot(dir: &tempfile::TempDir, capacity: usize) -> StoreConfig {
        StoreConfig {
            path: dir.path().join("slot.bin"),
            capacity,
        }
    }

    #[test]
    fn test_empty_slot_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::open(&slot(&dir, 256)).unwrap();
        assert_eq!(store.stored_size(), Some(0));

        let mut rec = V1::new();
        store.load(&mut rec);
        assert!(!rec.has_value());
    }

    #[test]
    fn test_persistence_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let config = slot(&dir, 256);

        {
            let mut store = ConfigStore::open(&config).unwrap();
            let mut rec = V1::new();
            rec.get_mut::<0>().set("unit-7");
            rec.get_mut::<1>().set(true);
            assert_eq!(store.store(&rec).unwrap(), V1::ENCODED_SIZE);
        }

        // Reopen dengan schema baru
        let store = ConfigStore::open(&config).unwrap();
        assert_eq!(store.stored_size(), Some(V1::ENCODED_SIZE));

        let mut rec = V2::new();
        assert_eq!(store.load(&mut rec), V1::ENCODED_SIZE);
        assert!(rec.has_value());
        assert_eq!(rec.get::<0>().as_str(), Some("unit-7"));
        assert!(rec.get::<1>().get());
        assert!(!rec.get::<2>().has_value());
    }

    #[test]
    fn test_smaller_record_clears_stale_tail() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ConfigStore::open(&slot(&dir, 128)).unwrap();

        store.store(&V2::new()).unwrap();
        store.store(&V1::new()).unwrap();
        assert_eq!(store.stored_size(), Some(V1::ENCODED_SIZE));
        assert!(store.mmap[V1::ENCODED_SIZE..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_record_too_large() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ConfigStore::open(&slot(&dir, 8)).unwrap();

        let err = store.store(&V1::new()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::RecordTooLarge {
                needed: 16,
                capacity: 8
            }
        ));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ConfigStore::open(&slot(&dir, 0)),
            Err(StoreError::InvalidCapacity(0))
        ));
    }

    #[test]
    fn test_existing_larger_file_not_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let config = slot(&dir, 64);
        std::fs::write(&config.path, vec![0u8; 512]).unwrap();

        let store = ConfigStore::open(&config).unwrap();
        assert_eq!(store.capacity(), 64);
        drop(store);
        assert_eq!(std::fs::metadata(&config.path).unwrap().len(), 512);
    }
}
