//! Durable single-file subscription store.
//!
//! The whole index is kept in memory and written out as one snapshot after
//! every successful mutation. Snapshot layout:
//!
//! ```text
//! magic "SUB\0" | version u8 | len u64 LE | MessagePack index | crc32 u32 LE
//! ```
//!
//! A `LOCK` file held with an exclusive advisory lock keeps a second process
//! from opening the same directory.
//!
//! Writes are O(n) in the number of stored subscriptions: each mutation is
//! applied to a clone of the index, which only replaces the live index once
//! the full snapshot has been rewritten.

use crate::config::FileStoreConfig;
use crate::error::StoreError;
use crate::types::{Subscription, SubscriptionId};
use fs2::FileExt;
use parking_lot::RwLock;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{StoreResult, SubscriptionIndex, SubscriptionStore};

/// Magic bytes for the snapshot file.
const SNAPSHOT_MAGIC: &[u8; 4] = b"SUB\0";

/// Current snapshot format version.
const SNAPSHOT_VERSION: u8 = 1;

/// Bytes before the body: magic, version, body length.
const SNAPSHOT_HEADER_SIZE: u64 = 4 + 1 + 8;

/// Bytes after the body: CRC32.
const SNAPSHOT_TRAILER_SIZE: u64 = 4;

const SNAPSHOT_FILE: &str = "subscriptions.bin";
const LOCK_FILE: &str = "LOCK";

/// Subscription store persisted to a snapshot file.
pub struct FileStore {
    /// Snapshot file path.
    path: PathBuf,

    /// Lock file for exclusive access.
    _lock_file: File,

    /// In-memory index, authoritative between saves.
    index: RwLock<SubscriptionIndex>,
}

impl FileStore {
    /// Open an existing store or create a new one.
    pub fn open_or_create(config: FileStoreConfig) -> StoreResult<Self> {
        if config.path.join(SNAPSHOT_FILE).exists() {
            Self::open(config)
        } else if config.create_if_missing {
            Self::create(config)
        } else {
            Err(StoreError::InvalidFormat(format!(
                "No subscription store at {}",
                config.path.display()
            )))
        }
    }

    /// Create a new, empty store. Fails if a snapshot already exists.
    pub fn create(config: FileStoreConfig) -> StoreResult<Self> {
        fs::create_dir_all(&config.path)?;
        let lock_file = Self::acquire_lock(&config.path)?;

        let path = config.path.join(SNAPSHOT_FILE);
        if path.exists() {
            return Err(StoreError::InvalidFormat(format!(
                "Subscription store already exists at {}",
                config.path.display()
            )));
        }

        let index = SubscriptionIndex::new();
        Self::save(&path, &index)?;

        Ok(Self {
            path,
            _lock_file: lock_file,
            index: RwLock::new(index),
        })
    }

    /// Open an existing store.
    pub fn open(config: FileStoreConfig) -> StoreResult<Self> {
        let lock_file = Self::acquire_lock(&config.path)?;

        let path = config.path.join(SNAPSHOT_FILE);
        let index = Self::load(&path)?;
        debug!(path = %path.display(), count = index.len(), "loaded subscription snapshot");

        Ok(Self {
            path,
            _lock_file: lock_file,
            index: RwLock::new(index),
        })
    }

    /// Number of stored subscriptions.
    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.read().is_empty()
    }

    /// Apply a mutation and persist it. The in-memory index only changes if
    /// the snapshot was written.
    fn mutate<T, F>(&self, op: F) -> StoreResult<T>
    where
        F: FnOnce(&mut SubscriptionIndex) -> StoreResult<T>,
    {
        let mut index = self.index.write();
        let mut next = index.clone();
        let out = op(&mut next)?;
        Self::save(&self.path, &next)?;
        *index = next;
        Ok(out)
    }

    fn save(path: &Path, index: &SubscriptionIndex) -> StoreResult<()> {
        let encoded = rmp_serde::to_vec_named(index)?;
        let checksum = crc32fast::hash(&encoded);

        let tmp_path = path.with_extension("tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&tmp_path)?;

            file.write_all(SNAPSHOT_MAGIC)?;
            file.write_all(&[SNAPSHOT_VERSION])?;
            file.write_all(&(encoded.len() as u64).to_le_bytes())?;
            file.write_all(&encoded)?;
            file.write_all(&checksum.to_le_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    fn load(path: &Path) -> StoreResult<SubscriptionIndex> {
        let mut file = File::open(path)?;

        let mut magic = [0u8; 4];
        file.read_exact(&mut magic)?;
        if &magic != SNAPSHOT_MAGIC {
            return Err(StoreError::InvalidFormat("Invalid snapshot magic".into()));
        }

        let mut version = [0u8; 1];
        file.read_exact(&mut version)?;
        if version[0] != SNAPSHOT_VERSION {
            return Err(StoreError::InvalidFormat(format!(
                "Unsupported snapshot version: {}",
                version[0]
            )));
        }

        let mut len_bytes = [0u8; 8];
        file.read_exact(&mut len_bytes)?;
        let len = u64::from_le_bytes(len_bytes);

        // Body length must fit in what the file actually holds
        let file_size = file.metadata()?.len();
        let available = file_size.saturating_sub(SNAPSHOT_HEADER_SIZE + SNAPSHOT_TRAILER_SIZE);
        if len > available {
            return Err(StoreError::InvalidFormat(format!(
                "Snapshot body length {} exceeds file size {}",
                len, file_size
            )));
        }

        let mut encoded = vec![0u8; len as usize];
        file.read_exact(&mut encoded)?;

        let mut checksum_bytes = [0u8; 4];
        file.read_exact(&mut checksum_bytes)?;
        let stored_checksum = u32::from_le_bytes(checksum_bytes);
        let computed_checksum = crc32fast::hash(&encoded);
        if stored_checksum != computed_checksum {
            return Err(StoreError::ChecksumMismatch {
                expected: stored_checksum,
                got: computed_checksum,
            });
        }

        Ok(rmp_serde::from_slice(&encoded)?)
    }

    fn acquire_lock(dir: &Path) -> StoreResult<File> {
        let lock_file = File::create(dir.join(LOCK_FILE))?;

        lock_file
            .try_lock_exclusive()
            .map_err(|_| StoreError::Locked)?;

        Ok(lock_file)
    }
}

impl SubscriptionStore for FileStore {
    index_reads!();

    fn create_subscription(&self, subscription: Subscription) -> StoreResult<SubscriptionId> {
        self.mutate(|index| index.insert(subscription))
    }

    fn replace_subscription(&self, subscription: Subscription) -> StoreResult<()> {
        self.mutate(|index| index.replace(subscription))
    }

    fn delete_subscription_by_slug(&self, slug: &str) -> StoreResult<()> {
        self.mutate(|index| index.remove(slug).map(|_| ()))
    }
}
