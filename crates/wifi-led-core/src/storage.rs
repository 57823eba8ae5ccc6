//! Versioned record storage in a single flash region.
//!
//! Layout: `[magic: u16 LE][version: u8][payload]`, zero padded to the region
//! size. A blank, corrupt or outdated region is erased and re-initialized by
//! [`RecordStore::open_or_reset`].

use bytemuck::{Pod, Zeroable};
use log::{info, warn};

const MAGIC_HEADER: u16 = 0xB007;
pub const MAGIC_HEADER_SIZE: usize = MAGIC_HEADER.to_le_bytes().len();
pub const HEADER_SIZE: usize = MAGIC_HEADER_SIZE + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Flash driver failed
    Driver,
    /// Region does not carry the magic header
    Blank,
    /// Region holds a record of another layout version
    VersionMismatch(u8),
    /// Payload failed to decode
    Corrupt,
    /// Record does not fit the region
    Capacity,
}

impl StorageError {
    /// Whether erasing the region can recover from this error.
    pub const fn is_recoverable(self) -> bool {
        matches!(
            self,
            StorageError::Blank | StorageError::VersionMismatch(_) | StorageError::Corrupt
        )
    }
}

/// A fixed-size record with a layout version.
pub trait Record<const SIZE: usize>
where
    Self: Sized,
{
    const VERSION: u8;

    fn encode(&self) -> [u8; SIZE];
    fn decode(data: &[u8]) -> Option<Self>;
}

#[allow(async_fn_in_trait)]
pub trait StorageDriver<const STORAGE_SIZE: usize> {
    async fn read(&mut self, buffer: &mut [u8]) -> Result<(), StorageError>;
    async fn write(&mut self, buffer: &[u8]) -> Result<(), StorageError>;
    async fn erase(&mut self) -> Result<(), StorageError>;
}

/// Single-record store over a storage driver.
pub struct RecordStore<DRIVER: StorageDriver<STORAGE_SIZE>, const STORAGE_SIZE: usize> {
    driver: DRIVER,
}

impl<DRIVER: StorageDriver<STORAGE_SIZE>, const STORAGE_SIZE: usize>
    RecordStore<DRIVER, STORAGE_SIZE>
{
    pub fn new(driver: DRIVER) -> Self {
        Self { driver }
    }

    pub fn into_driver(self) -> DRIVER {
        self.driver
    }

    /// Load the record from the region.
    pub async fn load<const SIZE: usize, T: Record<SIZE>>(&mut self) -> Result<T, StorageError> {
        if HEADER_SIZE + SIZE > STORAGE_SIZE {
            return Err(StorageError::Capacity);
        }
        let mut buffer = [0u8; STORAGE_SIZE];
        self.driver.read(&mut buffer).await?;

        let magic = u16::from_le_bytes([buffer[0], buffer[1]]);
        if magic != MAGIC_HEADER {
            return Err(StorageError::Blank);
        }
        let version = buffer[MAGIC_HEADER_SIZE];
        if version != T::VERSION {
            return Err(StorageError::VersionMismatch(version));
        }

        T::decode(&buffer[HEADER_SIZE..HEADER_SIZE + SIZE]).ok_or(StorageError::Corrupt)
    }

    /// Erase the region and write the record.
    pub async fn save<const SIZE: usize, T: Record<SIZE>>(
        &mut self,
        record: &T,
    ) -> Result<(), StorageError> {
        if HEADER_SIZE + SIZE > STORAGE_SIZE {
            return Err(StorageError::Capacity);
        }
        let mut data = [0u8; STORAGE_SIZE];
        data[..MAGIC_HEADER_SIZE].copy_from_slice(&MAGIC_HEADER.to_le_bytes());
        data[MAGIC_HEADER_SIZE] = T::VERSION;
        data[HEADER_SIZE..HEADER_SIZE + SIZE].copy_from_slice(&record.encode());

        self.driver.erase().await?;
        self.driver.write(&data).await
    }

    /// Load the record, erasing and re-initializing the region once if its
    /// content is unusable.
    ///
    /// Driver failures and a failing second attempt are returned as is.
    pub async fn open_or_reset<const SIZE: usize, T: Record<SIZE> + Default>(
        &mut self,
    ) -> Result<T, StorageError> {
        match self.load::<SIZE, T>().await {
            Ok(record) => return Ok(record),
            Err(e) if e.is_recoverable() => {
                warn!("storage: {:?}, erasing region", e);
            }
            Err(e) => return Err(e),
        }

        self.save::<SIZE, T>(&T::default()).await?;
        let record = self.load::<SIZE, T>().await?;
        info!("storage: region initialized");
        Ok(record)
    }
}

/// Boot bookkeeping persisted across resets.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Zeroable, Pod)]
#[repr(C)]
pub struct BootRecord {
    pub boot_count: u32,
}

pub const BOOT_RECORD_SIZE: usize = size_of::<BootRecord>();

impl BootRecord {
    #[must_use]
    pub const fn next_boot(self) -> Self {
        Self {
            boot_count: self.boot_count.wrapping_add(1),
        }
    }
}

impl Record<BOOT_RECORD_SIZE> for BootRecord {
    const VERSION: u8 = 1;

    fn encode(&self) -> [u8; BOOT_RECORD_SIZE] {
        bytemuck::cast(*self)
    }

    fn decode(data: &[u8]) -> Option<Self> {
        bytemuck::try_pod_read_unaligned(data).ok()
    }
}
