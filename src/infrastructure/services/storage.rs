use esp_hal::peripherals::FLASH;
use esp_storage::FlashStorage;
use log::info;
use wifi_led_core::storage::BOOT_RECORD_SIZE;
use wifi_led_core::{BootRecord, RecordStore, StorageError};

use crate::config;
use crate::infrastructure::drivers::FlashRegionDriver;

/// Bytes of the flash region read and written per access
pub const REGION_SIZE: usize = 64;

type BootStore = RecordStore<FlashRegionDriver, REGION_SIZE>;

/// Open the boot record region and count this boot.
///
/// A blank or outdated region is erased and re-initialized; any other
/// failure is returned and must be treated as fatal.
pub async fn init_boot_record(flash: FLASH<'static>) -> Result<BootRecord, StorageError> {
    let driver = FlashRegionDriver::new(FlashStorage::new(flash), config::STORAGE.offset);
    let mut store = BootStore::new(driver);

    let record = store
        .open_or_reset::<BOOT_RECORD_SIZE, BootRecord>()
        .await?
        .next_boot();
    store.save::<BOOT_RECORD_SIZE, _>(&record).await?;

    info!("storage: boot #{}", record.boot_count);
    Ok(record)
}
