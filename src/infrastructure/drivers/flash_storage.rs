//! Flash driver for the record store.
//!
//! The region starts at a sector boundary and spans exactly one sector.

use embedded_storage::nor_flash::{NorFlash, ReadNorFlash};
use esp_storage::FlashStorage;
use log::warn;
use wifi_led_core::{StorageDriver, StorageError};

pub const BLOCK_SIZE: u32 = 4096;

pub struct FlashRegionDriver {
    flash: FlashStorage<'static>,
    offset: u32,
}

impl FlashRegionDriver {
    pub fn new(flash: FlashStorage<'static>, offset: u32) -> Self {
        Self { flash, offset }
    }
}

impl<const SIZE: usize> StorageDriver<SIZE> for FlashRegionDriver {
    async fn read(&mut self, buffer: &mut [u8]) -> Result<(), StorageError> {
        self.flash.read(self.offset, buffer).map_err(|e| {
            warn!("storage: flash read at {:#x} failed: {:?}", self.offset, e);
            StorageError::Driver
        })
    }

    async fn write(&mut self, buffer: &[u8]) -> Result<(), StorageError> {
        self.flash.write(self.offset, buffer).map_err(|e| {
            warn!("storage: flash write at {:#x} failed: {:?}", self.offset, e);
            StorageError::Driver
        })
    }

    async fn erase(&mut self) -> Result<(), StorageError> {
        self.flash
            .erase(self.offset, self.offset + BLOCK_SIZE)
            .map_err(|e| {
                warn!("storage: flash erase at {:#x} failed: {:?}", self.offset, e);
                StorageError::Driver
            })
    }
}
