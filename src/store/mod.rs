//! Store: persistent config slot
//!
//! Satu file = satu slot = satu record di offset 0. Isi file PERSIS layout
//! record (tanpa header tambahan), sisanya nol. Analog sektor flash di device.

mod mmap_store;

pub use mmap_store::{ConfigStore, StoreConfig};
