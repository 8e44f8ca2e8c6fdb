//! upconf - Upgradeable Fixed-Size Config Records
//!
//! Arsitektur:
//! - Self-Describing: setiap field dan record diawali length prefix (u16)
//! - Compile-Time Size: ukuran encode = associated const, buffer bisa di stack
//! - No-Allocation: encode/decode langsung ke/dari buffer milik caller
//! - Upgradeable: record dari firmware lama tetap terbaca oleh schema baru
//!   (field ditambah di akhir, capacity field boleh berubah)
//!
//! Aturan kompatibilitas:
//! - Field HANYA boleh ditambah di AKHIR record
//! - Urutan field (enumeration index) tidak boleh diubah
//! - Jenis field tidak boleh diubah, hanya capacity-nya

pub mod config;
pub mod error;
pub mod field;
pub mod record;
pub mod store;

pub use config::Fill;
pub use error::{FrameError, StoreError};
pub use field::{
    ArrayField, BoolField, Field, FieldKind, IntField, Scalar, ScalarField, TextField, UintField,
};
pub use record::{FieldAt, FieldList, Record};
pub use store::{ConfigStore, StoreConfig};
