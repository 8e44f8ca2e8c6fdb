//! Field Layer: Fixed-Capacity Codec Strategies
//!
//! Prinsip desain:
//! - Self-describing: setiap field diawali length prefix miliknya sendiri
//! - Fixed-size: ukuran encode diketahui saat compile time (`ENCODED_SIZE`)
//! - Tolerant: capacity di disk boleh beda dengan capacity yang di-compile
//! - No allocation: encode/decode langsung ke/dari buffer milik caller

mod array;
mod frame;
mod scalar;
mod text;

pub use array::ArrayField;
pub use frame::{read_prefix, LenPrefix, MAX_FRAME_SIZE, PREFIX_SIZE};
pub use scalar::{BoolField, IntField, Scalar, ScalarField, UintField};
pub use text::TextField;

pub(crate) use frame::{begin_frame, copy_payload, open_frame};

use crate::config::Fill;
use crate::error::FrameError;

/// Jenis field. Set tertutup, tidak ada extension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    Array,
    Text,
    Record,
}

/// Capability set yang dimiliki setiap field (termasuk `Record`).
pub trait Field {
    /// Jenis field
    const KIND: FieldKind;

    /// Total ukuran encode: prefix + capacity payload
    const ENCODED_SIZE: usize;

    #[doc(hidden)]
    const FITS_PREFIX: () = assert!(
        Self::ENCODED_SIZE <= MAX_FRAME_SIZE,
        "encoded size does not fit the u16 length prefix"
    );

    /// Apakah decode terakhir mengisi field ini
    fn has_value(&self) -> bool;

    fn set_has_value(&mut self, present: bool);

    /// Dipanggil record induk setelah field sukses di-decode.
    #[inline(always)]
    fn mark_decoded(&mut self) {
        self.set_has_value(true);
    }

    /// Nol-kan storage dan set `has_value = false`
    fn clear(&mut self);

    /// Tandai field sebagai absent sesuai fill policy.
    ///
    /// Record meng-override ini supaya seluruh subtree ikut absent.
    #[inline(always)]
    fn mark_absent(&mut self, fill: Fill) {
        if fill.zeroes() {
            self.clear();
        } else {
            self.set_has_value(false);
        }
    }

    /// Tulis `[len][payload]` ke depan `out`.
    ///
    /// Returns jumlah byte yang ditulis (selalu `ENCODED_SIZE`).
    fn serialize(&self, out: &mut [u8]) -> Result<usize, FrameError>;

    /// Decode dari `src` dengan fill policy tertentu.
    ///
    /// Returns panjang frame MENURUT DISK (bukan capacity lokal), supaya
    /// caller bisa maju sebanyak byte yang benar-benar terpakai di disk.
    /// Returns 0 jika `src` lebih pendek dari prefix.
    fn deserialize_with(&mut self, src: &[u8], fill: Fill) -> usize;

    /// Decode dengan default fill (`Fill::Zero`)
    #[inline(always)]
    fn deserialize(&mut self, src: &[u8]) -> usize {
        self.deserialize_with(src, Fill::default())
    }
}
