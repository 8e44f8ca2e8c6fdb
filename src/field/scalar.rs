//! Scalar Field: satu nilai POD dengan lebar tetap
//!
//! Nilai ditulis little-endian. `bool` = 1 byte, decode sebagai `byte != 0`.

use super::{begin_frame, copy_payload, open_frame, Field, FieldKind, PREFIX_SIZE};
use crate::config::Fill;
use crate::error::FrameError;

/// Lebar scalar terbesar (u128/i128)
pub(crate) const MAX_SCALAR_WIDTH: usize = 16;

mod sealed {
    pub trait Sealed {}
}

/// Tipe POD yang boleh jadi isi `ScalarField` / elemen `ArrayField`.
///
/// Sealed: set tipe sudah tetap. `Default` harus all-zero bytes.
pub trait Scalar: sealed::Sealed + Copy + Default + PartialEq + std::fmt::Debug {
    /// Lebar dalam bytes
    const WIDTH: usize;

    /// `out.len() == WIDTH`
    fn write_le(self, out: &mut [u8]);

    /// `src.len() == WIDTH`
    fn read_le(src: &[u8]) -> Self;
}

macro_rules! impl_scalar {
    ($($t:ty),+ $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Scalar for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();

                #[inline(always)]
                fn write_le(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_le_bytes());
                }

                #[inline(always)]
                fn read_le(src: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$t>()];
                    raw.copy_from_slice(src);
                    <$t>::from_le_bytes(raw)
                }
            }
        )+
    };
}

impl_scalar!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, f32, f64);

impl sealed::Sealed for bool {}

impl Scalar for bool {
    const WIDTH: usize = 1;

    #[inline(always)]
    fn write_le(self, out: &mut [u8]) {
        out[0] = self as u8;
    }

    #[inline(always)]
    fn read_le(src: &[u8]) -> Self {
        src[0] != 0
    }
}

/// Decode satu scalar dari payload yang mungkin lebih pendek dari `WIDTH`.
#[inline(always)]
pub(crate) fn decode_scalar<T: Scalar>(current: T, payload: &[u8], fill: Fill) -> T {
    let mut raw = [0u8; MAX_SCALAR_WIDTH];
    let raw = &mut raw[..T::WIDTH];
    current.write_le(raw);
    copy_payload(raw, payload, fill);
    T::read_le(raw)
}

/// Field berisi satu scalar
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScalarField<T: Scalar> {
    value: T,
    has_value: bool,
}

pub type IntField = ScalarField<i32>;
pub type UintField = ScalarField<u32>;
pub type BoolField = ScalarField<bool>;

impl<T: Scalar> ScalarField<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            has_value: false,
        }
    }

    #[inline(always)]
    pub fn get(&self) -> T {
        self.value
    }

    #[inline(always)]
    pub fn set(&mut self, value: T) {
        self.value = value;
    }
}

impl<T: Scalar> Field for ScalarField<T> {
    const KIND: FieldKind = FieldKind::Scalar;
    const ENCODED_SIZE: usize = PREFIX_SIZE + T::WIDTH;

    #[inline(always)]
    fn has_value(&self) -> bool {
        self.has_value
    }

    #[inline(always)]
    fn set_has_value(&mut self, present: bool) {
        self.has_value = present;
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    #[inline(always)]
    fn serialize(&self, out: &mut [u8]) -> Result<usize, FrameError> {
        let payload = begin_frame::<Self>(out)?;
        self.value.write_le(payload);
        Ok(Self::ENCODED_SIZE)
    }

    #[inline(always)]
    fn deserialize_with(&mut self, src: &[u8], fill: Fill) -> usize {
        let Some((disk_len, payload)) = open_frame(src) else {
            return 0;
        };
        self.value = decode_scalar(self.value, payload, fill);
        disk_len
    }
}
