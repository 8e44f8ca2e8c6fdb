//! Array Field: `[T; N]` dengan panjang tetap

use super::scalar::decode_scalar;
use super::{begin_frame, open_frame, Field, FieldKind, Scalar, PREFIX_SIZE};
use crate::config::Fill;
use crate::error::FrameError;

/// Field berisi array scalar dengan panjang tetap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayField<T: Scalar, const N: usize> {
    values: [T; N],
    has_value: bool,
}

impl<T: Scalar, const N: usize> Default for ArrayField<T, N> {
    fn default() -> Self {
        Self {
            values: [T::default(); N],
            has_value: false,
        }
    }
}

impl<T: Scalar, const N: usize> ArrayField<T, N> {
    pub fn new(values: [T; N]) -> Self {
        Self {
            values,
            has_value: false,
        }
    }

    #[inline(always)]
    pub fn get(&self) -> &[T; N] {
        &self.values
    }

    #[inline(always)]
    pub fn get_mut(&mut self) -> &mut [T; N] {
        &mut self.values
    }

    #[inline(always)]
    pub fn set(&mut self, values: [T; N]) {
        self.values = values;
    }

    /// Jumlah elemen
    #[inline(always)]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}

impl<T: Scalar, const N: usize> Field for ArrayField<T, N> {
    const KIND: FieldKind = FieldKind::Array;
    const ENCODED_SIZE: usize = PREFIX_SIZE + T::WIDTH * N;

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

    fn serialize(&self, out: &mut [u8]) -> Result<usize, FrameError> {
        let payload = begin_frame::<Self>(out)?;
        for (chunk, value) in payload.chunks_exact_mut(T::WIDTH).zip(self.values.iter()) {
            value.write_le(chunk);
        }
        Ok(Self::ENCODED_SIZE)
    }

    fn deserialize_with(&mut self, src: &[u8], fill: Fill) -> usize {
        let Some((disk_len, payload)) = open_frame(src) else {
            return 0;
        };

        let copy_len = payload.len().min(T::WIDTH * N);
        for (i, value) in self.values.iter_mut().enumerate() {
            let start = i * T::WIDTH;
            if start >= copy_len {
                if !fill.zeroes() {
                    break;
                }
                *value = T::default();
                continue;
            }
            // Elemen terakhir bisa terpotong kalau payload bukan kelipatan WIDTH
            let end = (start + T::WIDTH).min(copy_len);
            *value = decode_scalar(*value, &payload[start..end], fill);
        }

        disk_len
    }
}
