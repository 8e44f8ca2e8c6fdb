//! Heterogeneous field list di atas tuple
//!
//! Setiap posisi tuple = satu field, index tuple = positional key.
//! Encode/decode di-unroll per posisi saat compile time, ukuran total
//! di-fold jadi associated const.

use super::cursor::DecodeCursor;
use crate::config::Fill;
use crate::error::FrameError;
use crate::field::Field;

/// Daftar field terurut milik satu record.
pub trait FieldList {
    /// Jumlah field
    const LEN: usize;

    /// Σ `ENCODED_SIZE` semua field (tanpa prefix record)
    const ENCODED_SIZE: usize;

    /// Serialize semua field berurutan, returns total byte.
    fn serialize_each(&self, out: &mut [u8]) -> Result<usize, FrameError>;

    /// Jalankan decode loop untuk setiap field berurutan.
    fn decode_each(&mut self, cursor: &mut DecodeCursor<'_>);

    /// Presence flag field ke-`index`, `None` kalau index di luar range
    fn presence(&self, index: usize) -> Option<bool>;

    /// Tandai semua field absent sesuai fill policy
    fn mark_absent_each(&mut self, fill: Fill);
}

/// Akses typed ke field pada posisi `I`.
pub trait FieldAt<const I: usize> {
    type Output: Field;

    fn field(&self) -> &Self::Output;

    fn field_mut(&mut self) -> &mut Self::Output;
}

macro_rules! impl_field_at {
    (@one [$($All:ident),+] $idx:tt $T:ident) => {
        impl<$($All: Field),+> FieldAt<$idx> for ($($All,)+) {
            type Output = $T;

            #[inline(always)]
            fn field(&self) -> &$T {
                &self.$idx
            }

            #[inline(always)]
            fn field_mut(&mut self) -> &mut $T {
                &mut self.$idx
            }
        }
    };
    ($all:tt) => {};
    ($all:tt ($idx:tt $T:ident) $($rest:tt)*) => {
        impl_field_at!(@one $all $idx $T);
        impl_field_at!($all $($rest)*);
    };
}

macro_rules! impl_field_list {
    ($len:expr; $(($idx:tt $T:ident))+) => {
        impl<$($T: Field),+> FieldList for ($($T,)+) {
            const LEN: usize = $len;
            const ENCODED_SIZE: usize = 0 $(+ $T::ENCODED_SIZE)+;

            #[inline(always)]
            fn serialize_each(&self, out: &mut [u8]) -> Result<usize, FrameError> {
                let mut pos = 0;
                $( pos += self.$idx.serialize(&mut out[pos..])?; )+
                Ok(pos)
            }

            #[inline(always)]
            fn decode_each(&mut self, cursor: &mut DecodeCursor<'_>) {
                $( cursor.step(&mut self.$idx); )+
            }

            fn presence(&self, index: usize) -> Option<bool> {
                match index {
                    $( $idx => Some(self.$idx.has_value()), )+
                    _ => None,
                }
            }

            fn mark_absent_each(&mut self, fill: Fill) {
                $( self.$idx.mark_absent(fill); )+
            }
        }

        impl_field_at!([$($T),+] $(($idx $T))+);
    };
}

impl_field_list!(1; (0 A));
impl_field_list!(2; (0 A) (1 B));
impl_field_list!(3; (0 A) (1 B) (2 C));
impl_field_list!(4; (0 A) (1 B) (2 C) (3 D));
impl_field_list!(5; (0 A) (1 B) (2 C) (3 D) (4 E));
impl_field_list!(6; (0 A) (1 B) (2 C) (3 D) (4 E) (5 F));
impl_field_list!(7; (0 A) (1 B) (2 C) (3 D) (4 E) (5 F) (6 G));
impl_field_list!(8; (0 A) (1 B) (2 C) (3 D) (4 E) (5 F) (6 G) (7 H));
impl_field_list!(9; (0 A) (1 B) (2 C) (3 D) (4 E) (5 F) (6 G) (7 H) (8 I));
impl_field_list!(10; (0 A) (1 B) (2 C) (3 D) (4 E) (5 F) (6 G) (7 H) (8 I) (9 J));
impl_field_list!(11; (0 A) (1 B) (2 C) (3 D) (4 E) (5 F) (6 G) (7 H) (8 I) (9 J) (10 K));
impl_field_list!(12; (0 A) (1 B) (2 C) (3 D) (4 E) (5 F) (6 G) (7 H) (8 I) (9 J) (10 K) (11 L));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{BoolField, TextField, UintField};

    type Fields = (UintField, BoolField, TextField<4>);

    #[test]
    fn test_folded_constants() {
        assert_eq!(<Fields as FieldList>::LEN, 3);
        assert_eq!(<Fields as FieldList>::ENCODED_SIZE, 6 + 3 + 7);
        assert_eq!(<(BoolField,) as FieldList>::LEN, 1);
    }

    #[test]
    fn test_presence_out_of_range() {
        let mut fields = Fields::default();
        fields.1.set_has_value(true);

        assert_eq!(fields.presence(0), Some(false));
        assert_eq!(fields.presence(1), Some(true));
        assert_eq!(fields.presence(3), None);
        assert_eq!(fields.presence(usize::MAX), None);
    }

    #[test]
    fn test_field_at_positions() {
        let mut fields = Fields::default();
        <Fields as FieldAt<0>>::field_mut(&mut fields).set(11);
        <Fields as FieldAt<2>>::field_mut(&mut fields).set("abc");

        assert_eq!(<Fields as FieldAt<0>>::field(&fields).get(), 11);
        assert_eq!(<Fields as FieldAt<2>>::field(&fields).as_str(), Some("abc"));
    }

    #[test]
    fn test_mark_absent_each_fill() {
        let mut fields = Fields::default();
        fields.0.set(42);
        fields.0.set_has_value(true);
        fields.2.set_has_value(true);

        fields.mark_absent_each(Fill::Preserve);
        assert_eq!(fields.presence(0), Some(false));
        assert_eq!(fields.presence(2), Some(false));
        assert_eq!(fields.0.get(), 42);

        fields.mark_absent_each(Fill::Zero);
        assert_eq!(fields.0.get(), 0);
    }

    #[test]
    fn test_serialize_each_short_buffer() {
        let fields = Fields::default();
        let mut out = [0u8; 8];
        assert!(fields.serialize_each(&mut out).is_err());

        let mut out = [0u8; 16];
        assert_eq!(fields.serialize_each(&mut out), Ok(16));
    }
}
