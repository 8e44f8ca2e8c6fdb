//! Text Field: string null-terminated dengan capacity tetap
//!
//! Di disk: `N + 1` bytes (N karakter + terminator). Di memory hanya N byte
//! karakter yang disimpan; terminator selalu nol dan ditulis ulang saat
//! serialize.

use super::{begin_frame, copy_payload, open_frame, Field, FieldKind, PREFIX_SIZE};
use crate::config::Fill;
use crate::error::FrameError;

/// Field string dengan capacity `N` byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextField<const N: usize> {
    chars: [u8; N],
    has_value: bool,
}

impl<const N: usize> Default for TextField<N> {
    fn default() -> Self {
        Self {
            chars: [0; N],
            has_value: false,
        }
    }
}

impl<const N: usize> TextField<N> {
    pub fn new(value: &str) -> Self {
        let mut field = Self::default();
        field.set(value);
        field
    }

    /// Set string, dipotong ke N byte pada char boundary terdekat.
    pub fn set(&mut self, value: &str) {
        let mut n = value.len().min(N);
        while !value.is_char_boundary(n) {
            n -= 1;
        }
        self.set_bytes(&value.as_bytes()[..n]);
    }

    /// Set raw bytes (semantik `strncpy`): berhenti di NUL pertama atau di
    /// N byte, sisa storage di-nol-kan.
    pub fn set_bytes(&mut self, value: &[u8]) {
        let n = value
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(value.len())
            .min(N);
        self.chars[..n].copy_from_slice(&value[..n]);
        self.chars[n..].fill(0);
    }

    /// Isi string sampai NUL pertama
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        let end = self.chars.iter().position(|&b| b == 0).unwrap_or(N);
        &self.chars[..end]
    }

    /// `None` kalau isinya bukan UTF-8 valid
    #[inline(always)]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }

    /// Capacity tanpa terminator
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Field for TextField<N> {
    const KIND: FieldKind = FieldKind::Text;
    const ENCODED_SIZE: usize = PREFIX_SIZE + N + 1;

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
        payload[..N].copy_from_slice(&self.chars);
        payload[N] = 0;
        Ok(Self::ENCODED_SIZE)
    }

    fn deserialize_with(&mut self, src: &[u8], fill: Fill) -> usize {
        let Some((disk_len, payload)) = open_frame(src) else {
            return 0;
        };
        // Byte ke-(N+1) dari disk jatuh ke posisi terminator, yang selalu nol
        copy_payload(&mut self.chars, payload, fill);
        disk_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_truncates() {
        let field = TextField::<4>::new("ABCDEFG");
        assert_eq!(field.as_str(), Some("ABCD"));

        // Jangan potong di tengah multi-byte char
        let field = TextField::<4>::new("abcé");
        assert_eq!(field.as_str(), Some("abc"));
    }

    #[test]
    fn test_set_bytes_stops_at_nul() {
        let mut field = TextField::<8>::new("previous");
        field.set_bytes(b"ab\0cd");
        assert_eq!(field.as_bytes(), b"ab");
        assert_eq!(field.chars, *b"ab\0\0\0\0\0\0");
    }

    #[test]
    fn test_layout_has_terminator() {
        let field = TextField::<3>::new("xyz");
        let mut buf = [0xFFu8; TextField::<3>::ENCODED_SIZE];
        field.serialize(&mut buf).unwrap();
        assert_eq!(buf, [6, 0, b'x', b'y', b'z', 0]);
    }

    #[test]
    fn test_capacity_shrink() {
        let mut buf = [0u8; TextField::<10>::ENCODED_SIZE];
        TextField::<10>::new("0123456789").serialize(&mut buf).unwrap();

        let mut read = TextField::<4>::default();
        assert_eq!(read.deserialize(&buf), 13);
        assert_eq!(read.as_str(), Some("0123"));
    }

    #[test]
    fn test_capacity_growth() {
        let mut buf = [0u8; TextField::<3>::ENCODED_SIZE];
        TextField::<3>::new("abc").serialize(&mut buf).unwrap();

        let mut read = TextField::<8>::new("ZZZZZZZZ");
        assert_eq!(read.deserialize(&buf), 6);
        assert_eq!(read.as_str(), Some("abc"));
        assert_eq!(read.chars, *b"abc\0\0\0\0\0");
    }

    #[test]
    fn test_capacity_growth_preserve() {
        let mut buf = [0u8; TextField::<3>::ENCODED_SIZE];
        TextField::<3>::new("abc").serialize(&mut buf).unwrap();

        let mut read = TextField::<8>::new("ZZZZZZZZ");
        read.deserialize_with(&buf, Fill::Preserve);
        // Terminator dari disk ikut ter-copy, string tetap benar
        assert_eq!(read.as_str(), Some("abc"));
        assert_eq!(&read.chars[4..], b"ZZZZ");
    }
}
