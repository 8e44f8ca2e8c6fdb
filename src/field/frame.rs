//! Length-Prefix Framing
//!
//! Layout setiap unit (field maupun record):
//! ┌──────────────────┬───────────────────────────────┐
//! │ len: u16 (LE)    │ payload (len - 2 bytes)       │
//! └──────────────────┴───────────────────────────────┘
//!
//! `len` mencakup prefix itu sendiri.

use super::Field;
use crate::config::Fill;
use crate::error::FrameError;

/// Tipe length prefix di disk
pub type LenPrefix = u16;

/// Ukuran length prefix dalam bytes
pub const PREFIX_SIZE: usize = std::mem::size_of::<LenPrefix>();

/// Frame terbesar yang masih bisa dinyatakan oleh prefix
pub const MAX_FRAME_SIZE: usize = LenPrefix::MAX as usize;

/// Peek length prefix di depan buffer tanpa consume.
///
/// Returns `None` jika buffer lebih pendek dari prefix.
#[inline(always)]
pub fn read_prefix(src: &[u8]) -> Option<usize> {
    let raw: [u8; PREFIX_SIZE] = src.get(..PREFIX_SIZE)?.try_into().ok()?;
    Some(LenPrefix::from_le_bytes(raw) as usize)
}

#[inline(always)]
fn write_prefix(out: &mut [u8], len: usize) {
    out[..PREFIX_SIZE].copy_from_slice(&(len as LenPrefix).to_le_bytes());
}

/// Tulis prefix milik `F` lalu kembalikan slice payload-nya.
#[inline(always)]
pub(crate) fn begin_frame<F: Field>(out: &mut [u8]) -> Result<&mut [u8], FrameError> {
    // Gagal di compile time kalau ENCODED_SIZE > u16::MAX
    #[allow(clippy::let_unit_value)]
    let () = F::FITS_PREFIX;

    if out.len() < F::ENCODED_SIZE {
        return Err(FrameError::BufferTooSmall {
            needed: F::ENCODED_SIZE,
            available: out.len(),
        });
    }

    write_prefix(out, F::ENCODED_SIZE);
    Ok(&mut out[PREFIX_SIZE..F::ENCODED_SIZE])
}

/// Baca prefix dan kembalikan `(disk_len, payload)`.
///
/// Payload dipotong ke byte yang benar-benar ada di `src`, jadi tidak pernah
/// ada read di luar bounds walaupun prefix-nya bohong.
#[inline(always)]
pub(crate) fn open_frame(src: &[u8]) -> Option<(usize, &[u8])> {
    let disk_len = read_prefix(src)?;
    let end = disk_len.clamp(PREFIX_SIZE, src.len());
    Some((disk_len, &src[PREFIX_SIZE..end]))
}

/// Copy `min(dst.len(), payload.len())` bytes, sisanya diurus sesuai `fill`.
#[inline(always)]
pub(crate) fn copy_payload(dst: &mut [u8], payload: &[u8], fill: Fill) -> usize {
    let n = dst.len().min(payload.len());
    dst[..n].copy_from_slice(&payload[..n]);
    if fill.zeroes() {
        dst[n..].fill(0);
    }
    n
}
