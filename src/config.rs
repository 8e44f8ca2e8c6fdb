//! Decode policy
//!
//! Mengatur apa yang terjadi pada byte value yang TIDAK tertutup oleh data
//! di disk (schema grew, atau field tidak ada di record lama).

/// Fill policy untuk byte yang tidak disuplai oleh source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fill {
    /// Zero-extend: sisa storage di-nol-kan, field absent di-reset ke nol.
    /// Hasil decode selalu deterministik.
    #[default]
    Zero,
    /// Biarkan isi lama. Berguna untuk decode di atas default yang sudah
    /// di-set caller sebelumnya.
    Preserve,
}

impl Fill {
    #[inline(always)]
    pub(crate) fn zeroes(self) -> bool {
        self == Fill::Zero
    }
}
