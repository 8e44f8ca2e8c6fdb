//! Record Layer: Ordered Aggregate of Fields
//!
//! Layout:
//! ┌──────────────────────────────────────────────┐
//! │ record_total_len: u16 (termasuk prefix ini)  │
//! ├──────────────────────────────────────────────┤
//! │ [field_1_len][field_1_payload]               │
//! │ [field_2_len][field_2_payload]               │
//! │ ...                                          │
//! └──────────────────────────────────────────────┘
//!
//! Prinsip desain:
//! - Record adalah Field juga, jadi bisa nested
//! - Ukuran encode = compile-time constant (buffer bisa di stack)
//! - Decode memakai "budget" byte tersisa: field baru di akhir schema
//!   otomatis absent, field yang melampaui budget = corrupt → abort

mod cursor;
mod list;

pub use cursor::DecodeCursor;
pub use list::{FieldAt, FieldList};

use tracing::{debug, trace};

use crate::config::Fill;
use crate::error::FrameError;
use crate::field::{begin_frame, read_prefix, Field, FieldKind, PREFIX_SIZE};

/// Record dengan field list `L` (tuple of fields).
///
/// ```
/// use upconf::{BoolField, Field, Record, TextField};
///
/// type Settings = Record<(TextField<16>, BoolField)>;
///
/// let mut settings = Settings::new();
/// settings.get_mut::<0>().set("sensor-a");
/// settings.get_mut::<1>().set(true);
///
/// let mut buf = [0u8; Settings::ENCODED_SIZE];
/// settings.serialize(&mut buf).unwrap();
///
/// let mut read = Settings::new();
/// read.deserialize(&buf);
/// assert!(read.has_value());
/// assert_eq!(read.get::<0>().as_str(), Some("sensor-a"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record<L> {
    fields: L,
    has_value: bool,
}

impl<L: FieldList> Record<L> {
    /// Jumlah field dalam schema ini
    pub const LEN: usize = L::LEN;

    pub fn new() -> Self
    where
        L: Default,
    {
        Self::default()
    }

    pub fn from_fields(fields: L) -> Self {
        Self {
            fields,
            has_value: false,
        }
    }

    #[inline(always)]
    pub fn fields(&self) -> &L {
        &self.fields
    }

    #[inline(always)]
    pub fn fields_mut(&mut self) -> &mut L {
        &mut self.fields
    }

    pub fn into_fields(self) -> L {
        self.fields
    }

    /// Field pada posisi `I`
    #[inline(always)]
    pub fn get<const I: usize>(&self) -> &<L as FieldAt<I>>::Output
    where
        L: FieldAt<I>,
    {
        <L as FieldAt<I>>::field(&self.fields)
    }

    #[inline(always)]
    pub fn get_mut<const I: usize>(&mut self) -> &mut <L as FieldAt<I>>::Output
    where
        L: FieldAt<I>,
    {
        <L as FieldAt<I>>::field_mut(&mut self.fields)
    }

    /// Presence flag field ke-`index` (runtime key)
    #[inline(always)]
    pub fn is_present(&self, index: usize) -> Option<bool> {
        self.fields.presence(index)
    }

    /// Peek ukuran record yang tersimpan di `src` tanpa consume.
    ///
    /// Dipakai untuk sizing read buffer sebelum decode penuh, karena record
    /// di disk bisa lebih kecil/besar dari record yang di-compile.
    #[inline(always)]
    pub fn read_root_size(src: &[u8]) -> Option<usize> {
        read_prefix(src)
    }
}

impl<L: FieldList> Field for Record<L> {
    const KIND: FieldKind = FieldKind::Record;
    const ENCODED_SIZE: usize = PREFIX_SIZE + L::ENCODED_SIZE;

    #[inline(always)]
    fn has_value(&self) -> bool {
        self.has_value
    }

    #[inline(always)]
    fn set_has_value(&mut self, present: bool) {
        self.has_value = present;
    }

    /// Presence record nested sudah diputuskan oleh decode-nya sendiri.
    #[inline(always)]
    fn mark_decoded(&mut self) {}

    fn clear(&mut self) {
        self.mark_absent(Fill::Zero);
    }

    /// Absent = seluruh subtree absent, bukan cuma flag record ini.
    fn mark_absent(&mut self, fill: Fill) {
        self.fields.mark_absent_each(fill);
        self.has_value = false;
    }

    fn serialize(&self, out: &mut [u8]) -> Result<usize, FrameError> {
        let payload = begin_frame::<Self>(out)?;
        let written = self.fields.serialize_each(payload)?;
        trace!(
            fields = L::LEN,
            bytes = PREFIX_SIZE + written,
            "record serialized"
        );
        Ok(Self::ENCODED_SIZE)
    }

    fn deserialize_with(&mut self, src: &[u8], fill: Fill) -> usize {
        let Some(disk_len) = read_prefix(src) else {
            debug!(
                available = src.len(),
                "source shorter than record length prefix"
            );
            self.mark_absent(fill);
            return src.len();
        };

        let payload_len = disk_len.saturating_sub(PREFIX_SIZE);
        if payload_len == 0 {
            debug!(disk_len, "empty record payload");
            self.mark_absent(fill);
            return disk_len;
        }

        let available = src.len() - PREFIX_SIZE;
        if payload_len > available {
            debug!(
                disk_len,
                available = src.len(),
                "record prefix exceeds supplied buffer, budget clamped"
            );
        }
        let budget = payload_len.min(available);

        let mut cursor = DecodeCursor::new(&src[PREFIX_SIZE..PREFIX_SIZE + budget], fill);
        self.fields.decode_each(&mut cursor);
        self.has_value = !cursor.aborted();

        if self.has_value && cursor.budget() > 0 {
            // Writer punya field yang tidak dikenal schema ini
            debug!(
                unread = cursor.budget(),
                fields = L::LEN,
                "trailing bytes beyond last known field left unread"
            );
        }

        disk_len
    }
}
