//! Decode cursor: budget byte yang tersisa untuk satu record

use tracing::{trace, warn};

use crate::config::Fill;
use crate::field::{Field, PREFIX_SIZE};

/// Read cursor + budget untuk decode loop satu record.
///
/// Budget = panjang slice yang tersisa. Abort = budget dipaksa nol.
pub struct DecodeCursor<'a> {
    src: &'a [u8],
    fill: Fill,
    index: usize,
    aborted: bool,
}

impl<'a> DecodeCursor<'a> {
    pub(crate) fn new(src: &'a [u8], fill: Fill) -> Self {
        Self {
            src,
            fill,
            index: 0,
            aborted: false,
        }
    }

    /// Sisa byte yang belum di-consume
    #[inline(always)]
    pub fn budget(&self) -> usize {
        self.src.len()
    }

    #[inline(always)]
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    fn abort(&mut self) {
        self.src = &[];
        self.aborted = true;
    }

    /// Decode field berikutnya dalam urutan deklarasi.
    pub fn step<F: Field>(&mut self, field: &mut F) {
        let index = self.index;
        self.index += 1;

        if self.src.is_empty() {
            if !self.aborted {
                trace!(field = index, "field not present in source record");
            }
            field.mark_absent(self.fill);
            return;
        }

        if self.src.len() < PREFIX_SIZE {
            warn!(
                field = index,
                budget = self.src.len(),
                "remaining budget shorter than a length prefix, aborting record decode"
            );
            self.abort();
            field.mark_absent(self.fill);
            return;
        }

        let budget = self.src.len();
        let consumed = field.deserialize_with(self.src, self.fill);
        if consumed < PREFIX_SIZE || consumed > budget {
            warn!(
                field = index,
                consumed, budget, "corrupt field length, aborting record decode"
            );
            self.abort();
            field.mark_absent(self.fill);
            return;
        }

        self.src = &self.src[consumed..];
        field.mark_decoded();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{BoolField, UintField};

    fn present(value: u32) -> UintField {
        let mut field = UintField::new(value);
        field.set_has_value(true);
        field
    }

    #[test]
    fn test_budget_shorter_than_prefix_aborts() {
        let src = [6u8];
        let mut cursor = DecodeCursor::new(&src, Fill::Zero);
        let mut a = present(5);
        let mut b = present(9);

        cursor.step(&mut a);
        assert!(cursor.aborted());
        assert_eq!(cursor.budget(), 0);
        assert!(!a.has_value());
        assert_eq!(a.get(), 0);

        // Field setelah abort ikut absent
        cursor.step(&mut b);
        assert!(!b.has_value());
    }

    #[test]
    fn test_consumed_below_prefix_aborts() {
        for claimed in [0u8, 1] {
            let src = [claimed, 0, 9, 9, 9, 9];
            let mut cursor = DecodeCursor::new(&src, Fill::Preserve);
            let mut a = present(5);

            cursor.step(&mut a);
            assert!(cursor.aborted());
            assert_eq!(cursor.budget(), 0);
            assert!(!a.has_value());
        }
    }

    #[test]
    fn test_budget_bookkeeping() {
        let mut src = [0u8; UintField::ENCODED_SIZE + BoolField::ENCODED_SIZE];
        UintField::new(7).serialize(&mut src).unwrap();
        BoolField::new(true)
            .serialize(&mut src[UintField::ENCODED_SIZE..])
            .unwrap();

        let mut cursor = DecodeCursor::new(&src, Fill::Zero);
        assert_eq!(cursor.budget(), 9);

        let mut count = UintField::default();
        cursor.step(&mut count);
        assert_eq!(cursor.budget(), BoolField::ENCODED_SIZE);
        assert!(count.has_value());
        assert_eq!(count.get(), 7);

        let mut flag = BoolField::default();
        cursor.step(&mut flag);
        assert_eq!(cursor.budget(), 0);
        assert!(flag.get());

        // Budget habis tanpa corrupt: field baru absent, bukan abort
        let mut extra = present(3);
        cursor.step(&mut extra);
        assert!(!cursor.aborted());
        assert!(!extra.has_value());
        assert_eq!(extra.get(), 0);
    }

    #[test]
    fn test_overrunning_field_aborts() {
        // Prefix klaim 40 bytes, budget cuma 6
        let src = [40u8, 0, 1, 2, 3, 4];
        let mut cursor = DecodeCursor::new(&src, Fill::Zero);
        let mut a = present(5);

        cursor.step(&mut a);
        assert!(cursor.aborted());
        assert!(!a.has_value());
    }
}
