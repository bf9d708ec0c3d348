//! Entry validity checking.
//!
//! Library "no data" markers must never be served as real results. Each
//! numeric kind has two sentinels: its max representable value and zero.

use crate::entry::{EntryFlags, IndicatorDataEntry};

/// True if `entry` has a positive timestamp, at least one value, and no
/// value equal to a sentinel of the kind its flags describe.
pub fn is_valid_entry(entry: &IndicatorDataEntry) -> bool {
    if entry.timestamp <= 0 || entry.size() == 0 {
        return false;
    }

    let real = entry.check_flags(EntryFlags::REAL);
    let unsigned = entry.check_flags(EntryFlags::UNSIGNED);
    let doubled = entry.check_flags(EntryFlags::DOUBLED);

    let has_sentinel = match (real, unsigned, doubled) {
        (true, _, true) => entry.has_value(f64::MAX) || entry.has_value(0.0_f64),
        (true, _, false) => entry.has_value(f32::MAX) || entry.has_value(0.0_f32),
        (false, true, true) => entry.has_value(u64::MAX) || entry.has_value(0_u64),
        (false, true, false) => entry.has_value(u32::MAX) || entry.has_value(0_u32),
        (false, false, true) => entry.has_value(i64::MAX) || entry.has_value(0_i64),
        (false, false, false) => entry.has_value(i32::MAX) || entry.has_value(0_i32),
    };
    !has_sentinel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryValue;
    use crate::params::DataValueType;

    fn entry(timestamp: i64, ty: DataValueType, values: Vec<EntryValue>) -> IndicatorDataEntry {
        let mut e = IndicatorDataEntry::new(timestamp, 0);
        e.values = values;
        e.add_flags(ty.type_flags());
        e
    }

    #[test]
    fn plain_double_is_valid() {
        let e = entry(1000, DataValueType::Double, vec![EntryValue::Double(1.2345)]);
        assert!(is_valid_entry(&e));
    }

    #[test]
    fn non_positive_timestamp_is_invalid() {
        let values = vec![EntryValue::Double(1.0)];
        assert!(!is_valid_entry(&entry(0, DataValueType::Double, values.clone())));
        assert!(!is_valid_entry(&entry(-60, DataValueType::Double, values)));
    }

    #[test]
    fn empty_values_are_invalid() {
        assert!(!is_valid_entry(&entry(1000, DataValueType::Double, vec![])));
    }

    #[test]
    fn max_sentinel_per_kind() {
        let cases = [
            (DataValueType::Double, EntryValue::Double(f64::MAX)),
            (DataValueType::Float, EntryValue::Float(f32::MAX)),
            (DataValueType::ULong, EntryValue::ULong(u64::MAX)),
            (DataValueType::UInt, EntryValue::UInt(u32::MAX)),
            (DataValueType::Long, EntryValue::Long(i64::MAX)),
            (DataValueType::Int, EntryValue::Int(i32::MAX)),
        ];
        for (ty, sentinel) in cases {
            let good = EntryValue::from_f64(sentinel.kind(), 7.0);
            assert!(is_valid_entry(&entry(1000, ty, vec![good])), "{ty} should accept 7");
            assert!(
                !is_valid_entry(&entry(1000, ty, vec![good, sentinel])),
                "{ty} should reject its max sentinel"
            );
        }
    }

    #[test]
    fn zero_is_a_null_sentinel() {
        let e = entry(1000, DataValueType::Double, vec![EntryValue::Double(0.0)]);
        assert!(!is_valid_entry(&e));
        let e = entry(1000, DataValueType::Int, vec![EntryValue::Int(0)]);
        assert!(!is_valid_entry(&e));
    }

    #[test]
    fn sentinel_checked_in_flagged_kind_only() {
        // i32::MAX is an ordinary value once the entry is flagged as long.
        let e = entry(1000, DataValueType::Long, vec![EntryValue::Long(i32::MAX as i64)]);
        assert!(is_valid_entry(&e));
    }
}
