mod common;

use common::{init_tracing, string_values};
use proptest::prelude::*;
use tabula_core::Selection;
use tabula_core::column::{
    BooleanColumn, Column, DoubleColumn, IntColumn, LongColumn, ShortColumn, StringColumn,
};
use tabula_core::index::{ByteIndex, DoubleIndex, IntIndex, LongIndex, ShortIndex, StringIndex};

#[test]
fn test_short_fixture_against_scan() {
    init_tracing();
    let col = ShortColumn::from_values("shortTypeIndex", vec![7, 5, 2, 3, 1, 9, 6, 8, 4]);
    let idx = ShortIndex::new(&col);

    assert_eq!(idx.get(3), col.eval(|v| v == 3));
    assert_eq!(idx.greater_than(3), col.eval(|v| v > 3));
    assert_eq!(idx.less_than(3), col.eval(|v| v < 3));
    assert_eq!(idx.at_least(3), col.eval(|v| v >= 3));
    assert_eq!(idx.at_most(3), col.eval(|v| v <= 3));
}

#[test]
fn test_boolean_fixture() {
    let flags = [false, true, true, false, true, false, true, true, true];
    let col = BooleanColumn::from_values(
        "byteTypeIndex",
        &flags.iter().map(|f| Some(*f)).collect::<Vec<_>>(),
    );
    let idx = ByteIndex::new(&col);

    assert_eq!(idx.get(0), col.is_false());
    assert_eq!(idx.get(1), col.is_true());
    assert_eq!(idx.at_most(0), &idx.get(0) | &idx.less_than(0));
    assert_eq!(idx.at_most(0).to_vec(), vec![0, 3, 5]);
    assert_eq!(idx.at_least(0), Selection::all(9));
}

#[test]
fn test_missing_booleans_sort_first() {
    let col = BooleanColumn::from_values("b", &[Some(true), None, Some(false)]);
    let idx = ByteIndex::new(&col);
    assert_eq!(idx.less_than(0).to_vec(), vec![1]);
    assert_eq!(idx.at_least(0).to_vec(), vec![0, 2]);
}

#[test]
fn test_string_fixture() {
    let col = StringColumn::from_values(
        "stringTypeIndex",
        ["aa", "bb", "cc", "dd", "ee", "ff", "gg", "hh", "ii"],
    )
    .unwrap();
    let idx = StringIndex::new(&col);
    assert_eq!(idx.get("cc").get(0), Some(2));
    assert!(idx.get("zz").is_empty());
}

#[test]
fn test_index_is_a_snapshot() {
    let mut col = IntColumn::from_values("i", vec![1, 2, 3]);
    let idx = IntIndex::new(&col);
    col.append(2);
    assert_eq!(idx.get(2).to_vec(), vec![1]);
    assert_eq!(idx.row_count(), 3);
    assert_eq!(IntIndex::new(&col).get(2).to_vec(), vec![1, 3]);
}

fn assert_partition(
    lists: impl Iterator<Item = Selection>,
    rows: usize,
) -> Result<(), TestCaseError> {
    let mut union = Selection::new();
    let mut total = 0u64;
    for list in lists {
        prop_assert!(union.and(&list).is_empty(), "posting lists overlap");
        total += list.len();
        union |= &list;
    }
    prop_assert_eq!(total, rows as u64);
    prop_assert_eq!(union, Selection::all(rows as u32));
    Ok(())
}

proptest! {
    #[test]
    fn prop_long_partition_and_ranges(
        values in prop::collection::vec(-20i64..20, 0..120),
        probe in -25i64..25,
    ) {
        let col = LongColumn::from_values("l", values.clone());
        let idx = LongIndex::new(&col);

        let distinct: std::collections::BTreeSet<i64> = values.iter().copied().collect();
        assert_partition(distinct.iter().map(|v| idx.get(*v)), col.size())?;

        let below = idx.less_than(probe);
        let equal = idx.get(probe);
        let above = idx.greater_than(probe);
        prop_assert!(below.and(&equal).is_empty());
        prop_assert!(equal.and(&above).is_empty());
        prop_assert!(below.and(&above).is_empty());
        prop_assert_eq!(&(&below | &equal) | &above, Selection::all(values.len() as u32));

        prop_assert_eq!(idx.at_least(probe), &equal | &above);
        prop_assert_eq!(idx.at_most(probe), &equal | &below);
        prop_assert_eq!(above, col.eval(|v| v > probe));
        prop_assert_eq!(below, col.eval(|v| v < probe));
    }

    #[test]
    fn prop_double_ranges_match_scan(
        values in prop::collection::vec(prop_oneof![-1.0e3f64..1.0e3, Just(0.5), Just(-0.0)], 0..100),
        probe in prop_oneof![-1.0e3f64..1.0e3, Just(0.5), Just(0.0)],
    ) {
        let col = DoubleColumn::from_values("d", values);
        let idx = DoubleIndex::new(&col);

        prop_assert_eq!(idx.get(probe), col.eval(|v| v == probe));
        prop_assert_eq!(idx.greater_than(probe), col.eval(|v| v > probe));
        prop_assert_eq!(idx.less_than(probe), col.eval(|v| v < probe));
        prop_assert_eq!(idx.at_least(probe), col.eval(|v| v >= probe));
        prop_assert_eq!(idx.at_most(probe), col.eval(|v| v <= probe));
    }

    #[test]
    fn prop_string_partition(rows in string_values(), probe in "[a-e]{1,2}") {
        let mut col = StringColumn::new("s");
        for row in &rows {
            col.append(row.as_deref()).unwrap();
        }
        let idx = StringIndex::new(&col);

        let keys: Vec<String> = idx.keys().map(str::to_owned).collect();
        assert_partition(keys.iter().map(|k| idx.get(k)), col.size())?;

        prop_assert_eq!(idx.get(&probe), col.is_equal_to(&probe));
        prop_assert_eq!(idx.at_least(&probe), &idx.get(&probe) | &idx.greater_than(&probe));
        prop_assert_eq!(idx.at_most(&probe), &idx.get(&probe) | &idx.less_than(&probe));
    }

    #[test]
    fn prop_between_is_intersection(
        values in prop::collection::vec(-50i16..50, 0..100),
        a in -60i16..60,
        b in -60i16..60,
    ) {
        let col = ShortColumn::from_values("s", values);
        let idx = ShortIndex::new(&col);
        let (lo, hi) = (a.min(b), a.max(b));
        prop_assert_eq!(idx.between(lo, hi), idx.at_least(lo).and(&idx.at_most(hi)));
        if lo < hi {
            prop_assert!(idx.between(hi, lo).is_empty());
        }
    }
}
