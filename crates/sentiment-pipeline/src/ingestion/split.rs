use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing::debug;

use crate::{error::SplitError, table::Table};

/// Randomly partition `rows` into `(train, test)`.
///
/// The test side gets `ceil(test_size * n)` rows. Rows are shuffled with an
/// RNG seeded from `seed`; the first rows of the permutation form the test
/// set and the remainder the train set, both in permutation order. The
/// outcome depends only on the input order, `test_size` and `seed`.
pub fn train_test_split<T>(
    mut rows: Vec<T>,
    test_size: f64,
    seed: u64,
) -> Result<(Vec<T>, Vec<T>), SplitError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(SplitError::InvalidFraction(test_size));
    }

    let total = rows.len();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n_test = (test_size * total as f64).ceil() as usize;
    let n_train = total.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(SplitError::EmptyPartition {
            total,
            test_size,
            train: n_train,
            test: n_test.min(total),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    rows.shuffle(&mut rng);
    let train = rows.split_off(n_test);
    debug!(total, n_train, n_test, seed, "Split rows into train/test");
    Ok((train, rows))
}

/// [`train_test_split`] over the rows of a table. Both halves keep its columns.
pub fn split_table(table: &Table, test_size: f64, seed: u64) -> Result<(Table, Table), SplitError> {
    let (train, test) = train_test_split(table.rows().to_vec(), test_size, seed)?;
    Ok((table.with_rows(train), table.with_rows(test)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_sizes_round_test_side_up() {
        let (train, test) = train_test_split((0..10).collect(), 0.25, 42).expect("split");
        assert_eq!(test.len(), 3);
        assert_eq!(train.len(), 7);

        let (train, test) = train_test_split((0..100).collect(), 0.2, 42).expect("split");
        assert_eq!(test.len(), 20);
        assert_eq!(train.len(), 80);
    }

    #[test]
    fn test_partition_is_disjoint_and_covering() {
        let (train, test) = train_test_split((0..57).collect::<Vec<u32>>(), 0.3, 7).expect("split");
        let train_set: HashSet<_> = train.iter().copied().collect();
        let test_set: HashSet<_> = test.iter().copied().collect();

        assert!(train_set.is_disjoint(&test_set));
        assert_eq!(train_set.len() + test_set.len(), 57);
        assert_eq!(train.len() + test.len(), 57);
    }

    #[test]
    fn test_same_seed_same_split() {
        let first = train_test_split((0..200).collect::<Vec<u32>>(), 0.2, 42).expect("split");
        let second = train_test_split((0..200).collect::<Vec<u32>>(), 0.2, 42).expect("split");
        assert_eq!(first, second);

        let other = train_test_split((0..200).collect::<Vec<u32>>(), 0.2, 43).expect("split");
        assert_ne!(first, other);
    }

    #[test]
    fn test_invalid_fraction() {
        for test_size in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            let err = train_test_split(vec![1, 2, 3], test_size, 0).expect_err("invalid fraction");
            assert!(matches!(err, SplitError::InvalidFraction(_)));
        }
    }

    #[test]
    fn test_empty_partition() {
        let err = train_test_split(Vec::<u32>::new(), 0.2, 0).expect_err("no rows");
        assert!(matches!(err, SplitError::EmptyPartition { total: 0, .. }));

        let err = train_test_split(vec![1], 0.5, 0).expect_err("single row");
        assert!(matches!(err, SplitError::EmptyPartition { train: 0, test: 1, .. }));
    }

    #[test]
    fn test_split_table_keeps_columns() {
        let table = Table::new(
            vec!["sentiment".to_owned(), "content".to_owned()],
            (0..5).map(|i| vec!["1".to_owned(), format!("row {i}")]).collect(),
        );
        let (train, test) = split_table(&table, 0.4, 1).expect("split");
        assert_eq!(train.columns(), table.columns());
        assert_eq!(test.columns(), table.columns());
        assert_eq!((train.len(), test.len()), (3, 2));
    }
}
