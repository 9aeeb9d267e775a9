use tracing::debug;

use crate::{config::LabelClasses, error::SchemaError, table::Table};

pub const IDENTIFIER_COLUMN: &str = "tweet_id";
pub const LABEL_COLUMN: &str = "sentiment";
pub const CONTENT_COLUMN: &str = "content";

pub const POSITIVE_LABEL: u8 = 1;
pub const NEGATIVE_LABEL: u8 = 0;

/// Binary label for a sentiment value, `None` if the row is to be dropped.
///
/// Only the two configured classes are recognized in raw input. Once the
/// identifier column is gone the table has already been relabeled, and the
/// encoded `"1"`/`"0"` values keep their meaning.
fn encode_label(value: &str, classes: &LabelClasses, already_encoded: bool) -> Option<u8> {
    if value == classes.positive {
        Some(POSITIVE_LABEL)
    } else if value == classes.negative {
        Some(NEGATIVE_LABEL)
    } else if already_encoded {
        match value {
            "1" => Some(POSITIVE_LABEL),
            "0" => Some(NEGATIVE_LABEL),
            _ => None,
        }
    } else {
        None
    }
}

/// Drop the identifier column, keep rows of the two configured classes and
/// encode their label as `1` (positive) or `0` (negative).
///
/// The result is a new table, `table` is not modified. A table without the
/// identifier column is taken to be relabeled output and its `1`/`0` labels
/// are kept, so relabeling twice gives the same table.
pub fn relabel(table: &Table, classes: &LabelClasses) -> Result<Table, SchemaError> {
    let label_idx = table.require_column(LABEL_COLUMN)?;
    table.require_column(CONTENT_COLUMN)?;
    let identifier_idx = table.column_index(IDENTIFIER_COLUMN);
    let already_encoded = identifier_idx.is_none();
    let kept = |idx: &usize| Some(*idx) != identifier_idx;

    let columns = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(idx, _)| kept(idx))
        .map(|(_, column)| column.clone())
        .collect();

    let rows = table
        .rows()
        .iter()
        .filter_map(|row| {
            let label = encode_label(row.get(label_idx)?, classes, already_encoded)?;
            Some(
                row.iter()
                    .enumerate()
                    .filter(|(idx, _)| kept(idx))
                    .map(|(idx, cell)| {
                        if idx == label_idx {
                            label.to_string()
                        } else {
                            cell.clone()
                        }
                    })
                    .collect(),
            )
        })
        .collect::<Vec<Vec<String>>>();

    debug!(
        input_rows = table.len(),
        kept_rows = rows.len(),
        positive = %classes.positive,
        negative = %classes.negative,
        "Filtered and relabeled rows"
    );
    Ok(Table::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_table() -> Table {
        Table::from_csv_reader(
            "tweet_id,sentiment,content
1,neutral,just a tuesday
2,sadness,lost my keys
3,happiness,sunny day
4,neutral,meh
5,worry,exam tomorrow
"
            .as_bytes(),
        )
        .expect("valid csv")
    }

    #[test]
    fn test_keeps_and_encodes_target_classes() {
        let labeled = relabel(&raw_table(), &LabelClasses::default()).expect("relabel");

        assert_eq!(labeled.columns(), &["sentiment", "content"]);
        assert_eq!(
            labeled.rows(),
            &[
                vec!["1", "just a tuesday"],
                vec!["0", "lost my keys"],
                vec!["1", "meh"],
            ]
        );
    }

    #[test]
    fn test_source_table_is_untouched() {
        let raw = raw_table();
        let before = raw.clone();
        let _ = relabel(&raw, &LabelClasses::default()).expect("relabel");
        assert_eq!(raw, before);
    }

    #[test]
    fn test_relabel_is_idempotent() {
        let classes = LabelClasses::default();
        let once = relabel(&raw_table(), &classes).expect("first pass");
        let twice = relabel(&once, &classes).expect("second pass");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_raw_encoded_values_are_not_classes() {
        let table = Table::from_csv_reader(
            "tweet_id,sentiment,content\n1,1,raw one\n2,0,raw zero\n3,neutral,n\n".as_bytes(),
        )
        .expect("csv");
        let labeled = relabel(&table, &LabelClasses::default()).expect("relabel");
        assert_eq!(labeled.rows(), &[vec!["1", "n"]]);
    }

    #[test]
    fn test_relabeled_table_keeps_encoded_labels() {
        let table =
            Table::from_csv_reader("sentiment,content\n1,kept\n0,also kept\n".as_bytes())
                .expect("csv");
        let labeled = relabel(&table, &LabelClasses::default()).expect("relabel");
        assert_eq!(labeled, table);
    }

    #[test]
    fn test_custom_classes() {
        let classes = LabelClasses {
            positive: "happiness".to_owned(),
            negative: "worry".to_owned(),
        };
        let labeled = relabel(&raw_table(), &classes).expect("relabel");
        let labels: Vec<&str> = labeled.column(LABEL_COLUMN).expect("label column").collect();
        assert_eq!(labels, vec!["1", "0"]);
    }

    #[test]
    fn test_missing_columns() {
        let table = Table::from_csv_reader("tweet_id,content\n1,hi\n".as_bytes()).expect("csv");
        assert_eq!(
            relabel(&table, &LabelClasses::default()),
            Err(SchemaError::MissingColumn {
                column: LABEL_COLUMN.to_owned()
            })
        );

        let table = Table::from_csv_reader("tweet_id,sentiment\n1,neutral\n".as_bytes()).expect("csv");
        assert_eq!(
            relabel(&table, &LabelClasses::default()),
            Err(SchemaError::MissingColumn {
                column: CONTENT_COLUMN.to_owned()
            })
        );
    }

    #[test]
    fn test_no_matching_rows_gives_empty_table() {
        let table =
            Table::from_csv_reader("tweet_id,sentiment,content\n1,fun,party\n".as_bytes()).expect("csv");
        let labeled = relabel(&table, &LabelClasses::default()).expect("relabel");
        assert!(labeled.is_empty());
        assert_eq!(labeled.columns(), &["sentiment", "content"]);
    }
}
