//! Stage 1 building blocks: read raw tweets, keep and relabel the two target
//! classes, split into train and test.

mod reader;
mod relabel;
mod split;

pub use reader::{DEFAULT_SOURCE_URL, DataSource, parse_csv, parse_table, read_csv, read_data};
pub use relabel::{
    CONTENT_COLUMN, IDENTIFIER_COLUMN, LABEL_COLUMN, NEGATIVE_LABEL, POSITIVE_LABEL, relabel,
};
pub use split::{split_table, train_test_split};
