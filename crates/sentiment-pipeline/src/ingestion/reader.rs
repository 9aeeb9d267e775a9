use std::{
    convert::Infallible,
    fmt, fs,
    io::{self, Read},
    path::PathBuf,
    str::FromStr,
};

use tracing::{debug, info};

use crate::{error::DataSourceError, table::Table};

pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/campusx-official/jupyter-masterclass/main/tweet_emotions.csv";

/// Where raw data is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl FromStr for DataSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Url(s.to_owned()))
        } else {
            Ok(Self::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Load a CSV table from a local file or URL. A single attempt, no retries.
///
/// The table must have a header and at least one data row.
pub fn read_data(source: &DataSource) -> Result<Table, DataSourceError> {
    info!(%source, "Reading raw data");
    let table = read_csv(source)?;
    ensure_rows(&source.to_string(), table)
}

/// Like [`read_data`], but a header without data rows is a valid, empty table.
pub fn read_csv(source: &DataSource) -> Result<Table, DataSourceError> {
    let bytes = match source {
        DataSource::Path(path) => fs::read(path).map_err(|err| DataSourceError::NotFound {
            source_name: source.to_string(),
            reason: err.to_string(),
        })?,
        DataSource::Url(url) => fetch(url)?,
    };
    let table = parse_csv(&source.to_string(), bytes.as_slice())?;
    debug!(rows = table.len(), columns = ?table.columns(), "CSV loaded");
    Ok(table)
}

fn fetch(url: &str) -> Result<Vec<u8>, DataSourceError> {
    let mut body = Vec::new();
    ureq::get(url)
        .call()
        .map_err(|err| DataSourceError::NotFound {
            source_name: url.to_owned(),
            reason: err.to_string(),
        })?
        .into_body()
        .into_reader()
        .read_to_end(&mut body)
        .map_err(|err| DataSourceError::Malformed {
            source_name: url.to_owned(),
            reason: format!("failed to read response body: {err}"),
        })?;
    Ok(body)
}

/// Parse CSV content, rejecting input without a header or without data rows.
pub fn parse_table<R: io::Read>(source_name: &str, reader: R) -> Result<Table, DataSourceError> {
    ensure_rows(source_name, parse_csv(source_name, reader)?)
}

/// Parse CSV content that must at least carry a header row.
pub fn parse_csv<R: io::Read>(source_name: &str, reader: R) -> Result<Table, DataSourceError> {
    let table = Table::from_csv_reader(reader).map_err(|err| DataSourceError::Malformed {
        source_name: source_name.to_owned(),
        reason: err.to_string(),
    })?;
    if table.columns().is_empty() {
        return Err(DataSourceError::Empty {
            source_name: source_name.to_owned(),
        });
    }
    Ok(table)
}

fn ensure_rows(source_name: &str, table: Table) -> Result<Table, DataSourceError> {
    if table.is_empty() {
        return Err(DataSourceError::Empty {
            source_name: source_name.to_owned(),
        });
    }
    Ok(table)
}
