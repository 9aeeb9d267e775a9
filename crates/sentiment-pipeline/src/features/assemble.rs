use std::{fs::File, io, path::Path};

use ndarray::{Array2, ArrayView1, ArrayView2};
use sprs::CsMat;
use tracing::debug;

use crate::{
    error::{DataSourceError, FeatureError, PipelineError, WriteError},
    ingestion::parse_csv,
    persist::{self, OverwritePolicy, StagedCsv},
};

pub const FEATURE_LABEL_COLUMN: &str = "label";

/// Dense feature matrix with one label per row.
///
/// Row `i` of the matrix and label `i` describe the same document. On disk
/// the table has a leading unnamed positional index column, one column per
/// feature named `0..K-1` and a trailing `label` column.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    features: Array2<f64>,
    labels: Vec<u8>,
}

impl FeatureTable {
    /// Pair every matrix row with its label. The lengths must agree exactly.
    pub fn assemble(features: Array2<f64>, labels: Vec<u8>) -> Result<Self, FeatureError> {
        if features.nrows() != labels.len() {
            return Err(FeatureError::RowMismatch {
                rows: features.nrows(),
                labels: labels.len(),
            });
        }
        Ok(Self { features, labels })
    }

    pub fn from_sparse(matrix: &CsMat<f64>, labels: Vec<u8>) -> Result<Self, FeatureError> {
        Self::assemble(matrix.to_dense(), labels)
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn num_features(&self) -> usize {
        self.features.ncols()
    }

    #[must_use]
    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    #[must_use]
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Feature row and label of document `idx`.
    #[must_use]
    pub fn row(&self, idx: usize) -> Option<(ArrayView1<'_, f64>, u8)> {
        let label = *self.labels.get(idx)?;
        Some((self.features.row(idx), label))
    }

    fn header(&self) -> Vec<String> {
        std::iter::once(String::new())
            .chain((0..self.num_features()).map(|col| col.to_string()))
            .chain(std::iter::once(FEATURE_LABEL_COLUMN.to_owned()))
            .collect()
    }

    fn write_records<W: io::Write>(&self, wtr: &mut csv::Writer<W>) -> csv::Result<()> {
        wtr.write_record(self.header())?;
        for (idx, (features, label)) in self
            .features
            .outer_iter()
            .zip(&self.labels)
            .enumerate()
        {
            let record = std::iter::once(idx.to_string())
                .chain(features.iter().map(f64::to_string))
                .chain(std::iter::once(label.to_string()));
            wtr.write_record(record)?;
        }
        Ok(())
    }

    pub fn write(&self, path: &Path, policy: OverwritePolicy) -> Result<(), WriteError> {
        persist::write_csv_atomic(path, policy, |wtr| self.write_records(wtr))?;
        debug!(
            path = %path.display(),
            rows = self.num_rows(),
            features = self.num_features(),
            "Wrote feature table"
        );
        Ok(())
    }

    /// Write the table next to `path` without publishing it, so several
    /// tables can be fully written before any of them replaces a file.
    pub fn stage(&self, path: &Path) -> Result<StagedCsv, WriteError> {
        persist::stage_csv(path, |wtr| self.write_records(wtr))
    }

    /// Read a feature table written by [`FeatureTable::write`]. A header
    /// without rows reads back as a table with zero rows and the header's
    /// feature count.
    pub fn read(path: &Path) -> Result<Self, PipelineError> {
        let source_name = path.display().to_string();
        let malformed = |reason: String| DataSourceError::Malformed {
            source_name: source_name.clone(),
            reason,
        };

        let file = File::open(path).map_err(|err| DataSourceError::NotFound {
            source_name: source_name.clone(),
            reason: err.to_string(),
        })?;
        let table = parse_csv(&source_name, file)?;

        let columns = table.columns();
        let expected_features = columns.len().saturating_sub(2);
        let layout_ok = columns.len() >= 2
            && columns[0].is_empty()
            && columns[columns.len() - 1] == FEATURE_LABEL_COLUMN
            && columns[1..columns.len() - 1]
                .iter()
                .enumerate()
                .all(|(idx, name)| *name == idx.to_string());
        if !layout_ok {
            return Err(malformed(format!("unexpected header {columns:?}")).into());
        }

        let mut data = Vec::with_capacity(table.len() * expected_features);
        let mut labels = Vec::with_capacity(table.len());
        for (row_idx, row) in table.rows().iter().enumerate() {
            for cell in &row[1..=expected_features] {
                let value = cell.parse::<f64>().map_err(|err| {
                    malformed(format!("row {row_idx}: invalid feature value {cell:?}: {err}"))
                })?;
                data.push(value);
            }
            let label_cell = &row[expected_features + 1];
            let label = label_cell.parse::<u8>().map_err(|err| {
                malformed(format!("row {row_idx}: invalid label {label_cell:?}: {err}"))
            })?;
            labels.push(label);
        }

        let features = Array2::from_shape_vec((labels.len(), expected_features), data)
            .map_err(|err| malformed(err.to_string()))?;
        Ok(Self::assemble(features, labels)?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use ndarray::array;

    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn sample() -> FeatureTable {
        FeatureTable::assemble(
            array![[0.6, 0.8, 0.0], [0.0, 0.0, 0.0], [0.123_456_789, 0.0, 0.992_350_7]],
            vec![1, 0, 1],
        )
        .expect("matching lengths")
    }

    #[test]
    fn test_assemble_preserves_row_alignment() {
        let table = sample();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.num_features(), 3);
        for (idx, expected_label) in [1u8, 0, 1].into_iter().enumerate() {
            let (row, label) = table.row(idx).expect("row exists");
            assert_eq!(label, expected_label);
            assert_eq!(row, table.features().row(idx));
        }
        assert!(table.row(3).is_none());
    }

    #[test]
    fn test_assemble_rejects_mismatched_lengths() {
        let err = FeatureTable::assemble(Array2::zeros((3, 2)), vec![1, 0]).expect_err("mismatch");
        assert_eq!(err, FeatureError::RowMismatch { rows: 3, labels: 2 });
    }

    #[test]
    fn test_from_sparse() {
        let matrix = CsMat::new((2, 2), vec![0, 1, 1], vec![1], vec![1.0]);
        let table = FeatureTable::from_sparse(&matrix, vec![0, 1]).expect("assemble");
        assert_eq!(table.features(), array![[0.0, 1.0], [0.0, 0.0]]);
    }

    #[test]
    fn test_written_layout() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("features.csv");
        let table = FeatureTable::assemble(array![[0.5, 0.0]], vec![1]).expect("assemble");
        table.write(&path, OverwritePolicy::Reject).expect("write");

        assert_eq!(
            fs::read_to_string(&path).expect("read back"),
            ",0,1,label\n0,0.5,0,1\n"
        );
    }

    #[test]
    fn test_write_read_round_trip() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("features.csv");
        let table = sample();
        table.write(&path, OverwritePolicy::Reject).expect("write");

        let read_back = FeatureTable::read(&path).expect("read");
        assert_eq!(read_back.labels(), table.labels());
        assert_eq!(read_back.features().dim(), table.features().dim());
        for (a, b) in read_back.features().iter().zip(table.features().iter()) {
            assert!((a - b).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_zero_feature_round_trip() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("features.csv");
        let table = FeatureTable::assemble(Array2::zeros((2, 0)), vec![0, 1]).expect("assemble");
        table.write(&path, OverwritePolicy::Reject).expect("write");

        assert_eq!(
            fs::read_to_string(&path).expect("read back"),
            ",label\n0,0\n1,1\n"
        );
        assert_eq!(FeatureTable::read(&path).expect("read"), table);
    }

    #[test]
    fn test_zero_row_round_trip() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("features.csv");
        let table = FeatureTable::assemble(Array2::zeros((0, 3)), Vec::new()).expect("assemble");
        table.write(&path, OverwritePolicy::Reject).expect("write");

        assert_eq!(fs::read_to_string(&path).expect("read back"), ",0,1,2,label\n");
        let read_back = FeatureTable::read(&path).expect("read");
        assert_eq!(read_back.num_rows(), 0);
        assert_eq!(read_back.num_features(), 3);
        assert_eq!(read_back, table);
    }

    #[test]
    fn test_read_rejects_foreign_layout() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("features.csv");
        fs::write(&path, "content,sentiment\nhi,1\n").expect("write csv");
        let err = FeatureTable::read(&path).expect_err("not a feature table");
        assert!(matches!(
            err,
            PipelineError::DataSource(DataSourceError::Malformed { .. })
        ));
    }
}
