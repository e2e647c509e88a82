use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use polars::prelude::{CsvWriter, SerWriter};

use crate::common::{ensure_dir_exists, finalize_rewrite, open_for_rewrite};
use crate::record::ResultTable;

/// Durable sink for the accumulating result table.
///
/// Checkpointing strategy: after every parcel the entire table is rewritten,
/// atomically (write to a temp file, then rename over the target). A crash
/// after parcel N leaves a complete, valid table for parcels 1..N on disk.
#[derive(Debug)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Bind the sink to its output path. Refuses to clobber an existing
    /// file unless `force` is set, and creates the output directory up
    /// front so a bad path fails before any parcel work starts; nothing
    /// is written until the first checkpoint.
    pub fn create(path: &Path, force: bool) -> Result<Self> {
        if !force && path.exists() {
            bail!("Refusing to overwrite existing file: {} (use --force)", path.display());
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_dir_exists(parent)?;
            }
        }
        Ok(Self { path: path.to_path_buf() })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the whole accumulated table.
    pub fn checkpoint(&self, table: &ResultTable) -> Result<()> {
        let mut df = table.to_dataframe()?;
        let mut pending = open_for_rewrite(&self.path)?;
        CsvWriter::new(&mut pending).include_header(true).finish(&mut df)?;
        finalize_rewrite(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{SlopeAreas, TransmissionDistances};
    use crate::record::SuitabilityRecord;
    use std::fs;

    fn record(index: u32) -> SuitabilityRecord {
        SuitabilityRecord {
            index,
            site_group: "Job".to_string(),
            source_fid: index as u64,
            area_acres: 5.0,
            transmission: TransmissionDistances::from_raw([0.1, 0.2, 0.3, 0.4, 0.5, 0.6]),
            all_slope: SlopeAreas::from_raw([5.0, 0.0, 0.0, 0.0, 0.0]),
            good_slope: SlopeAreas::from_raw([5.0, 0.0, 0.0, 0.0, 0.0]),
            mine_permits: false,
            owner: "NA".to_string(),
            county: "Lewis".to_string(),
        }
    }

    #[test]
    fn refuses_existing_output_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale").unwrap();
        assert!(CsvSink::create(&path, false).is_err());
        assert!(CsvSink::create(&path, true).is_ok());
    }

    #[test]
    fn create_makes_the_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("out.csv");
        let sink = CsvSink::create(&path, false).unwrap();
        assert!(path.parent().unwrap().is_dir());

        let mut table = ResultTable::new();
        table.push(record(0));
        sink.checkpoint(&table).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn create_rejects_a_file_in_the_directory_position() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("reports"), "not a dir").unwrap();
        let path = dir.path().join("reports").join("out.csv");
        assert!(CsvSink::create(&path, false).is_err());
    }

    #[test]
    fn checkpoint_rewrites_grow_with_the_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let sink = CsvSink::create(&path, false).unwrap();

        let mut table = ResultTable::new();
        table.push(record(0));
        sink.checkpoint(&table).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        assert_eq!(first.lines().count(), 2); // header + one row

        table.push(record(1));
        sink.checkpoint(&table).unwrap();
        let second = fs::read_to_string(&path).unwrap();
        assert_eq!(second.lines().count(), 3);
        // earlier rows survive the rewrite verbatim
        assert!(second.starts_with(&first));
    }
}
