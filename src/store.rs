use log::*;

use crate::csv_parser::{self, ParsedCsv};
use crate::records::DonationRecord;
use crate::stats;

/// One successful ingestion: the records a single CSV file contributed and
/// the sequential index of that addition
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Index of this batch, 0 for the first ingested file
    pub index: usize,
    /// The records this file added, in file order
    pub records: Vec<DonationRecord>,
}

/// Accumulates donation records over any number of ingested CSV files
///
/// Created empty at startup and alive for the whole session; every
/// ingestion appends, nothing is ever pruned or persisted. In reality the
/// accumulated table would live in some kind of a database, but an in
/// memory vector is what this tool needs
#[derive(Debug, Default)]
pub struct DonationStore {
    /// Column keys, fixed by the first ingested batch
    keys: Vec<String>,
    /// Every record from every batch, in ingestion order
    records: Vec<DonationRecord>,
    /// How many batches were ingested so far
    batches: usize,
}

impl DonationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse CSV text and append its records as the next batch
    ///
    /// Input that trims down to nothing has no header to take keys from and
    /// is rejected without touching the store. A header-only file is a real
    /// batch with zero records. Dropping the same file twice is allowed and
    /// appends the same records again
    pub fn ingest(&mut self, text: &str) -> anyhow::Result<Batch> {
        let ParsedCsv { keys, records } = csv_parser::parse(text);

        if keys.is_empty() {
            return Err(anyhow::anyhow!("no header line in input"));
        }

        if self.keys.is_empty() {
            self.keys = keys;
        } else if keys != self.keys {
            // later batches are taken on faith, the first schema wins
            warn!(
                "batch #{} keys {:?} differ from the first batch {:?}; keeping the original keys",
                self.batches, keys, self.keys
            );
        }

        let index = self.batches;
        self.batches += 1;
        self.records.extend(records.iter().cloned());

        debug!("batch #{} appended {} record(s)", index, records.len());

        Ok(Batch { index, records })
    }

    /// Column keys from the first ingested batch
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// All accumulated records in ingestion order
    pub fn records(&self) -> &[DonationRecord] {
        &self.records
    }

    /// Number of batches ingested so far
    pub fn batch_count(&self) -> usize {
        self.batches
    }

    /// Running total over every accumulated record
    pub fn total_value(&self) -> f64 {
        stats::total_value(&self.records)
    }

    /// The whole accumulated table as CSV text
    pub fn export_csv(&self) -> String {
        csv_parser::to_csv(&self.keys, &self.records)
    }
}
