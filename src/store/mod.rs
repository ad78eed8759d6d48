//! Evaluation store backed by redb
//!
//! Keeps scored evaluations and REP registry records per company. Values are
//! JSON documents keyed by record id. Records are append-only: nothing is
//! ever updated in place. Write transactions serialize concurrent writers.

use crate::models::{EvaluationInputs, EvaluationResult, RepRecord, StoredEvaluation};
use anyhow::{Context, Result};
use redb::{ReadableTable, ReadableTableMetadata, TableDefinition};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// JSON documents keyed by record id
type DocumentTable = TableDefinition<'static, &'static str, &'static [u8]>;

// redb table definitions
const EVALUATIONS_TABLE: DocumentTable = TableDefinition::new("evaluations");
const REP_TABLE: DocumentTable = TableDefinition::new("rep_records");

/// Record counts in the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub evaluations: u64,
    pub rep_records: u64,
}

/// Record counts of one company
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyStats {
    pub company_id: String,
    pub evaluations: usize,
    pub rep_records: usize,
}

impl CompanyStats {
    fn new(company_id: String) -> Self {
        Self {
            company_id,
            evaluations: 0,
            rep_records: 0,
        }
    }
}

/// Persistent store for evaluations and REP records
pub struct EvaluationStore {
    db: redb::Database,
    /// File backing the store (`None` for in-memory stores)
    path: Option<PathBuf>,
}

impl EvaluationStore {
    /// Create or open a store file, creating parent directories as needed
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let db = redb::Database::create(path)
            .with_context(|| format!("Failed to open store at {}", path.display()))?;
        debug!("Opened evaluation store at {}", path.display());

        let store = Self {
            db,
            path: Some(path.to_path_buf()),
        };
        store.ensure_tables()?;
        Ok(store)
    }

    /// Create an in-memory only store (no persistence)
    pub fn in_memory() -> Result<Self> {
        let db = redb::Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .context("Failed to create in-memory store")?;
        let store = Self { db, path: None };
        store.ensure_tables()?;
        Ok(store)
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn ensure_tables(&self) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            write_txn.open_table(EVALUATIONS_TABLE)?;
            write_txn.open_table(REP_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    // ==================== Evaluations ====================

    /// Stamp and persist a scored evaluation for a company
    pub fn save_evaluation(
        &self,
        company_id: &str,
        inputs: EvaluationInputs,
        result: EvaluationResult,
    ) -> Result<StoredEvaluation> {
        let record = StoredEvaluation::new(company_id, inputs, result)?;
        self.save_evaluations(std::slice::from_ref(&record))?;
        Ok(record)
    }

    /// Persist several evaluations in a single transaction
    pub fn save_evaluations(&self, records: &[StoredEvaluation]) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(EVALUATIONS_TABLE)?;
            for record in records {
                let key = record.id.to_string();
                if !record.result.is_finite() {
                    anyhow::bail!("Evaluation {} has non-finite results and cannot be stored", key);
                }
                if table.get(key.as_str())?.is_some() {
                    anyhow::bail!("Evaluation {} already exists", key);
                }
                let value = serde_json::to_vec(record)?;
                table.insert(key.as_str(), value.as_slice())?;
            }
        }
        write_txn.commit()?;

        info!("Saved {} evaluation(s)", records.len());
        Ok(())
    }

    /// Look up one evaluation by id
    pub fn get_evaluation(&self, id: &Uuid) -> Result<Option<StoredEvaluation>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(EVALUATIONS_TABLE)?;
        let key = id.to_string();
        match table.get(key.as_str())? {
            Some(value) => {
                let record = serde_json::from_slice(value.value())
                    .with_context(|| format!("Corrupt evaluation record {}", key))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// All evaluations of a company, oldest first
    pub fn list_evaluations(&self, company_id: &str) -> Result<Vec<StoredEvaluation>> {
        let company_id = company_id.trim();
        let mut records: Vec<StoredEvaluation> = self
            .read_all(EVALUATIONS_TABLE)?
            .into_iter()
            .filter(|r: &StoredEvaluation| r.company_id == company_id)
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(records)
    }

    // ==================== REP registry ====================

    /// Append a REP record
    pub fn add_rep_record(&self, record: &RepRecord) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(REP_TABLE)?;
            let key = record.id.to_string();
            if table.get(key.as_str())?.is_some() {
                anyhow::bail!("REP record {} already exists", key);
            }
            let value = serde_json::to_vec(record)?;
            table.insert(key.as_str(), value.as_slice())?;
        }
        write_txn.commit()?;

        info!(
            "Added REP record {} for {} ({} {})",
            record.id, record.company_id, record.product, record.year
        );
        Ok(())
    }

    /// REP records of a company, sorted by (year, product)
    pub fn list_rep_records(&self, company_id: &str) -> Result<Vec<RepRecord>> {
        let company_id = company_id.trim();
        let mut records: Vec<RepRecord> = self
            .read_all(REP_TABLE)?
            .into_iter()
            .filter(|r: &RepRecord| r.company_id == company_id)
            .collect();
        records.sort_by(|a, b| {
            a.year
                .cmp(&b.year)
                .then_with(|| a.product.cmp(&b.product))
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(records)
    }

    // ==================== Metadata ====================

    /// Record counts per table
    pub fn stats(&self) -> Result<StoreStats> {
        let read_txn = self.db.begin_read()?;
        let evaluations = read_txn.open_table(EVALUATIONS_TABLE)?.len()?;
        let rep_records = read_txn.open_table(REP_TABLE)?.len()?;
        Ok(StoreStats {
            evaluations,
            rep_records,
        })
    }

    /// Per-company record counts, sorted by company.
    ///
    /// Per-company record counts, ordered by company id
    pub fn company_stats(&self) -> Result<Vec<CompanyStats>> {
        let mut counts: BTreeMap<String, CompanyStats> = BTreeMap::new();
        let evaluations: Vec<StoredEvaluation> = self.read_all(EVALUATIONS_TABLE)?;
        for record in evaluations {
            counts
                .entry(record.company_id.clone())
                .or_insert_with(|| CompanyStats::new(record.company_id))
                .evaluations += 1;
        }
        let rep: Vec<RepRecord> = self.read_all(REP_TABLE)?;
        for record in rep {
            counts
                .entry(record.company_id.clone())
                .or_insert_with(|| CompanyStats::new(record.company_id))
                .rep_records += 1;
        }
        Ok(counts.into_values().collect())
    }

    /// Decode every document of a table
    fn read_all<T: DeserializeOwned>(&self, definition: DocumentTable) -> Result<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(definition)?;

        let mut records = Vec::new();
        for item in table.iter()? {
            let (key, value) = item?;
            let record = serde_json::from_slice(value.value())
                .with_context(|| format!("Corrupt record {}", key.value()))?;
            records.push(record);
        }
        Ok(records)
    }
}

// redb::Database handles cleanup on Drop automatically

#[cfg(test)]
mod tests;
