/// Optional per-taxon geo threshold overlay, joined onto the taxonomy by id
use super::table::{parse_id_cell, parse_number_cell};
use cladis_core::{CladisError, CladisResult, TaxonId, TaxonomyBuildError};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct RawThresholdRow {
    taxon_id: Option<String>,
    thres: Option<String>,
}

/// A missing entry means "no threshold", which callers must not read as zero.
#[derive(Debug, Clone, Default)]
pub struct ThresholdTable {
    geo_thresholds: HashMap<TaxonId, f64>,
}

impl ThresholdTable {
    pub fn from_pairs<I>(pairs: I) -> CladisResult<Self>
    where
        I: IntoIterator<Item = (TaxonId, f64)>,
    {
        let mut geo_thresholds = HashMap::new();
        for (taxon, value) in pairs {
            if geo_thresholds.insert(taxon, value).is_some() {
                return Err(TaxonomyBuildError::DuplicateThreshold { taxon }.into());
            }
        }
        Ok(Self { geo_thresholds })
    }

    /// Read a headed CSV with `taxon_id` and `thres` columns. Rows with an
    /// empty or NaN `thres` carry no threshold.
    pub fn from_reader<R: Read>(reader: R) -> CladisResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut pairs = Vec::new();
        for (index, row) in csv_reader.deserialize::<RawThresholdRow>().enumerate() {
            let row_number = index + 1;
            let row = row?;
            let taxon = parse_id_cell(row.taxon_id.as_deref(), "taxon_id", row_number)?
                .ok_or_else(|| {
                    CladisError::Parse(format!("row {}: missing taxon_id", row_number))
                })?;
            if let Some(value) = parse_number_cell(row.thres.as_deref(), "thres", row_number)? {
                pairs.push((TaxonId(taxon), value));
            }
        }
        Self::from_pairs(pairs)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> CladisResult<Self> {
        let file = File::open(path.as_ref()).map_err(|e| {
            CladisError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", path.as_ref().display(), e),
            ))
        })?;
        Self::from_reader(file)
    }

    /// Keep only thresholds for taxa the taxonomy knows about
    pub fn join<F>(mut self, is_known: F) -> Self
    where
        F: Fn(TaxonId) -> bool,
    {
        let before = self.geo_thresholds.len();
        self.geo_thresholds.retain(|&taxon, _| is_known(taxon));
        let dropped = before - self.geo_thresholds.len();
        if dropped > 0 {
            warn!(
                "Dropped {} threshold rows for taxa absent from the taxonomy",
                dropped
            );
        }
        self
    }

    pub fn threshold_for(&self, taxon_id: TaxonId) -> Option<f64> {
        self.geo_thresholds.get(&taxon_id).copied()
    }

    pub fn len(&self) -> usize {
        self.geo_thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geo_thresholds.is_empty()
    }
}
