/// Parsed taxonomy table: one immutable record per taxon, in source order
use cladis_core::{CladisError, CladisResult, LeafClassId, TaxonId, TaxonomyBuildError};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One row of the taxonomy table
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonRecord {
    pub taxon_id: TaxonId,
    /// `None` attaches the taxon to the implicit root
    pub parent_taxon_id: Option<TaxonId>,
    pub name: String,
    pub rank: Option<String>,
    /// Present only for terminal output classes of the model
    pub leaf_class_id: Option<LeafClassId>,
    /// Ordering attribute for display, never consulted by the index
    pub display_score: Option<f64>,
}

impl TaxonRecord {
    pub fn new(taxon_id: u32, parent_taxon_id: Option<u32>, name: impl Into<String>) -> Self {
        Self {
            taxon_id: TaxonId(taxon_id),
            parent_taxon_id: parent_taxon_id.filter(|&p| p != 0).map(TaxonId),
            name: name.into(),
            rank: None,
            leaf_class_id: None,
            display_score: None,
        }
    }

    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = Some(rank.into());
        self
    }

    pub fn with_leaf_class(mut self, leaf_class_id: u32) -> Self {
        self.leaf_class_id = Some(LeafClassId(leaf_class_id));
        self
    }

    pub fn with_display_score(mut self, score: f64) -> Self {
        self.display_score = Some(score);
        self
    }

    pub fn is_leaf_class(&self) -> bool {
        self.leaf_class_id.is_some()
    }
}

/// Raw CSV row; every cell is kept as text so that integer columns written
/// as floats by dataframe tools can still be read.
#[derive(Debug, Deserialize)]
struct RawTaxonRow {
    taxon_id: Option<String>,
    parent_taxon_id: Option<String>,
    name: Option<String>,
    rank: Option<String>,
    leaf_class_id: Option<String>,
    #[serde(alias = "aggregated_combined_score", alias = "score")]
    display_score: Option<String>,
}

/// Parse an identifier cell. Empty and NaN cells are absent.
pub(crate) fn parse_id_cell(
    raw: Option<&str>,
    column: &str,
    row: usize,
) -> CladisResult<Option<u32>> {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    if text.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    if let Ok(value) = text.parse::<u32>() {
        return Ok(Some(value));
    }
    match text.parse::<f64>() {
        Ok(value)
            if value.is_finite()
                && value.fract() == 0.0
                && value >= 0.0
                && value <= u32::MAX as f64 =>
        {
            Ok(Some(value as u32))
        }
        _ => Err(CladisError::Parse(format!(
            "row {}: invalid {} '{}'",
            row, column, text
        ))),
    }
}

/// Parse a numeric cell. Empty and NaN cells are absent.
pub(crate) fn parse_number_cell(
    raw: Option<&str>,
    column: &str,
    row: usize,
) -> CladisResult<Option<f64>> {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    let value: f64 = text.parse().map_err(|_| {
        CladisError::Parse(format!("row {}: invalid {} '{}'", row, column, text))
    })?;
    Ok(if value.is_nan() { None } else { Some(value) })
}

impl RawTaxonRow {
    fn into_record(self, row: usize) -> CladisResult<TaxonRecord> {
        let taxon_id = parse_id_cell(self.taxon_id.as_deref(), "taxon_id", row)?
            .ok_or_else(|| CladisError::Parse(format!("row {}: missing taxon_id", row)))?;
        let parent = parse_id_cell(self.parent_taxon_id.as_deref(), "parent_taxon_id", row)?;
        let leaf_class = parse_id_cell(self.leaf_class_id.as_deref(), "leaf_class_id", row)?;
        let display_score = parse_number_cell(self.display_score.as_deref(), "score", row)?;

        Ok(TaxonRecord {
            taxon_id: TaxonId(taxon_id),
            parent_taxon_id: parent.filter(|&p| p != 0).map(TaxonId),
            name: self.name.unwrap_or_default(),
            rank: self.rank.filter(|r| !r.trim().is_empty()),
            leaf_class_id: leaf_class.map(LeafClassId),
            display_score,
        })
    }
}

/// The taxon records plus a slot lookup. A record's slot is its row position
/// and stays stable for the lifetime of every structure built from the table.
#[derive(Debug, Clone, Default)]
pub struct TaxonTable {
    records: Vec<TaxonRecord>,
    slots: HashMap<TaxonId, usize>,
}

impl TaxonTable {
    /// Index records in the given order, rejecting reserved and repeated ids
    pub fn from_records(records: Vec<TaxonRecord>) -> CladisResult<Self> {
        let mut slots = HashMap::with_capacity(records.len());
        for (slot, record) in records.iter().enumerate() {
            if record.taxon_id.is_root() {
                return Err(TaxonomyBuildError::ReservedTaxonId { row: slot + 1 }.into());
            }
            if slots.insert(record.taxon_id, slot).is_some() {
                return Err(TaxonomyBuildError::DuplicateTaxon {
                    taxon: record.taxon_id,
                }
                .into());
            }
        }
        Ok(Self { records, slots })
    }

    /// Read a headed CSV taxonomy; columns beyond the known ones are ignored
    pub fn from_reader<R: Read>(reader: R) -> CladisResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (index, row) in csv_reader.deserialize::<RawTaxonRow>().enumerate() {
            records.push(row?.into_record(index + 1)?);
        }
        Self::from_records(records)
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

    pub fn records(&self) -> &[TaxonRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaxonRecord> {
        self.records.iter()
    }

    pub fn get(&self, taxon_id: TaxonId) -> Option<&TaxonRecord> {
        self.slot(taxon_id).map(|slot| &self.records[slot])
    }

    pub fn slot(&self, taxon_id: TaxonId) -> Option<usize> {
        self.slots.get(&taxon_id).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
