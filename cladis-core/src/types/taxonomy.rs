/// Identifier types shared by the taxonomy index and its callers
use serde::{Deserialize, Serialize};
use std::fmt;

/// Taxonomy ID type - newtype pattern for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Default)]
#[serde(transparent)]
pub struct TaxonId(pub u32);

impl TaxonId {
    /// The implicit root every root-level taxon hangs from
    pub const ROOT: Self = Self(0);

    /// Create a new TaxonId
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Check if this is the implicit root (0)
    pub fn is_root(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TaxonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TaxonId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<TaxonId> for u32 {
    fn from(taxon: TaxonId) -> Self {
        taxon.0
    }
}

/// Position of a terminal class in the model's output vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeafClassId(pub u32);

impl LeafClassId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Index into a dense score vector
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LeafClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LeafClassId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxon_id_creation() {
        let taxon = TaxonId::new(48460);
        assert_eq!(taxon.value(), 48460);
        assert!(!taxon.is_root());
        assert!(TaxonId::ROOT.is_root());
        assert_eq!(TaxonId::default(), TaxonId::ROOT);
    }

    #[test]
    fn test_taxon_id_conversion() {
        let id: u32 = 12345;
        let taxon = TaxonId::from(id);
        let back: u32 = taxon.into();
        assert_eq!(id, back);
    }

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        assert_eq!(serde_json::to_string(&TaxonId(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&LeafClassId(7)).unwrap(), "7");
        let parsed: LeafClassId = serde_json::from_str("11").unwrap();
        assert_eq!(parsed.index(), 11);
    }
}
