//! One-time readiness gate in front of the taxonomy index.
//!
//! Request handlers call [`TaxonomyGate::get`]; until startup has published a
//! successfully built [`ModelTaxonomy`] they receive `CladisError::NotReady`.
//! A failed build publishes nothing, so there is no degraded mode.

use crate::model::ModelTaxonomy;
use cladis_core::{CladisError, CladisResult};
use once_cell::sync::OnceCell;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct TaxonomyGate {
    cell: OnceCell<Arc<ModelTaxonomy>>,
}

impl TaxonomyGate {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Publish a built taxonomy. Only the first call succeeds.
    pub fn initialize(&self, model: ModelTaxonomy) -> CladisResult<Arc<ModelTaxonomy>> {
        let model = Arc::new(model);
        self.cell.set(Arc::clone(&model)).map_err(|_| {
            CladisError::InvalidInput("taxonomy index is already initialized".to_string())
        })?;
        Ok(model)
    }

    /// Run `build` and publish its result; an error leaves the gate closed.
    ///
    /// Concurrent callers are serialized by the cell: exactly one runs its
    /// build, the others wait for it and then get `InvalidInput`.
    pub fn initialize_with<F>(&self, build: F) -> CladisResult<Arc<ModelTaxonomy>>
    where
        F: FnOnce() -> CladisResult<ModelTaxonomy>,
    {
        let mut built_here = false;
        let model = self.cell.get_or_try_init(|| {
            built_here = true;
            build().map(Arc::new)
        })?;
        if !built_here {
            return Err(CladisError::InvalidInput(
                "taxonomy index is already initialized".to_string(),
            ));
        }
        Ok(Arc::clone(model))
    }

    pub fn get(&self) -> CladisResult<Arc<ModelTaxonomy>> {
        self.cell.get().cloned().ok_or(CladisError::NotReady)
    }

    pub fn is_ready(&self) -> bool {
        self.cell.get().is_some()
    }
}
