//! Dimension registry
//!
//! Holds the analyzer instances for one run, keyed by dimension name.
//! Registration is explicit and happens in one place at startup; dimensions
//! never register themselves as a construction side effect. Re-registering
//! the same instance is a no-op, a different instance under a taken name is
//! an error.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::base::Dimension;
use super::burstiness::BurstinessDimension;
use super::energy::EnergyDimension;
use super::formatting::FormattingDimension;
use super::syntactic::SyntacticDimension;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Dimension '{0}' is already registered with a different instance")]
    DuplicateName(String),
}

#[derive(Default)]
pub struct DimensionRegistry {
    entries: Vec<Arc<dyn Dimension>>,
    index: HashMap<String, usize>,
}

impl DimensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with every in-tree analyzer.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for dimension in [
            Arc::new(BurstinessDimension::new()) as Arc<dyn Dimension>,
            Arc::new(FormattingDimension::new()),
            Arc::new(EnergyDimension::new()),
            Arc::new(SyntacticDimension::new()),
        ] {
            // Names are distinct literals, insertion cannot collide
            let _ = registry.register(dimension);
        }
        registry
    }

    pub fn register(&mut self, dimension: Arc<dyn Dimension>) -> Result<(), RegistryError> {
        let name = dimension.name();
        if let Some(&existing) = self.index.get(name) {
            if Arc::ptr_eq(&self.entries[existing], &dimension) {
                return Ok(());
            }
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(dimension);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Dimension>> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|d| d.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Dimension>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every registration.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}
