//! Catalog interface and an in-memory implementation.

use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::experiment::ExperimentDefinition;
use crate::seed::seed_experiments;

/// Read-only access to experiment definitions.
///
/// A remote document store implements this; the runtime only ever reads.
pub trait Catalog {
    /// All experiments. May be empty (the caller may then seed).
    fn list(&self) -> Result<Vec<Arc<ExperimentDefinition>>>;

    /// Experiment by catalog key, `None` if no such key.
    fn get(&self, id: &str) -> Result<Option<Arc<ExperimentDefinition>>>;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn list(&self) -> Result<Vec<Arc<ExperimentDefinition>>> {
        (**self).list()
    }

    fn get(&self, id: &str) -> Result<Option<Arc<ExperimentDefinition>>> {
        (**self).get(id)
    }
}

/// Outcome of seeding one title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedResult {
    pub title: String,
    /// A new entry was inserted.
    pub upserted: bool,
    /// An existing entry with the same title was replaced.
    pub modified: bool,
}

/// Outcome of [`InMemoryCatalog::seed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub total: usize,
    pub results: Vec<SeedResult>,
}

/// Catalog held in memory, optionally loaded from a JSON document array.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    entries: Vec<Arc<ExperimentDefinition>>,
    next_id: u64,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-populated with the sample experiments.
    pub fn seeded() -> Self {
        let mut catalog = Self::new();
        catalog.seed();
        catalog
    }

    /// Parse a JSON array of experiment documents. Every definition is
    /// validated; documents without an id get one assigned.
    pub fn from_json(json: &str) -> Result<Self> {
        let defs: Vec<ExperimentDefinition> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for def in defs {
            def.validate()?;
            catalog.insert(def);
        }
        Ok(catalog)
    }

    /// Add a definition, assigning an id if it has none.
    pub fn insert(&mut self, mut def: ExperimentDefinition) -> Arc<ExperimentDefinition> {
        if def.id.is_empty() {
            def.id = self.allocate_id();
        }
        let def = Arc::new(def);
        self.entries.push(Arc::clone(&def));
        def
    }

    /// Upsert the sample experiments by title. Existing entries keep their id.
    pub fn seed(&mut self) -> SeedReport {
        let mut results = Vec::new();
        for mut def in seed_experiments() {
            let title = def.title.clone();
            match self.entries.iter().position(|e| e.title == def.title) {
                Some(i) => {
                    def.id = self.entries[i].id.clone();
                    let modified = *self.entries[i] != def;
                    self.entries[i] = Arc::new(def);
                    results.push(SeedResult { title, upserted: false, modified });
                }
                None => {
                    self.insert(def);
                    results.push(SeedResult { title, upserted: true, modified: false });
                }
            }
        }
        log::info!("catalog seeded: {} experiments", self.entries.len());
        SeedReport {
            total: self.entries.len(),
            results,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn allocate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let id = format!("exp-{:04}", self.next_id);
            if !self.entries.iter().any(|e| e.id == id) {
                return id;
            }
        }
    }
}

impl Catalog for InMemoryCatalog {
    fn list(&self) -> Result<Vec<Arc<ExperimentDefinition>>> {
        Ok(self.entries.clone())
    }

    fn get(&self, id: &str) -> Result<Option<Arc<ExperimentDefinition>>> {
        Ok(self.entries.iter().find(|e| e.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabError;

    #[test]
    fn test_seed_then_reseed_is_idempotent() {
        let mut catalog = InMemoryCatalog::new();
        assert!(catalog.is_empty());

        let first = catalog.seed();
        assert_eq!(first.total, 12);
        assert!(first.results.iter().all(|r| r.upserted));

        let ids: Vec<String> = catalog.list().unwrap().iter().map(|e| e.id.clone()).collect();

        let second = catalog.seed();
        assert_eq!(second.total, 12);
        assert!(second.results.iter().all(|r| !r.upserted && !r.modified));

        let ids_after: Vec<String> = catalog.list().unwrap().iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, ids_after);
    }

    #[test]
    fn test_get_by_id() {
        let catalog = InMemoryCatalog::seeded();
        let first = catalog.list().unwrap()[0].clone();
        let found = catalog.get(&first.id).unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &found));
        assert!(catalog.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_from_json_keeps_ids_and_validates() {
        let json = r#"[
            { "_id": "abc", "title": "Free Fall", "simulationId": "freeFall",
              "controls": [{ "key": "g", "label": "g", "min": 2, "max": 20, "step": 0.5, "default": 9.8 }] },
            { "title": "No Id", "simulationId": "shm" }
        ]"#;
        let catalog = InMemoryCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("abc").unwrap().is_some());
        let no_id = &catalog.list().unwrap()[1];
        assert!(!no_id.id.is_empty());

        let bad = r#"[{ "title": "Bad", "simulationId": "x",
                        "controls": [{ "key": "a", "label": "a", "min": 5, "max": 1 }] }]"#;
        assert!(matches!(
            InMemoryCatalog::from_json(bad),
            Err(LabError::InvalidControl { .. })
        ));
        assert!(matches!(InMemoryCatalog::from_json("{"), Err(LabError::Json(_))));
    }
}
