//! Catalog browsing helpers: search filter and navigation slugs.

use std::sync::Arc;

use crate::experiment::ExperimentDefinition;

/// Subject + free-text filter used by the catalog page.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against title and description.
    pub text: String,
    /// Exact subject; `None` or `"all"` matches any subject.
    pub subject: Option<String>,
}

impl CatalogQuery {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            subject: None,
        }
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn matches(&self, def: &ExperimentDefinition) -> bool {
        let subject_ok = match self.subject.as_deref() {
            None | Some("all") => true,
            Some(s) => def.subject == s,
        };
        if !subject_ok {
            return false;
        }
        if self.text.is_empty() {
            return true;
        }
        let haystack = format!("{} {}", def.title, def.description).to_lowercase();
        haystack.contains(&self.text.to_lowercase())
    }

    /// Matching entries, in catalog order.
    pub fn filter<'a>(
        &self,
        items: &'a [Arc<ExperimentDefinition>],
    ) -> Vec<&'a Arc<ExperimentDefinition>> {
        items.iter().filter(|d| self.matches(d)).collect()
    }
}

/// Identifier the catalog page navigates with: the lowercased simulation id
/// unless it is the placeholder, else the title slug, else the catalog id.
pub fn navigation_slug(def: &ExperimentDefinition) -> String {
    let sim = def.simulation_id.to_lowercase();
    if !sim.is_empty() && sim != "placeholder" {
        return sim;
    }
    let slug = def.title_slug();
    if slug.is_empty() { def.id.clone() } else { slug }
}
