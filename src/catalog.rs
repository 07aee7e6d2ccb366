//! Domain catalog: the selectable domains and which one is pre-selected.

use crate::Result;
use tracing::warn;

/// Domains offered for selection, in server order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainCatalog {
    options: Vec<String>,
    selected: Option<usize>,
}

impl DomainCatalog {
    /// Build the option list from `domains`, pre-selecting the first entry equal to `current`.
    pub fn new(domains: Vec<String>, current: &str) -> Self {
        let selected = domains.iter().position(|d| d == current);
        Self {
            options: domains,
            selected,
        }
    }

    /// Single-entry catalog used when the remote catalog cannot be loaded.
    pub fn fallback(current: &str) -> Self {
        Self::new(vec![current.to_string()], current)
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The pre-selected domain, if the current domain is part of the catalog.
    pub fn selected(&self) -> Option<&str> {
        self.selected.map(|i| self.options[i].as_str())
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.options.iter().any(|d| d == domain)
    }

    /// Move the selection marker to `domain`, or clear it when it is not offered.
    pub fn select(&mut self, domain: &str) {
        self.selected = self.options.iter().position(|d| d == domain);
    }
}

/// Outcome of the catalog load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogState {
    /// No load attempted yet.
    #[default]
    NotLoaded,
    Loaded(DomainCatalog),
    /// The load failed; only the current domain is offered.
    Unavailable {
        reason: String,
        fallback: DomainCatalog,
    },
}

impl CatalogState {
    /// Turn the result of a catalog request into a state, given the current domain.
    pub fn from_result(result: Result<Vec<String>>, current: &str) -> Self {
        match result {
            Ok(domains) => Self::Loaded(DomainCatalog::new(domains, current)),
            Err(err) => {
                warn!(error = %err, "domain catalog unavailable");
                Self::Unavailable {
                    reason: err.to_string(),
                    fallback: DomainCatalog::fallback(current),
                }
            }
        }
    }

    /// The catalog to draw, if any.
    pub fn catalog(&self) -> Option<&DomainCatalog> {
        match self {
            Self::NotLoaded => None,
            Self::Loaded(catalog) => Some(catalog),
            Self::Unavailable { fallback, .. } => Some(fallback),
        }
    }

    pub fn options(&self) -> &[String] {
        self.catalog().map(DomainCatalog::options).unwrap_or_default()
    }

    pub(crate) fn select(&mut self, domain: &str) {
        match self {
            Self::NotLoaded => {}
            Self::Loaded(catalog) => catalog.select(domain),
            Self::Unavailable { fallback, .. } => *fallback = DomainCatalog::fallback(domain),
        }
    }
}
