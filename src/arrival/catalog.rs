//! Where new order requests come from.

use crate::model::{OrderRequest, Temperature};
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

const BUILTIN_CATALOG: &str = include_str!("../../data/sample-data.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A fixed list of order templates, sampled uniformly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderCatalog {
    templates: Vec<OrderRequest>,
}

impl OrderCatalog {
    pub fn new(templates: Vec<OrderRequest>) -> Self {
        Self { templates }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Like [`OrderCatalog::load`], but a missing or malformed file yields an
    /// empty catalog instead of an error.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(catalog) => {
                info!(path = %path.display(), templates = catalog.len(), "Order catalog loaded");
                catalog
            }
            Err(e) => {
                error!(error = %e, "Falling back to an empty order catalog");
                Self::default()
            }
        }
    }

    /// The catalog bundled with the crate.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_CATALOG).unwrap_or_else(|e| {
            error!(error = %e, "Built-in order catalog is malformed");
            Self::default()
        })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn templates(&self) -> &[OrderRequest] {
        &self.templates
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<OrderRequest> {
        self.templates.choose(rng).cloned()
    }
}

/// Produces one order request per call.
#[derive(Debug, Clone)]
pub enum OrderSource {
    Catalog(OrderCatalog),
    /// Made-up names, any temperature, shelf life 100..=300 s, decay rate in `[0, 1)`.
    Random,
}

impl OrderSource {
    /// `None` only when sampling from an empty catalog.
    pub fn next_request<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<OrderRequest> {
        match self {
            OrderSource::Catalog(catalog) => catalog.sample(rng),
            OrderSource::Random => Some(random_request(rng)),
        }
    }
}

fn random_request<R: Rng + ?Sized>(rng: &mut R) -> OrderRequest {
    let len = rng.gen_range(5..=12);
    let name: String = (0..len)
        .map(|i| {
            let c = char::from(rng.gen_range(b'a'..=b'z'));
            if i == 0 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect();

    let temperature = Temperature::ALL[rng.gen_range(0..Temperature::ALL.len())];
    OrderRequest::new(name, temperature, rng.gen_range(100..=300), rng.gen_range(0.0..1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = OrderCatalog::builtin();
        assert!(!catalog.is_empty());
        assert!(catalog
            .templates()
            .iter()
            .any(|t| t.temperature == Temperature::Frozen));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Pho", "temp": "HOT", "shelfLife": 222, "decayRate": 0.3}}]"#
        )
        .unwrap();

        let catalog = OrderCatalog::load(file.path()).unwrap();
        assert_eq!(
            catalog.templates(),
            &[OrderRequest::new("Pho", Temperature::Hot, 222, 0.3)]
        );
    }

    #[test]
    fn test_missing_file_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = OrderCatalog::load_or_empty(dir.path().join("nope.json"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_malformed_file_falls_back_to_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "Pho", "temp": "lukewarm"}}]"#).unwrap();

        assert!(matches!(
            OrderCatalog::load(file.path()),
            Err(CatalogError::Parse(_))
        ));
        assert!(OrderCatalog::load_or_empty(file.path()).is_empty());
    }

    #[test]
    fn test_empty_catalog_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(5);
        let source = OrderSource::Catalog(OrderCatalog::default());
        assert!(source.next_request(&mut rng).is_none());
    }

    #[test]
    fn test_random_requests_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let request = OrderSource::Random.next_request(&mut rng).unwrap();
            assert!((100..=300).contains(&request.shelf_life));
            assert!((0.0..1.0).contains(&request.decay_rate));
            assert!(request.name.chars().all(|c| c.is_ascii_alphabetic()));
        }
    }
}
