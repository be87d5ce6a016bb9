//! Entity model: pools own an ordered tree of datasets, each a bag of properties.
//!
//! Dataset names encode the tree: `tank` is the root of pool `tank`,
//! `tank/home` its child, and so on.

pub mod forest;

pub use forest::{Forest, ParsedForest};

use crate::error::{ZinferError, ZinferResult};
use crate::props::tables::ENCRYPTION_ROOT;
use crate::props::{Lineage, Property};
use std::collections::{BTreeMap, HashMap};

/// True for a pool's root dataset name (no path separator).
pub fn is_root_name(name: &str) -> bool {
    !name.contains('/')
}

/// True if `name` sits strictly below `ancestor` in the tree.
pub fn is_descendant(name: &str, ancestor: &str) -> bool {
    name.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Name one level up, or None for a root name.
pub fn parent_name(name: &str) -> Option<&str> {
    name.rsplit_once('/').map(|(parent, _)| parent)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub name: String,
    properties: BTreeMap<String, Property>,
}

impl Dataset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        is_root_name(&self.name)
    }

    /// Properties keyed (and therefore sorted) by name.
    pub fn properties(&self) -> &BTreeMap<String, Property> {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    pub(crate) fn property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.properties.get_mut(name)
    }

    pub(crate) fn insert(&mut self, prop: Property) -> ZinferResult<()> {
        if self.properties.contains_key(&prop.name) {
            return Err(ZinferError::DuplicateProperty {
                entity: self.name.clone(),
                property: prop.name,
            });
        }
        self.properties.insert(prop.name.clone(), prop);
        Ok(())
    }

    /// Encryption root named by this dataset, if it is encrypted at all.
    /// Unencrypted datasets report `-`.
    pub fn encryption_root<'a, L>(&'a self, lineage: &'a L) -> Option<&'a str>
    where
        L: Lineage + ?Sized,
    {
        self.property(ENCRYPTION_ROOT)
            .map(|p| p.effective_value(lineage))
            .filter(|v| !v.is_empty() && *v != "-")
    }

    /// Encrypted, but keyed off some other dataset.
    pub fn is_encrypted_child<L>(&self, lineage: &L) -> bool
    where
        L: Lineage + ?Sized,
    {
        self.encryption_root(lineage)
            .is_some_and(|root| root != self.name)
    }
}

/// A pool with its own properties and its datasets.
///
/// `datasets()[0]` is always the root dataset, which shares the pool's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    pub name: String,
    properties: BTreeMap<String, Property>,
    datasets: Vec<Dataset>,
    index: HashMap<String, usize>,
}

impl Pool {
    /// Start a pool from the name of the first dataset seen for it.
    pub(crate) fn new(root: &str) -> ZinferResult<Self> {
        if !is_root_name(root) {
            return Err(ZinferError::FirstDatasetNotRoot(root.to_string()));
        }
        Ok(Self {
            name: root.to_string(),
            properties: BTreeMap::new(),
            datasets: Vec::new(),
            index: HashMap::new(),
        })
    }

    pub fn properties(&self) -> &BTreeMap<String, Property> {
        &self.properties
    }

    pub(crate) fn set_properties(&mut self, properties: BTreeMap<String, Property>) {
        self.properties = properties;
    }

    /// Root first, then the remaining datasets in dump order.
    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        self.index.get(name).map(|&i| &self.datasets[i])
    }

    pub fn root(&self) -> Option<&Dataset> {
        self.dataset(&self.name)
    }

    pub(crate) fn datasets_mut(&mut self) -> &mut [Dataset] {
        &mut self.datasets
    }

    pub(crate) fn add_dataset(&mut self, dataset: Dataset) -> ZinferResult<()> {
        if self.index.contains_key(&dataset.name) {
            return Err(ZinferError::DuplicateDataset {
                pool: self.name.clone(),
                dataset: dataset.name,
            });
        }
        self.index.insert(dataset.name.clone(), self.datasets.len());
        self.datasets.push(dataset);
        Ok(())
    }

    /// Ancestors of `name`, nearest first, ending at the pool root. Empty for the root.
    pub fn ancestors(&self, name: &str) -> ZinferResult<Vec<&Dataset>> {
        let mut out = Vec::new();
        let mut current = name;
        while let Some(parent) = parent_name(current) {
            let dataset = self
                .dataset(parent)
                .ok_or_else(|| ZinferError::AncestorNotFound {
                    ancestor: parent.to_string(),
                    dataset: name.to_string(),
                })?;
            out.push(dataset);
            current = parent;
        }
        Ok(out)
    }
}

impl Lineage for Pool {
    fn property(&self, dataset: &str, name: &str) -> Option<&Property> {
        self.dataset(dataset).and_then(|d| d.property(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::Source;
    use pretty_assertions::assert_eq;

    fn pool_with(names: &[&str]) -> Pool {
        let mut pool = Pool::new(names[0]).unwrap();
        for name in names {
            pool.add_dataset(Dataset::new(*name)).unwrap();
        }
        pool
    }

    #[test]
    fn descendant_requires_separator() {
        assert!(is_descendant("foo/foo/bar", "foo/foo"));
        assert!(!is_descendant("foo/foo/bar", "foo/bar"));
        assert!(!is_descendant("foobar", "foo"));
        assert!(!is_descendant("foo", "foo"));
    }

    #[test]
    fn parent_names() {
        assert_eq!(parent_name("tank/a/b"), Some("tank/a"));
        assert_eq!(parent_name("tank"), None);
    }

    #[test]
    fn pool_must_start_at_root() {
        assert_eq!(
            Pool::new("tank/home"),
            Err(ZinferError::FirstDatasetNotRoot("tank/home".to_string()))
        );
    }

    #[test]
    fn duplicate_dataset_rejected() {
        let mut pool = pool_with(&["tank", "tank/a"]);
        assert_eq!(
            pool.add_dataset(Dataset::new("tank/a")),
            Err(ZinferError::DuplicateDataset {
                pool: "tank".to_string(),
                dataset: "tank/a".to_string(),
            })
        );
        assert_eq!(pool.datasets().len(), 2);
        assert_eq!(pool.datasets()[0].name, pool.name);
    }

    #[test]
    fn ancestors_nearest_first() {
        let pool = pool_with(&["tank", "tank/a", "tank/a/b"]);
        let names: Vec<&str> = pool
            .ancestors("tank/a/b")
            .unwrap()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["tank/a", "tank"]);
        assert!(pool.ancestors("tank").unwrap().is_empty());
    }

    #[test]
    fn missing_ancestor_is_an_error() {
        let pool = pool_with(&["tank", "tank/a/b"]);
        assert_eq!(
            pool.ancestors("tank/a/b").unwrap_err(),
            ZinferError::AncestorNotFound {
                ancestor: "tank/a".to_string(),
                dataset: "tank/a/b".to_string(),
            }
        );
    }

    #[test]
    fn dash_encryption_root_means_unencrypted() {
        let mut pool = pool_with(&["tank"]);
        let mut child = Dataset::new("tank/a");
        child
            .insert(Property::new(ENCRYPTION_ROOT, "-", Source::ReadOnly))
            .unwrap();
        pool.add_dataset(child).unwrap();

        let child = pool.dataset("tank/a").unwrap();
        assert_eq!(child.encryption_root(&pool), None);
        assert!(!child.is_encrypted_child(&pool));
    }
}
