//! The two generations of a parsed dump.
//!
//! `ParsedForest` is what the dump parser produces; its provenance tags are still
//! raw. Only `resolve` turns it into a `Forest`, so nothing downstream can observe
//! half-resolved inheritance.

use crate::error::ZinferResult;
use crate::model::Pool;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct ParsedForest {
    pub(crate) pools: BTreeMap<String, Pool>,
}

impl ParsedForest {
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Fix up provenance tags across every pool. See [`crate::resolve`].
    pub fn resolve(mut self) -> ZinferResult<Forest> {
        for pool in self.pools.values_mut() {
            crate::resolve::resolve_pool(pool)?;
        }
        Ok(Forest { pools: self.pools })
    }
}

/// Pools with fully resolved provenance, keyed and iterated by name.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    pools: BTreeMap<String, Pool>,
}

impl Forest {
    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.pools.values()
    }

    pub fn pool(&self, name: &str) -> Option<&Pool> {
        self.pools.get(name)
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
