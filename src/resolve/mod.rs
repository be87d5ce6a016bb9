//! Provenance resolution.
//!
//! `zfs get all` reports creation-time properties (`casesensitivity`,
//! `utf8only`, the encryption settings, ...) with source `-` on every dataset,
//! even when a child simply picked up its parent's value. Left alone, every such
//! property would turn into an explicit `-o` flag on every child.
//!
//! Two passes run per dataset, in dump order:
//!
//! 1. encryption: descendants of an encryption root take the root's encryption
//!    settings, except for the few that may legitimately differ;
//! 2. ancestors: a read-only property takes its value from the nearest ancestor
//!    that defines it, if the values agree. The nearest defining ancestor decides;
//!    more distant ones are never consulted.

use crate::error::{ZinferError, ZinferResult};
use crate::model::{Dataset, Pool, is_descendant};
use crate::props::tables::{ENCRYPTION_INHERITED_PROPERTIES, ENCRYPTION_ROOT, is_encryption_local};
use crate::props::Source;
use log::{debug, trace};

/// A pending provenance change: `property` becomes inherited from `parent`.
struct Rewrite {
    property: String,
    parent: String,
}

/// Resolve every dataset of `pool` in place. Running it again changes nothing.
pub fn resolve_pool(pool: &mut Pool) -> ZinferResult<()> {
    let mut rewritten = 0usize;

    for i in 0..pool.datasets().len() {
        let rewrites = encryption_rewrites(pool, &pool.datasets()[i])?;
        rewritten += apply(pool, i, rewrites);

        let rewrites = ancestor_rewrites(pool, &pool.datasets()[i])?;
        rewritten += apply(pool, i, rewrites);
    }

    debug!(
        "resolved pool {}: {} properties reclassified as inherited",
        pool.name, rewritten
    );
    Ok(())
}

fn apply(pool: &mut Pool, index: usize, rewrites: Vec<Rewrite>) -> usize {
    let dataset = &mut pool.datasets_mut()[index];
    let mut changed = 0;
    for rewrite in rewrites {
        let Some(prop) = dataset.property_mut(&rewrite.property) else {
            continue;
        };
        if prop.inherit_from(&rewrite.parent) {
            trace!(
                "{} {} now inherited from {}",
                dataset.name, rewrite.property, rewrite.parent
            );
            changed += 1;
        }
    }
    changed
}

fn encryption_rewrites(pool: &Pool, set: &Dataset) -> ZinferResult<Vec<Rewrite>> {
    let Some(root_name) = set.encryption_root(pool) else {
        return Ok(Vec::new());
    };
    if root_name == set.name {
        return Ok(Vec::new());
    }

    let root = pool
        .dataset(root_name)
        .ok_or_else(|| ZinferError::EncryptionRootNotFound {
            dataset: set.name.clone(),
            root: root_name.to_string(),
        })?;
    if root.encryption_root(pool) != Some(root_name) {
        let actual = root
            .property(ENCRYPTION_ROOT)
            .map(|p| p.effective_value(pool))
            .unwrap_or("-");
        return Err(ZinferError::NotSelfRooted {
            root: root_name.to_string(),
            dataset: set.name.clone(),
            actual: actual.to_string(),
        });
    }

    // Clones can be keyed off a root elsewhere in the tree; inferring
    // inheritance there would produce misleading create commands.
    if !is_descendant(&set.name, root_name) {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    for &name in ENCRYPTION_INHERITED_PROPERTIES {
        let missing = |dataset: &str| ZinferError::EncryptionPropertyMissing {
            dataset: dataset.to_string(),
            property: name.to_string(),
        };
        let root_prop = root.property(name).ok_or_else(|| missing(&root.name))?;
        let own_prop = set.property(name).ok_or_else(|| missing(&set.name))?;

        if is_encryption_local(name)
            && root_prop.effective_value(pool) != own_prop.effective_value(pool)
        {
            continue;
        }
        out.push(Rewrite {
            property: name.to_string(),
            parent: root.name.clone(),
        });
    }
    Ok(out)
}

fn ancestor_rewrites(pool: &Pool, set: &Dataset) -> ZinferResult<Vec<Rewrite>> {
    if set.is_root() {
        return Ok(Vec::new());
    }
    let ancestors = pool.ancestors(&set.name)?;

    let mut out = Vec::new();
    for prop in set.properties().values() {
        if *prop.source() != Source::ReadOnly || !prop.follows_parent() {
            continue;
        }
        let value = prop.effective_value(pool);
        let Some((ancestor, parent_prop)) = ancestors
            .iter()
            .find_map(|a| a.property(&prop.name).map(|p| (a, p)))
        else {
            continue;
        };
        if parent_prop.effective_value(pool) == value {
            out.push(Rewrite {
                property: prop.name.clone(),
                parent: ancestor.name.clone(),
            });
        }
    }
    Ok(out)
}
