//! Create-command synthesis for resolved pools and datasets.
//!
//! Commands are flat argument lists, e.g.
//! `["zfs", "create", "-o", "compression=lz4", "tank/home"]`; quoting them for
//! a shell is left to the caller.

use crate::error::{ZinferError, ZinferResult};
use crate::model::{Dataset, Forest, Pool};
use crate::props::tables::{is_encryption_inherited, is_encryption_local};
use crate::props::Property;
use serde::Serialize;

/// Flag letter for pool properties on `zpool create`.
pub const POOL_PROPERTY_FLAG: &str = "-o";
/// Flag letter for root dataset properties on `zpool create`.
pub const ROOT_DATASET_FLAG: &str = "-O";
/// Flag letter for dataset properties on `zfs create`.
pub const DATASET_PROPERTY_FLAG: &str = "-o";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagOptions {
    /// Omit pool features that are enabled but not active.
    pub minimal_features: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Pool,
    Dataset,
}

/// One create command, named after the pool or dataset it creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCommand {
    pub name: String,
    pub kind: CommandKind,
    pub argv: Vec<String>,
}

/// `zpool create -d`, the pool's own flags, the root dataset's flags, the pool name.
///
/// `-d` keeps every feature disabled unless named explicitly, so the
/// feature flags on the command line are the whole story.
pub fn pool_command(pool: &Pool, opts: &FlagOptions) -> ZinferResult<Vec<String>> {
    let root = pool
        .root()
        .ok_or_else(|| ZinferError::MissingRootDataset(pool.name.clone()))?;

    let mut argv = vec!["zpool".to_string(), "create".to_string(), "-d".to_string()];
    argv.extend(property_flags(
        pool.properties().values(),
        POOL_PROPERTY_FLAG,
        opts,
    ));
    argv.extend(dataset_flags(pool, root, ROOT_DATASET_FLAG));
    argv.push(pool.name.clone());
    Ok(argv)
}

/// `zfs create`, the dataset's flags, the dataset name.
pub fn dataset_command(pool: &Pool, name: &str) -> ZinferResult<Vec<String>> {
    let dataset = pool
        .dataset(name)
        .ok_or_else(|| ZinferError::DatasetNotFound {
            pool: pool.name.clone(),
            dataset: name.to_string(),
        })?;

    let mut argv = vec!["zfs".to_string(), "create".to_string()];
    argv.extend(dataset_flags(pool, dataset, DATASET_PROPERTY_FLAG));
    argv.push(dataset.name.clone());
    Ok(argv)
}

/// Every command for the forest: per pool (sorted by name), the pool command and
/// then one command per non-root dataset in dump order.
pub fn plan(forest: &Forest, opts: &FlagOptions) -> ZinferResult<Vec<CreateCommand>> {
    let mut out = Vec::new();
    for pool in forest.pools() {
        out.push(CreateCommand {
            name: pool.name.clone(),
            kind: CommandKind::Pool,
            argv: pool_command(pool, opts)?,
        });
        for dataset in pool.datasets().iter().skip(1) {
            out.push(CreateCommand {
                name: dataset.name.clone(),
                kind: CommandKind::Dataset,
                argv: dataset_command(pool, &dataset.name)?,
            });
        }
    }
    Ok(out)
}

/// Dataset flags, minus encryption settings an encrypted child gets from its root.
fn dataset_flags(pool: &Pool, dataset: &Dataset, flag: &str) -> Vec<String> {
    let encrypted_child = dataset.is_encrypted_child(pool);
    let props = dataset.properties().values().filter(|p| {
        !encrypted_child || !is_encryption_inherited(&p.name) || is_encryption_local(&p.name)
    });
    property_flags(props, flag, &FlagOptions::default())
}

/// Flag pairs for properties that have to be set explicitly. Callers pass
/// properties in name order (they come from BTreeMaps).
fn property_flags<'a>(
    props: impl Iterator<Item = &'a Property>,
    flag: &str,
    opts: &FlagOptions,
) -> Vec<String> {
    props
        .filter_map(|p| {
            p.flag_value(opts.minimal_features)
                .map(|value| [flag.to_string(), format!("{}={}", p.name, value)])
        })
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump::parse_dumps;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "NAME  PROPERTY  VALUE  SOURCE\n";

    fn forest(pools: &str, datasets: &str) -> Forest {
        parse_dumps(&format!("{HEADER}{pools}"), &format!("{HEADER}{datasets}"))
            .unwrap()
            .resolve()
            .unwrap()
    }

    fn joined(argv: Vec<String>) -> String {
        argv.join(" ")
    }

    #[test]
    fn pool_command_orders_pool_then_root_flags() {
        let forest = forest(
            "tank  feature@lz4_compress  active   local
tank  ashift               12       local
tank  autotrim             off      default
tank  size                 1T       -",
            "tank  compression  lz4   local
tank  atime        on    default
tank  utf8only     on    -
tank  used         1G    -",
        );
        let pool = forest.pool("tank").unwrap();
        assert_eq!(
            joined(pool_command(pool, &FlagOptions::default()).unwrap()),
            "zpool create -d -o ashift=12 -o feature@lz4_compress=enabled -O compression=lz4 -O utf8only=on tank"
        );
    }

    #[test]
    fn minimal_features_drop_enabled_only() {
        let forest = forest(
            "tank  feature@a  active    local
tank  feature@d  disabled  local
tank  feature@e  enabled   local",
            "tank  atime  on  default",
        );
        let pool = forest.pool("tank").unwrap();
        assert_eq!(
            joined(pool_command(pool, &FlagOptions::default()).unwrap()),
            "zpool create -d -o feature@a=enabled -o feature@e=enabled tank"
        );
        assert_eq!(
            joined(
                pool_command(
                    pool,
                    &FlagOptions {
                        minimal_features: true
                    }
                )
                .unwrap()
            ),
            "zpool create -d -o feature@a=enabled tank"
        );
    }

    #[test]
    fn dataset_command_skips_inherited_and_status() {
        let forest = forest(
            "tank  ashift  12  local",
            "tank      compression  lz4   local
tank/a    compression  lz4   inherited from tank
tank/a    recordsize   1M    local
tank/a    readonly     on    temporary
tank/a    mounted      yes   -",
        );
        let pool = forest.pool("tank").unwrap();
        assert_eq!(
            joined(dataset_command(pool, "tank/a").unwrap()),
            "zfs create -o recordsize=1M tank/a"
        );
        assert_eq!(
            dataset_command(pool, "tank/missing").unwrap_err().to_string(),
            "dataset tank/missing not found in pool tank"
        );
    }

    #[test]
    fn plan_lists_pools_then_datasets() {
        let forest = forest(
            "b  ashift  12  local
a  ashift  9   local",
            "b    atime  on  default
b/x  atime  on  default
a    atime  on  default",
        );
        let plan = plan(&forest, &FlagOptions::default()).unwrap();
        let summary: Vec<(&str, CommandKind)> =
            plan.iter().map(|c| (c.name.as_str(), c.kind)).collect();
        assert_eq!(
            summary,
            vec![
                ("a", CommandKind::Pool),
                ("b", CommandKind::Pool),
                ("b/x", CommandKind::Dataset),
            ]
        );
        assert_eq!(joined(plan[2].argv.clone()), "zfs create b/x");
    }
}
