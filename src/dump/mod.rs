//! Parsing for `zpool get all` and `zfs get all` output.
//!
//! Both dumps share one layout:
//!
//! ```text
//! NAME         PROPERTY     VALUE       SOURCE
//! tank         compression  lz4         local
//! tank/home    compression  lz4         inherited from tank
//! ```

pub mod datasets;
pub mod pools;
pub mod row;

pub use datasets::{ParseOutcome, parse_datasets};
pub use pools::{PoolProperties, parse_pool_properties};
pub use row::{Row, RowReader, SourceTag};

use crate::error::ZinferResult;
use crate::model::ParsedForest;

/// Parse both dumps into a forest whose provenance is not yet resolved.
pub fn parse_dumps(zpool_text: &str, zfs_text: &str) -> ZinferResult<ParsedForest> {
    let pool_props = parse_pool_properties(zpool_text)?;
    parse_datasets(zfs_text, &pool_props)
}
