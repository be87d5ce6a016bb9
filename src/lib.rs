//! Infer the `zpool create` / `zfs create` commands that reproduce a system's
//! current pools and datasets, from `zpool get all` and `zfs get all` output.
//!
//! The pipeline: [`dump::parse_dumps`] builds a [`ParsedForest`],
//! [`ParsedForest::resolve`] fixes up provenance, and [`synth::plan`] turns the
//! resolved [`Forest`] into argument lists.

pub mod command;
pub mod dump;
pub mod error;
pub mod model;
pub mod props;
pub mod render;
pub mod resolve;
pub mod select;
pub mod synth;

pub use error::{ZinferError, ZinferResult};
pub use model::{Dataset, Forest, ParsedForest, Pool};
pub use props::{Property, Source};
pub use synth::{CommandKind, CreateCommand, FlagOptions};

pub type Result<T> = anyhow::Result<T>;
