//! Error type shared by the dump parser, the resolver and the synthesizer.

use thiserror::Error;

pub type ZinferResult<T> = Result<T, ZinferError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZinferError {
    #[error("invalid row pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("unexpected header: {0}")]
    UnexpectedHeader(String),

    #[error("unparseable input at line {line}: {text}")]
    Unparseable { line: usize, text: String },

    #[error("duplicate zpool found: {0}")]
    DuplicatePool(String),

    #[error("missing pool properties: {0}")]
    MissingPoolProperties(String),

    #[error("first dataset in pool is not root: {0}")]
    FirstDatasetNotRoot(String),

    #[error("{pool} already contains a dataset named {dataset}")]
    DuplicateDataset { pool: String, dataset: String },

    #[error("{entity} lists property {property} more than once")]
    DuplicateProperty { entity: String, property: String },

    #[error("{entity} property source for {property} is invalid: {source_tag}")]
    InvalidSource {
        entity: String,
        property: String,
        source_tag: String,
    },

    #[error("{dataset} property {property} expected to be readonly")]
    ExpectedReadonly { dataset: String, property: String },

    #[error("{dataset} parent {parent} not found")]
    ParentNotFound { dataset: String, parent: String },

    #[error("{dataset} parent {parent} does not contain property {property}")]
    ParentMissingProperty {
        dataset: String,
        parent: String,
        property: String,
    },

    #[error(
        "{dataset} inherited property {property} does not match value on parent {parent}: {value} != {expected}"
    )]
    InheritedMismatch {
        dataset: String,
        property: String,
        parent: String,
        value: String,
        expected: String,
    },

    #[error("{dataset} encryptionroot {root} not found")]
    EncryptionRootNotFound { dataset: String, root: String },

    #[error("encryptionroot {root} of child {dataset} is not self-rooted: {actual} != {root}")]
    NotSelfRooted {
        root: String,
        dataset: String,
        actual: String,
    },

    #[error("encrypted dataset {dataset} is missing property: {property}")]
    EncryptionPropertyMissing { dataset: String, property: String },

    #[error("unable to locate ancestor {ancestor} of {dataset}")]
    AncestorNotFound { ancestor: String, dataset: String },

    #[error("missing root dataset: {0}")]
    MissingRootDataset(String),

    #[error("dataset {dataset} not found in pool {pool}")]
    DatasetNotFound { pool: String, dataset: String },
}
