//! Fixed property classifications.
//!
//! Status properties are truly read-only counters and state; they are kept apart
//! from properties that merely report `-` because they can only be set at creation.

pub const STATUS_PROPERTIES: &[&str] = &[
    "type",
    "creation",
    "used",
    "available",
    "referenced",
    "rekeydate",
    "compressratio",
    "mounted",
    "origin",
    "version",
    "defer_destroy",
    "userrefs",
    "usedbysnapshots",
    "usedbydataset",
    "usedbychildren",
    "usedbyrefreservation",
    "refcompressratio",
    "written",
    "clones",
    "logicalused",
    "logicalreferenced",
    "encryptionroot",
    "keystatus",
    // pool-level
    "size",
    "capacity",
    "health",
    "dedupratio",
    "free",
    "allocated",
    "expandsize",
    "freeing",
    "fragmentation",
    "leaked",
    "checkpoint",
];

/// Properties that do not report as read-only but never belong in a create command.
pub const IGNORED_PROPERTIES: &[&str] = &[
    "readonly", // import-time only
];

pub const ENCRYPTION_ROOT: &str = "encryptionroot";

/// Properties inherited from the encryption root rather than the parent.
/// Overlaps with [`ENCRYPTION_LOCAL_PROPERTIES`].
pub const ENCRYPTION_INHERITED_PROPERTIES: &[&str] = &[
    "encryptionroot",
    "encryption",
    // reported as "none, default" on children, treated like the rest
    "keylocation",
    "keyformat",
    "pbkdf2iters",
    "keystatus",
];

/// Encryption properties a child may legitimately set differently from its root.
pub const ENCRYPTION_LOCAL_PROPERTIES: &[&str] = &["encryption"];

pub const FEATURE_PREFIX: &str = "feature@";

pub const FEATURE_DISABLED: &str = "disabled";
pub const FEATURE_ENABLED: &str = "enabled";
pub const FEATURE_ACTIVE: &str = "active";

pub fn is_status(name: &str) -> bool {
    STATUS_PROPERTIES.contains(&name)
}

pub fn is_ignored(name: &str) -> bool {
    IGNORED_PROPERTIES.contains(&name)
}

pub fn is_encryption_inherited(name: &str) -> bool {
    ENCRYPTION_INHERITED_PROPERTIES.contains(&name)
}

pub fn is_encryption_local(name: &str) -> bool {
    ENCRYPTION_LOCAL_PROPERTIES.contains(&name)
}
