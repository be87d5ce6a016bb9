//! Execution wrapper for `zpool get all` / `zfs get all`.

use crate::Result;
use anyhow::{Context, bail};
use log::debug;
use std::path::Path;
use std::process::Command;

pub const DEFAULT_ZPOOL: &str = "zpool";
pub const DEFAULT_ZFS: &str = "zfs";

/// Pool properties of every imported pool.
pub fn zpool_get_all(binary: &Path) -> Result<String> {
    get_all(binary)
}

/// Properties of every dataset, snapshot included.
pub fn zfs_get_all(binary: &Path) -> Result<String> {
    get_all(binary)
}

fn get_all(binary: &Path) -> Result<String> {
    debug!("running {} get all", binary.display());
    let out = Command::new(binary)
        .args(["get", "all"])
        .output()
        .with_context(|| format!("run {} get all", binary.display()))?;

    if !out.status.success() {
        bail!(
            "{} get all failed ({}): {}",
            binary.display(),
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        );
    }
    String::from_utf8(out.stdout)
        .with_context(|| format!("{} get all printed invalid UTF-8", binary.display()))
}
