//! Choosing which create commands to print.

use crate::model::parent_name;
use crate::synth::CreateCommand;
use std::collections::{BTreeSet, HashSet};

/// Names requested on the command line. With no names, everything is selected.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    requested: BTreeSet<String>,
    prefixes: HashSet<String>,
    recursive: bool,
}

impl Selection {
    pub fn new(names: &[String], recursive: bool) -> Self {
        Self {
            requested: names.iter().cloned().collect(),
            prefixes: names.iter().cloned().collect(),
            recursive,
        }
    }

    /// Whether `name` should be printed. Must be called in dump order, since a
    /// recursively selected dataset makes its own children eligible.
    pub fn admits(&mut self, name: &str) -> bool {
        if self.prefixes.is_empty() {
            return true;
        }
        if self.requested.remove(name) {
            return true;
        }
        if self.recursive && parent_name(name).is_some_and(|p| self.prefixes.contains(p)) {
            self.prefixes.insert(name.to_string());
            return true;
        }
        false
    }

    pub fn filter(&mut self, commands: Vec<CreateCommand>) -> Vec<CreateCommand> {
        commands.into_iter().filter(|c| self.admits(&c.name)).collect()
    }

    /// Requested names that never matched a pool or dataset, sorted.
    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.requested.iter().map(String::as_str)
    }
}
