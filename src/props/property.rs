use crate::props::tables::{
    self, FEATURE_PREFIX, is_encryption_inherited, is_ignored, is_status,
};

/// Where a property's value came from, as reported by the `SOURCE` column.
///
/// `Inherited` names the dataset whose property of the same name supplies the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Default,
    Local,
    Inherited { parent: String },
    ReadOnly,
    Temporary,
}

impl Source {
    pub fn is_inherited(&self) -> bool {
        matches!(self, Source::Inherited { .. })
    }

    /// Dataset an inherited value comes from.
    pub fn parent(&self) -> Option<&str> {
        match self {
            Source::Inherited { parent } => Some(parent.as_str()),
            _ => None,
        }
    }
}

/// Anything that can look up a dataset's property by name, so inherited values can be followed.
pub trait Lineage {
    fn property(&self, dataset: &str, name: &str) -> Option<&Property>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    raw_value: String,
    source: Source,
}

impl Property {
    pub fn new(name: impl Into<String>, raw_value: impl Into<String>, source: Source) -> Self {
        Self {
            name: name.into(),
            raw_value: raw_value.into(),
            source,
        }
    }

    /// Value as printed in the dump, before following any inheritance.
    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Value the property actually has. Inherited properties defer to the parent's
    /// property of the same name; parents always precede children, so the chain ends.
    pub fn effective_value<'a, L>(&'a self, lineage: &'a L) -> &'a str
    where
        L: Lineage + ?Sized,
    {
        match &self.source {
            Source::Inherited { parent } => match lineage.property(parent, &self.name) {
                Some(p) => p.effective_value(lineage),
                // Unreachable for parsed pools: inherited rows are checked
                // against their parent, and rewrites only point at ancestors
                // that define the property.
                None => {
                    debug_assert!(false, "{} inherited from missing {parent}", self.name);
                    self.raw_value.as_str()
                }
            },
            _ => &self.raw_value,
        }
    }

    /// Reclassify as inherited from `parent`. Returns false if it already was.
    /// There is no way back: an inherited property stays inherited.
    pub(crate) fn inherit_from(&mut self, parent: &str) -> bool {
        if self.source.parent() == Some(parent) {
            return false;
        }
        self.source = Source::Inherited {
            parent: parent.to_string(),
        };
        true
    }

    /// Status counters, session overrides and ignored properties never become flags.
    pub fn is_status_only(&self) -> bool {
        self.source == Source::Temporary || is_status(&self.name) || is_ignored(&self.name)
    }

    pub fn is_feature(&self) -> bool {
        self.name.starts_with(FEATURE_PREFIX)
    }

    /// Candidate for ordinary parent-to-child inheritance.
    pub fn follows_parent(&self) -> bool {
        !is_encryption_inherited(&self.name) && !self.is_status_only()
    }

    /// Value to place on a create command line, if any.
    ///
    /// Feature flags cannot be created "active", only "enabled"; with
    /// `minimal_features` the merely enabled ones are dropped.
    pub fn flag_value(&self, minimal_features: bool) -> Option<&str> {
        if self.is_status_only() || self.source == Source::Default || self.source.is_inherited() {
            return None;
        }
        let value = self.raw_value.as_str();
        if !self.is_feature() {
            return Some(value);
        }
        match value {
            tables::FEATURE_DISABLED => None,
            tables::FEATURE_ENABLED if minimal_features => None,
            tables::FEATURE_ACTIVE => Some(tables::FEATURE_ENABLED),
            _ => Some(value),
        }
    }
}
