use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use regex::Regex;
use tracing::trace;

use crate::error::SettingsError;
use crate::model::{package_of, short_name};

/// Rule marking names that never need an import or qualification.
#[derive(Debug, Clone)]
pub enum IgnorePattern {
    /// Exactly this name, e.g. `int`.
    Exact(String),
    /// Direct members of a package, e.g. everything in `java.lang` but not
    /// `java.lang.reflect.Method`.
    Members(String),
    /// Names without any package, such as type variables.
    Unqualified,
    Regex(Regex),
}

impl IgnorePattern {
    pub fn exact(name: impl Into<String>) -> Self {
        IgnorePattern::Exact(name.into())
    }

    pub fn members(package: impl Into<String>) -> Self {
        IgnorePattern::Members(package.into())
    }

    pub fn regex(pattern: &str) -> Result<Self, SettingsError> {
        Regex::new(pattern)
            .map(IgnorePattern::Regex)
            .map_err(|source| SettingsError::Pattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            IgnorePattern::Exact(exact) => exact == name,
            IgnorePattern::Members(package) => package_of(name) == Some(package.as_str()),
            IgnorePattern::Unqualified => !name.contains('.'),
            IgnorePattern::Regex(regex) => regex.is_match(name),
        }
    }
}

/// Session state deciding which type names the current file can use
/// unqualified.
///
/// Names are only ever added. The ignore set is fixed at construction and
/// shared cheaply between managers built from the same patterns.
#[derive(Debug, Clone)]
pub struct DependencyManager {
    ignored: Arc<[IgnorePattern]>,
    loaded: BTreeSet<String>,
    // short name -> the qualified name that owns it in this file
    claims: HashMap<String, String>,
    current_package: Option<String>,
}

impl DependencyManager {
    pub fn new(ignored: impl IntoIterator<Item = IgnorePattern>) -> Self {
        Self {
            ignored: ignored.into_iter().collect(),
            loaded: BTreeSet::new(),
            claims: HashMap::new(),
            current_package: None,
        }
    }

    /// A fresh manager with the same ignore patterns and no other state.
    pub fn fresh(&self) -> Self {
        Self {
            ignored: Arc::clone(&self.ignored),
            loaded: BTreeSet::new(),
            claims: HashMap::new(),
            current_package: None,
        }
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.iter().any(|pattern| pattern.matches(name))
    }

    /// Records first-time use of `name`. Returns `true` only the first time.
    pub fn load(&mut self, name: &str) -> bool {
        let added = self.loaded.insert(name.to_string());
        if added {
            trace!(name, "loaded dependency");
            self.claims
                .entry(short_name(name).to_string())
                .or_insert_with(|| name.to_string());
        }
        added
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains(name)
    }

    /// Loaded names in sorted order.
    pub fn loaded(&self) -> impl Iterator<Item = &str> {
        self.loaded.iter().map(String::as_str)
    }

    /// Claims the short name of a type declared in the current file, so a
    /// foreign type with the same short name is never imported.
    pub fn reserve(&mut self, name: &str) {
        self.claims
            .entry(short_name(name).to_string())
            .or_insert_with(|| name.to_string());
    }

    /// Whether the short name of `name` already belongs to another type.
    pub fn conflicts(&self, name: &str) -> bool {
        self.claims
            .get(short_name(name))
            .is_some_and(|owner| owner != name)
    }

    /// Sets the package of the file being rendered. Fails while another
    /// package is set.
    pub fn set_current_package(&mut self, package: &str) -> bool {
        if self.current_package.is_some() {
            return false;
        }
        self.current_package = Some(package.to_string());
        true
    }

    /// Clears the current package if it is `package`.
    pub fn unset_current_package(&mut self, package: &str) -> bool {
        if self.current_package.as_deref() == Some(package) {
            self.current_package = None;
            true
        } else {
            false
        }
    }

    pub fn current_package(&self) -> Option<&str> {
        self.current_package.as_deref()
    }

    pub fn is_same_package(&self, name: &str) -> bool {
        match (self.current_package(), package_of(name)) {
            (Some(current), Some(package)) => current == package,
            _ => false,
        }
    }
}

impl Default for DependencyManager {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
