//! IRI management using string interning for cheap copies and comparisons
//!
//! Every entity instance, entity type, relationship and predicate in a
//! Brickdraw diagram is named by an IRI. IRIs are compared and hashed far
//! more often than they are printed, so this module interns them once and
//! hands out a `Copy` symbol, the [`Iri`] type.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner backing every [`Iri`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Interned absolute IRI.
///
/// # Examples
///
/// ```
/// use brickdraw_core::identifier::Iri;
///
/// let valve = Iri::new("https://brickschema.org/schema/Brick#Valve");
/// assert_eq!(valve.local_name(), "Valve");
/// assert_eq!(valve.namespace(), "https://brickschema.org/schema/Brick#");
/// assert_eq!(valve, "https://brickschema.org/schema/Brick#Valve");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Iri(DefaultSymbol);

impl Iri {
    /// Interns `iri` and returns its handle.
    pub fn new(iri: &str) -> Self {
        Self(interner().get_or_intern(iri))
    }

    /// Interns the concatenation of a namespace and a local name.
    pub fn from_parts(namespace: &str, local_name: &str) -> Self {
        Self::new(&format!("{namespace}{local_name}"))
    }

    /// Returns an owned copy of the IRI text.
    pub fn as_string(&self) -> String {
        self.with_str(str::to_owned)
    }

    /// Runs `f` against the interned text without allocating.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        f(interner.resolve(self.0).unwrap_or_default())
    }

    /// Returns the fragment after the last `#` or `/`.
    ///
    /// IRIs without a separator are returned whole.
    pub fn local_name(&self) -> String {
        self.with_str(|iri| iri[split_index(iri)..].to_owned())
    }

    /// Returns everything up to and including the last `#` or `/`.
    pub fn namespace(&self) -> String {
        self.with_str(|iri| iri[..split_index(iri)].to_owned())
    }

    /// Returns true if the IRI text starts with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.with_str(|iri| iri.starts_with(prefix))
    }
}

fn split_index(iri: &str) -> usize {
    iri.rfind(['#', '/']).map_or(0, |idx| idx + 1)
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|iri| f.write_str(iri))
    }
}

impl From<&str> for Iri {
    fn from(iri: &str) -> Self {
        Self::new(iri)
    }
}

impl PartialEq<str> for Iri {
    /// Allows direct comparison with string slices: `iri == "https://..."`
    fn eq(&self, other: &str) -> bool {
        self.with_str(|iri| iri == other)
    }
}

impl PartialEq<&str> for Iri {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
