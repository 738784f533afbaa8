//! The insertion-ordered triple set backing every persisted diagram.

use std::collections::HashMap;

use indexmap::IndexSet;

use brickdraw_core::identifier::Iri;

use crate::term::{BlankId, Term, Triple};

/// A set of triples with subject and predicate indexes.
///
/// Triples keep their insertion order, so exporting the same scene twice
/// yields the same document. Inserting a triple that is already present is
/// a no-op.
#[derive(Debug, Clone, Default)]
pub struct GraphDocument {
    triples: IndexSet<Triple>,
    by_subject: HashMap<Term, Vec<usize>>,
    by_predicate: HashMap<Iri, Vec<usize>>,
    next_blank: u32,
}

impl GraphDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of triples.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Allocates a blank node that is unique within this document.
    pub fn fresh_blank(&mut self) -> Term {
        let id = BlankId::new(self.next_blank);
        self.next_blank += 1;
        Term::Blank(id)
    }

    /// Inserts a triple, returning `false` if it was already present.
    pub fn insert(
        &mut self,
        subject: impl Into<Term>,
        predicate: Iri,
        object: impl Into<Term>,
    ) -> bool {
        let triple = Triple::new(subject, predicate, object);
        let subject = triple.subject().clone();
        let (idx, inserted) = self.triples.insert_full(triple);
        if inserted {
            self.by_subject.entry(subject).or_default().push(idx);
            self.by_predicate.entry(predicate).or_default().push(idx);
        }
        inserted
    }

    pub fn contains(&self, subject: &Term, predicate: Iri, object: &Term) -> bool {
        self.triples
            .contains(&Triple::new(subject.clone(), predicate, object.clone()))
    }

    /// Iterates over all triples in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Iterates over the triples whose subject is `subject`.
    pub fn about<'a>(&'a self, subject: &Term) -> impl Iterator<Item = &'a Triple> + use<'a> {
        self.indexed(self.by_subject.get(subject))
    }

    /// Iterates over the triples using `predicate`.
    pub fn with_predicate(&self, predicate: Iri) -> impl Iterator<Item = &Triple> {
        self.indexed(self.by_predicate.get(&predicate))
    }

    /// Iterates over the objects of `(subject, predicate, ?)`.
    pub fn objects<'a>(
        &'a self,
        subject: &Term,
        predicate: Iri,
    ) -> impl Iterator<Item = &'a Term> + use<'a> {
        self.about(subject)
            .filter(move |triple| triple.predicate() == predicate)
            .map(Triple::object)
    }

    /// Returns the first object of `(subject, predicate, ?)`, if any.
    pub fn object(&self, subject: &Term, predicate: Iri) -> Option<&Term> {
        self.objects(subject, predicate).next()
    }

    /// Iterates over the subjects of `(?, predicate, object)`.
    pub fn subjects<'a>(
        &'a self,
        predicate: Iri,
        object: &Term,
    ) -> impl Iterator<Item = &'a Term> + use<'a> {
        let object = object.clone();
        self.with_predicate(predicate)
            .filter(move |triple| *triple.object() == object)
            .map(Triple::subject)
    }

    fn indexed<'a>(
        &'a self,
        indices: Option<&'a Vec<usize>>,
    ) -> impl Iterator<Item = &'a Triple> + use<'a> {
        indices
            .into_iter()
            .flatten()
            .filter_map(|idx| self.triples.get_index(*idx))
    }
}
