//! RDF terms and triples.

use std::fmt;

use brickdraw_core::{
    identifier::Iri,
    vocab::{XSD, term},
};

/// Document-local blank node identifier.
///
/// Blank nodes carry no identity outside the document that created them;
/// labels read from a file are remapped to fresh ids on parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankId(u32);

impl BlankId {
    pub(crate) fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns a Turtle-safe label for this blank node.
    pub fn label(self) -> String {
        format!("b{}", self.0)
    }
}

impl fmt::Display for BlankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:b{}", self.0)
    }
}

/// A literal value with its datatype and optional language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    lexical: String,
    datatype: Iri,
    language: Option<String>,
}

impl Literal {
    /// Creates a literal with an explicit datatype.
    pub fn typed(lexical: impl Into<String>, datatype: Iri) -> Self {
        Self {
            lexical: lexical.into(),
            datatype,
            language: None,
        }
    }

    /// Creates a language-tagged string.
    pub fn language(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: rdf_lang_string(),
            language: Some(language.into()),
        }
    }

    /// Creates an `xsd:string` literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::typed(value, XSD.iri(term::STRING))
    }

    /// Creates an `xsd:integer` literal.
    pub fn integer(value: i64) -> Self {
        Self::typed(value.to_string(), XSD.iri(term::INTEGER))
    }

    /// Creates an `xsd:double` literal.
    pub fn double(value: f64) -> Self {
        Self::typed(value.to_string(), XSD.iri(term::DOUBLE))
    }

    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    pub fn datatype(&self) -> Iri {
        self.datatype
    }

    pub fn language_tag(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Parses the lexical form as a number, whatever the declared datatype.
    pub fn as_f64(&self) -> Option<f64> {
        self.lexical.trim().parse().ok()
    }

    /// Parses the lexical form as an integer.
    ///
    /// Decimal forms such as `"2.0"` are accepted and rounded.
    pub fn as_i64(&self) -> Option<i64> {
        let lexical = self.lexical.trim();
        lexical
            .parse()
            .ok()
            .or_else(|| lexical.parse::<f64>().ok().map(|value| value.round() as i64))
    }
}

fn rdf_lang_string() -> Iri {
    Iri::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#langString")
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.lexical)?;
        match &self.language {
            Some(language) => write!(f, "@{language}"),
            None => write!(f, "^^<{}>", self.datatype),
        }
    }
}

/// An RDF term: IRI, blank node or literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Iri(Iri),
    Blank(BlankId),
    Literal(Literal),
}

impl Term {
    /// Shorthand for an IRI term.
    pub fn iri(iri: &str) -> Self {
        Self::Iri(Iri::new(iri))
    }

    pub fn as_iri(&self) -> Option<Iri> {
        match self {
            Self::Iri(iri) => Some(*iri),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank(_))
    }

    /// Returns the term as text: the IRI itself or the literal's lexical form.
    ///
    /// Blank nodes have no textual value.
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Iri(iri) => Some(iri.as_string()),
            Self::Literal(literal) => Some(literal.lexical().to_owned()),
            Self::Blank(_) => None,
        }
    }

    /// Returns the numeric value of a literal term.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_literal().and_then(Literal::as_f64)
    }

    /// Returns the integer value of a literal term.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_literal().and_then(Literal::as_i64)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::Blank(id) => write!(f, "{id}"),
            Self::Literal(literal) => write!(f, "{literal}"),
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Self::Iri(iri)
    }
}

impl From<BlankId> for Term {
    fn from(id: BlankId) -> Self {
        Self::Blank(id)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

/// A subject/predicate/object statement.
///
/// Predicates are always IRIs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    subject: Term,
    predicate: Iri,
    object: Term,
}

impl Triple {
    pub fn new(subject: impl Into<Term>, predicate: Iri, object: impl Into<Term>) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object: object.into(),
        }
    }

    pub fn subject(&self) -> &Term {
        &self.subject
    }

    pub fn predicate(&self) -> Iri {
        self.predicate
    }

    pub fn object(&self) -> &Term {
        &self.object
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}
