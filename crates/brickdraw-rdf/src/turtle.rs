//! Turtle parsing and serialization backed by sophia.

use std::collections::HashMap;

use log::{debug, trace};
use sophia::{
    api::{
        prefix::{Prefix, PrefixMapPair},
        prelude::*,
        serializer::{Stringifier, TripleSerializer},
        term::{BnodeId, LanguageTag, SimpleTerm},
    },
    iri::{Iri as SophiaIri, IriRef},
    turtle::{
        parser::turtle,
        serializer::turtle::{TurtleConfig, TurtleSerializer},
    },
};

use brickdraw_core::{identifier::Iri, vocab::Namespace};

use crate::{
    document::GraphDocument,
    error::RdfError,
    term::{Literal, Term, Triple},
};

type SophiaTriple = [SimpleTerm<'static>; 3];

/// Parses a Turtle document.
///
/// Blank node labels are remapped to document-local ids. The whole text is
/// parsed before anything is returned, so a syntax error never yields a
/// partial document.
///
/// # Errors
///
/// Returns [`RdfError::Turtle`] on syntax errors and
/// [`RdfError::UnsupportedTerm`] for RDF-star triples, variables or
/// non-IRI predicates.
pub fn parse_turtle(text: &str) -> Result<GraphDocument, RdfError> {
    let parsed: Vec<SophiaTriple> = turtle::parse_str(text)
        .collect_triples()
        .map_err(|err| RdfError::Turtle(err.to_string()))?;

    let mut doc = GraphDocument::new();
    let mut blanks: HashMap<String, Term> = HashMap::new();
    for [subject, predicate, object] in &parsed {
        let subject = from_sophia(subject, "subject", &mut blanks, &mut doc)?;
        let predicate = match predicate {
            SimpleTerm::Iri(iri) => Iri::new(iri.as_str()),
            other => {
                return Err(RdfError::UnsupportedTerm {
                    position: "predicate",
                    term: format!("{other:?}"),
                });
            }
        };
        let object = from_sophia(object, "object", &mut blanks, &mut doc)?;
        doc.insert(subject, predicate, object);
    }

    debug!(triples = doc.len(); "Parsed Turtle document");
    Ok(doc)
}

/// Serializes a document as pretty-printed Turtle.
///
/// Every namespace in `namespaces` is declared as a prefix, whether it is
/// used or not.
///
/// # Errors
///
/// Returns [`RdfError::Serialize`] if the serializer fails.
pub fn write_turtle(doc: &GraphDocument, namespaces: &[Namespace]) -> Result<String, RdfError> {
    let graph: Vec<SophiaTriple> = doc.iter().map(to_sophia).collect();

    let prefixes: Vec<PrefixMapPair> = namespaces
        .iter()
        .map(|ns| {
            (
                Prefix::new_unchecked(ns.prefix().into()),
                SophiaIri::new_unchecked(ns.base().into()),
            )
        })
        .collect();
    let config = TurtleConfig::new()
        .with_pretty(true)
        .with_own_prefix_map(prefixes);

    let mut serializer = TurtleSerializer::new_stringifier_with_config(config);
    serializer
        .serialize_graph(&graph)
        .map_err(|err| RdfError::Serialize(err.to_string()))?;

    trace!(triples = graph.len(); "Serialized Turtle document");
    Ok(serializer.as_str().to_owned())
}

fn from_sophia(
    term: &SimpleTerm<'_>,
    position: &'static str,
    blanks: &mut HashMap<String, Term>,
    doc: &mut GraphDocument,
) -> Result<Term, RdfError> {
    match term {
        SimpleTerm::Iri(iri) => Ok(Term::Iri(Iri::new(iri.as_str()))),
        SimpleTerm::BlankNode(id) => Ok(blanks
            .entry(id.as_str().to_owned())
            .or_insert_with(|| doc.fresh_blank())
            .clone()),
        SimpleTerm::LiteralDatatype(lexical, datatype) => {
            let lexical: &str = lexical;
            Ok(Term::Literal(Literal::typed(
                lexical,
                Iri::new(datatype.as_str()),
            )))
        }
        SimpleTerm::LiteralLanguage(lexical, tag) => {
            let lexical: &str = lexical;
            Ok(Term::Literal(Literal::language(lexical, tag.as_str())))
        }
        other => Err(RdfError::UnsupportedTerm {
            position,
            term: format!("{other:?}"),
        }),
    }
}

fn to_sophia(triple: &Triple) -> SophiaTriple {
    [
        term_to_sophia(triple.subject()),
        iri_to_sophia(triple.predicate()),
        term_to_sophia(triple.object()),
    ]
}

fn iri_to_sophia(iri: Iri) -> SimpleTerm<'static> {
    SimpleTerm::Iri(IriRef::new_unchecked(iri.as_string().into()))
}

fn term_to_sophia(term: &Term) -> SimpleTerm<'static> {
    match term {
        Term::Iri(iri) => iri_to_sophia(*iri),
        Term::Blank(id) => SimpleTerm::BlankNode(BnodeId::new_unchecked(id.label().into())),
        Term::Literal(literal) => match literal.language_tag() {
            Some(tag) => SimpleTerm::LiteralLanguage(
                literal.lexical().to_owned().into(),
                LanguageTag::new_unchecked(tag.to_owned().into()),
            ),
            None => SimpleTerm::LiteralDatatype(
                literal.lexical().to_owned().into(),
                IriRef::new_unchecked(literal.datatype().as_string().into()),
            ),
        },
    }
}
