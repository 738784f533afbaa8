//! External data-source references carried by Point entities.
//!
//! A Point holds at most one [`ExternalReference`]: either a BACnet
//! reference, encoded as structured object fields or as a single
//! `bacnet://` URI, or a timeseries reference. Empty strings are never
//! stored; setting a field to `""` clears it.

use thiserror::Error;

use brickdraw_core::{
    identifier::Iri,
    vocab::{self, BACNET, REF, term},
};
use brickdraw_rdf::{GraphDocument, Literal, Term};

/// The discriminant of a reference record, including "no record".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    None,
    Bacnet,
    Timeseries,
}

/// The two mutually exclusive BACnet encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BacnetEncodingKind {
    Fields,
    Uri,
}

/// An editable field of a reference record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceField {
    ObjectIdentifier,
    ObjectName,
    ObjectType,
    Description,
    ReadProperty,
    ObjectOf,
    BacnetUri,
    TimeseriesId,
    StoredAt,
}

impl ReferenceField {
    const ALL: [ReferenceField; 9] = [
        Self::ObjectIdentifier,
        Self::ObjectName,
        Self::ObjectType,
        Self::Description,
        Self::ReadProperty,
        Self::ObjectOf,
        Self::BacnetUri,
        Self::TimeseriesId,
        Self::StoredAt,
    ];

    /// Returns the predicate this field is persisted under.
    pub fn predicate(self) -> Iri {
        match self {
            Self::ObjectIdentifier => BACNET.iri(term::OBJECT_IDENTIFIER),
            Self::ObjectName => BACNET.iri(term::OBJECT_NAME),
            Self::ObjectType => BACNET.iri(term::OBJECT_TYPE),
            Self::Description => BACNET.iri(term::DESCRIPTION),
            Self::ReadProperty => BACNET.iri(term::READ_PROPERTY),
            Self::ObjectOf => BACNET.iri(term::OBJECT_OF),
            Self::BacnetUri => REF.iri(term::BACNET_URI),
            Self::TimeseriesId => REF.iri(term::HAS_TIMESERIES_ID),
            Self::StoredAt => REF.iri(term::STORED_AT),
        }
    }

    fn is_bacnet_field(self) -> bool {
        matches!(
            self,
            Self::ObjectIdentifier
                | Self::ObjectName
                | Self::ObjectType
                | Self::Description
                | Self::ReadProperty
        )
    }
}

/// Structured BACnet object fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BacnetFields {
    object_identifier: Option<String>,
    object_name: Option<String>,
    object_type: Option<String>,
    description: Option<String>,
    read_property: Option<String>,
}

/// How a BACnet reference addresses its object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BacnetEncoding {
    Fields(BacnetFields),
    Uri(Option<String>),
}

impl BacnetEncoding {
    pub fn kind(&self) -> BacnetEncodingKind {
        match self {
            Self::Fields(_) => BacnetEncodingKind::Fields,
            Self::Uri(_) => BacnetEncodingKind::Uri,
        }
    }
}

/// A reference to an external data source.
///
/// # Examples
///
/// ```
/// use brickdraw::reference::{ExternalReference, ReferenceField, ReferenceKind};
///
/// let mut reference = ExternalReference::new(ReferenceKind::Timeseries).unwrap();
/// reference.set_field(ReferenceField::TimeseriesId, "ts-42").unwrap();
/// reference.set_field(ReferenceField::StoredAt, "").unwrap();
///
/// assert_eq!(reference.field(ReferenceField::TimeseriesId), Some("ts-42"));
/// assert_eq!(reference.field(ReferenceField::StoredAt), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalReference {
    Bacnet {
        encoding: BacnetEncoding,
        object_of: Option<String>,
    },
    Timeseries {
        timeseries_id: Option<String>,
        stored_at: Option<String>,
    },
}

/// Problems that make a reference record incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("a BACnet object identifier is required")]
    MissingObjectIdentifier,

    #[error("a BACnet URI starting with `bacnet://` is required")]
    InvalidBacnetUri,

    #[error("a timeseries id is required")]
    MissingTimeseriesId,

    #[error("field {0:?} does not apply to this reference")]
    FieldNotApplicable(ReferenceField),

    #[error("only Point entities carry external references")]
    NotAPoint,
}

impl ExternalReference {
    /// Creates an empty record of the given kind.
    ///
    /// BACnet records start with the structured-fields encoding. Returns
    /// `None` for [`ReferenceKind::None`].
    pub fn new(kind: ReferenceKind) -> Option<Self> {
        match kind {
            ReferenceKind::None => None,
            ReferenceKind::Bacnet => Some(Self::Bacnet {
                encoding: BacnetEncoding::Fields(BacnetFields::default()),
                object_of: None,
            }),
            ReferenceKind::Timeseries => Some(Self::Timeseries {
                timeseries_id: None,
                stored_at: None,
            }),
        }
    }

    pub fn kind(&self) -> ReferenceKind {
        match self {
            Self::Bacnet { .. } => ReferenceKind::Bacnet,
            Self::Timeseries { .. } => ReferenceKind::Timeseries,
        }
    }

    /// Returns the BACnet encoding, if this is a BACnet reference.
    pub fn bacnet_encoding(&self) -> Option<BacnetEncodingKind> {
        match self {
            Self::Bacnet { encoding, .. } => Some(encoding.kind()),
            Self::Timeseries { .. } => None,
        }
    }

    /// Switches the BACnet encoding, discarding the fields of the old one.
    ///
    /// Returns `false` for timeseries references. The device link
    /// (`objectOf`) is shared by both encodings and kept.
    pub fn set_bacnet_encoding(&mut self, kind: BacnetEncodingKind) -> bool {
        let Self::Bacnet { encoding, .. } = self else {
            return false;
        };
        if encoding.kind() != kind {
            *encoding = match kind {
                BacnetEncodingKind::Fields => BacnetEncoding::Fields(BacnetFields::default()),
                BacnetEncodingKind::Uri => BacnetEncoding::Uri(None),
            };
        }
        true
    }

    /// Returns a field's value, or `None` if it is absent or not applicable.
    pub fn field(&self, field: ReferenceField) -> Option<&str> {
        self.slot(field).and_then(|slot| slot.as_deref())
    }

    /// Writes a field. Empty and whitespace-only values clear it.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::FieldNotApplicable`] if the field belongs to
    /// another kind or to the other BACnet encoding.
    pub fn set_field(
        &mut self,
        field: ReferenceField,
        value: &str,
    ) -> Result<(), ReferenceError> {
        let slot = self
            .slot_mut(field)
            .ok_or(ReferenceError::FieldNotApplicable(field))?;
        let value = value.trim();
        *slot = (!value.is_empty()).then(|| value.to_string());
        Ok(())
    }

    /// Iterates over the fields that currently hold a value.
    pub fn present_fields(&self) -> impl Iterator<Item = (ReferenceField, &str)> {
        ReferenceField::ALL
            .into_iter()
            .filter_map(|field| self.field(field).map(|value| (field, value)))
    }

    /// Checks that the fields required by the record's kind are set.
    ///
    /// # Errors
    ///
    /// Returns the first missing or malformed required field.
    pub fn validate(&self) -> Result<(), ReferenceError> {
        match self {
            Self::Bacnet {
                encoding: BacnetEncoding::Fields(fields),
                ..
            } if fields.object_identifier.is_some() => Ok(()),
            Self::Bacnet {
                encoding: BacnetEncoding::Fields(_),
                ..
            } => Err(ReferenceError::MissingObjectIdentifier),
            Self::Bacnet {
                encoding: BacnetEncoding::Uri(uri),
                ..
            } => match uri {
                Some(uri) if uri.starts_with("bacnet://") => Ok(()),
                _ => Err(ReferenceError::InvalidBacnetUri),
            },
            Self::Timeseries {
                timeseries_id: Some(_),
                ..
            } => Ok(()),
            Self::Timeseries { .. } => Err(ReferenceError::MissingTimeseriesId),
        }
    }

    /// Writes this record as a typed blank node linked from `subject`.
    pub fn write(&self, doc: &mut GraphDocument, subject: &Term) {
        let node = doc.fresh_blank();
        doc.insert(
            subject.clone(),
            REF.iri(term::HAS_EXTERNAL_REFERENCE),
            node.clone(),
        );
        let type_name = match self.kind() {
            ReferenceKind::Timeseries => term::TIMESERIES_REFERENCE,
            _ => term::BACNET_REFERENCE,
        };
        doc.insert(node.clone(), vocab::rdf_type(), REF.iri(type_name));
        for (field, value) in self.present_fields() {
            doc.insert(node.clone(), field.predicate(), Literal::string(value));
        }
    }

    /// Reconstructs a record from the reference node `node`.
    ///
    /// The kind comes from the node's `rdf:type` when present, otherwise it
    /// is inferred from the predicates found: a BACnet URI wins over
    /// structured fields. Returns `None` when the kind cannot be determined.
    pub fn read(doc: &GraphDocument, node: &Term) -> Option<Self> {
        let value = |field: ReferenceField| -> Option<String> {
            doc.object(node, field.predicate())
                .and_then(Term::text)
                .filter(|text| !text.trim().is_empty())
        };

        let explicit = doc.objects(node, vocab::rdf_type()).find_map(|ty| {
            let ty = ty.as_iri()?;
            if ty == REF.iri(term::BACNET_REFERENCE) {
                Some(ReferenceKind::Bacnet)
            } else if ty == REF.iri(term::TIMESERIES_REFERENCE) {
                Some(ReferenceKind::Timeseries)
            } else {
                None
            }
        });
        let has_uri = value(ReferenceField::BacnetUri).is_some();
        let has_fields = ReferenceField::ALL
            .into_iter()
            .filter(|field| field.is_bacnet_field())
            .any(|field| value(field).is_some());

        let kind = match explicit {
            Some(kind) => kind,
            None if has_uri || has_fields => ReferenceKind::Bacnet,
            None if value(ReferenceField::TimeseriesId).is_some()
                || value(ReferenceField::StoredAt).is_some() =>
            {
                ReferenceKind::Timeseries
            }
            None => return None,
        };

        let mut record = Self::new(kind)?;
        if kind == ReferenceKind::Bacnet && has_uri {
            record.set_bacnet_encoding(BacnetEncodingKind::Uri);
        }
        for field in ReferenceField::ALL {
            if let Some(text) = value(field) {
                // Fields of the unused encoding are dropped.
                let _ = record.set_field(field, &text);
            }
        }
        Some(record)
    }

    fn slot(&self, field: ReferenceField) -> Option<&Option<String>> {
        match (self, field) {
            (Self::Bacnet { object_of, .. }, ReferenceField::ObjectOf) => Some(object_of),
            (
                Self::Bacnet {
                    encoding: BacnetEncoding::Uri(uri),
                    ..
                },
                ReferenceField::BacnetUri,
            ) => Some(uri),
            (
                Self::Bacnet {
                    encoding: BacnetEncoding::Fields(fields),
                    ..
                },
                field,
            ) => fields.slot(field),
            (Self::Timeseries { timeseries_id, .. }, ReferenceField::TimeseriesId) => {
                Some(timeseries_id)
            }
            (Self::Timeseries { stored_at, .. }, ReferenceField::StoredAt) => Some(stored_at),
            _ => None,
        }
    }

    fn slot_mut(&mut self, field: ReferenceField) -> Option<&mut Option<String>> {
        match (self, field) {
            (Self::Bacnet { object_of, .. }, ReferenceField::ObjectOf) => Some(object_of),
            (
                Self::Bacnet {
                    encoding: BacnetEncoding::Uri(uri),
                    ..
                },
                ReferenceField::BacnetUri,
            ) => Some(uri),
            (
                Self::Bacnet {
                    encoding: BacnetEncoding::Fields(fields),
                    ..
                },
                field,
            ) => fields.slot_mut(field),
            (Self::Timeseries { timeseries_id, .. }, ReferenceField::TimeseriesId) => {
                Some(timeseries_id)
            }
            (Self::Timeseries { stored_at, .. }, ReferenceField::StoredAt) => Some(stored_at),
            _ => None,
        }
    }
}

impl BacnetFields {
    fn slot(&self, field: ReferenceField) -> Option<&Option<String>> {
        match field {
            ReferenceField::ObjectIdentifier => Some(&self.object_identifier),
            ReferenceField::ObjectName => Some(&self.object_name),
            ReferenceField::ObjectType => Some(&self.object_type),
            ReferenceField::Description => Some(&self.description),
            ReferenceField::ReadProperty => Some(&self.read_property),
            _ => None,
        }
    }

    fn slot_mut(&mut self, field: ReferenceField) -> Option<&mut Option<String>> {
        match field {
            ReferenceField::ObjectIdentifier => Some(&mut self.object_identifier),
            ReferenceField::ObjectName => Some(&mut self.object_name),
            ReferenceField::ObjectType => Some(&mut self.object_type),
            ReferenceField::Description => Some(&mut self.description),
            ReferenceField::ReadProperty => Some(&mut self.read_property),
            _ => None,
        }
    }
}

/// Replaces the record in `slot` with an empty one of `kind`.
///
/// Keeping the same kind leaves the record untouched; any other switch
/// discards every field of the previous record.
pub fn switch_kind(slot: &mut Option<ExternalReference>, kind: ReferenceKind) {
    let current = slot
        .as_ref()
        .map_or(ReferenceKind::None, ExternalReference::kind);
    if current != kind {
        *slot = ExternalReference::new(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bacnet_fields() -> ExternalReference {
        let mut reference = ExternalReference::new(ReferenceKind::Bacnet).unwrap();
        reference
            .set_field(ReferenceField::ObjectIdentifier, "analog-input,3")
            .unwrap();
        reference
            .set_field(ReferenceField::ObjectName, "SupplyTemp")
            .unwrap();
        reference
            .set_field(ReferenceField::ObjectOf, "bacnet://device/1001")
            .unwrap();
        reference
    }

    #[test]
    fn test_empty_values_are_absent() {
        let mut reference = bacnet_fields();
        reference
            .set_field(ReferenceField::ObjectName, "   ")
            .unwrap();
        assert_eq!(reference.field(ReferenceField::ObjectName), None);
        assert_eq!(reference.present_fields().count(), 2);
    }

    #[test]
    fn test_field_must_match_kind_and_encoding() {
        let mut reference = bacnet_fields();
        assert_eq!(
            reference.set_field(ReferenceField::BacnetUri, "bacnet://x"),
            Err(ReferenceError::FieldNotApplicable(ReferenceField::BacnetUri))
        );
        assert!(
            reference
                .set_field(ReferenceField::TimeseriesId, "ts")
                .is_err()
        );
    }

    #[test]
    fn test_switching_encoding_discards_fields() {
        let mut reference = bacnet_fields();
        assert!(reference.set_bacnet_encoding(BacnetEncodingKind::Uri));
        assert_eq!(reference.field(ReferenceField::ObjectIdentifier), None);
        assert_eq!(
            reference.field(ReferenceField::ObjectOf),
            Some("bacnet://device/1001")
        );
        reference
            .set_field(ReferenceField::BacnetUri, "bacnet://1001/ai/3")
            .unwrap();
        assert_eq!(reference.validate(), Ok(()));
    }

    #[test]
    fn test_switch_kind() {
        let mut slot = Some(bacnet_fields());
        switch_kind(&mut slot, ReferenceKind::Bacnet);
        assert_eq!(slot, Some(bacnet_fields()));

        switch_kind(&mut slot, ReferenceKind::Timeseries);
        let reference = slot.as_ref().unwrap();
        assert_eq!(reference.kind(), ReferenceKind::Timeseries);
        assert_eq!(reference.present_fields().count(), 0);

        switch_kind(&mut slot, ReferenceKind::None);
        assert!(slot.is_none());
    }

    #[test]
    fn test_validate() {
        assert_eq!(bacnet_fields().validate(), Ok(()));

        let mut uri = ExternalReference::new(ReferenceKind::Bacnet).unwrap();
        uri.set_bacnet_encoding(BacnetEncodingKind::Uri);
        uri.set_field(ReferenceField::BacnetUri, "http://nope").unwrap();
        assert_eq!(uri.validate(), Err(ReferenceError::InvalidBacnetUri));

        let timeseries = ExternalReference::new(ReferenceKind::Timeseries).unwrap();
        assert_eq!(
            timeseries.validate(),
            Err(ReferenceError::MissingTimeseriesId)
        );
    }

    #[test]
    fn test_write_then_read() {
        let mut doc = GraphDocument::new();
        let point = Term::iri("http://example.org/building/instances/p1");
        bacnet_fields().write(&mut doc, &point);

        let node = doc
            .object(&point, REF.iri(term::HAS_EXTERNAL_REFERENCE))
            .unwrap();
        assert!(doc.contains(
            node,
            vocab::rdf_type(),
            &Term::Iri(REF.iri(term::BACNET_REFERENCE))
        ));
        assert_eq!(ExternalReference::read(&doc, node), Some(bacnet_fields()));
    }

    #[test]
    fn test_read_infers_kind_without_type() {
        let mut doc = GraphDocument::new();
        let node = doc.fresh_blank();
        doc.insert(
            node.clone(),
            ReferenceField::ObjectIdentifier.predicate(),
            Literal::string("analog-value,1"),
        );
        doc.insert(
            node.clone(),
            ReferenceField::BacnetUri.predicate(),
            Literal::string("bacnet://9/av/1"),
        );

        let reference = ExternalReference::read(&doc, &node).unwrap();
        assert_eq!(reference.bacnet_encoding(), Some(BacnetEncodingKind::Uri));
        assert_eq!(
            reference.field(ReferenceField::BacnetUri),
            Some("bacnet://9/av/1")
        );
        assert_eq!(reference.field(ReferenceField::ObjectIdentifier), None);

        let timeseries = doc.fresh_blank();
        doc.insert(
            timeseries.clone(),
            ReferenceField::TimeseriesId.predicate(),
            Literal::string("abc"),
        );
        assert_eq!(
            ExternalReference::read(&doc, &timeseries).map(|r| r.kind()),
            Some(ReferenceKind::Timeseries)
        );
    }

    #[test]
    fn test_read_unresolvable() {
        let mut doc = GraphDocument::new();
        let node = doc.fresh_blank();
        doc.insert(node.clone(), vocab::rdfs_label(), Literal::string("orphan"));
        assert_eq!(ExternalReference::read(&doc, &node), None);
    }
}
