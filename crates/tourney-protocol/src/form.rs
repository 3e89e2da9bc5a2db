//! Request payload encoding: JSON or multipart, decided by declaration.
//!
//! Every request DTO declares its fields up front ([`FormPayload::FIELDS`]).
//! If any declared field is a file, the payload is always sent as
//! `multipart/form-data`, even when no file is attached this time, because
//! the endpoint expects form fields. Otherwise it is sent as a JSON object.
//! The choice is made from the type, never by inspecting values at runtime.

use serde_json::{Map, Value};
use tourney_transport::{FileUpload, FormPart, RequestBody};

use crate::{Codec, JsonCodec, ProtocolError};

/// What kind of value a declared field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    File,
}

/// One declared field of a request payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn scalar(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Scalar,
        }
    }

    pub const fn file(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::File,
        }
    }
}

/// A field's current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    File(FileUpload),
}

impl FieldValue {
    fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) | Self::Integer(_) => FieldKind::Scalar,
            Self::File(_) => FieldKind::File,
        }
    }
}

/// The wire encoding a payload type uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Json,
    Multipart,
}

/// A typed request body.
pub trait FormPayload {
    /// Every field this payload may send.
    const FIELDS: &'static [FieldSpec];

    /// The values to send now. Absent optional fields are left out.
    fn values(&self) -> Vec<(&'static str, FieldValue)>;
}

/// Returns the encoding `P` is sent with.
pub fn encoding_of<P: FormPayload>() -> BodyEncoding {
    if P::FIELDS.iter().any(|f| f.kind == FieldKind::File) {
        BodyEncoding::Multipart
    } else {
        BodyEncoding::Json
    }
}

/// Encodes a payload into a request body.
///
/// # Errors
/// [`ProtocolError::InvalidMessage`] if a value names an undeclared field
/// or its kind contradicts the declaration.
pub fn encode_form<P: FormPayload>(payload: &P) -> Result<RequestBody, ProtocolError> {
    let values = payload.values();
    for (name, value) in &values {
        let spec = P::FIELDS
            .iter()
            .find(|f| f.name == *name)
            .ok_or_else(|| ProtocolError::InvalidMessage(format!("undeclared field `{name}`")))?;
        if spec.kind != value.kind() {
            return Err(ProtocolError::InvalidMessage(format!(
                "field `{name}` is declared {:?} but holds {:?}",
                spec.kind,
                value.kind()
            )));
        }
    }

    match encoding_of::<P>() {
        BodyEncoding::Multipart => {
            let parts = values
                .into_iter()
                .map(|(name, value)| match value {
                    FieldValue::Text(text) => FormPart::text(name, text),
                    FieldValue::Integer(n) => FormPart::text(name, n.to_string()),
                    FieldValue::File(file) => FormPart::file(name, file),
                })
                .collect();
            Ok(RequestBody::Multipart(parts))
        }
        BodyEncoding::Json => {
            let mut object = Map::new();
            for (name, value) in values {
                let json = match value {
                    FieldValue::Text(text) => Value::String(text),
                    FieldValue::Integer(n) => Value::from(n),
                    // Unreachable: the kind check above rejects files in a
                    // payload with no declared file field.
                    FieldValue::File(_) => {
                        return Err(ProtocolError::InvalidMessage(format!(
                            "field `{name}` cannot carry a file in JSON"
                        )));
                    }
                };
                object.insert(name.to_string(), json);
            }
            Ok(RequestBody::Json(JsonCodec.encode(&Value::Object(object))?))
        }
    }
}
