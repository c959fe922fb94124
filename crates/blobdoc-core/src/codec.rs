//! The document codec: JSON encoding, lenient decoding, and identity-field
//! reconciliation.
//!
//! Decoding matches top-level field names case-insensitively against the
//! target type and then pins the identity field to the stem of the item name
//! the payload was read from, whatever the payload itself says. Missing
//! `Option` fields decode as `None`.

use bytes::Bytes;
use serde::de::{self, Deserialize, DeserializeOwned, Deserializer, Visitor};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::document::{item_stem, Document, Identifier, DEFAULT_ID_FIELD};
use crate::error::{DocError, DocResult};

/// Serialize a document to its canonical JSON bytes.
pub fn encode<T: Serialize + ?Sized>(document: &T) -> DocResult<Bytes> {
    serde_json::to_vec(document)
        .map(Bytes::from)
        .map_err(|e| DocError::InvalidArgument(format!("cannot encode document: {e}")))
}

/// Deserialize `bytes` read from `source_name` into `T`.
///
/// The identity field is overwritten with the stem of `source_name` both in
/// the payload (so a required field that was never stored still decodes) and
/// on the decoded value.
pub fn decode<T: Document>(bytes: &[u8], source_name: &str) -> DocResult<T> {
    let mut value: Value =
        serde_json::from_slice(bytes).map_err(|e| DocError::decode(source_name, e))?;

    let stem = item_stem(source_name);
    let id = T::Id::from_stem(stem).ok_or_else(|| {
        DocError::decode(
            source_name,
            format!("item stem {stem:?} is not a valid identifier for this document type"),
        )
    })?;

    if let Value::Object(map) = &mut value {
        let fields = struct_fields::<T>();
        canonicalize_keys(map, fields);
        if let Some(id_field) = fields
            .iter()
            .find(|f| f.eq_ignore_ascii_case(T::ID_FIELD))
        {
            map.insert((*id_field).to_string(), Value::String(stem.to_string()));
        }
    }

    let mut document: T =
        serde_json::from_value(value).map_err(|e| DocError::decode(source_name, e))?;
    document.set_id(id);
    Ok(document)
}

/// Deserialize `bytes` read from `source_name` into a generic JSON object
/// with its `Id` field pinned to the item stem.
pub fn decode_value(bytes: &[u8], source_name: &str) -> DocResult<Value> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| DocError::decode(source_name, e))?;
    match value {
        Value::Object(mut map) => {
            stamp_id(&mut map, DEFAULT_ID_FIELD, item_stem(source_name));
            Ok(Value::Object(map))
        }
        other => Err(DocError::decode(
            source_name,
            format!("expected a JSON object, found {}", json_kind(&other)),
        )),
    }
}

/// Parse raw bytes as JSON without touching identity.
pub fn parse_json(bytes: &[u8], source_name: &str) -> DocResult<Value> {
    serde_json::from_slice(bytes).map_err(|e| DocError::decode(source_name, e))
}

/// Force the identity field `field` of a generic object to `id`.
///
/// An existing key matching `field` case-insensitively is reused; otherwise
/// `field` is inserted.
pub fn stamp_id(map: &mut Map<String, Value>, field: &str, id: &str) {
    let key = map
        .keys()
        .find(|k| k.eq_ignore_ascii_case(field))
        .cloned()
        .unwrap_or_else(|| field.to_string());
    map.insert(key, Value::String(id.to_string()));
}

/// Check that a generic object's identity field, if present, can hold an
/// assigned identifier.
pub fn check_id_field(map: &Map<String, Value>) -> DocResult<()> {
    match lookup_field(map, DEFAULT_ID_FIELD) {
        None | Some(Value::Null) | Some(Value::String(_)) => Ok(()),
        Some(other) => Err(DocError::UnsupportedIdentifierType {
            found: json_kind(other),
        }),
    }
}

/// Find a top-level field, preferring an exact match over a
/// case-insensitive one.
pub fn lookup_field<'a>(map: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    map.get(field).or_else(|| {
        map.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(field))
            .map(|(_, v)| v)
    })
}

/// Render a JSON value as text: strings without quotes, everything else as
/// compact JSON.
pub fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Human-readable name of a JSON value's kind.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Rename keys that match a known field only case-insensitively.
fn canonicalize_keys(map: &mut Map<String, Value>, fields: &[&str]) {
    if fields.is_empty() {
        return;
    }
    let renames: Vec<(String, &str)> = map
        .keys()
        .filter(|k| !fields.contains(&k.as_str()))
        .filter_map(|k| {
            fields
                .iter()
                .find(|f| f.eq_ignore_ascii_case(k) && !map.contains_key(**f))
                .map(|f| (k.clone(), *f))
        })
        .collect();
    for (from, to) in renames {
        if let Some(value) = map.remove(&from) {
            map.entry(to.to_string()).or_insert(value);
        }
    }
}

/// The serialized field names of a struct type, as declared to serde.
///
/// Drives `T::deserialize` with a probe that records the field list passed
/// to `deserialize_struct`. Types that do not deserialize as a plain struct
/// (maps, flattened structs, enums) yield an empty list.
fn struct_fields<T: DeserializeOwned>() -> &'static [&'static str] {
    let mut probe = FieldProbe { fields: None };
    let _ = <T as Deserialize>::deserialize(&mut probe);
    probe.fields.unwrap_or(&[])
}

struct FieldProbe {
    fields: Option<&'static [&'static str]>,
}

impl<'de> Deserializer<'de> for &mut FieldProbe {
    type Error = de::value::Error;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Self::Error> {
        Err(de::Error::custom("not a struct"))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.fields = Some(fields);
        Err(de::Error::custom("field probe"))
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}
