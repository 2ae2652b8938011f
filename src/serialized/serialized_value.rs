use serde_json::{Map, Number, Value};

use crate::serialized::EncodeError;

/// Key of a serialized array entry.
#[derive(Debug, Clone, PartialEq)]
pub enum SerializedKey {
    Int(i64),
    Str(Vec<u8>),
}

impl SerializedKey {
    /// Array keys written as canonical decimal strings (`"0"`, `"-5"`, not
    /// `"05"` or `"-0"`) are integer keys; other strings stay strings.
    pub fn into_array_key(self) -> SerializedKey {
        match self {
            SerializedKey::Str(bytes) => match canonical_int(&bytes) {
                Some(i) => SerializedKey::Int(i),
                None => SerializedKey::Str(bytes),
            },
            key => key,
        }
    }
}

fn canonical_int(bytes: &[u8]) -> Option<i64> {
    let digits = bytes.strip_prefix(b"-").unwrap_or(bytes);
    let canonical = match digits {
        [b'0'] => digits.len() == bytes.len(),
        [b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
        _ => false,
    };
    if !canonical {
        return None;
    }
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

/// In-memory value tree of a legacy serialized payload.
///
/// Strings are byte strings; they only become text when converted to JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum SerializedValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Vec<u8>),
    /// Ordered array; keys may be integers or strings.
    Array(Vec<(SerializedKey, SerializedValue)>),
    /// Object with its class name and raw property names. Non-public
    /// properties carry a `\0` prefixed name.
    Object {
        class: String,
        properties: Vec<(Vec<u8>, SerializedValue)>,
    },
}

impl SerializedValue {
    /// Convert to JSON the way the legacy encoder does it: arrays keyed
    /// `0..n` in order become JSON arrays, every other array becomes an
    /// object, and objects expose only their public properties.
    pub fn to_json(&self) -> Result<Value, EncodeError> {
        self.to_json_at("$")
    }

    fn to_json_at(&self, path: &str) -> Result<Value, EncodeError> {
        match self {
            SerializedValue::Null => Ok(Value::Null),
            SerializedValue::Bool(b) => Ok(Value::Bool(*b)),
            SerializedValue::Int(i) => Ok(Value::Number(Number::from(*i))),
            SerializedValue::Float(f) => Number::from_f64(*f)
                .map(Value::Number)
                .ok_or_else(|| EncodeError::NonFiniteFloat { path: path.to_string() }),
            SerializedValue::Str(bytes) => Ok(Value::String(utf8(bytes, path)?)),
            SerializedValue::Array(entries) if is_list(entries) => {
                let mut items = Vec::with_capacity(entries.len());
                for (index, (_, value)) in entries.iter().enumerate() {
                    items.push(value.to_json_at(&format!("{path}[{index}]"))?);
                }
                Ok(Value::Array(items))
            }
            SerializedValue::Array(entries) => {
                let mut map = Map::new();
                for (key, value) in entries {
                    let key = match key {
                        SerializedKey::Int(i) => i.to_string(),
                        SerializedKey::Str(bytes) => utf8(bytes, path)?,
                    };
                    let child = value.to_json_at(&format!("{path}.{key}"))?;
                    map.insert(key, child);
                }
                Ok(Value::Object(map))
            }
            SerializedValue::Object { properties, .. } => {
                let mut map = Map::new();
                for (name, value) in properties.iter().filter(|(name, _)| name.first() != Some(&0)) {
                    let name = utf8(name, path)?;
                    let child = value.to_json_at(&format!("{path}.{name}"))?;
                    map.insert(name, child);
                }
                Ok(Value::Object(map))
            }
        }
    }
}

fn is_list(entries: &[(SerializedKey, SerializedValue)]) -> bool {
    entries
        .iter()
        .enumerate()
        .all(|(index, (key, _))| matches!(key, SerializedKey::Int(i) if *i == index as i64))
}

fn utf8(bytes: &[u8], path: &str) -> Result<String, EncodeError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| EncodeError::InvalidUtf8 { path: path.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn s(text: &str) -> SerializedValue {
        SerializedValue::Str(text.as_bytes().to_vec())
    }

    #[test]
    fn sequential_arrays_become_json_arrays() {
        let value = SerializedValue::Array(vec![
            (SerializedKey::Int(0), SerializedValue::Int(1)),
            (SerializedKey::Int(1), s("two")),
        ]);
        assert_eq!(value.to_json().unwrap(), json!([1, "two"]));
        assert_eq!(SerializedValue::Array(vec![]).to_json().unwrap(), json!([]));
    }

    #[test]
    fn sparse_or_keyed_arrays_become_objects_in_order() {
        let value = SerializedValue::Array(vec![
            (SerializedKey::Str(b"zeta".to_vec()), SerializedValue::Bool(true)),
            (SerializedKey::Int(3), SerializedValue::Null),
            (SerializedKey::Str(b"alpha".to_vec()), SerializedValue::Float(1.5)),
        ]);
        assert_eq!(
            serde_json::to_string(&value.to_json().unwrap()).unwrap(),
            r#"{"zeta":true,"3":null,"alpha":1.5}"#
        );
    }

    #[test]
    fn canonical_numeric_string_keys_become_int_keys() {
        let key = |text: &str| SerializedKey::Str(text.as_bytes().to_vec()).into_array_key();
        assert_eq!(key("0"), SerializedKey::Int(0));
        assert_eq!(key("42"), SerializedKey::Int(42));
        assert_eq!(key("-7"), SerializedKey::Int(-7));
        assert_eq!(key("-9223372036854775808"), SerializedKey::Int(i64::MIN));
        for kept in ["01", "-0", "+1", " 1", "1.0", "", "-", "9223372036854775808"] {
            assert_eq!(key(kept), SerializedKey::Str(kept.as_bytes().to_vec()), "{kept}");
        }
        assert_eq!(SerializedKey::Int(3).into_array_key(), SerializedKey::Int(3));
    }

    #[test]
    fn objects_expose_public_properties_only() {
        let value = SerializedValue::Object {
            class: "stdClass".into(),
            properties: vec![
                (b"name".to_vec(), s("public")),
                (b"\0*\0secret".to_vec(), s("protected")),
                (b"\0Foo\0hidden".to_vec(), s("private")),
            ],
        };
        assert_eq!(value.to_json().unwrap(), json!({ "name": "public" }));
    }

    #[test]
    fn non_encodable_values_report_their_path() {
        let value = SerializedValue::Array(vec![(SerializedKey::Int(0), SerializedValue::Float(f64::INFINITY))]);
        assert_eq!(value.to_json().unwrap_err(), EncodeError::NonFiniteFloat { path: "$[0]".into() });

        let value = SerializedValue::Array(vec![(SerializedKey::Str(b"k".to_vec()), SerializedValue::Str(vec![0xff, 0xfe]))]);
        assert_eq!(value.to_json().unwrap_err(), EncodeError::InvalidUtf8 { path: "$.k".into() });
    }
}
