//! Structured (JSON) form
//!
//! An [`Error`] serializes as `{"message", "values", "stackTrace"}`. The cause chain is
//! folded into `message`; deserializing yields a detached error without a cause.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Values};
use crate::stack::StackTrace;

#[derive(Serialize)]
struct Encoded<'a> {
    message: String,
    values: Values,
    #[serde(rename = "stackTrace")]
    stack_trace: &'a StackTrace,
}

/// Missing and `null` values or stacks both decode as empty.
#[derive(Deserialize)]
struct Decoded {
    message: String,
    values: Option<Values>,
    #[serde(rename = "stackTrace")]
    stack_trace: Option<StackTrace>,
}

impl Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Encoded {
            message: self.to_string(),
            values: self.values(),
            stack_trace: self.stack_trace(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Error {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let decoded = Decoded::deserialize(deserializer)?;
        Ok(Error::from_parts(
            decoded.message,
            decoded.values.unwrap_or_default(),
            decoded.stack_trace.unwrap_or_default(),
        ))
    }
}

impl Error {
    /// Encodes the error as JSON.
    ///
    /// # Errors
    ///
    /// Returns the encoder failure wrapped in an [`Error`].
    pub fn to_json(&self) -> Result<String, Error> {
        match serde_json::to_string(self) {
            Ok(json) => Ok(json),
            Err(err) => Err(Error::wrap(err)),
        }
    }

    /// Decodes an error previously produced by [`to_json`](Self::to_json).
    ///
    /// # Errors
    ///
    /// Returns the decoder failure wrapped in an [`Error`].
    pub fn from_json(json: &str) -> Result<Self, Error> {
        match serde_json::from_str(json) {
            Ok(err) => Ok(err),
            Err(err) => Err(Error::wrap_with(err, ["decode error"])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::error::Error as StdError;

    #[test]
    fn encodes_exactly_three_fields() {
        let err = Error::wrap_with(Error::new("inner").with("a", 1), ["outer"]).with("b", 2);
        let value = serde_json::to_value(&err).unwrap();

        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["message", "stackTrace", "values"]);

        assert_eq!(value["message"], "outer: inner");
        assert_eq!(value["values"], json!({"a": 1, "b": 2}));
        assert_eq!(
            value["stackTrace"].as_array().unwrap().len(),
            err.stack_trace().len()
        );
    }

    #[test]
    fn round_trip_drops_cause() {
        let err = Error::wrap_with(Error::new("somthing error").with("key", "hoge"), ["ctx"]);

        let json = err.to_json().unwrap();
        let decoded = Error::from_json(&json).unwrap();

        assert_eq!(decoded.to_string(), err.to_string());
        assert_eq!(decoded.values(), err.values());
        assert_eq!(decoded.stack_trace(), err.stack_trace());
        assert!(decoded.source().is_none());
        assert!(decoded.cause().is_none());
    }

    #[test]
    fn decodes_frame_fields() {
        let json = r#"{
            "message": "m",
            "values": {"k": null},
            "stackTrace": [{"func": "app::run", "file": "/src/main.rs", "line": 12}]
        }"#;
        let err = Error::from_json(json).unwrap();

        assert_eq!(err.message(), "m");
        assert_eq!(err.values()["k"], Value::Null);
        let frame = &err.stack_trace()[0];
        assert_eq!(frame.func(), "app::run");
        assert_eq!(frame.file(), "/src/main.rs");
        assert_eq!(frame.line(), 12);
    }

    #[test]
    fn missing_values_and_stack_default_to_empty() {
        let err = Error::from_json(r#"{"message":"only"}"#).unwrap();
        assert!(err.values().is_empty());
        assert!(err.stack_trace().is_empty());
    }

    #[test]
    fn null_values_and_stack_decode_as_empty() {
        let err = Error::from_json(r#"{"message":"m","values":null,"stackTrace":null}"#).unwrap();

        assert_eq!(err.to_string(), "m");
        assert!(err.values().is_empty());
        assert!(err.stack_trace().is_empty());
    }

    #[test]
    fn malformed_json_is_wrapped() {
        let err = Error::from_json("{not json").unwrap_err();

        assert!(err.to_string().starts_with("decode error: "));
        assert!(err.source().is_some_and(|s| s.is::<serde_json::Error>()));
        assert!(!err.stack_trace().is_empty());
    }
}
