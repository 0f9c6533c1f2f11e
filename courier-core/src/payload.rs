//! Request and response bodies.

use serde::de::DeserializeOwned;

/// A request or response body.
///
/// Providers usually hand back [`Payload::Text`] or [`Payload::Bytes`];
/// filters such as the JSON filter turn those into structured data.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A textual body.
    Text(String),
    /// A binary body.
    Bytes(Vec<u8>),
    /// A parsed JSON document.
    Json(serde_json::Value),
}

impl Payload {
    /// The raw bytes of a textual or binary payload.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Text(text) => Some(text.as_bytes()),
            Payload::Bytes(bytes) => Some(bytes),
            Payload::Json(_) => None,
        }
    }

    /// The text of a [`Payload::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The value of a [`Payload::Json`].
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` for a textual or binary payload with no content.
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_some_and(<[u8]>::is_empty)
    }

    /// Deserialize the payload into `T`.
    ///
    /// Textual and binary payloads are parsed as JSON first.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match self {
            Payload::Text(text) => serde_json::from_str(text),
            Payload::Bytes(bytes) => serde_json::from_slice(bytes),
            Payload::Json(value) => T::deserialize(value),
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_owned())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_deserialize_each_variant() {
        let expected = Point { x: 1, y: 2 };

        let text = Payload::from(r#"{"x":1,"y":2}"#);
        assert_eq!(text.deserialize::<Point>().unwrap(), expected);

        let bytes = Payload::from(br#"{"x":1,"y":2}"#.to_vec());
        assert_eq!(bytes.deserialize::<Point>().unwrap(), expected);

        let json = Payload::from(serde_json::json!({ "x": 1, "y": 2 }));
        assert_eq!(json.deserialize::<Point>().unwrap(), expected);
    }

    #[test]
    fn test_is_empty() {
        assert!(Payload::from("").is_empty());
        assert!(!Payload::from("x").is_empty());
        assert!(!Payload::Json(serde_json::Value::Null).is_empty());
    }
}
