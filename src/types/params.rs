//! Request parameter bag.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key/value request parameters.
///
/// Keys are unique: inserting an existing key replaces its value. The same bag
/// feeds all three request kinds: GET and POST send [`RequestParam::parameter`]
/// pairs (query string or urlencoded form), JSON requests send
/// [`RequestParam::to_json`] as the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParam {
    values: Map<String, Value>,
}

impl RequestParam {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value for `key`.
    pub fn put<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Builder-style [`RequestParam::put`].
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.put(key, value);
        self
    }

    /// Insert any serializable value.
    pub fn put_serialized<K, V>(&mut self, key: K, value: &V) -> Result<&mut Self, crate::NetError>
    where
        K: Into<String>,
        V: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value)?;
        self.values.insert(key.into(), value);
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// JSON object text, used as the body of JSON requests.
    pub fn to_json(&self) -> String {
        Value::Object(self.values.clone()).to_string()
    }

    pub fn to_json_value(&self) -> Value {
        Value::Object(self.values.clone())
    }

    /// Raw key/value form used for query strings and urlencoded bodies.
    ///
    /// Strings are sent verbatim, `null` as an empty string, everything else
    /// as its JSON text.
    pub fn parameter(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), value_to_field(v)))
            .collect()
    }

    /// Percent-encoded `k=v&...` rendering of [`RequestParam::parameter`].
    pub fn to_query_string(&self) -> String {
        self.parameter()
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn value_to_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParam
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.put(k, v);
        }
        params
    }
}

impl From<Map<String, Value>> for RequestParam {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn put_replaces_existing_key() {
        let mut params = RequestParam::new();
        params.put("page", 1).put("page", 2);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("page"), Some(&json!(2)));
    }

    #[test]
    fn parameter_flattens_values() {
        let params = RequestParam::new()
            .with("name", "wss")
            .with("page", 3)
            .with("debug", true)
            .with("cursor", Value::Null);
        let mut pairs = params.parameter();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("cursor".to_string(), String::new()),
                ("debug".to_string(), "true".to_string()),
                ("name".to_string(), "wss".to_string()),
                ("page".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn to_json_keeps_value_types() {
        let params = RequestParam::new().with("id", 7).with("tags", json!(["a", "b"]));
        let parsed: Value = serde_json::from_str(&params.to_json()).unwrap();
        assert_eq!(parsed, json!({"id": 7, "tags": ["a", "b"]}));
    }

    #[test]
    fn empty_bag_serializes_to_empty_object() {
        assert_eq!(RequestParam::new().to_json(), "{}");
        assert!(RequestParam::new().parameter().is_empty());
    }

    #[test]
    fn query_string_is_percent_encoded() {
        let params = RequestParam::new().with("q", "a b&c");
        assert_eq!(params.to_query_string(), "q=a%20b%26c");
    }

    #[test]
    fn put_serialized_accepts_structs() {
        #[derive(Serialize)]
        struct Paging {
            offset: u32,
            limit: u32,
        }
        let mut params = RequestParam::new();
        params
            .put_serialized("paging", &Paging { offset: 0, limit: 20 })
            .unwrap();
        assert_eq!(params.get("paging"), Some(&json!({"offset": 0, "limit": 20})));
    }
}
