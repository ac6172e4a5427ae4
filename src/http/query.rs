//! Query-string encoding of call parameters.
//!
//! Keys keep their insertion order. Nested objects and arrays are flattened
//! into bracketed key paths (`customer[email]=...`, `items[0]=...`); key
//! segments and values are form-urlencoded while the brackets stay literal.
//! Booleans render as `1`/`0` and `null` values are omitted.

use serde_json::Value;
use url::form_urlencoded::byte_serialize;

use super::types::Params;

pub fn to_query_string(params: &Params) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        flatten(&encode(key), value, &mut pairs);
    }
    pairs.join("&")
}

/// Appends the encoded parameters to `url`. Empty parameters leave it untouched.
pub fn append_query(url: &str, params: &Params) -> String {
    let query = to_query_string(params);
    if query.is_empty() {
        url.to_string()
    } else {
        format!("{}?{}", url, query)
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => {},
        Value::Bool(b) => out.push(format!("{}={}", prefix, if *b { "1" } else { "0" })),
        Value::Number(n) => out.push(format!("{}={}", prefix, encode(&n.to_string()))),
        Value::String(s) => out.push(format!("{}={}", prefix, encode(s))),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(&format!("{}[{}]", prefix, index), item, out);
            }
        },
        Value::Object(map) => {
            for (key, item) in map {
                flatten(&format!("{}[{}]", prefix, encode(key)), item, out);
            }
        },
    }
}

fn encode(s: &str) -> String {
    byte_serialize(s.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => panic!("test params must be an object"),
        }
    }

    #[test]
    fn flat_params_keep_insertion_order() {
        let p = params(json!({"b": "2", "a": "1", "c": 3}));
        assert_eq!(to_query_string(&p), "b=2&a=1&c=3");
    }

    #[test]
    fn nested_objects_use_bracketed_keys() {
        let p = params(json!({"a": {"b": 1, "c": 2}}));
        assert_eq!(to_query_string(&p), "a[b]=1&a[c]=2");
    }

    #[test]
    fn arrays_are_indexed() {
        let p = params(json!({"ids": ["x", "y"], "deep": {"list": [{"k": "v"}]}}));
        assert_eq!(to_query_string(&p), "ids[0]=x&ids[1]=y&deep[list][0][k]=v");
    }

    #[test]
    fn values_and_keys_are_urlencoded() {
        let p = params(json!({"customer email": "a+b@example.com", "note": "50% off & more"}));
        assert_eq!(
            to_query_string(&p),
            "customer+email=a%2Bb%40example.com&note=50%25+off+%26+more"
        );
    }

    #[test]
    fn booleans_and_nulls() {
        let p = params(json!({"on": true, "off": false, "skip": null, "last": "x"}));
        assert_eq!(to_query_string(&p), "on=1&off=0&last=x");
    }

    #[test]
    fn append_query_leaves_url_alone_without_params() {
        let url = "https://api.example.test/api/v1/deposit/request/";
        assert_eq!(append_query(url, &Params::new()), url);
        assert_eq!(append_query(url, &params(json!({"only": null}))), url);
    }

    #[test]
    fn append_query_uses_question_mark() {
        let p = params(json!({"a": "1", "b": "2"}));
        assert_eq!(
            append_query("https://api.example.test/status", &p),
            "https://api.example.test/status?a=1&b=2"
        );
    }
}
