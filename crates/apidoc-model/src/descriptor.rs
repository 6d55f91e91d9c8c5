//! Descriptor types as decoded from `api.json`.
//!
//! Every key is optional on the wire: missing strings decode as `""`, missing
//! lists as `[]` and a missing `must` flag as `false`. Unknown keys are ignored.
//! Field types are still enforced, so `"code": "200"` is a decode error.

use serde::{Deserialize, Serialize};

/// Root of an API description.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Descriptor {
    /// Document title.
    pub title: String,
    /// Base address and common headers.
    pub base: Base,
    /// Endpoints in document order.
    pub endpoints: Vec<Endpoint>,
}

/// Base address of the API and the headers every request carries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Base {
    pub url: String,
    pub headers: Vec<Header>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Header {
    pub name: String,
    pub description: String,
}

/// One documented API operation, as loaded.
///
/// `response_ref` names a file under the staged `responses/` directory. It is
/// resolved into content by [`Endpoint::into_enriched`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoint {
    /// Request path, e.g. `/pets/{id}`.
    #[serde(rename = "endpoint")]
    pub path: String,
    pub title: String,
    pub description: String,
    /// HTTP method, kept as written in the descriptor.
    pub method: String,
    #[serde(rename = "url-params")]
    pub url_params: Vec<Param>,
    #[serde(rename = "params")]
    pub body_params: Vec<Param>,
    /// Response file name relative to `responses/`.
    #[serde(rename = "response")]
    pub response_ref: String,
    #[serde(rename = "codes")]
    pub result_codes: Vec<ResultCode>,
}

impl Endpoint {
    /// True if the endpoint documents at least one body parameter.
    #[must_use]
    pub fn has_params(&self) -> bool {
        !self.body_params.is_empty()
    }

    /// True if the endpoint documents at least one URL parameter.
    #[must_use]
    pub fn has_url_params(&self) -> bool {
        !self.url_params.is_empty()
    }
}

/// A request parameter.
///
/// Serialized with descriptive names (`example_value`, `allowed_options`,
/// `required`) for templates; decoded from the short wire names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Param {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub param_type: String,
    #[serde(rename(deserialize = "value"))]
    pub example_value: String,
    pub default: String,
    /// Free-form description of accepted values.
    #[serde(rename(deserialize = "options"))]
    pub allowed_options: String,
    #[serde(rename(deserialize = "must"))]
    pub required: bool,
}

/// A documented response status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResultCode {
    pub code: i64,
    /// Category label, e.g. `OK` or `Client Error`.
    #[serde(rename = "type")]
    pub code_type: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_decode_full_endpoint() {
        let json = r#"{
            "title": "Pets",
            "base": {
                "url": "https://api.example.com",
                "headers": [{ "name": "Authorization", "description": "Bearer token" }]
            },
            "endpoints": [{
                "endpoint": "/pets/{id}",
                "title": "Get pet",
                "description": "Fetch a single pet",
                "method": "GET",
                "url-params": [{
                    "name": "id",
                    "description": "Pet id",
                    "type": "int",
                    "value": "42",
                    "must": true,
                    "default": "",
                    "options": ""
                }],
                "params": [],
                "response": "pet.json",
                "codes": [{ "code": 404, "type": "Client Error", "description": "No such pet" }]
            }]
        }"#;

        let descriptor: Descriptor = serde_json::from_str(json).unwrap();

        assert_eq!(descriptor.title, "Pets");
        assert_eq!(descriptor.base.url, "https://api.example.com");
        assert_eq!(
            descriptor.base.headers,
            vec![Header {
                name: "Authorization".to_owned(),
                description: "Bearer token".to_owned(),
            }]
        );
        let endpoint = &descriptor.endpoints[0];
        assert_eq!(endpoint.path, "/pets/{id}");
        assert_eq!(endpoint.method, "GET");
        assert_eq!(endpoint.response_ref, "pet.json");
        assert_eq!(
            endpoint.url_params,
            vec![Param {
                name: "id".to_owned(),
                description: "Pet id".to_owned(),
                param_type: "int".to_owned(),
                example_value: "42".to_owned(),
                default: String::new(),
                allowed_options: String::new(),
                required: true,
            }]
        );
        assert_eq!(
            endpoint.result_codes,
            vec![ResultCode {
                code: 404,
                code_type: "Client Error".to_owned(),
                description: "No such pet".to_owned(),
            }]
        );
    }

    #[test]
    fn test_decode_missing_keys_default() {
        let descriptor: Descriptor =
            serde_json::from_str(r#"{"endpoints": [{"endpoint": "/a"}]}"#).unwrap();

        assert_eq!(descriptor.title, "");
        assert_eq!(descriptor.base, Base::default());
        let endpoint = &descriptor.endpoints[0];
        assert_eq!(endpoint.path, "/a");
        assert!(endpoint.url_params.is_empty());
        assert!(endpoint.body_params.is_empty());
        assert!(endpoint.result_codes.is_empty());
        assert_eq!(endpoint.response_ref, "");
    }

    #[test]
    fn test_decode_preserves_endpoint_order() {
        let json = r#"{"endpoints": [
            {"endpoint": "/c"}, {"endpoint": "/a"}, {"endpoint": "/b"}
        ]}"#;
        let descriptor: Descriptor = serde_json::from_str(json).unwrap();

        let paths: Vec<_> = descriptor.endpoints.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/c", "/a", "/b"]);
    }

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let json = r#"{"title": "T", "version": 3,
            "endpoints": [{"endpoint": "/a", "deprecated": true}]}"#;
        let descriptor: Descriptor = serde_json::from_str(json).unwrap();

        assert_eq!(descriptor.endpoints.len(), 1);
    }

    #[test]
    fn test_decode_rejects_wrong_code_type() {
        let json = r#"{"endpoints": [{"codes": [{"code": "200"}]}]}"#;

        assert!(serde_json::from_str::<Descriptor>(json).is_err());
    }

    #[test]
    fn test_decode_rejects_wrong_must_type() {
        let json = r#"{"endpoints": [{"params": [{"name": "q", "must": "yes"}]}]}"#;

        assert!(serde_json::from_str::<Descriptor>(json).is_err());
    }

    #[test]
    fn test_has_params_boundaries() {
        let mut endpoint = Endpoint::default();
        assert!(!endpoint.has_params());
        assert!(!endpoint.has_url_params());

        endpoint.body_params.push(Param::default());
        assert!(endpoint.has_params());
        assert!(!endpoint.has_url_params());

        endpoint.url_params.push(Param::default());
        assert!(endpoint.has_url_params());
    }

    #[test]
    fn test_param_serializes_descriptive_names() {
        let param = Param {
            name: "limit".to_owned(),
            example_value: "10".to_owned(),
            allowed_options: "1-100".to_owned(),
            required: true,
            ..Param::default()
        };

        let value = serde_json::to_value(&param).unwrap();

        assert_eq!(value["example_value"], "10");
        assert_eq!(value["allowed_options"], "1-100");
        assert_eq!(value["required"], true);
        assert_eq!(value["type"], "");
    }
}
