//! Endpoint enrichment.
//!
//! Turns each loaded [`Endpoint`] into an [`EnrichedEndpoint`]: the response
//! reference is replaced by the staged file's content, the parameter flags are
//! derived and the example generator is consulted. Endpoint order is kept.

use std::string::FromUtf8Error;

use apidoc_model::{Descriptor, EnrichedDescriptor, EnrichedEndpoint, Endpoint};
use apidoc_stage::{StageError, Stager};

use crate::example::ExampleGenerator;

/// Error returned when an endpoint's response body cannot be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// Response file missing, unreadable or outside the responses directory.
    #[error("Failed to read response '{reference}' for {method} {path}: {source}")]
    Read {
        reference: String,
        method: String,
        path: String,
        #[source]
        source: StageError,
    },
    /// Response file is not UTF-8 text.
    ///
    /// Bodies are inlined into an HTML page, so arbitrary bytes are rejected
    /// rather than passed through as they would be by a byte-oriented
    /// template engine.
    #[error("Response '{reference}' is not valid UTF-8: {source}")]
    Encoding {
        reference: String,
        #[source]
        source: FromUtf8Error,
    },
}

impl ResourceError {
    /// Reference of the response that failed.
    #[must_use]
    pub fn reference(&self) -> &str {
        match self {
            Self::Read { reference, .. } | Self::Encoding { reference, .. } => reference,
        }
    }
}

/// Resolves endpoint responses through a [`Stager`].
pub struct Enricher<'a> {
    stager: &'a dyn Stager,
    examples: &'a dyn ExampleGenerator,
}

impl<'a> Enricher<'a> {
    #[must_use]
    pub fn new(stager: &'a dyn Stager, examples: &'a dyn ExampleGenerator) -> Self {
        Self { stager, examples }
    }

    /// Enrich every endpoint of `descriptor`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for the first endpoint whose response can't be
    /// resolved. No partial result is returned.
    pub fn enrich(&self, descriptor: Descriptor) -> Result<EnrichedDescriptor, ResourceError> {
        let (title, base, endpoints) = descriptor.into_parts();
        let endpoints = endpoints
            .into_iter()
            .map(|endpoint| self.enrich_endpoint(&base.url, endpoint))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EnrichedDescriptor::new(title, base, endpoints))
    }

    fn enrich_endpoint(
        &self,
        base_url: &str,
        endpoint: Endpoint,
    ) -> Result<EnrichedEndpoint, ResourceError> {
        let bytes = self
            .stager
            .read_response(&endpoint.response_ref)
            .map_err(|source| ResourceError::Read {
                reference: endpoint.response_ref.clone(),
                method: endpoint.method.clone(),
                path: endpoint.path.clone(),
                source,
            })?;
        let response = String::from_utf8(bytes).map_err(|source| ResourceError::Encoding {
            reference: endpoint.response_ref.clone(),
            source,
        })?;
        tracing::debug!(
            reference = %endpoint.response_ref,
            bytes = response.len(),
            "Response resolved"
        );

        let example = self.examples.generate(base_url, &endpoint);
        Ok(endpoint.into_enriched(response, example))
    }
}

#[cfg(test)]
mod tests {
    use apidoc_model::{Base, Param};
    use apidoc_stage::{MockStager, StageErrorKind};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::example::EmptyExample;

    fn endpoint(path: &str, response_ref: &str) -> Endpoint {
        Endpoint {
            path: path.to_owned(),
            title: path.trim_start_matches('/').to_owned(),
            method: "GET".to_owned(),
            response_ref: response_ref.to_owned(),
            ..Endpoint::default()
        }
    }

    fn descriptor(endpoints: Vec<Endpoint>) -> Descriptor {
        Descriptor {
            title: "T".to_owned(),
            base: Base {
                url: "http://x".to_owned(),
                headers: vec![],
            },
            endpoints,
        }
    }

    #[test]
    fn test_enrich_inlines_response() {
        let stager = MockStager::new().with_response("a.json", r#"{"ok":true}"#);
        let enricher = Enricher::new(&stager, &EmptyExample);

        let enriched = enricher
            .enrich(descriptor(vec![endpoint("/a", "a.json")]))
            .unwrap();

        let endpoint = &enriched.endpoints[0];
        assert_eq!(endpoint.response, r#"{"ok":true}"#);
        assert_eq!(endpoint.response_ref, "a.json");
        assert_eq!(endpoint.example, "");
        assert!(!endpoint.has_params);
        assert!(!endpoint.has_url_params);
    }

    #[test]
    fn test_enrich_preserves_order() {
        let stager = MockStager::new()
            .with_response("c.json", "c")
            .with_response("a.json", "a")
            .with_response("b.json", "b");
        let enricher = Enricher::new(&stager, &EmptyExample);

        let enriched = enricher
            .enrich(descriptor(vec![
                endpoint("/c", "c.json"),
                endpoint("/a", "a.json"),
                endpoint("/b", "b.json"),
            ]))
            .unwrap();

        let pairs: Vec<_> = enriched
            .endpoints
            .iter()
            .map(|e| (e.path.as_str(), e.response.as_str()))
            .collect();
        assert_eq!(pairs, vec![("/c", "c"), ("/a", "a"), ("/b", "b")]);
    }

    #[test]
    fn test_enrich_shared_response_file() {
        let stager = MockStager::new().with_response("list.json", "[]");
        let enricher = Enricher::new(&stager, &EmptyExample);

        let enriched = enricher
            .enrich(descriptor(vec![
                endpoint("/a", "list.json"),
                endpoint("/b", "list.json"),
            ]))
            .unwrap();

        assert!(enriched.endpoints.iter().all(|e| e.response == "[]"));
    }

    #[test]
    fn test_enrich_derives_flags() {
        let stager = MockStager::new().with_response("a.json", "{}");
        let enricher = Enricher::new(&stager, &EmptyExample);
        let mut with_params = endpoint("/a", "a.json");
        with_params.body_params = vec![Param::default()];
        let mut with_url_params = endpoint("/b", "a.json");
        with_url_params.url_params = vec![Param::default()];

        let enriched = enricher
            .enrich(descriptor(vec![with_params, with_url_params]))
            .unwrap();

        assert!(enriched.endpoints[0].has_params);
        assert!(!enriched.endpoints[0].has_url_params);
        assert!(!enriched.endpoints[1].has_params);
        assert!(enriched.endpoints[1].has_url_params);
    }

    #[test]
    fn test_enrich_missing_response_names_file() {
        let stager = MockStager::new().with_response("a.json", "{}");
        let enricher = Enricher::new(&stager, &EmptyExample);

        let err = enricher
            .enrich(descriptor(vec![
                endpoint("/a", "a.json"),
                endpoint("/b", "missing.json"),
            ]))
            .unwrap_err();

        assert_eq!(err.reference(), "missing.json");
        assert!(err.to_string().contains("missing.json"));
        assert!(err.to_string().contains("GET /b"));
    }

    #[test]
    fn test_enrich_rejects_escaping_reference() {
        let stager = MockStager::new();
        let enricher = Enricher::new(&stager, &EmptyExample);

        let err = enricher
            .enrich(descriptor(vec![endpoint("/a", "../api.json")]))
            .unwrap_err();

        let ResourceError::Read { source, .. } = &err else {
            panic!("Expected ResourceError::Read, got {err:?}");
        };
        assert_eq!(source.kind, StageErrorKind::InvalidPath);
    }

    #[test]
    fn test_enrich_rejects_non_utf8_response() {
        let stager = MockStager::new().with_response("bin", vec![0xff, 0xfe]);
        let enricher = Enricher::new(&stager, &EmptyExample);

        let err = enricher
            .enrich(descriptor(vec![endpoint("/a", "bin")]))
            .unwrap_err();

        assert!(matches!(err, ResourceError::Encoding { .. }));
    }

    #[test]
    fn test_enrich_uses_example_generator() {
        let stager = MockStager::new().with_response("a.json", "{}");
        let generator =
            |base: &str, e: &Endpoint| format!("curl -X {} {base}{}", e.method, e.path);
        let enricher = Enricher::new(&stager, &generator);

        let enriched = enricher
            .enrich(descriptor(vec![endpoint("/a", "a.json")]))
            .unwrap();

        assert_eq!(enriched.endpoints[0].example, "curl -X GET http://x/a");
    }

    #[test]
    fn test_enrich_empty_descriptor() {
        let stager = MockStager::new();
        let enricher = Enricher::new(&stager, &EmptyExample);

        let enriched = enricher.enrich(descriptor(vec![])).unwrap();

        assert!(enriched.endpoints.is_empty());
        assert_eq!(enriched.title, "T");
    }
}
