//! Render-ready descriptor types.

use serde::Serialize;

use crate::descriptor::{Base, Descriptor, Endpoint, Param, ResultCode};

/// An endpoint with its example response resolved to content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnrichedEndpoint {
    pub path: String,
    pub title: String,
    pub description: String,
    pub method: String,
    pub url_params: Vec<Param>,
    pub body_params: Vec<Param>,
    /// File name the response was resolved from.
    pub response_ref: String,
    /// Full text of the example response.
    pub response: String,
    pub result_codes: Vec<ResultCode>,
    /// Usage example produced by the configured example generator.
    pub example: String,
    /// True if `body_params` is non-empty.
    pub has_params: bool,
    /// True if `url_params` is non-empty.
    pub has_url_params: bool,
}

impl Endpoint {
    /// Convert into the render-ready form, deriving the parameter flags.
    #[must_use]
    pub fn into_enriched(self, response: String, example: String) -> EnrichedEndpoint {
        let has_params = self.has_params();
        let has_url_params = self.has_url_params();
        EnrichedEndpoint {
            path: self.path,
            title: self.title,
            description: self.description,
            method: self.method,
            url_params: self.url_params,
            body_params: self.body_params,
            response_ref: self.response_ref,
            response,
            result_codes: self.result_codes,
            example,
            has_params,
            has_url_params,
        }
    }
}

/// A descriptor whose endpoints have all been enriched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnrichedDescriptor {
    pub title: String,
    pub base: Base,
    pub endpoints: Vec<EnrichedEndpoint>,
}

impl EnrichedDescriptor {
    /// Assemble from a loaded descriptor's header fields and enriched endpoints.
    ///
    /// `endpoints` must be in the same order as `descriptor.endpoints` was.
    #[must_use]
    pub fn new(title: String, base: Base, endpoints: Vec<EnrichedEndpoint>) -> Self {
        Self {
            title,
            base,
            endpoints,
        }
    }
}

impl Descriptor {
    /// Split into header fields and endpoints for enrichment.
    #[must_use]
    pub fn into_parts(self) -> (String, Base, Vec<Endpoint>) {
        (self.title, self.base, self.endpoints)
    }
}

/// Template data context: the enriched API plus a generation timestamp.
#[derive(Debug, Serialize)]
pub struct Document<'a> {
    pub title: &'a str,
    /// Timestamp string, fixed once per run.
    pub generated_at: String,
    pub api: &'a EnrichedDescriptor,
}

impl<'a> Document<'a> {
    #[must_use]
    pub fn new(api: &'a EnrichedDescriptor, generated_at: String) -> Self {
        Self {
            title: &api.title,
            generated_at,
            api,
        }
    }
}
