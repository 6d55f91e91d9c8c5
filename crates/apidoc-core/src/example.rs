//! Usage example generation.

use apidoc_model::Endpoint;

/// Produces the usage example shown for an endpoint.
///
/// Implemented for closures, so a one-off generator can be passed inline:
///
/// ```
/// use apidoc_core::ExampleGenerator;
/// use apidoc_model::Endpoint;
///
/// let generator = |base: &str, e: &Endpoint| format!("{} {base}{}", e.method, e.path);
/// let endpoint = Endpoint {
///     method: "GET".to_owned(),
///     path: "/pets".to_owned(),
///     ..Endpoint::default()
/// };
/// assert_eq!(generator.generate("http://x", &endpoint), "GET http://x/pets");
/// ```
pub trait ExampleGenerator: Send + Sync {
    /// Build an example for `endpoint`, served under `base_url`.
    fn generate(&self, base_url: &str, endpoint: &Endpoint) -> String;
}

impl<F> ExampleGenerator for F
where
    F: Fn(&str, &Endpoint) -> String + Send + Sync,
{
    fn generate(&self, base_url: &str, endpoint: &Endpoint) -> String {
        self(base_url, endpoint)
    }
}

/// Generator that always yields an empty example.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyExample;

impl ExampleGenerator for EmptyExample {
    fn generate(&self, _base_url: &str, _endpoint: &Endpoint) -> String {
        String::new()
    }
}
