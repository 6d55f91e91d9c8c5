//! API descriptor model for apidoc.
//!
//! Two stages of the same data are modelled as distinct types:
//!
//! - [`Descriptor`] / [`Endpoint`]: as loaded from `api.json`. Each endpoint
//!   carries a *reference* to its example response file.
//! - [`EnrichedDescriptor`] / [`EnrichedEndpoint`]: render-ready. Each endpoint
//!   carries the resolved response *content* plus derived flags.
//!
//! [`Document`] wraps an enriched descriptor with a generation timestamp and
//! is the data context handed to the template.
//!
//! # Wire format
//!
//! The JSON key names are a compatibility contract with descriptor authors:
//!
//! ```json
//! {
//!   "title": "Pets",
//!   "base": { "url": "https://api.example.com", "headers": [] },
//!   "endpoints": [{
//!     "endpoint": "/pets/{id}",
//!     "title": "Get pet",
//!     "method": "GET",
//!     "url-params": [{ "name": "id", "type": "int", "must": true }],
//!     "params": [],
//!     "response": "pet.json",
//!     "codes": [{ "code": 200, "type": "OK", "description": "Found" }]
//!   }]
//! }
//! ```

mod descriptor;
mod enriched;

pub use descriptor::{Base, Descriptor, Endpoint, Header, Param, ResultCode};
pub use enriched::{Document, EnrichedDescriptor, EnrichedEndpoint};
