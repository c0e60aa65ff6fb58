//! Request Builder
//!
//! Turns a `ValidationRequest` into a transport-ready GET or multipart POST.

use crate::schema::SchemaCatalog;

use super::document::{DocumentRef, ValidationRequest};

/// Checker parameters sent with every request besides `schema` and the document
pub const FIXED_PARAMETERS: [(&str, &str); 5] = [
    ("parser", "xml"),
    ("laxtype", "yes"),
    ("level", "error"),
    ("out", "json"),
    ("showsource", "yes"),
];

/// Document part of a multipart body
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentPart {
    /// Sent as the `file` part with its original file name
    File { name: String, bytes: Vec<u8> },
    /// Sent as the `content` text part
    Content(String),
}

/// A request ready to hand to a transport
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundRequest {
    Get {
        endpoint: String,
        query: Vec<(String, String)>,
    },
    Post {
        endpoint: String,
        fields: Vec<(String, String)>,
        document: DocumentPart,
    },
}

impl OutboundRequest {
    pub fn endpoint(&self) -> &str {
        match self {
            OutboundRequest::Get { endpoint, .. } | OutboundRequest::Post { endpoint, .. } => {
                endpoint
            }
        }
    }

    /// Look up a query parameter or form field by name
    pub fn parameter(&self, name: &str) -> Option<&str> {
        let pairs = match self {
            OutboundRequest::Get { query, .. } => query,
            OutboundRequest::Post { fields, .. } => fields,
        };
        pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Builds requests against one endpoint using one schema catalog
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    endpoint: &'a str,
    catalog: &'a SchemaCatalog,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(endpoint: &'a str, catalog: &'a SchemaCatalog) -> Self {
        Self { endpoint, catalog }
    }

    pub fn schema_url(&self, schema_version: &str) -> String {
        self.catalog.resolve(schema_version)
    }

    /// Build the outbound request, or `None` when a URL document is blank
    pub fn build(&self, request: &ValidationRequest) -> Option<OutboundRequest> {
        if request.document.is_blank_url() {
            return None;
        }
        let schema = self.schema_url(&request.schema_version);

        match &request.document {
            DocumentRef::Url(url) => {
                let mut query = vec![
                    ("doc".to_string(), url.clone()),
                    ("schema".to_string(), schema),
                ];
                query.extend(fixed_pairs());
                Some(OutboundRequest::Get {
                    endpoint: self.endpoint.to_string(),
                    query,
                })
            }
            DocumentRef::File { name, bytes } => Some(self.post(
                schema,
                DocumentPart::File {
                    name: name.clone(),
                    bytes: bytes.clone(),
                },
            )),
            DocumentRef::Text(text) => {
                Some(self.post(schema, DocumentPart::Content(text.clone())))
            }
        }
    }

    fn post(&self, schema: String, document: DocumentPart) -> OutboundRequest {
        let mut fields = vec![("schema".to_string(), schema)];
        fields.extend(fixed_pairs());
        OutboundRequest::Post {
            endpoint: self.endpoint.to_string(),
            fields,
            document,
        }
    }
}

fn fixed_pairs() -> impl Iterator<Item = (String, String)> {
    FIXED_PARAMETERS
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
}
