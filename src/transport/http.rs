//! HTTP transport backed by reqwest.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::request::{DocumentPart, OutboundRequest};

use super::{TransportError, ValidatorTransport};

const USER_AGENT: &str = concat!("csl-validator/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn multipart_form(fields: &[(String, String)], document: &DocumentPart) -> Form {
    let form = fields
        .iter()
        .fold(Form::new(), |form, (key, value)| form.text(key.clone(), value.clone()));

    match document {
        DocumentPart::File { name, bytes } => {
            form.part("file", Part::bytes(bytes.clone()).file_name(name.clone()))
        }
        DocumentPart::Content(text) => form.text("content", text.clone()),
    }
}

#[async_trait]
impl ValidatorTransport for HttpTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<String, TransportError> {
        let builder = match request {
            OutboundRequest::Get { endpoint, query } => self.client.get(endpoint).query(query),
            OutboundRequest::Post {
                endpoint,
                fields,
                document,
            } => self
                .client
                .post(endpoint)
                .multipart(multipart_form(fields, document)),
        };

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
