//! Address bar state
//!
//! Keeps the page link in sync with the current attempt so it can be shared,
//! and reads the `url` / `version` startup parameters from it.

use url::Url;

use super::document::{DocumentRef, ValidationRequest};

pub const URL_PARAM: &str = "url";
pub const VERSION_PARAM: &str = "version";

/// Parameters read from the page link at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupParams {
    pub url: Option<String>,
    pub version: Option<String>,
}

/// Current page link plus the states pushed onto the history
#[derive(Debug, Clone)]
pub struct AddressBar {
    current: Url,
    history: Vec<Url>,
}

impl AddressBar {
    pub fn new(page: Url) -> Self {
        Self {
            current: page,
            history: Vec::new(),
        }
    }

    pub fn parse(page: &str) -> Result<Self, url::ParseError> {
        Url::parse(page).map(Self::new)
    }

    pub fn current(&self) -> &Url {
        &self.current
    }

    /// Every state pushed so far, oldest first
    pub fn history(&self) -> &[Url] {
        &self.history
    }

    pub fn query_param(&self, key: &str) -> Option<String> {
        self.current
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    pub fn startup_params(&self) -> StartupParams {
        StartupParams {
            url: self.query_param(URL_PARAM),
            version: self.query_param(VERSION_PARAM),
        }
    }

    /// Mirror an attempt into the link without navigating.
    ///
    /// URL attempts record the document and schema version, other methods clear the query.
    pub fn sync(&mut self, request: &ValidationRequest) {
        let mut next = self.current.clone();
        match &request.document {
            DocumentRef::Url(url) => {
                set_search(&mut next, URL_PARAM, url);
                set_search(&mut next, VERSION_PARAM, &request.schema_version);
            }
            DocumentRef::File { .. } | DocumentRef::Text(_) => next.set_query(None),
        }
        self.push_state(next);
    }

    fn push_state(&mut self, url: Url) {
        log::debug!("Address bar now {}", url);
        self.history.push(url.clone());
        self.current = url;
    }
}

/// Replace every value of `key` with a single `value`, keeping other pairs in order
fn set_search(url: &mut Url, key: &str, value: &str) {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(key, value);
}
