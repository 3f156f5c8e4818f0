//! Wire format for bridge calls.
//!
//! A call travels as a navigation request to a reserved custom-scheme URL:
//!
//! ```text
//! <scheme>://<selector>?<param1>=<value1>&<param2>=<value2>
//! ```
//!
//! The selector sits in the host position; parameters are a standard
//! percent-encoded query string. Both directions live here: `from_url`
//! parses an intercepted request, `to_url` renders the URL a native caller
//! (or the injected page-side stub) would produce for the same call.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use url::Url;

use crate::errors::ParseError;

/// A single parsed bridge call: the selector to invoke and its parameters.
///
/// Parameter order matches declaration order in the URL. The value lives
/// only for the dispatch that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeCall {
    /// Name of the native operation being invoked.
    pub selector: String,
    /// Decoded query parameters, in URL order.
    pub params: IndexMap<String, String>,
}

/// Whether `url` is addressed to the bridge.
///
/// The scheme comparison is an exact, case-sensitive string match on the
/// raw URL text. URL parsers normalize scheme case, so this check runs
/// before any structural parsing.
pub fn is_bridge_url(url: &str, scheme: &str) -> bool {
    !scheme.is_empty()
        && url
            .strip_prefix(scheme)
            .is_some_and(|rest| rest.starts_with(':'))
}

impl BridgeCall {
    /// Create a call with no parameters.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            params: IndexMap::new(),
        }
    }

    /// Append a parameter, preserving insertion order.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Parse a bridge call out of a navigation URL.
    ///
    /// Fails with `SchemeMismatch` when the URL is not addressed to the
    /// bridge at all, and with `MissingSelector` when the scheme matches
    /// but the selector segment is absent or empty. The latter is a
    /// protocol violation, not ordinary navigation.
    pub fn from_url(raw: &str, scheme: &str) -> Result<Self, ParseError> {
        if !is_bridge_url(raw, scheme) {
            return Err(ParseError::SchemeMismatch {
                expected: scheme.to_string(),
                url: raw.to_string(),
            });
        }

        let parsed = Url::parse(raw)?;
        let selector = match parsed.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(ParseError::MissingSelector(raw.to_string())),
        };

        // A key with no value ("?flag" or "?flag=") decodes to an empty
        // string, present in the map.
        let mut params = IndexMap::new();
        for (key, value) in parsed.query_pairs() {
            params.insert(key.into_owned(), value.into_owned());
        }

        Ok(Self { selector, params })
    }

    /// Render the call back into its URL form.
    ///
    /// Inverse of `from_url`: `from_url(&call.to_url(s), s) == call` for
    /// any call whose selector is scheme-safe and whose values are
    /// expressible in the query encoding.
    pub fn to_url(&self, scheme: &str) -> String {
        let mut url = format!("{scheme}://{}", self.selector);
        if !self.params.is_empty() {
            let mut query = form_urlencoded::Serializer::new(String::new());
            for (key, value) in &self.params {
                query.append_pair(key, value);
            }
            url.push('?');
            url.push_str(&query.finish());
        }
        url
    }
}
