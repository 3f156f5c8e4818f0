//! Capability whitelist and bridge configuration.
//!
//! The owner declares what the page may call through a [`BridgeDataSource`]:
//! a public object name for the injected JS stub, the reserved URL scheme,
//! the list of public selectors, and per-selector declared parameter names.
//! The registry is built once at bridge construction and is read-only for
//! the rest of the bridge's lifetime.

use indexmap::IndexMap;
use tracing::debug;

use crate::errors::ConfigError;

/// Supplies the bridge's whitelist and naming.
///
/// A `None` or empty answer for the object name or scheme is a contract
/// violation and fails registry construction; there are no defaults.
pub trait BridgeDataSource {
    /// Name of the JS object installed on `window` for page code to call.
    fn public_object_name(&self) -> Option<String>;

    /// URL scheme reserved for bridge calls, used verbatim.
    fn custom_scheme(&self) -> Option<String>;

    /// Selectors the page is allowed to invoke.
    fn public_selectors(&self) -> Vec<String>;

    /// Declared parameter names for a selector, in calling order.
    /// `None` means the selector takes no declared parameters.
    fn parameters_for(&self, selector: &str) -> Option<Vec<String>>;
}

/// One whitelisted native operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    /// Unique selector name.
    pub selector: String,
    /// Declared parameter names, in calling order. Informational: runtime
    /// calls are not checked against this list.
    pub expected_params: Vec<String>,
}

/// Bridge-wide naming, fetched once from the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Name of the injected `window.<name>` object.
    pub public_object_name: String,
    /// Reserved URL scheme for bridge calls.
    pub custom_scheme: String,
}

/// The closed set of selectors the bridge will forward to native code.
#[derive(Debug, Clone)]
pub struct CapabilityRegistry {
    config: BridgeConfig,
    capabilities: IndexMap<String, Capability>,
}

impl CapabilityRegistry {
    /// Build the registry by querying the data source.
    ///
    /// Fails on a missing/empty object name or scheme, on empty or
    /// duplicate selectors, and on any name that cannot be spliced into
    /// the generated stub script as an identifier.
    pub fn from_data_source(source: &dyn BridgeDataSource) -> Result<Self, ConfigError> {
        let public_object_name = match source.public_object_name() {
            Some(name) if !name.is_empty() => name,
            _ => return Err(ConfigError::MissingObjectName),
        };
        if !is_js_identifier(&public_object_name) {
            return Err(ConfigError::InvalidObjectName(public_object_name));
        }

        let custom_scheme = match source.custom_scheme() {
            Some(scheme) if !scheme.is_empty() => scheme,
            _ => return Err(ConfigError::MissingScheme),
        };
        if !is_url_scheme(&custom_scheme) {
            return Err(ConfigError::InvalidScheme(custom_scheme));
        }

        let mut capabilities = IndexMap::new();
        for selector in source.public_selectors() {
            if selector.is_empty() {
                return Err(ConfigError::EmptySelector);
            }
            if !is_js_identifier(&selector) {
                return Err(ConfigError::InvalidSelector(selector));
            }
            if capabilities.contains_key(&selector) {
                return Err(ConfigError::DuplicateSelector(selector));
            }
            let expected_params = source.parameters_for(&selector).unwrap_or_default();
            capabilities.insert(
                selector.clone(),
                Capability {
                    selector,
                    expected_params,
                },
            );
        }

        debug!(
            scheme = %custom_scheme,
            object = %public_object_name,
            selectors = capabilities.len(),
            "capability registry built"
        );

        Ok(Self {
            config: BridgeConfig {
                public_object_name,
                custom_scheme,
            },
            capabilities,
        })
    }

    /// Whether the page may invoke `selector`.
    pub fn is_callable(&self, selector: &str) -> bool {
        self.capabilities.contains_key(selector)
    }

    /// Declared parameter names for `selector`, `None` if not registered.
    pub fn expected_parameters(&self, selector: &str) -> Option<&[String]> {
        self.capabilities
            .get(selector)
            .map(|c| c.expected_params.as_slice())
    }

    /// All capabilities, in declaration order.
    pub fn capabilities(&self) -> impl Iterator<Item = &Capability> {
        self.capabilities.values()
    }

    /// Bridge-wide naming.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The reserved URL scheme.
    pub fn custom_scheme(&self) -> &str {
        &self.config.custom_scheme
    }

    /// The injected JS object name.
    pub fn public_object_name(&self) -> &str {
        &self.config.public_object_name
    }

    /// Number of whitelisted selectors.
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// Whether the whitelist is empty.
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

/// ASCII JS identifier: `[A-Za-z_$][A-Za-z0-9_$]*`.
///
/// Object and selector names end up as property names in generated page
/// script; restricting them to identifiers is what makes that splice safe.
fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// RFC 3986 scheme: `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
fn is_url_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
