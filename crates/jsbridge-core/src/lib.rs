//! Protocol core for the JS-to-native webview bridge.
//!
//! Script code inside an embedded web view calls native operations by
//! navigating to a reserved custom-scheme URL; native code declares which
//! operations are callable through a data source, and receives validated
//! calls through a delegate. This crate holds everything that does not
//! touch the platform web view:
//! - Wire format: parsing and rendering `scheme://selector?k=v` call URLs
//! - Capability registry: the whitelist of public selectors
//! - Dispatch: validation of a parsed call and forwarding to the delegate
//! - Interception: the navigation-decision logic
//! - Script stubs: the injected `window.<name>.<selector>(...)` JS object
//!
//! The `jsbridge-webview` crate wires these into a `wry` web view.

pub mod capability;
pub mod delegate;
pub mod dispatch;
pub mod encoding;
pub mod errors;
pub mod interceptor;
pub mod scripting;

pub use capability::{BridgeConfig, BridgeDataSource, Capability, CapabilityRegistry};
pub use delegate::{BridgeDelegate, PageLoadState};
pub use dispatch::Dispatcher;
pub use encoding::{is_bridge_url, BridgeCall};
pub use errors::{ConfigError, DispatchError, ParseError};
pub use interceptor::NavigationInterceptor;
pub use scripting::build_init_script;
