//! `wry`-backed host glue for the JS-to-native bridge.
//!
//! Owns the platform web view and keeps it opaque to the owner:
//! - Wires the protocol core's interceptor into wry's navigation hook
//! - Injects the generated `window.<name>` stub script into every page
//! - Forwards page-load and title events to the owner's delegate
//! - Exposes load / reload / evaluate-script without handing out the
//!   underlying `wry::WebView`

pub mod errors;
pub mod handlers;
pub mod types;
pub mod view;

pub use errors::BridgeViewError;
pub use types::BridgeViewConfig;
pub use view::WebViewBridge;
