//! The owner-facing delegate contract.

use serde::{Deserialize, Serialize};

use crate::encoding::BridgeCall;
use crate::errors::DispatchError;

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded.
    Finished,
}

/// Receives bridge calls and relayed web-view lifecycle events.
///
/// Only [`on_bridge_call`](BridgeDelegate::on_bridge_call) is required.
/// Everything else defaults to pass-through behavior: navigation is
/// allowed, lifecycle events are ignored, and protocol faults are logged
/// at error level.
///
/// The delegate is shared into the web view's event hooks, which require
/// `'static` closures, hence the `Send + Sync` bound. All methods are
/// invoked synchronously on the host's UI event loop.
pub trait BridgeDelegate: Send + Sync {
    /// A whitelisted call arrived from the page.
    fn on_bridge_call(&self, call: &BridgeCall);

    /// A bridge-addressed navigation could not be dispatched: the URL was
    /// malformed or named a selector outside the whitelist. The navigation
    /// has already been suppressed; this is the loud part.
    fn on_bridge_fault(&self, error: &DispatchError) {
        tracing::error!(error = %error, "bridge protocol fault");
    }

    /// Decide an ordinary (non-bridge) navigation request.
    fn should_start_load(&self, _url: &str) -> bool {
        true
    }

    /// A page load started or finished.
    fn on_page_load(&self, _state: PageLoadState, _url: &str) {}

    /// The document title changed.
    fn on_title_changed(&self, _title: &str) {}

    /// A load request issued through the bridge failed.
    fn on_load_failed(&self, _url: &str, _reason: &str) {}
}
