//! Navigation interception.
//!
//! Every navigation request the web view is about to perform flows through
//! [`NavigationInterceptor::should_navigate`]. Requests addressed to the
//! reserved scheme are consumed and routed to the [`Dispatcher`]; everything
//! else is decided by the owner's delegate, untouched.

use std::sync::Arc;

use tracing::{debug, error};

use crate::capability::CapabilityRegistry;
use crate::delegate::BridgeDelegate;
use crate::dispatch::Dispatcher;
use crate::encoding::{is_bridge_url, BridgeCall};
use crate::errors::DispatchError;

/// The navigation-decision hook of the bridge.
#[derive(Clone)]
pub struct NavigationInterceptor {
    registry: Arc<CapabilityRegistry>,
    delegate: Arc<dyn BridgeDelegate>,
    dispatcher: Dispatcher,
}

impl NavigationInterceptor {
    pub fn new(registry: Arc<CapabilityRegistry>, delegate: Arc<dyn BridgeDelegate>) -> Self {
        let dispatcher = Dispatcher::new(Arc::clone(&registry), Arc::clone(&delegate));
        Self {
            registry,
            delegate,
            dispatcher,
        }
    }

    /// Decide one navigation request. Returns whether the web view should
    /// perform the navigation.
    ///
    /// A bridge-addressed URL is always consumed — the page never actually
    /// navigates to it — whether or not the call inside it is valid. A
    /// failed parse or an unauthorized selector is reported through
    /// `on_bridge_fault` and affects nothing beyond this one event.
    pub fn should_navigate(&self, url: &str) -> bool {
        let scheme = self.registry.custom_scheme();
        if !is_bridge_url(url, scheme) {
            let allowed = self.delegate.should_start_load(url);
            debug!(url = %url, allowed, "navigation decision forwarded to delegate");
            return allowed;
        }

        let outcome = BridgeCall::from_url(url, scheme)
            .map_err(DispatchError::from)
            .and_then(|call| self.dispatcher.dispatch(call));
        if let Err(fault) = outcome {
            error!(url = %url, error = %fault, "bridge call failed");
            self.delegate.on_bridge_fault(&fault);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::capability::BridgeDataSource;

    struct Source;

    impl BridgeDataSource for Source {
        fn public_object_name(&self) -> Option<String> {
            Some("app".into())
        }

        fn custom_scheme(&self) -> Option<String> {
            Some("app".into())
        }

        fn public_selectors(&self) -> Vec<String> {
            vec!["showAlert".into()]
        }

        fn parameters_for(&self, selector: &str) -> Option<Vec<String>> {
            (selector == "showAlert").then(|| vec!["message".into()])
        }
    }

    /// Delegate that records callbacks and blocks configured URLs.
    struct RecordingDelegate {
        calls: Mutex<Vec<BridgeCall>>,
        faults: Mutex<Vec<String>>,
        load_decisions: Mutex<Vec<String>>,
        blocked_url: Option<String>,
    }

    impl RecordingDelegate {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                faults: Mutex::new(Vec::new()),
                load_decisions: Mutex::new(Vec::new()),
                blocked_url: None,
            }
        }

        fn blocking(url: &str) -> Self {
            Self {
                blocked_url: Some(url.to_string()),
                ..Self::new()
            }
        }
    }

    impl BridgeDelegate for RecordingDelegate {
        fn on_bridge_call(&self, call: &BridgeCall) {
            self.calls.lock().unwrap().push(call.clone());
        }

        fn on_bridge_fault(&self, error: &DispatchError) {
            self.faults.lock().unwrap().push(error.to_string());
        }

        fn should_start_load(&self, url: &str) -> bool {
            self.load_decisions.lock().unwrap().push(url.to_string());
            self.blocked_url.as_deref() != Some(url)
        }
    }

    fn interceptor_with(delegate: RecordingDelegate) -> (NavigationInterceptor, Arc<RecordingDelegate>) {
        let registry = Arc::new(CapabilityRegistry::from_data_source(&Source).unwrap());
        let delegate = Arc::new(delegate);
        (
            NavigationInterceptor::new(registry, Arc::clone(&delegate) as Arc<dyn BridgeDelegate>),
            delegate,
        )
    }

    // -- Bridge URLs are consumed --

    #[test]
    fn whitelisted_call_is_dispatched_and_navigation_suppressed() {
        let (interceptor, delegate) = interceptor_with(RecordingDelegate::new());

        let verdict = interceptor.should_navigate("app://showAlert?message=Hi%20there");

        assert!(!verdict, "bridge URL must never load");
        let calls = delegate.calls.lock().unwrap();
        assert_eq!(calls.len(), 1, "exactly one dispatch per navigation event");
        assert_eq!(calls[0].selector, "showAlert");
        assert_eq!(calls[0].params["message"], "Hi there");
    }

    #[test]
    fn unauthorized_selector_is_consumed_and_faulted() {
        let (interceptor, delegate) = interceptor_with(RecordingDelegate::new());

        let verdict = interceptor.should_navigate("app://deleteAll");

        assert!(!verdict, "even a rejected bridge URL must not load");
        assert!(delegate.calls.lock().unwrap().is_empty(), "handler never invoked");
        assert_eq!(delegate.faults.lock().unwrap().len(), 1);
    }

    #[test]
    fn malformed_bridge_url_is_consumed_and_faulted() {
        let (interceptor, delegate) = interceptor_with(RecordingDelegate::new());

        assert!(!interceptor.should_navigate("app://"));
        assert!(!interceptor.should_navigate("app://?message=orphan"));

        assert!(delegate.calls.lock().unwrap().is_empty());
        assert_eq!(delegate.faults.lock().unwrap().len(), 2);
    }

    #[test]
    fn fault_does_not_affect_subsequent_calls() {
        let (interceptor, delegate) = interceptor_with(RecordingDelegate::new());

        assert!(!interceptor.should_navigate("app://deleteAll"));
        assert!(!interceptor.should_navigate("app://showAlert?message=still%20works"));

        let calls = delegate.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].params["message"], "still works");
    }

    // -- Foreign URLs pass through --

    #[test]
    fn foreign_scheme_is_forwarded_to_delegate() {
        let (interceptor, delegate) = interceptor_with(RecordingDelegate::new());

        let verdict = interceptor.should_navigate("http://example.com");

        assert!(verdict, "delegate allowed it, verdict must be honored");
        assert_eq!(
            delegate.load_decisions.lock().unwrap().as_slice(),
            ["http://example.com"]
        );
        assert!(delegate.calls.lock().unwrap().is_empty(), "dispatcher not consulted");
        assert!(delegate.faults.lock().unwrap().is_empty());
    }

    #[test]
    fn delegate_veto_on_foreign_url_is_honored() {
        let (interceptor, _delegate) =
            interceptor_with(RecordingDelegate::blocking("https://evil.example"));

        assert!(!interceptor.should_navigate("https://evil.example"));
        assert!(interceptor.should_navigate("https://fine.example"));
    }

    #[test]
    fn scheme_casing_is_not_laundered() {
        // "APP://..." is not addressed to the bridge; it is ordinary
        // navigation and goes to the delegate.
        let (interceptor, delegate) = interceptor_with(RecordingDelegate::new());

        assert!(interceptor.should_navigate("APP://showAlert"));
        assert!(delegate.calls.lock().unwrap().is_empty());
        assert_eq!(delegate.load_decisions.lock().unwrap().len(), 1);
    }

    #[test]
    fn prefix_sibling_scheme_is_not_intercepted() {
        let (interceptor, delegate) = interceptor_with(RecordingDelegate::new());

        assert!(interceptor.should_navigate("apple://showAlert"));
        assert!(delegate.calls.lock().unwrap().is_empty());
    }
}
