//! Validation and forwarding of parsed bridge calls.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::capability::CapabilityRegistry;
use crate::delegate::BridgeDelegate;
use crate::encoding::BridgeCall;
use crate::errors::DispatchError;

/// Checks a parsed call against the whitelist and hands it to the delegate.
///
/// Stateless between calls: each dispatch stands alone, and one navigation
/// event produces at most one dispatch.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<CapabilityRegistry>,
    delegate: Arc<dyn BridgeDelegate>,
}

impl Dispatcher {
    pub fn new(registry: Arc<CapabilityRegistry>, delegate: Arc<dyn BridgeDelegate>) -> Self {
        Self { registry, delegate }
    }

    /// Forward `call` to the delegate if its selector is whitelisted.
    ///
    /// An unknown selector is a security error, not a no-op. Declared
    /// parameter lists are not checked against the call's parameters.
    pub fn dispatch(&self, call: BridgeCall) -> Result<(), DispatchError> {
        if !self.registry.is_callable(&call.selector) {
            warn!(selector = %call.selector, "bridge call rejected: selector not public");
            return Err(DispatchError::UnauthorizedSelector(call.selector));
        }

        debug!(
            selector = %call.selector,
            params = call.params.len(),
            "dispatching bridge call"
        );
        self.delegate.on_bridge_call(&call);
        Ok(())
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

        fn parameters_for(&self, _selector: &str) -> Option<Vec<String>> {
            Some(vec!["message".into()])
        }
    }

    /// Records every forwarded call.
    #[derive(Default)]
    struct RecordingDelegate {
        calls: Mutex<Vec<BridgeCall>>,
    }

    impl BridgeDelegate for RecordingDelegate {
        fn on_bridge_call(&self, call: &BridgeCall) {
            self.calls.lock().unwrap().push(call.clone());
        }
    }

    fn dispatcher() -> (Dispatcher, Arc<RecordingDelegate>) {
        let registry = Arc::new(CapabilityRegistry::from_data_source(&Source).unwrap());
        let delegate = Arc::new(RecordingDelegate::default());
        (
            Dispatcher::new(registry, Arc::clone(&delegate) as Arc<dyn BridgeDelegate>),
            delegate,
        )
    }

    #[test]
    fn whitelisted_call_reaches_delegate_once() {
        let (dispatcher, delegate) = dispatcher();
        let call = BridgeCall::new("showAlert").with_param("message", "Hi there");

        dispatcher.dispatch(call.clone()).unwrap();

        let calls = delegate.calls.lock().unwrap();
        assert_eq!(calls.len(), 1, "exactly one delegate invocation");
        assert_eq!(calls[0], call);
    }

    #[test]
    fn unknown_selector_is_rejected_without_delegate_call() {
        let (dispatcher, delegate) = dispatcher();

        let err = dispatcher.dispatch(BridgeCall::new("deleteAll")).unwrap_err();

        assert!(matches!(err, DispatchError::UnauthorizedSelector(s) if s == "deleteAll"));
        assert!(delegate.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn rejection_does_not_poison_later_dispatches() {
        let (dispatcher, delegate) = dispatcher();

        assert!(dispatcher.dispatch(BridgeCall::new("deleteAll")).is_err());
        assert!(dispatcher.dispatch(BridgeCall::new("showAlert")).is_ok());
        assert_eq!(delegate.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn declared_parameters_are_not_enforced() {
        // "showAlert" declares ["message"], but a call with other keys,
        // extra keys, or none at all still dispatches.
        let (dispatcher, delegate) = dispatcher();

        dispatcher.dispatch(BridgeCall::new("showAlert")).unwrap();
        dispatcher
            .dispatch(
                BridgeCall::new("showAlert")
                    .with_param("message", "hi")
                    .with_param("severity", "high"),
            )
            .unwrap();
        dispatcher
            .dispatch(BridgeCall::new("showAlert").with_param("unrelated", "x"))
            .unwrap();

        assert_eq!(delegate.calls.lock().unwrap().len(), 3);
    }
}
