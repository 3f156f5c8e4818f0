//! Handler attachments: the seam between wry's hooks and the bridge.
//!
//! The navigation hook routes through the protocol core's interceptor;
//! every other hook forwards to the owner's delegate unchanged.

use std::sync::Arc;

use tracing::debug;
use wry::WebViewBuilder;

use jsbridge_core::{BridgeDelegate, NavigationInterceptor, PageLoadState};

pub(crate) fn attach_navigation_handler(
    builder: WebViewBuilder<'_>,
    interceptor: NavigationInterceptor,
) -> WebViewBuilder<'_> {
    builder.with_navigation_handler(move |url| interceptor.should_navigate(&url))
}

pub(crate) fn attach_page_load_handler(
    builder: WebViewBuilder<'_>,
    delegate: Arc<dyn BridgeDelegate>,
) -> WebViewBuilder<'_> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = page_load_state(event);
        debug!(?state, url = %url, "page load");
        delegate.on_page_load(state, &url);
    })
}

pub(crate) fn attach_title_handler(
    builder: WebViewBuilder<'_>,
    delegate: Arc<dyn BridgeDelegate>,
) -> WebViewBuilder<'_> {
    builder.with_document_title_changed_handler(move |title| {
        debug!(title = %title, "title changed");
        delegate.on_title_changed(&title);
    })
}

fn page_load_state(event: wry::PageLoadEvent) -> PageLoadState {
    match event {
        wry::PageLoadEvent::Started => PageLoadState::Started,
        wry::PageLoadEvent::Finished => PageLoadState::Finished,
    }
}
