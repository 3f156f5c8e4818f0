//! The owner-facing bridged web view.
//!
//! `WebViewBridge` owns the `wry::WebView` outright. The owner can place,
//! load, and script the view through the bridge, but never reaches the raw
//! control — re-wiring its handlers behind the bridge would punch a hole
//! in the whitelist.

use std::sync::Arc;

use tracing::{debug, warn};
use wry::raw_window_handle;
use wry::{WebView, WebViewBuilder};

use jsbridge_core::{
    build_init_script, BridgeDataSource, BridgeDelegate, CapabilityRegistry,
    NavigationInterceptor,
};

use crate::errors::BridgeViewError;
use crate::handlers;
use crate::types::BridgeViewConfig;

/// A web view whose navigation path runs through the bridge.
pub struct WebViewBridge {
    webview: WebView,
    registry: Arc<CapabilityRegistry>,
    delegate: Arc<dyn BridgeDelegate>,
    /// Current URL (best-effort tracking).
    current_url: String,
}

impl WebViewBridge {
    /// Build the bridge and its web view as a child of `window`.
    ///
    /// The capability registry is built from `data_source` first; a broken
    /// data-source contract aborts here, before any page can navigate.
    pub fn attach<W: raw_window_handle::HasWindowHandle>(
        window: &W,
        bounds: wry::Rect,
        config: BridgeViewConfig,
        data_source: &dyn BridgeDataSource,
        delegate: Arc<dyn BridgeDelegate>,
    ) -> Result<Self, BridgeViewError> {
        let registry = Arc::new(CapabilityRegistry::from_data_source(data_source)?);
        let init_script = build_init_script(&registry);
        let interceptor =
            NavigationInterceptor::new(Arc::clone(&registry), Arc::clone(&delegate));

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_transparent(config.transparent)
            .with_devtools(config.devtools)
            .with_focused(false)
            .with_initialization_script(init_script.as_str());

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = handlers::attach_navigation_handler(builder, interceptor);
        builder = handlers::attach_page_load_handler(builder, Arc::clone(&delegate));
        builder = handlers::attach_title_handler(builder, Arc::clone(&delegate));

        let initial_url;
        if let Some(url) = &config.url {
            builder = builder.with_url(url);
            initial_url = url.clone();
        } else if let Some(html) = &config.html {
            builder = builder.with_html(html);
            initial_url = "about:blank".to_string();
        } else {
            builder = builder.with_html("<html><body></body></html>");
            initial_url = "about:blank".to_string();
        }

        let webview = builder.build_as_child(window)?;

        debug!(
            scheme = registry.custom_scheme(),
            object = registry.public_object_name(),
            url = %initial_url,
            "bridge webview created"
        );

        Ok(Self {
            webview,
            registry,
            delegate,
            current_url: initial_url,
        })
    }

    /// The capability whitelist this view is running under.
    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Get the current URL.
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    /// Navigate to a URL. A synchronous failure is reported to the
    /// delegate's `on_load_failed` and returned.
    pub fn load_url(&mut self, url: &str) -> Result<(), wry::Error> {
        self.current_url = url.to_string();
        if let Err(error) = self.webview.load_url(url) {
            warn!(url = %url, error = %error, "load request failed");
            self.delegate.on_load_failed(url, &error.to_string());
            return Err(error);
        }
        Ok(())
    }

    /// Load raw HTML content.
    pub fn load_html(&mut self, html: &str) -> Result<(), wry::Error> {
        self.current_url = "about:blank".to_string();
        if let Err(error) = self.webview.load_html(html) {
            warn!(error = %error, "load html failed");
            self.delegate
                .on_load_failed(&self.current_url, &error.to_string());
            return Err(error);
        }
        Ok(())
    }

    /// Reload the current page.
    pub fn reload(&self) -> Result<(), wry::Error> {
        self.webview.reload()
    }

    /// Execute JavaScript in the web view context.
    pub fn evaluate_script(&self, js: &str) -> Result<(), wry::Error> {
        self.webview.evaluate_script(js)
    }

    /// Set the web view bounds (position + size) within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    /// Show or hide the web view.
    pub fn set_visible(&self, visible: bool) -> Result<(), wry::Error> {
        self.webview.set_visible(visible)
    }

    /// Focus the web view.
    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }
}
