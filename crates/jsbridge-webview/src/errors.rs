use jsbridge_core::ConfigError;

/// Construction and platform failures of the bridged web view.
#[derive(Debug, thiserror::Error)]
pub enum BridgeViewError {
    /// The data source broke its contract; the bridge refuses to start.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The underlying web view failed.
    #[error("webview error: {0}")]
    WebView(#[from] wry::Error),
}
