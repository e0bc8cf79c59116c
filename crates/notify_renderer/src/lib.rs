//! Desktop-notify mime renderer.
//!
//! Renders `application/desktop-notify+json` cell output as a platform notification and marks
//! the output processed so replays of the same notebook do not notify again. Platform access
//! goes through the [`platform_host::HostServices`] bundle handed to the renderer factory.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod extension;
pub mod model;
pub mod renderer;

use notify_contract::ContractError;
use thiserror::Error;

pub use config::{
    load_renderer_config, NotifyRendererConfig, DEFAULT_NOTIFICATION_ICON,
    MISSING_PERMISSION_MESSAGE, RENDERER_CONFIG_PREF_KEY,
};
pub use extension::{
    extension, ExtensionDataType, RenderMimeExtension, RendererFactory, RendererOptions,
    EXTENSION_ID,
};
pub use model::{ListenerId, MimeModel, MimeModelSnapshot};
pub use renderer::{
    should_request_permission, NotifyRenderer, RenderOutcome, DECODE_ERROR_BLOCK_ID,
};

/// Errors returned to the host from renderer construction and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The output does not hold a well-formed record.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// The host asked for a renderer of a media type this extension does not declare.
    #[error("desktop-notify does not render `{mime_type}`")]
    UnsupportedMimeType {
        /// Requested media type.
        mime_type: String,
    },
}
