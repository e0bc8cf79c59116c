//! Renderer factory and extension descriptor consumed by the host's extension loader.

use std::rc::Rc;

use leptos::logging;
use notify_contract::MIME_TYPE;
use platform_host::{CapabilityStatus, HostServices, RenderSurface};

use crate::{
    config::{load_renderer_config, NotifyRendererConfig},
    renderer::NotifyRenderer,
    RenderError,
};

/// Stable identifier of the desktop-notify extension.
pub const EXTENSION_ID: &str = "desktop-notify:plugin";

/// Options the host passes when it instantiates a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererOptions {
    /// Media type the new renderer will be asked to render.
    pub mime_type: String,
}

impl RendererOptions {
    /// Options for `mime_type`.
    pub fn new(mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
        }
    }
}

/// How the host should hand output data to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionDataType {
    /// Structured JSON values.
    Json,
    /// Plain strings.
    String,
}

/// Creates renderers for the media types it declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererFactory {
    /// Whether output may be rendered without the host trusting it.
    pub safe: bool,
    /// Media types this factory handles.
    pub mime_types: &'static [&'static str],
}

impl RendererFactory {
    /// Returns whether `mime_type` is one of the declared media types.
    pub fn handles(&self, mime_type: &str) -> bool {
        self.mime_types.iter().any(|handled| *handled == mime_type)
    }

    /// Instantiates a renderer bound to one output surface.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnsupportedMimeType`] when `options` names a media type this
    /// factory does not declare.
    pub fn create_renderer(
        &self,
        options: RendererOptions,
        services: HostServices,
        surface: Rc<dyn RenderSurface>,
        config: NotifyRendererConfig,
    ) -> Result<NotifyRenderer, RenderError> {
        if !self.handles(&options.mime_type) {
            return Err(RenderError::UnsupportedMimeType {
                mime_type: options.mime_type,
            });
        }
        Ok(NotifyRenderer::new(
            options.mime_type,
            services,
            surface,
            config,
        ))
    }
}

/// Descriptor registered with the host's mime renderer registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderMimeExtension {
    /// Stable extension id.
    pub id: &'static str,
    /// Priority among competing renderers; lower is less preferred.
    pub rank: i32,
    /// Data representation the renderer expects.
    pub data_type: ExtensionDataType,
    /// Factory creating renderers for this extension.
    pub renderer_factory: RendererFactory,
}

impl RenderMimeExtension {
    /// Returns whether this extension renders `mime_type`.
    pub fn handles(&self, mime_type: &str) -> bool {
        self.renderer_factory.handles(mime_type)
    }

    /// Loads renderer settings from host preferences and announces activation.
    ///
    /// Hosts without preference storage get the default settings.
    pub async fn activate(&self, services: &HostServices) -> NotifyRendererConfig {
        let config = if services.capabilities.prefs == CapabilityStatus::Unavailable {
            NotifyRendererConfig::default()
        } else {
            load_renderer_config(services.prefs.as_ref()).await
        };
        logging::log!(
            "desktop-notify render activated ({}, host `{}`)",
            self.id,
            services.host_strategy.as_str()
        );
        config
    }
}

/// The desktop-notify extension descriptor.
pub const fn extension() -> RenderMimeExtension {
    RenderMimeExtension {
        id: EXTENSION_ID,
        rank: 0,
        data_type: ExtensionDataType::Json,
        renderer_factory: RendererFactory {
            safe: true,
            mime_types: &[MIME_TYPE],
        },
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{save_pref_with, HeadlessHost, MemoryRenderSurface};

    use super::*;
    use crate::config::RENDERER_CONFIG_PREF_KEY;

    #[test]
    fn descriptor_registers_one_safe_json_media_type() {
        let extension = extension();
        assert_eq!(extension.id, "desktop-notify:plugin");
        assert_eq!(extension.rank, 0);
        assert_eq!(extension.data_type, ExtensionDataType::Json);
        assert!(extension.renderer_factory.safe);
        assert_eq!(
            extension.renderer_factory.mime_types,
            &["application/desktop-notify+json"]
        );
        assert!(extension.handles(MIME_TYPE));
        assert!(!extension.handles("application/json"));
    }

    #[test]
    fn factory_rejects_foreign_media_types() {
        let host = HeadlessHost::default();
        let err = extension()
            .renderer_factory
            .create_renderer(
                RendererOptions::new("text/html"),
                host.services(),
                Rc::new(MemoryRenderSurface::default()),
                NotifyRendererConfig::default(),
            )
            .expect_err("text/html is not handled");
        assert_eq!(
            err,
            RenderError::UnsupportedMimeType {
                mime_type: "text/html".to_string()
            }
        );
    }

    #[test]
    fn activation_loads_stored_config() {
        let host = HeadlessHost::default();
        let stored = NotifyRendererConfig {
            icon: "/lab/bell.png".to_string(),
            ..NotifyRendererConfig::default()
        };
        block_on(save_pref_with(&host.prefs, RENDERER_CONFIG_PREF_KEY, &stored)).expect("save");

        let services = host.services();
        let config = block_on(extension().activate(&services));
        assert_eq!(config, stored);

        let renderer = extension()
            .renderer_factory
            .create_renderer(
                RendererOptions::new(MIME_TYPE),
                services,
                Rc::new(MemoryRenderSurface::default()),
                config,
            )
            .expect("create");
        assert_eq!(renderer.mime_type(), MIME_TYPE);
        assert_eq!(renderer.config().icon, "/lab/bell.png");
    }

    #[test]
    fn activation_without_prefs_capability_uses_defaults() {
        let host = HeadlessHost::default();
        let stored = NotifyRendererConfig {
            icon: "/lab/bell.png".to_string(),
            ..NotifyRendererConfig::default()
        };
        block_on(save_pref_with(&host.prefs, RENDERER_CONFIG_PREF_KEY, &stored)).expect("save");

        let mut services = host.services();
        services.capabilities.prefs = CapabilityStatus::Unavailable;
        assert_eq!(
            block_on(extension().activate(&services)),
            NotifyRendererConfig::default()
        );
    }
}
