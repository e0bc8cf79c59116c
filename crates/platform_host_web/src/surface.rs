//! DOM-backed render surface.

use platform_host::{RenderSurface, SurfaceBlock};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Surface writing into the host element with the given DOM id.
///
/// Block text is assigned with `textContent`, so record ids and messages are never parsed as
/// markup.
pub struct WebRenderSurface {
    host_element_id: String,
}

impl WebRenderSurface {
    /// Surface bound to the element `host_element_id`.
    pub fn new(host_element_id: impl Into<String>) -> Self {
        Self {
            host_element_id: host_element_id.into(),
        }
    }

    /// DOM id of the host element.
    pub fn host_element_id(&self) -> &str {
        &self.host_element_id
    }

    #[cfg(target_arch = "wasm32")]
    fn host_element(&self) -> Option<(web_sys::Document, web_sys::Element)> {
        let document = web_sys::window()?.document()?;
        let element = document.get_element_by_id(&self.host_element_id)?;
        Some((document, element))
    }
}

impl RenderSurface for WebRenderSurface {
    fn replace_with(&self, block: SurfaceBlock) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some((document, host)) = self.host_element() else {
                return;
            };
            let Ok(node) = document.create_element("div") else {
                return;
            };
            node.set_id(&block.id);
            node.set_text_content(Some(&block.text));
            host.set_text_content(None);
            let _ = host.append_child(&node);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = block;
        }
    }
}
