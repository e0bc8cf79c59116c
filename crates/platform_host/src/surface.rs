//! Render-surface contracts for inline renderer output.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

/// One addressable inline text block placed on a renderer surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceBlock {
    /// Element id used to address the block.
    pub id: String,
    /// Plain text content. Hosts must not interpret it as markup.
    pub text: String,
}

impl SurfaceBlock {
    /// Creates a block with the given element id and text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Host-owned visual area handed to one renderer instance.
pub trait RenderSurface {
    /// Replaces everything on the surface with `block`.
    fn replace_with(&self, block: SurfaceBlock);
}

#[derive(Debug, Clone, Copy, Default)]
/// Surface that discards everything, for renderers without visible output.
pub struct NoopRenderSurface;

impl RenderSurface for NoopRenderSurface {
    fn replace_with(&self, _block: SurfaceBlock) {}
}

#[derive(Debug, Default)]
struct MemorySurfaceState {
    content: Option<SurfaceBlock>,
    writes: usize,
}

#[derive(Debug, Clone, Default)]
/// In-memory surface that keeps the current block and counts writes.
pub struct MemoryRenderSurface {
    inner: Rc<RefCell<MemorySurfaceState>>,
}

impl MemoryRenderSurface {
    /// Current block, if any.
    pub fn content(&self) -> Option<SurfaceBlock> {
        self.inner.borrow().content.clone()
    }

    /// Number of `replace_with` calls observed.
    pub fn writes(&self) -> usize {
        self.inner.borrow().writes
    }

    /// Finds the current block by element id.
    pub fn find(&self, id: &str) -> Option<SurfaceBlock> {
        self.content().filter(|block| block.id == id)
    }
}

impl RenderSurface for MemoryRenderSurface {
    fn replace_with(&self, block: SurfaceBlock) {
        let mut state = self.inner.borrow_mut();
        state.content = Some(block);
        state.writes += 1;
    }
}
