//! Renderer abstraction.
//!
//! The engine never draws. After every state change it hands the current page
//! to a [`Renderer`], which owns whatever surface handles it needs and may
//! rebuild them from scratch each time.

use crate::shapes::Shape;
use kurbo::Size;

/// Everything needed to redraw the current page.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    /// Committed objects in z-order (back to front).
    pub objects: &'a [Shape],
    /// The gesture in progress, drawn above every committed object.
    pub preview: Option<&'a Shape>,
    /// Index of the displayed page.
    pub page_index: usize,
    pub page_count: usize,
    /// Logical size of the page.
    pub page_size: Size,
}

impl RenderFrame<'_> {
    /// Shapes in paint order, preview last.
    pub fn paint_order(&self) -> impl Iterator<Item = &Shape> {
        self.objects.iter().chain(self.preview)
    }
}

/// Redraw callback.
///
/// Implementations must treat the frame as read-only. They may be called on
/// every drag event.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame<'_>);
}

impl<F> Renderer for F
where
    F: FnMut(&RenderFrame<'_>),
{
    fn render(&mut self, frame: &RenderFrame<'_>) {
        self(frame)
    }
}
