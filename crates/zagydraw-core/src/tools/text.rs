//! Inline text entry.

use super::{PreviewUpdate, ToolContext, ToolKind};
use crate::elements::Element;
use crate::history::AddElement;
use kurbo::Point;

/// An open text-entry overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntry {
    /// World anchor of the overlay's top-left corner.
    pub anchor: Point,
    /// Content as last reported by the overlay.
    pub content: String,
}

/// Open an overlay at the (unsnapped) pointer position.
pub fn start(
    ctx: ToolContext<'_>,
    entry: &mut Option<TextEntry>,
    screen: Point,
) -> Option<PreviewUpdate> {
    if !ctx.tool_is(&[ToolKind::Text]) || entry.is_some() {
        return None;
    }
    let anchor = ctx.world(screen);
    *entry = Some(TextEntry {
        anchor,
        content: String::new(),
    });
    Some(PreviewUpdate::Replace(Element::text(
        anchor,
        "",
        ctx.scene.style.text_options(),
        ctx.metrics,
    )))
}

/// Live update from the overlay.
pub fn input(
    ctx: ToolContext<'_>,
    entry: &mut Option<TextEntry>,
    content: &str,
) -> Option<PreviewUpdate> {
    let entry = entry.as_mut()?;
    entry.content = content.to_string();
    Some(PreviewUpdate::Replace(Element::text(
        entry.anchor,
        content,
        ctx.scene.style.text_options(),
        ctx.metrics,
    )))
}

/// Close the overlay and build the committed element from `final_text`.
///
/// Empty input closes the overlay without committing.
pub fn blur(
    ctx: ToolContext<'_>,
    entry: &mut Option<TextEntry>,
    final_text: &str,
) -> Option<AddElement> {
    let entry = entry.take()?;
    if final_text.is_empty() {
        log::debug!("Discarding empty text entry");
        return None;
    }
    Some(AddElement::new(Element::text(
        entry.anchor,
        final_text,
        ctx.scene.style.text_options(),
        ctx.metrics,
    )))
}
