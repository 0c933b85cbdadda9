//! Click selection and marquee multi-select.

use super::{GestureContext, ToolContext, ToolKind};
use crate::elements::{Bounds, Element, ElementId};
use crate::hit::{elements_in_rect, get_hit_element};
use crate::history::Command;
use crate::scene::Scene;
use kurbo::Point;

const TOOLS: &[ToolKind] = &[ToolKind::Default, ToolKind::Move];

/// Replace the selection.
#[derive(Debug, Clone, Default)]
pub struct SetSelection(pub Vec<ElementId>);

impl Command for SetSelection {
    fn execute(&mut self, scene: &mut Scene) {
        scene.set_selected_elements(std::mem::take(&mut self.0));
    }
}

/// Grow or clear the marquee.
#[derive(Debug, Clone, Copy)]
pub struct SetSelectionRect(pub Option<Bounds>);

impl Command for SetSelectionRect {
    fn execute(&mut self, scene: &mut Scene) {
        scene.set_multi_select_rect(self.0);
    }
}

/// Resolve the marquee into a selection and discard it.
#[derive(Debug, Clone, Default)]
pub struct FinishSelection(pub Vec<ElementId>);

impl Command for FinishSelection {
    fn execute(&mut self, scene: &mut Scene) {
        log::debug!("Marquee selected {} element(s)", self.0.len());
        scene.set_selected_elements(std::mem::take(&mut self.0));
        scene.set_multi_select_rect(None);
    }
}

/// Select the element under the pointer, or clear the selection on a miss.
pub fn start(
    ctx: ToolContext<'_>,
    gesture: &mut GestureContext,
    screen: Point,
) -> Option<SetSelection> {
    if !ctx.tool_is(TOOLS) {
        return None;
    }
    gesture.select_origin = Some(ctx.world(screen));
    let hit = get_hit_element(
        ctx.scene.elements(),
        ctx.metrics,
        screen,
        ctx.scene.position(),
        ctx.config.hit_tolerance,
    );
    Some(SetSelection(hit.map(Element::id).into_iter().collect()))
}

/// Grow the marquee from the down point while nothing is being dragged.
pub fn in_progress(
    ctx: ToolContext<'_>,
    gesture: &GestureContext,
    screen: Point,
    dragging_element: bool,
) -> Option<SetSelectionRect> {
    if !ctx.tool_is(&[ToolKind::Default]) || !ctx.scene.is_mouse_down || dragging_element {
        return None;
    }
    let origin = gesture.select_origin?;
    Some(SetSelectionRect(Some(Bounds::from_corners(
        origin,
        ctx.world(screen),
    ))))
}

/// Select everything fully inside the marquee, if one was drawn.
pub fn end(ctx: ToolContext<'_>) -> Option<FinishSelection> {
    let rect = ctx.scene.multi_select_rect()?;
    Some(FinishSelection(elements_in_rect(ctx.scene.elements(), &rect)))
}
