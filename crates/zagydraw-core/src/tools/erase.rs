//! Eraser: flag elements while dragging, remove them on release.

use super::{GestureContext, ToolContext, ToolKind};
use crate::elements::ElementId;
use crate::hit::get_hit_element;
use crate::history::{Command, EraseElements};
use crate::scene::Scene;
use kurbo::Point;

/// Mark one element as pending deletion.
#[derive(Debug, Clone, Copy)]
pub struct FlagForDelete(pub ElementId);

impl Command for FlagForDelete {
    fn execute(&mut self, scene: &mut Scene) {
        if let Some(element) = scene.element_mut(self.0) {
            log::trace!("Flagging {} for deletion", self.0);
            element.will_delete = true;
        }
    }
}

/// Flag the element under the pointer while the button is held.
pub fn in_progress(
    ctx: ToolContext<'_>,
    gesture: &mut GestureContext,
    screen: Point,
) -> Option<FlagForDelete> {
    if !ctx.tool_is(&[ToolKind::Erase]) || !ctx.scene.is_mouse_down {
        return None;
    }
    let hit = get_hit_element(
        ctx.scene.elements(),
        ctx.metrics,
        screen,
        ctx.scene.position(),
        ctx.config.hit_tolerance,
    )?;
    gesture.will_delete = true;
    if hit.will_delete {
        return None;
    }
    Some(FlagForDelete(hit.id()))
}

/// Remove every flagged element, if anything was flagged.
pub fn end(ctx: ToolContext<'_>, gesture: &GestureContext) -> Option<EraseElements> {
    if !ctx.tool_is(&[ToolKind::Erase]) || !gesture.will_delete {
        return None;
    }
    Some(EraseElements::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::elements::{Element, ShapeOptions};
    use crate::visual::ApproxTextMetrics;

    #[test]
    fn test_flag_only_while_pressed() {
        let config = Config::default();
        let mut scene = Scene::default();
        scene.set_tool(ToolKind::Erase);
        scene.push_element(Element::rectangle(
            Point::ZERO,
            Point::new(50.0, 50.0),
            ShapeOptions::default(),
            1,
        ));
        let mut gesture = GestureContext::default();

        {
            let ctx = ToolContext::new(&scene, &ApproxTextMetrics, &config);
            assert!(in_progress(ctx, &mut gesture, Point::new(25.0, 25.0)).is_none());
            assert!(end(ctx, &gesture).is_none());
        }

        scene.is_mouse_down = true;
        let mut cmd = {
            let ctx = ToolContext::new(&scene, &ApproxTextMetrics, &config);
            in_progress(ctx, &mut gesture, Point::new(25.0, 25.0)).unwrap()
        };
        cmd.execute(&mut scene);
        assert!(scene.elements()[0].will_delete);
        assert!(gesture.will_delete);

        let ctx = ToolContext::new(&scene, &ApproxTextMetrics, &config);
        // Already flagged
        assert!(in_progress(ctx, &mut gesture, Point::new(25.0, 25.0)).is_none());
        assert!(end(ctx, &gesture).is_some());
    }
}
