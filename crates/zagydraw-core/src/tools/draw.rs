//! Rectangle, line and freehand drawing.

use super::{GestureContext, ToolContext, ToolKind};
use crate::elements::{generate_seed, Element, Rectangle};
use crate::history::{AddElement, Command};
use crate::scene::Scene;
use kurbo::Point;

const TOOLS: &[ToolKind] = &[ToolKind::Rect, ToolKind::Line, ToolKind::FreeDraw];

/// Change to the in-progress preview element.
#[derive(Debug, Clone)]
pub enum PreviewUpdate {
    Replace(Element),
    /// Append one sample to a freehand preview.
    Extend(Point),
    Clear,
}

impl Command for PreviewUpdate {
    fn execute(&mut self, scene: &mut Scene) {
        match std::mem::replace(self, PreviewUpdate::Clear) {
            PreviewUpdate::Replace(element) => scene.set_preview_element(Some(element)),
            PreviewUpdate::Extend(point) => {
                if let Some(preview) = scene.preview_element_mut() {
                    preview.push_stroke_point(point);
                }
            }
            PreviewUpdate::Clear => scene.set_preview_element(None),
        }
    }
}

/// Record the start of a shape. Returns false if no drawing tool is active.
pub fn start(ctx: ToolContext<'_>, gesture: &mut GestureContext, screen: Point) -> bool {
    match ctx.scene.tool() {
        ToolKind::Rect | ToolKind::Line => {
            gesture.start = Some(ctx.snapped(screen));
            gesture.seed = Some(generate_seed());
            true
        }
        ToolKind::FreeDraw => {
            gesture.path = vec![ctx.world(screen)];
            true
        }
        _ => false,
    }
}

/// Grow the preview while the button is held.
pub fn in_progress(
    ctx: ToolContext<'_>,
    gesture: &mut GestureContext,
    screen: Point,
) -> Option<PreviewUpdate> {
    if !ctx.scene.is_mouse_down {
        return None;
    }
    let style = &ctx.scene.style;
    match ctx.scene.tool() {
        ToolKind::Rect => {
            let (start, seed) = (gesture.start?, gesture.seed?);
            let end = ctx.snapped(screen);
            gesture.end = Some(end);
            Some(PreviewUpdate::Replace(Element::rectangle(
                start,
                end,
                style.shape.clone(),
                seed,
            )))
        }
        ToolKind::Line => {
            let (start, seed) = (gesture.start?, gesture.seed?);
            let end = ctx.snapped(screen);
            gesture.end = Some(end);
            Some(PreviewUpdate::Replace(Element::line(
                start,
                end,
                style.shape.clone(),
                seed,
            )))
        }
        ToolKind::FreeDraw => {
            if gesture.path.is_empty() {
                return None;
            }
            let point = ctx.world(screen);
            gesture.path.push(point);
            let extending = ctx
                .scene
                .preview_element()
                .and_then(Element::as_handdrawn)
                .is_some();
            if extending {
                Some(PreviewUpdate::Extend(point))
            } else {
                Some(PreviewUpdate::Replace(Element::handdrawn(
                    gesture.path.clone(),
                    style.stroke_options(),
                )))
            }
        }
        _ => None,
    }
}

/// Build the finished shape, or `None` if nothing should be committed.
pub fn end(ctx: ToolContext<'_>, gesture: &mut GestureContext) -> Option<AddElement> {
    if !ctx.tool_is(TOOLS) {
        return None;
    }
    let style = &ctx.scene.style;
    let element = match ctx.scene.tool() {
        ToolKind::Rect => {
            let element = Element::rectangle(
                gesture.start?,
                gesture.end?,
                style.shape.clone(),
                gesture.seed?,
            );
            let bounds = element.bounds();
            if !Rectangle::meets_min_size(&bounds, ctx.config.min_rect_size) {
                log::debug!(
                    "Discarding {}x{} rectangle",
                    bounds.width(),
                    bounds.height()
                );
                return None;
            }
            element
        }
        ToolKind::Line => {
            let start = gesture.start?;
            // A click without a move commits a zero-length line
            Element::line(
                start,
                gesture.end.unwrap_or(start),
                style.shape.clone(),
                gesture.seed?,
            )
        }
        ToolKind::FreeDraw => {
            if gesture.path.is_empty() {
                return None;
            }
            Element::handdrawn(std::mem::take(&mut gesture.path), style.stroke_options())
        }
        _ => return None,
    };
    Some(AddElement::new(element))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::elements::ElementKind;
    use crate::visual::ApproxTextMetrics;

    fn drawing_scene(tool: ToolKind) -> Scene {
        let mut scene = Scene::default();
        scene.set_tool(tool);
        scene.is_mouse_down = true;
        scene
    }

    fn drag(
        scene: &mut Scene,
        config: &Config,
        gesture: &mut GestureContext,
        points: &[Point],
    ) -> Option<AddElement> {
        {
            let ctx = ToolContext::new(scene, &ApproxTextMetrics, config);
            assert!(start(ctx, gesture, points[0]));
        }
        for point in &points[1..] {
            let ctx = ToolContext::new(scene, &ApproxTextMetrics, config);
            if let Some(mut update) = in_progress(ctx, gesture, *point) {
                update.execute(scene);
            }
        }
        scene.is_mouse_down = false;
        let ctx = ToolContext::new(scene, &ApproxTextMetrics, config);
        end(ctx, gesture)
    }

    #[test]
    fn test_rect_snaps_and_commits() {
        let config = Config::default();
        let mut scene = drawing_scene(ToolKind::Rect);
        let mut gesture = GestureContext::default();
        let cmd = drag(
            &mut scene,
            &config,
            &mut gesture,
            &[Point::new(12.0, 18.0), Point::new(64.0, 41.0)],
        );
        let preview = scene.preview_element().unwrap();
        assert_eq!(preview.bounds().start(), Point::new(10.0, 20.0));
        assert_eq!(preview.bounds().end(), Point::new(60.0, 40.0));
        assert!(cmd.is_some());
    }

    #[test]
    fn test_small_rect_is_discarded() {
        let config = Config::default();
        let mut scene = drawing_scene(ToolKind::Rect);
        let mut gesture = GestureContext::default();
        let cmd = drag(
            &mut scene,
            &config,
            &mut gesture,
            &[Point::new(100.0, 100.0), Point::new(200.0, 104.0)],
        );
        assert!(cmd.is_none());
    }

    #[test]
    fn test_rect_without_move_is_discarded() {
        let config = Config::default();
        let mut scene = drawing_scene(ToolKind::Rect);
        let mut gesture = GestureContext::default();
        assert!(drag(&mut scene, &config, &mut gesture, &[Point::new(100.0, 100.0)]).is_none());
    }

    #[test]
    fn test_line_has_no_threshold() {
        let config = Config::default();
        let mut scene = drawing_scene(ToolKind::Line);
        let mut gesture = GestureContext::default();
        let cmd = drag(
            &mut scene,
            &config,
            &mut gesture,
            &[Point::new(100.0, 100.0), Point::new(104.0, 100.0)],
        );
        // Snaps to a zero-length line but is still committed
        assert!(cmd.is_some());
    }

    #[test]
    fn test_line_click_commits_zero_length() {
        let config = Config::default();
        let mut scene = drawing_scene(ToolKind::Line);
        let mut gesture = GestureContext::default();
        let mut cmd = drag(&mut scene, &config, &mut gesture, &[Point::new(101.0, 99.0)]).unwrap();

        let mut target = Scene::default();
        cmd.execute(&mut target);
        let line = target.elements()[0].as_line().unwrap();
        assert_eq!(line.point1, Point::new(100.0, 100.0));
        assert_eq!(line.point2, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_freehand_accumulates_every_sample() {
        let config = Config::default();
        let mut scene = drawing_scene(ToolKind::FreeDraw);
        let mut gesture = GestureContext::default();
        let points = [
            Point::new(1.5, 1.5),
            Point::new(3.2, 4.1),
            Point::new(7.7, 2.0),
            Point::new(9.0, 9.0),
        ];
        let cmd = drag(&mut scene, &config, &mut gesture, &points);

        let preview = scene.preview_element().and_then(Element::as_handdrawn).unwrap();
        assert_eq!(preview.paths, points.to_vec());

        let mut cmd = cmd.unwrap();
        let mut target = Scene::default();
        cmd.execute(&mut target);
        match target.elements()[0].kind() {
            ElementKind::Handdrawn(stroke) => assert_eq!(stroke.paths, points.to_vec()),
            other => panic!("Expected handdrawn, got {:?}", other),
        }
        assert!(gesture.path.is_empty());
    }

    #[test]
    fn test_handlers_gated_by_tool() {
        let config = Config::default();
        let scene = drawing_scene(ToolKind::Erase);
        let mut gesture = GestureContext::default();
        let ctx = ToolContext::new(&scene, &ApproxTextMetrics, &config);
        assert!(!start(ctx, &mut gesture, Point::ZERO));
        assert!(in_progress(ctx, &mut gesture, Point::new(50.0, 50.0)).is_none());
        assert!(end(ctx, &mut gesture).is_none());
    }

    #[test]
    fn test_no_preview_without_button() {
        let config = Config::default();
        let mut scene = drawing_scene(ToolKind::Rect);
        scene.is_mouse_down = false;
        let mut gesture = GestureContext {
            start: Some(Point::ZERO),
            seed: Some(1),
            ..Default::default()
        };
        let ctx = ToolContext::new(&scene, &ApproxTextMetrics, &config);
        assert!(in_progress(ctx, &mut gesture, Point::new(50.0, 50.0)).is_none());
    }
}
