//! Hover-to-move and drag of a single element.
//!
//! A drag writes only the bounding box on each move. Line endpoints and
//! stroke paths are shifted once, when [`MoveCommit`] executes, so cached
//! visuals are not rebuilt every frame.

use super::{ToolContext, ToolKind};
use crate::elements::{Bounds, ElementId, SecondaryGeometry};
use crate::geometry::snap_to_grid;
use crate::hit::get_hit_element;
use crate::history::{Command, UndoableCommand};
use crate::scene::Scene;
use kurbo::Point;

const TOOLS: &[ToolKind] = &[ToolKind::Default, ToolKind::Move];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Captured {
    id: ElementId,
    /// World bounds at capture time.
    before: Bounds,
}

/// Scratch state of the move tool between events.
#[derive(Debug, Default)]
pub struct MoveElementAction {
    captured: Option<Captured>,
    /// Screen point of the pointer-down that started the drag.
    last_down: Option<Point>,
    dragging: bool,
}

/// Result of a move-tool event.
#[derive(Debug, Clone, Copy)]
pub enum MoveUpdate {
    /// Hovering changed the active tool.
    Tool(ToolKind),
    /// Live drag step: new bounding box only.
    Step { id: ElementId, bounds: Bounds },
}

impl Command for MoveUpdate {
    fn execute(&mut self, scene: &mut Scene) {
        match *self {
            MoveUpdate::Tool(tool) => scene.set_tool(tool),
            MoveUpdate::Step { id, bounds } => {
                if let Some(element) = scene.element_mut(id) {
                    log::trace!("Drag {} to ({}, {})", id, bounds.x, bounds.y);
                    element.set_bounds(bounds);
                }
            }
        }
    }
}

impl MoveElementAction {
    /// Id of the element under the pointer or being dragged.
    pub fn captured(&self) -> Option<ElementId> {
        self.captured.map(|c| c.id)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn hit(ctx: ToolContext<'_>, screen: Point) -> Option<Captured> {
        get_hit_element(
            ctx.scene.visible_elements(),
            ctx.metrics,
            screen,
            ctx.scene.position(),
            ctx.config.hit_tolerance,
        )
        .map(|el| Captured {
            id: el.id(),
            before: el.bounds(),
        })
    }

    /// Capture the element under the down point and its current bounds.
    pub fn start(&mut self, ctx: ToolContext<'_>, screen: Point) -> Option<MoveUpdate> {
        if !ctx.tool_is(TOOLS) {
            return None;
        }
        self.last_down = Some(screen);
        self.dragging = false;
        self.captured = Self::hit(ctx, screen);
        self.tool_update(ctx)
    }

    /// Hover while the button is up; drag the captured element while it is down.
    pub fn in_progress(&mut self, ctx: ToolContext<'_>, screen: Point) -> Option<MoveUpdate> {
        if !ctx.tool_is(TOOLS) {
            return None;
        }
        if !ctx.scene.is_mouse_down {
            self.captured = Self::hit(ctx, screen);
            return self.tool_update(ctx);
        }
        let captured = self.captured?;
        let last_down = self.last_down?;
        self.dragging = true;

        let before = captured.before;
        let start = snap_to_grid(before.start() + (screen - last_down), ctx.config.grid_size);
        Some(MoveUpdate::Step {
            id: captured.id,
            bounds: before.translated(start - before.start()),
        })
    }

    /// Finish the drag. Always clears the captured element.
    ///
    /// Returns `None` when nothing was dragged or the net offset is zero.
    pub fn end(&mut self, ctx: ToolContext<'_>) -> Option<MoveCommit> {
        let captured = self.captured.take();
        let dragging = std::mem::take(&mut self.dragging);
        self.last_down = None;
        if !ctx.tool_is(TOOLS) || !dragging {
            return None;
        }
        let captured = captured?;
        let element = ctx.scene.element(captured.id)?;
        if element.bounds() == captured.before {
            return None;
        }
        Some(MoveCommit::new(
            captured.id,
            captured.before,
            element.secondary_geometry(),
        ))
    }

    fn tool_update(&self, ctx: ToolContext<'_>) -> Option<MoveUpdate> {
        let tool = if self.captured.is_some() {
            ToolKind::Move
        } else {
            ToolKind::Default
        };
        (ctx.scene.tool() != tool).then_some(MoveUpdate::Tool(tool))
    }
}

/// Reconciles a finished drag and restores it on undo.
#[derive(Debug, Clone)]
pub struct MoveCommit {
    id: ElementId,
    before: Bounds,
    /// Secondary geometry as it was during the drag (still at the old position).
    geometry: SecondaryGeometry,
}

impl MoveCommit {
    pub fn new(id: ElementId, before: Bounds, geometry: SecondaryGeometry) -> Self {
        Self {
            id,
            before,
            geometry,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }
}

impl Command for MoveCommit {
    fn execute(&mut self, scene: &mut Scene) {
        let Some(element) = scene.element_mut(self.id) else {
            log::warn!("Cannot commit move: element {} is gone", self.id);
            return;
        };
        let offset = element.bounds().start() - self.before.start();
        element.translate_secondary_geometry(offset);
        scene.rebuild_visual(self.id);
        log::debug!("Moved {} by ({}, {})", self.id, offset.x, offset.y);
    }
}

impl UndoableCommand for MoveCommit {
    fn undo(&mut self, scene: &mut Scene) {
        let Some(element) = scene.element_mut(self.id) else {
            log::warn!("Cannot undo move: element {} is gone", self.id);
            return;
        };
        element.set_bounds(self.before);
        element.restore_secondary_geometry(self.geometry.clone());
        scene.rebuild_visual(self.id);
    }

    fn description(&self) -> &'static str {
        "move element"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::elements::{Element, ShapeOptions, StrokeOptions};
    use crate::visual::ApproxTextMetrics;

    fn line_scene() -> (Scene, ElementId) {
        let mut scene = Scene::default();
        let el = Element::line(
            Point::new(100.0, 100.0),
            Point::new(200.0, 100.0),
            ShapeOptions::default(),
            1,
        );
        let id = el.id();
        scene.push_element(el);
        (scene, id)
    }

    fn run(scene: &mut Scene, update: Option<MoveUpdate>) {
        if let Some(mut update) = update {
            update.execute(scene);
        }
    }

    #[test]
    fn test_hover_switches_tool() {
        let config = Config::default();
        let (mut scene, id) = line_scene();
        let mut action = MoveElementAction::default();

        let update = action.in_progress(
            ToolContext::new(&scene, &ApproxTextMetrics, &config),
            Point::new(150.0, 101.0),
        );
        run(&mut scene, update);
        assert_eq!(scene.tool(), ToolKind::Move);
        assert_eq!(action.captured(), Some(id));

        let update = action.in_progress(
            ToolContext::new(&scene, &ApproxTextMetrics, &config),
            Point::new(150.0, 300.0),
        );
        run(&mut scene, update);
        assert_eq!(scene.tool(), ToolKind::Default);
        assert!(action.captured().is_none());
    }

    #[test]
    fn test_drag_moves_bounds_only() {
        let config = Config::default();
        let (mut scene, id) = line_scene();
        let mut action = MoveElementAction::default();
        scene.is_mouse_down = true;

        let update = action.start(
            ToolContext::new(&scene, &ApproxTextMetrics, &config),
            Point::new(150.0, 100.0),
        );
        run(&mut scene, update);
        assert_eq!(scene.tool(), ToolKind::Move);

        let update = action.in_progress(
            ToolContext::new(&scene, &ApproxTextMetrics, &config),
            Point::new(203.0, 118.0),
        );
        run(&mut scene, update);
        assert!(action.is_dragging());

        let el = scene.element(id).unwrap();
        assert_eq!(el.bounds(), Bounds::new(150.0, 120.0, 250.0, 120.0));
        let line = el.as_line().unwrap();
        assert_eq!(line.point1, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_commit_and_undo_stroke() {
        let config = Config::default();
        let mut scene = Scene::default();
        let points = vec![
            Point::new(10.3, 10.7),
            Point::new(20.1, 15.9),
            Point::new(33.3, 12.2),
        ];
        let el = Element::handdrawn(points.clone(), StrokeOptions::default());
        let id = el.id();
        let before = el.bounds();
        scene.push_element(el);
        scene.is_mouse_down = true;

        let mut action = MoveElementAction::default();
        let update = action.start(
            ToolContext::new(&scene, &ApproxTextMetrics, &config),
            Point::new(20.1, 15.9),
        );
        run(&mut scene, update);
        let update = action.in_progress(
            ToolContext::new(&scene, &ApproxTextMetrics, &config),
            Point::new(47.0, 36.0),
        );
        run(&mut scene, update);
        scene.is_mouse_down = false;

        let mut commit = action
            .end(ToolContext::new(&scene, &ApproxTextMetrics, &config))
            .unwrap();
        assert!(action.captured().is_none());
        commit.execute(&mut scene);

        let moved = scene.element(id).unwrap();
        let offset = moved.bounds().start() - before.start();
        let stroke = moved.as_handdrawn().unwrap();
        assert_eq!(stroke.paths[0], points[0] + offset);
        assert!(moved.visual().is_some());

        commit.undo(&mut scene);
        let restored = scene.element(id).unwrap();
        assert_eq!(restored.bounds(), before);
        assert_eq!(restored.as_handdrawn().unwrap().paths, points);
        assert_eq!(scene.index_of(id), Some(0));
    }

    #[test]
    fn test_click_without_drag_commits_nothing() {
        let config = Config::default();
        let (mut scene, _) = line_scene();
        let mut action = MoveElementAction::default();
        scene.is_mouse_down = true;
        let update = action.start(
            ToolContext::new(&scene, &ApproxTextMetrics, &config),
            Point::new(150.0, 100.0),
        );
        run(&mut scene, update);
        scene.is_mouse_down = false;
        assert!(action
            .end(ToolContext::new(&scene, &ApproxTextMetrics, &config))
            .is_none());
        assert!(action.captured().is_none());
    }

    #[test]
    fn test_gated_outside_select_tools() {
        let config = Config::default();
        let (mut scene, _) = line_scene();
        scene.set_tool(ToolKind::Erase);
        let mut action = MoveElementAction::default();
        let ctx = ToolContext::new(&scene, &ApproxTextMetrics, &config);
        assert!(action.in_progress(ctx, Point::new(150.0, 100.0)).is_none());
        assert!(action.captured().is_none());
    }
}
