//! Tool modes and per-gesture scratch state.
//!
//! Each tool module exposes start / in-progress / end handlers. Handlers read
//! the scene through a [`ToolContext`] and return a command (or `None`) for
//! the editor to run; they never mutate the scene themselves. A handler
//! whose tool is not active returns `None`.

pub mod draw;
pub mod erase;
pub mod move_element;
pub mod select;
pub mod text;

pub use draw::PreviewUpdate;
pub use erase::FlagForDelete;
pub use move_element::{MoveCommit, MoveElementAction, MoveUpdate};
pub use select::{FinishSelection, SetSelection, SetSelectionRect};
pub use text::TextEntry;

use crate::config::Config;
use crate::geometry::{normalize_pos, normalize_to_grid};
use crate::history::Command;
use crate::scene::Scene;
use crate::visual::TextMetrics;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    /// Select, multi-select, and hover-to-move.
    #[default]
    Default,
    /// Pan the viewport.
    Drag,
    Rect,
    Line,
    FreeDraw,
    Text,
    Erase,
    /// Entered by hovering an element in Default mode.
    Move,
}

/// Read-only view handed to tool handlers.
#[derive(Clone, Copy)]
pub struct ToolContext<'a> {
    pub scene: &'a Scene,
    pub metrics: &'a dyn TextMetrics,
    pub config: &'a Config,
}

impl<'a> ToolContext<'a> {
    pub fn new(scene: &'a Scene, metrics: &'a dyn TextMetrics, config: &'a Config) -> Self {
        Self {
            scene,
            metrics,
            config,
        }
    }

    /// True if the active tool is one of `tools`.
    pub fn tool_is(&self, tools: &[ToolKind]) -> bool {
        tools.contains(&self.scene.tool())
    }

    /// Screen point to world, unsnapped.
    pub fn world(&self, screen: Point) -> Point {
        normalize_pos(self.scene.position(), screen)
    }

    /// Screen point to world, snapped to the grid.
    pub fn snapped(&self, screen: Point) -> Point {
        normalize_to_grid(self.scene.position(), screen, self.config.grid_size)
    }
}

/// Scratch state for one pointer-down to pointer-up sequence.
///
/// Every field is cleared at gesture boundaries.
#[derive(Debug, Clone, Default)]
pub struct GestureContext {
    /// Screen point of the previous pan event.
    pub last_pointer: Option<Point>,
    /// Grid-snapped world start of a rectangle or line.
    pub start: Option<Point>,
    /// Grid-snapped world end of a rectangle or line.
    pub end: Option<Point>,
    pub seed: Option<u32>,
    /// World samples of a freehand stroke.
    pub path: Vec<Point>,
    /// Set once the eraser has flagged anything.
    pub will_delete: bool,
    /// World anchor of the marquee.
    pub select_origin: Option<Point>,
}

impl GestureContext {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// All interaction state owned by the editor between events.
#[derive(Debug, Default)]
pub struct Interaction {
    pub gesture: GestureContext,
    pub move_action: MoveElementAction,
    /// Open text-entry overlay, if any. Survives gesture boundaries.
    pub text_entry: Option<TextEntry>,
}

impl Interaction {
    /// Drop gesture scratch and any captured move target.
    pub fn reset(&mut self) {
        self.gesture.reset();
        self.move_action.reset();
    }
}

/// Translate the viewport by a screen delta.
#[derive(Debug, Clone, Copy)]
pub struct PanViewport(pub Vec2);

impl Command for PanViewport {
    fn execute(&mut self, scene: &mut Scene) {
        let position = scene.position() + self.0;
        log::trace!("Pan to ({:.1}, {:.1})", position.x, position.y);
        scene.set_position(position);
    }
}

/// Record where a pan gesture starts.
pub fn pan_start(ctx: ToolContext<'_>, gesture: &mut GestureContext, screen: Point) -> bool {
    if !ctx.tool_is(&[ToolKind::Drag]) {
        return false;
    }
    gesture.last_pointer = Some(screen);
    true
}

/// Pan by the delta since the previous move event.
pub fn pan_in_progress(
    ctx: ToolContext<'_>,
    gesture: &mut GestureContext,
    screen: Point,
) -> Option<PanViewport> {
    if !ctx.tool_is(&[ToolKind::Drag]) || !ctx.scene.is_mouse_down {
        return None;
    }
    let last = gesture.last_pointer.replace(screen)?;
    Some(PanViewport(screen - last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::ApproxTextMetrics;

    #[test]
    fn test_default_tool() {
        assert_eq!(ToolKind::default(), ToolKind::Default);
    }

    #[test]
    fn test_pan_is_incremental() {
        let config = Config::default();
        let mut scene = Scene::new(&config);
        scene.set_tool(ToolKind::Drag);
        scene.is_mouse_down = true;
        let mut gesture = GestureContext::default();

        {
            let ctx = ToolContext::new(&scene, &ApproxTextMetrics, &config);
            assert!(pan_start(ctx, &mut gesture, Point::new(100.0, 100.0)));
        }
        for screen in [Point::new(110.0, 100.0), Point::new(130.0, 90.0)] {
            let ctx = ToolContext::new(&scene, &ApproxTextMetrics, &config);
            let mut cmd = pan_in_progress(ctx, &mut gesture, screen).unwrap();
            cmd.execute(&mut scene);
        }
        assert_eq!(scene.position(), Vec2::new(30.0, -10.0));
    }

    #[test]
    fn test_pan_gated_by_tool() {
        let config = Config::default();
        let mut scene = Scene::new(&config);
        scene.is_mouse_down = true;
        let mut gesture = GestureContext {
            last_pointer: Some(Point::ZERO),
            ..Default::default()
        };
        let ctx = ToolContext::new(&scene, &ApproxTextMetrics, &config);
        assert!(!pan_start(ctx, &mut gesture, Point::ZERO));
        assert!(pan_in_progress(ctx, &mut gesture, Point::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_gesture_reset() {
        let mut gesture = GestureContext {
            start: Some(Point::ZERO),
            path: vec![Point::ZERO],
            will_delete: true,
            ..Default::default()
        };
        gesture.reset();
        assert!(gesture.start.is_none());
        assert!(gesture.path.is_empty());
        assert!(!gesture.will_delete);
    }
}
