//! ZagyDraw Core Library
//!
//! Element model, tool state machine, hit-testing and undo engine for the
//! ZagyDraw canvas. Rendering, widgets and persistence live outside this crate.

pub mod config;
pub mod editor;
pub mod elements;
pub mod geometry;
pub mod history;
pub mod hit;
pub mod input;
pub mod scene;
pub mod tools;
pub mod viewport;
pub mod visual;

pub use config::{Config, ConfigError, ConfigResult, GRID_SIZE};
pub use editor::Editor;
pub use elements::{Bounds, Element, ElementId, ElementKind, SecondaryGeometry};
pub use geometry::{is_element_in_rect, normalize_pos, normalize_to_grid, snap_to_grid};
pub use history::{AddElement, Command, CommandManager, EraseElements, UndoableCommand};
pub use hit::{elements_in_rect, get_hit_element};
pub use input::{MouseButton, PointerEvent};
pub use scene::Scene;
pub use tools::{GestureContext, Interaction, MoveCommit, ToolKind};
pub use viewport::Viewport;
pub use visual::{
    ApproxTextMetrics, CachedVisual, Drawable, DrawableGenerator, PathGenerator, TextMetrics,
};
