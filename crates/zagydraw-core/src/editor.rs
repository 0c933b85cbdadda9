//! The editor: routes pointer and overlay events through the tools and
//! pushes finished edits onto the undo stack.

use crate::config::Config;
use crate::history::{Command, CommandManager};
use crate::input::{MouseButton, PointerEvent};
use crate::scene::Scene;
use crate::tools::{self, draw, erase, select, text, Interaction, ToolContext, ToolKind};
use crate::visual::{DrawableGenerator, TextMetrics};
use kurbo::Point;

/// Run an optional command against the scene.
fn run(scene: &mut Scene, command: Option<impl Command>) {
    if let Some(mut command) = command {
        command.execute(scene);
    }
}

/// Owns the scene, the interaction state and the undo history.
///
/// Pointer handlers need an attached surface (for text metrics). Without
/// one they do nothing beyond tracking the button state.
pub struct Editor {
    scene: Scene,
    interaction: Interaction,
    history: CommandManager,
    surface: Option<Box<dyn TextMetrics>>,
    config: Config,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Editor {
    /// An editor with no surface attached.
    pub fn new(config: Config) -> Self {
        Self {
            scene: Scene::new(&config),
            interaction: Interaction::default(),
            history: CommandManager::new(),
            surface: None,
            config,
        }
    }

    pub fn with_surface(config: Config, surface: Box<dyn TextMetrics>) -> Self {
        let mut editor = Self::new(config);
        editor.attach_surface(surface);
        editor
    }

    pub fn attach_surface(&mut self, surface: Box<dyn TextMetrics>) {
        self.surface = Some(surface);
    }

    /// Drop the surface and abandon any gesture or open text entry.
    pub fn detach_surface(&mut self) {
        self.surface = None;
        self.interaction.reset();
        self.interaction.text_entry = None;
        self.scene.set_preview_element(None);
        self.scene.set_multi_select_rect(None);
        self.scene.clear_delete_flags();
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn history(&self) -> &CommandManager {
        &self.history
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_generator(&mut self, generator: Box<dyn DrawableGenerator>) {
        self.scene.set_generator(generator);
    }

    /// Switch tools, abandoning whatever gesture was in progress.
    ///
    /// An open text entry is committed with its last reported content.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if let Some(content) = self.interaction.text_entry.as_ref().map(|e| e.content.clone()) {
            self.text_blur(&content);
            self.interaction.text_entry = None;
        }
        self.interaction.reset();
        self.scene.set_preview_element(None);
        self.scene.set_multi_select_rect(None);
        self.scene.clear_delete_flags();
        self.scene.set_tool(tool);
    }

    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => self.pointer_down(position),
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => self.pointer_up(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Scroll { delta, .. } => {
                self.wheel(delta.y);
            }
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => {}
        }
    }

    pub fn pointer_down(&mut self, screen: Point) {
        self.scene.is_mouse_down = true;
        self.interaction.gesture.reset();
        let Some(metrics) = self.surface.as_deref() else {
            return;
        };
        let Interaction {
            gesture,
            move_action,
            text_entry,
        } = &mut self.interaction;

        let ctx = ToolContext::new(&self.scene, metrics, &self.config);
        tools::pan_start(ctx, gesture, screen);
        draw::start(ctx, gesture, screen);
        let preview = text::start(ctx, text_entry, screen);
        let selection = select::start(ctx, gesture, screen);
        let tool = move_action.start(ctx, screen);

        run(&mut self.scene, preview);
        run(&mut self.scene, selection);
        run(&mut self.scene, tool);
    }

    pub fn pointer_move(&mut self, screen: Point) {
        let Some(metrics) = self.surface.as_deref() else {
            return;
        };
        let Interaction {
            gesture,
            move_action,
            ..
        } = &mut self.interaction;

        let ctx = ToolContext::new(&self.scene, metrics, &self.config);
        let pan = tools::pan_in_progress(ctx, gesture, screen);
        let preview = draw::in_progress(ctx, gesture, screen);
        let flag = erase::in_progress(ctx, gesture, screen);
        let step = move_action.in_progress(ctx, screen);
        let marquee = select::in_progress(ctx, gesture, screen, move_action.captured().is_some());

        run(&mut self.scene, pan);
        run(&mut self.scene, preview);
        run(&mut self.scene, flag);
        run(&mut self.scene, step);
        run(&mut self.scene, marquee);
    }

    pub fn pointer_up(&mut self, _screen: Point) {
        self.scene.is_mouse_down = false;
        let Some(metrics) = self.surface.as_deref() else {
            self.interaction.reset();
            return;
        };
        let Interaction {
            gesture,
            move_action,
            text_entry,
        } = &mut self.interaction;

        let ctx = ToolContext::new(&self.scene, metrics, &self.config);
        let keep_preview = ctx.tool_is(&[ToolKind::Text]) && text_entry.is_some();
        let selection = select::end(ctx);
        let erased = erase::end(ctx, gesture);
        let moved = move_action.end(ctx);
        let added = draw::end(ctx, gesture);

        run(&mut self.scene, selection);
        match erased {
            Some(command) => self.history.execute(&mut self.scene, command),
            None => self.scene.clear_delete_flags(),
        }
        if let Some(command) = moved {
            self.history.execute(&mut self.scene, command);
        }
        if !keep_preview {
            self.scene.set_preview_element(None);
        }
        if let Some(command) = added {
            self.history.execute(&mut self.scene, command);
        }
        self.interaction.gesture.reset();
    }

    /// Live content from the text overlay.
    pub fn text_input(&mut self, content: &str) {
        let Some(metrics) = self.surface.as_deref() else {
            return;
        };
        let ctx = ToolContext::new(&self.scene, metrics, &self.config);
        let preview = text::input(ctx, &mut self.interaction.text_entry, content);
        run(&mut self.scene, preview);
    }

    /// The overlay lost focus: commit `final_text` and return to the Default tool.
    pub fn text_blur(&mut self, final_text: &str) {
        let Some(metrics) = self.surface.as_deref() else {
            return;
        };
        if self.interaction.text_entry.is_none() {
            return;
        }
        let ctx = ToolContext::new(&self.scene, metrics, &self.config);
        let added = text::blur(ctx, &mut self.interaction.text_entry, final_text);

        self.scene.set_preview_element(None);
        self.scene.set_tool(ToolKind::Default);
        if let Some(command) = added {
            self.history.execute(&mut self.scene, command);
        }
    }

    /// Revert the last edit. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.scene)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.scene.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.scene.zoom_out()
    }

    /// Wheel scrolling: positive delta zooms out, negative zooms in.
    pub fn wheel(&mut self, delta_y: f64) -> bool {
        if delta_y > 0.0 {
            self.zoom_out()
        } else if delta_y < 0.0 {
            self.zoom_in()
        } else {
            false
        }
    }

    /// The host surface changed size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.scene.set_dimensions(width, height);
    }

    /// Fill missing cached visuals before the host repaints.
    pub fn refresh_visuals(&mut self) {
        self.scene.refresh_visuals();
    }
}
