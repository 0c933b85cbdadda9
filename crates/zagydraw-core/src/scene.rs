//! Scene store: the canonical element list plus viewport, tool and selection.

use crate::config::Config;
use crate::elements::{Bounds, CurrentStyle, Element, ElementId};
use crate::tools::ToolKind;
use crate::viewport::Viewport;
use crate::visual::{DrawableGenerator, PathGenerator};
use kurbo::{Size, Vec2};

/// Editor state owned by a single event-dispatch context.
///
/// Every setter replaces one slice of state. Re-rendering on change is left
/// to whoever owns the scene.
pub struct Scene {
    elements: Vec<Element>,
    viewport: Viewport,
    tool: ToolKind,
    selected: Vec<ElementId>,
    preview: Option<Element>,
    /// Marquee grown by the select tool, in world coordinates.
    multi_select_rect: Option<Bounds>,
    /// Whether the primary pointer button is held.
    pub is_mouse_down: bool,
    /// Style applied to newly created elements.
    pub style: CurrentStyle,
    generator: Box<dyn DrawableGenerator>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Scene {
    /// Empty scene with an untranslated viewport and the Default tool.
    pub fn new(config: &Config) -> Self {
        Self {
            elements: Vec::new(),
            viewport: Viewport::new(config),
            tool: ToolKind::default(),
            selected: Vec::new(),
            preview: None,
            multi_select_rect: None,
            is_mouse_down: false,
            style: CurrentStyle::default(),
            generator: Box::new(PathGenerator),
        }
    }

    /// Replace the drawable generator. Cached visuals are dropped.
    pub fn set_generator(&mut self, generator: Box<dyn DrawableGenerator>) {
        self.generator = generator;
        for element in &mut self.elements {
            element.invalidate_visual();
        }
        if let Some(preview) = &mut self.preview {
            preview.invalidate_visual();
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Replace the element list through an updater over the previous list.
    ///
    /// Selected ids that no longer exist are dropped.
    pub fn set_elements<F>(&mut self, updater: F)
    where
        F: FnOnce(Vec<Element>) -> Vec<Element>,
    {
        let previous = std::mem::take(&mut self.elements);
        self.elements = updater(previous);
        let elements = &self.elements;
        self.selected.retain(|id| elements.iter().any(|el| el.id() == *id));
    }

    /// Append an element on top of the z-order.
    pub fn push_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Insert at `index`, clamped to the end of the list.
    pub fn insert_element(&mut self, index: usize, element: Element) {
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
    }

    /// Remove an element, returning its former index alongside it.
    pub fn remove_element(&mut self, id: ElementId) -> Option<(usize, Element)> {
        let index = self.index_of(id)?;
        let element = self.elements.remove(index);
        self.selected.retain(|selected| *selected != id);
        Some((index, element))
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|el| el.id() == id)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id() == id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id() == id)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn position(&self) -> Vec2 {
        self.viewport.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.viewport.position = position;
    }

    pub fn zoom_level(&self) -> u32 {
        self.viewport.zoom_level
    }

    /// Set the zoom level, clamped to the viewport's bounds.
    pub fn set_zoom_level(&mut self, level: u32) {
        self.viewport.set_zoom_level(level);
    }

    pub fn zoom_in(&mut self) -> bool {
        self.viewport.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.viewport.zoom_out()
    }

    /// Record the visible surface size. Element coordinates are untouched.
    pub fn set_dimensions(&mut self, width: f64, height: f64) {
        self.viewport.size = Size::new(width, height);
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switch the active tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.tool != tool {
            log::debug!("Tool {:?} -> {:?}", self.tool, tool);
            self.tool = tool;
        }
    }

    pub fn selected_elements(&self) -> &[ElementId] {
        &self.selected
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected.contains(&id)
    }

    /// Replace the selection. A non-empty selection clears the preview.
    pub fn set_selected_elements(&mut self, selected: Vec<ElementId>) {
        if !selected.is_empty() {
            self.preview = None;
        }
        self.selected = selected;
    }

    pub fn preview_element(&self) -> Option<&Element> {
        self.preview.as_ref()
    }

    pub fn preview_element_mut(&mut self) -> Option<&mut Element> {
        self.preview.as_mut()
    }

    /// Replace the preview. Setting one clears the selection.
    pub fn set_preview_element(&mut self, preview: Option<Element>) {
        if preview.is_some() {
            self.selected.clear();
        }
        self.preview = preview;
    }

    /// Clear every pending-erase flag.
    pub fn clear_delete_flags(&mut self) {
        for element in &mut self.elements {
            element.will_delete = false;
        }
    }

    pub fn multi_select_rect(&self) -> Option<Bounds> {
        self.multi_select_rect
    }

    pub fn set_multi_select_rect(&mut self, rect: Option<Bounds>) {
        self.multi_select_rect = rect;
    }

    /// Elements whose bounding box touches the visible surface, bottom to top.
    pub fn visible_elements(&self) -> impl DoubleEndedIterator<Item = &Element> {
        let visible = self.viewport.visible_rect();
        self.elements.iter().filter(move |el| {
            let rect = el.bounds().normalized();
            rect.x0 <= visible.x1
                && rect.x1 >= visible.x0
                && rect.y0 <= visible.y1
                && rect.y1 >= visible.y0
        })
    }

    /// Regenerate one element's cached visual. Returns false if it is gone.
    pub fn rebuild_visual(&mut self, id: ElementId) -> bool {
        let Some(element) = self.elements.iter_mut().find(|el| el.id() == id) else {
            return false;
        };
        element.rebuild_visual(self.generator.as_mut());
        true
    }

    /// Make sure every element and the preview carry a visual.
    ///
    /// Elements with a valid cache are left alone.
    pub fn refresh_visuals(&mut self) {
        let generator = self.generator.as_mut();
        for element in &mut self.elements {
            element.ensure_visual(generator);
        }
        if let Some(preview) = &mut self.preview {
            preview.ensure_visual(generator);
        }
    }
}
