//! Commands and the undo stack.

use crate::elements::{Element, ElementId};
use crate::scene::Scene;

/// A one-shot mutation of the scene.
pub trait Command {
    fn execute(&mut self, scene: &mut Scene);
}

/// A mutation that can be reverted.
///
/// Implementations own snapshots of whatever they change, never live references.
pub trait UndoableCommand: Command {
    fn undo(&mut self, scene: &mut Scene);

    /// Short label for logs.
    fn description(&self) -> &'static str;
}

/// Linear, unbounded undo history.
#[derive(Default)]
pub struct CommandManager {
    undo_stack: Vec<Box<dyn UndoableCommand>>,
}

impl CommandManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `command` and push it on the undo stack.
    pub fn execute<C>(&mut self, scene: &mut Scene, mut command: C)
    where
        C: UndoableCommand + 'static,
    {
        command.execute(scene);
        log::debug!("Executed {}", command.description());
        self.undo_stack.push(Box::new(command));
    }

    /// Revert the most recent command. Returns false on an empty stack.
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        let Some(mut command) = self.undo_stack.pop() else {
            return false;
        };
        command.undo(scene);
        log::debug!("Undid {}", command.description());
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }
}

/// Commits a new element on top of the scene.
#[derive(Debug)]
pub struct AddElement {
    id: ElementId,
    element: Option<Element>,
}

impl AddElement {
    pub fn new(element: Element) -> Self {
        Self {
            id: element.id(),
            element: Some(element),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }
}

impl Command for AddElement {
    fn execute(&mut self, scene: &mut Scene) {
        if let Some(element) = self.element.take() {
            log::debug!("Adding {} {}", element.shape_name(), self.id);
            scene.push_element(element);
        }
    }
}

impl UndoableCommand for AddElement {
    fn undo(&mut self, scene: &mut Scene) {
        match scene.remove_element(self.id) {
            Some((_, element)) => self.element = Some(element),
            None => log::warn!("Cannot undo add: element {} is gone", self.id),
        }
    }

    fn description(&self) -> &'static str {
        "add element"
    }
}

/// Removes every element flagged `will_delete`.
#[derive(Debug, Default)]
pub struct EraseElements {
    /// Removed elements with their former indices, ascending.
    removed: Vec<(usize, Element)>,
}

impl EraseElements {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for EraseElements {
    fn execute(&mut self, scene: &mut Scene) {
        let removed = &mut self.removed;
        scene.set_elements(|elements| {
            let mut kept = Vec::with_capacity(elements.len());
            for (index, element) in elements.into_iter().enumerate() {
                if element.will_delete {
                    removed.push((index, element));
                } else {
                    kept.push(element);
                }
            }
            kept
        });
        log::debug!("Erased {} element(s)", self.removed.len());
    }
}

impl UndoableCommand for EraseElements {
    fn undo(&mut self, scene: &mut Scene) {
        for (index, mut element) in self.removed.drain(..) {
            element.will_delete = false;
            scene.insert_element(index, element);
        }
    }

    fn description(&self) -> &'static str {
        "erase elements"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::ShapeOptions;
    use kurbo::Point;

    fn rect(x: f64) -> Element {
        Element::rectangle(
            Point::new(x, 0.0),
            Point::new(x + 20.0, 20.0),
            ShapeOptions::default(),
            1,
        )
    }

    #[test]
    fn test_undo_empty_is_noop() {
        let mut scene = Scene::default();
        let mut history = CommandManager::new();
        assert!(!history.undo(&mut scene));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_add_and_undo() {
        let mut scene = Scene::default();
        let mut history = CommandManager::new();
        let el = rect(0.0);
        let id = el.id();

        history.execute(&mut scene, AddElement::new(el));
        assert_eq!(scene.index_of(id), Some(0));
        assert!(history.can_undo());

        assert!(history.undo(&mut scene));
        assert!(scene.is_empty());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undo_is_lifo() {
        let mut scene = Scene::default();
        let mut history = CommandManager::new();
        let first = rect(0.0);
        let first_id = first.id();
        history.execute(&mut scene, AddElement::new(first));
        history.execute(&mut scene, AddElement::new(rect(50.0)));
        assert_eq!(history.len(), 2);

        history.undo(&mut scene);
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.elements()[0].id(), first_id);
    }

    #[test]
    fn test_erase_restores_original_order() {
        let mut scene = Scene::default();
        let ids: Vec<_> = (0..4)
            .map(|i| {
                let el = rect(i as f64 * 50.0);
                let id = el.id();
                scene.push_element(el);
                id
            })
            .collect();
        for id in [ids[0], ids[2]] {
            if let Some(el) = scene.element_mut(id) {
                el.will_delete = true;
            }
        }

        let mut history = CommandManager::new();
        history.execute(&mut scene, EraseElements::new());
        let remaining: Vec<_> = scene.elements().iter().map(Element::id).collect();
        assert_eq!(remaining, vec![ids[1], ids[3]]);

        history.undo(&mut scene);
        let restored: Vec<_> = scene.elements().iter().map(Element::id).collect();
        assert_eq!(restored, ids);
        assert!(scene.elements().iter().all(|el| !el.will_delete));
    }
}
