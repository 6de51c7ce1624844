//! Glue between host key presses, the world and the view selector.

use log::debug;
use monster_maze_core::{Event, FrameLayer, InputKey};
use monster_maze_rendering::{FrameInput, Scene};
use monster_maze_system_view::ViewSelector;
use monster_maze_world::{self as world, query, World};

/// Owns the world for the lifetime of a rendering backend.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    view: ViewSelector,
    events: Vec<Event>,
}

impl Session {
    pub(crate) fn new(world: World) -> Self {
        Self {
            world,
            view: ViewSelector,
            events: Vec::new(),
        }
    }

    /// Applies the command bound to the key and returns the events it produced.
    pub(crate) fn press(&mut self, key: InputKey) -> &[Event] {
        self.events.clear();
        world::apply(&mut self.world, key.command(), &mut self.events);
        for event in &self.events {
            debug!("{} -> {event:?}", key.name());
        }
        &self.events
    }

    /// Layers describing what the player currently sees.
    pub(crate) fn frame_layers(&self) -> Vec<FrameLayer> {
        self.view.frame_layers(
            query::maze_view(&self.world),
            query::player(&self.world),
        )
    }

    /// Frame callback handed to rendering backends.
    ///
    /// Frames without key presses keep the layers already in the scene.
    pub(crate) fn update_scene(&mut self, input: FrameInput, scene: &mut Scene) {
        if input.is_empty() && !scene.layers.is_empty() {
            return;
        }
        for key in input.keys {
            let _ = self.press(key);
        }
        scene.layers = self.frame_layers();
    }
}
