//! Windowless backend that replays a scripted key sequence.

use std::io::Write;

use anyhow::{Context, Result};
use log::info;
use monster_maze_core::{InputKey, UnknownKey};
use monster_maze_rendering::{FrameInput, Presentation, RenderingBackend, Scene};

/// Parses a comma separated replay script such as `UP,RIGHT,UP`.
///
/// Whitespace around names and empty entries are ignored.
pub(crate) fn parse_replay_keys(script: &str) -> Result<Vec<InputKey>, UnknownKey> {
    script
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse)
        .collect()
}

/// Prints one line of layer names for the start frame and after every key.
#[derive(Debug)]
pub(crate) struct ReplayBackend<W> {
    keys: Vec<InputKey>,
    output: W,
}

impl<W: Write> ReplayBackend<W> {
    pub(crate) fn new(keys: Vec<InputKey>, output: W) -> Self {
        Self { keys, output }
    }

    fn write_frame(&mut self, scene: &Scene) -> Result<()> {
        writeln!(self.output, "{}", scene.layer_names().join(" "))
            .context("failed to write replay frame")
    }
}

impl<W: Write> RenderingBackend for ReplayBackend<W> {
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static,
    {
        let mut scene = presentation.scene;
        info!(
            "replaying {} keys for `{}`",
            self.keys.len(),
            presentation.window_title
        );

        update_scene(FrameInput::default(), &mut scene);
        self.write_frame(&scene)?;

        for key in std::mem::take(&mut self.keys) {
            update_scene(FrameInput::from_keys(vec![key]), &mut scene);
            self.write_frame(&scene)?;
        }

        self.output.flush().context("failed to flush replay output")
    }
}
