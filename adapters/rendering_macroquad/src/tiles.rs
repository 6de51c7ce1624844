use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use glam::Vec2;
use macroquad::{
    color::WHITE,
    math::Vec2 as MacroquadVec2,
    texture::{self, DrawTextureParams, Texture2D},
};
use monster_maze_core::FrameLayer;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Cache of the pre-rendered layer images listed in the tile manifest.
#[derive(Debug)]
pub(crate) struct TileAtlas {
    textures: HashMap<FrameLayer, Texture2D>,
}

impl TileAtlas {
    /// Loads the tile images listed in the manifest located at the provided path.
    pub(crate) fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_manifest_with_loader(path, default_loader)
    }

    /// Returns the default manifest path relative to the working directory.
    #[must_use]
    pub(crate) fn default_manifest_path() -> PathBuf {
        PathBuf::from(crate::DEFAULT_MANIFEST_PATH)
    }

    /// Draws the image of the provided layer stretched over the canvas rectangle.
    pub(crate) fn draw(&self, layer: FrameLayer, origin: Vec2, size: Vec2) -> Result<()> {
        let texture = *self
            .textures
            .get(&layer)
            .with_context(|| format!("tile `{layer}` missing from atlas"))?;

        let params = DrawTextureParams {
            dest_size: Some(MacroquadVec2::new(size.x, size.y)),
            ..DrawTextureParams::default()
        };
        texture::draw_texture_ex(texture, origin.x, origin.y, WHITE, params);

        Ok(())
    }

    /// Returns the number of textures stored in the atlas.
    #[must_use]
    pub(crate) fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Returns whether the atlas contains the provided layer.
    #[must_use]
    pub(crate) fn contains(&self, layer: FrameLayer) -> bool {
        self.textures.contains_key(&layer)
    }

    fn from_manifest_with_loader(
        path: impl AsRef<Path>,
        mut loader: impl FnMut(FrameLayer, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read tile manifest at {}",
                manifest_path.display()
            )
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let entries = parse_manifest(&contents, &base)?;
        Self::from_entries(entries, &mut loader)
    }

    fn from_entries(
        entries: Vec<(FrameLayer, PathBuf)>,
        loader: &mut impl FnMut(FrameLayer, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let mut textures = HashMap::with_capacity(entries.len());
        for (layer, path) in entries {
            let texture = loader(layer, &path)
                .with_context(|| format!("failed to load tile `{layer}` from {}", path.display()))?;
            if textures.insert(layer, texture).is_some() {
                bail!("duplicate tile entry for `{layer}`");
            }
        }
        Ok(Self { textures })
    }
}

fn default_loader(_layer: FrameLayer, path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read tile image at {}", path.display()))?;
    Ok(Texture2D::from_file_with_format(&bytes, None))
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    tiles: HashMap<String, String>,
}

/// Resolves every layer listed in the manifest, in canonical draw order.
fn parse_manifest(contents: &str, base_path: &Path) -> Result<Vec<(FrameLayer, PathBuf)>> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse tile manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported tile manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut resolved = HashMap::new();
    for (name, relative_path) in manifest.tiles {
        let layer: FrameLayer = name
            .parse()
            .with_context(|| format!("unknown tile key `{name}` in manifest"))?;
        let path = base_path.join(relative_path);
        if resolved.insert(layer, path).is_some() {
            bail!("tile manifest contains duplicate entry for `{layer}`");
        }
    }

    let mut ordered = Vec::with_capacity(resolved.len());
    for layer in FrameLayer::all() {
        let Some(path) = resolved.remove(&layer) else {
            bail!("tile manifest missing entry for `{layer}`");
        };
        ordered.push((layer, path));
    }

    Ok(ordered)
}
