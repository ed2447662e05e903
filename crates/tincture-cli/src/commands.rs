//! Command implementations. Each returns the text printed to stdout.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use tincture_core::{Rgb, TransferFunction, bake_rgba_lut, decode, encode};
use tincture_editor::{
    ConstantWidget, EditorCommand, EditorConfig, HostNotification, TransferFunctionEditor,
};

#[derive(Debug, Serialize)]
struct PointView {
    position: f64,
    scalar: f64,
    opacity: f64,
    color: [f64; 3],
}

#[derive(Debug, Serialize)]
struct ModelView {
    range: [f64; 2],
    points: Vec<PointView>,
}

impl From<&TransferFunction> for ModelView {
    fn from(tf: &TransferFunction) -> Self {
        Self {
            range: [tf.range_min(), tf.range_max()],
            points: tf
                .points()
                .iter()
                .map(|p| PointView {
                    position: p.position,
                    scalar: tf.map_to_scalar_space(p),
                    opacity: p.opacity,
                    color: p.color.to_array(),
                })
                .collect(),
        }
    }
}

pub fn default_contents() -> anyhow::Result<String> {
    Ok(encode(&TransferFunction::default())?)
}

pub fn inspect(contents: &str) -> anyhow::Result<String> {
    let tf = decode(contents)?;
    Ok(serde_json::to_string_pretty(&ModelView::from(&tf))?)
}

pub fn rescale(contents: &str, min: f64, max: f64) -> anyhow::Result<String> {
    let tf = decode(contents)?.rescaled(&(min, max));
    Ok(encode(&tf)?)
}

pub fn add(contents: &str, position: f64, opacity: f64, color: Rgb) -> anyhow::Result<String> {
    let mut tf = decode(contents)?;
    tf.add_point(position, opacity, color)
        .with_context(|| format!("position {position} is not a finite number"))?;
    Ok(encode(&tf)?)
}

pub fn remove(contents: &str, index: usize) -> anyhow::Result<String> {
    let mut tf = decode(contents)?;
    if !tf.remove_point(index) {
        tracing::warn!(index, len = tf.len(), "point not removed (corner or missing)");
    }
    Ok(encode(&tf)?)
}

pub fn sample(contents: &str, at: f64) -> anyhow::Result<String> {
    let tf = decode(contents)?;
    Ok(serde_json::to_string_pretty(&tf.interpolate(at))?)
}

/// Replay editor commands against the contents and commit.
pub fn edit(contents: &str, script: &str) -> anyhow::Result<String> {
    let commands: Vec<EditorCommand> =
        serde_json::from_str(script).context("parsing editor commands")?;
    let mut editor = TransferFunctionEditor::new(contents, EditorConfig::default())?;
    for command in commands {
        editor.handle(command)?;
    }
    editor.handle(EditorCommand::FocusOut)?;

    for note in editor.poll_notifications() {
        if let HostNotification::ColorRequested { index, .. } = note {
            tracing::info!(index, "color request ignored; use a SetColor command");
        }
    }
    Ok(editor.contents()?)
}

pub fn bake_json(contents: &str, size: usize) -> anyhow::Result<String> {
    let tf = decode(contents)?;
    let lut = bake_rgba_lut(&tf, size);
    Ok(serde_json::to_string(&lut.texels)?)
}

/// Write a `size × height` gradient strip, alpha from opacity.
pub fn bake_png(contents: &str, size: usize, height: u32, path: &Path) -> anyhow::Result<()> {
    let tf = decode(contents)?;
    let texels = bake_rgba_lut(&tf, size).to_rgba8();
    let width = u32::try_from(texels.len()).context("LUT too large for an image")?;
    anyhow::ensure!(width > 0, "LUT size must be positive");

    let img = image::RgbaImage::from_fn(width, height, |x, _| image::Rgba(texels[x as usize]));
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(width, height, path = %path.display(), "wrote gradient preview");
    Ok(())
}
