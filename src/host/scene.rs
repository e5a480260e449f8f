use std::path::Path;

use crate::model::SceneNode;

/// Reads a selection snapshot from a JSON scene file.
pub fn read_scene(path: &Path) -> anyhow::Result<Vec<SceneNode>> {
    let buf = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&buf)?)
}

/// Writes the nodes back out as pretty-printed JSON.
pub fn write_scene(path: &Path, nodes: &[SceneNode]) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(nodes)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, text.as_bytes())?;
    Ok(())
}
