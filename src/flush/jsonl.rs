use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use bevy_ecs::world::World;
use serde::Serialize;

use crate::ecs::resources::{HostLog, SimConfig};

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Flush the player-facing output log to JSONL files in the given directory.
///
/// Creates the output directory if it does not exist. Writes 3 files:
/// - `chat.jsonl`: one chat line per line, with its recipients
/// - `popups.jsonl`: one popup per line
/// - `sounds.jsonl`: one played sound per line
pub fn flush_to_jsonl(log: &HostLog, output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    write_jsonl(&output_dir.join("chat.jsonl"), log.chat.iter())?;
    write_jsonl(&output_dir.join("popups.jsonl"), log.popups.iter())?;
    write_jsonl(&output_dir.join("sounds.jsonl"), log.sounds.iter())?;

    tracing::debug!(
        chat = log.chat.len(),
        popups = log.popups.len(),
        sounds = log.sounds.len(),
        "flushed host log to {}",
        output_dir.display()
    );
    Ok(())
}

/// Flush the world's host log into the configured `output_dir` and start a
/// fresh log. Without a `SimConfig` the default directory is used.
pub fn flush_host_log(world: &mut World) -> io::Result<()> {
    let output_dir = world
        .get_resource::<SimConfig>()
        .map(|config| config.output_dir.clone())
        .unwrap_or_else(|| SimConfig::default().output_dir);

    let Some(mut log) = world.get_resource_mut::<HostLog>() else {
        return Ok(());
    };
    flush_to_jsonl(&log, Path::new(&output_dir))?;
    log.clear();
    Ok(())
}
