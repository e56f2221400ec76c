use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context as _;
use serde::Serialize;

pub mod event_log;
pub mod result_dump;

pub use event_log::EventLogCallback;
pub use result_dump::ResultDumpCallback;

/// Writes `value` as pretty JSON, creating parent directories as needed.
pub fn dump_json<T>(path: impl AsRef<Path>, value: &T) -> anyhow::Result<()>
where
    T: ?Sized + Serialize,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        create_dir_all(parent)
            .with_context(|| format!("unable to create {}", parent.display()))?;
    }

    let file =
        File::create(path).with_context(|| format!("unable to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[test]
fn test_dump_json_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deeper/value.json");
    dump_json(&path, &vec![1, 2, 3]).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let back: Vec<i32> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, vec![1, 2, 3]);
}
