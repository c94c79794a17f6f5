//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;

pub mod analyze;
pub mod info;
pub mod serve;

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

/// Read `path` (or stdin for `-`) and validate its size against the limit.
pub fn read_input(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    if path.as_str() == STDIN_PATH {
        return read_limited(std::io::stdin().lock(), max_bytes).context("failed to read stdin");
    }
    read_input_file(path, max_bytes)
}

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Read a stream whose size is unknown up front, stopping one byte past the limit.
fn read_limited(reader: impl Read, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    match max_bytes {
        Some(max) => {
            let cap = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
            reader.take(cap).read_to_end(&mut buf)?;
            if buf.len() > max {
                anyhow::bail!("input too large: more than {max} bytes (limit: {max} bytes)");
            }
        }
        None => {
            let mut reader = reader;
            reader.read_to_end(&mut buf)?;
        }
    }
    String::from_utf8(buf).context("input is not valid UTF-8")
}
