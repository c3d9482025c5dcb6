use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::shared::constants;

pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))
}

pub fn read_stdin() -> Result<Vec<u8>> {
    read_all(std::io::stdin().lock()).context("Failed to read image from stdin")
}

/// Image bytes from `input`; `None` or `-` means stdin.
pub fn read_input(input: Option<&str>) -> Result<Vec<u8>> {
    match input {
        None | Some(constants::STDIN_PATH) => read_stdin(),
        Some(path) => read_file(Path::new(path)),
    }
}

fn read_all(mut reader: impl Read) -> std::io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(bytes)
}
