//! Utility functions for preparing the CPU and memory for execution

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::info;

use crate::error::{LoadError, SimulatorResult};
use crate::memory::store::WordStore;
use crate::memory::MemoryLayout;

/// Reads a flat image of big-endian words
pub fn load_image(mut reader: impl Read, layout: &MemoryLayout) -> SimulatorResult<Vec<u32>> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let chunks = data.chunks_exact(4);
    let trailing = chunks.remainder().len();
    if trailing != 0 {
        return Err(LoadError::TrailingBytes(trailing).into());
    }

    let words: Vec<u32> = chunks
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    if words.len() > layout.instr_capacity {
        return Err(LoadError::ImageTooLarge {
            capacity: layout.instr_capacity,
        }
        .into());
    }
    Ok(words)
}

/// Builds the initial memory from an image file
pub fn load_file(path: &Path, layout: MemoryLayout) -> SimulatorResult<WordStore> {
    let file = File::open(path)
        .map_err(|e| LoadError::FileReadError(path.to_path_buf(), e))?;
    let words = load_image(BufReader::new(file), &layout)?;
    info!(
        "Loaded {} words from {} at {:#010x}",
        words.len(),
        path.display(),
        layout.base
    );

    let mut mem = WordStore::make(layout);
    if !mem.load_words(&words) {
        return Err(LoadError::ImageTooLarge {
            capacity: layout.instr_capacity,
        }
        .into());
    }
    Ok(mem)
}
