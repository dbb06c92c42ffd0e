//! Flat word store holding the code and data segments

use super::MemoryLayout;
use super::StorageInterface;

/// Instruction word store
pub struct WordStore {
    layout: MemoryLayout,
    // data[(address - base) / 4]
    data: Vec<i32>,
}

impl WordStore {
    /// Make a zeroed store
    pub fn make(layout: MemoryLayout) -> Self {
        Self {
            layout,
            data: vec![0; layout.capacity()],
        }
    }

    /// Copy a program image to the start of the code segment.
    /// Returns false if it does not fit
    pub fn load_words(&mut self, words: &[u32]) -> bool {
        if words.len() > self.layout.instr_capacity {
            return false;
        }
        for (slot, word) in self.data.iter_mut().zip(words) {
            *slot = *word as i32;
        }
        true
    }
}

impl StorageInterface for WordStore {
    fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    fn words(&self) -> &[i32] {
        &self.data
    }

    fn words_mut(&mut self) -> &mut [i32] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> MemoryLayout {
        MemoryLayout {
            base: 0x0040_0000,
            instr_capacity: 4,
            data_capacity: 4,
        }
    }

    #[test]
    fn test_make_is_zeroed() {
        let memory = WordStore::make(small());
        assert_eq!(memory.words().len(), 8);
        assert!(memory.words().iter().all(|w| *w == 0));
    }

    #[test]
    fn test_load_words() {
        let mut memory = WordStore::make(small());
        assert!(memory.load_words(&[0x2401_000a, 0xffff_ffff]));
        assert_eq!(memory.fetch(0x0040_0000), Some(0x2401_000a));
        assert_eq!(memory.get32(0x0040_0004), Some(-1));
        assert_eq!(memory.get32(0x0040_0008), Some(0));
    }

    #[test]
    fn test_load_words_too_large() {
        let mut memory = WordStore::make(small());
        assert!(!memory.load_words(&[1; 5]));
        assert!(memory.load_words(&[1; 4]));
    }

    #[test]
    fn test_set32_and_nonzero_data() {
        let mut memory = WordStore::make(small());
        assert!(memory.set32(0x0040_0014, 42));
        assert!(!memory.set32(0x0040_0020, 1));
        assert!(!memory.set32(0x0040_0013, 1));
        assert_eq!(memory.nonzero_data(), vec![(0x0040_0014, 42)]);
    }
}
