//! Memory structure

pub mod store;

/// Base address of the code segment
pub const TEXT_BASE: u32 = 0x0040_0000;
/// Number of words reserved for instructions
pub const MAX_NUM_INSTRS: usize = 1024;
/// Number of words reserved for data
pub const MAX_NUM_DATA: usize = 3072;

/// Shape of the word store: a code segment followed by a data segment,
/// both addressed from `base`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryLayout {
    pub base: u32,
    pub instr_capacity: usize,
    pub data_capacity: usize,
}

impl Default for MemoryLayout {
    fn default() -> Self {
        Self {
            base: TEXT_BASE,
            instr_capacity: MAX_NUM_INSTRS,
            data_capacity: MAX_NUM_DATA,
        }
    }
}

impl MemoryLayout {
    /// Total number of words
    pub fn capacity(&self) -> usize {
        self.instr_capacity + self.data_capacity
    }

    /// First byte address of the data segment
    pub fn data_start(&self) -> u32 {
        self.base + 4 * self.instr_capacity as u32
    }

    /// One past the last byte address of the data segment
    pub fn data_end(&self) -> u32 {
        self.base + 4 * self.capacity() as u32
    }

    /// Initial stack pointer
    pub fn stack_top(&self) -> u32 {
        self.data_end()
    }

    /// Whether a load/store may touch this address
    pub fn in_data_window(&self, address: u32) -> bool {
        address % 4 == 0 && address >= self.data_start() && address < self.data_end()
    }

    /// Word index of an aligned address inside the image
    pub fn index_of(&self, address: u32) -> Option<usize> {
        if address % 4 != 0 || address < self.base {
            return None;
        }
        let index = ((address - self.base) / 4) as usize;
        (index < self.capacity()).then_some(index)
    }

    /// Byte address of a word index
    pub fn address_of(&self, index: usize) -> u32 {
        self.base + 4 * index as u32
    }
}

/// Word-addressed storage interface
pub trait StorageInterface {
    fn layout(&self) -> &MemoryLayout;
    fn words(&self) -> &[i32];
    fn words_mut(&mut self) -> &mut [i32];

    /// Reads the word at an aligned address inside the image
    fn get32(&self, address: u32) -> Option<i32> {
        let index = self.layout().index_of(address)?;
        Some(self.words()[index])
    }

    /// Writes the word at an aligned address inside the image.
    /// Returns true iff the write happened
    fn set32(&mut self, address: u32, value: i32) -> bool {
        match self.layout().index_of(address) {
            Some(index) => {
                self.words_mut()[index] = value;
                true
            }
            None => false,
        }
    }

    /// Instruction fetch
    fn fetch(&self, address: u32) -> Option<u32> {
        self.get32(address).map(|w| w as u32)
    }

    /// Nonzero words of the data segment as (address, value)
    fn nonzero_data(&self) -> Vec<(u32, i32)> {
        let layout = *self.layout();
        self.words()
            .iter()
            .enumerate()
            .skip(layout.instr_capacity)
            .filter(|(_, w)| **w != 0)
            .map(|(i, w)| (layout.address_of(i), *w))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_bounds() {
        let layout = MemoryLayout::default();
        assert_eq!(layout.data_start(), 0x0040_1000);
        assert_eq!(layout.data_end(), 0x0040_4000);
        assert_eq!(layout.stack_top(), 0x0040_4000);
    }

    #[test]
    fn test_data_window() {
        let layout = MemoryLayout::default();
        assert!(layout.in_data_window(0x0040_1000));
        assert!(layout.in_data_window(0x0040_3ffc));
        assert!(!layout.in_data_window(0x0040_0ffc));
        assert!(!layout.in_data_window(0x0040_4000));
        assert!(!layout.in_data_window(0x0040_1002));
    }

    #[test]
    fn test_index_of() {
        let layout = MemoryLayout::default();
        assert_eq!(layout.index_of(0x0040_0000), Some(0));
        assert_eq!(layout.index_of(0x0040_0008), Some(2));
        assert_eq!(layout.index_of(0x0040_0001), None);
        assert_eq!(layout.index_of(0x003f_fffc), None);
        assert_eq!(layout.index_of(0x0040_4000), None);
        assert_eq!(layout.address_of(2), 0x0040_0008);
    }
}
