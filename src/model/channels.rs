//! Channel membership bitmask

/// Set of observed channels, one bit per possible channel number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelSet {
    bits: [u64; 4],
}

impl ChannelSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(channel: u8) -> (usize, u64) {
        ((channel >> 6) as usize, 1 << (channel & 0x3F))
    }

    /// Insert a channel, returning true if it was not present
    pub fn insert(&mut self, channel: u8) -> bool {
        let (word, mask) = Self::slot(channel);
        let added = self.bits[word] & mask == 0;
        self.bits[word] |= mask;
        added
    }

    pub fn contains(&self, channel: u8) -> bool {
        let (word, mask) = Self::slot(channel);
        self.bits[word] & mask != 0
    }

    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    /// Channels in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |&ch| self.contains(ch))
    }
}

impl FromIterator<u8> for ChannelSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::new();
        for channel in iter {
            set.insert(channel);
        }
        set
    }
}
