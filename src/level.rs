use crate::DimmerError;

/// Number of independently dimmable outputs
pub const CHANNEL_COUNT: usize = 4;

/// Highest intensity a channel accepts
pub const MAX_INTENSITY: u8 = 100;

/// Index of one of the dimmer outputs (`0..CHANNEL_COUNT`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChannelIndex(u8);

impl ChannelIndex {
    /// All channels in ascending order
    pub const ALL: [Self; CHANNEL_COUNT] = [Self(0), Self(1), Self(2), Self(3)];

    /// Create a channel index, returns `None` if there is no such channel
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < CHANNEL_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Zero-based index of the channel
    pub const fn index(self) -> u8 {
        self.0
    }

    pub(crate) const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for ChannelIndex {
    type Error = DimmerError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index).ok_or(DimmerError::InvalidChannel(index))
    }
}

/// Channel intensity, always within `0..=MAX_INTENSITY`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Intensity(u8);

impl Intensity {
    pub const OFF: Self = Self(0);
    pub const FULL: Self = Self(MAX_INTENSITY);

    /// Create an intensity, returns `None` above `MAX_INTENSITY`
    pub const fn new(value: u8) -> Option<Self> {
        if value <= MAX_INTENSITY {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Intensity mirrored around the scale (`100 - value`)
    pub const fn inverted(self) -> Self {
        Self(MAX_INTENSITY - self.0)
    }
}

impl TryFrom<i32> for Intensity {
    type Error = DimmerError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(DimmerError::OutOfRange(value))
    }
}

impl From<Intensity> for u8 {
    fn from(intensity: Intensity) -> Self {
        intensity.0
    }
}

/// Ordered set of up to four target channels
///
/// Each slot either names a channel or is empty. Slots are visited in
/// order and duplicates are kept, so a caller can target fewer than four
/// channels by leaving the remaining slots empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelSelection {
    slots: [Option<ChannelIndex>; CHANNEL_COUNT],
}

impl ChannelSelection {
    pub const fn new(slots: [Option<ChannelIndex>; CHANNEL_COUNT]) -> Self {
        Self { slots }
    }

    /// Selection with no channel at all
    pub const fn none() -> Self {
        Self::new([None; CHANNEL_COUNT])
    }

    /// Selection targeting a single channel
    pub const fn single(channel: ChannelIndex) -> Self {
        Self::new([Some(channel), None, None, None])
    }

    /// Selection targeting every channel in ascending order
    pub const fn all() -> Self {
        let [a, b, c, d] = ChannelIndex::ALL;
        Self::new([Some(a), Some(b), Some(c), Some(d)])
    }

    /// Build a selection from raw slot bytes
    ///
    /// Any byte that is not a valid channel index (e.g. the `0xFF`
    /// "no channel" marker) leaves its slot empty.
    pub const fn from_raw(raw: [u8; CHANNEL_COUNT]) -> Self {
        Self::new([
            ChannelIndex::new(raw[0]),
            ChannelIndex::new(raw[1]),
            ChannelIndex::new(raw[2]),
            ChannelIndex::new(raw[3]),
        ])
    }

    pub const fn slots(&self) -> &[Option<ChannelIndex>; CHANNEL_COUNT] {
        &self.slots
    }

    /// Check if no slot names a channel
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Iterate over the selected channels in slot order
    pub fn iter(&self) -> impl Iterator<Item = ChannelIndex> + '_ {
        self.slots.iter().flatten().copied()
    }
}
