//! Commands accepted by the dimmer
//!
//! The network layer turns inbound requests into [`DimmerCommand`]s, either
//! calling [`Dimmer::handle`](crate::Dimmer::handle) directly or pushing
//! them onto a [`CommandQueue`](crate::CommandQueue) drained by the run loop.

use crate::level::{CHANNEL_COUNT, ChannelIndex, ChannelSelection, Intensity};
use crate::script::parse_leading_int;

/// Request to read or change the dimmer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimmerCommand {
    /// Set one channel. The value is validated by the channel bank.
    SetChannel { channel: ChannelIndex, value: i32 },
    /// Set every channel to the same value
    SetAll(i32),
    /// Save current values to persistent storage
    Save,
    /// Reload saved values and resync the hardware
    Restore,
    /// Read the current value of a channel
    Read(ChannelIndex),
    /// Start the flicker script on a channel selection
    StartFlicker(ChannelSelection),
    /// Abort a running flicker
    StopFlicker,
}

/// Successful result of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Done,
    Value(Intensity),
}

const ROUTE_DIMMER: &str = "/dimmer";
const ROUTE_ALL: &str = "/all/";
const ROUTE_SAVE: &str = "/save";
const ROUTE_RESTORE: &str = "/restore";
const ROUTE_FLICKER: &str = "/flicker/";
const ROUTE_STOP: &str = "/stop";

impl DimmerCommand {
    /// Map an HTTP GET path to a command
    ///
    /// Channels are numbered from 1 in paths:
    /// - `/dimmer2` reads channel 2, `/dimmer2/40` sets it to 40
    /// - `/all/40` sets every channel
    /// - `/save`, `/restore`, `/stop`
    /// - `/flicker/13` flickers channels 1 and 3 (at most four digits)
    ///
    /// Returns `None` for unknown paths and unparsable numbers. Values
    /// outside the intensity range are still routed.
    pub fn parse_route(path: &str) -> Option<Self> {
        match path {
            ROUTE_SAVE => return Some(Self::Save),
            ROUTE_RESTORE => return Some(Self::Restore),
            ROUTE_STOP => return Some(Self::StopFlicker),
            _ => {}
        }

        if let Some(rest) = path.strip_prefix(ROUTE_ALL) {
            return parse_value(rest).map(Self::SetAll);
        }
        if let Some(rest) = path.strip_prefix(ROUTE_FLICKER) {
            return parse_selection(rest).map(Self::StartFlicker);
        }

        let rest = path.strip_prefix(ROUTE_DIMMER)?;
        let mut chars = rest.chars();
        let channel = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .and_then(channel_from_number)?;
        match chars.as_str() {
            "" => Some(Self::Read(channel)),
            tail => {
                let value = parse_value(tail.strip_prefix('/')?)?;
                Some(Self::SetChannel { channel, value })
            }
        }
    }
}

fn parse_value(input: &str) -> Option<i32> {
    parse_leading_int(input).map(|(value, _)| value)
}

fn channel_from_number(number: u32) -> Option<ChannelIndex> {
    let index = u8::try_from(number.checked_sub(1)?).ok()?;
    ChannelIndex::new(index)
}

fn parse_selection(digits: &str) -> Option<ChannelSelection> {
    if digits.is_empty() || digits.len() > CHANNEL_COUNT {
        return None;
    }
    let mut slots = [None; CHANNEL_COUNT];
    for (slot, c) in slots.iter_mut().zip(digits.chars()) {
        *slot = Some(channel_from_number(c.to_digit(10)?)?);
    }
    Some(ChannelSelection::new(slots))
}
