//! Latency-to-signal mapping for the signal strength tool item.

use crate::color::Rgba;
use crate::constants::SIGNAL_FULL_PING;

pub const SIGNAL_BARS: usize = 4;

/// Number of filled bars for a round-trip latency in milliseconds.
///
/// Each quarter of a 100 ms window costs one bar; anything slower shows none.
pub fn bars_for_ping(ping: u32) -> usize {
    match ping {
        p if p <= SIGNAL_FULL_PING => 4,
        p if p <= SIGNAL_FULL_PING * 2 => 3,
        p if p <= SIGNAL_FULL_PING * 3 => 2,
        p if p <= SIGNAL_FULL_PING * 4 => 1,
        _ => 0,
    }
}

/// Color scale from blue (fast) through green and yellow to red (slow).
pub fn latency_color(ping: u32) -> Rgba {
    match ping {
        0..=10 => Rgba::rgb(0x6a, 0x6a, 0xff),
        11..=20 => Rgba::rgb(0x28, 0x94, 0xff),
        21..=30 => Rgba::rgb(0x00, 0xff, 0xff),
        31..=40 => Rgba::rgb(0x9a, 0xff, 0x02),
        41..=50 => Rgba::rgb(0xe1, 0xe1, 0x00),
        51..=60 => Rgba::rgb(0xea, 0xc1, 0x00),
        61..=70 => Rgba::rgb(0xe8, 0x00, 0xe8),
        71..=80 => Rgba::rgb(0xff, 0x00, 0x80),
        _ => Rgba::rgb(0xea, 0x00, 0x00),
    }
}
