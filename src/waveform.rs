// Waveform capture decoding
//
// Payload layout, all values little endian:
//
//   File header (10 bytes)
//     name          0  [u8; 6]   overlaps the "SPB" tag and variant byte
//     file length   6  u32
//
//   Channel record, repeated
//     name          0  [u8; 3]
//     block length  3  u32       record size excluding the name
//     screen length 7  u32
//     sample count 11  u32
//     slow         15  u32
//     timebase     19  u8        index into TIMEBASE
//     offset       23  i32
//     sensitivity  27  u8        index into SENSITIVITY
//     attenuation  31  u32       power of ten
//     (undecoded)  35  16 bytes
//     samples      51  [i16; sample count]

use std::borrow::Cow;

use crate::error::{PdsError, Result};
use crate::field::ByteCursor;
use crate::scale;
use crate::sniff::Variant;

pub const MAX_CHANNELS: usize = 4;
pub const FILE_HEADER_SIZE: usize = 10;
pub const CHANNEL_HEADER_SIZE: usize = 51;
pub const CHANNEL_NAME_LEN: usize = 3;

const CH_NAME: usize = 0;
const CH_BLOCK_LEN: usize = 3;
const CH_SAMPLE_LEN: usize = 11;
const CH_SLOW: usize = 15;
const CH_TIMEBASE: usize = 19;
const CH_OFFSET: usize = 23;
const CH_SENS: usize = 27;
const CH_ATTEN: usize = 31;

/// Divisions across the screen.
pub const SCALE_T: f64 = 10.0;
/// Raw counts per division.
pub const SCALE_V: f64 = 25.0;
/// Subtracted from the table sensitivity on W and X firmware.
pub const SENSITIVITY_CORRECTION: f64 = 0.0000005;

/// One decoded channel with its scaling metadata and voltage samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Channel {
    pub name: [u8; CHANNEL_NAME_LEN],
    pub samples: u32,
    /// Seconds per sample division (table value / 1000).
    pub timebase: f64,
    /// Samples per second.
    pub sample_rate: f64,
    /// Most recent time in slow mode, only meaningful for timebases >= 100ms.
    pub slow: f64,
    /// Volts.
    pub offset: f64,
    /// Volts per division, attenuation applied.
    pub sensitivity: f64,
    pub attenuation: u32,
    /// Volts, one per sample.
    pub voltages: Vec<f64>,
}

impl Channel {
    pub fn name_str(&self) -> Cow<'_, str> {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(self.name.len());
        String::from_utf8_lossy(&self.name[..end])
    }

    /// Time of each sample in seconds, relative to the first.
    pub fn time_values(&self) -> Vec<f64> {
        (0..self.voltages.len())
            .map(|i| i as f64 / self.sample_rate)
            .collect()
    }

    /// Decode the record starting at `record`'s position. The cursor is not moved.
    fn decode(record: &ByteCursor<'_>, variant: Variant) -> Result<Self> {
        let mut name = [0u8; CHANNEL_NAME_LEN];
        name.copy_from_slice(record.peek_bytes(CH_NAME, CHANNEL_NAME_LEN)?);

        let samples = record.peek_u32(CH_SAMPLE_LEN, 4)?;

        let timebase = scale::timebase(record.peek_u32(CH_TIMEBASE, 1)?)? / 1000.0;
        let sample_rate = samples as f64 / timebase / SCALE_T;

        let slow = record.peek_u32(CH_SLOW, 4)? as f64 / sample_rate;

        let attenuation_index = record.peek_u32(CH_ATTEN, 4)?;
        let attenuation = 10u32
            .checked_pow(attenuation_index)
            .ok_or(PdsError::AttenuationIndex(attenuation_index))?;

        let mut sensitivity = scale::sensitivity(record.peek_u32(CH_SENS, 1)?)?;
        if variant.corrects_sensitivity() {
            sensitivity -= SENSITIVITY_CORRECTION;
        }
        let sensitivity = sensitivity * attenuation as f64;

        let offset = record.peek_i32(CH_OFFSET, 4)? as f64 * sensitivity / SCALE_V;

        let data_len = (samples as usize)
            .checked_mul(2)
            .ok_or(PdsError::Truncated {
                offset: record.position() + CHANNEL_HEADER_SIZE,
                needed: usize::MAX,
                available: record.remaining().saturating_sub(CHANNEL_HEADER_SIZE),
            })?;
        let data = record.peek_bytes(CHANNEL_HEADER_SIZE, data_len)?;

        let mut voltages = Vec::new();
        voltages.try_reserve_exact(samples as usize)?;
        voltages.extend(
            data.chunks_exact(2)
                .map(|b| i16::from_le_bytes([b[0], b[1]]) as f64 * sensitivity / SCALE_V),
        );

        Ok(Channel {
            name,
            samples,
            timebase,
            sample_rate,
            slow,
            offset,
            sensitivity,
            attenuation,
            voltages,
        })
    }
}

/// Decode the channel records of a waveform payload.
///
/// Only the first `length` bytes of `buf` are looked at. Records past
/// [`MAX_CHANNELS`] are ignored. Any malformed record fails the whole decode.
pub fn decode_waveform(buf: &[u8], length: usize, variant: Variant) -> Result<Vec<Channel>> {
    let data = buf.get(..length).ok_or(PdsError::Truncated {
        offset: 0,
        needed: length,
        available: buf.len(),
    })?;

    let mut cursor = ByteCursor::new(data);
    cursor.skip(FILE_HEADER_SIZE)?;

    let mut channels = Vec::with_capacity(MAX_CHANNELS);
    while !cursor.is_at_end() {
        if channels.len() == MAX_CHANNELS {
            log::warn!(
                "waveform: ignoring {} bytes after channel {}",
                cursor.remaining(),
                MAX_CHANNELS
            );
            break;
        }

        log::trace!("waveform: record {} at offset {}", channels.len(), cursor.position());
        let channel = Channel::decode(&cursor, variant)?;
        log::debug!(
            "waveform: channel {} with {} samples, {:e} s, {} V/div, {}X",
            channel.name_str(),
            channel.samples,
            channel.timebase,
            channel.sensitivity,
            channel.attenuation
        );

        let block_size = cursor.peek_u32(CH_BLOCK_LEN, 4)? as usize;
        cursor.skip(block_size.saturating_add(CHANNEL_NAME_LEN))?;
        channels.push(channel);
    }

    Ok(channels)
}
