// src/lib.rs
// PDS Reader Library - Public API

//! # PDS Reader
//!
//! A Rust library for decoding captures from Owon PDS oscilloscopes.
//!
//! ## Features
//!
//! - Decode multi-channel waveform captures into volts
//! - Extract timebase, sample rate, offset and sensitivity per channel
//! - Decode 640x480 screen bitmaps
//! - Read framed device transfers from any byte stream
//! - Export channels to CSV and bitmaps to PNG
//!
//! ## Example
//!
//! ```no_run
//! use pds_reader::Capture;
//!
//! let data = std::fs::read("capture.bin").expect("Failed to read file");
//! let capture = Capture::decode(&data).expect("Failed to decode capture");
//!
//! println!("Capture: {}", capture.name_str());
//! for channel in capture.channels() {
//!     println!("{}: {} samples at {} S/s", channel.name_str(), channel.samples, channel.sample_rate);
//! }
//!
//! // Export to CSV
//! capture.write_csv("output.csv", true).expect("Failed to write CSV");
//! ```

mod bitmap;
mod capture;
mod error;
mod export;
mod field;
mod scale;
mod sniff;
mod transfer;
mod waveform;

pub use bitmap::{decode_bitmap, Bitmap, BITMAP_HEADER_SIZE, BITMAP_HEIGHT, BITMAP_PIXEL_SIZE, BITMAP_WIDTH};
pub use capture::{Capture, Payload, SCOPE_NAME_LEN};
pub use error::{ErrorKind, PdsError, Result};
pub use export::{write_csv, write_png};
pub use field::{read_i32le, read_u32le, ByteCursor};
pub use scale::{sensitivity, timebase, SENSITIVITY, TIMEBASE};
pub use sniff::{sniff, CaptureKind, Variant, BITMAP_TAG, WAVEFORM_TAG};
pub use transfer::{read_transfer, TransferHeader, TransferKind, TRANSFER_HEADER_SIZE};
pub use waveform::{
    decode_waveform, Channel, CHANNEL_HEADER_SIZE, FILE_HEADER_SIZE, MAX_CHANNELS, SCALE_T,
    SCALE_V, SENSITIVITY_CORRECTION,
};
