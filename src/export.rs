// CSV and PNG writers for decoded captures

use std::io::{Cursor, Write};

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};

use crate::bitmap::{Bitmap, BITMAP_PIXEL_SIZE};
use crate::capture::Capture;
use crate::error::{PdsError, Result};

/// Write the channels of a waveform capture as time/level column pairs.
pub fn write_csv<W: Write>(capture: &Capture, writer: &mut W, verbose: bool) -> Result<()> {
    if !capture.is_waveform() {
        return Err(PdsError::WrongCaptureKind("waveform"));
    }
    let channels = capture.channels();

    if verbose {
        writeln!(writer, "Device, {}", capture.name_str())?;
        writeln!(writer, "Active Channels, {}", channels.len())?;
    }

    let header: Vec<String> = (1..=channels.len())
        .map(|n| format!("CH{n} Time (s), CH{n} Level (V)"))
        .collect();
    writeln!(writer, "{}", header.join(", "))?;

    let max_len = channels.iter().map(|c| c.voltages.len()).max().unwrap_or(0);
    for i in 0..max_len {
        for (j, channel) in channels.iter().enumerate() {
            if j > 0 {
                write!(writer, ", ")?;
            }
            match channel.voltages.get(i) {
                Some(level) => {
                    let time = i as f64 / channel.sample_rate;
                    write!(writer, "{:.12}, {:.6}", time, level)?;
                }
                None => write!(writer, ", ")?,
            }
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Encode a bitmap as an 8-bit RGB PNG.
pub fn write_png<W: Write>(bitmap: &Bitmap, writer: &mut W) -> Result<()> {
    let mut rgb = Vec::new();
    rgb.try_reserve_exact(bitmap.as_bytes().len())?;
    for bgr in bitmap.as_bytes().chunks_exact(BITMAP_PIXEL_SIZE) {
        rgb.extend_from_slice(&[bgr[2], bgr[1], bgr[0]]);
    }

    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(bitmap.width(), bitmap.height(), rgb)
        .ok_or_else(|| PdsError::Image("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    writer.write_all(&output)?;
    Ok(())
}
