//! Binary PGM (`P5`) codec.
//!
//! Layout:
//!
//! ```text
//! P5\n
//! # any number of comment lines\n
//! <width> <height>\n
//! <maxval>\n
//! <width * height samples, 1 byte each if maxval < 256, else 2 bytes big-endian>
//! ```
//!
//! Comment lines are also tolerated between the dimensions and the maxval.
//! Anything after the last sample is ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use crate::raster::RasterMatrix;
use crate::types::{GridError, PGM_MAX_MAXVAL, Result};

const PGM_MAGIC: &str = "P5";

/// Decode a binary PGM stream into a normalized matrix.
pub fn decode_pgm<R: Read>(reader: R) -> Result<RasterMatrix> {
    let mut reader = BufReader::new(reader);

    let magic = read_header_line(&mut reader, "magic token")?;
    if magic != PGM_MAGIC {
        return Err(GridError::Format(format!(
            "expected magic token {PGM_MAGIC:?}, found {magic:?}"
        )));
    }

    let dims = read_content_line(&mut reader, "dimensions")?;
    let fields: Vec<&str> = dims.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(GridError::Format(format!(
            "dimensions line must hold exactly 2 integers, found {} field(s) in {dims:?}",
            fields.len()
        )));
    }
    let width = parse_positive(fields[0], "width")?;
    let height = parse_positive(fields[1], "height")?;

    let maxval_line = read_content_line(&mut reader, "maxval")?;
    let maxval = parse_positive(&maxval_line, "maxval")?;
    if maxval > PGM_MAX_MAXVAL as usize {
        return Err(GridError::Format(format!(
            "maxval {maxval} exceeds {PGM_MAX_MAXVAL}"
        )));
    }
    let maxval = maxval as u32;
    let sample_bytes = if maxval < 256 { 1 } else { 2 };

    let len = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(sample_bytes))
        .ok_or_else(|| GridError::Format(format!("raster {width}x{height} is too large")))?;

    // Grow the buffer only as bytes arrive; the header's size is untrusted.
    let mut raw = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut raw)?;
    if raw.len() < len {
        return Err(GridError::Format(format!(
            "truncated sample data: expected {len} bytes for {width}x{height} at {} byte(s) per sample, found {}",
            sample_bytes,
            raw.len()
        )));
    }

    let samples: Vec<u32> = if sample_bytes == 1 {
        raw.iter().map(|&b| u32::from(b)).collect()
    } else {
        raw.chunks_exact(2)
            .map(|pair| u32::from(u16::from_be_bytes([pair[0], pair[1]])))
            .collect()
    };

    let scale = maxval as f32;
    let mut data = Vec::with_capacity(samples.len());
    for (i, &sample) in samples.iter().enumerate() {
        if sample > maxval {
            return Err(GridError::Format(format!(
                "sample {sample} at row {}, col {} exceeds maxval {maxval}",
                i / width,
                i % width
            )));
        }
        data.push(sample as f32 / scale);
    }

    tracing::debug!(width, height, maxval, "decoded pgm raster");
    RasterMatrix::new(height, width, data)
}

/// Open and decode a PGM file.
pub fn decode_pgm_file(path: impl AsRef<Path>) -> Result<RasterMatrix> {
    let file = File::open(path.as_ref())?;
    decode_pgm(file)
}

/// Write `raster` as a binary PGM, quantizing each sample to `round(v * maxval)`.
///
/// Values are clamped to `[0, 1]` first. `maxval` of 256 or more produces
/// 16-bit big-endian samples.
pub fn encode_pgm<W: Write>(raster: &RasterMatrix, maxval: u16, mut writer: W) -> Result<()> {
    if maxval == 0 {
        return Err(GridError::Format("maxval must be positive".to_string()));
    }

    write!(
        writer,
        "{PGM_MAGIC}\n{} {}\n{maxval}\n",
        raster.cols(),
        raster.rows()
    )?;

    let scale = f32::from(maxval);
    let wide = maxval >= 256;
    let mut body = Vec::with_capacity(raster.data().len() * if wide { 2 } else { 1 });
    for &value in raster.data() {
        let sample = (value.clamp(0.0, 1.0) * scale).round() as u16;
        if wide {
            body.extend_from_slice(&sample.to_be_bytes());
        } else {
            body.push(sample as u8);
        }
    }
    writer.write_all(&body)?;
    Ok(())
}

fn read_header_line<R: BufRead>(reader: &mut R, what: &str) -> Result<String> {
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf)?;
    if n == 0 {
        return Err(GridError::Format(format!(
            "unexpected end of header while reading {what}"
        )));
    }
    let line = std::str::from_utf8(&buf)
        .map_err(|_| GridError::Format(format!("{what} line is not valid text")))?;
    Ok(line.trim().to_string())
}

fn read_content_line<R: BufRead>(reader: &mut R, what: &str) -> Result<String> {
    loop {
        let line = read_header_line(reader, what)?;
        if !line.starts_with('#') {
            return Ok(line);
        }
    }
}

fn parse_positive(token: &str, what: &str) -> Result<usize> {
    match token.parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(GridError::Format(format!(
            "{what} must be a positive integer, found {token:?}"
        ))),
    }
}
