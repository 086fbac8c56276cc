use std::io::{Cursor, Seek, Write};
use std::path::Path;

use crate::buffer::RenderedBuffer;
use crate::error::SynthError;

pub const HEADER_LEN: usize = 44;

fn wav_spec(buffer: &RenderedBuffer) -> hound::WavSpec {
    hound::WavSpec {
        channels: 2,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

pub fn write_wav<W: Write + Seek>(buffer: &RenderedBuffer, writer: W) -> Result<(), SynthError> {
    let mut wav = hound::WavWriter::new(writer, wav_spec(buffer))?;
    let mut samples = wav.get_i16_writer(buffer.samples.len() as u32);
    for &s in buffer.samples.iter() {
        samples.write_sample(s);
    }
    samples.flush()?;
    wav.finalize()?;
    Ok(())
}

pub fn to_wav_bytes(buffer: &RenderedBuffer) -> Result<Vec<u8>, SynthError> {
    let mut cursor = Cursor::new(Vec::with_capacity(HEADER_LEN + buffer.samples.len() * 2));
    write_wav(buffer, &mut cursor)?;
    Ok(cursor.into_inner())
}

pub fn export_wav(buffer: &RenderedBuffer, path: impl AsRef<Path>) -> Result<(), SynthError> {
    let path = path.as_ref();
    let mut wav = hound::WavWriter::create(path, wav_spec(buffer))?;
    for &s in buffer.samples.iter() {
        wav.write_sample(s)?;
    }
    wav.finalize()?;
    log::info!("Exported {} frames to {}", buffer.frames(), path.display());
    Ok(())
}
