//! End-to-end pipelines: BMP in, encoded bytes out to a file.

use std::path::Path;

use enough::Stop;

use crate::bmp;
use crate::decode::{NormalizedImage, ScratchSizing};
use crate::encoder::{BlockEncoder, EncodeConfig, EncodedFrame, OutputBudget, encode_frame};
use crate::error::BmpError;

/// Load a 16/24/32-bit BMP file, encode it, and write the result to `output`.
///
/// The encoder's output budget defaults to [`OutputBudget::QuarterPlanar`].
pub fn process_bmp_file<E: BlockEncoder>(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    encoder: &mut E,
    config: &EncodeConfig,
    stop: impl Stop,
) -> Result<EncodedFrame, BmpError> {
    let image = bmp::load(input.as_ref(), None, &stop)?;
    log_geometry("process_bmp_file", &image);
    let config = config.or_budget(OutputBudget::QuarterPlanar);
    finish(encoder, &image, &config, output.as_ref(), &stop)
}

/// Normalize an in-memory 16-bit BMP, encode it, and write the result to
/// `output`.
///
/// The encoder's output budget defaults to the length of `data`.
pub fn process_bmp_data<E: BlockEncoder>(
    data: &[u8],
    output: impl AsRef<Path>,
    encoder: &mut E,
    config: &EncodeConfig,
    stop: impl Stop,
) -> Result<EncodedFrame, BmpError> {
    let image = bmp::normalize_rgb565(data, ScratchSizing::InputLength, None, &stop)?;
    log_geometry("process_bmp_data", &image);
    let config = config.or_budget(OutputBudget::Bytes(data.len()));
    finish(encoder, &image, &config, output.as_ref(), &stop)
}

/// Write a whole buffer to `path`, replacing any existing file.
pub fn write_output(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), BmpError> {
    let path = path.as_ref();
    std::fs::write(path, bytes)?;
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn finish<E: BlockEncoder>(
    encoder: &mut E,
    image: &NormalizedImage,
    config: &EncodeConfig,
    output: &Path,
    stop: &dyn Stop,
) -> Result<EncodedFrame, BmpError> {
    let frame = encode_frame(encoder, image, config, stop)?;
    write_output(output, frame.bytes())?;
    Ok(frame)
}

fn log_geometry(stage: &str, image: &NormalizedImage) {
    log::debug!(
        "{stage}: w {}, h {}, pitch {}",
        image.width,
        image.height,
        image.pitch()
    );
}
