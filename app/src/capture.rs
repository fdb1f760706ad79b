use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use noise_core::{ScalarField, utils::to_rgb8};

use crate::config::CaptureFormat;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("{0} already exists, refusing to overwrite")]
    AlreadyExists(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("encoding error: {0}")]
    Encode(#[from] image::ImageError),
    #[error("field of {width}x{height} does not fit an image buffer")]
    BadDimensions { width: usize, height: usize },
}

// The extension is appended, so "out.v2" becomes "out.v2.png"
pub fn output_path(base: &Path, format: CaptureFormat) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

// Encode the field as gray RGB and write it next to `base`. Never overwrites.
pub fn capture(
    field: &ScalarField,
    base: &Path,
    format: CaptureFormat,
) -> Result<PathBuf, CaptureError> {
    let (width, height) = (field.width(), field.height());
    let bad = || CaptureError::BadDimensions { width, height };
    let w = u32::try_from(width).map_err(|_| bad())?;
    let h = u32::try_from(height).map_err(|_| bad())?;
    let img = RgbImage::from_raw(w, h, to_rgb8(field)).ok_or_else(bad)?;

    let image_format = match format {
        CaptureFormat::Png => ImageFormat::Png,
        CaptureFormat::Jpeg => ImageFormat::Jpeg,
    };
    // Encode fully in memory so a failed encode never leaves a file behind
    let mut encoded = Vec::new();
    img.write_to(&mut Cursor::new(&mut encoded), image_format)?;

    let path = output_path(base, format);
    let mut file = match File::create_new(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(CaptureError::AlreadyExists(path));
        }
        Err(e) => return Err(e.into()),
    };

    let written = file.write_all(&encoded).and_then(|()| file.sync_all());
    drop(file);
    if let Err(e) = written {
        // A partial file would block every retry with AlreadyExists
        let _ = std::fs::remove_file(&path);
        return Err(e.into());
    }

    Ok(path)
}
