use std::fmt;
use std::path::{Path, PathBuf};

/// Where the encoded image goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => f.write_str("stdout"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// What the decoder found after opening a file, for diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageInfo {
    pub make: String,
    pub model: String,
    /// Output size the decoder computed
    pub width: u16,
    pub height: u16,
}

/// The raw decoding library as seen by the converter
///
/// Calls are expected in the order open, unpack, the setters, process, write, release.
/// Decoding, demosaicing and encoding all happen behind this trait.
pub trait RawProcessor {
    /// Displays as the library's own message for the failure
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every camera the library supports, no file involved
    fn camera_list() -> Vec<String>;
    fn library_version() -> String;

    /// Load the container and metadata
    fn open(&mut self, path: &Path) -> Result<(), Self::Error>;
    /// Decode the sensor data
    fn unpack(&mut self) -> Result<(), Self::Error>;
    fn image_info(&self) -> ImageInfo;

    fn set_output_width(&mut self, width: u16);
    fn set_output_height(&mut self, height: u16);
    fn set_output_tiff(&mut self, tiff: bool);

    /// Demosaic and color pipeline with the current options
    fn process(&mut self) -> Result<(), Self::Error>;
    /// Encode and emit, bytes are passed through untouched
    fn write(&mut self, target: &OutputTarget) -> Result<(), Self::Error>;
    /// Free the decoded buffers
    fn release(&mut self);
}
