use crate::sys;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum LibrawError {
    #[error("{0}")]
    InternalError(InternalLibrawError, String),
    #[error("{0}")]
    IoError(#[from] std::io::Error),
    #[error("{0}")]
    NulError(#[from] std::ffi::NulError),
    #[cfg(windows)]
    #[error("{0}")]
    WidestringError(#[from] widestring::error::ContainsNul<u16>),
    #[error("{0}")]
    CustomError(String),
}

impl LibrawError {
    pub fn check(code: i32) -> Result<(), Self> {
        Ok(InternalLibrawError::check(code)?)
    }

    /// Same as [`LibrawError::check`] but remembers which file was being worked on
    pub fn check_with_context(code: i32, file: impl AsRef<Path>) -> Result<(), Self> {
        InternalLibrawError::check(code)
            .map_err(|e| Self::InternalError(e, file.as_ref().display().to_string()))
    }

    /// The LibRaw error code behind this error, if it came from LibRaw
    pub fn libraw_err_type(&self) -> Option<InternalLibrawError> {
        match self {
            Self::InternalError(e, _) => Some(*e),
            _ => None,
        }
    }
}

impl From<InternalLibrawError> for LibrawError {
    fn from(e: InternalLibrawError) -> Self {
        LibrawError::InternalError(e, String::new())
    }
}

/// Error Codes from LibRaw
///
/// Check https://www.libraw.org/docs/API-datastruct.html#LibRaw_errors for reference
#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternalLibrawError {
    UnspecifiedError = sys::LibRaw_errors_LIBRAW_UNSPECIFIED_ERROR,
    FileUnsupported = sys::LibRaw_errors_LIBRAW_FILE_UNSUPPORTED,
    RequestForNonexistentImage = sys::LibRaw_errors_LIBRAW_REQUEST_FOR_NONEXISTENT_IMAGE,
    OutOfOrderCall = sys::LibRaw_errors_LIBRAW_OUT_OF_ORDER_CALL,
    NoThumbnail = sys::LibRaw_errors_LIBRAW_NO_THUMBNAIL,
    UnsupportedThumbnail = sys::LibRaw_errors_LIBRAW_UNSUPPORTED_THUMBNAIL,
    InputClosed = sys::LibRaw_errors_LIBRAW_INPUT_CLOSED,
    NotImplemented = sys::LibRaw_errors_LIBRAW_NOT_IMPLEMENTED,
    UnsufficientMemory = sys::LibRaw_errors_LIBRAW_UNSUFFICIENT_MEMORY,
    DataError = sys::LibRaw_errors_LIBRAW_DATA_ERROR,
    IoError = sys::LibRaw_errors_LIBRAW_IO_ERROR,
    CancelledByCallback = sys::LibRaw_errors_LIBRAW_CANCELLED_BY_CALLBACK,
    BadCrop = sys::LibRaw_errors_LIBRAW_BAD_CROP,
    TooBig = sys::LibRaw_errors_LIBRAW_TOO_BIG,
    MempoolOverflow = sys::LibRaw_errors_LIBRAW_MEMPOOL_OVERFLOW,
}

/// Message text comes straight from libraw_strerror
impl std::fmt::Display for InternalLibrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message =
            unsafe { std::ffi::CStr::from_ptr(sys::libraw_strerror(self.code())) }.to_string_lossy();
        f.write_str(&message)
    }
}

impl InternalLibrawError {
    pub const SUCCESS: i32 = sys::LibRaw_errors_LIBRAW_SUCCESS;

    pub fn code(&self) -> i32 {
        *self as i32
    }

    pub fn is_fatal(&self) -> bool {
        self.code() < -100000
    }

    /// `None` for LIBRAW_SUCCESS
    pub fn from_code(code: i32) -> Option<Self> {
        use InternalLibrawError::*;
        let e = match code {
            Self::SUCCESS => return None,
            sys::LibRaw_errors_LIBRAW_FILE_UNSUPPORTED => FileUnsupported,
            sys::LibRaw_errors_LIBRAW_REQUEST_FOR_NONEXISTENT_IMAGE => RequestForNonexistentImage,
            sys::LibRaw_errors_LIBRAW_OUT_OF_ORDER_CALL => OutOfOrderCall,
            sys::LibRaw_errors_LIBRAW_NO_THUMBNAIL => NoThumbnail,
            sys::LibRaw_errors_LIBRAW_UNSUPPORTED_THUMBNAIL => UnsupportedThumbnail,
            sys::LibRaw_errors_LIBRAW_INPUT_CLOSED => InputClosed,
            sys::LibRaw_errors_LIBRAW_NOT_IMPLEMENTED => NotImplemented,
            sys::LibRaw_errors_LIBRAW_UNSUFFICIENT_MEMORY => UnsufficientMemory,
            sys::LibRaw_errors_LIBRAW_DATA_ERROR => DataError,
            sys::LibRaw_errors_LIBRAW_IO_ERROR => IoError,
            sys::LibRaw_errors_LIBRAW_CANCELLED_BY_CALLBACK => CancelledByCallback,
            sys::LibRaw_errors_LIBRAW_BAD_CROP => BadCrop,
            sys::LibRaw_errors_LIBRAW_TOO_BIG => TooBig,
            sys::LibRaw_errors_LIBRAW_MEMPOOL_OVERFLOW => MempoolOverflow,
            // codes added by newer LibRaw releases
            _ => UnspecifiedError,
        };
        Some(e)
    }

    #[inline]
    pub fn check(code: i32) -> Result<(), Self> {
        match Self::from_code(code) {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }
}
