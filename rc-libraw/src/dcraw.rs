use crate::*;

/// The filename libraw's writers treat as standard output
pub const STDOUT: &str = "-";

impl Processor {
    /// Demosaic and run the color pipeline with the current params
    pub fn dcraw_process(&mut self) -> Result<(), LibrawError> {
        LibrawError::check(unsafe { sys::libraw_dcraw_process(self.inner.as_ptr()) })
    }

    /// Encode the processed image as PPM/PGM, or TIFF when params.output_tiff is set
    pub fn dcraw_ppm_tiff_writer(&mut self, path: impl AsRef<Path>) -> Result<(), LibrawError> {
        let c_path = path_to_cstr(&path)?;
        let code =
            unsafe { sys::libraw_dcraw_ppm_tiff_writer(self.inner.as_ptr(), c_path.as_ptr()) };
        // a failed fopen comes back as a positive errno instead of a LibRaw_errors code
        if code > 0 {
            return Err(std::io::Error::from_raw_os_error(code).into());
        }
        LibrawError::check_with_context(code, path)
    }

    /// Same as dcraw_ppm_tiff_writer but to stdout
    ///
    /// libraw writes through the C stdio `stdout`, which is flushed here so the image is
    /// complete before anything else touches the stream
    pub fn dcraw_ppm_tiff_writer_stdout(&mut self) -> Result<(), LibrawError> {
        let ret = self.dcraw_ppm_tiff_writer(STDOUT);
        unsafe { libc::fflush(core::ptr::null_mut()) };
        ret
    }
}
