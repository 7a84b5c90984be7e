pub mod dcraw;
pub mod error;
pub mod traits;

pub use error::{InternalLibrawError, LibrawError};

extern crate rc_sys as sys;
use core::ptr::NonNull;
use log::debug;
#[cfg(windows)]
use log::warn;
use semver::Version;
use std::borrow::Cow;
use std::ffi::{CStr, CString};
use std::ops::Drop;
use std::path::Path;

/// Returns the version of libraw the bindings were generated from
pub const fn version() -> Version {
    Version {
        major: sys::LIBRAW_MAJOR_VERSION as u64,
        minor: sys::LIBRAW_MINOR_VERSION as u64,
        patch: sys::LIBRAW_PATCH_VERSION as u64,
        pre: semver::Prerelease::EMPTY,
        build: semver::BuildMetadata::EMPTY,
    }
}

/// Version string reported by the linked libraw, e.g. "0.21.2-Release"
pub fn version_string() -> Cow<'static, str> {
    let version = unsafe { sys::libraw_version() };
    if version.is_null() {
        return Cow::Borrowed("");
    }
    unsafe { CStr::from_ptr(version) }.to_string_lossy()
}

/// Number of cameras libraw knows about
pub fn camera_count() -> usize {
    usize::try_from(unsafe { sys::libraw_cameraCount() }).unwrap_or_default()
}

/// Every supported camera as "Make Model", in libraw's own order
///
/// Walks the NULL terminated table returned by libraw_cameraList, the strings are static
/// so no file or processor is needed
pub fn camera_list() -> Vec<Cow<'static, str>> {
    let mut cursor = unsafe { sys::libraw_cameraList() } as *const *const libc::c_char;
    let mut cameras = Vec::with_capacity(camera_count());
    if cursor.is_null() {
        return cameras;
    }
    unsafe {
        while !(*cursor).is_null() {
            cameras.push(CStr::from_ptr(*cursor).to_string_lossy());
            cursor = cursor.add(1);
        }
    }
    cameras
}

/// A struct wrapping the libraw_data_t type
pub struct Processor {
    inner: NonNull<sys::libraw_data_t>,
}

/// You can pass the Processor to another thread since it doesn't use any thread_local values
unsafe impl Send for Processor {}

impl Drop for Processor {
    fn drop(&mut self) {
        unsafe {
            sys::libraw_free_image(self.inner.as_ptr());
            sys::libraw_close(self.inner.as_ptr());
        }
    }
}

impl Default for Processor {
    /// Returns libraw_init(0)
    fn default() -> Self {
        Self::new(LibrawConstructorFlags::None)
    }
}

impl Processor {
    /// Calls libraw_init with the any of the constructor flags
    /// # May panic
    pub fn new(option: LibrawConstructorFlags) -> Self {
        Self::try_new(option).expect("Failed to initialize libraw")
    }

    pub fn try_new(option: LibrawConstructorFlags) -> Result<Self, LibrawError> {
        let inner = unsafe { sys::libraw_init(option as u32) };
        NonNull::new(inner)
            .map(|inner| Self { inner })
            .ok_or_else(|| LibrawError::CustomError("Got back null pointer from libraw_init".into()))
    }

    /// Calls libraw_open_file
    ///
    /// Fallback to libraw_open_wfile on windows if the open fails
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), LibrawError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(std::io::Error::new(std::io::ErrorKind::NotFound, "File not found").into());
        }

        self.recycle();
        debug!("libraw_open_file {}", path.display());

        let c_path = path_to_cstr(path)?;
        let ret = LibrawError::check_with_context(
            unsafe { sys::libraw_open_file(self.inner.as_ptr(), c_path.as_ptr()) },
            path,
        );

        // Windows only fallback to open_wfile
        #[cfg(windows)]
        {
            if ret.is_err() {
                warn!("Failed to open file using libraw_open_file in windows");
                warn!("Fallback to open_wfile");
                let wide_path = path_to_widestring(path)?;
                return LibrawError::check_with_context(
                    unsafe { sys::libraw_open_wfile(self.inner.as_ptr(), wide_path.as_ptr()) },
                    path,
                );
            }
        }

        if let Err(e) = &ret {
            debug!("libraw_open_file failed for {}: {e}", path.display());
        }
        ret
    }

    /// Get the idata struct from libraw_data_t
    pub fn idata(&'_ self) -> &'_ sys::libraw_iparams_t {
        unsafe { &self.inner.as_ref().idata }
    }

    /// Get the sizes struct from libraw_data_t
    pub fn sizes(&'_ self) -> &'_ sys::libraw_image_sizes_t {
        unsafe { &self.inner.as_ref().sizes }
    }

    /// The sizes struct for overriding the computed output size before dcraw_process
    pub fn sizes_mut(&'_ mut self) -> &'_ mut sys::libraw_image_sizes_t {
        unsafe { &mut self.inner.as_mut().sizes }
    }

    /// Get the output parameters
    pub fn params(&'_ mut self) -> &'_ mut sys::libraw_output_params_t {
        unsafe { &mut self.inner.as_mut().params }
    }

    /// Unpack the raw data and read it to memory
    pub fn unpack(&mut self) -> Result<(), LibrawError> {
        LibrawError::check(unsafe { sys::libraw_unpack(self.inner.as_ptr()) })
    }

    /// Frees the image buffers, the handle itself stays usable for the next open
    ///
    /// All other references should be invalid when we recycle so we take a mutable value to self
    pub fn recycle(&mut self) {
        unsafe { sys::libraw_recycle(self.inner.as_ptr()) }
    }
}

#[non_exhaustive]
#[cfg_attr(all(windows, target_env = "msvc"), repr(i32))]
#[cfg_attr(all(windows, target_env = "gnu"), repr(u32))]
#[cfg_attr(unix, repr(u32))]
pub enum LibrawConstructorFlags {
    None = sys::LibRaw_constructor_flags_LIBRAW_OPTIONS_NONE,
}

#[cfg(unix)]
fn path_to_cstr(path: impl AsRef<Path>) -> Result<CString, std::ffi::NulError> {
    use std::os::unix::ffi::OsStrExt;
    let path = path.as_ref().as_os_str().as_bytes();
    CString::new(path)
}

#[cfg(windows)]
fn path_to_cstr(path: impl AsRef<Path>) -> Result<CString, std::ffi::NulError> {
    let path = path.as_ref().display().to_string();
    CString::new(path.as_bytes())
}

#[cfg(windows)]
fn path_to_widestring(
    path: impl AsRef<Path>,
) -> Result<widestring::U16CString, widestring::error::ContainsNul<u16>> {
    widestring::U16CString::from_os_str(path.as_ref().as_os_str())
}
