use std::ffi::CStr;

/// Read LibRaw's fixed size, nul padded `char` fields as text
pub trait AsAscii {
    fn as_ascii(&self) -> &str;
}

impl<const LEN: usize> AsAscii for [libc::c_char; LEN] {
    fn as_ascii(&self) -> &str {
        // c_char is i8 or u8 depending on the target, the bytes are the same
        let bytes = unsafe { std::slice::from_raw_parts(self.as_ptr().cast::<u8>(), LEN) };
        CStr::from_bytes_until_nul(bytes)
            .ok()
            .and_then(|s| s.to_str().ok())
            .unwrap_or_default()
            .trim()
    }
}
