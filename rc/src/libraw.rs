//! LibRaw behind [`RawProcessor`]

use std::borrow::Cow;
use std::path::Path;

use rc_libraw::traits::AsAscii;
use rc_libraw::{LibrawError, Processor};

use crate::processor::{ImageInfo, OutputTarget, RawProcessor};

impl RawProcessor for Processor {
    type Error = LibrawError;

    fn camera_list() -> Vec<String> {
        rc_libraw::camera_list()
            .into_iter()
            .map(Cow::into_owned)
            .collect()
    }

    fn library_version() -> String {
        rc_libraw::version_string().into_owned()
    }

    fn open(&mut self, path: &Path) -> Result<(), LibrawError> {
        Processor::open(self, path)
    }

    fn unpack(&mut self) -> Result<(), LibrawError> {
        Processor::unpack(self)
    }

    fn image_info(&self) -> ImageInfo {
        let idata = self.idata();
        let sizes = self.sizes();
        ImageInfo {
            make: idata.make.as_ascii().to_owned(),
            model: idata.model.as_ascii().to_owned(),
            width: sizes.iwidth,
            height: sizes.iheight,
        }
    }

    fn set_output_width(&mut self, width: u16) {
        self.sizes_mut().iwidth = width;
    }

    fn set_output_height(&mut self, height: u16) {
        self.sizes_mut().iheight = height;
    }

    fn set_output_tiff(&mut self, tiff: bool) {
        self.params().output_tiff = i32::from(tiff);
    }

    fn process(&mut self) -> Result<(), LibrawError> {
        self.dcraw_process()
    }

    fn write(&mut self, target: &OutputTarget) -> Result<(), LibrawError> {
        match target {
            OutputTarget::Stdout => self.dcraw_ppm_tiff_writer_stdout(),
            OutputTarget::File(path) => self.dcraw_ppm_tiff_writer(path),
        }
    }

    fn release(&mut self) {
        self.recycle();
    }
}
