use crate::convolution::PixelMatrix;
use crate::image_pipeline::common::error::Result;

pub trait GrayscaleReader {
    fn read_gray(&self, data: &[u8]) -> Result<PixelMatrix>;
}
