//! Pipeline conversions module
//!
//! Orchestrates decode, convolution and encode for whole images.

mod filter_image;

pub use filter_image::FilterPipeline;
