//! Output and pipeline configuration types

use crate::convolution::{ExecutionStrategy, WindowAnchor};

/// Container format of the filtered image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// RGBA PNG with the gray value replicated into R, G and B
    Png,
    /// 8-bit grayscale TIFF
    Tiff,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Tiff => "tiff",
        }
    }
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression, fast level
    Deflate,
}

/// How filtered values outside 0-255 become bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelWriteMode {
    /// Saturate to 0 or 255
    #[default]
    Clamp,
    /// Keep the low byte, like a plain integer-to-byte cast
    Wrap,
}

impl PixelWriteMode {
    #[inline]
    pub fn to_byte(self, value: i32) -> u8 {
        match self {
            PixelWriteMode::Clamp => value.clamp(0, 255) as u8,
            PixelWriteMode::Wrap => value as u8,
        }
    }
}

/// Configuration for a filter run over an encoded image
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Encoded output format
    pub output_format: OutputFormat,
    /// TIFF compression, ignored for PNG
    pub compression: TiffCompression,
    /// TIFF predictor (2 for horizontal differencing), ignored for PNG
    pub predictor: Option<u16>,
    /// Whether to validate image dimensions before filtering
    pub validate_dimensions: bool,
    /// Largest accepted width or height when validating
    pub max_dimension: Option<usize>,
    /// Scheduling of the convolution pass
    pub execution: ExecutionStrategy,
    /// Conversion of filtered values to bytes
    pub write_mode: PixelWriteMode,
    /// Window placement used by the preset filters
    pub anchor: WindowAnchor,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Png,
            compression: TiffCompression::Lzw,
            predictor: None,
            validate_dimensions: true,
            max_dimension: Some(50000),
            execution: ExecutionStrategy::default(),
            write_mode: PixelWriteMode::default(),
            anchor: WindowAnchor::default(),
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    output_format: Option<OutputFormat>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    execution: Option<ExecutionStrategy>,
    write_mode: Option<PixelWriteMode>,
    anchor: Option<WindowAnchor>,
}

impl PipelineConfigBuilder {
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn execution(mut self, execution: ExecutionStrategy) -> Self {
        self.execution = Some(execution);
        self
    }

    pub fn write_mode(mut self, mode: PixelWriteMode) -> Self {
        self.write_mode = Some(mode);
        self
    }

    pub fn anchor(mut self, anchor: WindowAnchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            output_format: self.output_format.unwrap_or(default.output_format),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            execution: self.execution.unwrap_or(default.execution),
            write_mode: self.write_mode.unwrap_or(default.write_mode),
            anchor: self.anchor.unwrap_or(default.anchor),
        }
    }
}
