use std::io::Write;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::convolution::{KernelFn, PixelMatrix, apply_mask_with};
use crate::image_pipeline::{
    common::{PipelineError, PipelineTimings, Result, Timer},
    grayscale::{GrayscaleReader, ImageCrateReader},
    output::{FormatWriter, MatrixWriter, PipelineConfig},
};

/// Decode, convolve and re-encode an image with one kernel function.
pub struct FilterPipeline<R: GrayscaleReader, W: MatrixWriter> {
    reader: R,
    writer: W,
    config: PipelineConfig,
}

impl FilterPipeline<ImageCrateReader, FormatWriter> {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            reader: ImageCrateReader,
            writer: FormatWriter,
            config,
        }
    }
}

impl<R: GrayscaleReader, W: MatrixWriter> FilterPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: PipelineConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, matrix: &PixelMatrix) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        let (height, width) = matrix.shape();
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(PipelineError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Runs the convolution stage alone on an already decoded matrix.
    pub fn filter_matrix<K: KernelFn + ?Sized>(
        &self,
        matrix: &PixelMatrix,
        kernel: &K,
    ) -> Result<PixelMatrix> {
        apply_mask_with(matrix, kernel, self.config.execution).map_err(|source| {
            PipelineError::Filter {
                filter: kernel.name().to_string(),
                source,
            }
        })
    }

    pub fn apply<K: KernelFn + ?Sized>(
        &self,
        input_data: &[u8],
        kernel: &K,
        output: &mut dyn Write,
    ) -> Result<()> {
        self.apply_with_timings(input_data, kernel, output)
            .map(|_| ())
    }

    #[instrument(skip_all, fields(filter = kernel.name(), input_size = input_data.len()))]
    pub fn apply_with_timings<K: KernelFn + ?Sized>(
        &self,
        input_data: &[u8],
        kernel: &K,
        output: &mut dyn Write,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        info!("Starting filter pass");

        let timer = Timer::start("decode_gray");
        let matrix = {
            let _span = tracing::info_span!("decode_gray").entered();
            self.reader.read_gray(input_data)?
        };
        timings.record(timer);

        let timer = Timer::start("validate_dimensions");
        {
            let _span = tracing::info_span!(
                "validate_dimensions",
                rows = matrix.rows(),
                cols = matrix.cols()
            )
            .entered();
            self.validate_dimensions(&matrix)?;
        }
        timings.record(timer);

        let timer = Timer::start("convolve");
        let filtered = {
            let _span = tracing::info_span!("convolve", strategy = ?self.config.execution).entered();
            self.filter_matrix(&matrix, kernel)?
        };
        timings.record(timer);

        let timer = Timer::start("encode");
        {
            let _span = tracing::info_span!("encode", format = ?self.config.output_format).entered();
            self.writer.write_matrix(&filtered, output, &self.config)?;
        }
        timings.record(timer);

        info!(
            width = filtered.cols(),
            height = filtered.rows(),
            "Filter complete in {:.3}ms",
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok(timings)
    }

    pub fn apply_file<K: KernelFn + ?Sized, P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        kernel: &K,
    ) -> Result<PipelineTimings> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            filter = kernel.name(),
            "Filtering file"
        );

        let mut timings = PipelineTimings::new();

        let timer = Timer::start("read_input_file");
        let input_data = std::fs::read(input_path).map_err(|e| {
            PipelineError::InputReadError(format!("{}: {}", input_path.display(), e))
        })?;
        timings.record(timer);

        // Filter before touching the output path so a failed pass leaves no file.
        let mut encoded = Vec::new();
        timings.extend(self.apply_with_timings(&input_data, kernel, &mut encoded)?);

        let timer = Timer::start("write_output_file");
        std::fs::write(output_path, &encoded).map_err(|e| {
            PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;
        timings.record(timer);

        Ok(timings)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PipelineConfig) {
        self.config = config;
    }
}
