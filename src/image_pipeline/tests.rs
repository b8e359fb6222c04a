#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};
    use std::sync::{Arc, Mutex};

    use crate::convolution::{
        ConvolutionKernel, EdgeDetector, ExecutionStrategy, FilterError, KernelFn, PixelMatrix,
    };
    use crate::image_pipeline::{
        FilterPipeline, GrayscaleReader, MatrixWriter, OutputFormat, PipelineConfig,
        PipelineError, PixelWriteMode, Result, TiffCompression,
    };

    struct MockReader {
        should_fail: bool,
        mock_data: Option<PixelMatrix>,
    }

    impl GrayscaleReader for MockReader {
        fn read_gray(&self, _data: &[u8]) -> Result<PixelMatrix> {
            if self.should_fail {
                return Err(PipelineError::DecodeError("Mock decode error".to_string()));
            }
            Ok(self
                .mock_data
                .clone()
                .unwrap_or_else(|| PixelMatrix::new(100, 100)))
        }
    }

    struct MockWriter {
        should_fail: bool,
        written_data: Arc<Mutex<Vec<PixelMatrix>>>,
    }

    impl MatrixWriter for MockWriter {
        fn write_matrix(
            &self,
            matrix: &PixelMatrix,
            _output: &mut dyn Write,
            _config: &PipelineConfig,
        ) -> Result<()> {
            if self.should_fail {
                return Err(PipelineError::EncodeError("Mock encode error".to_string()));
            }
            self.written_data.lock().unwrap().push(matrix.clone());
            Ok(())
        }
    }

    fn sample() -> PixelMatrix {
        PixelMatrix::from_rows(vec![vec![0, 0, 5], vec![0, 0, 10], vec![5, 1, 10]]).unwrap()
    }

    fn pipeline_with(
        mock_data: Option<PixelMatrix>,
        config: PipelineConfig,
    ) -> (FilterPipeline<MockReader, MockWriter>, Arc<Mutex<Vec<PixelMatrix>>>) {
        let written = Arc::new(Mutex::new(Vec::new()));
        let reader = MockReader {
            should_fail: false,
            mock_data,
        };
        let writer = MockWriter {
            should_fail: false,
            written_data: written.clone(),
        };
        (FilterPipeline::with_custom(reader, writer, config), written)
    }

    #[test]
    fn test_config_builder() {
        let config = PipelineConfig::builder()
            .output_format(OutputFormat::Tiff)
            .compression(TiffCompression::Deflate)
            .predictor(None)
            .validate_dimensions(false)
            .max_dimension(Some(10000))
            .execution(ExecutionStrategy::Serial)
            .write_mode(PixelWriteMode::Wrap)
            .build();

        assert_eq!(config.output_format, OutputFormat::Tiff);
        assert_eq!(config.compression, TiffCompression::Deflate);
        assert_eq!(config.predictor, None);
        assert!(!config.validate_dimensions);
        assert_eq!(config.max_dimension, Some(10000));
        assert_eq!(config.execution, ExecutionStrategy::Serial);
        assert_eq!(config.write_mode, PixelWriteMode::Wrap);
    }

    #[test]
    fn test_successful_filter() {
        let (pipeline, written) = pipeline_with(Some(sample()), PipelineConfig::default());
        let blur = ConvolutionKernel::blur(3).unwrap();

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.apply(b"fake image data", &blur, &mut output);

        assert!(result.is_ok());
        let written = written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].get(1, 1), 3);
        assert_eq!(written[0].shape(), (3, 3));
    }

    #[test]
    fn test_timings_cover_every_stage() {
        let (pipeline, _) = pipeline_with(Some(sample()), PipelineConfig::default());
        let mut output = Cursor::new(Vec::new());
        let timings = pipeline
            .apply_with_timings(b"fake image data", &EdgeDetector::new(8.0), &mut output)
            .unwrap();

        let names: Vec<&str> = timings.steps().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["decode_gray", "validate_dimensions", "convolve", "encode"]
        );
    }

    #[test]
    fn test_reader_failure() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let reader = MockReader {
            should_fail: true,
            mock_data: None,
        };
        let writer = MockWriter {
            should_fail: false,
            written_data: written.clone(),
        };

        let pipeline = FilterPipeline::with_custom(reader, writer, PipelineConfig::default());

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.apply(b"fake image data", &ConvolutionKernel::sharpen(), &mut output);

        assert!(matches!(result.unwrap_err(), PipelineError::DecodeError(_)));
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_writer_failure() {
        let reader = MockReader {
            should_fail: false,
            mock_data: Some(sample()),
        };
        let writer = MockWriter {
            should_fail: true,
            written_data: Arc::new(Mutex::new(Vec::new())),
        };

        let pipeline = FilterPipeline::with_custom(reader, writer, PipelineConfig::default());

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.apply(b"fake image data", &ConvolutionKernel::sharpen(), &mut output);

        assert!(matches!(result.unwrap_err(), PipelineError::EncodeError(_)));
    }

    #[test]
    fn test_filter_failure_names_the_filter() {
        let (pipeline, written) = pipeline_with(Some(sample()), PipelineConfig::default());
        let blur = ConvolutionKernel::blur(3).unwrap();
        let failing = |m: &PixelMatrix, r: usize, c: usize| -> crate::convolution::Result<i32> {
            if r == 1 {
                Err(FilterError::EmptyNeighborhood { row: r, col: c })
            } else {
                blur.apply(m, r, c)
            }
        };

        let mut output = Cursor::new(Vec::new());
        let err = pipeline
            .apply(b"fake image data", &failing, &mut output)
            .unwrap_err();

        match err {
            PipelineError::Filter { filter, source } => {
                assert_eq!(filter, "custom");
                assert!(matches!(source, FilterError::EmptyNeighborhood { row: 1, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_filter_matrix_reports_kernel_name() {
        let config = PipelineConfig::builder()
            .execution(ExecutionStrategy::Serial)
            .build();
        let (pipeline, _) = pipeline_with(None, config);
        let empty_window = |_: &PixelMatrix, r: usize, c: usize| -> crate::convolution::Result<i32> {
            Err(FilterError::EmptyNeighborhood { row: r, col: c })
        };
        let err = pipeline.filter_matrix(&sample(), &empty_window).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Filter 'custom' failed: Empty neighborhood at (0, 0): every neighbor is out of range"
        );
    }

    #[test]
    fn test_dimension_validation_success() {
        let config = PipelineConfig::builder()
            .validate_dimensions(true)
            .max_dimension(Some(200))
            .build();
        let (pipeline, written) = pipeline_with(Some(PixelMatrix::new(100, 150)), config);

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.apply(b"fake image data", &ConvolutionKernel::sharpen(), &mut output);

        assert!(result.is_ok());
        assert_eq!(written.lock().unwrap()[0].shape(), (100, 150));
    }

    #[test]
    fn test_dimension_validation_failure() {
        let config = PipelineConfig::builder()
            .validate_dimensions(true)
            .max_dimension(Some(50))
            .build();
        let (pipeline, written) = pipeline_with(Some(PixelMatrix::new(10, 60)), config);

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.apply(b"fake image data", &ConvolutionKernel::sharpen(), &mut output);

        assert!(matches!(
            result.unwrap_err(),
            PipelineError::InvalidDimensions(60, 10)
        ));
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let (pipeline, _) = pipeline_with(Some(PixelMatrix::new(0, 0)), PipelineConfig::default());

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.apply(b"fake image data", &ConvolutionKernel::sharpen(), &mut output);

        assert!(matches!(
            result.unwrap_err(),
            PipelineError::InvalidDimensions(0, 0)
        ));
    }

    #[test]
    fn test_dimension_validation_disabled() {
        let config = PipelineConfig::builder()
            .validate_dimensions(false)
            .max_dimension(Some(5))
            .build();
        let (pipeline, written) = pipeline_with(Some(PixelMatrix::new(10, 10)), config);

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.apply(b"fake image data", &ConvolutionKernel::sharpen(), &mut output);

        assert!(result.is_ok());
        assert_eq!(written.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_set_config() {
        let (mut pipeline, _) = pipeline_with(None, PipelineConfig::default());
        assert_eq!(pipeline.config().output_format, OutputFormat::Png);

        pipeline.set_config(
            PipelineConfig::builder()
                .output_format(OutputFormat::Tiff)
                .build(),
        );
        assert_eq!(pipeline.config().output_format, OutputFormat::Tiff);
    }

    mod files {
        use image::{ImageFormat, Luma, Rgba, RgbaImage};

        use super::*;

        fn write_input(dir: &std::path::Path) -> std::path::PathBuf {
            let mut img = RgbaImage::from_pixel(8, 6, Rgba([40, 40, 40, 255]));
            for x in 0..8 {
                img.put_pixel(x, 5, Rgba([220, 220, 220, 255]));
            }
            let path = dir.join("input.png");
            img.save_with_format(&path, ImageFormat::Png).unwrap();
            path
        }

        #[test]
        fn test_apply_file_png() {
            let dir = tempfile::tempdir().unwrap();
            let input = write_input(dir.path());
            let output = dir.path().join("edge.png");

            let pipeline = FilterPipeline::new(PipelineConfig::default());
            let timings = pipeline
                .apply_file(&input, &output, &EdgeDetector::new(8.0))
                .unwrap();
            assert!(timings.get_step("read_input_file").is_some());
            assert!(timings.get_step("write_output_file").is_some());

            let result = image::open(&output).unwrap().to_rgba8();
            assert_eq!(result.dimensions(), (8, 6));
            // Rows 4 and 5 straddle the brightness step.
            assert_eq!(result.get_pixel(3, 4).0, [255, 255, 255, 255]);
            assert_eq!(result.get_pixel(3, 1).0, [0, 0, 0, 255]);
        }

        #[test]
        fn test_apply_file_tiff() {
            let dir = tempfile::tempdir().unwrap();
            let input = write_input(dir.path());
            let output = dir.path().join("blur.tiff");

            let config = PipelineConfig::builder()
                .output_format(OutputFormat::Tiff)
                .compression(TiffCompression::Lzw)
                .build();
            let pipeline = FilterPipeline::new(config);
            pipeline
                .apply_file(&input, &output, &ConvolutionKernel::blur(3).unwrap())
                .unwrap();

            let result = image::open(&output).unwrap().to_luma8();
            assert_eq!(result.dimensions(), (8, 6));
            assert_eq!(*result.get_pixel(2, 1), Luma([40]));
        }

        #[test]
        fn test_missing_input_file() {
            let dir = tempfile::tempdir().unwrap();
            let pipeline = FilterPipeline::new(PipelineConfig::default());
            let result = pipeline.apply_file(
                dir.path().join("missing.jpg"),
                dir.path().join("out.png"),
                &ConvolutionKernel::sharpen(),
            );

            assert!(matches!(result.unwrap_err(), PipelineError::InputReadError(_)));
            assert!(!dir.path().join("out.png").exists());
        }

        #[test]
        fn test_failed_filter_leaves_no_output() {
            let dir = tempfile::tempdir().unwrap();
            let input = write_input(dir.path());
            let output = dir.path().join("never.png");
            let failing = |_: &PixelMatrix, r: usize, c: usize| -> crate::convolution::Result<i32> {
                Err(FilterError::EmptyNeighborhood { row: r, col: c })
            };

            let pipeline = FilterPipeline::new(PipelineConfig::default());
            let result = pipeline.apply_file(&input, &output, &failing);

            assert!(matches!(result.unwrap_err(), PipelineError::Filter { .. }));
            assert!(!output.exists());
        }
    }
}
