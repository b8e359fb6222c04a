use std::path::PathBuf;

use anyhow::Context;
use grayconv_rs::convolution::{
    DEFAULT_BLUR_SIZE, DEFAULT_EDGE_THRESHOLD, EdgeDetector, FilterConfig, KernelFn,
};
use grayconv_rs::image_pipeline::{FilterPipeline, PipelineConfig};
use grayconv_rs::logger;

use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    logger::init();

    let mut args = std::env::args().skip(1);
    let input = PathBuf::from(args.next().unwrap_or_else(|| "input.jpg".to_string()));
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| "output".to_string()));

    info!("Starting grayconv...");

    let config = PipelineConfig::builder().build();
    let anchor = config.anchor;

    let preset = |base: FilterConfig| FilterConfig { anchor, ..base }.build();
    let filters: Vec<Box<dyn KernelFn>> = vec![
        Box::new(
            preset(FilterConfig::blur(DEFAULT_BLUR_SIZE))
                .with_context(|| format!("invalid blur of size {DEFAULT_BLUR_SIZE}"))?,
        ),
        Box::new(preset(FilterConfig::sharpen())?),
        Box::new(EdgeDetector::new(DEFAULT_EDGE_THRESHOLD).with_anchor(anchor)),
        Box::new(preset(FilterConfig::horizontal_edge(DEFAULT_EDGE_THRESHOLD))?),
        Box::new(preset(FilterConfig::vertical_edge(DEFAULT_EDGE_THRESHOLD))?),
    ];

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    let pipeline = FilterPipeline::new(config);
    info!("Filter pipeline initialized");
    info!("Output format: {:?}", pipeline.config().output_format);
    info!("Execution: {:?}", pipeline.config().execution);

    let mut failures = 0;
    for filter in &filters {
        let output = output_dir.join(format!(
            "{}.{}",
            filter.name(),
            pipeline.config().output_format.extension()
        ));

        match pipeline.apply_file(&input, &output, filter.as_ref()) {
            Ok(timings) => {
                info!(filter = filter.name(), output = %output.display(), "Filter successful!");
                timings.log_summary(filter.name());
            }
            Err(e) => {
                failures += 1;
                error!(filter = filter.name(), "Filter failed: {}", e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} filters failed", filters.len());
    }

    Ok(())
}
