use crate::cli::args::Cli;
use crate::error::Result;
use crate::models::AcquisitionMetadata;
use crate::processors::{CoordinateTransformer, TransformOptions};
use crate::readers::CoordinateReader;
use crate::settings::Settings;
use crate::utils::constants::DEFAULT_IMAGE_EXT;
use crate::writers::StarWriter;
use std::io::{self, BufWriter, Write};
use tracing::info;

pub fn run(cli: Cli) -> Result<()> {
    let document = render(&cli)?;

    // The whole document is built before anything reaches stdout.
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    out.write_all(document.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Read, transform and serialize the coordinate table named on the command line
pub fn render(cli: &Cli) -> Result<String> {
    let settings = Settings::load(cli.config.as_deref())?;
    let options = resolve_options(cli, &settings);

    let table = CoordinateReader::new().read_path(&cli.file)?;
    let transformer = CoordinateTransformer::new(options);
    let (star, report) = transformer.transform_with_report(&table)?;
    info!("{}: {}", cli.file.display(), report.summary());

    StarWriter::new().write_to_string(&star)
}

/// Merge command-line values over settings. A negative command-line value
/// omits the column even when settings provide one.
pub fn resolve_options(cli: &Cli, settings: &Settings) -> TransformOptions {
    let pick = |flag: Option<f64>, fallback: Option<f64>| match flag {
        Some(v) if v >= 0.0 => Some(v),
        Some(_) => None,
        None => fallback,
    };
    let defaults = &settings.acquisition;

    let acquisition = AcquisitionMetadata {
        voltage: pick(cli.voltage, defaults.voltage),
        defocus_u: pick(cli.defocus_u, defaults.defocus_u),
        defocus_v: pick(cli.defocus_v, defaults.defocus_v),
        defocus_angle: pick(cli.defocus_angle, defaults.defocus_angle),
        spherical_aberration: pick(cli.spherical_aberation, defaults.spherical_aberration),
        amplitude_contrast: pick(cli.amplitude_contrast, defaults.amplitude_contrast),
        detector_pixel_size: pick(cli.detector_pixel_size, defaults.detector_pixel_size),
        magnification: pick(cli.magnification, defaults.magnification),
    };

    let image_ext = cli
        .image_ext
        .clone()
        .or_else(|| settings.image_ext.clone())
        .unwrap_or_else(|| DEFAULT_IMAGE_EXT.to_string());

    TransformOptions::new(cli.output_len)
        .with_image_ext(image_ext)
        .with_trim(cli.prefix_ignore, cli.suffix_ignore)
        .with_threshold(cli.threshold)
        .with_acquisition(acquisition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["coordinates-to-star", "picks.txt", "--output_len", "7"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_resolve_defaults() {
        let options = resolve_options(&parse(&[]), &Settings::default());

        assert_eq!(options, TransformOptions::new(7));
        assert_eq!(options.image_ext, ".mrc");
    }

    #[test]
    fn test_cli_overrides_settings() {
        let settings = Settings {
            image_ext: Some(".tiff".to_string()),
            acquisition: AcquisitionMetadata {
                voltage: Some(200.0),
                defocus_u: Some(15000.0),
                magnification: Some(50000.0),
                ..Default::default()
            },
        };
        let cli = parse(&[
            "--voltage",
            "300",
            "--defocus-u",
            "-1",
            "--image-ext",
            ".mrcs",
            "--spherical-aberation",
            "2.7",
        ]);

        let options = resolve_options(&cli, &settings);

        assert_eq!(options.image_ext, ".mrcs");
        assert_eq!(options.acquisition.voltage, Some(300.0));
        assert_eq!(options.acquisition.defocus_u, None);
        assert_eq!(options.acquisition.spherical_aberration, Some(2.7));
        assert_eq!(options.acquisition.magnification, Some(50000.0));
    }

    #[test]
    fn test_resolve_trim_and_threshold() {
        let cli = parse(&["--prefix_ignore", "2", "--suffix_ignore", "4", "--threshold", "0.5"]);
        let options = resolve_options(&cli, &Settings::default());

        assert_eq!(options.prefix_ignore, 2);
        assert_eq!(options.suffix_ignore, 4);
        assert_eq!(options.threshold, Some(0.5));
    }
}
