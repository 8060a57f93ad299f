use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "coordinates-to-star")]
#[command(about = "Convert coordinates table to .star file format")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Path to input coordinates file")]
    pub file: PathBuf,

    #[arg(long, help = "Image file extension [default: .mrc]")]
    pub image_ext: Option<String>,

    #[arg(long, allow_hyphen_values = true, help = "Voltage setting")]
    pub voltage: Option<f64>,

    #[arg(long, allow_hyphen_values = true, help = "Defocus U setting")]
    pub defocus_u: Option<f64>,

    #[arg(long, allow_hyphen_values = true, help = "Defocus V setting")]
    pub defocus_v: Option<f64>,

    #[arg(long, allow_hyphen_values = true, help = "Defocus angle setting")]
    pub defocus_angle: Option<f64>,

    #[arg(long, allow_hyphen_values = true, help = "Spherical aberration setting")]
    pub spherical_aberation: Option<f64>,

    #[arg(long, allow_hyphen_values = true, help = "Amplitude contrast setting")]
    pub amplitude_contrast: Option<f64>,

    #[arg(long, allow_hyphen_values = true, help = "Detector pixel size setting")]
    pub detector_pixel_size: Option<f64>,

    #[arg(long, allow_hyphen_values = true, help = "Magnification setting")]
    pub magnification: Option<f64>,

    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Only take particles with scores >= this value [default: -inf]"
    )]
    pub threshold: Option<f64>,

    #[arg(
        long = "prefix_ignore",
        default_value = "0",
        help = "Number of characters to ignore at the beginning of the image name"
    )]
    pub prefix_ignore: usize,

    #[arg(
        long = "suffix_ignore",
        default_value = "0",
        help = "Number of characters to ignore at the end of the image name"
    )]
    pub suffix_ignore: usize,

    #[arg(
        long = "output_len",
        help = "Required length of the image name after trimming"
    )]
    pub output_len: usize,

    #[arg(long, help = "Settings file with default image extension and acquisition values")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["coordinates-to-star", "picks.txt", "--output_len", "7"])
            .unwrap();

        assert_eq!(cli.file, PathBuf::from("picks.txt"));
        assert_eq!(cli.output_len, 7);
        assert_eq!(cli.prefix_ignore, 0);
        assert_eq!(cli.suffix_ignore, 0);
        assert_eq!(cli.image_ext, None);
        assert_eq!(cli.voltage, None);
        assert_eq!(cli.threshold, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_negative_values() {
        let cli = Cli::try_parse_from([
            "coordinates-to-star",
            "picks.txt",
            "--output_len",
            "7",
            "--voltage",
            "-1",
            "--threshold",
            "-inf",
            "--prefix_ignore",
            "2",
            "--suffix_ignore",
            "4",
        ])
        .unwrap();

        assert_eq!(cli.voltage, Some(-1.0));
        assert_eq!(cli.threshold, Some(f64::NEG_INFINITY));
        assert_eq!(cli.prefix_ignore, 2);
        assert_eq!(cli.suffix_ignore, 4);
    }

    #[test]
    fn test_output_len_is_required() {
        assert!(Cli::try_parse_from(["coordinates-to-star", "picks.txt"]).is_err());
    }

    #[test]
    fn test_negative_trim_rejected() {
        assert!(Cli::try_parse_from([
            "coordinates-to-star",
            "picks.txt",
            "--output_len",
            "7",
            "--prefix_ignore",
            "-1",
        ])
        .is_err());
    }
}
