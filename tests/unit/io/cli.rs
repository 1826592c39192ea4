//! Tests for CLI argument parsing and processing defaults

#[cfg(test)]
mod tests {
    use clap::Parser;
    use std::path::PathBuf;
    use wavetile::analysis::weights::WeightMode;
    use wavetile::io::cli::{Cli, WeightModeArg};

    // Defaults match the documented configuration constants
    #[test]
    fn test_default_arguments() {
        let cli = Cli::parse_from(["wavetile", "sample.png"]);
        assert_eq!(cli.target, PathBuf::from("sample.png"));
        assert_eq!(cli.seed, 42);
        assert_eq!(cli.tile_size, 3);
        assert_eq!(cli.width, 24);
        assert_eq!(cli.height, 24);
        assert!(!cli.quiet);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
    }

    // Every knob is reachable from the command line
    #[test]
    fn test_full_argument_set() {
        let cli = Cli::parse_from([
            "wavetile",
            "samples/",
            "--seed",
            "7",
            "--tile-size",
            "2",
            "-w",
            "16",
            "-H",
            "12",
            "--weights",
            "frequency",
            "--quiet",
            "--no-skip",
        ]);
        assert_eq!(cli.seed, 7);
        assert_eq!(cli.tile_size, 2);
        assert_eq!(cli.width, 16);
        assert_eq!(cli.height, 12);
        assert!(cli.quiet);
        assert!(!cli.skip_existing());
        assert!(!cli.should_show_progress());
    }

    // The CLI weight argument maps onto the analysis weight modes
    #[test]
    fn test_weight_mode_mapping() {
        assert_eq!(WeightMode::from(WeightModeArg::Blended), WeightMode::Blended);
        assert_eq!(
            WeightMode::from(WeightModeArg::Frequency),
            WeightMode::FrequencyOnly
        );
        assert_eq!(
            WeightMode::from(WeightModeArg::Connectivity),
            WeightMode::ConnectivityOnly
        );
    }
}
