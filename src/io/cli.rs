//! Command-line interface for batch synthesizing textures from PNG samples

use crate::algorithm::executor::{SolverConfig, Synthesizer};
use crate::analysis::patterns::{SampleImage, extract_tiles};
use crate::analysis::weights::WeightMode;
use crate::io::configuration::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_SEED, DEFAULT_TILE_SIZE, OUTPUT_SUFFIX,
};
use crate::io::error::Result;
use crate::io::image::{export_png, render};
use crate::io::progress::ProgressManager;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Weight blend selectable from the command line
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum WeightModeArg {
    /// Sample frequency dominates, connectivity contributes mildly
    #[default]
    Blended,
    /// Sample frequency alone
    Frequency,
    /// Connectivity alone
    Connectivity,
}

impl From<WeightModeArg> for WeightMode {
    fn from(arg: WeightModeArg) -> Self {
        match arg {
            WeightModeArg::Blended => Self::Blended,
            WeightModeArg::Frequency => Self::FrequencyOnly,
            WeightModeArg::Connectivity => Self::ConnectivityOnly,
        }
    }
}

#[derive(Parser)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Synthesize textures from PNG samples with overlapping-model wave function collapse"
)]
/// Command-line arguments for the texture synthesizer
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Pattern window size in pixels
    #[arg(short = 'n', long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: usize,

    /// Output grid width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_GRID_WIDTH)]
    pub width: usize,

    /// Output grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_GRID_HEIGHT)]
    pub height: usize,

    /// Tile weight blend used during collapse
    #[arg(long, value_enum, default_value = "blended")]
    pub weights: WeightModeArg,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates batch processing of PNG samples with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.gather_inputs()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            self.process_file(file)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    // Resolve the target into the sorted list of samples to synthesize: a
    // directory contributes every PNG inside it, anything else must be a
    // PNG itself. Inputs whose output already exists are dropped here
    // unless --no-skip asked to redo them.
    fn gather_inputs(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;

        let mut inputs = Vec::new();
        if target.is_dir() {
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if is_png(&path) {
                    inputs.push(path);
                }
            }
            inputs.sort();
        } else if is_png(target) {
            inputs.push(target.clone());
        } else {
            return Err(crate::io::error::io_error(
                "expected a .png sample or a directory containing samples",
            ));
        }

        if self.cli.skip_existing() {
            inputs.retain(|input| self.needs_synthesis(input));
        }

        Ok(inputs)
    }

    // Work is needed only while the derived output is absent from disk
    fn needs_synthesis(&self, input: &Path) -> bool {
        let output = Self::output_path_for(input);
        if !output.exists() {
            return true;
        }
        if !self.cli.quiet {
            // Tell the user why a requested input produced no work
            #[allow(clippy::print_stderr)]
            eprintln!(
                "{} already has {}, skipping",
                input.display(),
                output.display()
            );
        }
        false
    }

    fn process_file(&mut self, input_path: &Path) -> Result<()> {
        let start_time = Instant::now();
        let output_path = Self::output_path_for(input_path);

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(input_path);
        }

        let sample = SampleImage::from_png_file(input_path)?;
        let tiles = extract_tiles(&sample, self.cli.tile_size)?;

        let config = SolverConfig {
            grid_width: self.cli.width,
            grid_height: self.cli.height,
            seed: self.cli.seed,
            weight_mode: self.cli.weights.into(),
        };

        let mut synthesizer = Synthesizer::new(&tiles, config)?;
        if let Some(pm) = &self.progress_manager {
            synthesizer.set_observer(Box::new(pm.observer()));
        }

        let solved = synthesizer.synthesize()?;
        let img = render(&solved, &tiles);
        export_png(&img, &output_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(start_time.elapsed());
        }

        Ok(())
    }

    // sample.png becomes sample_result.png next to the input; only PNG
    // inputs reach this point, so the extension is fixed
    fn output_path_for(input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.png"))
    }
}

fn is_png(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}
