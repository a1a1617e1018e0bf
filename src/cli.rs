use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::scene::AxisScale;

/// Plots the cuts made on any two dimensions by SprBaggerDecisionTreeApp.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The filepath of the test results
    #[arg(short = 'f', long = "filepath")]
    pub filepath: Option<PathBuf>,

    /// The filepath of zero-lag test results (optional)
    #[arg(short = 'z', long = "zeropath")]
    pub zeropath: Option<PathBuf>,

    /// The filepath of the decision trees
    #[arg(short = 't', long = "treepath")]
    pub treepath: Option<PathBuf>,

    /// Name of the x dimension
    #[arg(short = 'x')]
    pub x: Option<String>,

    /// Name of the y dimension
    #[arg(short = 'y')]
    pub y: Option<String>,

    /// Print out the choices of dimensions and quit
    #[arg(short = 'p')]
    pub print_dimensions: bool,

    /// Make linear in x dimension (log by default)
    #[arg(long)]
    pub xlin: bool,

    /// Make linear in y dimension (log by default)
    #[arg(long)]
    pub ylin: bool,
}

/// A required option was not given.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MissingOption {
    #[error("Filepath option (-f) required")]
    Filepath,
    #[error("X dimension option (-x) required")]
    XDimension,
    #[error("Y dimension option (-y) required")]
    YDimension,
    /// Reported, but the viewer still opens without cuts.
    #[error("Treepath option (-t) required")]
    Treepath,
}

/// What the invocation asks for once the options are checked.
#[derive(Debug, PartialEq)]
pub enum Command {
    /// List the column names of the results file and quit.
    ListDimensions { filepath: PathBuf },
    /// Open the viewer.
    Plot(PlotCutsConfig),
}

/// Validated viewer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotCutsConfig {
    pub filepath: PathBuf,
    pub zeropath: Option<PathBuf>,
    pub treepath: Option<PathBuf>,
    pub x: String,
    pub y: String,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
}

impl PlotCutsConfig {
    /// Options that are reported as missing without stopping the run.
    pub fn notices(&self) -> Vec<MissingOption> {
        match self.treepath {
            Some(_) => Vec::new(),
            None => vec![MissingOption::Treepath],
        }
    }
}

impl Cli {
    /// Check required options in the order the tool reports them.
    pub fn into_command(self) -> Result<Command, MissingOption> {
        let filepath = self.filepath.ok_or(MissingOption::Filepath)?;
        if self.print_dimensions {
            return Ok(Command::ListDimensions { filepath });
        }
        let x = self.x.ok_or(MissingOption::XDimension)?;
        let y = self.y.ok_or(MissingOption::YDimension)?;

        Ok(Command::Plot(PlotCutsConfig {
            filepath,
            zeropath: self.zeropath,
            treepath: self.treepath,
            x,
            y,
            x_scale: AxisScale::from_log_flag(!self.xlin),
            y_scale: AxisScale::from_log_flag(!self.ylin),
        }))
    }
}
