use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

/// Writes an R script running `mcmcsummary` over MCMC chain files and runs it.
#[derive(Parser, Debug)]
#[command(author, about, disable_version_flag = true, allow_negative_numbers = true)]
pub struct Cli {
    /// Display version information and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Comma-separated list of .txt chain files written by the MCMC code,
    /// one per chain run in parallel
    #[arg(short = 'f', long = "mcmc-file", value_name = "FILE")]
    pub mcmc_file: Option<String>,

    /// Path to the "mcmcsummary.R" script
    #[arg(short = 'r', long = "plot-routine", value_name = "FILE")]
    pub plot_routine: Option<String>,

    /// Path to the R executable
    #[arg(short = 'e', long = "executable", value_name = "FILE")]
    pub executable: Option<String>,

    /// Number of MCMC iterations to disregard
    #[arg(short = 'b', long = "burnin", value_name = "VALUE")]
    pub burnin: Option<String>,

    /// GPS time to be used as reference
    #[arg(short = 't', long = "reference-time", value_name = "GPS")]
    pub reference_time: Option<String>,

    /// Chirp mass to be used as reference
    #[arg(short = 'C', long = "reference-mchirp", value_name = "VALUE")]
    pub reference_mchirp: Option<String>,

    /// Eta to be used as reference
    #[arg(short = 'E', long = "reference-eta", value_name = "VALUE")]
    pub reference_eta: Option<String>,

    /// Distance to be used as reference
    #[arg(short = 'd', long = "reference-distance", value_name = "VALUE")]
    pub reference_distance: Option<String>,

    /// Phi to be used as reference
    #[arg(short = 'P', long = "reference-phi", value_name = "VALUE")]
    pub reference_phi: Option<String>,

    /// Use output path PATH
    #[arg(short = 'o', long = "output-path", value_name = "PATH")]
    pub output_path: Option<String>,

    /// Job identity STRING
    #[arg(short = 'i', long = "identity", value_name = "STRING")]
    pub identity: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("No {what} specified.\n{usage}")]
    Missing {
        what: &'static str,
        usage: &'static str,
    },
    #[error("Invalid value '{value}' for --{flag}: expected {expected}")]
    Invalid {
        flag: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Checked options. Numeric values keep the text as typed; that text is
/// what ends up in the generated script.
#[derive(Debug, Clone, PartialEq)]
pub struct McmcOptions {
    pub mcmc_files: Vec<String>,
    pub plot_routine: String,
    pub executable: String,
    pub burnin: String,
    pub reference_time: String,
    pub reference_mchirp: String,
    pub reference_eta: String,
    pub reference_distance: String,
    pub reference_phi: String,
    pub output_path: String,
    pub identity: String,
}

impl McmcOptions {
    /// Location of the generated script: `<output-path>/<identity>.R`.
    pub fn script_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.R", self.target_directory()))
    }

    /// Directory handed to `mcmcsummary` for its figures.
    pub fn target_directory(&self) -> String {
        format!("{}/{}", self.output_path, self.identity)
    }
}

fn required(
    value: Option<String>,
    what: &'static str,
    usage: &'static str,
) -> Result<String, OptionsError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(OptionsError::Missing { what, usage })
}

fn number(value: String, flag: &'static str) -> Result<String, OptionsError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(value),
        _ => Err(OptionsError::Invalid {
            flag,
            value,
            expected: "a number",
        }),
    }
}

impl TryFrom<Cli> for McmcOptions {
    type Error = OptionsError;

    /// Missing options are reported in the same order as the flags are listed.
    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let mcmc_file = required(
            cli.mcmc_file,
            "mcmc file",
            "Use --mcmc-file FILE to specify location.",
        )?;
        let plot_routine = required(
            cli.plot_routine,
            "R routine",
            "Use --plot-routine FILE to specify location.",
        )?;
        let executable = required(
            cli.executable,
            "R executable",
            "Use --executable FILE to specify location.",
        )?;
        let burnin = required(cli.burnin, "burnin", "Use --burnin VALUE to specify it.")?;
        let reference_time = required(
            cli.reference_time,
            "reference time",
            "Use --reference-time GPS to specify location.",
        )?;
        let reference_mchirp = required(
            cli.reference_mchirp,
            "reference mchirp",
            "Use --reference-mchirp VALUE to specify location.",
        )?;
        let reference_eta = required(
            cli.reference_eta,
            "reference eta",
            "Use --reference-eta VALUE to specify location.",
        )?;
        let reference_distance = required(
            cli.reference_distance,
            "reference distance",
            "Use --reference-distance VALUE to specify location.",
        )?;
        let reference_phi = required(
            cli.reference_phi,
            "reference phi",
            "Use --reference-phi VALUE to specify location.",
        )?;
        let output_path = required(
            cli.output_path,
            "output path",
            "Use --output-path PATH to specify location.",
        )?;
        let identity = required(cli.identity, "identity", "Use --identity STRING to specify it.")?;

        if burnin.trim().parse::<u64>().is_err() {
            return Err(OptionsError::Invalid {
                flag: "burnin",
                value: burnin,
                expected: "a non-negative integer",
            });
        }

        Ok(McmcOptions {
            mcmc_files: mcmc_file.split(',').map(str::to_string).collect(),
            plot_routine,
            executable,
            burnin,
            reference_time: number(reference_time, "reference-time")?,
            reference_mchirp: number(reference_mchirp, "reference-mchirp")?,
            reference_eta: number(reference_eta, "reference-eta")?,
            reference_distance: number(reference_distance, "reference-distance")?,
            reference_phi: number(reference_phi, "reference-phi")?,
            output_path,
            identity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: [&str; 22] = [
        "-f", "chain1.txt,chain2.txt",
        "-r", "/opt/mcmcsummary.R",
        "-e", "/usr/bin/R",
        "-b", "500",
        "-t", "871154847.5",
        "-C", "1.22",
        "-E", "0.25",
        "-d", "3.4",
        "-P", "1.5",
        "-o", "/tmp/out",
        "-i", "H1L1-871154847",
    ];

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("plotmcmc").chain(args.iter().copied())).unwrap()
    }

    fn without(flag: &str) -> Vec<&'static str> {
        FULL.chunks(2)
            .filter(|pair| pair[0] != flag)
            .flatten()
            .copied()
            .collect()
    }

    #[test]
    fn complete_command_line_is_accepted() {
        let opts = McmcOptions::try_from(parse(&FULL)).unwrap();
        assert_eq!(opts.mcmc_files, vec!["chain1.txt", "chain2.txt"]);
        assert_eq!(opts.burnin, "500");
        assert_eq!(opts.script_path(), PathBuf::from("/tmp/out/H1L1-871154847.R"));
        assert_eq!(opts.target_directory(), "/tmp/out/H1L1-871154847");
    }

    #[test]
    fn missing_mcmc_file_message() {
        let err = McmcOptions::try_from(parse(&without("-f"))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No mcmc file specified.\nUse --mcmc-file FILE to specify location."
        );
    }

    #[test]
    fn missing_options_use_their_own_hints() {
        let cases = [
            ("-r", "No R routine specified.\nUse --plot-routine FILE to specify location."),
            ("-e", "No R executable specified.\nUse --executable FILE to specify location."),
            ("-b", "No burnin specified.\nUse --burnin VALUE to specify it."),
            ("-t", "No reference time specified.\nUse --reference-time GPS to specify location."),
            ("-P", "No reference phi specified.\nUse --reference-phi VALUE to specify location."),
            ("-o", "No output path specified.\nUse --output-path PATH to specify location."),
            ("-i", "No identity specified.\nUse --identity STRING to specify it."),
        ];
        for (flag, message) in cases {
            let err = McmcOptions::try_from(parse(&without(flag))).unwrap_err();
            assert_eq!(err.to_string(), message, "dropping {flag}");
        }
    }

    #[test]
    fn first_missing_option_wins() {
        let err = McmcOptions::try_from(parse(&["-o", "/tmp"])).unwrap_err();
        assert!(err.to_string().starts_with("No mcmc file specified."));
    }

    #[test]
    fn non_numeric_reference_is_rejected() {
        let mut args = without("-E");
        args.extend(["-E", "quarter"]);
        let err = McmcOptions::try_from(parse(&args)).unwrap_err();
        assert_eq!(
            err,
            OptionsError::Invalid {
                flag: "reference-eta",
                value: "quarter".into(),
                expected: "a number",
            }
        );
    }

    #[test]
    fn fractional_burnin_is_rejected() {
        let mut args = without("-b");
        args.extend(["--burnin", "12.5"]);
        let err = McmcOptions::try_from(parse(&args)).unwrap_err();
        assert!(err.to_string().contains("non-negative integer"));
    }

    #[test]
    fn negative_reference_values_are_values() {
        let mut args: Vec<&str> = FULL
            .chunks(2)
            .filter(|pair| !matches!(pair[0], "-P" | "-t" | "-d"))
            .flatten()
            .copied()
            .collect();
        args.extend(["-P", "-1.5", "-t", "-3", "--reference-distance", "-0.25"]);
        let opts = McmcOptions::try_from(parse(&args)).unwrap();
        assert_eq!(opts.reference_phi, "-1.5");
        assert_eq!(opts.reference_time, "-3");
        assert_eq!(opts.reference_distance, "-0.25");
    }

    #[test]
    fn absolute_identity_stays_under_output_path() {
        let mut args = without("-i");
        args.extend(["-i", "/abs/job"]);
        let opts = McmcOptions::try_from(parse(&args)).unwrap();
        assert_eq!(opts.target_directory(), "/tmp/out//abs/job");
        assert_eq!(opts.script_path(), PathBuf::from("/tmp/out//abs/job.R"));
    }

    #[test]
    fn version_flag_is_short_v() {
        assert!(parse(&["-v"]).version);
        assert!(parse(&["--version"]).version);
    }
}
