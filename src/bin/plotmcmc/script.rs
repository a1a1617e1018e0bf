use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::options::McmcOptions;

/// Columns handed to `mcmcsummary`, in order.
const POSTERIOR_COLUMNS: [&str; 7] = [
    "chirpmass",
    "massratio",
    "time",
    "phase",
    "distance",
    "logposterior",
    "loglikelihood",
];

/// Render the R driver script for the given chains and reference values.
pub fn render(opts: &McmcOptions) -> String {
    let mut out = String::new();
    render_into(&mut out, opts).expect("formatting into a String cannot fail");
    out
}

fn render_into(out: &mut String, opts: &McmcOptions) -> std::fmt::Result {
    let n_chains = opts.mcmc_files.len();
    let chains = || 1..=n_chains;

    writeln!(out, "# load the \"mcmcsummary\" code:")?;
    writeln!(out, "source(\"{}\")\n", opts.plot_routine)?;

    writeln!(out, "# load the data written in the MCMC txt file")?;
    for (k, file) in chains().zip(&opts.mcmc_files) {
        writeln!(out, "input{k} <- read.table(\"{file}\",header=TRUE)")?;
    }

    writeln!(
        out,
        "\n# keep only the tens of seconds for the GPS time. This will allow to display the \
         decimal part of the gps time with a precision of 1.e-5 seconds."
    )?;
    for k in chains() {
        writeln!(out, "input{k}[,\"time\"] <- input{k}[,\"time\"] %% 100")?;
    }

    writeln!(out, "\n# convert the logdistance into distance")?;
    for k in chains() {
        writeln!(out, "input{k}[,\"distance\"] <- exp(input{k}[,\"logdistance\"])")?;
    }

    writeln!(
        out,
        "\n# Reorganize the input matrix with columns in the following order: {}",
        POSTERIOR_COLUMNS.join(",")
    )?;
    for k in chains() {
        let columns: Vec<String> = POSTERIOR_COLUMNS
            .iter()
            .map(|c| format!("input{k}[,\"{c}\"]"))
            .collect();
        writeln!(out, "newinput{k} <- cbind({})", columns.join(","))?;
    }

    writeln!(out, "\n# prepare the input data for the plotting routine")?;
    let data: Vec<String> = chains()
        .map(|k| format!("as.vector(as.matrix(newinput{k}))"))
        .collect();
    writeln!(
        out,
        "post <- array(c({}), dim=c(nrow(newinput1),{},{n_chains}))",
        data.join(","),
        POSTERIOR_COLUMNS.len()
    )?;
    let names: Vec<String> = POSTERIOR_COLUMNS.iter().map(|c| format!("\"{c}\"")).collect();
    writeln!(out, "colnames(post) <- c({})", names.join(","))?;

    writeln!(out, "\n# enter injected or inspiral parameters")?;
    writeln!(
        out,
        "injpar <- c(\"chirpmass\"={},\"massratio\"={},\"tc\"={},\"phi\"={},\"dl\"={},\
         \"logpost\"= NA, \"loglikeli\"= NA)",
        opts.reference_mchirp,
        opts.reference_eta,
        opts.reference_time,
        opts.reference_phi,
        opts.reference_distance
    )?;
    writeln!(out, "injpar[\"tc\"] <- injpar[\"tc\"] %% 100\n")?;

    writeln!(out, "# execute the \"mcmcsummary\" code:")?;
    let burnin = vec![opts.burnin.as_str(); n_chains].join(",");
    writeln!(
        out,
        "mcmcsummary(data=post,targetdirectory=\"{}\",iteration=input1[,1],burnin=c({burnin}),\
         varnames=colnames(post),truevalue=injpar,graphicsformats = c(\"png\"), overwrite = T)",
        opts.target_directory()
    )
}

/// Render the script and write it to `<output-path>/<identity>.R`.
pub fn write_script(opts: &McmcOptions) -> Result<PathBuf> {
    let path = opts.script_path();
    std::fs::write(&path, render(opts))
        .with_context(|| format!("writing R script {}", path.display()))?;
    log::info!(
        "Wrote {} for {} chain(s)",
        path.display(),
        opts.mcmc_files.len()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(files: &[&str], output_path: &str) -> McmcOptions {
        McmcOptions {
            mcmc_files: files.iter().map(|s| s.to_string()).collect(),
            plot_routine: "/opt/R/mcmcsummary.R".into(),
            executable: "R".into(),
            burnin: "500".into(),
            reference_time: "871154847.5".into(),
            reference_mchirp: "1.22".into(),
            reference_eta: "0.25".into(),
            reference_distance: "3.4".into(),
            reference_phi: "1.5".into(),
            output_path: output_path.into(),
            identity: "job7".into(),
        }
    }

    #[test]
    fn script_loads_every_chain() {
        let script = render(&options(&["a.txt", "dir/b.txt"], "/out"));
        assert!(script.starts_with("# load the \"mcmcsummary\" code:\nsource(\"/opt/R/mcmcsummary.R\")\n\n"));
        assert!(script.contains("input1 <- read.table(\"a.txt\",header=TRUE)\n"));
        assert!(script.contains("input2 <- read.table(\"dir/b.txt\",header=TRUE)\n"));
        assert!(script.contains("input2[,\"time\"] <- input2[,\"time\"] %% 100\n"));
        assert!(script.contains("input1[,\"distance\"] <- exp(input1[,\"logdistance\"])\n"));
        assert!(!script.contains("input3"));
    }

    #[test]
    fn posterior_array_spans_all_chains() {
        let script = render(&options(&["a.txt", "b.txt", "c.txt"], "/out"));
        assert!(script.contains(
            "newinput3 <- cbind(input3[,\"chirpmass\"],input3[,\"massratio\"],input3[,\"time\"],\
             input3[,\"phase\"],input3[,\"distance\"],input3[,\"logposterior\"],\
             input3[,\"loglikelihood\"])\n"
        ));
        assert!(script.contains(
            "post <- array(c(as.vector(as.matrix(newinput1)),as.vector(as.matrix(newinput2)),\
             as.vector(as.matrix(newinput3))), dim=c(nrow(newinput1),7,3))\n"
        ));
        assert!(script.contains("burnin=c(500,500,500)"));
    }

    #[test]
    fn reference_values_are_substituted() {
        let script = render(&options(&["a.txt"], "/out"));
        assert!(script.contains(
            "injpar <- c(\"chirpmass\"=1.22,\"massratio\"=0.25,\"tc\"=871154847.5,\"phi\"=1.5,\
             \"dl\"=3.4,\"logpost\"= NA, \"loglikeli\"= NA)\n"
        ));
        assert!(script.contains("injpar[\"tc\"] <- injpar[\"tc\"] %% 100\n"));
        assert!(script.contains("targetdirectory=\"/out/job7\""));
        assert!(script.trim_end().ends_with("graphicsformats = c(\"png\"), overwrite = T)"));
    }

    #[test]
    fn script_is_written_under_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(&["a.txt"], dir.path().to_str().unwrap());
        let path = write_script(&opts).unwrap();
        assert_eq!(path, dir.path().join("job7.R"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), render(&opts));
    }

    #[test]
    fn missing_output_directory_is_an_error() {
        let opts = options(&["a.txt"], "/nonexistent/output");
        let err = write_script(&opts).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/output/job7.R"));
    }
}
