use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// Decision-tree description files
// ---------------------------------------------------------------------------
//
// A forest dump is a list of cut records followed by a dimension table:
//
//   Id: 0 Score: 0.512 Dim: 3 Cut: 7.25
//   Id: 1 Score: 0.497 Dim: 1 Cut: 0.031
//   ...
//   Dimensions:
//        0            snr
//        1          chisq
//
// Lines that are neither records nor the `Dimensions:` marker are skipped.

#[derive(Debug, Error)]
pub enum CutFileError {
    #[error("***Error!*** Trouble opening file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error reading {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("***Error!*** Unexpected format in {}", path.display())]
    UnexpectedFormat { path: PathBuf },
    #[error("line {line}: malformed cut record '{text}'")]
    InvalidRecord { line: usize, text: String },
}

/// A single split: `dim` is the ordinal from the dimension table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cut {
    pub dim: usize,
    pub value: f64,
}

/// All cuts of a forest plus its dimension-name → ordinal table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CutSet {
    pub cuts: Vec<Cut>,
    pub dimensions: BTreeMap<String, usize>,
}

impl CutSet {
    /// Every cut value placed on the named dimension, in file order.
    pub fn cuts_on(&self, name: &str) -> Vec<f64> {
        let Some(&dim) = self.dimensions.get(name) else {
            return Vec::new();
        };
        self.cuts
            .iter()
            .filter(|c| c.dim == dim)
            .map(|c| c.value)
            .collect()
    }
}

/// Open and scan a tree description file.
pub fn load_tree_file(path: &Path) -> Result<CutSet, CutFileError> {
    let file = File::open(path).map_err(|source| CutFileError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let cuts = scan(BufReader::new(file), path)?;
    log::info!(
        "Read {} cuts over {} dimensions from {}",
        cuts.cuts.len(),
        cuts.dimensions.len(),
        path.display()
    );
    Ok(cuts)
}

/// Scan tree description text. `path` is only used in error messages.
pub fn scan<R: BufRead>(reader: R, path: &Path) -> Result<CutSet, CutFileError> {
    let mut lines = reader.lines().enumerate();
    let mut set = CutSet::default();

    loop {
        let Some((line_no, line)) = lines.next() else {
            return Err(CutFileError::UnexpectedFormat {
                path: path.to_path_buf(),
            });
        };
        let line = line.map_err(|source| CutFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some((dim, value)) = match_record(&line) {
            let invalid = || CutFileError::InvalidRecord {
                line: line_no + 1,
                text: line.clone(),
            };
            set.cuts.push(Cut {
                dim: dim.parse().map_err(|_| invalid())?,
                value: value.parse().map_err(|_| invalid())?,
            });
        } else if line.starts_with("Dimensions:") {
            break;
        }
    }

    for (_, line) in lines {
        let line = line.map_err(|source| CutFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let Some((ordinal, name)) = match_dimension(&line) else {
            break;
        };
        let Ok(ordinal) = ordinal.parse::<usize>() else {
            break;
        };
        set.dimensions.insert(name.to_string(), ordinal);
    }

    Ok(set)
}

/// `Id: <s> Score: <s> Dim: <dim> Cut: <value>` at the start of the line.
fn match_record(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix("Id: ")?;
    let mut tokens = rest.split_whitespace();
    let _id = tokens.next()?;
    if tokens.next()? != "Score:" {
        return None;
    }
    let _score = tokens.next()?;
    if tokens.next()? != "Dim:" {
        return None;
    }
    let dim = tokens.next()?;
    if tokens.next()? != "Cut:" {
        return None;
    }
    Some((dim, tokens.next()?))
}

/// `<ws><ordinal><ws><name>`; leading whitespace is required.
fn match_dimension(line: &str) -> Option<(&str, &str)> {
    if !line.starts_with(char::is_whitespace) {
        return None;
    }
    let mut tokens = line.split_whitespace();
    Some((tokens.next()?, tokens.next()?))
}
