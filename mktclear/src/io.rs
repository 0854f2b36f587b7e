use anyhow::{Context as _, bail};
use serde::{Serialize, de::DeserializeOwned};
use std::{
    convert::Infallible,
    fmt,
    fs::File,
    io::{BufReader, BufWriter, Write, stdin, stdout},
    path::{Path, PathBuf},
    str::FromStr,
};

/// A JSON document named on the command line: a file, or the standard
/// stream when given as "-"
#[derive(Clone, Debug, PartialEq)]
pub enum Document {
    Stdio,
    File(PathBuf),
}

impl Document {
    /// Reads and parses the document
    pub fn load<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
        match self {
            Self::Stdio => serde_json::from_reader(stdin().lock()).context("malformed JSON on stdin"),
            Self::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("unable to open {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("malformed JSON in {}", path.display()))
            }
        }
    }

    /// Writes `value` as pretty-printed JSON with a trailing newline
    pub fn store<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        match self {
            Self::Stdio => emit(stdout().lock(), value),
            Self::File(path) => {
                let file = File::create(path)
                    .with_context(|| format!("unable to create {}", path.display()))?;
                emit(BufWriter::new(file), value)
            }
        }
    }

    /// Checks, before any work is done, that this document can receive the
    /// output of a command reading `input`
    pub fn check_output(&self, input: &Document) -> anyhow::Result<()> {
        let Self::File(output) = self else {
            return Ok(());
        };

        if let Self::File(input) = input {
            if same_file(input, output) {
                bail!("refusing to overwrite the input {}", output.display());
            }
        }

        let dir = output
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        if !dir.is_dir() {
            bail!("cannot write {}: {} is not a directory", output.display(), dir.display());
        }

        Ok(())
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn emit(mut writer: impl Write, value: &impl Serialize) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

impl FromStr for Document {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "-" {
            Self::Stdio
        } else {
            Self::File(PathBuf::from(s))
        })
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => f.write_str("-"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_is_stdio() {
        assert_eq!("-".parse::<Document>().unwrap(), Document::Stdio);
        assert_eq!(
            "round.json".parse::<Document>().unwrap(),
            Document::File(PathBuf::from("round.json"))
        );
        assert_eq!(Document::Stdio.to_string(), "-");
    }

    #[test]
    fn test_store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let doc = Document::File(dir.path().join("curve.json"));

        doc.store(&vec![(0.0, 1.0), (2.0, 3.0)]).unwrap();
        let back: Vec<(f64, f64)> = doc.load().unwrap();
        assert_eq!(back, vec![(0.0, 1.0), (2.0, 3.0)]);
    }

    #[test]
    fn test_load_reports_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = Document::File(path.clone()).load::<Vec<f64>>().unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_output_may_not_clobber_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("round.json");
        std::fs::write(&path, "{}").unwrap();

        let input = Document::File(path.clone());
        let same = Document::File(dir.path().join(".").join("round.json"));
        assert!(same.check_output(&input).is_err());

        let other = Document::File(dir.path().join("report.json"));
        assert!(other.check_output(&input).is_ok());
        assert!(Document::Stdio.check_output(&input).is_ok());
    }

    #[test]
    fn test_output_needs_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = Document::File(dir.path().join("nowhere").join("report.json"));
        assert!(output.check_output(&Document::Stdio).is_err());
    }
}
