use std::path::PathBuf;

use crate::processor::OutputTarget;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that ends an `rc` run with exit status 1
///
/// Display is the single line printed to stderr.
#[derive(Debug, thiserror::Error)]
pub enum RcError {
    #[error("Please specify raw file")]
    MissingInput,
    #[error("File {} not found", .0.display())]
    NotFound(PathBuf),
    #[error("Cannot initialize the raw processor: {0}")]
    Init(#[source] BoxError),
    #[error("Cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
    #[error("Cannot unpack {}: {source}", .path.display())]
    Unpack {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
    #[error("Cannot do postprocessing on {}: {source}", .path.display())]
    Process {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
    #[error("Cannot write data to {target} {}: {source}", .path.display())]
    Write {
        target: OutputTarget,
        path: PathBuf,
        #[source]
        source: BoxError,
    },
    #[error("{0}")]
    Usage(#[from] clap::Error),
    #[error("{0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cause() -> BoxError {
        "Unsupported file format or not RAW file".into()
    }

    #[test]
    fn messages() {
        assert_eq!(RcError::MissingInput.to_string(), "Please specify raw file");
        assert_eq!(
            RcError::NotFound("a.nef".into()).to_string(),
            "File a.nef not found"
        );
        assert_eq!(
            RcError::Open {
                path: "a.nef".into(),
                source: cause()
            }
            .to_string(),
            "Cannot open a.nef: Unsupported file format or not RAW file"
        );
        assert_eq!(
            RcError::Write {
                target: OutputTarget::Stdout,
                path: "a.nef".into(),
                source: cause()
            }
            .to_string(),
            "Cannot write data to stdout a.nef: Unsupported file format or not RAW file"
        );
    }

    #[test]
    fn stage_errors_keep_their_cause() {
        use std::error::Error;
        let e = RcError::Unpack {
            path: "a.nef".into(),
            source: cause(),
        };
        assert_eq!(
            e.source().map(ToString::to_string).as_deref(),
            Some("Unsupported file format or not RAW file")
        );
    }
}
