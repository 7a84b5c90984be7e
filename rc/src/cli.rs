use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{error::ErrorKind, ArgAction, CommandFactory, FromArgMatches, Parser};
use log::LevelFilter;

use crate::error::RcError;
use crate::processor::OutputTarget;

const USAGE: &str = "rc [OPTIONS] raw-file > target.ppm
       rc [OPTIONS] raw-file | cjpeg -quality 80 > target.jpg";

/// Options for one invocation, immutable once parsed
#[derive(Debug, Clone, Parser)]
#[command(
    name = "rc",
    version,
    about = "Raw Photo Converter",
    override_usage = USAGE,
    disable_help_flag = true
)]
pub struct Options {
    /// list supported cameras and exit
    #[arg(short = 'L')]
    pub list_cameras: bool,

    /// Print verbose messages
    #[arg(short = 'v')]
    pub verbose: bool,

    /// output TIFF files instead of .pgm/ppm
    #[arg(short = 'T')]
    pub tiff: bool,

    /// Specify output file, standard output when absent
    #[arg(short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Specify output width
    #[arg(
        short = 'w',
        value_name = "WIDTH",
        default_value_t = 0,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(..=i64::from(u16::MAX))
    )]
    pub width: i32,

    /// Specify output height
    #[arg(
        short = 'h',
        value_name = "HEIGHT",
        default_value_t = 0,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(..=i64::from(u16::MAX))
    )]
    pub height: i32,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    /// The raw file to convert
    #[arg(value_name = "RAW_FILE")]
    pub file: Option<OsString>,
}

impl Options {
    /// The input path, `None` when missing or empty
    pub fn input(&self) -> Option<&Path> {
        self.file
            .as_deref()
            .filter(|file| !file.is_empty())
            .map(Path::new)
    }

    pub fn output_target(&self) -> OutputTarget {
        match &self.output {
            Some(path) => OutputTarget::File(path.clone()),
            None => OutputTarget::Stdout,
        }
    }

    /// Width override, only when positive
    pub fn target_width(&self) -> Option<u16> {
        positive(self.width)
    }

    /// Height override, only when positive
    pub fn target_height(&self) -> Option<u16> {
        positive(self.height)
    }
}

fn positive(value: i32) -> Option<u16> {
    u16::try_from(value).ok().filter(|v| *v > 0)
}

/// What the arguments asked for
#[derive(Debug)]
pub enum Invocation {
    Run(Options),
    /// Usage or version text to print before exiting successfully
    Exit(String),
}

fn command(library_version: &str) -> clap::Command {
    Options::command().before_help(format!(
        "Raw Photo Converter v{}\nBased on LibRaw, version: {library_version}",
        env!("CARGO_PKG_VERSION")
    ))
}

/// Parse the process arguments, program name included
///
/// A bare `rc` prints the usage rather than failing.
pub fn parse<I, T>(args: I, library_version: &str) -> Result<Invocation, RcError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let mut command = command(library_version);
    if args.len() < 2 {
        return Ok(Invocation::Exit(command.render_help().to_string()));
    }

    let matches = match command.try_get_matches_from_mut(args) {
        Ok(matches) => matches,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return Ok(Invocation::Exit(e.to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    Ok(Invocation::Run(Options::from_arg_matches(&matches)?))
}

/// Route `log` to stderr, `-v` turns on debug output and RUST_LOG wins over both
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .try_init();
}
