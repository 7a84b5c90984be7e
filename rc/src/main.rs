use std::process::ExitCode;

use rc::cli::{self, Invocation};
use rc::{pipeline, RawProcessor};
use rc_libraw::{LibrawConstructorFlags, Processor};

fn main() -> ExitCode {
    let options = match cli::parse(std::env::args_os(), &Processor::library_version()) {
        Ok(Invocation::Run(options)) => options,
        Ok(Invocation::Exit(text)) => {
            print!("{text}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(1);
        }
    };
    cli::init_logging(options.verbose);

    let result = pipeline::run(&options, &mut std::io::stdout().lock(), || {
        Processor::try_new(LibrawConstructorFlags::None)
    });
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{e:?}");
            eprintln!("{e}");
            ExitCode::from(1)
        }
    }
}
