//! The two things `rc` can do: list cameras, or push one file through
//! open → unpack → configure → process → write → release.

use std::io::Write;
use std::path::Path;

use log::{debug, info};

use crate::cli::Options;
use crate::error::RcError;
use crate::processor::RawProcessor;

/// Dispatch on the parsed options
///
/// The processor is only created once the input has been validated, list mode never
/// creates one.
pub fn run<P, F>(options: &Options, out: &mut impl Write, new_processor: F) -> Result<(), RcError>
where
    P: RawProcessor,
    F: FnOnce() -> Result<P, P::Error>,
{
    if options.list_cameras {
        return list_cameras::<P>(out);
    }

    let path = validate_input(options)?;
    let mut processor = new_processor().map_err(|e| RcError::Init(e.into()))?;
    convert(&mut processor, path, options)
}

/// Print every supported camera on its own line
pub fn list_cameras<P: RawProcessor>(out: &mut impl Write) -> Result<(), RcError> {
    for camera in P::camera_list() {
        writeln!(out, "{camera}")?;
    }
    out.flush()?;
    Ok(())
}

/// The input path, once it is known to exist
pub fn validate_input(options: &Options) -> Result<&Path, RcError> {
    let path = options.input().ok_or(RcError::MissingInput)?;
    if !path.exists() {
        return Err(RcError::NotFound(path.to_path_buf()));
    }
    Ok(path)
}

/// Apply the size and format overrides, in that order
pub fn configure<P: RawProcessor>(processor: &mut P, options: &Options) {
    if let Some(width) = options.target_width() {
        debug!("output width {width}");
        processor.set_output_width(width);
    }
    if let Some(height) = options.target_height() {
        debug!("output height {height}");
        processor.set_output_height(height);
    }
    if options.tiff {
        debug!("output format tiff");
        processor.set_output_tiff(true);
    }
}

/// Run the whole conversion of `path`, stopping at the first failing stage
///
/// Buffers are released explicitly only when every stage succeeded.
pub fn convert<P: RawProcessor>(
    processor: &mut P,
    path: &Path,
    options: &Options,
) -> Result<(), RcError> {
    debug!("open {}", path.display());
    processor.open(path).map_err(|e| RcError::Open {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    let image = processor.image_info();
    info!(
        "{} {} {}x{}",
        image.make, image.model, image.width, image.height
    );

    debug!("unpack {}", path.display());
    processor.unpack().map_err(|e| RcError::Unpack {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    configure(processor, options);

    debug!("process {}", path.display());
    processor.process().map_err(|e| RcError::Process {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    let target = options.output_target();
    info!("writing {} to {target}", path.display());
    processor.write(&target).map_err(|e| RcError::Write {
        target,
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    processor.release();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{parse, Invocation};
    use crate::processor::fake::{Call, FakeProcessor};
    use crate::processor::OutputTarget;
    use std::path::PathBuf;

    /// A file that is always there
    const EXISTING: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");

    fn options(args: &[&str]) -> Options {
        match parse(std::iter::once("rc").chain(args.iter().copied()), "0.0.0") {
            Ok(Invocation::Run(options)) => options,
            other => panic!("expected options, got {other:?}"),
        }
    }

    /// Runs with a fake and reports whether a processor was ever created
    fn run_fake(args: &[&str]) -> (Result<(), RcError>, bool, String) {
        let mut created = false;
        let mut out = Vec::new();
        let result = run(&options(args), &mut out, || {
            created = true;
            Ok(FakeProcessor::default())
        });
        (result, created, String::from_utf8(out).unwrap())
    }

    fn converted(args: &[&str]) -> FakeProcessor {
        let options = options(args);
        let path = validate_input(&options).unwrap();
        let mut fake = FakeProcessor::default();
        convert(&mut fake, path, &options).unwrap();
        fake
    }

    #[test]
    fn list_mode_prints_every_camera() {
        let (result, created, out) = run_fake(&["-L"]);
        assert!(result.is_ok());
        assert!(!created);
        assert_eq!(out, "Fake Camera One\nFake Camera Two\n");
    }

    #[test]
    fn list_mode_ignores_the_file() {
        let (result, created, out) = run_fake(&["-L", "-T", "/no/such/file.nef"]);
        assert!(result.is_ok());
        assert!(!created);
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn missing_input() {
        let (result, created, out) = run_fake(&["-T"]);
        assert!(matches!(result, Err(RcError::MissingInput)));
        assert!(!created);
        assert!(out.is_empty());
    }

    #[test]
    fn converting_an_existing_file_creates_a_processor() {
        let (result, created, out) = run_fake(&[EXISTING]);
        assert!(result.is_ok());
        assert!(created);
        assert!(out.is_empty());
    }

    #[test]
    fn input_not_found() {
        let (result, created, _) = run_fake(&["/no/such/file.nef"]);
        match result {
            Err(e @ RcError::NotFound(_)) => {
                assert_eq!(e.to_string(), "File /no/such/file.nef not found")
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(!created);
    }

    #[test]
    fn stages_run_in_order_and_release() {
        let fake = converted(&[EXISTING]);
        assert_eq!(
            fake.calls,
            vec![
                Call::Open(PathBuf::from(EXISTING)),
                Call::Unpack,
                Call::Process {
                    width: 6048,
                    height: 4024,
                    tiff: false
                },
                Call::Write(OutputTarget::Stdout),
                Call::Release,
            ]
        );
    }

    #[test]
    fn width_override_is_set_before_processing() {
        let fake = converted(&["-w", "800", EXISTING]);
        assert!(fake.calls.contains(&Call::Process {
            width: 800,
            height: 4024,
            tiff: false
        }));
    }

    #[test]
    fn height_and_tiff_overrides() {
        let fake = converted(&["-h", "600", "-T", EXISTING]);
        assert!(fake.calls.contains(&Call::Process {
            width: 6048,
            height: 600,
            tiff: true
        }));
    }

    #[test]
    fn zero_sizes_leave_defaults() {
        let fake = converted(&["-w", "0", "-h", "-1", EXISTING]);
        assert!(fake.calls.contains(&Call::Process {
            width: 6048,
            height: 4024,
            tiff: false
        }));
    }

    #[test]
    fn output_file_target() {
        let fake = converted(&["-o", "/tmp/out.ppm", EXISTING]);
        assert!(fake
            .calls
            .contains(&Call::Write(OutputTarget::File("/tmp/out.ppm".into()))));
    }

    #[test]
    fn each_failure_stops_the_pipeline() {
        let cases = [
            ("open", "Cannot open", 1),
            ("unpack", "Cannot unpack", 2),
            ("process", "Cannot do postprocessing on", 3),
            ("write", "Cannot write data to stdout", 4),
        ];
        let options = options(&[EXISTING]);
        let path = validate_input(&options).unwrap();
        for (stage, message, calls) in cases {
            let mut fake = FakeProcessor::failing_at(stage);
            let e = convert(&mut fake, path, &options).unwrap_err();
            let text = e.to_string();
            assert!(text.starts_with(message), "{text}");
            assert!(text.contains(EXISTING), "{text}");
            assert!(text.ends_with(&format!("fake {stage} failure")), "{text}");
            assert_eq!(fake.calls.len(), calls, "{stage}");
            assert!(!fake.calls.contains(&Call::Release));
        }
    }

    #[test]
    fn write_failure_names_the_output_file() {
        let options = options(&["-o", "/tmp/out.tiff", "-T", EXISTING]);
        let path = validate_input(&options).unwrap();
        let mut fake = FakeProcessor::failing_at("write");
        let e = convert(&mut fake, path, &options).unwrap_err();
        assert!(e
            .to_string()
            .starts_with(&format!("Cannot write data to /tmp/out.tiff {EXISTING}")));
    }

    #[test]
    fn processor_creation_failure() {
        let result = run::<FakeProcessor, _>(&options(&[EXISTING]), &mut Vec::new(), || {
            Err(crate::processor::fake::FakeError("init"))
        });
        assert!(matches!(result, Err(RcError::Init(_))));
    }
}
