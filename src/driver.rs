//! Stream Driver
//!
//! Pulls lines from a reader or a list of files, runs each one through the
//! [`LineProcessor`] and writes the result, strictly in input order.
//!
//! Output rules per line:
//! - `Emit` is the auto-print line; it is dropped when quiet
//! - `EmitTwice` writes the line twice, then auto-prints it unless quiet,
//!   so `p` yields three copies normally and two with `-n`
//! - `Suppress` writes nothing

use crate::error::{Result, SedError};
use crate::error_helpers::source_error_message;
use crate::processor::{LineOutput, LineProcessor};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Cooperative cancellation flag shared between a caller and a running driver
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Err(Cancelled) once cancel() has been called
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(SedError::Cancelled);
        }
        Ok(())
    }
}

/// An input file that couldn't be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines_read: u64,
    pub lines_written: u64,
    pub failures: Vec<SourceFailure>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct StreamDriver {
    processor: LineProcessor,
    quiet: bool,
    cancel: CancellationToken,
}

impl StreamDriver {
    pub fn new(processor: LineProcessor, quiet: bool, cancel: CancellationToken) -> Self {
        Self {
            processor,
            quiet,
            cancel,
        }
    }

    /// Process a single reader into `out`
    ///
    /// Read and write failures abort the run.
    pub fn process_reader<R: BufRead, W: Write>(&self, reader: R, out: &mut W) -> Result<RunSummary> {
        self.cancel.check()?;

        let mut summary = RunSummary::default();
        self.stream(reader, out, &mut summary)?;
        out.flush().map_err(|source| SedError::Write { source })?;

        debug!(lines_read = summary.lines_read, lines_written = summary.lines_written, "finished input");
        Ok(summary)
    }

    /// Process named files one after another
    ///
    /// A file that can't be opened or read is reported on `err` and recorded
    /// in the summary; the remaining files are still processed. With
    /// `in_place`, each file is rewritten instead of printed to `out`.
    pub fn process_files<W: Write, E: Write>(
        &self,
        files: &[PathBuf],
        in_place: bool,
        out: &mut W,
        err: &mut E,
    ) -> Result<RunSummary> {
        self.cancel.check()?;

        let mut summary = RunSummary::default();

        for path in files {
            self.cancel.check()?;
            debug!(path = %path.display(), in_place, "processing file");

            let result = if in_place {
                self.edit_in_place(path, &mut summary)
            } else {
                self.process_path(path, out, &mut summary)
            };

            match result {
                Ok(()) => {}
                Err(SedError::Source { path, source }) => {
                    let message = source_error_message(&path, &source);
                    warn!(path = %path.display(), error = %source, "source failed");
                    writeln!(err, "sedline: {}", message).map_err(|source| SedError::Write { source })?;
                    summary.failures.push(SourceFailure { path, message });
                }
                Err(e) => return Err(e),
            }
        }

        out.flush().map_err(|source| SedError::Write { source })?;

        info!(
            files = files.len(),
            failed = summary.failures.len(),
            lines_read = summary.lines_read,
            lines_written = summary.lines_written,
            "finished files"
        );
        Ok(summary)
    }

    fn process_path<W: Write>(&self, path: &Path, out: &mut W, summary: &mut RunSummary) -> Result<()> {
        let file = File::open(path).map_err(|source| SedError::Source {
            path: path.to_path_buf(),
            source,
        })?;

        self.stream(BufReader::new(file), out, summary)
            .map_err(|e| attach_source(e, path, false))
    }

    /// Write the edited file to a temp file beside it, then swap it in
    fn edit_in_place(&self, path: &Path, summary: &mut RunSummary) -> Result<()> {
        let to_source = |source| SedError::Source {
            path: path.to_path_buf(),
            source,
        };

        let input = File::open(path).map_err(to_source)?;
        let permissions = input.metadata().map_err(to_source)?.permissions();

        let parent_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut temp_file = NamedTempFile::new_in(parent_dir).map_err(to_source)?;

        {
            let mut writer = BufWriter::new(temp_file.as_file_mut());
            self.stream(BufReader::new(input), &mut writer, summary)
                .map_err(|e| attach_source(e, path, true))?;
            writer.flush().map_err(to_source)?;
        }

        fs::set_permissions(temp_file.path(), permissions).map_err(to_source)?;
        temp_file.persist(path).map_err(|e| to_source(e.error))?;

        Ok(())
    }

    fn stream<R: BufRead, W: Write>(&self, mut reader: R, out: &mut W, summary: &mut RunSummary) -> Result<()> {
        let mut buf = Vec::new();

        loop {
            self.cancel.check()?;

            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| SedError::Read { source })?;
            if n == 0 {
                return Ok(());
            }
            summary.lines_read += 1;

            let output = self.processor.process(trim_line_terminator(&buf));
            self.emit(output, out, summary)?;
        }
    }

    fn emit<W: Write>(&self, output: LineOutput, out: &mut W, summary: &mut RunSummary) -> Result<()> {
        match output {
            LineOutput::Emit(text) => {
                if !self.quiet {
                    write_line(out, &text, summary)?;
                }
            }
            LineOutput::EmitTwice(text) => {
                write_line(out, &text, summary)?;
                write_line(out, &text, summary)?;
                if !self.quiet {
                    write_line(out, &text, summary)?;
                }
            }
            LineOutput::Suppress => {}
        }
        Ok(())
    }
}

fn write_line<W: Write>(out: &mut W, text: &[u8], summary: &mut RunSummary) -> Result<()> {
    out.write_all(text)
        .and_then(|()| out.write_all(b"\n"))
        .map_err(|source| SedError::Write { source })?;
    summary.lines_written += 1;
    Ok(())
}

/// Read failures belong to the file being read; with in-place editing the
/// output is that file too.
fn attach_source(err: SedError, path: &Path, in_place: bool) -> SedError {
    match err {
        SedError::Read { source } => SedError::Source {
            path: path.to_path_buf(),
            source,
        },
        SedError::Write { source } if in_place => SedError::Source {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    }
}

fn trim_line_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
