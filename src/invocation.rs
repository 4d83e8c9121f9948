//! One sedline run
//!
//! Setup (script resolution, parsing, pattern compilation) happens in
//! [`Invocation::prepare`] so every config, parse and compile error surfaces
//! before any input is read or output written.

use crate::command::Command;
use crate::config::{InvocationConfig, ScriptSource};
use crate::driver::{CancellationToken, RunSummary, StreamDriver};
use crate::error::{Result, SedError};
use crate::parser::Parser;
use crate::processor::LineProcessor;
use std::fs;
use std::io::{BufRead, Write};
use tracing::{debug, info};

pub struct Invocation {
    config: InvocationConfig,
    command: Command,
    driver: StreamDriver,
    cancel: CancellationToken,
}

impl Invocation {
    /// Resolve, parse and compile the script
    pub fn prepare(config: InvocationConfig, cancel: CancellationToken) -> Result<Self> {
        cancel.check()?;

        let script = load_script(config.script())?;
        debug!(script = %script, "resolved script");

        let command = Parser::new(config.parse_policy()).parse(&script)?;
        info!(command = command.name(), "parsed script");

        let processor = LineProcessor::new(&command, config.regex_syntax())?;
        let driver = StreamDriver::new(processor, config.quiet(), cancel.clone());

        Ok(Self {
            config,
            command,
            driver,
            cancel,
        })
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn config(&self) -> &InvocationConfig {
        &self.config
    }

    /// Run over the configured files, or `stdin` when there are none
    pub fn execute<R: BufRead, W: Write, E: Write>(
        &self,
        stdin: R,
        stdout: &mut W,
        stderr: &mut E,
    ) -> Result<RunSummary> {
        self.cancel.check()?;

        if self.config.files().is_empty() {
            self.driver.process_reader(stdin, stdout)
        } else {
            self.driver
                .process_files(self.config.files(), self.config.in_place(), stdout, stderr)
        }
    }

    /// Prepare and execute, writing a fatal error once to `stderr`
    pub fn run<R: BufRead, W: Write, E: Write>(
        config: InvocationConfig,
        cancel: CancellationToken,
        stdin: R,
        stdout: &mut W,
        stderr: &mut E,
    ) -> Result<RunSummary> {
        let result = match Self::prepare(config, cancel) {
            Ok(invocation) => invocation.execute(stdin, stdout, stderr),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            // Nothing more we can do if stderr itself is broken
            let _ = writeln!(stderr, "sedline: {}", e);
        }
        result
    }
}

fn load_script(source: &ScriptSource) -> Result<String> {
    match source {
        ScriptSource::Inline(script) => Ok(script.clone()),
        ScriptSource::File(path) => {
            let content = fs::read_to_string(path).map_err(|source| SedError::ScriptFile {
                path: path.clone(),
                source,
            })?;
            let script = content.strip_suffix('\n').unwrap_or(&content);
            let script = script.strip_suffix('\r').unwrap_or(script);
            Ok(script.to_string())
        }
    }
}
