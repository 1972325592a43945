//! Running a tool with `-v` and classifying what it prints.
//!
//! A compiler is probed with `-v -Wl,-v`, so one run reports both the compiler
//! and the linker it drives. Such an invocation never links anything and exits
//! with a failure status, which is ignored; only a failure to launch the tool
//! is an error.

use std::io;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::error::IdentifyError;

use super::registry::{Registry, Stream};
use super::{Family, Tool};

// ── Probe ─────────────────────────────────────────────────────────────────────

/// Everything a probed tool wrote to its standard streams.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Runs a tool to completion and captures its output.
pub trait Probe {
    fn run(&self, path: &str, args: &[String]) -> io::Result<Captured>;
}

impl<P: Probe + ?Sized> Probe for &P {
    fn run(&self, path: &str, args: &[String]) -> io::Result<Captured> {
        (**self).run(path, args)
    }
}

/// Launches the tool as a child process with stdin closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandProbe;

impl Probe for CommandProbe {
    fn run(&self, path: &str, args: &[String]) -> io::Result<Captured> {
        let output = Command::new(path)
            .args(args)
            .stdin(Stdio::null())
            .output()?;
        debug!(path, status = %output.status, "probe exited");
        Ok(Captured {
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

// ── Arguments ─────────────────────────────────────────────────────────────────

/// The arguments in `args` that influence which linker a compiler drives.
///
/// Kept: `-B <dir>` (both arguments), `-B<dir>`, `-fuse-ld=<name or path>` and
/// `--ld-path=<path>`. Everything else is dropped, including the look-alikes
/// `-fuse-ld gold`, `--fuse-ld=gold`, `--ld-path /x` and `-ld-path=/x`.
pub fn linker_args(args: &[String]) -> Vec<String> {
    let mut kept = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "-B" {
            kept.push(arg.clone());
            if let Some(dir) = iter.next() {
                kept.push(dir.clone());
            }
        } else if arg.starts_with("-B")
            || arg.starts_with("-fuse-ld=")
            || arg.starts_with("--ld-path=")
        {
            kept.push(arg.clone());
        }
    }
    kept
}

/// Probe arguments for a compiler invoked with `args`.
pub fn compiler_probe_args(args: &[String]) -> Vec<String> {
    let mut probe = linker_args(args);
    probe.push("-v".to_owned());
    probe.push("-Wl,-v".to_owned());
    probe
}

/// Probe arguments for a linker.
pub fn linker_probe_args() -> Vec<String> {
    vec!["-v".to_owned()]
}

// ── Classification ────────────────────────────────────────────────────────────

/// Identify the compiler and linker that produced `stdout` and `stderr`.
///
/// stdout is scanned first; stderr only if a family is still unresolved after
/// it. Within a stream, each unresolved family takes the first of its
/// matchers, in registry order, that matches any line. Non-UTF-8 output is
/// decoded lossily.
pub fn classify(registry: &Registry, stdout: &[u8], stderr: &[u8]) -> (Option<Tool>, Option<Tool>) {
    let mut compiler = None;
    let mut linker = None;

    for (stream, bytes) in [(Stream::Stdout, stdout), (Stream::Stderr, stderr)] {
        if compiler.is_some() && linker.is_some() {
            break;
        }
        let text = String::from_utf8_lossy(bytes);
        let lines: Vec<&str> = text.lines().collect();

        for (family, slot) in [
            (Family::Compiler, &mut compiler),
            (Family::Linker, &mut linker),
        ] {
            if slot.is_some() {
                continue;
            }
            *slot = registry.matchers(stream, family).find_map(|m| {
                lines
                    .iter()
                    .find_map(|line| m.pattern.version_in(line))
                    .map(|version| Tool::new(m.name, version))
            });
            if let Some(tool) = slot {
                debug!(%stream, %family, %tool, "matched identification line");
            }
        }
    }

    (compiler, linker)
}

// ── Identifier ────────────────────────────────────────────────────────────────

/// Identifies tools by running them through a [`Probe`] and classifying the
/// output against a [`Registry`].
#[derive(Debug, Clone)]
pub struct Identifier<'r, P> {
    registry: &'r Registry,
    probe: P,
}

impl Default for Identifier<'static, CommandProbe> {
    fn default() -> Self {
        Self::new(Registry::builtin(), CommandProbe)
    }
}

impl<'r, P: Probe> Identifier<'r, P> {
    pub fn new(registry: &'r Registry, probe: P) -> Self {
        Self { registry, probe }
    }

    /// Identify the compiler at `path` and the linker it drives when invoked
    /// with `args`.
    pub fn identify_compiler(
        &self,
        path: &str,
        args: &[String],
    ) -> Result<(Tool, Tool), IdentifyError> {
        let probe_args = compiler_probe_args(args);
        let (compiler, linker) = self.probe(path, &probe_args)?;
        let compiler = compiler.ok_or_else(|| unidentified(Family::Compiler, path, &probe_args))?;
        let linker = linker.ok_or_else(|| unidentified(Family::Linker, path, &probe_args))?;
        info!("identified {} as {compiler}", Family::Compiler);
        info!("identified {} as {linker}", Family::Linker);
        Ok((compiler, linker))
    }

    /// Identify the linker at `path`.
    pub fn identify_linker(&self, path: &str) -> Result<Tool, IdentifyError> {
        let probe_args = linker_probe_args();
        let (_, linker) = self.probe(path, &probe_args)?;
        let linker = linker.ok_or_else(|| unidentified(Family::Linker, path, &probe_args))?;
        info!("identified {} as {linker}", Family::Linker);
        Ok(linker)
    }

    fn probe(
        &self,
        path: &str,
        args: &[String],
    ) -> Result<(Option<Tool>, Option<Tool>), IdentifyError> {
        debug!(command = %command_line(path, args), "probing tool");
        let captured = self
            .probe
            .run(path, args)
            .map_err(|source| IdentifyError::Launch {
                path: path.to_owned(),
                source,
            })?;
        Ok(classify(self.registry, &captured.stdout, &captured.stderr))
    }
}

fn command_line(path: &str, args: &[String]) -> String {
    format!("{path} {}", args.join(" "))
}

fn unidentified(family: Family, path: &str, args: &[String]) -> IdentifyError {
    IdentifyError::Unidentified {
        family,
        command: command_line(path, args),
    }
}

/// Identify the compiler at `path`, and the linker it drives when invoked with
/// `args`, using the builtin registry.
pub fn identify_compiler(path: &str, args: &[String]) -> Result<(Tool, Tool), IdentifyError> {
    Identifier::default().identify_compiler(path, args)
}

/// Identify the linker at `path` using the builtin registry.
pub fn identify_linker(path: &str) -> Result<Tool, IdentifyError> {
    Identifier::default().identify_linker(path)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
