use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use gomock_codegen::EmitOptions;
use gomock_config::GomockConfig;
use gomock_parser::ResolveOptions;

/// Top-level CLI parser for the `gomock` binary.
#[derive(Debug, Parser)]
#[command(
    name = "gomock",
    version,
    about = "Generate a callback-driven mock for a Go interface"
)]
pub struct Cli {
    /// Go source file declaring the interface
    #[arg(short, long, value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Name of the interface to mock
    #[arg(short, long)]
    pub name: Option<String>,

    /// Qualify local types with the source package name
    #[arg(short, long)]
    pub package: bool,

    /// Skip the <Mock>Interface wrapper and its Mock() accessor
    #[arg(long)]
    pub no_wrapper: bool,

    /// Skip the New<Mock>() constructor
    #[arg(long)]
    pub no_constructor: bool,

    /// Start the output with a generated-code notice and a package clause
    #[arg(long)]
    pub header: bool,

    /// Treat interfaces of imported packages (found under GOPATH or HOME) as nil-able
    #[arg(long)]
    pub discover: bool,

    /// Print the interfaces visible from the source file instead of a mock
    #[arg(long, conflicts_with = "name")]
    pub list_interfaces: bool,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

/// What the invocation asks for, once the required flags are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub source: PathBuf,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Generate { name: String },
    ListInterfaces,
}

/// Effective settings after layering flags over configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub resolve: ResolveOptions,
    pub emit: EmitOptions,
    pub discover: bool,
}

impl Cli {
    /// `None` when a required flag is missing and usage should be shown.
    #[must_use]
    pub fn request(&self) -> Option<Request> {
        let source = self.source.clone()?;
        let action = if self.list_interfaces {
            Action::ListInterfaces
        } else {
            Action::Generate {
                name: self.name.clone()?,
            }
        };
        Some(Request { source, action })
    }

    /// Flags switch features on or off; anything not given on the command
    /// line comes from `config`.
    #[must_use]
    pub fn settings(&self, config: &GomockConfig) -> Settings {
        let generate = &config.generate;
        Settings {
            resolve: ResolveOptions {
                qualify: self.package || generate.qualify,
            },
            emit: EmitOptions {
                wrapper: generate.wrapper && !self.no_wrapper,
                constructor: generate.constructor && !self.no_constructor,
                header: self.header || generate.header,
                callback_prefix: generate.callback_prefix.clone(),
                mock_suffix: generate.mock_suffix.clone(),
            },
            discover: self.discover || config.discovery.enabled,
        }
    }
}

/// Print usage to `out`.
pub fn write_usage(out: &mut impl Write) -> anyhow::Result<()> {
    let help = Cli::command().render_help();
    writeln!(out, "{help}").context("failed to write usage")
}
