//! `protoc-gen-apidoc`
//!
//! Markdown API documentation for protobuf services:
//! - as a `protoc` plugin (no subcommand): `protoc --apidoc_out=docs --apidoc_opt=path_prefix=/twirp greeter.proto`
//! - against a Buf descriptor set JSON: `protoc-gen-apidoc render --descriptor descriptor.json --out docs`

use anyhow::Result;
use clap::Parser;

mod docs;
mod logging;
mod plugin;

use docs::DocsCommands;

#[derive(Parser)]
#[command(name = "protoc-gen-apidoc")]
#[command(author, version, about = "Markdown API docs for protobuf services")]
struct Cli {
    /// More log output on stderr (`-v` debug, `-vv` trace). Overrides `APIDOC_LOG`.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Without a subcommand, read a `CodeGeneratorRequest` from stdin and
    /// write the `CodeGeneratorResponse` to stdout.
    #[command(subcommand)]
    command: Option<DocsCommands>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        None => plugin::run(std::io::stdin().lock(), std::io::stdout().lock()),
        Some(command) => docs::cmd_docs(command),
    }
}
