//! Descriptor-set commands (no protoc in the loop).
//!
//! Pipeline:
//! 1. Run `buf build --as-file-descriptor-set -o descriptor.json` (or bring your own)
//! 2. Render one Markdown file per schema file that declares services

use anyhow::{anyhow, Context, Result};
use apidoc_core::generate_request;
use apidoc_descriptor::GenerationRequest;
use clap::Subcommand;
use colored::Colorize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::process::Command;

#[derive(Subcommand)]
pub enum DocsCommands {
    /// Render Markdown API docs from a Buf descriptor set JSON.
    Render {
        /// Descriptor set JSON (`buf build --as-file-descriptor-set`).
        #[arg(long, required_unless_present = "root", conflicts_with = "root")]
        descriptor: Option<PathBuf>,
        /// Buf module root; the descriptor set is built first.
        #[arg(long)]
        root: Option<PathBuf>,
        /// Where the built descriptor set is written when `--root` is used.
        #[arg(long, default_value = "build/apidoc/descriptor.json")]
        descriptor_out: PathBuf,
        /// Output directory for the generated Markdown.
        #[arg(short, long)]
        out: PathBuf,
        /// Schema file to document (repeatable). Default: every file with a service.
        #[arg(long = "file")]
        files: Vec<String>,
        /// Generator parameters, as passed to `--apidoc_opt` (e.g. `path_prefix=/twirp`).
        #[arg(long, default_value = "")]
        parameter: String,
    },

    /// Build a Buf descriptor set (`google.protobuf.FileDescriptorSet`) as JSON.
    BuildDescriptor {
        /// Buf module root (directory containing `buf.yaml`).
        root: PathBuf,
        /// Output JSON file (descriptor set).
        #[arg(short, long)]
        out: PathBuf,
    },
}

pub fn cmd_docs(command: DocsCommands) -> Result<()> {
    match command {
        DocsCommands::Render {
            descriptor,
            root,
            descriptor_out,
            out,
            files,
            parameter,
        } => {
            let descriptor = match (descriptor, root) {
                (Some(path), _) => path,
                (None, Some(root)) => {
                    build_descriptor_set_json(&root, &descriptor_out)?;
                    descriptor_out
                }
                (None, None) => return Err(anyhow!("either --descriptor or --root is required")),
            };
            cmd_render(&descriptor, &out, &files, &parameter)
        }
        DocsCommands::BuildDescriptor { root, out } => {
            build_descriptor_set_json(&root, &out)?;
            println!("  {} {}", "→".cyan(), out.display());
            Ok(())
        }
    }
}

fn cmd_render(descriptor: &Path, out: &Path, files: &[String], parameter: &str) -> Result<()> {
    println!("{} {}", "Rendering API docs".green().bold(), descriptor.display());

    let text = fs::read_to_string(descriptor)
        .with_context(|| format!("failed to read descriptor json: {}", descriptor.display()))?;
    let request = GenerationRequest::from_descriptor_set_json(&text, files, parameter)?;
    let generated = generate_request(&request)?;

    for file in &generated {
        let path = out.join(relative_output_path(&file.name)?);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("  {} {}", "→".cyan(), path.display());
    }

    println!("  docs: {}", generated.len());
    Ok(())
}

/// Generated names come from schema file names; keep them under `--out`.
fn relative_output_path(name: &str) -> Result<&Path> {
    let path = Path::new(name);
    if path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    {
        Ok(path)
    } else {
        Err(anyhow!("refusing to write outside the output directory: {name}"))
    }
}

pub(crate) fn build_descriptor_set_json(root: &Path, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut cmd = Command::new("buf");
    cmd.arg("build")
        .arg(root)
        .arg("--as-file-descriptor-set")
        .arg("-o")
        .arg(out);

    // Buf may not be able to write to `$HOME/.cache` in sandboxes.
    let cache_dir = PathBuf::from("build/buf_cache");
    let _ = fs::create_dir_all(&cache_dir);
    cmd.env("XDG_CACHE_HOME", cache_dir);

    tracing::debug!(root = %root.display(), out = %out.display(), "running buf build");
    let output = cmd.output().with_context(|| "failed to run `buf build`")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("buf build failed:\n{stderr}"));
    }
    Ok(())
}
