pub mod assets;
pub mod pages;

use anyhow::{Context, Result};
use colored::Colorize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::SitePaths;

/// Options passed from CLI to the build pipeline.
pub struct BuildOpts {
    pub clean: bool,
    pub verbose: bool,
    pub quiet: bool,
}

/// Aggregate report from the build pipeline.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages_created: usize,
    pub pages_updated: usize,
    pub pages_unchanged: usize,
    pub assets_created: usize,
    pub assets_updated: usize,
    pub assets_unchanged: usize,
}

/// Outcome of writing a single output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    New,
    Updated,
    Unchanged,
}

impl BuildReport {
    pub fn record_page(&mut self, status: FileStatus) {
        match status {
            FileStatus::New => self.pages_created += 1,
            FileStatus::Updated => self.pages_updated += 1,
            FileStatus::Unchanged => self.pages_unchanged += 1,
        }
    }

    pub fn record_asset(&mut self, status: FileStatus) {
        match status {
            FileStatus::New => self.assets_created += 1,
            FileStatus::Updated => self.assets_updated += 1,
            FileStatus::Unchanged => self.assets_unchanged += 1,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.pages_created + self.pages_updated + self.pages_unchanged
    }

    pub fn print_summary(&self, output: &Path) {
        println!();
        println!(
            "{} {} page(s) → {}",
            "Built".green().bold(),
            self.total_pages(),
            output.display()
        );

        let pages = summary_parts(self.pages_created, self.pages_updated, self.pages_unchanged);
        if !pages.is_empty() {
            println!("Pages: {}", pages.join(", "));
        }

        let assets = summary_parts(self.assets_created, self.assets_updated, self.assets_unchanged);
        if !assets.is_empty() {
            println!("Assets: {}", assets.join(", "));
        }
    }
}

fn summary_parts(created: usize, updated: usize, unchanged: usize) -> Vec<String> {
    let mut parts = Vec::new();
    if created > 0 {
        parts.push(format!("{created} created"));
    }
    if updated > 0 {
        parts.push(format!("{updated} updated"));
    }
    if unchanged > 0 {
        parts.push(format!("{unchanged} unchanged"));
    }
    parts
}

/// Run the full build: static assets first, then content pages.
pub fn run_build(paths: &SitePaths, opts: &BuildOpts) -> Result<BuildReport> {
    if opts.clean && paths.output.exists() {
        fs::remove_dir_all(&paths.output)
            .with_context(|| format!("Failed to remove {}", paths.output.display()))?;
        tracing::debug!(output = %paths.output.display(), "cleaned output directory");
    }
    fs::create_dir_all(&paths.output)
        .with_context(|| format!("Failed to create {}", paths.output.display()))?;

    let mut report = BuildReport::default();

    if !opts.quiet {
        println!("{}", "[Static] Copying assets...".bold());
    }
    assets::copy_static(&paths.static_dir, &paths.output, opts, &mut report)?;

    if !opts.quiet {
        println!();
        println!("{}", "[Pages] Rendering content...".bold());
    }
    pages::generate_pages(&paths.content, &paths.template, &paths.output, opts, &mut report)?;

    Ok(report)
}

/// Write `contents` to `dst` unless it already holds the same bytes.
pub fn write_if_changed(dst: &Path, contents: &[u8]) -> Result<FileStatus> {
    let status = if !dst.exists() {
        FileStatus::New
    } else {
        let existing =
            fs::read(dst).with_context(|| format!("Failed to read {}", dst.display()))?;
        if digest(&existing) == digest(contents) {
            return Ok(FileStatus::Unchanged);
        }
        FileStatus::Updated
    };

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(dst, contents).with_context(|| format!("Failed to write {}", dst.display()))?;

    Ok(status)
}

/// SHA-256 of `bytes`, hex encoded.
fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Recursively list all files under a directory, returning relative paths.
pub fn list_files_recursive(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if !dir.exists() {
        return Ok(files);
    }

    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            let rel = entry
                .path()
                .strip_prefix(dir)
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push(rel);
        }
    }

    Ok(files)
}

/// Print one line per written file. Unchanged files only show with --verbose.
pub fn print_status(rel_path: &Path, status: FileStatus, opts: &BuildOpts) {
    if opts.quiet {
        return;
    }
    match status {
        FileStatus::New => println!("  {} {} (new)", "+".green(), rel_path.display()),
        FileStatus::Updated => println!("  {} {} (updated)", "~".yellow(), rel_path.display()),
        FileStatus::Unchanged => {
            if opts.verbose {
                println!("  {} {} (unchanged)", "-".dimmed(), rel_path.display());
            }
        }
    }
}
