//! `mdsite build` — render a content tree into a static site.
//!
//! Static assets are mirrored first, then every markdown page is rendered
//! through the template. Files whose bytes did not change are not rewritten.

use anyhow::Result;
use colored::Colorize;
use notify::{EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::config::{self, SitePaths};
use crate::site::{self, BuildOpts};

/// Path overrides given on the command line. `None` falls back to the
/// config file.
#[derive(Debug, Default)]
pub struct PathOverrides {
    pub content: Option<String>,
    pub static_dir: Option<String>,
    pub template: Option<String>,
    pub out: Option<String>,
}

/// Resolve build locations: CLI flags win over mdsite.json, which wins over
/// defaults. Config paths are relative to the config file's directory.
pub fn resolve_paths(config_file: &str, overrides: &PathOverrides) -> Result<SitePaths> {
    let config_path = Path::new(config_file);
    let config = config::load_config(config_path)?;
    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut paths = config.paths(root);
    if let Some(content) = &overrides.content {
        paths.content = PathBuf::from(content);
    }
    if let Some(static_dir) = &overrides.static_dir {
        paths.static_dir = PathBuf::from(static_dir);
    }
    if let Some(template) = &overrides.template {
        paths.template = PathBuf::from(template);
    }
    if let Some(out) = &overrides.out {
        paths.output = PathBuf::from(out);
    }

    Ok(paths)
}

pub fn handle_build(paths: &SitePaths, opts: &BuildOpts) -> Result<()> {
    let started = Instant::now();
    let report = site::run_build(paths, opts)?;

    tracing::info!(
        pages = report.total_pages(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "build finished"
    );

    if !opts.quiet {
        report.print_summary(&paths.output);
    }

    Ok(())
}

/// Watch the content dir, static dir and template for changes and rebuild on
/// each save.
///
/// Debounces rapid events (e.g. editors that write in stages) with a 200ms window.
/// Ctrl+C exits cleanly.
pub fn watch_and_rebuild(paths: &SitePaths, opts: &BuildOpts) -> Result<()> {
    println!(
        "{} {} for changes (Ctrl+C to stop)",
        "Watching".cyan().bold(),
        paths.content.display()
    );

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(&paths.content, RecursiveMode::Recursive)?;
    if paths.static_dir.exists() {
        watcher.watch(&paths.static_dir, RecursiveMode::Recursive)?;
    }
    if paths.template.exists() {
        watcher.watch(&paths.template, RecursiveMode::NonRecursive)?;
    }

    // Writes into the output dir must not trigger another rebuild.
    let output = std::fs::canonicalize(&paths.output).unwrap_or_else(|_| paths.output.clone());

    let mut last_rebuild = Instant::now();
    let debounce = Duration::from_millis(200);

    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(event) => {
                let relevant_kind = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );
                let outside_output = event.paths.iter().any(|p| !p.starts_with(&output));

                if relevant_kind && outside_output && last_rebuild.elapsed() > debounce {
                    tracing::debug!(paths = ?event.paths, "change detected");
                    // Small delay to let the editor finish writing
                    std::thread::sleep(Duration::from_millis(50));

                    match handle_build(paths, opts) {
                        Ok(()) => {
                            last_rebuild = Instant::now();
                        }
                        Err(e) => {
                            eprintln!("{} {:#}", "Build error:".red().bold(), e);
                        }
                    }
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                // Keep looping
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_relative_to_cwd() {
        let paths = resolve_paths("mdsite.json", &PathOverrides::default()).unwrap();
        assert_eq!(paths.content, PathBuf::from("./content"));
        assert_eq!(paths.output, PathBuf::from("./public"));
    }

    #[test]
    fn test_overrides_win() {
        let overrides = PathOverrides {
            out: Some("dist".to_string()),
            template: Some("layouts/page.html".to_string()),
            ..Default::default()
        };
        let paths = resolve_paths("/no/such/site/mdsite.json", &overrides).unwrap();
        assert_eq!(paths.output, PathBuf::from("dist"));
        assert_eq!(paths.template, PathBuf::from("layouts/page.html"));
        assert_eq!(paths.content, PathBuf::from("/no/such/site/content"));
    }
}
