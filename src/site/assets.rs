use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use super::{BuildOpts, BuildReport, FileStatus, list_files_recursive, print_status, write_if_changed};

/// Mirror every file under `static_dir` into `out_dir`.
pub fn copy_static(
    static_dir: &Path,
    out_dir: &Path,
    opts: &BuildOpts,
    report: &mut BuildReport,
) -> Result<()> {
    if !static_dir.exists() {
        if !opts.quiet {
            println!(
                "  {} {} not found, skipping assets",
                "[skip]".dimmed(),
                static_dir.display()
            );
        }
        return Ok(());
    }

    for rel_path in list_files_recursive(static_dir)? {
        let status = copy_asset(&static_dir.join(&rel_path), &out_dir.join(&rel_path))?;
        report.record_asset(status);
        print_status(&rel_path, status, opts);
    }

    Ok(())
}

/// Copy one file verbatim, skipping the write when the bytes already match.
pub fn copy_asset(src: &Path, dst: &Path) -> Result<FileStatus> {
    let bytes = fs::read(src).with_context(|| format!("Failed to read {}", src.display()))?;
    let status = write_if_changed(dst, &bytes)?;
    tracing::debug!(src = %src.display(), dst = %dst.display(), ?status, "copied asset");
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_copy_static_mirrors_tree() {
        let root = std::env::temp_dir().join("mdsite-test-assets");
        let _ = fs::remove_dir_all(&root);
        let static_dir = root.join("static");
        let out_dir = root.join("public");
        fs::create_dir_all(static_dir.join("images")).unwrap();
        fs::write(static_dir.join("index.css"), "body {}").unwrap();
        fs::write(static_dir.join("images/logo.svg"), "<svg/>").unwrap();

        let opts = BuildOpts {
            clean: false,
            verbose: false,
            quiet: true,
        };
        let mut report = BuildReport::default();
        copy_static(&static_dir, &out_dir, &opts, &mut report).unwrap();

        assert_eq!(report.assets_created, 2);
        assert_eq!(
            fs::read_to_string(out_dir.join("images/logo.svg")).unwrap(),
            "<svg/>"
        );

        let mut again = BuildReport::default();
        copy_static(&static_dir, &out_dir, &opts, &mut again).unwrap();
        assert_eq!(again.assets_unchanged, 2);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_missing_static_dir_is_skipped() {
        let opts = BuildOpts {
            clean: false,
            verbose: false,
            quiet: true,
        };
        let mut report = BuildReport::default();
        copy_static(
            &PathBuf::from("/no/such/static"),
            &PathBuf::from("/no/such/out"),
            &opts,
            &mut report,
        )
        .unwrap();
        assert_eq!(report.assets_created, 0);
    }
}
