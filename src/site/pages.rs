use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use super::assets::copy_asset;
use super::{BuildOpts, BuildReport, list_files_recursive, print_status, write_if_changed};

/// Render every markdown file under `content_dir` through the template and
/// copy everything else verbatim.
pub fn generate_pages(
    content_dir: &Path,
    template_path: &Path,
    out_dir: &Path,
    opts: &BuildOpts,
    report: &mut BuildReport,
) -> Result<()> {
    if !content_dir.exists() {
        anyhow::bail!("Content directory {} not found", content_dir.display());
    }

    let template = fs::read_to_string(template_path)
        .with_context(|| format!("Failed to read template {}", template_path.display()))?;

    for rel_path in list_files_recursive(content_dir)? {
        let src = content_dir.join(&rel_path);

        if !is_markdown(&rel_path) {
            let status = copy_asset(&src, &out_dir.join(&rel_path))?;
            report.record_asset(status);
            print_status(&rel_path, status, opts);
            continue;
        }

        let dest_rel = page_output_path(&rel_path);
        if !opts.quiet && opts.verbose {
            println!(
                "  {} {} → {}",
                "page".dimmed(),
                rel_path.display(),
                dest_rel.display()
            );
        }

        let markdown = fs::read_to_string(&src)
            .with_context(|| format!("Failed to read {}", src.display()))?;
        let html = mdsite_parse::render_page(&markdown, &template)
            .with_context(|| format!("Failed to render {}", src.display()))?;

        let status = write_if_changed(&out_dir.join(&dest_rel), html.as_bytes())?;
        tracing::debug!(src = %src.display(), dest = %dest_rel.display(), ?status, "generated page");
        report.record_page(status);
        print_status(&dest_rel, status, opts);
    }

    Ok(())
}

/// `*.md` / `*.markdown`, case-insensitive.
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
}

/// Where a content page lands, relative to the output directory.
///
/// `dir/index.md` → `dir/index.html`; `dir/name.md` → `dir/name/index.html`.
pub fn page_output_path(rel_path: &Path) -> PathBuf {
    let parent = rel_path.parent().unwrap_or(Path::new(""));
    match rel_path.file_stem() {
        Some(stem) if stem != "index" => parent.join(stem).join("index.html"),
        _ => parent.join("index.html"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_output_path() {
        assert_eq!(page_output_path(Path::new("index.md")), PathBuf::from("index.html"));
        assert_eq!(
            page_output_path(Path::new("blog/index.md")),
            PathBuf::from("blog/index.html")
        );
        assert_eq!(
            page_output_path(Path::new("blog/first-post.md")),
            PathBuf::from("blog/first-post/index.html")
        );
    }

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown(Path::new("a/b.md")));
        assert!(is_markdown(Path::new("README.MD")));
        assert!(is_markdown(Path::new("notes.markdown")));
        assert!(!is_markdown(Path::new("image.png")));
        assert!(!is_markdown(Path::new("Makefile")));
    }

    #[test]
    fn test_generate_pages_renders_and_copies() {
        let root = std::env::temp_dir().join("mdsite-test-pages");
        let _ = fs::remove_dir_all(&root);
        let content = root.join("content");
        let out = root.join("public");
        fs::create_dir_all(content.join("blog")).unwrap();
        fs::write(content.join("index.md"), "# Home\n\nWelcome *friend*").unwrap();
        fs::write(content.join("blog/post.md"), "# Post\n\n1. one\n2. two").unwrap();
        fs::write(content.join("blog/photo.txt"), "not markdown").unwrap();
        let template = root.join("template.html");
        fs::write(&template, "<title>{{ Title }}</title>{{ Content }}").unwrap();

        let opts = BuildOpts {
            clean: false,
            verbose: false,
            quiet: true,
        };
        let mut report = BuildReport::default();
        generate_pages(&content, &template, &out, &opts, &mut report).unwrap();

        assert_eq!(report.pages_created, 2);
        assert_eq!(report.assets_created, 1);
        assert_eq!(
            fs::read_to_string(out.join("index.html")).unwrap(),
            "<title>Home</title><div><h1>Home</h1><p>Welcome <i>friend</i></p></div>"
        );
        assert!(
            fs::read_to_string(out.join("blog/post/index.html"))
                .unwrap()
                .contains("<ol><li>one</li><li>two</li></ol>")
        );
        assert_eq!(
            fs::read_to_string(out.join("blog/photo.txt")).unwrap(),
            "not markdown"
        );

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_page_without_title_fails_with_path() {
        let root = std::env::temp_dir().join("mdsite-test-untitled");
        let _ = fs::remove_dir_all(&root);
        let content = root.join("content");
        fs::create_dir_all(&content).unwrap();
        fs::write(content.join("untitled.md"), "no heading").unwrap();
        let template = root.join("template.html");
        fs::write(&template, "{{ Content }}").unwrap();

        let opts = BuildOpts {
            clean: false,
            verbose: false,
            quiet: true,
        };
        let mut report = BuildReport::default();
        let err = generate_pages(&content, &template, &root.join("out"), &opts, &mut report)
            .unwrap_err();
        assert!(err.to_string().contains("untitled.md"), "{err}");

        let _ = fs::remove_dir_all(&root);
    }
}
