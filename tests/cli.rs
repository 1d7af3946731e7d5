//! End-to-end tests driving the compiled binary.
//!
//! Each test builds a blog checkout in a temp directory and runs
//! `simple-blog` inside it, so default relative paths (`pages/`, `website/`,
//! `known.json`) resolve there.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_simple-blog"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run simple-blog")
}

fn write_page(dir: &Path, slug: &str, timestamp: i64, title: &str, body: &str) {
    let pages = dir.join("pages");
    fs::create_dir_all(&pages).unwrap();
    fs::write(
        pages.join(format!("{slug}.md")),
        format!("---\ntimestamp: {timestamp}\ntitle: \"{title}\"\n---\n\n{body}\n"),
    )
    .unwrap();
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn build_writes_site_and_store() {
    let tmp = TempDir::new().unwrap();
    write_page(tmp.path(), "older", 100, "Older", "old body");
    write_page(tmp.path(), "newer", 200, "Newer", "new body");

    let out = run(tmp.path(), &["build"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let site = tmp.path().join("website");
    assert!(site.join("pages/older/index.html").is_file());
    assert!(site.join("pages/newer/index.html").is_file());

    let home = fs::read_to_string(site.join("index.html")).unwrap();
    assert!(home.find("/pages/newer").unwrap() < home.find("/pages/older").unwrap());

    let known: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("known.json")).unwrap()).unwrap();
    assert_eq!(known.as_object().unwrap().len(), 2);

    assert!(stdout(&out).contains("Pages: 2 rendered"));
}

#[test]
fn second_build_reports_unchanged_pages() {
    let tmp = TempDir::new().unwrap();
    write_page(tmp.path(), "post", 100, "Post", "body");

    assert!(run(tmp.path(), &["build"]).status.success());
    let out = run(tmp.path(), &["build"]);

    assert!(out.status.success());
    assert!(stdout(&out).contains("Pages: 1 unchanged, 0 rendered (1 total)"));
}

#[test]
fn force_flag_rerenders() {
    let tmp = TempDir::new().unwrap();
    write_page(tmp.path(), "post", 100, "Post", "body");

    assert!(run(tmp.path(), &["build"]).status.success());
    let out = run(tmp.path(), &["build", "--force"]);

    assert!(out.status.success());
    assert!(stdout(&out).contains("Pages: 1 rendered"));
}

#[test]
fn config_file_and_flags_are_applied() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("blog.toml"),
        "[paths]\nsource = \"posts\"\n\n[build]\nper_page = 1\n",
    )
    .unwrap();
    let posts = tmp.path().join("posts");
    fs::create_dir_all(&posts).unwrap();
    fs::write(posts.join("a.md"), "---\ntimestamp: 1\ntitle: A\n---\n").unwrap();
    fs::write(posts.join("b.md"), "---\ntimestamp: 2\ntitle: B\n---\n").unwrap();

    let out = run(tmp.path(), &["build", "--output", "public"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let public = tmp.path().join("public");
    assert!(public.join("index.html").is_file());
    assert!(public.join("pagination/2/index.html").is_file());
    assert!(!tmp.path().join("website").exists());
}

#[test]
fn invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("blog.toml"), "[build]\nper_page = 0\n").unwrap();

    let out = run(tmp.path(), &["build"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("per_page"));
}

#[test]
fn check_fails_on_malformed_pages() {
    let tmp = TempDir::new().unwrap();
    write_page(tmp.path(), "good", 1, "Good", "");
    fs::write(tmp.path().join("pages/bad.md"), "no header\n").unwrap();

    let out = run(tmp.path(), &["check"]);

    assert!(!out.status.success());
    assert!(stdout(&out).contains("bad.md: No front-matter block"));
    assert!(!tmp.path().join("website").exists());
}

#[test]
fn gen_config_prints_stock_config() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["gen-config"]);

    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("[paths]"));
    assert!(text.contains("per_page = 10"));
}

#[test]
fn gen_layouts_writes_builtin_files() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["gen-layouts"]);

    assert!(out.status.success());
    for name in [
        "content.html",
        "page.html",
        "head.html",
        "header.html",
        "preview.html",
        "pagination.html",
    ] {
        assert!(tmp.path().join("layouts").join(name).is_file(), "{name}");
    }
}
