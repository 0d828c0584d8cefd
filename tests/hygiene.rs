//! Source-tree lint run as a test.
//!
//! Production files under `src/` (everything but `*_test.rs`) must not
//! contain any of the patterns in [`FORBIDDEN`], and only `src/web` may
//! name the browser bindings.

use std::fs;
use std::path::{Path, PathBuf};

/// Pattern and the reason it is banned.
const FORBIDDEN: &[(&str, &str)] = &[
    (".unwrap()", "crashes the page script"),
    (".expect(", "crashes the page script"),
    ("panic!(", "crashes the page script"),
    ("unreachable!(", "crashes the page script"),
    ("todo!(", "unfinished code"),
    ("unimplemented!(", "unfinished code"),
    ("let _ =", "drops a result unread"),
    (".ok()", "drops an error unread"),
    ("#[allow(dead_code)]", "hides unused code"),
];

/// Binding crates reserved for the browser host.
const DOM_CRATES: &[&str] = &["web_sys::", "wasm_bindgen::"];

fn production_sources(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            production_sources(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs")
            && !path.to_string_lossy().ends_with("_test.rs")
        {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path, content));
            }
        }
    }
}

/// `path:line: text` for every line containing one of `patterns`.
fn offending_lines(files: &[(PathBuf, String)], patterns: &[&str]) -> Vec<String> {
    files
        .iter()
        .flat_map(|(path, content)| {
            content.lines().enumerate().filter_map(move |(n, line)| {
                patterns
                    .iter()
                    .any(|p| line.contains(p))
                    .then(|| format!("  {}:{}: {}", path.display(), n + 1, line.trim()))
            })
        })
        .collect()
}

fn sources() -> Vec<(PathBuf, String)> {
    let mut files = Vec::new();
    production_sources(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no sources found; run from the crate root");
    files
}

#[test]
fn no_forbidden_patterns() {
    let files = sources();
    let report: Vec<String> = FORBIDDEN
        .iter()
        .filter_map(|(pattern, why)| {
            let lines = offending_lines(&files, &[pattern]);
            (!lines.is_empty()).then(|| format!("`{pattern}` ({why}):\n{}", lines.join("\n")))
        })
        .collect();
    assert!(report.is_empty(), "{}", report.join("\n"));
}

#[test]
fn dom_stays_in_the_host() {
    let files: Vec<_> = sources()
        .into_iter()
        .filter(|(path, _)| !path.starts_with("src/web"))
        .collect();
    let lines = offending_lines(&files, DOM_CRATES);
    assert!(lines.is_empty(), "browser bindings outside src/web; go through `Page`:\n{}", lines.join("\n"));
}
