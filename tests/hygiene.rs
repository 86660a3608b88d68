//! Hygiene checks over production sources.
//!
//! Every pattern below has a budget of zero outside `*_test.rs` files. Store
//! and controller code reports misses by return value, so nothing in `src/`
//! should need to panic or swallow an error.

use std::fs;
use std::path::Path;

struct Rule {
    pattern: &'static str,
    why: &'static str,
}

const RULES: &[Rule] = &[
    Rule { pattern: ".unwrap()", why: "panics on None/Err" },
    Rule { pattern: ".expect(", why: "panics on None/Err" },
    Rule { pattern: "panic!(", why: "crashes the host" },
    Rule { pattern: "unreachable!(", why: "crashes the host" },
    Rule { pattern: "todo!(", why: "unfinished stub" },
    Rule { pattern: "unimplemented!(", why: "unfinished stub" },
    Rule { pattern: "let _ =", why: "discards a value without inspecting it" },
    Rule { pattern: ".ok()", why: "drops the error" },
    Rule { pattern: "#[allow(dead_code)]", why: "hides unused code" },
];

fn production_sources(dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            production_sources(&path, out);
            continue;
        }
        let name = path.to_string_lossy().to_string();
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push((name, content));
        }
    }
}

fn offenders(files: &[(String, String)], pattern: &str) -> Vec<String> {
    files
        .iter()
        .flat_map(|(path, content)| {
            content
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains(pattern))
                .map(move |(n, line)| format!("  {path}:{}: {}", n + 1, line.trim()))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let mut files = Vec::new();
    production_sources(Path::new("src"), &mut files);
    assert!(files.iter().any(|(path, _)| path.ends_with("store.rs")), "scan found no sources");
}

#[test]
fn no_banned_patterns() {
    let mut files = Vec::new();
    production_sources(Path::new("src"), &mut files);

    let report: Vec<String> = RULES
        .iter()
        .filter_map(|rule| {
            let hits = offenders(&files, rule.pattern);
            if hits.is_empty() {
                None
            } else {
                Some(format!("`{}` ({}):\n{}", rule.pattern, rule.why, hits.join("\n")))
            }
        })
        .collect();

    assert!(report.is_empty(), "hygiene violations:\n{}", report.join("\n"));
}
