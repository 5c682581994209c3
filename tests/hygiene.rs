//! Hygiene — enforces coding standards at test time
//!
//! These tests scan the library and binary sources for constructs that crash
//! the host, swallow errors or bypass `tracing`. Each has a budget (zero).
//! If you must add one, you have to fix an existing one first — the budget
//! never grows.

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

// Panics crash the host page; silent discards lose errors without logging.
const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, why: "panics" },
    Budget { pattern: ".expect(", max: 0, why: "panics" },
    Budget { pattern: "panic!(", max: 0, why: "panics" },
    Budget { pattern: "unreachable!(", max: 0, why: "panics" },
    Budget { pattern: "todo!(", max: 0, why: "panics" },
    Budget { pattern: "unimplemented!(", max: 0, why: "panics" },
    Budget { pattern: "let _ =", max: 0, why: "discards a result unseen" },
    Budget { pattern: ".ok()", max: 0, why: "discards an error unseen" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "hides unused code" },
];

struct SourceFile {
    path: String,
    content: String,
}

impl SourceFile {
    fn is_test(&self) -> bool {
        self.path.ends_with("_test.rs")
    }

    fn is_binary(&self) -> bool {
        Path::new(&self.path).components().any(|c| c.as_os_str() == "bin")
    }
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            if name == "target" || name == "tests" {
                continue;
            }
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path.to_string_lossy().to_string(), content });
            }
        }
    }
}

fn count_in<'a>(files: impl Iterator<Item = &'a SourceFile>, pattern: &str) -> Vec<(String, usize)> {
    files
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn format_hits(hits: &[(String, usize)]) -> String {
    hits.iter().map(|(path, count)| format!("  {path}: {count}")).collect::<Vec<_>>().join("\n")
}

#[test]
fn production_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let hits = count_in(files.iter().filter(|f| !f.is_test()), budget.pattern);
        let count: usize = hits.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            failures.push(format!(
                "`{}` ({}) budget exceeded: found {count}, max {}.\n{}",
                budget.pattern,
                budget.why,
                budget.max,
                format_hits(&hits)
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn library_logs_through_tracing() {
    let files = source_files();
    let library = || files.iter().filter(|f| !f.is_test() && !f.is_binary());
    let mut hits = count_in(library(), "println!(");
    hits.extend(count_in(library(), "eprintln!("));
    hits.extend(count_in(library(), "dbg!("));
    assert!(hits.is_empty(), "library code must log with tracing, not print:\n{}", format_hits(&hits));
}

#[test]
fn every_test_file_is_wired() {
    let files = source_files();
    let unwired: Vec<&str> = files
        .iter()
        .filter(|f| f.is_test())
        .filter_map(|test| {
            let name = Path::new(&test.path).file_name()?.to_string_lossy().to_string();
            let attr = format!("#[path = \"{name}\"]");
            let wired = files.iter().any(|f| !f.is_test() && f.content.contains(&attr));
            (!wired).then_some(test.path.as_str())
        })
        .collect();
    assert!(unwired.is_empty(), "test files not pulled in by any module: {unwired:?}");
}
