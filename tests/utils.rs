#![allow(dead_code)]

use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use walkdir::WalkDir;

/// Lists every file under `root` as a `/`-separated path relative to `root`.
pub fn relative_files(root: &Path) -> BTreeSet<String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap();
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}

/// Blanks out string literals, rune literals and comments, keeping line
/// structure, so delimiters and identifiers can be scanned safely.
pub fn strip_literals_and_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' => {
                out.push(c);
                while let Some(inner) = chars.next() {
                    if inner == '\\' {
                        chars.next();
                        continue;
                    }
                    if inner == c {
                        out.push(c);
                        break;
                    }
                    assert_ne!(inner, '\n', "unterminated literal");
                }
            }
            '`' => {
                out.push(c);
                for inner in chars.by_ref() {
                    if inner == '`' {
                        out.push(c);
                        break;
                    }
                    if inner == '\n' {
                        out.push('\n');
                    }
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                for inner in chars.by_ref() {
                    if inner == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Returns `(package name, import path)` for every import of a Go file.
pub fn go_imports(source: &str) -> Vec<(String, String)> {
    let line_re = Regex::new(r#"^\s*(?:import\s+)?(?:([A-Za-z_][A-Za-z0-9_]*)\s+)?"([^"]+)"\s*$"#)
        .unwrap();
    let mut imports = Vec::new();
    let mut in_block = false;
    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed == "import (" {
            in_block = true;
            continue;
        }
        if in_block && trimmed == ")" {
            in_block = false;
            continue;
        }
        if !in_block && !trimmed.starts_with("import ") {
            continue;
        }
        if let Some(caps) = line_re.captures(line) {
            let path = caps[2].to_string();
            let name = match caps.get(1) {
                Some(alias) => alias.as_str().to_string(),
                None => {
                    let last = path.rsplit('/').next().unwrap();
                    last.trim_start_matches("go-").to_string()
                }
            };
            imports.push((name, path));
        }
    }
    imports
}

/// Source with the import declarations removed.
fn go_body(source: &str) -> String {
    let mut body = Vec::new();
    let mut in_block = false;
    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed == "import (" {
            in_block = true;
            continue;
        }
        if in_block {
            in_block = trimmed != ")";
            continue;
        }
        if trimmed.starts_with("import ") {
            continue;
        }
        body.push(line);
    }
    body.join("\n")
}

fn references(body: &str, package: &str) -> bool {
    let re = Regex::new(&format!(r"(?:^|[^A-Za-z0-9_.]){}\.", regex::escape(package))).unwrap();
    re.is_match(body)
}

/// Package qualifiers the generated files may use; each one needs an import.
const KNOWN_PACKAGES: &[&str] = &[
    "fmt", "io", "os", "path", "time", "config", "logger", "cobra", "viper", "afero",
    "logrus", "lfshook", "rotatelogs", "xdg", "toml",
];

/// Structural checks standing in for the Go compiler: the file declares the
/// expected package, delimiters balance, every import is referenced (Go
/// rejects unused imports) and every package qualifier is imported.
pub fn assert_well_formed_go(label: &str, source: &str, package: &str) {
    assert!(
        source.starts_with(&format!("package {package}\n")),
        "{label}: expected package {package}"
    );
    assert!(source.ends_with("\n"), "{label}: missing trailing newline");
    assert!(!source.contains("{%") && !source.contains("{{"), "{label}: template syntax leaked");
    for (n, line) in source.lines().enumerate() {
        assert_eq!(line, line.trim_end(), "{label}: trailing whitespace on line {}", n + 1);
    }
    assert!(!source.contains("\n\n\n"), "{label}: consecutive blank lines");

    let stripped = strip_literals_and_comments(source);
    let mut stack = Vec::new();
    for c in stripped.chars() {
        match c {
            '(' | '{' | '[' => stack.push(c),
            ')' | '}' | ']' => {
                let open = stack.pop().unwrap_or_else(|| panic!("{label}: unbalanced '{c}'"));
                let expected = match c {
                    ')' => '(',
                    '}' => '{',
                    _ => '[',
                };
                assert_eq!(open, expected, "{label}: mismatched '{c}'");
            }
            _ => {}
        }
    }
    assert!(stack.is_empty(), "{label}: unclosed {stack:?}");

    let imports = go_imports(source);
    let body = strip_literals_and_comments(&go_body(source));
    let mut seen = BTreeSet::new();
    for (name, path) in &imports {
        assert!(seen.insert(path.clone()), "{label}: duplicate import {path}");
        assert!(references(&body, name), "{label}: unused import {path}");
    }
    for package in KNOWN_PACKAGES {
        if references(&body, package) {
            assert!(
                imports.iter().any(|(name, _)| name == package),
                "{label}: {package} is used but not imported"
            );
        }
    }
}
