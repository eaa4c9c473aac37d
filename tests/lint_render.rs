//! Lint: every `[X]` key hint drawn in a `render.rs` must also be tappable.
//!
//! A hint pushed with `cl.push(...)` shows the key but registers no click
//! target, so it does nothing on a phone. Hints go through `push_clickable()`
//! or a helper built on it (`push_command()`).

use std::fs;
use std::path::Path;

const CLICKABLE_CALLS: &[&str] = &["push_clickable(", "push_command("];

/// `[I]`, `[1]`, `[-]` and friends.
fn contains_bracket_key(s: &str) -> bool {
    s.as_bytes().windows(3).any(|w| {
        w[0] == b'[' && w[2] == b']' && (w[1].is_ascii_alphanumeric() || b"-=?!~".contains(&w[1]))
    })
}

fn find_bracket_key_in_push(source: &str) -> Vec<(usize, String)> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            !line.trim_start().starts_with("//")
                && contains_bracket_key(line)
                && line.contains(".push(")
                && !CLICKABLE_CALLS.iter().any(|c| line.contains(c))
        })
        .map(|(i, line)| (i + 1, line.trim().to_string()))
        .collect()
}

fn visit_render_files(dir: &Path, violations: &mut Vec<(String, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_render_files(&path, violations);
        } else if path.file_name().is_some_and(|n| n == "render.rs") {
            let Ok(source) = fs::read_to_string(&path) else {
                continue;
            };
            for (line_num, line) in find_bracket_key_in_push(&source) {
                violations.push((path.display().to_string(), line_num, line));
            }
        }
    }
}

#[test]
fn no_bracket_keys_in_non_clickable_push() {
    let games_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/games");
    let mut violations = Vec::new();
    visit_render_files(&games_dir, &mut violations);

    if !violations.is_empty() {
        let mut msg = String::from(
            "Found [X] key hints in non-clickable push() calls.\n\
             Use push_clickable() or push_command() instead.\n\n",
        );
        for (file, line_num, line) in &violations {
            msg.push_str(&format!("  {}:{}: {}\n", file, line_num, line));
        }
        panic!("{}", msg);
    }
}

#[test]
fn render_files_exist() {
    let render = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/games/math/render.rs");
    assert!(render.exists(), "lint would silently pass without {}", render.display());
}

#[test]
fn detects_bracket_key_in_push() {
    let source = r#"cl.push(Line::from(" [C] Continue"));"#;
    assert_eq!(find_bracket_key_in_push(source).len(), 1);
}

#[test]
fn allows_clickable_helpers() {
    let source = r#"cl.push_clickable(Line::from(" [1] +2 Lives"), BUY_BASE);
push_command(&mut cl, 'R', "Play again", RESTART);"#;
    assert!(find_bracket_key_in_push(source).is_empty());
}

#[test]
fn ignores_comments_and_format_slots() {
    let source = r#"// cl.push(Line::from(" [R] Play again"));
cl.push(Line::from(format!(" [{}] ", key)));"#;
    assert!(find_bracket_key_in_push(source).is_empty());
}

#[test]
fn bracket_key_detection() {
    assert!(contains_bracket_key("[Q]"));
    assert!(contains_bracket_key("[1]"));
    assert!(contains_bracket_key("[-]"));
    assert!(contains_bracket_key("[?]"));
    assert!(!contains_bracket_key("[]"));
    assert!(!contains_bracket_key("[12]"));
    assert!(!contains_bracket_key("abc"));
}
