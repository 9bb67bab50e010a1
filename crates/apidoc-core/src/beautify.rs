//! Pretty-printer for rendered example literals.
//!
//! Line-oriented and infallible: it re-indents by bracket depth, puts runs of
//! leading closing brackets on their own lines, and normalizes spacing after
//! `:` / `,` and before inline `//` comments. Brackets inside string literals
//! and comments are ignored; unbalanced input clamps at depth zero. Only
//! whitespace is ever changed.

const INDENT: &str = "    ";

pub fn beautify(source: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut depth = 0usize;

    for raw in source.lines() {
        for segment in split_leading_closers(raw.trim()) {
            let line = normalize(segment);
            if line.is_empty() {
                continue;
            }
            let brackets = count_brackets(&line);
            let indent = depth.saturating_sub(brackets.leading_closers);
            out.push(format!("{}{line}", INDENT.repeat(indent)));
            depth = (depth + brackets.opens).saturating_sub(brackets.closes);
        }
    }

    out.join("\n")
}

fn is_closer(c: char) -> bool {
    c == '}' || c == ']'
}

/// `}],` → `}`, `],`
fn split_leading_closers(line: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = line;
    while rest.starts_with(is_closer) {
        let after = rest[1..].trim_start();
        if !after.starts_with(is_closer) {
            break;
        }
        parts.push(&rest[..1]);
        rest = after;
    }
    parts.push(rest);
    parts
}

/// Spacing fixes outside string literals; the comment tail is kept verbatim.
fn normalize(line: &str) -> String {
    let mut code = String::with_capacity(line.len() + 8);
    let mut chars = line.char_indices().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some((i, c)) = chars.next() {
        if in_string {
            code.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '/' if line[i..].starts_with("//") => {
                let code = code.trim_end();
                let comment = &line[i..];
                return if code.is_empty() {
                    comment.to_string()
                } else {
                    format!("{code} {comment}")
                };
            }
            '"' => {
                in_string = true;
                code.push(c);
            }
            ':' | ',' => {
                code.push(c);
                if chars.peek().is_some_and(|(_, next)| !next.is_whitespace()) {
                    code.push(' ');
                }
            }
            _ => code.push(c),
        }
    }

    code.trim_end().to_string()
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Brackets {
    opens: usize,
    closes: usize,
    leading_closers: usize,
}

fn count_brackets(line: &str) -> Brackets {
    let mut brackets = Brackets::default();
    let mut in_string = false;
    let mut escaped = false;
    let mut leading = true;
    let mut prev_slash = false;

    for c in line.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '/' {
            if prev_slash {
                break;
            }
            prev_slash = true;
            leading = false;
            continue;
        }
        prev_slash = false;

        match c {
            '"' => {
                in_string = true;
                leading = false;
            }
            '{' | '[' => {
                brackets.opens += 1;
                leading = false;
            }
            '}' | ']' => {
                brackets.closes += 1;
                if leading {
                    brackets.leading_closers += 1;
                }
            }
            c if c.is_whitespace() => {}
            _ => leading = false,
        }
    }
    brackets
}
