//! Indentation helpers for text block payloads.
//!
//! A text block's payload is captured verbatim, including the indentation the
//! author used to line the payload up under its block header. `outdent_string`
//! removes exactly the common leading-whitespace run shared by every
//! non-empty captured line, so intentional inner indentation (a nested JSON
//! object, an indented script body) survives untouched.
//!
//! `indent_string` is the serializer's inverse: two-space indentation of
//! every non-empty line, matching the indentation conventions of emitted
//! dictionary blocks.
//!
//! Both helpers split on `\r\n`, `\r` or `\n` and rejoin with `\n`, so line
//! endings are normalized as a side effect of either pass.

fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    loop {
        match rest.find(['\r', '\n']) {
            Some(idx) => {
                lines.push(&rest[..idx]);
                let after = &rest[idx..];
                rest = if let Some(stripped) = after.strip_prefix("\r\n") {
                    stripped
                } else {
                    &after[1..]
                };
            }
            None => {
                lines.push(rest);
                return lines;
            }
        }
    }
}

fn leading_whitespace_len(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

/// Strips the minimal leading-whitespace run shared by all non-empty lines.
///
/// Empty lines contribute no constraint and are left empty. Applying the
/// function to an already-minimally-indented text is a no-op (beyond line
/// ending normalization).
pub fn outdent_string(text: &str) -> String {
    let lines = split_lines(text);
    let min_indent = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| leading_whitespace_len(line))
        .min()
        .unwrap_or(0);
    if min_indent == 0 {
        return lines.join("\n");
    }
    lines
        .iter()
        .map(|line| {
            let cut = line
                .char_indices()
                .nth(min_indent)
                .map(|(idx, _)| idx)
                .unwrap_or(line.len());
            &line[cut..]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefixes every non-empty line with two spaces.
pub fn indent_string(text: &str) -> String {
    split_lines(text)
        .iter()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
