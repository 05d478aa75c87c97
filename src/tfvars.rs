//! Scoped edits to the operator's `terraform.tfvars` file.
//!
//! Only the assignment line for one key is touched; every other byte of the
//! file is written back unchanged.

use std::io;
use std::path::Path;

use regex::Regex;

use crate::error::Result;

/// Comment written above a flag appended to the end of the file.
pub const FEATURE_SECTION: &str = "# Feature Configuration";

/// Render a boolean flag assignment (`key = true`).
pub fn flag_line(key: &str, value: bool) -> String {
    format!("{} = {}", key, value)
}

fn assignment_pattern(key: &str) -> Regex {
    let pattern = format!(r"(?m)^([ \t]*){}[ \t]*=(?:[ \t]*[^\s#]+)?", regex::escape(key));
    Regex::new(&pattern).expect("Invalid regex pattern")
}

/// Set `key = value` in `content`.
///
/// Existing assignments of `key` are rewritten in place, keeping their
/// indentation and any trailing comment. If there is none, the assignment is
/// appended at the end, preceded by `section` as a comment line.
pub fn patch_flag(content: &str, key: &str, value: bool, section: Option<&str>) -> String {
    let line = flag_line(key, value);
    let pattern = assignment_pattern(key);

    if pattern.is_match(content) {
        return pattern
            .replace_all(content, |caps: &regex::Captures<'_>| {
                format!("{}{}", &caps[1], line)
            })
            .into_owned();
    }

    let mut patched = content.to_string();
    if !patched.is_empty() {
        if !patched.ends_with('\n') {
            patched.push('\n');
        }
        patched.push('\n');
    }
    if let Some(section) = section {
        patched.push_str(section);
        patched.push('\n');
    }
    patched.push_str(&line);
    patched.push('\n');
    patched
}

/// Read `path`, set the flag and write the whole file back.
///
/// A missing file is treated as empty. Missing parent directories are not
/// created; that comes back as an I/O error.
pub fn set_flag(path: &Path, key: &str, value: bool, section: Option<&str>) -> Result<()> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    let patched = patch_flag(&content, key, value, section);
    std::fs::write(path, patched)?;

    tracing::info!(path = %path.display(), key, value, "updated flag");
    Ok(())
}
