// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! POSIX path arithmetic on output-relative strings
//!
//! Chunk file names and the paths baked into generated code are always
//! `/`-separated, whatever platform the build runs on, so these helpers work on
//! strings rather than [`std::path::Path`].

/// Convert Windows separators to `/`
pub fn slash(path: &str) -> String {
    path.replace('\\', "/")
}

/// Normalize a path the way `path.posix.normalize` does, after converting
/// backslashes.
///
/// `.` segments and duplicate separators are dropped, `..` segments are folded,
/// and a trailing separator is kept.
pub fn normalize(path: &str) -> String {
    let path = slash(path);
    if path.is_empty() {
        return ".".to_string();
    }

    let is_absolute = path.starts_with('/');
    let trailing = path.ends_with('/');
    let mut components: Vec<&str> = Vec::new();

    for component in path.split('/') {
        match component {
            "" | "." => continue,
            ".." => {
                if !components.is_empty() && components.last() != Some(&"..") {
                    components.pop();
                } else if !is_absolute {
                    components.push("..");
                }
            }
            c => components.push(c),
        }
    }

    let mut result = components.join("/");
    if result.is_empty() {
        if is_absolute {
            return "/".to_string();
        }
        result.push('.');
    }
    if trailing {
        result.push('/');
    }
    if is_absolute {
        format!("/{}", result)
    } else {
        result
    }
}

/// Join segments and normalize the result
pub fn join(paths: &[&str]) -> String {
    let joined = paths
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");
    normalize(&joined)
}

/// Compute the relative path from `from` to `to`.
///
/// Both inputs are normalized first. When exactly one of them is absolute the
/// relative one is anchored at the current working directory, as
/// `path.relative` does.
pub fn relative(from: &str, to: &str) -> String {
    let (from, to) = match (is_absolute(from), is_absolute(to)) {
        (true, false) => (normalize(from), absolutize(to)),
        (false, true) => (absolutize(from), normalize(to)),
        _ => (normalize(from), normalize(to)),
    };

    let from_components = segments(&from);
    let to_components = segments(&to);

    let common_len = from_components
        .iter()
        .zip(to_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result: Vec<&str> = Vec::new();
    for _ in common_len..from_components.len() {
        result.push("..");
    }
    result.extend(to_components.iter().skip(common_len));

    if result.is_empty() {
        String::new()
    } else {
        result.join("/")
    }
}

/// Strip a single leading `./`
pub fn strip_dot_slash(path: &str) -> &str {
    path.strip_prefix("./").unwrap_or(path)
}

/// Whether a path is absolute in POSIX terms
pub fn is_absolute(path: &str) -> bool {
    slash(path).starts_with('/')
}

fn absolutize(path: &str) -> String {
    let cwd = std::env::current_dir().unwrap_or_default();
    join(&[&slash(&cwd.to_string_lossy()), path])
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}
