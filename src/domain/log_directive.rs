//! `{{#IF_LOG_DIR}} ... {{/IF_LOG_DIR}}` conditional sections.
//!
//! Markers must pair up. An unmatched, nested or stray marker is rejected
//! instead of silently swallowing the rest of a block.

use super::AppError;
use super::blocks::is_section_boundary;
use super::settings::join_path;
use super::site::AppType;

pub const OPEN_MARKER: &str = "{{#IF_LOG_DIR}}";
pub const CLOSE_MARKER: &str = "{{/IF_LOG_DIR}}";

/// Log directory a site is expected to write to.
pub fn expected_log_dir(app_type: AppType, document_root: &str, folder: &str) -> String {
    let site_root = join_path(document_root, folder);
    match app_type {
        AppType::Laravel | AppType::React => join_path(&site_root, "storage/logs"),
        AppType::WordPress | AppType::Static | AppType::Default => join_path(&site_root, "logs"),
    }
}

/// Keep (`exists`) or drop the conditional sections of a rendered block.
///
/// Markers are always removed. A line left holding only whitespace after
/// marker removal is dropped entirely.
pub fn apply_log_directive(text: &str, exists: bool) -> Result<String, AppError> {
    let mut out = String::with_capacity(text.len());
    let mut open_at: Option<usize> = None;

    for (index, raw_line) in text.split_inclusive('\n').enumerate() {
        let line_no = index + 1;
        let (body, terminator) = split_terminator(raw_line);
        let mut kept = String::new();
        let mut saw_marker = false;

        for piece in pieces(body) {
            match piece {
                Piece::Open => {
                    if open_at.is_some() {
                        return Err(unbalanced(line_no, OPEN_MARKER));
                    }
                    open_at = Some(line_no);
                    saw_marker = true;
                }
                Piece::Close => {
                    if open_at.take().is_none() {
                        return Err(unbalanced(line_no, CLOSE_MARKER));
                    }
                    saw_marker = true;
                }
                Piece::Text(fragment) => {
                    if open_at.is_none() || exists {
                        kept.push_str(fragment);
                    }
                }
            }
        }

        let dropped_inside = !saw_marker && open_at.is_some() && !exists;
        let marker_only = saw_marker && kept.trim().is_empty();
        if dropped_inside || marker_only {
            continue;
        }
        out.push_str(&kept);
        out.push_str(terminator);
    }

    match open_at {
        Some(line) => Err(unbalanced(line, OPEN_MARKER)),
        None => Ok(out),
    }
}

/// Check marker pairing across a whole blocks template.
///
/// A section boundary reached while a marker is open counts as unbalanced.
pub fn validate_markers(text: &str) -> Result<(), AppError> {
    let mut open_at: Option<usize> = None;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        if is_section_boundary(line)
            && let Some(open_line) = open_at
        {
            return Err(unbalanced(open_line, OPEN_MARKER));
        }
        for piece in pieces(line) {
            match piece {
                Piece::Open if open_at.is_some() => return Err(unbalanced(line_no, OPEN_MARKER)),
                Piece::Open => open_at = Some(line_no),
                Piece::Close if open_at.is_none() => {
                    return Err(unbalanced(line_no, CLOSE_MARKER));
                }
                Piece::Close => open_at = None,
                Piece::Text(_) => {}
            }
        }
    }

    match open_at {
        Some(line) => Err(unbalanced(line, OPEN_MARKER)),
        None => Ok(()),
    }
}

enum Piece<'a> {
    Text(&'a str),
    Open,
    Close,
}

fn pieces(line: &str) -> Vec<Piece<'_>> {
    let mut out = Vec::new();
    let mut rest = line;
    loop {
        let open = rest.find(OPEN_MARKER);
        let close = rest.find(CLOSE_MARKER);
        let (at, piece, len) = match (open, close) {
            (Some(o), Some(c)) if c < o => (c, Piece::Close, CLOSE_MARKER.len()),
            (Some(o), _) => (o, Piece::Open, OPEN_MARKER.len()),
            (None, Some(c)) => (c, Piece::Close, CLOSE_MARKER.len()),
            (None, None) => break,
        };
        if at > 0 {
            out.push(Piece::Text(&rest[..at]));
        }
        out.push(piece);
        rest = &rest[at + len..];
    }
    if !rest.is_empty() {
        out.push(Piece::Text(rest));
    }
    out
}

fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

fn unbalanced(line: usize, marker: &str) -> AppError {
    AppError::UnbalancedMarker { line, marker: marker.to_string() }
}
