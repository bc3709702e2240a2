//! Section extraction from the composite vhosts blocks template.
//!
//! The blocks template is a flat textual macro format: a section starts at a
//! line containing `## App:<Label> HTTPS:<true|false>` and runs until the next
//! line starting with `##`. All marker handling lives here.

use super::site::AppType;

/// Marker line that opens the section for `label` and `https`.
pub fn block_marker(label: &str, https: bool) -> String {
    format!("## App:{} HTTPS:{}", label, https)
}

/// Lines of the section for `app_type`/`https`, each newline-terminated.
///
/// Returns an empty string when no section carries the marker.
pub fn extract_block(composite: &str, app_type: AppType, https: bool) -> String {
    extract_labeled_block(composite, app_type.label(), https)
}

pub fn extract_labeled_block(composite: &str, label: &str, https: bool) -> String {
    let marker = block_marker(label, https);
    let mut block = String::new();
    let mut inside = false;

    for line in composite.lines() {
        if inside {
            if is_section_boundary(line) {
                break;
            }
            block.push_str(line);
            block.push('\n');
        } else if line.contains(&marker) {
            inside = true;
        }
    }

    block
}

/// A line opening a new section: `##` in column 0. Indented `##` is block content.
pub(crate) fn is_section_boundary(line: &str) -> bool {
    line.starts_with("##")
}
