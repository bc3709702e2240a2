//! `{{NAME}}` placeholder substitution.
//!
//! Rendering is best effort: a token with no value is left in the output
//! verbatim and reported, so one missing variable never blocks the rest of a
//! working config.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Deserialize;

/// Placeholder name to value.
pub type Substitutions = BTreeMap<String, String>;

pub const VHOSTS_ENTRIES: &str = "VHOSTS_ENTRIES";
pub const GENERATED_DATE: &str = "GENERATED_DATE";
pub const TIMESTAMP: &str = "TIMESTAMP";

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const HOSTS_ADDRESS: &str = "127.0.0.1";
const NO_HOSTS_LINE: &str = "# No virtual hosts configured";

/// Selects special-case substitution behavior for a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Standard,
    Hosts,
}

/// One template file read for this build.
#[derive(Debug, Clone)]
pub struct TemplateDocument {
    pub source: String,
    pub output: String,
    pub kind: TemplateKind,
    pub text: String,
}

/// Rendered text plus the distinct placeholder names that had no value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub unresolved: Vec<String>,
}

impl Rendered {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Values the engine synthesizes for hosts-kind templates.
#[derive(Debug, Clone)]
pub struct HostsContext<'a> {
    pub server_names: &'a [String],
    pub generated_at: NaiveDateTime,
}

/// Substitute every `{{NAME}}` token found in `vars`.
pub fn render(template: &str, vars: &Substitutions) -> Rendered {
    let mut text = String::with_capacity(template.len());
    let mut unresolved: Vec<String> = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        text.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        match token_name(after_open) {
            Some(name) => {
                let token_len = name.len() + 4;
                match vars.get(name) {
                    Some(value) => text.push_str(value),
                    None => {
                        text.push_str(&rest[start..start + token_len]);
                        if !unresolved.iter().any(|u| u == name) {
                            unresolved.push(name.to_string());
                        }
                    }
                }
                rest = &rest[start + token_len..];
            }
            None => {
                // Not a token; emit one brace and rescan so `{{{NAME}}` still matches.
                text.push('{');
                rest = &rest[start + 1..];
            }
        }
    }
    text.push_str(rest);

    Rendered { text, unresolved }
}

/// Render a template document. Caller entries take precedence; hosts-kind
/// documents additionally receive the host lines and generation timestamp.
pub fn render_document(
    document: &TemplateDocument,
    vars: &Substitutions,
    hosts: &HostsContext<'_>,
) -> Rendered {
    match document.kind {
        TemplateKind::Standard => render(&document.text, vars),
        TemplateKind::Hosts => {
            let mut merged = vars.clone();
            let stamp = hosts.generated_at.format(TIMESTAMP_FORMAT).to_string();
            merged.entry(VHOSTS_ENTRIES.into()).or_insert_with(|| hosts_entries(hosts.server_names));
            merged.entry(GENERATED_DATE.into()).or_insert_with(|| stamp.clone());
            merged.entry(TIMESTAMP.into()).or_insert(stamp);
            render(&document.text, &merged)
        }
    }
}

/// One `127.0.0.1<TAB>name` line per distinct server name.
pub fn hosts_entries(server_names: &[String]) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for name in server_names {
        if !seen.contains(&name.as_str()) {
            seen.push(name);
        }
    }
    if seen.is_empty() {
        return NO_HOSTS_LINE.to_string();
    }
    seen.iter().map(|name| format!("{}\t{}", HOSTS_ADDRESS, name)).collect::<Vec<_>>().join("\n")
}

fn token_name(after_open: &str) -> Option<&str> {
    let end = after_open.find("}}")?;
    let name = &after_open[..end];
    if !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        Some(name)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn vars(pairs: &[(&str, &str)]) -> Substitutions {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(9, 30, 0).unwrap()
    }

    #[test]
    fn substitutes_known_tokens() {
        let out = render("Listen {{PORT}}\nServerRoot \"{{ROOT}}\"", &vars(&[("PORT", "8080"), ("ROOT", "C:/xampp")]));
        assert_eq!(out.text, "Listen 8080\nServerRoot \"C:/xampp\"");
        assert!(out.is_complete());
    }

    #[test]
    fn unresolved_tokens_are_kept_and_reported_once() {
        let out = render("{{A}} {{MISSING}} {{MISSING}} {{B}}", &vars(&[("A", "1")]));
        assert_eq!(out.text, "1 {{MISSING}} {{MISSING}} {{B}}");
        assert_eq!(out.unresolved, vec!["MISSING".to_string(), "B".to_string()]);
    }

    #[test]
    fn tokens_are_case_sensitive() {
        let out = render("{{port}}", &vars(&[("PORT", "80")]));
        assert_eq!(out.text, "{{port}}");
        assert_eq!(out.unresolved, vec!["port".to_string()]);
    }

    #[test]
    fn conditional_markers_and_stray_braces_are_literal() {
        let text = "{{#IF_LOG_DIR}}x{{/IF_LOG_DIR}} {{ spaced }} {{ {open";
        let out = render(text, &Substitutions::new());
        assert_eq!(out.text, text);
        assert!(out.unresolved.is_empty());
    }

    #[test]
    fn triple_brace_still_matches_inner_token() {
        let out = render("{{{A}}}", &vars(&[("A", "x")]));
        assert_eq!(out.text, "{x}");
    }

    #[test]
    fn values_are_not_rescanned() {
        let out = render("{{A}}", &vars(&[("A", "{{B}}"), ("B", "nope")]));
        assert_eq!(out.text, "{{B}}");
        assert!(out.is_complete());
    }

    #[test]
    fn hosts_document_gets_entries_and_timestamp() {
        let doc = TemplateDocument {
            source: "hosts.tpl".into(),
            output: "hosts".into(),
            kind: TemplateKind::Hosts,
            text: "# {{GENERATED_DATE}}\n127.0.0.1 localhost\n{{VHOSTS_ENTRIES}}\n".into(),
        };
        let names = vec!["blog.local".to_string(), "shop.local".to_string(), "blog.local".to_string()];
        let hosts = HostsContext { server_names: &names, generated_at: fixed_time() };

        let out = render_document(&doc, &Substitutions::new(), &hosts);
        assert_eq!(
            out.text,
            "# 2024-05-01 09:30:00\n127.0.0.1 localhost\n127.0.0.1\tblog.local\n127.0.0.1\tshop.local\n"
        );
    }

    #[test]
    fn hosts_document_without_sites_gets_placeholder_line() {
        let doc = TemplateDocument {
            source: "hosts.tpl".into(),
            output: "hosts".into(),
            kind: TemplateKind::Hosts,
            text: "{{VHOSTS_ENTRIES}}".into(),
        };
        let hosts = HostsContext { server_names: &[], generated_at: fixed_time() };
        let out = render_document(&doc, &Substitutions::new(), &hosts);
        assert_eq!(out.text, "# No virtual hosts configured");
    }

    #[test]
    fn explicit_values_win_over_synthesized_ones() {
        let doc = TemplateDocument {
            source: "hosts.tpl".into(),
            output: "hosts".into(),
            kind: TemplateKind::Hosts,
            text: "{{TIMESTAMP}}".into(),
        };
        let hosts = HostsContext { server_names: &[], generated_at: fixed_time() };
        let out = render_document(&doc, &vars(&[("TIMESTAMP", "frozen")]), &hosts);
        assert_eq!(out.text, "frozen");
    }

    #[test]
    fn standard_document_gets_no_synthesized_values() {
        let doc = TemplateDocument {
            source: "php.ini.tpl".into(),
            output: "php.ini".into(),
            kind: TemplateKind::Standard,
            text: "; {{GENERATED_DATE}}".into(),
        };
        let hosts = HostsContext { server_names: &[], generated_at: fixed_time() };
        let out = render_document(&doc, &Substitutions::new(), &hosts);
        assert_eq!(out.unresolved, vec![GENERATED_DATE.to_string()]);
    }

    fn token_name_strategy() -> impl Strategy<Value = String> {
        "[A-Z_][A-Z0-9_]{0,8}"
    }

    proptest! {
        #[test]
        fn fully_covered_templates_leave_no_tokens(
            names in prop::collection::vec(token_name_strategy(), 1..6),
            filler in "[a-z \n]{0,12}",
        ) {
            let template: String = names.iter().map(|n| format!("{}{{{{{}}}}}", filler, n)).collect();
            let vars: Substitutions = names.iter().map(|n| (n.clone(), "v".to_string())).collect();
            let out = render(&template, &vars);
            prop_assert!(!out.text.contains("{{"));
            prop_assert!(out.unresolved.is_empty());
        }

        #[test]
        fn missing_token_survives_verbatim(name in token_name_strategy(), prefix in "[a-z ]{0,10}") {
            let template = format!("{}{{{{{}}}}}", prefix, name);
            let out = render(&template, &Substitutions::new());
            prop_assert_eq!(&out.text, &template);
            prop_assert_eq!(out.unresolved, vec![name]);
        }

        #[test]
        fn rendering_is_idempotent(template in "[a-zA-Z{} \n_]{0,40}") {
            let vars: Substitutions = [("A".to_string(), "1".to_string())].into_iter().collect();
            prop_assert_eq!(render(&template, &vars), render(&template, &vars));
        }
    }
}
