//! Terraform HCL

use super::{Dialect, DialectKind, Form, Opener, split_empty_delimited};
use crate::rules::RequiredTag;
use crate::scanner::{self, Delimiters};
use regex::Regex;
use std::sync::LazyLock;

static RESOURCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<indent>[ \t]*)resource[ \t]+"?(?P<type>[A-Za-z0-9_-]+)"?[ \t]+"?(?P<name>[A-Za-z0-9_-]+)"?[ \t]*\{(?P<rest>.*)$"#,
    )
    .expect("Invalid resource regex")
});

static TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<indent>[ \t]*)tags[ \t]*=(?P<rest>.*)$").expect("Invalid tags regex")
});

static ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[ \t]*(?:"(?P<quoted>[^"]+)"|(?P<bare>[A-Za-z_][A-Za-z0-9_.:/-]*))[ \t]*="#)
        .expect("Invalid entry regex")
});

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("Invalid identifier regex"));

const DELIMITERS: Delimiters = Delimiters {
    open: &['{', '[', '('],
    close: &['}', ']', ')'],
    comments: &["#", "//"],
};

/// Brace-delimited Terraform configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct HclDialect;

/// The part of a line before any comment outside a string.
fn code(line: &str) -> &str {
    let mut in_string = false;
    let mut escaped = false;
    for (pos, ch) in line.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        if ch == '"' {
            in_string = true;
        } else if ch == '#' || line[pos..].starts_with("//") {
            return line[..pos].trim_end();
        }
    }
    line.trim_end()
}

fn quoted(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace("${", "$${")
        .replace("%{", "%%{");
    format!("\"{escaped}\"")
}

impl Dialect for HclDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Hcl
    }

    fn delimiters(&self) -> Option<Delimiters> {
        Some(DELIMITERS)
    }

    fn is_trivia(&self, line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//")
    }

    fn match_resource(&self, line: &str) -> Option<Opener> {
        let caps = RESOURCE.captures(line)?;
        let rest = code(&caps["rest"]).trim();
        let form = match rest {
            "" => Form::Open,
            "}" => Form::EmptyInline,
            _ => Form::Other,
        };
        Some(Opener {
            indent: caps["indent"].to_string(),
            form,
            declared_type: Some(caps["type"].to_string()),
        })
    }

    fn match_type(&self, _line: &str) -> Option<String> {
        None
    }

    fn match_tags(&self, line: &str) -> Option<Opener> {
        let caps = TAGS.captures(line)?;
        let rest = code(&caps["rest"]).trim();
        let form = if rest == "{" {
            Form::Open
        } else if rest.starts_with('{') && rest.ends_with('}') && rest[1..rest.len() - 1].trim().is_empty() {
            Form::EmptyInline
        } else {
            Form::Other
        };
        Some(Opener::new(&caps["indent"], form))
    }

    fn entry_keys(&self, line: &str) -> Vec<String> {
        ENTRY
            .captures(line)
            .and_then(|caps| caps.name("quoted").or_else(|| caps.name("bare")))
            .map(|key| vec![key.as_str().to_string()])
            .unwrap_or_default()
    }

    fn sniff_entry_indent(&self, body: &[String]) -> Option<String> {
        body.iter()
            .filter(|line| !self.is_trivia(line))
            .find(|line| !self.entry_keys(line).is_empty())
            .map(|line| scanner::indent_of(line).to_string())
    }

    fn render_entry(&self, indent: &str, _unit: &str, tag: &RequiredTag) -> Vec<String> {
        let key = if IDENTIFIER.is_match(&tag.key) {
            tag.key.clone()
        } else {
            quoted(&tag.key)
        };
        vec![format!("{indent}{key} = {}", quoted(&tag.value))]
    }

    fn render_collection_open(&self, indent: &str) -> String {
        format!("{indent}tags = {{")
    }

    fn render_collection_close(&self, indent: &str, _followed: bool) -> Option<String> {
        Some(format!("{indent}}}"))
    }

    fn expand_inline(&self, line: &str) -> Option<(String, Option<String>)> {
        let code = code(line);
        let (opener, closer) = split_empty_delimited(code)?;
        let comment = line[code.len()..].trim();
        let opener = if comment.is_empty() { opener } else { format!("{opener} {comment}") };
        Some((opener, closer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(r#"resource "aws_s3_bucket" "logs" {"#, Some(("aws_s3_bucket", Form::Open)))]
    #[case(r#"resource "aws_s3_bucket" "logs" {  # keep"#, Some(("aws_s3_bucket", Form::Open)))]
    #[case(r#"resource "aws_db_instance" "main" {}"#, Some(("aws_db_instance", Form::EmptyInline)))]
    #[case(r#"data "aws_s3_bucket" "logs" {"#, None)]
    fn recognises_resource_openers(#[case] line: &str, #[case] expected: Option<(&str, Form)>) {
        let found = HclDialect.match_resource(line);
        assert_eq!(
            found.as_ref().map(|o| (o.declared_type.as_deref().unwrap_or_default(), o.form)),
            expected
        );
    }

    #[rstest]
    #[case("  tags = {", Some(Form::Open))]
    #[case("  tags = { # required", Some(Form::Open))]
    #[case("  tags = {}", Some(Form::EmptyInline))]
    #[case("  tags = merge(local.tags, {", Some(Form::Other))]
    #[case("  tags = var.tags", Some(Form::Other))]
    #[case("  tags_all = {", None)]
    fn recognises_tag_members(#[case] line: &str, #[case] form: Option<Form>) {
        assert_eq!(HclDialect.match_tags(line).map(|o| o.form), form);
    }

    #[rstest]
    #[case("    Name = \"x\"", vec!["Name"])]
    #[case("    \"cost-center\" = \"42\"", vec!["cost-center"])]
    #[case("    # data_category = \"x\"", vec![])]
    #[case("  }", vec![])]
    fn extracts_entry_keys(#[case] line: &str, #[case] keys: Vec<&str>) {
        assert_eq!(HclDialect.entry_keys(line), keys);
    }

    #[rstest]
    #[case("  tags = {}", "  tags = {")]
    #[case("  tags = {} # owned by platform", "  tags = { # owned by platform")]
    #[case("  tags = {} // keep", "  tags = { // keep")]
    fn expansion_keeps_trailing_comment(#[case] line: &str, #[case] opener: &str) {
        let (open, close) = HclDialect.expand_inline(line).unwrap();
        assert_eq!(open, opener);
        assert_eq!(close.as_deref(), Some("  }"));
    }

    #[test]
    fn quoting_escapes_template_sequences() {
        let tag = RequiredTag::new("data_category", r#"${var.x} %{if} "q" \"#);
        assert_eq!(
            HclDialect.render_entry("    ", "  ", &tag),
            vec![r#"    data_category = "$${var.x} %%{if} \"q\" \\""#]
        );
    }

    #[test]
    fn quotes_non_identifier_keys() {
        let tag = RequiredTag::new("aws:owner", "me");
        assert_eq!(HclDialect.render_entry("", "", &tag), vec![r#""aws:owner" = "me""#]);
    }
}
