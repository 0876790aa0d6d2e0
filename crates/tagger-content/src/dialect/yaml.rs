//! CloudFormation YAML

use super::{Dialect, DialectKind, Form, Opener};
use crate::rules::RequiredTag;
use crate::scanner::Delimiters;
use regex::Regex;
use std::sync::LazyLock;

fn member(name: &str) -> Regex {
    Regex::new(&format!(
        r#"^(?P<indent>[ \t]*)["']?{name}["']?[ \t]*:(?P<rest>.*)$"#
    ))
    .expect("Invalid YAML member regex")
}

static PROPERTIES: LazyLock<Regex> = LazyLock::new(|| member("Properties"));
static TAGS: LazyLock<Regex> = LazyLock::new(|| member("Tags"));
static REPLICAS: LazyLock<Regex> = LazyLock::new(|| member("Replicas"));
static TYPE: LazyLock<Regex> = LazyLock::new(|| member("Type"));

static EMPTY_FLOW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\[[ \t]*\]|\{[ \t]*\})$").expect("Invalid flow regex"));

static ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<indent>[ \t]*)-(?:[ \t]|$)").expect("Invalid item regex"));

static ITEM_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<indent>[ \t]*)-(?P<gap>[ \t]+)(?P<rest>[^ \t-].*)$").expect("Invalid item header regex")
});

static KEY_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?P<indent>[ \t]*)(?:-[ \t]*)?["']?Key["']?[ \t]*:(?P<value>.*)$"#)
        .expect("Invalid key entry regex")
});

static DASH_KEY_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?P<indent>[ \t]*)-[ \t]*["']?Key["']?[ \t]*:"#).expect("Invalid dash key regex")
});

static EXPANDABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<head>.*?:)[ \t]*(?:\[[ \t]*\]|\{[ \t]*\})[ \t]*(?P<comment>#.*)?$")
        .expect("Invalid expandable regex")
});

static PLAIN_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_./-]*$").expect("Invalid plain key regex"));

/// Indentation-structured YAML templates
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlDialect;

/// Value text with any trailing comment removed.
fn strip_comment(value: &str) -> &str {
    let value = value.trim();
    if value.starts_with('#') {
        return "";
    }
    match value.find(" #").or_else(|| value.find("\t#")) {
        Some(pos) => value[..pos].trim_end(),
        None => value,
    }
}

/// Scalar text with surrounding quotes or a trailing comment removed.
fn scalar(value: &str) -> String {
    let value = value.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote).and_then(|rest| rest.split_once(quote)) {
            return inner.0.to_string();
        }
    }
    strip_comment(value).to_string()
}

fn form_of(rest: &str) -> Form {
    let value = strip_comment(rest);
    if value.is_empty() {
        Form::Open
    } else if EMPTY_FLOW.is_match(value) {
        Form::EmptyInline
    } else {
        Form::Other
    }
}

fn member_opener(re: &Regex, line: &str) -> Option<Opener> {
    let caps = re.captures(line)?;
    Some(Opener::new(&caps["indent"], form_of(&caps["rest"])))
}

fn double_quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

impl Dialect for YamlDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Yaml
    }

    fn delimiters(&self) -> Option<Delimiters> {
        None
    }

    fn is_trivia(&self, line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with('#')
    }

    fn match_resource(&self, line: &str) -> Option<Opener> {
        member_opener(&PROPERTIES, line)
    }

    fn match_type(&self, line: &str) -> Option<String> {
        let caps = TYPE.captures(line)?;
        let value = scalar(&caps["rest"]);
        (!value.is_empty()).then_some(value)
    }

    fn match_tags(&self, line: &str) -> Option<Opener> {
        member_opener(&TAGS, line)
    }

    fn match_replicas(&self, line: &str) -> Option<Opener> {
        member_opener(&REPLICAS, line)
    }

    fn match_item(&self, line: &str) -> Option<usize> {
        let caps = ITEM.captures(line)?;
        let content = line[caps.get(0)?.end()..].trim_start();
        // flow collections close on the marker line
        (!content.starts_with(['{', '['])).then(|| caps["indent"].len())
    }

    fn item_header(&self, line: &str) -> Option<String> {
        let caps = ITEM_HEADER.captures(line)?;
        Some(format!("{} {}{}", &caps["indent"], &caps["gap"], &caps["rest"]))
    }

    fn entry_keys(&self, line: &str) -> Vec<String> {
        KEY_ENTRY
            .captures(line)
            .map(|caps| scalar(&caps["value"]))
            .filter(|key| !key.is_empty())
            .into_iter()
            .collect()
    }

    fn sniff_entry_indent(&self, body: &[String]) -> Option<String> {
        body.iter()
            .find_map(|line| DASH_KEY_ENTRY.captures(line))
            .or_else(|| body.iter().find_map(|line| ITEM.captures(line)))
            .map(|caps| caps["indent"].to_string())
    }

    fn render_entry(&self, indent: &str, _unit: &str, tag: &RequiredTag) -> Vec<String> {
        let key = if PLAIN_KEY.is_match(&tag.key) {
            tag.key.clone()
        } else {
            double_quoted(&tag.key)
        };
        vec![
            format!("{indent}- Key: {key}"),
            format!("{indent}  Value: {}", double_quoted(&tag.value)),
        ]
    }

    fn render_collection_open(&self, indent: &str) -> String {
        format!("{indent}Tags:")
    }

    fn render_collection_close(&self, _indent: &str, _followed: bool) -> Option<String> {
        None
    }

    fn expand_inline(&self, line: &str) -> Option<(String, Option<String>)> {
        let caps = EXPANDABLE.captures(line)?;
        let opener = match caps.name("comment") {
            Some(comment) => format!("{} {}", &caps["head"], comment.as_str()),
            None => caps["head"].to_string(),
        };
        Some((opener, None))
    }
}
