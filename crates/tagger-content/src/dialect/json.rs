//! CloudFormation JSON

use super::{Dialect, DialectKind, Form, Opener, split_empty_delimited};
use crate::rules::RequiredTag;
use crate::scanner::Delimiters;
use regex::Regex;
use std::sync::LazyLock;

fn member(name: &str) -> Regex {
    Regex::new(&format!(
        r#"^(?P<indent>[ \t]*)"{name}"[ \t]*:[ \t]*(?P<rest>.*?)[ \t]*$"#
    ))
    .expect("Invalid JSON member regex")
}

static PROPERTIES: LazyLock<Regex> = LazyLock::new(|| member("Properties"));
static TAGS: LazyLock<Regex> = LazyLock::new(|| member("Tags"));
static REPLICAS: LazyLock<Regex> = LazyLock::new(|| member("Replicas"));

static TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[ \t]*"Type"[ \t]*:[ \t]*"(?P<value>[^"]+)"[ \t]*,?[ \t]*$"#).expect("Invalid JSON type regex")
});

static EMPTY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\{[ \t]*\}|\[[ \t]*\])[ \t]*,?$").expect("Invalid empty value regex"));

static OBJECT_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<indent>[ \t]*)\{").expect("Invalid object start regex"));

static KEY_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""Key"[ \t]*:[ \t]*"(?P<key>(?:[^"\\]|\\.)*)""#).expect("Invalid JSON key regex")
});

const DELIMITERS: Delimiters = Delimiters {
    open: &['{', '['],
    close: &['}', ']'],
    comments: &[],
};

/// Bracket-delimited JSON templates
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDialect;

fn member_opener(re: &Regex, line: &str, container: &str) -> Option<Opener> {
    let caps = re.captures(line)?;
    let rest = &caps["rest"];
    let form = if rest == container {
        Form::Open
    } else if EMPTY_VALUE.is_match(rest) {
        Form::EmptyInline
    } else {
        Form::Other
    };
    Some(Opener::new(&caps["indent"], form))
}

fn quoted(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

fn unescape(raw: &str) -> String {
    serde_json::from_str(&format!("\"{raw}\"")).unwrap_or_else(|_| raw.to_string())
}

impl Dialect for JsonDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Json
    }

    fn delimiters(&self) -> Option<Delimiters> {
        Some(DELIMITERS)
    }

    fn is_trivia(&self, line: &str) -> bool {
        line.trim().is_empty()
    }

    fn match_resource(&self, line: &str) -> Option<Opener> {
        member_opener(&PROPERTIES, line, "{")
    }

    fn match_type(&self, line: &str) -> Option<String> {
        TYPE.captures(line).map(|caps| caps["value"].to_string())
    }

    fn match_tags(&self, line: &str) -> Option<Opener> {
        member_opener(&TAGS, line, "[")
    }

    fn match_replicas(&self, line: &str) -> Option<Opener> {
        member_opener(&REPLICAS, line, "[")
    }

    fn match_item(&self, line: &str) -> Option<usize> {
        OBJECT_START.captures(line).map(|caps| caps["indent"].len())
    }

    fn entry_keys(&self, line: &str) -> Vec<String> {
        KEY_ENTRY
            .captures_iter(line)
            .map(|caps| unescape(&caps["key"]))
            .collect()
    }

    fn sniff_entry_indent(&self, body: &[String]) -> Option<String> {
        body.iter()
            .find_map(|line| OBJECT_START.captures(line))
            .map(|caps| caps["indent"].to_string())
    }

    fn render_entry(&self, indent: &str, unit: &str, tag: &RequiredTag) -> Vec<String> {
        vec![
            format!("{indent}{{"),
            format!("{indent}{unit}\"Key\": {},", quoted(&tag.key)),
            format!("{indent}{unit}\"Value\": {}", quoted(&tag.value)),
            format!("{indent}}}"),
        ]
    }

    fn render_collection_open(&self, indent: &str) -> String {
        format!("{indent}\"Tags\": [")
    }

    fn render_collection_close(&self, indent: &str, followed: bool) -> Option<String> {
        Some(format!("{indent}]{}", if followed { "," } else { "" }))
    }

    fn entry_separator(&self) -> Option<&'static str> {
        Some(",")
    }

    fn expand_inline(&self, line: &str) -> Option<(String, Option<String>)> {
        split_empty_delimited(line)
    }
}
