use std::borrow::Cow;

use once_cell::sync::Lazy;
use owo_colors::OwoColorize;
use regex::{Captures, Regex};

use crate::models::FormatKind;

static JSON_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?P<key>"(?:[^"\\]|\\.)*")(?P<colon>\s*:)|(?P<string>"(?:[^"\\]|\\.)*")|(?P<literal>-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?|\btrue\b|\bfalse\b|\bnull\b)|(?P<punct>[{}\[\]])"#,
    )
    .expect("valid json token regex")
});
static XML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid xml tag regex"));
static XML_ATTR_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""[^"]*"|'[^']*'"#).expect("valid xml attribute regex"));
static YAML_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<indent>\s*(?:- )?)(?P<key>[^\s:#][^:#]*?):(?P<rest>\s.*)?$")
        .expect("valid yaml key regex")
});
static YAML_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<dash>\s*- )(?P<item>.+)$").expect("valid yaml item regex"));
static ANSI_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid ansi escape regex"));

pub fn highlight(text: &str, kind: FormatKind) -> String {
    match kind {
        FormatKind::Json => highlight_json(text),
        FormatKind::Xml => highlight_xml(text),
        FormatKind::Yaml => highlight_yaml(text),
        FormatKind::Text => text.to_string(),
    }
}

pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(text, "")
}

fn highlight_json(text: &str) -> String {
    JSON_TOKEN
        .replace_all(text, |caps: &Captures<'_>| {
            if let (Some(key), Some(colon)) = (caps.name("key"), caps.name("colon")) {
                format!("{}{}", key.as_str().blue(), colon.as_str())
            } else if let Some(value) = caps.name("string").or_else(|| caps.name("literal")) {
                value.as_str().green().to_string()
            } else if let Some(punct) = caps.name("punct") {
                punct.as_str().yellow().to_string()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

fn highlight_xml(text: &str) -> String {
    XML_TAG
        .replace_all(text, |caps: &Captures<'_>| style_tag(&caps[0]))
        .into_owned()
}

fn style_tag(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len() * 2);
    let mut last = 0;
    for value in XML_ATTR_VALUE.find_iter(tag) {
        push_blue(&mut out, &tag[last..value.start()]);
        out.push_str(&value.as_str().green().to_string());
        last = value.end();
    }
    push_blue(&mut out, &tag[last..]);
    out
}

fn push_blue(out: &mut String, segment: &str) {
    if !segment.is_empty() {
        out.push_str(&segment.blue().to_string());
    }
}

fn highlight_yaml(text: &str) -> String {
    text.split('\n')
        .map(highlight_yaml_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn highlight_yaml_line(line: &str) -> String {
    if let Some(caps) = YAML_KEY.captures(line) {
        let key = &caps["key"];
        let mut out = format!("{}{}:", &caps["indent"], key.blue());
        if let Some(rest) = caps.name("rest") {
            let rest = rest.as_str();
            let value = rest.trim_start();
            out.push_str(&rest[..rest.len() - value.len()]);
            if !value.is_empty() {
                out.push_str(&value.green().to_string());
            }
        }
        return out;
    }

    if let Some(caps) = YAML_ITEM.captures(line) {
        let item = &caps["item"];
        return format!("{}{}", &caps["dash"], item.green());
    }

    line.to_string()
}
