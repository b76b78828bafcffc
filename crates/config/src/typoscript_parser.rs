//! TypoScript text parser.
//!
//! Produces the TYPO3 array form: a path `a.b = 1` becomes
//! `{"a.": {"b": "1"}}`. Supported syntax: assignments (`=`), blocks
//! (`{ }`), multi-line values (`( )`), unset (`>`), copy (`<`, absolute or
//! `.relative`), line comments (`#`, `//`) and block comments (`/* */`).
//! Condition blocks (`[...]` up to `[END]` or `[GLOBAL]`) never match and
//! their content is skipped. Imports and value modifiers (`:=`) are ignored.

use crate::error::ConfigError;
use serde_json::{Map, Value};
use tracing::warn;

/// Parse TypoScript text into its array form.
pub fn parse_typoscript(input: &str) -> Result<Map<String, Value>, ConfigError> {
    let mut parser = Parser::default();
    for (index, raw_line) in input.lines().enumerate() {
        parser.feed(index + 1, raw_line)?;
    }
    parser.finish()
}

#[derive(Default)]
struct Parser {
    root: Map<String, Value>,
    scopes: Vec<Vec<String>>,
    multi_line: Option<MultiLine>,
    in_comment: bool,
    in_condition: bool,
    last_line: usize,
}

struct MultiLine {
    path: Vec<String>,
    lines: Vec<String>,
    started_at: usize,
}

impl Parser {
    fn feed(&mut self, line_number: usize, raw_line: &str) -> Result<(), ConfigError> {
        self.last_line = line_number;

        if let Some(multi_line) = self.multi_line.as_mut() {
            if raw_line.trim_start().starts_with(')') {
                let value = multi_line.lines.join("\n");
                let path = std::mem::take(&mut multi_line.path);
                self.multi_line = None;
                set_value(&mut self.root, &path, Value::String(value));
            } else {
                multi_line.lines.push(raw_line.to_owned());
            }
            return Ok(());
        }

        let line = raw_line.trim();
        if self.in_comment {
            if line.contains("*/") {
                self.in_comment = false;
            }
            return Ok(());
        }
        if line.starts_with("/*") {
            self.in_comment = !line.contains("*/");
            return Ok(());
        }
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            return Ok(());
        }
        if line.starts_with('[') {
            let condition = line.to_ascii_uppercase();
            self.in_condition = !(condition.starts_with("[END]") || condition.starts_with("[GLOBAL]"));
            return Ok(());
        }
        if self.in_condition {
            return Ok(());
        }
        if line.starts_with('@') || line.starts_with("<INCLUDE_TYPOSCRIPT") {
            warn!(line = line_number, "typoscript imports are not resolved");
            return Ok(());
        }
        if line.starts_with('}') {
            return self
                .scopes
                .pop()
                .map(|_| ())
                .ok_or_else(|| invalid(line_number, "unexpected closing brace"));
        }

        self.statement(line_number, line)
    }

    fn statement(&mut self, line_number: usize, line: &str) -> Result<(), ConfigError> {
        let split = line
            .find(|ch: char| ch.is_whitespace() || matches!(ch, '=' | '<' | '>' | '{' | '(' | ':'))
            .unwrap_or(line.len());
        let (key, rest) = line.split_at(split);
        if key.is_empty() {
            return Err(invalid(line_number, "missing object path"));
        }
        let path = self.absolute_path(key);
        let rest = rest.trim_start();

        let Some(operator) = rest.chars().next() else {
            return Err(invalid(line_number, "missing operator"));
        };
        let operand = rest.get(operator.len_utf8()..).unwrap_or_default();

        match operator {
            '=' => set_value(&mut self.root, &path, Value::String(operand.trim().to_owned())),
            '{' => self.scopes.push(path),
            '(' => {
                self.multi_line = Some(MultiLine {
                    path,
                    lines: Vec::new(),
                    started_at: line_number,
                });
            },
            '>' => unset(&mut self.root, &path),
            '<' => {
                let source = operand.trim();
                let source_path = if let Some(relative) = source.strip_prefix('.') {
                    let mut scoped = self.scopes.last().cloned().unwrap_or_default();
                    scoped.extend(split_path(relative));
                    scoped
                } else {
                    split_path(source)
                };
                copy(&mut self.root, &source_path, &path);
            },
            ':' if operand.starts_with('=') => {
                warn!(line = line_number, key, "typoscript value modifiers are ignored");
            },
            _ => return Err(invalid(line_number, "unknown operator")),
        }
        Ok(())
    }

    fn absolute_path(&self, key: &str) -> Vec<String> {
        let mut path = self.scopes.last().cloned().unwrap_or_default();
        path.extend(split_path(key));
        path
    }

    fn finish(self) -> Result<Map<String, Value>, ConfigError> {
        if let Some(multi_line) = self.multi_line {
            return Err(invalid(multi_line.started_at, "unterminated multi-line value"));
        }
        if !self.scopes.is_empty() {
            return Err(invalid(self.last_line, "unclosed block"));
        }
        Ok(self.root)
    }
}

fn invalid(line: usize, message: &str) -> ConfigError {
    ConfigError::InvalidTypoScript {
        line,
        message: message.to_owned(),
    }
}

fn split_path(path: &str) -> Vec<String> {
    path.split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect()
}

fn children_mut<'a>(
    root: &'a mut Map<String, Value>,
    parents: &[String],
) -> Option<&'a mut Map<String, Value>> {
    let mut node = root;
    for segment in parents {
        let slot = node
            .entry(format!("{segment}."))
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        node = slot.as_object_mut()?;
    }
    Some(node)
}

fn set_value(root: &mut Map<String, Value>, path: &[String], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    if let Some(node) = children_mut(root, parents) {
        node.insert(last.clone(), value);
    }
}

fn set_children(root: &mut Map<String, Value>, path: &[String], children: Map<String, Value>) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    if let Some(node) = children_mut(root, parents) {
        node.insert(format!("{last}."), Value::Object(children));
    }
}

fn unset(root: &mut Map<String, Value>, path: &[String]) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let Some(node) = children_mut(root, parents) else {
        return;
    };
    let dotted = format!("{last}.");
    let kept: Map<String, Value> = std::mem::take(node)
        .into_iter()
        .filter(|(key, _)| *key != *last && *key != dotted)
        .collect();
    *node = kept;
}

fn lookup(root: &Map<String, Value>, path: &[String]) -> (Option<Value>, Option<Map<String, Value>>) {
    let Some((last, parents)) = path.split_last() else {
        return (None, None);
    };
    let mut node = root;
    for segment in parents {
        match node.get(&format!("{segment}.")) {
            Some(Value::Object(children)) => node = children,
            _ => return (None, None),
        }
    }
    let scalar = node.get(last.as_str()).cloned();
    let children = match node.get(&format!("{last}.")) {
        Some(Value::Object(children)) => Some(children.clone()),
        _ => None,
    };
    (scalar, children)
}

fn copy(root: &mut Map<String, Value>, source: &[String], target: &[String]) {
    let (scalar, children) = lookup(root, source);
    if scalar.is_none() && children.is_none() {
        warn!(source = source.join("."), "typoscript copy source does not exist");
        return;
    }
    unset(root, target);
    if let Some(scalar) = scalar {
        set_value(root, target, scalar);
    }
    if let Some(children) = children {
        set_children(root, target, children);
    }
}
