use serde_json::Value;

use super::lexer::Key;
use super::parser::Node;

/// One level of the scope chain. `#each` pushes a frame per element.
struct Scope<'a> {
    value: &'a Value,
    index: Option<usize>,
    last: Option<bool>,
    parent: Option<&'a Scope<'a>>,
}

pub(crate) fn render(nodes: &[Node], data: &Value) -> String {
    let root = Scope {
        value: data,
        index: None,
        last: None,
        parent: None,
    };
    let mut out = String::new();
    render_nodes(nodes, &root, &mut out);
    out
}

fn render_nodes(nodes: &[Node], scope: &Scope<'_>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var(key) => {
                if let Some(value) = lookup(key, scope) {
                    push_display(&value, out);
                }
            }
            Node::If {
                key,
                negate,
                then,
                otherwise,
            } => {
                let truthy = lookup(key, scope).is_some_and(|value| is_truthy(&value));
                let branch = if truthy != *negate { then } else { otherwise };
                render_nodes(branch, scope, out);
            }
            Node::Each {
                key,
                body,
                otherwise,
            } => match lookup(key, scope) {
                Some(Value::Array(items)) if !items.is_empty() => {
                    let len = items.len();
                    for (index, item) in items.iter().enumerate() {
                        let child = Scope {
                            value: item,
                            index: Some(index),
                            last: Some(index + 1 == len),
                            parent: Some(scope),
                        };
                        render_nodes(body, &child, out);
                    }
                }
                _ => render_nodes(otherwise, scope, out),
            },
        }
    }
}

fn lookup(key: &Key, scope: &Scope<'_>) -> Option<Value> {
    match key {
        Key::Field(name) => scope.value.get(name).cloned(),
        Key::This => Some(scope.value.clone()),
        Key::Index => scope.index.map(Value::from),
        Key::Last => scope.last.map(Value::Bool),
        Key::Parent(inner) => scope.parent.and_then(|parent| lookup(inner, parent)),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

fn push_display(value: &Value, out: &mut String) {
    match value {
        Value::Null => {}
        Value::String(text) => out.push_str(text),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                push_display(item, out);
            }
        }
        other => out.push_str(&other.to_string()),
    }
}
