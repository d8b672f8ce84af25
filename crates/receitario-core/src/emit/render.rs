use regex::Regex;

use crate::emit::ast::{Expr, Item, Module};
use crate::error::Result;

const INDENT: &str = "  ";

/// Composite literals at most this many characters wide stay on one line.
const MAX_INLINE_WIDTH: usize = 100;

/// Characters that end a `//` comment in JavaScript.
const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// Quotes a string as a double-quoted TypeScript literal.
///
/// Escapes quotes, backslashes, control characters and the two line
/// separators JavaScript treats as line terminators. The result is also a
/// valid JSON string.
#[must_use]
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() && (c as u32) < 0x80 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Writes `text` as `//` line comments, one per line of the text.
///
/// Every JavaScript line terminator starts a new comment line, so no part of
/// the text can escape into code.
fn push_comment(out: &mut String, text: &str) {
    for line in text.replace("\r\n", "\n").split(LINE_TERMINATORS) {
        if line.is_empty() {
            out.push_str("//");
        } else {
            out.push_str("// ");
            out.push_str(line);
        }
        out.push('\n');
    }
}

/// Renders a [`Module`] tree to TypeScript source.
pub struct Renderer {
    re_identifier: Regex,
}

impl Renderer {
    /// # Errors
    ///
    /// Returns `ReceitarioError::RegexError` if the identifier pattern fails
    /// to compile (should never happen).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_identifier: Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$")?,
        })
    }

    /// Whether `name` can be written as a bare identifier or object key.
    #[must_use]
    pub fn is_identifier(&self, name: &str) -> bool {
        self.re_identifier.is_match(name)
    }

    #[must_use]
    pub fn render(&self, module: &Module) -> String {
        let mut out = String::new();
        for line in &module.header {
            push_comment(&mut out, line);
        }
        for block in &module.blocks {
            if !out.is_empty() {
                out.push('\n');
            }
            if let Some(ref comment) = block.comment {
                push_comment(&mut out, comment);
            }
            self.render_item(&block.item, &mut out);
        }
        out
    }

    fn render_item(&self, item: &Item, out: &mut String) {
        match item {
            Item::Interface { name, fields } => {
                out.push_str(&format!("export interface {name} {{\n"));
                for (field, ty) in fields {
                    out.push_str(&format!("{INDENT}{}: {ty};\n", self.key(field)));
                }
                out.push_str("}\n");
            }
            Item::Const { name, ty, value } => {
                let annotation = ty.as_ref().map(|t| format!(": {t}")).unwrap_or_default();
                out.push_str(&format!(
                    "export const {name}{annotation} = {};\n",
                    self.expr(value, 0)
                ));
            }
            Item::CountRefresh {
                categories,
                recipes,
                all_id,
            } => {
                let all_id = quote(all_id);
                out.push_str(&format!("{categories}.forEach((category) => {{\n"));
                out.push_str(&format!("{INDENT}if (category.id === {all_id}) {{\n"));
                out.push_str(&format!(
                    "{INDENT}{INDENT}category.count = {recipes}.length;\n"
                ));
                out.push_str(&format!("{INDENT}}} else {{\n"));
                out.push_str(&format!(
                    "{INDENT}{INDENT}category.count = {recipes}.filter((recipe) => recipe.category === category.id).length;\n"
                ));
                out.push_str(&format!("{INDENT}}}\n"));
                out.push_str("});\n");
            }
        }
    }

    /// Renders an expression whose first line starts at nesting `depth`.
    fn expr(&self, expr: &Expr, depth: usize) -> String {
        if let Some(inline) = self.inline(expr) {
            if expr.is_scalar() || inline.chars().count() <= MAX_INLINE_WIDTH {
                return inline;
            }
        }

        let pad = INDENT.repeat(depth + 1);
        let close = INDENT.repeat(depth);
        let mut out = String::new();
        match expr {
            Expr::Array(items) => {
                out.push_str("[\n");
                for item in items {
                    out.push_str(&pad);
                    out.push_str(&self.expr(item, depth + 1));
                    out.push_str(",\n");
                }
                out.push_str(&close);
                out.push(']');
            }
            Expr::Object(fields) => {
                out.push_str("{\n");
                for (key, value) in fields {
                    out.push_str(&pad);
                    out.push_str(&self.key(key));
                    out.push_str(": ");
                    out.push_str(&self.expr(value, depth + 1));
                    out.push_str(",\n");
                }
                out.push_str(&close);
                out.push('}');
            }
            // scalars always render inline above
            Expr::Str(s) => out.push_str(&quote(s)),
            Expr::Number(n) => out.push_str(n),
        }
        out
    }

    /// Single-line form, available when every child is a scalar.
    fn inline(&self, expr: &Expr) -> Option<String> {
        match expr {
            Expr::Str(s) => Some(quote(s)),
            Expr::Number(n) => Some(n.clone()),
            Expr::Array(items) => {
                if !items.iter().all(Expr::is_scalar) {
                    return None;
                }
                let parts: Vec<String> = items.iter().filter_map(|i| self.inline(i)).collect();
                Some(format!("[{}]", parts.join(", ")))
            }
            Expr::Object(fields) => {
                if !fields.iter().all(|(_, v)| v.is_scalar()) {
                    return None;
                }
                if fields.is_empty() {
                    return Some("{}".to_string());
                }
                let parts: Vec<String> = fields
                    .iter()
                    .filter_map(|(k, v)| Some(format!("{}: {}", self.key(k), self.inline(v)?)))
                    .collect();
                Some(format!("{{ {} }}", parts.join(", ")))
            }
        }
    }

    fn key(&self, key: &str) -> String {
        if self.is_identifier(key) {
            key.to_string()
        } else {
            quote(key)
        }
    }
}
