//! # Template Formatting
//!
//! ## Role
//! [`TemplateFormatter`] fills `{field:spec}` templates from JSON arguments.
//! It is meant for log lines and run names built out of nested configs.
//!
//! ## Fields
//! - `{name}`, `{model.lr}`, `{layers[0]}`: lookups into the arguments;
//!   whitespace around the name is ignored so columns can be aligned
//! - `{'text'}` or `{"text"}`: an inline string
//! - `{{` and `}}`: literal braces
//!
//! ## Specs
//! A spec is a `:`-separated pipeline applied left to right. Each step is
//! either a registered function or a standard spec
//! `[[fill]align][sign][0][width][,][.precision][type]` with the types
//! `s d x o b f e g %`. A leading `@` maps the step over an array.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Number, Value};

use crate::error::{Result, ToolboxError};

/// Named pipeline step
pub type FormatFn = Box<dyn Fn(&Value) -> Result<Value>>;

/// `{field:spec}` template formatter over JSON arguments
#[derive(Default)]
pub struct TemplateFormatter {
    funcs: HashMap<String, FormatFn>,
    default: Option<String>,
}

impl fmt::Debug for TemplateFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateFormatter")
            .field("funcs", &self.funcs.keys().collect::<Vec<_>>())
            .field("default", &self.default)
            .finish()
    }
}

impl TemplateFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `func` as the pipeline step `name`
    pub fn with_func<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + 'static,
    {
        self.funcs.insert(name.into(), Box::new(func));
        self
    }

    /// Text for missing or null fields.
    ///
    /// Only a trailing width spec (`5`, `>8`, `*^10`) is applied to it. Without
    /// a default, a missing field is an error.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn format(&self, template: &str, args: &Map<String, Value>) -> Result<String> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(i) = rest.find(|c: char| c == '{' || c == '}') {
            out.push_str(&rest[..i]);
            let tail = &rest[i..];
            if tail.starts_with("{{") {
                out.push('{');
                rest = &tail[2..];
            } else if tail.starts_with("}}") {
                out.push('}');
                rest = &tail[2..];
            } else if tail.starts_with('}') {
                return Err(ToolboxError::invalid_input(format!(
                    "single '}}' in template {:?}",
                    template
                )));
            } else {
                let body = &tail[1..];
                let end = find_unquoted(body, '}').ok_or_else(|| {
                    ToolboxError::invalid_input(format!("unclosed field in template {:?}", template))
                })?;
                out.push_str(&self.replace_field(&body[..end], args)?);
                rest = &body[end + 1..];
            }
        }
        out.push_str(rest);
        Ok(out)
    }

    fn replace_field(&self, field: &str, args: &Map<String, Value>) -> Result<String> {
        let (name, specs) = match find_unquoted(field, ':') {
            Some(i) => (field[..i].trim(), &field[i + 1..]),
            None => (field.trim(), ""),
        };
        let value = match inline_string(name) {
            Some(text) => Some(Value::String(text.to_string())),
            None => lookup(args, name)?.cloned(),
        };
        let mut value = match (value, &self.default) {
            (Some(Value::Null) | None, Some(default)) => return self.format_default(default, specs),
            (Some(value), _) => value,
            (None, None) => {
                return Err(ToolboxError::invalid_input(format!(
                    "missing template field '{}'",
                    name
                )))
            }
        };

        for spec in specs.split(':') {
            value = match spec.strip_prefix('@') {
                Some(spec) => match value {
                    Value::Array(items) => Value::Array(
                        items
                            .iter()
                            .map(|item| self.apply(spec, item))
                            .collect::<Result<_>>()?,
                    ),
                    other => {
                        return Err(ToolboxError::invalid_input(format!(
                            "elementwise spec '@{}' needs an array, got {}",
                            spec, other
                        )))
                    }
                },
                None => self.apply(spec, &value)?,
            };
        }
        Ok(render(&value))
    }

    fn apply(&self, spec: &str, value: &Value) -> Result<Value> {
        match self.funcs.get(spec) {
            Some(func) => func(value),
            None => format_value(value, spec).map(Value::String),
        }
    }

    fn format_default(&self, default: &str, specs: &str) -> Result<String> {
        match specs.rsplit(':').next() {
            Some(last) if is_width_only(last) => format_value(&Value::String(default.to_string()), last),
            _ => Ok(default.to_string()),
        }
    }
}

/// Format one value with a standard spec; `""` gives its plain text
pub fn format_value(value: &Value, spec: &str) -> Result<String> {
    let spec = Spec::parse(spec)?;
    match value {
        Value::Number(n) => format_number(n, &spec),
        Value::Bool(b) if spec.ty.is_some_and(|t| t != 's') => {
            format_number(&Number::from(u8::from(*b)), &spec)
        }
        Value::String(text) => format_text(text, &spec),
        other => format_text(&render(other), &spec),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Byte offset of the first `target` outside quotes
fn find_unquoted(s: &str, target: char) -> Option<usize> {
    let mut quote = None;
    for (i, c) in s.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == target => return Some(i),
            None => {}
        }
    }
    None
}

fn inline_string(name: &str) -> Option<&str> {
    ['\'', '"']
        .into_iter()
        .find(|&q| name.len() >= 2 && name.starts_with(q) && name.ends_with(q))
        .map(|_| &name[1..name.len() - 1])
}

/// Follow `a.b[0].c` through objects and arrays; `None` when any step is missing
fn lookup<'v>(args: &'v Map<String, Value>, name: &str) -> Result<Option<&'v Value>> {
    if name.is_empty() {
        return Err(ToolboxError::invalid_input("empty template field name"));
    }
    let mut segments = name
        .split(|c: char| c == '.' || c == '[')
        .map(|s| s.strip_suffix(']').unwrap_or(s));
    let mut current = match segments.next().and_then(|first| args.get(first)) {
        Some(value) => value,
        None => return Ok(None),
    };
    for segment in segments {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

/// `[[fill]align]width` with nothing else
fn is_width_only(spec: &str) -> bool {
    let mut chars = spec.chars();
    let rest = match (chars.next(), chars.next()) {
        (Some(_), Some('<' | '>' | '^')) => chars.as_str(),
        (Some('<' | '>' | '^'), _) => &spec[1..],
        _ => spec,
    };
    !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit())
}

#[derive(Debug, Default)]
struct Spec {
    fill: Option<char>,
    align: Option<char>,
    sign: Option<char>,
    zero: bool,
    width: usize,
    grouping: bool,
    precision: Option<usize>,
    ty: Option<char>,
}

impl Spec {
    fn parse(spec: &str) -> Result<Self> {
        let invalid = || ToolboxError::invalid_input(format!("invalid format spec '{}'", spec));
        let is_align = |c: char| matches!(c, '<' | '>' | '^' | '=');
        let chars: Vec<char> = spec.chars().collect();
        let mut out = Spec::default();
        let mut i = 0;

        if chars.len() >= 2 && is_align(chars[1]) {
            out.fill = Some(chars[0]);
            out.align = Some(chars[1]);
            i = 2;
        } else if chars.first().copied().is_some_and(is_align) {
            out.align = Some(chars[0]);
            i = 1;
        }
        if let Some(&c @ ('+' | '-' | ' ')) = chars.get(i) {
            out.sign = Some(c);
            i += 1;
        }
        if chars.get(i) == Some(&'0') {
            out.zero = true;
            i += 1;
        }
        out.width = take_number(&chars, &mut i).unwrap_or(0);
        if chars.get(i) == Some(&',') {
            out.grouping = true;
            i += 1;
        }
        if chars.get(i) == Some(&'.') {
            i += 1;
            out.precision = Some(take_number(&chars, &mut i).ok_or_else(invalid)?);
        }
        match chars.get(i..) {
            Some([]) | None => {}
            Some([ty]) if "sdxobfeg%".contains(*ty) => out.ty = Some(*ty),
            _ => return Err(invalid()),
        }
        Ok(out)
    }
}

fn take_number(chars: &[char], i: &mut usize) -> Option<usize> {
    let start = *i;
    while chars.get(*i).is_some_and(|c| c.is_ascii_digit()) {
        *i += 1;
    }
    if *i == start {
        return None;
    }
    chars[start..*i].iter().collect::<String>().parse().ok()
}

fn format_text(text: &str, spec: &Spec) -> Result<String> {
    if spec.ty.is_some_and(|t| t != 's') || spec.sign.is_some() || spec.grouping || spec.align == Some('=') {
        return Err(ToolboxError::invalid_input(format!(
            "numeric format spec applied to text {:?}",
            text
        )));
    }
    let text: String = match spec.precision {
        Some(precision) => text.chars().take(precision).collect(),
        None => text.to_string(),
    };
    Ok(pad(&text, spec.width, spec.fill.unwrap_or(' '), spec.align.unwrap_or('<')))
}

fn format_number(n: &Number, spec: &Spec) -> Result<String> {
    let integer = n.as_i64().map(i128::from).or_else(|| n.as_u64().map(i128::from));
    let (negative, digits) = match (integer, spec.ty) {
        (Some(v), None) | (Some(v), Some('d')) if spec.precision.is_none() => {
            (v < 0, group(v.unsigned_abs().to_string(), spec.grouping))
        }
        (Some(v), Some('x')) => (v < 0, format!("{:x}", v.unsigned_abs())),
        (Some(v), Some('o')) => (v < 0, format!("{:o}", v.unsigned_abs())),
        (Some(v), Some('b')) => (v < 0, format!("{:b}", v.unsigned_abs())),
        (_, Some(ty @ ('d' | 'x' | 'o' | 'b' | 's'))) => {
            return Err(ToolboxError::invalid_input(format!(
                "format type '{}' does not apply to {}",
                ty, n
            )))
        }
        _ => {
            let x = n.as_f64().unwrap_or(f64::NAN);
            (x < 0.0, float_body(x.abs(), spec))
        }
    };

    let sign = match (negative, spec.sign) {
        (true, _) => "-",
        (false, Some('+')) => "+",
        (false, Some(' ')) => " ",
        _ => "",
    };
    let align = spec.align.unwrap_or(if spec.zero { '=' } else { '>' });
    let fill = spec.fill.unwrap_or(if spec.zero { '0' } else { ' ' });
    Ok(if align == '=' {
        let padding = spec.width.saturating_sub(sign.len() + digits.chars().count());
        format!("{}{}{}", sign, fill.to_string().repeat(padding), digits)
    } else {
        pad(&format!("{}{}", sign, digits), spec.width, fill, align)
    })
}

/// Digits of a non-negative float
fn float_body(x: f64, spec: &Spec) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    let percent = spec.ty == Some('%');
    let body = if x.is_infinite() {
        "inf".to_string()
    } else {
        match (spec.ty, spec.precision) {
            (Some('f'), p) => format!("{:.*}", p.unwrap_or(6), x),
            (Some('e'), p) => exponent(x, p.unwrap_or(6)),
            (Some('%'), p) => format!("{:.*}", p.unwrap_or(6), x * 100.0),
            (Some('g'), p) | (None, p @ Some(_)) => general(x, p.unwrap_or(6)),
            _ => Value::from(x).to_string(),
        }
    };
    let mut body = group(body, spec.grouping);
    if percent {
        body.push('%');
    }
    body
}

/// Scientific notation with a signed two-digit exponent, `1.23e+04`
fn exponent(x: f64, precision: usize) -> String {
    let raw = format!("{:.*e}", precision, x);
    match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        None => raw,
    }
}

/// `precision` significant digits, fixed or scientific, trailing zeros removed
fn general(x: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if x == 0.0 {
        return "0".to_string();
    }
    let exp = format!("{:.*e}", precision - 1, x)
        .split_once('e')
        .and_then(|(_, e)| e.parse::<i32>().ok())
        .unwrap_or(0);
    if exp < -4 || exp >= precision as i32 {
        let formatted = exponent(x, precision - 1);
        match formatted.split_once('e') {
            Some((mantissa, exp)) => format!("{}e{}", trim_zeros(mantissa), exp),
            None => formatted,
        }
    } else {
        let decimals = (precision as i32 - 1 - exp) as usize;
        trim_zeros(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Thousands separators in the leading run of digits
fn group(body: String, on: bool) -> String {
    if !on {
        return body;
    }
    let end = body.find(|c: char| !c.is_ascii_digit()).unwrap_or(body.len());
    let (int, tail) = body.split_at(end);
    let mut out = String::with_capacity(body.len() + end / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (end - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(tail);
    out
}

fn pad(text: &str, width: usize, fill: char, align: char) -> String {
    let n = width.saturating_sub(text.chars().count());
    let run = |k: usize| std::iter::repeat(fill).take(k).collect::<String>();
    match align {
        '<' => format!("{}{}", text, run(n)),
        '^' => format!("{}{}{}", run(n / 2), text, run(n - n / 2)),
        _ => format!("{}{}", run(n), text),
    }
}
