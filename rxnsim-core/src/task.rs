//! Task files
//!
//! A task file gathers everything needed for one run:
//!
//! ```text
//! # isomerization
//! reaction A <-> B : 0.1//0.1
//! concentrations A: 100, B: 20
//! simulate dt = 0.01 t_max = 100
//! units time = s concentration = mM
//! ```
//!
//! `reaction` and `concentrations` may repeat; their clauses are joined in
//! file order. `simulate` is required once, `units` is optional.
//! The reaction and concentration text is kept verbatim here and parsed by
//! the assembler.

use crate::ast::{SimulateDecl, Task, UnitsDecl};
use crate::diagnostics::Span;
use thiserror::Error;

/// Task file syntax error with optional span information
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaskError {
    #[error("{message}")]
    SyntaxError {
        message: String,
        span: Option<Span>,
    },
}

impl TaskError {
    pub fn new(message: impl Into<String>, span: Option<Span>) -> Self {
        Self::SyntaxError {
            message: message.into(),
            span,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::SyntaxError {
            message: message.into(),
            span: None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::SyntaxError { span, .. } => *span,
        }
    }
}

/// Byte offsets of line starts, for spans
struct TaskContext {
    line_offsets: Vec<usize>,
}

impl TaskContext {
    fn new(source: &str) -> Self {
        let mut line_offsets = vec![0];
        let mut offset = 0;
        for ch in source.chars() {
            offset += ch.len_utf8();
            if ch == '\n' {
                line_offsets.push(offset);
            }
        }
        Self { line_offsets }
    }

    fn line_start(&self, line: usize) -> usize {
        self.line_offsets.get(line).copied().unwrap_or(0)
    }

    fn full_line_span(&self, line: usize, source_len: usize) -> Span {
        let start = self.line_start(line);
        let end = self
            .line_offsets
            .get(line + 1)
            .copied()
            .unwrap_or(source_len);
        Span::new(start, end)
    }
}

/// Parse a task file
pub fn parse_task(source: &str) -> Result<Task, TaskError> {
    let ctx = TaskContext::new(source);
    let mut reactions: Vec<&str> = Vec::new();
    let mut concentrations: Vec<&str> = Vec::new();
    let mut simulate = None;
    let mut units = None;

    for (i, raw) in source.lines().enumerate() {
        let line = raw.trim();
        let span = Some(ctx.full_line_span(i, source.len()));

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (keyword, rest) = line
            .split_once(char::is_whitespace)
            .map(|(k, r)| (k, r.trim()))
            .unwrap_or((line, ""));

        match keyword {
            "reaction" | "reactions" => {
                if rest.is_empty() {
                    return Err(TaskError::new("Expected reaction clauses after 'reaction'", span));
                }
                reactions.push(rest);
            }
            "concentrations" | "concentration" => concentrations.push(rest),
            "simulate" => {
                if simulate.is_some() {
                    return Err(TaskError::new("Duplicate 'simulate' declaration", span));
                }
                simulate = Some(parse_simulate(rest, span)?);
            }
            "units" => {
                if units.is_some() {
                    return Err(TaskError::new("Duplicate 'units' declaration", span));
                }
                units = Some(parse_units(rest, span)?);
            }
            other => {
                return Err(TaskError::new(format!("Unexpected token: {}", other), span));
            }
        }
    }

    let simulate =
        simulate.ok_or_else(|| TaskError::message("Missing 'simulate' declaration"))?;

    Ok(Task {
        reactions: reactions.join(", "),
        concentrations: concentrations.join(", "),
        simulate,
        units: units.unwrap_or_default(),
    })
}

/// Parse `dt = <real> t_max = <real>`
fn parse_simulate(rest: &str, span: Option<Span>) -> Result<SimulateDecl, TaskError> {
    let mut dt = None;
    let mut t_max = None;

    for (key, value) in parse_assignments(rest, span)? {
        let number = value.parse::<f64>().map_err(|_| {
            TaskError::new(format!("Expected a number for '{}', got '{}'", key, value), span)
        })?;
        match key {
            "dt" => dt = Some(number),
            "t_max" => t_max = Some(number),
            other => {
                return Err(TaskError::new(
                    format!("Unknown simulate parameter '{}'", other),
                    span,
                ))
            }
        }
    }

    Ok(SimulateDecl {
        dt: dt.ok_or_else(|| TaskError::new("Expected 'dt' in simulate declaration", span))?,
        t_max: t_max
            .ok_or_else(|| TaskError::new("Expected 't_max' in simulate declaration", span))?,
    })
}

/// Parse `time = <unit> concentration = <unit>`; either may be omitted
fn parse_units(rest: &str, span: Option<Span>) -> Result<UnitsDecl, TaskError> {
    let mut units = UnitsDecl::default();
    for (key, value) in parse_assignments(rest, span)? {
        match key {
            "time" => units.time = value.to_string(),
            "concentration" | "conc" => units.concentration = value.to_string(),
            other => return Err(TaskError::new(format!("Unknown unit '{}'", other), span)),
        }
    }
    Ok(units)
}

/// Split `a = 1 b=2` into `[("a", "1"), ("b", "2")]`
fn parse_assignments(rest: &str, span: Option<Span>) -> Result<Vec<(&str, &str)>, TaskError> {
    let mut pairs = Vec::new();
    let mut tokens = rest
        .split_whitespace()
        .flat_map(split_keeping_equals);

    while let Some(key) = tokens.next() {
        if key == "=" {
            return Err(TaskError::new("Expected a name before '='", span));
        }
        match (tokens.next(), tokens.next()) {
            (Some("="), Some(value)) if value != "=" => pairs.push((key, value)),
            _ => {
                return Err(TaskError::new(
                    format!("Expected '{} = <value>'", key),
                    span,
                ))
            }
        }
    }
    Ok(pairs)
}

/// `dt=0.1` -> `["dt", "=", "0.1"]`
fn split_keeping_equals(word: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = word;
    while let Some(pos) = rest.find('=') {
        if pos > 0 {
            parts.push(&rest[..pos]);
        }
        parts.push("=");
        rest = &rest[pos + 1..];
    }
    if !rest.is_empty() {
        parts.push(rest);
    }
    parts
}
