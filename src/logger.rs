//! Diagnostic hook for parse milestones.
//!
//! The parser reports each entity it finishes (project, table, column,
//! index, enum, ref, table group) to a [`ParseLogger`]. Loggers only
//! observe; they cannot influence the parse.

use std::fmt::{Debug, Write};

use tracing::Level;

pub type Params<'a> = &'a [(&'a str, &'a dyn Debug)];

pub trait ParseLogger {
    fn log(&self, message: &str, params: Params<'_>);
}

impl<F> ParseLogger for F
where
    F: Fn(&str, Params<'_>),
{
    fn log(&self, message: &str, params: Params<'_>) {
        self(message, params)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl ParseLogger for NoopLogger {
    fn log(&self, _message: &str, _params: Params<'_>) {}
}

/// Forwards milestones to `tracing` under the `dbml::parser` target.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    pub level: Level,
}

impl TracingLogger {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(Level::DEBUG)
    }
}

fn render_params(params: Params<'_>) -> String {
    let mut out = String::new();
    for (i, (key, value)) in params.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{key}={value:?}");
    }
    out
}

impl ParseLogger for TracingLogger {
    fn log(&self, message: &str, params: Params<'_>) {
        let params = render_params(params);
        // `event!` needs the level as a constant.
        match self.level {
            Level::WARN => tracing::warn!(target: "dbml::parser", %params, "[dbml] {message}"),
            Level::INFO => tracing::info!(target: "dbml::parser", %params, "[dbml] {message}"),
            Level::DEBUG => tracing::debug!(target: "dbml::parser", %params, "[dbml] {message}"),
            Level::TRACE => tracing::trace!(target: "dbml::parser", %params, "[dbml] {message}"),
            _ => tracing::error!(target: "dbml::parser", %params, "[dbml] {message}"),
        }
    }
}
