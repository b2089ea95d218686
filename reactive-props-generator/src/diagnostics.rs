//! Diagnostics reported to the user.
//!
//! A [`DiagnosticDescriptor`] is a static rule; a [`Diagnostic`] is one
//! occurrence of it at a location, with the arguments substituted into the
//! message format (`{0}`, `{1}`, ...).

use std::fmt;

use serde::Serialize;

use crate::model::Location;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Hidden,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Hidden => "hidden",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a diagnostic rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DiagnosticDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub message_format: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub enabled_by_default: bool,
    pub description: &'static str,
}

/// A marked field lives in a type that lacks the notification capability.
pub const REACTIVE_PROPERTY_IN_NON_REACTIVE_TYPE: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "RPG0001",
    title: "ReactiveProperty used in a type that is not reactive",
    message_format: "The field {0}.{1} is located in a type that does not implement \
                     ReactiveUI.IReactiveObject, so [ReactiveProperty] cannot be used",
    category: "ReactiveProps.Generator",
    severity: Severity::Error,
    enabled_by_default: true,
    description: "[ReactiveProperty] can only be used on fields inside types that implement \
                  ReactiveUI.IReactiveObject.",
};

/// One reported occurrence of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    pub descriptor: DiagnosticDescriptor,
    pub location: Location,
    pub arguments: Vec<String>,
}

impl Diagnostic {
    pub fn new<I, S>(descriptor: DiagnosticDescriptor, location: Location, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            descriptor,
            location,
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> &'static str {
        self.descriptor.id
    }

    pub fn severity(&self) -> Severity {
        self.descriptor.severity
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    /// Message with arguments substituted.
    pub fn message(&self) -> String {
        format_message(self.descriptor.message_format, &self.arguments)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}: {}",
            self.location,
            self.severity(),
            self.id(),
            self.message()
        )
    }
}

/// Replace `{N}` placeholders with the matching argument. Placeholders
/// without an argument are kept as written.
fn format_message(format: &str, arguments: &[String]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut rest = format;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replaced = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            let argument = arguments.get(index)?;
            Some((argument, close))
        });

        match replaced {
            Some((argument, close)) => {
                out.push_str(argument);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Order diagnostics by location, then rule, then message.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| {
        a.location
            .cmp(&b.location)
            .then_with(|| a.id().cmp(b.id()))
            .then_with(|| a.arguments.cmp(&b.arguments))
    });
}
