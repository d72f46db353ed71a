//! Diagnostic data model.
//!
//! Diagnostics are *accumulated*, never thrown (spec §7: "Propagation
//! policy"). `Diagnostic` is the sink-facing record; `format_message`
//! substitutes `{0}`, `{1}`, ... placeholders the way `tsz-common`'s
//! message formatter does.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Error,
    Warning,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub file: String,
    /// Name of the enclosing function, if any, for disambiguating
    /// sibling declarations in the same file.
    pub function: Option<String>,
    /// Name of the enclosing class/interface, if any.
    pub class: Option<String>,
    pub start: u32,
    pub length: u32,
    pub message: String,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            file: file.into(),
            function: None,
            class: None,
            start,
            length,
            message: message.into(),
        }
    }

    pub fn with_function(mut self, function: Option<String>) -> Self {
        self.function = function;
        self
    }

    pub fn with_class(mut self, class: Option<String>) -> Self {
        self.class = class;
        self
    }
}

pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
