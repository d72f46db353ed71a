//! Checker configuration, analogous to `tsz-common::checker_options`.

/// Options controlling how strictly the checker treats the gradual-typing
/// boundary. Defaults match the behavior described in spec.md.
#[derive(Debug, Clone)]
pub struct CheckerOptions {
    /// Require an explicit annotation for unannotated locals without an
    /// initializer, even inside a dynamic function. When false (default),
    /// dynamic functions are exempt (spec §4.2).
    pub require_annotation_in_dynamic_functions: bool,
    /// Allow `return;` with no value inside a `Void`-returning dynamic
    /// function to go unreported even without this flag (spec default);
    /// when true, enforce the check regardless of dynamic-function status.
    pub strict_return_in_dynamic_functions: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            require_annotation_in_dynamic_functions: false,
            strict_return_in_dynamic_functions: false,
        }
    }
}
