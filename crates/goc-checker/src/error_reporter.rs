//! Error-reporting adapter (spec §6, "Diagnostics API").
//!
//! Converts semantic findings into `Diagnostic`s, tagged with the current
//! file/function/class breadcrumbs. Message text follows `check.py`'s
//! wording closely enough that the end-to-end scenarios in spec §8 match
//! verbatim.

use goc_common::format_message;

use crate::context::CheckerState;

impl CheckerState {
    pub fn set_file(&mut self, file: impl Into<String>) {
        self.diag_ctx.file = file.into();
    }

    pub fn set_function(&mut self, function: Option<String>) {
        self.diag_ctx.function = function;
    }

    pub fn set_type(&mut self, class: Option<String>) {
        self.diag_ctx.class = class;
    }

    pub fn fail(&mut self, start: u32, length: u32, message: impl Into<String>) {
        self.record_diagnostic(start, length, message);
    }

    pub fn need_type_annotation(&mut self, start: u32, length: u32) {
        self.fail(start, length, "Need type annotation for variable");
    }

    pub fn incompatible_types_in_assignment(&mut self, start: u32, length: u32) {
        self.fail(start, length, "Incompatible types in assignment");
    }

    pub fn incompatible_value_count_in_assignment(
        &mut self,
        start: u32,
        length: u32,
        got: usize,
        expected: usize,
    ) {
        let msg = format_message(
            "Incompatible number of values in assignment (got {0}, expected {1})",
            &[&got.to_string(), &expected.to_string()],
        );
        self.fail(start, length, msg);
    }

    pub fn does_not_return_value(&mut self, start: u32, length: u32) {
        self.fail(start, length, "Function does not return a value");
    }

    pub fn no_return_value_expected(&mut self, start: u32, length: u32) {
        self.fail(start, length, "No return value expected");
    }

    pub fn return_value_expected(&mut self, start: u32, length: u32) {
        self.fail(start, length, "Return value expected");
    }

    pub fn constructor_return_type(&mut self, start: u32, length: u32) {
        self.fail(start, length, "The return type of \"__init__\" must be \"None\"");
    }

    pub fn incompatible_operator_assignment(&mut self, start: u32, length: u32, op: &str) {
        let msg = format_message(
            "Result type of {0} incompatible in assignment",
            &[op],
        );
        self.fail(start, length, msg);
    }

    pub fn signature_incompatible_with_supertype(
        &mut self,
        start: u32,
        length: u32,
        base_class: &str,
    ) {
        let msg = format_message(
            "Signature of this method incompatible with supertype {0}",
            &[base_class],
        );
        self.fail(start, length, msg);
    }

    pub fn return_type_incompatible_with_supertype(
        &mut self,
        start: u32,
        length: u32,
        base_class: &str,
    ) {
        let msg = format_message(
            "Return type incompatible with supertype {0}",
            &[base_class],
        );
        self.fail(start, length, msg);
    }

    pub fn argument_incompatible_with_supertype(
        &mut self,
        start: u32,
        length: u32,
        arg_name: &str,
        base_class: &str,
    ) {
        let msg = format_message(
            "Argument {0} incompatible with supertype {1}",
            &[arg_name, base_class],
        );
        self.fail(start, length, msg);
    }

    pub fn duplicate_interfaces(&mut self, start: u32, length: u32, interface: &str) {
        let msg = format_message("Interface {0} implemented more than once", &[interface]);
        self.fail(start, length, msg);
    }

    pub fn interface_member_not_implemented(
        &mut self,
        start: u32,
        length: u32,
        class_name: &str,
        member: &str,
        interface: &str,
    ) {
        let msg = format_message(
            "{0} does not implement member {1} of interface {2}",
            &[class_name, member, interface],
        );
        self.fail(start, length, msg);
    }

    pub fn not_implemented(&mut self, start: u32, length: u32, what: &str) {
        let msg = format_message("\"{0}\" is not supported", &[what]);
        self.fail(start, length, msg);
    }

    pub fn chained_assignment_unsupported(&mut self, start: u32, length: u32) {
        self.fail(start, length, "Chained assignment is not supported");
    }

    pub fn multiple_exception_types_unsupported(&mut self, start: u32, length: u32) {
        self.fail(start, length, "Multiple exception types are not supported in one except clause");
    }

    pub fn unsupported_exception_type(&mut self, start: u32, length: u32) {
        self.fail(start, length, "Unsupported exception type");
    }

    pub fn raise_requires_base_exception(&mut self, start: u32, length: u32) {
        self.fail(start, length, "Exception must be derived from BaseException");
    }

    pub fn invalid_loop_iterable(&mut self, start: u32, length: u32) {
        self.fail(start, length, "Iterable expected");
    }
}
