//! Call statement construction

/// Build the textual `call` statement for a procedure with `argc`
/// positional placeholders.
///
/// The procedure name is inserted verbatim, with no quoting or escaping:
/// callers pass a trusted, already-namespaced name, not user input. This is
/// a structural trust boundary of the call contract.
pub fn call_text(procedure: &str, argc: usize) -> String {
    if argc == 0 {
        format!("call {procedure}()")
    } else {
        format!("call {procedure}({})", vec!["?"; argc].join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_arguments() {
        assert_eq!(call_text("p", 0), "call p()");
    }

    #[test]
    fn one_argument() {
        assert_eq!(call_text("app_getUser", 1), "call app_getUser(?)");
    }

    #[test]
    fn three_arguments() {
        assert_eq!(call_text("p", 3), "call p(?, ?, ?)");
    }
}
