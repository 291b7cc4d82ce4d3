//! Unit tests for the glyph-eval crate.

mod workspace_tests {
    use glyph_array::{Cell, Shape, Value, materialize};
    use rstest::{fixture, rstest};

    use crate::{Diagnostic, Evaluator, FunctionCatalog, ResultToken, Workspace};

    #[fixture]
    fn workspace() -> Workspace {
        Workspace::new()
    }

    fn define(workspace: &Workspace, lines: &[&str]) -> ResultToken {
        let block = materialize(lines).expect("materialize block");
        workspace
            .define_from_rows(block)
            .expect("workspace evaluator should not fail")
    }

    #[rstest]
    fn defines_dyadic_function(workspace: Workspace) {
        let token = define(&workspace, &["Z←X PLUS Y", "Z←X+Y"]);

        assert_eq!(token, ResultToken::defined("PLUS"));
        assert_eq!(token.canonical(), "PLUS");
        assert_eq!(
            workspace.function_names().expect("names"),
            vec!["PLUS".to_owned()]
        );
    }

    #[rstest]
    fn header_without_function_name_is_a_syntax_error(workspace: Workspace) {
        let token = define(&workspace, &["Z←X+Y"]);

        assert_eq!(token, ResultToken::Diagnostic(Diagnostic::SyntaxError));
        assert_eq!(token.canonical(), "SYNTAX ERROR");
        assert!(workspace.function_names().expect("names").is_empty());
    }

    #[rstest]
    fn empty_block_is_a_definition_error(workspace: Workspace) {
        let token = define(&workspace, &[]);
        assert_eq!(token.canonical(), "DEFN ERROR");
    }

    #[rstest]
    fn del_delimiters_are_stripped(workspace: Workspace) {
        let token = define(&workspace, &["∇R←DOUBLE X", "R←2×X", "∇"]);
        assert_eq!(token.canonical(), "DOUBLE");

        let source = workspace
            .function_source("DOUBLE")
            .expect("source lookup")
            .expect("DOUBLE should be defined");
        assert_eq!(
            source.rows(),
            Some(vec!["R←DOUBLE X".to_owned(), "R←2×X".to_owned()])
        );
    }

    #[rstest]
    fn redefinition_replaces_source(workspace: Workspace) {
        define(&workspace, &["R←F X", "R←X"]);
        define(&workspace, &["R←F X", "R←-X"]);

        let source = workspace
            .function_source("F")
            .expect("source lookup")
            .and_then(|value| value.rows())
            .expect("F should be defined");
        assert_eq!(source, vec!["R←F X", "R←-X"]);
        assert_eq!(workspace.function_names().expect("names").len(), 1);
    }

    #[rstest]
    fn duplicate_labels_are_rejected(workspace: Workspace) {
        let token = define(&workspace, &["F", "L1: 1", "L1: 2"]);
        assert_eq!(token, ResultToken::Diagnostic(Diagnostic::DefnError));
    }

    #[rstest]
    fn label_shadowing_an_argument_is_rejected(workspace: Workspace) {
        let token = define(&workspace, &["R←F X", "X: R←1"]);
        assert_eq!(token, ResultToken::Diagnostic(Diagnostic::DefnError));
    }

    #[rstest]
    fn character_matrix_rows_are_right_trimmed(workspace: Workspace) {
        let mut matrix = Value::with_shape(Shape::matrix(2, 5));
        for ch in "R←G  R←1  ".chars() {
            matrix.push_cell(Cell::Char(ch)).expect("push");
        }

        let token = workspace.define_from_rows(matrix).expect("define");
        assert_eq!(token.canonical(), "G");
        let source = workspace
            .function_source("G")
            .expect("source lookup")
            .and_then(|value| value.rows())
            .expect("G should be defined");
        assert_eq!(source, vec!["R←G", "R←1"]);
    }

    #[rstest]
    fn numeric_rows_are_a_domain_error(workspace: Workspace) {
        let value = Value::nested_vector(vec![Value::int_scalar(1)]);
        let token = workspace.define_from_rows(value).expect("define");
        assert_eq!(token.canonical(), "DOMAIN ERROR");
    }

    #[rstest]
    fn scalars_are_a_rank_error(workspace: Workspace) {
        let token = workspace
            .define_from_rows(Value::int_scalar(7))
            .expect("define");
        assert_eq!(token.canonical(), "RANK ERROR");
    }

    #[rstest]
    fn unknown_function_has_no_source(workspace: Workspace) {
        assert_eq!(workspace.function_source("NOPE").expect("lookup"), None);
    }
}

mod token_tests {
    use glyph_array::Value;

    use crate::{Diagnostic, ResultToken};

    #[test]
    fn value_tokens_render_on_one_line() {
        let token = ResultToken::Value(Value::char_vector("a\nb"));
        assert_eq!(token.canonical(), "a b");
    }

    #[test]
    fn diagnostics_render_interpreter_error_names() {
        let token: ResultToken = Diagnostic::ValueError.into();
        assert!(token.is_diagnostic());
        assert_eq!(token.canonical(), "VALUE ERROR");
    }
}
