//! Unit tests for the glyph-array crate.

mod materialize_tests {
    use rstest::rstest;

    use crate::{ArrayError, Cell, materialize};

    fn row_lengths(lines: &[&str]) -> Vec<usize> {
        let block = materialize(lines).expect("materialize block");
        block
            .cells()
            .iter()
            .map(|cell| cell.as_nested().map_or(usize::MAX, |row| row.element_count()))
            .collect()
    }

    #[test]
    fn single_line_becomes_one_character_row() {
        let block = materialize(&["Z←X+Y"]).expect("materialize");

        assert_eq!(block.rank(), 1);
        assert_eq!(block.element_count(), 1);
        let row = block
            .cell(0)
            .and_then(Cell::as_nested)
            .expect("first cell should point at a row");
        let chars: Vec<_> = row.cells().iter().filter_map(Cell::as_char).collect();
        assert_eq!(chars, vec!['Z', '←', 'X', '+', 'Y']);
    }

    #[test]
    fn empty_block_yields_empty_vector_that_passes_check() {
        let block = materialize::<&str>(&[]).expect("materialize empty block");

        assert_eq!(block.rank(), 1);
        assert_eq!(block.element_count(), 0);
        assert_eq!(block.check(), Ok(()));
    }

    #[test]
    fn empty_line_keeps_its_slot() {
        assert_eq!(row_lengths(&["A", "", "BC"]), vec![1, 0, 2]);
    }

    #[rstest]
    #[case::ascii(&["abc", "de"], vec![3, 2])]
    #[case::apl_glyphs(&["∇R←F X", "R←⍴⍳X", "∇"], vec![6, 5, 1])]
    #[case::blank_lines(&["", ""], vec![0, 0])]
    fn row_lengths_follow_decoded_character_counts(
        #[case] lines: &[&str],
        #[case] expected: Vec<usize>,
    ) {
        assert_eq!(row_lengths(lines), expected);
    }

    #[test]
    fn preserves_line_and_character_order() {
        let lines = ["first", "second", "third"];
        let block = materialize(&lines).expect("materialize");

        let rows = block.rows().expect("character rows");
        assert_eq!(rows, vec!["first", "second", "third"]);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_dropped() {
        let lines: [&[u8]; 1] = [b"A\xffB"];
        let block = materialize(&lines).expect("materialize");

        let rows = block.rows().expect("character rows");
        assert_eq!(rows, vec!["A\u{fffd}B"]);
    }

    #[test]
    fn repeated_materialization_is_deterministic() {
        let lines = ["R←A F B", "R←A+B"];
        let first = materialize(&lines).expect("first run");
        let second = materialize(&lines).expect("second run");

        assert_eq!(first, second);
    }

    #[test]
    fn materialized_rows_are_checked() {
        let block = materialize(&["abc"]).expect("materialize");
        let result: Result<(), ArrayError> = block.check();
        assert!(result.is_ok());
    }
}

mod value_tests {
    use crate::{ArrayError, Cell, Shape, Value};

    #[test]
    fn push_beyond_shape_overflows() {
        let mut value = Value::with_shape(Shape::vector(1));
        value.push_cell(Cell::Char('a')).expect("first push");

        let error = value
            .push_cell(Cell::Char('b'))
            .expect_err("second push should overflow");
        assert_eq!(error, ArrayError::ravel_overflow(1));
    }

    #[test]
    fn check_reports_incomplete_outer_value() {
        let mut value = Value::with_shape(Shape::vector(3));
        value.push_cell(Cell::Int(1)).expect("push");

        assert_eq!(value.check(), Err(ArrayError::structural(0, 3, 1)));
    }

    #[test]
    fn check_reports_incomplete_nested_value() {
        let row = Value::with_shape(Shape::vector(2));
        let mut outer = Value::with_shape(Shape::vector(1));
        outer.push_cell(Cell::pointer(row)).expect("push row");

        assert_eq!(outer.check(), Err(ArrayError::structural(1, 2, 0)));
    }

    #[test]
    fn matrix_rows_split_by_column_count() {
        let mut matrix = Value::with_shape(Shape::matrix(2, 2));
        for ch in ['a', 'b', 'c', 'd'] {
            matrix.push_cell(Cell::Char(ch)).expect("push");
        }

        assert_eq!(matrix.rows(), Some(vec!["ab".to_owned(), "cd".to_owned()]));
    }

    #[test]
    fn zero_column_matrix_has_empty_rows() {
        let matrix = Value::with_shape(Shape::matrix(3, 0));
        assert_eq!(matrix.rows(), Some(vec![String::new(); 3]));
    }

    #[test]
    fn rows_reject_numeric_content() {
        let value = Value::nested_vector(vec![Value::int_scalar(3)]);
        assert_eq!(value.rows(), None);
    }

    #[test]
    fn display_uses_high_minus_for_negative_integers() {
        let value = Value::nested_vector(vec![Value::int_scalar(-3), Value::int_scalar(4)]);
        assert_eq!(value.to_string(), "¯3 4");
    }

    #[test]
    fn display_writes_character_vectors_verbatim() {
        assert_eq!(Value::char_vector("R←F X").to_string(), "R←F X");
    }

    #[test]
    fn scalar_shape_has_unit_volume() {
        assert_eq!(Shape::scalar().volume(), 1);
        assert_eq!(Shape::matrix(2, 3).volume(), 6);
        assert_eq!(Shape::matrix(2, 3).to_string(), "2 3");
    }

    #[test]
    fn oversized_shape_saturates_instead_of_overflowing() {
        let shape = Shape::new(vec![usize::MAX, 2]);
        assert_eq!(shape.volume(), usize::MAX);
        assert_eq!(Shape::new(vec![usize::MAX, 0]).volume(), 0);

        let mut value = Value::with_shape(shape);
        value.push_cell(Cell::Int(1)).expect("push into oversized value");
        assert_eq!(
            value.check(),
            Err(ArrayError::structural(0, usize::MAX, 1))
        );
    }
}
