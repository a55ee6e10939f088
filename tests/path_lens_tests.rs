//! Integration tests for path lenses over [`Value`].

use focal::error::LensError;
use focal::optics::{Lens, PathLens, WritePolicy, from_path};
use focal::path;
use focal::record;
use focal::value::{Key, Value};
use rstest::rstest;

// =============================================================================
// Reads
// =============================================================================

#[rstest]
fn test_reads_a_nested_value() {
    let ab_lens = from_path(["a", "b"]);
    assert_eq!(ab_lens.peek(&record! { "a" => record! { "b" => 3 } }), Value::from(3));
}

#[rstest]
#[case(record! {})]
#[case(record! { "a" => 1 })]
#[case(record! { "a" => record! { "c" => 1 } })]
#[case(Value::Null)]
#[case(Value::Absent)]
fn test_is_safe_on_missing_paths(#[case] source: Value) {
    assert_eq!(from_path(["a", "b"]).peek(&source), Value::Absent);
}

#[rstest]
fn test_reads_array_elements_by_index() {
    let lens = from_path(path!["rows", 1, "name"]);
    let source = record! {
        "rows" => Value::array([record! { "name" => "first" }, record! { "name" => "second" }]),
    };

    assert_eq!(lens.peek(&source), Value::from("second"));
    assert_eq!(from_path(path!["rows", 5]).peek(&source), Value::Absent);
}

#[rstest]
fn test_integer_like_field_reads_array_element() {
    let source = record! { "items" => Value::array([10, 20]) };
    assert_eq!(from_path(["items", "1"]).peek(&source), Value::from(20));
}

// =============================================================================
// Writes
// =============================================================================

#[rstest]
fn test_writes_into_an_empty_record() {
    let written = from_path(["a", "b"]).set(record! {}, Value::from(3)).unwrap();
    assert_eq!(written, record! { "a" => record! { "b" => 3 } });
}

#[rstest]
fn test_writes_keep_siblings() {
    let source = record! { "a" => record! { "b" => 1, "c" => 2 }, "d" => 3 };
    let written = from_path(["a", "b"]).set(source, Value::from(9)).unwrap();

    assert_eq!(written, record! { "a" => record! { "b" => 9, "c" => 2 }, "d" => 3 });
}

#[rstest]
fn test_writes_share_untouched_branches() {
    let source = record! {
        "left" => record! { "x" => 1 },
        "right" => record! { "y" => record! { "z" => 2 } },
    };
    let written = from_path(["right", "y", "z"]).set(source.clone(), Value::from(3)).unwrap();

    let left = from_path(["left"]);
    let right = from_path(["right"]);
    assert!(left.peek(&written).same_ref(&left.peek(&source)));
    assert!(!right.peek(&written).same_ref(&right.peek(&source)));
    assert!(!written.same_ref(&source));
}

#[rstest]
fn test_writing_the_same_scalar_still_rebuilds_the_spine() {
    let source = record! { "a" => record! { "b" => 1 } };
    let written = from_path(["a", "b"]).set(source.clone(), Value::from(1)).unwrap();

    assert_eq!(written, source);
    assert!(!written.same_ref(&source));
}

#[rstest]
#[case(path!["items", 0], Value::array(["x", "b"]))]
#[case(path!["items", 2], Value::array(["a", "b", "x"]))]
#[case(path!["items", 4], record! { "0" => "a", "1" => "b", "4" => "x" })]
#[case(path!["items", "7"], record! { "0" => "a", "1" => "b", "7" => "x" })]
fn test_array_writes(#[case] path: focal::value::Path, #[case] expected_items: Value) {
    let source = record! { "items" => Value::array(["a", "b"]) };
    let written = from_path(path).set(source, Value::from("x")).unwrap();

    assert_eq!(written, record! { "items" => expected_items });
}

#[rstest]
#[case(path!["items", usize::MAX])]
#[case(path!["items", "18446744073709551615"])]
#[case(path!["items", 1usize << 40, "deeper"])]
fn test_huge_indices_write_without_allocating(#[case] path: focal::value::Path) {
    let source = record! { "items" => Value::array([1, 2, 3]) };
    let lens = from_path(path);
    let written = lens.set(source, Value::from(9)).unwrap();

    assert_eq!(lens.peek(&written), Value::from(9));
    assert_eq!(from_path(path!["items", 0]).peek(&written), Value::from(1));
}

#[rstest]
fn test_set_in_and_get_in_agree_with_the_lens() {
    use focal::optics::PathNode;

    let path = path!["a", "b"];
    let source = record! { "a" => record! {} };
    let written = source.set_in(&path, Value::from(true));

    assert_eq!(written.get_in(&path), Value::from(true));
    assert_eq!(from_path(path).set(source, Value::from(true)), Ok(written));
}

#[rstest]
fn test_nan_focus_is_written_but_never_equal() {
    let lens = from_path(["a"]);
    let source = record! { "a" => f64::NAN, "b" => 1 };

    let written = lens.set(source.clone(), lens.peek(&source)).unwrap();

    assert_ne!(written, source);
    let bits = |value: &Value| lens.peek(value).as_f64().map(f64::to_bits);
    assert_eq!(bits(&written), bits(&source));
    assert_eq!(from_path(["b"]).peek(&written), Value::from(1));
}

// =============================================================================
// Absent writes
// =============================================================================

#[rstest]
fn test_absent_write_removes_the_key() {
    let source = record! { "a" => record! { "b" => 1, "c" => 2 } };
    let written = from_path(["a", "b"]).set(source, Value::Absent).unwrap();

    assert_eq!(written, record! { "a" => record! { "c" => 2 } });
}

#[rstest]
fn test_absent_write_on_missing_path_returns_the_input() {
    let source = record! { "a" => 1 };
    let written = from_path(["x", "y"]).set(source.clone(), Value::Absent).unwrap();

    assert!(written.same_ref(&source));
}

#[rstest]
fn test_null_is_a_value_not_a_removal() {
    let written = from_path(["a"]).set(record! { "a" => 1 }, Value::Null).unwrap();

    assert_eq!(written, record! { "a" => Value::Null });
    assert_eq!(from_path(["a"]).peek(&written), Value::Null);
}

// =============================================================================
// Write policies
// =============================================================================

#[rstest]
fn test_permissive_policy_replaces_scalars() {
    let lens = from_path(["a", "b"]);
    assert_eq!(lens.policy(), WritePolicy::Permissive);

    let written = lens.set(record! { "a" => "text" }, Value::from(1)).unwrap();
    assert_eq!(written, record! { "a" => record! { "b" => 1 } });
}

#[rstest]
fn test_strict_policy_reports_the_offending_key() {
    let lens = from_path(["a", "b", "c"]).with_policy(WritePolicy::Strict);
    let error = lens
        .set(record! { "a" => record! { "b" => 7 } }, Value::from(1))
        .unwrap_err();

    assert_eq!(
        error,
        LensError::NotAContainer {
            key: Key::from("c"),
            depth: 2,
            found: "int",
        }
    );
}

#[rstest]
fn test_strict_policy_accepts_valid_writes() {
    let lens: PathLens = from_path(["a", "b"]).strict();
    let written = lens.set(record! {}, Value::from(1)).unwrap();

    assert_eq!(written, record! { "a" => record! { "b" => 1 } });
    assert_eq!(lens.path(), &path!["a", "b"]);
}
