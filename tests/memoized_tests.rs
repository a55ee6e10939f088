//! Integration tests for memoized lenses.

use std::sync::atomic::{AtomicUsize, Ordering};

use focal::error::LensError;
use focal::optics::{Lens, compose, create_lens_memoized, from_path, read_only_memoized};
use focal::record;
use focal::value::{Key, Value};
use rstest::rstest;

fn read_a(value: &Value) -> Value {
    value.get(&Key::from("a")).cloned().unwrap_or_default()
}

fn write_a(value: Value, a: Value) -> Value {
    from_path(["a"]).set(value, a).unwrap_or_default()
}

// =============================================================================
// Caching
// =============================================================================

#[rstest]
fn test_same_reference_is_computed_once() {
    let calls = AtomicUsize::new(0);
    let lens = create_lens_memoized(
        |value: &Value| {
            calls.fetch_add(1, Ordering::SeqCst);
            read_a(value)
        },
        write_a,
    );
    let source = record! { "a" => 1 };

    for _ in 0..5 {
        assert_eq!(lens.peek(&source), Value::from(1));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn test_equal_but_distinct_values_recompute() {
    let calls = AtomicUsize::new(0);
    let lens = create_lens_memoized(
        |value: &Value| {
            calls.fetch_add(1, Ordering::SeqCst);
            read_a(value)
        },
        write_a,
    );

    lens.peek(&record! { "a" => 1 });
    lens.peek(&record! { "a" => 1 });

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[rstest]
fn test_only_the_latest_input_is_remembered() {
    let calls = AtomicUsize::new(0);
    let lens = create_lens_memoized(
        |value: &Value| {
            calls.fetch_add(1, Ordering::SeqCst);
            read_a(value)
        },
        write_a,
    );
    let first = record! { "a" => 1 };
    let second = record! { "a" => 2 };

    lens.peek(&first);
    lens.peek(&second);
    assert!(lens.cache().is_cached_for(&second));
    assert!(!lens.cache().is_cached_for(&first));

    assert_eq!(lens.peek(&first), Value::from(1));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[rstest]
fn test_set_bypasses_the_cache() {
    let calls = AtomicUsize::new(0);
    let lens = create_lens_memoized(
        |value: &Value| {
            calls.fetch_add(1, Ordering::SeqCst);
            read_a(value)
        },
        write_a,
    );
    let source = record! { "a" => 1, "b" => 2 };

    let updated = lens.set(source, Value::from(3)).unwrap();
    assert_eq!(updated, record! { "a" => 3, "b" => 2 });
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert_eq!(lens.peek(&updated), Value::from(3));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn test_clear_forces_recomputation() {
    let calls = AtomicUsize::new(0);
    let lens = create_lens_memoized(
        |value: &Value| {
            calls.fetch_add(1, Ordering::SeqCst);
            read_a(value)
        },
        write_a,
    );
    let source = record! { "a" => 1 };

    lens.peek(&source);
    lens.cache().clear();
    lens.peek(&source);

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// =============================================================================
// Read-only
// =============================================================================

#[rstest]
fn test_read_only_memoized_lens_still_caches() {
    let calls = AtomicUsize::new(0);
    let lens = read_only_memoized(|value: &Value| {
        calls.fetch_add(1, Ordering::SeqCst);
        read_a(value)
    });
    let source = record! { "a" => 4 };

    assert_eq!(lens.peek(&source), Value::from(4));
    assert_eq!(lens.peek(&source), Value::from(4));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn test_read_only_memoized_lens_rejects_writes() {
    let lens = read_only_memoized(read_a);
    let source = record! { "a" => 4 };

    assert!(lens.is_read_only());
    assert_eq!(lens.set(source.clone(), Value::from(5)), Err(LensError::ReadOnly));
    assert_eq!(lens.modify(source, |a: Value| a), Err(LensError::ReadOnly));
}

#[rstest]
fn test_read_only_memoized_lens_makes_the_chain_read_only() {
    let chain = compose([read_only_memoized(read_a).shared(), from_path(["outer"]).shared()]).unwrap();
    let source = record! { "outer" => record! { "a" => 1 } };

    assert_eq!(chain.peek(&source), Value::from(1));
    assert!(chain.is_read_only());
    assert_eq!(chain.set(source, Value::from(2)), Err(LensError::ReadOnly));
}

// =============================================================================
// Interaction with other combinators
// =============================================================================

#[rstest]
fn test_memoized_lens_composes() {
    let inner = create_lens_memoized(read_a, write_a).shared();
    let chain = compose([inner, from_path(["outer"]).shared()]).unwrap();
    let source = record! { "outer" => record! { "a" => 1 } };

    assert_eq!(chain.peek(&source), Value::from(1));
    assert_eq!(
        chain.set(source, Value::from(2)),
        Ok(record! { "outer" => record! { "a" => 2 } })
    );
}

#[rstest]
fn test_shared_between_threads() {
    let calls = AtomicUsize::new(0);
    let lens = create_lens_memoized(
        |value: &Value| {
            calls.fetch_add(1, Ordering::SeqCst);
            read_a(value)
        },
        write_a,
    );
    let source = record! { "a" => 7 };
    lens.peek(&source);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| assert_eq!(lens.peek(&source), Value::from(7)));
        }
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
