//! Diagnostic events emitted by lens operations.

use std::io;
use std::sync::{Arc, Mutex};

use focal::optics::{DynLens, Lens, compose, create_lens_memoized, from_path, read_only};
use focal::record;
use focal::value::Value;
use rstest::rstest;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buffer: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buffer);
        Ok(buffer.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLog {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture(filter: &str, action: impl FnOnce()) -> String {
    let log = CapturedLog::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(log.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, action);
    log.contents()
}

#[rstest]
fn test_strict_rejection_is_logged() {
    let output = capture("focal=debug", || {
        let _ = from_path(["a", "b"]).strict().set(record! { "a" => 1 }, Value::from(2));
    });

    assert!(output.contains("strict path write rejected"));
    assert!(output.contains("depth=1"));
}

#[rstest]
fn test_read_only_write_is_logged() {
    let output = capture("focal=debug", || {
        let _ = read_only(|value: &Value| value.clone()).set(Value::Null, Value::Null);
    });

    assert!(output.contains("write attempted through a read-only lens"));
}

#[rstest]
fn test_empty_composition_is_logged() {
    let output = capture("focal=debug", || {
        let _ = compose(Vec::<DynLens<Value, Value>>::new());
    });

    assert!(output.contains("compose called without lenses"));
}

#[rstest]
fn test_memo_cache_events_are_trace_level() {
    let source = record! { "a" => 1 };
    let lens = create_lens_memoized(|value: &Value| value.clone(), |_: Value, focus: Value| focus);

    let at_debug = capture("focal=debug", || {
        lens.peek(&source);
    });
    let at_trace = capture("focal=trace", || {
        lens.peek(&source);
        lens.cache().clear();
        lens.peek(&source);
    });

    assert!(!at_debug.contains("memo cache"));
    assert!(at_trace.contains("memo cache hit"));
    assert!(at_trace.contains("memo cache miss"));
}
