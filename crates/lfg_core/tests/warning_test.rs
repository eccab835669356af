use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use lfg_core::factory::MAX_STREAMS;
use lfg_core::{ParameterSet, StreamFactory, StreamState};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber that records warnings, returning the log text.
fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, capture.contents())
}

#[test]
fn quiet_creation_logs_nothing() {
    let (_, logs) = capture_warnings(|| {
        let factory = StreamFactory::new(ParameterSet::L17K5);
        let mut parent = factory.create(0, 12_345);
        let _ = factory.create(1, 12_345);
        parent.spawn()
    });
    assert!(logs.is_empty(), "unexpected warnings: {logs}");
}

#[test]
fn changing_seed_warns_but_still_creates() {
    let (mut state, logs) = capture_warnings(|| {
        let factory = StreamFactory::new(ParameterSet::L17K5);
        let _ = factory.create(0, 12_345);
        factory.create(7, 99)
    });
    assert!(logs.contains("changing global seed value"), "logs: {logs}");
    assert!(logs.contains("WARN"));
    assert_eq!(state.init_seed(), 99);
    assert_eq!(state.draw().to_bits(), 0x3fe480f1a68054ec);
}

#[test]
fn shared_factory_checks_seeds_across_call_sites() {
    fn create_in_worker(index: u32, seed: u32) -> StreamState {
        StreamFactory::shared(ParameterSet::L31K6).create(index, seed)
    }

    let (_, quiet) = capture_warnings(|| {
        create_in_worker(0, 4_242);
        create_in_worker(1, 4_242)
    });
    assert!(quiet.is_empty(), "unexpected warnings: {quiet}");

    let (state, logs) = capture_warnings(|| create_in_worker(2, 17));
    assert!(logs.contains("changing global seed value from 4242 to 17"), "logs: {logs}");
    assert_eq!(state.init_seed(), 17);
    assert_eq!(
        StreamFactory::shared(ParameterSet::L31K6).cached_seed(),
        Some(4_242)
    );
}

#[test]
fn index_past_stream_limit_warns() {
    let (state, logs) = capture_warnings(|| {
        StreamFactory::new(ParameterSet::L31K6).create(MAX_STREAMS, 1)
    });
    assert!(logs.contains("maximum number of independent streams"), "logs: {logs}");
    assert_eq!(state.generator_id(), MAX_STREAMS);
}

#[test]
fn spawning_past_tree_depth_warns_and_yields_usable_child() {
    for params in ParameterSet::ALL {
        let mut words = StreamFactory::new(params).create(0, 12_345).to_words();
        words[params.spawn_words() - 1] = 1 << 30;
        let mut parent = StreamState::from_words(&words).unwrap();

        let (mut child, logs) = capture_warnings(|| parent.spawn());
        assert_eq!(
            logs.matches("branched maximum number of times").count(),
            2,
            "{params}: child derivation and parent update should both warn: {logs}"
        );

        assert_eq!(child.size(), params.size());
        assert_eq!(child.to_words().len(), params.size());
        assert_eq!(parent.spawn_index()[params.spawn_words() - 1], 0);
        for _ in 0..1_000 {
            let value = child.draw();
            assert!((0.0..1.0).contains(&value));
        }
    }
}

#[test]
fn repeated_spawning_eventually_reports_overflow() {
    let (children, logs) = capture_warnings(|| {
        let mut parent = StreamFactory::new(ParameterSet::L17K5).create(3, 12_345);
        parent.spawn_many(470)
    });
    assert_eq!(children.len(), 470);
    assert!(logs.contains("branched maximum number of times"));
}
