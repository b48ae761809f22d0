//! Calls racing the ready transition are forwarded exactly once, and each
//! thread's calls keep their relative order.

use std::collections::HashMap;
use std::sync::Barrier;
use std::thread;

use telemetry_facade::DeferredCall;

use crate::integration::test_utils::harness;

const THREADS: usize = 8;
const CALLS_PER_THREAD: i32 = 500;

#[test]
fn racing_ready_transition_loses_and_duplicates_nothing() {
    let h = harness();
    let barrier = Barrier::new(THREADS + 1);

    thread::scope(|scope| {
        for thread_id in 0..THREADS {
            let facade = h.facade.clone();
            let barrier = &barrier;
            scope.spawn(move || {
                barrier.wait();
                let name = format!("thread-{}", thread_id);
                for value in 0..CALLS_PER_THREAD {
                    facade.add_to_histogram(&name, value);
                }
            });
        }

        barrier.wait();
        thread::yield_now();
        h.facade.mark_engine_ready();
    });

    let calls = h.engine.calls();
    assert_eq!(calls.len(), THREADS * CALLS_PER_THREAD as usize);
    assert_eq!(h.facade.pending_calls(), 0);

    let mut per_thread: HashMap<String, Vec<i32>> = HashMap::new();
    for call in calls {
        match call {
            DeferredCall::AddHistogram { name, value } => {
                per_thread.entry(name).or_default().push(value)
            }
            other => panic!("unexpected call {:?}", other),
        }
    }
    assert_eq!(per_thread.len(), THREADS);
    let expected: Vec<i32> = (0..CALLS_PER_THREAD).collect();
    for values in per_thread.values() {
        assert_eq!(values, &expected);
    }
}
