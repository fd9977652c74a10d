mod common;

use common::{size, CountingEngine};
use maskgen_core::{MaskError, ModelParameter};
use maskgen_sampler::{samples, IsingOptions, Samples, SweepSchedule};
use proptest::prelude::*;

#[test]
fn ising_schedule_reads_after_128_257_386_sweeps() {
    let stream = samples::<CountingEngine>(
        0,
        size(4),
        3,
        ModelParameter::Default,
        IsingOptions::default().schedule(),
    )
    .unwrap();
    let counts: Vec<u64> = stream.map(Result::unwrap).collect();
    assert_eq!(counts, vec![128, 257, 386]);
}

#[test]
fn percolation_schedule_is_one_sweep_per_sample() {
    let stream = samples::<CountingEngine>(
        0,
        size(8),
        10,
        ModelParameter::Default,
        SweepSchedule::independent(),
    )
    .unwrap();
    let counts: Vec<u64> = stream.map(Result::unwrap).collect();
    assert_eq!(counts, (1..=10).collect::<Vec<u64>>());
}

#[test]
fn nothing_runs_before_the_first_request() {
    let mut stream = Samples::new(CountingEngine::healthy(), 2, SweepSchedule::default());
    assert_eq!(stream.engine().advances, 0);
    assert_eq!(stream.engine().snapshots.get(), 0);
    assert_eq!(stream.sweeps_performed(), 0);

    assert_eq!(stream.next().unwrap().unwrap(), 128);
    assert_eq!(stream.engine().snapshots.get(), 1);
    assert_eq!(stream.emitted(), 1);
}

#[test]
fn empty_ising_stream_still_runs_burn_in_on_first_pull() {
    let mut stream = Samples::new(CountingEngine::healthy(), 0, SweepSchedule::default());
    assert_eq!(stream.engine().advances, 0);
    assert!(stream.next().is_none());
    assert!(stream.is_thermalized());
    assert_eq!(stream.engine().advances, 128);
    assert_eq!(stream.engine().snapshots.get(), 0);
    assert_eq!(SweepSchedule::default().total_sweeps(0), 128);

    assert!(stream.next().is_none());
    assert_eq!(stream.engine().advances, 128);
}

#[test]
fn empty_percolation_stream_never_sweeps() {
    let mut stream = Samples::new(CountingEngine::healthy(), 0, SweepSchedule::independent());
    assert!(stream.next().is_none());
    assert_eq!(stream.engine().advances, 0);
    assert_eq!(stream.engine().snapshots.get(), 0);
}

#[test]
fn burn_in_failure_on_empty_stream_is_yielded() {
    let mut stream = samples::<CountingEngine>(
        5,
        size(4),
        0,
        ModelParameter::Default,
        SweepSchedule::default(),
    )
    .unwrap();
    assert_eq!(stream.size_hint(), (0, Some(1)));
    let err = stream.next().unwrap().unwrap_err();
    assert_eq!(err.info().code, "injected");
    assert!(stream.next().is_none());
    assert_eq!(stream.size_hint(), (0, Some(0)));
    assert_eq!(stream.sweeps_performed(), 4);
}

#[test]
fn stream_ends_after_exactly_n_items() {
    let mut stream = Samples::new(
        CountingEngine::healthy(),
        2,
        SweepSchedule::thermalized(0, 0),
    );
    assert_eq!(stream.size_hint(), (2, Some(2)));
    assert_eq!(stream.next().unwrap().unwrap(), 0);
    assert_eq!(stream.next().unwrap().unwrap(), 1);
    assert!(stream.next().is_none());
    assert!(stream.next().is_none());
    assert_eq!(stream.size_hint(), (0, Some(0)));
}

#[test]
fn advance_failure_is_yielded_once_then_stream_ends() {
    // sample 0 is read after 128 sweeps; sample 1 would need sweeps 129..=257
    let mut stream = samples::<CountingEngine>(
        130,
        size(4),
        5,
        ModelParameter::Default,
        SweepSchedule::default(),
    )
    .unwrap();
    assert_eq!(stream.next().unwrap().unwrap(), 128);
    let err = stream.next().unwrap().unwrap_err();
    assert!(matches!(err, MaskError::Engine(_)));
    assert_eq!(err.info().code, "injected");
    assert_eq!(
        err.info().context.get("sweep").map(String::as_str),
        Some("130")
    );
    assert!(stream.next().is_none());
    assert_eq!(stream.sweeps_performed(), 129);
    assert_eq!(stream.engine().snapshots.get(), 1);
}

#[test]
fn snapshot_failure_terminates_the_stream() {
    let engine = CountingEngine {
        fail_snapshot: true,
        ..CountingEngine::healthy()
    };
    let results: Vec<_> = Samples::new(engine, 3, SweepSchedule::independent()).collect();
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(MaskError::Engine(_))));
}

#[test]
fn invalid_parameter_fails_before_any_sweep() {
    let err = samples::<CountingEngine>(
        0,
        size(4),
        3,
        ModelParameter::Value(-2.0),
        SweepSchedule::default(),
    )
    .unwrap_err();
    assert!(matches!(err, MaskError::Parameter(_)));
}

#[test]
fn early_stop_leaves_later_sweeps_unrun() {
    let mut stream = Samples::new(
        CountingEngine::healthy(),
        100,
        SweepSchedule::independent(),
    );
    let taken: Vec<u64> = stream.by_ref().take(3).map(Result::unwrap).collect();
    assert_eq!(taken, vec![1, 2, 3]);
    assert_eq!(stream.engine().advances, 3);
}

proptest! {
    #[test]
    fn sweeps_before_kth_sample_follow_schedule(
        therm in 0usize..40,
        interval in 0usize..20,
        n in 0usize..12,
    ) {
        let schedule = SweepSchedule::thermalized(therm, interval);
        let stream = Samples::new(CountingEngine::healthy(), n, schedule);
        let counts: Vec<u64> = stream.map(Result::unwrap).collect();
        prop_assert_eq!(counts.len(), n);
        prop_assert_eq!(schedule.total_sweeps(0), therm);
        for (index, &count) in counts.iter().enumerate() {
            let expected = therm + index * (interval + 1);
            prop_assert_eq!(count as usize, expected);
            prop_assert_eq!(schedule.total_sweeps(index + 1), expected);
        }
    }
}
