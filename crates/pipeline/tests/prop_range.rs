use gauge_core::Sample;
use gauge_pipeline::{History, Range};
use proptest::prelude::*;

fn bounded_f64() -> impl Strategy<Value = f64> {
    -1e6f64..1e6f64
}

fn arb_range() -> impl Strategy<Value = Range> {
    (bounded_f64(), bounded_f64())
        .prop_map(|(a, b)| Range::new(a.min(b), a.max(b)).unwrap())
}

fn arb_sample() -> impl Strategy<Value = Sample> {
    prop_oneof![
        4 => bounded_f64().prop_map(Sample::Value),
        1 => Just(Sample::Absent),
    ]
}

proptest! {
    // A single observation never narrows either bound
    #[test]
    fn observe_is_monotone(range in arb_range(), sample in arb_sample()) {
        let next = range.observe(sample);
        prop_assert!(next.low() <= range.low());
        prop_assert!(next.high() >= range.high());
        prop_assert!(next.low() <= next.high());
    }

    // Every observed value ends up inside the final range
    #[test]
    fn observed_values_are_contained(range in arb_range(), samples in prop::collection::vec(arb_sample(), 0..64)) {
        let mut r = range;
        for s in &samples {
            r = r.observe(*s);
        }
        for v in samples.iter().filter_map(|s| s.value()) {
            prop_assert!(r.low() <= v && v <= r.high());
        }
    }

    // After k > N pushes the history holds exactly the last N values
    #[test]
    fn history_keeps_tail(cap in 1usize..16, values in prop::collection::vec(bounded_f64(), 0..64)) {
        let mut history = History::new(cap);
        for v in &values {
            history.push(*v);
        }
        let expect: Vec<f64> = values.iter().copied().skip(values.len().saturating_sub(cap)).collect();
        prop_assert_eq!(history.len(), values.len().min(cap));
        prop_assert_eq!(history.to_vec(), expect);
    }

    // Mean stays between the smallest and largest held value (modulo rounding)
    #[test]
    fn mean_is_within_extremes(values in prop::collection::vec(bounded_f64(), 1..32)) {
        let mut history = History::new(values.len());
        for v in &values {
            history.push(*v);
        }
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = history.mean();
        prop_assert!(mean >= lo - 0.051 && mean <= hi + 0.051);
    }
}
