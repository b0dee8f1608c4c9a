//! Model and selector behaviour through the public API.

use driftline::domain::{choose_signal, Decision, MomentumVolModel, SignalReason, SignalThresholds};

const THRESHOLDS: SignalThresholds = SignalThresholds::new(0.04, 0.03);

#[test]
fn constant_history_is_exactly_neutral() {
    let model = MomentumVolModel::new(40, 60);
    let prices = vec![100.0; 100];

    assert_eq!(model.predict_up_probability(&prices), 0.5);
}

#[test]
fn cheap_up_side_against_neutral_model_buys_up() {
    let signal = choose_signal(0.50, 0.40, THRESHOLDS, 0.02, 0.02);

    assert!((signal.edge_up - 0.10).abs() < 1e-12);
    assert!((signal.edge_down + 0.10).abs() < 1e-12);
    assert_eq!(signal.decision, Decision::BuyUp);
    assert_eq!(signal.reason, SignalReason::EdgeUp);
}

#[test]
fn model_output_stays_inside_clamp() {
    let model = MomentumVolModel::new(3, 5);
    let paths: Vec<Vec<f64>> = vec![
        (0..30).map(|i| 100.0 * 1.05_f64.powi(i)).collect(),
        (0..30).map(|i| 100.0 * 0.95_f64.powi(i)).collect(),
        (0..30)
            .map(|i| if i % 2 == 0 { 100.0 } else { 130.0 })
            .collect(),
    ];
    for prices in paths {
        let p = model.predict_up_probability(&prices);
        assert!((0.01..=0.99).contains(&p), "probability {p} out of range");
    }
}

#[test]
fn same_inputs_same_outputs() {
    let model = MomentumVolModel::new(5, 5);
    let prices: Vec<f64> = (0..20).map(|i| 100.0 + (f64::from(i) * 0.7).sin()).collect();

    let first = model.predict_up_probability(&prices);
    let second = model.predict_up_probability(&prices);
    assert_eq!(first, second);
    assert_eq!(
        choose_signal(first, 0.47, THRESHOLDS, 0.01, 0.02),
        choose_signal(second, 0.47, THRESHOLDS, 0.01, 0.02)
    );
}

#[test]
fn spread_gate_takes_priority_over_edges() {
    let signal = choose_signal(0.90, 0.40, THRESHOLDS, 0.031, 0.0);

    assert_eq!(signal.decision, Decision::Hold);
    assert_eq!(signal.reason, SignalReason::SpreadTooWide);
    assert_eq!(signal.chosen_edge, signal.edge_up.max(signal.edge_down));
}
