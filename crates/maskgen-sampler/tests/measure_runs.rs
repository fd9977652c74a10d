use maskgen_core::MaskError;
use maskgen_sampler::{
    measure, measure_ising, measure_percolation, MeasureConfig, MeasureReport, ModelKind,
};

fn config(model: ModelKind, size: i64, parameter: Option<f64>, sweeps: usize) -> MeasureConfig {
    MeasureConfig {
        size,
        parameter,
        sweeps,
        ..MeasureConfig::new(model)
    }
}

#[test]
fn ising_measurement_is_reproducible() {
    let config = config(ModelKind::Ising, 6, None, 64);
    let a = measure_ising(&config).unwrap();
    let b = measure_ising(&config).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.thermalization, 8);
    assert_eq!(a.energy.count, 64);
    assert!(a.magnetization2.mean >= 0.0 && a.magnetization2.mean <= 1.0);
}

#[test]
fn cold_ising_stays_ordered() {
    let report = measure_ising(&config(ModelKind::Ising, 4, Some(50.0), 32)).unwrap();
    assert_eq!(report.magnetization2.mean, 1.0);
    assert_eq!(report.energy.mean, -2.0);
    assert_eq!(report.energy.error, 0.0);
}

#[test]
fn fully_open_percolation_is_one_cluster() {
    let report = measure_percolation(&config(ModelKind::Percolation, 5, Some(1.0), 10)).unwrap();
    assert_eq!(report.clusters.mean, 1.0);
    assert_eq!(report.largest_density.mean, 1.0);
    assert_eq!(report.final_configuration.occupied(), 25);
}

#[test]
fn closed_percolation_has_isolated_sites() {
    let report = measure_percolation(&config(ModelKind::Percolation, 5, Some(0.0), 10)).unwrap();
    assert_eq!(report.clusters.mean, 25.0);
    assert!((report.largest_density.mean - 1.0 / 25.0).abs() < 1e-12);
}

#[test]
fn zero_sweeps_are_rejected() {
    let err = measure_percolation(&config(ModelKind::Percolation, 5, None, 0)).unwrap_err();
    assert!(matches!(err, MaskError::Configuration(_)));
    assert_eq!(err.info().code, "zero-sweeps");
}

#[test]
fn reports_serialize_to_json() {
    let report = measure_percolation(&config(ModelKind::Percolation, 4, None, 8)).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"largest_density\""));
    assert!(json.contains("\"final_configuration\""));
}

#[test]
fn runner_rejects_a_config_for_the_other_model() {
    let err = measure_ising(&config(ModelKind::Percolation, 4, None, 8)).unwrap_err();
    assert!(matches!(err, MaskError::Configuration(_)));
    assert_eq!(err.info().code, "model-mismatch");
    assert_eq!(
        err.info().context.get("model").map(String::as_str),
        Some("percolation")
    );

    let err = measure_percolation(&config(ModelKind::Ising, 4, None, 8)).unwrap_err();
    assert_eq!(err.info().code, "model-mismatch");
}

#[test]
fn measure_dispatches_on_the_configured_model() {
    let config = config(ModelKind::Percolation, 4, Some(1.0), 8);
    let report = measure(&config).unwrap();
    assert!(matches!(report, MeasureReport::Percolation(_)));
    assert_eq!(report.final_configuration().occupied(), 16);
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        serde_json::to_value(measure_percolation(&config).unwrap()).unwrap()
    );

    let report = measure(&MeasureConfig {
        sweeps: 8,
        ..MeasureConfig::new(ModelKind::Ising)
    })
    .unwrap();
    assert!(matches!(report, MeasureReport::Ising(_)));
}
