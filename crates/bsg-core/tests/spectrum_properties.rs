use bsg_core::common::config::{CorrectionToggles, RunConfig};
use bsg_core::common::constants::{ELECTRON_MASS_KEV, NUCLEON_MASS_ME};
use bsg_core::domain::{BetaType, Diagnostics, DomainPolicy};
use bsg_core::modules::corrections::phase_space::phase_space;
use bsg_core::modules::corrections::{
    Branch, Correction, CorrectionPipeline, CorrectionSettings, DecayRateEvaluator,
};
use bsg_core::modules::matrix_elements::ConfiguredMatrixElements;
use bsg_core::modules::spectrum::analytics::integrate;
use bsg_core::modules::spectrum::{
    CollectingSink, DiscardSink, GridStep, Spectrum, SpectrumBuilder, SpectrumSample,
};
use bsg_core::modules::transition::{
    ExchangeParameterTable, NuclearParameters, load_exchange_table,
};
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .expect("crate lives two levels below the workspace root")
        .to_path_buf()
}

fn assert_scalar_close(label: &str, expected: f64, actual: f64, tolerance: f64) {
    assert!(
        (expected - actual).abs() <= tolerance,
        "{label}: expected {expected}, got {actual} (tolerance {tolerance})"
    );
}

fn load_demo(name: &str) -> RunConfig {
    let demos = workspace_root().join("demos");
    let mut config = RunConfig::load(&demos.join(name)).expect("demo deck should load");
    if let Some(path) = config.exchange_data.take() {
        config.exchange_data = Some(demos.join(path));
    }
    config
}

fn evaluator_for(config: &RunConfig, settings: CorrectionSettings) -> DecayRateEvaluator {
    let mut diagnostics = Diagnostics::new();
    let table = load_exchange_table(config, &mut diagnostics);
    let parameters = NuclearParameters::build(
        config,
        &ConfiguredMatrixElements::from_config(&config.matrix_elements),
        table.as_ref(),
        &mut diagnostics,
    )
    .expect("parameters should build");
    DecayRateEvaluator::new(
        CorrectionPipeline::new(parameters, settings),
        config.spectrum.out_of_range,
    )
}

fn deck(process: &str, mother_z: i32, daughter_z: i32, a: i32, q_value: f64) -> String {
    format!(
        r#"
[transition]
process = "{process}"
type = "Fermi"
q_value = {q_value}

[mother]
z = {mother_z}
a = {a}
spin_parity = 0

[daughter]
z = {daughter_z}
a = {a}
spin_parity = 0

[spectrum]
weak_magnetism = 0.0
induced_tensor = 0.0
lambda = 0.0
"#
    )
}

fn only(toggles: CorrectionToggles) -> CorrectionSettings {
    CorrectionSettings {
        toggles,
        ..CorrectionSettings::default()
    }
}

#[test]
fn demo_spectra_are_nonnegative_and_deterministic() {
    for name in ["co60.toml", "c14.toml", "mg22.toml"] {
        let config = load_demo(name);
        let evaluator = evaluator_for(&config, CorrectionSettings::from_config(&config));
        let builder = SpectrumBuilder::new(&evaluator);

        let mut sink = CollectingSink::new();
        let first = builder
            .build_from_config(&config.spectrum, &mut sink)
            .expect("demo spectrum should build");
        let second = builder
            .build_from_config(&config.spectrum, &mut DiscardSink)
            .expect("demo spectrum should rebuild");

        assert!(first.len() > 3, "{name}: {} samples", first.len());
        assert_eq!(first, second, "{name}: rebuild differs");
        assert_eq!(sink.samples().len(), first.len());
        for sample in first.iter() {
            assert!(sample.rate >= 0.0 && sample.neutrino_rate >= 0.0, "{name}: {sample:?}");
        }
        assert!(first.iter().any(|sample| sample.rate > 0.0), "{name}: empty spectrum");
    }
}

#[test]
fn phase_space_only_chain_is_the_raw_phase_space() {
    let config = load_demo("co60.toml");
    let evaluator = evaluator_for(&config, CorrectionSettings::phase_space_only());
    let w0 = evaluator.parameters().w0();
    for w in [1.01, 1.2, 1.4, w0 - 1.0e-3] {
        let rate = evaluator.evaluate(w);
        assert_eq!(rate.rate, phase_space(w, w0, false));
        assert_eq!(rate.neutrino_rate, phase_space(w0 - w + 1.0, w0, false));
    }
}

#[test]
fn grid_is_ascending_with_expected_count() {
    let config = load_demo("co60.toml");
    let evaluator = evaluator_for(&config, CorrectionSettings::from_config(&config));
    let w0 = evaluator.parameters().w0();

    for step_kev in [1.0, 3.7, 25.0] {
        let spectrum = SpectrumBuilder::new(&evaluator)
            .build(0.0, 0.0, GridStep::Fixed(step_kev), &mut DiscardSink)
            .expect("spectrum should build");
        let expected = ((w0 - 1.0) / (step_kev / ELECTRON_MASS_KEV)).floor() as usize + 1;
        assert!(
            spectrum.len().abs_diff(expected) <= 1,
            "step {step_kev}: {} samples, expected {expected}",
            spectrum.len()
        );
        assert!(spectrum.samples().windows(2).all(|pair| pair[1].w > pair[0].w));
    }
}

#[test]
fn constant_spectrum_integrates_exactly() {
    let samples = (0..=120)
        .map(|index| SpectrumSample {
            w: 1.0 + 0.025 * f64::from(index),
            rate: 0.75,
            neutrino_rate: 0.75,
        })
        .collect::<Vec<_>>();
    let spectrum = Spectrum::new(samples);
    let width = spectrum.samples()[120].w - spectrum.samples()[0].w;
    let f = spectrum.analytics().phase_space_integral().expect("integral");
    assert_scalar_close("constant integral", 0.75 * width, f, 1.0e-12);
}

#[test]
fn hydrogen_daughter_spectrum_rises_then_falls() {
    let q_value = ELECTRON_MASS_KEV * (2.0 + 4.0 / NUCLEON_MASS_ME);
    let config = RunConfig::from_toml_str("hydrogen", &deck("B-", 0, 1, 1, q_value))
        .expect("deck should parse");
    let evaluator = evaluator_for(
        &config,
        only(CorrectionToggles {
            phase_space: true,
            fermi: true,
            ..CorrectionToggles::none()
        }),
    );
    let w0 = evaluator.parameters().w0();
    assert_scalar_close("W0", 3.0, w0, 1.0e-5);

    let spectrum = SpectrumBuilder::new(&evaluator)
        .build(0.0, (w0 - 1.0) * ELECTRON_MASS_KEV, GridStep::Fixed(10.0), &mut DiscardSink)
        .expect("spectrum should build");
    let rates = spectrum.iter().map(|sample| sample.rate).collect::<Vec<_>>();

    assert_eq!(rates[0], 0.0);
    let peak = rates
        .iter()
        .enumerate()
        .fold(0, |best, (index, rate)| if *rate > rates[best] { index } else { best });
    assert!(peak > 0 && peak < rates.len() - 1);
    assert!(rates[..=peak].windows(2).all(|pair| pair[1] >= pair[0]));
    assert!(rates[peak..].windows(2).all(|pair| pair[1] <= pair[0]));
    let last = rates[rates.len() - 1];
    assert!(last < 1.0e-2 * rates[peak], "rate near W0 is {last}");
}

#[test]
fn exchange_is_identity_for_positron_emitters() {
    let table = ExchangeParameterTable::parse("12 -0.001 0.0 0.08 35.0 0.0 0.0 0.0 0.0 0.0\n")
        .expect("table should parse");
    let config = RunConfig::from_toml_str("positron", &deck("B+", 12, 11, 22, 4124.0))
        .expect("deck should parse");
    let parameters = NuclearParameters::build(
        &config,
        &ConfiguredMatrixElements::default(),
        Some(&table),
        &mut Diagnostics::new(),
    )
    .expect("parameters should build");
    assert_eq!(parameters.beta_type(), BetaType::Positron);

    let pipeline = CorrectionPipeline::new(parameters, CorrectionSettings::default());
    let w0 = pipeline.parameters().w0();
    let steps = 200;
    for index in 1..steps {
        let w = 1.0 + (w0 - 1.0) * f64::from(index) / f64::from(steps);
        assert_eq!(pipeline.factor(Correction::Exchange, w, Branch::Electron), 1.0);
        assert_eq!(pipeline.factor(Correction::Exchange, w, Branch::Neutrino), 1.0);
    }
}

#[test]
fn atomic_mismatch_is_skipped_with_energy_deficit() {
    let text = deck("B-", 19, 20, 42, 1500.0).replace(
        "q_value = 1500",
        "atomic_energy_deficit = 0.35\nq_value = 1500",
    );
    let config = RunConfig::from_toml_str("deficit", &text).expect("deck should parse");
    let evaluator = evaluator_for(&config, CorrectionSettings::default());
    let pipeline = evaluator.pipeline();
    for w in [1.05, 2.0, 3.5] {
        assert_eq!(pipeline.factor(Correction::AtomicMismatch, w, Branch::Electron), 1.0);
    }

    let config = RunConfig::from_toml_str("no-deficit", &deck("B-", 19, 20, 42, 1500.0))
        .expect("deck should parse");
    let evaluator = evaluator_for(&config, CorrectionSettings::default());
    assert!(
        evaluator
            .pipeline()
            .factor(Correction::AtomicMismatch, 2.0, Branch::Electron)
            < 1.0
    );
}

#[test]
fn log_ft_with_unit_halflife_is_log_of_integral() {
    for name in ["co60.toml", "c14.toml"] {
        let config = load_demo(name);
        let evaluator = evaluator_for(&config, CorrectionSettings::from_config(&config));
        let spectrum = SpectrumBuilder::new(&evaluator)
            .build_from_config(&config.spectrum, &mut DiscardSink)
            .expect("spectrum should build");
        let f = integrate(spectrum.samples(), |sample| sample.rate).expect("integral");
        assert_eq!(spectrum.analytics().log_ft(1.0).expect("log f"), f.log10());
    }
}

#[test]
fn endpoint_policy_choices_bound_the_grid() {
    let config = load_demo("mg22.toml");
    assert_eq!(config.spectrum.out_of_range, DomainPolicy::Skip);
    let evaluator = evaluator_for(&config, CorrectionSettings::from_config(&config));
    let w0 = evaluator.parameters().w0();
    let spectrum = SpectrumBuilder::new(&evaluator)
        .build(0.0, 5000.0, GridStep::Fixed(20.0), &mut DiscardSink)
        .expect("skip drops out-of-range points");
    assert!(spectrum.iter().all(|sample| sample.w <= w0));
}

#[test]
fn coupling_constants_reach_shape_factor_and_radiative_terms() {
    let base = load_demo("co60.toml");
    let mut pseudoscalar = base.clone();
    pseudoscalar.couplings.g_p = 50.0;
    let mut no_magnetism = base.clone();
    no_magnetism.couplings.g_m = 0.0;

    let reference = evaluator_for(&base, CorrectionSettings::from_config(&base));
    let with_gp = evaluator_for(&pseudoscalar, CorrectionSettings::from_config(&pseudoscalar));
    let without_gm = evaluator_for(&no_magnetism, CorrectionSettings::from_config(&no_magnetism));
    let w0 = reference.parameters().w0();

    for fraction in [0.25, 0.5, 0.75] {
        let w = 1.0 + (w0 - 1.0) * fraction;
        let electron = |evaluator: &DecayRateEvaluator, correction| {
            evaluator.pipeline().factor(correction, w, Branch::Electron)
        };

        assert_ne!(
            electron(&reference, Correction::ShapeFactor),
            electron(&with_gp, Correction::ShapeFactor),
            "gP at W = {w}"
        );
        assert_eq!(
            electron(&reference, Correction::Radiative),
            electron(&with_gp, Correction::Radiative)
        );
        assert_ne!(
            electron(&reference, Correction::Radiative),
            electron(&without_gm, Correction::Radiative),
            "gM at W = {w}"
        );
        assert_ne!(reference.evaluate(w).rate, with_gp.evaluate(w).rate);
        assert_ne!(reference.evaluate(w).rate, without_gm.evaluate(w).rate);
    }
}

#[test]
fn spin_zero_partner_gets_unique_forbidden_phase_space() {
    let text = deck("B-", 19, 20, 42, 1500.0).replacen("spin_parity = 0", "spin_parity = -4", 1);
    let config = RunConfig::from_toml_str("unique", &text).expect("deck should parse");
    let evaluator = evaluator_for(&config, CorrectionSettings::phase_space_only());
    let w0 = evaluator.parameters().w0();

    for w in [1.2, 2.0, w0 - 0.5] {
        let p2 = w * w - 1.0;
        let q = w0 - w;
        let expected = phase_space(w, w0, false) * (q * q + p2);
        let rate = evaluator.evaluate(w).rate;
        assert_scalar_close("unique phase space", expected, rate, 1.0e-12 * expected);
        assert_eq!(evaluator.evaluate(w).rate, phase_space(w, w0, true));
    }
}
