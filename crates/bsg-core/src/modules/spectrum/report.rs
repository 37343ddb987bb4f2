//! Human-readable result report and its machine-readable summary.

use super::{GridStep, Spectrum};
use super::serialization::{format_fixed_f64, format_scientific_f64};
use crate::common::config::RunConfig;
use crate::common::constants::total_energy_to_kev;
use crate::common::elements::nuclide_label;
use crate::domain::{Diagnostic, Diagnostics};
use crate::modules::corrections::{Correction, DecayRateEvaluator};
use crate::modules::matrix_elements::{DerivedMatrixElements, Provenance};
use crate::modules::spectrum::AnalyticsError;
use serde::Serialize;

/// Everything a report needs, borrowed from one finished run.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub name: &'a str,
    pub config: &'a RunConfig,
    pub evaluator: &'a DecayRateEvaluator,
    pub spectrum: &'a Spectrum,
    pub summary: &'a RunSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectionState {
    pub name: &'static str,
    pub enabled: bool,
}

/// Derived quantities of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub name: String,
    pub mother: String,
    pub daughter: String,
    pub process: String,
    pub decay_type: String,
    pub mixing_ratio: Option<f64>,
    pub q_value_kev: f64,
    pub endpoint_kev: f64,
    pub w0: f64,
    pub profile: String,
    pub out_of_range: String,
    pub samples: usize,
    pub phase_space_integral: f64,
    pub partial_halflife: Option<f64>,
    /// `log ft` with a half-life, `log f` without one.
    pub log_ft: f64,
    pub external_log_ft: Option<f64>,
    pub ft_ratio: Option<f64>,
    pub mean_energy_kev: f64,
    pub matrix_elements: DerivedMatrixElements,
    pub corrections: Vec<CorrectionState>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunSummary {
    pub fn compute(
        name: &str,
        config: &RunConfig,
        evaluator: &DecayRateEvaluator,
        spectrum: &Spectrum,
        diagnostics: &Diagnostics,
    ) -> Result<Self, AnalyticsError> {
        let parameters = evaluator.parameters();
        let settings = evaluator.pipeline().settings();
        let analytics = spectrum.analytics();

        let partial_halflife = config.transition.partial_halflife;
        let external_log_ft = config.transition.log_ft;
        let log_ft = analytics.log_ft(partial_halflife.unwrap_or(1.0))?;
        let ft_ratio = match (partial_halflife, external_log_ft) {
            (Some(halflife), Some(external)) => Some(analytics.ft_ratio(halflife, external)?),
            _ => None,
        };

        Ok(Self {
            name: name.to_string(),
            mother: nuclide_label(parameters.mother_z(), parameters.a()),
            daughter: nuclide_label(parameters.z(), parameters.a()),
            process: parameters.beta_type().as_str().to_string(),
            decay_type: parameters.decay_type().as_str().to_string(),
            mixing_ratio: parameters.decay_type().mixing_ratio(),
            q_value_kev: parameters.q_value(),
            endpoint_kev: total_energy_to_kev(parameters.w0()),
            w0: parameters.w0(),
            profile: settings.profile.as_str().to_string(),
            out_of_range: evaluator.policy().as_str().to_string(),
            samples: spectrum.len(),
            phase_space_integral: analytics.phase_space_integral()?,
            partial_halflife,
            log_ft,
            external_log_ft,
            ft_ratio,
            mean_energy_kev: analytics.mean_energy()?,
            matrix_elements: *parameters.matrix_elements(),
            corrections: Correction::ORDER
                .into_iter()
                .map(|correction| CorrectionState {
                    name: correction.as_str(),
                    enabled: correction.is_enabled(&settings.toggles),
                })
                .collect(),
            diagnostics: diagnostics.entries().to_vec(),
        })
    }
}

/// Renders the report written next to the raw spectrum.
pub fn render_text_report(context: &ReportContext<'_>) -> String {
    let mut lines = Vec::new();
    transition_section(context, &mut lines);
    matrix_element_section(context, &mut lines);
    correction_section(context, &mut lines);
    spectrum_table(context, &mut lines);
    lines.join("\n")
}

fn heading(title: &str, rule: char, lines: &mut Vec<String>) {
    lines.push(title.to_string());
    lines.push(rule.to_string().repeat(30));
}

fn transition_section(context: &ReportContext<'_>, lines: &mut Vec<String>) {
    let parameters = context.evaluator.parameters();
    let summary = context.summary;

    heading(&format!("Spectrum overview: {}", context.name), '=', lines);
    lines.push(format!(
        "Transition from {} [{}/2] ({} keV) to {} [{}/2] ({} keV)",
        summary.mother,
        parameters.mother_spin_parity(),
        parameters.mother_excitation_energy(),
        summary.daughter,
        parameters.daughter_spin_parity(),
        parameters.daughter_excitation_energy(),
    ));
    lines.push(format!(
        "Q value: {} keV\tEffective endpoint energy: {} keV",
        summary.q_value_kev, summary.endpoint_kev
    ));
    lines.push(format!(
        "Process: {}\tType: {}",
        summary.process, summary.decay_type
    ));
    if let Some(mixing_ratio) = summary.mixing_ratio {
        lines.push(format!("Mixing ratio: {mixing_ratio}"));
    }
    lines.push(format!("Correction profile: {}", summary.profile));

    match summary.partial_halflife {
        Some(halflife) => {
            lines.push(format!("Partial half-life: {halflife} s"));
            lines.push(format!("Calculated log ft value: {}", summary.log_ft));
        }
        None => {
            lines.push("Partial half-life: not given".to_string());
            lines.push(format!("Calculated log f value: {}", summary.log_ft));
        }
    }
    if let Some(external) = summary.external_log_ft {
        lines.push(format!("External log ft: {external:.3}"));
    }
    if let Some(ratio) = summary.ft_ratio {
        lines.push(format!("Ratio of calculated/external ft value: {ratio}"));
    }
    lines.push(format!("Mean energy: {} keV", summary.mean_energy_kev));
    lines.push(String::new());
}

fn matrix_element_section(context: &ReportContext<'_>, lines: &mut Vec<String>) {
    let elements = &context.summary.matrix_elements;
    heading("Matrix element summary", '-', lines);
    for (label, value, provenance) in [
        ("b/Ac (weak magnetism)", elements.b_ac, elements.weak_magnetism_provenance),
        ("d/Ac (induced tensor)", elements.d_ac, elements.induced_tensor_provenance),
        ("AM121/AM101", elements.ratio_m121, elements.lambda_provenance),
    ] {
        lines.push(provenance_line(label, value, provenance));
    }
    lines.push(String::new());
}

fn provenance_line(label: &str, value: f64, provenance: Provenance) -> String {
    format!("{label:35}: {value} ({})", provenance.as_str())
}

fn correction_section(context: &ReportContext<'_>, lines: &mut Vec<String>) {
    let spectrum = &context.config.spectrum;
    heading("Spectral corrections", '-', lines);
    for state in &context.summary.corrections {
        lines.push(format!("{:25}: {}", state.name, state.enabled));
        if state.name == Correction::ShapeFactor.as_str() {
            lines.push(format!("    NS shape: {}", spectrum.ns_shape));
            lines.push(format!("    Isovector: {}", spectrum.isovector));
            lines.push(format!("    Connected: {}", spectrum.connect));
        }
        if state.name == Correction::ChargeShape.as_str() {
            lines.push(format!("    ES shape: {}", spectrum.es_shape));
            lines.push(format!("    v : {}", shape_vector(spectrum.v_old.as_deref())));
            lines.push(format!("    v': {}", shape_vector(spectrum.v_new.as_deref())));
        }
    }
    lines.push(format!("{:25}: {}", "Export neutrino", spectrum.neutrino));
    lines.push(format!("{:25}: {}", "Out-of-range energies", context.summary.out_of_range));
    lines.push(String::new());
}

fn shape_vector(values: Option<&[f64]>) -> String {
    match values {
        Some(values) => values
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        None => "not given".to_string(),
    }
}

fn spectrum_table(context: &ReportContext<'_>, lines: &mut Vec<String>) {
    let spectrum = &context.config.spectrum;
    let neutrino = spectrum.neutrino;
    let end_kev = if spectrum.end > 0.0 {
        spectrum.end
    } else {
        context.summary.endpoint_kev
    };

    let grid = match GridStep::from_config(spectrum) {
        GridStep::Fixed(step_kev) => format!("with step size {step_kev} keV"),
        GridStep::Count(count) => format!("in {count} steps"),
    };
    lines.push(format!(
        "Spectrum calculated from {} keV to {} keV {grid} ({} samples)",
        spectrum.begin, end_kev, context.summary.samples
    ));
    lines.push(String::new());

    let mut header = format!("{:>12}\t{:>12}\t{:>14}", "W [m_ec2]", "E [keV]", "dN_e/dW");
    if neutrino {
        header.push_str(&format!("\t{:>14}", "dN_v/dW"));
    }
    lines.push(header);

    for sample in context.spectrum.iter() {
        let mut row = format!(
            "{}\t{}\t{}",
            format_fixed_f64(sample.w, 12, 6),
            format_fixed_f64(sample.energy_kev(), 12, 4),
            format_scientific_f64(sample.rate, 14, 6),
        );
        if neutrino {
            row.push('\t');
            row.push_str(&format_scientific_f64(sample.neutrino_rate, 14, 6));
        }
        lines.push(row);
    }
}
