use dairy_qa::quality::{
    BatchAnalysis, BatchComparison, DeviationCheck, ImpactModel, Parameter, QualityGrade,
    SimulationOutcome,
};

pub(crate) fn render_analysis(analysis: &BatchAnalysis) {
    println!("Batch quality analysis");
    println!("Prediction: {}", analysis.prediction.summary());

    println!("\nInputs");
    for parameter in Parameter::ordered() {
        println!(
            "- {}: {}",
            parameter.label(),
            analysis.sample.formatted_value(parameter)
        );
    }

    println!("\nExplanation");
    for item in &analysis.explanations {
        println!(
            "- [{} / severity {}] {}: {}",
            item.impact.label(),
            item.severity,
            item.factor,
            item.message
        );
    }

    for check in DeviationCheck::ordered() {
        let report = analysis.deviation_report(check);
        if report.is_clear() {
            println!("\n{}: all within bounds", check.label());
        } else {
            println!("\n{} ({} findings)", check.label(), report.len());
            for line in report.summary_lines() {
                println!("- {line}");
            }
        }
    }

    if analysis.root_causes.is_empty() {
        println!("\nRoot causes: none");
    } else {
        println!("\nRoot causes");
        for cause in &analysis.root_causes {
            println!(
                "- {}% {} ({}): {}",
                cause.contribution,
                cause.factor,
                cause.impact.label(),
                cause.explanation
            );
        }
    }

    if analysis.recommendations.is_empty() {
        println!("\nRecommendations: none");
    } else {
        println!("\nRecommendations");
        for recommendation in &analysis.recommendations {
            println!(
                "- [{}] {}: {} -> {} ({})",
                recommendation.impact.label(),
                recommendation.parameter_label,
                recommendation.current_value,
                recommendation.recommended_value,
                recommendation.rationale
            );
        }
    }

    println!("\nRisk level: {}", analysis.cost_impact.risk_level.label());
    for model in ImpactModel::ordered() {
        let estimate = analysis.impact_estimate(model);
        println!("\n{} ({} L)", model.label(), analysis.batch_volume.liters());
        for (label, amount) in estimate.figures() {
            println!("- {label}: {}", format_rupees(amount));
        }
        for recommendation in estimate.recommendations() {
            println!("  * {recommendation}");
        }
    }
}

pub(crate) fn render_simulation(outcome: &SimulationOutcome) {
    let request = &outcome.request;
    println!("Batch extrapolation");
    println!(
        "{} batches around {}% fat, {} variability",
        request.count(),
        request.baseline_fat(),
        request.variability().label()
    );

    println!("\nSimulated batches");
    for batch in &outcome.batches {
        let sample = &batch.sample;
        println!(
            "- #{}: fat {:.2}% | snf {:.2}% | {} | {} | {:.1}°C | pH {:.2} -> {} ({}%)",
            batch.batch_number,
            sample.fat_content(),
            sample.snf(),
            sample.formatted_value(Parameter::MicrobialLoad),
            if sample.adulterants_detected() {
                "adulterants"
            } else {
                "clean"
            },
            sample.processing_temp(),
            sample.ph_level(),
            batch.prediction.quality.label(),
            batch.prediction.confidence
        );
    }

    println!("\nGrade distribution");
    for grade in QualityGrade::ordered() {
        println!(
            "- {}: {} ({:.0}%)",
            grade.label(),
            outcome.distribution.count(grade),
            outcome.distribution.share(grade)
        );
    }
}

pub(crate) fn render_comparison(comparison: &BatchComparison) {
    println!("Batch comparison");
    for batch in &comparison.batches {
        println!(
            "- {} {} ({}): {}",
            batch.batch_id,
            batch.name,
            batch.date,
            batch.prediction.summary()
        );
    }

    println!("\nParameter spread");
    for spread in &comparison.spreads {
        println!(
            "- {}: min {} | max {} | avg {:.2} | range {:.2}",
            spread.parameter_label,
            spread.min,
            spread.max,
            spread.avg,
            spread.range
        );
    }
}

/// Whole rupees with thousands separators; negatives keep a leading minus.
fn format_rupees(amount: f64) -> String {
    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0.0 && rounded > 0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}
