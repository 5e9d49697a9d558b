//! Plain-text rendering of a prediction result: headline label, confidence
//! percentage and a probability bar chart sorted by descending probability.

use crate::predictor::Prediction;

const BAR_WIDTH: usize = 40;

/// Renders a prediction the way the front-end displays it.
pub fn render(prediction: &Prediction) -> String {
    let ranked = prediction.ranked();
    let label_width = ranked.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("Predicted status: {}\n", prediction.label));
    out.push_str(&format!(
        "Confidence: {:.1}%\n\n",
        prediction.confidence * 100.0
    ));

    let max_proba = ranked.first().map(|(_, p)| *p).unwrap_or(0.0);
    for (label, proba) in &ranked {
        let bar = bar_for(*proba, max_proba);
        out.push_str(&format!(
            "{label:<label_width$}  {bar} {:.1}%\n",
            proba * 100.0
        ));
    }
    out
}

fn bar_for(proba: f32, max_proba: f32) -> String {
    if max_proba <= 0.0 {
        return String::new();
    }
    let len = ((proba / max_proba) * BAR_WIDTH as f32).round() as usize;
    "█".repeat(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Prediction {
        Prediction {
            label: "Graduate".to_string(),
            class_index: 2,
            confidence: 0.6,
            probabilities: vec![
                ("Dropout".to_string(), 0.3),
                ("Enrolled".to_string(), 0.1),
                ("Graduate".to_string(), 0.6),
            ],
        }
    }

    #[test]
    fn test_headline_and_confidence() {
        let report = render(&sample());
        assert!(report.contains("Predicted status: Graduate"));
        assert!(report.contains("Confidence: 60.0%"));
    }

    #[test]
    fn test_chart_sorted_descending() {
        let report = render(&sample());
        let graduate = report.find("Graduate  ").unwrap();
        let dropout = report.find("Dropout").unwrap();
        let enrolled = report.find("Enrolled  ").unwrap();
        assert!(graduate < dropout && dropout < enrolled);
    }

    #[test]
    fn test_bars_proportional() {
        let report = render(&sample());
        // The winning class gets the full bar width.
        assert!(report.contains(&"█".repeat(BAR_WIDTH)));
        // 0.3 / 0.6 of the width for the runner-up.
        assert!(report.contains(&format!("{} 30.0%", "█".repeat(BAR_WIDTH / 2))));
    }
}
