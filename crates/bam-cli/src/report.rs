//! Console formatting for engine results.
//!
//! Every function returns a `String`; printing is left to `main`. Plain output
//! may carry ANSI colors, LaTeX output never does.

use std::fmt::Write;

use bam_core::{
    BipolarVector, CorrectnessReport, CrosstalkReport, NoiseReport, PatternPair, RecallCheck,
    Trajectory, WeightMatrix,
};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Plain,
    Latex,
}

#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    format: Format,
    color: bool,
}

impl Reporter {
    pub fn new(format: Format, color: bool) -> Self {
        Self {
            format,
            color: color && format == Format::Plain,
        }
    }

    pub fn heading(&self, title: &str) -> String {
        match self.format {
            Format::Plain => {
                let bar = "=".repeat(title.len() + 8);
                format!("{bar}\n    {title}\n{bar}\n")
            }
            Format::Latex => format!("\\section*{{{}}}\n", escape(title)),
        }
    }

    pub fn matrix(&self, title: &str, weights: &WeightMatrix) -> String {
        let rows = weights.rows();
        let mut out = String::new();
        match self.format {
            Format::Plain => {
                let _ = writeln!(out, "{title}:");
                for row in rows {
                    let cells: String = row.iter().map(|v| format!("{v:>4}")).collect();
                    let _ = writeln!(out, "{cells}");
                }
            }
            Format::Latex => {
                let _ = writeln!(out, "{}:", escape(title));
                let _ = writeln!(out, "\\[\n\\begin{{bmatrix}}");
                for row in rows {
                    let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
                    let _ = writeln!(out, "{} \\\\", cells.join(" & "));
                }
                let _ = writeln!(out, "\\end{{bmatrix}}\n\\]");
            }
        }
        out
    }

    /// `recalled` component by component, marking disagreements with `expected`.
    pub fn vector_diff(&self, recalled: &BipolarVector, expected: &BipolarVector) -> String {
        let cells: Vec<String> = recalled
            .iter()
            .zip(expected.iter())
            .map(|(got, want)| {
                let text = format!("{got}");
                match (self.format, self.color, got == want) {
                    (Format::Latex, _, false) => format!("\\textbf{{{text}}}"),
                    (Format::Plain, true, true) => format!("{GREEN}{text}{RESET}"),
                    (Format::Plain, true, false) => format!("{RED}{text}{RESET}"),
                    _ => text,
                }
            })
            .collect();
        match self.format {
            Format::Plain => format!("[{}]", cells.join(", ")),
            Format::Latex => format!("$({})$", cells.join(", ")),
        }
    }

    /// One line per side of a single-pass recall check.
    pub fn recall_check(&self, number: usize, check: &RecallCheck, pair: &PatternPair) -> String {
        let mut out = String::new();
        let sides = [
            ("Output", &check.recalled.output, &pair.output),
            ("Input", &check.recalled.input, &pair.input),
        ];
        for (side, recalled, expected) in sides {
            if recalled == expected {
                let _ = writeln!(out, "{side} {number} recall passed!{}", self.line_end());
            } else {
                let _ = writeln!(
                    out,
                    "{side} {number} recall failed! expected {} found {}{}",
                    self.vector_diff(expected, expected),
                    self.vector_diff(recalled, expected),
                    self.line_end()
                );
            }
        }
        out
    }

    pub fn trajectory(&self, trajectory: &Trajectory, pairs: &[PatternPair]) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Recall {} settled after {} iteration(s){}",
            trajectory.direction().label(),
            trajectory.iterations(),
            self.line_end()
        );
        let rows = trajectory.final_states().iter().zip(pairs).enumerate();
        match self.format {
            Format::Plain => {
                for (i, (state, pair)) in rows {
                    let _ = writeln!(
                        out,
                        "  #{}: input {}  output {}",
                        i + 1,
                        self.vector_diff(&state.input, &pair.input),
                        self.vector_diff(&state.output, &pair.output)
                    );
                }
            }
            Format::Latex => {
                let _ = writeln!(out, "\\begin{{tabular}}{{|c|c|c|}}\n\\hline");
                let _ = writeln!(out, "Pattern & Input & Output \\\\\n\\hline");
                for (i, (state, pair)) in rows {
                    let _ = writeln!(
                        out,
                        "{} & {} & {} \\\\",
                        i + 1,
                        self.vector_diff(&state.input, &pair.input),
                        self.vector_diff(&state.output, &pair.output)
                    );
                }
                let _ = writeln!(out, "\\hline\n\\end{{tabular}}");
            }
        }
        out
    }

    pub fn crosstalk(&self, report: &CrosstalkReport) -> String {
        let mut out = String::new();
        match self.format {
            Format::Plain => {
                for entry in &report.entries {
                    let cells: Vec<String> =
                        entry.vector.iter().map(|v| format!("{v:.4}")).collect();
                    let _ = writeln!(
                        out,
                        "  #{}: [{}] Mag: {:.4}",
                        entry.index + 1,
                        cells.join(", "),
                        entry.magnitude
                    );
                }
                let _ = writeln!(out, "  Total: {:.4}", report.total);
            }
            Format::Latex => {
                let _ = writeln!(out, "\\begin{{tabular}}{{|c|c|c|}}\n\\hline");
                let _ = writeln!(out, "Pattern & Crosstalk & Magnitude \\\\\n\\hline");
                for entry in &report.entries {
                    let cells: Vec<String> =
                        entry.vector.iter().map(|v| format!("{v:.4}")).collect();
                    let _ = writeln!(
                        out,
                        "{} & $({})$ & {:.4} \\\\",
                        entry.index + 1,
                        cells.join(", "),
                        entry.magnitude
                    );
                }
                let _ = writeln!(
                    out,
                    "\\hline\nTotal & & {:.4} \\\\\n\\hline\n\\end{{tabular}}",
                    report.total
                );
            }
        }
        out
    }

    pub fn correctness(&self, label: &str, report: &CorrectnessReport) -> String {
        let input = percent(report.input_accuracy());
        let output = percent(report.output_accuracy());
        match self.format {
            Format::Plain => format!(
                "{label}: inputs {}/{} correct ({input}), outputs {}/{} correct ({output})\n",
                report.correct_input,
                report.correct_input + report.incorrect_input,
                report.correct_output,
                report.correct_output + report.incorrect_output,
            ),
            Format::Latex => format!(
                "\\begin{{tabular}}{{|l|c|c|c|}}\n\\hline\n\
                 {} & Correct & Incorrect & Accuracy \\\\\n\\hline\n\
                 Input & {} & {} & {} \\\\\n\
                 Output & {} & {} & {} \\\\\n\
                 \\hline\n\\end{{tabular}}\n",
                escape(label),
                report.correct_input,
                report.incorrect_input,
                escape(&input),
                report.correct_output,
                report.incorrect_output,
                escape(&output),
            ),
        }
    }

    pub fn noise(&self, report: &NoiseReport) -> String {
        let mut out = String::new();
        let overall = percent(report.recovery_rate());
        match self.format {
            Format::Plain => {
                let _ = writeln!(
                    out,
                    "{} flip(s) per trial, seed {}",
                    report.flips, report.seed
                );
                for s in &report.patterns {
                    let _ = writeln!(
                        out,
                        "  #{}: recovered {}/{} ({}), not converged {}, distance {:.3} -> {}",
                        s.index + 1,
                        s.recovered,
                        s.trials,
                        percent(s.recovery_rate()),
                        s.did_not_converge,
                        s.mean_distance_before,
                        distance(s.mean_distance_after)
                    );
                }
                let _ = writeln!(
                    out,
                    "  Overall: {}/{} ({overall})",
                    report.total_recovered(),
                    report.total_trials()
                );
            }
            Format::Latex => {
                let _ = writeln!(out, "\\begin{{tabular}}{{|c|c|c|c|c|c|}}\n\\hline");
                let _ = writeln!(
                    out,
                    "Pattern & Trials & Recovered & Rate & Distance before & Distance after \\\\\n\\hline"
                );
                for s in &report.patterns {
                    let _ = writeln!(
                        out,
                        "{} & {} & {} & {} & {:.3} & {} \\\\",
                        s.index + 1,
                        s.trials,
                        s.recovered,
                        escape(&percent(s.recovery_rate())),
                        s.mean_distance_before,
                        distance(s.mean_distance_after)
                    );
                }
                let _ = writeln!(
                    out,
                    "\\hline\nOverall & {} & {} & {} & & \\\\\n\\hline\n\\end{{tabular}}",
                    report.total_trials(),
                    report.total_recovered(),
                    escape(&overall)
                );
            }
        }
        out
    }

    fn line_end(&self) -> &'static str {
        match self.format {
            Format::Plain => "",
            Format::Latex => " \\\\",
        }
    }
}

/// Percentage with two decimals, or "undefined" for an empty category.
pub fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}%"),
        None => "undefined".to_string(),
    }
}

/// Mean Hamming distance with three decimals, or "undefined" when no trial
/// produced one.
pub fn distance(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.3}"),
        None => "undefined".to_string(),
    }
}

fn escape(text: &str) -> String {
    text.replace('%', "\\%").replace('#', "\\#").replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bam_core::{build_weights, crosstalk, fixtures, verify_recall, NoiseStats};

    fn v(c: &[f32]) -> BipolarVector {
        BipolarVector::from_slice(c).unwrap()
    }

    #[test]
    fn test_percent_undefined() {
        assert_eq!(percent(None), "undefined");
        assert_eq!(percent(Some(50.0)), "50.00%");
        assert_eq!(percent(Some(200.0 / 3.0)), "66.67%");
    }

    #[test]
    fn test_plain_matrix_rows() {
        let reporter = Reporter::new(Format::Plain, false);
        let text = reporter.matrix("W", &build_weights(&fixtures::part_a().unwrap()));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "W:");
        assert_eq!(lines[1], "  -1   1   1  -1");
        assert_eq!(lines[5], "  -1  -3   1  -1");
    }

    #[test]
    fn test_latex_matrix() {
        let reporter = Reporter::new(Format::Latex, true);
        let text = reporter.matrix("W", &build_weights(&fixtures::part_a().unwrap()));
        assert!(text.contains("\\begin{bmatrix}"));
        assert!(text.contains("-1 & 1 & 1 & -1 \\\\"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_vector_diff_colors_mismatches() {
        let got = v(&[1.0, -1.0, 1.0]);
        let want = v(&[1.0, 1.0, 1.0]);

        let plain = Reporter::new(Format::Plain, false);
        assert_eq!(plain.vector_diff(&got, &want), "[1, -1, 1]");

        let colored = Reporter::new(Format::Plain, true);
        let text = colored.vector_diff(&got, &want);
        assert!(text.contains(&format!("{RED}-1{RESET}")));
        assert!(text.contains(&format!("{GREEN}1{RESET}")));

        let latex = Reporter::new(Format::Latex, true);
        assert_eq!(latex.vector_diff(&got, &want), "$(1, \\textbf{-1}, 1)$");
    }

    #[test]
    fn test_recall_check_lines() {
        let patterns = fixtures::part_a().unwrap();
        let checks = verify_recall(&build_weights(&patterns), &patterns).unwrap();
        let reporter = Reporter::new(Format::Plain, false);

        let passed = reporter.recall_check(1, &checks[0], &patterns.pairs()[0]);
        assert_eq!(passed, "Output 1 recall passed!\nInput 1 recall passed!\n");

        let failed = reporter.recall_check(2, &checks[1], &patterns.pairs()[1]);
        assert!(failed.starts_with("Output 2 recall failed!"));
        assert!(failed.contains("Input 2 recall passed!"));
    }

    #[test]
    fn test_crosstalk_plain() {
        let reporter = Reporter::new(Format::Plain, false);
        let text = reporter.crosstalk(&crosstalk(&fixtures::part_a().unwrap()));
        assert!(text.contains("#2: [-1.2000, -1.2000, 1.2000,"));
        assert!(text.contains("Mag: 2.0785"));
        assert!(text.contains("Total: 4.4017"));
    }

    #[test]
    fn test_correctness_undefined_category() {
        let reporter = Reporter::new(Format::Plain, false);
        let text = reporter.correctness("Empty", &CorrectnessReport::default());
        assert_eq!(
            text,
            "Empty: inputs 0/0 correct (undefined), outputs 0/0 correct (undefined)\n"
        );

        let latex = Reporter::new(Format::Latex, false);
        let report = CorrectnessReport {
            correct_input: 1,
            incorrect_input: 1,
            correct_output: 2,
            incorrect_output: 0,
        };
        let text = latex.correctness("Part_C", &report);
        assert!(text.contains("Part\\_C & Correct"));
        assert!(text.contains("Input & 1 & 1 & 50.00\\% \\\\"));
    }

    #[test]
    fn test_noise_summary() {
        let report = NoiseReport {
            flips: 1,
            seed: 42,
            patterns: vec![NoiseStats {
                index: 0,
                trials: 4,
                recovered: 3,
                not_recovered: 1,
                did_not_converge: 0,
                mean_distance_before: 1.0,
                mean_distance_after: Some(0.25),
            }],
        };
        let text = Reporter::new(Format::Plain, false).noise(&report);
        assert!(text.starts_with("1 flip(s) per trial, seed 42\n"));
        assert!(text.contains("#1: recovered 3/4 (75.00%), not converged 0, distance 1.000 -> 0.250"));
        assert!(text.contains("Overall: 3/4 (75.00%)"));
    }

    #[test]
    fn test_noise_without_converged_trials() {
        let report = NoiseReport {
            flips: 1,
            seed: 5,
            patterns: vec![NoiseStats {
                index: 0,
                trials: 20,
                recovered: 0,
                not_recovered: 0,
                did_not_converge: 20,
                mean_distance_before: 1.0,
                mean_distance_after: None,
            }],
        };
        let plain = Reporter::new(Format::Plain, false).noise(&report);
        assert!(plain.contains("#1: recovered 0/20 (0.00%), not converged 20, distance 1.000 -> undefined"));
        assert!(!plain.contains("0.000"));

        let latex = Reporter::new(Format::Latex, false).noise(&report);
        assert!(latex.contains("1 & 20 & 0 & 0.00\\% & 1.000 & undefined \\\\"));
    }
}
