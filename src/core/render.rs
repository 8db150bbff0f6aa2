//! Output rendering for benchmark reports

use colored::Colorize;
use std::io::Write;

use crate::core::model::{BenchReport, Faster, Strategy, StrategyResult};

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable console report
    #[default]
    Text,
    Json,
    Jsonl,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Format an integer with `,` thousands separators
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Renderer for benchmark reports
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a report to a string
    pub fn render(&self, report: &BenchReport) -> String {
        match self.config.format {
            OutputFormat::Text => self.render_text(report),
            OutputFormat::Json => self.render_json(report),
            OutputFormat::Jsonl => self.render_jsonl(report),
            OutputFormat::Markdown => self.render_markdown(report),
        }
    }

    /// Render to a writer
    pub fn render_to<W: Write>(&self, report: &BenchReport, mut writer: W) -> std::io::Result<()> {
        let output = self.render(report);
        writeln!(writer, "{}", output)
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Option<String> {
        if self.config.pretty {
            serde_json::to_string_pretty(value).ok()
        } else {
            serde_json::to_string(value).ok()
        }
    }

    /// Render the whole report as a single JSON object
    fn render_json(&self, report: &BenchReport) -> String {
        self.to_json(report).unwrap_or_else(|| "{}".to_string())
    }

    /// One line per strategy result, then the comparison
    fn render_jsonl(&self, report: &BenchReport) -> String {
        let mut lines: Vec<String> = report
            .results
            .iter()
            .filter_map(|r| self.to_json(r))
            .collect();

        if let Some(comparison) = &report.comparison {
            lines.extend(self.to_json(comparison));
        }

        lines.join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    fn render_text(&self, report: &BenchReport) -> String {
        let mut out = String::new();
        let corpus = &report.corpus;

        out.push_str(&format!("{} {}\n", "Corpus:".bold(), corpus.dir.display()));
        out.push_str(&format!("  Files:           {}\n", group_thousands(corpus.files as u64)));
        if let Some(lines) = corpus.lines_per_file {
            out.push_str(&format!("  Lines per file:  {}\n", group_thousands(lines as u64)));
        }
        if let Some(expected) = corpus.expected_spaces {
            out.push_str(&format!("  Expected spaces: {}\n", group_thousands(expected)));
        }

        for result in &report.results {
            out.push('\n');
            self.render_result_text(&mut out, result);
        }

        if let Some(cmp) = &report.comparison {
            out.push('\n');
            out.push_str(&format!("{}\n", "=== Comparison ===".cyan().bold()));
            out.push_str(&format!("Spaces difference:   {}\n", cmp.spaces_diff));
            out.push_str(&format!("Relative difference: {:.1}%\n", cmp.relative_percent));

            let ratio = cmp
                .speedup
                .map(|s| format!(" ({:.2}x)", s))
                .unwrap_or_default();
            match cmp.faster {
                Faster::PerFile => out.push_str(&format!(
                    "{} is faster by {} ms{}\n",
                    Strategy::PerFile,
                    cmp.margin_ms,
                    ratio
                )),
                Faster::PerLine => out.push_str(&format!(
                    "{} is faster by {} ms{}\n",
                    Strategy::PerLine,
                    cmp.margin_ms,
                    ratio
                )),
                Faster::Tie => out.push_str("Both strategies took the same time\n"),
            }
        }

        match report.matches_expected() {
            Some(true) => out.push_str(&format!(
                "\n{}\n",
                "✓ all totals match the generated corpus".green()
            )),
            Some(false) => out.push_str(&format!(
                "\n{}\n",
                "✗ totals differ from the generated corpus".red().bold()
            )),
            None => {}
        }

        out.trim_end().to_string()
    }

    fn render_result_text(&self, out: &mut String, result: &StrategyResult) {
        out.push_str(&format!("{}\n", format!("=== {} ===", result.strategy.title()).as_str().cyan().bold()));
        out.push_str(&format!("Spaces:  {}\n", group_thousands(result.total)));
        out.push_str(&format!("Time:    {} ms\n", result.elapsed_ms()));
        out.push_str(&format!("Average: {:.2} ms/file\n", result.avg_ms_per_file()));
        if result.strategy == Strategy::PerLine {
            let lines = result.units.saturating_sub(result.files) as u64;
            out.push_str(&format!("Lines processed: {}\n", group_thousands(lines)));
        }
        out.push_str(&format!("Tasks:   {}\n", group_thousands(result.units as u64)));
        if result.failed_files > 0 {
            out.push_str(&format!(
                "{}\n",
                format!("Unreadable files counted as zero: {}", result.failed_files)
                    .as_str()
                    .yellow()
            ));
        }
    }

    fn render_markdown(&self, report: &BenchReport) -> String {
        let mut out = String::new();
        out.push_str("# Space Count Benchmark\n\n");
        out.push_str(&format!("- Corpus: `{}`\n", report.corpus.dir.display()));
        out.push_str(&format!("- Files: {}\n", report.corpus.files));
        if let Some(lines) = report.corpus.lines_per_file {
            out.push_str(&format!("- Lines per file: {}\n", lines));
        }
        if let Some(expected) = report.corpus.expected_spaces {
            out.push_str(&format!("- Expected spaces: {}\n", expected));
        }

        if !report.results.is_empty() {
            out.push_str("\n| Strategy | Spaces | Time (ms) | ms/file | Tasks | Failed |\n");
            out.push_str("|----------|--------|-----------|---------|-------|--------|\n");
            for r in &report.results {
                out.push_str(&format!(
                    "| {} | {} | {} | {:.2} | {} | {} |\n",
                    r.strategy,
                    r.total,
                    r.elapsed_ms(),
                    r.avg_ms_per_file(),
                    r.units,
                    r.failed_files
                ));
            }
        }

        if let Some(cmp) = &report.comparison {
            out.push_str("\n## Comparison\n\n");
            out.push_str(&format!("- Spaces difference: {}\n", cmp.spaces_diff));
            out.push_str(&format!("- Relative time difference: {:.1}%\n", cmp.relative_percent));
            let faster = match cmp.faster {
                Faster::PerFile => Strategy::PerFile.as_str(),
                Faster::PerLine => Strategy::PerLine.as_str(),
                Faster::Tie => "tie",
            };
            out.push_str(&format!("- Faster: {} (by {} ms)\n", faster, cmp.margin_ms));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Comparison, CorpusInfo};
    use std::path::PathBuf;
    use std::time::Duration;

    fn sample_report() -> BenchReport {
        let mut report = BenchReport::new(CorpusInfo {
            dir: PathBuf::from("/tmp/corpus"),
            files: 2,
            lines_per_file: Some(3),
            expected_spaces: Some(1234),
        });
        report.results.push(StrategyResult {
            strategy: Strategy::PerFile,
            total: 1234,
            elapsed: Duration::from_millis(10),
            files: 2,
            units: 2,
            failed_files: 0,
            failures: Vec::new(),
        });
        report.results.push(StrategyResult {
            strategy: Strategy::PerLine,
            total: 1234,
            elapsed: Duration::from_millis(20),
            files: 2,
            units: 8,
            failed_files: 0,
            failures: Vec::new(),
        });
        report.comparison = Some(Comparison {
            spaces_diff: 0,
            relative_percent: 50.0,
            faster: Faster::PerFile,
            margin_ms: 10,
            speedup: Some(2.0),
        });
        report
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("Markdown".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert!("yaml".parse::<OutputFormat>().unwrap_err().contains("Unknown format"));
    }

    #[test]
    fn test_render_config_default() {
        let config = RenderConfig::default();
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.pretty);
    }

    #[test]
    fn test_render_text() {
        colored::control::set_override(false);
        let output = Renderer::new(OutputFormat::Text).render(&sample_report());

        assert!(output.contains("=== Strategy 1: one file, one task ==="));
        assert!(output.contains("=== Strategy 2: one line, one task ==="));
        assert!(output.contains("Spaces:  1,234"));
        assert!(output.contains("Lines processed: 6"));
        assert!(output.contains("Relative difference: 50.0%"));
        assert!(output.contains("per-file is faster by 10 ms (2.00x)"));
        assert!(output.contains("all totals match"));
    }

    #[test]
    fn test_render_json() {
        let output = Renderer::new(OutputFormat::Json).render(&sample_report());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
        assert_eq!(value["comparison"]["spaces_diff"], 0);
        assert_eq!(value["corpus"]["expected_spaces"], 1234);
    }

    #[test]
    fn test_render_jsonl() {
        let output = Renderer::new(OutputFormat::Jsonl).render(&sample_report());
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["strategy"], "per-file");
        let last: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(last["faster"], "per-file");
    }

    #[test]
    fn test_render_json_pretty() {
        let config = RenderConfig::with_pretty(OutputFormat::Json, true);
        let output = Renderer::with_config(config).render(&sample_report());
        assert!(output.contains("\n  "));
    }

    #[test]
    fn test_render_markdown() {
        let output = Renderer::new(OutputFormat::Markdown).render(&sample_report());
        assert!(output.contains("| per-file | 1234 | 10 |"));
        assert!(output.contains("| per-line | 1234 | 20 |"));
        assert!(output.contains("- Faster: per-file (by 10 ms)"));
    }

    #[test]
    fn test_render_markdown_corpus_only() {
        let report = BenchReport::new(CorpusInfo {
            dir: PathBuf::from("out"),
            files: 5,
            lines_per_file: Some(10),
            expected_spaces: Some(100),
        });
        let output = Renderer::new(OutputFormat::Markdown).render(&report);
        assert!(output.contains("- Expected spaces: 100"));
        assert!(!output.contains("| Strategy |"));
    }

    #[test]
    fn test_render_to_writer() {
        let mut buffer = Vec::new();
        Renderer::new(OutputFormat::Jsonl)
            .render_to(&sample_report(), &mut buffer)
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.ends_with('\n'));
        assert!(output.contains("per-line"));
    }
}
