// Output rendering for grouped results
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde::{Deserialize, Serialize};
use std::io::{self, IsTerminal};
use std::str::FromStr;

use crate::error::{GroupError, Result};
use crate::grouping::Groups;
use crate::key::KeyValue;

const BAR_WIDTH: usize = 30;

/// Output mode for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Human-friendly output with colors
    Human,
    /// Plain text without colors (for pipes/logs)
    Plain,
    /// Machine-readable JSON output
    Json,
    /// Bordered table
    Table,
}

impl OutputMode {
    /// Auto-detect output mode based on environment
    pub fn auto() -> Self {
        if !io::stdout().is_terminal() {
            Self::Plain
        } else if std::env::var("NAMEBUCKETS_JSON").is_ok() {
            Self::Json
        } else {
            Self::Human
        }
    }
}

impl FromStr for OutputMode {
    type Err = GroupError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputMode::Human),
            "plain" => Ok(OutputMode::Plain),
            "json" => Ok(OutputMode::Json),
            "table" => Ok(OutputMode::Table),
            _ => Err(GroupError::UnknownFormat(s.to_string())),
        }
    }
}

/// CLI output writer with mode awareness
pub struct OutputWriter {
    mode: OutputMode,
}

impl OutputWriter {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// One line per bucket, `key: a, b, c`
    pub fn render_groups(&self, groups: &Groups<KeyValue, String>) -> Result<String> {
        let rendered = match self.mode {
            OutputMode::Json => serde_json::to_string_pretty(groups)?,
            OutputMode::Table => {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_header(vec!["Key", "Count", "Items"]);
                for bucket in groups {
                    table.add_row(vec![
                        bucket.key.to_string(),
                        bucket.items.len().to_string(),
                        bucket.items.join(", "),
                    ]);
                }
                table.to_string()
            }
            OutputMode::Human => groups
                .iter()
                .map(|b| format!("{}: {}", b.key.to_string().cyan().bold(), b.items.join(", ")))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputMode::Plain => groups
                .iter()
                .map(|b| format!("{}: {}", b.key, b.items.join(", ")))
                .collect::<Vec<_>>()
                .join("\n"),
        };
        Ok(rendered)
    }

    /// Bucket sizes, `key: n`
    pub fn render_counts(&self, counts: &[(KeyValue, usize)]) -> Result<String> {
        let rendered = match self.mode {
            OutputMode::Json => {
                #[derive(Serialize)]
                struct Count<'a> {
                    key: &'a KeyValue,
                    count: usize,
                }
                let rows: Vec<Count> = counts
                    .iter()
                    .map(|(key, count)| Count { key, count: *count })
                    .collect();
                serde_json::to_string_pretty(&rows)?
            }
            OutputMode::Table => {
                let mut table = Table::new();
                table.load_preset(UTF8_FULL).set_header(vec!["Key", "Count"]);
                for (key, count) in counts {
                    table.add_row(vec![key.to_string(), count.to_string()]);
                }
                table.to_string()
            }
            OutputMode::Human => counts
                .iter()
                .map(|(key, count)| format!("{}: {}", key.to_string().cyan().bold(), count))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputMode::Plain => counts
                .iter()
                .map(|(key, count)| format!("{}: {}", key, count))
                .collect::<Vec<_>>()
                .join("\n"),
        };
        Ok(rendered)
    }

    /// Horizontal bar per bucket, scaled to the share of all items.
    /// Empty in JSON mode.
    pub fn render_histogram(&self, groups: &Groups<KeyValue, String>) -> String {
        if matches!(self.mode, OutputMode::Json) {
            return String::new();
        }

        let total = groups.item_count();
        if total == 0 {
            return "  No data available".to_string();
        }

        let labels: Vec<String> = groups.keys().map(|k| k.to_string()).collect();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        groups
            .iter()
            .zip(&labels)
            .map(|(bucket, label)| {
                let share = bucket.items.len() as f64 / total as f64;
                let filled = ((share * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
                let bar = match self.mode {
                    OutputMode::Human => format!(
                        "{}{}",
                        "█".repeat(filled).cyan(),
                        "░".repeat(BAR_WIDTH - filled)
                    ),
                    _ => format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled)),
                };
                format!(
                    "  {:>width$} │{} {} ({:.1}%)",
                    label,
                    bar,
                    bucket.items.len(),
                    share * 100.0,
                    width = label_width
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        match self.mode {
            OutputMode::Human => {
                println!();
                println!("{}", title.cyan().bold());
                println!("{}", "═".repeat(title.chars().count()).cyan());
            }
            OutputMode::Plain | OutputMode::Table => {
                println!();
                println!("{}", title);
                println!("{}", "=".repeat(title.chars().count()));
            }
            OutputMode::Json => {}
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Human => println!("  {} {}", "✓".green(), message),
            OutputMode::Json => {}
            _ => println!("  [OK] {}", message),
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => eprintln!("  {} {}", "✗".red(), message),
            _ => eprintln!("  [ERROR] {}", message),
        }
    }
}
