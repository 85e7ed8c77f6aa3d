//! Output formatting for the CLI.

use colored::*;
use librarian_pipeline::{ExportedNote, RunMetrics};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format the summary of an organize run.
    pub fn run_summary(&self, metrics: &RunMetrics, dry_run: bool) -> String {
        let mut lines = Vec::new();

        let headline = if dry_run {
            format!(
                "Dry run: {} of {} documents classified, nothing recorded",
                metrics.classified, metrics.discovered
            )
        } else {
            format!(
                "Recorded {} document(s), copied {}",
                metrics.recorded, metrics.copied
            )
        };
        lines.push(if metrics.has_errors() {
            self.warning(&headline)
        } else {
            self.success(&headline)
        });

        lines.push(format!(
            "  {} found, {} already processed, {} duplicate(s), {} without text",
            metrics.discovered, metrics.already_known, metrics.duplicates, metrics.no_content
        ));
        lines.push(format!(
            "  {} batch(es) in {:.1}s (run {})",
            metrics.batches,
            metrics.elapsed.as_secs_f64(),
            metrics.run_id
        ));

        if metrics.hash_failures > 0 {
            lines.push(self.error(&format!("{} file(s) could not be read", metrics.hash_failures)));
        }
        if metrics.commit_failures > 0 {
            lines.push(self.error(&format!(
                "{} batch(es) could not be written to the tracking log and will be processed again",
                metrics.commit_failures
            )));
        }
        for failure in &metrics.failures {
            lines.push(self.error(&format!("{}: {}", failure.path.display(), failure.reason)));
        }
        for failure in &metrics.copy_failures {
            lines.push(self.error(&format!(
                "copy {} -> {}: {}",
                failure.source, failure.destination, failure.reason
            )));
        }

        lines.join("\n")
    }

    /// Format the list of exported notes as a table.
    pub fn exported_notes(&self, notes: &[ExportedNote]) -> String {
        if notes.is_empty() {
            return self.colorize("No matching records.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Note", "Document"]);

        for note in notes {
            let name = note
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            builder.push_record([name, note.document.clone()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!(
            "{}\n{}",
            table,
            self.success(&format!("Exported {} note(s)", notes.len()))
        )
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
