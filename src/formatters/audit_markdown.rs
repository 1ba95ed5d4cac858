use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::audit::{AuditReport, AuditSummary, FileAudit, FunctionAudit};

/// Markdown rendering of an [`AuditReport`]: summary table first, then one
/// section per folder.
pub struct AuditMarkdownFormatter;

impl AuditMarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_to_file(&self, report: &AuditReport, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format_report(report))
            .with_context(|| format!("failed to write {}", output_path.display()))
    }

    pub fn format_report(&self, report: &AuditReport) -> String {
        let mut lines = vec![self.summary(&report.summary)];

        for (folder, files) in &report.folders {
            if files.is_empty() {
                continue;
            }
            lines.push(format!("\n## {} FOLDER\n", folder.to_uppercase()));
            for file in files {
                self.push_file(&mut lines, file);
            }
        }

        lines.join("\n")
    }

    fn summary(&self, summary: &AuditSummary) -> String {
        format!(
            "\n## AUDIT SUMMARY\n\
             \n\
             | Metric | Count |\n\
             |--------|-------|\n\
             | **Total Files Audited** | {} |\n\
             | **Total Functions Analyzed** | {} |\n\
             | **Orphaned Functions** | {} ({:.1}%) |\n\
             | **Functions with Health Flags** | {} ({:.1}%) |\n\
             \n\
             **NOTE:** This automated audit provides high-level analysis. \
             Manual code review recommended for critical functions.\n",
            summary.files_audited,
            summary.total_functions,
            summary.orphaned,
            summary.orphaned_percent(),
            summary.flagged,
            summary.flagged_percent(),
        )
    }

    fn push_file(&self, lines: &mut Vec<String>, file: &FileAudit) {
        lines.push(format!("\n### FILE: {}", file.path));
        lines.push(format!("**LINES:** {}", file.line_count));
        lines.push(format!("**FUNCTIONS:** {}\n", file.record_count));
        for function in &file.functions {
            self.push_function(lines, function);
        }
    }

    fn push_function(&self, lines: &mut Vec<String>, function: &FunctionAudit) {
        lines.push(format!("\n#### FUNCTION: {}", function.name));
        lines.push(format!("**LINES:** {}+", function.line));
        lines.push(format!("**SIGNATURE:** `{}`", function.signature));

        if function.is_orphaned() {
            lines.push("**WIRED-UP:** ORPHANED - no references found".to_string());
        } else {
            lines.push(format!(
                "**WIRED-UP:** {} call site(s) found",
                function.call_sites
            ));
        }

        if function.flags.is_empty() {
            lines.push("**HEALTH FLAGS:** None".to_string());
        } else {
            lines.push(format!("**HEALTH FLAGS:** {}", function.flags.join("; ")));
        }
        lines.push(String::new());
    }
}

impl Default for AuditMarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}
