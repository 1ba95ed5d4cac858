use std::fmt;

use super::extent::function_extent;

/// Heuristic warning attached to a function in the audit report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthFlag {
    LargeFunction(usize),
    BlockingSleep,
    ConsoleLog,
    SheetsApiLoop,
    SilentErrorHandling,
    AnalysisError(String),
}

impl fmt::Display for HealthFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthFlag::LargeFunction(lines) => write!(f, "LARGE FUNCTION - {lines} lines"),
            HealthFlag::BlockingSleep => f.write_str("BLOCKING SLEEP - blocks execution"),
            HealthFlag::ConsoleLog => f.write_str("CONSOLE.LOG - should use SmartLogger"),
            HealthFlag::SheetsApiLoop => f.write_str("LOOP WITH SHEETS API - quota risk"),
            HealthFlag::SilentErrorHandling => {
                f.write_str("SILENT ERROR HANDLING - catch without logging/rethrowing")
            }
            HealthFlag::AnalysisError(reason) => write!(f, "ANALYSIS ERROR: {reason}"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HealthRules {
    pub large_function_lines: usize,
}

impl Default for HealthRules {
    fn default() -> Self {
        Self {
            large_function_lines: 100,
        }
    }
}

impl HealthRules {
    pub fn new(large_function_lines: usize) -> Self {
        Self {
            large_function_lines,
        }
    }

    /// Flags for the function declared at `start_line` (1-based).
    pub fn check(&self, lines: &[&str], start_line: usize) -> Vec<HealthFlag> {
        let extent = function_extent(lines, start_line);
        let body = extent.body(lines).join("\n");
        let mut flags = Vec::new();

        if extent.length > self.large_function_lines {
            flags.push(HealthFlag::LargeFunction(extent.length));
        }
        if body.contains("Utilities.sleep(") {
            flags.push(HealthFlag::BlockingSleep);
        }
        if body.contains("console.log") {
            flags.push(HealthFlag::ConsoleLog);
        }
        if body.contains("for") && (body.contains("getRange(") || body.contains("SpreadsheetApp")) {
            flags.push(HealthFlag::SheetsApiLoop);
        }
        if body.contains("catch") && !body.contains("throw") && !body.to_lowercase().contains("log")
        {
            flags.push(HealthFlag::SilentErrorHandling);
        }

        flags
    }
}
