use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

use super::call_sites::CallSiteIndex;
use super::health::{HealthFlag, HealthRules};
use super::inventory::{inventory_key, FunctionExtractor, FunctionKind, FunctionRecord, Inventory};
use crate::config::AuditConfig;
use crate::core::loader::read_source;
use crate::core::FileScanner;

/// Folder name used for files sitting directly in the source directory.
pub const ROOT_FOLDER: &str = "root";

#[derive(Debug, Clone, Serialize)]
pub struct FunctionAudit {
    pub name: String,
    pub line: usize,
    pub signature: String,
    pub call_sites: usize,
    pub flags: Vec<String>,
}

impl FunctionAudit {
    pub fn is_orphaned(&self) -> bool {
        self.call_sites == 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileAudit {
    pub path: String,
    pub line_count: usize,
    /// Every record in the file, classes included.
    pub record_count: usize,
    pub functions: Vec<FunctionAudit>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct AuditSummary {
    pub files_audited: usize,
    pub total_functions: usize,
    pub orphaned: usize,
    pub flagged: usize,
}

impl AuditSummary {
    pub fn orphaned_percent(&self) -> f64 {
        percent(self.orphaned, self.total_functions)
    }

    pub fn flagged_percent(&self) -> f64 {
        percent(self.flagged, self.total_functions)
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    pub summary: AuditSummary,
    /// Folder -> files, both in sorted order.
    pub folders: BTreeMap<String, Vec<FileAudit>>,
}

/// Source texts plus the inventory extracted from them.
pub struct AuditCorpus {
    pub source_dir: PathBuf,
    pub files: Vec<(PathBuf, String)>,
    pub inventory: Inventory,
}

pub struct AuditBuilder {
    config: AuditConfig,
    extractor: FunctionExtractor,
}

impl AuditBuilder {
    pub fn new(config: AuditConfig) -> Result<Self> {
        Ok(Self {
            config,
            extractor: FunctionExtractor::new()?,
        })
    }

    /// Read every matching file under `source_dir` and extract its records.
    /// Unreadable files are logged and left out.
    pub fn load(&self, root: &Path, source_dir: &Path) -> Result<AuditCorpus> {
        let paths = FileScanner::new(&self.config.extension).scan_directory(source_dir)?;
        info!(count = paths.len(), dir = %source_dir.display(), "scanning functions");

        let mut files = Vec::with_capacity(paths.len());
        let mut inventory = Inventory::new();
        for path in paths {
            let text = match read_source(&path) {
                Ok(text) => text,
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping unreadable file");
                    continue;
                }
            };
            let records = self.extractor.extract(&text);
            if !records.is_empty() {
                inventory.insert(inventory_key(root, &path), records);
            }
            files.push((path, text));
        }

        let total: usize = inventory.values().map(Vec::len).sum();
        info!(functions = total, files = inventory.len(), "functions extracted");

        Ok(AuditCorpus {
            source_dir: source_dir.to_path_buf(),
            files,
            inventory,
        })
    }

    pub fn build(&self, root: &Path, corpus: AuditCorpus) -> Result<AuditReport> {
        let rules = HealthRules::new(self.config.large_function_lines);
        let AuditCorpus {
            source_dir,
            files,
            inventory,
        } = corpus;

        let texts: BTreeMap<String, String> = files
            .iter()
            .map(|(path, text)| (inventory_key(root, path), text.clone()))
            .collect();
        let mut call_sites = CallSiteIndex::new(files);

        let mut report = AuditReport::default();
        for (key, records) in &inventory {
            let folder = folder_of(&source_dir, &root.join(key));
            if self.config.skip_dirs.iter().any(|skip| skip == &folder) {
                continue;
            }

            let text = texts.get(key).map(String::as_str).unwrap_or_default();
            let lines: Vec<&str> = text.lines().collect();
            let mut file_audit = FileAudit {
                path: key.clone(),
                line_count: lines.len(),
                record_count: records.len(),
                functions: Vec::new(),
            };

            for record in records.iter().filter(|r| r.kind != FunctionKind::Class) {
                let audit = self.audit_function(record, &lines, &rules, &mut call_sites);
                report.summary.total_functions += 1;
                if audit.is_orphaned() {
                    report.summary.orphaned += 1;
                }
                if !audit.flags.is_empty() {
                    report.summary.flagged += 1;
                }
                file_audit.functions.push(audit);
            }

            report.summary.files_audited += 1;
            report.folders.entry(folder).or_default().push(file_audit);
        }

        info!(
            functions = report.summary.total_functions,
            orphaned = report.summary.orphaned,
            flagged = report.summary.flagged,
            "audit complete"
        );
        Ok(report)
    }

    fn audit_function(
        &self,
        record: &FunctionRecord,
        lines: &[&str],
        rules: &HealthRules,
        call_sites: &mut CallSiteIndex,
    ) -> FunctionAudit {
        let (count, flags) = match call_sites.count(record.simple_name()) {
            Ok(count) => (count, rules.check(lines, record.line)),
            Err(err) => (0, vec![HealthFlag::AnalysisError(err.to_string())]),
        };

        FunctionAudit {
            name: record.name.clone(),
            line: record.line,
            signature: record.signature.clone(),
            call_sites: count,
            flags: flags.iter().map(ToString::to_string).collect(),
        }
    }
}

/// First directory under `source_dir`, or [`ROOT_FOLDER`] for files directly in it.
pub fn folder_of(source_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(source_dir).unwrap_or(path);
    let mut components = relative
        .components()
        .filter(|c| matches!(c, Component::Normal(_)));
    match (components.next(), components.next()) {
        (Some(first), Some(_)) => first.as_os_str().to_string_lossy().into_owned(),
        _ => ROOT_FOLDER.to_string(),
    }
}
