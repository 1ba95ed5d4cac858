use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    Class,
    Constructor,
    StaticMethod,
    Method,
    Function,
}

/// One function-like declaration found by the line scanner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionRecord {
    #[serde(rename = "type")]
    pub kind: FunctionKind,
    /// Qualified as `Class.method` inside a class body.
    pub name: String,
    /// 1-based line of the declaration.
    pub line: usize,
    pub signature: String,
}

impl FunctionRecord {
    /// Name without its class qualifier.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// Relative path -> records, for files that had at least one record.
pub type Inventory = BTreeMap<String, Vec<FunctionRecord>>;

/// Line-oriented signature scanner. Only top-level `class`/`function` lines and
/// members indented by exactly two spaces are recognised.
pub struct FunctionExtractor {
    class_re: Regex,
    static_re: Regex,
    method_re: Regex,
    function_re: Regex,
}

impl FunctionExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            class_re: Regex::new(r"^class\s+(\w+)")?,
            static_re: Regex::new(r"^  static\s+(\w+)\s*\(")?,
            method_re: Regex::new(r"^  (\w+)\s*\([^)]*\)\s*\{")?,
            function_re: Regex::new(r"^function\s+(\w+)\s*\(")?,
        })
    }

    pub fn extract(&self, text: &str) -> Vec<FunctionRecord> {
        let mut records = Vec::new();
        let mut in_class: Option<String> = None;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let signature = line.trim().to_string();

            if let Some(caps) = self.class_re.captures(line) {
                let class_name = caps[1].to_string();
                records.push(record(FunctionKind::Class, class_name.clone(), line_no, signature));
                in_class = Some(class_name);
                continue;
            }

            if line.contains("  constructor(") {
                let name = qualify(in_class.as_deref(), "constructor");
                records.push(record(FunctionKind::Constructor, name, line_no, signature));
                continue;
            }

            if let Some(caps) = self.static_re.captures(line) {
                let name = qualify(in_class.as_deref(), &caps[1]);
                records.push(record(FunctionKind::StaticMethod, name, line_no, signature));
                continue;
            }

            if let Some(class_name) = in_class.as_deref() {
                if let Some(caps) = self.method_re.captures(line) {
                    let name = format!("{class_name}.{}", &caps[1]);
                    records.push(record(FunctionKind::Method, name, line_no, signature));
                    continue;
                }
            }

            if let Some(caps) = self.function_re.captures(line) {
                records.push(record(FunctionKind::Function, caps[1].to_string(), line_no, signature));
            }
        }

        records
    }
}

fn record(kind: FunctionKind, name: String, line: usize, signature: String) -> FunctionRecord {
    FunctionRecord {
        kind,
        name,
        line,
        signature,
    }
}

fn qualify(class_name: Option<&str>, member: &str) -> String {
    match class_name {
        Some(class_name) => format!("{class_name}.{member}"),
        None => member.to_string(),
    }
}

/// Key used for a file in the inventory: relative to `root` when possible.
pub fn inventory_key(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
