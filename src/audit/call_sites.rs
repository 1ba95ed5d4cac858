use anyhow::Result;
use rayon::prelude::*;
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;

/// Source texts searched for call sites. Counts are per matching line.
pub struct CallSiteIndex {
    files: Vec<(PathBuf, String)>,
    cache: HashMap<String, usize>,
}

impl CallSiteIndex {
    pub fn new(files: Vec<(PathBuf, String)>) -> Self {
        Self {
            files,
            cache: HashMap::new(),
        }
    }

    /// Lines anywhere in the index that look like a call to `name`: the bare
    /// name followed by `(`. Declarations match too.
    pub fn count(&mut self, name: &str) -> Result<usize> {
        if let Some(&count) = self.cache.get(name) {
            return Ok(count);
        }

        let pattern = Regex::new(&format!(r"\b{}\s*\(", regex::escape(name)))?;
        let count: usize = self
            .files
            .par_iter()
            .map(|(_, text)| text.lines().filter(|line| pattern.is_match(line)).count())
            .sum();

        self.cache.insert(name.to_string(), count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_matching_lines_across_files() {
        let mut index = CallSiteIndex::new(vec![
            (PathBuf::from("a.gs"), "run();\nrun ( 1 );\nrerun();\n".to_string()),
            (PathBuf::from("b.gs"), "x.run(); run(); // same line\n".to_string()),
        ]);
        assert_eq!(index.count("run").unwrap(), 3);
        assert_eq!(index.count("missing").unwrap(), 0);
    }
}
