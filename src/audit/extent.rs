/// How far past the declaration line the brace scan may look.
pub const MAX_SCAN_LINES: usize = 500;

/// Approximate textual span of a function, found by brace counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// 0-based index of the declaration line.
    pub start: usize,
    /// Lines counted from the first line that opens a brace.
    pub length: usize,
}

impl Extent {
    /// The `length` lines beginning at the declaration line.
    pub fn body<'s, 'a>(&self, lines: &'s [&'a str]) -> &'s [&'a str] {
        let start = self.start.min(lines.len());
        let end = (self.start + self.length).min(lines.len());
        &lines[start..end]
    }
}

/// Counting starts at the first line containing `{` and stops once the running
/// `{`/`}` balance is back to zero after more than one counted line. Braces in
/// strings and comments are counted like any other.
pub fn function_extent(lines: &[&str], start_line: usize) -> Extent {
    let start = start_line.saturating_sub(1);
    let end = (start_line + MAX_SCAN_LINES).min(lines.len());

    let mut balance: i64 = 0;
    let mut length = 0usize;
    let mut started = false;

    for line in lines.iter().take(end).skip(start) {
        if line.contains('{') {
            started = true;
        }
        if started {
            length += 1;
            balance += line.matches('{').count() as i64 - line.matches('}').count() as i64;
            if balance == 0 && length > 1 {
                break;
            }
        }
    }

    Extent { start, length }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn counts_until_braces_balance() {
        let src = lines("function a() {\n  if (x) {\n    y();\n  }\n}\nfunction b() {}\n");
        let extent = function_extent(&src, 1);
        assert_eq!(extent.length, 5);
        assert_eq!(extent.body(&src).last(), Some(&"}"));
    }

    #[test]
    fn one_line_body_keeps_counting_past_balance() {
        // A balanced first line is not enough to stop; the scan runs on to the
        // next line that brings the balance back to zero.
        let src = lines("function a() {}\nfoo();\n");
        let extent = function_extent(&src, 1);
        assert_eq!(extent.length, 2);
    }

    #[test]
    fn declaration_past_end_of_file_is_empty() {
        let src = lines("x\n");
        let extent = function_extent(&src, 10);
        assert_eq!(extent.length, 0);
        assert!(extent.body(&src).is_empty());
    }

    #[test]
    fn signature_without_brace_starts_on_next_brace() {
        let src = lines("function a(\n  x,\n) {\n  return x;\n}\n");
        let extent = function_extent(&src, 1);
        assert_eq!(extent.length, 3);
        // The body slice is anchored at the declaration, not the brace.
        assert_eq!(extent.body(&src)[0], "function a(");
    }
}
