//! Extraction of the displayable portion of a source file.

/// Line prefix marking the start of the displayable body of a source file.
pub const START_DELIMITER: &str = "/* START SOLUTION */";

/// Line prefix marking the end of the displayable body of a source file.
pub const END_DELIMITER: &str = "/* END SOLUTION */";

/// Extracts the body of `source` bounded by the given delimiter lines.
///
/// A line beginning with `start` clears everything accumulated so far, so only
/// the content after the last start delimiter survives. Accumulation stops at
/// the first line beginning with `end`. A file containing no delimiters comes
/// back whole. Tabs are normalized to four-space indentation and the result is
/// trimmed of leading and trailing whitespace.
pub fn extract(source: &str, start: &str, end: &str) -> String {
    let mut lines = Vec::new();

    for line in source.lines() {
        if line.starts_with(start) {
            lines.clear();
        } else if line.starts_with(end) {
            break;
        } else {
            lines.push(line);
        }
    }

    let body = lines.join("\n").replace('\t', "    ");

    body.trim().to_string()
}

/// Extracts using the default solution delimiters.
pub fn extract_solution(source: &str) -> String {
    extract(source, START_DELIMITER, END_DELIMITER)
}
