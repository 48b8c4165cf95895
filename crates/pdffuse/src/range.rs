//! Page-range expression parsing (simple dialect).
//!
//! A range expression selects pages from a single document:
//! - `"all"` or `""` - every page
//! - `"3"` - a single page (1-based)
//! - `"1-5"` - an inclusive range
//! - `"1,3,7-10"` - any comma-separated combination
//!
//! The dialect is deliberately lenient: tokens that fail to parse or fall
//! outside the document are dropped rather than rejected, so a stale range
//! saved against a shorter document still merges whatever remains valid.
//! The strict counterpart used by command scripts lives in [`crate::command`].

/// Resolve a range expression against a document's page count.
///
/// Returns zero-based page indices, strictly ascending and deduplicated,
/// every index `< total_pages`. An empty result means the expression
/// selects nothing from this document.
///
/// # Arguments
///
/// * `expr` - Range expression in the simple dialect
/// * `total_pages` - Actual page count of the source document
///
/// # Examples
///
/// ```
/// use pdffuse::range::parse_range;
///
/// assert_eq!(parse_range("all", 3), vec![0, 1, 2]);
/// assert_eq!(parse_range("1,3,7-10", 12), vec![0, 2, 6, 7, 8, 9]);
/// assert_eq!(parse_range("1-5", 3), vec![0, 1, 2]);
/// ```
pub fn parse_range(expr: &str, total_pages: usize) -> Vec<usize> {
    if expr.is_empty() || expr == "all" {
        return (0..total_pages).collect();
    }

    let mut pages: Vec<usize> = Vec::new();

    for token in expr.split(',') {
        let token = token.trim();

        if let Some((start, end)) = token.split_once('-') {
            let (Ok(start), Ok(end)) = (start.trim().parse::<i64>(), end.trim().parse::<i64>())
            else {
                // Malformed bound, token contributes nothing.
                continue;
            };

            // 1-based inclusive bounds, truncated to the document.
            for i in (start - 1)..end.min(total_pages as i64) {
                if i >= 0 && !pages.contains(&(i as usize)) {
                    pages.push(i as usize);
                }
            }
        } else {
            let Ok(page) = token.parse::<i64>() else {
                continue;
            };

            let index = page - 1;
            if index >= 0 && (index as usize) < total_pages && !pages.contains(&(index as usize)) {
                pages.push(index as usize);
            }
        }
    }

    // Appends are already deduplicated; sorting guards against
    // out-of-order multi-range input like "5-6,1-2".
    pages.sort_unstable();
    pages.dedup();
    pages
}
