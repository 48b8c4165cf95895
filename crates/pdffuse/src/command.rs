//! Command-script parsing (command dialect).
//!
//! A merge script is a newline-separated list of instructions:
//!
//! ```text
//! 1:1-5
//! 2:all
//! 1:7,9
//! --keep-bookmarks
//! ```
//!
//! Each file line is `<fileIndex>:<pageRange>` with a 1-based file index;
//! lines starting with `--` toggle options. Unlike the lenient simple
//! dialect in [`crate::range`], this dialect validates strictly: unknown
//! options, bad line syntax, out-of-bounds file references and malformed
//! page tokens are all reported. Problems never abort parsing - they are
//! collected into [`ParsedCommands::errors`] and the caller decides
//! whether to proceed.

use thiserror::Error;

/// One file instruction from a merge script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCommand {
    /// 1-based index into the uploaded file list.
    pub file_index: usize,

    /// Page-range expression for that file, in the simple dialect.
    pub page_range: String,
}

/// Option flags a script may toggle.
///
/// Both flags are carried through to the merge but have no effect on the
/// produced document; bookmark merging and print optimization are not
/// implemented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptOptions {
    /// `--keep-bookmarks` was given.
    pub keep_bookmarks: bool,

    /// `--print` was given.
    pub print_mode: bool,
}

/// A problem found while parsing a merge script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Option line does not name a known flag.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// Line is neither an option nor `<fileIndex>:<pageRange>`.
    #[error("malformed line: {0}")]
    Syntax(String),

    /// File index is outside the uploaded batch.
    #[error("file {index} does not exist (batch has {file_count} file(s))")]
    UnknownFileReference {
        /// The 1-based index the script referenced.
        index: usize,
        /// Number of files in the batch.
        file_count: usize,
    },

    /// Page-range expression fails the strict grammar.
    #[error("invalid page range: {0}")]
    InvalidPageToken(String),
}

/// Outcome of parsing a merge script.
///
/// Parsing never fails outright; any line that cannot be understood is
/// recorded in `errors` and skipped, leaving `commands` with everything
/// that did parse.
#[derive(Debug, Clone, Default)]
pub struct ParsedCommands {
    /// File instructions, in script order.
    pub commands: Vec<MergeCommand>,

    /// Option flags collected from `--` lines.
    pub options: ScriptOptions,

    /// Problems found, in script order.
    pub errors: Vec<CommandError>,
}

impl ParsedCommands {
    /// True if the script parsed cleanly.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse a merge script against a batch of `file_count` files.
///
/// Blank lines are ignored and every line is trimmed before matching.
///
/// # Examples
///
/// ```
/// use pdffuse::command::parse_commands;
///
/// let parsed = parse_commands("1:1-5\n2:all\n--keep-bookmarks", 2);
/// assert!(parsed.is_valid());
/// assert_eq!(parsed.commands.len(), 2);
/// assert!(parsed.options.keep_bookmarks);
/// ```
pub fn parse_commands(input: &str, file_count: usize) -> ParsedCommands {
    let mut parsed = ParsedCommands::default();

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with("--") {
            match line {
                "--keep-bookmarks" => parsed.options.keep_bookmarks = true,
                "--print" => parsed.options.print_mode = true,
                other => parsed.errors.push(CommandError::UnknownOption(other.to_string())),
            }
            continue;
        }

        // File line: <digits>:<rest>
        let Some((index_part, range_part)) = line.split_once(':') else {
            parsed.errors.push(CommandError::Syntax(line.to_string()));
            continue;
        };

        if index_part.is_empty()
            || range_part.is_empty()
            || !index_part.bytes().all(|b| b.is_ascii_digit())
        {
            parsed.errors.push(CommandError::Syntax(line.to_string()));
            continue;
        }

        let Ok(file_index) = index_part.parse::<usize>() else {
            parsed.errors.push(CommandError::Syntax(line.to_string()));
            continue;
        };

        if file_index < 1 || file_index > file_count {
            parsed.errors.push(CommandError::UnknownFileReference {
                index: file_index,
                file_count,
            });
            continue;
        }

        let page_range = range_part.trim();
        if !is_valid_page_range(page_range) {
            parsed
                .errors
                .push(CommandError::InvalidPageToken(page_range.to_string()));
            continue;
        }

        parsed.commands.push(MergeCommand {
            file_index,
            page_range: page_range.to_string(),
        });
    }

    parsed
}

/// Strict page-range grammar: `all`, or comma-separated `N` / `N-M` tokens
/// with no whitespace (the pattern `^(\d+(-\d+)?)(,\d+(-\d+)?)*$`).
fn is_valid_page_range(range: &str) -> bool {
    if range == "all" {
        return true;
    }

    if range.is_empty() {
        return false;
    }

    range.split(',').all(|token| match token.split_once('-') {
        Some((start, end)) => is_digits(start) && is_digits(end),
        None => is_digits(token),
    })
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
