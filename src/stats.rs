//! Line and file totals for a scanned tree
//!
//! Both totals come from independent walks of the tree. A file that cannot
//! be read is reported and left out of the line total. The file total never
//! opens files.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};
use thiserror::Error;

use crate::config::ScanConfig;
use crate::walker::ScanWalker;

/// A matching file that could not be opened or decoded as UTF-8.
#[derive(Debug, Error)]
#[error("Could not read {}: {}", .path.display(), .source)]
pub struct ReadError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Totals produced by a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Non-blank lines across all readable matching files
    pub lines: usize,
    /// Matching files
    pub files: usize,
}

/// Run both passes over the configured directory.
pub fn scan(config: &ScanConfig) -> ScanSummary {
    let lines = count_lines(&config.directory, &config.extensions);
    let files = count_files(&config.directory, &config.extensions);
    tracing::info!(lines, files, "scan complete");
    ScanSummary { lines, files }
}

/// Total non-blank lines in matching files under `root`.
///
/// Unreadable files are reported on stdout and skipped.
pub fn count_lines(root: &Path, extensions: &[String]) -> usize {
    count_lines_with(root, extensions, |err| println!("{}", err))
}

/// Like [`count_lines`], handing each unreadable file to `on_error`.
pub fn count_lines_with(
    root: &Path,
    extensions: &[String],
    mut on_error: impl FnMut(ReadError),
) -> usize {
    let mut total = 0;
    ScanWalker::new(extensions).for_each_match(root, |path| match count_file_lines(path) {
        Ok(lines) => {
            tracing::debug!(path = %path.display(), lines, "counted");
            total += lines;
        }
        Err(err) => on_error(err),
    });
    total
}

/// Number of matching files under `root`.
pub fn count_files(root: &Path, extensions: &[String]) -> usize {
    let mut total = 0;
    ScanWalker::new(extensions).for_each_match(root, |_| total += 1);
    total
}

/// Non-blank lines in a single file.
pub fn count_file_lines(path: &Path) -> Result<usize, ReadError> {
    let content = std::fs::read_to_string(path).map_err(|source| ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(count_non_blank_lines(&content))
}

/// Count lines that are not empty after trimming whitespace.
///
/// `\n`, `\r\n` and a lone `\r` all end a line.
pub fn count_non_blank_lines(content: &str) -> usize {
    content
        .split(['\n', '\r'])
        .filter(|line| !line.trim_matches(is_blank_char).is_empty())
        .count()
}

/// Unicode whitespace plus the U+001C..=U+001F information separators.
fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Print the summary to stdout with optional color.
pub fn print_summary(summary: &ScanSummary, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color_choice);
    write_summary(&mut stdout, summary)
}

/// Write the summary block to any color-capable writer.
pub fn write_summary(out: &mut impl WriteColor, summary: &ScanSummary) -> io::Result<()> {
    let mut bold = ColorSpec::new();
    bold.set_bold(true);

    writeln!(out)?;
    out.set_color(&bold)?;
    write!(out, "Lines of Code:")?;
    out.reset()?;
    writeln!(out, " {}", format_number(summary.lines))?;

    out.set_color(&bold)?;
    write!(out, "Number of Files:")?;
    out.reset()?;
    writeln!(out, " {}", format_number(summary.files))?;
    writeln!(out)?;

    Ok(())
}

/// Format a number with thousand separators.
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use termcolor::NoColor;
    use tempfile::TempDir;

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(123456), "123,456");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_count_non_blank_lines() {
        assert_eq!(count_non_blank_lines(""), 0);
        assert_eq!(count_non_blank_lines("a\nb\nc"), 3);
        assert_eq!(count_non_blank_lines("a\n\nb\n"), 2);
        assert_eq!(count_non_blank_lines("  \n\t\n a \n"), 1);
        assert_eq!(count_non_blank_lines("a\r\nb\r\n\r\n"), 2);
        assert_eq!(count_non_blank_lines("a\rb"), 2);
    }

    #[test]
    fn test_separator_controls_are_blank() {
        assert_eq!(count_non_blank_lines("\x1c\n\x1d\x1e\n \x1f \n"), 0);
        assert_eq!(count_non_blank_lines("\x1ca\x1f\n"), 1);
        // Other control characters still count as content.
        assert_eq!(count_non_blank_lines("\x1b\n\x00\n"), 2);
    }

    #[test]
    fn test_comments_are_not_special() {
        assert_eq!(count_non_blank_lines("// comment\n# also\n/* block */\n"), 3);
    }

    #[test]
    fn test_reference_tree() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "src/a.ts", b"one\ntwo\nthree\n");
        write(root, "src/b.tsx", b"one\n\ntwo\n");
        write(root, "src/test/c.ts", "x\n".repeat(10).as_bytes());

        let list = exts(&[".ts", ".tsx"]);
        let src = root.join("src");
        assert_eq!(count_files(&src, &list), 2);
        assert_eq!(count_lines(&src, &list), 5);
    }

    #[test]
    fn test_unmatched_files_ignored() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "main.rs", b"fn main() {}\n");
        write(root, "README.md", b"# readme\n");

        let list = exts(&[".ts"]);
        assert_eq!(count_files(root, &list), 0);
        assert_eq!(count_lines(root, &list), 0);
    }

    #[test]
    fn test_unreadable_file_skipped() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "good.ts", b"a\nb\n");
        write(root, "bad.ts", &[b'a', b'\n', 0xff, 0xfe, b'\n']);

        let list = exts(&[".ts"]);
        let mut errors = Vec::new();
        let lines = count_lines_with(root, &list, |e| errors.push(e));

        assert_eq!(lines, 2);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].path.ends_with("bad.ts"));
        assert!(errors[0].to_string().starts_with("Could not read "));

        // The file pass never opens files.
        assert_eq!(count_files(root, &list), 2);
    }

    #[test]
    fn test_scan_uses_config() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "lib/a.py", b"import os\n\nprint(os.name)\n");
        write(root, "lib/TEST/b.py", b"skipped\n");

        let config = ScanConfig::new(root.join("lib"), exts(&[".py"])).unwrap();
        assert_eq!(scan(&config), ScanSummary { lines: 2, files: 1 });
    }

    #[test]
    fn test_write_summary() {
        let mut out = NoColor::new(Vec::new());
        write_summary(&mut out, &ScanSummary { lines: 12345, files: 7 }).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(text, "\nLines of Code: 12,345\nNumber of Files: 7\n\n");
    }
}
