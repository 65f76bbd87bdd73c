//! Output formatting for search results and index statistics

use crate::index::types::{BuildReport, ContentMatch, IndexStats};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::UNIX_EPOCH;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn stdout(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Print content matches as `score  path`
pub fn print_content_matches(matches: &[ContentMatch], color: bool) -> io::Result<()> {
    let mut out = stdout(color);
    let width = matches
        .first()
        .map(|m| m.score.to_string().len())
        .unwrap_or(1);

    for m in matches {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{:>width$}", m.score)?;
        out.reset()?;
        write!(out, "  ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        writeln!(out, "{}", m.path.display())?;
        out.reset()?;
    }

    Ok(())
}

/// Print filename matches, one per line
pub fn print_file_matches(paths: &[PathBuf], color: bool) -> io::Result<()> {
    let mut out = stdout(color);

    for path in paths {
        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        if let (Some(parent), Some(name)) = (parent, path.file_name()) {
            write!(out, "{}{}", parent.display(), std::path::MAIN_SEPARATOR)?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
            writeln!(out, "{}", name.to_string_lossy())?;
            out.reset()?;
        } else {
            writeln!(out, "{}", path.display())?;
        }
    }

    Ok(())
}

/// Print the last build report and index size
pub fn print_stats(report: Option<&BuildReport>, stats: &IndexStats, color: bool) -> io::Result<()> {
    let mut out = stdout(color);

    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "Index Statistics")?;
    out.reset()?;
    writeln!(out, "================")?;
    writeln!(out)?;

    if let Some(report) = report {
        writeln!(out, "Root path:        {}", report.root.display())?;
        writeln!(out, "Discovered:       {}", report.files_discovered)?;
        writeln!(out, "Skipped:          {}", report.files_skipped())?;
        writeln!(out, "Build time:       {} ms", report.elapsed.as_millis())?;
        let completed = report
            .completed_at
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        writeln!(out, "Completed (unix): {}", completed)?;
        writeln!(out)?;
    }

    writeln!(out, "Indexed files:    {}", stats.files)?;
    writeln!(out, "Distinct words:   {}", stats.words)?;
    writeln!(out, "Trigrams:         {}", stats.trigrams)?;
    writeln!(out, "Total lines:      {}", stats.total_lines)?;
    writeln!(out, "Total size:       {}", format_size(stats.total_bytes))?;

    Ok(())
}

/// Format byte size to human readable
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(12), "12 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }
}
