//! Plain-text rendering of a `View` for the command line.

use std::io::{self, Write};

use super::model::{Banner, BannerLevel, View};

fn level_tag(level: BannerLevel) -> &'static str {
    match level {
        BannerLevel::Success => "OK",
        BannerLevel::Warning => "WARNING",
        BannerLevel::Danger => "ERROR",
    }
}

fn write_banner(out: &mut impl Write, banner: &Banner) -> io::Result<()> {
    writeln!(out, "[{}] {}", level_tag(banner.level), banner.message)?;
    if let Some(footer) = &banner.footer {
        writeln!(out, "      {}", footer.text)?;
        for link in &footer.links {
            writeln!(out, "      - {}: {}", link.label, link.href)?;
        }
    }
    Ok(())
}

/// Banners, then the errors list
pub fn write_view(out: &mut impl Write, view: &View) -> io::Result<()> {
    for banner in &view.inserted.banners {
        write_banner(out, banner)?;
    }

    if let Some(panel) = &view.inserted.errors_panel {
        writeln!(out)?;
        writeln!(out, "{}:", panel.heading)?;
        for entry in &panel.entries {
            writeln!(out, "  [{}] {}: {}", entry.index, entry.label, entry.message)?;
            if !entry.extract.is_empty() {
                for line in entry.extract.lines() {
                    writeln!(out, "      | {}", line)?;
                }
            }
        }
    }

    Ok(())
}

/// The "ERROR @" banner followed by the highlighted excerpt with line numbers
pub fn write_selection(
    out: &mut impl Write,
    view: &View,
    first_line: u32,
    excerpt: &str,
) -> io::Result<()> {
    if let Some(current) = &view.inserted.current_error {
        writeln!(out)?;
        writeln!(out, "{}", current)?;
    }
    for (offset, line) in excerpt.lines().enumerate() {
        writeln!(out, "{:>6} | {}", first_line as usize + offset, line)?;
    }
    Ok(())
}
