use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Canvass".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Extract course content from saved LMS pages\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print extraction details summary
pub fn print_extraction_details(doc: &canvass_core::ExtractedDocument) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Extraction Details".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!(
        "  {} {}",
        "Content type:".dimmed(),
        doc.metadata.content_type.as_str().bright_white()
    );
    eprintln!(
        "  {} {}",
        "Words:".dimmed(),
        doc.metadata.word_count.to_string().bright_white()
    );
    eprintln!(
        "  {} {}",
        "Regions:".dimmed(),
        doc.metadata.source_labels.len().to_string().bright_white()
    );
    eprintln!("  {} {}\n", "Headings:".dimmed(), doc.outline.len().to_string().bright_white());
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
