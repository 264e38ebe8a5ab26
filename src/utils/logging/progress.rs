//! Progress reporting for file loading
//!
//! Bars are drawn with the indicatif crate. A disabled bar is hidden, so
//! callers never need to branch on whether progress is shown.

use indicatif::{ProgressBar, ProgressStyle};

/// Default style for a file loading progress bar
pub const DEFAULT_FILE_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Create a progress bar counting loaded files
///
/// # Arguments
/// * `length` - Number of files to load
/// * `description` - Message shown next to the bar
/// * `enabled` - Whether the bar is drawn at all
#[must_use]
pub fn file_progress_bar(length: u64, description: &str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(length);
    if let Ok(style) = ProgressStyle::default_bar().template(DEFAULT_FILE_TEMPLATE) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(description.to_string());
    pb
}

/// Finish a progress bar with a completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    if let Some(msg) = message {
        pb.finish_with_message(msg.to_string());
    } else {
        pb.finish();
    }
}
