use indicatif::{ProgressBar, ProgressStyle};

/// Builds a `completed/total` bar for one pipeline phase.
///
/// When `visible` is false the bar is hidden but still counts, so callers
/// never branch on whether progress is shown.
pub fn progress_bar(total: u64, message: &str, visible: bool) -> ProgressBar {
    let pb = if visible {
        ProgressBar::new(total)
    } else {
        ProgressBar::hidden()
    };
    pb.set_length(total);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg} [{bar:30.blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .progress_chars("=> "),
    );
    pb.set_message(message.to_string());
    pb
}
