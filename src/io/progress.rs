//! Terminal progress display for mosaic generation

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks collapsed cells against the grid size for one generation pass
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a bar sized for `cell_count` cells
    pub fn new(cell_count: usize) -> Self {
        let bar = ProgressBar::new(cell_count as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        Self { bar }
    }

    /// Label the pass currently running
    pub fn start_pass(&self, label: &str) {
        self.bar.set_prefix(label.to_string());
        self.bar.set_position(0);
        self.bar.set_message(String::new());
    }

    /// Report collapsed cells and the step count
    pub fn update(&self, collapsed: usize, step: usize) {
        self.bar.set_position(collapsed as u64);
        self.bar.set_message(format!("step {step}"));
    }

    /// Current bar position
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Close the bar with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}
