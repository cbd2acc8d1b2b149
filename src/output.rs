//! CLI output formatting.
//!
//! One line per processed file, source first, then what happened:
//!
//! ```text
//! Resized: photos/cat.jpg -> photos/cat_web.jpg (1000x750)
//! Copied: photos/dog.png -> photos/dog_web.png (already within 1000px)
//! Skipped: notes.txt (unsupported extension)
//! ```

use crate::imaging::ResizeOutcome;
use std::path::Path;

/// Format the outcome of one resize run as a single status line.
pub fn format_outcome(source: &Path, outcome: &ResizeOutcome, max_dimension: f64) -> String {
    match outcome {
        ResizeOutcome::Skipped => {
            format!("Skipped: {} (unsupported extension)", source.display())
        }
        ResizeOutcome::Copied { output } => format!(
            "Copied: {} -> {} (already within {}px)",
            source.display(),
            output.display(),
            max_dimension
        ),
        ResizeOutcome::Resized {
            output,
            width,
            height,
        } => format!(
            "Resized: {} -> {} ({}x{})",
            source.display(),
            output.display(),
            width,
            height
        ),
    }
}
