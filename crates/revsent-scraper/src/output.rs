//! CSV export of a collected review batch.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use revsent_core::ReviewBatch;

use crate::error::ScraperError;

pub const REVIEW_HEADER: &str = "Review";

fn needs_quotes(cell: &str) -> bool {
    cell.contains([',', '"', '\n', '\r']) || cell.starts_with(' ') || cell.ends_with(' ')
}

fn write_cell<W: Write>(w: &mut W, cell: &str) -> io::Result<()> {
    if needs_quotes(cell) {
        write!(w, "\"{}\"", cell.replace('"', "\"\""))
    } else {
        w.write_all(cell.as_bytes())
    }
}

/// Writes `batch` as CSV with a `Review` header to `w`.
///
/// # Errors
///
/// Propagates any I/O error from the writer.
pub fn write_reviews<W: Write>(mut w: W, batch: &ReviewBatch) -> io::Result<()> {
    write!(w, "{REVIEW_HEADER}\r\n")?;
    for review in batch {
        write_cell(&mut w, review.text())?;
        w.write_all(b"\r\n")?;
    }
    w.flush()
}

/// Writes `batch` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ScraperError::Output`] if the file cannot be created or written.
pub fn write_reviews_csv(path: &Path, batch: &ReviewBatch) -> Result<(), ScraperError> {
    let to_output_err = |source: io::Error| ScraperError::Output {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(to_output_err)?;
    write_reviews(BufWriter::new(file), batch).map_err(to_output_err)?;

    tracing::info!(path = %path.display(), reviews = batch.len(), "saved reviews");
    Ok(())
}

#[cfg(test)]
mod tests {
    use revsent_core::Review;

    use super::*;

    fn render(batch: &ReviewBatch) -> String {
        let mut buf = Vec::new();
        write_reviews(&mut buf, batch).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_only_for_empty_batch() {
        assert_eq!(render(&ReviewBatch::with_cap(10)), "Review\r\n");
    }

    #[test]
    fn plain_cells_are_unquoted() {
        let batch = ReviewBatch::from_reviews(vec![Review::new("Nice watch")], 10);
        assert_eq!(render(&batch), "Review\r\nNice watch\r\n");
    }

    #[test]
    fn cells_with_commas_quotes_and_newlines_are_quoted() {
        let batch = ReviewBatch::from_reviews(
            vec![
                Review::new("good, not great"),
                Review::new(r#"the "premium" strap"#),
                Review::new("line one\nline two"),
            ],
            10,
        );
        assert_eq!(
            render(&batch),
            "Review\r\n\"good, not great\"\r\n\"the \"\"premium\"\" strap\"\r\n\"line one\nline two\"\r\n"
        );
    }

    #[test]
    fn writes_and_overwrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        std::fs::write(&path, "stale contents that should disappear").unwrap();

        let batch = ReviewBatch::from_reviews(vec![Review::new("fresh")], 10);
        write_reviews_csv(&path, &batch).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Review\r\nfresh\r\n");
    }

    #[test]
    fn unwritable_path_is_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("reviews.csv");
        let batch = ReviewBatch::with_cap(1);
        let err = write_reviews_csv(&path, &batch).unwrap_err();
        assert!(matches!(err, ScraperError::Output { .. }));
    }
}
