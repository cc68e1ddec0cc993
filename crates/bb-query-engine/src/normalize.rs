//! Text normalization shared by the classifier and the extractor.

/// Lower-case and trim. Downstream matching runs against exactly this form,
/// so nothing else (punctuation, stemming) is touched.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
