//! BM25S term contribution.

/// Inputs shared by every term of one (document, query) pair.
#[derive(Debug, Clone, Copy)]
pub struct DocContext {
    pub doc_length: f64,
    pub avg_doc_length: f64,
    pub k1: f64,
    pub b: f64,
}

impl DocContext {
    /// Documents more than twice the average length get an extra penalty.
    pub fn is_long(&self) -> bool {
        self.doc_length > 2.0 * self.avg_doc_length
    }

    fn length_penalty(&self) -> f64 {
        (self.avg_doc_length / self.doc_length).min(1.0)
    }
}

/// Score contributed by one query term with frequency `tf` in the document.
///
/// Returns 0 when `tf` is 0 or when the collection has no terms at all
/// (`avg_doc_length == 0`), so the ratio below is never evaluated on an
/// empty collection.
pub fn term_score(tf: usize, weight: f64, ctx: &DocContext) -> f64 {
    if tf == 0 || ctx.avg_doc_length <= 0.0 {
        return 0.0;
    }

    let tf = tf as f64;
    let numerator = tf * (ctx.k1 + 1.0);
    let denominator = tf
        + ctx.k1
            * (1.0 - ctx.b + ctx.b * (ctx.doc_length / ctx.avg_doc_length));
    let score = weight * numerator / denominator;

    if ctx.is_long() {
        score * ctx.length_penalty()
    } else {
        score
    }
}
