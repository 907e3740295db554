/// Softmax temperature used when turning raw style scores into a distribution.
///
/// Raw scores move in steps of one quiz weight (roughly 0..1 per pick), so a
/// temperature well below 1 lets a handful of consistent picks dominate the
/// distribution while a single pick still leaves the other styles visible.
pub const SOFTMAX_TEMPERATURE: f64 = 0.35;

/// Largest sampling bucket per style: only the top images by quiz weight are drawn from.
pub const MAX_BUCKET_SIZE: usize = 12;

/// Smallest sampling bucket per style, when the style has at least this many images.
pub const MIN_BUCKET_SIZE: usize = 4;

/// How many times the second style is re-drawn while it equals the first.
pub const DISTINCT_PAIR_RETRIES: usize = 10;

/// Evidence entries kept per style and direction (positive / negative).
pub const EVIDENCE_LIMIT: usize = 5;

/// Format tag written into exported results.
pub const RESULT_VERSION: &str = "user-test-prototype-v2";
