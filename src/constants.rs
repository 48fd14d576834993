//! Centralized constants for unit tables and file-name patterns.

/// Binary units used by the byte-size formatter, smallest first.
pub const BYTE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Scale factor between consecutive byte units.
pub const BYTE_STEP: f64 = 1024.0;

/// Relative-time buckets as (seconds per unit, plural unit name), largest first.
pub const TIME_INTERVALS: [(i64, &str); 5] = [
    (31_536_000, "years"),
    (2_592_000, "months"),
    (86_400, "days"),
    (3_600, "hours"),
    (60, "minutes"),
];

/// Prefix shared by every file produced by a send.
pub const REMOTE_PREFIX: &str = "remote-send";

/// Suffix of plain-text sends.
pub const TEXT_SUFFIX: &str = ".txt";

/// Suffix of zipped sends.
pub const ZIP_SUFFIX: &str = ".zip";

/// Reported when a transfer location holds nothing worth fetching.
pub const NO_REMOTE_FILES: &str = "No file found currently. Maybe you need to `send` first?";

/// Offset-less date-time layouts accepted for timestamps, interpreted as UTC.
pub const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Bare calendar date layout (YYYY-MM-DD), interpreted as UTC midnight.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read size used when copying files in and out of a transfer location.
pub const TRANSFER_CHUNK_SIZE: usize = 64 * 1024;
