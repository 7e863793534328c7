//! Format literals and limits for goroutine dump parsing.

/// Current JSON report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Prefix that introduces every goroutine header line
pub const GOROUTINE_PREFIX: &str = "goroutine ";

/// Prefix of the line naming the function that spawned a goroutine
pub const CREATED_BY_PREFIX: &str = "created by ";

/// Line the runtime prints when it truncates a deep stack
pub const ELIDED_FRAMES_SENTINEL: &str = "...additional frames elided...";

// Ancestor back-reference, printed with GODEBUG=tracebackancestors=N:
// "[originating from goroutine 17]:"
pub const ORIGINATING_FROM_PREFIX: &str = "[originating from goroutine ";
pub const ORIGINATING_FROM_SUFFIX: &str = "]:";

/// Header annotation for goroutines wired to an OS thread
pub const LOCKED_TO_THREAD: &str = "locked to thread";

/// Unit suffix of the wait-duration header annotation
pub const MINUTES_SUFFIX: &str = " minutes";

pub const MINUTES_TO_MILLIS: u64 = 60 * 1000;

/// Ancestor chain depth accepted before a unit is rejected.
/// The runtime caps tracebackancestors at 50, so 64 leaves headroom.
pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 64;

/// Largest ancestor depth the CLI accepts. Every ancestor nests one more
/// JSON object in the report, and serde_json stops reading at 128 levels.
pub const MAX_ANCESTOR_DEPTH_LIMIT: usize = 100;
