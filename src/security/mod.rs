pub mod argv;
pub mod classifier;

pub use argv::{prepare_argv, ArgvError};
pub use classifier::{ClassificationVerdict, Classifier};

/// Patterns for destructive or irreversible operations
///
/// Matched against the lowercased command. Any hit makes the command unsafe,
/// whatever else it contains.
pub const DENYLIST_PATTERNS: &[&str] = &[
    // Deletion
    r"\brm\b",
    r"\brm\s+-rf\b",
    // Raw disk writes and filesystem creation
    r"\bdd\b",
    r"\bmkfs\b",
    // Device files
    r"/dev/",
    // Power state
    r"\bshutdown\b",
    r"\breboot\b",
];

/// Read-only and inspection verbs
///
/// A command must contain at least one of these to be considered safe. The
/// same list decides which programs may be launched once a command is confirmed.
pub const ALLOWED_FRAGMENTS: &[&str] = &[
    // Listing and searching
    "find",
    "ls",
    "grep",
    // Counting and sizes
    "wc",
    "du",
    // Permissions and metadata
    "chmod",
    "chown",
    "stat",
    "file",
    // Viewing
    "head",
    "tail",
];
