use clap::ValueEnum;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Aligned columns; nested values stay inline JSON.
    Table,
    /// Compact single-line JSON, for piping.
    Raw,
}

/// What command handlers need from the global flags. Log verbosity is
/// consumed by tracing setup before dispatch.
#[derive(Clone, Copy, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
}
