use std::borrow::Cow;

/// Failures of the version-control query. [`crate::resolve_branch`] swallows
/// all of them; they surface only through [`crate::GitQuery`] directly.
#[noah_derive::noah_error]
pub enum BuildInfoError {
    /// The tool could not be started (not installed, not executable, ...).
    #[error("Failed to run git{}: {source}", format_context(.context))]
    Spawn { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The tool ran but reported failure, e.g. outside a repository.
    #[error("git exited unsuccessfully{}: {message}", format_context(.context))]
    Exit { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("git produced non UTF-8 output{}: {source}", format_context(.context))]
    Encoding { source: std::string::FromUtf8Error, context: Option<Cow<'static, str>> },

    #[error("Internal build info error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
