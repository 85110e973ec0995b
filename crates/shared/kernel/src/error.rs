use std::borrow::Cow;

/// Errors raised while bootstrapping the client.
#[noah_derive::noah_error]
pub enum KernelError {
    /// The element the UI tree mounts into does not exist. Startup cannot continue.
    #[error("Mount point not found{}: no element with id '{id}'", format_context(.context))]
    MountPointMissing { id: String, context: Option<Cow<'static, str>> },

    /// The host refused an operation (observer creation, listener registration, ...).
    #[error("Host error{}: {message}", format_context(.context))]
    Host { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The feature gating service failed to deliver flags.
    #[error("Feature flag fetch failed{}: {message}", format_context(.context))]
    FlagFetch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A deferred stylesheet could not be attached.
    #[error("Stylesheet load failed{}: {message}", format_context(.context))]
    Stylesheet { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal kernel error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
