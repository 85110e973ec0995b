use noah_derive::noah_error;
use std::borrow::Cow;

#[noah_error]
pub enum ProbeError {
    #[error("I/O failure{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing value{}: {name}", format_context(.context))]
    Missing { name: String, context: Option<std::borrow::Cow<'static, str>> },

    #[error("Internal fault{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {}
