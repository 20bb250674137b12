use std::{borrow::Cow, fmt, panic::Location};

/// Error context carrying a readable message and the call-site that produced it.
///
/// Build one with [`DiagnosticMessage::new`] inside a `#[track_caller]`
/// constructor, or with the [`diag!`] macro for inline formatting.
#[derive(Clone, Debug)]
pub struct DiagnosticMessage {
    message: Cow<'static, str>,
    location: &'static Location<'static>,
}

impl DiagnosticMessage {
    #[track_caller]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            location: Location::caller(),
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Returns a copy whose message is prefixed with `scope`, keeping the
    /// original call-site.
    pub fn scoped(&self, scope: &str) -> Self {
        Self {
            message: Cow::Owned(format!("{scope}: {}", self.message)),
            location: self.location,
        }
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (at {}:{})",
            self.message,
            self.location.file(),
            self.location.line()
        )
    }
}

/// `format!`-style constructor for [`DiagnosticMessage`].
#[macro_export]
macro_rules! diag {
    ($msg:literal $(,)?) => {
        $crate::error::diagnostics::DiagnosticMessage::new($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::diagnostics::DiagnosticMessage::new(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_call_site() {
        let diag = DiagnosticMessage::new("boom");
        assert_eq!(diag.message(), "boom");
        assert!(diag.location().file().ends_with("diagnostics.rs"));
        assert!(diag.to_string().starts_with("boom (at "));
    }

    #[test]
    fn scoped_keeps_location() {
        let diag = crate::diag!("missing {}", "name");
        let scoped = diag.scoped("stages.create");
        assert_eq!(scoped.message(), "stages.create: missing name");
        assert_eq!(scoped.location().line(), diag.location().line());
    }
}
