use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;

/// Launch flag selecting development mode.
pub const DEV_FLAG: &str = "--dev";

///
/// Mode
///
/// Execution mode, resolved once at startup and passed to every
/// reconcile and seed call.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Destructive schema resets and fixture seeding.
    #[display("development")]
    Development,

    #[default]
    #[display("production")]
    Production,
}

impl Mode {
    /// Development iff the literal `--dev` appears anywhere in `args`.
    /// Arguments that are not valid UTF-8 never match.
    pub fn resolve<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let flag = OsStr::new(DEV_FLAG);

        if args.into_iter().any(|arg| arg.as_ref() == flag) {
            Self::Development
        } else {
            Self::Production
        }
    }

    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Upper-case label used in the banner and startup log line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Development => "DEVELOPMENT",
            Self::Production => "PRODUCTION",
        }
    }
}

/// Free-function form of [`Mode::resolve`].
pub fn resolve_mode<I, S>(args: I) -> Mode
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Mode::resolve(args)
}
