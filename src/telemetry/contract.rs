//! Opaque name tokens for sessions, events, methods and reasons.
//!
//! The engine defines what each name means; here they are only strings that
//! render through `Display`.

use std::borrow::Cow;
use std::fmt;

macro_rules! name_token {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(Cow<'static, str>);

        impl $name {
            pub const fn from_static(name: &'static str) -> Self {
                Self(Cow::Borrowed(name))
            }

            pub fn new(name: impl Into<String>) -> Self {
                Self(Cow::Owned(name.into()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&'static str> for $name {
            fn from(name: &'static str) -> Self {
                Self::from_static(name)
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self::new(name)
            }
        }
    };
}

name_token!(
    /// A UI session, e.g. `"home"` or `"reader"`.
    Session
);
name_token!(
    /// A UI event, e.g. `"action.1"`.
    Event
);
name_token!(
    /// How a UI event was triggered.
    Method
);
name_token!(
    /// Why a UI session ended.
    Reason
);

impl Method {
    /// No particular method. Renders as the empty string.
    pub const NONE: Method = Method::from_static("");
}

impl Reason {
    /// No particular reason. Renders as the empty string.
    pub const NONE: Reason = Reason::from_static("");
}

/// `session`, or `session:suffix` when a suffix is given.
pub fn session_name(session: &Session, suffix: Option<&str>) -> String {
    match suffix {
        Some(suffix) => format!("{}:{}", session, suffix),
        None => session.to_string(),
    }
}
