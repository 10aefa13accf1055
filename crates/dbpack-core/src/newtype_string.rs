//! Macro for defining strongly-typed string newtypes.

/// Define a non-empty string newtype.
///
/// Generates the struct with `Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord`,
/// `new()` (panics on empty), `try_new()`, `as_str()`, `into_inner()`, plus
/// `Display`, `AsRef<str>`, `Deref<Target=str>`, `Borrow<str>` and string
/// comparisons.
macro_rules! define_newtype_string {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $Name(String);

        impl $Name {
            /// Create a new instance, panicking if the name is empty.
            ///
            /// Prefer [`try_new`](Self::try_new) when handling untrusted input.
            pub fn new(name: impl Into<String>) -> Self {
                let s = name.into();
                assert!(!s.is_empty(), concat!(stringify!($Name), " must not be empty"));
                Self(s)
            }

            /// Try to create a new instance, returning `None` if the name is empty.
            pub fn try_new(name: impl Into<String>) -> Option<Self> {
                let s = name.into();
                if s.is_empty() { None } else { Some(Self(s)) }
            }

            /// Return the underlying name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the inner `String`.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $Name {
            fn as_ref(&self) -> &str { &self.0 }
        }

        impl std::ops::Deref for $Name {
            type Target = str;
            fn deref(&self) -> &str { &self.0 }
        }

        impl std::borrow::Borrow<str> for $Name {
            fn borrow(&self) -> &str { &self.0 }
        }

        impl PartialEq<str> for $Name {
            fn eq(&self, other: &str) -> bool { self.0 == other }
        }

        impl PartialEq<&str> for $Name {
            fn eq(&self, other: &&str) -> bool { self.0 == *other }
        }
    };
}

pub(crate) use define_newtype_string;
