//! Strongly-typed target name.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// A non-empty target name (a directory under the data path, and the
    /// stem of the artifact it builds).
    pub struct TargetName;
}
