use std::fmt::{self, Display};

use uuid::Uuid;

use crate::content::ToastContent;

/// Namespace prefix separating synthetic toast definitions from the
/// host's own keys.
pub const NAMESPACE: &str = "andjam_toast";

// Namespace UUID for the name-based derivation. Fixed forever: changing
// it would orphan definitions registered by earlier builds.
const ID_NAMESPACE: Uuid = Uuid::from_u128(0x26a1_7a5d_9c4b_4e8f_8d0a_3f6b_2c91_e754);

/// Stable identifier of a toast definition: `andjam_toast/<uuid>`.
///
/// Derived, never stored standalone: the same content always derives the
/// same identifier, so it doubles as the host-side definition key.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ToastId(String);

impl ToastId {
    /// Derive the identifier for `content`.
    ///
    /// A version-3 name-based UUID over the UTF-8 bytes of the title
    /// concatenated with the description, with no separator. The lack
    /// of a separator means `("ab", "c")` and `("a", "bc")` derive the
    /// same id; callers distinguish toasts by their combined text.
    /// Icon and frame are ignored.
    #[must_use]
    pub fn derive(content: &ToastContent) -> Self {
        let mut name = String::with_capacity(content.title().len() + content.description().len());
        name.push_str(content.title());
        name.push_str(content.description());
        let uuid = Uuid::new_v3(&ID_NAMESPACE, name.as_bytes());
        Self(format!("{NAMESPACE}/{uuid}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
