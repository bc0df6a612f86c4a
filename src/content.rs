use std::hash::{Hash, Hasher};

use crate::text::Text;
use crate::types::{FrameStyle, IconId};

/// Immutable display content of a toast.
///
/// Title and description are stored in their serialized legacy form.
/// Equality and hashing cover title and description only: the icon and
/// frame never contribute to a toast's identity, so two toasts with the
/// same text but different icons share one host definition and the
/// second icon is never displayed. This mirrors the behavior callers
/// already rely on; do not "fix" it without migrating registered
/// definitions.
#[derive(Clone, Debug)]
pub struct ToastContent {
    title: String,
    description: String,
    icon: IconId,
    frame: FrameStyle,
}

impl ToastContent {
    #[must_use]
    pub fn builder() -> ToastBuilder {
        ToastBuilder::default()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn icon(&self) -> &IconId {
        &self.icon
    }

    #[must_use]
    pub const fn frame(&self) -> FrameStyle {
        self.frame
    }
}

impl PartialEq for ToastContent {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.description == other.description
    }
}

impl Eq for ToastContent {}

impl Hash for ToastContent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
        self.description.hash(state);
    }
}

/// Assembles a [`ToastContent`], serializing rich text to its legacy
/// string form at build time.
///
/// Defaults: empty title, empty description, `stone` icon, task frame.
#[derive(Debug, Default)]
pub struct ToastBuilder {
    title: Text,
    description: Text,
    icon: IconId,
    frame: FrameStyle,
}

impl ToastBuilder {
    #[must_use]
    pub fn title(mut self, title: impl Into<Text>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<Text>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: IconId) -> Self {
        self.icon = icon;
        self
    }

    #[must_use]
    pub const fn frame(mut self, frame: FrameStyle) -> Self {
        self.frame = frame;
        self
    }

    #[must_use]
    pub fn build(self) -> ToastContent {
        ToastContent {
            title: self.title.to_legacy(),
            description: self.description.to_legacy(),
            icon: self.icon,
            frame: self.frame,
        }
    }
}
