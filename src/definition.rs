//! The advancement definition payload a toast registers with the host.
//!
//! The grant/revoke trick lives entirely here and in the
//! [`crate::host::AdvancementHost`] seam: the definition carries exactly
//! one criterion with an impossible trigger, so the only way its
//! progress ever moves is this crate's explicit grant and revoke calls.

use serde::Serialize;

use crate::content::ToastContent;
use crate::identity::ToastId;
use crate::types::{FrameStyle, IconId};

/// Name of the single criterion every toast definition carries.
pub const CRITERION_NAME: &str = "display_toast";

/// Trigger classification for a criterion.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    /// Never satisfied by organic host activity.
    Impossible,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Criterion {
    pub name: String,
    pub trigger: TriggerKind,
}

/// Display block of a definition: what the popup shows, plus the flags
/// that keep the synthetic definition out of chat and listings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DisplayBlock {
    pub title: String,
    pub description: String,
    pub icon: IconId,
    pub frame: FrameStyle,
    pub announce: bool,
    pub toast: bool,
    pub hidden: bool,
}

/// Complete definition document handed to
/// [`crate::host::AdvancementHost::register`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DefinitionPayload {
    pub key: String,
    pub display: DisplayBlock,
    pub criteria: Vec<Criterion>,
}

impl DefinitionPayload {
    #[must_use]
    pub fn for_toast(id: &ToastId, content: &ToastContent) -> Self {
        Self {
            key: id.as_str().to_string(),
            display: DisplayBlock {
                title: content.title().to_string(),
                description: content.description().to_string(),
                icon: content.icon().clone(),
                frame: content.frame(),
                announce: false,
                toast: true,
                hidden: true,
            },
            criteria: vec![Criterion {
                name: CRITERION_NAME.to_string(),
                trigger: TriggerKind::Impossible,
            }],
        }
    }
}
