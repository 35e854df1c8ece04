use std::sync::Arc;

use point_light_core::{errors::LoadError, skeleton::Skeleton};
use serde::{Deserialize, Serialize};

use crate::{
    action::Action,
    composer::{ActionComposer, PoseFunction},
    errors::ActionError,
    tags::SubjectTags,
};

/// An action name plus the subject performing it, e.g.
///
/// ```ron
/// (action: "walking", tags: (weight: Some(Heavy), emotion: Some(Sad)))
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionRequest {
    pub action: Action,
    pub tags: SubjectTags,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionRequestSerial {
    pub action: String,
    #[serde(default)]
    pub tags: SubjectTags,
}

impl ActionRequest {
    pub fn new(action: Action, tags: SubjectTags) -> Self {
        Self { action, tags }
    }

    pub fn from_ron_str(input: &str) -> Result<Self, LoadError> {
        let serial: ActionRequestSerial = ron::de::from_str(input)?;
        Ok(Self {
            action: serial.action.parse()?,
            tags: serial.tags,
        })
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string(&ActionRequestSerial::from(self))
    }

    pub fn build(
        &self,
        composer: &ActionComposer,
        skeleton: Arc<Skeleton>,
    ) -> Result<PoseFunction, ActionError> {
        composer.build_for_action(skeleton, self.action, self.tags)
    }
}

impl From<&ActionRequest> for ActionRequestSerial {
    fn from(value: &ActionRequest) -> Self {
        Self {
            action: value.action.name().to_string(),
            tags: value.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{Emotion, Weight};

    #[test]
    fn parses_request() {
        let request = ActionRequest::from_ron_str(
            r#"(action: "walking", tags: (weight: Some(Heavy), emotion: Some(Sad)))"#,
        )
        .unwrap();
        assert_eq!(
            request,
            ActionRequest::new(
                Action::Walking,
                SubjectTags::new(None, Some(Weight::Heavy), Some(Emotion::Sad))
            )
        );

        let bare = ActionRequest::from_ron_str(r#"(action: "Sitting Down")"#).unwrap();
        assert_eq!(bare.action, Action::SittingDown);
        assert_eq!(bare.tags, SubjectTags::default());
    }

    #[test]
    fn reports_bad_requests() {
        assert!(matches!(
            ActionRequest::from_ron_str(r#"(action: "juggling")"#),
            Err(LoadError::UnsupportedAction(_))
        ));
        assert!(matches!(
            ActionRequest::from_ron_str(r#"(action: walking)"#),
            Err(LoadError::RonSpannedError(_))
        ));
    }

    #[test]
    fn survives_serialization() {
        let request = ActionRequest::new(
            Action::JumpingForward,
            SubjectTags::new(None, None, Some(Emotion::Happy)),
        );
        let ron = request.to_ron().unwrap();
        assert_eq!(ActionRequest::from_ron_str(&ron).unwrap(), request);
    }

    #[test]
    fn builds_a_pose_function() {
        let request = ActionRequest::new(Action::Bowing, SubjectTags::default());
        let pose_fn = request
            .build(
                &ActionComposer::default(),
                Arc::new(Skeleton::point_light_figure()),
            )
            .unwrap();
        assert_eq!(pose_fn.action(), Action::Bowing);
    }
}
