use serde::Deserialize;
use store::{GoalUpdate, NewGoal};

use crate::error::ApiError;

/// Body of `addGoal`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddGoalRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<AddGoalRequest> for NewGoal {
    type Error = ApiError;

    fn try_from(req: AddGoalRequest) -> Result<Self, Self::Error> {
        Ok(NewGoal {
            title: required_title(req.title)?,
            description: req.description,
        })
    }
}

/// Body of `updateGoal`. Omitted optional fields keep their stored value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGoalRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl TryFrom<UpdateGoalRequest> for GoalUpdate {
    type Error = ApiError;

    fn try_from(req: UpdateGoalRequest) -> Result<Self, Self::Error> {
        Ok(GoalUpdate {
            title: required_title(req.title)?,
            description: req.description,
            completed: req.completed,
        })
    }
}

fn required_title(title: String) -> Result<String, ApiError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ApiError::ValidationFailed("Title is required".to_string()));
    }
    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_title_is_rejected() {
        let req = AddGoalRequest {
            title: "  ".to_string(),
            description: None,
        };
        assert!(matches!(
            NewGoal::try_from(req),
            Err(ApiError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_update_request_conversion() {
        let req: UpdateGoalRequest =
            serde_json::from_str(r#"{"title":" Swim ","completed":true}"#).unwrap();
        let update = GoalUpdate::try_from(req).unwrap();
        assert_eq!(update.title, "Swim");
        assert_eq!(update.completed, Some(true));
        assert_eq!(update.description, None);
    }
}
