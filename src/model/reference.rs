//! Referenced entities joined into player listings

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Document in `clubteams`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
}

/// Document in `countries`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
}

/// Document in `positions`. The label field is called `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub position: String,
}

/// A document that can be looked up by id and shown by label
pub trait Reference: Clone {
    fn id(&self) -> Uuid;
    fn label(&self) -> &str;
}

impl Club {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl Country {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl Position {
    pub fn new(position: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            position: position.into(),
        }
    }
}

impl Reference for Club {
    fn id(&self) -> Uuid {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Reference for Country {
    fn id(&self) -> Uuid {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Reference for Position {
    fn id(&self) -> Uuid {
        self.id
    }

    fn label(&self) -> &str {
        &self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_position_label_field() {
        let id = Uuid::new_v4();
        let position: Position =
            serde_json::from_value(json!({"_id": id, "position": "Goalkeeper"})).unwrap();

        assert_eq!(position.id(), id);
        assert_eq!(position.label(), "Goalkeeper");
    }

    #[test]
    fn test_club_label() {
        let club = Club::new("Alpha FC");
        assert_eq!(club.label(), "Alpha FC");
    }
}
