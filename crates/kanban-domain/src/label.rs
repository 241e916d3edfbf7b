use serde::{Deserialize, Serialize};

pub type LabelId = String;

/// A colored tag shared by reference across cards; identity is the id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    pub color: String,
}

impl Label {
    pub fn new(id: impl Into<LabelId>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }
}
