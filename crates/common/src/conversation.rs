use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message of a conversation. Supplied by the caller and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

/// Conversation files come either as a bare array of turns or wrapped in an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConversationDocument {
    Turns(Vec<Turn>),
    Wrapped { turns: Vec<Turn> },
}

impl ConversationDocument {
    pub fn into_turns(self) -> Vec<Turn> {
        match self {
            ConversationDocument::Turns(turns) => turns,
            ConversationDocument::Wrapped { turns } => turns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_role_serializes_lowercase() {
        let turn = Turn::assistant("好的");
        let json = serde_json::to_string(&turn).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"好的"}"#);
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result: Result<Turn, _> = serde_json::from_str(r#"{"role":"system","content":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_document_accepts_both_shapes() {
        let bare = r#"[{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}]"#;
        let wrapped = r#"{"turns":[{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}]}"#;

        let bare: ConversationDocument = serde_json::from_str(bare).unwrap();
        let wrapped: ConversationDocument = serde_json::from_str(wrapped).unwrap();

        assert_eq!(bare.into_turns(), wrapped.into_turns());
    }
}
