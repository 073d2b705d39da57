//! Request and response bodies of the snippet service

use serde::{Deserialize, Serialize};

use crate::models::Snippet;

/// Body of a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for later requests
    pub token: String,
}

/// A snippet as it travels on the wire.
///
/// The service names the documents after their languages; the playground's
/// own names are accepted as aliases when decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetPayload {
    /// Snippet title
    pub title: String,
    /// Markup document
    #[serde(rename = "html", alias = "markup")]
    pub markup: String,
    /// Style document
    #[serde(rename = "css", alias = "style")]
    pub style: String,
    /// Script document
    #[serde(rename = "js", alias = "script")]
    pub script: String,
    /// Share id, present on loaded snippets
    #[serde(rename = "shareId", alias = "share_id", skip_serializing_if = "Option::is_none")]
    pub share_id: Option<String>,
}

impl SnippetPayload {
    /// Request body for a save; an empty title becomes `Untitled`
    #[must_use]
    pub fn for_save(snippet: &Snippet) -> Self {
        Self {
            title: snippet.display_title().to_string(),
            markup: snippet.markup.clone(),
            style: snippet.style.clone(),
            script: snippet.script.clone(),
            share_id: None,
        }
    }

    /// Converts a loaded payload into a snippet carrying `share_id`
    #[must_use]
    pub fn into_snippet(self, share_id: &str) -> Snippet {
        Snippet {
            title: self.title,
            markup: self.markup,
            style: self.style,
            script: self.script,
            share_id: Some(self.share_id.unwrap_or_else(|| share_id.to_string())),
        }
    }
}

/// Body of a successful save
#[derive(Debug, Clone, Deserialize)]
pub struct SaveSnippetResponse {
    /// Identifier of the stored snippet
    #[serde(rename = "shareId", alias = "share_id")]
    pub share_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Documents;

    #[test]
    fn save_body_uses_service_field_names() {
        let snippet = Snippet::from_documents("", &Documents::from_contents("<b>", "b{}", "f()"));
        let json = serde_json::to_value(SnippetPayload::for_save(&snippet)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Untitled",
                "html": "<b>",
                "css": "b{}",
                "js": "f()"
            })
        );
    }

    #[test]
    fn load_body_accepts_either_naming() {
        let service: SnippetPayload =
            serde_json::from_str(r#"{"title":"T","html":"<p>","css":"","js":"x"}"#).unwrap();
        let aliased: SnippetPayload =
            serde_json::from_str(r#"{"title":"T","markup":"<p>","style":"","script":"x"}"#)
                .unwrap();
        assert_eq!(service, aliased);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let payload: SnippetPayload = serde_json::from_str(r#"{"html":"<i>"}"#).unwrap();
        let snippet = payload.into_snippet("abc");
        assert_eq!(snippet.title, "");
        assert_eq!(snippet.markup, "<i>");
        assert_eq!(snippet.share_id.as_deref(), Some("abc"));
    }

    #[test]
    fn save_response_reads_share_id() {
        let response: SaveSnippetResponse = serde_json::from_str(r#"{"shareId":"k3y"}"#).unwrap();
        assert_eq!(response.share_id, "k3y");
    }
}
