//! JSON bodies exchanged with the service and their domain conversions.

use crate::service::{ChatAnswer, UploadReceipt};
use docgraph_domain::{ClusterAssignment, Triple};
use serde::{Deserialize, Deserializer, Serialize};

/// Response of `POST /upload-csv` and `POST /upload-pdf`
#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(deserialize_with = "opaque_id")]
    pub upload_id: String,
}

impl From<UploadResponse> for UploadReceipt {
    fn from(r: UploadResponse) -> Self {
        UploadReceipt {
            message: r.message.unwrap_or_else(|| "Upload complete".to_string()),
            upload_id: r.upload_id,
        }
    }
}

/// Body of `POST /chat` and `POST /chat-pdf`
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub question: &'a str,
    pub upload_id: &'a str,
}

/// Response of the chat endpoints
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub answer: String,
    #[serde(default)]
    pub query_time: Option<f64>,
    #[serde(default)]
    pub token_usage: Option<serde_json::Value>,
}

impl From<ChatResponse> for ChatAnswer {
    fn from(r: ChatResponse) -> Self {
        ChatAnswer {
            answer: r.answer,
            query_time: r.query_time,
            token_usage: r.token_usage.as_ref().and_then(total_tokens),
        }
    }
}

/// Element of `GET /graph/{upload_id}`
#[derive(Debug, Deserialize)]
pub(crate) struct TripleRecord {
    pub subject: String,
    pub relation: String,
    pub object: String,
    #[serde(default, alias = "excerpt")]
    pub source: Option<String>,
}

impl From<TripleRecord> for Triple {
    fn from(r: TripleRecord) -> Self {
        Triple {
            subject: r.subject,
            relation: r.relation,
            object: r.object,
            source: r.source,
        }
    }
}

/// Element of `GET /graph/nodes/{upload_id}`
#[derive(Debug, Deserialize)]
pub(crate) struct NodeClusterRecord {
    #[serde(deserialize_with = "opaque_id")]
    pub node_id: String,
    pub cluster_id: u32,
}

impl From<NodeClusterRecord> for ClusterAssignment {
    fn from(r: NodeClusterRecord) -> Self {
        ClusterAssignment {
            node_id: r.node_id,
            cluster_id: r.cluster_id,
        }
    }
}

/// Token usage is either a bare count or an object with `total_tokens`
fn total_tokens(value: &serde_json::Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.get("total_tokens").and_then(serde_json::Value::as_u64))
}

/// Identifiers are opaque text, but the service may send them as numbers
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
        Unsigned(u64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Integer(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_numeric_id() {
        let json = r#"{"message": "PDF uploaded successfully", "upload_id": 42}"#;
        let receipt: UploadReceipt = serde_json::from_str::<UploadResponse>(json).unwrap().into();
        assert_eq!(receipt.upload_id, "42");
        assert_eq!(receipt.message, "PDF uploaded successfully");
    }

    #[test]
    fn test_upload_response_large_numeric_id_is_exact() {
        let json = r#"{"upload_id": 18446744073709551615}"#;
        let receipt: UploadReceipt = serde_json::from_str::<UploadResponse>(json).unwrap().into();
        assert_eq!(receipt.upload_id, "18446744073709551615");

        let json = r#"{"upload_id": -3}"#;
        let receipt: UploadReceipt = serde_json::from_str::<UploadResponse>(json).unwrap().into();
        assert_eq!(receipt.upload_id, "-3");
    }

    #[test]
    fn test_upload_response_without_message() {
        let json = r#"{"upload_id": "abc-123"}"#;
        let receipt: UploadReceipt = serde_json::from_str::<UploadResponse>(json).unwrap().into();
        assert_eq!(receipt.upload_id, "abc-123");
        assert_eq!(receipt.message, "Upload complete");
    }

    #[test]
    fn test_chat_response_token_usage_shapes() {
        let json = r#"{"answer": "yes", "query_time": 0.25, "token_usage": 120}"#;
        let answer: ChatAnswer = serde_json::from_str::<ChatResponse>(json).unwrap().into();
        assert_eq!(answer.token_usage, Some(120));
        assert_eq!(answer.query_time, Some(0.25));

        let json = r#"{"answer": "yes", "token_usage": {"prompt_tokens": 90, "total_tokens": 130}}"#;
        let answer: ChatAnswer = serde_json::from_str::<ChatResponse>(json).unwrap().into();
        assert_eq!(answer.token_usage, Some(130));
        assert_eq!(answer.query_time, None);

        let json = r#"{"answer": "no"}"#;
        let answer: ChatAnswer = serde_json::from_str::<ChatResponse>(json).unwrap().into();
        assert_eq!(answer.token_usage, None);
    }

    #[test]
    fn test_triple_record_excerpt_alias() {
        let json = r#"{"subject": "A", "relation": "r", "object": "B", "excerpt": "A r B."}"#;
        let triple: Triple = serde_json::from_str::<TripleRecord>(json).unwrap().into();
        assert_eq!(triple.source.as_deref(), Some("A r B."));
    }

    #[test]
    fn test_missing_field_is_decode_error() {
        let json = r#"{"subject": "A", "object": "B"}"#;
        assert!(serde_json::from_str::<TripleRecord>(json).is_err());
    }

    #[test]
    fn test_chat_request_shape() {
        let body = serde_json::to_value(ChatRequest {
            question: "who?",
            upload_id: "7",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"question": "who?", "upload_id": "7"}));
    }
}
