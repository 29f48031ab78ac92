use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform wire wrapper around every endpoint's payload.
///
/// `data` is an open, per-endpoint structure; the client decodes it
/// defensively instead of binding it to a fixed shape here. Failure
/// responses may omit both `message` and `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

pub mod group {
    use super::*;

    /// A member as sent to the server. Ids are generated client-side
    /// before the group exists and echoed back by the server.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MemberPayload {
        pub id: String,
        pub name: String,
        pub email: String,
    }

    /// Request body for `POST /groups/create`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CreateGroupRequest {
        pub name: String,
        pub members: Vec<MemberPayload>,
    }
}

pub mod expense {
    use super::*;

    /// Request body for `POST /expenses/manual`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CreateExpenseRequest {
        pub description: String,
        pub amount: f64,
        pub paid_by_user_id: String,
        pub split_among_user_ids: Vec<String>,
        pub group_id: String,
        /// Omitted entirely when `None`; the server then categorizes.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
    }
}
