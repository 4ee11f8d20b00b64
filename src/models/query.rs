use serde::{Deserialize, Serialize};

/// Query string for `GET /bills`. `limit` stays a string so a malformed
/// value is read leniently instead of rejecting the request.
#[derive(Debug, Default, Clone, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BillQuery {
    /// Only return bills in this category
    pub category: Option<String>,
    /// Maximum number of bills to return
    pub limit: Option<String>,
}

impl BillQuery {
    /// Reads the leading integer of `limit` (`"2abc"` and `"2.5"` give 2).
    /// Its magnitude caps the result; zero or no leading digits mean every match.
    pub fn parsed_limit(&self) -> Option<i64> {
        let raw = self.limit.as_deref()?.trim_start();
        let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
        let digits_end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());

        let digits = &unsigned[..digits_end];
        if digits.is_empty() {
            return None;
        }

        // Only overflow can fail here
        let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
        (magnitude > 0).then_some(magnitude)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
