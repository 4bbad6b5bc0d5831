use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::AppError;

/// Longest accepted value for the short metadata fields.
pub const MAX_METADATA_CHARS: usize = 200;

/// Inbound request for one generated message.
///
/// `prospect_background` is the only required field and the only one that
/// drives output quality. The metadata fields accept `null` or may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProspectRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub prospect_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub designation: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub industry: String,
    pub prospect_background: String,
}

impl ProspectRequest {
    /// Checks and normalizes the request once, at the pipeline boundary.
    ///
    /// Metadata is trimmed and length-checked. The background is passed through
    /// untouched: emptiness is a valid degenerate case and length is handled by
    /// the summarizer's truncation.
    pub fn validated(self) -> Result<Self, AppError> {
        let normalized = Self {
            prospect_name: self.prospect_name.trim().to_string(),
            designation: self.designation.trim().to_string(),
            company: self.company.trim().to_string(),
            industry: self.industry.trim().to_string(),
            prospect_background: self.prospect_background,
        };

        for (field, value) in [
            ("prospect_name", &normalized.prospect_name),
            ("designation", &normalized.designation),
            ("company", &normalized.company),
            ("industry", &normalized.industry),
        ] {
            if value.chars().count() > MAX_METADATA_CHARS {
                return Err(AppError::Validation(format!(
                    "{field} must be at most {MAX_METADATA_CHARS} characters"
                )));
            }
        }

        Ok(normalized)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
