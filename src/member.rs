use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::CardError;

/// Status code of the "active member" tier; marks the first checkbox.
pub const STATUS_ACTIVE_MEMBER: u8 = 4;
/// Status code of the "benefactor member" tier; marks the second checkbox.
pub const STATUS_BENEFACTOR_MEMBER: u8 = 5;

/// Politeness title attached to a member profile.
#[derive(Debug, Clone, Deserialize)]
pub struct Title {
    /// Long display form ("Mister", "Madam", ...).
    pub long: String,
}

/// One member profile as the host application exports it.
///
/// Every field may be missing; a missing field renders as a blank on the
/// card. The profile is read-only input, nothing here is written back.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Member {
    pub title: Option<Title>,
    /// Family name.
    pub name: Option<String>,
    /// Given name (the host exports it as "surname").
    pub surname: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub address_continuation: Option<String>,
    pub zipcode: Option<String>,
    pub town: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    /// Login identifier in the host application.
    pub login: Option<String>,
    /// Membership status code from the host's status table.
    pub status: u8,
}

impl Member {
    /// Loads a profile from a JSON export.
    pub fn from_path(path: &Path) -> Result<Self, CardError> {
        let content = fs::read_to_string(path).map_err(|e| CardError::MemberFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| CardError::MemberFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
