//! uploaded study material.
//!
//! a resource belongs to a subject and moves through a small review
//! lifecycle: uploads by staff start approved, everything else starts pending
//! until faculty approve or reject it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, SubjectId, UserId};

/// unique identifier for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(pub u64);

impl ResourceId {
    /// the id as the signed integer stored in the database.
    pub fn as_i64(self) -> i64 {
        self.0 as i64
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// what kind of material a resource is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// student or general notes.
    #[default]
    Note,
    /// previous year question paper.
    Pyq,
    /// notes published by faculty.
    Faculty,
}

impl ResourceType {
    /// every resource type, in display order.
    pub const ALL: [ResourceType; 3] = [
        ResourceType::Note,
        ResourceType::Pyq,
        ResourceType::Faculty,
    ];

    /// the string stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Note => "note",
            ResourceType::Pyq => "pyq",
            ResourceType::Faculty => "faculty",
        }
    }

    /// human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ResourceType::Note => "Notes",
            ResourceType::Pyq => "Previous Year Question",
            ResourceType::Faculty => "Faculty Notes",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "note" => Ok(ResourceType::Note),
            "pyq" => Ok(ResourceType::Pyq),
            "faculty" => Ok(ResourceType::Faculty),
            other => Err(Error::UnknownResourceType(other.to_string())),
        }
    }
}

/// review status of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    /// waiting for faculty review.
    #[default]
    Pending,
    /// visible to everyone browsing the subject.
    Approved,
    /// hidden; only the owner and staff see it.
    Rejected,
}

impl ResourceStatus {
    /// the string stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceStatus::Pending => "pending",
            ResourceStatus::Approved => "approved",
            ResourceStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ResourceStatus::Pending),
            "approved" => Ok(ResourceStatus::Approved),
            "rejected" => Ok(ResourceStatus::Rejected),
            other => Err(Error::UnknownResourceStatus(other.to_string())),
        }
    }
}

/// an uploaded file attached to a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// unique identifier.
    pub id: ResourceId,
    /// subject the resource belongs to.
    pub subject_id: SubjectId,
    /// title shown in listings.
    pub title: String,
    /// stored file path, relative to the media root.
    pub file: String,
    /// kind of material.
    pub resource_type: ResourceType,
    /// optional description.
    pub description: Option<String>,
    /// review status.
    pub status: ResourceStatus,
    /// uploader. `None` once the uploading account is deleted.
    pub uploaded_by: Option<UserId>,
    /// when the resource was uploaded.
    pub uploaded_at: DateTime<Utc>,
}

impl Resource {
    /// whether `user` uploaded this resource.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.uploaded_by == Some(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type_parse() {
        for ty in ResourceType::ALL {
            assert_eq!(ty.as_str().parse::<ResourceType>().unwrap(), ty);
        }
        assert!("video".parse::<ResourceType>().is_err());
        assert_eq!(ResourceType::Pyq.label(), "Previous Year Question");
    }

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(ResourceStatus::default(), ResourceStatus::Pending);
        assert_eq!("rejected".parse::<ResourceStatus>().unwrap(), ResourceStatus::Rejected);
        assert!("archived".parse::<ResourceStatus>().is_err());
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&ResourceStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
    }
}
