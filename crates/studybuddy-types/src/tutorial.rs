//! externally linked tutorials suggested for a subject.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, SubjectId, UserId};

/// unique identifier for a tutorial suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TutorialId(pub u64);

impl TutorialId {
    /// the id as the signed integer stored in the database.
    pub fn as_i64(self) -> i64 {
        self.0 as i64
    }
}

impl fmt::Display for TutorialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// what the link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TutorialKind {
    #[default]
    Video,
    Playlist,
    Article,
    Pdf,
    Website,
}

impl TutorialKind {
    /// the string stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            TutorialKind::Video => "video",
            TutorialKind::Playlist => "playlist",
            TutorialKind::Article => "article",
            TutorialKind::Pdf => "pdf",
            TutorialKind::Website => "website",
        }
    }
}

impl fmt::Display for TutorialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TutorialKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(TutorialKind::Video),
            "playlist" => Ok(TutorialKind::Playlist),
            "article" => Ok(TutorialKind::Article),
            "pdf" => Ok(TutorialKind::Pdf),
            "website" => Ok(TutorialKind::Website),
            other => Err(Error::UnknownTutorialKind(other.to_string())),
        }
    }
}

/// a link to outside learning material attached to a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialSuggestion {
    pub id: TutorialId,
    pub subject_id: SubjectId,
    pub title: String,
    pub description: Option<String>,
    /// http or https url.
    pub link: String,
    pub kind: TutorialKind,
    /// `None` once the suggesting account is deleted.
    pub added_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl TutorialSuggestion {
    /// whether `user` added this tutorial.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.added_by == Some(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_defaults_to_video() {
        assert_eq!(TutorialKind::default(), TutorialKind::Video);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("pdf".parse::<TutorialKind>().unwrap(), TutorialKind::Pdf);
        assert_eq!("website".parse::<TutorialKind>().unwrap(), TutorialKind::Website);
        assert!(matches!(
            "podcast".parse::<TutorialKind>(),
            Err(Error::UnknownTutorialKind(k)) if k == "podcast"
        ));
    }
}
