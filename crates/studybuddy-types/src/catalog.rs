//! departments and the subjects they teach.

use std::fmt;

use serde::{Deserialize, Serialize};

/// highest semester a subject can be scheduled in.
pub const MAX_SEMESTER: i32 = 12;

/// unique identifier for a department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DepartmentId(pub u64);

/// unique identifier for a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectId(pub u64);

impl DepartmentId {
    /// the id as the signed integer stored in the database.
    pub fn as_i64(self) -> i64 {
        self.0 as i64
    }
}

impl SubjectId {
    /// the id as the signed integer stored in the database.
    pub fn as_i64(self) -> i64 {
        self.0 as i64
    }
}

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// an academic department. names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// unique identifier.
    pub id: DepartmentId,
    /// department name.
    pub name: String,
    /// free-form description.
    pub description: Option<String>,
    /// path of the department's cover image under the media root.
    pub image: Option<String>,
}

impl Department {
    /// create a department with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DepartmentId(0),
            name: name.into(),
            description: None,
            image: None,
        }
    }
}

/// a subject taught by a department in a given semester.
///
/// (department, name, semester) is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// unique identifier.
    pub id: SubjectId,
    /// owning department.
    pub department_id: DepartmentId,
    /// subject name.
    pub name: String,
    /// semester number, 1-based.
    pub semester: i32,
}

impl Subject {
    /// create a subject for a department.
    pub fn new(department_id: DepartmentId, name: impl Into<String>, semester: i32) -> Self {
        Self {
            id: SubjectId(0),
            department_id,
            name: name.into(),
            semester,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Sem {})", self.name, self.semester)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_display() {
        let subject = Subject::new(DepartmentId(1), "Data Structures", 3);
        assert_eq!(subject.to_string(), "Data Structures (Sem 3)");
    }
}
