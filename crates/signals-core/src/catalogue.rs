//! # Course Catalogue
//!
//! The read-only curriculum the engine scores against.
//!
//! Every course has a unique numeric id and a unique name. The name is the
//! join key used by grade input. Courses are unlocked by phase: a course
//! introduced in phase `p` is eligible at every phase `c >= p`.
//!
//! Lookups use `BTreeMap` indices so iteration order never depends on hashing.
//! The course list itself keeps catalogue order, which is the order used for
//! contributor lists and tie-breaking.

use crate::error::{CatalogueError, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier of a course record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CourseId(pub u32);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A curriculum stage, 1 through 3.
///
/// Construction is checked, so holding a `Phase` means the value is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Phase(u8);

impl Phase {
    pub const FIRST: Phase = Phase(1);
    pub const SECOND: Phase = Phase(2);
    pub const THIRD: Phase = Phase(3);

    /// Lowest valid phase number.
    pub const MIN: u8 = 1;
    /// Highest valid phase number.
    pub const MAX: u8 = 3;

    /// Create a phase, returning `None` outside `1..=3`.
    #[must_use]
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// The phase number.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// All phases in ascending order.
    pub fn all() -> impl Iterator<Item = Phase> {
        (Self::MIN..=Self::MAX).map(Phase)
    }
}

impl TryFrom<i64> for Phase {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Phase::new)
            .ok_or(ValidationError::PhaseOutOfRange(value))
    }
}

impl TryFrom<u8> for Phase {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Phase::new(value).ok_or(ValidationError::PhaseOutOfRange(i64::from(value)))
    }
}

impl From<Phase> for u8 {
    fn from(phase: Phase) -> Self {
        phase.0
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// CATEGORY
// =============================================================================

/// Curriculum subject grouping used to aggregate grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Data")]
    Data,
    #[serde(rename = "Programming")]
    Programming,
    #[serde(rename = "Security")]
    Security,
    #[serde(rename = "Business")]
    Business,
    #[serde(rename = "Communication")]
    Communication,
    #[serde(rename = "Business Intelligence")]
    BusinessIntelligence,
    #[serde(rename = "Hands-On Experience")]
    HandsOn,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 7] = [
        Category::Data,
        Category::Programming,
        Category::Security,
        Category::Business,
        Category::Communication,
        Category::BusinessIntelligence,
        Category::HandsOn,
    ];

    /// Display name, identical to the wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Data => "Data",
            Category::Programming => "Programming",
            Category::Security => "Security",
            Category::Business => "Business",
            Category::Communication => "Communication",
            Category::BusinessIntelligence => "Business Intelligence",
            Category::HandsOn => "Hands-On Experience",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a string names no category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

// =============================================================================
// COURSE RECORD
// =============================================================================

/// A single course in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: CourseId,
    #[serde(rename = "course_name")]
    pub name: String,
    pub category: Category,
    pub phase: Phase,
    pub credits: u32,
}

impl CourseRecord {
    /// Create a new course record.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        category: Category,
        phase: Phase,
        credits: u32,
    ) -> Self {
        Self {
            id: CourseId(id),
            name: name.into(),
            category,
            phase,
            credits,
        }
    }

    /// Whether this course is unlocked at `current`.
    #[must_use]
    pub fn is_eligible_at(&self, current: Phase) -> bool {
        self.phase <= current
    }
}

// =============================================================================
// CATALOGUE PROVIDER TRAIT
// =============================================================================

/// Read-only access to a course catalogue.
///
/// Implementors only need to provide the ordered course list and the two
/// keyed lookups; filtering is derived from `list()`.
pub trait CourseCatalogue {
    /// All courses in catalogue order.
    fn list(&self) -> &[CourseRecord];

    /// Look up a course by id.
    fn get(&self, id: CourseId) -> Option<&CourseRecord>;

    /// Look up a course by its unique name.
    fn find_by_name(&self, name: &str) -> Option<&CourseRecord>;

    /// Courses introduced in exactly `phase` and/or belonging to `category`.
    ///
    /// `None` leaves that dimension unfiltered.
    fn filter(&self, phase: Option<Phase>, category: Option<Category>) -> Vec<&CourseRecord> {
        self.list()
            .iter()
            .filter(|c| phase.is_none_or(|p| c.phase == p))
            .filter(|c| category.is_none_or(|cat| c.category == cat))
            .collect()
    }

    /// Courses unlocked at `phase` (introduced in that phase or earlier).
    fn eligible(&self, phase: Phase) -> impl Iterator<Item = &CourseRecord> {
        self.list().iter().filter(move |c| c.is_eligible_at(phase))
    }

    /// Number of courses.
    fn len(&self) -> usize {
        self.list().len()
    }

    /// Whether the catalogue has no courses.
    fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}

// =============================================================================
// CATALOGUE
// =============================================================================

/// In-memory catalogue with id and name indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    courses: Vec<CourseRecord>,
    by_id: BTreeMap<CourseId, usize>,
    by_name: BTreeMap<String, usize>,
}

impl Catalogue {
    /// Build a catalogue, rejecting duplicate ids or names, empty names and
    /// zero-credit courses.
    pub fn new(courses: Vec<CourseRecord>) -> Result<Self, CatalogueError> {
        let mut by_id = BTreeMap::new();
        let mut by_name = BTreeMap::new();

        for (index, course) in courses.iter().enumerate() {
            if course.name.trim().is_empty() {
                return Err(CatalogueError::EmptyName(course.id));
            }
            if course.credits == 0 {
                return Err(CatalogueError::ZeroCredits(course.name.clone()));
            }
            if by_id.insert(course.id, index).is_some() {
                return Err(CatalogueError::DuplicateId(course.id));
            }
            if by_name.insert(course.name.clone(), index).is_some() {
                return Err(CatalogueError::DuplicateName(course.name.clone()));
            }
        }

        Ok(Self {
            courses,
            by_id,
            by_name,
        })
    }

    /// The built-in curriculum: 41 courses over three phases.
    #[must_use]
    pub fn builtin() -> Self {
        let courses = builtin_courses();
        // Built-in records are unique by construction; index without the checks.
        let by_id = courses
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id, i))
            .collect();
        let by_name = courses
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        Self {
            courses,
            by_id,
            by_name,
        }
    }

    /// Sum of credits over all courses unlocked at `phase`.
    #[must_use]
    pub fn eligible_credits(&self, phase: Phase) -> u32 {
        self.eligible(phase).map(|c| c.credits).sum()
    }

    /// Consume the catalogue, returning its records.
    #[must_use]
    pub fn into_courses(self) -> Vec<CourseRecord> {
        self.courses
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CourseCatalogue for Catalogue {
    fn list(&self) -> &[CourseRecord] {
        &self.courses
    }

    fn get(&self, id: CourseId) -> Option<&CourseRecord> {
        self.by_id.get(&id).and_then(|&i| self.courses.get(i))
    }

    fn find_by_name(&self, name: &str) -> Option<&CourseRecord> {
        self.by_name.get(name).and_then(|&i| self.courses.get(i))
    }
}

fn builtin_courses() -> Vec<CourseRecord> {
    use Category::{
        Business, BusinessIntelligence, Communication, Data, HandsOn, Programming, Security,
    };
    let (p1, p2, p3) = (Phase::FIRST, Phase::SECOND, Phase::THIRD);

    vec![
        // Business
        CourseRecord::new(1, "Entrepreneurial Management", Business, p1, 3),
        CourseRecord::new(2, "Business Fundamentals", Business, p1, 3),
        CourseRecord::new(3, "Introduction to Financial Management", Business, p1, 3),
        CourseRecord::new(4, "Financial Management", Business, p2, 6),
        CourseRecord::new(5, "Management Skills", Business, p2, 3),
        CourseRecord::new(6, "Procurement & Supply Chain", Business, p2, 3),
        CourseRecord::new(7, "Corporate Social Responsibility", Business, p3, 3),
        CourseRecord::new(8, "Project Management", Business, p3, 3),
        // Communication
        CourseRecord::new(9, "Personal Development", Communication, p1, 3),
        CourseRecord::new(10, "Dutch", Communication, p1, 6),
        CourseRecord::new(11, "Professional Communication", Communication, p2, 3),
        CourseRecord::new(12, "French", Communication, p2, 6),
        // Programming
        CourseRecord::new(13, "Programming Fundamentals", Programming, p1, 6),
        CourseRecord::new(14, "Scripting", Programming, p1, 6),
        CourseRecord::new(15, "Programming Advanced", Programming, p2, 6),
        CourseRecord::new(16, "Web Fundamentals", Programming, p2, 3),
        CourseRecord::new(17, "DevOps", Programming, p3, 3),
        CourseRecord::new(18, "Artificial Intelligence", Programming, p3, 3),
        // Business Intelligence
        CourseRecord::new(19, "AI Tools", BusinessIntelligence, p1, 3),
        CourseRecord::new(20, "Digital Skills", BusinessIntelligence, p1, 3),
        CourseRecord::new(21, "Business Intelligence Fundamentals", BusinessIntelligence, p1, 3),
        CourseRecord::new(22, "Business Intelligence Advanced", BusinessIntelligence, p2, 3),
        CourseRecord::new(23, "Business Intelligence Lab", BusinessIntelligence, p3, 3),
        // Data
        CourseRecord::new(24, "Databases", Data, p1, 6),
        CourseRecord::new(25, "Data Processing & Analysis", Data, p1, 3),
        CourseRecord::new(26, "Data Science Fundamentals", Data, p2, 6),
        CourseRecord::new(27, "Data Engineering", Data, p2, 6),
        CourseRecord::new(28, "Machine Learning & Forecasting", Data, p3, 6),
        // Security
        CourseRecord::new(29, "Computing Fundamentals", Security, p1, 6),
        CourseRecord::new(30, "Computer Toolkit", Security, p1, 3),
        CourseRecord::new(31, "Cyber Crime Fundamentals", Security, p2, 3),
        CourseRecord::new(32, "Legal Frameworks", Security, p2, 3),
        CourseRecord::new(33, "Governance & Risk Management Frameworks", Security, p2, 3),
        CourseRecord::new(34, "Identity & Access Management", Security, p2, 3),
        CourseRecord::new(35, "Cyber Resilience", Security, p3, 3),
        CourseRecord::new(36, "Hacking AI Systems", Security, p3, 3),
        CourseRecord::new(37, "Privacy & Security by Design", Security, p3, 3),
        // Hands-on experience
        CourseRecord::new(38, "Inspiration Lab", HandsOn, p1, 3),
        CourseRecord::new(39, "Project Lab", HandsOn, p2, 3),
        CourseRecord::new(40, "Internship", HandsOn, p3, 21),
        CourseRecord::new(41, "Integrated Lab", HandsOn, p3, 9),
    ]
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_passes_validation() {
        let builtin = Catalogue::builtin();
        let rebuilt = Catalogue::new(builtin.list().to_vec());
        assert_eq!(rebuilt, Ok(builtin));
    }

    #[test]
    fn builtin_credit_totals_per_phase() {
        let catalogue = Catalogue::builtin();
        assert_eq!(catalogue.len(), 41);
        assert_eq!(catalogue.eligible_credits(Phase::FIRST), 60);
        assert_eq!(catalogue.eligible_credits(Phase::SECOND), 120);
        assert_eq!(catalogue.eligible_credits(Phase::THIRD), 180);
    }

    #[test]
    fn phase_bounds() {
        assert_eq!(Phase::new(0), None);
        assert_eq!(Phase::new(1), Some(Phase::FIRST));
        assert_eq!(Phase::new(3), Some(Phase::THIRD));
        assert_eq!(Phase::new(4), None);
        assert_eq!(
            Phase::try_from(-1_i64),
            Err(ValidationError::PhaseOutOfRange(-1))
        );
        assert_eq!(Phase::try_from(2_i64), Ok(Phase::SECOND));
        assert_eq!(Phase::all().count(), 3);
    }

    #[test]
    fn get_and_find_by_name() {
        let catalogue = Catalogue::builtin();
        let databases = catalogue.find_by_name("Databases");
        assert_eq!(databases.map(|c| c.id), Some(CourseId(24)));
        assert_eq!(catalogue.get(CourseId(24)).map(|c| c.credits), Some(6));
        assert!(catalogue.get(CourseId(999)).is_none());
        assert!(catalogue.find_by_name("databases").is_none());
    }

    #[test]
    fn filter_uses_exact_phase() {
        let catalogue = Catalogue::builtin();
        let phase_two = catalogue.filter(Some(Phase::SECOND), None);
        assert!(!phase_two.is_empty());
        assert!(phase_two.iter().all(|c| c.phase == Phase::SECOND));

        let data_p1 = catalogue.filter(Some(Phase::FIRST), Some(Category::Data));
        let names: Vec<&str> = data_p1.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Databases", "Data Processing & Analysis"]);

        assert_eq!(catalogue.filter(None, None).len(), catalogue.len());
    }

    #[test]
    fn eligible_is_cumulative() {
        let catalogue = Catalogue::builtin();
        let p1 = catalogue.eligible(Phase::FIRST).count();
        let p2 = catalogue.eligible(Phase::SECOND).count();
        let p3 = catalogue.eligible(Phase::THIRD).count();
        assert!(p1 < p2 && p2 < p3);
        assert_eq!(p3, catalogue.len());
    }

    #[test]
    fn new_rejects_duplicates_and_zero_credits() {
        let dup_id = vec![
            CourseRecord::new(1, "A", Category::Data, Phase::FIRST, 3),
            CourseRecord::new(1, "B", Category::Data, Phase::FIRST, 3),
        ];
        assert_eq!(
            Catalogue::new(dup_id),
            Err(CatalogueError::DuplicateId(CourseId(1)))
        );

        let dup_name = vec![
            CourseRecord::new(1, "A", Category::Data, Phase::FIRST, 3),
            CourseRecord::new(2, "A", Category::Security, Phase::SECOND, 3),
        ];
        assert_eq!(
            Catalogue::new(dup_name),
            Err(CatalogueError::DuplicateName("A".to_string()))
        );

        let zero = vec![CourseRecord::new(1, "A", Category::Data, Phase::FIRST, 0)];
        assert_eq!(
            Catalogue::new(zero),
            Err(CatalogueError::ZeroCredits("A".to_string()))
        );

        let blank = vec![CourseRecord::new(7, "  ", Category::Data, Phase::FIRST, 3)];
        assert_eq!(
            Catalogue::new(blank),
            Err(CatalogueError::EmptyName(CourseId(7)))
        );
    }

    #[test]
    fn category_parsing() {
        assert_eq!("Data".parse::<Category>(), Ok(Category::Data));
        assert_eq!(
            "business intelligence".parse::<Category>(),
            Ok(Category::BusinessIntelligence)
        );
        assert_eq!(
            "Hands-On Experience".parse::<Category>(),
            Ok(Category::HandsOn)
        );
        assert!("Astrology".parse::<Category>().is_err());
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }
}
