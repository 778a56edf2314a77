//! Course and lecture grouping for quiz listings.
//!
//! A lecture code like `pcv5` belongs to course `PCV`. Courses are keyed
//! alphabetically; lectures within a course are sorted by name, then by the
//! creation time of their first quiz.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::model::QuizSummary;

/// Course code used when a lecture has no alphabetic prefix.
pub const OTHER_COURSE: &str = "OTHER";

/// Courses keyed by course code, in alphabetical order.
pub type CourseIndex = BTreeMap<String, CourseGroup>;

/// All lectures of one course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CourseGroup {
    pub lectures: Vec<LectureGroup>,
    pub completed_count: usize,
    pub total_count: usize,
}

impl CourseGroup {
    /// Look up a lecture by name.
    pub fn lecture(&self, name: &str) -> Option<&LectureGroup> {
        self.lectures.iter().find(|l| l.name == name)
    }
}

/// All quizzes of one lecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LectureGroup {
    pub name: String,
    /// Quizzes in input order.
    pub quizzes: Vec<GroupedQuiz>,
    pub completed_count: usize,
    pub total_count: usize,
}

/// A quiz summary annotated with its completion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedQuiz {
    #[serde(flatten)]
    pub summary: QuizSummary,
    pub completed: bool,
}

/// Extract the course code from a lecture string (`"pcv5"` → `"PCV"`).
pub fn course_code(lecture: &str) -> String {
    let prefix: String = lecture
        .chars()
        .take_while(char::is_ascii_alphabetic)
        .collect();

    if prefix.is_empty() {
        OTHER_COURSE.to_string()
    } else {
        prefix.to_ascii_uppercase()
    }
}

/// Group quiz summaries by course and lecture, marking completed quizzes.
pub fn group_quizzes<'a, I>(quizzes: I, completed: &HashSet<String>) -> CourseIndex
where
    I: IntoIterator<Item = &'a QuizSummary>,
{
    let mut courses = CourseIndex::new();

    for summary in quizzes {
        let is_completed = completed.contains(&summary.id);
        let course = courses.entry(course_code(&summary.lecture)).or_default();

        let pos = match course
            .lectures
            .iter()
            .position(|l| l.name == summary.lecture)
        {
            Some(pos) => pos,
            None => {
                course.lectures.push(LectureGroup {
                    name: summary.lecture.clone(),
                    quizzes: Vec::new(),
                    completed_count: 0,
                    total_count: 0,
                });
                course.lectures.len() - 1
            }
        };
        let lecture = &mut course.lectures[pos];

        lecture.quizzes.push(GroupedQuiz {
            summary: summary.clone(),
            completed: is_completed,
        });
        lecture.total_count += 1;
        course.total_count += 1;

        if is_completed {
            lecture.completed_count += 1;
            course.completed_count += 1;
        }
    }

    for course in courses.values_mut() {
        course.lectures.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| first_created(a).cmp(first_created(b)))
        });
    }

    courses
}

fn first_created(lecture: &LectureGroup) -> &str {
    lecture
        .quizzes
        .first()
        .map_or("", |q| q.summary.created.as_str())
}
