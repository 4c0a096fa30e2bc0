//! List filters
//!
//! Every list view narrows already-fetched rows the same way: an optional
//! free-text search (case-insensitive substring over a few columns) plus
//! exact-match selectors. An absent or blank selector matches everything.

use crate::domain::grade::GradeView;
use crate::domain::invoice::Invoice;
use crate::domain::schedule::ScheduleView;
use crate::domain::student::Student;
use crate::domain::teacher::Teacher;
use crate::domain::user::UserView;
use crate::dto::grade::GradeQuery;
use crate::dto::invoice::InvoiceQuery;
use crate::dto::page::{PER_PAGE, Page, PageParams};
use crate::dto::schedule::ScheduleQuery;
use crate::dto::student::StudentQuery;
use crate::dto::teacher::TeacherQuery;
use crate::dto::user::UserQuery;

/// A predicate over rows of type `T`
pub trait ListFilter<T> {
    fn matches(&self, item: &T) -> bool;

    /// Keep only the matching rows, preserving order
    fn apply(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

/// Normalised search needle: trimmed, lowercased, `None` when blank
fn needle(search: &Option<String>) -> Option<String> {
    search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Exact match on a text selector; blank selectors match everything
fn selects(selector: &Option<String>, value: &str) -> bool {
    match selector.as_deref().map(str::trim) {
        None | Some("") => true,
        Some(wanted) => wanted == value,
    }
}

fn selects_eq<V: PartialEq>(selector: &Option<V>, value: &V) -> bool {
    selector.as_ref().is_none_or(|wanted| wanted == value)
}

impl ListFilter<Student> for StudentQuery {
    fn matches(&self, student: &Student) -> bool {
        let matches_search = needle(&self.search)
            .is_none_or(|n| contains(&student.name, &n) || contains(&student.nis, &n));

        matches_search
            && selects(&self.class_label, &student.class_label)
            && selects_eq(&self.gender, &student.gender)
    }
}

impl ListFilter<Teacher> for TeacherQuery {
    fn matches(&self, teacher: &Teacher) -> bool {
        let matches_search = needle(&self.search).is_none_or(|n| {
            contains(&teacher.name, &n)
                || contains(&teacher.nip, &n)
                || teacher
                    .specialization
                    .as_deref()
                    .is_some_and(|s| contains(s, &n))
        });

        matches_search && selects_eq(&self.gender, &teacher.gender)
    }
}

impl ListFilter<UserView> for UserQuery {
    fn matches(&self, view: &UserView) -> bool {
        let matches_search = needle(&self.search).is_none_or(|n| {
            contains(&view.user.username, &n) || contains(view.user.role.name(), &n)
        });

        matches_search && selects_eq(&self.role, &view.user.role)
    }
}

impl ListFilter<ScheduleView> for ScheduleQuery {
    fn matches(&self, view: &ScheduleView) -> bool {
        let matches_search = needle(&self.search).is_none_or(|n| {
            contains(&view.subject_name, &n)
                || contains(&view.teacher_name, &n)
                || contains(&view.entry.class_label, &n)
        });

        matches_search
            && selects(&self.class_label, &view.entry.class_label)
            && selects_eq(&self.day, &view.entry.day)
            && selects_eq(&self.teacher_id, &view.entry.teacher_id)
    }
}

impl ListFilter<GradeView> for GradeQuery {
    fn matches(&self, view: &GradeView) -> bool {
        selects_eq(&self.semester, &view.grade.semester)
            && selects(&self.academic_year, &view.grade.academic_year)
            && selects(&self.class_label, &view.class_label)
            && selects_eq(&self.subject_id, &view.grade.subject_id)
    }
}

impl ListFilter<Invoice> for InvoiceQuery {
    fn matches(&self, invoice: &Invoice) -> bool {
        selects_eq(&self.status, &invoice.status) && selects_eq(&self.student_id, &invoice.student_id)
    }
}

/// Distinct, sorted, non-blank class labels
pub fn unique_classes<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut classes: Vec<String> = labels
        .into_iter()
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect();
    classes.sort();
    classes.dedup();
    classes
}

/// Distinct academic years, newest first
pub fn unique_academic_years<'a>(years: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut years: Vec<String> = years.into_iter().map(str::to_string).collect();
    years.sort_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Order schedule entries by school day, then start time, then class
pub fn sort_schedule(entries: &mut [ScheduleView]) {
    entries.sort_by(|a, b| {
        a.entry
            .day
            .cmp(&b.entry.day)
            .then(a.entry.start_time.cmp(&b.entry.start_time))
            .then_with(|| a.entry.class_label.cmp(&b.entry.class_label))
    });
}

/// Cut one fixed-size page out of an already filtered list
pub fn paginate<T>(items: Vec<T>, params: PageParams) -> Page<T> {
    let count = items.len() as i64;
    let page = params.page();
    let data = items
        .into_iter()
        .skip(params.offset() as usize)
        .take(PER_PAGE as usize)
        .collect();

    Page {
        data,
        count,
        page,
        per_page: PER_PAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gender::Gender;
    use crate::domain::grade::{Grade, Semester};
    use crate::domain::role::Role;
    use crate::domain::schedule::{Day, ScheduleEntry};
    use crate::domain::user::User;
    use chrono::{NaiveTime, Utc};

    fn student(id: i64, nis: &str, name: &str, class_label: &str, gender: Gender) -> Student {
        Student {
            id,
            user_id: id + 100,
            nis: nis.to_string(),
            name: name.to_string(),
            class_label: class_label.to_string(),
            gender,
            birth_place: None,
            birth_date: None,
            address: None,
        }
    }

    fn students() -> Vec<Student> {
        vec![
            student(1, "1001", "Budi Santoso", "X IPA 1", Gender::Male),
            student(2, "1002", "Siti Aminah", "X IPA 1", Gender::Female),
            student(3, "2001", "Andi Wijaya", "XI IPS 2", Gender::Male),
        ]
    }

    fn schedule(id: i64, day: Day, start: (u32, u32), class_label: &str, subject: &str) -> ScheduleView {
        ScheduleView {
            entry: ScheduleEntry {
                id,
                class_label: class_label.to_string(),
                subject_id: id,
                teacher_id: 7,
                day,
                start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(start.0 + 1, start.1, 0).unwrap(),
            },
            subject_name: subject.to_string(),
            teacher_name: "Pak Joko".to_string(),
        }
    }

    fn grade(id: i64, semester: Semester, year: &str, class_label: &str) -> GradeView {
        GradeView {
            grade: Grade {
                id,
                student_id: id,
                subject_id: 1,
                score: 80.0,
                semester,
                academic_year: year.to_string(),
            },
            student_name: format!("Student {id}"),
            student_nis: format!("{id:04}"),
            class_label: class_label.to_string(),
            subject_name: "Matematika".to_string(),
            teacher_id: 7,
        }
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let query = StudentQuery::default();
        assert_eq!(query.apply(students()).len(), 3);
    }

    #[test]
    fn test_student_search_is_case_insensitive_over_name_and_nis() {
        let query = StudentQuery {
            search: Some("SITI".to_string()),
            ..Default::default()
        };
        let found = query.apply(students());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].nis, "1002");

        let query = StudentQuery {
            search: Some("200".to_string()),
            ..Default::default()
        };
        let found = query.apply(students());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Andi Wijaya");
    }

    #[test]
    fn test_student_selectors_are_exact() {
        let query = StudentQuery {
            class_label: Some("X IPA".to_string()),
            ..Default::default()
        };
        assert!(query.apply(students()).is_empty());

        let query = StudentQuery {
            class_label: Some("X IPA 1".to_string()),
            gender: Some(Gender::Male),
            ..Default::default()
        };
        let found = query.apply(students());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Budi Santoso");
    }

    #[test]
    fn test_blank_search_and_selector_are_ignored() {
        let query = StudentQuery {
            search: Some("   ".to_string()),
            class_label: Some(String::new()),
            gender: None,
        };
        assert_eq!(query.apply(students()).len(), 3);
    }

    #[test]
    fn test_teacher_search_covers_specialization() {
        let teacher = Teacher {
            id: 1,
            user_id: 10,
            nip: "198001012005011001".to_string(),
            name: "Joko Susilo".to_string(),
            specialization: Some("Fisika".to_string()),
            gender: Gender::Male,
            birth_place: None,
            birth_date: None,
            address: None,
        };

        let by_specialization = TeacherQuery {
            search: Some("fisika".to_string()),
            gender: None,
        };
        assert!(by_specialization.matches(&teacher));

        let wrong_gender = TeacherQuery {
            search: None,
            gender: Some(Gender::Female),
        };
        assert!(!wrong_gender.matches(&teacher));
    }

    #[test]
    fn test_user_search_matches_role_name() {
        let view = UserView {
            user: User {
                id: 1,
                username: "budi".to_string(),
                role: Role::Student,
                created_at: Utc::now(),
            },
            student: None,
            teacher: None,
        };

        let query = UserQuery {
            search: Some("sis".to_string()),
            role: None,
        };
        assert!(query.matches(&view));

        let query = UserQuery {
            search: None,
            role: Some(Role::Admin),
        };
        assert!(!query.matches(&view));
    }

    #[test]
    fn test_schedule_filter_and_sort() {
        let mut entries = vec![
            schedule(1, Day::Wednesday, (8, 0), "X IPA 1", "Biologi"),
            schedule(2, Day::Monday, (10, 0), "X IPA 1", "Matematika"),
            schedule(3, Day::Monday, (7, 30), "XI IPS 2", "Sejarah"),
        ];
        sort_schedule(&mut entries);
        let ids: Vec<i64> = entries.iter().map(|e| e.entry.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        let query = ScheduleQuery {
            search: Some("mate".to_string()),
            ..Default::default()
        };
        assert_eq!(query.apply(entries.clone()).len(), 1);

        let query = ScheduleQuery {
            day: Some(Day::Monday),
            class_label: Some("X IPA 1".to_string()),
            ..Default::default()
        };
        let found = query.apply(entries.clone());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].subject_name, "Matematika");

        let query = ScheduleQuery {
            search: Some("joko".to_string()),
            ..Default::default()
        };
        assert_eq!(query.apply(entries).len(), 3);
    }

    #[test]
    fn test_grade_filter_is_exact() {
        let grades = vec![
            grade(1, Semester::Odd, "2023/2024", "X IPA 1"),
            grade(2, Semester::Even, "2023/2024", "X IPA 1"),
            grade(3, Semester::Odd, "2024/2025", "XI IPS 2"),
        ];

        let query = GradeQuery {
            semester: Some(Semester::Odd),
            academic_year: Some("2023/2024".to_string()),
            ..Default::default()
        };
        let found = query.apply(grades.clone());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].grade.id, 1);

        let query = GradeQuery {
            class_label: Some("XI IPS 2".to_string()),
            ..Default::default()
        };
        assert_eq!(query.apply(grades).len(), 1);
    }

    #[test]
    fn test_unique_classes_sorted_and_deduplicated() {
        let classes = unique_classes(["XI IPS 2", "X IPA 1", "", "X IPA 1", " XI IPS 2 "]);
        assert_eq!(classes, vec!["X IPA 1".to_string(), "XI IPS 2".to_string()]);
    }

    #[test]
    fn test_unique_academic_years_newest_first() {
        let years = unique_academic_years(["2022/2023", "2023/2024", "2022/2023"]);
        assert_eq!(years, vec!["2023/2024".to_string(), "2022/2023".to_string()]);
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=23).collect();

        let first = paginate(items.clone(), PageParams { page: None });
        assert_eq!(first.data, (1..=10).collect::<Vec<_>>());
        assert_eq!(first.count, 23);
        assert_eq!(first.total_pages(), 3);

        let last = paginate(items.clone(), PageParams { page: Some(3) });
        assert_eq!(last.data, vec![21, 22, 23]);

        let past_end = paginate(items.clone(), PageParams { page: Some(9) });
        assert!(past_end.data.is_empty());
        assert_eq!(past_end.count, 23);

        let zero = paginate(items, PageParams { page: Some(0) });
        assert_eq!(zero.page, 1);
        assert_eq!(zero.data.len(), 10);
    }
}
