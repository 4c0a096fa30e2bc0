//! Create, list and delete against a live database

mod common;

use chrono::NaiveDate;
use edumanage_core::domain::grade::Semester;
use edumanage_core::domain::invoice::InvoiceStatus;
use edumanage_core::domain::schedule::Day;
use edumanage_core::dto::grade::{CreateGrade, GradeQuery, UpdateGrade};
use edumanage_core::dto::invoice::InvoiceForm;
use edumanage_core::dto::page::PageParams;
use edumanage_core::dto::schedule::{ScheduleForm, ScheduleQuery};
use edumanage_core::dto::student::{CreateStudent, StudentQuery};
use edumanage_core::dto::subject::CreateSubject;
use edumanage_server::repository::{
    grade_repository, schedule_repository, subject_repository, user_repository,
};
use edumanage_server::service::error::ServiceError;
use edumanage_server::service::{
    grade_service, invoice_service, schedule_service, student_service, subject_service,
    user_service,
};

use common::*;

#[tokio::test]
async fn test_created_student_is_listed() {
    let Some(pool) = pool().await else { return };

    let class_label = unique("X");
    let student = create_student(&pool, &class_label).await;

    let query = StudentQuery {
        search: Some(student.nis.to_uppercase()),
        ..Default::default()
    };
    let page = student_service::list_students(&pool, &query, PageParams::default())
        .await
        .unwrap();

    assert_eq!(page.count, 1);
    assert_eq!(page.data[0].id, student.id);

    let classes = student_service::list_classes(&pool).await.unwrap();
    assert!(classes.contains(&class_label));
}

#[tokio::test]
async fn test_duplicate_nis_leaves_no_orphan_user() {
    let Some(pool) = pool().await else { return };

    let first = create_student(&pool, "X-A").await;
    let username = unique("siswa");

    let result = student_service::create_student(
        &pool,
        CreateStudent {
            username: username.clone(),
            password: "rahasia".to_string(),
            profile: student_profile(&first.nis, "X-B"),
        },
    )
    .await;

    assert!(matches!(result, Err(ServiceError::Conflict(_))));
    assert!(
        user_repository::find_credentials(&pool, &username)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_schedule_defaults_to_subject_owner() {
    let Some(pool) = pool().await else { return };

    let teacher = create_teacher(&pool).await;
    let teacher_id = teacher.teacher.as_ref().unwrap().id;
    let subject = subject_service::create_subject(
        &pool,
        CreateSubject {
            name: unique("Matematika"),
            teacher_id,
        },
    )
    .await
    .unwrap();

    let class_label = unique("XI");
    let created = schedule_service::create_schedule(
        &pool,
        ScheduleForm {
            class_label: class_label.clone(),
            subject_id: subject.id,
            teacher_id: None,
            day: Day::Wednesday,
            start_time: time(7, 30),
            end_time: time(9, 0),
        },
    )
    .await
    .unwrap();

    assert_eq!(created.entry.teacher_id, teacher_id);
    assert_eq!(created.subject_name, subject.name);

    let listed = schedule_service::list_schedules(
        &pool,
        &ScheduleQuery {
            class_label: Some(class_label),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn test_teacher_cannot_touch_other_teachers_grades() {
    let Some(pool) = pool().await else { return };

    let owner = create_teacher(&pool).await;
    let other = create_teacher(&pool).await;
    let subject = subject_service::create_subject(
        &pool,
        CreateSubject {
            name: unique("Fisika"),
            teacher_id: owner.teacher.as_ref().unwrap().id,
        },
    )
    .await
    .unwrap();
    let student = create_student(&pool, "XII-IPA").await;

    let grade = grade_service::create_grade(
        &pool,
        &session_user(&owner),
        CreateGrade {
            student_id: student.id,
            subject_id: subject.id,
            score: 88.0,
            semester: Semester::Odd,
            academic_year: "2024/2025".to_string(),
        },
    )
    .await
    .unwrap();

    let update = UpdateGrade {
        score: 20.0,
        semester: Semester::Odd,
        academic_year: "2024/2025".to_string(),
    };
    let result =
        grade_service::update_grade(&pool, &session_user(&other), grade.grade.id, update).await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));

    let visible = grade_service::list_grades(&pool, &session_user(&other), &GradeQuery::default())
        .await
        .unwrap();
    assert!(visible.iter().all(|g| g.grade.id != grade.grade.id));

    let own = grade_service::list_grades(&pool, &session_user(&owner), &GradeQuery::default())
        .await
        .unwrap();
    assert!(own.iter().any(|g| g.grade.id == grade.grade.id));
}

#[tokio::test]
async fn test_deleting_teacher_user_cascades() {
    let Some(pool) = pool().await else { return };

    let teacher = create_teacher(&pool).await;
    let subject = subject_service::create_subject(
        &pool,
        CreateSubject {
            name: unique("Biologi"),
            teacher_id: teacher.teacher.as_ref().unwrap().id,
        },
    )
    .await
    .unwrap();
    let schedule = schedule_service::create_schedule(
        &pool,
        ScheduleForm {
            class_label: "X-C".to_string(),
            subject_id: subject.id,
            teacher_id: None,
            day: Day::Friday,
            start_time: time(10, 0),
            end_time: time(11, 30),
        },
    )
    .await
    .unwrap();
    let student = create_student(&pool, "X-C").await;
    let grade = grade_service::create_grade(
        &pool,
        &acting_admin(),
        CreateGrade {
            student_id: student.id,
            subject_id: subject.id,
            score: 75.0,
            semester: Semester::Even,
            academic_year: "2023/2024".to_string(),
        },
    )
    .await
    .unwrap();

    user_service::delete_user(&pool, &acting_admin(), teacher.user.id)
        .await
        .unwrap();

    assert!(subject_repository::find_by_id(&pool, subject.id).await.unwrap().is_none());
    assert!(
        schedule_repository::find_by_id(&pool, schedule.entry.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(grade_repository::find_by_id(&pool, grade.grade.id).await.unwrap().is_none());

    // Deleting again reports the missing row
    let again = user_service::delete_user(&pool, &acting_admin(), teacher.user.id).await;
    assert!(matches!(again, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_invoice_update_keeps_stored_invoice_date() {
    let Some(pool) = pool().await else { return };

    let student = create_student(&pool, "XI-A").await;
    let issued = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    let due = NaiveDate::from_ymd_opt(2024, 7, 31).unwrap();

    let invoice = invoice_service::create_invoice(
        &pool,
        InvoiceForm {
            student_id: student.id,
            invoice_date: Some(issued),
            due_date: due,
            total_amount: 500_000,
            amount_paid: 0,
            status: InvoiceStatus::Unpaid,
            notes: None,
        },
    )
    .await
    .unwrap();

    let paid = invoice_service::update_invoice(
        &pool,
        invoice.id,
        InvoiceForm {
            student_id: student.id,
            invoice_date: None,
            due_date: due,
            total_amount: 500_000,
            amount_paid: 500_000,
            status: InvoiceStatus::Paid,
            notes: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(paid.invoice_date, issued);
    assert_eq!(paid.status, InvoiceStatus::Paid);

    let missing = invoice_service::update_invoice(
        &pool,
        -1,
        InvoiceForm {
            student_id: student.id,
            invoice_date: None,
            due_date: due,
            total_amount: 1,
            amount_paid: 0,
            status: InvoiceStatus::Unpaid,
            notes: None,
        },
    )
    .await;
    assert!(matches!(missing, Err(ServiceError::NotFound(_))));
}
