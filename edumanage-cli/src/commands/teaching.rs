//! Subject, timetable and grade commands

use anyhow::Result;
use chrono::NaiveTime;
use clap::Subcommand;
use colored::*;
use edumanage_client::EduManageClient;
use edumanage_core::domain::grade::{GradeView, Semester};
use edumanage_core::domain::schedule::{Day, ScheduleView};
use edumanage_core::dto::grade::GradeQuery;
use edumanage_core::dto::schedule::{ScheduleForm, ScheduleQuery};
use edumanage_core::dto::subject::{CreateSubject, SubjectQuery};

use super::output::{print_empty, print_found, print_json};
use crate::config::Config;

// =============================================================================
// Subjects
// =============================================================================

/// Subject subcommands
#[derive(Subcommand)]
pub enum SubjectCommands {
    /// List subjects
    List {
        /// Only subjects of this teacher
        #[arg(short, long)]
        teacher: Option<i64>,
    },
    /// Create a subject
    Create {
        /// Subject name
        name: String,

        /// ID of the teacher who owns the subject
        #[arg(short, long)]
        teacher: i64,
    },
}

/// Handle subject commands
pub async fn handle_subject_command(
    command: SubjectCommands,
    client: &EduManageClient,
    config: &Config,
) -> Result<()> {
    match command {
        SubjectCommands::List { teacher } => {
            let subjects = client
                .list_subjects(&SubjectQuery {
                    teacher_id: teacher,
                })
                .await?;
            if config.json {
                return print_json(&subjects);
            }

            if subjects.is_empty() {
                print_empty("subjects");
            } else {
                print_found(subjects.len(), "subject");
                for subject in &subjects {
                    println!(
                        "  {} {} {}",
                        "▸".cyan(),
                        subject.name.bold(),
                        format!("#{}", subject.id).dimmed()
                    );
                    println!(
                        "    Teacher: {} {}",
                        subject.teacher_name.as_deref().unwrap_or("-"),
                        format!("#{}", subject.teacher_id).dimmed()
                    );
                }
            }
            Ok(())
        }
        SubjectCommands::Create { name, teacher } => {
            let subject = client
                .create_subject(&CreateSubject {
                    name,
                    teacher_id: teacher,
                })
                .await?;
            if config.json {
                return print_json(&subject);
            }

            println!("{}", "✓ Subject created successfully!".green().bold());
            println!("  ID:   {}", subject.id.to_string().dimmed());
            println!("  Name: {}", subject.name);
            Ok(())
        }
    }
}

// =============================================================================
// Schedules
// =============================================================================

/// Timetable subcommands
#[derive(Subcommand)]
pub enum ScheduleCommands {
    /// List timetable entries ordered through the week
    List {
        /// Match against class, subject or teacher name
        #[arg(short, long)]
        search: Option<String>,

        /// Only this class
        #[arg(short, long)]
        class: Option<String>,

        /// Only this day (Senin .. Sabtu)
        #[arg(short, long)]
        day: Option<Day>,

        /// Only lessons of this teacher
        #[arg(short, long)]
        teacher: Option<i64>,
    },
    /// Add a lesson to the timetable
    Create {
        /// Class label
        #[arg(long)]
        class: String,

        /// Subject ID
        #[arg(long)]
        subject: i64,

        /// Teacher ID; defaults to the subject's teacher
        #[arg(long)]
        teacher: Option<i64>,

        /// Senin .. Sabtu
        #[arg(long)]
        day: Day,

        /// Start time as HH:MM
        #[arg(long, value_parser = parse_time)]
        start: NaiveTime,

        /// End time as HH:MM
        #[arg(long, value_parser = parse_time)]
        end: NaiveTime,
    },
    /// Remove a lesson from the timetable
    Delete {
        /// Schedule ID
        id: i64,
    },
}

/// Handle timetable commands
pub async fn handle_schedule_command(
    command: ScheduleCommands,
    client: &EduManageClient,
    config: &Config,
) -> Result<()> {
    match command {
        ScheduleCommands::List {
            search,
            class,
            day,
            teacher,
        } => {
            let query = ScheduleQuery {
                search,
                class_label: class,
                day,
                teacher_id: teacher,
            };
            let schedules = client.list_schedules(&query).await?;
            if config.json {
                return print_json(&schedules);
            }

            if schedules.is_empty() {
                print_empty("schedules");
            } else {
                print_found(schedules.len(), "schedule");
                let mut current_day = None;
                for lesson in &schedules {
                    if current_day != Some(lesson.entry.day) {
                        current_day = Some(lesson.entry.day);
                        println!("{}", lesson.entry.day.to_string().bold());
                    }
                    print_schedule_line(lesson);
                }
            }
            Ok(())
        }
        ScheduleCommands::Create {
            class,
            subject,
            teacher,
            day,
            start,
            end,
        } => {
            let form = ScheduleForm {
                class_label: class,
                subject_id: subject,
                teacher_id: teacher,
                day,
                start_time: start,
                end_time: end,
            };
            let lesson = client.create_schedule(&form).await?;
            if config.json {
                return print_json(&lesson);
            }

            println!("{}", "✓ Schedule created successfully!".green().bold());
            print_schedule_line(&lesson);
            Ok(())
        }
        ScheduleCommands::Delete { id } => {
            client.delete_schedule(id).await?;
            println!("{}", "✓ Schedule deleted successfully!".green().bold());
            Ok(())
        }
    }
}

/// One timetable line: time range, class, subject and teacher
pub fn print_schedule_line(lesson: &ScheduleView) {
    println!(
        "  {} {}-{}  {}  {} {}",
        "▸".cyan(),
        lesson.entry.start_time.format("%H:%M"),
        lesson.entry.end_time.format("%H:%M"),
        lesson.entry.class_label.bold(),
        lesson.subject_name,
        format!("({})", lesson.teacher_name).dimmed()
    );
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("invalid time '{s}', expected HH:MM"))
}

// =============================================================================
// Grades
// =============================================================================

/// Grade subcommands
#[derive(Subcommand)]
pub enum GradeCommands {
    /// List grades visible to the signed-in teacher or admin
    List {
        #[command(flatten)]
        filter: GradeFilter,
    },
    /// List the signed-in student's own grades
    Mine {
        #[command(flatten)]
        filter: GradeFilter,
    },
}

/// Grade filters shared by the list commands
#[derive(clap::Args)]
pub struct GradeFilter {
    /// Ganjil or Genap
    #[arg(short, long)]
    semester: Option<Semester>,

    /// Academic year, e.g. 2024/2025
    #[arg(short, long)]
    year: Option<String>,

    /// Only this class
    #[arg(short, long)]
    class: Option<String>,

    /// Only this subject
    #[arg(long)]
    subject: Option<i64>,
}

impl From<GradeFilter> for GradeQuery {
    fn from(filter: GradeFilter) -> Self {
        GradeQuery {
            semester: filter.semester,
            academic_year: filter.year,
            class_label: filter.class,
            subject_id: filter.subject,
        }
    }
}

/// Handle grade commands
pub async fn handle_grade_command(
    command: GradeCommands,
    client: &EduManageClient,
    config: &Config,
) -> Result<()> {
    let grades = match command {
        GradeCommands::List { filter } => client.list_grades(&filter.into()).await?,
        GradeCommands::Mine { filter } => client.my_grades(&filter.into()).await?,
    };
    if config.json {
        return print_json(&grades);
    }

    if grades.is_empty() {
        print_empty("grades");
    } else {
        print_found(grades.len(), "grade");
        for grade in &grades {
            print_grade_line(grade);
        }
    }

    Ok(())
}

fn print_grade_line(view: &GradeView) {
    let score = format!("{:>5.1}", view.grade.score);
    let score = if view.grade.score < 75.0 {
        score.red()
    } else {
        score.green()
    };

    println!(
        "  {} {}  {} ({}, {})  {} {} {}",
        "▸".cyan(),
        score,
        view.student_name.bold(),
        view.student_nis,
        view.class_label,
        view.subject_name,
        view.grade.semester,
        view.grade.academic_year.dimmed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time("07:30").unwrap(),
            NaiveTime::from_hms_opt(7, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time("13:15:00").unwrap(),
            NaiveTime::from_hms_opt(13, 15, 0).unwrap()
        );
        assert!(parse_time("7.30").is_err());
        assert!(parse_time("25:00").is_err());
    }
}
