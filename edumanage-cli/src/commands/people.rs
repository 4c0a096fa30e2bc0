//! Student, teacher and user account commands

use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;
use colored::*;
use edumanage_client::EduManageClient;
use edumanage_core::domain::gender::Gender;
use edumanage_core::domain::role::Role;
use edumanage_core::domain::student::Student;
use edumanage_core::domain::teacher::Teacher;
use edumanage_core::domain::user::UserView;
use edumanage_core::dto::page::Page;
use edumanage_core::dto::student::{CreateStudent, StudentProfile, StudentQuery};
use edumanage_core::dto::teacher::{TeacherProfile, TeacherQuery};
use edumanage_core::dto::user::{CreateUser, UserQuery};

use super::output::{date, or_dash, print_empty, print_found, print_json};
use crate::config::Config;

// =============================================================================
// Students
// =============================================================================

/// Student subcommands
#[derive(Subcommand)]
pub enum StudentCommands {
    /// List students, ten per page
    List {
        /// Match against name or NIS
        #[arg(short, long)]
        search: Option<String>,

        /// Only this class
        #[arg(short, long)]
        class: Option<String>,

        /// Only this gender (Laki-laki or Perempuan)
        #[arg(short, long)]
        gender: Option<Gender>,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// List the known class labels
    Classes,
    /// Get student details
    Get {
        /// Student ID
        id: i64,
    },
    /// Create a student together with their login account
    Create {
        /// Login name
        #[arg(long)]
        username: String,

        /// Initial password
        #[arg(long)]
        password: String,

        /// Student number
        #[arg(long)]
        nis: String,

        /// Full name
        #[arg(long)]
        name: String,

        /// Class label, e.g. "X IPA 1"
        #[arg(long)]
        class: String,

        /// Laki-laki or Perempuan
        #[arg(long)]
        gender: Gender,

        #[arg(long)]
        birth_place: Option<String>,

        /// Birth date as YYYY-MM-DD
        #[arg(long)]
        birth_date: Option<NaiveDate>,

        #[arg(long)]
        address: Option<String>,
    },
    /// Delete a student and their account
    Delete {
        /// Student ID
        id: i64,
    },
}

/// Handle student commands
pub async fn handle_student_command(
    command: StudentCommands,
    client: &EduManageClient,
    config: &Config,
) -> Result<()> {
    match command {
        StudentCommands::List {
            search,
            class,
            gender,
            page,
        } => {
            let query = StudentQuery {
                search,
                class_label: class,
                gender,
            };
            list_students(client, config, &query, page).await
        }
        StudentCommands::Classes => list_classes(client, config).await,
        StudentCommands::Get { id } => get_student(client, config, id).await,
        StudentCommands::Create {
            username,
            password,
            nis,
            name,
            class,
            gender,
            birth_place,
            birth_date,
            address,
        } => {
            let req = CreateStudent {
                username,
                password,
                profile: StudentProfile {
                    nis,
                    name,
                    class_label: class,
                    gender,
                    birth_place,
                    birth_date,
                    address,
                },
            };
            create_student(client, config, &req).await
        }
        StudentCommands::Delete { id } => {
            client.delete_student(id).await?;
            println!("{}", "✓ Student deleted successfully!".green().bold());
            Ok(())
        }
    }
}

async fn list_students(
    client: &EduManageClient,
    config: &Config,
    query: &StudentQuery,
    page: u32,
) -> Result<()> {
    let students = client.list_students(query, page).await?;
    if config.json {
        return print_json(&students);
    }

    if students.data.is_empty() {
        print_empty("students");
        return Ok(());
    }

    print_found(students.data.len(), "student");
    for student in &students.data {
        print_student_summary(student);
    }
    print_page_footer(&students);

    Ok(())
}

async fn list_classes(client: &EduManageClient, config: &Config) -> Result<()> {
    let classes = client.list_classes().await?;
    if config.json {
        return print_json(&classes);
    }

    if classes.is_empty() {
        print_empty("classes");
    } else {
        print_found(classes.len(), "class");
        for class in classes {
            println!("  {} {}", "▸".cyan(), class);
        }
    }

    Ok(())
}

async fn get_student(client: &EduManageClient, config: &Config, id: i64) -> Result<()> {
    let student = client.get_student(id).await?;
    if config.json {
        return print_json(&student);
    }

    print_student_details(&student);
    Ok(())
}

async fn create_student(
    client: &EduManageClient,
    config: &Config,
    req: &CreateStudent,
) -> Result<()> {
    let student = client.create_student(req).await?;
    if config.json {
        return print_json(&student);
    }

    println!("{}", "✓ Student created successfully!".green().bold());
    println!();
    print_student_details(&student);
    Ok(())
}

fn print_student_summary(student: &Student) {
    println!(
        "  {} {} {}",
        "▸".cyan(),
        student.name.bold(),
        format!("#{}", student.id).dimmed()
    );
    println!("    NIS:    {}", student.nis);
    println!("    Class:  {}", student.class_label);
    println!("    Gender: {}", student.gender);
    println!();
}

fn print_student_details(student: &Student) {
    println!("{}", "Student Details".bold());
    println!("  ID:          {}", student.id.to_string().dimmed());
    println!("  User ID:     {}", student.user_id.to_string().dimmed());
    println!("  NIS:         {}", student.nis);
    println!("  Name:        {}", student.name);
    println!("  Class:       {}", student.class_label);
    println!("  Gender:      {}", student.gender);
    println!("  Birth place: {}", or_dash(student.birth_place.as_deref()));
    println!(
        "  Birth date:  {}",
        student.birth_date.map(date).unwrap_or_else(|| "-".to_string())
    );
    println!("  Address:     {}", or_dash(student.address.as_deref()));
}

// =============================================================================
// Teachers
// =============================================================================

/// Teacher subcommands
#[derive(Subcommand)]
pub enum TeacherCommands {
    /// List teachers
    List {
        /// Match against name or NIP
        #[arg(short, long)]
        search: Option<String>,

        /// Only this gender (Laki-laki or Perempuan)
        #[arg(short, long)]
        gender: Option<Gender>,
    },
    /// Delete a teacher and their account
    Delete {
        /// Teacher ID
        id: i64,
    },
}

/// Handle teacher commands
pub async fn handle_teacher_command(
    command: TeacherCommands,
    client: &EduManageClient,
    config: &Config,
) -> Result<()> {
    match command {
        TeacherCommands::List { search, gender } => {
            let teachers = client
                .list_teachers(&TeacherQuery { search, gender })
                .await?;
            if config.json {
                return print_json(&teachers);
            }

            if teachers.is_empty() {
                print_empty("teachers");
            } else {
                print_found(teachers.len(), "teacher");
                for teacher in &teachers {
                    print_teacher_summary(teacher);
                }
            }
            Ok(())
        }
        TeacherCommands::Delete { id } => {
            client.delete_teacher(id).await?;
            println!("{}", "✓ Teacher deleted successfully!".green().bold());
            Ok(())
        }
    }
}

fn print_teacher_summary(teacher: &Teacher) {
    println!(
        "  {} {} {}",
        "▸".cyan(),
        teacher.name.bold(),
        format!("#{}", teacher.id).dimmed()
    );
    println!("    NIP:            {}", teacher.nip);
    println!(
        "    Specialization: {}",
        or_dash(teacher.specialization.as_deref())
    );
    println!("    Gender:         {}", teacher.gender);
    println!();
}

// =============================================================================
// Users
// =============================================================================

/// User account subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// List user accounts, ten per page
    List {
        /// Match against username or profile name
        #[arg(short, long)]
        search: Option<String>,

        /// Only this role (admin, guru or siswa)
        #[arg(short, long)]
        role: Option<Role>,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Get user details
    Get {
        /// User ID
        id: i64,
    },
    /// Create a user account; guru and siswa accounts also need a profile
    Create {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,

        /// admin, guru or siswa
        #[arg(long)]
        role: Role,

        /// Full name (guru and siswa)
        #[arg(long)]
        name: Option<String>,

        /// Student number (siswa)
        #[arg(long)]
        nis: Option<String>,

        /// Class label (siswa)
        #[arg(long)]
        class: Option<String>,

        /// Teacher number (guru)
        #[arg(long)]
        nip: Option<String>,

        /// Subject specialisation (guru)
        #[arg(long)]
        specialization: Option<String>,

        /// Laki-laki or Perempuan (guru and siswa)
        #[arg(long, default_value = "Laki-laki")]
        gender: Gender,
    },
    /// Delete a user account
    Delete {
        /// User ID
        id: i64,
    },
    /// Issue a one-time login code for a user
    LoginCode {
        /// User ID
        id: i64,
    },
}

/// Handle user commands
pub async fn handle_user_command(
    command: UserCommands,
    client: &EduManageClient,
    config: &Config,
) -> Result<()> {
    match command {
        UserCommands::List { search, role, page } => {
            let users = client.list_users(&UserQuery { search, role }, page).await?;
            if config.json {
                return print_json(&users);
            }

            if users.data.is_empty() {
                print_empty("users");
            } else {
                print_found(users.data.len(), "user");
                for user in &users.data {
                    print_user_summary(user);
                }
                print_page_footer(&users);
            }
            Ok(())
        }
        UserCommands::Get { id } => {
            let user = client.get_user(id).await?;
            if config.json {
                return print_json(&user);
            }
            print_user_summary(&user);
            Ok(())
        }
        UserCommands::Create {
            username,
            password,
            role,
            name,
            nis,
            class,
            nip,
            specialization,
            gender,
        } => {
            let name = name.unwrap_or_default();
            let req = CreateUser {
                username,
                password,
                role,
                student: (role == Role::Student).then(|| StudentProfile {
                    nis: nis.unwrap_or_default(),
                    name: name.clone(),
                    class_label: class.unwrap_or_default(),
                    gender,
                    ..Default::default()
                }),
                teacher: (role == Role::Teacher).then(|| TeacherProfile {
                    nip: nip.unwrap_or_default(),
                    name: name.clone(),
                    specialization,
                    gender,
                    ..Default::default()
                }),
            };

            let user = client.create_user(&req).await?;
            if config.json {
                return print_json(&user);
            }

            println!("{}", "✓ User created successfully!".green().bold());
            println!();
            print_user_summary(&user);
            Ok(())
        }
        UserCommands::Delete { id } => {
            client.delete_user(id).await?;
            println!("{}", "✓ User deleted successfully!".green().bold());
            Ok(())
        }
        UserCommands::LoginCode { id } => {
            let code = client.create_login_code(id).await?;
            if config.json {
                return print_json(&code);
            }

            println!("{}", "✓ Login code issued successfully!".green().bold());
            println!("  Code:    {}", code.code.to_string().bold());
            println!(
                "  Expires: {}",
                code.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!(
                "  {}",
                format!(
                    "Open {}/auth/callback?code={}",
                    client.base_url(),
                    code.code
                )
                .dimmed()
            );
            Ok(())
        }
    }
}

fn print_user_summary(view: &UserView) {
    println!(
        "  {} {} ({}) {}",
        "▸".cyan(),
        view.user.username.bold(),
        view.user.role.to_string().cyan(),
        format!("#{}", view.user.id).dimmed()
    );
    if let Some(student) = &view.student {
        println!(
            "    Student: {} (NIS {}, {})",
            student.name, student.nis, student.class_label
        );
    }
    if let Some(teacher) = &view.teacher {
        println!("    Teacher: {} (NIP {})", teacher.name, teacher.nip);
    }
    println!(
        "    Created: {}",
        view.user
            .created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .dimmed()
    );
    println!();
}

fn print_page_footer<T>(page: &Page<T>) {
    println!(
        "{}",
        format!(
            "Page {} of {} ({} total)",
            page.page,
            page.total_pages().max(1),
            page.count
        )
        .dimmed()
    );
}
