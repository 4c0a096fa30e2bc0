//! Dashboard and identity commands

use anyhow::Result;
use colored::*;
use edumanage_client::EduManageClient;
use edumanage_core::domain::role::Role;
use edumanage_core::domain::schedule::ScheduleView;

use super::output::{or_dash, print_json};
use crate::config::Config;

/// Show the dashboard matching the signed-in account's role
pub async fn show_dashboard(client: &EduManageClient, config: &Config) -> Result<()> {
    let me = client.me().await?;

    match me.user.role {
        Role::Admin => {
            let dashboard = client.admin_dashboard().await?;
            if config.json {
                return print_json(&dashboard);
            }

            println!("{}", "Admin dashboard".bold());
            println!("  Students: {}", dashboard.student_count.to_string().cyan());
            println!("  Teachers: {}", dashboard.teacher_count.to_string().cyan());
            println!("  Classes:  {}", dashboard.class_count.to_string().cyan());
            println!("  Subjects: {}", dashboard.subject_count.to_string().cyan());
        }
        Role::Teacher => {
            let dashboard = client.teacher_dashboard().await?;
            if config.json {
                return print_json(&dashboard);
            }

            println!("{}", format!("Welcome, {}", dashboard.profile.name).bold());
            println!("  NIP:            {}", dashboard.profile.nip.dimmed());
            println!(
                "  Specialization: {}",
                or_dash(dashboard.profile.specialization.as_deref())
            );
            if dashboard.classes.is_empty() {
                println!("  Classes:        -");
            } else {
                println!("  Classes:        {}", dashboard.classes.join(", "));
            }
            println!();
            print_today(dashboard.today.map(|d| d.to_string()), &dashboard.today_schedule);
        }
        Role::Student => {
            let dashboard = client.student_dashboard().await?;
            if config.json {
                return print_json(&dashboard);
            }

            println!("{}", format!("Welcome, {}", dashboard.profile.name).bold());
            println!("  NIS:   {}", dashboard.profile.nis.dimmed());
            println!("  Class: {}", dashboard.profile.class_label);
            if !dashboard.academic_years.is_empty() {
                println!("  Years: {}", dashboard.academic_years.join(", "));
            }
            println!();
            print_today(dashboard.today.map(|d| d.to_string()), &dashboard.today_schedule);
        }
    }

    Ok(())
}

/// Show the signed-in account and its permissions
pub async fn whoami(client: &EduManageClient, config: &Config) -> Result<()> {
    let me = client.me().await?;
    if config.json {
        return print_json(&me);
    }

    println!(
        "{} {} ({})",
        "▸".cyan(),
        me.user.username.bold(),
        me.user.role.to_string().cyan()
    );
    println!("    ID: {}", me.user.id.to_string().dimmed());

    if me.permissions.is_empty() {
        println!("    Permissions: -");
    } else {
        println!("    Permissions:");
        for name in &me.permissions {
            println!("      - {}", name);
        }
    }

    Ok(())
}

fn print_today(day: Option<String>, schedule: &[ScheduleView]) {
    let Some(day) = day else {
        println!("{}", "No lessons today (Minggu).".yellow());
        return;
    };

    if schedule.is_empty() {
        println!("{}", format!("No lessons on {day}.").yellow());
        return;
    }

    println!("{}", format!("Today ({day}):").bold());
    for lesson in schedule {
        super::teaching::print_schedule_line(lesson);
    }
}
