//! Invoice commands

use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;
use colored::*;
use edumanage_client::EduManageClient;
use edumanage_core::domain::invoice::{Invoice, InvoiceStatus};
use edumanage_core::dto::invoice::{InvoiceForm, InvoiceQuery};

use super::output::{date, or_dash, print_empty, print_found, print_json, rupiah};
use crate::config::Config;

/// Invoice subcommands
#[derive(Subcommand)]
pub enum InvoiceCommands {
    /// List invoices
    List {
        /// Unpaid, Paid, "Partially Paid", Overdue or Cancelled
        #[arg(short, long)]
        status: Option<InvoiceStatus>,

        /// Only invoices of this student
        #[arg(long)]
        student: Option<i64>,
    },
    /// List the signed-in student's own invoices
    Mine,
    /// Issue an invoice to a student
    Create {
        /// Student ID
        #[arg(long)]
        student: i64,

        /// Total amount in rupiah
        #[arg(long)]
        total: i64,

        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: NaiveDate,

        /// Invoice date as YYYY-MM-DD; defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Amount already paid
        #[arg(long, default_value_t = 0)]
        paid: i64,

        #[arg(long, default_value = "Unpaid")]
        status: InvoiceStatus,

        #[arg(long)]
        notes: Option<String>,
    },
}

/// Handle invoice commands
pub async fn handle_invoice_command(
    command: InvoiceCommands,
    client: &EduManageClient,
    config: &Config,
) -> Result<()> {
    match command {
        InvoiceCommands::List { status, student } => {
            let query = InvoiceQuery {
                status,
                student_id: student,
            };
            let invoices = client.list_invoices(&query).await?;
            print_invoices(&invoices, config)
        }
        InvoiceCommands::Mine => {
            let invoices = client.my_invoices().await?;
            print_invoices(&invoices, config)
        }
        InvoiceCommands::Create {
            student,
            total,
            due,
            date,
            paid,
            status,
            notes,
        } => {
            let form = InvoiceForm {
                student_id: student,
                invoice_date: date,
                due_date: due,
                total_amount: total,
                amount_paid: paid,
                status,
                notes,
            };
            let invoice = client.create_invoice(&form).await?;
            if config.json {
                return print_json(&invoice);
            }

            println!("{}", "✓ Invoice created successfully!".green().bold());
            println!();
            print_invoice(&invoice);
            Ok(())
        }
    }
}

fn print_invoices(invoices: &[Invoice], config: &Config) -> Result<()> {
    if config.json {
        return print_json(&invoices);
    }

    if invoices.is_empty() {
        print_empty("invoices");
        return Ok(());
    }

    print_found(invoices.len(), "invoice");
    for invoice in invoices {
        print_invoice(invoice);
    }

    let outstanding: i64 = invoices
        .iter()
        .filter(|i| i.status != InvoiceStatus::Cancelled)
        .map(|i| i.total_amount - i.amount_paid)
        .sum();
    println!("{}", format!("Outstanding: {}", rupiah(outstanding)).bold());

    Ok(())
}

fn print_invoice(invoice: &Invoice) {
    println!(
        "  {} Invoice {} {}",
        "▸".cyan(),
        format!("#{}", invoice.id).dimmed(),
        colorize_status(invoice.status)
    );
    println!("    Student:  {}", invoice.student_id.to_string().dimmed());
    println!("    Issued:   {}", date(invoice.invoice_date));
    println!("    Due:      {}", date(invoice.due_date));
    println!("    Total:    {}", rupiah(invoice.total_amount));
    println!("    Paid:     {}", rupiah(invoice.amount_paid));
    println!("    Notes:    {}", or_dash(invoice.notes.as_deref()));
    println!();
}

fn colorize_status(status: InvoiceStatus) -> ColoredString {
    match status {
        InvoiceStatus::Paid => status.as_str().green(),
        InvoiceStatus::PartiallyPaid => status.as_str().cyan(),
        InvoiceStatus::Unpaid => status.as_str().yellow(),
        InvoiceStatus::Overdue => status.as_str().red(),
        InvoiceStatus::Cancelled => status.as_str().dimmed(),
    }
}
