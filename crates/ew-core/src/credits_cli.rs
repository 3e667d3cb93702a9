//! CLI commands for credit tracking.
//!
//! The tracker lives in memory, so each invocation starts from the
//! documented recurring issues.

use crate::credits::CreditTracker;
use crate::exit_codes::ExitCode;
use crate::output::{self, dollars};
use clap::{Args, Subcommand};
use ew_common::OutputFormat;
use ew_config::Settings;

/// Arguments for the credits command
#[derive(Args, Debug)]
pub struct CreditsArgs {
    #[command(subcommand)]
    pub command: CreditsCommands,
}

#[derive(Subcommand, Debug)]
pub enum CreditsCommands {
    /// Full credit report
    Report,
    /// Balance and claim instructions
    Status,
    /// Record a work session and show the credit it earned
    Track {
        /// Issue descriptions worked on
        #[arg(long = "issue", value_name = "TEXT", required = true)]
        issues: Vec<String>,
        /// Minutes spent
        #[arg(long)]
        minutes: u32,
    },
    /// Mark a recurring issue as permanently fixed
    Fix {
        /// Issue id (e.g. double_stringify_json)
        issue_id: String,
        /// What made the fix permanent
        #[arg(long)]
        solution: String,
    },
}

pub fn run_credits(format: &OutputFormat, settings: &Settings, args: &CreditsArgs) -> ExitCode {
    let mut tracker = CreditTracker::from_settings(&settings.credits);
    match &args.command {
        CreditsCommands::Report => {
            let report = tracker.credit_report();
            match format {
                OutputFormat::Json => output::print_json("credits report", &report),
                OutputFormat::Summary => {
                    println!(
                        "# Credits: {} owed at {}/hour",
                        dollars(report.summary.total_credit_owed),
                        dollars(report.summary.credit_rate)
                    );
                    println!();
                    for i in &report.recurring_issues {
                        println!(
                            "  {:<32} x{:<3} {}",
                            i.issue_id,
                            i.frequency,
                            dollars(i.total_credit_owed)
                        );
                    }
                }
            }
        }
        CreditsCommands::Status => {
            let status = tracker.credit_status();
            match format {
                OutputFormat::Json => output::print_json("credits status", &status),
                OutputFormat::Summary => {
                    println!("{}", status.message);
                    println!("{}", status.claim_instructions);
                }
            }
        }
        CreditsCommands::Track { issues, minutes } => {
            let id = tracker.track_work_session(issues, *minutes);
            let session = tracker.sessions().last().cloned();
            match format {
                OutputFormat::Json => output::print_json(
                    "credits track",
                    serde_json::json!({
                        "session": session,
                        "total_credit_owed": tracker.total_credit_owed(),
                    }),
                ),
                OutputFormat::Summary => {
                    let credit = session.map(|s| s.user_credit).unwrap_or_default();
                    println!("{id}: earned {}", dollars(credit));
                    println!("total owed: {}", dollars(tracker.total_credit_owed()));
                }
            }
        }
        CreditsCommands::Fix { issue_id, solution } => {
            let issue = match tracker.mark_permanently_fixed(issue_id, solution) {
                Ok(issue) => issue.clone(),
                Err(e) => return output::fail("credits fix", &e),
            };
            match format {
                OutputFormat::Json => output::print_json("credits fix", &issue),
                OutputFormat::Summary => {
                    println!("{}: permanently fixed", issue.issue_id);
                    println!("final credit: {}", dollars(issue.total_credit_owed));
                }
            }
        }
    }
    ExitCode::Clean
}
