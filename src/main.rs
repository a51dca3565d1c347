use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_appender::rolling;

use hrm_payroll::config::Config;
use hrm_payroll::model::department::Department;
use hrm_payroll::model::leave_request::LeaveType;
use hrm_payroll::models::{EmployeeQuery, NewLeaveRequest};
use hrm_payroll::payroll::{HistoryFilter, render_payslip};
use hrm_payroll::report::{self, export_rows};
use hrm_payroll::utils::format::format_currency;
use hrm_payroll::{AppState, HrmError, SqliteStore};

#[derive(Parser)]
#[command(name = "hrm", version, about = "Employee records, payroll runs and HR reports")]
struct Cli {
    /// Record database; overrides HRM_DB_PATH
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List employees
    Employees {
        #[arg(long)]
        department: Option<Department>,
        #[arg(long)]
        search: Option<String>,
    },
    /// List users available to log in as
    Users,
    Login {
        user_id: String,
    },
    Logout,
    Dashboard,
    #[command(subcommand)]
    Leave(LeaveCommand),
    #[command(subcommand)]
    Attendance(AttendanceCommand),
    #[command(subcommand)]
    Payroll(PayrollCommand),
    #[command(subcommand)]
    Report(ReportCommand),
}

#[derive(Subcommand)]
enum LeaveCommand {
    List,
    Request {
        employee_id: String,
        #[arg(long = "type")]
        leave_type: LeaveType,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
        #[arg(long)]
        reason: String,
    },
    Approve {
        leave_id: String,
    },
    Reject {
        leave_id: String,
    },
}

#[derive(Subcommand)]
enum AttendanceCommand {
    In { employee_id: String },
    Out { employee_id: String },
    Today,
}

#[derive(Subcommand)]
enum PayrollCommand {
    /// Issue payslips for every employee
    Run {
        #[arg(long)]
        period: String,
    },
    /// Payment history for one employee, newest first
    History {
        employee_id: String,
        #[arg(long)]
        period: Option<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    Payslip {
        payslip_id: String,
    },
    /// Master payroll item catalog
    Items,
}

#[derive(Subcommand)]
enum ReportCommand {
    Payroll {
        /// Defaults to the most recent period
        #[arg(long)]
        period: Option<String>,
        #[arg(long)]
        export: bool,
        #[arg(long)]
        name: Option<String>,
    },
    Leave {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        export: bool,
        #[arg(long)]
        name: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "hrm.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<HrmError>() {
                Some(notice) if notice.is_user_notice() => eprintln!("{notice}"),
                _ => {
                    error!(error = %e, "Command failed");
                    eprintln!("error: {e:#}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &Config) -> Result<()> {
    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let mut state = AppState::load(store);
    let currency = config.currency.as_str();

    match command {
        Command::Employees { department, search } => {
            let query = EmployeeQuery { department, search };
            for emp in state.list_employees(&query) {
                println!(
                    "{:<8} {:<8} {:<22} {:<12} {:<20} {:>16}",
                    emp.id,
                    emp.employee_id,
                    emp.full_name(),
                    emp.department.to_string(),
                    emp.position,
                    format_currency(emp.salary, currency)
                );
            }
        }
        Command::Users => {
            for user in state.users() {
                let marker = match state.current_user() {
                    Some(current) if current.id == user.id => "*",
                    _ => " ",
                };
                println!("{marker} {:<8} {:<20} {}", user.id, user.username, user.role);
            }
        }
        Command::Login { user_id } => {
            let user = state.login(&user_id)?;
            println!("Logged in as {} ({})", user.username, user.role);
        }
        Command::Logout => {
            state.logout()?;
            println!("Logged out");
        }
        Command::Dashboard => {
            let summary = state.dashboard();
            println!("Employees:              {}", summary.employee_count);
            println!("Pending leave requests: {}", summary.pending_leave_requests);
            println!("Open positions:         {}", summary.open_positions);
            for (dept, count) in summary.department_distribution {
                println!("  {:<12} {}", dept.to_string(), count);
            }
        }
        Command::Leave(cmd) => run_leave(cmd, &mut state)?,
        Command::Attendance(cmd) => run_attendance(cmd, &mut state)?,
        Command::Payroll(cmd) => run_payroll(cmd, &mut state, currency)?,
        Command::Report(cmd) => run_report(cmd, &state, config)?,
    }

    Ok(())
}

fn run_leave(cmd: LeaveCommand, state: &mut AppState<SqliteStore>) -> Result<()> {
    match cmd {
        LeaveCommand::List => {
            for r in state.visible_leave_requests() {
                println!(
                    "{:<8} {:<16} {:<10} {} -> {} {:<9} {}",
                    r.id,
                    r.employee_name,
                    r.leave_type.to_string(),
                    r.start_date,
                    r.end_date,
                    r.status.to_string(),
                    r.reason
                );
            }
        }
        LeaveCommand::Request {
            employee_id,
            leave_type,
            from,
            to,
            reason,
        } => {
            let request = state.add_leave_request(NewLeaveRequest {
                employee_id,
                leave_type,
                start_date: from,
                end_date: to,
                reason,
            })?;
            println!("Leave request {} submitted ({})", request.id, request.status);
        }
        LeaveCommand::Approve { leave_id } => {
            state.approve_leave(&leave_id)?;
            println!("Leave approved");
        }
        LeaveCommand::Reject { leave_id } => {
            state.reject_leave(&leave_id)?;
            println!("Leave rejected");
        }
    }
    Ok(())
}

fn run_attendance(cmd: AttendanceCommand, state: &mut AppState<SqliteStore>) -> Result<()> {
    let now = Utc::now();
    match cmd {
        AttendanceCommand::In { employee_id } => {
            let record = state.clock_in(&employee_id, now)?;
            println!("{} clocked in at {}", record.employee_name, record.clock_in.format("%H:%M"));
        }
        AttendanceCommand::Out { employee_id } => {
            let record = state.clock_out(&employee_id, now)?;
            println!("{} clocked out", record.employee_name);
        }
        AttendanceCommand::Today => {
            for r in state.attendance_for_day(now.date_naive()) {
                let out = r
                    .clock_out
                    .map(|t| t.format("%H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<22} {} {}", r.employee_name, r.clock_in.format("%H:%M"), out);
            }
        }
    }
    Ok(())
}

fn run_payroll(cmd: PayrollCommand, state: &mut AppState<SqliteStore>, currency: &str) -> Result<()> {
    match cmd {
        PayrollCommand::Run { period } => {
            let records = state.run_payroll(&period, Utc::now())?;
            info!(period = %period, employees = records.len(), "Payroll run from CLI");
            println!(
                "Payroll run for {} completed for {} employees.",
                period.trim(),
                records.len()
            );
        }
        PayrollCommand::History {
            employee_id,
            period,
            from,
            to,
        } => {
            let filter = HistoryFilter {
                period_contains: period,
                issued_from: from,
                issued_to: to,
            };
            let history = state.payment_history(&employee_id, &filter);
            if history.is_empty() {
                println!("No payment history found for the selected filters.");
            }
            for r in history {
                println!(
                    "{:<40} {:<16} {} {:>16} {:>16} {:>16}",
                    r.id,
                    r.pay_period,
                    r.date_issued.format("%Y-%m-%d"),
                    format_currency(r.gross_pay, currency),
                    format_currency(r.total_deductions, currency),
                    format_currency(r.net_pay, currency)
                );
            }
        }
        PayrollCommand::Payslip { payslip_id } => {
            let record = state.payslip(&payslip_id)?;
            print!("{}", render_payslip(record, currency));
        }
        PayrollCommand::Items => {
            for item in state.master_items() {
                println!(
                    "{:<6} {:<24} {:<10} {}",
                    item.code,
                    item.description,
                    item.item_type.to_string(),
                    item.period
                );
            }
        }
    }
    Ok(())
}

fn run_report(cmd: ReportCommand, state: &AppState<SqliteStore>, config: &Config) -> Result<()> {
    let currency = config.currency.as_str();
    match cmd {
        ReportCommand::Payroll {
            period,
            export,
            name,
        } => {
            let period = period.or_else(|| state.payslips().pay_periods().into_iter().next());
            let summary = report::build_payroll_summary(state.payslips().records(), period.as_deref());

            for row in &summary.rows {
                println!(
                    "{:<16} {:<22} {:>16} {:>16} {:>16} {}",
                    row.pay_period,
                    row.employee_name,
                    format_currency(row.gross_pay, currency),
                    format_currency(row.deductions, currency),
                    format_currency(row.net_pay, currency),
                    row.date_issued
                );
            }
            println!(
                "Totals: gross {}  deductions {}  net {}",
                format_currency(summary.totals.sum_gross, currency),
                format_currency(summary.totals.sum_deductions, currency),
                format_currency(summary.totals.sum_net, currency)
            );

            if export {
                let file_name = name.unwrap_or_else(|| report::payroll_export_name(period.as_deref()));
                let path = export_rows(&summary.rows, &file_name, &config.export_dir)?;
                println!("Exported {}", path.display());
            }
        }
        ReportCommand::Leave {
            from,
            to,
            export,
            name,
        } => {
            let rows = report::build_leave_report(state.leave_requests(), from, to);
            for row in &rows {
                println!(
                    "{:<22} {:<10} {} -> {} {}",
                    row.employee_name,
                    row.leave_type.to_string(),
                    row.start_date,
                    row.end_date,
                    row.status
                );
            }

            if export {
                let file_name = name.unwrap_or_else(|| report::leave_export_name(from, to));
                let path = export_rows(&rows, &file_name, &config.export_dir)?;
                println!("Exported {}", path.display());
            }
        }
    }
    Ok(())
}
