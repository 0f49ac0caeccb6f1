use axum_prometheus::PrometheusMetricLayer;
use chrono::{Datelike, Local};
use clap::{Args, Parser, Subcommand};
use sci_archive::config::AppConfig;
use sci_archive::error::AppError;
use sci_archive::http::{app, AppState};
use sci_archive::registration::roster::RosterAudit;
use sci_archive::registration::{
    ordinal_suffix, validate_staff_id, RegistrationAssessment, RegistrationResolver,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "SCI Archive Registration Service",
    about = "Validate student registration numbers and audit rosters for the SCI project archive",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Check a single registration number
    Check(CheckArgs),
    /// Validate a staff identifier
    Staff(StaffArgs),
    /// Audit a roster CSV export
    Audit(AuditArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Registration number, e.g. ITE/D/01-06605/2023
    registration_number: String,
    /// Calendar year to assess against (defaults to this year)
    #[arg(long)]
    year: Option<i32>,
}

#[derive(Args, Debug)]
struct StaffArgs {
    /// Staff identifier, 4-10 digits
    staff_id: String,
}

#[derive(Args, Debug)]
struct AuditArgs {
    /// Roster CSV export with a "Registration Number" column
    #[arg(long)]
    csv: PathBuf,
    /// Calendar year to assess against (defaults to this year)
    #[arg(long)]
    year: Option<i32>,
    /// Print every audited row, not just the flagged ones
    #[arg(long)]
    list_rows: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Check(args) => run_check(args),
        Command::Staff(args) => run_staff_check(args),
        Command::Audit(args) => run_audit(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    sci_archive::telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
        resolver: Arc::new(RegistrationResolver::new(config.eligibility.clone())),
    };

    let app = app(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "registration service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let resolver = RegistrationResolver::new(config.eligibility);
    let year = args.year.unwrap_or_else(|| Local::now().year());

    let assessment = resolver.assess(&args.registration_number, year);
    render_assessment(&args.registration_number, year, &assessment);

    Ok(())
}

fn run_staff_check(args: StaffArgs) -> Result<(), AppError> {
    let outcome = validate_staff_id(&args.staff_id);
    if outcome.is_valid {
        println!("Staff ID accepted");
    } else if let Some(issue) = outcome.issue {
        println!("Staff ID rejected: {}", issue.summary());
    }

    Ok(())
}

fn run_audit(args: AuditArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let resolver = RegistrationResolver::new(config.eligibility);
    let year = args.year.unwrap_or_else(|| Local::now().year());

    let audit = RosterAudit::from_path(&args.csv, &resolver, year)?;
    let summary = audit.summary();

    println!("Roster audit ({} rows, evaluated against {year})", summary.total);
    println!(
        "Valid: {} | Submission eligible: {} | Flagged: {}",
        summary.valid, summary.submission_eligible, summary.flagged
    );

    if summary.flagged == 0 {
        println!("\nFlagged rows: none");
    } else {
        println!("\nFlagged rows");
        for entry in audit.flagged() {
            let who = entry.full_name.as_deref().unwrap_or("(no name)");
            let message = entry
                .assessment
                .message()
                .unwrap_or_else(|| "registration number rejected".to_string());
            println!(
                "- row {}: {} | {} | {}",
                entry.record, entry.registration_number, who, message
            );
        }
    }

    if args.list_rows {
        println!("\nAll rows");
        for entry in audit.entries() {
            render_row(entry.record, &entry.registration_number, &entry.assessment);
        }
    }

    Ok(())
}

fn render_assessment(raw: &str, year: i32, assessment: &RegistrationAssessment) {
    println!("Registration number: {raw}");
    println!("Evaluated against: {year}");

    match assessment.year_of_study {
        Some(year_of_study) => {
            if let Some(course) = &assessment.course_name {
                println!("Course: {course}");
            }
            println!(
                "Year of study: {} ({} year)",
                year_of_study,
                ordinal_suffix(year_of_study)
            );
        }
        None => println!("Registration number rejected"),
    }

    if assessment.can_submit {
        println!("Submission: allowed");
    } else {
        println!("Submission: not allowed");
    }

    if let Some(message) = assessment.message() {
        println!("Note: {message}");
    }
}

fn render_row(record: u64, registration_number: &str, assessment: &RegistrationAssessment) {
    let status = if assessment.can_submit {
        "eligible"
    } else if assessment.is_valid {
        "valid"
    } else {
        "rejected"
    };

    let detail = match (assessment.year_of_study, &assessment.course_name) {
        (Some(year), Some(course)) => format!("{} year, {course}", ordinal_suffix(year)),
        _ => assessment
            .message()
            .unwrap_or_else(|| "unrecognized".to_string()),
    };

    println!("- row {record}: {registration_number} | {status} | {detail}");
}
