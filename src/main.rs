use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use petpaw_dashboard::analytics::{Period, PeriodAnchor, TimeFrame};
use petpaw_dashboard::models::{AppointmentStatus, ProfilePicture, VeterinarianForm};
use petpaw_dashboard::pages::{
    AppointmentsPage, GroomingPage, HotelPage, MedicalRecordsPage, OrdersPage, Page, RefillsPage, VeterinariansPage,
};
use petpaw_dashboard::{ApiClient, AuthHolder, Credentials, DashboardConfig, DashboardError, FileStore, Session};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "petpaw", about = "PetPaw shop-owner dashboard")]
struct Cli {
    /// Backend base URL.
    #[arg(long, env = "PETPAW_API_URL")]
    api_url: Option<String>,

    #[arg(long, env = "PETPAW_SESSION_FILE")]
    session_file: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PETPAW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Whoami,
    Orders(OrdersCommand),
    Earnings(EarningsArgs),
    Appointments(AppointmentsCommand),
    Records(RecordsCommand),
    Refills(RefillsCommand),
    Vets(VetsCommand),
    Grooming(GroomingCommand),
    Hotel(HotelCommand),
}

#[derive(Args, Debug)]
struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Subcommand, Debug)]
enum OrdersSubcommand {
    Pending,
    History,
    Accept {
        order_id: i64,
    },
    Decline {
        order_id: i64,
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Args, Debug)]
struct EarningsArgs {
    #[arg(long, default_value = "month")]
    period: Period,

    #[arg(long, default_value = "now")]
    anchor: PeriodAnchor,

    #[arg(long, help = "Print the daily series as Date,Amount CSV")]
    csv: bool,
}

#[derive(Args, Debug)]
struct AppointmentsCommand {
    #[command(subcommand)]
    command: AppointmentsSubcommand,
}

#[derive(Subcommand, Debug)]
enum AppointmentsSubcommand {
    List,
    /// `SCHEDULED → CONFIRMED`.
    Confirm {
        appointment_id: i64,
    },
    /// Customer arrived: `CONFIRMED → IN_PROGRESS`.
    Start {
        appointment_id: i64,
    },
    Complete {
        appointment_id: i64,
    },
    /// Move to whatever step follows the current status.
    Advance {
        appointment_id: i64,
    },
    Decline {
        appointment_id: i64,
        #[arg(long)]
        reason: String,
    },
    Delete {
        appointment_id: i64,
    },
}

#[derive(Args, Debug)]
struct RecordsCommand {
    #[command(subcommand)]
    command: RecordsSubcommand,
}

#[derive(Subcommand, Debug)]
enum RecordsSubcommand {
    List,
    Delete { pet_id: i64, record_id: i64 },
}

#[derive(Args, Debug)]
struct RefillsCommand {
    #[command(subcommand)]
    command: RefillsSubcommand,
}

#[derive(Subcommand, Debug)]
enum RefillsSubcommand {
    List {
        #[arg(long, help = "Only prescriptions with pending refill requests")]
        pending: bool,
    },
    Approve {
        request_id: i64,
    },
    Deny {
        request_id: i64,
    },
    Delete {
        request_id: i64,
    },
}

#[derive(Args, Debug)]
struct VetsCommand {
    #[command(subcommand)]
    command: VetsSubcommand,
}

#[derive(Subcommand, Debug)]
enum VetsSubcommand {
    List,
    Create(VetArgs),
    Update {
        veterinarian_id: i64,
        #[command(flatten)]
        vet: VetArgs,
    },
    Delete {
        veterinarian_id: i64,
    },
}

#[derive(Args, Debug)]
struct VetArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    specialization: String,
    #[arg(long, help = "Profile picture (png, jpeg, gif or webp)")]
    picture: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GroomingCommand {
    #[command(subcommand)]
    command: GroomingSubcommand,
}

#[derive(Subcommand, Debug)]
enum GroomingSubcommand {
    List,
    Completed,
    Accept {
        booking_id: i64,
    },
    Decline {
        booking_id: i64,
        #[arg(long, default_value = "Unavailable")]
        reason: String,
    },
    Advance {
        booking_id: i64,
    },
    Cancel {
        booking_id: i64,
    },
    Delete {
        booking_id: i64,
    },
    Slots {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long = "service", required = true, value_delimiter = ',')]
        services: Vec<i64>,
    },
    Analytics,
}

#[derive(Args, Debug)]
struct HotelCommand {
    #[command(subcommand)]
    command: HotelSubcommand,
}

#[derive(Subcommand, Debug)]
enum HotelSubcommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
    },
    Accept {
        booking_id: i64,
    },
    Decline {
        booking_id: i64,
        #[arg(long)]
        reason: Option<String>,
    },
    Delete {
        booking_id: i64,
    },
    Analytics {
        #[arg(long, default_value = "year")]
        frame: TimeFrame,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.api_url.as_deref(), cli.session_file.as_deref())?;
    let mut auth = AuthHolder::restore(FileStore::new(config.session_file.clone()))?;
    let anonymous = ApiClient::new(&config)?;

    match cli.command {
        Command::Login { email, password } => {
            let session = auth.login(&anonymous, &Credentials::new(email, password)).await?;
            print_json(&identity(&session))
        }
        Command::Logout => {
            auth.logout()?;
            print_json(&json!({ "logged_out": true }))
        }
        Command::Whoami => {
            let session = auth.current().ok_or(DashboardError::NotLoggedIn)?;
            print_json(&identity(session))
        }
        Command::Orders(orders) => run_orders(owner_client(&auth, &anonymous)?, orders).await,
        Command::Earnings(args) => run_earnings(owner_client(&auth, &anonymous)?, args).await,
        Command::Appointments(appointments) => {
            run_appointments(owner_client(&auth, &anonymous)?, appointments).await
        }
        Command::Records(records) => run_records(owner_client(&auth, &anonymous)?, records).await,
        Command::Refills(refills) => run_refills(owner_client(&auth, &anonymous)?, refills).await,
        Command::Vets(vets) => run_vets(owner_client(&auth, &anonymous)?, vets).await,
        Command::Grooming(grooming) => run_grooming(owner_client(&auth, &anonymous)?, grooming).await,
        Command::Hotel(hotel) => run_hotel(owner_client(&auth, &anonymous)?, hotel).await,
    }
}

/// Every page command needs a shop-owner session.
fn owner_client(auth: &AuthHolder<FileStore>, anonymous: &ApiClient) -> Result<ApiClient, CliError> {
    Ok(anonymous.with_session(auth.require_shop_owner()?))
}

fn load_config(api_url: Option<&str>, session_file: Option<&str>) -> Result<DashboardConfig, CliError> {
    let mut config = DashboardConfig::from_env()?;
    if let Some(api_url) = api_url {
        config = config.with_api_url(api_url)?;
    }
    if let Some(session_file) = session_file {
        config = config.with_session_file(session_file)?;
    }
    Ok(config)
}

fn identity(session: &Session) -> serde_json::Value {
    json!({
        "id": session.id,
        "role": session.role,
        "shop_owner": session.is_shop_owner(),
    })
}

async fn run_orders(client: ApiClient, orders: OrdersCommand) -> Result<(), CliError> {
    let mut page = OrdersPage::new(client);
    page.reload().await?;
    match orders.command {
        OrdersSubcommand::Pending => print_json(&page.pending_views()),
        OrdersSubcommand::History => print_json(&page.history_views()),
        OrdersSubcommand::Accept { order_id } => {
            page.accept(order_id).await?;
            print_json(&page.pending_views())
        }
        OrdersSubcommand::Decline { order_id, reason } => {
            page.decline(order_id, reason).await?;
            print_json(&page.pending_views())
        }
    }
}

async fn run_earnings(client: ApiClient, args: EarningsArgs) -> Result<(), CliError> {
    let mut page = OrdersPage::new(client);
    page.reload().await?;
    let report = page.earnings(args.period, args.anchor, Utc::now());
    if args.csv {
        println!("{}", report.csv());
        return Ok(());
    }
    print_json(&report)
}

async fn run_appointments(client: ApiClient, appointments: AppointmentsCommand) -> Result<(), CliError> {
    let mut page = AppointmentsPage::new(client);
    page.reload().await?;
    match appointments.command {
        AppointmentsSubcommand::List => {}
        AppointmentsSubcommand::Confirm { appointment_id } => {
            page.set_status(appointment_id, AppointmentStatus::Confirmed).await?;
        }
        AppointmentsSubcommand::Start { appointment_id } => {
            page.set_status(appointment_id, AppointmentStatus::InProgress).await?;
        }
        AppointmentsSubcommand::Complete { appointment_id } => {
            page.set_status(appointment_id, AppointmentStatus::Completed).await?;
        }
        AppointmentsSubcommand::Advance { appointment_id } => {
            page.advance(appointment_id).await?;
        }
        AppointmentsSubcommand::Decline { appointment_id, reason } => {
            page.decline(appointment_id, &reason).await?;
        }
        AppointmentsSubcommand::Delete { appointment_id } => page.delete(appointment_id).await?,
    }
    print_json(&page.appointments())
}

async fn run_records(client: ApiClient, records: RecordsCommand) -> Result<(), CliError> {
    let mut page = MedicalRecordsPage::new(client);
    match records.command {
        RecordsSubcommand::List => page.reload().await?,
        RecordsSubcommand::Delete { pet_id, record_id } => page.delete(pet_id, record_id).await?,
    }
    print_json(&page.records())
}

async fn run_refills(client: ApiClient, refills: RefillsCommand) -> Result<(), CliError> {
    let mut page = RefillsPage::new(client);
    match refills.command {
        RefillsSubcommand::List { pending: true } => {
            page.reload().await?;
            return print_json(&page.awaiting_review().collect::<Vec<_>>());
        }
        RefillsSubcommand::List { pending: false } => page.reload().await?,
        RefillsSubcommand::Approve { request_id } => page.approve(request_id).await?,
        RefillsSubcommand::Deny { request_id } => page.deny(request_id).await?,
        RefillsSubcommand::Delete { request_id } => page.delete_request(request_id).await?,
    }
    print_json(&page.prescriptions())
}

async fn run_vets(client: ApiClient, vets: VetsCommand) -> Result<(), CliError> {
    let mut page = VeterinariansPage::new(client);
    match vets.command {
        VetsSubcommand::List => page.reload().await?,
        VetsSubcommand::Create(vet) => {
            let created = page.create(&vet_form(vet).await?).await?;
            return print_json(&created);
        }
        VetsSubcommand::Update { veterinarian_id, vet } => {
            let updated = page.update(veterinarian_id, &vet_form(vet).await?).await?;
            return print_json(&updated);
        }
        VetsSubcommand::Delete { veterinarian_id } => page.delete(veterinarian_id).await?,
    }
    print_json(&page.veterinarians())
}

async fn vet_form(vet: VetArgs) -> Result<VeterinarianForm, CliError> {
    let profile_picture = match &vet.picture {
        Some(path) => Some(load_picture(path).await?),
        None => None,
    };
    Ok(VeterinarianForm {
        name: vet.name,
        email: vet.email,
        phone_number: vet.phone,
        specialization: vet.specialization,
        profile_picture,
    })
}

async fn load_picture(path: &Path) -> Result<ProfilePicture, CliError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CliError::Read { path: path.display().to_string(), source })?;
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("profile").to_owned();
    Ok(ProfilePicture { file_name, mime: image_mime(path).to_owned(), bytes })
}

fn image_mime(path: &Path) -> &'static str {
    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

async fn run_grooming(client: ApiClient, grooming: GroomingCommand) -> Result<(), CliError> {
    let mut page = GroomingPage::new(client);
    page.reload().await?;
    match grooming.command {
        GroomingSubcommand::List => {}
        GroomingSubcommand::Completed => return print_json(&page.completed()),
        GroomingSubcommand::Accept { booking_id } => page.accept(booking_id).await?,
        GroomingSubcommand::Decline { booking_id, reason } => page.decline(booking_id, &reason).await?,
        GroomingSubcommand::Advance { booking_id } => {
            page.advance(booking_id).await?;
        }
        GroomingSubcommand::Cancel { booking_id } => page.cancel(booking_id).await?,
        GroomingSubcommand::Delete { booking_id } => page.delete(booking_id).await?,
        GroomingSubcommand::Slots { date, services } => {
            return print_json(&page.available_time_slots(date, &services).await?);
        }
        GroomingSubcommand::Analytics => return print_json(&page.analytics()),
    }
    print_json(&page.current())
}

async fn run_hotel(client: ApiClient, hotel: HotelCommand) -> Result<(), CliError> {
    let mut page = HotelPage::new(client);
    page.reload().await?;
    match hotel.command {
        HotelSubcommand::List { search } => return print_json(&page.search(&search)),
        HotelSubcommand::Accept { booking_id } => page.accept(booking_id).await?,
        HotelSubcommand::Decline { booking_id, reason } => page.decline(booking_id, reason.as_deref()).await?,
        HotelSubcommand::Delete { booking_id } => page.delete(booking_id).await?,
        HotelSubcommand::Analytics { frame } => return print_json(&page.analytics(frame, Utc::now())),
    }
    print_json(&page.search(""))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
