use clap::{Parser, Subcommand};
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use tracing::info;

use auth_harness::browser::{WebDriverConfig, WebDriverSession};
use auth_harness::config;
use auth_harness::credentials::read_credentials;
use auth_harness::harness::{run_flow, FlowSpec, RunContext};
use auth_harness::release::resolve_release_tag;

/// Auth Harness - data-driven browser testing of signup/login flows
#[derive(Parser, Debug)]
#[command(
    name = "auth-harness",
    about = "Data-driven browser testing of signup/login flows with toast-based outcome classification",
    after_help = "ENVIRONMENT VARIABLES:\n\
        AUTH_HARNESS_WEBDRIVER_URL    WebDriver endpoint URL\n\
        AUTH_HARNESS_BASE_URL         Base URL of the application under test\n\
        AUTH_HARNESS_WAIT_TIMEOUT     Bounded element wait in seconds\n\
        AUTH_HARNESS_SCREENSHOT_DIR   Root directory for screenshot output\n\
        AUTH_HARNESS_LOG_FILE         Log file, truncated each run\n\
        AUTH_HARNESS_DATA_DIR         Directory holding credential CSV files"
)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the signup flow for every credential row in the data file
    Signup {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Load and report login credentials (the login flow drives no browser)
    Login {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(clap::Args, Debug)]
struct CommonArgs {
    /// Credential CSV file (default: registerData.csv / loginData.csv in the data directory)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Base URL of the application under test
    #[arg(long, env = "AUTH_HARNESS_BASE_URL", default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// WebDriver endpoint URL
    #[arg(long, env = "AUTH_HARNESS_WEBDRIVER_URL", default_value = config::DEFAULT_WEBDRIVER_URL)]
    webdriver: String,

    /// Bounded element wait in seconds
    #[arg(long, env = "AUTH_HARNESS_WAIT_TIMEOUT", default_value_t = config::DEFAULT_WAIT_TIMEOUT)]
    timeout: u64,

    /// Root directory for screenshot output
    #[arg(short, long, env = "AUTH_HARNESS_SCREENSHOT_DIR", default_value = config::DEFAULT_SCREENSHOT_DIR)]
    output: PathBuf,

    /// Log file, truncated each run
    #[arg(long, env = "AUTH_HARNESS_LOG_FILE", default_value = config::DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Run with a visible browser window instead of headless
    #[arg(long)]
    headed: bool,

    /// Output the run report as JSON
    #[arg(long)]
    json: bool,
}

impl CommonArgs {
    /// Resolve the credential file: explicit flag, or the flow's conventional
    /// file name inside the configured data directory.
    fn data_file(&self, default_name: &str) -> PathBuf {
        self.data.clone().unwrap_or_else(|| {
            PathBuf::from(config::get().output.data_dir.clone()).join(default_name)
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    match args.command {
        Some(Commands::Signup { common }) => run_signup(common).await?,

        Some(Commands::Login { common }) => run_login(common)?,

        None => {
            println!("Auth Harness - data-driven browser testing of signup/login flows");
            println!();
            println!("Usage: auth-harness <COMMAND>");
            println!();
            println!("Commands:");
            println!("  signup  Run the signup flow for every credential row");
            println!("  login   Load and report login credentials");
            println!();
            println!("Run with --help for more information.");
        }
    }

    Ok(())
}

async fn run_signup(common: CommonArgs) -> Result<(), Box<dyn Error>> {
    init_logging(&common.log_file)?;

    let data_file = common.data_file("registerData.csv");
    let rows = read_credentials(&data_file)?;
    info!(file = %data_file.display(), rows = rows.len(), "Loaded credential rows");

    let spec = FlowSpec::signup(&common.base_url);
    let ctx = RunContext::new(resolve_release_tag(), &common.output);

    let wd_config = WebDriverConfig::new(&common.webdriver)
        .wait_timeout(Duration::from_secs(common.timeout))
        .headed(common.headed);
    let mut driver = WebDriverSession::connect(&wd_config).await?;

    let report = run_flow(&mut driver, &spec, &rows, &ctx).await?;

    if common.json {
        println!("{}", serde_json::to_string_pretty(&report.summary)?);
    } else {
        println!(
            "Run completed: {} of {} cases classified",
            report.outcomes.len(),
            rows.len()
        );
        for (index, outcome) in &report.outcomes {
            println!("  {}: {}", index, outcome);
        }
        println!();
        println!("Screenshots: {}", ctx.release_dir().display());
        println!("Log: {}", common.log_file.display());
    }

    Ok(())
}

fn run_login(common: CommonArgs) -> Result<(), Box<dyn Error>> {
    init_logging(&common.log_file)?;

    let data_file = common.data_file("loginData.csv");
    let rows = read_credentials(&data_file)?;
    info!(file = %data_file.display(), rows = rows.len(), "Loaded login credential rows");

    let spec = FlowSpec::login(&common.base_url);

    if common.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "flow": spec.name,
                "url": spec.url,
                "rows": rows.len(),
            }))?
        );
    } else {
        println!(
            "Loaded {} login credential rows from {}",
            rows.len(),
            data_file.display()
        );
        println!(
            "Flow '{}' targets {} with {} fields; no submission is performed.",
            spec.name,
            spec.url,
            spec.fields.len()
        );
    }

    Ok(())
}

/// Configure logging to the given file, truncated each run. Destination and
/// verbosity are run options, not module-load side effects.
fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
