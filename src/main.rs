use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use budgetpal::cli::{
    handle_backup_command, handle_budget_command, handle_category_command, handle_config_command,
    handle_summary_command, handle_transaction_command, BackupCommands, BudgetCommands,
    CategoryCommands, ConfigCommands, TransactionCommands,
};
use budgetpal::config::{paths::BudgetPalPaths, settings::Settings};
use budgetpal::services::PreferenceService;
use budgetpal::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budgetpal",
    version,
    about = "Personal budgeting from the command line",
    long_about = "BudgetPal records income and expenses, keeps a monthly budget split \
                  into category budgets, shows where the money went, and backs \
                  everything up to plain JSON files."
)]
struct Cli {
    /// Use this directory instead of the platform default
    #[arg(long, global = true, env = "BUDGETPAL_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly budget and category allocation commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Category commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Backup and restore commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show income, expenses and budget progress
    Summary {
        /// Month (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        period: Option<String>,
        /// Print only the alert marker and progress
        #[arg(long)]
        brief: bool,
    },

    /// Show or change configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Initialize BudgetPal with default settings
    Init,
}

fn main() -> Result<()> {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => BudgetPalPaths::with_base_dir(dir),
        None => BudgetPalPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::open(paths.clone(), settings.categories.clone())?;

    match cli.command {
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?
        }
        Some(Commands::Backup(cmd)) => handle_backup_command(&storage, cmd)?,
        Some(Commands::Summary { period, brief }) => {
            handle_summary_command(&storage, &settings, period.as_deref(), brief)?
        }
        Some(Commands::Config(cmd)) => handle_config_command(&storage, &settings, cmd)?,
        Some(Commands::Init) => {
            println!("Initializing BudgetPal at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            PreferenceService::new(&storage).complete_onboarding()?;
            println!("Initialization complete!");
            println!();
            println!("Expense categories: {}", settings.categories.expense.join(", "));
            println!("Income categories:  {}", settings.categories.income.join(", "));
            println!();
            println!("Next: set a monthly budget with 'budgetpal budget set <amount>'.");
        }
        None => {
            println!("BudgetPal - personal budgeting");
            println!();
            println!("Run 'budgetpal --help' for usage information.");
            if !paths.is_initialized() {
                println!("Run 'budgetpal init' to get started.");
            }
        }
    }

    Ok(())
}
