//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use std::path::PathBuf;

use chrono::Local;
use clap::Subcommand;

use crate::backup::{BackupManager, RestoreManager};
use crate::error::{BudgetPalError, BudgetPalResult, CodecError};
use crate::storage::Storage;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup
    Create,

    /// List all available backups, newest first
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Restore from a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show what a backup contains without restoring it
    Info {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,
    },
}

/// Handle a backup command
pub fn handle_backup_command(storage: &Storage, cmd: BackupCommands) -> BudgetPalResult<()> {
    let backup_dir = storage.paths().backup_dir();
    let manager = BackupManager::new(storage, backup_dir.clone());
    let restore_manager = RestoreManager::new(storage, backup_dir);

    match cmd {
        BackupCommands::Create => {
            println!("Creating backup...");
            let backup_path = manager.create_backup()?;
            println!("Backup created: {}", file_name(&backup_path));
            println!("Location: {}", backup_path.display());
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: budgetpal backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            for (i, backup) in backups.iter().enumerate() {
                let age_str = backup
                    .created_at
                    .map(|created| format_duration(Local::now().signed_duration_since(created)))
                    .unwrap_or_else(|| "unknown".to_string());

                if verbose {
                    let created = backup
                        .created_at
                        .map(|c| c.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
                        .unwrap_or_else(|| "unknown".to_string());
                    println!(
                        "{}. {}\n   Created: {}\n   Size: {}\n   Age: {}\n",
                        i + 1,
                        backup.filename,
                        created,
                        format_size(backup.size_bytes),
                        age_str,
                    );
                } else {
                    println!(
                        "  {}. {} ({} ago, {})",
                        i + 1,
                        backup.filename,
                        age_str,
                        format_size(backup.size_bytes),
                    );
                }
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = resolve_backup_path(&manager, &backup)?;
            let info = restore_manager.inspect(&backup_path)?;

            println!("Backup Information");
            println!("==================");
            println!("File: {}", backup_path.display());
            println!(
                "Created: {}",
                info.backup_date
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
            );
            println!("Contents: {}", info.summary());
            println!();

            if !force {
                println!("WARNING: This will replace ALL current transactions!");
                println!("To proceed, run again with --force flag:");
                println!("  budgetpal backup restore {} --force", backup);
                return Ok(());
            }

            // Create a backup of current data before restoring
            println!("Creating backup of current data before restore...");
            let pre_restore_backup = manager.create_backup()?;
            println!("Pre-restore backup saved: {}", file_name(&pre_restore_backup));
            println!();

            println!("Restoring from backup...");
            let result = restore_manager.restore_from_file(&backup_path)?;

            println!("Restore complete!");
            println!("{}", result.summary());
        }

        BackupCommands::Info { backup } => {
            let backup_path = resolve_backup_path(&manager, &backup)?;
            let info = restore_manager.inspect(&backup_path)?;
            let metadata = std::fs::metadata(&backup_path)?;

            println!("Backup Details");
            println!("==============");
            println!("File: {}", backup_path.display());
            println!("Size: {}", format_size(metadata.len()));
            println!(
                "Created: {}",
                info.backup_date
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
            );
            println!();
            println!("Contents:");
            println!("  Transactions:     {}", info.transaction_count);
            println!("  Category budgets: {}", info.budget_count);
            if let Some(monthly) = info.monthly_budget {
                println!("  Monthly budget:   {}", monthly);
            }
            if let Some(currency) = &info.currency {
                println!("  Currency:         {}", currency);
            }
        }
    }

    Ok(())
}

/// Resolve a backup identifier to a full path
fn resolve_backup_path(manager: &BackupManager<'_, Storage>, backup: &str) -> BudgetPalResult<PathBuf> {
    // Handle "latest" keyword
    if backup.eq_ignore_ascii_case("latest") {
        return manager.latest()?.map(|b| b.path).ok_or_else(|| BudgetPalError::NotFound {
            entity_type: "Backup",
            identifier: "latest".to_string(),
        });
    }

    // Check if it's a filename in the backup directory
    let backup_path = manager.backup_dir().join(backup);
    if backup_path.is_file() {
        return Ok(backup_path);
    }

    // Check if it's a full path
    let path = PathBuf::from(backup);
    if path.is_file() {
        return Ok(path);
    }

    Err(CodecError::ArtifactNotFound(backup.to_string()).into())
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let seconds = duration.num_seconds();
    if seconds < 60 {
        format!("{}s", seconds.max(0))
    } else if seconds < 3600 {
        format!("{}m", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h", seconds / 3600)
    } else {
        format!("{}d", seconds / 86400)
    }
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
