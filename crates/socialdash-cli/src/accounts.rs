//! `accounts` command handlers.
//!
//! `refresh` runs its accounts concurrently; a failed account is reported and
//! skipped, and the command fails only if every account failed.

use clap::Subcommand;
use futures::stream::{self, StreamExt};
use socialdash_client::{AccountFilter, DashboardClient};
use socialdash_core::{AccountId, AccountInput, CollectionId, Platform};
use socialdash_presenter::format_compact;

/// Concurrent requests during `accounts refresh`.
const REFRESH_CONCURRENCY: usize = 4;

#[derive(Debug, Subcommand)]
pub enum AccountsCommands {
    /// List tracked accounts
    List {
        /// tiktok or instagram
        #[arg(long)]
        platform: Option<Platform>,
        /// Only accounts in this collection
        #[arg(long)]
        collection: Option<CollectionId>,
        /// Maximum number of accounts to show
        #[arg(long, default_value = "100")]
        limit: u32,
    },
    /// Submit usernames or profile links for scraping
    Add {
        /// Profile URLs, `ig:`/`tt:` prefixed handles, or bare handles
        #[arg(required = true)]
        inputs: Vec<String>,
    },
    /// Stop tracking an account
    Delete { id: AccountId },
    /// Recompute totals for one or more accounts
    Refresh {
        #[arg(required = true)]
        ids: Vec<AccountId>,
    },
}

pub(crate) async fn run(
    client: &DashboardClient,
    command: AccountsCommands,
) -> anyhow::Result<()> {
    match command {
        AccountsCommands::List {
            platform,
            collection,
            limit,
        } => {
            let filter = AccountFilter {
                platform,
                collection_id: collection,
                limit,
                ..AccountFilter::default()
            };
            run_accounts_list(client, &filter).await
        }
        AccountsCommands::Add { inputs } => run_accounts_add(client, &inputs).await,
        AccountsCommands::Delete { id } => {
            let message = client.delete_account(id).await?;
            println!("{message}");
            Ok(())
        }
        AccountsCommands::Refresh { ids } => run_accounts_refresh(client, &ids).await,
    }
}

async fn run_accounts_list(
    client: &DashboardClient,
    filter: &AccountFilter,
) -> anyhow::Result<()> {
    let accounts = client.accounts(filter).await?;
    if accounts.is_empty() {
        println!("no accounts tracked; add some with `accounts add`");
        return Ok(());
    }

    println!(
        "{:<7}{:<11}{:<24}{:>8}{:>10}{:>11}  LAST SCRAPED",
        "ID", "PLATFORM", "ACCOUNT", "VIDEOS", "VIEWS", "FOLLOWERS"
    );
    for account in &accounts {
        println!(
            "{:<7}{:<11}{:<24}{:>8}{:>10}{:>11}  {}",
            account.id,
            account.platform.as_str(),
            crate::truncate(account.display_name(), 22),
            account.total_videos,
            format_compact(account.total_views),
            format_compact(account.total_followers),
            crate::fmt_date(account.last_scraped)
        );
    }
    Ok(())
}

/// Submits accounts for scraping.
///
/// Each input is classified locally first so the user sees which platform it
/// was read as; the backend still receives the raw entries.
///
/// # Errors
///
/// Returns an error if every input is blank or the submission fails.
async fn run_accounts_add(client: &DashboardClient, inputs: &[String]) -> anyhow::Result<()> {
    for raw in inputs {
        match AccountInput::parse(raw) {
            Some(input) => println!("  {} @{}", input.platform, input.username),
            None if raw.trim().is_empty() => {}
            None => println!("  {raw} (unrecognised; sent as-is)"),
        }
    }

    let ack = client.submit_accounts(inputs).await?;
    println!("{}", ack.message);
    if !ack.status.is_empty() {
        println!("status: {}", ack.status);
    }
    Ok(())
}

async fn run_accounts_refresh(client: &DashboardClient, ids: &[AccountId]) -> anyhow::Result<()> {
    let results: Vec<(AccountId, anyhow::Result<String>)> = stream::iter(ids.iter().copied())
        .map(|id| async move {
            let outcome = client
                .refresh_account(id)
                .await
                .map(|account| account.display_name().to_owned())
                .map_err(anyhow::Error::from);
            (id, outcome)
        })
        .buffer_unordered(REFRESH_CONCURRENCY)
        .collect()
        .await;

    let mut failed = 0_usize;
    for (id, outcome) in &results {
        match outcome {
            Ok(name) => println!("refreshed {id} ({name})"),
            Err(e) => {
                tracing::error!(account_id = *id, error = %e, "account refresh failed");
                eprintln!("error: failed to refresh account {id}: {e}");
                failed += 1;
            }
        }
    }

    if failed > 0 && failed == results.len() {
        anyhow::bail!("all {failed} account refreshes failed");
    }
    Ok(())
}
