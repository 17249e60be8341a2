//! `collections` command handlers.

use clap::Subcommand;
use socialdash_client::DashboardClient;
use socialdash_core::{AccountId, CollectionId, NewCollection};
use socialdash_presenter::{create_with_members, save_membership};

#[derive(Debug, Subcommand)]
pub enum CollectionsCommands {
    /// List collections
    List,
    /// Create a collection, optionally with initial members
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Hex color such as #ff0050
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// Account to add; repeat for several
        #[arg(long = "member")]
        members: Vec<AccountId>,
    },
    /// Rename a collection or change its description, color, or icon
    Update {
        id: CollectionId,
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// Set a collection's members to exactly the given accounts
    Members {
        id: CollectionId,
        account_ids: Vec<AccountId>,
    },
    /// Delete a collection
    Delete { id: CollectionId },
}

pub(crate) async fn run(
    client: &DashboardClient,
    command: CollectionsCommands,
) -> anyhow::Result<()> {
    match command {
        CollectionsCommands::List => run_collections_list(client).await,
        CollectionsCommands::Create {
            name,
            description,
            color,
            icon,
            members,
        } => {
            let new = NewCollection {
                name: validated_name(&name)?,
                description,
                color,
                icon,
            };
            let (collection, added) = create_with_members(client, &new, &members).await?;
            println!("created collection {} ({})", collection.name, collection.id);
            if added.len() < members.len() {
                eprintln!(
                    "warning: added {} of {} members; see log for failures",
                    added.len(),
                    members.len()
                );
            }
            Ok(())
        }
        CollectionsCommands::Update {
            id,
            name,
            description,
            color,
            icon,
        } => {
            let update = NewCollection {
                name: validated_name(&name)?,
                description,
                color,
                icon,
            };
            let collection = client.update_collection(id, &update).await?;
            println!("updated collection {} ({})", collection.name, collection.id);
            Ok(())
        }
        CollectionsCommands::Members { id, account_ids } => {
            run_collection_members(client, id, &account_ids).await
        }
        CollectionsCommands::Delete { id } => {
            let message = client.delete_collection(id).await?;
            println!("{message}");
            Ok(())
        }
    }
}

pub(crate) fn validated_name(name: &str) -> anyhow::Result<String> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("collection name must not be blank");
    }
    Ok(name.to_owned())
}

async fn run_collections_list(client: &DashboardClient) -> anyhow::Result<()> {
    let collections = client.collections().await?;
    if collections.is_empty() {
        println!("no collections");
        return Ok(());
    }

    println!("{:<6}{:<28}{:>9}{:>8}  COLOR", "ID", "NAME", "ACCOUNTS", "VIDEOS");
    for c in &collections {
        let name = if c.is_default {
            format!("{} (default)", c.name)
        } else {
            c.name.clone()
        };
        println!(
            "{:<6}{:<28}{:>9}{:>8}  {}",
            c.id,
            crate::truncate(&name, 26),
            c.account_count,
            c.video_count,
            c.color.as_deref().unwrap_or("\u{2014}")
        );
    }
    Ok(())
}

/// Diffs the collection's current members against `selected` and applies
/// the change, additions first.
///
/// # Errors
///
/// Returns an error if the current members cannot be fetched or any add or
/// remove call fails. Calls made before the failure are not undone.
async fn run_collection_members(
    client: &DashboardClient,
    collection_id: CollectionId,
    selected: &[AccountId],
) -> anyhow::Result<()> {
    let current: Vec<AccountId> = client
        .collection_accounts(collection_id)
        .await?
        .iter()
        .map(|a| a.id)
        .collect();

    let diff = save_membership(client, collection_id, &current, selected).await?;
    if diff.is_empty() {
        println!("collection {collection_id} unchanged");
    } else {
        println!(
            "collection {collection_id}: added {:?}, removed {:?}",
            diff.to_add, diff.to_remove
        );
    }
    Ok(())
}
