//! Collection create and membership flows.

use socialdash_client::{ClientError, DashboardClient};
use socialdash_core::{AccountId, Collection, CollectionId, MembershipDiff, NewCollection};

/// Moves a collection's membership from `current` to `selected`.
///
/// Additions go first, then removals, one request at a time. The first
/// failure stops the sequence; calls already made are not rolled back.
///
/// # Errors
///
/// Returns the first client error encountered.
pub async fn save_membership(
    client: &DashboardClient,
    collection_id: CollectionId,
    current: &[AccountId],
    selected: &[AccountId],
) -> Result<MembershipDiff, ClientError> {
    let diff = MembershipDiff::between(current, selected);
    for &account_id in &diff.to_add {
        client
            .add_account_to_collection(collection_id, account_id)
            .await?;
    }
    for &account_id in &diff.to_remove {
        client
            .remove_account_from_collection(collection_id, account_id)
            .await?;
    }
    tracing::info!(
        collection_id,
        added = diff.to_add.len(),
        removed = diff.to_remove.len(),
        "collection membership saved"
    );
    Ok(diff)
}

/// Creates a collection, then adds each member.
///
/// Returns the created collection and the members actually added. A member
/// that fails to add is logged and skipped.
///
/// # Errors
///
/// Returns the client error if the collection itself cannot be created.
pub async fn create_with_members(
    client: &DashboardClient,
    new: &NewCollection,
    members: &[AccountId],
) -> Result<(Collection, Vec<AccountId>), ClientError> {
    let collection = client.create_collection(new).await?;
    let mut added = Vec::with_capacity(members.len());
    for &account_id in members {
        match client
            .add_account_to_collection(collection.id, account_id)
            .await
        {
            Ok(()) => added.push(account_id),
            Err(e) => {
                tracing::warn!(
                    collection_id = collection.id,
                    account_id,
                    error = %e,
                    "failed to add account to new collection"
                );
            }
        }
    }
    Ok((collection, added))
}
