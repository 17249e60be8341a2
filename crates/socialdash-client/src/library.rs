//! Videos, accounts, scrape submission, and collections.

use reqwest::Method;
use socialdash_core::{
    prepare_submission, AccountId, AccountRecord, Collection, CollectionId, Creator,
    NewCollection, Platform, VideoRecord,
};

use crate::client::DashboardClient;
use crate::error::ClientError;
use crate::query::{AccountFilter, VideoFilter};
use crate::types::{MessageAck, Page, ScrapeAck, SparkAdAck, VideosEnvelope};

impl DashboardClient {
    // -----------------------------------------------------------------------
    // Videos
    // -----------------------------------------------------------------------

    /// One page of the all-videos listing, most recently scraped first.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Status`] on a non-2xx response.
    /// - [`ClientError::Deserialize`] if the body does not match the expected shape.
    pub async fn videos(
        &self,
        filter: &VideoFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Page<VideoRecord>, ClientError> {
        let mut params = filter.params();
        params.push(("limit", limit.to_string()));
        params.push(("offset", offset.to_string()));
        let envelope: VideosEnvelope = self.get_json("api/videos", &params).await?;

        let has_more = match (envelope.has_more, envelope.total) {
            (Some(flag), _) => flag,
            (None, Some(total)) => u64::from(offset) + u64::from(limit) < total,
            (None, None) => envelope.videos.len() >= limit as usize,
        };
        Ok(Page {
            items: envelope.videos,
            total: envelope.total,
            has_more,
        })
    }

    /// Marks a video as paid promotion or organic.
    ///
    /// # Errors
    ///
    /// [`ClientError::Status`] with status 404 if the video does not exist;
    /// otherwise as for [`DashboardClient::videos`].
    pub async fn set_spark_ad(
        &self,
        video_id: &str,
        flag: bool,
    ) -> Result<SparkAdAck, ClientError> {
        let url = self.build_segment_url(
            &["api", "videos", video_id, "spark-ad"],
            &[("is_spark_ad", flag.to_string())],
        );
        self.send(Method::PATCH, url, None::<&()>).await
    }

    /// Distinct authors across active accounts.
    ///
    /// # Errors
    ///
    /// See [`DashboardClient::videos`].
    pub async fn creators(&self, platform: Option<Platform>) -> Result<Vec<Creator>, ClientError> {
        let params: Vec<(&str, String)> = platform
            .map(|p| ("platform", p.as_str().to_owned()))
            .into_iter()
            .collect();
        self.get_json("api/creators", &params).await
    }

    // -----------------------------------------------------------------------
    // Accounts
    // -----------------------------------------------------------------------

    /// Active tracked accounts, highest total views first.
    ///
    /// # Errors
    ///
    /// See [`DashboardClient::videos`].
    pub async fn accounts(
        &self,
        filter: &AccountFilter,
    ) -> Result<Vec<AccountRecord>, ClientError> {
        self.get_json("api/accounts", &filter.params()).await
    }

    /// Soft-deletes an account: it is hidden from every view and removed
    /// from all collections. Returns the backend's confirmation message.
    ///
    /// # Errors
    ///
    /// See [`DashboardClient::set_spark_ad`].
    pub async fn delete_account(&self, account_id: AccountId) -> Result<String, ClientError> {
        let url = self.build_url(&format!("api/accounts/{account_id}"), &[]);
        let ack: MessageAck = self.send(Method::DELETE, url, None::<&()>).await?;
        Ok(ack.message)
    }

    /// Re-aggregates an account's totals from its stored videos.
    ///
    /// # Errors
    ///
    /// See [`DashboardClient::set_spark_ad`].
    pub async fn refresh_account(
        &self,
        account_id: AccountId,
    ) -> Result<AccountRecord, ClientError> {
        let url = self.build_url(&format!("api/accounts/{account_id}/refresh"), &[]);
        self.send(Method::POST, url, None::<&()>).await
    }

    /// Submits usernames or profile links for background scraping in one
    /// request. Blank entries are dropped first.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] without any network call when every entry
    /// is blank; otherwise as for [`DashboardClient::videos`].
    pub async fn submit_accounts<I, S>(&self, inputs: I) -> Result<ScrapeAck, ClientError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls = prepare_submission(inputs)?;
        tracing::info!(count = urls.len(), "submitting accounts for scraping");
        let url = self.build_url("api/scrape/urls", &[]);
        let body = serde_json::json!({ "urls": urls });
        self.send(Method::POST, url, Some(&body)).await
    }

    // -----------------------------------------------------------------------
    // Collections
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// See [`DashboardClient::videos`].
    pub async fn collections(&self) -> Result<Vec<Collection>, ClientError> {
        self.get_json("api/collections", &[]).await
    }

    /// # Errors
    ///
    /// See [`DashboardClient::videos`].
    pub async fn create_collection(&self, new: &NewCollection) -> Result<Collection, ClientError> {
        let url = self.build_url("api/collections", &[]);
        self.send(Method::POST, url, Some(new)).await
    }

    /// # Errors
    ///
    /// See [`DashboardClient::set_spark_ad`].
    pub async fn update_collection(
        &self,
        collection_id: CollectionId,
        update: &NewCollection,
    ) -> Result<Collection, ClientError> {
        let url = self.build_url(&format!("api/collections/{collection_id}"), &[]);
        self.send(Method::PUT, url, Some(update)).await
    }

    /// Deletes a collection. The default collection cannot be deleted; the
    /// backend answers 400.
    ///
    /// # Errors
    ///
    /// See [`DashboardClient::set_spark_ad`].
    pub async fn delete_collection(
        &self,
        collection_id: CollectionId,
    ) -> Result<String, ClientError> {
        let url = self.build_url(&format!("api/collections/{collection_id}"), &[]);
        let ack: MessageAck = self.send(Method::DELETE, url, None::<&()>).await?;
        Ok(ack.message)
    }

    /// # Errors
    ///
    /// See [`DashboardClient::set_spark_ad`].
    pub async fn collection_accounts(
        &self,
        collection_id: CollectionId,
    ) -> Result<Vec<AccountRecord>, ClientError> {
        self.get_json(&format!("api/collections/{collection_id}/accounts"), &[])
            .await
    }

    /// # Errors
    ///
    /// [`ClientError::Status`] with status 400 if the account is already a
    /// member; otherwise as for [`DashboardClient::set_spark_ad`].
    pub async fn add_account_to_collection(
        &self,
        collection_id: CollectionId,
        account_id: AccountId,
    ) -> Result<(), ClientError> {
        let url = self.build_url(
            &format!("api/collections/{collection_id}/accounts/{account_id}"),
            &[],
        );
        let _: MessageAck = self.send(Method::POST, url, None::<&()>).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// [`ClientError::Status`] with status 404 if the account is not a member.
    pub async fn remove_account_from_collection(
        &self,
        collection_id: CollectionId,
        account_id: AccountId,
    ) -> Result<(), ClientError> {
        let url = self.build_url(
            &format!("api/collections/{collection_id}/accounts/{account_id}"),
            &[],
        );
        let _: MessageAck = self.send(Method::DELETE, url, None::<&()>).await?;
        Ok(())
    }
}
