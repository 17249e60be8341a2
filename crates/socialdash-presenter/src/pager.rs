//! Paging over the video-stats table and the all-videos listing.
//!
//! The video-stats table grows its window in place: each "load more" asks for
//! [`DISPLAY_STEP`] more rows from offset zero and replaces the list (see
//! `Dashboard::load_more`). The all-videos listing pages by offset and
//! appends.

use socialdash_client::{ClientError, DashboardClient, VideoFilter};
use socialdash_core::VideoRecord;

/// Rows shown before the first "load more".
pub const INITIAL_DISPLAY_COUNT: u32 = 20;

/// Rows added per "load more".
pub const DISPLAY_STEP: u32 = 20;

/// Page size of the all-videos listing.
pub const LISTING_PAGE_SIZE: u32 = 50;

/// Offset pager for the all-videos view.
#[derive(Debug, Clone)]
pub struct VideoListing {
    client: DashboardClient,
    filter: VideoFilter,
    page_size: u32,
    offset: u32,
    videos: Vec<VideoRecord>,
    total: Option<u64>,
    has_more: bool,
}

impl VideoListing {
    #[must_use]
    pub fn new(client: DashboardClient, filter: VideoFilter) -> Self {
        Self {
            client,
            filter,
            page_size: LISTING_PAGE_SIZE,
            offset: 0,
            videos: Vec::new(),
            total: None,
            has_more: false,
        }
    }

    /// Replaces the filters and reloads from the first page.
    ///
    /// # Errors
    ///
    /// See [`VideoListing::reload`].
    pub async fn set_filter(&mut self, filter: VideoFilter) -> Result<(), ClientError> {
        self.filter = filter;
        self.reload().await
    }

    #[must_use]
    pub fn filter(&self) -> &VideoFilter {
        &self.filter
    }

    /// Fetches the first page, replacing the list.
    ///
    /// # Errors
    ///
    /// Propagates the client error; the list is left unchanged.
    pub async fn reload(&mut self) -> Result<(), ClientError> {
        let page = self.client.videos(&self.filter, self.page_size, 0).await?;
        self.offset = count_u32(page.items.len());
        self.total = page.total;
        self.has_more = page.has_more;
        self.videos = page.items;
        Ok(())
    }

    /// Fetches the next page and appends it.
    ///
    /// Does nothing when the server reported no more rows.
    ///
    /// # Errors
    ///
    /// Propagates the client error; the list and offset are left unchanged.
    pub async fn load_more(&mut self) -> Result<(), ClientError> {
        if !self.has_more {
            return Ok(());
        }
        let page = self
            .client
            .videos(&self.filter, self.page_size, self.offset)
            .await?;
        self.offset = self.offset.saturating_add(count_u32(page.items.len()));
        self.total = page.total;
        self.has_more = page.has_more;
        self.videos.extend(page.items);
        Ok(())
    }

    /// Marks a video as paid or organic, then updates the loaded row.
    ///
    /// # Errors
    ///
    /// Propagates the client error; the local row is not touched.
    pub async fn set_spark_ad(&mut self, video_id: &str, flag: bool) -> Result<(), ClientError> {
        let ack = self.client.set_spark_ad(video_id, flag).await?;
        if let Some(video) = self.videos.iter_mut().find(|v| v.id == video_id) {
            video.is_spark_ad = ack.is_spark_ad;
        }
        Ok(())
    }

    #[must_use]
    pub fn videos(&self) -> &[VideoRecord] {
        &self.videos
    }

    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
