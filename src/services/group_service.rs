use log::{debug, info, warn};

use crate::config::TableauConf;
use crate::error::{GroupError, TransportError};
use crate::models::group::{
    Group, GroupListResponse, GroupRequest, GroupResponse, NewGroup, PageInfo,
};
use crate::services::transport::{ApiRequest, HttpTransport, Transport};

/// Client for the site's `/groups` collection.
pub struct GroupService<T> {
    transport: T,
    log_target: String,
}

impl GroupService<HttpTransport> {
    pub fn from_config(conf: &TableauConf) -> Result<Self, TransportError> {
        Ok(Self::new(HttpTransport::new(conf)?, conf.log_target.clone()))
    }
}

impl<T: Transport> GroupService<T> {
    pub fn new(transport: T, log_target: impl Into<String>) -> Self {
        Self {
            transport,
            log_target: log_target.into(),
        }
    }

    #[cfg(test)]
    fn transport(&self) -> &T {
        &self.transport
    }

    fn log_target(&self) -> &str {
        self.log_target.as_str()
    }

    /// Fetches one page of groups. `None` requests the server's default
    /// first page.
    pub async fn fetch_group_page(
        &self,
        page_number: Option<u64>,
    ) -> Result<(GroupListResponse, PageInfo), GroupError> {
        let path = match page_number {
            Some(page) => format!("/groups?pageNumber={}", page),
            None => "/groups".to_string(),
        };
        let body = self.transport.do_request(ApiRequest::get(path)).await?;
        let page: GroupListResponse = serde_json::from_slice(&body)?;
        let page_info = page.pagination.parse()?;
        debug!(target: self.log_target(),
            "Fetched group page {} ({} groups, {} available)",
            page_info.page_number,
            page.groups.group.len(),
            page_info.total_available
        );
        Ok((page, page_info))
    }

    /// Looks a group up by ID, walking the list pages in order until it
    /// turns up.
    pub async fn fetch_group_by_id(&self, group_id: &str) -> Result<Group, GroupError> {
        if group_id.is_empty() {
            return Err(GroupError::InvalidArgument("group id must not be empty"));
        }

        let (page, page_info) = self.fetch_group_page(None).await?;
        if let Some(group) = page.find(group_id) {
            return Ok(group.clone());
        }

        let total_pages = page_info.total_pages();
        for page_number in page_info.remaining_pages() {
            info!(target: self.log_target(), "Searching page {} for group {}", page_number, group_id);
            let (page, _) = self.fetch_group_page(Some(page_number)).await?;
            if let Some(group) = page.find(group_id) {
                return Ok(group.clone());
            }
        }

        warn!(target: self.log_target(), "Group {} not found in {} pages", group_id, total_pages);
        Err(GroupError::NotFound(group_id.to_string()))
    }

    /// Collects the groups of every page, in page order.
    pub async fn list_groups(&self) -> Result<Vec<Group>, GroupError> {
        let (page, page_info) = self.fetch_group_page(None).await?;
        let mut groups = page.groups.group;

        for page_number in page_info.remaining_pages() {
            let (page, _) = self.fetch_group_page(Some(page_number)).await?;
            groups.extend(page.groups.group);
        }

        info!(target: self.log_target(), "Listed {} groups", groups.len());
        Ok(groups)
    }

    pub async fn create_group(
        &self,
        name: &str,
        minimum_site_role: &str,
    ) -> Result<Group, GroupError> {
        let body = encode_new_group(name, minimum_site_role)?;
        let response = self
            .transport
            .do_request(ApiRequest::post("/groups", body))
            .await?;
        let group = serde_json::from_slice::<GroupResponse>(&response)?.group;
        info!(target: self.log_target(),
            "Group '{}' created with id {}",
            group.name,
            group.id.as_deref().unwrap_or("<none>")
        );
        Ok(group)
    }

    pub async fn update_group(
        &self,
        group_id: &str,
        name: &str,
        minimum_site_role: &str,
    ) -> Result<Group, GroupError> {
        if group_id.is_empty() {
            return Err(GroupError::InvalidArgument("group id must not be empty"));
        }
        let body = encode_new_group(name, minimum_site_role)?;
        let response = self
            .transport
            .do_request(ApiRequest::put(format!("/groups/{}", group_id), body))
            .await?;
        let group = serde_json::from_slice::<GroupResponse>(&response)?.group;
        info!(target: self.log_target(), "Group {} updated.", group_id);
        Ok(group)
    }

    /// Deletes a group. The response body is ignored.
    pub async fn delete_group(&self, group_id: &str) -> Result<(), GroupError> {
        if group_id.is_empty() {
            return Err(GroupError::InvalidArgument("group id must not be empty"));
        }
        self.transport
            .do_request(ApiRequest::delete(format!("/groups/{}", group_id)))
            .await?;
        info!(target: self.log_target(), "Group {} deleted successfully.", group_id);
        Ok(())
    }
}

fn encode_new_group(name: &str, minimum_site_role: &str) -> Result<Vec<u8>, GroupError> {
    if name.is_empty() {
        return Err(GroupError::InvalidArgument("group name must not be empty"));
    }
    let request = GroupRequest {
        group: NewGroup {
            name: name.to_string(),
            minimum_site_role: Some(minimum_site_role.to_string()),
        },
    };
    Ok(serde_json::to_vec(&request)?)
}
