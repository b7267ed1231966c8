use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::error::GroupError;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupImport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_site_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grant_license_mode: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub import: GroupImport,
}

/// Write-side projection of a group, sent on create and update.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewGroup {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_site_role: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct GroupRequest {
    pub group: NewGroup,
}

#[derive(Deserialize, Debug)]
pub struct GroupResponse {
    pub group: Group,
}

#[derive(Deserialize, Debug, Default)]
pub struct GroupsResponse {
    #[serde(default)]
    pub group: Vec<Group>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDetails {
    pub page_number: String,
    pub page_size: String,
    pub total_available: String,
}

#[derive(Deserialize, Debug)]
pub struct GroupListResponse {
    #[serde(default)]
    pub groups: GroupsResponse,
    pub pagination: PaginationDetails,
}

/// Pagination counts after parsing them out of their wire strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageInfo {
    pub page_number: u64,
    pub page_size: u64,
    pub total_available: u64,
}

impl PaginationDetails {
    pub fn parse(&self) -> Result<PageInfo, GroupError> {
        let page_size = parse_count("pageSize", &self.page_size)?;
        if page_size == 0 {
            return Err(GroupError::Parse {
                field: "pageSize",
                value: self.page_size.clone(),
            });
        }
        Ok(PageInfo {
            page_number: parse_count("pageNumber", &self.page_number)?,
            page_size,
            total_available: parse_count("totalAvailable", &self.total_available)?,
        })
    }
}

fn parse_count(field: &'static str, value: &str) -> Result<u64, GroupError> {
    value.parse().map_err(|_| GroupError::Parse {
        field,
        value: value.to_string(),
    })
}

impl PageInfo {
    pub fn total_pages(&self) -> u64 {
        self.total_available.div_ceil(self.page_size)
    }

    /// Pages after this one, through the last page.
    pub fn remaining_pages(&self) -> RangeInclusive<u64> {
        match self.page_number.checked_add(1) {
            Some(next) => next..=self.total_pages(),
            None => 1..=0,
        }
    }
}

impl GroupListResponse {
    pub fn find(&self, group_id: &str) -> Option<&Group> {
        self.groups
            .group
            .iter()
            .find(|group| group.id.as_deref() == Some(group_id))
    }
}
