use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::models::table_filter::{Paging, SortDir, SortSpec};

use super::store::RoleMatrixStore;
use super::types::{Role, RoleRow, RoleStatus};

/// Query for the roles table.
#[derive(Debug, Clone, Default)]
pub struct RoleQuery {
    /// Case-insensitive substring of name or description.
    pub search: Option<String>,
    pub status: Option<RoleStatus>,
    pub sort: SortSpec,
    pub paging: Paging,
}

/// Page of role rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RolePage {
    pub items: Vec<RoleRow>,
    pub page: usize,
    pub per_page: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

/// Allowed sort column keys.
pub const SORT_COLUMNS: &[&str] = &["name", "status", "users", "modules", "last_modified"];

fn matches(role: &Role, query: &RoleQuery) -> bool {
    if query.status.is_some_and(|s| s != role.status) {
        return false;
    }
    match query.search.as_deref().map(str::trim) {
        Some(needle) if !needle.is_empty() => {
            let needle = needle.to_lowercase();
            role.display_name().to_lowercase().contains(&needle)
                || role.description.to_lowercase().contains(&needle)
        }
        _ => true,
    }
}

fn parse_short_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%m/%d/%Y").ok()
}

fn compare(a: &Role, b: &Role, column: &str) -> Ordering {
    match column {
        "name" => a.display_name().to_lowercase().cmp(&b.display_name().to_lowercase()),
        "status" => a.status.label().cmp(b.status.label()),
        "users" => a.user_count.cmp(&b.user_count),
        "modules" => a.module_count.value().cmp(&b.module_count.value()),
        "last_modified" => parse_short_date(&a.last_modified).cmp(&parse_short_date(&b.last_modified)),
        _ => Ordering::Equal,
    }
}

/// Filter, sort and paginate the store's roles. Unknown sort columns keep
/// store order; the sort is stable.
pub fn find_paginated(store: &RoleMatrixStore, query: &RoleQuery) -> RolePage {
    let mut matched: Vec<&Role> = store.roles().iter().filter(|r| matches(r, query)).collect();

    if SORT_COLUMNS.contains(&query.sort.column.as_str()) {
        matched.sort_by(|a, b| {
            let ord = compare(a, b, &query.sort.column);
            match query.sort.dir {
                SortDir::Asc => ord,
                SortDir::Desc => ord.reverse(),
            }
        });
    }

    let paging = query.paging;
    let total_count = matched.len();
    let items = matched
        .into_iter()
        .skip(paging.offset())
        .take(paging.per_page())
        .map(Role::row)
        .collect();

    RolePage {
        items,
        page: paging.page(),
        per_page: paging.per_page(),
        total_count,
        total_pages: paging.total_pages(total_count),
    }
}
