//! Okdesk issues client and data models.
//!
//! Covers the `api/v1/issues` endpoints: creation (with or without files),
//! assignee, deadline, type, parameter, address and status changes, comments,
//! specifications, time entries, attachments and check lists.

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod requests;

pub use client::IssuesClient;
pub use models::{
    CheckListItem, Comment, Employee, Issue, IssueType, Specification, StatusTime, StatusTimes,
    TimeEntry,
};
pub use requests::{
    AddIssueCheckListItemsRequest, AddIssueCommentRequest, AddIssueSpecificationRequest,
    AddIssueTimeEntryRequest, AuthorType, ChangeIssueAddressRequest, ChangeIssueAssigneeRequest,
    ChangeIssueDeadlineRequest, ChangeIssueParametersRequest, ChangeIssueStatusRequest,
    ChangeIssueTypeRequest, CheckIssueCheckListItemRequest, CheckListItemDraft,
    CheckListItemType, CreateIssueRequest, DeleteIssueRequest, GetIssueAttachmentRequest,
    GetIssueCheckListRequest, GetIssueCommentsRequest, GetIssueIdsRequest, GetIssueRequest,
    GetIssueSpecificationsRequest, GetIssueTimeEntriesRequest, IssueAuthor, IssueRating,
    IssueSortField, ListIssuesRequest, RateIssueRequest,
};

/// Convenient result alias that reuses the shared Okdesk error type.
pub type Result<T> = okdesk_core::Result<T>;
