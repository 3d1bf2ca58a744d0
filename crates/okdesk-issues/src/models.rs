//! Issue models and nested shapes.
//!
//! `type`, `coexecutors`, `attachments` and `status_times` are parsed into
//! their own structures. The remaining nested objects keep the vendor layout
//! as [`VendorMap`]; see [`okdesk_core::types`] for the usual shapes.

use chrono::{DateTime, FixedOffset};
use okdesk_core::types::{lenient_timestamp, Attachment, VendorMap};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::Index;

/// Helpdesk issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    /// Issue id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation time.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<FixedOffset>>,
    /// Completion time.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<DateTime<FixedOffset>>,
    /// Deadline.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline_at: Option<DateTime<FixedOffset>>,
    /// Channel the issue came from, e.g. `web` or `email`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Total logged time in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spent_time_total: Option<f64>,
    /// Latest start of execution.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_execution_until: Option<DateTime<FixedOffset>>,
    /// Planned execution time in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_execution_in_hours: Option<f64>,
    /// Planned reaction time.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub planned_reaction_at: Option<DateTime<FixedOffset>>,
    /// Actual reaction time.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub reacted_at: Option<DateTime<FixedOffset>>,
    /// Last update time.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<FixedOffset>>,
    /// Postponed until.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub delayed_to: Option<DateTime<FixedOffset>>,
    /// Client company id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    /// Responsible group id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    /// Co-executors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coexecutors: Option<Vec<Employee>>,
    /// Maintenance entity id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_object_id: Option<i64>,
    /// Linked equipment ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_ids: Option<Vec<i64>>,
    /// Attached files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    /// Time spent in each status, keyed by status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_times: Option<StatusTimes>,
    /// Custom attribute values (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<VendorMap>>,
    /// Comment counters (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<VendorMap>,
    /// Parent issue id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    /// Child issue ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_ids: Option<Vec<i64>>,
    /// Issue type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IssueType>,
    /// Priority (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<VendorMap>,
    /// Current status (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VendorMap>,
    /// Previous status (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_status: Option<VendorMap>,
    /// Client rating (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<VendorMap>,
    /// Address (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<VendorMap>,
    /// Observers (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observers: Option<Vec<VendorMap>>,
    /// Observer groups (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observer_groups: Option<Vec<VendorMap>>,
    /// Contact (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<VendorMap>,
    /// Service agreement (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreement: Option<VendorMap>,
    /// Assignee (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<VendorMap>,
    /// Author (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<VendorMap>,
}

impl Issue {
    /// Code of the current status, if reported.
    #[must_use]
    pub fn status_code(&self) -> Option<&str> {
        self.status
            .as_ref()
            .and_then(|status| status.get("code"))
            .and_then(|code| code.as_str())
    }
}

/// Employee working on an issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    /// Employee id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Group (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<VendorMap>,
}

/// Time spent in one status, formatted by the vendor (`"01:30"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusTime {
    /// Calendar time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
    /// Time within the work schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_schedule_total: Option<String>,
}

/// Per-status times in the order the service lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTimes(Vec<(String, StatusTime)>);

impl StatusTimes {
    /// Time spent in status `code`.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&StatusTime> {
        self.0
            .iter()
            .find_map(|(status, time)| (status == code).then_some(time))
    }

    /// Status codes with their times, in vendor order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatusTime)> {
        self.0.iter().map(|(status, time)| (status.as_str(), time))
    }

    /// Number of statuses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no status is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<&str> for StatusTimes {
    type Output = StatusTime;

    fn index(&self, code: &str) -> &StatusTime {
        match self.get(code) {
            Some(time) => time,
            None => panic!("no status time for `{code}`"),
        }
    }
}

impl Serialize for StatusTimes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for StatusTimes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        VendorMap::deserialize(deserializer)?
            .into_iter()
            .map(|(status, value)| {
                serde_json::from_value(value)
                    .map(|time| (status, time))
                    .map_err(D::Error::custom)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

/// Issue type reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueType {
    /// Type id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Type code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether clients may pick this type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_for_client: Option<bool>,
}

/// Issue comment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    /// Comment id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Visible to the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    /// Attached files (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<VendorMap>>,
    /// Author (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<VendorMap>,
}

/// Service, work or product line added to an issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Specification {
    /// Line id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Quantity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    /// Line total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    /// Comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// VAT included in the total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_vat: Option<f64>,
    /// Price list service (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<VendorMap>,
    /// Price list (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_list: Option<VendorMap>,
    /// Performer (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performer: Option<VendorMap>,
}

/// Logged work time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TimeEntry {
    /// Entry id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Hours spent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spent_time: Option<f64>,
    /// When the work was done, as reported by the vendor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_at: Option<String>,
    /// Employee (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<VendorMap>,
    /// Custom attribute values (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<VendorMap>>,
}

/// Item of an issue check list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CheckListItem {
    /// Item id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Must be checked before status changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Visible to the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_for_clients: Option<bool>,
    /// When the item was checked, as reported by the vendor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_at: Option<String>,
    /// Item attribute values (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<VendorMap>>,
    /// `point` or `header`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    /// Parent header id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    /// Planned execution time in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_execution_in_hours: Option<f64>,
    /// Position within the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    /// User who checked the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_by_user_id: Option<i64>,
    /// Checked state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}
