//! Price list models.

use serde::{Deserialize, Serialize};

/// A price list and the companies it applies to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceList {
    /// Price list id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether companies without a category may use it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_without_category: Option<bool>,
    /// Whether issues without a company may use it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_without_company: Option<bool>,
    /// Company category codes it applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_category_codes: Option<Vec<String>>,
    /// Company ids it applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_ids: Option<Vec<i64>>,
}

/// A price list line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Service {
    /// Service id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Code, unique within the price list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `service`, `work` or `product`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Unit of measure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Price per unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// VAT rate, percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nds: Option<f64>,
    /// Whether the line is offered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A price list line offered for a particular issue, with its price list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServiceWithPriceList {
    /// Price list id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_list_id: Option<i64>,
    /// Price list name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_list_name: Option<String>,
    /// The line itself.
    #[serde(flatten)]
    pub service: Service,
}
