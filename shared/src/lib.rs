use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category filter value the list view sends when no category is selected
pub const ALL_CATEGORIES_FILTER: &str = "All Categories";

/// Fixed set of spending categories.
///
/// Serialized as the human-readable label the frontend displays
/// (e.g. `"Food & Dining"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    Shopping,
    Education,
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    Entertainment,
    Healthcare,
    Transportation,
}

impl ExpenseCategory {
    /// Every category, in the order the add-expense form lists them
    pub const ALL: [ExpenseCategory; 7] = [
        ExpenseCategory::BillsAndUtilities,
        ExpenseCategory::Shopping,
        ExpenseCategory::Education,
        ExpenseCategory::FoodAndDining,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Healthcare,
        ExpenseCategory::Transportation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::BillsAndUtilities => "Bills & Utilities",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Education => "Education",
            ExpenseCategory::FoodAndDining => "Food & Dining",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Healthcare => "Healthcare",
            ExpenseCategory::Transportation => "Transportation",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string is not one of the known category labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown expense category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for ExpenseCategory {
    type Err = UnknownCategory;

    /// Exact match on the display label; no case folding or trimming.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseCategory::ALL
            .iter()
            .copied()
            .find(|category| category.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A recorded expense as exchanged with the frontend.
///
/// The id travels as `_id`, the key the list and dashboard rows use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "_id")]
    pub id: String,
    /// Positive monetary amount
    pub amount: f64,
    pub category: ExpenseCategory,
    /// Calendar date in `YYYY-MM-DD` form
    pub date: String,
    pub description: String,
}

/// Body of `POST /api/expenses`.
///
/// Fields are loosely typed on purpose: the add-expense form posts the raw
/// values and the backend reports every invalid field at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    /// `None` when the form sent `null` (e.g. `parseFloat("")`)
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub category: String,
    /// Calendar date in `YYYY-MM-DD` form
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
}

/// Body of `PUT /api/expenses/:id`; an update is a full replacement
pub type UpdateExpenseRequest = CreateExpenseRequest;

/// Query string accepted by the expense list and export endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListRequest {
    /// Case-insensitive match against description or category
    pub search: Option<String>,
    /// Category label, or `"All Categories"` for no filter
    pub category: Option<String>,
    /// Inclusive lower date bound (`YYYY-MM-DD`)
    pub from: Option<String>,
    /// Inclusive upper date bound (`YYYY-MM-DD`)
    pub to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteExpenseResponse {
    pub id: String,
}

/// One slice of the dashboard pie chart.
///
/// The category is emitted as `_id`, which is the key the charts read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    #[serde(rename = "_id")]
    pub category: ExpenseCategory,
    pub total: f64,
}

/// Payload of `GET /api/expenses/stats/summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub today_total: f64,
    pub month_total: f64,
    /// Average amount per transaction in the current month
    pub avg_daily: f64,
    /// Count of all expenses, not only this month's
    pub total_transactions: usize,
    pub category_breakdown: Vec<CategoryTotal>,
}

/// Envelope wrapped around every API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettings {
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Email notifications
    pub email: bool,
    /// Budget alerts
    pub budget: bool,
    /// Weekly reports
    pub weekly: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppearanceSettings {
    pub theme: String,
    /// Display currency label, e.g. `"USD ($)"`. Amounts are never converted.
    pub currency: String,
}

/// Preferences edited on the settings page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub profile: ProfileSettings,
    pub notifications: NotificationSettings,
    pub appearance: AppearanceSettings,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            profile: ProfileSettings {
                full_name: "John Doe".to_string(),
                email: "john.doe@example.com".to_string(),
            },
            notifications: NotificationSettings {
                email: true,
                budget: true,
                weekly: false,
            },
            appearance: AppearanceSettings {
                theme: "Light".to_string(),
                currency: "USD ($)".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
