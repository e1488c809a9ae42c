use crate::domain::commands::expenses::{ExpenseListQuery, SaveExpenseCommand};
use crate::domain::models::{
    parse_category, parse_expense_date, Expense as DomainExpense, ExpenseValidationError,
    DATE_FORMAT,
};
use shared::{CreateExpenseRequest, Expense as SharedExpense, ExpenseListRequest, ALL_CATEGORIES_FILTER};

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(domain: DomainExpense) -> SharedExpense {
        SharedExpense {
            id: domain.id,
            amount: domain.amount,
            category: domain.category,
            date: domain.date.format(DATE_FORMAT).to_string(),
            description: domain.description,
        }
    }

    pub fn to_save_command(request: CreateExpenseRequest) -> SaveExpenseCommand {
        SaveExpenseCommand {
            amount: request.amount,
            category: request.category,
            date: request.date,
            description: request.description,
        }
    }

    /// Empty values and the "All Categories" sentinel mean "no filter"
    pub fn to_list_query(
        request: ExpenseListRequest,
    ) -> Result<ExpenseListQuery, Vec<ExpenseValidationError>> {
        let mut errors = Vec::new();

        let search = request.search.filter(|s| !s.is_empty());

        let category = match request.category.as_deref() {
            None | Some("") | Some(ALL_CATEGORIES_FILTER) => None,
            Some(label) => parse_category(label).map_err(|e| errors.push(e)).ok(),
        };

        let mut parse_bound = |value: Option<String>| match value.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(date) => parse_expense_date(date).map_err(|e| errors.push(e)).ok(),
        };
        let from = parse_bound(request.from);
        let to = parse_bound(request.to);

        if errors.is_empty() {
            Ok(ExpenseListQuery {
                search,
                category,
                from,
                to,
            })
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::ExpenseCategory;

    #[test]
    fn test_to_dto_formats_date() {
        let dto = ExpenseMapper::to_dto(DomainExpense {
            id: "e1".to_string(),
            amount: 4.2,
            category: ExpenseCategory::Entertainment,
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            description: "Movie".to_string(),
        });
        assert_eq!(dto.date, "2026-01-05");
        assert_eq!(dto.category, ExpenseCategory::Entertainment);
    }

    #[test]
    fn test_list_query_sentinels_mean_no_filter() {
        let query = ExpenseMapper::to_list_query(ExpenseListRequest {
            search: Some(String::new()),
            category: Some("All Categories".to_string()),
            from: Some("".to_string()),
            to: None,
        })
        .unwrap();
        assert_eq!(query, ExpenseListQuery::default());
    }

    #[test]
    fn test_list_query_parses_filters() {
        let query = ExpenseMapper::to_list_query(ExpenseListRequest {
            search: Some("Lunch".to_string()),
            category: Some("Food & Dining".to_string()),
            from: Some("2026-02-01".to_string()),
            to: Some("2026-02-10".to_string()),
        })
        .unwrap();
        assert_eq!(query.search.as_deref(), Some("Lunch"));
        assert_eq!(query.category, Some(ExpenseCategory::FoodAndDining));
        assert_eq!(query.from, NaiveDate::from_ymd_opt(2026, 2, 1));
        assert_eq!(query.to, NaiveDate::from_ymd_opt(2026, 2, 10));
    }

    #[test]
    fn test_list_query_rejects_unknown_values() {
        let errors = ExpenseMapper::to_list_query(ExpenseListRequest {
            search: None,
            category: Some("Pets".to_string()),
            from: Some("02/01/2026".to_string()),
            to: None,
        })
        .unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
