use crate::domain::{CategoryTotal as DomainCategoryTotal, SummaryResult};
use shared::{CategoryTotal as SharedCategoryTotal, ExpenseSummary};

pub struct SummaryMapper;

impl SummaryMapper {
    pub fn to_dto(domain: SummaryResult) -> ExpenseSummary {
        ExpenseSummary {
            today_total: domain.today_total,
            month_total: domain.month_total,
            avg_daily: domain.avg_daily,
            total_transactions: domain.total_transactions,
            category_breakdown: domain
                .category_breakdown
                .into_iter()
                .map(Self::to_category_dto)
                .collect(),
        }
    }

    fn to_category_dto(domain: DomainCategoryTotal) -> SharedCategoryTotal {
        SharedCategoryTotal {
            category: domain.category,
            total: domain.total,
        }
    }
}
