//! Monthly totals over the entry list.

use api_types::{
    Amount,
    category::Category,
    entry::{Entry, EntryType},
};
use chrono::{Datelike, NaiveDate};

/// Month selected in the report page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportFilter {
    pub month: u32,
    pub year: i32,
}

impl ReportFilter {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }

    pub fn next_month(self) -> Self {
        if self.month >= 12 {
            Self {
                month: 1,
                year: self.year + 1,
            }
        } else {
            Self {
                month: self.month + 1,
                ..self
            }
        }
    }

    pub fn prev_month(self) -> Self {
        if self.month <= 1 {
            Self {
                month: 12,
                year: self.year - 1,
            }
        } else {
            Self {
                month: self.month - 1,
                ..self
            }
        }
    }

    pub fn label(&self) -> String {
        format!("{:02}/{}", self.month, self.year)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTotals {
    pub category_id: i64,
    pub name: String,
    pub revenue: Amount,
    pub expense: Amount,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub filter: ReportFilter,
    pub entries: usize,
    pub revenue_total: Amount,
    pub expense_total: Amount,
    pub balance: Amount,
    /// Categories with at least one non-zero total, in category order.
    pub by_category: Vec<CategoryTotals>,
}

impl Report {
    /// Builds the report for the entries dated inside `filter`'s month.
    /// Entries without a date, type or amount are left out.
    pub fn build(entries: &[Entry], categories: &[Category], filter: ReportFilter) -> Self {
        let in_month: Vec<(&Entry, EntryType, i64)> = entries
            .iter()
            .filter(|entry| entry.date.is_some_and(|date| filter.matches(date)))
            .filter_map(|entry| Some((entry, entry.kind?, entry.amount?.cents())))
            .collect();

        let sum = |kind: EntryType, category_id: Option<i64>| -> i64 {
            in_month
                .iter()
                .filter(|(entry, entry_kind, _)| {
                    *entry_kind == kind
                        && category_id.is_none_or(|id| entry.category_id == Some(id))
                })
                .fold(0i64, |acc, (_, _, cents)| acc.saturating_add(*cents))
        };

        let revenue_total = sum(EntryType::Income, None);
        let expense_total = sum(EntryType::Expense, None);

        let by_category = categories
            .iter()
            .filter_map(|category| {
                let id = category.id?;
                let revenue = sum(EntryType::Income, Some(id));
                let expense = sum(EntryType::Expense, Some(id));
                (revenue != 0 || expense != 0).then(|| CategoryTotals {
                    category_id: id,
                    name: category.name.clone().unwrap_or_default(),
                    revenue: Amount::from_cents(revenue),
                    expense: Amount::from_cents(expense),
                })
            })
            .collect();

        Self {
            filter,
            entries: in_month.len(),
            revenue_total: Amount::from_cents(revenue_total),
            expense_total: Amount::from_cents(expense_total),
            balance: Amount::from_cents(revenue_total.saturating_sub(expense_total)),
            by_category,
        }
    }
}
