//! Spending statistics over a person's purchases within an inclusive date range.

use std::collections::HashMap;

use chrono::NaiveDate;
use spendwise_domain::{Account, Buying, Category, DateRange, Price};
use uuid::Uuid;

use crate::{
    store::{BuyingQuery, RecordStore},
    CoreError, CoreResult,
};

/// A purchase together with the title of its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyingDetail {
    pub buying: Buying,
    pub category_title: String,
}

impl BuyingDetail {
    pub fn shop_name(&self) -> &str {
        &self.buying.shop_name
    }

    pub fn price(&self) -> Price {
        self.buying.price
    }
}

/// Count, total and price extremes of a purchase selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub range: DateRange,
    pub count: usize,
    pub total_spent: i64,
    pub max: Option<BuyingDetail>,
    pub min: Option<BuyingDetail>,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyingLine {
    pub shop_name: String,
    pub purchase_date: NaiveDate,
    pub price: Price,
    pub title: Option<String>,
}

impl From<Buying> for BuyingLine {
    fn from(buying: Buying) -> Self {
        Self {
            shop_name: buying.shop_name,
            purchase_date: buying.purchase_date,
            price: buying.price,
            title: buying.title,
        }
    }
}

/// Purchases of one category in selection order, with their running total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub range: DateRange,
    pub total_spent: i64,
    pub lines: Vec<BuyingLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: i64,
    pub count: usize,
}

/// Per-category sums keyed by category id, ordered by first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
}

impl CategoryTotals {
    pub fn get(&self, category_id: Uuid) -> Option<i64> {
        self.entries
            .iter()
            .find(|entry| entry.category.id == category_id)
            .map(|entry| entry.total)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<CategoryTotal> {
        self.entries
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLimitUsage {
    pub category_id: Uuid,
    pub title: String,
    pub spent: i64,
    pub limit: i64,
    pub exceeded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountOverview {
    pub accounts: Vec<Account>,
    pub total: i64,
}

/// Read-only aggregation over the purchases held by a record store.
pub struct StatisticsAggregator<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> StatisticsAggregator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Counts and totals the person's purchases in `start..=end` and picks the
    /// most and least expensive ones. Ties go to the earliest stored purchase.
    pub fn summarize(
        &self,
        person_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> CoreResult<Summary> {
        let range = DateRange::new(start, end)?;
        let buyings = self.select(BuyingQuery::new(person_id, range))?;

        let mut max: Option<&Buying> = None;
        let mut min: Option<&Buying> = None;
        for buying in &buyings {
            if max.map_or(true, |current| buying.price > current.price) {
                max = Some(buying);
            }
            if min.map_or(true, |current| buying.price < current.price) {
                min = Some(buying);
            }
        }

        let mut titles = HashMap::new();
        let max = max
            .map(|buying| self.detail(buying, &mut titles))
            .transpose()?;
        let min = min
            .map(|buying| self.detail(buying, &mut titles))
            .transpose()?;

        tracing::debug!(person_id = %person_id, %range, count = buyings.len(), "summarized purchases");
        Ok(Summary {
            range,
            count: buyings.len(),
            total_spent: total(&buyings)?,
            max,
            min,
        })
    }

    /// Lists the person's purchases of one category in `start..=end`.
    pub fn category_breakdown(
        &self,
        person_id: Uuid,
        category_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> CoreResult<CategoryBreakdown> {
        let range = DateRange::new(start, end)?;
        let category = self.store.category(category_id)?;
        let buyings = self.select(BuyingQuery::new(person_id, range).in_category(category_id))?;
        Ok(CategoryBreakdown {
            category,
            range,
            total_spent: total(&buyings)?,
            lines: buyings.into_iter().map(BuyingLine::from).collect(),
        })
    }

    /// Sums prices per category. Categories without purchases in range are absent.
    pub fn per_category_totals(
        &self,
        person_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> CoreResult<CategoryTotals> {
        let range = DateRange::new(start, end)?;
        let buyings = self.select(BuyingQuery::new(person_id, range))?;

        let mut index: HashMap<Uuid, usize> = HashMap::new();
        let mut entries: Vec<CategoryTotal> = Vec::new();
        for buying in &buyings {
            let slot = match index.get(&buying.category_id) {
                Some(&slot) => slot,
                None => {
                    let category = self.store.category(buying.category_id)?;
                    entries.push(CategoryTotal {
                        category,
                        total: 0,
                        count: 0,
                    });
                    index.insert(buying.category_id, entries.len() - 1);
                    entries.len() - 1
                }
            };
            let entry = &mut entries[slot];
            entry.total = checked_sum(entry.total, buying.price.value())?;
            entry.count += 1;
        }
        Ok(CategoryTotals { entries })
    }

    /// Spending against limits for every category that has one and was used in range.
    pub fn limit_usage(
        &self,
        person_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> CoreResult<Vec<CategoryLimitUsage>> {
        let totals = self.per_category_totals(person_id, start, end)?;
        Ok(totals
            .into_entries()
            .into_iter()
            .filter_map(|entry| {
                let limit = entry.category.limit?;
                Some(CategoryLimitUsage {
                    category_id: entry.category.id,
                    exceeded: entry.category.is_over_limit(entry.total),
                    title: entry.category.title,
                    spent: entry.total,
                    limit,
                })
            })
            .collect())
    }

    pub fn account_overview(&self, person_id: Uuid) -> CoreResult<AccountOverview> {
        self.store.person(person_id)?;
        let accounts = self.store.accounts_for(person_id)?;
        let total = accounts
            .iter()
            .try_fold(0, |sum, account| checked_sum(sum, account.current_amount))?;
        Ok(AccountOverview { accounts, total })
    }

    fn select(&self, query: BuyingQuery) -> CoreResult<Vec<Buying>> {
        self.store.person(query.person_id)?;
        self.store.select_buyings(&query)
    }

    fn detail(
        &self,
        buying: &Buying,
        titles: &mut HashMap<Uuid, String>,
    ) -> CoreResult<BuyingDetail> {
        let category_title = match titles.get(&buying.category_id) {
            Some(title) => title.clone(),
            None => {
                let title = self.store.category(buying.category_id)?.title;
                titles.insert(buying.category_id, title.clone());
                title
            }
        };
        Ok(BuyingDetail {
            buying: buying.clone(),
            category_title,
        })
    }
}

fn total(buyings: &[Buying]) -> CoreResult<i64> {
    buyings
        .iter()
        .try_fold(0, |sum, buying| checked_sum(sum, buying.price.value()))
}

fn checked_sum(sum: i64, value: i64) -> CoreResult<i64> {
    sum.checked_add(value)
        .ok_or_else(|| CoreError::Validation(format!("total overflows when adding {value}")))
}
