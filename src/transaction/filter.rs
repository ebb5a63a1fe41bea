//! Status and date range filters for the transaction history.

use serde::Deserialize;
use time::{Date, Duration, Month};

use super::core::{Transaction, TransactionStatus};

/// Which transaction statuses to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Show every transaction.
    #[default]
    All,
    /// Only successful transactions.
    Success,
    /// Only pending transactions.
    Pending,
    /// Only failed transactions.
    Failed,
}

impl StatusFilter {
    /// Every option in the order it is offered to the user.
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Success,
        StatusFilter::Pending,
        StatusFilter::Failed,
    ];

    /// Parse a query string value. Unrecognised values show everything.
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "success" => Self::Success,
            "pending" => Self::Pending,
            "failed" => Self::Failed,
            _ => Self::All,
        }
    }

    /// The value used in query strings and form fields.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Success => "success",
            Self::Pending => "pending",
            Self::Failed => "failed",
        }
    }

    /// The text shown in the status drop-down.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Status",
            Self::Success => "Success",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
        }
    }

    /// Whether a transaction with `status` passes this filter.
    pub fn matches(self, status: TransactionStatus) -> bool {
        match self {
            Self::All => true,
            Self::Success => status == TransactionStatus::Success,
            Self::Pending => status == TransactionStatus::Pending,
            Self::Failed => status == TransactionStatus::Failed,
        }
    }
}

/// How far back to show transactions, counted from today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRangeFilter {
    /// The past 7 days.
    Last7Days,
    /// The past 30 days.
    #[default]
    Last30Days,
    /// The past 3 calendar months.
    Last3Months,
    /// The past calendar year.
    LastYear,
    /// No lower bound.
    AllTime,
}

impl DateRangeFilter {
    /// Every option in the order it is offered to the user.
    pub const ALL: [DateRangeFilter; 5] = [
        DateRangeFilter::Last7Days,
        DateRangeFilter::Last30Days,
        DateRangeFilter::Last3Months,
        DateRangeFilter::LastYear,
        DateRangeFilter::AllTime,
    ];

    /// Parse a query string value. Unrecognised values remove the lower bound.
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "last7days" => Self::Last7Days,
            "last30days" => Self::Last30Days,
            "last3months" => Self::Last3Months,
            "lastyear" => Self::LastYear,
            _ => Self::AllTime,
        }
    }

    /// The value used in query strings and form fields.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Last7Days => "last7days",
            Self::Last30Days => "last30days",
            Self::Last3Months => "last3months",
            Self::LastYear => "lastyear",
            Self::AllTime => "all-time",
        }
    }

    /// The text shown in the date range drop-down.
    pub fn label(self) -> &'static str {
        match self {
            Self::Last7Days => "Last 7 Days",
            Self::Last30Days => "Last 30 Days",
            Self::Last3Months => "Last 3 Months",
            Self::LastYear => "Last Year",
            Self::AllTime => "All Time",
        }
    }
}

/// The filters currently applied to the transaction history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterState {
    /// The selected status.
    pub status: StatusFilter,
    /// The selected date range.
    pub date_range: DateRangeFilter,
}

/// The raw filter parameters from a query string or form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterQuery {
    /// The status filter, e.g. "pending".
    pub status: Option<String>,
    /// The date range filter, e.g. "last3months".
    pub range: Option<String>,
}

impl From<FilterQuery> for FilterState {
    fn from(query: FilterQuery) -> Self {
        Self {
            status: query
                .status
                .as_deref()
                .map(StatusFilter::parse_lenient)
                .unwrap_or_default(),
            date_range: query
                .range
                .as_deref()
                .map(DateRangeFilter::parse_lenient)
                .unwrap_or_default(),
        }
    }
}

/// The earliest date included by `range`, or `None` if there is no lower bound.
///
/// Month and year steps keep the day of the month, clamped to the length of
/// the target month (e.g. 31 May minus 3 months is 28 or 29 February).
pub fn date_range_cutoff(range: DateRangeFilter, today: Date) -> Option<Date> {
    match range {
        DateRangeFilter::Last7Days => Some(days_before(today, 7)),
        DateRangeFilter::Last30Days => Some(days_before(today, 30)),
        DateRangeFilter::Last3Months => Some(months_before(today, 3)),
        DateRangeFilter::LastYear => Some(months_before(today, 12)),
        DateRangeFilter::AllTime => None,
    }
}

fn days_before(date: Date, days: i64) -> Date {
    date.checked_sub(Duration::days(days)).unwrap_or(Date::MIN)
}

fn months_before(date: Date, months: i32) -> Date {
    let month_index = date.year() * 12 + i32::from(u8::from(date.month())) - 1 - months;
    let year = month_index.div_euclid(12);
    // rem_euclid(12) is always in 0..12
    let month = Month::January.nth_next(month_index.rem_euclid(12) as u8);

    (1..=date.day())
        .rev()
        .find_map(|day| Date::from_calendar_date(year, month, day).ok())
        .unwrap_or(Date::MIN)
}

/// Select the transactions that pass both filters, keeping their order.
///
/// A transaction passes the date range filter if its date is on or after
/// [date_range_cutoff] for `today`.
pub fn filter_transactions<'a, I>(
    transactions: I,
    filter: &FilterState,
    today: Date,
) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let cutoff = date_range_cutoff(filter.date_range, today);

    transactions
        .into_iter()
        .filter(|transaction| filter.status.matches(transaction.status))
        .filter(|transaction| cutoff.is_none_or(|cutoff| transaction.date >= cutoff))
        .collect()
}

#[cfg(test)]
mod filter_tests {
    use time::{Date, macros::date};

    use crate::transaction::core::{Transaction, TransactionStatus, TransactionStore};

    use super::{
        DateRangeFilter, FilterQuery, FilterState, StatusFilter, date_range_cutoff,
        filter_transactions,
    };

    const TODAY: Date = date!(2025-06-15);

    fn scenario_transactions() -> Vec<Transaction> {
        vec![
            Transaction::new(
                "A",
                "50GB Data Package",
                date!(2025-06-10),
                150_000,
                TransactionStatus::Success,
            ),
            Transaction::new(
                "B",
                "5GB Data Package",
                date!(2025-06-05),
                50_000,
                TransactionStatus::Pending,
            ),
            Transaction::new(
                "C",
                "15GB Data Package",
                date!(2025-04-01),
                100_000,
                TransactionStatus::Success,
            ),
        ]
    }

    fn success_and_pending_purchases() -> Vec<Transaction> {
        vec![
            Transaction::new(
                "T1",
                "50GB Data Package",
                date!(2025-06-15),
                150_000,
                TransactionStatus::Success,
            ),
            Transaction::new(
                "T2",
                "5GB Data Package",
                date!(2025-06-05),
                50_000,
                TransactionStatus::Pending,
            ),
        ]
    }

    fn ids(transactions: &[&Transaction]) -> Vec<String> {
        transactions.iter().map(|transaction| transaction.id.to_string()).collect()
    }

    fn every_filter() -> Vec<FilterState> {
        StatusFilter::ALL
            .into_iter()
            .flat_map(|status| {
                DateRangeFilter::ALL
                    .into_iter()
                    .map(move |date_range| FilterState { status, date_range })
            })
            .collect()
    }

    #[test]
    fn last_30_days_excludes_older_transactions() {
        let transactions = scenario_transactions();
        let filter = FilterState {
            status: StatusFilter::All,
            date_range: DateRangeFilter::Last30Days,
        };

        let got = filter_transactions(&transactions, &filter, TODAY);

        assert_eq!(ids(&got), ["A", "B"]);
    }

    #[test]
    fn pending_within_last_7_days() {
        let transactions = scenario_transactions();
        let filter = FilterState {
            status: StatusFilter::Pending,
            date_range: DateRangeFilter::Last7Days,
        };

        let got = filter_transactions(&transactions, &filter, TODAY);

        assert!(got.is_empty(), "got {:?}", ids(&got));
    }

    #[test]
    fn success_within_last_30_days() {
        let transactions = success_and_pending_purchases();
        let filter = FilterState {
            status: StatusFilter::Success,
            date_range: DateRangeFilter::Last30Days,
        };

        let got = filter_transactions(&transactions, &filter, date!(2025-06-20));

        assert_eq!(ids(&got), ["T1"]);
    }

    #[test]
    fn any_status_within_last_7_days() {
        let transactions = success_and_pending_purchases();
        let filter = FilterState {
            status: StatusFilter::All,
            date_range: DateRangeFilter::Last7Days,
        };

        let got = filter_transactions(&transactions, &filter, date!(2025-06-20));

        assert_eq!(ids(&got), ["T1"]);
    }

    #[test]
    fn all_status_all_time_is_identity() {
        let store = TransactionStore::sample();
        let filter = FilterState {
            status: StatusFilter::All,
            date_range: DateRangeFilter::AllTime,
        };

        let got = filter_transactions(store.all(), &filter, TODAY);

        assert_eq!(got, store.all().iter().collect::<Vec<_>>());
    }

    #[test]
    fn result_is_an_ordered_subsequence() {
        let store = TransactionStore::sample();

        for filter in every_filter() {
            let got = filter_transactions(store.all(), &filter, date!(2025-10-20));

            let mut remaining = store.all().iter();
            for transaction in &got {
                assert!(
                    remaining.any(|candidate| std::ptr::eq(candidate, *transaction)),
                    "{filter:?} produced {:?} out of order",
                    transaction.id
                );
            }
        }
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let store = TransactionStore::sample();

        for filter in every_filter() {
            let once = filter_transactions(store.all(), &filter, date!(2025-10-20));
            let twice = filter_transactions(once.iter().copied(), &filter, date!(2025-10-20));

            assert_eq!(once, twice, "{filter:?}");
        }
    }

    #[test]
    fn status_filter_only_keeps_matching_status() {
        let store = TransactionStore::sample();
        let filter = FilterState {
            status: StatusFilter::Failed,
            date_range: DateRangeFilter::AllTime,
        };

        let got = filter_transactions(store.all(), &filter, date!(2025-10-20));

        assert_eq!(ids(&got), ["TXN123460"]);
    }

    #[test]
    fn cutoff_is_inclusive() {
        let transactions = vec![Transaction::new(
            "edge",
            "5GB Data Package",
            date!(2025-06-08),
            50_000,
            TransactionStatus::Success,
        )];
        let filter = FilterState {
            status: StatusFilter::All,
            date_range: DateRangeFilter::Last7Days,
        };

        let got = filter_transactions(&transactions, &filter, TODAY);

        assert_eq!(ids(&got), ["edge"]);
    }

    #[test]
    fn cutoffs_for_each_range() {
        assert_eq!(
            date_range_cutoff(DateRangeFilter::Last7Days, TODAY),
            Some(date!(2025-06-08))
        );
        assert_eq!(
            date_range_cutoff(DateRangeFilter::Last30Days, TODAY),
            Some(date!(2025-05-16))
        );
        assert_eq!(
            date_range_cutoff(DateRangeFilter::Last3Months, TODAY),
            Some(date!(2025-03-15))
        );
        assert_eq!(
            date_range_cutoff(DateRangeFilter::LastYear, TODAY),
            Some(date!(2024-06-15))
        );
        assert_eq!(date_range_cutoff(DateRangeFilter::AllTime, TODAY), None);
    }

    #[test]
    fn month_steps_clamp_to_month_length() {
        assert_eq!(
            date_range_cutoff(DateRangeFilter::Last3Months, date!(2025-05-31)),
            Some(date!(2025-02-28))
        );
        assert_eq!(
            date_range_cutoff(DateRangeFilter::Last3Months, date!(2024-05-31)),
            Some(date!(2024-02-29))
        );
        assert_eq!(
            date_range_cutoff(DateRangeFilter::LastYear, date!(2024-02-29)),
            Some(date!(2023-02-28))
        );
        assert_eq!(
            date_range_cutoff(DateRangeFilter::Last3Months, date!(2025-01-10)),
            Some(date!(2024-10-10))
        );
    }

    #[test]
    fn missing_query_parameters_use_defaults() {
        let got = FilterState::from(FilterQuery::default());

        assert_eq!(
            got,
            FilterState {
                status: StatusFilter::All,
                date_range: DateRangeFilter::Last30Days,
            }
        );
    }

    #[test]
    fn unknown_query_values_are_unrestricted() {
        let got = FilterState::from(FilterQuery {
            status: Some("refunded".to_owned()),
            range: Some("last-decade".to_owned()),
        });

        assert_eq!(
            got,
            FilterState {
                status: StatusFilter::All,
                date_range: DateRangeFilter::AllTime,
            }
        );
    }

    #[test]
    fn query_values_parse_back() {
        for filter in every_filter() {
            let got = FilterState::from(FilterQuery {
                status: Some(filter.status.as_query_value().to_owned()),
                range: Some(filter.date_range.as_query_value().to_owned()),
            });

            assert_eq!(got, filter);
        }
    }
}
