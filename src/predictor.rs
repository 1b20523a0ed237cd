//! Replenishment prediction from purchase-gap history.
//!
//! For every product a location has bought repeatedly, the average gap between
//! purchase days gives its cycle. A product is due once the time since its last
//! purchase exceeds the cycle plus a grace buffer, and is presumed discontinued
//! once it exceeds a larger multiple of the cycle.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use chrono::{Days, NaiveDate};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::HistoryError;
use crate::model::{
    DocumentStatus, LinkedSuggestion, ProductQuestionMap, PurchaseEvent, PurchaseLine,
    ReorderSuggestion,
};
use crate::traits::PurchaseHistorySource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorOptions {
    /// Days of history, counted back from the reference date, to consider.
    pub lookback_days: u32,
    /// Distinct purchase days needed before a product has a cycle.
    pub min_recurrence: usize,
    /// Fraction of the cycle added before a product counts as due.
    pub grace_factor: f64,
    /// Multiple of the cycle after which a product is presumed discontinued.
    pub abandoned_factor: f64,
    pub max_suggestions: usize,
    /// Explanation attached to each suggestion. `{avg_cycle}` is replaced by
    /// the rounded cycle in days.
    pub reason_template: String,
}

impl Default for PredictorOptions {
    fn default() -> Self {
        Self {
            lookback_days: 180,
            min_recurrence: 2,
            grace_factor: 0.2,
            abandoned_factor: 4.0,
            max_suggestions: 5,
            reason_template: "Used to order every {avg_cycle} days".to_string(),
        }
    }
}

impl PredictorOptions {
    /// First date inside the lookback window ending at `today`.
    pub fn window_start(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_days(Days::new(u64::from(self.lookback_days)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Explanation text for a product with the given rounded cycle.
    pub fn reason(&self, avg_cycle: i64) -> String {
        self.reason_template
            .replace("{avg_cycle}", &avg_cycle.to_string())
    }
}

/// Cycle statistics for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleStats {
    pub product_name: String,
    pub avg_cycle: f64,
    pub days_since_last: i64,
}

impl CycleStats {
    /// Days since last purchase relative to the product's own cycle.
    pub fn urgency(&self) -> f64 {
        self.days_since_last as f64 / self.avg_cycle
    }

    pub fn is_due(&self, options: &PredictorOptions) -> bool {
        let threshold = self.avg_cycle * (1.0 + options.grace_factor);
        let abandoned_threshold = self.avg_cycle * options.abandoned_factor;
        let elapsed = self.days_since_last as f64;
        elapsed > threshold && elapsed < abandoned_threshold
    }
}

/// Collapse raw lines into one event per product per day, keeping completed documents only.
pub fn collapse_lines(lines: &[PurchaseLine]) -> Vec<PurchaseEvent> {
    lines
        .iter()
        .filter(|line| line.status == DocumentStatus::Completed)
        .map(|line| PurchaseEvent::new(line.product_name.clone(), line.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Compute cycle statistics from a product's distinct purchase days.
///
/// Returns `None` when fewer than two days are given, since there is no gap to average.
pub fn cycle_stats(product_name: &str, dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> Option<CycleStats> {
    let ordered: Vec<NaiveDate> = dates.iter().copied().collect();
    let gaps: Vec<i64> = ordered
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days())
        .collect();

    if gaps.is_empty() {
        return None;
    }

    let avg_cycle = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
    let last = *ordered.last()?;

    Some(CycleStats {
        product_name: product_name.to_string(),
        avg_cycle,
        days_since_last: (today - last).num_days(),
    })
}

/// Products from `history` that are due for reorder as of `today`, most urgent first.
pub fn suggest(history: &[PurchaseEvent], today: NaiveDate, options: &PredictorOptions) -> Vec<ReorderSuggestion> {
    let window_start = options.window_start(today);

    let mut by_product: BTreeMap<&str, BTreeSet<NaiveDate>> = BTreeMap::new();
    for event in history {
        if event.date < window_start || event.date > today {
            continue;
        }
        by_product
            .entry(event.product_name.as_str())
            .or_default()
            .insert(event.date);
    }

    if by_product.is_empty() {
        debug!(events = history.len(), "no purchase events inside lookback window");
        return Vec::new();
    }

    let recurring = by_product
        .iter()
        .filter(|(_, dates)| dates.len() >= options.min_recurrence);

    let mut due: Vec<CycleStats> = Vec::new();
    for (product_name, dates) in recurring {
        let Some(stats) = cycle_stats(product_name, dates, today) else {
            trace!(product = %product_name, "skipping product without purchase gaps");
            continue;
        };
        if stats.is_due(options) {
            due.push(stats);
        } else {
            trace!(
                product = %product_name,
                avg_cycle = stats.avg_cycle,
                days_since_last = stats.days_since_last,
                "product not due"
            );
        }
    }

    due.sort_by(by_urgency);
    due.truncate(options.max_suggestions);

    debug!(
        products = by_product.len(),
        due = due.len(),
        "reorder suggestions computed"
    );

    due.into_iter()
        .map(|stats| into_suggestion(stats, options))
        .collect()
}

/// Run [`suggest`] for many locations in parallel. Output order follows input order.
pub fn suggest_many<K>(
    histories: &[(K, Vec<PurchaseEvent>)],
    today: NaiveDate,
    options: &PredictorOptions,
) -> Vec<(K, Vec<ReorderSuggestion>)>
where
    K: Clone + Send + Sync,
{
    histories
        .par_iter()
        .map(|(key, history)| (key.clone(), suggest(history, today, options)))
        .collect()
}

/// Fetch a location's lines from `source` for the lookback window, then [`suggest`].
pub fn suggest_from_source<S>(
    source: &S,
    location_id: &str,
    today: NaiveDate,
    options: &PredictorOptions,
) -> Result<Vec<ReorderSuggestion>, HistoryError>
where
    S: PurchaseHistorySource,
{
    let lines = source.lines_for(location_id, options.window_start(today), today)?;
    let events = collapse_lines(&lines);
    Ok(suggest(&events, today, options))
}

/// Pair each suggestion with its question from `questions`.
pub fn link_questions(suggestions: &[ReorderSuggestion], questions: &ProductQuestionMap) -> Vec<LinkedSuggestion> {
    suggestions
        .iter()
        .map(|suggestion| LinkedSuggestion {
            question_id: questions
                .question_for(&suggestion.product_name)
                .map(str::to_string),
            suggestion: suggestion.clone(),
        })
        .collect()
}

/// Round to whole days, halves away from zero.
pub fn round_days(days: f64) -> i64 {
    days.round() as i64
}

fn by_urgency(a: &CycleStats, b: &CycleStats) -> Ordering {
    b.urgency()
        .total_cmp(&a.urgency())
        .then_with(|| a.product_name.cmp(&b.product_name))
}

fn into_suggestion(stats: CycleStats, options: &PredictorOptions) -> ReorderSuggestion {
    let avg_cycle = round_days(stats.avg_cycle);
    ReorderSuggestion {
        reason: options.reason(avg_cycle),
        product_name: stats.product_name,
        days_since_last: stats.days_since_last,
        avg_cycle,
    }
}
