//! Variance detection and tolerance checks.
//!
//! Expected and captured slices are index-aligned with the event's currency
//! data. A pair is only ever compared when both amounts are present and
//! carry the same currency; anything else is insufficient data and is
//! skipped.

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::models::{CapturedAmount, ExpectedTender, Money, TillEventType};

/// Returns the expected and counted amounts at one index when they can be
/// compared.
pub(crate) fn comparable_pair<'a>(
    expected: &'a ExpectedTender,
    captured: &'a Option<CapturedAmount>,
) -> Option<(&'a Money, &'a Money)> {
    let expected = expected.amount.as_ref()?;
    let counted = &captured.as_ref()?.transfer_amount;
    expected.same_currency(counted).then_some((expected, counted))
}

fn comparable_pairs<'a>(
    expected: &'a [ExpectedTender],
    captured: &'a [Option<CapturedAmount>],
) -> impl Iterator<Item = (&'a Money, &'a Money)> + 'a {
    expected
        .iter()
        .zip(captured)
        .filter_map(|(e, c)| comparable_pair(e, c))
}

/// Returns true when the business engine supplied at least one expected amount.
pub fn expected_amount_known(expected: &[ExpectedTender]) -> bool {
    expected.iter().any(|e| e.amount.is_some())
}

/// Determines whether the counted amounts differ from the expected amounts.
///
/// * `TillToSafe` only flags over-counts: some tender counted above its
///   expected amount.
/// * `TillAudit` with no expected amount known flags any captured amount,
///   since the balance cannot be confirmed.
/// * Every other event flags any comparable tender whose counted amount
///   differs from its expected amount.
///
/// # Examples
///
/// ```
/// use till_engine::evaluation::has_variance;
/// use till_engine::models::{CapturedAmount, ExpectedTender, Money, TillEventType};
///
/// let expected = vec![ExpectedTender::new("cash_usd", Some(Money::parse("100.00", "USD").unwrap()))];
/// let under = vec![Some(CapturedAmount::transfer(Money::parse("90.00", "USD").unwrap()))];
///
/// assert!(has_variance(TillEventType::TillCount, &expected, &under));
/// assert!(!has_variance(TillEventType::TillToSafe, &expected, &under));
/// ```
pub fn has_variance(
    event_type: TillEventType,
    expected: &[ExpectedTender],
    captured: &[Option<CapturedAmount>],
) -> bool {
    let result = match event_type {
        TillEventType::TillToSafe => comparable_pairs(expected, captured)
            .any(|(expected, counted)| counted.checked_cmp(expected) == Some(Ordering::Greater)),
        TillEventType::TillAudit if !expected_amount_known(expected) => {
            captured.iter().any(Option::is_some)
        }
        _ => comparable_pairs(expected, captured)
            .any(|(expected, counted)| counted.amount != expected.amount),
    };

    debug!(event_type = %event_type, has_variance = result, "Variance detection");
    result
}

/// Determines whether the local-currency variance is within tolerance.
///
/// Only TillIn, TillOut, TillAudit, TillCount and TillReconciliation can
/// carry an acceptable variance; every other event returns false. Foreign
/// tenders are never inspected here.
///
/// With a threshold, the variance is acceptable when
/// `|expected - counted| <= threshold`. Without one, only an exact match is
/// acceptable. A threshold in a currency other than the local tender's is
/// ignored. When the local tender has no comparable pair there is nothing
/// to flag and the result is true.
///
/// # Examples
///
/// ```
/// use till_engine::evaluation::is_variance_acceptable;
/// use till_engine::models::{CapturedAmount, ExpectedTender, Money, TillEventType};
///
/// let usd = |s: &str| Money::parse(s, "USD").unwrap();
/// let expected = vec![ExpectedTender::new("cash_usd", Some(usd("100.00")))];
/// let counted = vec![Some(CapturedAmount::transfer(usd("104.00")))];
/// let threshold = usd("5.00");
///
/// assert!(is_variance_acceptable(
///     TillEventType::TillCount, Some(0), &expected, &counted, Some(&threshold),
/// ));
/// assert!(!is_variance_acceptable(
///     TillEventType::TillCount, Some(0), &expected, &counted, None,
/// ));
/// ```
pub fn is_variance_acceptable(
    event_type: TillEventType,
    local_currency_index: Option<usize>,
    expected: &[ExpectedTender],
    captured: &[Option<CapturedAmount>],
    acceptable_variance_threshold: Option<&Money>,
) -> bool {
    if !event_type.allows_acceptable_variance() {
        return false;
    }

    if event_type == TillEventType::TillAudit && !expected_amount_known(expected) {
        return false;
    }

    let pair = local_currency_index
        .and_then(|index| expected.get(index).zip(captured.get(index)))
        .and_then(|(e, c)| comparable_pair(e, c));

    let Some((expected, counted)) = pair else {
        return true;
    };

    let difference = (expected.amount - counted.amount).abs();

    let acceptable = match acceptable_variance_threshold {
        Some(threshold) if threshold.same_currency(expected) => difference <= threshold.amount,
        Some(threshold) => {
            warn!(
                threshold_currency = %threshold.currency,
                local_currency = %expected.currency,
                "Ignoring acceptable variance threshold in a foreign currency"
            );
            difference.is_zero()
        }
        None => difference.is_zero(),
    };

    debug!(
        event_type = %event_type,
        difference = %difference,
        acceptable,
        "Acceptable variance check"
    );
    acceptable
}

/// Returns true when any tender other than the local one has a counted
/// amount that differs from its expected amount.
///
/// Every index except `local_currency_index` is inspected, whatever its
/// `is_foreign_tender` flag says. With no local index, every tender is.
pub fn foreign_tender_variance(
    local_currency_index: Option<usize>,
    expected: &[ExpectedTender],
    captured: &[Option<CapturedAmount>],
) -> bool {
    expected
        .iter()
        .zip(captured)
        .enumerate()
        .filter(|(index, _)| Some(*index) != local_currency_index)
        .filter_map(|(_, (e, c))| comparable_pair(e, c))
        .any(|(expected, counted)| counted.amount != expected.amount)
}
