//! Candlestick pattern detection.
//!
//! Scans a bar series and reports, per pattern, the indices of bars that
//! complete it. Multi-bar patterns are reported at their final bar. Output is
//! a `BTreeMap` so iteration order is deterministic.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::ohlcv::Bar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PatternKind {
    #[serde(rename = "doji")]
    Doji,
    #[serde(rename = "hammer")]
    Hammer,
    #[serde(rename = "engulfing")]
    BullishEngulfing,
    #[serde(rename = "threewhitesoldiers")]
    ThreeWhiteSoldiers,
    #[serde(rename = "threeblackcrows")]
    ThreeBlackCrows,
    #[serde(rename = "morningstar")]
    MorningStar,
    #[serde(rename = "eveningstar")]
    EveningStar,
}

impl PatternKind {
    pub const ALL: [PatternKind; 7] = [
        PatternKind::Doji,
        PatternKind::Hammer,
        PatternKind::BullishEngulfing,
        PatternKind::ThreeWhiteSoldiers,
        PatternKind::ThreeBlackCrows,
        PatternKind::MorningStar,
        PatternKind::EveningStar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Doji => "doji",
            PatternKind::Hammer => "hammer",
            PatternKind::BullishEngulfing => "engulfing",
            PatternKind::ThreeWhiteSoldiers => "threewhitesoldiers",
            PatternKind::ThreeBlackCrows => "threeblackcrows",
            PatternKind::MorningStar => "morningstar",
            PatternKind::EveningStar => "eveningstar",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open and close differ by less than 10% of the bar's range.
fn is_doji(bar: &Bar) -> bool {
    bar.body() < 0.1 * bar.range()
}

/// Small body near the top, long lower shadow, negligible upper shadow.
fn is_hammer(bar: &Bar) -> bool {
    bar.body() < 0.3 * bar.range()
        && bar.lower_shadow() > 2.0 * bar.body()
        && bar.upper_shadow() < 0.1 * bar.range()
}

/// A bullish bar whose body engulfs the previous bearish bar's body.
fn is_bullish_engulfing(prev: &Bar, curr: &Bar) -> bool {
    prev.is_bearish() && curr.is_bullish() && curr.open < prev.close && curr.close > prev.open
}

/// Three consecutive bullish bars, each opening above the prior close.
fn is_three_white_soldiers(a: &Bar, b: &Bar, c: &Bar) -> bool {
    a.is_bullish()
        && b.is_bullish()
        && c.is_bullish()
        && a.close < b.open
        && b.close < c.open
}

/// Three consecutive bearish bars, each opening below the prior close.
fn is_three_black_crows(a: &Bar, b: &Bar, c: &Bar) -> bool {
    a.is_bearish()
        && b.is_bearish()
        && c.is_bearish()
        && a.close > b.open
        && b.close > c.open
}

/// Bearish bar, small-bodied middle bar, then a bullish bar closing above the
/// midpoint of the first bar's body.
fn is_morning_star(a: &Bar, b: &Bar, c: &Bar) -> bool {
    a.is_bearish()
        && b.body() < 0.3 * b.range()
        && c.is_bullish()
        && c.close > a.body_midpoint()
}

/// Bullish bar, small-bodied middle bar, then a bearish bar closing below the
/// midpoint of the first bar's body.
fn is_evening_star(a: &Bar, b: &Bar, c: &Bar) -> bool {
    a.is_bullish()
        && b.body() < 0.3 * b.range()
        && c.is_bearish()
        && c.close < a.body_midpoint()
}

pub fn detect_patterns(bars: &[Bar]) -> BTreeMap<PatternKind, Vec<usize>> {
    let mut found: BTreeMap<PatternKind, Vec<usize>> = BTreeMap::new();
    for kind in PatternKind::ALL {
        found.insert(kind, Vec::new());
    }

    for i in 2..bars.len() {
        let curr = &bars[i];
        let prev = &bars[i - 1];
        let prev_prev = &bars[i - 2];

        if is_doji(curr) {
            record(&mut found, PatternKind::Doji, i);
        }
        if is_hammer(curr) {
            record(&mut found, PatternKind::Hammer, i);
        }
        if is_bullish_engulfing(prev, curr) {
            record(&mut found, PatternKind::BullishEngulfing, i);
        }
        if i >= 4 {
            if is_three_white_soldiers(prev_prev, prev, curr) {
                record(&mut found, PatternKind::ThreeWhiteSoldiers, i);
            }
            if is_three_black_crows(prev_prev, prev, curr) {
                record(&mut found, PatternKind::ThreeBlackCrows, i);
            }
        }
        if i >= 3 {
            if is_morning_star(prev_prev, prev, curr) {
                record(&mut found, PatternKind::MorningStar, i);
            }
            if is_evening_star(prev_prev, prev, curr) {
                record(&mut found, PatternKind::EveningStar, i);
            }
        }
    }

    found
}

fn record(found: &mut BTreeMap<PatternKind, Vec<usize>>, kind: PatternKind, index: usize) {
    found.entry(kind).or_default().push(index);
}
