use std::sync::{Arc, Mutex};

use market::Period;

/// Direction of the most recent price move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn marker(&self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
            Trend::Neutral => "·",
        }
    }
}

/// One row of the price board. Carries the previous close between
/// refreshes so each update can be classified against the last one.
#[derive(Debug, Clone)]
pub struct PriceTile {
    pub symbol: String,
    pub previous_price: f64,
    pub text: String,
    pub trend: Option<Trend>,
}

impl PriceTile {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            previous_price: 0.0,
            text: "--".to_string(),
            trend: None,
        }
    }

    /// Takes the freshest closing price: rewrites the display text,
    /// classifies the move against the stored previous price, then
    /// stores the new close. Exactly one direction is set at a time.
    pub fn apply_close(&mut self, close: f64) {
        self.text = format!("${close:.2}");

        self.trend = Some(if close > self.previous_price {
            Trend::Up
        } else if close < self.previous_price {
            Trend::Down
        } else {
            Trend::Neutral
        });

        self.previous_price = close;
    }
}

/// Time-range picker. At most one period is active; selecting the
/// active one again just re-confirms it.
#[derive(Debug, Clone)]
pub struct PeriodSelector {
    periods: Vec<Period>,
    active: usize,
}

impl Default for PeriodSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl PeriodSelector {
    pub fn new() -> Self {
        let periods = Period::ALL.to_vec();
        let active = periods
            .iter()
            .position(|p| *p == Period::Year1)
            .unwrap_or(0);

        Self { periods, active }
    }

    pub fn select(&mut self, period: Period) -> Period {
        if let Some(idx) = self.periods.iter().position(|p| *p == period) {
            self.active = idx;
        }
        self.periods[self.active]
    }

    pub fn active(&self) -> Period {
        self.periods[self.active]
    }

    pub fn is_active(&self, period: Period) -> bool {
        self.active() == period
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }
}

/// Hover hint for a board element.
#[derive(Debug, Clone)]
pub struct Tooltip {
    pub target: String,
    pub text: String,
}

/// Click-through note with a title, for elements that opt into one.
#[derive(Debug, Clone)]
pub struct Popover {
    pub target: String,
    pub title: String,
    pub body: String,
}

pub type SharedTile = Arc<Mutex<PriceTile>>;

/// The interactive price board: one tile per watched symbol, a period
/// picker, and a hint widget for every element that asks for one.
pub struct Dashboard {
    pub tiles: Vec<SharedTile>,
    pub selector: PeriodSelector,
    pub tooltips: Vec<Tooltip>,
    pub popovers: Vec<Popover>,
}

impl Dashboard {
    pub fn new(symbols: &[String]) -> Self {
        let tiles: Vec<SharedTile> = symbols
            .iter()
            .map(|s| Arc::new(Mutex::new(PriceTile::new(s.clone()))))
            .collect();

        let tooltips = symbols
            .iter()
            .map(|s| Tooltip {
                target: s.clone(),
                text: format!("Latest close for {s}, refreshed every 60 seconds"),
            })
            .collect();

        let popovers = if symbols.is_empty() {
            Vec::new()
        } else {
            vec![Popover {
                target: "period-picker".to_string(),
                title: "Chart range".to_string(),
                body: "Switches the time range used for chart data.".to_string(),
            }]
        };

        Self {
            tiles,
            selector: PeriodSelector::new(),
            tooltips,
            popovers,
        }
    }
}

pub fn render_row(tile: &PriceTile) -> String {
    let marker = tile.trend.map(|t| t.marker()).unwrap_or(" ");
    format!("{:<8} {:>10} {}", tile.symbol, tile.text, marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rising_close_marks_the_tile_up() {
        let mut tile = PriceTile::new("AAPL");
        tile.previous_price = 100.0;

        tile.apply_close(105.0);

        assert_eq!(tile.text, "$105.00");
        assert_eq!(tile.previous_price, 105.0);
        assert_eq!(tile.trend, Some(Trend::Up));
    }

    #[test]
    fn falling_close_marks_the_tile_down() {
        let mut tile = PriceTile::new("AAPL");
        tile.previous_price = 100.0;

        tile.apply_close(95.5);

        assert_eq!(tile.text, "$95.50");
        assert_eq!(tile.trend, Some(Trend::Down));
    }

    #[test]
    fn unchanged_close_is_neutral() {
        let mut tile = PriceTile::new("AAPL");
        tile.previous_price = 100.0;

        tile.apply_close(100.0);

        assert_eq!(tile.text, "$100.00");
        assert_eq!(tile.trend, Some(Trend::Neutral));
    }

    #[test]
    fn first_refresh_counts_as_a_rise() {
        let mut tile = PriceTile::new("TSLA");
        tile.apply_close(42.0);

        assert_eq!(tile.trend, Some(Trend::Up));
        assert_eq!(tile.previous_price, 42.0);
    }

    #[test]
    fn selecting_a_period_deactivates_the_rest() {
        let mut selector = PeriodSelector::new();
        assert!(selector.is_active(Period::Year1));

        selector.select(Period::Month1);
        for &p in selector.periods() {
            assert_eq!(selector.is_active(p), p == Period::Month1);
        }
    }

    #[test]
    fn reselecting_the_active_period_is_idempotent() {
        let mut selector = PeriodSelector::new();
        selector.select(Period::Day5);
        selector.select(Period::Day5);

        assert!(selector.is_active(Period::Day5));
        assert_eq!(selector.active(), Period::Day5);
    }

    #[test]
    fn empty_board_builds_no_widgets() {
        let board = Dashboard::new(&[]);

        assert!(board.tiles.is_empty());
        assert!(board.tooltips.is_empty());
        assert!(board.popovers.is_empty());
    }

    #[test]
    fn board_attaches_one_hint_per_tile() {
        let board = Dashboard::new(&["AAPL".to_string(), "MSFT".to_string()]);

        assert_eq!(board.tiles.len(), 2);
        assert_eq!(board.tooltips.len(), 2);
        assert_eq!(board.popovers.len(), 1);
    }

    #[test]
    fn rendered_row_shows_price_and_marker() {
        let mut tile = PriceTile::new("MSFT");
        tile.apply_close(417.88);

        let row = render_row(&tile);
        assert!(row.contains("MSFT"));
        assert!(row.contains("$417.88"));
        assert!(row.contains("▲"));
    }
}
