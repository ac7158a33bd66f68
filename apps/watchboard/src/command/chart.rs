use log::{debug, info};
use market::Period;
use market::indicators::trend::{
    analyze_trend, exponential_moving_average, macd, relative_strength, simple_moving_average,
};

use crate::dashboard::PeriodSelector;
use crate::{App, Error};

pub async fn run(app: &App, symbol: &str, period: Period) -> Result<(), Error> {
    info!("chart: invoked symbol={symbol} period={period}");

    let mut selector = PeriodSelector::new();
    let active = selector.select(period);
    debug!("chart: active period={active}");

    let history = app.client.fetch_history(symbol, Some(active)).await?;
    if history.candles.is_empty() {
        println!("No data for {symbol}.");
        return Ok(());
    }

    info!(
        "chart: data updated symbol={symbol} period={active} rows={}",
        history.candles.len()
    );

    let closes = history.closes();
    let last = |values: Vec<f64>| values.last().copied();

    println!(
        "{}: {} rows over {}",
        symbol.to_uppercase(),
        history.candles.len(),
        active
    );

    if let Some(ma) = last(simple_moving_average(&closes, 20)) {
        println!("MA20   {ma:>10.2}");
    }
    if let Some(ma) = last(simple_moving_average(&closes, 50)) {
        println!("MA50   {ma:>10.2}");
    }
    if let Some(ma) = last(simple_moving_average(&closes, 200)) {
        println!("MA200  {ma:>10.2}");
    }
    if let Some(ema) = last(exponential_moving_average(&closes, 12)) {
        println!("EMA12  {ema:>10.2}");
    }
    if let Some(ema) = last(exponential_moving_average(&closes, 26)) {
        println!("EMA26  {ema:>10.2}");
    }
    if let Some(rsi) = last(relative_strength(&closes, 14)) {
        println!("RSI14  {rsi:>10.2}");
    }
    if let Some(point) = macd(&closes).last() {
        println!(
            "MACD   {:>10.2}  signal {:.2}  histogram {:.2}",
            point.macd, point.signal, point.histogram
        );
    }

    let direction = format!("{:?}", analyze_trend(&closes, 20)).to_lowercase();
    println!("Trend  {direction:>10}");

    Ok(())
}
