//! Plain-text renderers for the CLI views.
//!
//! Each `render_*` builds the whole view as a `String` so output can be
//! asserted in tests; `main` only prints it.

use std::fmt::{self, Write as _};

use chrono::{DateTime, Utc};
use tickerbrief_chart::{ChartState, ChartView, Line};
use tickerbrief_core::display::{
    confidence_percent, crowd_sentiment, sentiment_bar, stance_tone, trade_tone, Bucket,
};
use tickerbrief_core::metrics::{format_millions, options_gauge_percent};
use tickerbrief_core::{
    classify_options_flow, classify_safety, compare_volume, partition_articles, Article,
    HistoryPeriod, PricePoint, TickerBrief, Tone,
};

const BAR_WIDTH: usize = 40;

fn tone_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Positive => "[+]",
        Tone::Caution => "[!]",
        Tone::Negative => "[-]",
        Tone::Neutral => "[ ]",
    }
}

fn bar_glyph(bucket: Bucket) -> char {
    match bucket {
        Bucket::Bullish => '+',
        Bucket::Neutral => '=',
        Bucket::Bearish => '-',
    }
}

/// Runs a writer against a fresh `String`.
fn into_string(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    // fmt::Write for String never returns an error.
    let _ = write(&mut out);
    out
}

pub(crate) fn render_brief(brief: &TickerBrief, generated_at: DateTime<Utc>) -> String {
    into_string(|out| write_brief(out, brief, generated_at))
}

pub(crate) fn render_brief_error(symbol: &str) -> String {
    format!(
        "Error loading data for {symbol}\nMake sure the backend is running and the ticker is valid.\n"
    )
}

fn write_brief(out: &mut String, brief: &TickerBrief, generated_at: DateTime<Utc>) -> fmt::Result {
    let safety = classify_safety(brief.safety_score);
    write!(out, "{}  {} {}", brief.symbol, tone_marker(safety.tone()), safety.label())?;
    if let Some(score) = brief.safety_score.filter(|s| s.is_finite()) {
        write!(out, " ({})", confidence_percent(score))?;
    }
    writeln!(out)?;
    writeln!(out, "Generated {}", generated_at.format("%Y-%m-%d %H:%M UTC"))?;
    writeln!(out)?;

    write_sentiment_bar(out, brief)?;
    writeln!(out)?;

    // Column badges show the backend's counts; the lists show the sample.
    let partition = partition_articles(&brief.articles);
    let columns = [
        ("Bullish", brief.bullish_count, &partition.bullish, "No bullish news found."),
        ("Neutral / Overlap", brief.neutral_count, &partition.neutral, "No neutral news found."),
        ("Bearish", brief.bearish_count, &partition.bearish, "No bearish news found."),
    ];
    for (title, count, articles, placeholder) in columns {
        writeln!(out, "{title} ({count})")?;
        if articles.is_empty() {
            writeln!(out, "  {placeholder}")?;
        }
        for article in articles {
            write_article(out, article)?;
        }
        writeln!(out)?;
    }

    write_market(out, brief)?;
    write_breakdown(out, brief)?;
    if brief.has_insider_activity() {
        writeln!(out)?;
        write_insiders(out, brief)?;
    }
    Ok(())
}

fn write_sentiment_bar(out: &mut String, brief: &TickerBrief) -> fmt::Result {
    let Some(segments) =
        sentiment_bar(brief.bullish_count, brief.bearish_count, brief.neutral_count)
    else {
        return writeln!(out, "Sentiment: no coverage");
    };

    let bar: String = segments
        .iter()
        .flat_map(|segment| {
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_precision_loss,
                clippy::cast_sign_loss
            )]
            let width = (segment.percent / 100.0 * BAR_WIDTH as f64).round() as usize;
            std::iter::repeat(bar_glyph(segment.bucket)).take(width.max(1))
        })
        .collect();
    writeln!(out, "Sentiment [{bar}]")?;
    for segment in &segments {
        writeln!(out, "  {} {}", tone_marker(segment.bucket.tone()), segment.tooltip())?;
    }
    Ok(())
}

fn write_article(out: &mut String, article: &Article) -> fmt::Result {
    let stance = &article.sentiment.stance;
    write!(
        out,
        "  {} {}  ({stance} {}%",
        tone_marker(stance_tone(stance)),
        article.headline,
        confidence_percent(article.sentiment.confidence)
    )?;
    if let Some(source) = article.source.as_deref().filter(|s| !s.is_empty()) {
        write!(out, ", {source}")?;
    }
    writeln!(out, ")")?;
    if let Some(link) = article.link.as_deref().filter(|l| !l.is_empty()) {
        writeln!(out, "      {link}")?;
    }
    Ok(())
}

fn write_market(out: &mut String, brief: &TickerBrief) -> fmt::Result {
    writeln!(out, "Market")?;
    if let Some(price) = brief.price {
        write!(out, "  Price    ${price:.2}")?;
        if let Some(change) = brief.change_percent {
            write!(out, "  ({:+.2}%)", change * 100.0)?;
        }
        writeln!(out)?;
    }

    if let Some(cmp) = compare_volume(brief.volume, brief.average_volume) {
        write!(
            out,
            "  Volume   {}  {} {} ({})  avg {}",
            format_millions(cmp.volume),
            tone_marker(cmp.direction.tone()),
            cmp.summary(),
            cmp.direction.as_str(),
            format_millions(cmp.average_volume)
        )?;
        if let Some(exchange) = brief.exchange.as_deref() {
            write!(out, "  {exchange}")?;
        }
        writeln!(out)?;
    }

    if let (Some(ratio), Some(flow)) =
        (brief.put_call_ratio, classify_options_flow(brief.put_call_ratio))
    {
        writeln!(
            out,
            "  Options  P/C {ratio}  {} {}  gauge {:.0}%",
            tone_marker(flow.tone()),
            flow.label(),
            options_gauge_percent(ratio)
        )?;
    }
    Ok(())
}

fn write_breakdown(out: &mut String, brief: &TickerBrief) -> fmt::Result {
    writeln!(out, "Market Sentiment")?;
    let (retail, retail_tone) = crowd_sentiment(brief.retail_sentiment.as_deref());
    writeln!(out, "  Retail (Social)  {} {retail}", tone_marker(retail_tone))?;
    let (insider, insider_tone) = crowd_sentiment(brief.insider_sentiment.as_deref());
    writeln!(out, "  Insiders         {} {insider}", tone_marker(insider_tone))?;

    writeln!(out, "  Top Institutions")?;
    match brief.institutional_holders.as_deref() {
        Some(holders) if !holders.is_empty() => {
            for holder in holders {
                writeln!(out, "    - {holder}")?;
            }
        }
        _ => writeln!(out, "    No data available")?,
    }
    Ok(())
}

fn write_insiders(out: &mut String, brief: &TickerBrief) -> fmt::Result {
    if let Some(trades) = brief.politician_trades.as_deref().filter(|t| !t.is_empty()) {
        writeln!(out, "Politician Trading")?;
        for trade in trades {
            writeln!(
                out,
                "  {} ({})  {}  {} {}  {}",
                trade.politician,
                trade.party,
                trade.date,
                tone_marker(trade_tone(&trade.trade_type)),
                trade.trade_type,
                trade.amount
            )?;
        }
    }
    if let Some(insiders) = brief.corporate_insiders.as_deref().filter(|t| !t.is_empty()) {
        writeln!(out, "Corporate Insiders")?;
        for tx in insiders {
            writeln!(
                out,
                "  {}  {}  {} shares  {}",
                tx.holder, tx.date, tx.shares, tx.transaction_text
            )?;
        }
    }
    Ok(())
}

pub(crate) fn render_history(symbol: &str, period: HistoryPeriod, series: &[PricePoint]) -> String {
    into_string(|out| {
        writeln!(out, "{symbol} {} ({} points)", period.label(), series.len())?;
        if series.is_empty() {
            return writeln!(out, "No data available");
        }
        writeln!(
            out,
            "{:<22}{:>10}{:>10}{:>10}{:>10}{:>10}",
            "TIME", "PRICE", "MA50", "MA100", "EMA50", "EMA100"
        )?;
        for p in series {
            writeln!(
                out,
                "{:<22}{:>10.2}{:>10}{:>10}{:>10}{:>10}",
                p.time,
                p.price,
                fmt_opt(p.ma50),
                fmt_opt(p.ma100),
                fmt_opt(p.ema50),
                fmt_opt(p.ema100)
            )?;
        }
        Ok(())
    })
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "\u{2014}".to_string(), |v| format!("{v:.2}"))
}

pub(crate) fn render_chart(state: &ChartState, view: &ChartView<'_>) -> String {
    into_string(|out| {
        let buttons: Vec<String> = state
            .range_buttons()
            .iter()
            .map(|b| {
                if b.selected {
                    format!("[{}]", b.label)
                } else {
                    b.label.to_string()
                }
            })
            .collect();
        writeln!(out, "{}  {}", state.symbol(), buttons.join(" "))?;

        match view {
            ChartView::Loading => writeln!(out, "Loading..."),
            ChartView::NoData => writeln!(out, "No data available"),
            ChartView::Ready {
                domain,
                series,
                ma_kind,
                refreshing,
                ..
            } => {
                writeln!(out, "Overlay {}", ma_kind.label())?;
                writeln!(out, "Y axis {:.2} .. {:.2}", domain.min, domain.max)?;
                for line in [&series.price, &series.short_ma, &series.long_ma] {
                    write_line_summary(out, line)?;
                }
                if *refreshing {
                    writeln!(out, "(refreshing)")?;
                }
                Ok(())
            }
        }
    })
}

fn write_line_summary(out: &mut String, line: &Line<'_>) -> fmt::Result {
    match (line.points.first(), line.points.last()) {
        (Some(first), Some(last)) => writeln!(
            out,
            "  {:<12} {} points  {} {:.2} -> {} {:.2}",
            line.name,
            line.points.len(),
            first.time,
            first.value,
            last.time,
            last.value
        ),
        _ => writeln!(out, "  {:<12} no data", line.name),
    }
}

pub(crate) fn render_trending(tickers: &[String]) -> String {
    into_string(|out| {
        writeln!(out, "Trending")?;
        for (i, ticker) in tickers.iter().enumerate() {
            writeln!(out, "{:>3}. {ticker}", i + 1)?;
        }
        Ok(())
    })
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
