use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["tickerbrief"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_brief_command() {
    let cli = Cli::try_parse_from(["tickerbrief", "brief", "aapl"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Brief { ref symbol }) if symbol == "aapl"
    ));
}

#[test]
fn brief_requires_symbol() {
    assert!(Cli::try_parse_from(["tickerbrief", "brief"]).is_err());
}

#[test]
fn history_period_defaults_to_one_month() {
    let cli = Cli::try_parse_from(["tickerbrief", "history", "NVDA"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::History {
            period: HistoryPeriod::OneMonth,
            ..
        })
    ));
}

#[test]
fn history_accepts_wire_period() {
    let cli = Cli::try_parse_from(["tickerbrief", "history", "NVDA", "--period", "6mo"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::History {
            period: HistoryPeriod::SixMonths,
            ..
        })
    ));
}

#[test]
fn history_rejects_unknown_period() {
    let result = Cli::try_parse_from(["tickerbrief", "history", "NVDA", "--period", "2w"]);
    assert!(result.is_err());
}

#[test]
fn chart_defaults() {
    let cli = Cli::try_parse_from(["tickerbrief", "chart", "MSFT"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Chart {
            range: HistoryPeriod::OneMonth,
            ma: MaArg::Sma,
            ..
        })
    ));
}

#[test]
fn chart_with_range_and_ema() {
    let cli = Cli::try_parse_from(["tickerbrief", "chart", "MSFT", "--range", "max", "--ma", "ema"])
        .expect("expected valid cli args");
    let Some(Commands::Chart { symbol, range, ma }) = cli.command else {
        panic!("expected chart command");
    };
    assert_eq!(symbol, "MSFT");
    assert_eq!(range, HistoryPeriod::Max);
    assert_eq!(MovingAverageKind::from(ma), MovingAverageKind::Ema);
}

#[test]
fn parses_trending_command() {
    let cli = Cli::try_parse_from(["tickerbrief", "trending"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Trending)));
}

#[test]
fn parse_symbol_normalises_and_rejects_blank() {
    assert_eq!(parse_symbol("  tsla ").as_deref(), Ok("TSLA"));
    assert_eq!(parse_symbol("   "), Err(CoreError::EmptySymbol));
}
