use super::*;

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["cyberwatch", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["cyberwatch", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["cyberwatch"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn scrape_defaults() {
    let cli = Cli::try_parse_from(["cyberwatch", "scrape"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Scrape { dry_run: false, ref skip }) if skip.is_empty()
    ));
}

#[test]
fn scrape_dry_run_with_skip_list() {
    let cli = Cli::try_parse_from(["cyberwatch", "scrape", "--dry-run", "--skip", "1,3"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Scrape { dry_run: true, ref skip }) if *skip == vec![1, 3]
    ));
}

#[test]
fn only_dry_run_scrape_skips_the_database() {
    let dry = Cli::try_parse_from(["cyberwatch", "scrape", "--dry-run"]).unwrap();
    assert!(!needs_database(&dry.command.unwrap()));

    for args in [
        vec!["cyberwatch", "scrape"],
        vec!["cyberwatch", "db", "ping"],
        vec!["cyberwatch", "search", "linux"],
        vec!["cyberwatch", "trends"],
        vec!["cyberwatch", "feed"],
    ] {
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(needs_database(&cli.command.unwrap()));
    }
}

#[test]
fn scrape_rejects_non_numeric_skip() {
    assert!(Cli::try_parse_from(["cyberwatch", "scrape", "--skip", "one"]).is_err());
}

#[test]
fn search_trims_term_and_defaults_limit() {
    let cli = Cli::try_parse_from(["cyberwatch", "search", "  docker "]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Search { ref term, limit: 20 }) if term == "docker"
    ));
}

#[test]
fn search_rejects_short_term() {
    assert!(Cli::try_parse_from(["cyberwatch", "search", "a"]).is_err());
    assert!(Cli::try_parse_from(["cyberwatch", "search", "  x  "]).is_err());
}

#[test]
fn search_rejects_zero_limit() {
    assert!(Cli::try_parse_from(["cyberwatch", "search", "rust", "--limit", "0"]).is_err());
}

#[test]
fn trends_defaults_come_from_config() {
    let cli = Cli::try_parse_from(["cyberwatch", "trends"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Trends {
            days: None,
            top: None
        })
    ));
}

#[test]
fn trends_accepts_explicit_window() {
    let cli = Cli::try_parse_from(["cyberwatch", "trends", "--days", "30", "--top", "10"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Trends {
            days: Some(30),
            top: Some(10)
        })
    ));
}

#[test]
fn days_outside_one_to_365_are_rejected() {
    assert!(Cli::try_parse_from(["cyberwatch", "trends", "--days", "0"]).is_err());
    assert!(Cli::try_parse_from(["cyberwatch", "feed", "--days", "366"]).is_err());
    assert!(Cli::try_parse_from(["cyberwatch", "feed", "--days", "365"]).is_ok());
}

#[test]
fn feed_defaults() {
    let cli = Cli::try_parse_from(["cyberwatch", "feed"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Feed {
            days: 90,
            query: None,
            ref sources,
            limit: 50,
            export: None,
        }) if sources.is_empty()
    ));
}

#[test]
fn feed_accepts_repeated_sources_and_export() {
    let cli = Cli::try_parse_from([
        "cyberwatch",
        "feed",
        "--source",
        "[CYBER] Zataz",
        "--source",
        "Korben",
        "--query",
        "linux",
        "--export",
        "out.csv",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Feed {
            sources,
            query,
            export,
            ..
        }) => {
            assert_eq!(sources, vec!["[CYBER] Zataz", "Korben"]);
            assert_eq!(query.as_deref(), Some("linux"));
            assert_eq!(export, Some(PathBuf::from("out.csv")));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn ellipsize_marks_cut() {
    assert_eq!(ellipsize("short", 10), "short");
    assert_eq!(ellipsize("abcdefghijkl", 4), "abcd...");
    assert_eq!(ellipsize("éééééé", 3), "ééé...");
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}
