use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_build_targets() {
    let cli = Cli::try_parse_from(["dbpack", "-p", "proj", "build", "shop", "catalog"]).unwrap();
    assert_eq!(cli.global.project_dir, PathBuf::from("proj"));
    match cli.command {
        Commands::Build(args) => {
            assert_eq!(args.targets, vec!["shop", "catalog"]);
            assert!(!args.all);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_build_all_conflicts_with_targets() {
    assert!(Cli::try_parse_from(["dbpack", "build", "--all", "shop"]).is_err());
}

#[test]
fn test_parse_export_flags() {
    let cli = Cli::try_parse_from([
        "dbpack", "export", "--file", "a.db3", "-o", "out", "--no-csv", "--json",
    ])
    .unwrap();
    match cli.command {
        Commands::Export(args) => {
            assert_eq!(args.file, Some(PathBuf::from("a.db3")));
            assert_eq!(args.output, Some(PathBuf::from("out")));
            assert!(args.no_csv);
            assert!(args.json);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_last_csv_flag_wins() {
    let cli = Cli::try_parse_from(["dbpack", "export", "--all", "--no-csv", "--csv"]).unwrap();
    match cli.command {
        Commands::Export(args) => {
            assert!(args.csv);
            assert!(!args.no_csv);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_output_requires_file() {
    assert!(Cli::try_parse_from(["dbpack", "export", "shop", "-o", "out"]).is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["dbpack", "sync", "-v", "-c", "alt.yml"]).unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.config, Some(PathBuf::from("alt.yml")));
    assert!(matches!(cli.command, Commands::Sync(_)));
}
