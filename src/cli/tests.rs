//! Unit tests for CLI commands

use crate::cli::commands::{format_resolution, format_routes};
use crate::cli::{Cli, Commands, PolicyArg};
use crate::demo::demo_engine;
use crate::router::MatchPolicy;
use clap::Parser;

#[test]
fn test_serve_defaults() {
    let cli = Cli::try_parse_from(["trierouter", "serve"]).unwrap();

    match cli.command {
        Commands::Serve { addr, policy } => {
            assert_eq!(addr, "0.0.0.0:9999");
            assert!(policy.is_none());
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_serve_with_flags() {
    let cli = Cli::try_parse_from([
        "trierouter",
        "serve",
        "--addr",
        "127.0.0.1:8080",
        "--policy",
        "static-first",
    ])
    .unwrap();

    match cli.command {
        Commands::Serve { addr, policy } => {
            assert_eq!(addr, "127.0.0.1:8080");
            assert_eq!(policy, Some(PolicyArg::StaticFirst));
            assert_eq!(MatchPolicy::from(PolicyArg::StaticFirst), MatchPolicy::StaticFirst);
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_resolve_parses_method_and_path() {
    let cli = Cli::try_parse_from(["trierouter", "resolve", "-m", "POST", "/login"]).unwrap();

    match cli.command {
        Commands::Resolve { method, path, .. } => {
            assert_eq!(method, "POST");
            assert_eq!(path, "/login");
        }
        _ => panic!("Expected Resolve command"),
    }
}

#[test]
fn test_rejects_unknown_policy() {
    assert!(Cli::try_parse_from(["trierouter", "routes", "--policy", "random"]).is_err());
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec!["trierouter", "serve"],
        vec!["trierouter", "routes"],
        vec!["trierouter", "routes", "--policy", "insertion-order"],
        vec!["trierouter", "resolve", "/hello"],
    ];

    for args in commands {
        let cli = Cli::try_parse_from(&args);
        assert!(cli.is_ok(), "Failed to parse command: {:?}", args);
    }
}

#[test]
fn test_format_routes_lists_demo_table() {
    let out = format_routes(&demo_engine(MatchPolicy::default()));
    assert_eq!(out.lines().count(), 6);
    assert!(out.contains("GET     /hello/:name"));
    assert!(out.contains("POST    /login"));
}

#[test]
fn test_format_resolution() {
    let engine = demo_engine(MatchPolicy::default());
    assert_eq!(
        format_resolution(&engine, "GET", "/assets/css/site.css"),
        "GET /assets/css/site.css -> /assets/*filepath filepath=css/site.css"
    );
    assert_eq!(
        format_resolution(&engine, "DELETE", "/hello"),
        "DELETE /hello -> 404 NOT FOUND"
    );
}
