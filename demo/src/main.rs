//! warden: project policy demo CLI
//!
//! Runs the reference scenarios against in-memory storage, or evaluates a
//! single authorization decision from the command line.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- ownership
//!   cargo run -p demo -- lifecycle --config warden.toml
//!   cargo run -p demo -- check --actor-id 2 --roles USER --action update --owner-id 1

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use warden_contracts::{Action, Actor, Role, WardenResult};
use warden_projects::scenarios::{lifecycle, ownership};
use warden_projects::{ProjectAclService, ServiceConfig};

// ── CLI definition ────────────────────────────────────────────────────────────

/// warden: role and ownership based authorization demo.
#[derive(Parser)]
#[command(
    name = "warden-demo",
    about = "warden project-policy demo",
    long_about = "Runs warden demo scenarios showing role grants, the manage wildcard,\n\
                  ownership predicates, and deny-by-default evaluation."
)]
struct Cli {
    /// Path to a TOML service configuration. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every scenario in sequence.
    RunAll,
    /// Scenario 1: five reference ownership decisions.
    Ownership,
    /// Scenario 2: create / read / update / delete through the project service.
    Lifecycle,
    /// Evaluate one decision against the project policy.
    Check {
        /// Identifier of the acting user.
        #[arg(long)]
        actor_id: u64,
        /// Comma-separated roles held by the actor (ADMIN, USER). Omit for none.
        #[arg(long, value_delimiter = ',')]
        roles: Vec<Role>,
        /// Requested action (create, read, update, delete, list, manage).
        #[arg(long)]
        action: Action,
        /// Owner of the target project. Omit to check without a resource.
        #[arg(long)]
        owner_id: Option<u64>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match ServiceConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Demo error: {}", e);
                std::process::exit(1);
            }
        },
        None => ServiceConfig::default(),
    };

    // RUST_LOG wins over the configured filter.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_target(false)
        .compact()
        .init();

    debug!(?config, "configuration loaded");

    let result = match cli.command {
        Command::RunAll => run_all(&config),
        Command::Ownership => ownership::run_scenario(),
        Command::Lifecycle => lifecycle::run_with_config(&config),
        Command::Check { actor_id, roles, action, owner_id } => {
            run_check(actor_id, roles, action, owner_id);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

fn run_all(config: &ServiceConfig) -> WardenResult<()> {
    print_banner();
    ownership::run_scenario()?;
    lifecycle::run_with_config(config)?;
    println!("All scenarios completed successfully.");
    Ok(())
}

fn run_check(actor_id: u64, roles: Vec<Role>, action: Action, owner_id: Option<u64>) {
    let acl = ProjectAclService::new();
    let case = ownership::Case {
        label: "command line",
        actor: Actor::new(actor_id, "cli", roles),
        action,
        owner: owner_id,
        expected: false,
    };

    let allowed = ownership::evaluate(&acl, &case);
    let target = owner_id
        .map(|id| format!("project owned by {}", id))
        .unwrap_or_else(|| "no resource".to_string());

    println!(
        "actor {} {:?} {} {}: {}",
        actor_id,
        case.actor.roles,
        action,
        target,
        if allowed { "ALLOW" } else { "DENY" }
    );
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("warden — Role & Ownership Authorization");
    println!("Project Policy Demo");
    println!("=======================================");
    println!();
    println!("Project policy:");
    println!("  ADMIN  manage                  (every action, any project)");
    println!("  USER   create, list, read      (unconditional)");
    println!("  USER   update, delete          (only when the actor owns the project)");
    println!("  —      anything else           (denied by default)");
    println!();
}
