// ABOUTME: Server binary for the rolegate session authentication service
// ABOUTME: Loads configuration, builds the session pipeline, and serves HTTP until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Rolegate Server Binary
//!
//! `rolegate-server` serves the login, logout, and role-scoped routes.
//! `rolegate-server hash-password <PASSWORD>` prints a bcrypt hash for the
//! `password_hash` field of a users file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rolegate::{
    config::environment::ServerConfig, logging, password, resources::ServerResources, server,
    transport::TransportKind,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "rolegate-server")]
#[command(about = "Role-gated session authentication server")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override the session transport (cookie or bearer)
    #[arg(long)]
    transport: Option<TransportKind>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a bcrypt hash for a users file entry
    HashPassword {
        /// Plaintext password to hash
        password: String,

        /// Bcrypt cost
        #[arg(long, default_value_t = password::DEFAULT_COST)]
        cost: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(Command::HashPassword {
        password: plain,
        cost,
    }) = args.command
    {
        let hash = password::hash_password(&plain, cost)?;
        println!("{hash}");
        return Ok(());
    }

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(transport) = args.transport {
        config = config.with_transport(transport);
    }
    config.validate()?;

    info!("{}", config.summary());

    let port = config.http_port;
    let resources = Arc::new(
        ServerResources::from_config(config).context("failed to initialize server resources")?,
    );

    if let Err(e) = server::run(resources, port).await {
        error!("Server error: {e:#}");
        return Err(e);
    }
    Ok(())
}
