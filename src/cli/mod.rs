// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Command line: `sleuth build | search | inspect`.

pub mod commands;
pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_SNIPPET_LENGTH};

#[derive(Parser, Debug)]
#[command(
    name = "sleuth",
    about = "Typo-tolerant offline search: build payloads, query them, look inside",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the index and trie payloads from documents
    Build {
        /// Store JSON file, or a directory containing manifest.json and document files
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for the .json.br payloads
        #[arg(short, long)]
        output: PathBuf,

        /// Don't draw a progress spinner
        #[arg(long)]
        no_progress: bool,
    },

    /// Run a query against built payloads
    Search {
        /// Directory holding the payloads
        dir: PathBuf,

        /// The query, in the index's query syntax
        query: String,

        /// Only keep documents where FIELD equals VALUE (`field:value`)
        #[arg(short, long)]
        facet: Option<String>,

        /// Maximum number of results to print
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Characters of context per snippet (0 shows whole fields)
        #[arg(long, default_value_t = DEFAULT_SNIPPET_LENGTH)]
        snippet_length: usize,

        /// Edit budget for the trie lookup
        #[arg(long, default_value_t = DEFAULT_MAX_EDIT_DISTANCE)]
        max_distance: usize,

        /// Prefix for result URLs
        #[arg(long, default_value = "")]
        site_root: String,

        /// Report query parse errors on the debug log
        #[arg(long)]
        debug: bool,

        /// Print results as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show what a pair of payloads contains
    Inspect {
        /// Directory holding the payloads
        dir: PathBuf,
    },
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Build {
            input,
            output,
            no_progress,
        } => commands::build(&input, &output, !no_progress),
        Commands::Search {
            dir,
            query,
            facet,
            limit,
            snippet_length,
            max_distance,
            site_root,
            debug,
            json,
        } => {
            let config = crate::config::SearchConfig::default()
                .with_snippet_length(snippet_length)
                .with_max_edit_distance(max_distance)
                .with_site_root_path(site_root)
                .with_debug(debug);
            commands::search(
                &dir,
                &query,
                commands::SearchArgs {
                    facet: facet.as_deref(),
                    limit,
                    config,
                    json,
                },
            )
        }
        Commands::Inspect { dir } => commands::inspect(&dir),
    }
}
