// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "url-sentinel",
    version = "0.1.0",
    about = "Check whether URLs are reachable, directly or via a distributed check network",
    long_about = "url-sentinel checks each URL with a direct HTTP probe first. If the probe \
                  fails, it falls back to a distributed check network, classifies the \
                  per-node answers into countries, and ignores one excluded country. \
                  Results can be printed as a table, JSON, or exported to CSV."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands (check, probe)
//
// Each variant represents a different subcommand the user can run
// The fields inside each variant become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full two-tier check: direct probe, then the check network
    ///
    /// Example: url-sentinel check https://example.com --csv results.csv
    Check {
        /// URLs to check (one or more positional arguments)
        ///
        /// If no URLs are given here or via --input, they are read from stdin,
        /// one per line
        urls: Vec<String>,

        /// Read newline-separated URLs from a file instead
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// Write the results table to a CSV file at this path
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Base URL of the distributed check API
        #[arg(long, default_value = "https://check-host.net")]
        api_base: String,

        /// Country whose check nodes are ignored when classifying results
        #[arg(long, default_value = "India")]
        exclude_country: String,

        /// How many times to poll the check network for a result
        #[arg(long, default_value_t = 10)]
        poll_attempts: u32,

        /// Seconds to wait between poll attempts
        #[arg(long, default_value_t = 2)]
        poll_interval_secs: u64,

        /// Timeout in seconds for the direct probe request
        #[arg(long, default_value_t = 5)]
        direct_timeout_secs: u64,

        /// Timeout in seconds for each check-network request
        #[arg(long, default_value_t = 10)]
        request_timeout_secs: u64,
    },

    /// Probe URLs directly without the check-network fallback
    ///
    /// Example: url-sentinel probe https://example.com https://example.org
    Probe {
        /// URLs to probe (one or more positional arguments)
        ///
        /// If no URLs are given here or via --input, they are read from stdin,
        /// one per line
        urls: Vec<String>,

        /// Read newline-separated URLs from a file instead
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output results in JSON format instead of plain lines
        #[arg(long)]
        json: bool,

        /// Timeout in seconds for each probe request
        #[arg(long, default_value_t = 5)]
        timeout_secs: u64,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why use structs and enums?
//    - Structs group related data (like the CLI arguments)
//    - Enums represent choices (like "check OR probe")
//    - Both are core Rust types for organizing data
//
// 2. What are derive macros?
//    - #[derive(...)] automatically generates code for common operations
//    - Parser: generates CLI parsing logic
//    - Debug: generates code to print the struct for debugging
//
// 3. What is Option<PathBuf>?
//    - PathBuf is an owned filesystem path
//    - Option means the flag may be absent
//    - clap turns #[arg(long)] on an Option into an optional flag
//
// 4. What does default_value_t do?
//    - Supplies the default for a typed argument
//    - The user only sees the flag when they want to change the default
//    - All the timing constants live here so nothing is hard-coded deep
//      inside the checker
// -----------------------------------------------------------------------------
