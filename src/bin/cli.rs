//! psstore CLI Client
//!
//! Command-line interface for interacting with psstore.

use std::fmt::Display;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use psstore::network::Client;
use psstore::protocol::DomainValue;
use psstore::store::{BulkRequest, InsertRequest};
use psstore::{Result, StoreError};

/// psstore CLI
#[derive(Parser, Debug)]
#[command(name = "psstore-cli")]
#[command(about = "CLI for the psstore key-value store")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:8020")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operate on the integer-valued store
    Int {
        #[command(subcommand)]
        op: OpCommand,
    },

    /// Operate on the string-valued store
    Str {
        #[command(subcommand)]
        op: OpCommand,
    },

    /// Ping the server
    Ping,
}

#[derive(Subcommand, Debug)]
enum OpCommand {
    /// Insert a new key
    Add {
        key: String,

        #[arg(allow_negative_numbers = true)]
        value: String,
    },

    /// Overwrite an existing key
    Update {
        key: String,

        #[arg(allow_negative_numbers = true)]
        value: String,
    },

    /// Insert many keys given as key=value; prints the rejected ones
    BulkAdd {
        #[arg(required = true, value_parser = parse_pair)]
        entries: Vec<(String, String)>,

        /// Mark the request as compressed
        #[arg(long)]
        compressed: bool,
    },

    /// Overwrite many keys given as key=value; prints the rejected ones
    BulkUpdate {
        #[arg(required = true, value_parser = parse_pair)]
        entries: Vec<(String, String)>,

        /// Mark the request as compressed
        #[arg(long)]
        compressed: bool,
    },

    /// Get a value by key
    Get { key: String },

    /// Delete a key
    Del { key: String },

    /// Remove every entry
    Clear,
}

fn parse_pair(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

fn parse_value<V>(raw: &str) -> Result<V>
where
    V: FromStr,
    V::Err: Display,
{
    raw.parse()
        .map_err(|e: V::Err| StoreError::UnsupportedArgument(format!("'{}': {}", raw, e)))
}

fn bulk_request<V>(entries: Vec<(String, String)>, compressed: bool) -> Result<BulkRequest<V>>
where
    V: FromStr,
    V::Err: Display,
{
    let entries = entries
        .into_iter()
        .map(|(key, raw)| Ok(InsertRequest::new(key, parse_value::<V>(&raw)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(BulkRequest::new(entries).compressed(compressed))
}

fn print_rejects<V: Display>(rejects: &[InsertRequest<V>]) {
    if rejects.is_empty() {
        println!("OK (all entries applied)");
        return;
    }
    println!("{} rejected:", rejects.len());
    for entry in rejects {
        println!("  {}={}", entry.key, entry.value);
    }
}

fn run_op<V>(client: &mut Client, op: OpCommand) -> Result<()>
where
    V: DomainValue + FromStr + Display,
    V::Err: Display,
{
    match op {
        OpCommand::Add { key, value } => {
            client.add(&key, parse_value::<V>(&value)?)?;
            println!("OK");
        }
        OpCommand::Update { key, value } => {
            client.update(&key, parse_value::<V>(&value)?)?;
            println!("OK");
        }
        OpCommand::BulkAdd { entries, compressed } => {
            let rejects = client.bulk_add(bulk_request::<V>(entries, compressed)?)?;
            print_rejects(&rejects);
        }
        OpCommand::BulkUpdate { entries, compressed } => {
            let rejects = client.bulk_update(bulk_request::<V>(entries, compressed)?)?;
            print_rejects(&rejects);
        }
        OpCommand::Get { key } => {
            let value = client.get::<V>(&key)?;
            println!("{}", value);
        }
        OpCommand::Del { key } => {
            client.delete::<V>(&key)?;
            println!("OK");
        }
        OpCommand::Clear => {
            client.clear::<V>()?;
            println!("OK");
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let mut client = Client::connect(&args.server)?;

    match args.command {
        Commands::Int { op } => run_op::<i32>(&mut client, op),
        Commands::Str { op } => run_op::<String>(&mut client, op),
        Commands::Ping => {
            client.ping()?;
            println!("PONG");
            Ok(())
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
