//! Seeding tool: create the world tables in a SQLite file and fill them with
//! deterministic synthetic data.
//!
//! Usage:
//!   cargo run -p loader --bin seed-world [-- [--db <path>] [--force]]
//!
//! If `--db` is omitted, `WORLD_DB_PATH` (or `world.db`) is used. An existing
//! file is only replaced when `--force` is given.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use loader::config::LoaderConfig;
use loader::relational::WorldDb;
use loader::synthetic::{generate_synthetic, seed_world, WorldParams};

const USAGE: &str = "Usage: seed-world [--db <path>] [--force]";

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut db_path: Option<PathBuf> = None;
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("--db requires a path");
                    eprintln!("{USAGE}");
                    std::process::exit(1);
                }
                db_path = Some(PathBuf::from(&args[i]));
            }
            "--force" => {
                force = true;
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("{USAGE}");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let db_path = db_path.unwrap_or_else(|| match LoaderConfig::from_env() {
        Ok(config) => config.database_path,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    });

    if let Err(e) = world_core::initialize_logger(log::LevelFilter::Info, None) {
        eprintln!("Failed to initialize logger: {e:#}");
        std::process::exit(1);
    }

    if db_path.exists() {
        if !force {
            eprintln!(
                "Error: {} already exists.\nUse --force to overwrite.",
                db_path.display()
            );
            std::process::exit(1);
        }
        if let Err(e) = fs::remove_file(&db_path) {
            eprintln!("Failed to remove {}: {e}", db_path.display());
            std::process::exit(1);
        }
        for suffix in ["-wal", "-shm"] {
            let mut side = db_path.clone().into_os_string();
            side.push(suffix);
            let _ = fs::remove_file(PathBuf::from(side));
        }
    }

    println!("Seeding {}...", db_path.display());
    let started = Instant::now();

    let world = generate_synthetic(&WorldParams::standard());
    let mut db = WorldDb::create(&db_path).unwrap_or_else(|e| {
        eprintln!("Failed to create database: {e}");
        std::process::exit(1);
    });
    let cities = seed_world(&mut db, &world).unwrap_or_else(|e| {
        eprintln!("Failed to seed database: {e}");
        std::process::exit(1);
    });

    println!(
        "  {} countries, {cities} cities ({:.2?})",
        world.countries.len(),
        started.elapsed()
    );
}
