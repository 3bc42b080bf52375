//! Load and benchmark constants shared by the loader binaries.

/// Number of city rows fetched per page during extraction.
pub const PAGE_SIZE: usize = 500;

/// City ids looked up by the latency comparison, in lookup order.
///
/// Id 10 appears twice on purpose: repeated ids are looked up every time.
pub const BENCHMARK_CITY_IDS: [i32; 9] = [9, 364, 4056, 10, 1024, 2689, 10, 555, 3821];

/// Relational database used when `WORLD_DB_PATH` is not set.
pub const DEFAULT_DB_PATH: &str = "world.db";

/// KeyDB endpoint used when `WORLD_KEYDB_URL` is not set.
pub const DEFAULT_KEYDB_URL: &str = "redis://127.0.0.1:6379/";

/// Log file used when `WORLD_LOG_FILE` is not set.
pub const DEFAULT_LOG_FILE: &str = "loader.log";
