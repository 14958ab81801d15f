/// Wall-clock stepping over a bounded interval.
pub mod clock;
pub mod engine;
/// Construction-time error taxonomy.
pub mod error;
pub mod summary;
pub mod types;
/// Operating and connection windows.
pub mod window;
