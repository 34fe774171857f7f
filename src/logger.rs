/// Logging setup: writes to logs/guide.log, honoring RUST_LOG when set.
use std::io::Write;

use log::LevelFilter;

pub fn init() {
    let mut builder = env_logger::Builder::new();

    if let Ok(log_level) = std::env::var("RUST_LOG") {
        builder.parse_filters(&log_level);
    } else {
        builder.filter_level(LevelFilter::Info);
        // Dependency chatter is too verbose at INFO.
        builder.filter_module("reqwest", LevelFilter::Warn);
        builder.filter_module("hyper", LevelFilter::Warn);
        builder.filter_module("rustls", LevelFilter::Warn);
    }

    // Log format: [HH:MM:SS LEVEL] target - message
    builder.format(|buf, record| {
        let now = chrono::Local::now().format("%H:%M:%S");
        writeln!(
            buf,
            "[{} {}] {} - {}",
            now,
            record.level(),
            record.target(),
            record.args()
        )
    });

    let log_dir = "logs";
    if !std::path::Path::new(log_dir).exists() {
        let _ = std::fs::create_dir(log_dir);
    }

    builder
        .target(env_logger::Target::Pipe(Box::new(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open("logs/guide.log")
                .expect("failed to open log file"),
        )))
        .init();

    log::info!("logging initialized");
}
