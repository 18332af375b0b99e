use std::{env, env::VarError};

/// The monitor is configured through the environment only. Any argument prints the help text and the current
/// configuration values, and returns `true` so the caller can exit.
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        // We don't expect any CLI args, so always print the help
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    const DISPLAY_ENVS: [&str; 6] = [
        "RUST_LOG",
        "MKT_DATABASE_URL",
        "MKT_MONITOR_INTERVAL_SECS",
        "MKT_MONITOR_CONCURRENCY",
        "MKT_MONITOR_RUN_ONCE",
        "MKT_MONITOR_REFERENCE_DATE",
    ];

    println!("Current environment values:");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
