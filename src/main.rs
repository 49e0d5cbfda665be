use anyhow::{Context as AnyhowContext, Result};
use std::env;
use tracing::info;

use grade_tracker::{logging, Config, GradeReport, Gradebook};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = Config::load()?;

    if args.len() > 1 && args[1] == "summary" {
        // Summary mode
        let json = args.iter().skip(2).any(|a| a == "--json");
        let _guard = logging::init(&config, true)?;
        run_summary(json)?;
    } else {
        // UI mode (default)
        let _guard = logging::init(&config, false)?;
        run_ui_mode(&config)?;
    }

    Ok(())
}

fn run_summary(json: bool) -> Result<()> {
    let gradebook = Gradebook::seeded();
    let report = GradeReport::from_gradebook(&gradebook);
    info!(subjects = report.subjects.len(), json, "printing summary");

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize summary")?;
        println!("{}", out);
    } else {
        println!("📚 My Awesome Grades");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        print!("{}", report.to_text());
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &Config) -> Result<()> {
    use grade_tracker::ui;

    let colorfgbg = env::var("COLORFGBG").ok();
    let theme = config.theme.resolve(colorfgbg.as_deref());
    info!(theme = theme.name(), version = grade_tracker::VERSION, "starting ui");

    let mut app = ui::App::new(Gradebook::seeded(), theme);
    ui::run_ui(&mut app)?;

    info!(average = app.gradebook.overall_average(), "ui closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &Config) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or print grades: cargo run -- summary");
    std::process::exit(1);
}
