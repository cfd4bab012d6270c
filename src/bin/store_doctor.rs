use anyhow::{anyhow, Result};
use bot_forge::config::Config;
use bot_forge::store::{self, models::PlatformState};
use std::env;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("check");

    dotenvy::dotenv().ok();
    let data_file = Config::data_file_from_env();

    match command {
        "check" => check_store(&data_file).await,
        "reindex" => reindex_store(&data_file).await,
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            print_help();
            Err(anyhow!("Unknown command: {command}"))
        }
    }
}

async fn check_store(path: &Path) -> Result<()> {
    println!("🔍 Checking store {}", path.display());

    if !path.exists() {
        println!("ℹ️  No store file yet; the bot will start with an empty platform.");
        return Ok(());
    }

    let state = store::load(path).await?;
    print_summary(&state);

    let drift = state.check_consistency();
    if drift.is_empty() {
        println!("✅ Bots index matches users.");
    } else {
        println!("⚠️  Bots index has drifted:");
        for problem in &drift {
            println!("  • {problem}");
        }
        println!("💡 Run 'store-doctor reindex' to rebuild it.");
    }

    Ok(())
}

async fn reindex_store(path: &Path) -> Result<()> {
    println!("🔧 Rebuilding bots index in {}", path.display());

    let mut state = store::load(path).await?;
    let before = state.bots.len();
    state.reindex();
    store::save(path, &state).await?;

    println!("✅ Index rebuilt: {} -> {} entries", before, state.bots.len());
    Ok(())
}

fn print_summary(state: &PlatformState) {
    let summary = state.stats_summary();
    println!("📋 Owners:         {}", summary.owners_total);
    println!("📋 Users:          {}", summary.users_total);
    println!("📋 Indexed bots:   {}", summary.bots_total);
    println!("📋 Creation log:   {}", summary.created_total);
}

fn print_help() {
    println!("🤖 Bot Forge - Store Maintenance Tool");
    println!();
    println!("USAGE:");
    println!("    store-doctor [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    check          Load the store and report counts and index drift (default)");
    println!("    reindex        Rebuild the bots index from users and save");
    println!("    help           Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    DATA_FILE      Path of the store document (default: data.json)");
    println!();
}
