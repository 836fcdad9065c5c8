use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use mansion_escape::engine::{Output, OutputBlock};
use mansion_escape::{DEFAULT_WORLD, GameState, load_world_from_file, load_world_from_str};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const RULE_WIDTH: usize = 45;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "mansion_escape=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn flush_output(out: Output) -> io::Result<()> {
    let mut stdout = io::stdout().lock();

    for block in out.blocks {
        match block {
            OutputBlock::Title(t) => {
                writeln!(stdout, "\n{}", "=".repeat(RULE_WIDTH))?;
                writeln!(stdout, "  {}", t)?;
                writeln!(stdout, "{}", "=".repeat(RULE_WIDTH))?;
            }
            OutputBlock::Heading(name) => {
                writeln!(stdout, "\n--- {} ---", name)?;
            }
            OutputBlock::Text(line) => {
                writeln!(stdout, "  {}", line)?;
            }
            OutputBlock::Event(ev) => {
                writeln!(stdout, "  {}", ev)?;
            }
            OutputBlock::Menu(entries) => {
                for e in entries {
                    writeln!(stdout, "  [{}] {}", e.key, e.label)?;
                }
                writeln!(stdout, "{}", "-".repeat(RULE_WIDTH))?;
            }
            OutputBlock::Prompt(p) => {
                // no newline: the answer goes on the same line
                write!(stdout, "  {}", p)?;
            }
        }
    }

    stdout.flush()
}

fn main() -> io::Result<()> {
    init_tracing();

    let world_path: Option<PathBuf> = env::args().nth(1).map(PathBuf::from);

    let loaded = match &world_path {
        Some(path) => load_world_from_file(path),
        None => load_world_from_str(DEFAULT_WORLD),
    };

    let world = match loaded {
        Ok(w) => w,
        Err(e) => {
            let source = world_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in world".to_string());
            tracing::debug!(%source, "world rejected");
            eprintln!("Failed to load world '{}': {e}", source);
            std::process::exit(1);
        }
    };

    let mut game = GameState::new(world);
    flush_output(game.initialize())?;

    let stdin = io::stdin();

    loop {
        let mut input = String::new();
        let bytes_read = stdin.read_line(&mut input)?;
        if bytes_read == 0 {
            println!("\nGoodbye.");
            break;
        }

        let (out, finished) = game.step(input.trim());
        flush_output(out)?;

        if finished {
            println!();
            break;
        }
    }

    Ok(())
}
