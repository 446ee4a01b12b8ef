//! Court Viewer main entry point.
//!
//! Usage: `court-viewer [CONFIG] [--dump-scene] [--write-config]`.
//!
//! Keys are read from stdin, one character per press. The loop ends on the
//! quit key or end of input.

use std::io::Read;

use court_renderer::FileImageLoader;
use court_viewer::{AppContext, ConfigManager, FrameLoop, InputQueue, KeyEvent, ViewerError};

#[derive(Debug, Default)]
struct Args {
    config_path: Option<String>,
    dump_scene: bool,
    write_config: bool,
}

impl Args {
    fn parse() -> Self {
        let mut args = Self::default();
        for arg in std::env::args().skip(1) {
            match arg.as_str() {
                "--dump-scene" => args.dump_scene = true,
                "--write-config" => args.write_config = true,
                flag if flag.starts_with("--") => {
                    tracing::warn!("Ignoring unknown flag {}", flag);
                }
                _ if args.config_path.is_none() => args.config_path = Some(arg.clone()),
                _ => tracing::warn!("Ignoring extra argument {}", arg),
            }
        }
        args
    }
}

/// Forward stdin characters as key presses until end of input.
fn spawn_stdin_reader(input: InputQueue) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("stdin-keys".to_string())
        .spawn(move || {
            let mut buffer = [0u8; 64];
            let mut stdin = std::io::stdin().lock();
            loop {
                match stdin.read(&mut buffer) {
                    Ok(0) => break,
                    Ok(n) => String::from_utf8_lossy(&buffer[..n])
                        .chars()
                        .filter(|c| !c.is_whitespace())
                        .for_each(|c| input.push(KeyEvent::new(c))),
                    Err(e) => {
                        tracing::warn!("Failed to read input: {}", e);
                        break;
                    }
                }
            }
            input.close();
        })?;
    Ok(())
}

fn main() -> Result<(), ViewerError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "court_viewer=debug,court_core=info,court_renderer=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Court Viewer");

    let args = Args::parse();
    let mut manager = match &args.config_path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };

    if args.write_config {
        manager.mark_dirty();
        manager.save()?;
        println!("{}", manager.config_file_path().display());
        return Ok(());
    }

    let config = manager.into_config();
    let frame = config.frame.clone();
    let mut ctx = AppContext::headless(config)?;

    if args.dump_scene {
        println!("{}", serde_json::to_string_pretty(&ctx.court().root)?);
        return Ok(());
    }

    FileImageLoader::new(&frame.asset_dir).spawn(ctx.textures().clone())?;
    spawn_stdin_reader(ctx.input())?;

    println!("Controls:");
    for hint in ctx.control_hints() {
        println!("  {hint}");
    }

    FrameLoop::new(frame.target_fps).run(&mut ctx)?;
    Ok(())
}
