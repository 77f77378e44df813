//! keyvim entrypoint: replays a key script through the command-mode engine
//! and prints the keystrokes the host would receive.
use anyhow::{Context, Result};
use clap::Parser;
use core_events::{EVENT_CHANNEL_CAP, Event};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

mod script;
mod sim;

use sim::{Simulator, Step};

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "keyvim", version, about = "Keyboard-side vim command mode simulator")]
struct Args {
    /// Key script to replay. Reads standard input when omitted.
    pub script: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `keyvim.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Also print events the engine passed through without producing output.
    #[arg(long)]
    pub verbose: bool,
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn run(&mut self, args: &Args) -> Result<core_config::Config> {
        self.configure_logging()?;
        Self::install_panic_hook();
        info!(target: "runtime", "startup");

        let config = core_config::load_from(args.config.clone())?;
        info!(
            target: "runtime.startup",
            script = args.script.as_ref().map(|p| p.display().to_string()).as_deref(),
            config_override = args.config.is_some(),
            config_loaded = config.raw.is_some(),
            command_capacity = config.buffers().command_capacity,
            insertion_capacity = config.buffers().insertion_capacity,
            "bootstrap_complete"
        );
        Ok(config)
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join("keyvim.log");
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, "keyvim.log");
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }

        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// Read the script line by line and forward parsed events. Always ends the
/// stream with `Shutdown`, also after a parse error.
fn spawn_script_reader<R>(source: R, tx: mpsc::Sender<Event>) -> JoinHandle<Result<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let result = forward_lines(source, &tx).await;
        if let Err(e) = &result {
            error!(target: "runtime.script", error = %e, "script_aborted");
        }
        let _ = tx.send(Event::Shutdown).await;
        result
    })
}

async fn forward_lines<R>(source: R, tx: &mpsc::Sender<Event>) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(source).lines();
    let mut line_no = 0;
    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        for event in script::parse_line(&line, line_no)? {
            if tx.send(event).await.is_err() {
                // Receiver gone: the runtime already stopped.
                return Ok(());
            }
        }
    }
    Ok(())
}

fn print_step(out: &mut impl Write, step: &Step, verbose: bool) -> std::io::Result<()> {
    if step.ops.is_empty() && !verbose {
        return Ok(());
    }
    let event = match &step.event {
        Event::Key(key) => key.to_string(),
        Event::Modifiers { mods, held } => {
            format!("{} {mods:?}", if *held { "hold" } else { "release" })
        }
        Event::Layer(mask) => format!("layer {:#b}", mask.0),
        Event::Shutdown => "shutdown".to_string(),
    };
    writeln!(
        out,
        "{event:<16} {mode:?} [{buffer}]{marker}",
        mode = step.mode,
        buffer = step.buffer,
        marker = if step.consumed { " *" } else { "" },
    )?;
    for op in &step.ops {
        writeln!(out, "    {op}")?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    let config = startup.run(&args)?;

    let (tx, mut rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAP);
    let reader = match &args.script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening script {}", path.display()))?;
            spawn_script_reader(file, tx)
        }
        None => spawn_script_reader(tokio::io::stdin(), tx),
    };

    let mut sim = Simulator::new(config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut events = 0usize;
    while let Some(event) = rx.recv().await {
        if event == Event::Shutdown {
            break;
        }
        events += 1;
        let step = sim.apply(event);
        print_step(&mut out, &step, args.verbose)?;
    }
    out.flush()?;
    info!(target: "runtime", events, mode = ?sim.mode(), "shutdown");

    reader.await.context("script reader task failed")?
}
