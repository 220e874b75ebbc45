use anyhow::Context;
use chrono::Local;
use clap::Parser;
use log::{info, warn};
use serde::Deserialize;
use std::path::PathBuf;
use std::rc::Rc;
use telegram_theme::bridge::memory::MemoryBridge;
use telegram_theme::channel::StyleChannel;
use telegram_theme::dom::MessageListView;
use telegram_theme::dom::memory::{MemoryMessage, MemoryMessageList};
use telegram_theme::scheduler::ManualFrameScheduler;
use telegram_theme::settings::Settings;
use telegram_theme::types::MessageAttrs;
use telegram_theme::{ThemeConfig, ThemePlugin};

// Runs the message grouping over a recorded message list and prints the
// class and avatar height each message would receive.
//
// Usage:
//   cargo run -- messages.json
//   cargo run -- messages.json --private
//   cargo run -- messages.json --build 28000      # legacy newest-first order
//   cargo run -- messages.json --config theme.json

#[derive(Parser, Debug)]
#[command(name = "theme-inspect", about = "Inspect message grouping for a recorded chat")]
struct Args {
    /// JSON array of messages in host order
    messages: PathBuf,

    /// Treat the chat as one-on-one (no avatar floating)
    #[arg(long)]
    private: bool,

    /// Host build number, selects the message order
    #[arg(short, long)]
    build: Option<u32>,

    /// Plugin configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RecordedMessage {
    id: String,
    #[serde(default)]
    sender: Option<String>,
    #[serde(default, rename = "self")]
    is_self: bool,
    #[serde(default)]
    gray: bool,
    #[serde(default)]
    timestamp: bool,
    #[serde(default)]
    height: Option<f64>,
}

impl From<RecordedMessage> for MemoryMessage {
    fn from(m: RecordedMessage) -> Self {
        let attrs = MessageAttrs {
            sender_id: m.sender,
            is_self: m.is_self,
            is_gray: m.gray,
            has_timestamp_header: m.timestamp,
        };
        let mut node = MemoryMessage::new(m.id, attrs);
        node.content_height = m.height;
        node
    }
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "{} [{:<5}] [{}] - {}",
                Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    if let Err(e) = run(args) {
        warn!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            let config = ThemeConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?;
            log::set_max_level(config.log_filter());
            config
        }
        None => ThemeConfig::default(),
    };
    if args.build.is_some() {
        config.host_build_version = args.build;
    }

    let raw = std::fs::read_to_string(&args.messages)
        .with_context(|| format!("reading {}", args.messages.display()))?;
    let recorded: Vec<RecordedMessage> =
        serde_json::from_str(&raw).context("parsing message list")?;
    info!("Loaded {} messages", recorded.len());

    let list = Rc::new(MemoryMessageList::new());
    list.set_private_chat(args.private);
    list.append(recorded.into_iter().map(MemoryMessage::from));

    let plugin = ThemePlugin::new(
        config,
        Rc::new(MemoryBridge::new(Settings::default())),
        StyleChannel::new(),
    );
    let scheduler = Rc::new(ManualFrameScheduler::new());
    let watcher = plugin.attach_message_list(list.clone(), scheduler.clone());
    scheduler.run_frame();
    info!("Passes run: {}", watcher.passes_run());

    for id in list.message_ids() {
        let Some(node) = list.get(&id) else { continue };
        println!(
            "{:<12} {:<28} {}",
            node.id,
            node.class_name,
            node.avatar_height.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
