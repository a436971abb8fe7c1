pub mod cli;
pub mod command_parser;
pub mod config;
pub mod editor;
pub mod engine;
pub mod homophones;
pub mod labeler;
pub mod labels;
pub mod llm;
pub mod processor;
pub mod resolver;
pub mod session;

use clap::Parser;
use cli::Cli;
use config::{load_config, load_config_from};
use processor::CorrectionProcessor;
use session::{Session, SessionOutcome};
use std::io::{self, BufRead, Write};

pub fn run() {
    env_logger::init();
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };
    let mut config = match loaded {
        Ok(c) => c,
        Err(e) => {
            log::error!("加载配置失败: {e}");
            std::process::exit(1);
        }
    };
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }

    let processor = match CorrectionProcessor::from_config(&config) {
        Ok(p) => p,
        Err(e) => {
            log::error!("初始化纠错处理器失败: {e}");
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("创建运行时失败: {e}");
            std::process::exit(1);
        }
    };

    let mut session = Session::new(processor);
    println!("输入听写文本或纠错指令（刪除X / 把X改成Y / 在X前面新增Y / 在X後面新增Y），q 退出");

    let stdin = io::stdin();
    loop {
        if !session.last_text().is_empty() {
            println!("[当前文本] {}", session.last_text());
        }
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                log::error!("读取输入失败: {e}");
                break;
            }
        }

        let input = line.trim();
        if matches!(input.to_lowercase().as_str(), "q" | "quit" | "exit") {
            break;
        }

        match rt.block_on(session.handle(input)) {
            SessionOutcome::Ignored => {}
            SessionOutcome::Typed(text) => println!("  → 输入: {text}"),
            SessionOutcome::Corrected { before, after } => {
                println!("  → 纠正: {before} → {after}")
            }
        }
    }
}
