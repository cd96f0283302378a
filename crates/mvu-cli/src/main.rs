//! MVU アクセラレータ試験ランの薄いランチャー
//!
//! ポートを開き、設定されたトライアル数だけランダム化試験を回して
//! 統計を表示するだけ。プロトコルの本体は `mvu-*` クレート群にある。
//!
//! ポートはスコープ所有で、割り込みを含むあらゆる終了経路で
//! Drop により解放される。シグナルハンドラは持たない。

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mvu_harness::{Harness, HarnessConfig};
use mvu_link::{LinkConfig, SerialLink, DEFAULT_BAUD};
use mvu_session::Session;

/// MVU アクセラレータのランダム化正しさ/レイテンシ試験
#[derive(Parser)]
#[command(name = "mvu")]
#[command(version, about, long_about = None)]
struct Cli {
    /// シリアルポート名（例: /dev/ttyUSB0, COM59）
    #[arg(value_name = "PORT")]
    port: String,

    /// ボーレート（代替: 921600）
    #[arg(long, default_value_t = DEFAULT_BAUD)]
    baud: u32,

    /// 次元 N（1..=16）
    #[arg(long, default_value_t = 2)]
    dim: usize,

    /// トライアル数
    #[arg(long, default_value_t = 10)]
    trials: u32,

    /// オペランド上限の上書き（既定は結果が 1 ニブルに収まる最大値）
    #[arg(long)]
    operand_max: Option<u16>,

    /// 統計を JSON で出力する
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let link_config = LinkConfig::new(&cli.port).with_baud(cli.baud);

    // ポートはここからスコープ所有。早期 return でも Drop で閉じる
    let link = SerialLink::open(&link_config)?;
    let session = Session::new(link, link_config.inter_byte_delay);

    let mut harness_config = HarnessConfig::new(cli.dim, cli.trials);
    if let Some(max) = cli.operand_max {
        harness_config = harness_config.with_operand_max(max);
    }

    tracing::info!(
        dim = harness_config.dim,
        trials = harness_config.trials,
        operand_max = harness_config.operand_max,
        "starting test run"
    );

    let mut harness = Harness::new(session, harness_config);
    let stats = harness.run()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("trials:             {}", stats.trials);
        println!(
            "correct:            {} ({:.1}%)",
            stats.correct,
            stats.accuracy() * 100.0
        );
        println!("timeouts:           {}", stats.timeouts);
        println!("corrupted groups:   {}", stats.corrupted_groups);
        println!("avg host latency:   {:.2} ms", stats.avg_host_ms());
        println!("avg device latency: {:.2} ms", stats.avg_device_ms());
    }

    Ok(())
}
