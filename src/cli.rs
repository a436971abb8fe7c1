use crate::config::StrategyKind;
use clap::Parser;
use std::path::PathBuf;

/// 文本测试模式：逐行输入听写内容或纠错指令
#[derive(Debug, Parser)]
#[command(name = "voice-correction", version, about)]
pub struct Cli {
    /// 配置文件路径（默认位于用户配置目录）
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 覆盖配置中的策略：rules / labeler / llm
    #[arg(long)]
    pub strategy: Option<StrategyKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from(["voice-correction", "--strategy", "labeler"]).unwrap();
        assert_eq!(cli.strategy, Some(StrategyKind::Labeler));
        assert!(cli.config.is_none());

        let cli = Cli::try_parse_from(["voice-correction", "--config", "/tmp/c.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));

        assert!(Cli::try_parse_from(["voice-correction", "--strategy", "magic"]).is_err());
    }
}
