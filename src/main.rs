use clap::Parser;

use lsb_stride::{
    cli::{Cli, Commands},
    handler::{handle_embed, handle_extract},
};

/// 程序的主入口点
///
/// 负责初始化日志、解析命令行参数，并根据位置参数的数量
/// 将执行分派到嵌入或提取的处理函数
fn main() -> anyhow::Result<()> {
    env_logger::init();

    // 参数数量不合法时打印用法并退出
    let command = Cli::parse().into_command().unwrap_or_else(|e| e.exit());

    match command {
        Commands::Embed(args) => handle_embed(args),
        Commands::Extract(args) => handle_extract(args),
    }
}
