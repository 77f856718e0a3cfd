use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing
    #[arg(long, value_enum, default_value = "info")]
    pub trace: TraceLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build today's digest and deliver it to the configured Telegram chat.
    Send {
        /// How quotes are acquired.
        #[arg(long, value_enum, default_value_t = StrategyArg::PrimaryThenFallback)]
        quotes: StrategyArg,
    },

    /// Print the digest to stdout without delivering it.
    Preview {
        /// How quotes are acquired.
        #[arg(long, value_enum, default_value_t = StrategyArg::PrimaryThenFallback)]
        quotes: StrategyArg,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum StrategyArg {
    /// Finnhub per symbol, then Yahoo Finance for the leftovers.
    PrimaryThenFallback,

    /// The batched Yahoo Finance request only.
    FallbackOnly,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLevel {
    DEBUG,
    INFO,
    WARN,
    ERROR,
}
