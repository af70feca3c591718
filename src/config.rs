use clap::Parser;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "assist-gateway")]
#[command(about = "Conversation and memory relay for the Doctor Assist chat client")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Base URL of the generation provider
    #[arg(
        short,
        long,
        default_value = "https://generativelanguage.googleapis.com/v1beta"
    )]
    pub gemini_url: String,

    // Generation model name
    #[arg(short, long, default_value = "gemini-2.5-flash")]
    pub model: String,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 20)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // Outbound generation request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub request_timeout: u64,

    // Interval between stale rate-limit entry sweeps, in seconds
    #[arg(long, default_value_t = 300)]
    pub evict_interval: u64,
}
