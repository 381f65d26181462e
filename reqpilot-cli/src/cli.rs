use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "reqpilot")]
#[command(about = "Requirements pipeline server: input -> requirements -> stories -> criteria", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Server port
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Gemini model id
        #[arg(long, default_value = reqpilot_model::gemini::DEFAULT_MODEL)]
        model: String,

        /// Allowed CORS origins (may be repeated; empty allows all)
        #[arg(long = "allow-origin")]
        allowed_origins: Vec<String>,

        /// Include internal error details in responses
        #[arg(long)]
        expose_errors: bool,
    },
}
