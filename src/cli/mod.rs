use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Overrides SERVER_HOST
        #[arg(long)]
        host: Option<String>,

        /// Overrides SERVER_PORT
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Embed every object of a JSON file into the collection
    Load { path: String },

    Query {
        query: String,

        /// Minimum similarity score (defaults to SIMILARITY_THRESHOLD)
        #[arg(short, long)]
        threshold: Option<f32>,

        /// Maximum number of results (defaults to DEFAULT_RESULT_LIMIT)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// Collection size and dependency health
    Stats,
}
