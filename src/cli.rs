use clap::Parser;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Measure response time to a web server with repeated HTTP requests",
    long_about = None
)]
pub struct Cli {
    /// Target URI (host[:port][/path] or a full http(s) URL)
    pub uri: String,

    /// Body of a POST or PUT request; prefix with @ to read it from a file
    #[arg(short = 'd', long = "data")]
    pub body: Option<String>,

    /// HTTP method to use
    #[arg(short = 'X', long = "request", default_value = "GET")]
    pub method: String,

    /// Number of times to query
    #[arg(short = 'c', long, default_value = "10")]
    pub count: u32,

    /// Wait time between requests in milliseconds
    #[arg(short = 'W', long, default_value = "1000")]
    pub interval: u64,

    /// Time to wait for a response in milliseconds
    #[arg(short = 't', long, default_value = "2000")]
    pub timeout: u64,

    /// Quiet mode - only show summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Show timestamps
    #[arg(short = 'T', long)]
    pub timestamp: bool,

    /// Summary format (text, json, csv)
    #[arg(long, default_value = "text")]
    pub format: String,
}
