/// Application-wide constants to avoid magic values throughout the codebase.
///
/// Per-tool defaults, timeouts, favicon heuristics thresholds and display
/// strings all live here so the three binaries agree on them.
/// Report output formats for the link checker
pub mod output_formats {
    /// Markdown report with tables and per-category details
    pub const MARKDOWN: &str = "markdown";
    /// JSON report for automation
    pub const JSON: &str = "json";
    /// Plain text report
    pub const TEXT: &str = "text";

    /// Default output format
    pub const DEFAULT: &str = MARKDOWN;

    /// All valid output formats
    pub const ALL: [&str; 3] = [MARKDOWN, JSON, TEXT];

    /// File extension used for the default report path of a format
    pub fn extension(format: &str) -> &'static str {
        match format {
            JSON => "json",
            TEXT => "txt",
            _ => "md",
        }
    }
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
    /// Link checker timeout for extended-timeout domains
    pub const LINKCHECK_EXTENDED_TIMEOUT_SECONDS: u64 = 20;
    /// Favicon probe timeout for extended-timeout domains
    pub const FAVICON_EXTENDED_TIMEOUT_SECONDS: u64 = 15;
    /// Timeout for direct `/favicon.ico` probes and homepage fetches
    pub const DIRECT_PROBE_TIMEOUT_SECONDS: u64 = 15;
    /// Maximum accepted timeout in seconds (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86_400;
    /// Default retry backoff base in milliseconds
    pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
}

/// Per-tool defaults
pub mod defaults {
    /// Default dataset location relative to the working directory
    pub const DATASET_PATH: &str = "data/webstack.yml";
    /// Name of the configuration file searched in standard locations
    pub const CONFIG_FILE_NAME: &str = ".webstack.toml";
    /// Directory for generated reports
    pub const RESULTS_DIR: &str = "results";

    /// Retry attempts on 429/5xx for description and favicon fetchers
    pub const RETRY_ATTEMPTS: u32 = 3;
    /// Upper bound accepted for retry attempts
    pub const MAX_RETRY_ATTEMPTS: u32 = 10;
    /// Upper bound accepted for worker counts
    pub const MAX_WORKERS: usize = 100;

    pub const DESCRIBE_WORKERS: usize = 5;
    pub const DESCRIBE_PACING_MS: u64 = 500;

    pub const LINKCHECK_THREADS: usize = 3;
    pub const LINKCHECK_PACING_MS: u64 = 100;

    pub const LOGO_THREADS: usize = 3;
    pub const LOGO_PACING_MS: u64 = 0;
    /// Delay between two API attempts for the same domain
    pub const LOGO_ATTEMPT_DELAY_MS: u64 = 200;

    /// Status codes retried by the description and favicon fetchers
    pub const RETRY_STATUS_CODES: [u16; 5] = [429, 500, 502, 503, 504];
}

/// HTTP header values
pub mod http {
    /// Desktop browser identity; several directory sites block unknown agents
    pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Linux; x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36";
    pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
    pub const ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9,en;q=0.8";
    /// Redirect hops followed before giving up
    pub const MAX_REDIRECTS: usize = 10;
}

/// Domain classification
pub mod domains {
    /// Suffixes of the extended-timeout domain class
    pub const EXTENDED_TIMEOUT_SUFFIXES: [&str; 6] =
        [".cn", ".com.cn", ".net.cn", ".org.cn", ".gov.cn", ".edu.cn"];
}

/// Description heuristic limits (in characters)
pub mod description {
    /// Candidates shorter than this are skipped
    pub const MIN_CHARS: usize = 10;
    /// Longer descriptions are truncated to this many characters
    pub const MAX_CHARS: usize = 100;
    /// Appended to truncated text
    pub const ELLIPSIS: &str = "...";
    /// Body text is only considered when longer than this
    pub const BODY_TEXT_MIN_CHARS: usize = 50;
    /// Body text is cut to this many characters
    pub const BODY_TEXT_MAX_CHARS: usize = 200;
}

/// Favicon validation and scoring
pub mod favicon {
    /// Content types accepted straight from a HEAD probe
    pub const IMAGE_CONTENT_TYPES: [&str; 2] = ["image/", "application/octet-stream"];
    /// Content types that need a GET to tell an icon from an error page
    pub const AMBIGUOUS_CONTENT_TYPES: [&str; 2] = ["json", "html"];
    /// Body fragments that mark an error page
    pub const ERROR_INDICATORS: [&str; 8] = [
        "404",
        "not found",
        "页面不存在",
        "资源不存在",
        "error",
        "错误",
        "exception",
        "异常",
    ];
    /// Bodies larger than this are treated as error pages
    pub const MAX_ERROR_PAGE_BYTES: usize = 10_000;

    /// Below this size an icon is considered low quality
    pub const LOW_QUALITY_BYTES: u64 = 500;
    /// Above this size an icon is considered high quality
    pub const HIGH_QUALITY_BYTES: u64 = 50_000;

    /// Weight of one template position in the quality score
    pub const POSITION_WEIGHT: i64 = 5;
    /// Bonus for services that specialise in icons
    pub const SPECIALIST_BONUS: i64 = 20;
    pub const SPECIALIST_MARKERS: [&str; 2] = ["faviconkit", "icon.horse"];
    /// Bonus for templates that explicitly ask for a large icon
    pub const LARGE_SIZE_BONUS: i64 = 15;
    pub const LARGE_SIZE_MARKERS: [&str; 2] = ["size=128", "larger=true"];
}

/// Display and formatting constants
pub mod display {
    pub const SUCCESS_EMOJI: &str = "✅";
    pub const REDIRECT_EMOJI: &str = "🔄";
    pub const TIMEOUT_EMOJI: &str = "⏰";
    pub const SSL_EMOJI: &str = "🔒";
    pub const DNS_EMOJI: &str = "🌐";
    pub const ERROR_EMOJI: &str = "❌";
    pub const CONNECTION_EMOJI: &str = "🔌";
    pub const INVALID_EMOJI: &str = "🚫";
    pub const UNKNOWN_EMOJI: &str = "❓";
    /// Titles are cut to this width in per-item progress lines
    pub const TITLE_WIDTH: usize = 40;
    /// Candidate URLs are cut to this width in verbose favicon output
    pub const URL_WIDTH: usize = 60;
}
