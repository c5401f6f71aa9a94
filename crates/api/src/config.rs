/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development, except
/// the gateway credential which has none: its absence is reported per
/// request as a configuration fault rather than failing startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// External AI gateway settings.
    pub gateway: GatewaySettings,
}

/// Settings for the external vision-model gateway.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Full chat-completions endpoint URL.
    pub url: String,
    /// Bearer credential; `None` when the operator has not configured one.
    pub api_key: Option<String>,
    /// Vision-capable model identifier.
    pub model: String,
    /// Per-attempt timeout for gateway requests, in seconds.
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                                               |
    /// |---------------------------|-------------------------------------------------------|
    /// | `HOST`                    | `0.0.0.0`                                             |
    /// | `PORT`                    | `3000`                                                |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                                                  |
    /// | `AI_GATEWAY_URL`          | `https://ai.gateway.lovable.dev/v1/chat/completions`  |
    /// | `AI_GATEWAY_API_KEY`      | *(unset)*                                             |
    /// | `AI_MODEL`                | `google/gemini-2.5-flash`                             |
    /// | `AI_REQUEST_TIMEOUT_SECS` | `60`                                                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let gateway = GatewaySettings::from_env();

        Self {
            host,
            port,
            request_timeout_secs,
            gateway,
        }
    }
}

impl GatewaySettings {
    /// Load gateway settings from environment variables with defaults.
    pub fn from_env() -> Self {
        let url = std::env::var("AI_GATEWAY_URL")
            .unwrap_or_else(|_| "https://ai.gateway.lovable.dev/v1/chat/completions".into());

        let api_key = std::env::var("AI_GATEWAY_API_KEY").ok().filter(|k| !k.is_empty());

        let model =
            std::env::var("AI_MODEL").unwrap_or_else(|_| "google/gemini-2.5-flash".into());

        let request_timeout_secs: u64 = std::env::var("AI_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("AI_REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            url,
            api_key,
            model,
            request_timeout_secs,
        }
    }
}
