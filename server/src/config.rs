use clap::Parser;

/// Shared drawing board server.
#[derive(Debug, Parser)]
#[command(name = "sketch-server", version)]
pub struct Config {
    /// Address the HTTP/WebSocket listener binds to.
    #[arg(long, env = "SKETCH_BIND", default_value = "127.0.0.1:8080")]
    pub bind: String,

    /// Default log filter; RUST_LOG takes precedence.
    #[arg(long, env = "SKETCH_LOG", default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_binds_locally_by_default() {
        let config = Config::try_parse_from(["sketch-server"]).expect("");
        if std::env::var_os("SKETCH_BIND").is_none() {
            assert_eq!(config.bind, "127.0.0.1:8080");
        }
    }

    #[test]
    fn it_accepts_overrides() {
        let config =
            Config::try_parse_from(["sketch-server", "--bind", "0.0.0.0:9000", "--log-level", "debug"])
                .expect("");
        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.log_level, "debug");
    }
}
