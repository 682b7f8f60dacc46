//! Log output for the service.
//!
//! Development prints pretty events with source locations; production writes
//! one JSON object per event, flattened, carrying the enclosing `request`
//! span (and so its `request_id`). Classification events come from
//! `scribe_match` at DEBUG (the deciding rule) and from the classify handler at
//! INFO (outcome per request).

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Default directives when `RUST_LOG` is unset, in development.
pub const DEVELOPMENT_DIRECTIVES: &str = "debug,scribe_match=debug,tower_http=debug";

/// Default directives when `RUST_LOG` is unset, in production. Per-rule
/// cascade decisions stay off; per-request outcomes stay on.
pub const PRODUCTION_DIRECTIVES: &str = "info,scribe_api=info,scribe_match=info,tower_http=warn";

const fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Development => DEVELOPMENT_DIRECTIVES,
        Environment::Production => PRODUCTION_DIRECTIVES,
    }
}

fn env_filter(env: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(env)))
}

/// Install the global subscriber for `env`. `RUST_LOG` overrides the default
/// directives (e.g. `RUST_LOG=scribe_match=trace` to see rejected fuzzy
/// candidates).
pub fn init_tracing(env: &Environment) {
    let pretty = env.is_development().then(|| {
        fmt::layer()
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter(env))
    });

    let json = env.is_production().then(|| {
        fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_filter(env_filter(env))
    });

    tracing_subscriber::registry().with(pretty).with(json).init();

    tracing::info!(environment = ?env, "tracing initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        assert!(EnvFilter::try_new(DEVELOPMENT_DIRECTIVES).is_ok());
        assert!(EnvFilter::try_new(PRODUCTION_DIRECTIVES).is_ok());
    }

    #[test]
    fn test_default_directives_per_environment() {
        assert_eq!(
            default_directives(&Environment::Development),
            DEVELOPMENT_DIRECTIVES
        );
        assert_eq!(
            default_directives(&Environment::Production),
            PRODUCTION_DIRECTIVES
        );
    }
}
