use crate::Environment;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install color-eyre: error locations shown, environment section hidden.
///
/// Call first thing in `main`. A second install is ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Directives used when `RUST_LOG` is unset
pub fn default_directives(environment: &Environment) -> &'static str {
    if environment.is_production() {
        "info,tower_http=info,mongodb=warn"
    } else {
        "debug,mongodb=info,hyper=info"
    }
}

/// Initialize the global subscriber.
///
/// - Production: flattened JSON lines without targets
/// - Development: pretty multi-line output
///
/// Both carry `tracing_error::ErrorLayer`, so `color-eyre` reports include the
/// span trace of `#[instrument]`ed store and service calls. `RUST_LOG`
/// overrides [`default_directives`]. Calling this again (as tests do) is a
/// no-op.
///
/// ```ignore
/// let config = Config::from_env()?;
/// init_tracing(&config.environment);
/// ```
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(environment)));

    let (json, pretty) = if environment.is_production() {
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .flatten_event(true);
        (Some(layer), None)
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .pretty();
        (None, Some(layer))
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .with(tracing_error::ErrorLayer::default())
        .try_init();

    match installed {
        Ok(()) => tracing::info!(?environment, "Tracing initialized"),
        Err(_) => tracing::debug!("Tracing already initialized"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_quiet_mongodb_in_production() {
        let directives = default_directives(&Environment::Production);
        assert!(directives.starts_with("info"));
        assert!(directives.contains("mongodb=warn"));
    }

    #[test]
    fn test_default_directives_are_verbose_in_development() {
        assert!(default_directives(&Environment::Development).starts_with("debug"));
    }

    #[test]
    fn test_default_directives_parse() {
        for environment in [Environment::Development, Environment::Production] {
            assert!(default_directives(&environment)
                .parse::<EnvFilter>()
                .is_ok());
        }
    }

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing(&Environment::Development);
        init_tracing(&Environment::Production);
    }

    #[test]
    fn test_init_tracing_honours_rust_log() {
        temp_env::with_var("RUST_LOG", Some("domain_catalog=trace"), || {
            init_tracing(&Environment::Development);
        });
    }
}
