/*
 * This file is part of owneo.
 *
 * Copyright (C) 2025 owneo contributors
 *
 * owneo is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * owneo is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with owneo. If not, see <https://www.gnu.org/licenses/>.
 */

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `OWNEO_LOG=ow_core=trace`
pub const LOG_ENV: &str = "OWNEO_LOG";

/// Filter used when `OWNEO_LOG` is not set
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    let directive = std::env::var(LOG_ENV).unwrap_or_else(|_| default_directive(verbose).to_string());
    EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Invalid {} filter {:?}: {}, falling back to defaults", LOG_ENV, directive, e);
        EnvFilter::new(default_directive(verbose))
    })
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so reports and JSON on stdout stay parseable.
pub fn init_logging(verbose: bool) {
    let result = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(verbose))
        .try_init();
    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "info");
        assert_eq!(default_directive(true), "debug");
    }

    #[test]
    #[serial]
    fn test_env_overrides_verbosity() {
        let old = std::env::var(LOG_ENV).ok();
        std::env::set_var(LOG_ENV, "warn");
        assert_eq!(env_filter(true).to_string(), "warn");

        std::env::set_var(LOG_ENV, "ow_core=loud");
        assert_eq!(env_filter(false).to_string(), "info");

        match old {
            Some(v) => std::env::set_var(LOG_ENV, v),
            None => std::env::remove_var(LOG_ENV),
        }
    }
}
