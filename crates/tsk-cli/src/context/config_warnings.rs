use tsk_config::TskConfig;

/// Env vars read directly rather than through the config loader.
const NON_CONFIG_VARS: &[&str] = &["TASKSYNC_LOG", "TASKSYNC_KEYRING_SERVICE"];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &TskConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &TskConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut warnings = Vec::new();

    for (key, _) in env {
        let Some(rest) = key.strip_prefix(tsk_config::ENV_PREFIX) else {
            continue;
        };
        if NON_CONFIG_VARS.contains(&key.as_str()) || rest.contains("__") {
            continue;
        }
        warnings.push(format!(
            "{key} is not a recognised setting. Use double underscores to nest (example: TASKSYNC_API__BASE_URL)."
        ));
    }

    if config.auth.user_id.is_empty() != config.auth.token.is_empty() {
        warnings.push(
            "Only one of auth.user_id and auth.token is configured; both are required, falling back to stored credentials."
                .to_string(),
        );
    }

    warnings
}
