use gauge_core::{GaugeError, Result};
use std::path::{Path, PathBuf};

/// Load `.env` from the working directory or the nearest parent into the
/// process environment.  Variables that are already set keep their value.
///
/// A missing file is normal and only logged at `debug`.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment from '{}'", path.display());
            Some(path)
        }
        Err(e) if e.not_found() => {
            tracing::debug!("No .env file found");
            None
        }
        Err(e) => {
            tracing::warn!("Ignoring .env file: {e}");
            None
        }
    }
}

/// Load one specific env file.  Unlike [`load_dotenv`] a missing or malformed
/// file is an error.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    dotenvy::from_path(path)
        .map_err(|e| GaugeError::Config(format!("cannot load '{}': {e}", path.display())))
}

/// Replace every `${NAME}` in `input` with `lookup(NAME)`.
///
/// A `$` not followed by `{` is kept as-is.  Unset variables and unterminated
/// references are config errors.
pub fn expand(input: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            return Err(GaugeError::Config(format!(
                "unterminated '${{' in '{input}'"
            )));
        };
        let name = &after[..end];
        let value = lookup(name).ok_or_else(|| {
            GaugeError::Config(format!("environment variable '{name}' is not set"))
        })?;
        out.push_str(&value);
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(name: &str) -> Option<String> {
        match name {
            "STATION" => Some("1234".into()),
            "TOKEN" => Some("abc".into()),
            _ => None,
        }
    }

    #[test]
    fn expands_multiple_references() {
        let url = expand("https://x/station/${STATION}?token=${TOKEN}", vars).unwrap();
        assert_eq!(url, "https://x/station/1234?token=abc");
    }

    #[test]
    fn leaves_plain_dollars_alone() {
        assert_eq!(expand("cost $5", vars).unwrap(), "cost $5");
    }

    #[test]
    fn unset_variable_is_an_error() {
        assert!(expand("${NOPE}", vars).is_err());
    }

    #[test]
    fn unterminated_reference_is_an_error() {
        assert!(expand("http://${STATION", vars).is_err());
    }

    #[test]
    fn env_file_feeds_expansion() {
        let path = std::env::temp_dir().join(format!("gauge-{}.env", std::process::id()));
        std::fs::write(
            &path,
            "GAUGE_ENV_FILE_TOKEN=from-file\nGAUGE_ENV_FILE_KEPT=from-file\n",
        )
        .unwrap();
        std::env::set_var("GAUGE_ENV_FILE_KEPT", "from-process");

        load_env_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let lookup = |name: &str| std::env::var(name).ok();
        assert_eq!(
            expand("t=${GAUGE_ENV_FILE_TOKEN}", lookup).unwrap(),
            "t=from-file"
        );
        assert_eq!(
            expand("${GAUGE_ENV_FILE_KEPT}", lookup).unwrap(),
            "from-process"
        );
    }

    #[test]
    fn missing_env_file_is_an_error() {
        let err = load_env_file("/definitely/not/here/.env").unwrap_err();
        assert!(matches!(err, GaugeError::Config(_)));
    }
}
