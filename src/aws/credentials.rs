//! Ambient AWS credential resolution: environment variables first, then the
//! shared credentials file. Resolved once at startup and shared read-only.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{GatewayError, Result};

#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

/// Walk the credential chain. `profile` (from settings) takes precedence over
/// `AWS_PROFILE`; the file default is the `default` profile.
pub fn resolve(profile: Option<&str>) -> Result<Credentials> {
    if let Some(credentials) = from_env() {
        return Ok(credentials);
    }

    let path = shared_credentials_path();
    let profile_name = profile
        .map(str::to_string)
        .or_else(|| non_empty_env("AWS_PROFILE"))
        .unwrap_or_else(|| "default".to_string());

    if let Some(credentials) = from_shared_file(&path, &profile_name)? {
        return Ok(credentials);
    }

    Err(GatewayError::Credentials(format!(
        "no AWS credentials in the environment or in profile '{}' of {}",
        profile_name,
        path.display()
    )))
}

fn from_env() -> Option<Credentials> {
    let access_key_id = non_empty_env("AWS_ACCESS_KEY_ID")?;
    let secret_access_key = non_empty_env("AWS_SECRET_ACCESS_KEY")?;
    Some(Credentials {
        access_key_id,
        secret_access_key,
        session_token: non_empty_env("AWS_SESSION_TOKEN"),
    })
}

fn shared_credentials_path() -> PathBuf {
    if let Some(path) = non_empty_env("AWS_SHARED_CREDENTIALS_FILE") {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".aws").join("credentials")
}

fn from_shared_file(path: &Path, profile: &str) -> Result<Option<Credentials>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    Ok(credentials_from_ini(&content, profile))
}

fn credentials_from_ini(content: &str, profile: &str) -> Option<Credentials> {
    let sections = parse_ini(content);
    let section = sections.get(profile)?;
    Some(Credentials {
        access_key_id: section.get("aws_access_key_id")?.clone(),
        secret_access_key: section.get("aws_secret_access_key")?.clone(),
        session_token: section.get("aws_session_token").cloned(),
    })
}

// Minimal INI reader covering the shared credentials file format: sections,
// `key = value` lines, `#`/`;` comments.
fn parse_ini(content: &str) -> HashMap<String, HashMap<String, String>> {
    let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            current = Some(name.trim().to_string());
            continue;
        }
        if let (Some(section), Some((key, value))) = (&current, line.split_once('=')) {
            sections
                .entry(section.clone())
                .or_default()
                .insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    sections
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
