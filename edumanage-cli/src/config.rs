//! Configuration module
//!
//! Handles CLI configuration: server URL and login credentials.

use anyhow::{Context, Result, bail};
use edumanage_client::EduManageClient;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the EduManage server
    pub server_url: String,
    /// Account name used to log in
    pub username: Option<String>,
    /// Password used to log in
    pub password: Option<String>,
    /// Print JSON instead of formatted text
    pub json: bool,
}

impl Config {
    /// The configured credentials, or an error naming what is missing
    pub fn credentials(&self) -> Result<(&str, &str)> {
        let Some(username) = self
            .username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
        else {
            bail!("No username given (use --username or EDUMANAGE_USERNAME)");
        };

        let Some(password) = self.password.as_deref() else {
            bail!("No password given (use --password or EDUMANAGE_PASSWORD)");
        };

        Ok((username, password))
    }

    /// Build a client and log in with the configured credentials
    pub async fn connect(&self) -> Result<EduManageClient> {
        let (username, password) = self.credentials()?;

        let client = EduManageClient::new(&self.server_url)?;
        client
            .login(username, password, false)
            .await
            .with_context(|| format!("Failed to log in to {} as {}", self.server_url, username))?;

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(username: Option<&str>, password: Option<&str>) -> Config {
        Config {
            server_url: "http://localhost:8080".to_string(),
            username: username.map(str::to_string),
            password: password.map(str::to_string),
            json: false,
        }
    }

    #[test]
    fn test_credentials_present() {
        let config = config(Some(" admin "), Some("secret"));
        assert_eq!(config.credentials().unwrap(), ("admin", "secret"));
    }

    #[test]
    fn test_missing_username() {
        let err = config(None, Some("secret")).credentials().unwrap_err();
        assert!(err.to_string().contains("username"));

        let err = config(Some("  "), Some("secret")).credentials().unwrap_err();
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn test_missing_password() {
        let err = config(Some("admin"), None).credentials().unwrap_err();
        assert!(err.to_string().contains("password"));
    }
}
