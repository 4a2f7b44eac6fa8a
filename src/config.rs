use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args};
use url::Url;

/// Database connection flags shared by both tools.
#[derive(Debug, Clone, Args)]
pub struct ConnectionArgs {
    /// Database host
    #[arg(long, env = "HOT100_DB_HOST", required_unless_present = "database_url")]
    pub host: Option<String>,

    /// Database port
    #[arg(long, env = "HOT100_DB_PORT", default_value_t = 3306)]
    pub port: u16,

    /// Database user
    #[arg(long, env = "HOT100_DB_USER", required_unless_present = "database_url")]
    pub user: Option<String>,

    /// Database password
    #[arg(long, env = "HOT100_DB_PASSWORD", required_unless_present = "database_url", hide_env_values = true)]
    pub password: Option<String>,

    /// Database name
    #[arg(long, env = "HOT100_DB_NAME", required_unless_present = "database_url")]
    pub database: Option<String>,

    /// MySQL ssl-mode (disabled, preferred, required, verify_ca, verify_identity)
    #[arg(long, value_name = "MODE", default_value = "preferred")]
    pub ssl_mode: String,

    /// Full connection URL; overrides the individual flags (e.g. `sqlite://hot100.db?mode=rwc`)
    #[arg(long, env = "HOT100_DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

impl ConnectionArgs {
    /// Resolve the connection URL handed to the sqlx Any driver.
    pub fn url(&self) -> Result<String> {
        if let Some(u) = self.database_url.as_deref().filter(|u| !u.trim().is_empty()) {
            return Ok(u.to_string());
        }
        let host = required(&self.host, "--host")?;
        let user = required(&self.user, "--user")?;
        let password = required(&self.password, "--password")?;
        let database = required(&self.database, "--database")?;

        let mut url = Url::parse(&format!("mysql://{host}:{}", self.port))
            .with_context(|| format!("invalid database host: {host}"))?;
        url.set_username(user)
            .map_err(|_| anyhow!("cannot use user `{user}` in a connection URL"))?;
        url.set_password(Some(password))
            .map_err(|_| anyhow!("cannot use password in a connection URL"))?;
        url.set_path(&format!("/{database}"));
        url.query_pairs_mut().append_pair("ssl-mode", &self.ssl_mode);
        Ok(url.to_string())
    }

    /// URL with the password masked, for log lines.
    pub fn redacted_url(&self) -> String {
        match self.url().ok().and_then(|u| Url::parse(&u).ok()) {
            Some(mut u) => {
                if u.password().is_some() {
                    let _ = u.set_password(Some("***"));
                }
                u.to_string()
            }
            None => "<invalid url>".to_string(),
        }
    }
}

fn required<'a>(value: &'a Option<String>, flag: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| anyhow!("{flag} is required when --database-url is not given"))
}

/// Verbosity flags shared by both tools.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct VerbosityArgs {
    /// Enable verbose output
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub debug: bool,
}
