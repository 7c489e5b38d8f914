//! Account token resolution.

use console::Term;
use secrecy::SecretString;

use crate::config::loader::Config;
use crate::config::validation::validate_token;
use crate::error::{Error, Result};

/// Resolve the token from the CLI/environment, the config file, or an
/// interactive hidden prompt, in that order.
pub fn resolve_token(cli_token: Option<String>, config: &Config) -> Result<SecretString> {
    resolve_token_with(cli_token, config, prompt_token)
}

/// Same as [`resolve_token`] with an injectable prompt.
pub fn resolve_token_with<F>(
    cli_token: Option<String>,
    config: &Config,
    prompt: F,
) -> Result<SecretString>
where
    F: FnOnce() -> std::io::Result<String>,
{
    let token = match cli_token.or_else(|| config.account.token.clone()) {
        Some(token) if !token.trim().is_empty() => token,
        _ => prompt().map_err(|e| Error::Config(format!("Failed to read token: {}", e)))?,
    };

    let token = token.trim().to_string();
    validate_token(&token)?;
    Ok(SecretString::from(token))
}

fn prompt_token() -> std::io::Result<String> {
    let term = Term::stderr();
    term.write_line("Enter your Discord token:")?;
    term.read_secure_line()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    const TOKEN: &str = "MTAxNjQ5.GZx3Yk.abcdefghijklmnopqrstuvwx";

    fn no_prompt() -> std::io::Result<String> {
        panic!("prompt should not be called")
    }

    #[test]
    fn test_cli_token_wins() {
        let mut config = Config::default();
        config.account.token = Some("config_token_that_is_long_enough".into());
        let token = resolve_token_with(Some(TOKEN.into()), &config, no_prompt).unwrap();
        assert_eq!(token.expose_secret(), TOKEN);
    }

    #[test]
    fn test_config_token_used() {
        let mut config = Config::default();
        config.account.token = Some(format!("  {}\n", TOKEN));
        let token = resolve_token_with(None, &config, no_prompt).unwrap();
        assert_eq!(token.expose_secret(), TOKEN);
    }

    #[test]
    fn test_prompt_fallback() {
        let config = Config::default();
        let token = resolve_token_with(Some(String::new()), &config, || Ok(TOKEN.to_string()))
            .unwrap();
        assert_eq!(token.expose_secret(), TOKEN);
    }

    #[test]
    fn test_prompt_invalid_token() {
        let config = Config::default();
        assert!(resolve_token_with(None, &config, || Ok("nope".to_string())).is_err());
    }
}
